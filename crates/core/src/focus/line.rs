//! Focus over a single received request line

use super::{Focus, FocusError};
use core::iter::Peekable;
use core::str::SplitAsciiWhitespace;

/// Split a request line into its command and the remaining arguments.
///
/// Returns `None` for blank lines.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(pos) => Some((&line[..pos], line[pos..].trim_start())),
        None => Some((line, "")),
    }
}

/// Focus implementation over the arguments of one request line.
///
/// Replies are collected into a fixed-capacity buffer of `OUT` bytes.
/// Text that does not fit is dropped and [`overflowed`](Self::overflowed)
/// is set.
pub struct LineFocus<'a, const OUT: usize> {
    args: Peekable<SplitAsciiWhitespace<'a>>,
    output: heapless::String<OUT>,
    overflowed: bool,
}

impl<'a, const OUT: usize> LineFocus<'a, OUT> {
    /// Create over the argument part of a request line
    pub fn new(args: &'a str) -> Self {
        Self {
            args: args.split_ascii_whitespace().peekable(),
            output: heapless::String::new(),
            overflowed: false,
        }
    }

    /// Reply text collected so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// True if some reply text was dropped
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Consume and return the collected reply
    pub fn into_output(self) -> (heapless::String<OUT>, bool) {
        (self.output, self.overflowed)
    }
}

impl<const OUT: usize> Focus for LineFocus<'_, OUT> {
    fn is_eol(&mut self) -> bool {
        self.args.peek().is_none()
    }

    fn next_token(&mut self) -> Option<&str> {
        self.args.next()
    }

    fn write_str(&mut self, s: &str) -> Result<(), FocusError> {
        if self.output.push_str(s).is_ok() {
            return Ok(());
        }

        for c in s.chars() {
            if self.output.push(c).is_err() {
                break;
            }
        }
        self.overflowed = true;
        Err(FocusError::OutputOverflow)
    }
}
