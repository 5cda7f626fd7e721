//! Focus session
//!
//! Processes one request line at a time and produces the reply the host
//! reads back over the serial link.
//!
//! # Reply format
//!
//! ```text
//! > spacecadet.timeout
//! < 200\r\n
//! < .\r\n
//! ```
//!
//! Handlers write values followed by a separator. The session strips the
//! trailing separator, closes the last line with `\r\n` and appends the
//! terminator line. A command no handler consumed still gets the terminator,
//! so the host never waits on an unknown command.

use crate::core::focus::{
    split_command, EventHandlerResult, LineFocus, HELP_COMMAND, LINE_END, SEPARATOR,
};
use crate::log_debug;

/// Terminator line closing every reply
pub const REPLY_TERMINATOR: &str = ".";

/// Bytes reserved at the end of each reply for the final line end and the
/// terminator line
const TRAILER_LEN: usize = LINE_END.len() + REPLY_TERMINATOR.len() + LINE_END.len();

/// Session statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Non-blank request lines processed
    pub commands_processed: u32,
    /// Commands no handler consumed (help excluded)
    pub unhandled_commands: u32,
    /// Replies that were cut to fit the reply buffer
    pub truncated_replies: u32,
}

/// Reply to one request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusReply<const OUT: usize> {
    text: heapless::String<OUT>,
    consumed: bool,
    truncated: bool,
}

impl<const OUT: usize> FocusReply<OUT> {
    /// Full reply text including the terminator line
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Reply bytes ready for the transport
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// True if a handler consumed the command
    pub fn consumed(&self) -> bool {
        self.consumed
    }

    /// True if handler output was dropped to fit the buffer
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Line-oriented Focus session
///
/// `OUT` is the reply buffer capacity in bytes. It must leave room for the
/// terminator line; smaller buffers fail to compile.
#[derive(Debug, Default)]
pub struct FocusSession<const OUT: usize> {
    stats: SessionStats,
}

impl<const OUT: usize> FocusSession<OUT> {
    /// Compile-time check that a reply can always hold the terminator
    const FITS_TRAILER: () = assert!(OUT >= TRAILER_LEN, "Focus reply buffer too small");

    /// Create a new session
    pub fn new() -> Self {
        let () = Self::FITS_TRAILER;
        Self {
            stats: SessionStats::default(),
        }
    }

    /// Get session statistics
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session statistics
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Process one request line.
    ///
    /// `handler` is called with the command name and a Focus over the
    /// arguments. Returns `None` for blank lines, which get no reply.
    pub fn process_line<H>(&mut self, line: &str, mut handler: H) -> Option<FocusReply<OUT>>
    where
        H: FnMut(&str, &mut LineFocus<'_, OUT>) -> EventHandlerResult,
    {
        let () = Self::FITS_TRAILER;
        let (command, args) = split_command(line)?;
        self.stats.commands_processed += 1;

        let mut focus = LineFocus::<OUT>::new(args);
        let result = handler(command, &mut focus);

        let consumed = result == EventHandlerResult::EventConsumed;
        if !consumed && command != HELP_COMMAND {
            self.stats.unhandled_commands += 1;
            log_debug!("Focus: unhandled command {}", command);
        }

        let (output, overflowed) = focus.into_output();
        let (text, cut) = Self::finish_reply(&output);
        let truncated = overflowed || cut;
        if truncated {
            self.stats.truncated_replies += 1;
            log_debug!("Focus: reply to {} truncated", command);
        }

        Some(FocusReply {
            text,
            consumed,
            truncated,
        })
    }

    /// Close the handler output and append the terminator line.
    ///
    /// Returns the reply and whether handler output had to be cut.
    fn finish_reply(output: &str) -> (heapless::String<OUT>, bool) {
        let budget = OUT - TRAILER_LEN;
        let mut body = output.trim_end_matches(SEPARATOR);

        let cut = body.len() > budget;
        if cut {
            let mut end = budget;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body = &body[..end];
            // A cut inside a line end leaves a lone '\r'
            body = body.strip_suffix('\r').unwrap_or(body);
            body = body.trim_end_matches(SEPARATOR);
        }

        // Pushes below fit: body plus trailer never exceeds OUT
        let mut text = heapless::String::new();
        let _ = text.push_str(body);
        if !body.is_empty() && !body.ends_with(LINE_END) {
            let _ = text.push_str(LINE_END);
        }
        let _ = text.push_str(REPLY_TERMINATOR);
        let _ = text.push_str(LINE_END);

        (text, cut)
    }
}
