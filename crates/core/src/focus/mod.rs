//! Focus command protocol
//!
//! Focus is a line-oriented request/response protocol used by host tools
//! to configure the keyboard at runtime. A request is a single line made
//! of a command name followed by whitespace-separated arguments; handlers
//! answer by sending values and the session terminates every reply with a
//! line holding a single `.`.
//!
//! The transport is owned by the host firmware; this module defines the
//! handler-facing [`Focus`] trait and [`LineFocus`], an implementation over
//! one already-received line.

pub mod line;

pub use line::{split_command, LineFocus};

use core::fmt::Write;

/// Command that asks every handler to list the commands it supports
pub const HELP_COMMAND: &str = "help";

/// Separator emitted after each sent value
pub const SEPARATOR: char = ' ';

/// Line ending used in replies
pub const LINE_END: &str = "\r\n";

/// Outcome of offering an event to a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandlerResult {
    /// Not handled (or handled but other plugins should see it too)
    Ok,
    /// Handled; stop offering the event to other plugins
    EventConsumed,
}

/// Focus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusError {
    /// An argument was expected but the line ended
    MissingArgument,
    /// The argument is not a number in range for the target type
    InvalidNumber,
    /// The reply did not fit the output buffer
    OutputOverflow,
}

impl FocusError {
    /// Static description
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusError::MissingArgument => "missing argument",
            FocusError::InvalidNumber => "invalid number",
            FocusError::OutputOverflow => "reply buffer overflow",
        }
    }
}

impl core::fmt::Display for FocusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler-facing side of a Focus request.
pub trait Focus {
    /// Returns true if no arguments are left on the request line.
    fn is_eol(&mut self) -> bool;

    /// Next whitespace-separated argument, if any.
    fn next_token(&mut self) -> Option<&str>;

    /// Append raw text to the reply.
    fn write_str(&mut self, s: &str) -> Result<(), FocusError>;

    /// Read the next argument as a `u8`.
    fn read_u8(&mut self) -> Result<u8, FocusError> {
        let token = self.next_token().ok_or(FocusError::MissingArgument)?;
        token.parse().map_err(|_| FocusError::InvalidNumber)
    }

    /// Read the next argument as a `u16`.
    fn read_u16(&mut self) -> Result<u16, FocusError> {
        let token = self.next_token().ok_or(FocusError::MissingArgument)?;
        token.parse().map_err(|_| FocusError::InvalidNumber)
    }

    /// Send a `u8` value followed by the separator.
    fn send_u8(&mut self, value: u8) -> Result<(), FocusError> {
        self.send_u16(value as u16)
    }

    /// Send a `u16` value followed by the separator.
    fn send_u16(&mut self, value: u16) -> Result<(), FocusError> {
        let mut digits = heapless::String::<6>::new();
        write!(digits, "{}{}", value, SEPARATOR).map_err(|_| FocusError::OutputOverflow)?;
        self.write_str(&digits)
    }

    /// Send a string followed by the separator.
    fn send_str(&mut self, s: &str) -> Result<(), FocusError> {
        self.write_str(s)?;
        let mut sep = [0u8; 4];
        self.write_str(SEPARATOR.encode_utf8(&mut sep))
    }

    /// Send a string as a full reply line.
    fn send_line(&mut self, s: &str) -> Result<(), FocusError> {
        self.write_str(s)?;
        self.write_str(LINE_END)
    }

    /// List `name` if `command` is the help request.
    ///
    /// Returns true when `command` was the help request, even if the reply
    /// buffer overflowed.
    fn handle_help(&mut self, command: &str, name: &str) -> bool {
        if command != HELP_COMMAND {
            return false;
        }
        let _ = self.send_line(name);
        true
    }
}
