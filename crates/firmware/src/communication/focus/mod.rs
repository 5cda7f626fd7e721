//! Focus protocol session handling
//!
//! Turns received request lines into replies: the command name is split
//! off, handlers get a [`LineFocus`](crate::core::focus::LineFocus) over the
//! arguments, and the reply is terminated with a `.` line.

pub mod session;

pub use session::{FocusReply, FocusSession, SessionStats, REPLY_TERMINATOR};
