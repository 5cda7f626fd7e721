//! Communication protocols
//!
//! Host-side configuration protocols. The byte transport (USB CDC, UART)
//! belongs to the board support code; these modules work on received lines.

pub mod focus;
