//! Persisted Space Cadet settings record
//!
//! # Layout
//!
//! ```text
//! offset 0  u8   mode (wire value)
//! offset 1  u16  timeout in ms, little-endian
//! ```
//!
//! A record always carries a normalized mode byte (0, 1 or 2), so it can
//! never be mistaken for an erased slice (all `0xFF`).

use super::mode::Mode;
use crate::settings::Record;

/// Default tap timeout (ms)
pub const DEFAULT_TIMEOUT_MS: u16 = 200;

/// Settings persisted in the Space Cadet storage slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceCadetSettings {
    /// Operating mode
    pub mode: Mode,
    /// Tap timeout in milliseconds
    pub timeout: u16,
}

impl SpaceCadetSettings {
    /// Encoded size (and slice size) in bytes
    pub const SIZE: usize = 3;

    pub const fn new(mode: Mode, timeout: u16) -> Self {
        Self { mode, timeout }
    }
}

impl Default for SpaceCadetSettings {
    fn default() -> Self {
        Self::new(Mode::On, DEFAULT_TIMEOUT_MS)
    }
}

impl Record for SpaceCadetSettings {
    const SIZE: usize = SpaceCadetSettings::SIZE;

    fn encode(&self, buf: &mut [u8]) {
        buf[0] = self.mode.as_u8();
        buf[1..3].copy_from_slice(&self.timeout.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            mode: Mode::from_u8(buf[0]),
            timeout: u16::from_le_bytes([buf[1], buf[2]]),
        })
    }
}
