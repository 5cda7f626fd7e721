//! Space Cadet operating mode

/// Space Cadet operating mode
///
/// The discriminants are the values exchanged over Focus and persisted in
/// the settings slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Mode {
    /// Tap/hold distinction with timeout
    #[default]
    On = 0,
    /// Feature disabled
    Off = 1,
    /// Tap emits immediately without waiting for the timeout
    NoDelay = 2,
}

impl Mode {
    /// Convert from u8 value to Mode
    ///
    /// Unknown values map to `Off`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::On,
            2 => Self::NoDelay,
            _ => Self::Off,
        }
    }

    /// Wire value of this mode
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::NoDelay => "no_delay",
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode.as_u8()
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
