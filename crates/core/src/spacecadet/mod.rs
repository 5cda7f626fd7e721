//! Space Cadet Shift settings and live state
//!
//! Space Cadet lets a modifier key emit a different key when tapped alone.
//! The key handling itself belongs to the host firmware; this module only
//! holds the settings it consumes and the switches that toggle it.

pub mod mode;
pub mod settings;

pub use mode::Mode;
pub use settings::{SpaceCadetSettings, DEFAULT_TIMEOUT_MS};

/// Live Space Cadet state shared with the key handler
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpaceCadet {
    settings: SpaceCadetSettings,
}

impl SpaceCadet {
    /// Create with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with explicit initial settings
    pub fn with_settings(settings: SpaceCadetSettings) -> Self {
        Self { settings }
    }

    /// Enable with the tap/hold timeout
    pub fn enable(&mut self) {
        self.settings.mode = Mode::On;
    }

    /// Enable without waiting for the timeout on tap
    pub fn enable_without_delay(&mut self) {
        self.settings.mode = Mode::NoDelay;
    }

    /// Disable in memory (not persisted)
    pub fn disable(&mut self) {
        self.settings.mode = Mode::Off;
    }

    /// True unless the mode is `Off`
    pub fn active(&self) -> bool {
        self.settings.mode != Mode::Off
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    /// Tap timeout in milliseconds
    pub fn timeout(&self) -> u16 {
        self.settings.timeout
    }

    pub fn set_timeout(&mut self, timeout_ms: u16) {
        self.settings.timeout = timeout_ms;
    }

    pub fn settings(&self) -> &SpaceCadetSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SpaceCadetSettings {
        &mut self.settings
    }
}
