//! Build-time configuration
//!
//! Factory defaults are generated by `build.rs` from environment variables
//! so a keymap build can ship different defaults without code changes:
//!
//! - `SPACECADET_DEFAULT_TIMEOUT_MS` - tap timeout in ms (default 200)
//!
//! The host must create its Space Cadet state with [`default_spacecadet`]
//! for the override to apply. There is no mode override: an unconfigured
//! slice always boots disabled and a configured one brings its own mode.
//!
//! The storage layout constants below place the emulated EEPROM in the
//! first Flash blocks after the firmware image.

use spacecadet_core::spacecadet::{Mode, SpaceCadet, SpaceCadetSettings};

include!(concat!(env!("OUT_DIR"), "/spacecadet_defaults.rs"));

/// Flash address of the first of the rotating EEPROM blocks
pub const EEPROM_FLASH_ADDRESS: u32 = 0x040000;

/// Size of the emulated EEPROM in bytes
pub const EEPROM_SIZE: usize = 1024;

/// Offset of the first plugin slice within the EEPROM
pub const SETTINGS_AREA_START: u16 = 0;

/// Bytes available to plugin slices
pub const SETTINGS_AREA_SIZE: u16 = EEPROM_SIZE as u16 - SETTINGS_AREA_START;

/// Capacity of a Focus reply buffer
pub const FOCUS_REPLY_CAPACITY: usize = 256;

/// Factory settings used until the slice is first written
pub const fn default_settings() -> SpaceCadetSettings {
    SpaceCadetSettings::new(Mode::On, DEFAULT_TIMEOUT_MS)
}

/// Space Cadet state to hand to plugin setup at boot
pub fn default_spacecadet() -> SpaceCadet {
    SpaceCadet::with_settings(default_settings())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_area_fits_eeprom() {
        assert!(SETTINGS_AREA_START as usize + SETTINGS_AREA_SIZE as usize <= EEPROM_SIZE);
    }

    #[test]
    fn test_default_settings() {
        let settings = default_settings();
        assert_eq!(settings.mode, Mode::On);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_default_spacecadet_uses_configured_timeout() {
        let spacecadet = default_spacecadet();
        assert!(spacecadet.active());
        assert_eq!(spacecadet.timeout(), DEFAULT_TIMEOUT_MS);
    }
}
