//! Space Cadet settings persistence and Focus configuration
//!
//! Keeps the Space Cadet mode and timeout in a slice of persistent storage
//! and lets host tools inspect and change them at runtime.
//!
//! # Focus Commands
//!
//! - `spacecadet.mode [0|1|2]` - read or set the mode (0 = on, 1 = off,
//!   2 = no delay; any other value selects off)
//! - `spacecadet.timeout [ms]` - read or set the tap timeout
//!
//! Every set is written to the slice and committed immediately.
//!
//! # Startup
//!
//! 1. [`SpaceCadetConfig::on_setup`] reserves the slice and loads the
//!    stored settings, if any.
//! 2. [`SpaceCadetConfig::disable_if_unconfigured`] turns Space Cadet off
//!    until the settings are written for the first time.

use crate::core::focus::{EventHandlerResult, Focus};
use crate::core::settings::{SliceAllocator, SliceBase};
use crate::core::spacecadet::{Mode, SpaceCadet, SpaceCadetSettings};
use crate::core::traits::Storage;
use crate::platform::Result;
use crate::{log_debug, log_error, log_info, log_warn};

/// Focus command for the operating mode
pub const CMD_MODE: &str = "spacecadet.mode";

/// Focus command for the tap timeout
pub const CMD_TIMEOUT: &str = "spacecadet.timeout";

/// Size of the Space Cadet settings slice
const SLICE_SIZE: u16 = SpaceCadetSettings::SIZE as u16;

/// Space Cadet configuration plugin
#[derive(Debug, Default)]
pub struct SpaceCadetConfig {
    /// Slice reserved at setup
    settings_base: Option<SliceBase>,
}

impl SpaceCadetConfig {
    pub const fn new() -> Self {
        Self {
            settings_base: None,
        }
    }

    /// Slice reserved at setup, if setup has run
    pub fn settings_base(&self) -> Option<SliceBase> {
        self.settings_base
    }

    /// Reserve the settings slice and load stored settings
    ///
    /// An uninitialized slice leaves `spacecadet` untouched. Calling this
    /// again reuses the slice reserved the first time.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Slice` if the slice cannot be reserved and
    /// `PlatformError::Storage` if the slice cannot be read.
    pub fn on_setup<S: Storage>(
        &mut self,
        allocator: &mut SliceAllocator,
        storage: &mut S,
        spacecadet: &mut SpaceCadet,
    ) -> Result<EventHandlerResult> {
        let base = match self.settings_base {
            Some(base) => base,
            None => {
                let base = allocator.request_slice(SLICE_SIZE)?;
                self.settings_base = Some(base);
                base
            }
        };

        if storage.is_slice_uninitialized(base, SLICE_SIZE)? {
            log_info!("SpaceCadet settings slice at {} uninitialized", base.offset());
            return Ok(EventHandlerResult::Ok);
        }

        match storage.get_record::<SpaceCadetSettings>(base)? {
            Some(settings) => {
                *spacecadet.settings_mut() = settings;
                log_info!(
                    "SpaceCadet settings loaded: mode {}, timeout {} ms",
                    settings.mode.as_u8(),
                    settings.timeout
                );
            }
            None => {
                log_warn!("SpaceCadet settings slice unreadable, keeping defaults");
            }
        }

        Ok(EventHandlerResult::Ok)
    }

    /// Disable Space Cadet if its settings were never written
    ///
    /// The change is in memory only. Does nothing before [`on_setup`](Self::on_setup).
    pub fn disable_if_unconfigured<S: Storage>(
        &self,
        storage: &mut S,
        spacecadet: &mut SpaceCadet,
    ) -> Result<()> {
        let Some(base) = self.settings_base else {
            return Ok(());
        };

        if storage.is_slice_uninitialized(base, SLICE_SIZE)? {
            spacecadet.disable();
            log_info!("SpaceCadet unconfigured, disabled");
        }

        Ok(())
    }

    /// Handle a Focus command
    ///
    /// Returns `EventConsumed` for the two Space Cadet commands and `Ok`
    /// for anything else, including `help` so other plugins can list
    /// their commands too.
    pub fn on_focus_event<F: Focus, S: Storage>(
        &mut self,
        command: &str,
        focus: &mut F,
        storage: &mut S,
        spacecadet: &mut SpaceCadet,
    ) -> EventHandlerResult {
        // Both names must be listed, so no short-circuit
        let mut help_handled = focus.handle_help(command, CMD_MODE);
        help_handled |= focus.handle_help(command, CMD_TIMEOUT);

        if help_handled {
            return EventHandlerResult::Ok;
        }

        match command {
            CMD_MODE => {
                if focus.is_eol() {
                    let _ = focus.send_u8(spacecadet.mode().as_u8());
                } else {
                    match focus.read_u8() {
                        Ok(value) => {
                            spacecadet.settings_mut().mode = Mode::from_u8(value);
                            self.persist(storage, spacecadet);
                        }
                        Err(_) => {
                            log_warn!("{}: invalid argument, mode unchanged", CMD_MODE);
                        }
                    }
                }
            }
            CMD_TIMEOUT => {
                if focus.is_eol() {
                    let _ = focus.send_u16(spacecadet.timeout());
                } else {
                    match focus.read_u16() {
                        Ok(timeout) => {
                            spacecadet.set_timeout(timeout);
                            self.persist(storage, spacecadet);
                        }
                        Err(_) => {
                            log_warn!("{}: invalid argument, timeout unchanged", CMD_TIMEOUT);
                        }
                    }
                }
            }
            _ => return EventHandlerResult::Ok,
        }

        EventHandlerResult::EventConsumed
    }

    /// Write the current settings to the slice and commit
    fn persist<S: Storage>(&self, storage: &mut S, spacecadet: &SpaceCadet) {
        let Some(base) = self.settings_base else {
            log_warn!("SpaceCadet settings changed before setup, not persisted");
            return;
        };

        let result = storage
            .put_record(base, spacecadet.settings())
            .and_then(|()| storage.commit());

        match result {
            Ok(()) => log_debug!(
                "SpaceCadet settings saved: mode {}, timeout {} ms",
                spacecadet.mode().as_u8(),
                spacecadet.timeout()
            ),
            Err(e) => log_error!("SpaceCadet settings not saved: {}", e.as_str()),
        }
    }
}
