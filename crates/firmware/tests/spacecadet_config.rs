//! End-to-end tests for Space Cadet settings persistence
//!
//! Each test boots the plugin against a storage backend, drives it through
//! Focus request lines and boots again to check what survived.

use spacecadet_core::focus::EventHandlerResult;
use spacecadet_core::settings::{SliceAllocator, SliceBase};
use spacecadet_core::spacecadet::{Mode, SpaceCadet};
use spacecadet_core::traits::{MockStorage, Storage};
use spacecadet_firmware::communication::focus::FocusSession;
use spacecadet_firmware::config::{
    default_spacecadet, DEFAULT_TIMEOUT_MS, EEPROM_FLASH_ADDRESS, EEPROM_SIZE,
    FOCUS_REPLY_CAPACITY, SETTINGS_AREA_START,
};
use spacecadet_firmware::platform::mock::MockFlash;
use spacecadet_firmware::plugins::SpaceCadetConfig;
use spacecadet_firmware::storage::FlashEeprom;

type Eeprom = FlashEeprom<MockFlash, EEPROM_SIZE>;

/// One boot of the keyboard: plugin state plus the runtime it configures
struct Keyboard<S: Storage> {
    storage: S,
    allocator: SliceAllocator,
    plugin: SpaceCadetConfig,
    spacecadet: SpaceCadet,
    session: FocusSession<FOCUS_REPLY_CAPACITY>,
}

impl<S: Storage> Keyboard<S> {
    fn boot(storage: S) -> Self {
        let area = storage.capacity() - SETTINGS_AREA_START;
        let mut keyboard = Self {
            storage,
            allocator: SliceAllocator::new(SETTINGS_AREA_START, area),
            plugin: SpaceCadetConfig::new(),
            spacecadet: default_spacecadet(),
            session: FocusSession::new(),
        };

        let result = keyboard
            .plugin
            .on_setup(&mut keyboard.allocator, &mut keyboard.storage, &mut keyboard.spacecadet)
            .unwrap();
        assert_eq!(result, EventHandlerResult::Ok);
        keyboard
            .plugin
            .disable_if_unconfigured(&mut keyboard.storage, &mut keyboard.spacecadet)
            .unwrap();
        keyboard
    }

    /// Send one Focus request line and return the reply text
    fn focus(&mut self, line: &str) -> String {
        let Self {
            storage,
            plugin,
            spacecadet,
            session,
            ..
        } = self;

        session
            .process_line(line, |command, focus| {
                plugin.on_focus_event(command, focus, storage, spacecadet)
            })
            .map(|reply| reply.as_str().to_string())
            .unwrap_or_default()
    }
}

#[test]
fn test_fresh_storage_boots_disabled_with_defaults() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());

    assert_eq!(keyboard.plugin.settings_base(), Some(SliceBase::new(0)));
    assert_eq!(keyboard.spacecadet.mode(), Mode::Off);
    assert!(!keyboard.spacecadet.active());
    assert_eq!(keyboard.spacecadet.timeout(), DEFAULT_TIMEOUT_MS);

    assert_eq!(keyboard.focus("spacecadet.mode"), "1\r\n.\r\n");
    assert_eq!(
        keyboard.focus("spacecadet.timeout"),
        format!("{}\r\n.\r\n", DEFAULT_TIMEOUT_MS)
    );

    // Booting does not write anything
    assert_eq!(keyboard.storage.commit_count(), 0);
}

#[test]
fn test_settings_survive_reboot_on_mock_storage() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());

    assert_eq!(keyboard.focus("spacecadet.mode 2"), ".\r\n");
    assert_eq!(keyboard.focus("spacecadet.timeout 350"), ".\r\n");
    assert_eq!(keyboard.storage.commit_count(), 2);
    assert_eq!(&keyboard.storage.committed()[..3], &[2, 0x5E, 0x01]);

    let mut rebooted = Keyboard::boot(keyboard.storage);
    assert_eq!(rebooted.spacecadet.mode(), Mode::NoDelay);
    assert!(rebooted.spacecadet.active());
    assert_eq!(rebooted.spacecadet.timeout(), 350);
    assert_eq!(rebooted.focus("spacecadet.mode"), "2\r\n.\r\n");
    assert_eq!(rebooted.focus("spacecadet.timeout"), "350\r\n.\r\n");
}

#[test]
fn test_settings_survive_reboot_on_flash() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);
    assert_eq!(keyboard.spacecadet.mode(), Mode::Off);

    keyboard.focus("spacecadet.mode 0");
    keyboard.focus("spacecadet.timeout 1000");
    assert_eq!(keyboard.storage.stats().commits, 2);

    // Each commit goes to the block not holding the active image
    let flash = keyboard.storage.into_flash();
    assert_eq!(flash.get_erase_count(EEPROM_FLASH_ADDRESS), 1);
    assert_eq!(flash.get_erase_count(EEPROM_FLASH_ADDRESS + 4096), 1);

    let eeprom = Eeprom::new(flash, EEPROM_FLASH_ADDRESS).unwrap();
    let rebooted = Keyboard::boot(eeprom);
    assert_eq!(rebooted.spacecadet.mode(), Mode::On);
    assert_eq!(rebooted.spacecadet.timeout(), 1000);
}

#[test]
fn test_repeated_value_skips_flash_program() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);

    keyboard.focus("spacecadet.timeout 250");
    keyboard.focus("spacecadet.timeout 250");

    let stats = keyboard.storage.stats();
    assert_eq!(stats.commits, 1);
    assert_eq!(stats.skipped_commits, 1);
    assert_eq!(keyboard.storage.flash().get_erase_count(EEPROM_FLASH_ADDRESS), 1);
}

#[test]
fn test_corrupted_newest_image_rolls_back() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);
    keyboard.focus("spacecadet.mode 2");
    keyboard.focus("spacecadet.timeout 120");

    let newest = keyboard.storage.block_address(1);
    let mut flash = keyboard.storage.into_flash();
    flash.inject_corruption(newest + 10, 2);

    // The image from the first command is still there
    let eeprom = Eeprom::new(flash, EEPROM_FLASH_ADDRESS).unwrap();
    let rebooted = Keyboard::boot(eeprom);
    assert_eq!(rebooted.spacecadet.mode(), Mode::NoDelay);
    assert_eq!(rebooted.spacecadet.timeout(), DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_corrupted_flash_boots_unconfigured() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);
    keyboard.focus("spacecadet.mode 2");
    keyboard.focus("spacecadet.timeout 120");

    let blocks = [keyboard.storage.block_address(0), keyboard.storage.block_address(1)];
    let mut flash = keyboard.storage.into_flash();
    for block in blocks {
        flash.inject_corruption(block + 10, 2);
    }

    let eeprom = Eeprom::new(flash, EEPROM_FLASH_ADDRESS).unwrap();
    let rebooted = Keyboard::boot(eeprom);
    assert_eq!(rebooted.spacecadet.mode(), Mode::Off);
    assert_eq!(rebooted.spacecadet.timeout(), DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_power_loss_keeps_committed_settings() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);
    keyboard.focus("spacecadet.mode 2");
    keyboard.focus("spacecadet.timeout 350");

    keyboard.storage.flash_mut().simulate_power_loss();
    keyboard.focus("spacecadet.timeout 400");
    assert_eq!(keyboard.spacecadet.timeout(), 400);

    let mut flash = keyboard.storage.into_flash();
    flash.restore_power();

    let eeprom = Eeprom::new(flash, EEPROM_FLASH_ADDRESS).unwrap();
    let mut rebooted = Keyboard::boot(eeprom);
    assert_eq!(rebooted.spacecadet.mode(), Mode::NoDelay);
    assert_eq!(rebooted.spacecadet.timeout(), 350);
    assert_eq!(rebooted.focus("spacecadet.timeout"), "350\r\n.\r\n");
}

#[test]
fn test_power_loss_on_first_commit_boots_unconfigured() {
    let eeprom = Eeprom::new(MockFlash::new(), EEPROM_FLASH_ADDRESS).unwrap();
    let mut keyboard = Keyboard::boot(eeprom);

    keyboard.storage.flash_mut().simulate_power_loss();
    keyboard.focus("spacecadet.timeout 500");

    // The in-memory value is kept for this session
    assert_eq!(keyboard.spacecadet.timeout(), 500);

    let mut flash = keyboard.storage.into_flash();
    flash.restore_power();

    let eeprom = Eeprom::new(flash, EEPROM_FLASH_ADDRESS).unwrap();
    let rebooted = Keyboard::boot(eeprom);
    assert_eq!(rebooted.spacecadet.mode(), Mode::Off);
    assert_eq!(rebooted.spacecadet.timeout(), DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_help_lists_both_commands() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());

    assert_eq!(
        keyboard.focus("help"),
        "spacecadet.mode\r\nspacecadet.timeout\r\n.\r\n"
    );
    assert_eq!(keyboard.session.stats().unhandled_commands, 0);
}

#[test]
fn test_invalid_arguments_leave_settings_untouched() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());
    keyboard.focus("spacecadet.timeout 300");
    let commits = keyboard.storage.commit_count();

    assert_eq!(keyboard.focus("spacecadet.timeout soon"), ".\r\n");
    assert_eq!(keyboard.focus("spacecadet.timeout 70000"), ".\r\n");
    assert_eq!(keyboard.focus("spacecadet.mode -1"), ".\r\n");

    assert_eq!(keyboard.spacecadet.timeout(), 300);
    assert_eq!(keyboard.spacecadet.mode(), Mode::Off);
    assert_eq!(keyboard.storage.commit_count(), commits);
}

#[test]
fn test_unknown_mode_value_selects_off() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());
    keyboard.focus("spacecadet.mode 2");
    assert_eq!(keyboard.spacecadet.mode(), Mode::NoDelay);

    keyboard.focus("spacecadet.mode 9");
    assert_eq!(keyboard.spacecadet.mode(), Mode::Off);
    assert_eq!(keyboard.focus("spacecadet.mode"), "1\r\n.\r\n");
}

#[test]
fn test_unrelated_commands_pass_through() {
    let mut keyboard = Keyboard::boot(MockStorage::<64>::new());

    assert_eq!(keyboard.focus("keymap.custom 1 2 3"), ".\r\n");
    assert_eq!(keyboard.focus("   "), "");
    assert_eq!(keyboard.session.stats().commands_processed, 1);
    assert_eq!(keyboard.session.stats().unhandled_commands, 1);
    assert_eq!(keyboard.storage.commit_count(), 0);
}

#[test]
fn test_slice_follows_earlier_plugin() {
    let mut storage = MockStorage::<64>::new();
    let mut allocator = SliceAllocator::new(SETTINGS_AREA_START, storage.capacity());
    let earlier = allocator.request_slice(10).unwrap();
    assert_eq!(earlier.offset(), 0);

    let mut plugin = SpaceCadetConfig::new();
    let mut spacecadet = SpaceCadet::new();
    plugin
        .on_setup(&mut allocator, &mut storage, &mut spacecadet)
        .unwrap();

    assert_eq!(plugin.settings_base(), Some(SliceBase::new(10)));
    assert_eq!(allocator.used(), 13);
    assert_eq!(allocator.remaining(), 64 - 13);
}
