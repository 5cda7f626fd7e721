//! Persistent settings storage
//!
//! This module provides the Flash-backed implementation of the
//! [`Storage`](spacecadet_core::traits::Storage) trait used by plugins on
//! real hardware. Host tests can use
//! [`MockStorage`](spacecadet_core::traits::MockStorage) instead.

pub mod eeprom;

pub use eeprom::{
    EepromHeader, EepromStats, FlashEeprom, EEPROM_BLOCKS, EEPROM_MAGIC, EEPROM_VERSION,
};
