#![cfg_attr(not(test), no_std)]

//! spacecadet_firmware - settings persistence for the Space Cadet plugin
//!
//! This crate wires the pure logic of `spacecadet_core` to the keyboard:
//! Flash-backed EEPROM emulation, the Space Cadet configuration plugin and
//! the line-oriented Focus session.
//!
//! # Design Principles
//!
//! - **Platform seam**: board Flash drivers plug in through `FlashInterface`
//! - **Explicit state**: storage, Focus and Space Cadet state are passed in
//! - **Host testable**: everything runs on the host against mock Flash

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer
pub mod platform;

// Logging macros and re-exports from spacecadet_core
pub mod core;

// Build-time defaults and storage layout
pub mod config;

// Emulated EEPROM over Flash
pub mod storage;

// Configuration plugins
pub mod plugins;

// Focus protocol session
pub mod communication;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
