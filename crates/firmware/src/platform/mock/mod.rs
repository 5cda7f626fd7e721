//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use spacecadet_firmware::platform::mock::MockFlash;
//! use spacecadet_firmware::platform::traits::FlashInterface;
//!
//! let mut flash = MockFlash::new();
//! flash.erase(0x040000, 4096).unwrap();
//! flash.write(0x040000, b"EEPM").unwrap();
//! ```

#![cfg(any(test, feature = "mock"))]

mod flash;

pub use flash::MockFlash;
