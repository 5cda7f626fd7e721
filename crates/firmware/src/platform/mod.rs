//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the flash memory that
//! backs persistent settings. All platform-specific code is isolated here.

pub mod error;
pub mod traits;

// Mock implementation (feature-gated)
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{FlashError, PlatformError, Result};
pub use traits::FlashInterface;
