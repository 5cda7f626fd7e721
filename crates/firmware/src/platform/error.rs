//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;
use spacecadet_core::settings::{SliceError, StorageError};

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Flash drivers map their HAL-specific errors to these variants; settings
/// errors from the core crate are wrapped so plugin setup can use `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Flash operation failed
    Flash(FlashError),
    /// Settings storage operation failed
    Storage(StorageError),
    /// Settings slice could not be reserved
    Slice(SliceError),
    /// Invalid configuration provided
    InvalidConfig,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds, protected or unaligned)
    InvalidAddress,
    /// Flash is busy
    Busy,
}

impl PlatformError {
    /// Static description, usable from `defmt` log statements
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformError::Flash(FlashError::EraseFailed) => "flash erase failed",
            PlatformError::Flash(FlashError::WriteFailed) => "flash write failed",
            PlatformError::Flash(FlashError::ReadFailed) => "flash read failed",
            PlatformError::Flash(FlashError::InvalidAddress) => "flash address invalid",
            PlatformError::Flash(FlashError::Busy) => "flash busy",
            PlatformError::Storage(e) => e.as_str(),
            PlatformError::Slice(e) => e.as_str(),
            PlatformError::InvalidConfig => "invalid configuration",
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Flash(e) => write!(f, "Flash error: {:?}", e),
            PlatformError::Storage(e) => write!(f, "Storage error: {}", e),
            PlatformError::Slice(e) => write!(f, "Slice error: {}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

// From implementations for error conversion
impl From<FlashError> for PlatformError {
    fn from(error: FlashError) -> Self {
        PlatformError::Flash(error)
    }
}

impl From<StorageError> for PlatformError {
    fn from(error: StorageError) -> Self {
        PlatformError::Storage(error)
    }
}

impl From<SliceError> for PlatformError {
    fn from(error: SliceError) -> Self {
        PlatformError::Slice(error)
    }
}
