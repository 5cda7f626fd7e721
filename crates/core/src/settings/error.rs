//! Settings error types
//!
//! Provides error types for slice allocation and storage access.

/// Errors from slice allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceError {
    /// Requested a slice of zero bytes
    ZeroSize,
    /// Not enough space left in the settings area
    OutOfSpace,
}

impl SliceError {
    /// Static description, usable where `Display` is unavailable (defmt)
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceError::ZeroSize => "zero-size slice requested",
            SliceError::OutOfSpace => "settings area exhausted",
        }
    }
}

impl core::fmt::Display for SliceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Access outside the storage area
    OutOfBounds,
    /// Staging a write failed
    WriteFailed,
    /// Making staged writes durable failed
    CommitFailed,
}

impl StorageError {
    /// Static description, usable where `Display` is unavailable (defmt)
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageError::OutOfBounds => "storage access out of bounds",
            StorageError::WriteFailed => "storage write failed",
            StorageError::CommitFailed => "storage commit failed",
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
