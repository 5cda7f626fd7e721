//! Settings persistence types
//!
//! This module provides the pieces a plugin needs to own a slice of
//! persistent storage: the slice allocator, the fixed-size record codec
//! and the associated error types. Storage backends live behind the
//! [`Storage`](crate::traits::Storage) trait.

pub mod error;
pub mod record;
pub mod slice;

pub use error::{SliceError, StorageError};
pub use record::{Record, MAX_RECORD_SIZE};
pub use slice::{SliceAllocator, SliceBase, ERASED_BYTE};
