//! Storage abstraction for persistent plugin settings.
//!
//! This module provides the `Storage` trait, modelled on EEPROM-style
//! settings storage: byte-addressed writes are staged and only become
//! durable on `commit()`. Erased bytes read as `0xFF`.

use crate::settings::{Record, SliceBase, StorageError, ERASED_BYTE, MAX_RECORD_SIZE};

/// Byte-addressed persistent settings storage.
///
/// This trait abstracts over different backends:
/// - `FlashEeprom` (in firmware crate) emulating EEPROM on a flash block
/// - `MockStorage` for host testing
///
/// # Example
///
/// ```
/// use spacecadet_core::settings::SliceBase;
/// use spacecadet_core::traits::{MockStorage, Storage};
///
/// let mut storage = MockStorage::<64>::new();
/// let base = SliceBase::new(4);
/// assert!(storage.is_slice_uninitialized(base, 3).unwrap());
///
/// storage.write(4, &[0, 200, 0]).unwrap();
/// storage.commit().unwrap();
/// assert!(!storage.is_slice_uninitialized(base, 3).unwrap());
/// ```
pub trait Storage {
    /// Read `buf.len()` bytes starting at `offset`.
    ///
    /// Staged (uncommitted) writes are visible to reads.
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Stage `data` at `offset`.
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError>;

    /// Make staged writes durable.
    fn commit(&mut self) -> Result<(), StorageError>;

    /// Size of the storage area in bytes.
    fn capacity(&self) -> u16;

    /// Returns true if every byte of the slice is still erased.
    fn is_slice_uninitialized(&mut self, base: SliceBase, size: u16) -> Result<bool, StorageError> {
        let mut chunk = [0u8; MAX_RECORD_SIZE];
        let mut offset = base.offset();
        let mut left = size as usize;

        while left > 0 {
            let n = left.min(chunk.len());
            self.read(offset, &mut chunk[..n])?;
            if chunk[..n].iter().any(|&b| b != ERASED_BYTE) {
                return Ok(false);
            }
            offset = offset.checked_add(n as u16).ok_or(StorageError::OutOfBounds)?;
            left -= n;
        }

        Ok(true)
    }

    /// Read a record from the slice at `base`.
    ///
    /// Returns `Ok(None)` if the bytes do not decode.
    fn get_record<R: Record>(&mut self, base: SliceBase) -> Result<Option<R>, StorageError> {
        if R::SIZE > MAX_RECORD_SIZE {
            return Err(StorageError::OutOfBounds);
        }

        let mut buf = [0u8; MAX_RECORD_SIZE];
        self.read(base.offset(), &mut buf[..R::SIZE])?;
        Ok(R::decode(&buf[..R::SIZE]))
    }

    /// Stage a record into the slice at `base`.
    ///
    /// Does not commit.
    fn put_record<R: Record>(&mut self, base: SliceBase, record: &R) -> Result<(), StorageError> {
        if R::SIZE > MAX_RECORD_SIZE {
            return Err(StorageError::OutOfBounds);
        }

        let mut buf = [0u8; MAX_RECORD_SIZE];
        record.encode(&mut buf[..R::SIZE]);
        self.write(base.offset(), &buf[..R::SIZE])
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// In-memory storage for testing.
///
/// Keeps a staged copy (what reads see) and a committed copy (what would
/// survive a reset), and counts commits so tests can verify persistence.
///
/// # Example
///
/// ```
/// use spacecadet_core::traits::{MockStorage, Storage};
///
/// let mut storage = MockStorage::<16>::new();
/// storage.write(0, &[1, 2]).unwrap();
/// assert_eq!(storage.committed()[0], 0xFF);
///
/// storage.commit().unwrap();
/// assert_eq!(storage.committed()[..2], [1, 2]);
/// assert_eq!(storage.commit_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockStorage<const N: usize> {
    staged: [u8; N],
    committed: [u8; N],
    commits: u32,
    fail_writes: bool,
    fail_commits: bool,
}

impl<const N: usize> MockStorage<N> {
    /// Creates erased storage (all `0xFF`).
    pub fn new() -> Self {
        Self {
            staged: [ERASED_BYTE; N],
            committed: [ERASED_BYTE; N],
            commits: 0,
            fail_writes: false,
            fail_commits: false,
        }
    }

    /// Creates storage whose committed contents start with `image`.
    pub fn with_contents(image: &[u8]) -> Self {
        let mut storage = Self::new();
        let n = image.len().min(N);
        storage.staged[..n].copy_from_slice(&image[..n]);
        storage.committed[..n].copy_from_slice(&image[..n]);
        storage
    }

    /// Committed contents (what survives a reset).
    pub fn committed(&self) -> &[u8; N] {
        &self.committed
    }

    /// Number of successful commits.
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    /// Simulates a reset: uncommitted writes are lost.
    pub fn reset(&mut self) {
        self.staged = self.committed;
    }

    /// Makes subsequent writes fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes subsequent commits fail.
    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    fn range(offset: u16, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > N {
            return Err(StorageError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl<const N: usize> Default for MockStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Storage for MockStorage<N> {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, buf.len())?;
        buf.copy_from_slice(&self.staged[range]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::WriteFailed);
        }
        let range = Self::range(offset, data.len())?;
        self.staged[range].copy_from_slice(data);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        if self.fail_commits {
            return Err(StorageError::CommitFailed);
        }
        self.committed = self.staged;
        self.commits += 1;
        Ok(())
    }

    fn capacity(&self) -> u16 {
        N.min(u16::MAX as usize) as u16
    }
}
