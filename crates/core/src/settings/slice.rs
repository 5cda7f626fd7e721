//! Storage slice allocation
//!
//! Each plugin reserves one fixed-size slice of the persistent settings
//! area at setup time. Slices are handed out back to back and never move,
//! so a plugin can keep its base offset for all later reads and writes.

use super::error::SliceError;

/// Value of an erased (never written) storage byte
pub const ERASED_BYTE: u8 = 0xFF;

/// Base offset of a reserved slice within the settings area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SliceBase(u16);

impl SliceBase {
    /// Create a slice base from a raw offset
    pub const fn new(offset: u16) -> Self {
        Self(offset)
    }

    /// Raw offset within the settings area
    pub const fn offset(self) -> u16 {
        self.0
    }
}

/// Sequential slice allocator over a settings area
#[derive(Debug, Clone)]
pub struct SliceAllocator {
    /// First offset handed out
    start: u16,
    /// Next free offset
    next: u16,
    /// End of the settings area (exclusive)
    end: u16,
}

impl SliceAllocator {
    /// Create an allocator covering `[start, start + capacity)`
    pub const fn new(start: u16, capacity: u16) -> Self {
        Self {
            start,
            next: start,
            end: start.saturating_add(capacity),
        }
    }

    /// Reserve a slice of `size` bytes
    ///
    /// # Errors
    ///
    /// Returns `SliceError::ZeroSize` for empty requests and
    /// `SliceError::OutOfSpace` if the area cannot hold `size` more bytes.
    pub fn request_slice(&mut self, size: u16) -> Result<SliceBase, SliceError> {
        if size == 0 {
            return Err(SliceError::ZeroSize);
        }
        if size > self.remaining() {
            return Err(SliceError::OutOfSpace);
        }

        let base = SliceBase(self.next);
        self.next += size;
        Ok(base)
    }

    /// Bytes already reserved
    pub fn used(&self) -> u16 {
        self.next - self.start
    }

    /// Bytes still available
    pub fn remaining(&self) -> u16 {
        self.end - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_are_sequential() {
        let mut alloc = SliceAllocator::new(16, 64);
        let a = alloc.request_slice(3).unwrap();
        let b = alloc.request_slice(8).unwrap();

        assert_eq!(a.offset(), 16);
        assert_eq!(b.offset(), 19);
        assert_eq!(alloc.used(), 11);
        assert_eq!(alloc.remaining(), 53);
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut alloc = SliceAllocator::new(0, 64);
        assert_eq!(alloc.request_slice(0), Err(SliceError::ZeroSize));
        assert_eq!(alloc.used(), 0);
    }

    #[test]
    fn test_out_of_space() {
        let mut alloc = SliceAllocator::new(0, 4);
        assert!(alloc.request_slice(3).is_ok());
        assert_eq!(alloc.request_slice(2), Err(SliceError::OutOfSpace));
        // Exact fit still succeeds
        assert_eq!(alloc.request_slice(1).unwrap().offset(), 3);
        assert_eq!(alloc.remaining(), 0);
    }

    #[test]
    fn test_capacity_saturates() {
        let alloc = SliceAllocator::new(u16::MAX - 1, 16);
        assert_eq!(alloc.remaining(), 1);
    }
}
