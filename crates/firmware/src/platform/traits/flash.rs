//! Flash interface trait
//!
//! This module defines the Flash interface that platform implementations must provide.
//! Flash backs the emulated EEPROM that holds plugin settings.

use crate::platform::Result;

/// Flash interface trait
///
/// Platform implementations must provide this interface for Flash read/write/erase operations.
///
/// # Flash Characteristics
///
/// - Flash is organized in erase blocks (4 KB on RP2350)
/// - Erase operations set all bytes to 0xFF
/// - Write operations can only change bits from 1→0 (must erase first to reset to 1)
/// - Programming happens in pages (256 bytes on RP2350)
///
/// # Safety Invariants
///
/// - Only one owner per Flash instance (no concurrent access)
/// - Must not erase/write the firmware image (implementations must validate addresses)
///
/// # Memory Layout (RP2350)
///
/// ```text
/// [Firmware]          0x000000 - 0x040000 (256 KB) - DO NOT WRITE
/// [Settings EEPROM]   0x040000 - 0x042000 (2 x 4 KB, rotating)
/// [Unused]            0x042000 - 0x400000
/// ```
pub trait FlashInterface {
    /// Read data from Flash
    ///
    /// Reads `buf.len()` bytes from Flash starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if address is out of bounds.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write data to Flash
    ///
    /// The target region must have been erased; writing only clears bits.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if address is in the firmware region.
    /// Returns `PlatformError::Flash(FlashError::WriteFailed)` if the write operation fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase Flash region
    ///
    /// Erases `size` bytes starting at `address`, setting them to 0xFF.
    /// Address and size must be multiples of [`block_size`](Self::block_size).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the region is
    /// protected or unaligned, `FlashError::EraseFailed` if the erase fails.
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size
    fn block_size(&self) -> u32;

    /// Program page size; writes are issued in whole pages
    fn page_size(&self) -> u32 {
        256
    }

    /// Total Flash capacity in bytes
    fn capacity(&self) -> u32;
}
