//! Mock Flash implementation for testing
//!
//! Provides in-memory Flash simulation for unit tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use std::vec::Vec;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Flash capacity (4 MB, same as Pico 2 W)
const FLASH_CAPACITY: u32 = 4 * 1024 * 1024;

/// Minimum firmware size (protect first 256 KB)
const FIRMWARE_SIZE: u32 = 0x40000;

/// Simulated supply state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Power {
    /// Operations complete normally
    On,
    /// The next write is cut in half, then power is gone
    Failing,
    /// Writes and erases have no effect
    Off,
}

/// Mock Flash implementation
///
/// Simulates Flash storage in memory for testing. Supports:
/// - Read/write/erase operations with 1→0 write semantics
/// - Corruption injection for testing checksum handling
/// - Erase and write call counting
/// - Power-loss simulation for reliability testing
///
/// # Example
///
/// ```
/// use spacecadet_firmware::platform::mock::MockFlash;
/// use spacecadet_firmware::platform::traits::FlashInterface;
///
/// let mut flash = MockFlash::new();
///
/// flash.erase(0x040000, 4096).unwrap();
/// flash.write(0x040000, &[0x00, 0xC8, 0x00]).unwrap();
///
/// let mut buf = [0u8; 3];
/// flash.read(0x040000, &mut buf).unwrap();
/// assert_eq!(buf, [0x00, 0xC8, 0x00]);
/// assert_eq!(flash.get_erase_count(0x040000), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Number of write calls
    write_calls: u32,
    /// Simulated supply state
    power: Power,
}

impl MockFlash {
    /// Create a new, fully erased mock Flash instance
    pub fn new() -> Self {
        let block_count = (FLASH_CAPACITY / BLOCK_SIZE) as usize;
        Self {
            storage: std::vec![0xFF; FLASH_CAPACITY as usize],
            erase_counts: std::vec![0; block_count],
            write_calls: 0,
            power: Power::On,
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        self.storage[address as usize..(address as usize + len)].to_vec()
    }

    /// Overwrite bytes at address with a corrupt pattern
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        self.storage[address as usize..address as usize + len].fill(0xAA);
    }

    /// Number of times the block containing `address` has been erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Number of write calls since creation
    pub fn get_write_calls(&self) -> u32 {
        self.write_calls
    }

    /// Simulate power loss during next write operation
    ///
    /// The next write only half completes; every later write or erase is
    /// dropped until [`restore_power`](Self::restore_power) is called.
    pub fn simulate_power_loss(&mut self) {
        self.power = Power::Failing;
    }

    /// End a simulated power loss
    pub fn restore_power(&mut self) {
        self.power = Power::On;
    }

    fn is_writable(&self, address: u32) -> bool {
        (FIRMWARE_SIZE..FLASH_CAPACITY).contains(&address)
    }

    fn is_block_aligned(&self, address: u32) -> bool {
        address.is_multiple_of(BLOCK_SIZE)
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if address as usize + buf.len() > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.is_writable(address) {
            return Err(FlashError::InvalidAddress.into());
        }

        if address as usize + data.len() > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }

        self.write_calls += 1;

        let write_len = match self.power {
            Power::On => data.len(),
            Power::Failing => {
                self.power = Power::Off;
                data.len() / 2
            }
            Power::Off => 0,
        };

        // Flash can only change bits from 1→0
        let start = address as usize;
        for (cell, byte) in self.storage[start..start + write_len].iter_mut().zip(data) {
            *cell &= byte;
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !self.is_writable(address) {
            return Err(FlashError::InvalidAddress.into());
        }

        if !self.is_block_aligned(address) || !size.is_multiple_of(BLOCK_SIZE) {
            return Err(FlashError::InvalidAddress.into());
        }

        if address + size > FLASH_CAPACITY {
            return Err(FlashError::InvalidAddress.into());
        }

        if self.power == Power::Off {
            return Ok(());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first = (address / BLOCK_SIZE) as usize;
        let count = (size / BLOCK_SIZE) as usize;
        for erases in &mut self.erase_counts[first..first + count] {
            *erases += 1;
        }

        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_flash_read_write() {
        let mut flash = MockFlash::new();
        flash.erase(0x040000, 4096).unwrap();

        let data = [0x45, 0x45, 0x50, 0x4D];
        flash.write(0x040000, &data).unwrap();

        let mut buf = [0u8; 4];
        flash.read(0x040000, &mut buf).unwrap();
        assert_eq!(buf, data);
        assert_eq!(flash.get_write_calls(), 1);
    }

    #[test]
    fn test_mock_flash_erase() {
        let mut flash = MockFlash::new();
        flash.erase(0x040000, 4096).unwrap();
        flash.write(0x040000, &[0x55; 256]).unwrap();

        flash.erase(0x040000, 4096).unwrap();

        let contents = flash.get_contents(0x040000, 256);
        assert!(contents.iter().all(|&b| b == 0xFF));
        assert_eq!(flash.get_erase_count(0x040000), 2);
    }

    #[test]
    fn test_mock_flash_invalid_address() {
        let mut flash = MockFlash::new();

        // Firmware region is protected
        assert!(flash.write(0x000000, &[0x00; 4]).is_err());
        assert!(flash.erase(0x000000, 4096).is_err());

        let mut buf = [0u8; 4];
        assert!(flash.read(FLASH_CAPACITY, &mut buf).is_err());
    }

    #[test]
    fn test_mock_flash_unaligned_erase() {
        let mut flash = MockFlash::new();
        assert!(flash.erase(0x040100, 4096).is_err());
        assert!(flash.erase(0x040000, 1024).is_err());
    }

    #[test]
    fn test_mock_flash_power_loss() {
        let mut flash = MockFlash::new();
        flash.erase(0x040000, 4096).unwrap();

        flash.simulate_power_loss();
        flash.write(0x040000, &[0x55; 256]).unwrap();
        flash.write(0x040100, &[0x55; 16]).unwrap();

        let contents = flash.get_contents(0x040000, 272);
        assert_eq!(&contents[..128], &[0x55; 128]);
        assert!(contents[128..].iter().all(|&b| b == 0xFF));

        flash.restore_power();
        flash.write(0x040100, &[0x55; 16]).unwrap();
        assert_eq!(flash.get_contents(0x040100, 16), [0x55; 16]);
    }

    #[test]
    fn test_mock_flash_write_only_clears_bits() {
        let mut flash = MockFlash::new();
        flash.erase(0x040000, 4096).unwrap();

        flash.write(0x040000, &[0x0F]).unwrap();
        flash.write(0x040000, &[0xFF]).unwrap();

        let mut buf = [0u8; 1];
        flash.read(0x040000, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);
    }
}
