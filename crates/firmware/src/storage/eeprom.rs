//! EEPROM emulation on rotating Flash blocks
//!
//! Keyboard settings are written a few bytes at a time, but Flash can only
//! be erased in whole blocks. `FlashEeprom` keeps a RAM shadow of the
//! emulated EEPROM; writes only touch the shadow and `commit()` programs a
//! fresh image into the spare block.
//!
//! # Block Rotation
//!
//! The image alternates between [`EEPROM_BLOCKS`] consecutive blocks. Each
//! image carries a sequence number; at startup the valid image with the
//! newest sequence wins. A commit never erases the block holding the
//! active image, so a commit torn by power loss falls back to the previous
//! image instead of losing it.
//!
//! # Block Layout
//!
//! ```text
//! offset 0        magic "EEPM"
//! offset 4        version (u16 LE)
//! offset 6        length N (u16 LE)
//! offset 8        sequence (u16 LE)
//! offset 10       EEPROM contents (N bytes)
//! offset 10 + N   CRC32 over header + contents (u32 LE)
//! ```
//!
//! If no block holds a valid image the EEPROM loads erased (all `0xFF`),
//! which plugins read as "never configured".

use crate::platform::{FlashInterface, PlatformError, Result};
use crate::{log_debug, log_error, log_info, log_warn};
use crc::{Crc, CRC_32_ISO_HDLC};
use spacecadet_core::settings::{StorageError, ERASED_BYTE};
use spacecadet_core::traits::Storage;

/// Block magic ("EEPM")
pub const EEPROM_MAGIC: [u8; 4] = *b"EEPM";

/// Block format version
pub const EEPROM_VERSION: u16 = 1;

/// Number of Flash blocks the image rotates through
pub const EEPROM_BLOCKS: usize = 2;

/// Size of CRC32 field (4 bytes)
const CRC_SIZE: usize = 4;

/// Largest program page supported
const MAX_PAGE_SIZE: usize = 256;

/// Chunk size used when checking a stored image
const VERIFY_CHUNK: usize = 64;

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Returns true if sequence `a` is newer than `b`, allowing wrap-around
fn is_newer(a: u16, b: u16) -> bool {
    (a.wrapping_sub(b) as i16) > 0
}

/// Header stored at the start of each image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EepromHeader {
    /// Format version
    pub version: u16,
    /// Length of the EEPROM contents in bytes
    pub length: u16,
    /// Image sequence number
    pub sequence: u16,
}

impl EepromHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 10;

    pub fn new(length: u16, sequence: u16) -> Self {
        Self {
            version: EEPROM_VERSION,
            length,
            sequence,
        }
    }

    /// Serialize header to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&EEPROM_MAGIC);
        buf[4..6].copy_from_slice(&self.version.to_le_bytes());
        buf[6..8].copy_from_slice(&self.length.to_le_bytes());
        buf[8..10].copy_from_slice(&self.sequence.to_le_bytes());
        buf
    }

    /// Deserialize header from bytes
    ///
    /// Returns `None` if the magic does not match.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE || buf[0..4] != EEPROM_MAGIC {
            return None;
        }

        Some(Self {
            version: u16::from_le_bytes([buf[4], buf[5]]),
            length: u16::from_le_bytes([buf[6], buf[7]]),
            sequence: u16::from_le_bytes([buf[8], buf[9]]),
        })
    }
}

/// Commit statistics for wear monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EepromStats {
    /// Block rewrites performed
    pub commits: u32,
    /// Commits skipped because nothing changed
    pub skipped_commits: u32,
    /// True if a valid image was found at startup
    pub loaded: bool,
    /// Block holding the active image
    pub active_block: Option<u8>,
    /// Sequence number of the active image
    pub sequence: u16,
}

/// Emulated EEPROM of `N` bytes rotating over [`EEPROM_BLOCKS`] Flash blocks
///
/// # Example
///
/// ```
/// use spacecadet_core::traits::Storage;
/// use spacecadet_firmware::platform::mock::MockFlash;
/// use spacecadet_firmware::storage::FlashEeprom;
///
/// let mut eeprom = FlashEeprom::<_, 64>::new(MockFlash::new(), 0x040000).unwrap();
/// eeprom.write(0, &[0, 200, 0]).unwrap();
/// eeprom.commit().unwrap();
///
/// // Contents survive a reboot
/// let mut eeprom = FlashEeprom::<_, 64>::new(eeprom.into_flash(), 0x040000).unwrap();
/// let mut buf = [0u8; 3];
/// eeprom.read(0, &mut buf).unwrap();
/// assert_eq!(buf, [0, 200, 0]);
/// ```
pub struct FlashEeprom<F: FlashInterface, const N: usize> {
    /// Flash interface
    flash: F,
    /// Address of the first block
    address: u32,
    /// RAM copy of the EEPROM contents
    shadow: [u8; N],
    /// Shadow differs from Flash
    dirty: bool,
    /// Block and sequence of the active image
    active: Option<(u8, u16)>,
    stats: EepromStats,
}

impl<F: FlashInterface, const N: usize> FlashEeprom<F, N> {
    /// Open the emulated EEPROM stored in the blocks starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if `address` is unaligned, the
    /// blocks do not fit the Flash or a block is too small for `N` bytes
    /// plus header and CRC. Returns a Flash error if a block cannot be read.
    pub fn new(flash: F, address: u32) -> Result<Self> {
        let block_size = flash.block_size() as usize;
        let page_size = flash.page_size() as usize;

        if N > u16::MAX as usize || EepromHeader::SIZE + N + CRC_SIZE > block_size {
            return Err(PlatformError::InvalidConfig);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE || block_size % page_size != 0 {
            return Err(PlatformError::InvalidConfig);
        }
        if !address.is_multiple_of(flash.block_size()) {
            return Err(PlatformError::InvalidConfig);
        }
        let span = (EEPROM_BLOCKS * block_size) as u64;
        if address as u64 + span > flash.capacity() as u64 {
            return Err(PlatformError::InvalidConfig);
        }

        let mut eeprom = Self {
            flash,
            address,
            shadow: [ERASED_BYTE; N],
            dirty: false,
            active: None,
            stats: EepromStats::default(),
        };
        eeprom.load()?;
        Ok(eeprom)
    }

    /// Commit statistics
    pub fn stats(&self) -> EepromStats {
        self.stats
    }

    /// True if there are uncommitted writes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flash address of block `block`
    pub fn block_address(&self, block: u8) -> u32 {
        self.address + block as u32 * self.flash.block_size()
    }

    pub fn flash(&self) -> &F {
        &self.flash
    }

    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Release the Flash interface, dropping uncommitted writes
    pub fn into_flash(self) -> F {
        self.flash
    }

    /// Load the newest valid image, falling back to erased contents
    fn load(&mut self) -> Result<()> {
        let mut newest: Option<(u8, u16)> = None;

        for block in 0..EEPROM_BLOCKS as u8 {
            let Some(sequence) = self.scan_block(block)? else {
                continue;
            };
            match newest {
                Some((_, best)) if !is_newer(sequence, best) => {}
                _ => newest = Some((block, sequence)),
            }
        }

        let Some((block, sequence)) = newest else {
            log_info!("EEPROM has no valid image, starting erased");
            return Ok(());
        };

        let data_address = self.block_address(block) + EepromHeader::SIZE as u32;
        self.flash.read(data_address, &mut self.shadow)?;

        self.active = Some((block, sequence));
        self.stats.loaded = true;
        self.stats.active_block = Some(block);
        self.stats.sequence = sequence;
        log_debug!("EEPROM loaded from block {} (sequence {})", block, sequence);
        Ok(())
    }

    /// Check the image in `block`, returning its sequence if it is valid
    fn scan_block(&mut self, block: u8) -> Result<Option<u16>> {
        let address = self.block_address(block);

        let mut header_buf = [0u8; EepromHeader::SIZE];
        self.flash.read(address, &mut header_buf)?;

        let Some(header) = EepromHeader::from_bytes(&header_buf) else {
            return Ok(None);
        };

        if header.version != EEPROM_VERSION || header.length as usize != N {
            log_warn!(
                "EEPROM block {} format mismatch (version {}, length {})",
                block,
                header.version,
                header.length
            );
            return Ok(None);
        }

        let mut digest = CRC32.digest();
        digest.update(&header_buf);

        let mut chunk = [0u8; VERIFY_CHUNK];
        let mut offset = 0;
        while offset < N {
            let n = (N - offset).min(VERIFY_CHUNK);
            self.flash.read(
                address + (EepromHeader::SIZE + offset) as u32,
                &mut chunk[..n],
            )?;
            digest.update(&chunk[..n]);
            offset += n;
        }

        let mut crc_buf = [0u8; CRC_SIZE];
        self.flash
            .read(address + (EepromHeader::SIZE + N) as u32, &mut crc_buf)?;

        if digest.finalize() != u32::from_le_bytes(crc_buf) {
            log_warn!("EEPROM block {} checksum mismatch", block);
            return Ok(None);
        }

        Ok(Some(header.sequence))
    }

    fn checksum(header: &[u8], contents: &[u8]) -> u32 {
        let mut digest = CRC32.digest();
        digest.update(header);
        digest.update(contents);
        digest.finalize()
    }

    /// Byte `pos` of the image (header, contents, CRC, then padding)
    fn image_byte(header: &[u8], contents: &[u8], crc: &[u8], pos: usize) -> u8 {
        if pos < header.len() {
            header[pos]
        } else if pos < header.len() + contents.len() {
            contents[pos - header.len()]
        } else if pos < header.len() + contents.len() + crc.len() {
            crc[pos - header.len() - contents.len()]
        } else {
            ERASED_BYTE
        }
    }

    /// Erase `block` and program the current shadow with `sequence`
    fn program(&mut self, block: u8, sequence: u16) -> Result<()> {
        let address = self.block_address(block);
        let block_size = self.flash.block_size();
        self.flash.erase(address, block_size)?;

        let header = EepromHeader::new(N as u16, sequence).to_bytes();
        let crc = Self::checksum(&header, &self.shadow).to_le_bytes();
        let total = EepromHeader::SIZE + N + CRC_SIZE;

        let page_size = self.flash.page_size() as usize;
        let mut page = [ERASED_BYTE; MAX_PAGE_SIZE];
        let mut offset = 0;

        while offset < total {
            for (i, slot) in page[..page_size].iter_mut().enumerate() {
                *slot = Self::image_byte(&header, &self.shadow, &crc, offset + i);
            }
            self.flash.write(address + offset as u32, &page[..page_size])?;
            offset += page_size;
        }

        Ok(())
    }

    fn range(offset: u16, len: usize) -> core::result::Result<core::ops::Range<usize>, StorageError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > N {
            return Err(StorageError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl<F: FlashInterface, const N: usize> Storage for FlashEeprom<F, N> {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> core::result::Result<(), StorageError> {
        let range = Self::range(offset, buf.len())?;
        buf.copy_from_slice(&self.shadow[range]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> core::result::Result<(), StorageError> {
        let range = Self::range(offset, data.len())?;
        if self.shadow[range.clone()] != *data {
            self.shadow[range].copy_from_slice(data);
            self.dirty = true;
        }
        Ok(())
    }

    fn commit(&mut self) -> core::result::Result<(), StorageError> {
        if !self.dirty {
            self.stats.skipped_commits += 1;
            return Ok(());
        }

        // The active block is never the target
        let (block, sequence) = match self.active {
            Some((block, sequence)) => {
                ((block + 1) % EEPROM_BLOCKS as u8, sequence.wrapping_add(1))
            }
            None => (0, 1),
        };

        if let Err(e) = self.program(block, sequence) {
            log_error!("EEPROM commit to block {} failed: {}", block, e.as_str());
            return Err(StorageError::CommitFailed);
        }

        self.active = Some((block, sequence));
        self.dirty = false;
        self.stats.commits += 1;
        self.stats.active_block = Some(block);
        self.stats.sequence = sequence;
        Ok(())
    }

    fn capacity(&self) -> u16 {
        N as u16
    }
}
