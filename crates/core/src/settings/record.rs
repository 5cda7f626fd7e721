//! Fixed-size settings record codec

/// Largest record a plugin may persist through the generic helpers
pub const MAX_RECORD_SIZE: usize = 32;

/// A settings record with a fixed binary layout
///
/// Implementors define their exact on-storage size and a little-endian
/// encoding. `SIZE` is also the size of the slice the plugin requests.
pub trait Record: Sized {
    /// Encoded size in bytes (at most [`MAX_RECORD_SIZE`])
    const SIZE: usize;

    /// Encode into `buf`, which is exactly `SIZE` bytes long
    fn encode(&self, buf: &mut [u8]);

    /// Decode from `buf`, which is exactly `SIZE` bytes long
    ///
    /// Returns `None` if the bytes do not form a record.
    fn decode(buf: &[u8]) -> Option<Self>;
}
