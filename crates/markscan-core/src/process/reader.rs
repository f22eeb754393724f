use crate::error::Result;

/// Trait for reading memory from a process or buffer
///
/// This trait enables mocking for tests and abstracts over different memory sources.
pub trait ReadMemory {
    /// Perform a single bounded read of up to `size` bytes at `address`.
    ///
    /// A short read is not an error: the returned buffer holds exactly the
    /// bytes the source produced, which may be fewer than requested or none.
    /// Implementations never retry.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;
}

impl<R: ReadMemory + ?Sized> ReadMemory for &R {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }
}
