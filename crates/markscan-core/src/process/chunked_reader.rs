//! Chunked memory reading utilities.
//!
//! Regions are read in bounded chunks rather than whole, since a single
//! mapping of a large process can run into gigabytes. Every step issues one
//! read and never retries; a failed or empty read is reported as a gap.

use tracing::trace;

use super::{MemoryRegion, ReadMemory};

/// Default chunk size for memory reading (1MB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// A chunk of memory read from a process.
#[derive(Debug)]
pub struct MemoryChunk {
    /// Starting address of this chunk.
    pub address: u64,
    /// Number of bytes that were requested.
    pub requested: usize,
    /// The actual bytes read. Never empty, may be shorter than `requested`.
    pub data: Vec<u8>,
}

/// Result of one step of a chunked read.
#[derive(Debug)]
pub enum ReadOutcome {
    Chunk(MemoryChunk),
    /// The read failed or returned nothing. Consumers must not stitch data
    /// across a gap.
    Gap { address: u64, requested: usize },
}

/// Iterator that reads memory in fixed-size chunks.
///
/// The cursor always moves forward by the requested span, even when a read
/// comes back short. Bytes past a short read inside the span are therefore
/// skipped, an approximation kept so that later offsets stay aligned to the
/// chunk grid.
///
/// # Example
///
/// ```ignore
/// use markscan_core::process::{ChunkedMemoryIterator, ReadOutcome, DEFAULT_CHUNK_SIZE};
///
/// for outcome in ChunkedMemoryIterator::for_region(&reader, &region, DEFAULT_CHUNK_SIZE) {
///     if let ReadOutcome::Chunk(chunk) = outcome {
///         // Process chunk.data
///     }
/// }
/// ```
pub struct ChunkedMemoryIterator<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    current: u64,
    end: u64,
    chunk_size: usize,
}

impl<'a, R: ReadMemory + ?Sized> ChunkedMemoryIterator<'a, R> {
    /// Create a new chunked memory iterator over `[start, end)`.
    ///
    /// A `chunk_size` of zero yields nothing.
    pub fn new(reader: &'a R, start: u64, end: u64, chunk_size: usize) -> Self {
        Self {
            reader,
            current: start,
            end,
            chunk_size,
        }
    }

    pub fn for_region(reader: &'a R, region: &MemoryRegion, chunk_size: usize) -> Self {
        Self::new(reader, region.start, region.end, chunk_size)
    }
}

impl<R: ReadMemory + ?Sized> Iterator for ChunkedMemoryIterator<'_, R> {
    type Item = ReadOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end || self.chunk_size == 0 {
            return None;
        }

        let requested = (self.end - self.current).min(self.chunk_size as u64) as usize;
        let address = self.current;
        self.current += requested as u64;

        match self.reader.read_bytes(address, requested) {
            Ok(data) if !data.is_empty() => Some(ReadOutcome::Chunk(MemoryChunk {
                address,
                requested,
                data,
            })),
            Ok(_) => {
                trace!("Empty read at {:#x} ({} bytes requested)", address, requested);
                Some(ReadOutcome::Gap { address, requested })
            }
            Err(e) => {
                trace!("Read gap at {:#x}: {}", address, e);
                Some(ReadOutcome::Gap { address, requested })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockMemoryBuilder;

    fn chunk_data(outcome: &ReadOutcome) -> Option<&[u8]> {
        match outcome {
            ReadOutcome::Chunk(chunk) => Some(&chunk.data),
            ReadOutcome::Gap { .. } => None,
        }
    }

    #[test]
    fn test_chunked_iterator_single_chunk() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4, 5, 6, 7, 8])
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1008, 16).collect();

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            ReadOutcome::Chunk(chunk) => {
                assert_eq!(chunk.address, 0x1000);
                assert_eq!(chunk.requested, 8);
                assert_eq!(chunk.data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
            }
            other => panic!("expected chunk, got {:?}", other),
        }
    }

    #[test]
    fn test_chunked_iterator_multiple_chunks() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4, 5, 6, 7, 8])
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1008, 4).collect();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(chunk_data(&outcomes[0]), Some(&[1, 2, 3, 4][..]));
        assert_eq!(chunk_data(&outcomes[1]), Some(&[5, 6, 7, 8][..]));
    }

    #[test]
    fn test_chunked_iterator_empty_range() {
        let reader = MockMemoryBuilder::new().segment(0x1000, &[1, 2, 3, 4]).build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1000, 4).collect();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_chunked_iterator_zero_chunk_size() {
        let reader = MockMemoryBuilder::new().segment(0x1000, &[1, 2, 3, 4]).build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1004, 0).collect();
        assert!(outcomes.is_empty());
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_chunked_iterator_partial_last_chunk() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4, 5])
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1005, 4).collect();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(chunk_data(&outcomes[1]), Some(&[5][..]));
        assert_eq!(reader.reads(), vec![(0x1000, 4), (0x1004, 1)]);
    }

    #[test]
    fn test_failed_read_is_a_gap_and_reading_continues() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
            .fail_at(0x1004)
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x100C, 4).collect();

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[1],
            ReadOutcome::Gap {
                address: 0x1004,
                requested: 4
            }
        ));
        assert_eq!(chunk_data(&outcomes[2]), Some(&[9, 10, 11, 12][..]));
    }

    #[test]
    fn test_unmapped_range_yields_gaps() {
        let reader = MockMemoryBuilder::new().segment(0x1000, &[1, 2, 3, 4]).build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x8000, 0x8008, 4).collect();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, ReadOutcome::Gap { .. })));
    }

    #[test]
    fn test_zero_byte_read_is_a_gap() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4])
            .short_read(0x1000, 0)
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1004, 4).collect();
        assert!(matches!(outcomes[0], ReadOutcome::Gap { .. }));
    }

    #[test]
    fn test_short_read_advances_by_requested_span() {
        let reader = MockMemoryBuilder::new()
            .segment(0x1000, &[1, 2, 3, 4, 5, 6, 7, 8])
            .short_read(0x1000, 2)
            .build();

        let outcomes: Vec<_> = ChunkedMemoryIterator::new(&reader, 0x1000, 0x1008, 4).collect();

        // Bytes 3 and 4 are skipped, not re-read
        assert_eq!(chunk_data(&outcomes[0]), Some(&[1, 2][..]));
        assert_eq!(chunk_data(&outcomes[1]), Some(&[5, 6, 7, 8][..]));
        assert_eq!(reader.reads(), vec![(0x1000, 4), (0x1004, 4)]);
    }
}
