pub mod chunked_reader;
mod handle;
pub mod pattern;
pub mod provider;
mod reader;
pub mod region;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use chunked_reader::{ChunkedMemoryIterator, DEFAULT_CHUNK_SIZE, MemoryChunk, ReadOutcome};
pub use handle::ProcessHandle;
pub use provider::{ProcessInfo, ProcessProvider, ProcfsProvider, TargetSpec};
pub use reader::ReadMemory;
pub use region::{MemoryRegion, Permissions, enumerate_regions, parse_maps};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader, MockProcess, MockProcessProvider};
