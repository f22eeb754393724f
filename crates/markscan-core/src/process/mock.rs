//! Mock memory reader for testing
//!
//! Provides a configurable mock implementation of ReadMemory trait
//! that reads from in-memory segments instead of a real process, plus a mock
//! process provider built on top of it.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::process::{MemoryRegion, Permissions, ProcessInfo, ProcessProvider, ReadMemory};

#[derive(Debug, Clone)]
struct Segment {
    base: u64,
    data: Vec<u8>,
}

impl Segment {
    fn end(&self) -> u64 {
        self.base + self.data.len() as u64
    }

    fn contains(&self, address: u64) -> bool {
        (self.base..self.end()).contains(&address)
    }
}

/// Mock memory reader for testing
///
/// Holds sparse segments of bytes. Reads starting inside a segment return at
/// most the bytes up to the segment end; reads anywhere else fail. Every read
/// request is logged so tests can assert what was consumed.
#[derive(Debug, Clone, Default)]
pub struct MockMemoryReader {
    segments: Vec<Segment>,
    failures: Vec<u64>,
    short_reads: HashMap<u64, usize>,
    reads: RefCell<Vec<(u64, usize)>>,
}

impl MockMemoryReader {
    /// Create a new mock reader with the given data at base address 0x1000
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_base(data, 0x1000)
    }

    /// Create a new mock reader with custom base address
    pub fn with_base(data: Vec<u8>, base: u64) -> Self {
        MockMemoryBuilder::new().segment(base, &data).build()
    }

    /// Every `(address, size)` read request made so far, in order.
    pub fn reads(&self) -> Vec<(u64, usize)> {
        self.reads.borrow().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    /// Readable regions matching the configured segments, in address order.
    pub fn regions(&self) -> Vec<MemoryRegion> {
        let mut regions: Vec<_> = self
            .segments
            .iter()
            .filter_map(|s| MemoryRegion::new(s.base, s.end(), Permissions::readable()).ok())
            .collect();
        regions.sort_by_key(|r| r.start);
        regions
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push((address, size));

        if self.failures.contains(&address) {
            return Err(Error::MemoryReadFailed {
                address,
                message: "Injected read failure".to_string(),
            });
        }

        let segment = self
            .segments
            .iter()
            .find(|s| s.contains(address))
            .ok_or_else(|| Error::MemoryReadFailed {
                address,
                message: "Address not mapped".to_string(),
            })?;

        let offset = (address - segment.base) as usize;
        let mut len = size.min(segment.data.len() - offset);
        if let Some(&limit) = self.short_reads.get(&address) {
            len = len.min(limit);
        }
        Ok(segment.data[offset..offset + len].to_vec())
    }
}

/// Builder for creating test memory layouts
///
/// Provides a fluent API for constructing memory layouts for testing.
#[derive(Debug, Clone, Default)]
pub struct MockMemoryBuilder {
    segments: Vec<Segment>,
    failures: Vec<u64>,
    short_reads: HashMap<u64, usize>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `bytes` at `base`
    pub fn segment(mut self, base: u64, bytes: &[u8]) -> Self {
        self.segments.push(Segment {
            base,
            data: bytes.to_vec(),
        });
        self
    }

    /// Map `len` copies of `byte` at `base`
    pub fn filled(self, base: u64, len: usize, byte: u8) -> Self {
        self.segment(base, &vec![byte; len])
    }

    /// Overwrite bytes at an absolute address inside an existing segment
    ///
    /// Writes that do not fit in a single segment are mapped as a new segment.
    pub fn write_bytes(mut self, address: u64, bytes: &[u8]) -> Self {
        let end = address + bytes.len() as u64;
        match self
            .segments
            .iter_mut()
            .find(|s| s.base <= address && end <= s.end())
        {
            Some(segment) => {
                let offset = (address - segment.base) as usize;
                segment.data[offset..offset + bytes.len()].copy_from_slice(bytes);
                self
            }
            None => self.segment(address, bytes),
        }
    }

    /// Make any read starting at `address` fail
    pub fn fail_at(mut self, address: u64) -> Self {
        self.failures.push(address);
        self
    }

    /// Truncate any read starting at `address` to at most `len` bytes
    pub fn short_read(mut self, address: u64, len: usize) -> Self {
        self.short_reads.insert(address, len);
        self
    }

    /// Build the MockMemoryReader
    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            segments: self.segments,
            failures: self.failures,
            short_reads: self.short_reads,
            reads: RefCell::new(Vec::new()),
        }
    }
}

/// Mock target process: a memory reader plus its region snapshot.
#[derive(Debug, Clone)]
pub struct MockProcess {
    pub pid: u32,
    pub memory: MockMemoryReader,
    regions: Option<Vec<MemoryRegion>>,
}

impl MockProcess {
    /// Regions default to the reader's segments.
    pub fn new(pid: u32, memory: MockMemoryReader) -> Self {
        let regions = Some(memory.regions());
        Self {
            pid,
            memory,
            regions,
        }
    }

    pub fn with_regions(mut self, regions: Vec<MemoryRegion>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Make region enumeration fail, as for a process that exited.
    pub fn without_regions(mut self) -> Self {
        self.regions = None;
        self
    }
}

impl ProcessInfo for MockProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>> {
        self.regions
            .clone()
            .ok_or_else(|| Error::target_unavailable(self.pid, "Mock maps unavailable"))
    }
}

impl ReadMemory for MockProcess {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.memory.read_bytes(address, size)
    }
}

/// Mock process provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockProcessProvider {
    processes: Vec<(String, MockProcess)>,
    denied: Vec<u32>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, name: &str, process: MockProcess) -> Self {
        self.processes.push((name.to_string(), process));
        self
    }

    /// Make opening `pid` fail as if access were denied.
    pub fn deny(mut self, pid: u32) -> Self {
        self.denied.push(pid);
        self
    }
}

impl ProcessProvider for MockProcessProvider {
    type Process = MockProcess;

    fn find_by_name(&self, name: &str) -> Result<Vec<u32>> {
        let mut pids: Vec<_> = self
            .processes
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, p)| p.pid)
            .collect();
        pids.sort_unstable();
        Ok(pids)
    }

    fn open(&self, pid: u32) -> Result<Self::Process> {
        if self.denied.contains(&pid) {
            return Err(Error::target_unavailable(pid, "Permission denied"));
        }
        self.processes
            .iter()
            .find(|(_, p)| p.pid == pid)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| Error::target_unavailable(pid, "No such process"))
    }
}
