#![cfg_attr(not(target_os = "linux"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::process::provider::ProcessInfo;
use crate::process::reader::ReadMemory;
use crate::process::region::{MemoryRegion, enumerate_regions};

#[cfg(target_os = "linux")]
use std::fs::File;
#[cfg(target_os = "linux")]
use std::os::unix::fs::FileExt;

/// Read-only handle on the address space of a running process.
#[cfg(target_os = "linux")]
pub struct ProcessHandle {
    pub pid: u32,
    mem: File,
}

#[cfg(not(target_os = "linux"))]
pub struct ProcessHandle {
    pub pid: u32,
}

#[cfg(target_os = "linux")]
impl ProcessHandle {
    /// Open `/proc/<pid>/mem` for positioned reads.
    ///
    /// Fails with `TargetUnavailable` when the process has exited or the
    /// caller lacks ptrace access to it.
    pub fn open(pid: u32) -> Result<Self> {
        let path = format!("/proc/{}/mem", pid);
        let mem = File::open(&path).map_err(|e| {
            tracing::debug!("open {} failed: {}", path, e);
            Error::target_unavailable(pid, format!("failed to open {}: {}", path, e))
        })?;

        Ok(Self { pid, mem })
    }
}

#[cfg(target_os = "linux")]
impl ReadMemory for ProcessHandle {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        let read = self
            .mem
            .read_at(&mut buffer, address)
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        buffer.truncate(read);
        Ok(buffer)
    }
}

#[cfg(not(target_os = "linux"))]
impl ProcessHandle {
    pub fn open(pid: u32) -> Result<Self> {
        Err(Error::target_unavailable(
            pid,
            "Linux only: process memory access not supported on this platform",
        ))
    }
}

#[cfg(not(target_os = "linux"))]
impl ReadMemory for ProcessHandle {
    fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Linux only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ProcessInfo for ProcessHandle {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>> {
        enumerate_regions(self.pid)
    }
}
