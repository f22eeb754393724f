//! Process provider abstraction for testability.
//!
//! This module provides traits that abstract process discovery and access,
//! enabling mock implementations for testing without a live target process.

use crate::error::Result;
use crate::process::handle::ProcessHandle;
use crate::process::reader::ReadMemory;
use crate::process::region::MemoryRegion;

/// What the user asked to scan: a numeric PID or a process name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Pid(u32),
    Name(String),
}

impl TargetSpec {
    /// All-digit arguments are PIDs; anything else is matched by name.
    pub fn parse(arg: &str) -> Self {
        let numeric = !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit());
        match arg.parse() {
            Ok(pid) if numeric => TargetSpec::Pid(pid),
            _ => TargetSpec::Name(arg.to_string()),
        }
    }
}

/// Trait for accessing an opened target process.
pub trait ProcessInfo {
    /// Get the process ID.
    fn pid(&self) -> u32;

    /// Snapshot the readable memory regions of the process.
    fn regions(&self) -> Result<Vec<MemoryRegion>>;
}

/// Trait for finding and opening processes.
pub trait ProcessProvider {
    /// The type of process returned by this provider.
    type Process: ProcessInfo + ReadMemory;

    /// All PIDs whose process name equals `name` exactly, ascending.
    fn find_by_name(&self, name: &str) -> Result<Vec<u32>>;

    /// Open a process by its PID.
    fn open(&self, pid: u32) -> Result<Self::Process>;

    /// Resolve a target argument into the PIDs to scan.
    fn resolve(&self, target: &TargetSpec) -> Result<Vec<u32>> {
        match target {
            TargetSpec::Pid(pid) => Ok(vec![*pid]),
            TargetSpec::Name(name) => self.find_by_name(name),
        }
    }
}

/// Provider backed by the local `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcfsProvider;

impl ProcessProvider for ProcfsProvider {
    type Process = ProcessHandle;

    fn find_by_name(&self, name: &str) -> Result<Vec<u32>> {
        find_pids_by_name(name)
    }

    fn open(&self, pid: u32) -> Result<Self::Process> {
        ProcessHandle::open(pid)
    }
}

#[cfg(target_os = "linux")]
fn find_pids_by_name(name: &str) -> Result<Vec<u32>> {
    use crate::error::Error;

    let processes = procfs::process::all_processes()
        .map_err(|e| Error::ProcessLookupFailed(e.to_string()))?;

    let mut pids = Vec::new();
    for process in processes {
        // Processes may exit while the table is walked
        let Ok(process) = process else {
            continue;
        };
        let Ok(stat) = process.stat() else {
            continue;
        };
        if stat.comm == name {
            pids.push(process.pid as u32);
        }
    }
    pids.sort_unstable();
    tracing::debug!("Found {} process(es) named {:?}", pids.len(), name);
    Ok(pids)
}

#[cfg(not(target_os = "linux"))]
fn find_pids_by_name(_name: &str) -> Result<Vec<u32>> {
    Err(crate::error::Error::ProcessLookupFailed(
        "Linux only: process enumeration not supported on this platform".to_string(),
    ))
}
