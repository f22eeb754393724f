//! Scan sessions.
//!
//! A session walks the region snapshot of one target, feeds every chunk to a
//! `MarkerScanner`, and stops as soon as every known identity is classified.
//! Targets are scanned one after another; a target that cannot be opened is
//! reported and skipped.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{DetectedEvent, MarkerScanner, SeenSet};
use crate::config::{ScanConfig, ScanProfile};
use crate::error::Result;
use crate::process::{
    ChunkedMemoryIterator, MemoryRegion, ProcessInfo, ProcessProvider, ReadMemory, ReadOutcome,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub regions_total: usize,
    pub regions_scanned: usize,
    pub chunks_read: usize,
    pub gaps: usize,
    pub bytes_read: u64,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub pid: Option<u32>,
    /// Classified events in discovery order.
    pub events: Vec<DetectedEvent>,
    pub target_count: usize,
    /// True when scanning stopped because every identity was found.
    pub complete: bool,
    pub stats: SessionStats,
    pub elapsed_ms: u64,
}

impl SessionReport {
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.identity.as_str())
    }
}

pub struct ScanSession<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    regions: Vec<MemoryRegion>,
    chunk_size: usize,
    target_count: usize,
    scanner: MarkerScanner<'a>,
    seen: SeenSet,
    events: Vec<DetectedEvent>,
    stats: SessionStats,
    pid: Option<u32>,
}

impl<'a, R: ReadMemory + ?Sized> ScanSession<'a, R> {
    pub fn new(
        reader: &'a R,
        regions: Vec<MemoryRegion>,
        profile: &'a ScanProfile,
        config: &ScanConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            reader,
            stats: SessionStats {
                regions_total: regions.len(),
                ..Default::default()
            },
            regions,
            chunk_size: config.chunk_size,
            target_count: profile.target_count(),
            scanner: MarkerScanner::new(profile, config.overlap),
            seen: SeenSet::new(),
            events: Vec::new(),
            pid: None,
        })
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.seen.len() >= self.target_count
    }

    /// Scan until complete or out of regions, calling `on_event` for each
    /// event as soon as it is classified.
    pub fn run(mut self, mut on_event: impl FnMut(&DetectedEvent)) -> SessionReport {
        let started = Instant::now();
        let regions = std::mem::take(&mut self.regions);

        'regions: for region in &regions {
            if self.is_complete() {
                break;
            }
            self.stats.regions_scanned += 1;
            debug!("Scanning region {} ({} bytes)", region, region.len());

            for outcome in ChunkedMemoryIterator::for_region(self.reader, region, self.chunk_size)
            {
                match outcome {
                    ReadOutcome::Chunk(chunk) => {
                        self.stats.chunks_read += 1;
                        self.stats.bytes_read += chunk.data.len() as u64;

                        for event in self.scanner.feed(&chunk.data, &mut self.seen) {
                            on_event(&event);
                            self.events.push(event);
                        }
                    }
                    ReadOutcome::Gap { .. } => {
                        self.stats.gaps += 1;
                        self.scanner.reset_tail();
                    }
                }

                if self.is_complete() {
                    break 'regions;
                }
            }
        }

        self.stats.unresolved = self.scanner.unresolved_count();
        let complete = self.is_complete();

        SessionReport {
            pid: self.pid,
            events: self.events,
            target_count: self.target_count,
            complete,
            stats: self.stats,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Open `pid`, snapshot its regions, and run one session over it.
pub fn scan_process<P: ProcessProvider>(
    provider: &P,
    pid: u32,
    profile: &ScanProfile,
    config: &ScanConfig,
    on_event: impl FnMut(&DetectedEvent),
) -> Result<SessionReport> {
    config.validate()?;
    let process = provider.open(pid)?;
    let regions = process.regions()?;
    info!("Scanning PID {} ({} readable regions)", process.pid(), regions.len());

    let report = ScanSession::new(&process, regions, profile, config)?
        .with_pid(pid)
        .run(on_event);

    info!(
        "PID {}: {}/{} identities classified in {} ms",
        pid,
        report.events.len(),
        report.target_count,
        report.elapsed_ms
    );
    Ok(report)
}

/// Result of scanning one of several targets.
#[derive(Debug)]
pub struct TargetOutcome {
    pub pid: u32,
    pub result: Result<SessionReport>,
}

/// Scan each PID in turn, each with its own handle and seen set.
///
/// A failure on one target never stops the others.
pub fn scan_targets<P: ProcessProvider>(
    provider: &P,
    pids: &[u32],
    profile: &ScanProfile,
    config: &ScanConfig,
    mut on_event: impl FnMut(u32, &DetectedEvent),
) -> Vec<TargetOutcome> {
    let mut outcomes = Vec::with_capacity(pids.len());
    for &pid in pids {
        let result = scan_process(provider, pid, profile, config, |event| on_event(pid, event));
        if let Err(e) = &result {
            warn!("Skipping PID {}: {}", pid, e);
        }
        outcomes.push(TargetOutcome { pid, result });
    }
    outcomes
}
