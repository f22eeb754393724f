pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod process;
pub mod session;

pub use classify::{
    CategoryTable, ClassificationTables, DetectedEvent, DetectionSource, LayerCode, MarkerScanner,
    SeenSet,
};
pub use config::{DEFAULT_OVERLAP, ScanConfig, ScanProfile, SingletonMarker};
pub use error::{Error, Result};
pub use process::{
    MemoryRegion, ProcessHandle, ProcessInfo, ProcessProvider, ProcfsProvider, ReadMemory,
    TargetSpec,
};
pub use session::{
    ScanSession, SessionReport, SessionStats, TargetOutcome, scan_process, scan_targets,
};
