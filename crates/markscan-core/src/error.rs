use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to enumerate processes: {0}")]
    ProcessLookupFailed(String),

    #[error("Target process {pid} unavailable: {message}")]
    TargetUnavailable { pid: u32, message: String },

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Invalid memory region {start:#x}-{end:#x}")]
    InvalidRegion { start: u64, end: u64 },

    #[error("Invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scan profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn target_unavailable(pid: u32, message: impl std::fmt::Display) -> Self {
        Error::TargetUnavailable {
            pid,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
