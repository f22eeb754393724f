//! Scan configuration.
//!
//! This module contains:
//! - `ScanConfig` - chunking and boundary-overlap parameters
//! - `ScanProfile` - markers and classification tables, built in or loaded from JSON

mod profile;

pub use profile::*;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::process::DEFAULT_CHUNK_SIZE;

/// Default number of trailing bytes carried from one chunk into the next.
pub const DEFAULT_OVERLAP: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Bytes requested per read.
    pub chunk_size: usize,
    /// Trailing bytes of each assembled buffer re-scanned with the next one.
    /// Must cover the longest marker plus its layer code for split markers to
    /// be found.
    pub overlap: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
