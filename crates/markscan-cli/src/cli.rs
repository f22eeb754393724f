//! CLI argument definitions for markscan.

use std::path::PathBuf;

use clap::Parser;
use markscan_core::config::DEFAULT_OVERLAP;
use markscan_core::process::DEFAULT_CHUNK_SIZE;

#[derive(Parser, Debug)]
#[command(name = "markscan")]
#[command(about = "Scan a running process's memory for event markers", version)]
pub struct Args {
    /// Process ID, or exact process name (every matching process is scanned)
    pub target: String,

    /// Show unresolved markers and rejected layer candidates
    #[arg(long)]
    pub debug: bool,

    /// Bytes requested per memory read
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Trailing bytes re-scanned with the next chunk to catch split markers
    #[arg(long, default_value_t = DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Load markers and tables from a JSON profile instead of the built-in one
    #[arg(long, value_name = "FILE", env = "MARKSCAN_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Print session reports as JSON
    #[arg(long)]
    pub json: bool,

    /// List readable memory regions instead of scanning
    #[arg(long)]
    pub list_regions: bool,
}
