//! Region listing command implementation.
//!
//! Prints the readable region snapshot a scan of the same target would walk.

use anyhow::Result;
use markscan_core::export::format_region;
use markscan_core::process::enumerate_regions;
use markscan_core::{ProcessProvider, ProcfsProvider, TargetSpec};
use tracing::error;

/// Run the region listing command
pub fn run(target: &str, json: bool) -> Result<()> {
    let pids = match ProcfsProvider.resolve(&TargetSpec::parse(target)) {
        Ok(pids) => pids,
        Err(e) => {
            error!("Process lookup failed: {}", e);
            Vec::new()
        }
    };
    if pids.is_empty() {
        println!("No matching process found");
        return Ok(());
    }

    for pid in pids {
        let regions = match enumerate_regions(pid) {
            Ok(regions) => regions,
            Err(e) => {
                eprintln!("[FATAL] PID {}: {}", pid, e);
                continue;
            }
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&regions)?);
            continue;
        }

        let total: u64 = regions.iter().map(|r| r.len()).sum();
        println!("PID {}: {} readable regions, {} bytes", pid, regions.len(), total);
        for region in &regions {
            println!("  {}", format_region(region));
        }
    }

    Ok(())
}
