//! Scan command implementation.
//!
//! Resolves the target argument to one or more PIDs and runs a session per
//! PID, printing each event the moment it is classified.

use std::time::Instant;

use anyhow::{Context, Result};
use markscan_core::export::{format_event, format_report_summary};
use markscan_core::{
    ProcessProvider, ProcfsProvider, ScanConfig, ScanProfile, TargetSpec, scan_targets,
};
use tracing::error;

use crate::cli::Args;

/// Run the scan command
pub fn run(args: &Args) -> Result<()> {
    let started = Instant::now();

    let profile = match &args.profile {
        Some(path) => ScanProfile::load(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => ScanProfile::builtin(),
    };
    let config = ScanConfig {
        chunk_size: args.chunk_size,
        overlap: args.overlap,
    };
    config.validate()?;

    let provider = ProcfsProvider;
    let pids = match provider.resolve(&TargetSpec::parse(&args.target)) {
        Ok(pids) => pids,
        Err(e) => {
            error!("Process lookup failed: {}", e);
            Vec::new()
        }
    };

    if pids.is_empty() {
        println!("No matching process found");
    } else {
        let json = args.json;
        let outcomes = scan_targets(&provider, &pids, &profile, &config, |_, event| {
            if !json {
                println!("{}", format_event(event));
            }
        });

        let mut reports = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(report) => {
                    if !json {
                        println!("{}", format_report_summary(&report));
                    }
                    reports.push(report);
                }
                Err(e) => eprintln!("[FATAL] PID {}: {}", outcome.pid, e),
            }
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    let elapsed = started.elapsed().as_millis();
    if args.json {
        eprintln!("Scan completed in {} ms", elapsed);
    } else {
        println!();
        println!("Scan completed in {} ms", elapsed);
    }
    Ok(())
}
