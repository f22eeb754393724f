//! Console output formatting with colored display

use owo_colors::OwoColorize;

use crate::classify::DetectedEvent;
use crate::process::MemoryRegion;
use crate::session::SessionReport;

/// One line per classified event: `identity → outcome (layer)`
pub fn format_event(event: &DetectedEvent) -> String {
    format!(
        "{} {} {} ({})",
        event.identity.bold(),
        "→".dimmed(),
        format_colored_outcome(&event.outcome),
        event.layer.dimmed()
    )
}

pub fn format_colored_outcome(outcome: &str) -> String {
    let upper = outcome.to_ascii_uppercase();
    if upper.contains("GOLD") {
        outcome.yellow().bold().to_string()
    } else if upper.contains("PURPLE") {
        outcome.magenta().to_string()
    } else {
        outcome.to_string()
    }
}

/// Summary line for a finished session
pub fn format_report_summary(report: &SessionReport) -> String {
    let found = format!("{}/{}", report.events.len(), report.target_count);
    let found = if report.complete {
        found.green().to_string()
    } else {
        found.yellow().to_string()
    };
    let target = match report.pid {
        Some(pid) => format!("PID {}", pid),
        None => "Session".to_string(),
    };

    format!(
        "{}: {} identities classified ({} reads, {} gaps, {} unresolved, {} ms)",
        target,
        found,
        report.stats.chunks_read,
        report.stats.gaps,
        report.stats.unresolved,
        report.elapsed_ms
    )
}

pub fn format_region(region: &MemoryRegion) -> String {
    format!("{} {:>10} bytes", region, region.len())
}
