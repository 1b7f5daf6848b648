//! Terminal output for batch results

use colored::Colorize;

use crate::RefileError;
use crate::entry::{FileEntry, FileStatus};
use crate::executor::BatchResult;

type Result<T> = std::result::Result<T, RefileError>;

/// Entries shown in a preview before the list is truncated
const PREVIEW_LIMIT: usize = 20;

/// Print the planned renames and pre-flight problems of a prepared batch
pub fn print_plan(entries: &[FileEntry]) {
    let planned: Vec<&FileEntry> = entries.iter().filter(|e| e.is_eligible()).collect();
    let blocked: Vec<&FileEntry> = entries
        .iter()
        .filter(|e| matches!(e.status, FileStatus::Error | FileStatus::Conflict))
        .collect();

    println!("{}", format!("{} file(s) to rename:", planned.len()).bold());
    for entry in planned.iter().take(PREVIEW_LIMIT) {
        println!(
            "  {} {} {}",
            entry.old_full_name(),
            "->".dimmed(),
            entry.new_full_name().cyan()
        );
    }
    if planned.len() > PREVIEW_LIMIT {
        println!("  ... and {} more", planned.len() - PREVIEW_LIMIT);
    }

    if !blocked.is_empty() {
        println!("\n{}", format!("{} file(s) will be skipped:", blocked.len()).yellow().bold());
        for entry in blocked.iter().take(PREVIEW_LIMIT) {
            println!(
                "  {} {} {}",
                "⊘".yellow(),
                entry.old_full_name(),
                entry.error_message().unwrap_or_default().dimmed()
            );
        }
        if blocked.len() > PREVIEW_LIMIT {
            println!("  ... and {} more", blocked.len() - PREVIEW_LIMIT);
        }
    }
}

/// Print a summary of a finished batch
pub fn print_summary(result: &BatchResult, operation: &str) {
    println!("\n{}", format!("=== {operation} Summary ===").bold());
    println!("  {} {}", "✓ Renamed:".green(), result.success_count);
    if result.cancelled {
        println!("  {} after {} file(s)", "⊘ Cancelled".yellow(), result.processed);
    }
    if result.error_count > 0 {
        println!("  {} {}", "✗ Errors:".red(), result.error_count);
        println!("\n{}", "Error details:".red().bold());
        for failure in &result.failures {
            println!(
                "  - {} [{}] {}",
                failure.path.display(),
                failure.kind,
                failure.message
            );
        }
    }
}

/// Print the batch result as pretty JSON
///
/// # Errors
///
/// Returns `RefileError::Json` if the result cannot be serialized.
pub fn print_json(result: &BatchResult) -> Result<()> {
    println!("{}", to_json(result)?);
    Ok(())
}

/// Serialize a batch result for machine consumption
///
/// # Errors
///
/// Returns `RefileError::Json` if the result cannot be serialized.
pub fn to_json(result: &BatchResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
