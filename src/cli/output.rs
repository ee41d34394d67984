use colored::*;
use std::path::{Path, PathBuf};

use crate::common::format::{format_count, format_path, format_size, format_size_colored};
use crate::platform::Platform;
use crate::process::TerminationOutcome;
use crate::reset::{BackupOutcome, ResetReport};

/// Print a reset report in human-readable format, one line per item
pub fn print_reset_report(report: &ResetReport, home: &Path) {
    println!();
    println!("  Detected system: {}", report.platform.to_string().cyan());
    if report.dry_run {
        println!("  {} Dry run — nothing will be changed", "ℹ️");
    }
    println!("{}", "─".repeat(60).dimmed());

    match report.processes {
        None => println!("  {} Skipping process termination step", "→".dimmed()),
        Some(ref outcomes) if outcomes.is_empty() => {
            println!("  {} No Zoom processes found", "✓".green())
        }
        Some(ref outcomes) => {
            println!(
                "  Found {} running Zoom",
                format_count(outcomes.len(), "process")
            );
            for outcome in outcomes {
                println!("    {}", termination_line(outcome));
            }
        }
    }

    println!();
    println!(
        "  Backup folder: {}",
        format_path(&report.backup_dir, home).cyan()
    );
    for outcome in &report.paths {
        if let Some(line) = backup_line(outcome, home) {
            println!("    {}", line);
        }
    }

    println!("{}", "─".repeat(60).dimmed());
    let verb = if report.dry_run { "Would move" } else { "Moved" };
    println!(
        "  {} {} ({})",
        verb,
        format_count(report.moved_count(), "path").bold(),
        format_size_colored(report.bytes_moved())
    );

    let errors = report.errors();
    if !errors.is_empty() {
        println!();
        println!("  {} {} errors:", "⚠".yellow(), errors.len());
        for error in &errors {
            println!("    {} {}", "→".dimmed(), error.dimmed());
        }
    }

    println!();
    if report.dry_run {
        println!("  {} Dry run complete. No files modified.", "ℹ️");
    } else {
        println!(
            "  {} Reset complete. You can reopen Zoom and sign in again.",
            "✓".green()
        );
    }
}

/// One status line for a process
pub fn termination_line(outcome: &TerminationOutcome) -> String {
    match outcome {
        TerminationOutcome::WouldTerminate { pid, name } => {
            format!("Would terminate {} (PID {})", name, pid)
        }
        TerminationOutcome::Terminated { pid, name } => {
            format!("{} Terminated {} (PID {})", "✓".green(), name, pid)
        }
        TerminationOutcome::NotFound { pid, .. } => {
            format!("{} Process {} not found; skipping", "→".dimmed(), pid)
        }
        TerminationOutcome::PermissionDenied { pid, name } => format!(
            "{} Permission denied terminating {} (PID {})",
            "⚠".yellow(),
            name,
            pid
        ),
        TerminationOutcome::Failed { pid, name, error } => format!(
            "{} Failed to terminate {} (PID {}): {}",
            "✗".red(),
            name,
            pid,
            error
        ),
    }
}

/// One status line for a catalog path; `None` for paths that did not exist
pub fn backup_line(outcome: &BackupOutcome, home: &Path) -> Option<String> {
    let line = match outcome {
        BackupOutcome::Missing { .. } => return None,
        BackupOutcome::WouldMove {
            source,
            destination,
            size_bytes,
        } => format!(
            "Would move {} to {} ({})",
            format_path(source, home),
            format_path(destination, home),
            format_size(*size_bytes)
        ),
        BackupOutcome::Moved {
            source,
            destination,
            size_bytes,
        } => format!(
            "{} Moved {} to backup {} ({})",
            "✓".green(),
            format_path(source, home),
            format_path(destination, home),
            format_size(*size_bytes)
        ),
        BackupOutcome::Refused { source } => format!(
            "{} Refusing to move protected path {}",
            "⚠".yellow(),
            source.display()
        ),
        BackupOutcome::Failed { source, error } => format!(
            "{} Failed to move {}: {}",
            "✗".red(),
            format_path(source, home),
            error
        ),
    };
    Some(line)
}

/// Print the report as JSON
pub fn print_reset_json(report: &ResetReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print `<moved> <bytes> <backup dir>` on one line
pub fn print_reset_quiet(report: &ResetReport) {
    println!(
        "{}  {}  {}",
        report.moved_count(),
        report.bytes_moved(),
        report.backup_dir.display()
    );
}

/// Print the catalog for a platform, marking paths that exist
pub fn print_catalog(platform: Platform, paths: &[PathBuf], home: &Path) {
    println!();
    println!("  Zoom paths for {}", platform.to_string().cyan());
    println!("{}", "─".repeat(60).dimmed());
    for path in paths {
        let marker = if path.symlink_metadata().is_ok() {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("  {} {}", marker, format_path(path, home));
    }
    println!();
}
