use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::backup::{self, BackupOutcome};
use super::catalog::{self, Environment};
use crate::common::config::Config;
use crate::common::errors::Result;
use crate::common::safety;
use crate::platform::Platform;
use crate::process::{self, ProcessRecord, SystemTerminator, Terminate, TerminationOutcome};

/// Everything that happened during one reset run
#[derive(Debug, Clone, Serialize)]
pub struct ResetReport {
    pub platform: Platform,
    pub dry_run: bool,
    /// This run's timestamped directory. Not created on a dry run.
    pub backup_dir: PathBuf,
    /// `None` when process termination was skipped
    pub processes: Option<Vec<TerminationOutcome>>,
    pub paths: Vec<BackupOutcome>,
}

impl ResetReport {
    pub fn moved_count(&self) -> usize {
        self.paths
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    BackupOutcome::Moved { .. } | BackupOutcome::WouldMove { .. }
                )
            })
            .count()
    }

    pub fn bytes_moved(&self) -> u64 {
        self.paths
            .iter()
            .map(|o| match o {
                BackupOutcome::Moved { size_bytes, .. }
                | BackupOutcome::WouldMove { size_bytes, .. } => *size_bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for outcome in self.processes.iter().flatten() {
            if let TerminationOutcome::Failed { pid, error, .. } = outcome {
                errors.push(format!("PID {}: {}", pid, error));
            }
        }
        for outcome in &self.paths {
            if let BackupOutcome::Failed { source, error } = outcome {
                errors.push(format!("{}: {}", source.display(), error));
            }
        }
        errors
    }
}

/// Run a full reset on this machine
pub fn perform_reset(config: &Config, platform: Platform) -> Result<ResetReport> {
    perform_reset_with(
        config,
        platform,
        &Environment::from_process(),
        &SystemTerminator,
        process::list_processes,
    )
}

/// Run a full reset with the environment, terminator and process lister
/// supplied by the caller.
///
/// Steps run strictly in order: list and terminate processes (unless
/// skipped), prepare the backup directory, then move every catalog path.
/// A listing failure stops the run before any path is touched. After
/// that, per-path failures are recorded and the run continues.
pub fn perform_reset_with<T, L>(
    config: &Config,
    platform: Platform,
    env: &Environment,
    terminator: &T,
    list: L,
) -> Result<ResetReport>
where
    T: Terminate,
    L: FnOnce(Platform, &str) -> Result<Vec<ProcessRecord>>,
{
    info!("Resetting on {} (dry run: {})", platform, config.dry_run);

    let processes = if config.skip_kill {
        debug!("Skipping process termination step");
        None
    } else {
        let mut found = list(platform, config.target_name.as_str())?;
        // Our own name contains the target, so the listing includes us
        let own_pid = std::process::id();
        found.retain(|proc| proc.pid != own_pid);
        Some(process::terminate_processes(terminator, &found, config.dry_run))
    };

    let backup_dir = if config.dry_run {
        backup::backup_dir_path(&config.backup_root, Local::now().naive_local())
    } else {
        backup::ensure_backup_root(&config.backup_root)?;
        backup::timestamped_backup_dir(&config.backup_root)?
    };

    let paths = catalog::catalog(platform, env, &config.home)
        .into_iter()
        .map(|path| {
            if safety::is_protected(&path, &config.home) {
                return BackupOutcome::Refused { source: path };
            }
            backup::backup_and_remove(&path, &backup_dir, config.dry_run)
        })
        .collect();

    Ok(ResetReport {
        platform,
        dry_run: config.dry_run,
        backup_dir,
        processes,
        paths,
    })
}
