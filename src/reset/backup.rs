use chrono::{Local, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::common::errors::{ResetError, Result};

/// Result of handling one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackupOutcome {
    Moved {
        source: PathBuf,
        destination: PathBuf,
        size_bytes: u64,
    },
    /// Dry run: the move that would have happened
    WouldMove {
        source: PathBuf,
        destination: PathBuf,
        size_bytes: u64,
    },
    /// Nothing at this path; the common case
    Missing { source: PathBuf },
    /// Protected path, left alone
    Refused { source: PathBuf },
    Failed { source: PathBuf, error: String },
}

/// Create the long-lived backup root if needed
pub fn ensure_backup_root(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root).map_err(|source| ResetError::BackupRoot {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(root.to_path_buf())
}

/// Name of a run's backup directory, e.g. `20240131-235901`
pub fn backup_dir_name(at: NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

/// Path of this run's backup directory under `root`, stamped with `at`
pub fn backup_dir_path(root: &Path, at: NaiveDateTime) -> PathBuf {
    root.join(backup_dir_name(at))
}

/// Create a timestamped backup directory for this run under `root`
pub fn timestamped_backup_dir(root: &Path) -> Result<PathBuf> {
    let dir = backup_dir_path(root, Local::now().naive_local());
    std::fs::create_dir_all(&dir).map_err(|source| ResetError::BackupRoot {
        path: dir.clone(),
        source,
    })?;
    debug!("Backup directory: {}", dir.display());
    Ok(dir)
}

/// Where `target` lands inside `backup_dir`.
///
/// Normally `backup_dir/<last component>`. If that name is already taken,
/// `-HHMMSS` from `now` is appended. The suffixed name may itself be taken
/// when two collisions happen within the same second; callers must check.
pub fn destination_for(target: &Path, backup_dir: &Path, now: NaiveTime) -> Option<PathBuf> {
    let name = target.file_name()?;
    let destination = backup_dir.join(name);
    if !entry_exists(&destination) {
        return Some(destination);
    }
    let mut renamed = name.to_os_string();
    renamed.push(format!("-{}", now.format("%H%M%S")));
    Some(backup_dir.join(renamed))
}

/// Move `target` into `backup_dir`, or describe the move when `dry_run`.
///
/// A target that does not exist is not an error. Failures are returned as
/// [`BackupOutcome::Failed`] so the caller can carry on with other paths.
pub fn backup_and_remove(target: &Path, backup_dir: &Path, dry_run: bool) -> BackupOutcome {
    let source = target.to_path_buf();
    if !entry_exists(target) {
        return BackupOutcome::Missing { source };
    }

    let Some(destination) = destination_for(target, backup_dir, Local::now().time()) else {
        return BackupOutcome::Failed {
            source,
            error: "Path has no final component".to_string(),
        };
    };
    if entry_exists(&destination) {
        return BackupOutcome::Failed {
            source,
            error: format!(
                "Backup destination already exists: {}",
                destination.display()
            ),
        };
    }
    let size_bytes = entry_size(target);

    if dry_run {
        return BackupOutcome::WouldMove {
            source,
            destination,
            size_bytes,
        };
    }

    info!("Moving {} to {}", target.display(), destination.display());
    match move_path(target, &destination) {
        Ok(()) => BackupOutcome::Moved {
            source,
            destination,
            size_bytes,
        },
        Err(e) => BackupOutcome::Failed {
            source,
            error: e.to_string(),
        },
    }
}

/// True for files, directories and symlinks (even dangling ones)
fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Total size in bytes of a file or directory tree
pub fn entry_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Move a file or directory. Falls back to copy then delete only when the
/// destination is on another filesystem.
fn move_path(source: &Path, destination: &Path) -> Result<()> {
    match std::fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!("{} is on another filesystem, copying instead", source.display());
            copy_then_remove(source, destination)
        }
        Err(source_err) => Err(ResetError::Io {
            path: source.to_path_buf(),
            source: source_err,
        }),
    }
}

#[cfg(unix)]
fn is_cross_device(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::EXDEV as i32)
}

#[cfg(windows)]
fn is_cross_device(e: &std::io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &std::io::Error) -> bool {
    false
}

/// Copy `source` to a fresh `destination`, then delete `source`.
/// Never merges into or overwrites an existing destination.
fn copy_then_remove(source: &Path, destination: &Path) -> Result<()> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ResetError::Io { path, source }
    };

    if entry_exists(destination) {
        return Err(ResetError::Io {
            path: destination.to_path_buf(),
            source: std::io::ErrorKind::AlreadyExists.into(),
        });
    }

    let meta = std::fs::symlink_metadata(source).map_err(io_err(source))?;
    if meta.is_dir() {
        copy_dir_recursive(source, destination)?;
        std::fs::remove_dir_all(source).map_err(io_err(source))?;
    } else {
        copy_entry(source, destination, &meta.file_type())?;
        std::fs::remove_file(source).map_err(io_err(source))?;
    }
    Ok(())
}

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| ResetError::Io {
            path: e.path().unwrap_or(src).to_path_buf(),
            source: e.into(),
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|source| ResetError::Io {
                path: target.clone(),
                source,
            })?;
        } else {
            copy_entry(entry.path(), &target, &entry.file_type())?;
        }
    }
    Ok(())
}

fn copy_entry(src: &Path, dst: &Path, file_type: &std::fs::FileType) -> Result<()> {
    let result = if file_type.is_symlink() {
        copy_symlink(src, dst)
    } else {
        std::fs::copy(src, dst).map(|_| ())
    };
    result.map_err(|source| ResetError::Io {
        path: src.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    let link = std::fs::read_link(src)?;
    std::os::unix::fs::symlink(link, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::copy(src, dst).map(|_| ())
}
