use std::path::PathBuf;

use thiserror::Error;

/// Fatal error kinds for a reset run.
///
/// Per-item conditions (a process that already exited, a catalog path that
/// does not exist, one failed move) are not errors; they are reported as
/// outcomes and the run continues. Only these abort it.
#[derive(Debug, Error)]
pub enum ResetError {
    /// The running OS (or a requested platform name) is not one we know
    /// the Zoom layout for
    #[error("Unsupported platform: {name}")]
    UnsupportedPlatform { name: String },

    /// The process listing command could not be run or exited non-zero
    #[error("Failed to query running processes with '{command}': {message}")]
    ProcessEnumeration { command: String, message: String },

    /// The backup root or this run's timestamped directory could not be created
    #[error("Failed to create backup directory '{}': {source}", path.display())]
    BackupRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResetError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        ResetError::UnsupportedPlatform { name: name.into() }
    }
}

pub type Result<T, E = ResetError> = std::result::Result<T, E>;
