use serde::Serialize;

use crate::common::errors::{ResetError, Result};

/// Operating systems whose Zoom layout we know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Macos => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ResetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "macos" | "darwin" => Ok(Platform::Macos),
            "linux" => Ok(Platform::Linux),
            other => Err(ResetError::unsupported(other)),
        }
    }
}

impl Platform {
    /// Detect the platform this binary is running on
    pub fn detect() -> Result<Self> {
        std::env::consts::OS.parse()
    }

    /// Whether processes are listed with `ps` (columnar output) rather than
    /// `tasklist` (quoted CSV)
    pub fn is_posix(self) -> bool {
        matches!(self, Platform::Macos | Platform::Linux)
    }
}
