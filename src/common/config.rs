use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{ResetError, Result};

/// Name of the default backup root under the home directory
pub const DEFAULT_BACKUP_DIR_NAME: &str = ".zoom-reset-backups";

/// Name of the optional config file under the home directory
pub const CONFIG_FILE_NAME: &str = ".zoom-reset.toml";

/// Everything a reset run needs to know, passed in explicitly
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Home directory the catalog is built from
    pub home: PathBuf,

    /// Long-lived directory holding one timestamped folder per run
    pub backup_root: PathBuf,

    /// Report actions without performing them
    pub dry_run: bool,

    /// Do not list or terminate running processes
    pub skip_kill: bool,

    /// Substring identifying the application's processes
    pub target_name: String,
}

/// Contents of `~/.zoom-reset.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Backup root override
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,

    /// Process name to match
    #[serde(default)]
    pub target_name: Option<String>,
}

fn default_target_name() -> String {
    "zoom".to_string()
}

impl Config {
    /// Defaults for `home`: backups go to `<home>/.zoom-reset-backups`
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            backup_root: Self::default_backup_root(&home),
            home,
            dry_run: false,
            skip_kill: false,
            target_name: default_target_name(),
        }
    }

    /// The user's home directory
    pub fn home_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"))
    }

    pub fn default_backup_root(home: &Path) -> PathBuf {
        home.join(DEFAULT_BACKUP_DIR_NAME)
    }

    pub fn config_path(home: &Path) -> PathBuf {
        home.join(CONFIG_FILE_NAME)
    }

    /// Defaults for `home`, with `<home>/.zoom-reset.toml` applied on top
    /// if it exists
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(home);
        let path = Self::config_path(&config.home);
        if path.exists() {
            let file = FileConfig::read(&path)?;
            config.apply(file);
        }
        Ok(config)
    }

    pub fn apply(&mut self, file: FileConfig) {
        if let Some(dir) = file.backup_dir {
            self.backup_root = dir;
        }
        if let Some(name) = file.target_name.filter(|n| !n.trim().is_empty()) {
            self.target_name = name;
        }
    }
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| ResetError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::new("/home/tester");
        assert_eq!(
            config.backup_root,
            PathBuf::from("/home/tester/.zoom-reset-backups")
        );
        assert_eq!(config.target_name, "zoom");
        assert!(!config.dry_run);
        assert!(!config.skip_kill);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config, Config::new(tmp.path()));
    }

    #[test]
    fn test_load_applies_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "backup_dir = \"/srv/backups\"\ntarget_name = \"ZoomWorkplace\"\n",
        )
        .unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.backup_root, PathBuf::from("/srv/backups"));
        assert_eq!(config.target_name, "ZoomWorkplace");
    }

    #[test]
    fn test_blank_target_name_is_ignored() {
        let mut config = Config::new("/h");
        config.apply(FileConfig {
            backup_dir: None,
            target_name: Some("  ".to_string()),
        });
        assert_eq!(config.target_name, "zoom");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "backup_dir = [").unwrap();
        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ResetError::Config { .. }));
    }
}
