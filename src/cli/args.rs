use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// zoom-reset — Reset Zoom data after a 1132 error
#[derive(Parser, Debug)]
#[command(
    name = "zoom-reset",
    version,
    about = "Reset Zoom data after a 1132 error",
    long_about = "zoom-reset stops running Zoom processes and moves Zoom's local\n\
                   config, cache and cookie data into a timestamped backup folder.\n\
                   Nothing is deleted: restore by moving the folders back.",
    after_help = "EXAMPLES:\n  \
        zoom-reset                             Stop Zoom and back up its data\n  \
        zoom-reset --dry-run                   Show what would happen\n  \
        zoom-reset --skip-kill                 Leave running processes alone\n  \
        zoom-reset --backup-dir /tmp/zb        Store backups elsewhere\n  \
        zoom-reset --list-paths                Print the paths that get reset\n  \
        zoom-reset --format json --dry-run     Machine-readable report"
)]
pub struct Cli {
    /// Show actions without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Do not attempt to terminate running Zoom processes
    #[arg(long)]
    pub skip_kill: bool,

    /// Directory to store backups (default: ~/.zoom-reset-backups)
    #[arg(long, value_name = "PATH", env = "ZOOM_RESET_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Print the Zoom paths for this platform and exit
    #[arg(long)]
    pub list_paths: bool,

    /// Use another platform's path table (windows, macos, linux)
    #[arg(long, value_name = "NAME", hide = true)]
    pub platform: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["zoom-reset"]).unwrap();
        assert!(!cli.dry_run);
        assert!(!cli.skip_kill);
        assert!(!cli.list_paths);
        assert_eq!(cli.format, OutputFormat::Human);
        assert_eq!(cli.platform, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "zoom-reset",
            "--dry-run",
            "--skip-kill",
            "--backup-dir",
            "/tmp/zb",
            "--format",
            "json",
            "--platform",
            "macos",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert!(cli.skip_kill);
        assert_eq!(cli.backup_dir, Some(PathBuf::from("/tmp/zb")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.platform.as_deref(), Some("macos"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["zoom-reset", "--format", "xml"]).is_err());
    }
}
