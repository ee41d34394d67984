pub mod backup;
pub mod catalog;
pub mod engine;

pub use backup::{backup_and_remove, ensure_backup_root, timestamped_backup_dir, BackupOutcome};
pub use catalog::{catalog, catalog_for, Environment};
pub use engine::{perform_reset, perform_reset_with, ResetReport};
