//! # zoom-reset
//!
//! Resets Zoom's local state on this machine, typically to get past a
//! sign-in error such as 1132. A run:
//!
//! - **Stops Zoom**: lists running processes whose name or command line
//!   mentions Zoom and asks each one to terminate
//! - **Backs up instead of deleting**: moves every known Zoom config, cache
//!   and cookie path into `~/.zoom-reset-backups/<YYYYMMDD-HHMMSS>/`
//! - **Knows each OS**: separate path tables for Windows, macOS and Linux
//! - **Dry-run aware**: `--dry-run` reports every action and changes nothing

pub mod cli;
pub mod common;
pub mod platform;
pub mod process;
pub mod reset;
