use serde::Serialize;
use tracing::{debug, warn};

use super::listing::ProcessRecord;

/// What the OS said when asked to terminate one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalResult {
    Sent,
    NotFound,
    PermissionDenied,
    Failed(String),
}

/// Something that can ask the OS to stop a process by id
pub trait Terminate {
    fn terminate(&self, pid: u32) -> SignalResult;
}

/// Result of handling one listed process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TerminationOutcome {
    /// Dry run: nothing was sent
    WouldTerminate { pid: u32, name: String },
    Terminated { pid: u32, name: String },
    /// Already gone by the time we asked
    NotFound { pid: u32, name: String },
    PermissionDenied { pid: u32, name: String },
    Failed { pid: u32, name: String, error: String },
}

/// Sends a graceful termination request through the host OS
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTerminator;

#[cfg(unix)]
impl Terminate for SystemTerminator {
    fn terminate(&self, pid: u32) -> SignalResult {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            return SignalResult::NotFound;
        };
        match kill(Pid::from_raw(raw), Signal::SIGTERM) {
            Ok(()) => SignalResult::Sent,
            Err(Errno::ESRCH) => SignalResult::NotFound,
            Err(Errno::EPERM) => SignalResult::PermissionDenied,
            Err(e) => SignalResult::Failed(e.to_string()),
        }
    }
}

#[cfg(windows)]
impl Terminate for SystemTerminator {
    fn terminate(&self, pid: u32) -> SignalResult {
        // taskkill without /F asks the process to close rather than killing it
        let output = match std::process::Command::new("taskkill")
            .args(["/PID", &pid.to_string()])
            .output()
        {
            Ok(output) => output,
            Err(e) => return SignalResult::Failed(e.to_string()),
        };
        if output.status.success() {
            return SignalResult::Sent;
        }
        let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
        if output.status.code() == Some(128) || stderr.contains("not found") {
            SignalResult::NotFound
        } else if stderr.contains("access is denied") {
            SignalResult::PermissionDenied
        } else {
            SignalResult::Failed(stderr.trim().to_string())
        }
    }
}

/// Terminate each process in order, or only describe it when `dry_run`.
///
/// Never stops early: a process that is gone or that we may not signal is
/// reported and the next one is tried.
pub fn terminate_processes<T: Terminate>(
    terminator: &T,
    processes: &[ProcessRecord],
    dry_run: bool,
) -> Vec<TerminationOutcome> {
    processes
        .iter()
        .map(|proc| {
            let pid = proc.pid;
            let name = proc.name.clone();
            if dry_run {
                return TerminationOutcome::WouldTerminate { pid, name };
            }
            match terminator.terminate(pid) {
                SignalResult::Sent => {
                    debug!("Sent termination request to {} (PID {})", name, pid);
                    TerminationOutcome::Terminated { pid, name }
                }
                SignalResult::NotFound => {
                    debug!("Process {} not found", pid);
                    TerminationOutcome::NotFound { pid, name }
                }
                SignalResult::PermissionDenied => {
                    warn!("Permission denied terminating {} (PID {})", name, pid);
                    TerminationOutcome::PermissionDenied { pid, name }
                }
                SignalResult::Failed(error) => {
                    warn!("Failed to terminate {} (PID {}): {}", name, pid, error);
                    TerminationOutcome::Failed { pid, name, error }
                }
            }
        })
        .collect()
}
