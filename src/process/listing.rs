use serde::Serialize;
use std::process::Command;
use tracing::debug;

use crate::common::errors::{ResetError, Result};
use crate::platform::Platform;

/// A running process as seen at listing time.
///
/// Only valid for the moment it was listed: the OS may reuse the id once the
/// process exits, so records are never kept across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub command: Option<String>,
}

/// Parse `ps -eo pid,comm,args` output.
///
/// Each line is `<pid> <name> [<args...>]`. Lines whose first field is not a
/// non-negative integer (the header, blank lines) are skipped. A line
/// matches when `target` appears case-insensitively in the name or args.
pub fn parse_ps_output(output: &str, target: &str) -> Vec<ProcessRecord> {
    let needle = target.to_lowercase();
    output
        .lines()
        .filter_map(parse_ps_line)
        .filter(|record| {
            let mut text = record.name.to_lowercase();
            if let Some(ref command) = record.command {
                text.push(' ');
                text.push_str(&command.to_lowercase());
            }
            text.contains(&needle)
        })
        .collect()
}

fn parse_ps_line(line: &str) -> Option<ProcessRecord> {
    let (pid, rest) = split_field(line.trim())?;
    let pid = pid.parse::<u32>().ok()?;
    let (name, command) = match split_field(rest) {
        Some((name, command)) => (name, Some(command.to_string())),
        None => (rest, None),
    };
    Some(ProcessRecord {
        pid,
        name: name.to_string(),
        command,
    })
}

/// Split off the first whitespace-delimited field, returning it and the
/// remainder with leading whitespace removed. `None` when there is no
/// remainder.
fn split_field(s: &str) -> Option<(&str, &str)> {
    let idx = s.find(char::is_whitespace)?;
    let rest = s[idx..].trim_start();
    if rest.is_empty() {
        return None;
    }
    Some((&s[..idx], rest))
}

/// Parse `tasklist /FO CSV /NH` output.
///
/// Each line is a record of quoted fields: image name, PID, session name,
/// session number, memory usage. A record is kept when the image name is
/// non-empty, contains `target` case-insensitively, and the PID parses.
pub fn parse_tasklist_output(output: &str, target: &str) -> Vec<ProcessRecord> {
    let needle = target.to_lowercase();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(output.as_bytes());

    let mut processes = Vec::new();
    for row in reader.records() {
        let Ok(row) = row else {
            continue;
        };
        let name = row.get(0).unwrap_or_default().trim();
        if name.is_empty() || !name.to_lowercase().contains(&needle) {
            continue;
        }
        let Some(pid) = row.get(1).and_then(|f| f.trim().parse::<u32>().ok()) else {
            continue;
        };
        processes.push(ProcessRecord {
            pid,
            name: name.to_string(),
            command: None,
        });
    }
    processes
}

const PS_ARGS: &[&str] = &["-eo", "pid,comm,args"];
const TASKLIST_ARGS: &[&str] = &["/FO", "CSV", "/NH"];

/// The listing command and its arguments for a platform
pub fn listing_command(platform: Platform) -> (&'static str, &'static [&'static str]) {
    if platform.is_posix() {
        ("ps", PS_ARGS)
    } else {
        ("tasklist", TASKLIST_ARGS)
    }
}

/// Run the platform's listing command and return the processes matching
/// `target`. Failing to run the command, or a non-zero exit, is fatal.
pub fn list_processes(platform: Platform, target: &str) -> Result<Vec<ProcessRecord>> {
    let (program, args) = listing_command(platform);
    let shown = format!("{} {}", program, args.join(" "));
    debug!("Listing processes with: {}", shown);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ResetError::ProcessEnumeration {
            command: shown.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ResetError::ProcessEnumeration {
            command: shown,
            message: output.status.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let processes = if platform.is_posix() {
        parse_ps_output(&stdout, target)
    } else {
        parse_tasklist_output(&stdout, target)
    };
    debug!("Found {} matching process(es)", processes.len());
    Ok(processes)
}
