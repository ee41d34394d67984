pub mod listing;
pub mod terminator;

pub use listing::{list_processes, parse_ps_output, parse_tasklist_output, ProcessRecord};
pub use terminator::{terminate_processes, SignalResult, SystemTerminator, Terminate, TerminationOutcome};
