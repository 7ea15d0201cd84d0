//! Post-run hand-off to the visualization collaborator
//!
//! The command is run with the body count as its only argument and waited
//! on. The trace location travels in [`TRACE_ENV`]. Nothing about the child
//! (spawn failure, exit status) affects the run's outcome.

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

/// Environment variable carrying the trace path to the viewer
pub const TRACE_ENV: &str = "GRAVSIM_TRACE";

/// Default visualization command
pub const DEFAULT_VIEWER: &str = "gravsim-view";

/// Launch `command` (program plus optional leading arguments, split on
/// whitespace) and wait for it. Returns whether it could be started.
pub fn launch_viewer(command: &str, bodies: usize, trace: &Path) -> bool {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        warn!("empty viewer command, skipping visualization");
        return false;
    };

    info!(%command, bodies, "launching viewer");
    match Command::new(program)
        .args(parts)
        .arg(bodies.to_string())
        .env(TRACE_ENV, trace)
        .status()
    {
        Ok(status) => {
            info!(%status, "viewer exited");
            true
        }
        Err(e) => {
            warn!(%command, error = %e, "could not launch viewer");
            false
        }
    }
}
