use gravsim::{frames, read_trace, run_replay, Replay};
use gravsim::trace::DEFAULT_TRACE_PATH;
use gravsim::viewer::TRACE_ENV;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Replays a gravsim trace in a window
#[derive(Parser, Debug)]
#[command(name = "gravsim-view")]
struct Args {
    /// Number of bodies in the trace
    bodies: usize,

    /// Trace file to replay
    #[arg(long, env = TRACE_ENV, default_value = DEFAULT_TRACE_PATH)]
    trace: PathBuf,

    /// Simulation steps advanced per rendered frame
    #[arg(long, default_value_t = 10)]
    stride: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.trace)
        .with_context(|| format!("failed to open trace {}", args.trace.display()))?;
    let records = read_trace(BufReader::new(file))
        .with_context(|| format!("failed to read trace {}", args.trace.display()))?;

    let replay = Replay::new(frames(&records, args.bodies), args.stride);
    run_replay(replay);

    Ok(())
}
