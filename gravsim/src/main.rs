use gravsim::{ScenarioConfig, Scenario, TraceFile};
use gravsim::{prompt_bodies, launch_viewer};
use gravsim::trace::DEFAULT_TRACE_PATH;
use gravsim::viewer::DEFAULT_VIEWER;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gravsim", about = "Fixed-step 2D gravitational N-body simulation")]
struct Args {
    /// Scenario YAML; prompts for the bodies when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Trace file, appended to during the run and emptied afterwards
    #[arg(long, default_value = DEFAULT_TRACE_PATH)]
    trace: PathBuf,

    /// Visualization command, run with the body count as its argument
    #[arg(long, default_value = DEFAULT_VIEWER)]
    viewer: String,

    /// Skip the visualization hand-off
    #[arg(long)]
    no_viewer: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &Path) -> Result<ScenarioConfig> {
    // fall back to the bundled scenarios directory for bare names
    let config_path = if file_name.exists() {
        file_name.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_yaml_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // The sink comes first: no prompting or simulating without it
    let mut trace = TraceFile::open(&args.trace)
        .with_context(|| format!("unable to open {} for appending", args.trace.display()))?;

    let scenario_cfg = match &args.file {
        Some(file_name) => load_scenario_from_yaml(file_name)?,
        None => {
            let stdin = io::stdin();
            let bodies = prompt_bodies(stdin.lock(), &mut io::stdout())?;
            ScenarioConfig::from_bodies(bodies)
        }
    };

    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let (mut driver, mut system) = scenario.into_driver();
    let summary = driver.run(&mut system, trace.writer()).context("simulation failed")?;
    info!(?summary, "simulation finished");

    if !args.no_viewer {
        launch_viewer(&args.viewer, summary.bodies, trace.path());
    }

    // dropping the sink empties the trace
    drop(trace);
    Ok(())
}
