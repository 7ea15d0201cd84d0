//! Fixed-timestep driver loop
//!
//! Runs the integrator for the configured number of steps and hands each
//! completed step to the trace writer. There is no convergence check and no
//! early exit other than an error.

use std::io::Write;

use tracing::{debug, info};

use super::forces::ForceModel;
use super::integrator::Integrator;
use super::params::Parameters;
use super::states::{NVec2, System};
use crate::error::SimResult;
use crate::trace::writer::TraceWriter;

const PROGRESS_EVERY: usize = 1_000;

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub bodies: usize,
    pub final_time: f64,
    pub rows: usize,
    pub momentum: NVec2,
}

pub struct SimulationDriver<F: ForceModel> {
    integrator: Integrator<F>,
    steps: usize,
}

impl<F: ForceModel> SimulationDriver<F> {
    pub fn new(force: F, parameters: &Parameters) -> Self {
        Self {
            integrator: Integrator::new(force, parameters.dt),
            steps: parameters.steps,
        }
    }

    /// Advance `sys` exactly `steps` times, appending every step to `trace`
    /// at elapsed time `dt * step` (1-based).
    pub fn run<W: Write>(&mut self, sys: &mut System, trace: &mut TraceWriter<W>) -> SimResult<RunSummary> {
        let dt = self.integrator.dt();
        info!(bodies = sys.len(), steps = self.steps, dt, "starting run");

        let rows_before = trace.rows();
        for step in 1..=self.steps {
            self.integrator.step(sys)?;
            sys.t = dt * step as f64;
            trace.append(&sys.bodies, sys.t)?;

            if step % PROGRESS_EVERY == 0 {
                debug!(step, t = sys.t, "progress");
            }
        }

        let summary = RunSummary {
            steps: self.steps,
            bodies: sys.len(),
            final_time: sys.t,
            rows: trace.rows() - rows_before,
            momentum: sys.total_momentum(),
        };
        info!(
            final_time = summary.final_time,
            rows = summary.rows,
            px = summary.momentum.x,
            py = summary.momentum.y,
            "run complete"
        );
        Ok(summary)
    }
}
