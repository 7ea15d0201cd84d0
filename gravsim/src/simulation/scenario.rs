//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML- or prompt-facing) and produces the runtime
//! bundle: validated parameters, the system state at t = 0, and the force
//! model configured from those parameters.

use tracing::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::driver::SimulationDriver;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[derive(Debug)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub force: NewtonianGravity,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        if cfg.bodies.is_empty() {
            return Err(SimError::Input("a scenario needs at least one body".to_string()));
        }

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            singular: p_cfg.singular.into(),
        };
        parameters.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(index, bc): (usize, &BodyConfig)| {
                Body::new(
                    bc.m,
                    NVec2::new(bc.x[0], bc.x[1]),
                    NVec2::new(bc.v[0], bc.v[1]),
                    NVec2::new(bc.a[0], bc.a[1]),
                )
                .map_err(|source| SimError::InvalidBody { index, source })
            })
            .collect::<SimResult<Vec<Body>>>()?;

        let force = NewtonianGravity::new(parameters.G, parameters.singular);
        debug!(bodies = bodies.len(), ?parameters, "scenario built");

        Ok(Self {
            parameters,
            system: System::new(bodies),
            force,
        })
    }

    /// Split into the driver and the initial state it will advance
    pub fn into_driver(self) -> (SimulationDriver<NewtonianGravity>, System) {
        (SimulationDriver::new(self.force, &self.parameters), self.system)
    }
}
