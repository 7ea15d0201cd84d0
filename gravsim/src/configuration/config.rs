//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – gravitational constant, step size, step count and
//!   the coincident-body policy; every field is optional
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 3.0                  # gravitational constant
//!   dt: 0.001               # fixed step size
//!   steps: 12000            # number of steps
//!   singular: fail          # or: { clamp: { min_separation: 1.0e-3 } }
//!
//! bodies:
//!   - m: 1.0
//!     x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.5 ]
//!     a: [ 0.0, 0.0 ]       # optional, defaults to zero
//!   - m: 1.0
//!     x: [ 1.0, 0.0 ]
//!     v: [ 0.0, -0.5 ]
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::error::SimResult;
use crate::simulation::params::{self, SingularPolicy};

/// How to handle two bodies at zero separation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SingularConfig {
    #[default]
    Fail, // report the pair and stop the run
    Clamp { min_separation: f64 }, // floor the separation
}

impl From<SingularConfig> for SingularPolicy {
    fn from(cfg: SingularConfig) -> Self {
        match cfg {
            SingularConfig::Fail => SingularPolicy::Fail,
            SingularConfig::Clamp { min_separation } => SingularPolicy::Clamp { min_separation },
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,                    // gravitational constant
    pub dt: f64,                   // time step size
    pub steps: usize,              // number of steps
    pub singular: SingularConfig,  // coincident-body policy
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: params::G,
            dt: params::DT,
            steps: params::STEP_COUNT,
            singular: SingularConfig::default(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub m: f64,      // mass
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    #[serde(default)]
    pub a: [f64; 2], // initial acceleration, overwritten by the first step
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // Bodies in input order
}

impl ScenarioConfig {
    /// Bodies with the reference parameters
    pub fn from_bodies(bodies: Vec<BodyConfig>) -> Self {
        Self {
            parameters: ParametersConfig::default(),
            bodies,
        }
    }

    pub fn from_yaml_reader<R: Read>(reader: R) -> SimResult<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}
