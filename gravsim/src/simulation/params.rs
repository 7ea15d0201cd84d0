//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the run-wide settings:
//! - gravitational constant `G`,
//! - step size `dt` and the number of steps,
//! - the policy for coincident bodies

use crate::error::{SimError, SimResult};

/// Gravitational constant of the reference configuration (not physically calibrated)
pub const G: f64 = 3.0;
/// Fixed time step
pub const DT: f64 = 0.001;
/// Steps per run
pub const STEP_COUNT: usize = 12_000;

/// What to do when two bodies sit at zero separation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SingularPolicy {
    /// Fail the step and report the pair
    #[default]
    Fail,
    /// Never let the separation drop below `min_separation`
    Clamp { min_separation: f64 },
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // step size
    pub steps: usize, // number of steps
    pub singular: SingularPolicy, // coincident-body handling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G,
            dt: DT,
            steps: STEP_COUNT,
            singular: SingularPolicy::default(),
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> SimResult<()> {
        if !self.G.is_finite() {
            return Err(invalid("G", format!("must be finite, got {}", self.G)));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(invalid("dt", format!("must be positive and finite, got {}", self.dt)));
        }
        if let SingularPolicy::Clamp { min_separation } = self.singular {
            if !min_separation.is_finite() || min_separation <= 0.0 {
                return Err(invalid(
                    "min_separation",
                    format!("must be positive and finite, got {min_separation}"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> SimError {
    SimError::InvalidParameter { name, reason }
}
