pub mod simulation;
pub mod configuration;
pub mod trace;
pub mod input;
pub mod viewer;
pub mod visualization;
pub mod error;

pub use error::{BodyError, SimError, SimResult};

pub use simulation::states::{Body, System, NVec2};
pub use simulation::params::{Parameters, SingularPolicy, G, DT, STEP_COUNT};
pub use simulation::forces::{ForceModel, Interaction, NewtonianGravity};
pub use simulation::integrator::Integrator;
pub use simulation::driver::{SimulationDriver, RunSummary};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ParametersConfig, BodyConfig, SingularConfig};

pub use trace::{file::TraceFile, writer::TraceWriter, reader::{read_trace, frames, Frame, TraceRecord}};

pub use input::prompt_bodies;
pub use viewer::launch_viewer;

pub use visualization::replay::Replay;
#[cfg(feature = "viewer")]
pub use visualization::replay_vis2d::run_replay;
