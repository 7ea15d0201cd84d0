//! Error types for the simulation library

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Why a body's initial state was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("mass must be positive and finite, got {0}")]
    Mass(f64),

    #[error("position, velocity and acceleration must be finite")]
    NonFinite,
}

/// Errors that can occur while building, running or tracing a simulation
#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Invalid body {}: {}", .index + 1, .source)]
    InvalidBody { index: usize, source: BodyError },

    #[error("Invalid parameter `{}`: {}", .name, .reason)]
    InvalidParameter { name: &'static str, reason: String },

    /// `t` is the time at the start of the failing step
    #[error("Bodies {} and {} are coincident at t = {:.6}", .i + 1, .j + 1, .t)]
    SingularSeparation { i: usize, j: usize, t: f64 },

    /// `t` is the time at the start of the failing step
    #[error("Body {} reached a non-finite state at t = {:.6}", .body + 1, .t)]
    NonFiniteState { body: usize, t: f64 },

    #[error("Trace format error on line {line}: {reason}")]
    TraceFormat { line: usize, reason: String },
}
