//! Core state types for the N-body simulation.
//!
//! A `Body` is one point mass with 2D kinematic state, a `System` is the
//! ordered body sequence plus the elapsed simulation time `t`.

use nalgebra::Vector2;

use crate::error::BodyError;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    m: f64, // mass, fixed at construction
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration
}

impl Body {
    /// Build a body, rejecting non-positive or non-finite masses and
    /// non-finite kinematic state.
    pub fn new(m: f64, x: NVec2, v: NVec2, a: NVec2) -> Result<Self, BodyError> {
        if !m.is_finite() || m <= 0.0 {
            return Err(BodyError::Mass(m));
        }
        let finite = |w: &NVec2| w.iter().all(|c| c.is_finite());
        if !(finite(&x) && finite(&v) && finite(&a)) {
            return Err(BodyError::NonFinite);
        }
        Ok(Self { m, x, v, a })
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    /// Linear momentum `m * v`
    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).chain(self.a.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // ordered, fixed length for the run
    pub t: f64, // elapsed time after the last completed step
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of `m * v` over all bodies
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}
