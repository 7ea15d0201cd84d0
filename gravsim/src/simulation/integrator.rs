//! Fixed-step time integrator for the N-body system
//!
//! Each step runs three phases in a fixed order:
//!
//! 1. `update_acceleration`: a_i = sum over j != i of -(f_ij / m_i) * (x_i - x_j) / r_ij
//! 2. `update_velocity`:     v += a * dt
//! 3. `update_position`:     x += v * dt + 0.5 * a * dt^2
//!
//! Phase 2 uses the acceleration from phase 1 and phase 3 uses the velocity
//! from phase 2, so this is neither explicit Euler nor velocity-Verlet.
//! Trajectories depend on this exact ordering.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::forces::{ForceModel, Interaction};
use super::states::{Body, NVec2, System};
use crate::error::{SimError, SimResult};

/// Errors carry `sys.t` as it stood when the step began, i.e. the time of the
/// last completed step; the driver only advances the clock after a step
/// succeeds.
///
/// Owns the force model, the step size and the two sweep buffers.
///
/// `front` is a snapshot of the bodies taken before any acceleration is
/// written; `back` receives the new accelerations, which are then swapped
/// into the bodies. Every term of a sweep therefore reads the configuration
/// as it stood before the sweep.
pub struct Integrator<F: ForceModel> {
    force: F,
    dt: f64,
    front: Vec<Body>,
    back: Vec<NVec2>,
}

impl<F: ForceModel> Integrator<F> {
    pub fn new(force: F, dt: f64) -> Self {
        Self {
            force,
            dt,
            front: Vec::new(),
            back: Vec::new(),
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Recompute every body's acceleration from all pairwise interactions
    ///
    /// Fails without touching `sys` if any pair is singular or any resulting
    /// acceleration is non-finite.
    pub fn update_acceleration(&mut self, sys: &mut System) -> SimResult<()> {
        let n = sys.bodies.len();
        let t = sys.t;

        // Buffer A: snapshot of the prior configuration
        self.front.clone_from(&sys.bodies);

        // Buffer B: fresh accelerations, reset to zero
        self.back.clear();
        self.back.resize(n, NVec2::zeros());

        let front = &self.front;
        let force = &self.force;

        #[cfg(not(feature = "parallel"))]
        for (i, acc) in self.back.iter_mut().enumerate() {
            *acc = acceleration_on(i, front, force, t)?;
        }

        #[cfg(feature = "parallel")]
        self.back
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, acc)| -> SimResult<()> {
                *acc = acceleration_on(i, front, force, t)?;
                Ok(())
            })?;

        if let Some(body) = self.back.iter().position(|a| !(a.x.is_finite() && a.y.is_finite())) {
            return Err(SimError::NonFiniteState { body, t });
        }

        // Swap buffer B into the bodies
        for (b, a) in sys.bodies.iter_mut().zip(self.back.iter_mut()) {
            std::mem::swap(&mut b.a, a);
        }
        Ok(())
    }

    /// v_n+1 = v_n + a_n+1 * dt
    pub fn update_velocity(&self, sys: &mut System) {
        let dt = self.dt;
        for b in sys.bodies.iter_mut() {
            b.v += b.a * dt;
        }
    }

    /// x_n+1 = x_n + v_n+1 * dt + 0.5 * a_n+1 * dt^2
    pub fn update_position(&self, sys: &mut System) -> SimResult<()> {
        let dt = self.dt;
        for b in sys.bodies.iter_mut() {
            b.x += b.v * dt + b.a * 0.5 * dt * dt;
        }
        match sys.bodies.iter().position(|b| !b.is_finite()) {
            Some(body) => Err(SimError::NonFiniteState { body, t: sys.t }),
            None => Ok(()),
        }
    }

    /// Run all three phases once. Does not advance `sys.t`; the driver owns
    /// the clock.
    pub fn step(&mut self, sys: &mut System) -> SimResult<()> {
        self.update_acceleration(sys)?;
        self.update_velocity(sys);
        self.update_position(sys)
    }
}

/// Acceleration on body `i` from every other body in the snapshot
fn acceleration_on<F: ForceModel>(i: usize, front: &[Body], force: &F, t: f64) -> SimResult<NVec2> {
    let bi = &front[i];
    let mut acc = NVec2::zeros();

    for (j, bj) in front.iter().enumerate() {
        if i == j { // no self-interaction
            continue;
        }

        let Interaction { r, f } = force
            .interaction(bi, bj)
            .ok_or(SimError::SingularSeparation { i, j, t })?;

        // Magnitude of the acceleration on i, directed from i toward j
        let a = f / bi.m();
        let d = bi.x - bj.x;
        acc += d * -a / r;
    }

    Ok(acc)
}
