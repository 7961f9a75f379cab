//! First-order linear plant.

use fo_core::{ensure_finite, ensure_nonzero};

use crate::error::SimResult;
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;

/// First-order lag `G(s) = K / (tau*s + 1)`.
///
/// Dynamics: `dy/dt = (-y + K*u_c) / tau`, starting from `y = 0`. The control
/// effort `u_c` is held by the plant and is constant across a step.
///
/// A negative `tau` is accepted and gives an unstable plant; only `tau == 0`
/// is rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct FirstOrderPlant {
    k: f64,
    tau: f64,
    effort: f64,
}

impl FirstOrderPlant {
    pub fn new(k: f64, tau: f64) -> SimResult<Self> {
        ensure_finite(k, "k")?;
        ensure_nonzero(tau, "tau must be non-zero")?;
        Ok(Self { k, tau, effort: 0.0 })
    }

    pub fn gain(&self) -> f64 {
        self.k
    }

    pub fn time_constant(&self) -> f64 {
        self.tau
    }

    /// Set the control effort seen by subsequent `rhs` calls.
    pub fn set_effort(&mut self, effort: f64) {
        self.effort = effort;
    }

    /// One explicit Euler step from `y` under `effort`:
    /// `y + dt * (-y + K*effort) / tau`.
    pub fn advance(&mut self, t: f64, y: f64, effort: f64, dt: f64) -> SimResult<f64> {
        self.set_effort(effort);
        ForwardEuler.step(self, t, &y, dt)
    }

    /// Whether explicit Euler with step `dt` stays bounded for this plant.
    pub fn is_euler_stable(&self, dt: f64) -> bool {
        self.tau > 0.0 && dt < 2.0 * self.tau
    }
}

impl TransientModel for FirstOrderPlant {
    type State = f64;

    fn initial_state(&self) -> f64 {
        0.0
    }

    fn rhs(&mut self, _t: f64, y: &f64) -> SimResult<f64> {
        Ok((-y + self.k * self.effort) / self.tau)
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn scale(&self, a: &f64, scale: f64) -> f64 {
        a * scale
    }
}
