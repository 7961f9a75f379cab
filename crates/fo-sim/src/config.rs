//! Run configuration.

use fo_controls::{ControllerKind, InputKind};
use fo_core::{Time, ensure_finite, ensure_nonzero, ensure_positive, s};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Everything one run needs. Immutable once handed to [`crate::run`].
///
/// Missing fields fall back to the defaults of the original form:
/// `k = 1`, `tau = 1 s`, `t_sim = 5 s`, `dt = 0.01 s`, unit step, open loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Plant gain.
    pub k: f64,
    /// Plant time constant (seconds), non-zero.
    pub tau: f64,
    /// Simulated horizon (seconds).
    pub t_sim: f64,
    /// Fixed step (seconds).
    pub dt: f64,
    pub input: InputKind,
    pub controller: ControllerKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            k: 1.0,
            tau: 1.0,
            t_sim: 5.0,
            dt: 0.01,
            input: InputKind::default(),
            controller: ControllerKind::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    pub fn with_controller(mut self, controller: ControllerKind) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_plant(mut self, k: f64, tau: f64) -> Self {
        self.k = k;
        self.tau = tau;
        self
    }

    pub fn with_horizon(mut self, t_sim: f64, dt: f64) -> Self {
        self.t_sim = t_sim;
        self.dt = dt;
        self
    }

    /// Check every field. The first failure is reported as
    /// [`crate::SimError::InvalidConfig`].
    pub fn validate(&self) -> SimResult<()> {
        ensure_finite(self.k, "k")?;
        ensure_nonzero(self.tau, "tau must be non-zero")?;
        ensure_positive(self.t_sim, "t_sim must be positive")?;
        ensure_positive(self.dt, "dt must be positive")?;
        self.input.validate()?;
        self.controller.validate()?;
        Ok(())
    }

    pub fn t_sim_time(&self) -> Time {
        s(self.t_sim)
    }

    pub fn dt_time(&self) -> Time {
        s(self.dt)
    }
}
