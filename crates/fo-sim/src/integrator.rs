//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Forward Euler (explicit, 1st order): `x_new = x + dt * rhs(t, x)`.
///
/// No error control. For a linear decay with time constant `tau` it is only
/// stable while `dt < 2 * tau`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}
