//! Fixed-step time grid.
//!
//! The grid holds `floor(t_sim / dt) + 1` samples at `t[i] = i * dt`. Sample
//! times are computed by multiplication, never by accumulating `dt`, so the
//! endpoint does not drift. When `t_sim / dt` lands within a relative 1e-9
//! of an integer that integer is taken as the step count, which keeps e.g.
//! `t_sim = 0.3, dt = 0.1` at four samples ending on 0.3.
//!
//! A grid never holds more than [`MAX_SAMPLES`], the largest `Vec<f64>` the
//! allocator can address.

use fo_core::{Time, Tolerances, ensure_finite, ensure_positive, nearly_equal, seconds};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// Upper bound on grid length: `isize::MAX` bytes of `f64`.
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    len: usize,
}

impl TimeGrid {
    pub fn new(t_sim: Time, dt: Time) -> SimResult<Self> {
        Self::from_seconds(seconds(t_sim), seconds(dt))
    }

    pub fn from_seconds(t_sim: f64, dt: f64) -> SimResult<Self> {
        ensure_positive(t_sim, "t_sim must be positive")?;
        ensure_positive(dt, "dt must be positive")?;

        let ratio = ensure_finite(t_sim / dt, "t_sim / dt")?;
        let nearest = ratio.round();
        let steps = if nearly_equal(ratio, nearest, Tolerances::default()) {
            nearest
        } else {
            ratio.floor()
        };
        if steps >= MAX_SAMPLES as f64 {
            return Err(SimError::invalid("t_sim / dt is too large for a sample grid"));
        }

        let len = steps as usize + 1;
        debug!(t_sim, dt, samples = len, "time grid");
        Ok(Self { dt, len })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of samples, including t = 0. Never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a grid holds at least the t = 0 sample.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn time_at(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    /// Last sample time.
    pub fn end(&self) -> f64 {
        self.time_at(self.len - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|i| self.time_at(i))
    }

    /// Sample times in a freshly allocated buffer. Allocation failure is
    /// reported as `InvalidConfig` rather than aborting.
    pub fn try_to_vec(&self) -> SimResult<Vec<f64>> {
        let mut t = try_buffer(self.len)?;
        t.extend(self.iter());
        Ok(t)
    }
}

/// Empty buffer with room for exactly `len` samples.
pub(crate) fn try_buffer(len: usize) -> SimResult<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        SimError::invalid(format!("cannot allocate {len} samples: {e}"))
    })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fo_core::{ms, s};

    #[test]
    fn exact_multiple_includes_endpoint() {
        let grid = TimeGrid::from_seconds(5.0, 0.01).unwrap();
        assert_eq!(grid.len(), 501);
        assert_eq!(grid.time_at(0), 0.0);
        assert!((grid.end() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn near_integer_ratio_rounds() {
        // 0.3 / 0.1 == 2.9999999999999996
        let grid = TimeGrid::from_seconds(0.3, 0.1).unwrap();
        assert_eq!(grid.len(), 4);
        assert!((grid.end() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn non_multiple_stops_before_horizon() {
        let grid = TimeGrid::from_seconds(1.0, 0.3).unwrap();
        assert_eq!(grid.try_to_vec().unwrap().len(), 4);
        assert!(grid.end() <= 1.0);
        assert!(1.0 - grid.end() < grid.dt());
    }

    #[test]
    fn horizon_shorter_than_step_gives_origin_only() {
        let grid = TimeGrid::from_seconds(0.05, 0.1).unwrap();
        assert_eq!(grid.try_to_vec().unwrap(), vec![0.0]);
        assert!(!grid.is_empty());
    }

    #[test]
    fn times_are_not_accumulated() {
        let grid = TimeGrid::from_seconds(10.0, 0.1).unwrap();
        for (i, t) in grid.iter().enumerate() {
            assert_eq!(t, i as f64 * 0.1);
        }
    }

    #[test]
    fn accepts_uom_times() {
        let grid = TimeGrid::new(s(2.0), ms(500.0)).unwrap();
        assert_eq!(grid.len(), 5);
        assert!((grid.dt() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(TimeGrid::from_seconds(0.0, 0.1).is_err());
        assert!(TimeGrid::from_seconds(1.0, 0.0).is_err());
        assert!(TimeGrid::from_seconds(1.0, -0.1).is_err());
        assert!(TimeGrid::from_seconds(f64::INFINITY, 0.1).is_err());
        assert!(TimeGrid::from_seconds(1.0, f64::NAN).is_err());
        assert!(TimeGrid::from_seconds(1e300, 1e-300).is_err());
    }

    #[test]
    fn rejects_grids_beyond_addressable_size() {
        assert!(matches!(
            TimeGrid::from_seconds(2e18, 1.0),
            Err(SimError::InvalidConfig { .. })
        ));
        let limit = MAX_SAMPLES as f64;
        assert!(TimeGrid::from_seconds(limit * 2.0, 1.0).is_err());
    }

    #[test]
    fn oversized_buffer_request_is_an_error() {
        assert!(matches!(
            try_buffer(MAX_SAMPLES),
            Err(SimError::InvalidConfig { .. })
        ));
        assert!(try_buffer(16).unwrap().capacity() >= 16);
    }
}
