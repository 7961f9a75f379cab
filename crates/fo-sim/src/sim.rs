//! Simulation runner.

use fo_controls::{Controller, generate_into};
use tracing::{debug, debug_span, warn};

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::grid::{TimeGrid, try_buffer};
use crate::model::TransientModel;
use crate::plant::FirstOrderPlant;
use crate::series::TimeSeries;

/// Simulate the response described by `config`.
///
/// The configuration is validated before anything is computed; an invalid
/// configuration fails the whole run and no partial series is produced.
/// Each call builds its own controller state, so two calls with the same
/// configuration return identical series.
///
/// Numerical divergence (explicit Euler with `dt >= 2 * tau`) is reported
/// as-is in the output, never clamped.
pub fn run(config: &SimulationConfig) -> SimResult<TimeSeries> {
    config.validate()?;

    let span = debug_span!(
        "run",
        input = config.input.label(),
        controller = config.controller.label()
    );
    let _guard = span.enter();

    let grid = TimeGrid::new(config.t_sim_time(), config.dt_time())?;
    let mut plant = FirstOrderPlant::new(config.k, config.tau)?;
    let mut controller = Controller::new(config.controller);

    if config.tau > 0.0 && !plant.is_euler_stable(config.dt) {
        warn!(
            dt = config.dt,
            tau = config.tau,
            "dt >= 2*tau: explicit Euler is outside its stability region, output will diverge"
        );
    }

    let t = grid.try_to_vec()?;
    let mut u = try_buffer(t.len())?;
    generate_into(&t, &config.input, &mut u);
    let mut y = try_buffer(t.len())?;
    y.push(plant.initial_state());

    for i in 1..t.len() {
        let y_prev = y[i - 1];
        let effort = controller.effort(u[i], y_prev, config.dt)?;
        y.push(plant.advance(t[i - 1], y_prev, effort, config.dt)?);
    }

    let series = TimeSeries { t, u, y };
    debug!(
        samples = series.len(),
        final_output = ?series.final_output(),
        integral = controller.integral(),
        "run complete"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;
    use fo_controls::{ControllerKind, InputKind};

    #[test]
    fn open_loop_first_steps_match_recurrence() {
        let cfg = SimulationConfig::default().with_horizon(0.3, 0.1);
        let ts = run(&cfg).unwrap();

        assert_eq!(ts.len(), 4);
        let mut y = 0.0;
        for i in 1..4 {
            y += 0.1 * (-y + 1.0) / 1.0;
            assert_eq!(ts.y[i], y);
        }
    }

    #[test]
    fn single_sample_run() {
        let cfg = SimulationConfig::default()
            .with_horizon(0.005, 0.01)
            .with_input(InputKind::Step { amplitude: 2.0 });
        let ts = run(&cfg).unwrap();
        assert_eq!(ts.t, vec![0.0]);
        assert_eq!(ts.u, vec![2.0]);
        assert_eq!(ts.y, vec![0.0]);
    }

    #[test]
    fn open_loop_ignores_error() {
        // With no controller the plant is driven by the reference, so a
        // zero-gain controller and the bypass must differ.
        let open = run(&SimulationConfig::default()).unwrap();
        let zero_p = run(
            &SimulationConfig::default().with_controller(ControllerKind::P { kp: 0.0 }),
        )
        .unwrap();
        assert!(open.final_output().unwrap() > 0.9);
        assert_eq!(zero_p.final_output(), Some(0.0));
    }

    #[test]
    fn pi_removes_steady_state_error() {
        let cfg = SimulationConfig::default()
            .with_horizon(30.0, 0.01)
            .with_controller(ControllerKind::Pi { kp: 2.0, ki: 1.0 });
        let ts = run(&cfg).unwrap();
        assert!((ts.final_output().unwrap() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn unaddressable_horizon_is_invalid_config() {
        let cfg = SimulationConfig::default().with_horizon(2e18, 1.0);
        assert!(cfg.validate().is_ok());
        assert!(matches!(run(&cfg), Err(SimError::InvalidConfig { .. })));
    }

    #[test]
    fn invalid_config_produces_no_series() {
        let cfg = SimulationConfig::default().with_plant(1.0, 0.0);
        assert!(matches!(run(&cfg), Err(SimError::InvalidConfig { .. })));
    }
}
