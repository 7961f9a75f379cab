//! Integration test: time responses against analytic first-order solutions.
//!
//! Explicit Euler carries a global error of O(dt), so every comparison is
//! bounded by a small multiple of the step.

use fo_sim::{ControllerKind, InputKind, SimulationConfig, run};

fn open_loop(input: InputKind) -> SimulationConfig {
    SimulationConfig {
        k: 1.0,
        tau: 1.0,
        t_sim: 5.0,
        dt: 0.01,
        input,
        controller: ControllerKind::None,
    }
}

#[test]
fn open_loop_step_tracks_exponential() {
    let cfg = open_loop(InputKind::Step { amplitude: 1.0 });
    let ts = run(&cfg).expect("valid config");

    let (k, a, tau) = (cfg.k, 1.0, cfg.tau);
    for s in ts.samples() {
        let exact = k * a * (1.0 - (-s.t / tau).exp());
        assert!(
            (s.y - exact).abs() <= cfg.dt,
            "t={} y={} exact={}",
            s.t,
            s.y,
            exact
        );
    }

    let y_end = ts.final_output().unwrap();
    let expected = 1.0 - (-5.0_f64).exp();
    assert!((ts.t.last().unwrap() - 5.0).abs() < 1e-9);
    assert!((y_end - expected).abs() < cfg.dt, "y(5) = {y_end}");
    assert!((y_end - 0.9933).abs() < 1e-3);
}

#[test]
fn open_loop_step_scales_with_gain_and_amplitude() {
    let mut cfg = open_loop(InputKind::Step { amplitude: 2.0 });
    cfg.k = 3.0;
    cfg.t_sim = 20.0;
    let ts = run(&cfg).unwrap();
    assert!((ts.final_output().unwrap() - 6.0).abs() < 1e-6);
}

#[test]
fn open_loop_ramp_tracks_analytic_solution() {
    let slope = 1.0;
    let cfg = open_loop(InputKind::Ramp { slope });
    let ts = run(&cfg).unwrap();

    let tau = cfg.tau;
    for s in ts.samples() {
        assert_eq!(s.u, slope * s.t);
        let exact = slope * (s.t - tau * (1.0 - (-s.t / tau).exp()));
        assert!(
            (s.y - exact).abs() <= 2.0 * cfg.dt,
            "t={} y={} exact={}",
            s.t,
            s.y,
            exact
        );
    }
}

#[test]
fn error_shrinks_with_step_size() {
    let err_at = |dt: f64| {
        let mut cfg = open_loop(InputKind::Step { amplitude: 1.0 });
        cfg.dt = dt;
        let ts = run(&cfg).unwrap();
        ts.samples()
            .map(|s| (s.y - (1.0 - (-s.t).exp())).abs())
            .fold(0.0, f64::max)
    };
    let coarse = err_at(0.02);
    let fine = err_at(0.01);
    assert!(fine < coarse);
    // First order: halving dt roughly halves the error.
    assert!((coarse / fine - 2.0).abs() < 0.2, "ratio {}", coarse / fine);
}

#[test]
fn proportional_loop_settles_below_setpoint() {
    let cfg = SimulationConfig {
        k: 1.0,
        tau: 1.0,
        t_sim: 20.0,
        dt: 0.01,
        input: InputKind::Step { amplitude: 1.0 },
        controller: ControllerKind::P { kp: 2.0 },
    };
    let ts = run(&cfg).unwrap();

    let expected = 2.0 * 1.0 / (1.0 + 2.0 * 1.0);
    let y_end = ts.final_output().unwrap();
    assert!((y_end - expected).abs() < 1e-6, "y_end = {y_end}");
    assert!((y_end - 0.667).abs() < 1e-3);
}

#[test]
fn pid_loop_tracks_step() {
    let cfg = SimulationConfig {
        t_sim: 30.0,
        controller: ControllerKind::Pid {
            kp: 2.0,
            ki: 1.0,
            kd: 0.1,
        },
        ..SimulationConfig::default()
    };
    let ts = run(&cfg).unwrap();
    assert!((ts.final_output().unwrap() - 1.0).abs() < 1e-3);
}
