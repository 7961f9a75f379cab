//! Property tests: determinism and output shape over random configurations.

use fo_sim::{ControllerKind, InputKind, SimulationConfig, run};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = InputKind> {
    prop_oneof![
        (-5.0_f64..5.0).prop_map(|amplitude| InputKind::Step { amplitude }),
        (-5.0_f64..5.0).prop_map(|slope| InputKind::Ramp { slope }),
    ]
}

fn controller_strategy() -> impl Strategy<Value = ControllerKind> {
    prop_oneof![
        Just(ControllerKind::None),
        (0.0_f64..5.0).prop_map(|kp| ControllerKind::P { kp }),
        (0.0_f64..5.0, 0.0_f64..2.0).prop_map(|(kp, ki)| ControllerKind::Pi { kp, ki }),
        (0.0_f64..5.0, 0.0_f64..2.0, 0.0_f64..0.5)
            .prop_map(|(kp, ki, kd)| ControllerKind::Pid { kp, ki, kd }),
    ]
}

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (
        -3.0_f64..3.0,
        prop_oneof![0.1_f64..5.0, -5.0_f64..-0.1],
        0.1_f64..10.0,
        0.001_f64..0.5,
        input_strategy(),
        controller_strategy(),
    )
        .prop_map(|(k, tau, t_sim, dt, input, controller)| SimulationConfig {
            k,
            tau,
            t_sim,
            dt,
            input,
            controller,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn identical_configs_give_identical_series(cfg in config_strategy()) {
        let a = run(&cfg).unwrap();
        let b = run(&cfg.clone()).unwrap();
        prop_assert_eq!(a.t.len(), b.t.len());
        for (ya, yb) in a.y.iter().zip(&b.y) {
            prop_assert_eq!(ya.to_bits(), yb.to_bits());
        }
        prop_assert_eq!(&a.t, &b.t);
        prop_assert_eq!(&a.u, &b.u);
    }

    #[test]
    fn series_shape_holds(cfg in config_strategy()) {
        let ts = run(&cfg).unwrap();
        prop_assert!(ts.check_invariants().is_ok());
        prop_assert_eq!(ts.t.len(), ts.u.len());
        prop_assert_eq!(ts.t.len(), ts.y.len());
        prop_assert_eq!(ts.t[0], 0.0);
        prop_assert_eq!(ts.y[0], 0.0);

        for (i, t) in ts.t.iter().enumerate() {
            prop_assert_eq!(*t, i as f64 * cfg.dt);
        }
        let end = *ts.t.last().unwrap();
        prop_assert!(end <= cfg.t_sim * (1.0 + 1e-9));
        prop_assert!(cfg.t_sim - end < cfg.dt);
    }
}
