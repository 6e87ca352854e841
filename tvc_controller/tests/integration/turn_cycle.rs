//! Full turn cycle through the controller facade.

use tvc_common::state::TurnControllerState::{self, *};
use tvc_controller::control::curvature::LateralAccState;
use tvc_controller::control::path::PathSource;

use super::{CRUISE, LIMITS, harness, snapshot};

/// Curve whose predicted lat acc at 15 m/s is ~1.73 m/s² (no overshoot).
const CURVE_C2: f64 = 0.004;

#[test]
fn straight_road_keeps_cruise_speed() {
    let mut h = harness(true);
    let out = h.tvc.update(true, 20.0, 0.0, CRUISE, LIMITS, &snapshot(None, 0.0, false));
    assert_eq!(h.tvc.lat_acc_state().max_pred_lat_acc, 0.0);
    assert_eq!(out.state, Disabled);
    assert_eq!(out.v_turn, CRUISE);
    assert_eq!(out.acc_limits, LIMITS);
    assert!(!out.active);
}

#[test]
fn entering_turning_leaving_disabled() {
    let mut h = harness(true);
    let v = 15.0;

    // Curve ahead, wheel straight.
    let out = h.tvc.update(true, v, 0.0, CRUISE, LIMITS, &snapshot(Some(CURVE_C2), 0.0, false));
    assert_eq!(h.tvc.path_source(), PathSource::DrivingPath);
    assert!(h.tvc.lat_acc_state().max_pred_lat_acc > 1.3);
    assert!(!h.tvc.lat_acc_state().overshoot_ahead);
    assert_eq!(out.state, Entering);
    assert!(out.active);
    assert!(out.v_turn >= 8.33 && out.v_turn < v);
    assert!(out.acc_limits.min <= LIMITS.min);
    assert_eq!(out.acc_limits.max, LIMITS.max);

    // In the curve: 0.008 1/m → 1.8 m/s².
    let out = h.tvc.update(true, v, -0.5, CRUISE, LIMITS, &snapshot(Some(CURVE_C2), 0.008, false));
    assert_eq!(out.state, Turning);
    assert_eq!(out.v_turn, v);
    assert!((out.acc_limits.min - (-0.18)).abs() < 1e-9);

    // Unwinding: 0.0055 1/m → ~1.24 m/s².
    let out = h.tvc.update(true, v, 0.0, CRUISE, LIMITS, &snapshot(None, 0.0055, false));
    assert_eq!(out.state, Leaving);
    assert_eq!(out.v_turn, v);

    // Straight again.
    let out = h.tvc.update(true, v, 0.3, CRUISE, LIMITS, &snapshot(None, 0.0, false));
    assert_eq!(out.state, Disabled);
    assert_eq!(out.v_turn, CRUISE);
    assert_eq!(*h.tvc.lat_acc_state(), LateralAccState::default());
}

#[test]
fn repeated_entering_cycle_is_idempotent() {
    let mut h = harness(true);
    let snap = snapshot(Some(CURVE_C2), 0.0, false);
    h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snap);
    assert!(h.tvc.last_transition().is_changed());

    for _ in 0..10 {
        let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snap);
        assert_eq!(out.state, Entering);
        assert!(!h.tvc.last_transition().is_changed());
    }
}

fn drive_into(h: &mut super::Harness, target: TurnControllerState) {
    let v = 15.0;
    h.tvc.update(true, v, 0.0, CRUISE, LIMITS, &snapshot(Some(CURVE_C2), 0.0, false));
    if target == Entering {
        return;
    }
    h.tvc.update(true, v, 0.0, CRUISE, LIMITS, &snapshot(Some(CURVE_C2), 0.008, false));
    if target == Turning {
        return;
    }
    h.tvc.update(true, v, 0.0, CRUISE, LIMITS, &snapshot(None, 0.0055, false));
}

#[test]
fn gas_or_disengage_forces_disabled_and_resets() {
    for target in [Entering, Turning, Leaving] {
        for (enabled, gas) in [(false, false), (true, true), (false, true)] {
            let mut h = harness(true);
            drive_into(&mut h, target);
            assert_eq!(h.tvc.state(), target);

            // Strong curve and steering would otherwise keep the controller active.
            let snap = snapshot(Some(0.01), 0.01, gas);
            let out = h.tvc.update(enabled, 15.0, 0.0, CRUISE, LIMITS, &snap);
            assert_eq!(out.state, Disabled, "{target:?} enabled={enabled} gas={gas}");
            assert_eq!(*h.tvc.lat_acc_state(), LateralAccState::default());
            assert_eq!(out.v_turn, CRUISE);
        }
    }
}

#[test]
fn hysteresis_band_does_not_chatter() {
    // Curvatures giving 1.31 … 1.49 m/s² at 15 m/s.
    let band: Vec<f64> = [1.31, 1.45, 1.34, 1.49, 1.40, 1.32]
        .iter()
        .map(|a| a / 225.0)
        .collect();

    for target in [Turning, Leaving] {
        let mut h = harness(true);
        drive_into(&mut h, target);
        for &k in band.iter().cycle().take(40) {
            let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snapshot(None, k, false));
            assert_eq!(out.state, target);
        }
    }
}

#[test]
fn target_speed_never_below_floor() {
    let curves = [None, Some(0.0005), Some(0.004), Some(0.02), Some(0.1)];
    let steering = [0.0, 0.002, 0.006, 0.01, 0.05, 0.2];
    let speeds = [0.0, 3.0, 6.0, 10.0, 15.0, 25.0, 35.0];

    let mut h = harness(true);
    for &c in &curves {
        for &k in &steering {
            for &v in &speeds {
                for cruise in [5.0, 25.0] {
                    let out = h.tvc.update(true, v, 0.0, cruise, LIMITS, &snapshot(c, k, false));
                    if out.active {
                        assert!(out.v_turn >= 8.33, "v={v} c={c:?} k={k}: {}", out.v_turn);
                    } else {
                        assert_eq!(out.v_turn, cruise);
                    }
                }
            }
        }
    }
}

#[test]
fn overshoot_targets_curve_speed() {
    let mut h = harness(true);
    // Tight curve: predicted lat acc at 25 m/s far above 2 m/s².
    let out = h.tvc.update(true, 25.0, 0.0, CRUISE, LIMITS, &snapshot(Some(0.004), 0.0, false));
    let lat = *h.tvc.lat_acc_state();
    assert_eq!(out.state, Entering);
    assert!(lat.overshoot_ahead);
    assert_eq!(lat.overshoot_distance, 20.0);
    assert!((out.v_turn - lat.overshoot_speed.max(8.33)).abs() < 1e-12);
    let needed = (lat.overshoot_speed.powi(2) - 625.0) / (2.0 * 20.0);
    assert!(out.acc_limits.min <= needed + 1e-12);
}
