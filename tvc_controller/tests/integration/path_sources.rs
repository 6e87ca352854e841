//! Path source selection seen from the controller.

use tvc_common::consts::TRAJECTORY_SIZE;
use tvc_common::snapshot::{CycleSnapshot, LaneLine, ModelOutput};
use tvc_common::state::TurnControllerState::*;
use tvc_controller::control::path::PathSource;

use super::{CRUISE, LIMITS, harness, parabola_plan, samples};

fn grid_x(i: usize) -> f64 {
    192.0 * (i as f64 / (TRAJECTORY_SIZE - 1) as f64).powi(2)
}

/// Four lane lines `width` apart following `y = c2·x²`.
fn lanes(width: f64, c2: f64, prob: f64, std: f64) -> ModelOutput {
    let mut m = ModelOutput::default();
    for offset in [-1.5, -0.5, 0.5, 1.5] {
        m.lane_lines
            .push(LaneLine {
                x: samples(grid_x),
                y: samples(|i| c2 * grid_x(i).powi(2) + offset * width),
                t: samples(|i| i as f64 * 0.3125),
            })
            .unwrap();
        m.lane_line_probs.push(prob).unwrap();
        m.lane_line_stds.push(std).unwrap();
    }
    m
}

#[test]
fn confident_lanes_take_priority_over_driving_path() {
    let mut h = harness(true);
    let snap = CycleSnapshot {
        model: Some(lanes(3.5, 0.004, 0.9, 0.05)),
        lateral_plan: Some(parabola_plan(0.0)),
        ..Default::default()
    };
    let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snap);
    assert_eq!(h.tvc.path_source(), PathSource::Lanes);
    assert!((h.tvc.path_poly().coeffs()[1] - 0.004).abs() < 1e-9);
    assert_eq!(out.state, Entering);
}

#[test]
fn weak_lanes_fall_back_to_driving_path() {
    for model in [
        lanes(3.5, 0.004, 0.2, 0.05), // low probability
        lanes(6.0, 0.004, 0.9, 0.05), // too wide
        lanes(3.5, 0.004, 0.9, 0.5),  // noisy
    ] {
        let mut h = harness(true);
        let snap = CycleSnapshot {
            model: Some(model),
            lateral_plan: Some(parabola_plan(0.0)),
            ..Default::default()
        };
        let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snap);
        assert_eq!(h.tvc.path_source(), PathSource::DrivingPath);
        assert_eq!(out.state, Disabled);
    }
}

#[test]
fn missing_outputs_mean_straight_road() {
    let mut h = harness(true);
    let mut short = parabola_plan(0.004);
    short.path_x.truncate(3);
    short.path_y.truncate(3);

    for snap in [
        CycleSnapshot::default(),
        CycleSnapshot {
            lateral_plan: Some(short),
            ..Default::default()
        },
    ] {
        let out = h.tvc.update(true, 15.0, 0.0, CRUISE, LIMITS, &snap);
        assert_eq!(h.tvc.path_source(), PathSource::Straight);
        assert!(h.tvc.path_poly().is_zero());
        assert_eq!(out.state, Disabled);
        assert_eq!(out.v_turn, CRUISE);
    }
}
