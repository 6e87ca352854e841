//! Shared fixtures for the integration tests.

mod param_refresh;
mod path_sources;
mod turn_cycle;

use tvc_common::consts::{DEG_TO_RAD, TRAJECTORY_SIZE};
use tvc_common::params::TURN_VISION_CONTROL_KEY;
use tvc_common::snapshot::{AccLimits, CycleSnapshot, LateralPlan, Samples};
use tvc_controller::config::{TurnControllerConfig, VehicleParams};
use tvc_controller::cycle::TurnController;
use tvc_controller::params::{ManualClock, MemoryParamStore};

pub const LIMITS: AccLimits = AccLimits::new(-1.2, 1.5);
pub const CRUISE: f64 = 25.0;

pub type TestController = TurnController<MemoryParamStore, ManualClock>;

pub struct Harness {
    pub tvc: TestController,
    pub store: MemoryParamStore,
    pub clock: ManualClock,
}

/// Controller with defaults, feature toggle set to `feature`, clock at 0 s.
pub fn harness(feature: bool) -> Harness {
    let store = MemoryParamStore::new();
    store.set_bool(TURN_VISION_CONTROL_KEY, feature);
    let clock = ManualClock::new(0.0);
    let tvc = TurnController::new(
        TurnControllerConfig::default(),
        VehicleParams::default(),
        store.clone(),
        clock.clone(),
    );
    Harness { tvc, store, clock }
}

pub fn samples(f: impl Fn(usize) -> f64) -> Samples {
    let mut s = Samples::new();
    for i in 0..TRAJECTORY_SIZE {
        s.push(f(i)).unwrap();
    }
    s
}

/// Driving path `y = c2·x²` sampled from 1 m to 193 m.
pub fn parabola_plan(c2: f64) -> LateralPlan {
    let x = |i: usize| 1.0 + 6.0 * i as f64;
    LateralPlan {
        path_x: samples(x),
        path_y: samples(|i| c2 * x(i).powi(2)),
    }
}

/// Steering wheel angle [deg] that produces `curvature` with default vehicle params.
pub fn steering_for(curvature: f64) -> f64 {
    let v = VehicleParams::default();
    curvature * v.steer_ratio * v.wheelbase / DEG_TO_RAD
}

pub fn snapshot(path_c2: Option<f64>, steer_curvature: f64, gas: bool) -> CycleSnapshot {
    let mut snap = CycleSnapshot::default();
    snap.lateral_plan = path_c2.map(parabola_plan);
    snap.car_state.steering_angle_deg = steering_for(steer_curvature);
    snap.car_state.gas_pressed = gas;
    snap
}
