//! Curvature and lateral acceleration prediction.
//!
//! Current curvature comes from the steering angle through the bicycle
//! model; predicted curvature comes from the path polynomial evaluated on a
//! fixed look-ahead grid (20 m … 145 m, 5 m step).

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use tracing::debug;
use tvc_common::consts::{
    EVAL_GRID_LEN, EVAL_LENGTH_M, EVAL_START_M, EVAL_STEP, EVAL_STEP_M, KPH_TO_MS, MS_TO_KPH,
    NO_OVERSHOOT_DISTANCE, OVERSHOOT_MIN_V,
};

use crate::config::TurnControllerConfig;
use crate::control::path::PathPolynomial;

/// Look-ahead distances [m] at which predicted curvature is evaluated.
pub const CURVATURE_GRID: [f64; EVAL_GRID_LEN] = build_grid();

const fn build_grid() -> [f64; EVAL_GRID_LEN] {
    let mut grid = [0.0; EVAL_GRID_LEN];
    let mut i = 0;
    while i < EVAL_GRID_LEN {
        grid[i] = (EVAL_START_M + i * EVAL_STEP_M) as f64;
        i += 1;
    }
    grid
}

// Last sample stays inside the evaluated length.
const_assert!(EVAL_START_M + (EVAL_GRID_LEN - 1) * EVAL_STEP_M < EVAL_LENGTH_M);

/// Curvature [1/m] of `poly` at forward distance `x`.
#[inline]
pub fn curvature(poly: &PathPolynomial, x: f64) -> f64 {
    let [c3, c2, c1, _] = *poly.coeffs();
    let slope = 3.0 * c3 * x * x + 2.0 * c2 * x + c1;
    (2.0 * c2 + 6.0 * c3 * x).abs() / (1.0 + slope * slope).powf(1.5)
}

/// Lateral acceleration [m/s²] at speed `v` [m/s] on curvature `curv` [1/m].
#[inline]
pub fn lateral_acc(v: f64, curv: f64) -> f64 {
    v * v * curv
}

/// Curvature of `poly` at every grid distance.
pub fn eval_curvature(poly: &PathPolynomial) -> [f64; EVAL_GRID_LEN] {
    CURVATURE_GRID.map(|x| curvature(poly, x))
}

/// Lateral acceleration state derived each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralAccState {
    /// From the current steering angle [m/s²].
    pub current_lat_acc: f64,
    /// Maximum over the look-ahead grid at the current speed [m/s²].
    pub max_pred_lat_acc: f64,
    /// Speed that keeps the current curvature at the regulated limit [m/s].
    pub max_v_for_current_curvature: f64,
    /// Regulated limit is exceeded somewhere on the grid.
    pub overshoot_ahead: bool,
    /// Distance to the first overshooting grid sample [m].
    pub overshoot_distance: f64,
    /// Speed that keeps the worst predicted curvature at the limit [m/s].
    pub overshoot_speed: f64,
}

impl Default for LateralAccState {
    fn default() -> Self {
        Self {
            current_lat_acc: 0.0,
            max_pred_lat_acc: 0.0,
            max_v_for_current_curvature: 0.0,
            overshoot_ahead: false,
            overshoot_distance: NO_OVERSHOOT_DISTANCE,
            overshoot_speed: 0.0,
        }
    }
}

impl LateralAccState {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Evaluate current and predicted lateral acceleration.
///
/// `steering_angle_rad` is the steering wheel angle; `steer_ratio` and
/// `wheelbase` [m] convert it to path curvature.
pub fn evaluate(
    config: &TurnControllerConfig,
    poly: &PathPolynomial,
    v_ego: f64,
    steering_angle_rad: f64,
    steer_ratio: f64,
    wheelbase: f64,
    v_cruise_setpoint: f64,
) -> LateralAccState {
    let a_lat_max = config.a_lat_reg_max;

    let current_curvature = (steering_angle_rad / (steer_ratio * wheelbase)).abs();
    let current_lat_acc = lateral_acc(v_ego, current_curvature);
    let max_v_for_current_curvature = if current_curvature > 0.0 {
        (a_lat_max / current_curvature).sqrt()
    } else {
        config.v_cruise_max_kph * KPH_TO_MS
    };

    let pred = eval_curvature(poly);
    let max_pred_curvature = pred.iter().copied().fold(0.0_f64, f64::max);
    let max_pred_lat_acc = lateral_acc(v_ego, max_pred_curvature);

    let mut state = LateralAccState {
        current_lat_acc,
        max_pred_lat_acc,
        max_v_for_current_curvature,
        ..LateralAccState::default()
    };

    let threshold = a_lat_max / v_ego.max(OVERSHOOT_MIN_V).powi(2);
    if let Some(idx) = pred.iter().position(|&c| c >= threshold) {
        state.overshoot_ahead = true;
        state.overshoot_speed = (a_lat_max / max_pred_curvature).sqrt().min(v_cruise_setpoint);
        state.overshoot_distance = CURVATURE_GRID[idx].max(EVAL_STEP);
        debug!(
            "TVC: high lat acc ahead. dist: {:.2}, v: {:.2} km/h",
            state.overshoot_distance,
            state.overshoot_speed * MS_TO_KPH
        );
    }

    state
}
