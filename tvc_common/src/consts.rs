//! Reference constants for the vision turn controller.
//!
//! Single source of truth for the default thresholds, evaluation grid
//! geometry and unit conversions. `TurnControllerConfig` defaults are
//! built from these values.

use static_assertions::const_assert_eq;

// ─── Speed Floors ───────────────────────────────────────────────────

/// Do not start a turn cycle at or below this speed [m/s] (~20 km/h).
pub const MIN_V: f64 = 5.6;

/// Lowest target speed ever returned as a solution [m/s].
pub const MIN_V_SOLUTION: f64 = 8.33;

// ─── Lateral Acceleration Thresholds [m/s²] ─────────────────────────

/// Predicted lat acc that starts the Entering state.
pub const ENTERING_PRED_LAT_ACC_TH: f64 = 1.3;
/// Predicted lat acc below which Entering is aborted.
pub const ABORT_ENTERING_PRED_LAT_ACC_TH: f64 = 1.1;
/// Current lat acc that moves Entering/Leaving into Turning.
pub const TURNING_LAT_ACC_TH: f64 = 1.5;
/// Current lat acc at or below which Turning becomes Leaving.
pub const LEAVING_LAT_ACC_TH: f64 = 1.3;
/// Current lat acc below which Leaving finishes the cycle.
pub const FINISH_LAT_ACC_TH: f64 = 1.1;

/// Maximum regulated lateral acceleration [m/s²].
pub const A_LAT_REG_MAX: f64 = 2.0;

// ─── Deceleration Lookup Tables ─────────────────────────────────────

/// Entering: predicted lat acc breakpoints [m/s²].
pub const ENTERING_SMOOTH_DECEL_BP: [f64; 2] = [1.0, 3.0];
/// Entering: minimum smooth deceleration [m/s²].
pub const ENTERING_SMOOTH_DECEL_V: [f64; 2] = [-0.3, -1.0];

/// Turning: current lat acc breakpoints [m/s²].
pub const MIN_TURNING_ACC_BP: [f64; 3] = [1.0, 2.0, 3.0];
/// Turning: minimum acceleration [m/s²].
pub const MIN_TURNING_ACC_V: [f64; 3] = [-0.1, -0.2, -0.4];

/// Upper bound on lookup table length.
pub const MAX_LOOKUP_POINTS: usize = 8;

// ─── Lane Confidence ────────────────────────────────────────────────

/// Both adjusted lane probabilities must exceed this to use lanes.
pub const MIN_LANE_PROB: f64 = 0.6;

/// Lane width [m] → probability modifier.
pub const LANE_WIDTH_BP: [f64; 2] = [4.0, 5.0];
pub const LANE_WIDTH_V: [f64; 2] = [1.0, 0.0];

/// Lane fit std [m] → probability modifier.
pub const LANE_STD_BP: [f64; 2] = [0.15, 0.3];
pub const LANE_STD_V: [f64; 2] = [1.0, 0.0];

/// Look-ahead horizons [s] at which lane width is checked.
pub const LANE_CHECK_HORIZONS: [f64; 3] = [0.0, 1.5, 3.0];

/// Speed offset [m/s] added to v_ego when projecting the check horizons.
pub const LANE_CHECK_SPEED_OFFSET: f64 = 7.0;

// ─── Model Geometry ─────────────────────────────────────────────────

/// Samples per lane line / driving path produced by the vision model.
pub const TRAJECTORY_SIZE: usize = 33;

/// Lane lines produced by the model (outer left, left, right, outer right).
pub const LANE_LINE_COUNT: usize = 4;

/// Index of the inner-left lane line.
pub const LEFT_LANE_IDX: usize = 1;
/// Index of the inner-right lane line.
pub const RIGHT_LANE_IDX: usize = 2;

// ─── Curvature Evaluation Grid ──────────────────────────────────────

/// Grid start [m].
pub const EVAL_START_M: usize = 20;
/// Grid step [m].
pub const EVAL_STEP_M: usize = 5;
/// Grid end [m], exclusive.
pub const EVAL_LENGTH_M: usize = 150;

/// Number of grid samples: 20, 25, …, 145.
pub const EVAL_GRID_LEN: usize = (EVAL_LENGTH_M - EVAL_START_M).div_ceil(EVAL_STEP_M);

const_assert_eq!(EVAL_GRID_LEN, 26);

pub const EVAL_STEP: f64 = EVAL_STEP_M as f64;

/// Last grid distance [m]; horizon of the Entering speed projection.
pub const EVAL_HORIZON: f64 = (EVAL_START_M + (EVAL_GRID_LEN - 1) * EVAL_STEP_M) as f64;

// ─── Overshoot / Reset Defaults ─────────────────────────────────────

/// Overshoot distance [m] reported when no overshoot is ahead.
pub const NO_OVERSHOOT_DISTANCE: f64 = 200.0;

/// Floor for v_ego [m/s] in the overshoot curvature threshold.
pub const OVERSHOOT_MIN_V: f64 = 0.1;

// ─── Cruise / Units ─────────────────────────────────────────────────

/// Maximum cruise setpoint [km/h].
pub const V_CRUISE_MAX_KPH: f64 = 145.0;

pub const KPH_TO_MS: f64 = 1.0 / 3.6;
pub const MS_TO_KPH: f64 = 3.6;
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

// ─── Persisted Parameters ───────────────────────────────────────────

/// Minimum interval between feature toggle reads [s].
pub const PARAMS_REFRESH_INTERVAL_S: f64 = 5.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_ends_before_eval_length() {
        assert_eq!(EVAL_HORIZON, 145.0);
        assert!(EVAL_HORIZON < EVAL_LENGTH_M as f64);
    }

    #[test]
    fn thresholds_form_hysteresis_bands() {
        assert!(ABORT_ENTERING_PRED_LAT_ACC_TH < ENTERING_PRED_LAT_ACC_TH);
        assert!(FINISH_LAT_ACC_TH < LEAVING_LAT_ACC_TH);
        assert!(LEAVING_LAT_ACC_TH < TURNING_LAT_ACC_TH);
    }

    #[test]
    fn lane_indices_within_count() {
        assert!(LEFT_LANE_IDX < LANE_LINE_COUNT);
        assert!(RIGHT_LANE_IDX < LANE_LINE_COUNT);
    }
}
