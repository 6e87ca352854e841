//! Path polynomial estimation.
//!
//! Three tiers, first match wins:
//! 1. Centerline between the inner lane lines, when both are confident.
//! 2. Lane-compensated driving path from the lateral planner.
//! 3. Straight line.
//!
//! Malformed or missing inputs fall through to the next tier.

use serde::{Deserialize, Serialize};
use tracing::trace;
use tvc_common::consts::{
    LANE_CHECK_HORIZONS, LANE_CHECK_SPEED_OFFSET, LANE_LINE_COUNT, LEFT_LANE_IDX, RIGHT_LANE_IDX,
    TRAJECTORY_SIZE,
};
use tvc_common::snapshot::{LateralPlan, ModelOutput};

use crate::config::TurnControllerConfig;
use crate::control::lookup::interp;
use crate::control::polyfit::polyfit_cubic;

/// Cubic path `y(x)`, coefficients ordered cubic → constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPolynomial(pub [f64; 4]);

impl PathPolynomial {
    /// Straight line ahead.
    pub const ZERO: Self = Self([0.0; 4]);

    #[inline]
    pub const fn coeffs(&self) -> &[f64; 4] {
        &self.0
    }

    /// Lateral offset at forward distance `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let [c3, c2, c1, c0] = self.0;
        ((c3 * x + c2) * x + c1) * x + c0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == 0.0)
    }
}

/// Which input produced the path polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathSource {
    Lanes,
    DrivingPath,
    #[default]
    Straight,
}

/// Path polynomial plus its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathEstimate {
    pub poly: PathPolynomial,
    pub source: PathSource,
}

/// Estimate the path ahead from the available model and planner outputs.
pub fn estimate_path(
    config: &TurnControllerConfig,
    model: Option<&ModelOutput>,
    lateral_plan: Option<&LateralPlan>,
    v_ego: f64,
) -> PathEstimate {
    let estimate = if let Some(poly) = model.and_then(|m| lane_path(config, m, v_ego)) {
        PathEstimate {
            poly,
            source: PathSource::Lanes,
        }
    } else if let Some(poly) = lateral_plan.and_then(driving_path) {
        PathEstimate {
            poly,
            source: PathSource::DrivingPath,
        }
    } else {
        PathEstimate::default()
    };
    trace!("TVC: path source {:?}", estimate.source);
    estimate
}

/// Path polynomial only; see [`estimate_path`].
pub fn compute_path_poly(
    config: &TurnControllerConfig,
    model: Option<&ModelOutput>,
    lateral_plan: Option<&LateralPlan>,
    v_ego: f64,
) -> PathPolynomial {
    estimate_path(config, model, lateral_plan, v_ego).poly
}

/// Probability modifier from how wide the lane is now and in a few seconds.
fn lane_width_modifier(
    config: &TurnControllerConfig,
    x: &[f64],
    width: &[f64],
    v_ego: f64,
) -> f64 {
    LANE_CHECK_HORIZONS
        .iter()
        .map(|t| {
            let width_at_t = interp(t * (v_ego + LANE_CHECK_SPEED_OFFSET), x, width);
            config.lane_width_prob.interp(width_at_t)
        })
        .fold(f64::INFINITY, f64::min)
}

fn lane_path(
    config: &TurnControllerConfig,
    model: &ModelOutput,
    v_ego: f64,
) -> Option<PathPolynomial> {
    if model.lane_lines.len() != LANE_LINE_COUNT
        || model.lane_lines[0].t.len() != TRAJECTORY_SIZE
        || model.lane_line_probs.len() != LANE_LINE_COUNT
        || model.lane_line_stds.len() != LANE_LINE_COUNT
    {
        return None;
    }

    let left = &model.lane_lines[LEFT_LANE_IDX];
    let right = &model.lane_lines[RIGHT_LANE_IDX];
    // Left and right lines share the same x grid.
    let x = left.x.as_slice();
    let n = x.len();
    if n == 0 || left.y.len() != n || right.y.len() != n {
        return None;
    }

    let mut width = [0.0_f64; TRAJECTORY_SIZE];
    for i in 0..n {
        width[i] = right.y[i] - left.y[i];
    }
    let width = &width[..n];

    let width_mod = lane_width_modifier(config, x, width, v_ego);
    let l_prob = model.lane_line_probs[LEFT_LANE_IDX]
        * width_mod
        * config.lane_std_prob.interp(model.lane_line_stds[LEFT_LANE_IDX]);
    let r_prob = model.lane_line_probs[RIGHT_LANE_IDX]
        * width_mod
        * config.lane_std_prob.interp(model.lane_line_stds[RIGHT_LANE_IDX]);

    if !(l_prob > config.min_lane_prob && r_prob > config.min_lane_prob) {
        return None;
    }

    let mut center = [0.0_f64; TRAJECTORY_SIZE];
    for i in 0..n {
        center[i] = left.y[i] + width[i] / 2.0;
    }
    polyfit_cubic(x, &center[..n]).map(PathPolynomial)
}

fn driving_path(plan: &LateralPlan) -> Option<PathPolynomial> {
    match plan.path_x.first() {
        Some(&x0) if x0 > 0.0 => polyfit_cubic(&plan.path_x, &plan.path_y).map(PathPolynomial),
        _ => None,
    }
}
