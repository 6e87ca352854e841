//! Per-state speed solution.
//!
//! Produces the turn target speed and, in Entering and Turning, a tightened
//! minimum acceleration for the longitudinal planner.

use serde::{Deserialize, Serialize};
use tracing::trace;
use tvc_common::consts::{EVAL_HORIZON, MS_TO_KPH};
use tvc_common::snapshot::AccLimits;
use tvc_common::state::TurnControllerState;

use crate::config::TurnControllerConfig;
use crate::control::curvature::LateralAccState;

/// Output of [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedSolution {
    /// Target speed [m/s], never below `min_v_solution`.
    pub v_turn: f64,
    pub acc_limits: AccLimits,
}

/// Compute the target speed and acceleration limits for `state`.
pub fn solve(
    config: &TurnControllerConfig,
    state: TurnControllerState,
    lat: &LateralAccState,
    v_ego: f64,
    v_cruise_setpoint: f64,
    mut acc_limits: AccLimits,
) -> SpeedSolution {
    let v_turn = match state {
        TurnControllerState::Disabled => v_cruise_setpoint,
        TurnControllerState::Entering => {
            let mut min_acc = config.entering_smooth_decel.interp(lat.max_pred_lat_acc);
            let v_turn = if lat.overshoot_ahead {
                // Brake enough to reach the overshoot speed at the overshoot distance.
                min_acc = min_acc.min(
                    (lat.overshoot_speed.powi(2) - v_ego.powi(2)) / (2.0 * lat.overshoot_distance),
                );
                lat.overshoot_speed
            } else {
                // Speed reached at the horizon following the smooth deceleration.
                let radicand = v_ego.powi(2) + 2.0 * min_acc * EVAL_HORIZON;
                if radicand >= 0.0 {
                    radicand.sqrt()
                } else {
                    config.min_v_solution
                }
            };
            acc_limits.min = acc_limits.min.min(min_acc);
            trace!(
                "TVC entering: overshoot {}, decel {:.2}, target {:.2} km/h",
                lat.overshoot_ahead,
                acc_limits.min,
                v_turn * MS_TO_KPH
            );
            v_turn
        }
        TurnControllerState::Turning => {
            acc_limits.min = config.min_turning_acc.interp(lat.current_lat_acc);
            v_ego.min(lat.max_v_for_current_curvature)
        }
        TurnControllerState::Leaving => v_ego.min(v_cruise_setpoint),
    };

    SpeedSolution {
        v_turn: v_turn.max(config.min_v_solution),
        acc_limits,
    }
}
