//! Per-cycle inputs delivered by the surrounding pipeline.
//!
//! Sample buffers are fixed-capacity (`heapless`) so a cycle never touches
//! the heap. Model and lateral-plan outputs are optional: they are absent
//! when the producing service has not published a valid message.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::consts::{LANE_LINE_COUNT, TRAJECTORY_SIZE};

/// Longitudinal sample buffer for model trajectories.
pub type Samples = Vec<f64, TRAJECTORY_SIZE>;

/// Acceleration limits [m/s²] handed to the longitudinal planner.
///
/// The controller may lower `min`; it never touches `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccLimits {
    pub min: f64,
    pub max: f64,
}

impl AccLimits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl From<(f64, f64)> for AccLimits {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Car state fields read by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    /// Steering wheel angle [deg].
    pub steering_angle_deg: f64,
    /// Driver is pressing the accelerator.
    pub gas_pressed: bool,
}

/// One lane line curve sampled along the model's longitudinal grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneLine {
    /// Forward distance [m].
    pub x: Samples,
    /// Lateral offset [m], positive to the right.
    pub y: Samples,
    /// Time of each sample [s].
    pub t: Samples,
}

/// Vision model output relevant to curvature estimation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Outer-left, left, right, outer-right.
    pub lane_lines: Vec<LaneLine, LANE_LINE_COUNT>,
    /// Detection probability per lane line.
    pub lane_line_probs: Vec<f64, LANE_LINE_COUNT>,
    /// Fit uncertainty [m] per lane line.
    pub lane_line_stds: Vec<f64, LANE_LINE_COUNT>,
}

/// Lateral planner output: driving path compensated with lane lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LateralPlan {
    /// Forward distance [m].
    pub path_x: Samples,
    /// Lateral offset [m].
    pub path_y: Samples,
}

/// Everything the controller reads from the message bus in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub car_state: CarState,
    pub model: Option<ModelOutput>,
    pub lateral_plan: Option<LateralPlan>,
}
