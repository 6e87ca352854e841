//! TOML configuration with validation.
//!
//! Loads [`TvcConfig`]: shared logging fields, the controller thresholds and
//! the vehicle geometry. Every numeric field is optional and defaults to the
//! reference constants in `tvc_common::consts`. The loaded config is
//! immutable for the lifetime of a controller instance.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tvc_common::config::{ConfigError, ConfigLoader, SharedConfig};
use tvc_common::consts::{
    A_LAT_REG_MAX, ABORT_ENTERING_PRED_LAT_ACC_TH, ENTERING_PRED_LAT_ACC_TH,
    ENTERING_SMOOTH_DECEL_BP, ENTERING_SMOOTH_DECEL_V, FINISH_LAT_ACC_TH, LANE_STD_BP,
    LANE_STD_V, LANE_WIDTH_BP, LANE_WIDTH_V, LEAVING_LAT_ACC_TH, MIN_LANE_PROB,
    MIN_TURNING_ACC_BP, MIN_TURNING_ACC_V, MIN_V, MIN_V_SOLUTION, PARAMS_REFRESH_INTERVAL_S,
    TURNING_LAT_ACC_TH, V_CRUISE_MAX_KPH,
};

use crate::control::lookup::LookupTable;

// ─── Controller Thresholds ──────────────────────────────────────────

/// Thresholds and lookup tables of the turn controller.
///
/// Built once and held read-only by the controller instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TurnControllerConfig {
    /// No turn cycle starts at or below this speed [m/s].
    pub min_v: f64,
    /// Floor for every returned target speed [m/s].
    pub min_v_solution: f64,

    /// Predicted lat acc that starts Entering [m/s²].
    pub entering_pred_lat_acc_th: f64,
    /// Predicted lat acc below which Entering aborts [m/s²].
    pub abort_entering_pred_lat_acc_th: f64,
    /// Current lat acc that moves into Turning [m/s²].
    pub turning_lat_acc_th: f64,
    /// Current lat acc at or below which Turning becomes Leaving [m/s²].
    pub leaving_lat_acc_th: f64,
    /// Current lat acc below which Leaving finishes [m/s²].
    pub finish_lat_acc_th: f64,
    /// Maximum regulated lateral acceleration [m/s²].
    pub a_lat_reg_max: f64,

    /// Maximum cruise speed [km/h], used when the car is driving straight.
    pub v_cruise_max_kph: f64,

    /// Minimum adjusted lane probability for lane-based path estimation.
    pub min_lane_prob: f64,

    /// Entering: predicted lat acc → minimum deceleration.
    pub entering_smooth_decel: LookupTable,
    /// Turning: current lat acc → minimum acceleration.
    pub min_turning_acc: LookupTable,
    /// Lane width [m] → lane probability modifier.
    pub lane_width_prob: LookupTable,
    /// Lane fit std [m] → lane probability modifier.
    pub lane_std_prob: LookupTable,

    /// Minimum interval between feature toggle reads [s].
    pub params_refresh_interval: f64,
}

impl Default for TurnControllerConfig {
    fn default() -> Self {
        Self {
            min_v: MIN_V,
            min_v_solution: MIN_V_SOLUTION,
            entering_pred_lat_acc_th: ENTERING_PRED_LAT_ACC_TH,
            abort_entering_pred_lat_acc_th: ABORT_ENTERING_PRED_LAT_ACC_TH,
            turning_lat_acc_th: TURNING_LAT_ACC_TH,
            leaving_lat_acc_th: LEAVING_LAT_ACC_TH,
            finish_lat_acc_th: FINISH_LAT_ACC_TH,
            a_lat_reg_max: A_LAT_REG_MAX,
            v_cruise_max_kph: V_CRUISE_MAX_KPH,
            min_lane_prob: MIN_LANE_PROB,
            entering_smooth_decel: LookupTable::new(
                ENTERING_SMOOTH_DECEL_BP,
                ENTERING_SMOOTH_DECEL_V,
            ),
            min_turning_acc: LookupTable::new(MIN_TURNING_ACC_BP, MIN_TURNING_ACC_V),
            lane_width_prob: LookupTable::new(LANE_WIDTH_BP, LANE_WIDTH_V),
            lane_std_prob: LookupTable::new(LANE_STD_BP, LANE_STD_V),
            params_refresh_interval: PARAMS_REFRESH_INTERVAL_S,
        }
    }
}

impl TurnControllerConfig {
    /// Validate bounds and threshold ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_v", self.min_v),
            ("min_v_solution", self.min_v_solution),
            ("entering_pred_lat_acc_th", self.entering_pred_lat_acc_th),
            ("abort_entering_pred_lat_acc_th", self.abort_entering_pred_lat_acc_th),
            ("turning_lat_acc_th", self.turning_lat_acc_th),
            ("leaving_lat_acc_th", self.leaving_lat_acc_th),
            ("finish_lat_acc_th", self.finish_lat_acc_th),
            ("a_lat_reg_max", self.a_lat_reg_max),
            ("v_cruise_max_kph", self.v_cruise_max_kph),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.min_lane_prob) {
            return Err(ConfigError::ValidationError(format!(
                "min_lane_prob {} out of range [0, 1]",
                self.min_lane_prob
            )));
        }
        if !self.params_refresh_interval.is_finite() || self.params_refresh_interval < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "params_refresh_interval must be finite and >= 0, got {}",
                self.params_refresh_interval
            )));
        }

        if self.abort_entering_pred_lat_acc_th > self.entering_pred_lat_acc_th {
            return Err(ConfigError::ValidationError(format!(
                "abort_entering_pred_lat_acc_th {} exceeds entering_pred_lat_acc_th {}",
                self.abort_entering_pred_lat_acc_th, self.entering_pred_lat_acc_th
            )));
        }
        if self.finish_lat_acc_th > self.leaving_lat_acc_th {
            return Err(ConfigError::ValidationError(format!(
                "finish_lat_acc_th {} exceeds leaving_lat_acc_th {}",
                self.finish_lat_acc_th, self.leaving_lat_acc_th
            )));
        }
        // Turning/Leaving hysteresis band must be non-empty.
        if self.leaving_lat_acc_th >= self.turning_lat_acc_th {
            return Err(ConfigError::ValidationError(format!(
                "leaving_lat_acc_th {} must be below turning_lat_acc_th {}",
                self.leaving_lat_acc_th, self.turning_lat_acc_th
            )));
        }
        Ok(())
    }
}

// ─── Vehicle Geometry ───────────────────────────────────────────────

/// Car parameters used to derive curvature from the steering angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleParams {
    /// Steering wheel to road wheel ratio.
    pub steer_ratio: f64,
    /// Wheelbase [m].
    pub wheelbase: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            steer_ratio: 15.3,
            wheelbase: 2.7,
        }
    }
}

impl VehicleParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.steer_ratio.is_finite() || self.steer_ratio <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "steer_ratio must be finite and > 0, got {}",
                self.steer_ratio
            )));
        }
        if !self.wheelbase.is_finite() || self.wheelbase <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "wheelbase must be finite and > 0, got {}",
                self.wheelbase
            )));
        }
        Ok(())
    }
}

// ─── Config File ────────────────────────────────────────────────────

/// Complete configuration file.
///
/// ```toml
/// [shared]
/// log_level = "debug"
///
/// [controller]
/// a_lat_reg_max = 1.8
/// entering_smooth_decel = { bp = [1.0, 3.0], v = [-0.3, -1.0] }
///
/// [vehicle]
/// steer_ratio = 13.7
/// wheelbase = 2.78
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TvcConfig {
    pub shared: SharedConfig,
    pub controller: TurnControllerConfig,
    pub vehicle: VehicleParams,
}

impl TvcConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.controller.validate()?;
        self.vehicle.validate()
    }
}

/// Load and validate the configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<TvcConfig, ConfigError> {
    let config = TvcConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the configuration from a TOML string.
pub fn load_config_from_str(content: &str) -> Result<TvcConfig, ConfigError> {
    let config = TvcConfig::load_str(content)?;
    config.validate()?;
    Ok(config)
}
