//! Prelude module for common re-exports.
//!
//! ```rust
//! use tvc_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Parameters ─────────────────────────────────────────────────────
pub use crate::params::{ParamsError, TURN_VISION_CONTROL_KEY};

// ─── State & Inputs ─────────────────────────────────────────────────
pub use crate::snapshot::{
    AccLimits, CarState, CycleSnapshot, LaneLine, LateralPlan, ModelOutput, Samples,
};
pub use crate::state::TurnControllerState;
