//! TVC Common Library
//!
//! Shared constants, state enums, per-cycle input types and configuration
//! loading utilities for the vision turn controller workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Reference thresholds, grid geometry and unit conversions
//! - [`state`] - Turn controller state enum
//! - [`snapshot`] - Per-cycle inputs (car state, model output, lateral plan)
//! - [`config`] - Configuration loading traits and types
//! - [`params`] - Persisted parameter store error type and keys
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use tvc_common::prelude::*;
//!
//! let limits = AccLimits::new(-1.2, 1.5);
//! assert_eq!(TurnControllerState::default(), TurnControllerState::Disabled);
//! assert!(limits.min < limits.max);
//! ```

pub mod config;
pub mod consts;
pub mod params;
pub mod prelude;
pub mod snapshot;
pub mod state;
