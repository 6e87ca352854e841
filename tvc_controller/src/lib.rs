//! # Vision Turn Controller
//!
//! Anticipates road curves for the longitudinal planner. Once per control
//! cycle it estimates the path ahead from vision lane lines (or the
//! lateral planner's driving path), predicts lateral acceleration over a
//! fixed look-ahead grid, runs a 4-state turn state machine, and returns a
//! target speed plus a tightened minimum acceleration.
//!
//! ## Pipeline
//!
//! 1. **ConfigCache** ([`params`]): feature toggle, re-read at most every 5 s
//! 2. **Path estimation** ([`control::path`]): cubic path polynomial
//! 3. **Prediction** ([`control::curvature`]): current/predicted lat acc, overshoot
//! 4. **Transitions** ([`state::machine`]): Disabled, Entering, Turning, Leaving
//! 5. **Solution** ([`control::solution`]): target speed and acceleration limits
//!
//! [`cycle::TurnController`] runs the stages in order on every call.
//!
//! ## Zero-Allocation Cycle
//!
//! Evaluation uses fixed-size arrays and `heapless` sample buffers; a cycle
//! never touches the heap.

pub mod config;
pub mod control;
pub mod cycle;
pub mod params;
pub mod state;
