//! Curvature prediction and control law.
//!
//! Path polynomial estimation from lanes or driving path, curvature and
//! lateral acceleration prediction over a fixed look-ahead grid, and the
//! per-state speed solution.

pub mod curvature;
pub mod lookup;
pub mod path;
pub mod polyfit;
pub mod solution;
