//! Turn controller state transitions.
//!
//! Disabled → Entering → Turning ↔ Leaving → Disabled, with a global guard
//! that forces Disabled whenever the system or the feature is off or the
//! driver presses the accelerator. The (leaving, turning) threshold band is
//! a hysteresis zone: a current lat acc strictly inside it never changes
//! state.
//!
//! Entering Disabled resets the lateral acceleration state. This is the only
//! entry action.

use tracing::debug;
use tvc_common::state::TurnControllerState;

use crate::config::TurnControllerConfig;
use crate::control::curvature::LateralAccState;

/// Result of one transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No transition fired.
    Unchanged(TurnControllerState),
    /// State changed.
    Changed {
        from: TurnControllerState,
        to: TurnControllerState,
    },
}

impl Transition {
    /// State after the step.
    #[inline]
    pub const fn state(&self) -> TurnControllerState {
        match *self {
            Self::Unchanged(s) => s,
            Self::Changed { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Gating inputs of the global guard plus the ego speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionInputs {
    /// Longitudinal control engaged.
    pub op_enabled: bool,
    /// Persisted feature toggle.
    pub feature_enabled: bool,
    pub gas_pressed: bool,
    /// [m/s]
    pub v_ego: f64,
}

/// Owner of the current [`TurnControllerState`].
#[derive(Debug, Clone, Default)]
pub struct TurnStateMachine {
    state: TurnControllerState,
}

impl TurnStateMachine {
    /// Create a new state machine in Disabled.
    pub const fn new() -> Self {
        Self {
            state: TurnControllerState::Disabled,
        }
    }

    #[inline]
    pub const fn state(&self) -> TurnControllerState {
        self.state
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, TurnControllerState::Disabled)
    }

    /// Run one transition step.
    ///
    /// `lat` is read for the per-state conditions and reset when the step
    /// enters Disabled.
    pub fn transition(
        &mut self,
        config: &TurnControllerConfig,
        inputs: &TransitionInputs,
        lat: &mut LateralAccState,
    ) -> Transition {
        let next = next_state(self.state, config, inputs, lat);
        if next == self.state {
            return Transition::Unchanged(next);
        }

        let from = self.state;
        self.state = next;
        debug!("TVC: turn controller state: {} -> {}", from, next);

        if next == TurnControllerState::Disabled {
            lat.reset();
        }
        Transition::Changed { from, to: next }
    }
}

fn next_state(
    state: TurnControllerState,
    config: &TurnControllerConfig,
    inputs: &TransitionInputs,
    lat: &LateralAccState,
) -> TurnControllerState {
    use TurnControllerState::*;

    if !inputs.op_enabled || !inputs.feature_enabled || inputs.gas_pressed {
        return Disabled;
    }

    match state {
        Disabled => {
            if inputs.v_ego > config.min_v
                && lat.max_pred_lat_acc >= config.entering_pred_lat_acc_th
            {
                Entering
            } else {
                Disabled
            }
        }
        Entering => {
            if lat.current_lat_acc >= config.turning_lat_acc_th {
                Turning
            } else if lat.max_pred_lat_acc < config.abort_entering_pred_lat_acc_th {
                Disabled
            } else {
                Entering
            }
        }
        Turning => {
            if lat.current_lat_acc <= config.leaving_lat_acc_th {
                Leaving
            } else {
                Turning
            }
        }
        Leaving => {
            if lat.current_lat_acc >= config.turning_lat_acc_th {
                Turning
            } else if lat.current_lat_acc < config.finish_lat_acc_th {
                Disabled
            } else {
                Leaving
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
