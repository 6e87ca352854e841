//! Per-cycle orchestration: params → path → prediction → transition → solution.
//!
//! [`TurnController::update`] runs every stage in that order on every call
//! and always produces a complete [`CycleOutput`]. The controller owns all of
//! its state; `update` takes `&mut self` and performs no heap allocation.

use serde::{Deserialize, Serialize};
use tvc_common::consts::DEG_TO_RAD;
use tvc_common::params::TURN_VISION_CONTROL_KEY;
use tvc_common::snapshot::{AccLimits, CycleSnapshot};
use tvc_common::state::TurnControllerState;

use crate::config::{TurnControllerConfig, VehicleParams};
use crate::control::curvature::{self, LateralAccState};
use crate::control::path::{self, PathEstimate, PathPolynomial, PathSource};
use crate::control::solution;
use crate::params::{Clock, ConfigCache, ParamStore};
use crate::state::machine::{Transition, TransitionInputs, TurnStateMachine};

/// Result of one controller cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleOutput {
    pub state: TurnControllerState,
    /// Target speed [m/s].
    pub v_turn: f64,
    pub acc_limits: AccLimits,
    pub active: bool,
}

/// Vision turn controller.
pub struct TurnController<S, C> {
    config: TurnControllerConfig,
    vehicle: VehicleParams,
    params: ConfigCache<S>,
    clock: C,
    machine: TurnStateMachine,

    // ── Cycle inputs ──
    op_enabled: bool,
    gas_pressed: bool,
    v_ego: f64,
    a_ego: f64,
    v_cruise_setpoint: f64,

    // ── Derived ──
    path: PathEstimate,
    lat: LateralAccState,
    last_transition: Transition,

    // ── Solution ──
    v_turn: f64,
    acc_limits: AccLimits,
}

impl<S: ParamStore, C: Clock> TurnController<S, C> {
    /// Create a controller in Disabled. Reads the feature toggle once.
    pub fn new(config: TurnControllerConfig, vehicle: VehicleParams, store: S, clock: C) -> Self {
        let params = ConfigCache::new(
            store,
            TURN_VISION_CONTROL_KEY,
            config.params_refresh_interval,
            clock.now(),
        );
        Self {
            config,
            vehicle,
            params,
            clock,
            machine: TurnStateMachine::new(),
            op_enabled: false,
            gas_pressed: false,
            v_ego: 0.0,
            a_ego: 0.0,
            v_cruise_setpoint: 0.0,
            path: PathEstimate::default(),
            lat: LateralAccState::default(),
            last_transition: Transition::Unchanged(TurnControllerState::Disabled),
            v_turn: 0.0,
            acc_limits: AccLimits::new(0.0, 0.0),
        }
    }

    /// Run one control cycle.
    ///
    /// `acc_limits` is tightened (min lowered) in Entering and replaced with
    /// the turning minimum in Turning; `max` is passed through.
    pub fn update(
        &mut self,
        enabled: bool,
        v_ego: f64,
        a_ego: f64,
        v_cruise_setpoint: f64,
        acc_limits: AccLimits,
        snapshot: &CycleSnapshot,
    ) -> CycleOutput {
        self.op_enabled = enabled;
        self.gas_pressed = snapshot.car_state.gas_pressed;
        self.v_ego = v_ego;
        self.a_ego = a_ego;
        self.v_cruise_setpoint = v_cruise_setpoint;
        self.acc_limits = acc_limits;

        self.params.refresh(self.clock.now());

        self.path = path::estimate_path(
            &self.config,
            snapshot.model.as_ref(),
            snapshot.lateral_plan.as_ref(),
            v_ego,
        );

        self.lat = curvature::evaluate(
            &self.config,
            &self.path.poly,
            v_ego,
            snapshot.car_state.steering_angle_deg * DEG_TO_RAD,
            self.vehicle.steer_ratio,
            self.vehicle.wheelbase,
            v_cruise_setpoint,
        );

        let inputs = TransitionInputs {
            op_enabled: self.op_enabled,
            feature_enabled: self.params.is_enabled(),
            gas_pressed: self.gas_pressed,
            v_ego,
        };
        self.last_transition = self.machine.transition(&self.config, &inputs, &mut self.lat);

        let sol = solution::solve(
            &self.config,
            self.machine.state(),
            &self.lat,
            v_ego,
            v_cruise_setpoint,
            self.acc_limits,
        );
        self.v_turn = sol.v_turn;
        self.acc_limits = sol.acc_limits;

        self.output()
    }

    /// Target speed: the cruise setpoint while Disabled, else the turn solution.
    #[inline]
    pub fn v_turn(&self) -> f64 {
        if self.is_active() {
            self.v_turn
        } else {
            self.v_cruise_setpoint
        }
    }

    #[inline]
    pub fn acc_limits(&self) -> AccLimits {
        self.acc_limits
    }

    #[inline]
    pub fn state(&self) -> TurnControllerState {
        self.machine.state()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    pub fn output(&self) -> CycleOutput {
        CycleOutput {
            state: self.state(),
            v_turn: self.v_turn(),
            acc_limits: self.acc_limits,
            active: self.is_active(),
        }
    }

    // ── Diagnostics ──

    pub fn lat_acc_state(&self) -> &LateralAccState {
        &self.lat
    }

    pub fn path_poly(&self) -> &PathPolynomial {
        &self.path.poly
    }

    pub fn path_source(&self) -> PathSource {
        self.path.source
    }

    pub fn last_transition(&self) -> Transition {
        self.last_transition
    }

    pub fn is_feature_enabled(&self) -> bool {
        self.params.is_enabled()
    }

    /// Ego acceleration [m/s²] of the last cycle.
    pub fn a_ego(&self) -> f64 {
        self.a_ego
    }
}
