//! Turn controller state enum.
//!
//! `#[repr(u8)]` for compact transport to downstream consumers. Exactly one
//! state is active at any time; it persists across cycles until a
//! transition fires.

use serde::{Deserialize, Serialize};

/// Vision turn controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TurnControllerState {
    /// No turn ahead, or the feature is inhibited.
    Disabled = 0,
    /// Curve predicted ahead, smooth deceleration.
    Entering = 1,
    /// Vehicle is in the curve.
    Turning = 2,
    /// Lateral acceleration dropping, resuming cruise speed.
    Leaving = 3,
}

impl TurnControllerState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::Entering),
            2 => Some(Self::Turning),
            3 => Some(Self::Leaving),
            _ => None,
        }
    }

    /// Upper-case description used in logs.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Disabled => "DISABLED",
            Self::Entering => "ENTERING",
            Self::Turning => "TURNING",
            Self::Leaving => "LEAVING",
        }
    }
}

impl Default for TurnControllerState {
    fn default() -> Self {
        Self::Disabled
    }
}

impl std::fmt::Display for TurnControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
