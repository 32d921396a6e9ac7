//! Session state machine

use serde::Serialize;

/// Where a session is in its 5-round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No session running
    Idle,
    /// Round `round` is waiting for a guess
    InRound { round: usize },
    /// Round `round` has been scored and committed
    RoundScored { round: usize },
    /// All rounds scored; a new session may be started
    Complete,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InRound { .. } => "in_round",
            Self::RoundScored { .. } => "round_scored",
            Self::Complete => "complete",
        }
    }

    /// Round awaiting a guess, if any
    pub fn awaiting_guess(&self) -> Option<usize> {
        match self {
            Self::InRound { round } => Some(*round),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::InRound { .. } | Self::RoundScored { .. })
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InRound { round } | Self::RoundScored { round } => {
                write!(f, "{} (round {})", self.as_str(), round + 1)
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
