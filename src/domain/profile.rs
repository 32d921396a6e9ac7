//! Player profile (name + avatar) chosen during onboarding

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Avatar seeds offered during onboarding
pub const AVATAR_SEEDS: &[&str] = &[
    "player1", "player2", "player3", "player4", "player5", "player6", "player7", "player8",
    "player9", "player10", "player11", "player12",
];

pub const DEFAULT_AVATAR_SEED: &str = "player1";

/// The active player's identity. Stats are keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub avatar_seed: String,
}

impl PlayerProfile {
    /// Build a profile, trimming the name. Empty names are rejected.
    pub fn new(name: &str, avatar_seed: Option<&str>) -> GameResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }

        Ok(Self {
            name: name.to_string(),
            avatar_seed: avatar_seed
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_AVATAR_SEED)
                .to_string(),
        })
    }

    /// Avatar image URL for the profile's seed
    pub fn avatar_url(&self) -> String {
        format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
            self.avatar_seed
        )
    }
}
