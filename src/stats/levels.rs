//! XP and level system
//!
//! Level follows a square-root curve: `level = floor(sqrt(xp / 100)) + 1`,
//! so level `n` starts at `(n - 1)^2 * 100` XP.

use serde::Serialize;

/// XP scale of the level curve
pub const XP_PER_LEVEL_UNIT: u32 = 100;

/// XP earned for a round score
pub fn xp_for_score(score: u32) -> u32 {
    score / 2
}

/// Level for a cumulative XP total (always >= 1)
pub fn level_for_xp(xp: u32) -> u32 {
    (xp / XP_PER_LEVEL_UNIT).isqrt() + 1
}

/// XP at which `level` starts
pub fn xp_required_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps * steps * u64::from(XP_PER_LEVEL_UNIT)
}

/// A level up event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Where a player sits within their current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub total_xp: u32,
    /// XP at which the current level started
    pub current_level_xp: u64,
    /// XP at which the next level starts
    pub next_level_xp: u64,
}

impl LevelProgress {
    pub fn new(total_xp: u32) -> Self {
        let level = level_for_xp(total_xp);
        Self {
            level,
            total_xp,
            current_level_xp: xp_required_for_level(level),
            next_level_xp: xp_required_for_level(level + 1),
        }
    }

    /// Calculate progress percentage to next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        let xp_in_level = u64::from(self.total_xp).saturating_sub(self.current_level_xp);
        let xp_for_level = self.next_level_xp - self.current_level_xp;
        if xp_for_level == 0 {
            1.0
        } else {
            (xp_in_level as f32) / (xp_for_level as f32)
        }
    }

    /// XP still missing for the next level
    pub fn xp_to_next(&self) -> u64 {
        self.next_level_xp.saturating_sub(u64::from(self.total_xp))
    }
}
