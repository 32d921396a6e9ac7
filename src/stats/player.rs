//! The durable per-player aggregate
//!
//! `PlayerStats` is the validated in-memory form. `StoredStats` is the raw
//! record a store hands back, with signed integers and a textual timestamp,
//! so that out-of-range values can be detected instead of silently wrapped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::badges::{check_and_unlock_badges, BadgeId};
use super::levels::{level_for_xp, xp_for_score, LevelProgress, LevelUp};
use super::rewards::token_reward_for_score;
use super::streaks::{local_day, update_streak};
use crate::error::{GameError, GameResult};
use crate::scoring::MAX_ROUND_SCORE;

/// Rounds in a session, used for the accuracy figure
const ACCURACY_ROUNDS: u64 = 5;

/// Slack allowed when comparing token balances read back from storage
const BALANCE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Completed 5-round sessions
    pub games_played: u32,
    /// Sum of every round score ever earned
    pub total_score: u64,
    /// Best single-round score
    pub best_score: u32,
    pub current_streak: u32,
    /// When the last round was completed
    pub last_played: Option<DateTime<Utc>>,
    pub current_xp: u32,
    /// Always `level_for_xp(current_xp)`
    pub level: u32,
    pub total_earned: f64,
    /// Never exceeds `total_earned`
    pub available_to_claim: f64,
    /// Unlock order is preserved; members are never removed
    pub unlocked_badges: Vec<BadgeId>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            total_score: 0,
            best_score: 0,
            current_streak: 0,
            last_played: None,
            current_xp: 0,
            level: 1,
            total_earned: 0.0,
            available_to_claim: 0.0,
            unlocked_badges: Vec::new(),
        }
    }
}

/// Everything a single scored round changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundProgress {
    pub score: u32,
    pub xp_gained: u32,
    pub token_reward: f64,
    pub streak: u32,
    pub level_up: Option<LevelUp>,
    pub new_badges: Vec<BadgeId>,
    /// True when this round completed a session
    pub session_completed: bool,
}

impl PlayerStats {
    /// Add XP and recompute the level
    pub fn add_xp(&mut self, amount: u32) -> Option<LevelUp> {
        let old_level = self.level;
        self.current_xp = self.current_xp.saturating_add(amount);
        self.level = level_for_xp(self.current_xp);

        (self.level > old_level).then_some(LevelUp {
            old_level,
            new_level: self.level,
        })
    }

    /// Credit tokens to both the lifetime total and the claimable balance
    pub fn credit_tokens(&mut self, amount: f64) {
        if amount > 0.0 {
            self.total_earned += amount;
            self.available_to_claim += amount;
        }
    }

    /// Empty the claimable balance and return what was in it.
    /// `total_earned` is left untouched.
    pub fn claim(&mut self) -> GameResult<f64> {
        if self.available_to_claim <= 0.0 {
            return Err(GameError::NothingToClaim);
        }
        let amount = self.available_to_claim;
        self.available_to_claim = 0.0;
        Ok(amount)
    }

    /// Apply one scored round.
    ///
    /// `completes_session` must be true only for the final round of a session;
    /// it is the single place `games_played` grows. Badges are checked after
    /// every other field has been updated.
    pub fn record_round(
        &mut self,
        score: u32,
        now: DateTime<Utc>,
        completes_session: bool,
        wallet_connected: bool,
    ) -> RoundProgress {
        let xp_gained = xp_for_score(score);
        let token_reward = token_reward_for_score(score, wallet_connected);
        let streak = update_streak(
            self.last_played.map(local_day),
            local_day(now),
            self.current_streak,
        );

        if completes_session {
            self.games_played = self.games_played.saturating_add(1);
        }
        self.total_score = self.total_score.saturating_add(u64::from(score));
        self.best_score = self.best_score.max(score);
        self.current_streak = streak;
        self.last_played = Some(now);
        let level_up = self.add_xp(xp_gained);
        self.credit_tokens(token_reward);

        let new_badges = check_and_unlock_badges(self, score);

        RoundProgress {
            score,
            xp_gained,
            token_reward,
            streak,
            level_up,
            new_badges,
            session_completed: completes_session,
        }
    }

    /// Apply a finished educational quiz
    pub fn record_quiz(&mut self, earned: f64, xp_gained: u32) -> Option<LevelUp> {
        self.credit_tokens(earned);
        self.add_xp(xp_gained)
    }

    /// Average share of the maximum session score, as a whole percentage
    pub fn accuracy(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        let max_possible = u64::from(self.games_played) * ACCURACY_ROUNDS * u64::from(MAX_ROUND_SCORE);
        ((self.total_score as f64 / max_possible as f64) * 100.0).round() as u32
    }

    /// Approximate global rank derived from total score (1 is best)
    pub fn rank(&self) -> u64 {
        1000u64.saturating_sub(self.total_score / 100).max(1)
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::new(self.current_xp)
    }

    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.unlocked_badges.contains(&id)
    }
}

/// Raw stats record as kept by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredStats {
    pub games_played: i64,
    pub total_score: i64,
    pub best_score: i64,
    pub current_streak: i64,
    /// RFC 3339 timestamp
    pub last_played: Option<String>,
    pub current_xp: i64,
    pub level: i64,
    pub total_earned: f64,
    pub available_to_claim: f64,
    pub unlocked_badges: Vec<i64>,
    /// Fields the store found holding a value of the wrong type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_errors: Vec<String>,
}

impl From<&PlayerStats> for StoredStats {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            games_played: i64::from(stats.games_played),
            total_score: i64::try_from(stats.total_score).unwrap_or(i64::MAX),
            best_score: i64::from(stats.best_score),
            current_streak: i64::from(stats.current_streak),
            last_played: stats.last_played.map(|ts| ts.to_rfc3339()),
            current_xp: i64::from(stats.current_xp),
            level: i64::from(stats.level),
            total_earned: stats.total_earned,
            available_to_claim: stats.available_to_claim,
            unlocked_badges: stats
                .unlocked_badges
                .iter()
                .map(|b| i64::from(b.id()))
                .collect(),
            type_errors: Vec::new(),
        }
    }
}

fn count_field<T: TryFrom<i64>>(name: &str, value: i64) -> GameResult<T> {
    T::try_from(value)
        .map_err(|_| GameError::MalformedPersistedStats(format!("{name} out of range: {value}")))
}

fn balance_field(name: &str, value: f64) -> GameResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GameError::MalformedPersistedStats(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

impl TryFrom<StoredStats> for PlayerStats {
    type Error = GameError;

    /// Validate a stored record.
    ///
    /// A level that disagrees with the XP is recomputed (with a warning)
    /// rather than rejected; every other violation is an error.
    fn try_from(raw: StoredStats) -> GameResult<Self> {
        if !raw.type_errors.is_empty() {
            return Err(GameError::MalformedPersistedStats(raw.type_errors.join("; ")));
        }

        let games_played: u32 = count_field("gamesPlayed", raw.games_played)?;
        let total_score: u64 = count_field("totalScore", raw.total_score)?;
        let best_score: u32 = count_field("bestScore", raw.best_score)?;
        let current_streak: u32 = count_field("currentStreak", raw.current_streak)?;
        let current_xp: u32 = count_field("currentXP", raw.current_xp)?;
        let total_earned = balance_field("totalEarned", raw.total_earned)?;
        let available_to_claim = balance_field("availableToClaim", raw.available_to_claim)?;

        if best_score > MAX_ROUND_SCORE {
            return Err(GameError::MalformedPersistedStats(format!(
                "bestScore {best_score} exceeds the maximum round score"
            )));
        }
        if u64::from(best_score) > total_score {
            return Err(GameError::MalformedPersistedStats(format!(
                "bestScore {best_score} exceeds totalScore {total_score}"
            )));
        }
        if available_to_claim > total_earned + BALANCE_EPSILON {
            return Err(GameError::MalformedPersistedStats(format!(
                "availableToClaim {available_to_claim} exceeds totalEarned {total_earned}"
            )));
        }

        let last_played = raw
            .last_played
            .as_deref()
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| {
                        GameError::MalformedPersistedStats(format!("lastPlayedDate {s:?}: {e}"))
                    })
            })
            .transpose()?;

        let mut unlocked_badges: Vec<BadgeId> = Vec::with_capacity(raw.unlocked_badges.len());
        for raw_id in raw.unlocked_badges {
            let id = u8::try_from(raw_id)
                .ok()
                .and_then(BadgeId::from_id)
                .ok_or_else(|| {
                    GameError::MalformedPersistedStats(format!("unknown badge id {raw_id}"))
                })?;
            if !unlocked_badges.contains(&id) {
                unlocked_badges.push(id);
            }
        }

        let level = level_for_xp(current_xp);
        if raw.level != i64::from(level) {
            tracing::warn!(
                stored = raw.level,
                derived = level,
                "Stored level disagrees with XP, using derived level"
            );
        }

        Ok(Self {
            games_played,
            total_score,
            best_score,
            current_streak,
            last_played,
            current_xp,
            level,
            total_earned,
            available_to_claim: available_to_claim.min(total_earned),
            unlocked_badges,
        })
    }
}
