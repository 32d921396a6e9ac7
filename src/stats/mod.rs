//! Progression engine: XP, levels, streaks, badges and token rewards
//!
//! Everything here is pure or mutates a single in-memory [`PlayerStats`].
//! Persisting the result is the caller's job (see [`crate::store`]).
//!
//! ```text
//!   round score ──► xp_for_score ──► add_xp ──► level_for_xp
//!        │
//!        ├──► token_reward_for_score (wallet connected?)
//!        ├──► update_streak (local calendar days)
//!        └──► check_and_unlock_badges (after all of the above)
//! ```

mod badges;
mod levels;
mod player;
mod rewards;
mod streaks;

pub use badges::{check_and_unlock_badges, pending_badges, Badge, BadgeId, BADGES};
pub use levels::{
    level_for_xp, xp_for_score, xp_required_for_level, LevelProgress, LevelUp, XP_PER_LEVEL_UNIT,
};
pub use player::{PlayerStats, RoundProgress, StoredStats};
pub use rewards::{token_reward_for_score, MAX_ROUND_REWARD};
pub use streaks::{local_day, today, update_streak};
