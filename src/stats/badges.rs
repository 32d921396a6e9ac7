//! Badge definitions and unlock checks
//!
//! Badges are permanent: once unlocked they are never removed.

use serde::{Deserialize, Serialize};

use super::player::PlayerStats;
use crate::scoring::MAX_ROUND_SCORE;

/// Unique identifier for each badge. The discriminant is the persisted id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BadgeId {
    FirstWin = 1,
    Explorer = 2,
    StreakMaster = 3,
    /// Rank-based badge. Listed in the catalogue but no check unlocks it.
    TopTen = 4,
    PerfectScore = 5,
    GlobeTrotter = 6,
}

impl BadgeId {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::FirstWin),
            2 => Some(Self::Explorer),
            3 => Some(Self::StreakMaster),
            4 => Some(Self::TopTen),
            5 => Some(Self::PerfectScore),
            6 => Some(Self::GlobeTrotter),
            _ => None,
        }
    }

    pub fn all() -> &'static [BadgeId] {
        &[
            Self::FirstWin,
            Self::Explorer,
            Self::StreakMaster,
            Self::TopTen,
            Self::PerfectScore,
            Self::GlobeTrotter,
        ]
    }
}

impl From<BadgeId> for u8 {
    fn from(id: BadgeId) -> Self {
        id.id()
    }
}

impl TryFrom<u8> for BadgeId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown badge id {id}"))
    }
}

/// Badge metadata for display
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// All badge definitions, ordered by id
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstWin,
        name: "First Win",
        icon: "🎯",
        description: "Complete your first game",
    },
    Badge {
        id: BadgeId::Explorer,
        name: "Explorer",
        icon: "🗺️",
        description: "Complete 10 games",
    },
    Badge {
        id: BadgeId::StreakMaster,
        name: "Streak Master",
        icon: "🔥",
        description: "Play 5 days in a row",
    },
    Badge {
        id: BadgeId::TopTen,
        name: "Top 10",
        icon: "👑",
        description: "Reach the top 10 of the leaderboard",
    },
    Badge {
        id: BadgeId::PerfectScore,
        name: "Perfect Score",
        icon: "💯",
        description: "Score 1000 points in a single round",
    },
    Badge {
        id: BadgeId::GlobeTrotter,
        name: "Globe Trotter",
        icon: "🌍",
        description: "Complete 50 games",
    },
];

impl Badge {
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .unwrap_or(&BADGES[0])
    }
}

/// Badges whose trigger fires for `stats` and `round_score` but that are not unlocked yet.
///
/// `stats` must already include this round's effects (games played, streak).
/// Ids come back in check order.
pub fn pending_badges(stats: &PlayerStats, round_score: u32) -> Vec<BadgeId> {
    let triggers = [
        (stats.games_played == 1, BadgeId::FirstWin),
        (stats.games_played >= 10, BadgeId::Explorer),
        (stats.current_streak >= 5, BadgeId::StreakMaster),
        (round_score == MAX_ROUND_SCORE, BadgeId::PerfectScore),
        (stats.games_played >= 50, BadgeId::GlobeTrotter),
    ];

    triggers
        .into_iter()
        .filter(|(fired, id)| *fired && !stats.unlocked_badges.contains(id))
        .map(|(_, id)| id)
        .collect()
}

/// Append newly earned badges to `stats` and return them
pub fn check_and_unlock_badges(stats: &mut PlayerStats, round_score: u32) -> Vec<BadgeId> {
    let newly_unlocked = pending_badges(stats, round_score);
    stats.unlocked_badges.extend(newly_unlocked.iter().copied());
    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_ids_roundtrip() {
        for id in BadgeId::all() {
            assert_eq!(BadgeId::from_id(id.id()), Some(*id));
            assert_eq!(Badge::get(*id).id, *id);
        }
        assert_eq!(BadgeId::from_id(0), None);
        assert_eq!(BadgeId::from_id(7), None);
    }

    #[test]
    fn test_first_win_only_at_exactly_one_game() {
        let mut stats = PlayerStats {
            games_played: 1,
            ..Default::default()
        };
        assert_eq!(check_and_unlock_badges(&mut stats, 50), vec![BadgeId::FirstWin]);

        let fresh = PlayerStats {
            games_played: 2,
            ..Default::default()
        };
        assert!(pending_badges(&fresh, 50).is_empty());
    }

    #[test]
    fn test_simultaneous_unlocks_in_check_order() {
        let mut stats = PlayerStats {
            games_played: 50,
            current_streak: 5,
            ..Default::default()
        };
        let unlocked = check_and_unlock_badges(&mut stats, 1000);
        assert_eq!(
            unlocked,
            vec![
                BadgeId::Explorer,
                BadgeId::StreakMaster,
                BadgeId::PerfectScore,
                BadgeId::GlobeTrotter
            ]
        );
        assert_eq!(stats.unlocked_badges, unlocked);
    }

    #[test]
    fn test_each_badge_fires_once() {
        let mut stats = PlayerStats {
            games_played: 10,
            ..Default::default()
        };
        assert_eq!(check_and_unlock_badges(&mut stats, 1000).len(), 2);
        assert!(check_and_unlock_badges(&mut stats, 1000).is_empty());
        assert_eq!(stats.unlocked_badges.len(), 2);
    }

    #[test]
    fn test_top_ten_never_triggers() {
        let mut stats = PlayerStats {
            games_played: 1000,
            current_streak: 365,
            total_score: 10_000_000,
            ..Default::default()
        };
        let unlocked = check_and_unlock_badges(&mut stats, 1000);
        assert!(!unlocked.contains(&BadgeId::TopTen));
    }

    #[test]
    fn test_badges_are_monotonic() {
        let mut stats = PlayerStats::default();
        let mut previous: Vec<BadgeId> = Vec::new();
        for game in 0..60u32 {
            stats.games_played = game;
            stats.current_streak = game % 7;
            check_and_unlock_badges(&mut stats, if game % 3 == 0 { 1000 } else { 300 });
            assert!(previous.iter().all(|b| stats.unlocked_badges.contains(b)));
            previous = stats.unlocked_badges.clone();
        }
        assert_eq!(stats.unlocked_badges.len(), 5);
    }

    #[test]
    fn test_badge_serializes_as_number() {
        let json = serde_json::to_string(&vec![BadgeId::FirstWin, BadgeId::PerfectScore]).unwrap();
        assert_eq!(json, "[1,5]");
        let back: Vec<BadgeId> = serde_json::from_str("[6]").unwrap();
        assert_eq!(back, vec![BadgeId::GlobeTrotter]);
        assert!(serde_json::from_str::<Vec<BadgeId>>("[9]").is_err());
    }
}
