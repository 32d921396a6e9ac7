//! Persistence gateway for player data
//!
//! The engine only needs whole-record reads and writes keyed by player name,
//! plus the active profile and wallet connection. Two implementations ship:
//!
//! - [`MemoryStore`]: in-process, used by tests and throwaway runs
//! - [`SqliteStore`]: `~/.worldsnap/worldsnap.db`

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use tracing::warn;

use crate::domain::PlayerProfile;
use crate::stats::{PlayerStats, StoredStats};
use crate::wallet::WalletConnection;

/// Durable per-player storage
pub trait StatsStore {
    fn load_stats(&self, player: &str) -> Result<Option<StoredStats>>;

    /// Replace the player's whole record
    fn save_stats(&self, player: &str, stats: &PlayerStats) -> Result<()>;

    fn load_active_profile(&self) -> Result<Option<PlayerProfile>>;

    fn save_active_profile(&self, profile: &PlayerProfile) -> Result<()>;

    /// Every stored player with their raw record
    fn list_players(&self) -> Result<Vec<(String, StoredStats)>>;

    fn load_wallet(&self) -> Result<Option<WalletConnection>>;

    fn save_wallet(&self, wallet: &WalletConnection) -> Result<()>;
}

/// Load a player's stats, starting fresh when there are none.
///
/// Malformed records are replaced by fresh stats with a warning. Read
/// errors are propagated so a broken store never gets overwritten.
pub fn load_or_default(store: &dyn StatsStore, player: &str) -> Result<PlayerStats> {
    let Some(raw) = store.load_stats(player)? else {
        return Ok(PlayerStats::default());
    };

    match PlayerStats::try_from(raw) {
        Ok(stats) => Ok(stats),
        Err(e) => {
            warn!(player, "Discarding stored stats: {}", e);
            Ok(PlayerStats::default())
        }
    }
}

/// Players ranked by total score (ties broken by name)
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub position: usize,
    pub name: String,
    pub total_score: u64,
    pub level: u32,
    pub games_played: u32,
}

/// Build the leaderboard from every valid stored record
pub fn leaderboard(store: &dyn StatsStore) -> Result<Vec<LeaderboardEntry>> {
    let mut players: Vec<(String, PlayerStats)> = store
        .list_players()?
        .into_iter()
        .filter_map(|(name, raw)| match PlayerStats::try_from(raw) {
            Ok(stats) => Some((name, stats)),
            Err(e) => {
                warn!(player = %name, "Skipping malformed stats on leaderboard: {}", e);
                None
            }
        })
        .collect();

    players.sort_by(|(a_name, a), (b_name, b)| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a_name.cmp(b_name))
    });

    Ok(players
        .into_iter()
        .enumerate()
        .map(|(i, (name, stats))| LeaderboardEntry {
            position: i + 1,
            name,
            total_score: stats.total_score,
            level: stats.level,
            games_played: stats.games_played,
        })
        .collect())
}
