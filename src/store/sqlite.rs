//! SQLite-backed store
//!
//! Manages the `~/.worldsnap/worldsnap.db` database with automatic schema
//! migration. Stats columns are read back as raw values and validated by
//! the caller, so hand-edited or corrupted rows are detected. A column
//! holding the wrong type is reported on the record, not as a read error.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use tracing::warn;

use super::StatsStore;
use crate::domain::PlayerProfile;
use crate::stats::{PlayerStats, StoredStats};
use crate::wallet::{WalletConnection, WalletKind};

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Database wrapper; clones share one connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Self::from_connection(conn)
    }

    /// Throwaway database that lives as long as the store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("Database lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            conn.execute(
                "INSERT OR REPLACE INTO schema_version VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }
        Ok(())
    }

    fn read_badges(conn: &Connection, player: &str, stats: &mut StoredStats) -> Result<()> {
        let mut stmt = conn.prepare(
            "SELECT badge_id FROM player_badges WHERE player_name = ?1 ORDER BY position",
        )?;
        let values = stmt
            .query_map([player], |row| row.get::<_, Value>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut columns = ColumnReader::default();
        stats.unlocked_badges = values
            .into_iter()
            .map(|value| columns.integer("unlockedBadges", value))
            .collect();
        stats.type_errors.append(&mut columns.errors);
        Ok(())
    }

    fn read_stats(conn: &Connection, player: &str) -> Result<Option<StoredStats>> {
        let row = conn
            .query_row(
                r#"SELECT games_played, total_score, best_score, current_streak, last_played,
                          current_xp, level, total_earned, available_to_claim
                   FROM players WHERE name = ?1"#,
                [player],
                |r| {
                    let mut columns = ColumnReader::default();
                    let mut stats = StoredStats {
                        games_played: columns.integer("gamesPlayed", r.get(0)?),
                        total_score: columns.integer("totalScore", r.get(1)?),
                        best_score: columns.integer("bestScore", r.get(2)?),
                        current_streak: columns.integer("currentStreak", r.get(3)?),
                        last_played: columns.optional_text("lastPlayedDate", r.get(4)?),
                        current_xp: columns.integer("currentXP", r.get(5)?),
                        level: columns.integer("level", r.get(6)?),
                        total_earned: columns.real("totalEarned", r.get(7)?),
                        available_to_claim: columns.real("availableToClaim", r.get(8)?),
                        unlocked_badges: Vec::new(),
                        type_errors: Vec::new(),
                    };
                    stats.type_errors = columns.errors;
                    Ok(stats)
                },
            )
            .optional()
            .with_context(|| format!("Failed to read stats for {}", player))?;

        let Some(mut stats) = row else {
            return Ok(None);
        };
        Self::read_badges(conn, player, &mut stats)?;
        Ok(Some(stats))
    }
}

/// Converts raw column values, noting every value of the wrong type
#[derive(Default)]
struct ColumnReader {
    errors: Vec<String>,
}

impl ColumnReader {
    fn mismatch(&mut self, field: &str, value: &Value) {
        self.errors
            .push(format!("{} holds {}", field, value.data_type()));
    }

    fn integer(&mut self, field: &str, value: Value) -> i64 {
        match value {
            Value::Integer(v) => v,
            other => {
                self.mismatch(field, &other);
                0
            }
        }
    }

    fn real(&mut self, field: &str, value: Value) -> f64 {
        match value {
            Value::Real(v) => v,
            Value::Integer(v) => v as f64,
            other => {
                self.mismatch(field, &other);
                0.0
            }
        }
    }

    fn optional_text(&mut self, field: &str, value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::Text(s) => Some(s),
            other => {
                self.mismatch(field, &other);
                None
            }
        }
    }
}

impl StatsStore for SqliteStore {
    fn load_stats(&self, player: &str) -> Result<Option<StoredStats>> {
        let conn = self.conn();
        Self::read_stats(&conn, player)
    }

    fn save_stats(&self, player: &str, stats: &PlayerStats) -> Result<()> {
        let record = StoredStats::from(stats);
        let now = Utc::now().timestamp_millis();

        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            r#"INSERT INTO players
               (name, games_played, total_score, best_score, current_streak, last_played,
                current_xp, level, total_earned, available_to_claim, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
               ON CONFLICT(name) DO UPDATE SET
                   games_played = ?2, total_score = ?3, best_score = ?4, current_streak = ?5,
                   last_played = ?6, current_xp = ?7, level = ?8, total_earned = ?9,
                   available_to_claim = ?10, updated_at = ?11"#,
            rusqlite::params![
                player,
                record.games_played,
                record.total_score,
                record.best_score,
                record.current_streak,
                record.last_played,
                record.current_xp,
                record.level,
                record.total_earned,
                record.available_to_claim,
                now,
            ],
        )?;

        tx.execute("DELETE FROM player_badges WHERE player_name = ?1", [player])?;
        for (position, badge) in record.unlocked_badges.iter().enumerate() {
            tx.execute(
                "INSERT INTO player_badges (player_name, badge_id, position) VALUES (?1, ?2, ?3)",
                rusqlite::params![player, badge, position as i64],
            )?;
        }

        tx.commit()
            .with_context(|| format!("Failed to commit stats for {}", player))?;
        Ok(())
    }

    fn load_active_profile(&self) -> Result<Option<PlayerProfile>> {
        let conn = self.conn();
        let profile = conn
            .query_row(
                "SELECT name, avatar_seed FROM active_profile WHERE id = 1",
                [],
                |r| {
                    Ok(PlayerProfile {
                        name: r.get(0)?,
                        avatar_seed: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    fn save_active_profile(&self, profile: &PlayerProfile) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO active_profile (id, name, avatar_seed) VALUES (1, ?1, ?2)
               ON CONFLICT(id) DO UPDATE SET name = ?1, avatar_seed = ?2"#,
            (&profile.name, &profile.avatar_seed),
        )?;
        Ok(())
    }

    fn list_players(&self) -> Result<Vec<(String, StoredStats)>> {
        let conn = self.conn();
        let names: Vec<String> = {
            let mut stmt = conn.prepare("SELECT name FROM players ORDER BY name")?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            rows
        };

        let mut players = Vec::with_capacity(names.len());
        for name in names {
            if let Some(stats) = Self::read_stats(&conn, &name)? {
                players.push((name, stats));
            }
        }
        Ok(players)
    }

    fn load_wallet(&self) -> Result<Option<WalletConnection>> {
        let conn = self.conn();
        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT kind, connected_at FROM wallet WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        let Some((kind, connected_at)) = row else {
            return Ok(None);
        };

        let kind = match kind.parse::<WalletKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Ignoring stored wallet connection: {}", e);
                return Ok(None);
            }
        };

        let connected_at = match DateTime::from_timestamp_millis(connected_at) {
            Some(ts) => ts,
            None => {
                warn!(connected_at, "Stored wallet timestamp out of range, using now");
                Utc::now()
            }
        };

        Ok(Some(WalletConnection { kind, connected_at }))
    }

    fn save_wallet(&self, wallet: &WalletConnection) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO wallet (id, kind, connected_at) VALUES (1, ?1, ?2)
               ON CONFLICT(id) DO UPDATE SET kind = ?1, connected_at = ?2"#,
            (wallet.kind.as_str(), wallet.connected_at.timestamp_millis()),
        )?;
        Ok(())
    }
}

/// SQL schema for the game database
const SCHEMA_SQL: &str = r#"
-- One row per player, keyed by profile name
CREATE TABLE IF NOT EXISTS players (
    name TEXT PRIMARY KEY,
    games_played INTEGER NOT NULL DEFAULT 0,
    total_score INTEGER NOT NULL DEFAULT 0,
    best_score INTEGER NOT NULL DEFAULT 0,
    current_streak INTEGER NOT NULL DEFAULT 0,
    last_played TEXT,
    current_xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    total_earned REAL NOT NULL DEFAULT 0.0,
    available_to_claim REAL NOT NULL DEFAULT 0.0,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_players_total_score ON players(total_score);

-- Unlocked badges, in unlock order
CREATE TABLE IF NOT EXISTS player_badges (
    player_name TEXT NOT NULL,
    badge_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (player_name, badge_id)
);

-- Active profile (singleton)
CREATE TABLE IF NOT EXISTS active_profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    name TEXT NOT NULL,
    avatar_seed TEXT NOT NULL
);

-- Connected wallet (singleton)
CREATE TABLE IF NOT EXISTS wallet (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    kind TEXT NOT NULL,
    connected_at INTEGER NOT NULL
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("worldsnap.db");
        let store = SqliteStore::open(&db_path).unwrap();

        let conn = store.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"players".to_string()));
        assert!(tables.contains(&"player_badges".to_string()));
        assert!(tables.contains(&"active_profile".to_string()));
        assert!(tables.contains(&"wallet".to_string()));
    }

    #[test]
    fn test_negative_column_is_loaded_raw() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_stats("eve", &PlayerStats::default()).unwrap();
        store
            .conn()
            .execute("UPDATE players SET games_played = -3 WHERE name = 'eve'", [])
            .unwrap();

        let raw = store.load_stats("eve").unwrap().unwrap();
        assert_eq!(raw.games_played, -3);
        assert!(PlayerStats::try_from(raw).is_err());
    }

    #[test]
    fn test_wrong_column_type_falls_back_to_fresh() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut stats = PlayerStats::default();
        stats.total_score = 700;
        stats.best_score = 700;
        store.save_stats("eve", &stats).unwrap();
        store.save_stats("bob", &stats).unwrap();

        for update in [
            "UPDATE players SET games_played = 'lots' WHERE name = 'eve'",
            "UPDATE players SET games_played = 1.5 WHERE name = 'eve'",
            "UPDATE players SET games_played = 0, total_earned = x'00' WHERE name = 'eve'",
        ] {
            store.conn().execute(update, []).unwrap();
            let raw = store.load_stats("eve").unwrap().unwrap();
            assert_eq!(raw.type_errors.len(), 1, "{update}");
            assert_eq!(
                crate::store::load_or_default(&store, "eve").unwrap(),
                PlayerStats::default()
            );
        }

        // The leaderboard skips the broken row instead of failing
        let board = crate::store::leaderboard(&store).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].name, "bob");
    }

    #[test]
    fn test_wrong_badge_type_falls_back_to_fresh() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_stats("eve", &PlayerStats::default()).unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO player_badges (player_name, badge_id, position) VALUES ('eve', 'gold', 0)",
                [],
            )
            .unwrap();

        let raw = store.load_stats("eve").unwrap().unwrap();
        assert_eq!(raw.type_errors, vec!["unlockedBadges holds Text".to_string()]);
        assert!(PlayerStats::try_from(raw).is_err());
    }

    #[test]
    fn test_unknown_wallet_kind_ignored() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO wallet (id, kind, connected_at) VALUES (1, 'ledger', 0)",
                [],
            )
            .unwrap();
        assert!(store.load_wallet().unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_wallet_timestamp_replaced() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO wallet (id, kind, connected_at) VALUES (1, 'celo', ?1)",
                [i64::MAX],
            )
            .unwrap();

        let before = Utc::now();
        let wallet = store.load_wallet().unwrap().unwrap();
        assert_eq!(wallet.kind, WalletKind::Celo);
        assert!(wallet.connected_at >= before);
    }
}
