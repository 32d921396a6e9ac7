//! Integration tests for the persistence gateway

mod common;

use common::{antipode, local_noon, play_session, player, session, temp_sqlite, SEED};

use worldsnap::stats::{BadgeId, PlayerStats, StoredStats};
use worldsnap::store::{leaderboard, load_or_default, MemoryStore, SqliteStore, StatsStore};
use worldsnap::wallet::{WalletConnection, WalletKind};

fn stats_with(total_score: u64, games_played: u32) -> PlayerStats {
    PlayerStats {
        games_played,
        total_score,
        best_score: 1000.min(total_score as u32),
        ..PlayerStats::default()
    }
}

#[test]
fn test_sqlite_roundtrip_survives_reopen() {
    let (dir, store) = temp_sqlite();

    let mut stats = PlayerStats::default();
    stats.record_round(1000, local_noon(2026, 2, 3), true, true);
    stats.record_round(700, local_noon(2026, 2, 4), false, true);
    assert_eq!(
        stats.unlocked_badges,
        vec![BadgeId::FirstWin, BadgeId::PerfectScore]
    );
    store.save_stats("Ada", &stats).unwrap();
    drop(store);

    let reopened = SqliteStore::open(&dir.path().join("worldsnap.db")).unwrap();
    let loaded = load_or_default(&reopened, "Ada").unwrap();
    assert_eq!(loaded, stats);
    assert_eq!(loaded.current_streak, 2);
}

#[test]
fn test_sqlite_overwrite_replaces_badges() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut stats = PlayerStats::default();
    stats.unlocked_badges = vec![BadgeId::PerfectScore];
    stats.total_score = 1000;
    stats.best_score = 1000;
    store.save_stats("Ada", &stats).unwrap();

    stats.unlocked_badges.push(BadgeId::FirstWin);
    stats.games_played = 1;
    store.save_stats("Ada", &stats).unwrap();

    let raw = store.load_stats("Ada").unwrap().unwrap();
    assert_eq!(raw.unlocked_badges, vec![5, 1]);
    assert_eq!(raw.games_played, 1);
}

#[test]
fn test_profile_and_wallet_roundtrip() {
    let (_dir, store) = temp_sqlite();
    assert!(store.load_active_profile().unwrap().is_none());
    assert!(store.load_wallet().unwrap().is_none());

    let profile = worldsnap::PlayerProfile::new("Ada", Some("player7")).unwrap();
    store.save_active_profile(&profile).unwrap();
    store.save_active_profile(&player("Bob")).unwrap();
    assert_eq!(store.load_active_profile().unwrap(), Some(player("Bob")));

    let wallet = WalletConnection::new(WalletKind::MetaMask);
    store.save_wallet(&wallet).unwrap();
    let loaded = store.load_wallet().unwrap().unwrap();
    assert_eq!(loaded.kind, WalletKind::MetaMask);
    assert_eq!(
        loaded.connected_at.timestamp_millis(),
        wallet.connected_at.timestamp_millis()
    );
}

#[test]
fn test_missing_player_starts_fresh() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.load_stats("nobody").unwrap().is_none());
    assert_eq!(load_or_default(&store, "nobody").unwrap(), PlayerStats::default());
}

#[test]
fn test_malformed_row_falls_back() {
    let store = MemoryStore::new();
    let mut raw = StoredStats::from(&stats_with(500, 1));
    raw.available_to_claim = 3.0;
    store.insert_raw("Ada", raw);

    assert_eq!(load_or_default(&store, "Ada").unwrap(), PlayerStats::default());
}

#[test]
fn test_leaderboard_order() {
    let store = MemoryStore::new();
    store.save_stats("Cleo", &stats_with(4000, 2)).unwrap();
    store.save_stats("Ada", &stats_with(9000, 3)).unwrap();
    store.save_stats("Bob", &stats_with(4000, 1)).unwrap();

    let mut broken = StoredStats::from(&stats_with(99_000, 20));
    broken.level = 1;
    broken.current_xp = -1;
    store.insert_raw("Mallory", broken);

    let board = leaderboard(&store).unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Bob", "Cleo"]);
    assert_eq!(
        board.iter().map(|e| e.position).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(board[0].total_score, 9000);
}

#[test]
fn test_sqlite_leaderboard_after_sessions() {
    let (_dir, store) = temp_sqlite();
    for name in ["Ada", "Bob"] {
        let mut session = session(&store, name, SEED);
        play_session(&mut session, local_noon(2026, 5, 1), |_, l| antipode(l));
    }
    let mut bob = session(&store, "Bob", SEED);
    play_session(&mut bob, local_noon(2026, 5, 1), |_, l| antipode(l));

    let board = leaderboard(&store).unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].name, "Bob");
    assert_eq!(board[0].games_played, 2);
    assert_eq!(board[0].total_score, 500);
    assert_eq!(board[1].name, "Ada");
}

#[test]
fn test_memory_store_clones_share_data() {
    let store = MemoryStore::new();
    let clone = store.clone();
    clone.save_stats("Ada", &stats_with(100, 0)).unwrap();
    assert!(store.load_stats("Ada").unwrap().is_some());
    assert_eq!(store.list_players().unwrap().len(), 1);
}
