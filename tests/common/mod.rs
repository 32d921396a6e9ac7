//! Shared test utilities for session and store integration tests

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use tempfile::TempDir;

use worldsnap::catalog::Catalog;
use worldsnap::geo::Coordinate;
use worldsnap::rng::SeededRng;
use worldsnap::session::{Advance, GameSession, SessionSummary};
use worldsnap::store::{SqliteStore, StatsStore};
use worldsnap::{Location, PlayerProfile};

/// Seed used wherever the exact draw does not matter
pub const SEED: u32 = 2024;

pub fn player(name: &str) -> PlayerProfile {
    PlayerProfile::new(name, None).expect("valid player name")
}

/// Fresh session for `name` over `store`, built-in catalog
pub fn session<'a>(store: &'a dyn StatsStore, name: &str, seed: u32) -> GameSession<'a> {
    GameSession::load(store, Catalog::builtin(), player(name), SeededRng::new(seed))
        .expect("Failed to load session")
}

/// Noon local time on the given day, as UTC
pub fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

/// Exactly on target: always 1000 points
pub fn perfect(location: &Location) -> Coordinate {
    location.coordinate()
}

/// The antipode of the target: always the fallback 50 points
pub fn antipode(location: &Location) -> Coordinate {
    let lng = if location.lng > 0.0 {
        location.lng - 180.0
    } else {
        location.lng + 180.0
    };
    Coordinate::new(-location.lat, lng)
}

/// Play a whole session, choosing each guess with `guess(round, location)`
pub fn play_session<F>(session: &mut GameSession<'_>, now: DateTime<Utc>, mut guess: F) -> SessionSummary
where
    F: FnMut(usize, &Location) -> Coordinate,
{
    let mut location = session.start_session().expect("Failed to start session").clone();
    let mut round = 0;
    loop {
        session
            .submit_guess_at(guess(round, &location), now)
            .expect("Failed to submit guess");
        match session.advance_round().expect("Failed to advance") {
            Advance::NextRound {
                round: next,
                location: next_location,
            } => {
                round = next;
                location = next_location;
            }
            Advance::Complete(summary) => return summary,
        }
    }
}

/// On-disk SQLite store inside a temp dir (keep the dir alive)
pub fn temp_sqlite() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&dir.path().join("worldsnap.db")).expect("Failed to open db");
    (dir, store)
}
