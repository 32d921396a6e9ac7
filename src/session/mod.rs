//! Game session orchestrator
//!
//! Drives one 5-round game at a time for the active player:
//!
//! ```text
//!   Idle ──start──► InRound(0) ──guess──► RoundScored(0) ──advance──► InRound(1) ...
//!                                         RoundScored(4) ──advance──► Complete
//! ```
//!
//! The session owns the authoritative in-memory [`PlayerStats`] and writes the
//! whole record back to the injected [`StatsStore`] after every mutation. A
//! failed write is reported on the outcome and logged; the in-memory copy is
//! kept either way.

mod state;

pub use state::SessionState;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::domain::{Guess, Location, PlayerProfile, RoundResult};
use crate::error::{GameError, GameResult};
use crate::geo::distance_km;
use crate::quiz::QuizOutcome;
use crate::rng::SeededRng;
use crate::scoring::score_for_distance;
use crate::stats::{LevelUp, PlayerStats, RoundProgress};
use crate::store::{load_or_default, StatsStore};
use crate::wallet::{claim_rewards, TransactionReceipt, WalletSimulator};

/// Rounds in every session
pub const ROUNDS_PER_SESSION: usize = 5;

const FINAL_ROUND: usize = ROUNDS_PER_SESSION - 1;

/// What a submitted guess produced
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub result: RoundResult,
    /// Running total for the current session, this round included
    pub session_score: u64,
    pub progress: RoundProgress,
    /// Set when the stats could not be saved
    pub persistence_warning: Option<GameError>,
}

/// Result of `advance_round`
#[derive(Debug, Clone)]
pub enum Advance {
    NextRound { round: usize, location: Location },
    Complete(SessionSummary),
}

/// A finished session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_score: u64,
    pub rounds: Vec<RoundResult>,
}

impl SessionSummary {
    pub fn best_round(&self) -> Option<&RoundResult> {
        self.rounds.iter().max_by_key(|r| r.score)
    }
}

/// What applying a finished quiz produced
#[derive(Debug, Clone)]
pub struct QuizCompletion {
    pub outcome: QuizOutcome,
    pub level_up: Option<LevelUp>,
    pub persistence_warning: Option<GameError>,
}

/// A successful reward claim
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub receipt: TransactionReceipt,
    pub persistence_warning: Option<GameError>,
}

/// Orchestrates sessions for one player over an injected store
pub struct GameSession<'a> {
    store: &'a dyn StatsStore,
    catalog: Catalog,
    rng: SeededRng,
    player: PlayerProfile,
    stats: PlayerStats,
    wallet_connected: bool,
    state: SessionState,
    locations: Vec<Location>,
    session_score: u64,
    rounds: Vec<RoundResult>,
    profile_warning: Option<GameError>,
}

impl<'a> GameSession<'a> {
    pub fn new(
        store: &'a dyn StatsStore,
        catalog: Catalog,
        player: PlayerProfile,
        stats: PlayerStats,
        rng: SeededRng,
    ) -> Self {
        Self {
            store,
            catalog,
            rng,
            player,
            stats,
            wallet_connected: false,
            state: SessionState::Idle,
            locations: Vec::new(),
            session_score: 0,
            rounds: Vec::new(),
            profile_warning: None,
        }
    }

    /// Resume a player from the store.
    ///
    /// Missing or malformed stats start fresh. The wallet flag comes from the
    /// persisted wallet connection.
    pub fn load(
        store: &'a dyn StatsStore,
        catalog: Catalog,
        player: PlayerProfile,
        rng: SeededRng,
    ) -> anyhow::Result<Self> {
        let stats = load_or_default(store, &player.name)?;
        let wallet_connected = store.load_wallet()?.is_some();
        debug!(
            player = %player.name,
            level = stats.level,
            games = stats.games_played,
            "Loaded player"
        );
        Ok(Self::new(store, catalog, player, stats, rng).with_wallet_connected(wallet_connected))
    }

    /// Make `profile` the active profile and load its stats.
    ///
    /// Failing to persist the profile does not stop onboarding; the failure
    /// is kept in [`GameSession::profile_warning`].
    pub fn onboard(
        store: &'a dyn StatsStore,
        catalog: Catalog,
        profile: PlayerProfile,
        rng: SeededRng,
    ) -> anyhow::Result<Self> {
        let profile_warning = match store.save_active_profile(&profile) {
            Ok(()) => {
                info!(player = %profile.name, avatar = %profile.avatar_seed, "Active profile set");
                None
            }
            Err(e) => {
                warn!(player = %profile.name, "Failed to save active profile: {:#}", e);
                Some(GameError::PersistenceWriteFailure(format!("{:#}", e)))
            }
        };

        let mut session = Self::load(store, catalog, profile, rng)?;
        session.profile_warning = profile_warning;
        Ok(session)
    }

    /// Set when onboarding could not persist the active profile
    pub fn profile_warning(&self) -> Option<&GameError> {
        self.profile_warning.as_ref()
    }

    pub fn with_wallet_connected(mut self, connected: bool) -> Self {
        self.wallet_connected = connected;
        self
    }

    pub fn set_wallet_connected(&mut self, connected: bool) {
        self.wallet_connected = connected;
    }

    pub fn wallet_connected(&self) -> bool {
        self.wallet_connected
    }

    pub fn player(&self) -> &PlayerProfile {
        &self.player
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_score(&self) -> u64 {
        self.session_score
    }

    /// Rounds scored so far in the current session
    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Draw locations and enter round 0.
    ///
    /// A session already in progress is abandoned; rounds it scored stay
    /// recorded in the player's stats.
    pub fn start_session(&mut self) -> GameResult<&Location> {
        let locations = self.catalog.draw(&mut self.rng, ROUNDS_PER_SESSION)?;

        if self.state.is_active() {
            warn!(
                player = %self.player.name,
                state = %self.state,
                "Abandoning unfinished session"
            );
        }

        self.locations = locations;
        self.rounds.clear();
        self.session_score = 0;
        self.state = SessionState::InRound { round: 0 };

        info!(
            player = %self.player.name,
            first = %self.locations[0].name,
            "Session started"
        );
        Ok(&self.locations[0])
    }

    /// Location for the round in play (awaiting a guess or just scored)
    pub fn current_location(&self) -> Option<&Location> {
        match self.state {
            SessionState::InRound { round } | SessionState::RoundScored { round } => {
                self.locations.get(round)
            }
            _ => None,
        }
    }

    pub fn submit_guess(&mut self, guess: Guess) -> GameResult<RoundOutcome> {
        self.submit_guess_at(guess, Utc::now())
    }

    /// Score `guess` against the current round as if submitted at `now`
    pub fn submit_guess_at(&mut self, guess: Guess, now: DateTime<Utc>) -> GameResult<RoundOutcome> {
        let round = self
            .state
            .awaiting_guess()
            .ok_or(GameError::InvalidGuessState)?;
        let location = self
            .locations
            .get(round)
            .cloned()
            .ok_or(GameError::InvalidGuessState)?;

        let distance = distance_km(location.coordinate(), guess);
        let score = score_for_distance(distance);
        self.session_score += u64::from(score);

        let progress =
            self.stats
                .record_round(score, now, round == FINAL_ROUND, self.wallet_connected);

        info!(
            player = %self.player.name,
            round = round + 1,
            location = %location.name,
            distance_km = distance,
            score,
            "Round scored"
        );
        if let Some(level_up) = &progress.level_up {
            info!(from = level_up.old_level, to = level_up.new_level, "Level up");
        }
        for badge in &progress.new_badges {
            info!(badge = badge.id(), "Badge unlocked");
        }

        let result = RoundResult {
            round,
            location,
            guess,
            distance_km: distance,
            score,
        };
        self.rounds.push(result.clone());
        self.state = SessionState::RoundScored { round };

        let persistence_warning = self.commit();
        Ok(RoundOutcome {
            result,
            session_score: self.session_score,
            progress,
            persistence_warning,
        })
    }

    /// Move on from a scored round
    pub fn advance_round(&mut self) -> GameResult<Advance> {
        let SessionState::RoundScored { round } = self.state else {
            return Err(GameError::InvalidAdvanceState);
        };

        if round < FINAL_ROUND {
            let next = round + 1;
            let location = self
                .locations
                .get(next)
                .cloned()
                .ok_or(GameError::InvalidAdvanceState)?;
            self.state = SessionState::InRound { round: next };
            debug!(round = next + 1, "Next round");
            return Ok(Advance::NextRound {
                round: next,
                location,
            });
        }

        let summary = SessionSummary {
            total_score: self.session_score,
            rounds: std::mem::take(&mut self.rounds),
        };
        self.locations.clear();
        self.session_score = 0;
        self.state = SessionState::Complete;

        info!(
            player = %self.player.name,
            total = summary.total_score,
            games = self.stats.games_played,
            "Session complete"
        );
        Ok(Advance::Complete(summary))
    }

    /// Drop the current session without touching stats
    pub fn abandon(&mut self) {
        if self.state.is_active() {
            debug!(state = %self.state, "Session abandoned");
        }
        self.locations.clear();
        self.rounds.clear();
        self.session_score = 0;
        self.state = SessionState::Idle;
    }

    /// Apply a finished quiz to the player's stats and commit
    pub fn record_quiz(&mut self, outcome: QuizOutcome) -> QuizCompletion {
        let level_up = self.stats.record_quiz(outcome.earned, outcome.xp);
        info!(
            player = %self.player.name,
            correct = outcome.correct_answers,
            earned = outcome.earned,
            xp = outcome.xp,
            "Quiz completed"
        );
        if let Some(level_up) = &level_up {
            info!(from = level_up.old_level, to = level_up.new_level, "Level up");
        }

        QuizCompletion {
            outcome,
            level_up,
            persistence_warning: self.commit(),
        }
    }

    /// Claim the whole available balance through `wallet` and commit
    pub async fn claim_rewards(&mut self, wallet: &WalletSimulator) -> GameResult<ClaimOutcome> {
        let receipt = claim_rewards(wallet, &mut self.stats).await?;
        Ok(ClaimOutcome {
            receipt,
            persistence_warning: self.commit(),
        })
    }

    /// Write the stats back; a failure is returned as a warning
    fn commit(&self) -> Option<GameError> {
        match self.store.save_stats(&self.player.name, &self.stats) {
            Ok(()) => {
                debug!(player = %self.player.name, "Stats saved");
                None
            }
            Err(e) => {
                warn!(player = %self.player.name, "Failed to save stats: {:#}", e);
                Some(GameError::PersistenceWriteFailure(format!("{:#}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session(store: &MemoryStore) -> GameSession<'_> {
        let player = PlayerProfile::new("Ada", None).unwrap();
        GameSession::new(
            store,
            Catalog::builtin(),
            player,
            PlayerStats::default(),
            SeededRng::new(7),
        )
    }

    #[test]
    fn test_guess_requires_round() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(
            session.submit_guess(Guess::new(0.0, 0.0)).unwrap_err(),
            GameError::InvalidGuessState
        );
        assert_eq!(
            session.advance_round().unwrap_err(),
            GameError::InvalidAdvanceState
        );
    }

    #[test]
    fn test_round_transitions() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        let first = session.start_session().unwrap().clone();
        assert_eq!(session.state(), SessionState::InRound { round: 0 });
        assert_eq!(session.current_location(), Some(&first));

        let outcome = session.submit_guess(first.coordinate()).unwrap();
        assert_eq!(outcome.result.score, 1000);
        assert_eq!(outcome.session_score, 1000);
        assert!(outcome.persistence_warning.is_none());
        assert_eq!(session.state(), SessionState::RoundScored { round: 0 });

        // A second guess on the same round is rejected and changes nothing
        assert_eq!(
            session.submit_guess(first.coordinate()).unwrap_err(),
            GameError::InvalidGuessState
        );
        assert_eq!(session.session_score(), 1000);

        match session.advance_round().unwrap() {
            Advance::NextRound { round, location } => {
                assert_eq!(round, 1);
                assert_ne!(location, first);
            }
            Advance::Complete(_) => panic!("session ended after one round"),
        }
        assert_eq!(session.state(), SessionState::InRound { round: 1 });
    }

    #[test]
    fn test_full_session_resets() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        session.start_session().unwrap();

        for _ in 0..ROUNDS_PER_SESSION {
            session.submit_guess(Guess::new(0.0, 0.0)).unwrap();
            if let Advance::Complete(summary) = session.advance_round().unwrap() {
                assert_eq!(summary.rounds.len(), ROUNDS_PER_SESSION);
                let sum: u64 = summary.rounds.iter().map(|r| u64::from(r.score)).sum();
                assert_eq!(summary.total_score, sum);
            }
        }

        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.session_score(), 0);
        assert!(session.rounds().is_empty());
        assert!(session.current_location().is_none());
        assert_eq!(session.stats().games_played, 1);

        assert_eq!(
            session.advance_round().unwrap_err(),
            GameError::InvalidAdvanceState
        );
        assert_eq!(
            session.submit_guess(Guess::new(0.0, 0.0)).unwrap_err(),
            GameError::InvalidGuessState
        );
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.stats().games_played, 1);
    }

    #[test]
    fn test_restart_abandons_without_counting_game() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        let first = session.start_session().unwrap().clone();
        session.submit_guess(first.coordinate()).unwrap();

        session.start_session().unwrap();
        assert_eq!(session.state(), SessionState::InRound { round: 0 });
        assert_eq!(session.session_score(), 0);
        assert_eq!(session.stats().games_played, 0);
        assert_eq!(session.stats().total_score, 1000);
    }

    #[test]
    fn test_abandon() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        session.start_session().unwrap();
        session.abandon();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current_location().is_none());
    }

    #[test]
    fn test_record_quiz_commits() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        let completion = session.record_quiz(QuizOutcome {
            correct_answers: 3,
            earned: 1.5,
            xp: 330,
        });

        assert_eq!(
            completion.level_up,
            Some(LevelUp {
                old_level: 1,
                new_level: 2
            })
        );
        assert!(completion.persistence_warning.is_none());
        let saved = PlayerStats::try_from(store.load_stats("Ada").unwrap().unwrap()).unwrap();
        assert_eq!(saved.current_xp, 330);
        assert_eq!(saved.available_to_claim, 1.5);
    }

    #[tokio::test]
    async fn test_claim_commits_zeroed_balance() {
        let store = MemoryStore::new();
        let mut session = session(&store);
        session.record_quiz(QuizOutcome {
            correct_answers: 1,
            earned: 0.5,
            xp: 100,
        });

        let mut wallet = WalletSimulator::instant(None);
        wallet.connect(crate::wallet::WalletKind::Celo);
        let claim = session.claim_rewards(&wallet).await.unwrap();
        assert_eq!(claim.receipt.amount, 0.5);

        let saved = PlayerStats::try_from(store.load_stats("Ada").unwrap().unwrap()).unwrap();
        assert_eq!(saved.available_to_claim, 0.0);
        assert_eq!(saved.total_earned, 0.5);
    }
}
