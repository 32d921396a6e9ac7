//! Error types for the game engine
//!
//! Gameplay rule violations are typed so callers can react to them.
//! I/O-heavy paths (config, SQLite, CLI) use `anyhow` instead.

use thiserror::Error;

/// Errors raised by the scoring/progression engine and session orchestrator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A guess was submitted while no round was waiting for one
    #[error("No round is awaiting a guess")]
    InvalidGuessState,

    /// `advance_round` was called before the current round was scored
    #[error("No scored round to advance from")]
    InvalidAdvanceState,

    /// The catalog cannot fill a full session without repeating locations
    #[error("Catalog has {available} distinct locations but {required} are required")]
    CatalogInsufficient { required: usize, available: usize },

    /// Stored stats failed shape/range validation
    #[error("Persisted stats are malformed: {0}")]
    MalformedPersistedStats(String),

    /// Saving stats failed; the in-memory copy is still authoritative
    #[error("Failed to save player stats: {0}")]
    PersistenceWriteFailure(String),

    #[error("No rewards available to claim")]
    NothingToClaim,

    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// Quiz was answered twice, advanced before answering, or used after it ended
    #[error("Quiz action not allowed in the current state")]
    QuizOutOfOrder,

    #[error("Player name must not be empty")]
    EmptyPlayerName,
}

pub type GameResult<T> = std::result::Result<T, GameError>;
