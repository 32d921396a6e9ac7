//! WorldSnap - a geolocation guessing game
//!
//! Players see a photo of a place, pin a guess on the world map and score
//! points by how close they got. Scores feed XP, levels, daily streaks, badges
//! and a simulated token reward that can be "claimed" to a mock wallet.
//!
//! ## Layout
//!
//! - [`geo`] and [`scoring`]: distance between coordinates, distance to points
//! - [`stats`]: the progression engine working on [`stats::PlayerStats`]
//! - [`session`]: the 5-round game loop, committing stats after every round
//! - [`store`]: durable per-player storage (in-memory or SQLite)
//! - [`quiz`] and [`wallet`]: the educational quiz and reward claims
//!
//! ```no_run
//! use worldsnap::catalog::Catalog;
//! use worldsnap::rng::SeededRng;
//! use worldsnap::session::GameSession;
//! use worldsnap::store::MemoryStore;
//! use worldsnap::PlayerProfile;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = MemoryStore::new();
//! let player = PlayerProfile::new("Ada", None)?;
//! let mut session = GameSession::onboard(&store, Catalog::builtin(), player, SeededRng::new(42))?;
//!
//! let target = session.start_session()?.coordinate();
//! let outcome = session.submit_guess(target)?;
//! assert_eq!(outcome.result.score, 1000);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod geo;
pub mod quiz;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod store;
pub mod wallet;

pub use domain::*;
pub use error::{GameError, GameResult};
