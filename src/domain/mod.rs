//! Core domain types for WorldSnap

mod location;
mod profile;
mod round;

pub use location::Location;
pub use profile::{PlayerProfile, AVATAR_SEEDS, DEFAULT_AVATAR_SEED};
pub use round::{Guess, RoundResult};
