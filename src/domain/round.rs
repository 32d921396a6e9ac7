//! Per-round types

use serde::Serialize;

use super::Location;
use crate::geo::Coordinate;

/// A pinned guess for one round
pub type Guess = Coordinate;

/// Outcome of a single guess. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// Zero-based round index within the session
    pub round: usize,
    pub location: Location,
    pub guess: Guess,
    pub distance_km: f64,
    pub score: u32,
}
