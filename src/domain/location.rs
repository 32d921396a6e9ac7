//! Location type definitions

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A place the player has to find on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name (e.g. "Paris, France")
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Photo shown during the round
    #[serde(default)]
    pub image_url: String,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            image_url: image_url.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
