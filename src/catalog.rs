//! Location catalog and per-session draws

use once_cell::sync::Lazy;

use crate::domain::Location;
use crate::error::{GameError, GameResult};
use crate::rng::SeededRng;

/// Locations shipped with the game
pub static BUILTIN_LOCATIONS: Lazy<Vec<Location>> = Lazy::new(|| {
    vec![
        Location::new(
            "Paris, France",
            48.8566,
            2.3522,
            "https://images.unsplash.com/photo-1678002219434-c6738513037e",
        ),
        Location::new(
            "Swiss Alps, Switzerland",
            46.8182,
            8.2275,
            "https://images.unsplash.com/photo-1597434429739-2574d7e06807",
        ),
        Location::new(
            "Fiji Islands",
            -18.1416,
            178.4419,
            "https://images.unsplash.com/photo-1660315247626-12267f8d68db",
        ),
        Location::new(
            "New York City, USA",
            40.7128,
            -74.0060,
            "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9",
        ),
        Location::new(
            "Tokyo, Japan",
            35.6762,
            139.6503,
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf",
        ),
        Location::new(
            "London, UK",
            51.5074,
            -0.1278,
            "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad",
        ),
        Location::new(
            "Sydney, Australia",
            -33.8688,
            151.2093,
            "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9",
        ),
        Location::new(
            "Rome, Italy",
            41.9028,
            12.4964,
            "https://images.unsplash.com/photo-1552832230-c0197dd311b5",
        ),
        Location::new(
            "Taj Mahal, India",
            27.1751,
            78.0421,
            "https://images.unsplash.com/photo-1564507592333-c60657eea523",
        ),
        Location::new(
            "Rio de Janeiro, Brazil",
            -22.9068,
            -43.1729,
            "https://images.unsplash.com/photo-1483729558449-99ef09a8c325",
        ),
    ]
});

/// The pool of locations a session draws from
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_LOCATIONS.clone())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations with exact duplicates removed, first occurrence kept
    pub fn distinct(&self) -> Vec<Location> {
        let mut distinct: Vec<Location> = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            if !distinct.contains(location) {
                distinct.push(location.clone());
            }
        }
        distinct
    }

    /// Shuffle the distinct locations and take the first `count`.
    ///
    /// Fails rather than repeating a location when the catalog is too small.
    pub fn draw(&self, rng: &mut SeededRng, count: usize) -> GameResult<Vec<Location>> {
        let mut pool = self.distinct();
        if pool.len() < count {
            return Err(GameError::CatalogInsufficient {
                required: count,
                available: pool.len(),
            });
        }

        rng.shuffle(&mut pool);
        pool.truncate(count);
        Ok(pool)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
