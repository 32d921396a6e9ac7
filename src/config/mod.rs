//! Configuration loading and management
//!
//! The config lives at `~/.worldsnap/config.toml`:
//!
//! ```toml
//! [settings]
//! seed = 42
//!
//! [settings.wallet]
//! confirm_delay_ms = 1500
//! processing_delay_ms = 3000
//!
//! [[location]]
//! name = "Paris, France"
//! lat = 48.8566
//! lng = 2.3522
//! ```
//!
//! Without any `[[location]]` entries the built-in catalog is used.

mod io;
mod settings;

pub use io::{write_locked, DATABASE_FILE};
pub use settings::{Settings, WalletSettings};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::Location;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Custom location catalog, replacing the built-in one when non-empty
    #[serde(default, rename = "location", skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl Config {
    /// Catalog sessions should draw from
    pub fn catalog(&self) -> Catalog {
        if self.locations.is_empty() {
            Catalog::builtin()
        } else {
            Catalog::new(self.locations.clone())
        }
    }

    /// Reject locations with empty names or coordinates off the globe
    pub fn validate(&self) -> Result<()> {
        for location in &self.locations {
            if location.name.trim().is_empty() {
                bail!("Location at {}, {} has no name", location.lat, location.lng);
            }
            if !(-90.0..=90.0).contains(&location.lat) {
                bail!("Location '{}' has latitude {} outside [-90, 90]", location.name, location.lat);
            }
            if !(-180.0..=180.0).contains(&location.lng) {
                bail!(
                    "Location '{}' has longitude {} outside [-180, 180]",
                    location.name,
                    location.lng
                );
            }
        }
        Ok(())
    }
}
