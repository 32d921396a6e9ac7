//! CLI command implementations

pub mod init;
pub mod leaderboard;
pub mod play;
pub mod profile;
pub mod quiz;
pub mod stats;
pub mod wallet;

use std::io::BufRead;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use worldsnap::config::Config;
use worldsnap::rng::SeededRng;
use worldsnap::session::GameSession;
use worldsnap::store::{MemoryStore, SqliteStore, StatsStore};
use worldsnap::wallet::WalletSimulator;
use worldsnap::PlayerProfile;

/// Profile used by `--ephemeral` runs when none has been set
const GUEST_NAME: &str = "Guest";

/// Loaded config plus the store every command works against
pub struct App {
    pub config: Config,
    store: Box<dyn StatsStore>,
    ephemeral: bool,
}

impl App {
    pub fn open(config_path: Option<&Path>, ephemeral: bool) -> Result<Self> {
        let config = Config::load(config_path)?;

        let store: Box<dyn StatsStore> = if ephemeral {
            debug!("Using in-memory store");
            Box::new(MemoryStore::new())
        } else {
            let db_path = config.database_path();
            debug!("Using database {}", db_path.display());
            Box::new(SqliteStore::open(&db_path)?)
        };

        Ok(Self {
            config,
            store,
            ephemeral,
        })
    }

    pub fn store(&self) -> &dyn StatsStore {
        self.store.as_ref()
    }

    /// The active profile; ephemeral runs fall back to a guest
    pub fn active_profile(&self) -> Result<PlayerProfile> {
        if let Some(profile) = self.store.load_active_profile()? {
            return Ok(profile);
        }
        if self.ephemeral {
            return Ok(PlayerProfile::new(GUEST_NAME, None)?);
        }
        bail!("No active profile. Run `worldsnap profile --name <NAME>` first.")
    }

    /// Shuffle source: explicit seed, then the configured one, then entropy
    pub fn rng(&self, seed: Option<u32>) -> SeededRng {
        match seed.or(self.config.settings.seed) {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        }
    }

    pub fn load_session(&self, seed: Option<u32>) -> Result<GameSession<'_>> {
        let profile = self.active_profile()?;
        GameSession::load(self.store(), self.config.catalog(), profile, self.rng(seed))
    }

    pub fn wallet(&self) -> Result<WalletSimulator> {
        let connection = self.store.load_wallet()?;
        Ok(WalletSimulator::new(&self.config.settings.wallet, connection))
    }
}

/// Read one trimmed, non-empty line from stdin (None on EOF)
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    eprint!("{}", prompt);
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
    Ok(None)
}
