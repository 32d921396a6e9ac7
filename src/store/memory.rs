//! In-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{bail, Result};

use super::StatsStore;
use crate::domain::PlayerProfile;
use crate::stats::{PlayerStats, StoredStats};
use crate::wallet::WalletConnection;

#[derive(Debug, Default)]
struct Inner {
    stats: BTreeMap<String, StoredStats>,
    profile: Option<PlayerProfile>,
    wallet: Option<WalletConnection>,
}

/// Store that keeps everything in process memory.
///
/// Clones share the same data. `fail_saves` makes every stats write fail,
/// which is how tests exercise the persistence-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("Memory store lock poisoned")
    }

    /// Make subsequent `save_stats` calls fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Put a raw record in place, bypassing validation
    pub fn insert_raw(&self, player: &str, stats: StoredStats) {
        self.lock().stats.insert(player.to_string(), stats);
    }
}

impl StatsStore for MemoryStore {
    fn load_stats(&self, player: &str) -> Result<Option<StoredStats>> {
        Ok(self.lock().stats.get(player).cloned())
    }

    fn save_stats(&self, player: &str, stats: &PlayerStats) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            bail!("memory store is rejecting writes");
        }
        self.lock()
            .stats
            .insert(player.to_string(), StoredStats::from(stats));
        Ok(())
    }

    fn load_active_profile(&self) -> Result<Option<PlayerProfile>> {
        Ok(self.lock().profile.clone())
    }

    fn save_active_profile(&self, profile: &PlayerProfile) -> Result<()> {
        self.lock().profile = Some(profile.clone());
        Ok(())
    }

    fn list_players(&self) -> Result<Vec<(String, StoredStats)>> {
        Ok(self
            .lock()
            .stats
            .iter()
            .map(|(name, stats)| (name.clone(), stats.clone()))
            .collect())
    }

    fn load_wallet(&self) -> Result<Option<WalletConnection>> {
        Ok(self.lock().wallet.clone())
    }

    fn save_wallet(&self, wallet: &WalletConnection) -> Result<()> {
        self.lock().wallet = Some(wallet.clone());
        Ok(())
    }
}
