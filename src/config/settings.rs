//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding `worldsnap.db` (defaults to `~/.worldsnap`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Fixed shuffle seed; every session draws from fresh entropy when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,

    /// Simulated wallet settings
    #[serde(default)]
    pub wallet: WalletSettings,
}

/// Delays for the simulated reward transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Time spent in the "confirming" step
    #[serde(default = "default_confirm_delay_ms")]
    pub confirm_delay_ms: u64,

    /// Time spent in the "processing" step
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

fn default_confirm_delay_ms() -> u64 {
    1500
}

fn default_processing_delay_ms() -> u64 {
    3000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            wallet: WalletSettings::default(),
        }
    }
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            confirm_delay_ms: default_confirm_delay_ms(),
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}
