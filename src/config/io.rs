//! Configuration file I/O operations

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use super::Config;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE: &str = "worldsnap.db";

impl Config {
    /// Get the global config directory path (~/.worldsnap/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".worldsnap")
    }

    /// Get the global config file path (~/.worldsnap/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load and validate configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the global config is used,
    /// falling back to defaults when it has not been created yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if !global_path.exists() {
            debug!("No config at {}, using defaults", global_path.display());
            return Ok(Self::default());
        }
        Self::from_file(&global_path)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// The parent directory is created if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }

    /// Where the SQLite database lives
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
            .join(DATABASE_FILE)
    }
}

/// Replace `path` with `content` while holding `<path>.lock`.
///
/// The content is staged in `<path>.tmp` and renamed over the target, so
/// readers never see a half-written file.
pub fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let lock_path = sibling(path, "lock");
    let lock = File::create(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", path.display()))?;

    let staged = sibling(path, "tmp");
    let written = File::create(&staged).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });
    let result = written
        .and_then(|()| std::fs::rename(&staged, path))
        .with_context(|| format!("Failed to write {}", path.display()));

    match &result {
        Ok(()) => debug!(path = %path.display(), "Wrote file"),
        Err(_) => {
            let _ = std::fs::remove_file(&staged);
        }
    }
    result
}

/// `config.toml` -> `config.toml.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
