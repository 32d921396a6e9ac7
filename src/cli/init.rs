//! Init command implementation

use anyhow::{bail, Result};
use std::path::PathBuf;

use worldsnap::config::{write_locked, Config};

/// Default configuration content for worldsnap init
pub const DEFAULT_CONFIG: &str = r#"# WorldSnap Configuration
# =======================

# ============================================================================
# SETTINGS
# ============================================================================
#
# Available options:
#   data_dir - Directory for worldsnap.db (default: ~/.worldsnap)
#   seed     - Fixed shuffle seed; the same seed always draws the same
#              locations in the same order (default: random per session)

[settings]
# data_dir = "/path/to/data"
# seed = 42

# Simulated reward transactions. Nothing is sent to a real chain.
[settings.wallet]
confirm_delay_ms = 1500
processing_delay_ms = 3000

# ============================================================================
# LOCATIONS
# ============================================================================
#
# Add [[location]] entries to replace the built-in catalog. A session needs
# at least 5 distinct locations.
#
#   [[location]]
#   name = "Cairo, Egypt"
#   lat = 30.0444
#   lng = 31.2357
#   image_url = "https://example.com/cairo.jpg"
"#;

/// Write the default config.
/// By default creates the global config at ~/.worldsnap/config.toml
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_locked(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
