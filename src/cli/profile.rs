//! Profile command: onboarding and showing the active player

use anyhow::{bail, Result};

use worldsnap::session::GameSession;
use worldsnap::AVATAR_SEEDS;

use super::App;

/// Set the active profile when `name` is given, otherwise show it
pub fn profile_command(app: &App, name: Option<String>, avatar: Option<String>) -> Result<()> {
    let Some(name) = name else {
        if avatar.is_some() {
            bail!("--avatar needs --name");
        }
        let profile = app.active_profile()?;
        println!("{} ({})", profile.name, profile.avatar_seed);
        println!("  Avatar: {}", profile.avatar_url());
        return Ok(());
    };

    if let Some(seed) = avatar.as_deref() {
        if !AVATAR_SEEDS.contains(&seed.trim()) {
            bail!(
                "Unknown avatar '{}'. Choose one of: {}",
                seed,
                AVATAR_SEEDS.join(", ")
            );
        }
    }

    let profile = worldsnap::PlayerProfile::new(&name, avatar.as_deref())?;
    let session = GameSession::onboard(
        app.store(),
        app.config.catalog(),
        profile,
        app.rng(None),
    )?;
    if let Some(warning) = session.profile_warning() {
        eprintln!("Warning: {}", warning);
    }

    let stats = session.stats();
    if stats.games_played == 0 && stats.current_xp == 0 {
        println!("Welcome, {}!", session.player().name);
    } else {
        println!(
            "Welcome back, {}! Level {} with {} games played.",
            session.player().name,
            stats.level,
            stats.games_played
        );
    }
    Ok(())
}
