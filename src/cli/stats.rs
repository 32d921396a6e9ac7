//! Stats command: the player dashboard

use anyhow::Result;
use serde::Serialize;

use worldsnap::stats::{Badge, LevelProgress, PlayerStats, BADGES};
use worldsnap::store::load_or_default;
use worldsnap::PlayerProfile;

use super::App;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport<'a> {
    profile: &'a PlayerProfile,
    stats: &'a PlayerStats,
    accuracy: u32,
    rank: u64,
    level_progress: LevelProgress,
    wallet_connected: bool,
}

pub fn stats_command(app: &App, json: bool) -> Result<()> {
    let profile = app.active_profile()?;
    let stats = load_or_default(app.store(), &profile.name)?;
    let wallet = app.store().load_wallet()?;

    if json {
        let report = StatsReport {
            profile: &profile,
            stats: &stats,
            accuracy: stats.accuracy(),
            rank: stats.rank(),
            level_progress: stats.level_progress(),
            wallet_connected: wallet.is_some(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let progress = stats.level_progress();
    println!("{} ({})", profile.name, profile.avatar_seed);
    println!(
        "  Level {}  {}/{} XP ({:.0}%)",
        progress.level,
        progress.total_xp,
        progress.next_level_xp,
        progress.progress_to_next() * 100.0
    );
    println!("  Games played:   {}", stats.games_played);
    println!("  Total score:    {}", stats.total_score);
    println!("  Best round:     {}", stats.best_score);
    println!("  Accuracy:       {}%", stats.accuracy());
    println!("  Rank:           #{}", stats.rank());
    println!("  Streak:         {} day(s)", stats.current_streak);
    if let Some(last) = stats.last_played {
        println!(
            "  Last played:    {}",
            last.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        );
    }
    println!(
        "  Tokens:         {:.2} earned, {:.2} available",
        stats.total_earned, stats.available_to_claim
    );
    match wallet {
        Some(connection) => println!("  Wallet:         {}", connection.kind),
        None => println!("  Wallet:         not connected"),
    }

    println!("\nBadges ({}/{}):", stats.unlocked_badges.len(), BADGES.len());
    for badge in BADGES {
        println!("  {}", badge_line(badge, stats.has_badge(badge.id)));
    }
    Ok(())
}

fn badge_line(badge: &Badge, unlocked: bool) -> String {
    let marker = if unlocked { "x" } else { " " };
    format!(
        "[{}] {} {:<14} {}",
        marker, badge.icon, badge.name, badge.description
    )
}
