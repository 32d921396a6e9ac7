//! Leaderboard command

use anyhow::Result;

use worldsnap::store::leaderboard;

use super::App;

pub fn leaderboard_command(app: &App) -> Result<()> {
    let entries = leaderboard(app.store())?;
    if entries.is_empty() {
        println!("No players yet.");
        return Ok(());
    }

    let active = app.store().load_active_profile()?.map(|p| p.name);

    println!("{:>4}  {:<20} {:>10} {:>6} {:>6}", "#", "Player", "Score", "Level", "Games");
    for entry in entries {
        let marker = if active.as_deref() == Some(entry.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{:>4}{} {:<20} {:>10} {:>6} {:>6}",
            entry.position, marker, entry.name, entry.total_score, entry.level, entry.games_played
        );
    }
    Ok(())
}
