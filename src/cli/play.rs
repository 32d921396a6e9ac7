//! Play command: one full 5-round session

use anyhow::{bail, Result};

use worldsnap::session::{Advance, RoundOutcome, ROUNDS_PER_SESSION};
use worldsnap::stats::Badge;
use worldsnap::Guess;

use super::{read_line, App};

/// Parse a `lat,lng` pair
pub fn parse_guess(s: &str) -> Result<Guess, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(format!("coordinates must be finite: '{}'", s));
    }
    Ok(Guess::new(lat, lng))
}

/// Play a session. Guesses come from `guesses` first, then stdin.
pub fn play_command(app: &App, seed: Option<u32>, guesses: Vec<Guess>) -> Result<()> {
    let mut session = app.load_session(seed)?;
    let mut guesses = guesses.into_iter();

    let mut location = session.start_session()?.clone();
    let mut round = 0;

    loop {
        println!("\nRound {}/{}: {}", round + 1, ROUNDS_PER_SESSION, location.name);
        if !location.image_url.is_empty() {
            println!("  Photo: {}", location.image_url);
        }

        let guess = match guesses.next() {
            Some(guess) => guess,
            None => next_stdin_guess()?,
        };

        let outcome = session.submit_guess(guess)?;
        print_round(&outcome);

        match session.advance_round()? {
            Advance::NextRound {
                round: next,
                location: next_location,
            } => {
                round = next;
                location = next_location;
            }
            Advance::Complete(summary) => {
                println!("\nSession complete! Total score: {}", summary.total_score);
                if let Some(best) = summary.best_round() {
                    println!(
                        "  Best round: {} ({} points, {:.1} km off)",
                        best.location.name, best.score, best.distance_km
                    );
                }
                let stats = session.stats();
                println!(
                    "  Level {} | {} XP | {} games played",
                    stats.level, stats.current_xp, stats.games_played
                );
                break;
            }
        }
    }

    Ok(())
}

fn next_stdin_guess() -> Result<Guess> {
    loop {
        let Some(line) = read_line("Your guess (lat,lng): ")? else {
            bail!("Ran out of guesses before the session finished");
        };
        match parse_guess(&line) {
            Ok(guess) => return Ok(guess),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn print_round(outcome: &RoundOutcome) {
    let result = &outcome.result;
    let progress = &outcome.progress;

    println!(
        "  {:.1} km away: {} points (+{} XP)",
        result.distance_km, result.score, progress.xp_gained
    );
    if progress.token_reward > 0.0 {
        println!("  +{:.2} tokens", progress.token_reward);
    }
    println!("  Session score: {}", outcome.session_score);

    if let Some(level_up) = &progress.level_up {
        println!("  Level up! {} -> {}", level_up.old_level, level_up.new_level);
    }
    for id in &progress.new_badges {
        let badge = Badge::get(*id);
        println!("  Badge unlocked: {} {}", badge.icon, badge.name);
    }
    if let Some(warning) = &outcome.persistence_warning {
        eprintln!("  Warning: {}", warning);
    }
}
