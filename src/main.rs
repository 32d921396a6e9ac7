use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use worldsnap::wallet::WalletKind;
use worldsnap::Guess;

mod cli;

#[derive(Parser)]
#[command(name = "worldsnap")]
#[command(about = "WorldSnap - guess where in the world a photo was taken")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.worldsnap/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the active profile, or switch to another player
    Profile {
        /// Player name (creates the player on first use)
        #[arg(long)]
        name: Option<String>,

        /// Avatar seed (player1 .. player12)
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Play a 5-round session
    Play {
        /// Shuffle seed for a reproducible location order
        #[arg(long)]
        seed: Option<u32>,

        /// Guess as LAT,LNG (repeatable; remaining rounds are read from stdin)
        #[arg(long = "guess", value_parser = cli::play::parse_guess, allow_hyphen_values = true)]
        guesses: Vec<Guess>,
    },

    /// Show the player dashboard
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Take the geography quiz
    Quiz {
        /// Answers as 1-based option numbers, e.g. 3,2,4
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
    },

    /// Manage the simulated wallet
    Wallet {
        #[command(subcommand)]
        command: Option<WalletCommands>,
    },

    /// Claim earned tokens to the connected wallet
    Claim,

    /// Show all players ranked by total score
    Leaderboard,
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Connect a wallet (minipay, celo or metamask)
    Connect { kind: WalletKind },

    /// Show the connected wallet
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let ephemeral = cli.ephemeral;
    let open = || cli::App::open(config_path.as_deref(), ephemeral);

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(config_path.clone(), force)?;
        }
        Some(Commands::Profile { name, avatar }) => {
            cli::profile::profile_command(&open()?, name, avatar)?;
        }
        Some(Commands::Play { seed, guesses }) => {
            cli::play::play_command(&open()?, seed, guesses)?;
        }
        Some(Commands::Stats { json }) => {
            cli::stats::stats_command(&open()?, json)?;
        }
        Some(Commands::Quiz { answers }) => {
            cli::quiz::quiz_command(&open()?, answers)?;
        }
        Some(Commands::Wallet { command }) => match command {
            Some(WalletCommands::Connect { kind }) => {
                cli::wallet::connect_command(&open()?, kind)?;
            }
            Some(WalletCommands::Status) | None => cli::wallet::status_command(&open()?)?,
        },
        Some(Commands::Claim) => {
            cli::wallet::claim_command(&open()?).await?;
        }
        Some(Commands::Leaderboard) => {
            cli::leaderboard::leaderboard_command(&open()?)?;
        }
        None => {
            // Default: show the dashboard
            cli::stats::stats_command(&open()?, false)?;
        }
    }

    Ok(())
}
