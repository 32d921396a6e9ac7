//! Wallet commands: connecting a wallet and claiming rewards

use anyhow::{bail, Result};

use worldsnap::wallet::{WalletConnection, WalletKind};

use super::App;

pub fn connect_command(app: &App, kind: WalletKind) -> Result<()> {
    let connection = WalletConnection::new(kind);
    app.store().save_wallet(&connection)?;
    println!("Connected {}", connection.kind);
    Ok(())
}

pub fn status_command(app: &App) -> Result<()> {
    match app.store().load_wallet()? {
        Some(connection) => println!(
            "{} (connected {})",
            connection.kind,
            connection
                .connected_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ),
        None => println!("No wallet connected. Try `worldsnap wallet connect minipay`."),
    }
    Ok(())
}

/// Claim the whole available balance through the simulated wallet
pub async fn claim_command(app: &App) -> Result<()> {
    let wallet = app.wallet()?;
    if !wallet.is_connected() {
        bail!("No wallet connected. Run `worldsnap wallet connect <minipay|celo|metamask>` first.");
    }

    let mut session = app.load_session(None)?;
    let amount = session.stats().available_to_claim;
    if amount <= 0.0 {
        println!("Nothing to claim yet. Play a session with your wallet connected.");
        return Ok(());
    }

    println!("Claiming {:.2} tokens... confirm in your wallet", amount);
    let claim = session.claim_rewards(&wallet).await?;
    println!("Transaction confirmed: {}", claim.receipt.tx_hash);
    println!(
        "  {:.2} tokens sent to {}",
        claim.receipt.amount, claim.receipt.wallet
    );
    if let Some(warning) = claim.persistence_warning {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}
