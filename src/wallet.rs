//! Simulated wallet connection and reward claims
//!
//! Nothing here talks to a ledger. A claim walks through the same
//! confirming → processing → success steps a real transaction would show,
//! with configurable delays, and produces a fake transaction hash.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::WalletSettings;
use crate::error::{GameError, GameResult};
use crate::stats::PlayerStats;

/// Supported wallet providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    MiniPay,
    Celo,
    MetaMask,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MiniPay => "minipay",
            Self::Celo => "celo",
            Self::MetaMask => "metamask",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MiniPay => "MiniPay",
            Self::Celo => "Celo Wallet",
            Self::MetaMask => "MetaMask",
        }
    }
}

impl std::str::FromStr for WalletKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minipay" => Ok(Self::MiniPay),
            "celo" => Ok(Self::Celo),
            "metamask" => Ok(Self::MetaMask),
            other => Err(format!(
                "Unknown wallet '{}' (expected minipay, celo or metamask)",
                other
            )),
        }
    }
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A persisted wallet connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConnection {
    pub kind: WalletKind,
    pub connected_at: DateTime<Utc>,
}

impl WalletConnection {
    pub fn new(kind: WalletKind) -> Self {
        Self {
            kind,
            connected_at: Utc::now(),
        }
    }
}

/// Steps a simulated transaction goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    Confirming,
    Processing,
    Success,
}

/// Result of a completed simulated transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub wallet: WalletKind,
    pub amount: f64,
    pub tx_hash: String,
    pub state: TransactionState,
    pub completed_at: DateTime<Utc>,
}

/// Fake transaction hash: `0x` followed by 64 hex digits
pub fn fake_tx_hash() -> String {
    format!(
        "0x{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Mock wallet that "sends" transactions after a delay
#[derive(Debug, Clone)]
pub struct WalletSimulator {
    connection: Option<WalletConnection>,
    confirm_delay: Duration,
    processing_delay: Duration,
}

impl WalletSimulator {
    pub fn new(settings: &WalletSettings, connection: Option<WalletConnection>) -> Self {
        Self {
            connection,
            confirm_delay: Duration::from_millis(settings.confirm_delay_ms),
            processing_delay: Duration::from_millis(settings.processing_delay_ms),
        }
    }

    /// A simulator with no delays
    pub fn instant(connection: Option<WalletConnection>) -> Self {
        Self {
            connection,
            confirm_delay: Duration::ZERO,
            processing_delay: Duration::ZERO,
        }
    }

    pub fn connect(&mut self, kind: WalletKind) -> &WalletConnection {
        info!(wallet = kind.as_str(), "Wallet connected");
        self.connection.insert(WalletConnection::new(kind))
    }

    pub fn connection(&self) -> Option<&WalletConnection> {
        self.connection.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Run a simulated transfer of `amount` to the connected wallet
    pub async fn transfer(&self, amount: f64) -> GameResult<TransactionReceipt> {
        let connection = self
            .connection
            .as_ref()
            .ok_or(GameError::WalletNotConnected)?;

        debug!(amount, state = "confirming", "Simulated transaction");
        tokio::time::sleep(self.confirm_delay).await;

        let tx_hash = fake_tx_hash();
        debug!(amount, state = "processing", tx = %tx_hash, "Simulated transaction");
        tokio::time::sleep(self.processing_delay).await;

        info!(amount, tx = %tx_hash, wallet = connection.kind.as_str(), "Simulated transaction succeeded");
        Ok(TransactionReceipt {
            wallet: connection.kind,
            amount,
            tx_hash,
            state: TransactionState::Success,
            completed_at: Utc::now(),
        })
    }
}

/// Claim the player's whole available balance.
///
/// The balance is zeroed only once the simulated transaction has finished,
/// in a single mutation; `total_earned` is not touched.
pub async fn claim_rewards(
    wallet: &WalletSimulator,
    stats: &mut PlayerStats,
) -> GameResult<TransactionReceipt> {
    if !wallet.is_connected() {
        return Err(GameError::WalletNotConnected);
    }
    if stats.available_to_claim <= 0.0 {
        return Err(GameError::NothingToClaim);
    }

    let receipt = wallet.transfer(stats.available_to_claim).await?;
    stats.claim()?;
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_kind_parsing() {
        assert_eq!("MiniPay".parse::<WalletKind>(), Ok(WalletKind::MiniPay));
        assert_eq!(" metamask ".parse::<WalletKind>(), Ok(WalletKind::MetaMask));
        assert!("ledger".parse::<WalletKind>().is_err());
    }

    #[test]
    fn test_fake_tx_hash_shape() {
        let hash = fake_tx_hash();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66);
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_claim_requires_connection() {
        let wallet = WalletSimulator::instant(None);
        let mut stats = PlayerStats::default();
        stats.credit_tokens(1.0);
        assert_eq!(
            claim_rewards(&wallet, &mut stats).await,
            Err(GameError::WalletNotConnected)
        );
        assert_eq!(stats.available_to_claim, 1.0);
    }

    #[tokio::test]
    async fn test_claim_empty_balance() {
        let mut wallet = WalletSimulator::instant(None);
        wallet.connect(WalletKind::Celo);
        let mut stats = PlayerStats::default();
        assert_eq!(
            claim_rewards(&wallet, &mut stats).await,
            Err(GameError::NothingToClaim)
        );
    }

    #[tokio::test]
    async fn test_claim_zeroes_available_only() {
        let mut wallet = WalletSimulator::instant(None);
        wallet.connect(WalletKind::MiniPay);
        let mut stats = PlayerStats::default();
        stats.credit_tokens(0.75);

        let receipt = claim_rewards(&wallet, &mut stats).await.unwrap();
        assert_eq!(receipt.amount, 0.75);
        assert_eq!(receipt.wallet, WalletKind::MiniPay);
        assert_eq!(receipt.state, TransactionState::Success);
        assert_eq!(stats.available_to_claim, 0.0);
        assert_eq!(stats.total_earned, 0.75);
    }
}
