//! Simulated token rewards

use crate::scoring::MAX_ROUND_SCORE;

/// Tokens paid for a perfect round
pub const MAX_ROUND_REWARD: f64 = 0.5;

/// Token reward for a round. Nothing is paid without a connected wallet.
pub fn token_reward_for_score(score: u32, wallet_connected: bool) -> f64 {
    if wallet_connected {
        (f64::from(score) / f64::from(MAX_ROUND_SCORE)) * MAX_ROUND_REWARD
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wallet_no_reward() {
        assert_eq!(token_reward_for_score(1000, false), 0.0);
        assert_eq!(token_reward_for_score(50, false), 0.0);
    }

    #[test]
    fn test_reward_scales_with_score() {
        assert_eq!(token_reward_for_score(1000, true), 0.5);
        assert!((token_reward_for_score(500, true) - 0.25).abs() < 1e-12);
        assert!((token_reward_for_score(50, true) - 0.025).abs() < 1e-12);
    }
}
