//! When to mint, and how much.

use alloy::primitives::U256;

use crate::config::TokenConfig;
use crate::token::{whole_tokens, TokenResult};

/// Mint `reward_tokens` whole tokens each time the point total lands on a
/// positive multiple of `points_per_reward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintPolicy {
    points_per_reward: u64,
    reward_tokens: u64,
}

impl MintPolicy {
    pub fn new(points_per_reward: u64, reward_tokens: u64) -> Self {
        Self {
            points_per_reward,
            reward_tokens,
        }
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(config.points_per_reward, config.reward_tokens)
    }

    /// Whether a grant that produced `total` earns a mint.
    pub fn is_due(&self, total: u64) -> bool {
        self.points_per_reward > 0 && total > 0 && total % self.points_per_reward == 0
    }

    /// Mint amount in base units for a token with `decimals`.
    pub fn amount(&self, decimals: u8) -> TokenResult<U256> {
        whole_tokens(self.reward_tokens, decimals)
    }

    pub fn reward_tokens(&self) -> u64 {
        self.reward_tokens
    }

    pub fn points_per_reward(&self) -> u64 {
        self.points_per_reward
    }
}

impl Default for MintPolicy {
    fn default() -> Self {
        Self::from_config(&TokenConfig::default())
    }
}
