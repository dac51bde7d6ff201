//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the rewards
//! tracker. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the rewards tracker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RewardsConfig {
    /// Target chain and RPC settings.
    pub chain: ChainConfig,

    /// Reward token and mint policy settings.
    pub token: TokenConfig,

    /// Points ledger storage settings.
    pub storage: StorageConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target chain configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain ID the wallet should be on (11155111 = Sepolia).
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 11_155_111,
            rpc_url: "http://localhost:8545".to_string(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Reward token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token contract address. Empty disables minting.
    pub address: String,

    /// Symbol shown until the contract reports its own.
    pub default_symbol: String,

    /// Decimals assumed when `decimals()` cannot be read.
    pub default_decimals: u8,

    /// A mint is due every time the total reaches a multiple of this.
    pub points_per_reward: u64,

    /// Whole tokens minted per reward.
    pub reward_tokens: u64,

    /// Maximum time to wait for a mint to be mined, in seconds.
    pub confirmation_timeout_secs: u64,
}

impl TokenConfig {
    /// Whether a token contract is configured.
    pub fn is_enabled(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            default_symbol: "FNR".to_string(),
            default_decimals: 18,
            points_per_reward: 100,
            reward_tokens: 1,
            confirmation_timeout_secs: 120,
        }
    }
}

/// Points ledger storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON file backing the key-value store.
    pub path: String,

    /// Key the ledger document is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "rewards-store.json".to_string(),
            key: "finora_points".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
