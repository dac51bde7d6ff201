//! Key-backed wallet for headless use.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::config::ChainConfig;
use crate::wallet::types::{ChainId, WalletError, WalletResult};
use crate::wallet::WalletProvider;

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "REWARDS_PRIVATE_KEY";

/// A wallet made of a local signing key and a JSON-RPC endpoint.
///
/// The chain is whatever the endpoint serves, so switching networks is not
/// possible; a mismatch is reported and left to the caller.
#[derive(Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
    provider: DynProvider,
    rpc_url: String,
    timeout_secs: u64,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `config` - RPC endpoint and timeout
    pub fn from_private_key(private_key_hex: &str, config: &ChainConfig) -> WalletResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::Key(format!("Invalid private key format: {}", e)))?;

        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            WalletError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(url)
            .erased();

        tracing::info!(
            address = %signer.address(),
            rpc_url = %config.rpc_url,
            "Local wallet initialized"
        );

        Ok(Self {
            signer,
            provider,
            rpc_url: config.rpc_url.clone(),
            timeout_secs: config.rpc_timeout_secs,
        })
    }

    /// Load the wallet key from `REWARDS_PRIVATE_KEY`.
    ///
    /// Returns `Ok(None)` when the variable is not set, which the rewards
    /// provider treats as "no wallet installed".
    pub fn from_env(config: &ChainConfig) -> WalletResult<Option<Self>> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) => Self::from_private_key(key.trim(), config).map(Some),
            Err(_) => {
                tracing::debug!(var = PRIVATE_KEY_ENV_VAR, "No wallet key in environment");
                Ok(None)
            }
        }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signing provider, shared with the token client.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        Ok(vec![self.signer.address()])
    }

    async fn chain_id(&self) -> WalletResult<ChainId> {
        let fut = self.provider.get_chain_id();
        match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(WalletError::Rpc(e.to_string())),
            Err(_) => Err(WalletError::Timeout(self.timeout_secs)),
        }
    }

    async fn switch_chain(&self, chain_id: ChainId) -> WalletResult<()> {
        let current = self.chain_id().await?;
        if current == chain_id {
            return Ok(());
        }

        tracing::warn!(
            requested = %chain_id.to_hex(),
            current = %current.to_hex(),
            "Local wallet cannot switch chains"
        );
        Err(WalletError::SwitchUnsupported {
            requested: chain_id,
            current,
        })
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.signer.address())
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
