//! ERC-20 reward token client.
//!
//! # Responsibilities
//! - Read token metadata and balances
//! - Submit `mint` transactions through the wallet's signing provider
//! - Monitor mint confirmation
//! - Bound every RPC call with a timeout

use std::future::Future;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::sol;
use async_trait::async_trait;
use tokio::time::{interval, timeout};

use crate::token::{TokenContract, TokenError, TokenResult};

sol! {
    /// Mintable ERC-20 surface of the reward token.
    #[sol(rpc)]
    interface IRewardToken {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function mint(address to, uint256 amount) external;
    }
}

/// Reward token bound to a contract address and a signing provider.
#[derive(Clone)]
pub struct Erc20Token {
    contract: IRewardToken::IRewardTokenInstance<DynProvider>,
    provider: DynProvider,
    timeout_secs: u64,
    confirmation_timeout_secs: u64,
    poll_interval: Duration,
}

impl Erc20Token {
    /// Create a token client.
    ///
    /// # Arguments
    /// * `address` - Token contract address
    /// * `provider` - Provider able to sign (used for `mint`)
    /// * `timeout_secs` - Per-call RPC timeout
    /// * `confirmation_timeout_secs` - Maximum time to wait for a mint to be mined
    pub fn new(
        address: Address,
        provider: DynProvider,
        timeout_secs: u64,
        confirmation_timeout_secs: u64,
    ) -> Self {
        Self {
            contract: IRewardToken::new(address, provider.clone()),
            provider,
            timeout_secs,
            confirmation_timeout_secs,
            poll_interval: Duration::from_secs(2),
        }
    }

    /// Override how often receipts are polled.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn bounded<T, E, F>(&self, fut: F, on_error: fn(String) -> TokenError) -> TokenResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(Duration::from_secs(self.timeout_secs), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(on_error(e.to_string())),
            Err(_) => Err(TokenError::Timeout(self.timeout_secs)),
        }
    }
}

#[async_trait]
impl TokenContract for Erc20Token {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn symbol(&self) -> TokenResult<String> {
        self.bounded(async { self.contract.symbol().call().await }, TokenError::Call)
            .await
    }

    async fn decimals(&self) -> TokenResult<u8> {
        self.bounded(async { self.contract.decimals().call().await }, TokenError::Call)
            .await
    }

    async fn balance_of(&self, owner: Address) -> TokenResult<U256> {
        self.bounded(async { self.contract.balanceOf(owner).call().await }, TokenError::Call)
            .await
    }

    async fn mint(&self, to: Address, amount: U256) -> TokenResult<TxHash> {
        let pending = self
            .bounded(
                async { self.contract.mint(to, amount).send().await },
                TokenError::Call,
            )
            .await?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            token = %self.address(),
            to = %to,
            amount = %amount,
            tx_hash = %tx_hash,
            "Mint submitted"
        );
        Ok(tx_hash)
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> TokenResult<()> {
        let result = timeout(
            Duration::from_secs(self.confirmation_timeout_secs),
            async {
                let mut ticker = interval(self.poll_interval);

                loop {
                    ticker.tick().await;

                    let receipt = match self
                        .bounded(self.provider.get_transaction_receipt(tx_hash), TokenError::Rpc)
                        .await
                    {
                        Ok(Some(receipt)) => receipt,
                        Ok(None) => {
                            tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                            continue;
                        }
                        Err(TokenError::Timeout(secs)) => {
                            tracing::warn!(tx_hash = %tx_hash, timeout_secs = secs, "Receipt poll timed out");
                            continue;
                        }
                        Err(e) => return Err(e),
                    };

                    if !receipt.status() {
                        return Err(TokenError::Reverted(tx_hash));
                    }

                    tracing::info!(
                        tx_hash = %tx_hash,
                        block_number = ?receipt.block_number,
                        "Mint confirmed"
                    );
                    return Ok(());
                }
            },
        )
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(TokenError::ConfirmationTimeout(tx_hash)),
        }
    }
}

impl std::fmt::Debug for Erc20Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Erc20Token")
            .field("address", self.contract.address())
            .field("timeout_secs", &self.timeout_secs)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .finish()
    }
}
