//! Reward token contract access.
//!
//! # Data Flow
//! ```text
//! RewardsProvider
//!     → TokenContract (trait)
//!     → erc20.rs (alloy sol! bindings, timeouts, receipt polling)
//!     → JSON-RPC endpoint
//! ```

pub mod erc20;
pub mod units;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use thiserror::Error;

pub use erc20::Erc20Token;
pub use units::{format_units, whole_tokens};

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Contract call or transaction submission failed.
    #[error("Contract call failed: {0}")]
    Call(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not mined within the allowed time.
    #[error("Transaction {0} not confirmed in time")]
    ConfirmationTimeout(TxHash),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Amount cannot be represented.
    #[error("Amount overflow: {0}")]
    Overflow(String),
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// The token contract surface used by the rewards provider.
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Contract address.
    fn address(&self) -> Address;

    /// Display symbol (`symbol()`).
    async fn symbol(&self) -> TokenResult<String>;

    /// Decimal count (`decimals()`).
    async fn decimals(&self) -> TokenResult<u8>;

    /// Raw balance of `owner` (`balanceOf(owner)`).
    async fn balance_of(&self, owner: Address) -> TokenResult<U256>;

    /// Submit `mint(to, amount)` and return the transaction hash.
    async fn mint(&self, to: Address, amount: U256) -> TokenResult<TxHash>;

    /// Wait until `tx_hash` is mined successfully.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> TokenResult<()>;
}
