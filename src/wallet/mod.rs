//! Wallet abstraction.
//!
//! # Data Flow
//! ```text
//! WalletProvider (injected)
//!     → request_accounts  (eth_requestAccounts)
//!     → chain_id          (eth_chainId)
//!     → switch_chain      (wallet_switchEthereumChain)
//! ```
//!
//! The rewards provider only sees the trait; [`LocalWallet`] is the
//! key-backed implementation used by the CLI.

pub mod local;
pub mod types;

use alloy::primitives::Address;
use async_trait::async_trait;

pub use local::{LocalWallet, PRIVATE_KEY_ENV_VAR};
pub use types::{ChainId, WalletError, WalletResult};

/// The capabilities the rewards provider needs from a wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet for its accounts. The first one is the active account.
    async fn request_accounts(&self) -> WalletResult<Vec<Address>>;

    /// The chain the wallet is currently on.
    async fn chain_id(&self) -> WalletResult<ChainId>;

    /// Ask the wallet to move to `chain_id`.
    async fn switch_chain(&self, chain_id: ChainId) -> WalletResult<()>;
}
