//! Chain-specific types and wallet error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Parse a `0x`-prefixed hex quantity as returned by `eth_chainId`.
    pub fn from_hex(value: &str) -> WalletResult<Self> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| WalletError::InvalidChainId(value.to_string()))
    }

    /// Encode as the hex quantity expected by `wallet_switchEthereumChain`.
    pub fn to_hex(self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur while talking to a wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user (or wallet) refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The wallet cannot move to the requested chain.
    #[error("Cannot switch to chain {requested}: wallet is bound to chain {current}")]
    SwitchUnsupported { requested: ChainId, current: ChainId },

    /// A chain ID quantity could not be decoded.
    #[error("Invalid chain ID: {0}")]
    InvalidChainId(String),

    /// Invalid private key format or missing key.
    #[error("Key error: {0}")]
    Key(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;
