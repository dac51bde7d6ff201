//! Observable provider state.

use alloy::primitives::{Address, U256};

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardsState {
    /// Connected account, if any.
    pub address: Option<Address>,
    /// Points for the connected account.
    pub points: u64,
    /// Token symbol (configured default until the contract answers).
    pub token_symbol: String,
    /// Raw token balance of the connected account, in base units.
    pub token_balance: U256,
    /// Decimals used to display `token_balance`.
    pub token_decimals: u8,
    /// At least one mint is in flight.
    pub is_minting: bool,
}

impl RewardsState {
    pub fn new(default_symbol: impl Into<String>, default_decimals: u8) -> Self {
        Self {
            address: None,
            points: 0,
            token_symbol: default_symbol.into(),
            token_balance: U256::ZERO,
            token_decimals: default_decimals,
            is_minting: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}
