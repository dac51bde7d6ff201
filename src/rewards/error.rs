//! Error types for the rewards provider.

use crate::storage::StorageError;

/// Errors surfaced to callers of the rewards provider.
///
/// Wallet, network and mint failures are not here: the provider turns them
/// into notifications and keeps its prior state.
#[derive(Debug, thiserror::Error)]
pub enum RewardsError {
    /// The points ledger could not be read or written.
    #[error("points storage failed: {0}")]
    Storage(#[from] StorageError),

    /// A [`RewardsHandle`](crate::rewards::RewardsHandle) was used after its
    /// provider went away, or was never attached to one.
    #[error("rewards handle used outside of a RewardsProvider")]
    OutsideProvider,
}

/// Result type for rewards operations.
pub type RewardsResult<T> = Result<T, RewardsError>;
