//! Rewards provider: session, points and mint policy.
//!
//! # Data Flow
//! ```text
//! connect()       → WalletProvider (accounts, chain) → PointsLedger (load)
//!                 → TokenContract (symbol, balance)
//! grant_points(n) → PointsLedger (credit) → MintPolicy
//!                 → TokenContract (decimals, mint, confirm, balance)
//! every step      → Notifier (user-facing) + watch channel (state)
//! ```

pub mod error;
pub mod handle;
pub mod policy;
pub mod provider;
pub mod state;

pub use error::{RewardsError, RewardsResult};
pub use handle::RewardsHandle;
pub use policy::MintPolicy;
pub use provider::{GrantOutcome, MintOutcome, RewardsProvider};
pub use state::RewardsState;
