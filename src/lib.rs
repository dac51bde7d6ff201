//! Wallet-linked rewards tracker.
//!
//! Tracks loyalty points per wallet address in local storage and mints a
//! reward token on-chain each time a point threshold is reached.

pub mod config;
pub mod notifications;
pub mod observability;
pub mod rewards;
pub mod storage;
pub mod token;
pub mod wallet;

pub use config::RewardsConfig;
pub use notifications::{Notification, Notifier};
pub use rewards::{GrantOutcome, MintOutcome, RewardsHandle, RewardsProvider, RewardsState};
