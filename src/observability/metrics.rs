//! Metrics collection.
//!
//! # Metrics
//! - `rewards_points_granted_total` (counter): points credited across all addresses
//! - `rewards_wallet_connects_total` (counter): connect attempts by outcome
//! - `rewards_mints_total` (counter): mint attempts by outcome
//! - `rewards_minting` (gauge): mints currently in flight

use metrics::{counter, gauge};

/// Record points credited to an address.
pub fn record_points_granted(amount: u64) {
    counter!("rewards_points_granted_total").increment(amount);
}

/// Record a wallet connect attempt.
pub fn record_connect(outcome: &'static str) {
    counter!("rewards_wallet_connects_total", "outcome" => outcome).increment(1);
}

/// Record a finished mint attempt.
pub fn record_mint(outcome: &'static str) {
    counter!("rewards_mints_total", "outcome" => outcome).increment(1);
}

/// Record the number of mints in flight.
pub fn record_minting(in_flight: usize) {
    gauge!("rewards_minting").set(in_flight as f64);
}
