//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (chain ID, reward threshold)
//! - Check that addresses and URLs parse
//!
//! Returns all validation errors, not just the first.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::RewardsConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("token.address '{0}' is not a valid address")]
    InvalidTokenAddress(String),

    #[error("chain.chain_id must be greater than zero")]
    ZeroChainId,

    #[error("chain.rpc_url '{0}' is not a valid URL")]
    InvalidRpcUrl(String),

    #[error("token.points_per_reward must be greater than zero")]
    ZeroRewardThreshold,

    #[error("storage.key must not be empty")]
    EmptyStorageKey,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RewardsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.token.is_enabled() && config.token.address.trim().parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidTokenAddress(config.token.address.clone()));
    }

    if config.chain.chain_id == 0 {
        errors.push(ValidationError::ZeroChainId);
    }

    if url::Url::parse(&config.chain.rpc_url).is_err() {
        errors.push(ValidationError::InvalidRpcUrl(config.chain.rpc_url.clone()));
    }

    if config.token.points_per_reward == 0 {
        errors.push(ValidationError::ZeroRewardThreshold);
    }

    if config.storage.key.is_empty() {
        errors.push(ValidationError::EmptyStorageKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&RewardsConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RewardsConfig::default();
        config.token.address = "not-an-address".to_string();
        config.chain.chain_id = 0;
        config.token.points_per_reward = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroChainId));
        assert!(errors.contains(&ValidationError::ZeroRewardThreshold));
    }

    #[test]
    fn test_bad_rpc_url() {
        let mut config = RewardsConfig::default();
        config.chain.rpc_url = "::nope".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidRpcUrl(_)));
    }
}
