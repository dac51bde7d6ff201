//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RewardsConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::wallet::ChainId;

/// Token contract address override.
pub const TOKEN_ADDRESS_ENV_VAR: &str = "REWARDS_TOKEN_ADDRESS";
/// Target chain ID override, decimal or `0x` hex.
pub const CHAIN_ID_ENV_VAR: &str = "REWARDS_CHAIN_ID";
/// RPC endpoint override.
pub const RPC_URL_ENV_VAR: &str = "REWARDS_RPC_URL";
/// Store file path override.
pub const STORE_PATH_ENV_VAR: &str = "REWARDS_STORE_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<RewardsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RewardsConfig = toml::from_str(&content)?;
    finalize(config)
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<RewardsConfig, ConfigError> {
    finalize(RewardsConfig::default())
}

fn finalize(mut config: RewardsConfig) -> Result<RewardsConfig, ConfigError> {
    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `REWARDS_*` environment variables on top of `config`.
pub fn apply_env_overrides(config: &mut RewardsConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |var| std::env::var(var).ok())
}

/// Apply overrides from an arbitrary variable lookup.
pub fn apply_overrides<F>(config: &mut RewardsConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(address) = lookup(TOKEN_ADDRESS_ENV_VAR) {
        config.token.address = address;
    }

    if let Some(value) = lookup(CHAIN_ID_ENV_VAR) {
        config.chain.chain_id = parse_chain_id(value.trim()).ok_or(ConfigError::Env {
            var: CHAIN_ID_ENV_VAR,
            value,
        })?;
    }

    if let Some(url) = lookup(RPC_URL_ENV_VAR) {
        config.chain.rpc_url = url;
    }

    if let Some(path) = lookup(STORE_PATH_ENV_VAR) {
        config.storage.path = path;
    }

    Ok(())
}

fn parse_chain_id(value: &str) -> Option<u64> {
    if value.starts_with("0x") || value.starts_with("0X") {
        ChainId::from_hex(value).ok().map(u64::from)
    } else {
        value.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = RewardsConfig::default();
        let lookup = lookup_from(&[
            (TOKEN_ADDRESS_ENV_VAR, "0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            (CHAIN_ID_ENV_VAR, "31337"),
        ]);

        apply_overrides(&mut config, lookup).unwrap();
        assert_eq!(config.chain.chain_id, 31337);
        assert!(config.token.is_enabled());
        assert_eq!(config.storage.key, "finora_points");
    }

    #[test]
    fn test_bad_chain_id_override() {
        let mut config = RewardsConfig::default();
        let err = apply_overrides(&mut config, lookup_from(&[(CHAIN_ID_ENV_VAR, "sepolia")]))
            .unwrap_err();
        assert!(err.to_string().contains(CHAIN_ID_ENV_VAR));
    }

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rewards_{}_{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_hex_chain_id_override() {
        let mut config = RewardsConfig::default();
        apply_overrides(&mut config, lookup_from(&[(CHAIN_ID_ENV_VAR, "0x7a69")])).unwrap();
        assert_eq!(config.chain.chain_id, 31337);

        let err = apply_overrides(&mut config, lookup_from(&[(CHAIN_ID_ENV_VAR, "0xzz")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { .. }));
    }

    #[test]
    fn test_load_config_file() {
        let path = temp_config(
            "config",
            "[chain]\nchain_id = 31337\n\n[token]\npoints_per_reward = 50\n\n[storage]\nkey = \"points\"\n",
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.token.points_per_reward, 50);
        assert_eq!(config.token.default_symbol, "FNR");
        assert_eq!(config.storage.key, "points");

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let path = temp_config(
            "invalid_config",
            "[token]\npoints_per_reward = 0\n\n[storage]\nkey = \"\"\n",
        );

        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::ZeroRewardThreshold));
                assert!(errors.contains(&ValidationError::EmptyStorageKey));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_errors() {
        let missing = std::env::temp_dir().join("rewards_missing_config.toml");
        assert!(matches!(load_config(&missing), Err(ConfigError::Io(_))));

        let path = temp_config("malformed_config", "[chain\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_from_env_defaults() {
        let config = load_from_env().unwrap();
        assert_eq!(config.token.points_per_reward, 100);
        assert_eq!(config.storage.key, "finora_points");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroChainId,
            ValidationError::EmptyStorageKey,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: chain.chain_id must be greater than zero, storage.key must not be empty"
        );
    }
}
