//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → REWARDS_* environment overrides
//!     → validation.rs (semantic checks)
//!     → RewardsConfig (validated, immutable)
//! ```
//!
//! All fields have defaults so an empty file (or no file) is a valid config.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{ChainConfig, ObservabilityConfig, RewardsConfig, StorageConfig, TokenConfig};
