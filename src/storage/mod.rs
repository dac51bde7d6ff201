//! Local key-value storage and the points ledger built on it.
//!
//! # Data Flow
//! ```text
//! RewardsProvider
//!     → ledger.rs (versioned points document, read-modify-write)
//!     → KeyValueStore (memory.rs | file.rs)
//! ```

pub mod file;
pub mod ledger;
pub mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use ledger::{LedgerDocument, PointsLedger, LEDGER_VERSION};
pub use memory::MemoryStore;

/// Errors raised by stores and the ledger.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt document under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported ledger version {0}")]
    UnsupportedVersion(u32),

    #[error("Point total overflow for {0}")]
    Overflow(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value storage with browser `localStorage` semantics.
///
/// Implementations must be safe to share across tasks; writes are last
/// writer wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;
}
