//! Per-address points ledger.
//!
//! The ledger is a single JSON document stored under one key:
//!
//! ```text
//! {"version":1,"points":{"0xf39F...2266":105}}
//! ```
//!
//! Documents written before versioning were a bare `{address: points}` map.
//! Those are still read, and are rewritten in the current format on the next
//! write (or by [`PointsLedger::migrate`]).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError, StorageResult};

/// Current document format version.
pub const LEDGER_VERSION: u32 = 1;

/// The persisted ledger document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub version: u32,
    pub points: BTreeMap<Address, u64>,
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            version: LEDGER_VERSION,
            points: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Versioned(LedgerDocument),
    Legacy(BTreeMap<Address, u64>),
}

/// Reads and writes point totals through a [`KeyValueStore`].
///
/// Read-modify-write cycles are serialized, so concurrent credits through
/// the same ledger never lose updates. Writers outside this process are
/// still last writer wins.
pub struct PointsLedger {
    store: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl PointsLedger {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Storage key of the ledger document.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the whole document. A missing entry is an empty ledger.
    pub fn load(&self) -> StorageResult<LedgerDocument> {
        self.read().map(|(doc, _)| doc)
    }

    /// Stored points for `address` (0 if absent).
    pub fn points(&self, address: Address) -> StorageResult<u64> {
        Ok(self.load()?.points.get(&address).copied().unwrap_or(0))
    }

    /// Overwrite the stored points for `address`.
    pub fn set_points(&self, address: Address, value: u64) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let (mut doc, _) = self.read()?;
        doc.points.insert(address, value);
        self.write(&doc)
    }

    /// Add `amount` to the stored points for `address` and return the new total.
    pub fn credit(&self, address: Address, amount: u64) -> StorageResult<u64> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let (mut doc, _) = self.read()?;

        let current = doc.points.get(&address).copied().unwrap_or(0);
        let total = current
            .checked_add(amount)
            .ok_or_else(|| StorageError::Overflow(address.to_string()))?;

        doc.points.insert(address, total);
        self.write(&doc)?;

        tracing::debug!(%address, amount, total, "Points credited");
        Ok(total)
    }

    /// Rewrite a legacy document in the current format.
    ///
    /// Returns `true` if a legacy document was upgraded.
    pub fn migrate(&self) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let (doc, legacy) = self.read()?;
        if legacy {
            self.write(&doc)?;
            tracing::info!(key = %self.key, entries = doc.points.len(), "Migrated legacy points ledger");
        }
        Ok(legacy)
    }

    fn read(&self) -> StorageResult<(LedgerDocument, bool)> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok((LedgerDocument::default(), false));
        };

        let stored: StoredLedger =
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: self.key.clone(),
                source,
            })?;

        match stored {
            StoredLedger::Versioned(doc) if doc.version == LEDGER_VERSION => Ok((doc, false)),
            StoredLedger::Versioned(doc) => Err(StorageError::UnsupportedVersion(doc.version)),
            StoredLedger::Legacy(points) => Ok((
                LedgerDocument {
                    version: LEDGER_VERSION,
                    points,
                },
                true,
            )),
        }
    }

    fn write(&self, doc: &LedgerDocument) -> StorageResult<()> {
        let raw = serde_json::to_string(doc)?;
        self.store.set(&self.key, &raw)
    }
}

impl std::fmt::Debug for PointsLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsLedger").field("key", &self.key).finish()
    }
}
