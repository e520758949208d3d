//! # Price Store
//!
//! Persistence of the single price-table record. Callers load a table once,
//! pass it by reference to every calculation, and save explicitly.
//!
//! Stores hand out owned copies: editing a loaded table never changes the
//! persisted snapshot until [`PriceStore::save`] is called. When nothing has
//! been saved yet, `load` returns the built-in table.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::prices::keys;
//! use calc_core::store::{MemoryStore, PriceStore};
//!
//! let mut store = MemoryStore::new();
//! let mut prices = store.load().unwrap();
//! prices.set_material_price(keys::DRILL_BIT.name, 5_500.0);
//!
//! // not saved yet
//! assert_eq!(store.load().unwrap().material_price(keys::DRILL_BIT), 5_000.0);
//!
//! store.save(&prices).unwrap();
//! assert_eq!(store.load().unwrap().material_price(keys::DRILL_BIT), 5_500.0);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::file_io::{load_price_record, save_price_record, FileLock};
use crate::prices::PriceTable;

/// Current schema version for price files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Fixed identifier of the one persisted record
pub const DEFAULT_RECORD_ID: &str = "default";

/// The persisted record: identifier, schema version and the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(default = "default_record_id")]
    pub id: String,

    #[serde(default = "default_version")]
    pub version: String,

    pub prices: PriceTable,
}

fn default_record_id() -> String {
    DEFAULT_RECORD_ID.to_string()
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl PriceRecord {
    /// Wrap a table in the default record
    pub fn new(prices: PriceTable) -> Self {
        PriceRecord {
            id: default_record_id(),
            version: default_version(),
            prices,
        }
    }
}

impl Default for PriceRecord {
    fn default() -> Self {
        PriceRecord::new(PriceTable::default())
    }
}

/// Load/save access to the persisted price table.
pub trait PriceStore {
    /// An owned copy of the persisted table, or the built-in table when
    /// nothing has been saved.
    fn load(&self) -> CalcResult<PriceTable>;

    /// Fully replace the persisted table and return the stored copy.
    fn save(&mut self, prices: &PriceTable) -> CalcResult<PriceTable>;

    /// Replace the persisted table with the built-in one.
    fn reset(&mut self) -> CalcResult<PriceTable> {
        self.save(&PriceTable::reset())
    }
}

/// In-memory store, for single-session use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<PriceTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store that already holds a saved table
    pub fn with_prices(prices: PriceTable) -> Self {
        MemoryStore {
            snapshot: Some(prices),
        }
    }
}

impl PriceStore for MemoryStore {
    fn load(&self) -> CalcResult<PriceTable> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, prices: &PriceTable) -> CalcResult<PriceTable> {
        self.snapshot = Some(prices.clone());
        Ok(prices.clone())
    }
}

/// JSON-file store with atomic saves and a writer lock.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    user_id: String,
}

impl FileStore {
    /// Store backed by `path`; `user_id` is recorded in the lock file.
    pub fn new(path: impl Into<PathBuf>, user_id: impl Into<String>) -> Self {
        FileStore {
            path: path.into(),
            user_id: user_id.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full persisted record, or a default record when none exists.
    pub fn load_record(&self) -> CalcResult<PriceRecord> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved price table, using built-in table");
            return Ok(PriceRecord::default());
        }
        load_price_record(&self.path)
    }
}

impl PriceStore for FileStore {
    fn load(&self) -> CalcResult<PriceTable> {
        Ok(self.load_record()?.prices)
    }

    fn save(&mut self, prices: &PriceTable) -> CalcResult<PriceTable> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CalcError::store_unavailable(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let _lock = FileLock::acquire(&self.path, self.user_id.clone())?;
        save_price_record(&PriceRecord::new(prices.clone()), &self.path)?;
        Ok(load_price_record(&self.path)?.prices)
    }
}
