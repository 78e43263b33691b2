pub mod json_backend;

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, RwLock,
};

use crate::errors::{ExpenseError, Result};

pub use json_backend::JsonFileStore;

/// Slot name the ledger is stored under unless configured otherwise.
pub const DEFAULT_SLOT: &str = "expenses";

/// Key-value persistence slot holding the serialized ledger.
///
/// Saves overwrite unconditionally; there is no retry or transactional guarantee.
pub trait StoreAdapter: Send + Sync {
    /// Returns the last saved representation, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, serialized: &str) -> Result<()>;
}

/// In-process store. Clones share the same slot, so a test can keep a handle
/// after boxing one into a [`crate::core::LedgerManager`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<RwLock<Option<String>>>,
    saves: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.slot.write() {
            *slot = Some(contents.into());
        }
        store
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes subsequent saves fail, simulating an unavailable backend.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl StoreAdapter for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        self.slot
            .read()
            .map(|slot| slot.clone())
            .map_err(|_| ExpenseError::StorageError("memory store lock poisoned".into()))
    }

    fn save(&self, serialized: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ExpenseError::StorageError("memory store unavailable".into()));
        }
        let mut slot = self
            .slot
            .write()
            .map_err(|_| ExpenseError::StorageError("memory store lock poisoned".into()))?;
        *slot = Some(serialized.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
