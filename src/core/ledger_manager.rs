use crate::{
    core::{
        services::{DashboardSummary, SummaryService},
        time::{Clock, SystemClock},
    },
    ledger::{AddOutcome, Category, CreationStamp, Ledger, DEFAULT_DATE_FORMAT},
    storage::StoreAdapter,
};

/// Owns the session's ledger and mirrors every mutation to the store.
///
/// The store is read exactly once, in [`LedgerManager::new`]. Each accepted
/// mutation is followed by exactly one save; rejected adds and no-op removals
/// never touch the store.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StoreAdapter>,
    clock: Box<dyn Clock>,
    date_format: String,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StoreAdapter>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StoreAdapter>, clock: Box<dyn Clock>) -> Self {
        let ledger = match storage.load() {
            Ok(raw) => Ledger::hydrate(raw.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "could not read expense store; starting empty");
                Ledger::new()
            }
        };
        tracing::info!(records = ledger.len(), "expense ledger hydrated");
        Self {
            ledger,
            storage,
            clock,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn set_date_format(&mut self, format: impl Into<String>) {
        self.date_format = format.into();
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn summary(&self) -> DashboardSummary {
        SummaryService::dashboard(&self.ledger)
    }

    pub fn add(&mut self, description: &str, raw_amount: &str, category: Category) -> AddOutcome {
        let stamp = CreationStamp::at(self.clock.now(), &self.date_format);
        let outcome = self.ledger.add(description, raw_amount, category, stamp);
        match &outcome {
            AddOutcome::Added(id) => {
                tracing::debug!(id, %category, "expense recorded");
                self.persist();
            }
            AddOutcome::Rejected(reason) => {
                tracing::debug!(%reason, "expense submission ignored");
            }
        }
        outcome
    }

    /// Removes the record with `id`; returns `false` when it was not present.
    pub fn remove(&mut self, id: u64) -> bool {
        let removed = self.ledger.remove(id);
        if removed {
            tracing::debug!(id, "expense deleted");
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let serialized = match self.ledger.serialize() {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "could not serialize expense ledger");
                return;
            }
        };
        if let Err(err) = self.storage.save(&serialized) {
            tracing::warn!(error = %err, "expense ledger save failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{Local, TimeZone};

    fn manager_with(store: &MemoryStore) -> LedgerManager {
        let moment = Local.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        LedgerManager::with_clock(Box::new(store.clone()), Box::new(FixedClock(moment)))
    }

    #[test]
    fn starts_empty_without_saved_state() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);
        assert!(manager.ledger().is_empty());
        assert_eq!(manager.summary().total, 0.0);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn hydrates_previous_session() {
        let store = MemoryStore::new();
        {
            let mut first = manager_with(&store);
            first.add("Coffee", "3.50", Category::Food);
        }
        let second = manager_with(&store);
        assert_eq!(second.ledger().len(), 1);
        assert_eq!(second.ledger().records()[0].description, "Coffee");
        assert_eq!(second.ledger().records()[0].date, "1/15/2025");
    }

    #[test]
    fn malformed_store_contents_yield_empty_ledger() {
        let store = MemoryStore::with_contents("definitely not json");
        let manager = manager_with(&store);
        assert!(manager.ledger().is_empty());
    }

    #[test]
    fn saves_once_per_accepted_mutation() {
        let store = MemoryStore::new();
        let mut manager = manager_with(&store);

        let id = manager.add("Coffee", "3.50", Category::Food).id().unwrap();
        assert_eq!(store.save_count(), 1);

        manager.add("", "10", Category::Food);
        manager.add("Tea", "-1", Category::Food);
        assert_eq!(store.save_count(), 1);

        assert!(manager.remove(id));
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.contents().as_deref(), Some("[]"));

        assert!(!manager.remove(id));
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn same_instant_adds_get_distinct_ids() {
        let store = MemoryStore::new();
        let mut manager = manager_with(&store);
        let a = manager.add("A", "1", Category::Other).id().unwrap();
        let b = manager.add("B", "1", Category::Other).id().unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn save_failures_do_not_lose_in_memory_state() {
        let store = MemoryStore::new();
        store.set_failing(true);
        let mut manager = manager_with(&store);
        assert!(manager.add("Coffee", "3.50", Category::Food).is_added());
        assert_eq!(manager.ledger().len(), 1);
        assert_eq!(store.contents(), None);
    }

    #[test]
    fn date_format_is_configurable() {
        let store = MemoryStore::new();
        let mut manager = manager_with(&store);
        manager.set_date_format("%Y-%m-%d");
        manager.add("Coffee", "3.50", Category::Food);
        assert_eq!(manager.ledger().records()[0].date, "2025-01-15");
    }

    #[test]
    fn unusable_date_format_still_records_expense() {
        let store = MemoryStore::new();
        let mut manager = manager_with(&store);
        manager.set_date_format("%Q");
        assert!(manager.add("Coffee", "3.50", Category::Food).is_added());
        assert_eq!(manager.ledger().records()[0].date, "1/15/2025");
        assert_eq!(store.save_count(), 1);
    }
}
