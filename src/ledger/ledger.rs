use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    category::Category,
    expense::{CreationStamp, ExpenseRecord},
};
use crate::errors::Result;

/// Ordered collection of expense records, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

/// Reason a submitted expense was not recorded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),
    #[error("no expense id is left after {0}")]
    IdsExhausted(u64),
}

/// Result of [`Ledger::add`]. A rejected submission leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(u64),
    Rejected(Rejection),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            AddOutcome::Added(id) => Some(*id),
            AddOutcome::Rejected(_) => None,
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from the store's raw slot contents.
    ///
    /// A missing or blank slot yields an empty ledger. Unparseable contents are
    /// logged and also yield an empty ledger so the dashboard stays usable.
    pub fn hydrate(serialized: Option<&str>) -> Self {
        let Some(raw) = serialized.filter(|raw| !raw.trim().is_empty()) else {
            return Self::new();
        };
        match Self::from_json(raw) {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable expense data");
                Self::new()
            }
        }
    }

    /// Parses a serialized ledger. Anything but a JSON array is an error.
    ///
    /// Array entries are checked one at a time: entries that do not decode as a
    /// record (missing field, unknown category) or that break the ledger
    /// invariants (duplicate id, non-positive amount, blank description) are
    /// dropped and the rest are kept.
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
        let mut seen = HashSet::new();
        let total = entries.len();
        let records: Vec<ExpenseRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<ExpenseRecord>(entry).ok())
            .filter(|record| {
                record.amount.is_finite()
                    && record.amount > 0.0
                    && !record.description.trim().is_empty()
                    && seen.insert(record.id)
            })
            .collect();
        if records.len() != total {
            tracing::warn!(
                dropped = total - records.len(),
                "dropped invalid expense records while loading"
            );
        }
        Ok(Self { records })
    }

    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// Validates a submission and, when valid, prepends a new record.
    pub fn add(
        &mut self,
        description: &str,
        raw_amount: &str,
        category: Category,
        stamp: CreationStamp,
    ) -> AddOutcome {
        let description = description.trim();
        if description.is_empty() {
            return AddOutcome::Rejected(Rejection::EmptyDescription);
        }
        let amount = match parse_amount(raw_amount) {
            Ok(amount) => amount,
            Err(rejection) => return AddOutcome::Rejected(rejection),
        };

        let Some(id) = self.next_id(stamp.millis) else {
            return AddOutcome::Rejected(Rejection::IdsExhausted(u64::MAX));
        };
        self.records.insert(
            0,
            ExpenseRecord {
                id,
                description: description.to_string(),
                amount,
                category,
                date: stamp.date,
            },
        );
        AddOutcome::Added(id)
    }

    /// Drops the record with `id`. Returns `false` when no such record exists.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Records in display order, newest first.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `seed`, or one past the highest id when `seed` would not be newest.
    /// `None` once the highest id is `u64::MAX`.
    fn next_id(&self, seed: u64) -> Option<u64> {
        match self.records.iter().map(|record| record.id).max() {
            Some(highest) if seed <= highest => highest.checked_add(1),
            _ => Some(seed),
        }
    }
}

/// Parses a raw amount into a positive, finite number.
pub fn parse_amount(raw: &str) -> std::result::Result<f64, Rejection> {
    let trimmed = raw.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| Rejection::InvalidAmount(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(Rejection::InvalidAmount(trimmed.to_string()));
    }
    if amount <= 0.0 {
        return Err(Rejection::NonPositiveAmount(amount));
    }
    Ok(amount)
}
