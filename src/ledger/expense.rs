use std::fmt::Write;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Date label used when no format is configured; renders like `3/7/2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A single recorded expense. Records are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    /// Display-only creation date, stored already formatted.
    pub date: String,
}

/// Identity seed and date label captured at the moment an expense is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationStamp {
    pub millis: u64,
    pub date: String,
}

impl CreationStamp {
    pub fn new(millis: u64, date: impl Into<String>) -> Self {
        Self {
            millis,
            date: date.into(),
        }
    }

    /// Stamps `moment`. A `date_format` chrono cannot render falls back to
    /// [`DEFAULT_DATE_FORMAT`].
    pub fn at(moment: DateTime<Local>, date_format: &str) -> Self {
        let millis = u64::try_from(moment.timestamp_millis()).unwrap_or_default();
        let mut date = String::new();
        if write!(date, "{}", moment.format(date_format)).is_err() {
            tracing::warn!(date_format, "unusable date format; using default");
            date = moment.format(DEFAULT_DATE_FORMAT).to_string();
        }
        Self { millis, date }
    }
}
