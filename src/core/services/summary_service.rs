//! Aggregation helpers for the dashboard's derived views.

use crate::ledger::{Category, Ledger};

/// Per-category spend, holding only categories with at least one record.
///
/// Entries keep the order in which each category first appears while walking
/// the ledger newest-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(Category, f64)>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    fn accumulate(&mut self, category: Category, amount: f64) {
        match self
            .entries
            .iter_mut()
            .find(|(candidate, _)| *candidate == category)
        {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category, amount)),
        }
    }
}

/// Everything the dashboard shows above the expense list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: f64,
    pub by_category: CategoryBreakdown,
    pub record_count: usize,
}

/// Computes derived views from the current ledger. Nothing is cached.
pub struct SummaryService;

impl SummaryService {
    /// Sum of every recorded amount; zero for an empty ledger.
    pub fn total(ledger: &Ledger) -> f64 {
        ledger.iter().map(|record| record.amount).sum()
    }

    pub fn by_category(ledger: &Ledger) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::default();
        for record in ledger.iter() {
            breakdown.accumulate(record.category, record.amount);
        }
        breakdown
    }

    pub fn dashboard(ledger: &Ledger) -> DashboardSummary {
        DashboardSummary {
            total: Self::total(ledger),
            by_category: Self::by_category(ledger),
            record_count: ledger.len(),
        }
    }
}

/// Renders an amount as dollars with two decimals, e.g. `$3.50`.
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}
