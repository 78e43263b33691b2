//! Text rendering for the dashboard: total, category breakdown, and expense list.

use crate::{
    core::services::{format_amount, CategoryBreakdown, DashboardSummary},
    ledger::{ExpenseRecord, Ledger},
};

pub const EMPTY_LIST_MESSAGE: &str = "No expenses yet. Add one above!";

pub fn total_line(total: f64) -> String {
    format!("Total Expenses: {}", format_amount(total))
}

/// One `Category  $amount` line per category present; nothing when empty.
pub fn breakdown_lines(breakdown: &CategoryBreakdown) -> Vec<String> {
    let width = breakdown
        .iter()
        .map(|(category, _)| category.as_str().len())
        .max()
        .unwrap_or(0);
    breakdown
        .iter()
        .map(|(category, amount)| {
            format!(
                "  {:<width$}  {:>10}",
                category.as_str(),
                format_amount(amount),
                width = width
            )
        })
        .collect()
}

/// Expense rows newest-first. The leading `#n` is the row handle `delete` accepts.
pub fn list_lines(ledger: &Ledger) -> Vec<String> {
    if ledger.is_empty() {
        return vec![format!("  {}", EMPTY_LIST_MESSAGE)];
    }
    ledger
        .iter()
        .enumerate()
        .map(|(index, record)| row_line(index + 1, record))
        .collect()
}

pub fn row_line(position: usize, record: &ExpenseRecord) -> String {
    format!(
        "  #{:<3} {:<24} {:>10}  {} \u{2022} {}  [id {}]",
        position,
        record.description,
        format_amount(record.amount),
        record.category,
        record.date,
        record.id
    )
}

/// Short label used by the interactive delete picker.
pub fn row_label(record: &ExpenseRecord) -> String {
    format!(
        "{} - {} ({}, {})",
        record.description,
        format_amount(record.amount),
        record.category,
        record.date
    )
}

/// Full dashboard as sections of lines: total, breakdown (when non-empty), list.
pub fn dashboard_sections(
    summary: &DashboardSummary,
    ledger: &Ledger,
) -> Vec<(&'static str, Vec<String>)> {
    let mut sections = vec![("Expense Dashboard", vec![total_line(summary.total)])];
    if !summary.by_category.is_empty() {
        sections.push(("By Category", breakdown_lines(&summary.by_category)));
    }
    sections.push(("Recent Expenses", list_lines(ledger)));
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::ledger::{Category, CreationStamp};

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add("Coffee", "3.5", Category::Food, CreationStamp::new(1, "1/2/2025"));
        ledger.add("Bus", "2", Category::Transport, CreationStamp::new(2, "1/3/2025"));
        ledger
    }

    #[test]
    fn empty_ledger_renders_placeholder() {
        let ledger = Ledger::new();
        let summary = SummaryService::dashboard(&ledger);
        let sections = dashboard_sections(&summary, &ledger);
        let titles: Vec<_> = sections.iter().map(|(title, _)| *title).collect();
        assert_eq!(titles, vec!["Expense Dashboard", "Recent Expenses"]);
        assert_eq!(sections[0].1, vec!["Total Expenses: $0.00".to_string()]);
        assert!(sections[1].1[0].contains(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn rows_are_numbered_newest_first() {
        let lines = list_lines(&sample_ledger());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  #1"));
        assert!(lines[0].contains("Bus"));
        assert!(lines[0].contains("$2.00"));
        assert!(lines[0].contains("Transport \u{2022} 1/3/2025"));
        assert!(lines[1].contains("Coffee"));
        assert!(lines[1].contains("[id 1]"));
    }

    #[test]
    fn breakdown_lists_present_categories() {
        let ledger = sample_ledger();
        let summary = SummaryService::dashboard(&ledger);
        let lines = breakdown_lines(&summary.by_category);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Transport") && lines[0].contains("$2.00"));
        assert!(lines[1].contains("Food") && lines[1].contains("$3.50"));
    }

    #[test]
    fn row_label_is_compact() {
        let ledger = sample_ledger();
        assert_eq!(
            row_label(&ledger.records()[1]),
            "Coffee - $3.50 (Food, 1/2/2025)"
        );
    }
}
