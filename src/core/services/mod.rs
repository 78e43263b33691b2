pub mod summary_service;

pub use summary_service::{format_amount, CategoryBreakdown, DashboardSummary, SummaryService};
