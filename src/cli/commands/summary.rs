use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{output, render};
use crate::core::services::{format_amount, SummaryService};
use crate::ledger::Category;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "List expenses, newest first", "list", cmd_list),
        CommandEntry::new("total", "Show the total of all expenses", "total", cmd_total),
        CommandEntry::new(
            "summary",
            "Show the full dashboard",
            "summary",
            cmd_summary,
        )
        .with_aliases(&["dashboard"]),
        CommandEntry::new(
            "categories",
            "List the available categories",
            "categories",
            cmd_categories,
        ),
    ]
}

/// Prints total, per-category breakdown, and the expense list.
pub fn render_dashboard(context: &ShellContext) {
    let ledger = context.manager.ledger();
    let summary = context.manager.summary();
    for (title, lines) in render::dashboard_sections(&summary, ledger) {
        output::section(title);
        output::lines(&lines);
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Recent Expenses");
    output::lines(&render::list_lines(context.manager.ledger()));
    Ok(())
}

fn cmd_total(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let total = SummaryService::total(context.manager.ledger());
    output::lines(&[render::total_line(total)]);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_dashboard(context);
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    let breakdown = SummaryService::by_category(context.manager.ledger());
    let lines: Vec<String> = Category::ALL
        .iter()
        .map(|category| {
            let marker = if *category == context.form.category {
                "*"
            } else {
                " "
            };
            let spent = breakdown
                .get(*category)
                .map(format_amount)
                .unwrap_or_else(|| "-".into());
            format!(" {} {:<14} {:>10}", marker, category.as_str(), spent)
        })
        .collect();
    output::lines(&lines);
    output::hint("`*` marks the category used when `add` is given none.");
    Ok(())
}
