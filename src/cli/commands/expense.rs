use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{io, output, render};
use crate::core::services::format_amount;
use crate::errors::ExpenseError;
use crate::ledger::{AddOutcome, Category};

use super::summary::render_dashboard;

const ADD_USAGE: &str = "add <description> <amount> [category]";
const DELETE_USAGE: &str = "delete <id|#row>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "delete",
            "Delete an expense by id or list row",
            DELETE_USAGE,
            cmd_delete,
        )
        .with_aliases(&["remove", "rm"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] if context.mode() == CliMode::Interactive => {
            if !context.form.prompt()? {
                output::info("Operation cancelled.");
                return Ok(());
            }
        }
        [description, amount] => context.form.fill(description, amount, None),
        [description, amount, category] => {
            let category: Category = category
                .parse()
                .map_err(|err: ExpenseError| CommandError::InvalidArguments(err.to_string()))?;
            context.form.fill(description, amount, Some(category));
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {}",
                ADD_USAGE
            )))
        }
    }

    let description = context.form.description.trim().to_string();
    let category = context.form.category;
    match context.form.submit(&mut context.manager) {
        AddOutcome::Added(id) => {
            let amount = context
                .manager
                .ledger()
                .get(id)
                .map(|record| record.amount)
                .unwrap_or_default();
            output::success(format!(
                "Added `{}` ({}, {}).",
                description,
                format_amount(amount),
                category
            ));
            render_dashboard(context);
        }
        AddOutcome::Rejected(reason) => {
            output::warning(format!("Expense not recorded: {}.", reason));
        }
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = match args {
        [] if context.mode() == CliMode::Interactive => match select_record(context)? {
            Some(id) => id,
            None => return Ok(()),
        },
        [target] => match resolve_target(context, target)? {
            Some(id) => id,
            None => {
                output::info(format!("No expense matches `{}`; nothing deleted.", target));
                return Ok(());
            }
        },
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {}",
                DELETE_USAGE
            )))
        }
    };

    let description = context
        .manager
        .ledger()
        .get(id)
        .map(|record| record.description.clone());
    if context.manager.remove(id) {
        output::success(format!(
            "Deleted `{}`.",
            description.unwrap_or_else(|| id.to_string())
        ));
        render_dashboard(context);
    } else {
        output::info(format!("No expense with id {}; nothing deleted.", id));
    }
    Ok(())
}

/// Maps `#n` to the id shown on list row `n`; anything else is taken as a raw id.
fn resolve_target(context: &ShellContext, target: &str) -> Result<Option<u64>, CommandError> {
    if let Some(row) = target.strip_prefix('#') {
        let row: usize = row.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid row number `{}`", target))
        })?;
        return Ok(row
            .checked_sub(1)
            .and_then(|index| context.manager.ledger().records().get(index))
            .map(|record| record.id));
    }
    target
        .parse::<u64>()
        .map(Some)
        .map_err(|_| CommandError::InvalidArguments(format!("invalid expense id `{}`", target)))
}

fn select_record(context: &ShellContext) -> Result<Option<u64>, CommandError> {
    let records = context.manager.ledger().records();
    if records.is_empty() {
        output::info(render::EMPTY_LIST_MESSAGE);
        return Ok(None);
    }
    let labels: Vec<String> = records.iter().map(render::row_label).collect();
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let selection = io::select_index("Select an expense to delete", &label_refs, 0)?;
    Ok(selection
        .and_then(|index| records.get(index))
        .map(|record| record.id))
}
