use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage shell preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_ascii_lowercase();
            let value = args[2..].join(" ");
            set_config_value(context, &key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; {}",
            other, USAGE
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    let lines: Vec<String> = context
        .config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("  {:<18} {}", key, value))
        .collect();
    output::lines(&lines);
    output::hint(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated
        .set_value(key, value)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    context.config_manager.save(&updated)?;

    let slot_changed = updated.storage_slot != context.config.storage_slot;
    context.config = updated;
    output::apply_config(&context.config);
    context
        .manager
        .set_date_format(context.config.date_format.clone());
    if key == "default_category" {
        context.form.category = context.config.default_category;
    }
    tracing::debug!(key, value, "config updated");

    output::success(format!("Set {} = {}.", key, value));
    if slot_changed {
        output::hint("The new storage slot takes effect next session.");
    }
    Ok(())
}
