use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;

/// Prompts for free-form text. Returns `None` when the user submits nothing.
pub fn prompt_text(prompt: &str, placeholder: &str) -> Result<Option<String>, CommandError> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{prompt} ({placeholder})"))
        .allow_empty(true)
        .interact_text()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Shows a selection list. Returns `None` when the user escapes.
pub fn select_index(
    prompt: &str,
    items: &[&str],
    default: usize,
) -> Result<Option<usize>, CommandError> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact_opt()?)
}

/// Prompts the user for confirmation with a yes/no question.
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, CommandError> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
