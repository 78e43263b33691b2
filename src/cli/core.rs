//! Core CLI dispatch, error reporting, and shell context helpers.

use strsim::levenshtein;

use crate::errors::{CliError, ExpenseError};

use super::output;
use super::registry::CommandEntry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("expenses [{}]> ", self.manager.ledger().len())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        super::io::confirm_action("Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Runs `lines` through a script-mode shell built from the given parts.
#[cfg(test)]
pub(crate) fn process_script(
    mut context: ShellContext,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigManager};
    use crate::core::LedgerManager;
    use crate::ledger::Category;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn script_context(store: &MemoryStore) -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let config_manager =
            ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
        let manager = LedgerManager::new(Box::new(store.clone()));
        let context =
            ShellContext::with_parts(CliMode::Script, manager, config_manager, Config::default());
        (context, temp)
    }

    #[test]
    fn parse_line_handles_quotes() {
        let tokens = crate::cli::shell::parse_command_line("add \"Iced Coffee\" 4.25 food").unwrap();
        assert_eq!(tokens, vec!["add", "Iced Coffee", "4.25", "food"]);
    }

    #[test]
    fn script_adds_expenses_newest_first() {
        let store = MemoryStore::new();
        let (context, _guard) = script_context(&store);
        let context =
            process_script(context, &["add Coffee 3.50 Food", "add Bus 2.00 Transport", "exit"])
                .unwrap();

        let ledger = context.manager.ledger();
        let names: Vec<_> = ledger.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, vec!["Bus", "Coffee"]);
        assert!((context.manager.summary().total - 5.5).abs() < 1e-9);
        assert_eq!(store.save_count(), 2);
        assert!(!context.running);
    }

    #[test]
    fn add_without_category_reuses_last_selection() {
        let store = MemoryStore::new();
        let (context, _guard) = script_context(&store);
        let context =
            process_script(context, &["add Cinema 12 entertainment", "add Popcorn 6"]).unwrap();
        let ledger = context.manager.ledger();
        assert_eq!(ledger.records()[0].category, Category::Entertainment);
        assert_eq!(context.form.category, Category::Entertainment);
    }

    #[test]
    fn invalid_add_does_not_mutate_or_save() {
        let store = MemoryStore::new();
        let (context, _guard) = script_context(&store);
        let context = process_script(context, &["add \"\" 10 Food", "add Tea -3 Food"]).unwrap();
        assert!(context.manager.ledger().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn unknown_category_is_reported_without_mutation() {
        let store = MemoryStore::new();
        let (context, _guard) = script_context(&store);
        let context = process_script(context, &["add Flight 300 Travel"]).unwrap();
        assert!(context.manager.ledger().is_empty());
    }

    #[test]
    fn delete_by_id_and_row_number() {
        let store = MemoryStore::new();
        let (context, _guard) = script_context(&store);
        let mut context =
            process_script(context, &["add Coffee 3.50", "add Bus 2", "add Lunch 9"]).unwrap();
        let coffee_id = context.manager.ledger().records()[2].id;

        let line = format!("delete {}", coffee_id);
        context = process_script(context, &[line.as_str(), "remove #1"]).unwrap();

        let names: Vec<_> = context
            .manager
            .ledger()
            .iter()
            .map(|r| r.description.clone())
            .collect();
        assert_eq!(names, vec!["Bus".to_string()]);
        assert_eq!(store.save_count(), 5);

        let context = process_script(context, &[line.as_str(), "delete #9"]).unwrap();
        assert_eq!(context.manager.ledger().len(), 1);
        assert_eq!(store.save_count(), 5);
    }

    #[test]
    fn unknown_commands_continue_the_loop() {
        let store = MemoryStore::new();
        let (mut context, _guard) = script_context(&store);
        let control = context.process_line("totl").unwrap();
        assert_eq!(control, LoopControl::Continue);
        assert!(context.running);
    }

    #[test]
    fn config_set_updates_form_default_and_persists() {
        let store = MemoryStore::new();
        let (context, guard) = script_context(&store);
        let context = process_script(
            context,
            &["config set default_category bills", "config set date_format %Y-%m-%d", "add Rent 900"],
        )
        .unwrap();
        assert_eq!(context.manager.ledger().records()[0].category, Category::Bills);
        let date = &context.manager.ledger().records()[0].date;
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");

        let saved = ConfigManager::with_base_dir(guard.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(saved.default_category, Category::Bills);
        assert_eq!(saved.date_format, "%Y-%m-%d");
    }

    #[test]
    fn unusable_date_format_is_refused_and_adds_keep_working() {
        let store = MemoryStore::new();
        let (context, guard) = script_context(&store);
        let context =
            process_script(context, &["config set date_format %Q", "add Coffee 3.50 Food"])
                .unwrap();
        assert_eq!(context.config.date_format, crate::ledger::DEFAULT_DATE_FORMAT);
        assert_eq!(context.manager.ledger().len(), 1);
        assert!(!ConfigManager::with_base_dir(guard.path().to_path_buf())
            .unwrap()
            .config_path()
            .exists());
    }
}
