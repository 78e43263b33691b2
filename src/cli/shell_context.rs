//! Shared runtime state for CLI interactions and command execution.

use crate::{
    config::{Config, ConfigManager},
    core::LedgerManager,
    errors::CliError,
    storage::JsonFileStore,
};

use super::{commands, forms::ExpenseForm, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub form: ExpenseForm,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and hydrates the ledger from the configured slot.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::default_manager()?;
        let config = config_manager.load_or_default();
        let store = JsonFileStore::new(None, &config.storage_slot)?;
        tracing::info!(path = %store.path().display(), "using expense store");
        let manager = LedgerManager::new(Box::new(store));
        Ok(Self::with_parts(mode, manager, config_manager, config))
    }

    pub fn with_parts(
        mode: CliMode,
        mut manager: LedgerManager,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::apply_config(&config);
        manager.set_date_format(config.date_format.clone());
        Self {
            mode,
            registry,
            manager,
            form: ExpenseForm::new(config.default_category),
            config_manager,
            config,
            running: true,
        }
    }
}
