//! The expense entry form: pass-through field state plus the submit action.

use crate::{
    cli::io,
    core::LedgerManager,
    ledger::{AddOutcome, Category},
};

use super::core::CommandError;

/// Field values collected for a new expense.
///
/// A successful submit clears `description` and `amount` and keeps `category`
/// as last selected. A rejected submit leaves every field as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub category: Category,
}

impl ExpenseForm {
    pub fn new(category: Category) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category,
        }
    }

    pub fn fill(&mut self, description: &str, amount: &str, category: Option<Category>) {
        self.description = description.to_string();
        self.amount = amount.to_string();
        if let Some(category) = category {
            self.category = category;
        }
    }

    pub fn submit(&mut self, manager: &mut LedgerManager) -> AddOutcome {
        let outcome = manager.add(&self.description, &self.amount, self.category);
        if outcome.is_added() {
            self.description.clear();
            self.amount.clear();
        }
        outcome
    }

    /// Interactive entry via dialoguer prompts. Returns `false` when cancelled.
    pub fn prompt(&mut self) -> Result<bool, CommandError> {
        let Some(description) = io::prompt_text("Description", "Coffee, Lunch, etc.")? else {
            return Ok(false);
        };
        let Some(amount) = io::prompt_text("Amount", "0.00")? else {
            return Ok(false);
        };
        let labels: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        let Some(index) = io::select_index("Category", &labels, self.category.index())? else {
            return Ok(false);
        };
        let category = Category::ALL.get(index).copied();
        self.fill(&description, &amount, category);
        Ok(true)
    }
}
