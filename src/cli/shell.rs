//! Line-driven front ends for the expense shell: a rustyline editor with
//! argument-aware completion, and a stdin runner for scripts.

use std::{
    collections::HashMap,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use crate::cli::core::{CliMode, LoopControl, ShellContext};
use crate::cli::registry::CommandRegistry;
use crate::cli::{commands, output};
use crate::config::CONFIG_KEYS;
use crate::errors::CliError;
use crate::ledger::Category;

const SCRIPT_ENV: &str = "EXPENSE_CORE_CLI_SCRIPT";
const SCRIPT_COMMENT: char = '#';

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ExpenseCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(ExpenseCompleter::new(
        &context.registry,
        context.manager.ledger().len(),
    )));

    commands::summary::render_dashboard(context);

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match context.process_line(trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
                if let Some(helper) = editor.helper_mut() {
                    helper.rows = context.manager.ledger().len();
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Runs one command per stdin line. Blank lines and lines starting with `#`
/// are skipped, so `#` row handles only work as arguments.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(SCRIPT_COMMENT) {
            continue;
        }
        match context.process_line(trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Tab completion for command names and, per command, for the argument under
/// the cursor: categories for `add`, list row handles for `delete`, keys and
/// categories for `config set`, command names for `help`.
struct ExpenseCompleter {
    commands: Vec<String>,
    canonical: HashMap<String, &'static str>,
    rows: usize,
}

impl ExpenseCompleter {
    fn new(registry: &CommandRegistry, rows: usize) -> Self {
        let mut canonical = HashMap::new();
        for entry in registry.list() {
            canonical.insert(entry.name.to_string(), entry.name);
            for alias in entry.aliases {
                canonical.insert(alias.to_string(), entry.name);
            }
        }
        let mut commands: Vec<String> = canonical.keys().cloned().collect();
        commands.sort();
        Self {
            commands,
            canonical,
            rows,
        }
    }

    /// Replacement start and candidates for the word ending at `pos`.
    fn complete_at(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        // An open quote means the cursor is inside a quoted description.
        let Ok(words) = parse_command_line(&prefix[..start]) else {
            return (start, Vec::new());
        };
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .options(&words)
            .into_iter()
            .filter(|option| option.to_ascii_lowercase().starts_with(&needle))
            .collect();
        (start, candidates)
    }

    fn options(&self, words: &[String]) -> Vec<String> {
        let Some((command, args)) = words.split_first() else {
            return self.commands.clone();
        };
        let command = command.to_ascii_lowercase();
        match (self.canonical.get(&command).copied(), args) {
            (Some("add"), [_, _]) => category_names(),
            (Some("delete"), []) => (1..=self.rows).map(|row| format!("#{row}")).collect(),
            (Some("config"), []) => vec!["set".into(), "show".into()],
            (Some("config"), [action]) if action.eq_ignore_ascii_case("set") => {
                CONFIG_KEYS.iter().map(|key| key.to_string()).collect()
            }
            (Some("config"), [action, key])
                if action.eq_ignore_ascii_case("set")
                    && key.eq_ignore_ascii_case("default_category") =>
            {
                category_names()
            }
            (Some("help"), []) => self.commands.clone(),
            _ => Vec::new(),
        }
    }
}

fn category_names() -> Vec<String> {
    Category::ALL
        .iter()
        .map(|category| category.as_str().to_string())
        .collect()
}

impl Helper for ExpenseCompleter {}

impl Completer for ExpenseCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.complete_at(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ExpenseCompleter {
    type Hint = String;
}

impl Highlighter for ExpenseCompleter {}

impl Validator for ExpenseCompleter {}

/// Splits a shell line into words, honouring quotes (`add "Iced Coffee" 4.25`).
pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}
