use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let entries = registry.list();
    let width = entries.iter().map(|entry| entry.name.len()).max().unwrap_or(0);
    for entry in entries {
        println!(
            "  {:<width$}  {}",
            entry.name,
            entry.description,
            width = width + 2
        );
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    println!("  description  {}", entry.description);
    println!("  usage        {}", entry.usage);
    if !entry.aliases.is_empty() {
        println!("  aliases      {}", entry.aliases.join(", "));
    }
}
