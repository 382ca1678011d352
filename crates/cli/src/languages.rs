//! `parsers` command.

use colored::*;
use parsers::Registry;

pub fn list_parsers() {
    let registry = Registry::new();
    for language in registry.languages() {
        println!("{}", language.name.bright_white().bold());
        println!("  └─ Extensions: {}", language.extensions.join(", "));
        let ids: Vec<&str> = language.parser_ids().collect();
        println!("  └─ Parsers: {}", ids.join(", ").bright_cyan());
    }
}
