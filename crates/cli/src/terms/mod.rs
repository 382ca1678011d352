//! `terms` command: property names and the values seen under them.

use anyhow::Result;
use colored::*;
use parsers::Registry;

use crate::args::TermsArgs;
use crate::config::Config;
use crate::output::{print_json, Format};
use crate::source::load_session;

pub fn run_terms(args: TermsArgs, config: &Config) -> Result<()> {
    let registry = Registry::new();
    let session = load_session(&args.source, config, &registry)?;
    let terms = session.terms();

    if let Some(key) = &args.key {
        let suggestions = terms.suggest(key, args.query.as_deref().unwrap_or_default());
        return match args.format {
            Format::Json => print_json(&suggestions),
            Format::Text => {
                if suggestions.is_empty() {
                    println!("No values for {key}");
                }
                for value in suggestions {
                    println!("{value}");
                }
                Ok(())
            }
        };
    }

    match args.format {
        Format::Json => print_json(terms),
        Format::Text => {
            if terms.is_empty() {
                println!("No syntax tree produced for {}", args.source.file.display());
            }
            for key in terms.keys() {
                let values = terms.values(key).map(|v| v.len()).unwrap_or_default();
                println!("{} ({values})", key.bright_white().bold());
                if let Some(values) = terms.values(key).filter(|v| !v.is_empty()) {
                    let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                    println!("  {}", joined.join(", "));
                }
            }
            Ok(())
        }
    }
}
