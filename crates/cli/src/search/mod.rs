//! `search` command: nodes matching a tag filter, one line each.

use anyhow::Result;
use colored::*;
use engine::{extract_position, Span};
use parsers::Registry;
use serde::Serialize;
use tracing::info;

use crate::args::SearchArgs;
use crate::config::Config;
use crate::output::{print_json, Format};
use crate::source::load_session;

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub label: String,
    #[serde(flatten)]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

pub fn run_search(args: SearchArgs, config: &Config) -> Result<()> {
    let registry = Registry::new();
    let mut session = load_session(&args.source, config, &registry)?;
    session.set_filter(args.filters.iter().cloned().collect());

    let content = session.code().content.as_str();
    let hits: Vec<SearchHit> = session
        .results()
        .into_iter()
        .map(|(path, node)| {
            let span = extract_position(&node, Some(content));
            let source = span
                .filter(|_| args.show_source)
                .and_then(|s| s.slice(content))
                .map(str::to_string);
            SearchHit {
                path,
                label: node.label().to_string(),
                span,
                source,
            }
        })
        .collect();
    info!(filters = session.filter().len(), results = hits.len(), "Search completed");

    match args.format {
        Format::Json => print_json(&hits),
        Format::Text => {
            for hit in &hits {
                let mut line = format!("{} {}", hit.path.dimmed(), hit.label.bright_cyan());
                if let Some(span) = hit.span {
                    line.push_str(&format!(" {}..{}", span.start, span.end));
                }
                if let Some(source) = &hit.source {
                    let first = source.lines().next().unwrap_or_default();
                    line.push_str(&format!("  {}", first.trim()));
                }
                println!("{line}");
            }
            println!("{} match(es)", hits.len());
            Ok(())
        }
    }
}
