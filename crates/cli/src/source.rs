//! Loading a source file into an engine [`Session`].

use anyhow::{anyhow, Result};
use engine::{CodeState, Session, WalkLimits};
use parsers::{read_source, read_text, Registry};
use tracing::debug;

use crate::args::SourceArgs;
use crate::config::Config;

/// Reads and parses the file named by `args`.
///
/// The parser is the one given on the command line, else the configured
/// default for the language, else the language's first parser.
pub fn load_session(args: &SourceArgs, config: &Config, registry: &Registry) -> Result<Session> {
    let (content, language) = match &args.language {
        Some(name) => (read_text(&args.file, args.max_file_size)?, name.clone()),
        None => {
            let src = read_source(&args.file, args.max_file_size)?;
            (src.content, src.language.to_string())
        }
    };
    let lang = registry
        .language(&language)
        .ok_or_else(|| anyhow!("Unsupported language: {language}"))?;
    let parser_id = args
        .parser
        .clone()
        .or_else(|| config.parsers.get(&language).cloned())
        .or_else(|| lang.default_parser().map(str::to_string))
        .ok_or_else(|| anyhow!("No parser available for {language}"))?;
    debug!(file = %args.file.display(), language = %language, parser = %parser_id, "Loading source");

    let mut session = Session::with_visible_keys(config.display.visible_keys.clone()).with_limits(
        WalkLimits {
            max_depth: config.traversal.max_depth,
        },
    );
    session.load(CodeState::new(content, language, parser_id), registry)?;
    Ok(session)
}
