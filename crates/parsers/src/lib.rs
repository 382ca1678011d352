//! Parser adapters that convert source files into the schema-less
//! [`AstNode`] trees consumed by the engine.
//!
//! Languages are grouped in a [`Registry`]; each language exposes one or
//! more interchangeable parsers identified by a parser id.

use anyhow::{anyhow, bail, Context, Result};
use ir::{AstNode, SourceParser};
use std::{fs, path::Path};
use tracing::debug;

pub mod languages;
pub mod tree;
pub use languages::*;

/// Default maximum size of a source file: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// One interchangeable parser implementation of a language.
pub trait LanguageParser: Send + Sync {
    fn parser_id(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<Option<AstNode>>;
}

/// A source language and the parsers able to read it.
pub struct Language {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    parsers: Vec<Box<dyn LanguageParser>>,
}

impl Language {
    pub fn new(
        name: &'static str,
        extensions: &'static [&'static str],
        parsers: Vec<Box<dyn LanguageParser>>,
    ) -> Self {
        Self {
            name,
            extensions,
            parsers,
        }
    }

    pub fn parser_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.iter().map(|p| p.parser_id())
    }

    /// The first registered parser.
    pub fn default_parser(&self) -> Option<&'static str> {
        self.parsers.first().map(|p| p.parser_id())
    }

    pub fn parse(&self, content: &str, parser_id: &str) -> Result<Option<AstNode>> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.parser_id() == parser_id)
            .ok_or_else(|| anyhow!("Parser {parser_id} not found"))?;
        debug!(language = self.name, parser = parser_id, bytes = content.len(), "Parsing source");
        parser.parse(content)
    }
}

/// All built-in languages.
pub struct Registry {
    languages: Vec<Language>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            languages: vec![
                javascript::language(),
                typescript::language(),
                json::language(),
            ],
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.name == name)
    }

    /// Language responsible for `path`, by file extension.
    pub fn detect(&self, path: &Path) -> Option<&Language> {
        detect_language(path).and_then(|name| self.language(name))
    }

    pub fn parse(&self, content: &str, language: &str, parser_id: &str) -> Result<Option<AstNode>> {
        self.language(language)
            .ok_or_else(|| anyhow!("Unsupported language: {language}"))?
            .parse(content, parser_id)
    }
}

impl SourceParser for Registry {
    fn parse(&self, content: &str, language: &str, parser_id: &str) -> Result<Option<AstNode>> {
        Registry::parse(self, content, language, parser_id)
    }
}

/// Determines the language of a file from its extension.
///
/// # Example
/// ```
/// use parsers::detect_language;
/// assert_eq!(detect_language(std::path::Path::new("app.tsx")), Some("typescript"));
/// assert_eq!(detect_language(std::path::Path::new("notes.txt")), None);
/// ```
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase());
    let detected = match ext.as_deref() {
        Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => Some("javascript"),
        Some("ts") | Some("tsx") | Some("mts") | Some("cts") => Some("typescript"),
        Some("json") => Some("json"),
        _ => None,
    };
    if let Some(t) = detected {
        debug!(file = %path.display(), language = t, "Language detected");
    } else {
        debug!(file = %path.display(), "Unsupported file type");
    }
    detected
}

/// Raw text of a source file together with its detected language.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub content: String,
    pub language: &'static str,
}

/// Reads a source file for parsing.
///
/// Files larger than `max_file_size` bytes are refused (0 disables the
/// limit): traversals cannot be aborted once started, so tree size is
/// bounded here.
///
/// # Example
/// ```
/// use parsers::read_source;
/// use std::fs;
/// let path = std::env::temp_dir().join("read_source_example.js");
/// fs::write(&path, "let a = 1;").unwrap();
/// let src = read_source(&path, 0).unwrap();
/// assert_eq!(src.language, "javascript");
/// assert_eq!(src.content, "let a = 1;");
/// ```
pub fn read_source(path: &Path, max_file_size: u64) -> Result<SourceFile> {
    let Some(language) = detect_language(path) else {
        bail!("Unsupported file type: {}", path.display());
    };
    let content = read_text(path, max_file_size)?;
    Ok(SourceFile { content, language })
}

/// Reads `path` as UTF-8 text under the same size limit as
/// [`read_source`], without looking at its extension.
pub fn read_text(path: &Path, max_file_size: u64) -> Result<String> {
    if max_file_size > 0 {
        let meta = fs::metadata(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if meta.len() > max_file_size {
            bail!(
                "{} is {} bytes, above the {} byte limit",
                path.display(),
                meta.len(),
                max_file_size
            );
        }
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
