use anyhow::{anyhow, Context, Result};
use ir::AstNode;

use crate::{Language, LanguageParser};

/// Loads a JSON object document as a tree, property order preserved.
///
/// ESTree dumps from acorn, esprima or recast keep their native shape, so
/// their trees can be browsed without a Rust port of those parsers.
///
/// # Example
/// ```
/// use parsers::parse_json;
/// let node = parse_json(r#"{"type": "Program", "body": []}"#).unwrap().unwrap();
/// assert_eq!(node.label(), "Program");
/// assert!(parse_json("  ").unwrap().is_none());
/// ```
pub fn parse_json(content: &str) -> Result<Option<AstNode>> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value =
        serde_json::from_str(content).context("invalid JSON document")?;
    AstNode::from_json(value)
        .map(Some)
        .ok_or_else(|| anyhow!("top-level JSON value must be an object"))
}

struct JsonParser;

impl LanguageParser for JsonParser {
    fn parser_id(&self) -> &'static str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Option<AstNode>> {
        parse_json(content)
    }
}

pub fn language() -> Language {
    Language::new("json", &["json"], vec![Box::new(JsonParser)])
}
