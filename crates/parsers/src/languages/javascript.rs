use anyhow::Result;
use ir::AstNode;

use crate::{tree, Language, LanguageParser};

pub fn parse_javascript(content: &str) -> Result<Option<AstNode>> {
    tree::parse_with(tree_sitter_javascript::language(), content)
}

struct TreeSitterParser;

impl LanguageParser for TreeSitterParser {
    fn parser_id(&self) -> &'static str {
        "tree-sitter"
    }

    fn parse(&self, content: &str) -> Result<Option<AstNode>> {
        parse_javascript(content)
    }
}

pub fn language() -> Language {
    Language::new(
        "javascript",
        &["js", "jsx", "mjs", "cjs"],
        vec![Box::new(TreeSitterParser)],
    )
}
