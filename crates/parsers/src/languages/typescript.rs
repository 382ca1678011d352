use anyhow::Result;
use ir::AstNode;

use crate::{tree, Language, LanguageParser};

pub fn parse_typescript(content: &str) -> Result<Option<AstNode>> {
    tree::parse_with(tree_sitter_typescript::language_typescript(), content)
}

pub fn parse_tsx(content: &str) -> Result<Option<AstNode>> {
    tree::parse_with(tree_sitter_typescript::language_tsx(), content)
}

struct TypeScriptParser;

impl LanguageParser for TypeScriptParser {
    fn parser_id(&self) -> &'static str {
        "tree-sitter"
    }

    fn parse(&self, content: &str) -> Result<Option<AstNode>> {
        parse_typescript(content)
    }
}

struct TsxParser;

impl LanguageParser for TsxParser {
    fn parser_id(&self) -> &'static str {
        "tsx"
    }

    fn parse(&self, content: &str) -> Result<Option<AstNode>> {
        parse_tsx(content)
    }
}

pub fn language() -> Language {
    Language::new(
        "typescript",
        &["ts", "tsx", "mts", "cts"],
        vec![Box::new(TypeScriptParser), Box::new(TsxParser)],
    )
}
