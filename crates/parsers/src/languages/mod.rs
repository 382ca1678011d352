/// Parser adapters grouped by source language.
///
/// Each language module exposes a `parse_<language>` function and a
/// constructor for its [`Language`](crate::Language) registry entry. All
/// parsers of a language share the same output contract: an
/// [`AstNode`](ir::AstNode) tree, or `None` when there is nothing to show.
///
// ====================================
// Programming Languages             ==
// ====================================
pub mod javascript;
pub use javascript::parse_javascript;

pub mod typescript;
pub use typescript::{parse_tsx, parse_typescript};
// ====================================

// ====================================
// Data Formats                      ==
// ====================================
pub mod json;
pub use json::parse_json;
// ====================================
