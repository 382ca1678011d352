//! Shared data model for **Refactor Toolbox**.
//!
//! Parsed sources are represented as schema-less [`AstNode`] trees (module
//! [`ast`]). The core never inspects node shapes beyond their property
//! names and primitive values, so every parser adapter can hand over its
//! native tree layout. [`SourceParser`] is the seam through which the core
//! asks those adapters for a tree.

pub mod ast;
pub mod json;

pub use ast::{AstNode, NodeValue, DEFAULT_LABEL, DISCRIMINATOR_KEY};

/// Turns source text into an [`AstNode`] tree.
///
/// Implementations fail on an unknown language or parser id. Whether
/// unparsable input is an error or `Ok(None)` is up to each parser; callers
/// treat `None` as "nothing to index".
pub trait SourceParser {
    fn parse(
        &self,
        content: &str,
        language: &str,
        parser_id: &str,
    ) -> anyhow::Result<Option<AstNode>>;
}

#[cfg(test)]
mod tests;
