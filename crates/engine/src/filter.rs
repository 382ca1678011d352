//! Tag filters and their evaluation against a [`SearchIndex`].

use indexmap::IndexMap;
use ir::AstNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::index::SearchIndex;
use crate::path::{build_path, ROOT_PATH};

/// A single `tag=term` predicate: nodes whose property `tag` stringifies
/// to `term`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterTag {
    pub tag: String,
    pub term: String,
}

impl FilterTag {
    pub fn new(tag: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            term: term.into(),
        }
    }
}

impl FromStr for FilterTag {
    type Err = String;

    /// Splits on the first `=`, so terms may themselves contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, term) = s
            .split_once('=')
            .ok_or_else(|| format!("expected tag=term, got `{s}`"))?;
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(format!("missing tag in `{s}`"));
        }
        Ok(Self::new(tag, term))
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.term)
    }
}

/// Ordered set of tags, combined with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    tags: Vec<FilterTag>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless an equal tag is already present.
    pub fn push(&mut self, tag: FilterTag) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Removes `tag`, returning whether it was present.
    pub fn remove(&mut self, tag: &FilterTag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn tags(&self) -> &[FilterTag] {
        &self.tags
    }
}

impl FromIterator<FilterTag> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterTag>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for tag in iter {
            filter.push(tag);
        }
        filter
    }
}

/// Node path → matched node, in insertion order.
pub type FilterResult = IndexMap<String, Arc<AstNode>>;

/// Resolves `filter` against `index`.
///
/// With no tags the whole tree is returned under [`ROOT_PATH`]. Otherwise
/// every node matched by any tag is keyed by a path built from its position
/// in that tag's match list. Tags combine with OR and a node matched by
/// several tags is not deduplicated. Paths are not unique across tags: a
/// later match with an equal path replaces the earlier node but keeps its
/// slot, so two qualifying nodes can collapse into one entry (`name=a` and
/// `name=b` over `a; b;` both yield `root.Identifier[0]`). Tags that match
/// nothing contribute nothing.
pub fn evaluate(root: &Arc<AstNode>, filter: &Filter, index: &SearchIndex) -> FilterResult {
    let mut results = FilterResult::new();
    if filter.is_empty() {
        results.insert(ROOT_PATH.to_string(), Arc::clone(root));
        return results;
    }
    for FilterTag { tag, term } in filter.tags() {
        let matches = index.lookup(tag, term);
        if matches.is_empty() {
            debug!(tag = %tag, term = %term, "No nodes match filter tag");
            continue;
        }
        for (i, node) in matches.iter().enumerate() {
            results.insert(build_path(Some(node), ROOT_PATH, i), Arc::clone(node));
        }
    }
    debug!(tags = filter.len(), results = results.len(), "Filter evaluated");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_term_pairs() {
        let tag: FilterTag = "name=a=b".parse().unwrap();
        assert_eq!(tag, FilterTag::new("name", "a=b"));
        assert_eq!(tag.to_string(), "name=a=b");
        let empty_term: FilterTag = "value=".parse().unwrap();
        assert_eq!(empty_term.term, "");
        assert!("name".parse::<FilterTag>().is_err());
        assert!("=x".parse::<FilterTag>().is_err());
    }

    #[test]
    fn push_and_remove_keep_order() {
        let mut filter = Filter::new();
        filter.push(FilterTag::new("type", "Identifier"));
        filter.push(FilterTag::new("name", "a"));
        filter.push(FilterTag::new("type", "Identifier"));
        assert_eq!(filter.len(), 2);
        assert!(filter.remove(&FilterTag::new("type", "Identifier")));
        assert!(!filter.remove(&FilterTag::new("type", "Identifier")));
        assert_eq!(filter.tags(), [FilterTag::new("name", "a")]);
    }
}
