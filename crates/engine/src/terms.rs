//! Search-term extraction: every property name in a tree and the distinct
//! primitive values seen under it, for filter autocomplete.

use indexmap::{IndexMap, IndexSet};
use ir::{AstNode, NodeValue};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use crate::walk::{walk, Visitor, WalkLimits};

/// Property name → distinct stringified values, both in first-seen order.
///
/// Keys whose values are never primitive (nested nodes, lists, nulls)
/// are still present with an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchTerms {
    terms: IndexMap<String, IndexSet<String>>,
}

impl SearchTerms {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn values(&self, key: &str) -> Option<&IndexSet<String>> {
        self.terms.get(key)
    }

    pub fn contains(&self, key: &str, term: &str) -> bool {
        self.terms.get(key).is_some_and(|v| v.contains(term))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Keys worth offering as filter tags: those with at least one value,
    /// alphabetised.
    pub fn filter_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .terms
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_by(|a, b| alphabetical(a, b));
        keys
    }

    /// Values of `tag` containing `query`, ignoring case, alphabetised.
    /// An empty query lists every value.
    pub fn suggest(&self, tag: &str, query: &str) -> Vec<&str> {
        let Some(values) = self.terms.get(tag) else {
            return Vec::new();
        };
        let needle = query.to_lowercase();
        let mut hits: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|v| v.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| alphabetical(a, b));
        hits
    }
}

fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[derive(Default)]
struct TermCollector {
    terms: IndexMap<String, IndexSet<String>>,
}

impl Visitor for TermCollector {
    fn property(&mut self, _owner: &Arc<AstNode>, key: &str, value: &NodeValue) {
        if !self.terms.contains_key(key) {
            self.terms.insert(key.to_string(), IndexSet::new());
        }
        if let (Some(term), Some(set)) = (value.term(), self.terms.get_mut(key)) {
            set.insert(term);
        }
    }
}

pub fn extract_search_terms(root: &Arc<AstNode>) -> SearchTerms {
    extract_search_terms_with(root, WalkLimits::default())
}

pub fn extract_search_terms_with(root: &Arc<AstNode>, limits: WalkLimits) -> SearchTerms {
    let mut collector = TermCollector::default();
    let stats = walk(root, limits, &mut collector);
    debug!(
        keys = collector.terms.len(),
        nodes = stats.nodes,
        "Search terms extracted"
    );
    SearchTerms {
        terms: collector.terms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<AstNode> {
        Arc::new(
            AstNode::with_type("Program")
                .with(
                    "body",
                    vec![
                        NodeValue::from(AstNode::with_type("Identifier").with("name", "Beta")),
                        NodeValue::from(AstNode::with_type("Identifier").with("name", "alpha")),
                        NodeValue::from(AstNode::with_type("Identifier").with("name", "Beta")),
                    ],
                )
                .with("regex", NodeValue::Null),
        )
    }

    #[test]
    fn keys_in_first_seen_order() {
        let terms = extract_search_terms(&sample());
        let keys: Vec<&str> = terms.keys().collect();
        assert_eq!(keys, ["type", "body", "name", "regex"]);
        let names: Vec<&str> = terms.values("name").unwrap().iter().map(String::as_str).collect();
        assert_eq!(names, ["Beta", "alpha"]);
        assert!(terms.values("body").unwrap().is_empty());
        assert!(terms.values("regex").unwrap().is_empty());
    }

    #[test]
    fn filter_keys_skip_empty_sets() {
        let terms = extract_search_terms(&sample());
        assert_eq!(terms.filter_keys(), ["name", "type"]);
    }

    #[test]
    fn suggestions_ignore_case() {
        let terms = extract_search_terms(&sample());
        assert_eq!(terms.suggest("name", "A"), ["alpha", "Beta"]);
        assert_eq!(terms.suggest("name", "bet"), ["Beta"]);
        assert!(terms.suggest("name", "zzz").is_empty());
        assert!(terms.suggest("missing", "").is_empty());
    }
}
