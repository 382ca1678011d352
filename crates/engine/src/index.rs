//! Inverted index from property name and stringified value to the nodes
//! owning that property.

use indexmap::IndexMap;
use ir::{AstNode, NodeValue};
use std::sync::Arc;
use tracing::debug;

use crate::walk::{walk, Visitor, WalkLimits, WalkStats};

type Postings = IndexMap<String, Vec<Arc<AstNode>>>;

/// Read-only once built; a changed tree gets a fresh index.
///
/// Node lists keep traversal order and are not deduplicated: a node
/// holding the same term under the same key twice is impossible, but the
/// number `1` and the string `"1"` share a term.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: IndexMap<String, Postings>,
    stats: WalkStats,
}

impl SearchIndex {
    /// Nodes owning `tag` with a value whose term is `term`, in traversal
    /// order. Unknown tags and terms yield an empty slice.
    pub fn lookup(&self, tag: &str, term: &str) -> &[Arc<AstNode>] {
        self.entries
            .get(tag)
            .and_then(|values| values.get(term))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, tag: &str) -> Option<&Postings> {
        self.entries.get(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (tag, term, node) entries.
    pub fn entry_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|values| values.values())
            .map(Vec::len)
            .sum()
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }
}

/// Same tags, terms and node identities in the same order.
impl PartialEq for SearchIndex {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| {
                    ka == kb
                        && va.len() == vb.len()
                        && va.iter().zip(vb.iter()).all(|((ta, na), (tb, nb))| {
                            ta == tb
                                && na.len() == nb.len()
                                && na.iter().zip(nb.iter()).all(|(a, b)| Arc::ptr_eq(a, b))
                        })
                })
    }
}

#[derive(Default)]
struct IndexBuilder {
    entries: IndexMap<String, Postings>,
}

impl Visitor for IndexBuilder {
    fn property(&mut self, owner: &Arc<AstNode>, key: &str, value: &NodeValue) {
        let Some(term) = value.term() else {
            return;
        };
        if !self.entries.contains_key(key) {
            self.entries.insert(key.to_string(), IndexMap::new());
        }
        if let Some(values) = self.entries.get_mut(key) {
            values.entry(term).or_default().push(Arc::clone(owner));
        }
    }
}

pub fn build_search_index(root: &Arc<AstNode>) -> SearchIndex {
    build_search_index_with(root, WalkLimits::default())
}

pub fn build_search_index_with(root: &Arc<AstNode>, limits: WalkLimits) -> SearchIndex {
    let mut builder = IndexBuilder::default();
    let stats = walk(root, limits, &mut builder);
    let index = SearchIndex {
        entries: builder.entries,
        stats,
    };
    debug!(
        tags = index.len(),
        entries = index.entry_count(),
        nodes = stats.nodes,
        "Search index built"
    );
    index
}
