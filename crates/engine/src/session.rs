//! State of one loaded source: its text, the parsed tree and everything
//! derived from it.

use anyhow::{Context, Result};
use ir::{AstNode, SourceParser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::filter::{evaluate, Filter, FilterResult};
use crate::hash::checksum;
use crate::index::{build_search_index_with, SearchIndex};
use crate::path::NodeState;
use crate::terms::{extract_search_terms_with, SearchTerms};
use crate::visibility::{KeyVisibility, COMMON_KEYS};
use crate::walk::WalkLimits;

/// Source text and how to parse it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeState {
    pub content: String,
    pub language: String,
    pub parser_id: String,
}

impl CodeState {
    pub fn new(
        content: impl Into<String>,
        language: impl Into<String>,
        parser_id: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            language: language.into(),
            parser_id: parser_id.into(),
        }
    }

    pub fn checksum(&self) -> String {
        checksum(&[&self.content, &self.language, &self.parser_id])
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    code: CodeState,
    indexed_checksum: Option<String>,
    tree: Option<Arc<AstNode>>,
    index: SearchIndex,
    terms: SearchTerms,
    filter: Filter,
    visibility: KeyVisibility,
    node_state: NodeState,
    seed_keys: Vec<String>,
    limits: WalkLimits,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_visible_keys(COMMON_KEYS.iter().map(|k| k.to_string()).collect())
    }

    /// Session whose key visibility is seeded from `keys` instead of
    /// [`COMMON_KEYS`].
    pub fn with_visible_keys(keys: Vec<String>) -> Self {
        Self {
            code: CodeState::default(),
            indexed_checksum: None,
            tree: None,
            index: SearchIndex::default(),
            terms: SearchTerms::default(),
            filter: Filter::default(),
            visibility: KeyVisibility::default(),
            node_state: NodeState::default(),
            seed_keys: keys,
            limits: WalkLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: WalkLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parses `code` and rebuilds the derived structures, unless it matches
    /// the source already indexed. Returns whether anything was rebuilt.
    ///
    /// A parse failure leaves the session empty and is returned; loading
    /// the same source again retries the parse.
    pub fn load(&mut self, code: CodeState, parser: &dyn SourceParser) -> Result<bool> {
        let sum = code.checksum();
        if self.indexed_checksum.as_deref() == Some(sum.as_str()) {
            debug!(checksum = %sum, "Source unchanged; keeping index");
            return Ok(false);
        }
        self.code = code;
        self.indexed_checksum = None;
        self.install(None);

        if self.code.parser_id.is_empty() {
            debug!(language = %self.code.language, "No parser selected");
            self.indexed_checksum = Some(sum);
            return Ok(true);
        }
        let parsed = parser
            .parse(&self.code.content, &self.code.language, &self.code.parser_id)
            .with_context(|| {
                format!(
                    "failed to parse {} source with {}",
                    self.code.language, self.code.parser_id
                )
            })?;
        self.install(parsed.map(Arc::new));
        self.indexed_checksum = Some(sum);
        Ok(true)
    }

    fn install(&mut self, tree: Option<Arc<AstNode>>) {
        match &tree {
            Some(root) => {
                self.index = build_search_index_with(root, self.limits);
                self.terms = extract_search_terms_with(root, self.limits);
                self.visibility = KeyVisibility::seeded(&self.terms, &self.seed_keys);
                info!(
                    language = %self.code.language,
                    parser = %self.code.parser_id,
                    nodes = self.index.stats().nodes,
                    keys = self.terms.len(),
                    "Tree indexed"
                );
            }
            None => {
                self.index = SearchIndex::default();
                self.terms = SearchTerms::default();
                self.visibility = KeyVisibility::default();
            }
        }
        self.node_state.clear();
        self.tree = tree;
    }

    pub fn code(&self) -> &CodeState {
        &self.code
    }

    /// Checksum of the source the current index was built from.
    pub fn indexed_checksum(&self) -> Option<&str> {
        self.indexed_checksum.as_deref()
    }

    pub fn tree(&self) -> Option<&Arc<AstNode>> {
        self.tree.as_ref()
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn terms(&self) -> &SearchTerms {
        &self.terms
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visibility(&self) -> &KeyVisibility {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut KeyVisibility {
        &mut self.visibility
    }

    pub fn node_state(&self) -> &NodeState {
        &self.node_state
    }

    pub fn node_state_mut(&mut self) -> &mut NodeState {
        &mut self.node_state
    }

    pub fn limits(&self) -> WalkLimits {
        self.limits
    }

    /// Current filter applied to the current tree; empty without a tree.
    pub fn results(&self) -> FilterResult {
        match &self.tree {
            Some(root) => evaluate(root, &self.filter, &self.index),
            None => FilterResult::new(),
        }
    }
}
