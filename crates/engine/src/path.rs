//! Node path addressing.
//!
//! A path is `{parent}.{label}[{index}]`, rooted at [`ROOT_PATH`]. It is
//! deterministic for a given parent path, label and position, which lets
//! expand/collapse state keyed by path survive a re-render as long as the
//! same node stays in the same place.

use ir::AstNode;
use std::collections::HashMap;

/// Sentinel every path starts from.
pub const ROOT_PATH: &str = "root";

/// Builds the path of `node` at `index` below `parent_path`.
///
/// # Example
/// ```
/// use engine::{build_path, ROOT_PATH};
/// use ir::AstNode;
/// let id = AstNode::with_type("Identifier");
/// assert_eq!(build_path(Some(&id), ROOT_PATH, 2), "root.Identifier[2]");
/// assert_eq!(build_path(None, ROOT_PATH, 0), "root.Object[0]");
/// ```
pub fn build_path(node: Option<&AstNode>, parent_path: &str, index: usize) -> String {
    let label = node.map_or(ir::DEFAULT_LABEL, AstNode::label);
    format!("{parent_path}.{label}[{index}]")
}

/// Expand/collapse state of rendered nodes, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct NodeState {
    states: HashMap<String, bool>,
    default_expanded: bool,
}

impl NodeState {
    /// Unseen paths report `default_expanded`.
    pub fn new(default_expanded: bool) -> Self {
        Self {
            states: HashMap::new(),
            default_expanded,
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.states
            .get(path)
            .copied()
            .unwrap_or(self.default_expanded)
    }

    pub fn set(&mut self, path: impl Into<String>, expanded: bool) {
        self.states.insert(path.into(), expanded);
    }

    /// Flips the state of `path` and returns the new value.
    pub fn toggle(&mut self, path: &str) -> bool {
        let next = !self.is_expanded(path);
        self.set(path, next);
        next
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
