//! Depth-first pre-order traversal shared by the term extractor and the
//! index builder.
//!
//! Every visited node reports its direct properties in order, then the
//! walk descends into node-valued properties and into the nodes of list
//! values. Back-references ([`NodeValue::Parent`]) are never followed and
//! descent stops at [`WalkLimits::max_depth`], so a pathological tree turns
//! into a counted truncation instead of a stack overflow.

use ir::{AstNode, NodeValue};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::path::{build_path, ROOT_PATH};

pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    pub max_depth: usize,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Nodes visited.
    pub nodes: usize,
    /// Subtrees skipped because they were nested beyond the depth limit.
    pub truncated: usize,
}

pub trait Visitor {
    /// Called once per node, before its properties.
    fn enter(&mut self, _node: &Arc<AstNode>, _path: &str) {}

    /// Called for every direct property of a visited node.
    fn property(&mut self, _owner: &Arc<AstNode>, _key: &str, _value: &NodeValue) {}
}

/// Walks the tree below `root`, which sits at [`ROOT_PATH`] index 0.
///
/// List elements are addressed by their list position; a node stored
/// directly in a property is addressed by that property's ordinal in its
/// owner.
pub fn walk<V: Visitor>(root: &Arc<AstNode>, limits: WalkLimits, visitor: &mut V) -> WalkStats {
    let mut walker = Walker {
        limits,
        stats: WalkStats::default(),
        visitor,
    };
    walker.visit(root, ROOT_PATH, 0, 0);
    let stats = walker.stats;
    if stats.truncated > 0 {
        warn!(
            truncated = stats.truncated,
            max_depth = limits.max_depth,
            "Tree nested beyond depth limit; deeper nodes skipped"
        );
    }
    stats
}

struct Walker<'v, V> {
    limits: WalkLimits,
    stats: WalkStats,
    visitor: &'v mut V,
}

impl<V: Visitor> Walker<'_, V> {
    fn visit(&mut self, node: &Arc<AstNode>, parent: &str, index: usize, depth: usize) {
        if depth > self.limits.max_depth {
            self.stats.truncated += 1;
            return;
        }
        self.stats.nodes += 1;
        let path = build_path(Some(node), parent, index);
        self.visitor.enter(node, &path);
        for (ordinal, (key, value)) in node.properties().enumerate() {
            self.visitor.property(node, key, value);
            match value {
                NodeValue::Node(child) => self.visit(child, &path, ordinal, depth + 1),
                NodeValue::List(items) => self.visit_list(items, &path, depth + 1),
                _ => {}
            }
        }
    }

    /// Nested lists are flattened into the enclosing node.
    fn visit_list(&mut self, items: &[NodeValue], parent: &str, depth: usize) {
        if depth > self.limits.max_depth {
            self.stats.truncated += 1;
            return;
        }
        for (i, item) in items.iter().enumerate() {
            match item {
                NodeValue::Node(child) => self.visit(child, parent, i, depth),
                NodeValue::List(inner) => self.visit_list(inner, parent, depth + 1),
                _ => {}
            }
        }
    }
}

struct PathFinder<'a> {
    target: &'a str,
    found: Option<Arc<AstNode>>,
}

impl Visitor for PathFinder<'_> {
    fn enter(&mut self, node: &Arc<AstNode>, path: &str) {
        if self.found.is_none() && path == self.target {
            self.found = Some(Arc::clone(node));
        }
    }
}

/// First node (in traversal order) addressed by `path`.
pub fn find_by_path(root: &Arc<AstNode>, path: &str, limits: WalkLimits) -> Option<Arc<AstNode>> {
    let mut finder = PathFinder {
        target: path,
        found: None,
    };
    walk(root, limits, &mut finder);
    finder.found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        paths: Vec<String>,
        keys: Vec<String>,
    }

    impl Visitor for Recorder {
        fn enter(&mut self, _node: &Arc<AstNode>, path: &str) {
            self.paths.push(path.to_string());
        }

        fn property(&mut self, _owner: &Arc<AstNode>, key: &str, _value: &NodeValue) {
            self.keys.push(key.to_string());
        }
    }

    fn binary() -> Arc<AstNode> {
        Arc::new(
            AstNode::with_type("BinaryExpression")
                .with("left", AstNode::with_type("Identifier").with("name", "x"))
                .with("operator", "+")
                .with("right", AstNode::with_type("Identifier").with("name", "y"))
                .with(
                    "extra",
                    vec![
                        NodeValue::from(1i64),
                        NodeValue::from(AstNode::with_type("Comment")),
                        NodeValue::List(vec![NodeValue::from(AstNode::new())]),
                    ],
                ),
        )
    }

    #[test]
    fn pre_order_with_positional_paths() {
        let mut rec = Recorder::default();
        let stats = walk(&binary(), WalkLimits::default(), &mut rec);
        assert_eq!(
            rec.paths,
            [
                "root.BinaryExpression[0]",
                "root.BinaryExpression[0].Identifier[1]",
                "root.BinaryExpression[0].Identifier[3]",
                "root.BinaryExpression[0].Comment[1]",
                "root.BinaryExpression[0].Object[0]",
            ]
        );
        assert_eq!(
            rec.keys,
            ["type", "left", "type", "name", "operator", "right", "type", "name", "extra", "type"]
        );
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.truncated, 0);
    }

    #[test]
    fn back_references_are_not_followed() {
        let root = Arc::new_cyclic(|weak| {
            let child = AstNode::with_type("Child").with("parent", NodeValue::Parent(weak.clone()));
            AstNode::with_type("Root").with("child", child)
        });
        let mut rec = Recorder::default();
        let stats = walk(&root, WalkLimits::default(), &mut rec);
        assert_eq!(stats.nodes, 2);
        assert!(rec.keys.contains(&"parent".to_string()));
    }

    #[test]
    fn depth_limit_truncates_instead_of_overflowing() {
        let mut node = AstNode::with_type("Leaf");
        for _ in 0..50 {
            node = AstNode::with_type("Wrap").with("inner", node);
        }
        let root = Arc::new(node);
        let mut rec = Recorder::default();
        let stats = walk(&root, WalkLimits { max_depth: 10 }, &mut rec);
        assert_eq!(stats.nodes, 11);
        assert_eq!(stats.truncated, 1);
    }

    #[test]
    fn finds_nodes_by_path() {
        let root = binary();
        let found = find_by_path(
            &root,
            "root.BinaryExpression[0].Identifier[3]",
            WalkLimits::default(),
        )
        .unwrap();
        assert_eq!(found.get("name").and_then(NodeValue::as_str), Some("y"));
        assert!(find_by_path(&root, "root.Nope[0]", WalkLimits::default()).is_none());
    }
}
