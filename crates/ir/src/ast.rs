//! Schema-less AST representation.
//!
//! Parsers disagree on node shapes, so a node is an open record of named
//! properties instead of a fixed struct. Property order is the order the
//! producing parser emitted them in, which keeps every traversal over the
//! tree deterministic.

use indexmap::IndexMap;
use serde_json::Number;
use std::sync::{Arc, Weak};

/// Property holding the node's discriminator ("kind"/"type" tag).
pub const DISCRIMINATOR_KEY: &str = "type";

/// Label used for nodes without a discriminator.
pub const DEFAULT_LABEL: &str = "Object";

/// Value stored under a node property.
#[derive(Debug, Clone)]
pub enum NodeValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Nested node, exclusively owned by this slot in the intended use.
    Node(Arc<AstNode>),
    /// Ordered list of nodes and/or primitives.
    List(Vec<NodeValue>),
    /// Back-reference to an enclosing node. Never traversed.
    Parent(Weak<AstNode>),
}

impl NodeValue {
    /// String form of a primitive value, as used for search terms and
    /// index keys. `1` and `"1"` intentionally produce the same term.
    pub fn term(&self) -> Option<String> {
        match self {
            NodeValue::Bool(b) => Some(b.to_string()),
            NodeValue::Number(n) => Some(n.to_string()),
            NodeValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            NodeValue::Bool(_) | NodeValue::Number(_) | NodeValue::String(_)
        )
    }

    pub fn as_node(&self) -> Option<&Arc<AstNode>> {
        match self {
            NodeValue::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NodeValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::String(s.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(s: String) -> Self {
        NodeValue::String(s)
    }
}

impl From<bool> for NodeValue {
    fn from(b: bool) -> Self {
        NodeValue::Bool(b)
    }
}

impl From<i64> for NodeValue {
    fn from(n: i64) -> Self {
        NodeValue::Number(n.into())
    }
}

impl From<u64> for NodeValue {
    fn from(n: u64) -> Self {
        NodeValue::Number(n.into())
    }
}

impl From<usize> for NodeValue {
    fn from(n: usize) -> Self {
        NodeValue::Number((n as u64).into())
    }
}

impl From<AstNode> for NodeValue {
    fn from(node: AstNode) -> Self {
        NodeValue::Node(Arc::new(node))
    }
}

impl From<Arc<AstNode>> for NodeValue {
    fn from(node: Arc<AstNode>) -> Self {
        NodeValue::Node(node)
    }
}

impl From<Vec<NodeValue>> for NodeValue {
    fn from(items: Vec<NodeValue>) -> Self {
        NodeValue::List(items)
    }
}

/// One syntactic construct: an ordered, open set of named properties.
#[derive(Debug, Clone, Default)]
pub struct AstNode {
    properties: IndexMap<String, NodeValue>,
}

impl AstNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node whose discriminator is `kind`.
    pub fn with_type(kind: impl Into<String>) -> Self {
        let mut node = Self::new();
        node.insert(DISCRIMINATOR_KEY, NodeValue::String(kind.into()));
        node
    }

    /// Sets `key`, replacing any previous value but keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<NodeValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Builder flavour of [`AstNode::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&NodeValue> {
        self.properties.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut NodeValue> {
        self.properties.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Ordinal of `key` among the node's properties.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.properties.get_index_of(key)
    }

    /// Direct properties in insertion order, discriminator included.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &NodeValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The node's `type` tag when it is a string.
    pub fn discriminator(&self) -> Option<&str> {
        self.get(DISCRIMINATOR_KEY).and_then(NodeValue::as_str)
    }

    /// Human readable label: the discriminator or [`DEFAULT_LABEL`].
    pub fn label(&self) -> &str {
        self.discriminator().unwrap_or(DEFAULT_LABEL)
    }
}
