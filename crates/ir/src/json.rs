//! Conversion between [`AstNode`] trees and `serde_json` values.
//!
//! Parsers that already emit JSON (ESTree dumps from acorn, esprima or
//! recast) load through [`AstNode::from_json`]; the CLI serialises trees
//! back through the [`Serialize`] impls.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::ast::{AstNode, NodeValue};

impl From<JsonValue> for NodeValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => NodeValue::Null,
            JsonValue::Bool(b) => NodeValue::Bool(b),
            JsonValue::Number(n) => NodeValue::Number(n),
            JsonValue::String(s) => NodeValue::String(s),
            JsonValue::Array(items) => {
                NodeValue::List(items.into_iter().map(NodeValue::from).collect())
            }
            JsonValue::Object(map) => {
                let mut node = AstNode::new();
                for (k, v) in map {
                    node.insert(k, NodeValue::from(v));
                }
                NodeValue::Node(Arc::new(node))
            }
        }
    }
}

impl AstNode {
    /// Builds a tree from a JSON object. Any other JSON value has no node
    /// shape and yields `None`.
    ///
    /// # Example
    /// ```
    /// use ir::AstNode;
    /// let node = AstNode::from_json(serde_json::json!({"type": "Identifier", "name": "a"})).unwrap();
    /// assert_eq!(node.label(), "Identifier");
    /// assert!(AstNode::from_json(serde_json::json!([1, 2])).is_none());
    /// ```
    pub fn from_json(value: JsonValue) -> Option<AstNode> {
        match NodeValue::from(value) {
            NodeValue::Node(node) => Some(Arc::try_unwrap(node).unwrap_or_else(|n| (*n).clone())),
            _ => None,
        }
    }

    /// Converts the tree back to JSON. Back-references become `null`.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

impl Serialize for NodeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeValue::Null | NodeValue::Parent(_) => serializer.serialize_unit(),
            NodeValue::Bool(b) => serializer.serialize_bool(*b),
            NodeValue::Number(n) => n.serialize(serializer),
            NodeValue::String(s) => serializer.serialize_str(s),
            NodeValue::Node(node) => node.serialize(serializer),
            NodeValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for AstNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.properties() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
