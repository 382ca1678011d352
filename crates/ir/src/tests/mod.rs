use super::*;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
// Tests for node construction and JSON interop.

#[test]
fn label_falls_back_to_object() {
    let typed = AstNode::with_type("Identifier");
    assert_eq!(typed.label(), "Identifier");
    assert_eq!(typed.discriminator(), Some("Identifier"));

    let untyped = AstNode::new().with("line", 1i64);
    assert_eq!(untyped.label(), DEFAULT_LABEL);
    assert!(untyped.discriminator().is_none());

    // A non-string tag is not a discriminator.
    let odd = AstNode::new().with(DISCRIMINATOR_KEY, 3i64);
    assert_eq!(odd.label(), "Object");
}

#[test]
fn numbers_and_strings_share_term_form() {
    assert_eq!(NodeValue::from(1i64).term().as_deref(), Some("1"));
    assert_eq!(NodeValue::from("1").term().as_deref(), Some("1"));
    assert_eq!(NodeValue::from(true).term().as_deref(), Some("true"));
    assert!(NodeValue::Null.term().is_none());
    assert!(NodeValue::from(AstNode::new()).term().is_none());
    assert!(NodeValue::List(vec![]).term().is_none());

    let float = NodeValue::from(json!(1.5));
    assert_eq!(float.term().as_deref(), Some("1.5"));
}

#[test]
fn insert_keeps_first_position() {
    let mut node = AstNode::with_type("A").with("x", 1i64).with("y", 2i64);
    node.insert("x", 3i64);
    let keys: Vec<&str> = node.properties().map(|(k, _)| k).collect();
    assert_eq!(keys, ["type", "x", "y"]);
    assert_eq!(node.get("x").and_then(NodeValue::as_u64), Some(3));
    assert_eq!(node.position("y"), Some(2));
    assert_eq!(node.position("z"), None);
}

#[test]
fn from_json_preserves_document_order() {
    let value = json!({
        "type": "VariableDeclaration",
        "kind": "const",
        "declarations": [{
            "type": "VariableDeclarator",
            "id": {"type": "Identifier", "name": "a"},
            "init": {"type": "Literal", "value": 1, "raw": "1"}
        }]
    });
    let node = AstNode::from_json(value).expect("object");
    let keys: Vec<&str> = node.properties().map(|(k, _)| k).collect();
    assert_eq!(keys, ["type", "kind", "declarations"]);

    let Some(NodeValue::List(decls)) = node.get("declarations") else {
        panic!("declarations should be a list");
    };
    let decl = decls[0].as_node().expect("declarator");
    let id = decl.get("id").and_then(NodeValue::as_node).expect("id");
    assert_eq!(id.get("name").and_then(NodeValue::as_str), Some("a"));
}

#[test]
fn from_json_rejects_non_objects() {
    assert!(AstNode::from_json(json!([{"type": "A"}])).is_none());
    assert!(AstNode::from_json(json!("Program")).is_none());
    assert!(AstNode::from_json(JsonValue::Null).is_none());
}

#[test]
fn serialization_roundtrips_through_json() {
    let value = json!({"type": "Literal", "value": 1, "raw": "1", "regex": null, "list": [true, {"a": "b"}]});
    let node = AstNode::from_json(value.clone()).unwrap();
    assert_eq!(node.to_json(), value);
}

#[test]
fn back_references_serialize_as_null() {
    let root = Arc::new_cyclic(|weak| {
        let child = AstNode::with_type("Child").with("parent", NodeValue::Parent(weak.clone()));
        AstNode::with_type("Root").with("child", child)
    });
    let json = root.to_json();
    assert_eq!(json["child"]["type"], "Child");
    assert_eq!(json["child"]["parent"], JsonValue::Null);
}
