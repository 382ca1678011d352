//! Conversion of tree-sitter syntax trees into ESTree-shaped [`AstNode`]s.
//!
//! Kinds with an ESTree counterpart take its `type` and property names
//! (`program` becomes `Program` with a `body` list, a declarator's `name`
//! and `value` fields become `id` and `init`). Other kinds keep their
//! CamelCased tree-sitter kind, grammar field names, and a `children` list
//! for named children outside any field.

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use ir::{AstNode, NodeValue};
use tracing::debug;

/// Nodes nested deeper than this are replaced by a truncated stub.
///
/// Two levels below the deepest node are left for its `loc.start` and
/// `loc.end` records, so a walk with the engine's default limit of 512
/// reaches every converted node.
pub const MAX_TREE_DEPTH: usize = 510;

/// Wrappers replaced by their single named child.
const TRANSPARENT: &[&str] = &["parenthesized_expression", "else_clause", "class_heritage"];

/// Wrappers whose named children are spliced into the owning list.
const SPLICED: &[&str] = &["arguments", "formal_parameters"];

/// ESTree layout of a tree-sitter kind.
#[derive(Clone, Copy)]
struct Shape {
    name: &'static str,
    /// Grammar field → ESTree property. Unlisted fields keep their name.
    fields: &'static [(&'static str, &'static str)],
    /// Property receiving named children that sit under no field.
    rest: &'static str,
    /// Properties that are always lists, present even when empty.
    lists: &'static [&'static str],
}

impl Shape {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: &[],
            rest: "children",
            lists: &[],
        }
    }

    const fn fields(mut self, fields: &'static [(&'static str, &'static str)]) -> Self {
        self.fields = fields;
        self
    }

    const fn rest(mut self, rest: &'static str) -> Self {
        self.rest = rest;
        self
    }

    const fn lists(mut self, lists: &'static [&'static str]) -> Self {
        self.lists = lists;
        self
    }

    fn is_list(&self, key: &str) -> bool {
        self.lists.contains(&key)
    }

    fn property(&self, field: &str) -> String {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map_or_else(|| property_key(field), |(_, p)| (*p).to_string())
    }
}

const FUNCTION_FIELDS: &[(&str, &str)] = &[("name", "id"), ("parameters", "params")];
const CALL_FIELDS: &[(&str, &str)] = &[("function", "callee"), ("arguments", "arguments")];
const CONDITIONAL_FIELDS: &[(&str, &str)] = &[
    ("condition", "test"),
    ("consequence", "consequent"),
    ("alternative", "alternate"),
];

fn shape(kind: &str) -> Option<Shape> {
    let shape = match kind {
        "program" => Shape::new("Program").rest("body").lists(&["body"]),
        "statement_block" => Shape::new("BlockStatement").rest("body").lists(&["body"]),
        "class_body" => Shape::new("ClassBody")
            .fields(&[("member", "body")])
            .rest("body")
            .lists(&["body"]),
        "lexical_declaration" | "variable_declaration" => Shape::new("VariableDeclaration")
            .rest("declarations")
            .lists(&["declarations"]),
        "variable_declarator" => {
            Shape::new("VariableDeclarator").fields(&[("name", "id"), ("value", "init")])
        }
        "expression_statement" => Shape::new("ExpressionStatement").rest("expression"),
        "return_statement" => Shape::new("ReturnStatement").rest("argument"),
        "throw_statement" => Shape::new("ThrowStatement").rest("argument"),
        "spread_element" => Shape::new("SpreadElement").rest("argument"),
        "await_expression" => Shape::new("AwaitExpression").rest("argument"),
        "call_expression" => Shape::new("CallExpression")
            .fields(CALL_FIELDS)
            .lists(&["arguments"]),
        "new_expression" => Shape::new("NewExpression")
            .fields(&[("constructor", "callee"), ("arguments", "arguments")])
            .lists(&["arguments"]),
        "member_expression" => Shape::new("MemberExpression"),
        "subscript_expression" => Shape::new("MemberExpression").fields(&[("index", "property")]),
        "function_declaration" | "generator_function_declaration" => {
            Shape::new("FunctionDeclaration")
                .fields(FUNCTION_FIELDS)
                .lists(&["params"])
        }
        "function" | "function_expression" | "generator_function" => {
            Shape::new("FunctionExpression")
                .fields(FUNCTION_FIELDS)
                .lists(&["params"])
        }
        "arrow_function" => Shape::new("ArrowFunctionExpression")
            .fields(&[("parameter", "params"), ("parameters", "params")])
            .lists(&["params"]),
        "method_definition" => Shape::new("MethodDefinition")
            .fields(&[("name", "key"), ("parameters", "params")])
            .lists(&["params"]),
        "class_declaration" => Shape::new("ClassDeclaration")
            .fields(&[("name", "id")])
            .rest("superClass"),
        "class" => Shape::new("ClassExpression")
            .fields(&[("name", "id")])
            .rest("superClass"),
        "if_statement" => Shape::new("IfStatement").fields(CONDITIONAL_FIELDS),
        "ternary_expression" => Shape::new("ConditionalExpression").fields(CONDITIONAL_FIELDS),
        "while_statement" => Shape::new("WhileStatement").fields(&[("condition", "test")]),
        "do_statement" => Shape::new("DoWhileStatement").fields(&[("condition", "test")]),
        "for_statement" => Shape::new("ForStatement").fields(&[
            ("initializer", "init"),
            ("condition", "test"),
            ("increment", "update"),
        ]),
        "for_in_statement" => Shape::new("ForInStatement"),
        "try_statement" => {
            Shape::new("TryStatement").fields(&[("body", "block"), ("handler", "handler")])
        }
        "catch_clause" => Shape::new("CatchClause").fields(&[("parameter", "param")]),
        "binary_expression" => Shape::new("BinaryExpression"),
        "unary_expression" => Shape::new("UnaryExpression"),
        "update_expression" => Shape::new("UpdateExpression"),
        "assignment_expression" | "augmented_assignment_expression" => {
            Shape::new("AssignmentExpression")
        }
        "object" => Shape::new("ObjectExpression")
            .rest("properties")
            .lists(&["properties"]),
        "pair" => Shape::new("Property"),
        "array" => Shape::new("ArrayExpression")
            .rest("elements")
            .lists(&["elements"]),
        "this" => Shape::new("ThisExpression"),
        "super" => Shape::new("Super"),
        "number" | "string" | "true" | "false" | "null" => Shape::new("Literal"),
        k if k.ends_with("identifier") => Shape::new("Identifier"),
        _ => return None,
    };
    Some(shape)
}

pub(crate) fn to_camel(kind: &str) -> String {
    let mut out = String::new();
    let mut up = true;
    for ch in kind.chars() {
        if ch == '_' {
            up = true;
        } else if up {
            out.push(ch.to_ascii_uppercase());
            up = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub(crate) fn to_lower_camel(field: &str) -> String {
    let camel = to_camel(field);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => camel,
    }
}

/// Property name for a grammar field. Fields that would clash with the
/// properties every node carries get a distinct name.
fn property_key(field: &str) -> String {
    let key = to_lower_camel(field);
    match key.as_str() {
        "type" => "typeAnnotation".to_string(),
        "start" | "end" | "loc" | "children" => format!("{key}Field"),
        _ => key,
    }
}

/// Parses `content` with `language` and converts the resulting tree.
pub fn parse_with(language: tree_sitter::Language, content: &str) -> Result<Option<AstNode>> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(language)
        .map_err(|e| anyhow!("failed to load grammar: {e}"))?;
    let Some(tree) = parser.parse(content, None) else {
        return Ok(None);
    };
    let root = tree.root_node();
    let mut node = convert(root, content.as_bytes(), 0);
    if root.has_error() {
        debug!(kind = root.kind(), "Syntax tree contains errors");
        node.insert("hasError", true);
    }
    Ok(Some(node))
}

fn position(point: tree_sitter::Point) -> AstNode {
    AstNode::new()
        .with("line", point.row + 1)
        .with("column", point.column)
}

fn location(node: &tree_sitter::Node) -> AstNode {
    AstNode::new()
        .with("start", position(node.start_position()))
        .with("end", position(node.end_position()))
}

fn convert(node: tree_sitter::Node, src: &[u8], depth: usize) -> AstNode {
    let kind = node.kind();
    let known = shape(kind);
    let name = known.map_or_else(|| to_camel(kind), |s| s.name.to_string());
    let mut out = AstNode::with_type(name)
        .with("start", node.start_byte())
        .with("end", node.end_byte())
        .with("loc", location(&node));
    if depth >= MAX_TREE_DEPTH {
        out.insert("truncated", true);
        return out;
    }
    let text = node.utf8_text(src).unwrap_or_default();

    // String literals carry their content; fragments and escapes add nothing.
    if kind == "string" {
        out.insert("value", unescape(unquote(text)));
        out.insert("raw", text);
        return out;
    }
    if node.named_child_count() == 0 {
        leaf_properties(&mut out, kind, text);
    }

    let layout = known.unwrap_or(Shape::new("").lists(&["children"]));
    let mut props: IndexMap<String, Vec<NodeValue>> = IndexMap::new();
    let mut comments = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            match cursor.field_name() {
                Some(field) => {
                    let key = layout.property(field);
                    let splice = layout.is_list(&key);
                    let values = props.entry(key).or_default();
                    if child.is_named() {
                        push_converted(values, child, src, depth + 1, splice);
                    } else {
                        values.push(NodeValue::from(child.utf8_text(src).unwrap_or_default()));
                    }
                }
                None if child.kind() == "comment" => {
                    comments.push(NodeValue::from(convert(child, src, depth + 1)));
                }
                None if child.is_named() => {
                    let values = props.entry(layout.rest.to_string()).or_default();
                    push_converted(values, child, src, depth + 1, false);
                }
                None => {}
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    for key in layout.lists {
        props.entry((*key).to_string()).or_default();
    }
    for (key, mut values) in props {
        let value = if layout.is_list(&key) || values.len() > 1 {
            NodeValue::List(values)
        } else {
            values.pop().unwrap_or(NodeValue::Null)
        };
        out.insert(key, value);
    }
    if !comments.is_empty() {
        out.insert("comments", comments);
    }
    refine(&mut out, kind, node, src);
    out
}

/// Converts `child` into `values`, looking through transparent wrappers.
/// With `splice`, argument and parameter lists contribute their items.
fn push_converted(
    values: &mut Vec<NodeValue>,
    child: tree_sitter::Node,
    src: &[u8],
    depth: usize,
    splice: bool,
) {
    let child = unwrap_transparent(child);
    if splice && SPLICED.contains(&child.kind()) {
        let mut cursor = child.walk();
        values.extend(
            child
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|c| NodeValue::from(convert(unwrap_transparent(c), src, depth))),
        );
    } else {
        values.push(NodeValue::from(convert(child, src, depth)));
    }
}

fn unwrap_transparent(mut node: tree_sitter::Node) -> tree_sitter::Node {
    while TRANSPARENT.contains(&node.kind()) && node.named_child_count() == 1 {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// ESTree details the grammar leaves implicit.
fn refine(out: &mut AstNode, kind: &str, node: tree_sitter::Node, src: &[u8]) {
    match kind {
        "lexical_declaration" | "variable_declaration" if !out.contains_key("kind") => {
            let keyword = node
                .child(0)
                .and_then(|c| c.utf8_text(src).ok())
                .unwrap_or("var");
            out.insert("kind", keyword);
        }
        "binary_expression" => {
            let logical = matches!(
                out.get("operator").and_then(NodeValue::as_str),
                Some("&&" | "||" | "??")
            );
            if logical {
                out.insert("type", "LogicalExpression");
            }
        }
        "assignment_expression" if !out.contains_key("operator") => out.insert("operator", "="),
        "member_expression" => out.insert("computed", false),
        "subscript_expression" => out.insert("computed", true),
        "for_in_statement" => {
            if out.get("operator").and_then(NodeValue::as_str) == Some("of") {
                out.insert("type", "ForOfStatement");
            }
        }
        _ => {}
    }
}

fn leaf_properties(out: &mut AstNode, kind: &str, text: &str) {
    match kind {
        k if k.ends_with("identifier") => out.insert("name", text),
        "number" => {
            if let Some(value) = number_value(text) {
                out.insert("value", value);
            }
            out.insert("raw", text);
        }
        "true" | "false" => {
            out.insert("value", kind == "true");
            out.insert("raw", text);
        }
        "null" => {
            out.insert("value", NodeValue::Null);
            out.insert("raw", text);
        }
        _ => out.insert("raw", text),
    }
}

fn unquote(raw: &str) -> &str {
    let quoted = raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')));
    if quoted {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// Decodes the escape sequences of a string literal body.
///
/// Surrogate pairs written as two `\u` escapes combine into one character;
/// a lone surrogate becomes U+FFFD.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let (code, used) = escape(&rest[pos + 1..]);
        rest = &rest[pos + 1 + used..];
        let Some(mut code) = code else {
            continue;
        };
        if (0xD800..0xDC00).contains(&code) {
            if let Some(tail) = rest.strip_prefix("\\u") {
                if let Some(low) = hex(tail, 4).filter(|v| (0xDC00..0xE000).contains(v)) {
                    code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    rest = &tail[4..];
                }
            }
        }
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    out.push_str(rest);
    out
}

/// Decodes the escape at the start of `s`, the text after a backslash.
/// Returns the code point (`None` for a line continuation) and the number
/// of bytes consumed. Malformed hex escapes decode to their letter.
fn escape(s: &str) -> (Option<u32>, usize) {
    let Some(c) = s.chars().next() else {
        return (Some(u32::from('\\')), 0);
    };
    let tail = &s[c.len_utf8()..];
    match c {
        'n' => (Some(0x0A), 1),
        't' => (Some(0x09), 1),
        'r' => (Some(0x0D), 1),
        'b' => (Some(0x08), 1),
        'f' => (Some(0x0C), 1),
        'v' => (Some(0x0B), 1),
        '0' if !tail.starts_with(|d: char| d.is_ascii_digit()) => (Some(0), 1),
        '\r' if tail.starts_with('\n') => (None, 2),
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => (None, c.len_utf8()),
        'x' => hex(tail, 2).map_or((Some(u32::from('x')), 1), |v| (Some(v), 3)),
        'u' => {
            if let Some(braced) = tail.strip_prefix('{') {
                let code = braced
                    .find('}')
                    .and_then(|end| hex(&braced[..end], end).map(|v| (v, end)))
                    .filter(|(v, _)| *v <= 0x10FFFF);
                match code {
                    Some((v, end)) => (Some(v), end + 3),
                    None => (Some(u32::from('u')), 1),
                }
            } else {
                hex(tail, 4).map_or((Some(u32::from('u')), 1), |v| (Some(v), 5))
            }
        }
        other => (Some(u32::from(other)), other.len_utf8()),
    }
}

fn hex(s: &str, len: usize) -> Option<u32> {
    let digits = s.get(..len)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Numeric value of a JS/TS number literal. Integral values are kept as
/// integers so they stringify the way the language prints them.
pub(crate) fn number_value(raw: &str) -> Option<NodeValue> {
    let cleaned = raw.replace('_', "").to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = cleaned.strip_prefix(prefix) {
            return i64::from_str_radix(digits, radix).ok().map(NodeValue::from);
        }
    }
    if let Ok(i) = cleaned.parse::<i64>() {
        return Some(i.into());
    }
    let f = cleaned.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        return Some((f as i64).into());
    }
    serde_json::Number::from_f64(f).map(NodeValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_conversions() {
        assert_eq!(to_camel("variable_declarator"), "VariableDeclarator");
        assert_eq!(to_camel("program"), "Program");
        assert_eq!(to_lower_camel("type_parameters"), "typeParameters");
        assert_eq!(property_key("type"), "typeAnnotation");
        assert_eq!(property_key("body"), "body");
        assert_eq!(property_key("start"), "startField");
    }

    #[test]
    fn estree_shapes_rename_fields() {
        let declarator = shape("variable_declarator").unwrap();
        assert_eq!(declarator.name, "VariableDeclarator");
        assert_eq!(declarator.property("name"), "id");
        assert_eq!(declarator.property("value"), "init");
        assert_eq!(declarator.property("type"), "typeAnnotation");
        assert_eq!(shape("shorthand_property_identifier").unwrap().name, "Identifier");
        assert!(shape("jsx_element").is_none());
    }

    #[test]
    fn number_literals_follow_js_printing() {
        let term = |raw: &str| number_value(raw).and_then(|v| v.term());
        assert_eq!(term("1").as_deref(), Some("1"));
        assert_eq!(term("1.0").as_deref(), Some("1"));
        assert_eq!(term("1.5").as_deref(), Some("1.5"));
        assert_eq!(term("0x10").as_deref(), Some("16"));
        assert_eq!(term("1_000").as_deref(), Some("1000"));
        assert!(number_value("10n").is_none());
    }

    #[test]
    fn unquote_strips_matching_quotes_only() {
        assert_eq!(unquote("\"hi\""), "hi");
        assert_eq!(unquote("'hi'"), "hi");
        assert_eq!(unquote("\"hi'"), "\"hi'");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(unescape(r"h\u00e9"), "hé");
        assert_eq!(unescape(r"a\tb\n"), "a\tb\n");
        assert_eq!(unescape(r"\x41\u{1F600}"), "A😀");
        assert_eq!(unescape(r"\uD83D\uDE00"), "😀");
        assert_eq!(unescape(r"\uD83D"), "\u{FFFD}");
        assert_eq!(unescape(r#"it\'s \"q\" \\"#), r#"it's "q" \"#);
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
        assert_eq!(unescape(r"\0"), "\0");
        assert_eq!(unescape(r"\xZZ \q"), "xZZ q");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
