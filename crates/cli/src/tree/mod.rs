//! `tree` command: renders filter results as an indented tree.

use anyhow::{anyhow, Result};
use colored::*;
use engine::{
    build_path, find_by_path, project, FilterResult, KeyVisibility, NodeState, ROOT_PATH,
};
use ir::{AstNode, NodeValue};
use parsers::Registry;
use serde_json::{Map, Value as JsonValue};
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

use crate::args::TreeArgs;
use crate::config::Config;
use crate::output::{print_json, Format};
use crate::source::load_session;

pub fn run_tree(args: TreeArgs, config: &Config) -> Result<()> {
    let registry = Registry::new();
    let mut session = load_session(&args.source, config, &registry)?;
    session.set_filter(args.filters.iter().cloned().collect());

    let terms = session.terms().clone();
    let visibility = session.visibility_mut();
    if args.all_keys {
        for key in terms.keys() {
            visibility.show(key);
        }
    }
    for key in &args.show {
        visibility.show(key.as_str());
    }
    for key in &args.hide {
        visibility.hide(key);
    }

    *session.node_state_mut() = NodeState::new(true);
    for path in &args.collapse {
        session.node_state_mut().set(path.as_str(), false);
    }

    let results = match (&args.at, session.tree()) {
        (Some(path), Some(root)) => {
            let node = find_by_path(root, path, session.limits())
                .ok_or_else(|| anyhow!("No node at path {path}"))?;
            FilterResult::from([(path.clone(), node)])
        }
        _ => session.results(),
    };
    debug!(results = results.len(), "Rendering tree");

    match args.format {
        Format::Json => {
            let map: Map<String, JsonValue> = results
                .iter()
                .map(|(path, node)| (path.clone(), node.to_json()))
                .collect();
            print_json(&map)
        }
        Format::Text => {
            if session.tree().is_none() {
                println!("No syntax tree produced for {}", args.source.file.display());
                return Ok(());
            }
            let view = TreeView {
                visibility: session.visibility(),
                state: session.node_state(),
                max_depth: session.limits().max_depth,
            };
            print!("{}", view.render(&results));
            Ok(())
        }
    }
}

/// Text rendering of nodes under a key projection and expand state.
pub struct TreeView<'a> {
    pub visibility: &'a KeyVisibility,
    pub state: &'a NodeState,
    pub max_depth: usize,
}

impl TreeView<'_> {
    /// Each result is rendered as its own tree. The whole-tree result keyed
    /// by [`ROOT_PATH`] takes the path its root has during traversal.
    pub fn render(&self, results: &FilterResult) -> String {
        let mut out = String::new();
        for (key, node) in results {
            let path = if key == ROOT_PATH {
                build_path(Some(node), ROOT_PATH, 0)
            } else {
                key.clone()
            };
            self.node(&mut out, node, &path, 0);
        }
        out
    }

    fn node(&self, out: &mut String, node: &Arc<AstNode>, path: &str, depth: usize) {
        let indent = "  ".repeat(depth);
        let expanded = self.state.is_expanded(path);
        let marker = if expanded { "▾" } else { "▸" };
        let _ = writeln!(
            out,
            "{indent}{marker} {} {}",
            node.label().bright_cyan().bold(),
            path.dimmed()
        );
        if !expanded {
            return;
        }
        if depth >= self.max_depth {
            let _ = writeln!(out, "{indent}  {}", "…".dimmed());
            return;
        }
        let projection = project(node, self.visibility);
        for (key, value) in projection.visible {
            let ordinal = node.position(key).unwrap_or_default();
            let prefix = format!("{}: ", key.bright_yellow());
            self.entry(out, &prefix, value, path, ordinal, depth + 1);
        }
        if projection.hidden_count > 0 {
            let hidden = format!("… {} hidden", projection.hidden_count);
            let _ = writeln!(out, "{indent}  {}", hidden.dimmed());
        }
    }

    /// One value line (or block) at `index` below the node at `owner_path`.
    fn entry(
        &self,
        out: &mut String,
        prefix: &str,
        value: &NodeValue,
        owner_path: &str,
        index: usize,
        depth: usize,
    ) {
        let indent = "  ".repeat(depth);
        match value {
            NodeValue::Node(child) => {
                if !prefix.is_empty() {
                    let _ = writeln!(out, "{indent}{}", prefix.trim_end());
                }
                let path = build_path(Some(child), owner_path, index);
                let child_depth = if prefix.is_empty() { depth } else { depth + 1 };
                self.node(out, child, &path, child_depth);
            }
            NodeValue::List(items) if items.is_empty() => {
                let _ = writeln!(out, "{indent}{prefix}{}", "Array[empty]".green());
            }
            NodeValue::List(items) => {
                let _ = writeln!(out, "{indent}{prefix}{}", "Array [".green());
                for (i, item) in items.iter().enumerate() {
                    self.entry(out, "", item, owner_path, i, depth + 1);
                }
                let _ = writeln!(out, "{indent}{}", "]".green());
            }
            NodeValue::Null | NodeValue::Parent(_) => {
                let _ = writeln!(out, "{indent}{prefix}{}", "EMPTY".dimmed());
            }
            primitive => {
                let _ = writeln!(out, "{indent}{prefix}{}", primitive_text(primitive));
            }
        }
    }
}

/// JSON spelling of a primitive: strings quoted and escaped.
fn primitive_text(value: &NodeValue) -> String {
    match value {
        NodeValue::String(s) => JsonValue::String(s.clone()).to_string(),
        NodeValue::Number(n) => n.to_string(),
        NodeValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{build_search_index, evaluate, Filter, FilterTag, COMMON_KEYS};

    fn program() -> Arc<AstNode> {
        let doc = serde_json::json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "CallExpression",
                    "callee": {"type": "Identifier", "name": "log"},
                    "arguments": [],
                    "optional": false
                }
            }],
            "sourceType": "module",
            "comments": null
        });
        Arc::new(AstNode::from_json(doc).unwrap())
    }

    fn render(results: &FilterResult, visibility: &KeyVisibility, state: &NodeState) -> String {
        colored::control::set_override(false);
        TreeView {
            visibility,
            state,
            max_depth: 64,
        }
        .render(results)
    }

    #[test]
    fn renders_whole_tree_with_projection() {
        let root = program();
        let results = evaluate(&root, &Filter::new(), &build_search_index(&root));
        let visibility = KeyVisibility::new(COMMON_KEYS.iter().copied());
        let text = render(&results, &visibility, &NodeState::new(true));
        let expected = "\
▾ Program root.Program[0]
  body: Array [
    ▾ ExpressionStatement root.Program[0].ExpressionStatement[0]
      expression:
        ▾ CallExpression root.Program[0].ExpressionStatement[0].CallExpression[1]
          callee:
            ▾ Identifier root.Program[0].ExpressionStatement[0].CallExpression[1].Identifier[1]
              name: \"log\"
          arguments: Array[empty]
          … 1 hidden
  ]
  … 2 hidden
";
        assert_eq!(text, expected);
    }

    #[test]
    fn collapsed_nodes_hide_their_properties() {
        let root = program();
        let results = evaluate(&root, &Filter::new(), &build_search_index(&root));
        let mut state = NodeState::new(true);
        state.set("root.Program[0].ExpressionStatement[0]", false);
        let text = render(&results, &KeyVisibility::new(["body"]), &state);
        assert!(text.contains("▸ ExpressionStatement"));
        assert!(!text.contains("CallExpression"));
    }

    #[test]
    fn filtered_results_keep_their_result_paths() {
        let root = program();
        let index = build_search_index(&root);
        let filter: Filter = [FilterTag::new("name", "log")].into_iter().collect();
        let results = evaluate(&root, &filter, &index);
        let visibility = KeyVisibility::new(["name", "comments"]);
        let text = render(&results, &visibility, &NodeState::new(true));
        assert_eq!(text, "▾ Identifier root.Identifier[0]\n  name: \"log\"\n");

        let text = render(
            &evaluate(&root, &Filter::new(), &index),
            &visibility,
            &NodeState::new(true),
        );
        assert!(text.contains("  comments: EMPTY\n"));
    }
}
