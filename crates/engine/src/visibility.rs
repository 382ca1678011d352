//! Which property keys are shown when a node is rendered.

use indexmap::IndexSet;
use ir::{AstNode, NodeValue, DISCRIMINATOR_KEY};

use crate::terms::SearchTerms;

/// Keys visible by default when they occur in a tree.
pub const COMMON_KEYS: &[&str] = &[
    "alternate",
    "arguments",
    "body",
    "callee",
    "consequent",
    "declarations",
    "expression",
    "id",
    "init",
    "left",
    "name",
    "operator",
    "params",
    "right",
    "test",
    "type",
    "value",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyVisibility {
    keys: IndexSet<String>,
}

impl KeyVisibility {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Keys of `terms` that appear in `allowed`, in term order.
    pub fn seeded<S: AsRef<str>>(terms: &SearchTerms, allowed: &[S]) -> Self {
        Self::new(
            terms
                .keys()
                .filter(|key| allowed.iter().any(|a| a.as_ref() == *key)),
        )
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn show(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn hide(&mut self, key: &str) -> bool {
        self.keys.shift_remove(key)
    }

    /// Flips `key` and returns whether it is now visible.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.hide(key) {
            false
        } else {
            self.show(key);
            true
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// The renderable part of a node.
#[derive(Debug)]
pub struct Projection<'a> {
    /// Visible properties in node order. The discriminator is never listed
    /// since it is already the node's label.
    pub visible: Vec<(&'a str, &'a NodeValue)>,
    pub hidden_count: usize,
}

pub fn project<'a>(node: &'a AstNode, visibility: &KeyVisibility) -> Projection<'a> {
    let mut visible = Vec::new();
    let mut hidden_count = 0;
    for (key, value) in node.properties() {
        if key == DISCRIMINATOR_KEY {
            continue;
        }
        if visibility.is_visible(key) {
            visible.push((key, value));
        } else {
            hidden_count += 1;
        }
    }
    Projection {
        visible,
        hidden_count,
    }
}
