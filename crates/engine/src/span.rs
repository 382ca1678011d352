//! Source ranges of nodes, for highlighting the text a node came from.

use ir::{AstNode, NodeValue};
use serde::Serialize;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The covered text, if the range falls on character boundaries of
    /// `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// Range of `node` taken from `start`/`end`, the first two `range` entries,
/// or `loc.start`/`loc.end` (1-based line, 0-based column) resolved
/// against `source`, in that order of preference.
pub fn extract_position(node: &AstNode, source: Option<&str>) -> Option<Span> {
    if let (Some(start), Some(end)) = (offset(node.get("start")), offset(node.get("end"))) {
        return Some(Span { start, end });
    }
    if let Some(NodeValue::List(range)) = node.get("range") {
        if let (Some(start), Some(end)) = (offset(range.first()), offset(range.get(1))) {
            return Some(Span { start, end });
        }
    }
    let loc = node.get("loc")?.as_node()?;
    let source = source?;
    let start = line_column(loc.get("start")?)?;
    let end = line_column(loc.get("end")?)?;
    Some(Span {
        start: to_offset(source, start),
        end: to_offset(source, end),
    })
}

fn offset(value: Option<&NodeValue>) -> Option<usize> {
    value?.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn line_column(value: &NodeValue) -> Option<(usize, usize)> {
    let pos = value.as_node()?;
    let line = offset(pos.get("line"))?;
    let column = offset(pos.get("column"))?;
    Some((line, column))
}

/// Byte offset of a line/column pair. Lines past the end of `source`
/// count as empty.
fn to_offset(source: &str, (line, column): (usize, usize)) -> usize {
    let preceding: usize = source
        .split('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding + column
}
