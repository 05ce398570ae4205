//! Intermediate representation shared by every reader and writer.
//!
//! The IR is deliberately shallow: one node per recognised statement or
//! declaration, with the statement's pieces kept as strings in an ordered
//! attribute map. Expressions are not parsed into trees; they are rewritten
//! token-wise at render time (see [`crate::expr`]).

use codeshift_languages::{ConstructKind, LineRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute holding the original text of an `Unknown` node.
pub const RAW: &str = "raw";

/// Attribute on the `Program` node naming the source language.
pub const LANGUAGE: &str = "language";

/// One node of the IR tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Node {
    pub kind: ConstructKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Source lines this node was read from.
    pub lines: LineRange,
}

impl Node {
    pub fn new(kind: ConstructKind, lines: LineRange) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            lines,
        }
    }

    /// Root node.
    pub fn program() -> Self {
        Self::new(ConstructKind::Program, LineRange::default())
    }

    /// A node the reader could not classify, holding its source text in `raw`.
    ///
    /// Brace-language readers drop closers leading the line (`} catch (e) {`
    /// is held as `catch (e) {`): the closer ends the previous block, and
    /// writers emit it from the tree.
    pub fn unknown(raw: impl Into<String>, lines: LineRange) -> Self {
        Self::new(ConstructKind::Unknown, lines).with_attr(RAW, raw)
    }

    pub fn comment(text: impl Into<String>, lines: LineRange) -> Self {
        Self::new(ConstructKind::Comment, lines).with_attr("text", text)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value, or `""` when absent.
    pub fn attr_or_empty(&self, key: &str) -> &str {
        self.attr(key).unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Whether a boolean-valued attribute is `"true"`.
    pub fn flag(&self, key: &str) -> bool {
        self.attr(key) == Some("true")
    }

    pub fn is(&self, kind: ConstructKind) -> bool {
        self.kind == kind
    }

    /// `else` / `elif` continuation of a preceding `If`.
    pub fn is_branch(&self) -> bool {
        self.kind == ConstructKind::If && self.attr("branch").is_some()
    }

    /// Visit this node and all descendants, depth-first, parents first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Number of descendants (and self) of `kind`.
    pub fn count(&self, kind: ConstructKind) -> usize {
        let mut n = 0;
        self.walk(&mut |node| {
            if node.kind == kind {
                n += 1;
            }
        });
        n
    }

    /// Source lines of every `Unknown` node, in source order. Overlapping
    /// ranges (a nested `Unknown`, or a block ending on the line that opens
    /// the next) are merged.
    pub fn unknown_lines(&self) -> Vec<LineRange> {
        let mut lines = Vec::new();
        self.walk(&mut |node| {
            if node.kind == ConstructKind::Unknown {
                lines.push(node.lines);
            }
        });
        lines.sort();
        let mut merged: Vec<LineRange> = Vec::with_capacity(lines.len());
        for range in lines {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.extend_to(range),
                _ => merged.push(range),
            }
        }
        merged
    }

    /// Whether any descendant satisfies `pred`.
    pub fn any_descendant(&self, pred: &impl Fn(&Node) -> bool) -> bool {
        self.children
            .iter()
            .any(|child| pred(child) || child.any_descendant(pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_unknown_lines() {
        let mut func = Node::new(ConstructKind::FunctionDecl, LineRange::new(1, 3));
        func.children
            .push(Node::unknown("try:", LineRange::line(2)));
        func.children
            .push(Node::new(ConstructKind::Return, LineRange::line(3)));
        let mut program = Node::program();
        program.children.push(func);
        program.children.push(Node::unknown("import os", LineRange::line(5)));

        assert_eq!(program.count(ConstructKind::FunctionDecl), 1);
        assert_eq!(program.count(ConstructKind::Unknown), 2);
        assert_eq!(
            program.unknown_lines(),
            vec![LineRange::line(2), LineRange::line(5)]
        );
    }

    #[test]
    fn test_overlapping_unknown_lines_merge() {
        let mut try_block = Node::unknown("try {", LineRange::new(2, 4));
        try_block
            .children
            .push(Node::unknown("risky()", LineRange::line(3)));
        let mut program = Node::program();
        program.children.push(try_block);
        program
            .children
            .push(Node::unknown("catch (e) {", LineRange::new(4, 5)));
        program.children.push(Node::unknown("import os", LineRange::line(7)));

        assert_eq!(program.count(ConstructKind::Unknown), 4);
        assert_eq!(
            program.unknown_lines(),
            vec![LineRange::new(2, 5), LineRange::line(7)]
        );
    }

    #[test]
    fn test_attributes_serialize_in_order() {
        let node = Node::new(ConstructKind::Assignment, LineRange::line(1))
            .with_attr("value", "1")
            .with_attr("target", "x")
            .with_attr("op", "=");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"assignment","attributes":{"op":"=","target":"x","value":"1"},"lines":{"start":1,"end":1}}"#
        );
    }
}
