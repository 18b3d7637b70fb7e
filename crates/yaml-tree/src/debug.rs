/*
 * debug.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::{Node, NodeKind, NodeStyle};
use std::fmt;

/// Indented dump of a tree, one node per line, for diagnostics.
///
/// Each line shows the node's address, kind, style, tag, anchor, value,
/// comments and source position, so that two dumps taken around an
/// in-place edit show which nodes were kept and which were replaced.
pub struct DebugNode<'a>(pub &'a Node);

impl fmt::Display for DebugNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    write!(f, "{:width$}{:p} {:?}", "", node, node.kind, width = depth * 2)?;
    if node.style != NodeStyle::Plain {
        write!(f, " style={:?}", node.style)?;
    }
    if !node.tag.is_empty() {
        write!(f, " tag={}", node.tag)?;
    }
    if !node.anchor.is_empty() {
        write!(f, " anchor={}", node.anchor)?;
    }
    if matches!(node.kind, NodeKind::Scalar | NodeKind::Alias) {
        write!(f, " value={:?}", node.value)?;
    }
    for (label, comment) in [
        ("head", &node.head_comment),
        ("line", &node.line_comment),
        ("foot", &node.foot_comment),
    ] {
        if !comment.is_empty() {
            write!(f, " {label}={comment:?}")?;
        }
    }
    if node.line > 0 {
        write!(f, " @{}:{}", node.line, node.column)?;
    }
    writeln!(f)?;

    for child in &node.content {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}
