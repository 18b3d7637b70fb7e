/*
 * emitter.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Writes a [`Node`] tree back to YAML text.
//!
//! Layout follows the node: block or flow collections, the scalar's quoting
//! style, declared tags, anchors, aliases and comments. A scalar whose style
//! cannot carry its value (a plain scalar that would be read back as
//! something else, a multi-line single-quoted string) falls back to double
//! quotes.

use crate::{Node, NodeKind, NodeStyle};

/// Options for emitting YAML text.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Spaces per nesting level for block collections (default: 2).
    pub indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Emit a tree with default options.
///
/// # Example
///
/// ```rust
/// use yaml_tree::{emit, parse};
///
/// let doc = parse("a: 1\nb: [x, y]\n").unwrap();
/// assert_eq!(emit(&doc), "a: 1\nb: [x, y]\n");
/// ```
pub fn emit(node: &Node) -> String {
    emit_with_options(node, &EmitOptions::default())
}

/// Emit a tree with custom options.
pub fn emit_with_options(node: &Node, options: &EmitOptions) -> String {
    let mut emitter = Emitter::new(options.indent.max(1));
    emitter.root(node);
    emitter.out
}

struct Emitter {
    out: String,
    step: usize,
}

impl Emitter {
    fn new(step: usize) -> Self {
        Self {
            out: String::new(),
            step,
        }
    }

    fn root(&mut self, node: &Node) {
        match node.kind {
            NodeKind::Absent => {}
            NodeKind::Document => {
                self.comment_lines(&node.head_comment, 0);
                for (i, child) in node.content.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("---\n");
                    }
                    self.comment_lines(&child.head_comment, 0);
                    self.write_value(child, 0, "");
                    self.comment_lines(&child.foot_comment, 0);
                }
                self.comment_lines(&node.foot_comment, 0);
            }
            _ => {
                self.comment_lines(&node.head_comment, 0);
                self.write_value(node, 0, "");
                self.comment_lines(&node.foot_comment, 0);
            }
        }
    }

    /// Write `node` on the current line after `lead`, then any lines it needs
    /// below, nested at `indent`.
    fn write_value(&mut self, node: &Node, indent: usize, lead: &str) {
        if is_block_collection(node) {
            let mut header = properties(node);
            append_line_comment(&mut header, &node.line_comment);
            if !header.is_empty() {
                self.out.push_str(lead);
                self.out.push_str(&header);
            }
            if !lead.is_empty() || !header.is_empty() {
                self.out.push('\n');
            }
            self.block_content(node, indent);
            return;
        }

        let block_indent = if indent == 0 { self.step } else { indent };
        if let Some((header, body)) = block_scalar(node, block_indent) {
            let mut line = join_nonempty(properties(node), header);
            append_line_comment(&mut line, &node.line_comment);
            self.out.push_str(lead);
            self.out.push_str(&line);
            self.out.push('\n');
            self.out.push_str(&body);
            return;
        }

        let mut line = inline(node, false);
        append_line_comment(&mut line, &node.line_comment);
        if !line.is_empty() {
            self.out.push_str(lead);
            self.out.push_str(&line);
        }
        if !lead.is_empty() || !line.is_empty() {
            self.out.push('\n');
        }
    }

    fn block_content(&mut self, node: &Node, indent: usize) {
        match node.kind {
            NodeKind::Mapping => {
                for (key, value) in node.pairs() {
                    self.mapping_entry(key, value, indent);
                }
            }
            NodeKind::Sequence => {
                for item in &node.content {
                    self.sequence_item(item, indent);
                }
            }
            _ => {}
        }
    }

    fn mapping_entry(&mut self, key: &Node, value: &Node, indent: usize) {
        self.comment_lines(&key.head_comment, indent);
        self.comment_lines(&value.head_comment, indent);

        let mut key_text = inline(key, false);
        if key_text.is_empty() {
            key_text.push('~');
        }
        self.pad(indent);
        self.out.push_str(&key_text);
        self.out.push(':');
        self.write_value(value, indent + self.step, " ");

        self.comment_lines(&key.foot_comment, indent);
        self.comment_lines(&value.foot_comment, indent);
    }

    fn sequence_item(&mut self, item: &Node, indent: usize) {
        self.comment_lines(&item.head_comment, indent);

        // Compact form: the first line of a nested collection shares the dash.
        if is_block_collection(item) && properties(item).is_empty() && item.line_comment.is_empty() {
            let mut nested = Emitter::new(self.step);
            nested.block_content(item, indent + 2);
            let inner_pad = " ".repeat(indent + 2);
            if let Some(rest) = nested.out.strip_prefix(&inner_pad) {
                if !rest.starts_with('#') {
                    self.pad(indent);
                    self.out.push_str("- ");
                    self.out.push_str(rest);
                    self.comment_lines(&item.foot_comment, indent);
                    return;
                }
            }
        }

        self.pad(indent);
        self.out.push('-');
        self.write_value(item, indent + 2, " ");
        self.comment_lines(&item.foot_comment, indent);
    }

    fn comment_lines(&mut self, comment: &str, indent: usize) {
        for line in comment.lines() {
            self.pad(indent);
            if !line.starts_with('#') {
                self.out.push_str("# ");
            }
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }
}

fn is_block_collection(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Mapping | NodeKind::Sequence)
        && node.style != NodeStyle::Flow
        && !node.content.is_empty()
}

/// Anchor and tag, space separated.
fn properties(node: &Node) -> String {
    let anchor = if node.anchor.is_empty() {
        String::new()
    } else {
        format!("&{}", node.anchor)
    };
    let tag = if node.tag.is_empty() || node.tag.starts_with('!') {
        node.tag.clone()
    } else {
        format!("!<{}>", node.tag)
    };
    join_nonempty(anchor, tag)
}

fn join_nonempty(first: String, second: String) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second,
        (_, true) => first,
        _ => format!("{first} {second}"),
    }
}

fn append_line_comment(line: &mut String, comment: &str) {
    let comment = comment.lines().next().unwrap_or("");
    if comment.is_empty() {
        return;
    }
    if !line.is_empty() {
        line.push(' ');
    }
    if !comment.starts_with('#') {
        line.push_str("# ");
    }
    line.push_str(comment);
}

/// Single-line rendering; collections come out in flow style.
fn inline(node: &Node, flow: bool) -> String {
    let body = match node.kind {
        NodeKind::Absent => String::new(),
        NodeKind::Document => node
            .content
            .first()
            .map(|root| inline(root, flow))
            .unwrap_or_default(),
        NodeKind::Alias => format!("*{}", node.value),
        NodeKind::Scalar => scalar_text(node, flow),
        NodeKind::Mapping => {
            let entries: Vec<String> = node
                .pairs()
                .map(|(key, value)| {
                    let mut key = inline(key, true);
                    if key.is_empty() {
                        key.push('~');
                    }
                    let value = inline(value, true);
                    if value.is_empty() {
                        key
                    } else {
                        format!("{key}: {value}")
                    }
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        NodeKind::Sequence => {
            let items: Vec<String> = node
                .content
                .iter()
                .map(|item| {
                    let text = inline(item, true);
                    if text.is_empty() { "~".to_string() } else { text }
                })
                .collect();
            format!("[{}]", items.join(", "))
        }
    };
    join_nonempty(properties(node), body)
}

fn scalar_text(node: &Node, flow: bool) -> String {
    let value = node.value.as_str();
    match node.style {
        NodeStyle::Plain if value.is_empty() => String::new(),
        NodeStyle::Plain if is_plain_safe(value, flow) => value.to_string(),
        NodeStyle::SingleQuoted if !value.contains(['\n', '\r']) && is_printable(value) => {
            format!("'{}'", value.replace('\'', "''"))
        }
        _ => double_quoted(value),
    }
}

/// Header (`|`, `|-`, `|+`) and indented body for a literal or folded
/// scalar, when the value can be written that way.
fn block_scalar(node: &Node, indent: usize) -> Option<(String, String)> {
    if node.kind != NodeKind::Scalar
        || !matches!(node.style, NodeStyle::Literal | NodeStyle::Folded)
    {
        return None;
    }
    let value = node.value.as_str();
    if value.is_empty()
        || value.starts_with([' ', '\n'])
        || value.contains('\r')
        || !is_printable(value)
    {
        return None;
    }

    let (chomp, body) = match value.strip_suffix('\n') {
        None => ("-", value),
        Some(rest) if rest.ends_with('\n') => ("+", rest),
        Some(rest) => ("", rest),
    };

    let pad = " ".repeat(indent);
    let mut text = String::new();
    for line in body.split('\n') {
        if !line.is_empty() {
            text.push_str(&pad);
            text.push_str(line);
        }
        text.push('\n');
    }
    Some((format!("|{chomp}"), text))
}

fn is_printable(value: &str) -> bool {
    value
        .chars()
        .all(|c| c == '\n' || c == '\t' || c == '\r' || !c.is_control())
}

fn is_plain_safe(value: &str, flow: bool) -> bool {
    let Some(first) = value.chars().next() else {
        return false;
    };
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return false;
    }
    if value.contains(['\n', '\r', '\t']) || !is_printable(value) {
        return false;
    }
    if value.starts_with("---") || value.starts_with("...") {
        return false;
    }
    let second = value.chars().nth(1);
    match first {
        '-' | '?' | ':' => {
            if second.is_none_or(char::is_whitespace) {
                return false;
            }
        }
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => return false,
        _ => {}
    }
    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return false;
    }
    if flow && value.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    true
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
