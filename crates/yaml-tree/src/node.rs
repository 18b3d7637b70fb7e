/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The YAML node tree.
//!
//! A [`Node`] keeps everything needed to write a document back out the way it
//! came in: the declared tag, the anchor name, the presentation style and the
//! comments around it. Children are owned, so moving a sub-tree from one
//! document into another is a plain move.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const NULL_TAG: &str = "!!null";
pub const BOOL_TAG: &str = "!!bool";
pub const STR_TAG: &str = "!!str";
pub const INT_TAG: &str = "!!int";
pub const FLOAT_TAG: &str = "!!float";
pub const MAP_TAG: &str = "!!map";
pub const SEQ_TAG: &str = "!!seq";
pub const MERGE_TAG: &str = "!!merge";

const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

static INT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(0x[0-9a-fA-F][0-9a-fA-F_]*|0o[0-7][0-7_]*|0b[01][01_]*|[0-9][0-9_]*)$")
        .expect("valid int pattern")
});

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.(inf|Inf|INF)|(\.[0-9]+|[0-9][0-9_]*(\.[0-9_]*)?)([eE][-+]?[0-9]+)?)$")
        .expect("valid float pattern")
});

/// The five node kinds, plus the zero value used for "no node at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NodeKind {
    /// No node present. Distinct from a null scalar.
    #[default]
    Absent,
    Document,
    Sequence,
    Mapping,
    Scalar,
    Alias,
}

/// How a node is presented in text.
///
/// `Plain` means block layout for collections and an unquoted spelling for
/// scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NodeStyle {
    #[default]
    Plain,
    Flow,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A node in a YAML document tree.
///
/// Mapping content alternates key and value nodes: even indices are keys,
/// odd indices are the matching values. For an alias node, `value` holds the
/// name of the anchor it points at; the target is never resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,

    pub style: NodeStyle,

    /// Declared tag in short form (`!!str`, `!custom`), empty when the
    /// document did not spell one out.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub anchor: String,

    /// Scalar text, or the anchor name for an alias.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,

    /// Comment lines directly above the node.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub head_comment: String,

    /// Comment at the end of the node's line.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line_comment: String,

    /// Comment lines following the node.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub foot_comment: String,

    /// Line number (1-based, 0 when built in code)
    pub line: usize,

    /// Column number (1-based, 0 when built in code)
    pub column: usize,
}

impl Node {
    /// The "no node" sentinel.
    pub fn absent() -> Self {
        Self::default()
    }

    fn of_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A document wrapping a single root node.
    pub fn document(root: Node) -> Self {
        Self {
            content: vec![root],
            ..Self::of_kind(NodeKind::Document)
        }
    }

    /// A block mapping built from key/value pairs, in order.
    pub fn mapping(pairs: impl IntoIterator<Item = (Node, Node)>) -> Self {
        let content = pairs
            .into_iter()
            .flat_map(|(key, value)| [key, value])
            .collect();
        Self {
            content,
            ..Self::of_kind(NodeKind::Mapping)
        }
    }

    /// A block sequence.
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Self {
            content: items.into_iter().collect(),
            ..Self::of_kind(NodeKind::Sequence)
        }
    }

    /// A plain scalar.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::of_kind(NodeKind::Scalar)
        }
    }

    /// An implicit null: a key written with nothing after it.
    pub fn null() -> Self {
        Self::of_kind(NodeKind::Scalar)
    }

    /// An alias pointing at `anchor`.
    pub fn alias(anchor: impl Into<String>) -> Self {
        Self {
            value: anchor.into(),
            ..Self::of_kind(NodeKind::Alias)
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = normalize_tag(tag);
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_head_comment(mut self, comment: impl Into<String>) -> Self {
        self.head_comment = comment.into();
        self
    }

    pub fn with_line_comment(mut self, comment: impl Into<String>) -> Self {
        self.line_comment = comment.into();
        self
    }

    pub fn with_foot_comment(mut self, comment: impl Into<String>) -> Self {
        self.foot_comment = comment.into();
        self
    }

    /// Set the source position.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_absent(&self) -> bool {
        self.kind == NodeKind::Absent
    }

    /// True for a scalar whose tag resolves to `!!null`, whether it was
    /// written as `null` or left empty.
    pub fn is_null(&self) -> bool {
        self.kind == NodeKind::Scalar && self.short_tag() == NULL_TAG
    }

    /// A null spelled out in the text (`null`, `~`, ...).
    pub fn is_explicit_null(&self) -> bool {
        self.is_null() && !self.value.is_empty()
    }

    /// A null with no text at all (`key:`).
    pub fn is_implicit_null(&self) -> bool {
        self.is_null() && self.value.is_empty()
    }

    /// The anchor name this alias refers to.
    pub fn alias_target(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Alias => Some(&self.value),
            _ => None,
        }
    }

    /// The node's type tag in short form.
    ///
    /// Returns the declared tag when there is one, otherwise the tag a YAML
    /// 1.2 core-schema resolver would assign. Aliases are not followed.
    pub fn short_tag(&self) -> &str {
        if !self.tag.is_empty() && self.tag != "!" {
            return &self.tag;
        }
        match self.kind {
            NodeKind::Absent => NULL_TAG,
            NodeKind::Document | NodeKind::Alias => "",
            NodeKind::Mapping => MAP_TAG,
            NodeKind::Sequence => SEQ_TAG,
            // A plain scalar with the non-specific `!` tag still resolves from its value.
            NodeKind::Scalar => {
                if self.style == NodeStyle::Plain {
                    resolve_plain(&self.value)
                } else {
                    STR_TAG
                }
            }
        }
    }

    /// Iterate the key/value pairs of a mapping. Empty for other kinds.
    pub fn pairs(&self) -> impl Iterator<Item = (&Node, &Node)> {
        let content: &[Node] = match self.kind {
            NodeKind::Mapping => &self.content,
            _ => &[],
        };
        content.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Look up a mapping value by key text. A document looks through to its
    /// root. With duplicate keys the last one wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self.kind {
            NodeKind::Document => self.content.first().and_then(|root| root.get(key)),
            _ => self
                .pairs()
                .filter(|(k, _)| k.value == key)
                .map(|(_, v)| v)
                .last(),
        }
    }

    /// Follow a path of mapping keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Number of pairs for a mapping, children for everything else.
    pub fn len(&self) -> usize {
        match self.kind {
            NodeKind::Mapping => self.content.len() / 2,
            _ => self.content.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Bring a tag to its short form: `tag:yaml.org,2002:str` and
/// `!<tag:yaml.org,2002:str>` both become `!!str`.
pub fn normalize_tag(tag: &str) -> String {
    let verbatim = tag
        .strip_prefix("!<")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(tag);
    match verbatim.strip_prefix(CORE_SCHEMA_PREFIX) {
        Some(suffix) => format!("!!{suffix}"),
        None => verbatim.to_string(),
    }
}

fn resolve_plain(value: &str) -> &'static str {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => NULL_TAG,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => BOOL_TAG,
        ".nan" | ".NaN" | ".NAN" => FLOAT_TAG,
        "<<" => MERGE_TAG,
        _ if INT_PATTERN.is_match(value) => INT_TAG,
        _ if FLOAT_PATTERN.is_match(value) => FLOAT_TAG,
        _ => STR_TAG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_scalar_resolution() {
        assert_eq!(Node::scalar("hello").short_tag(), STR_TAG);
        assert_eq!(Node::scalar("42").short_tag(), INT_TAG);
        assert_eq!(Node::scalar("-0x1F").short_tag(), INT_TAG);
        assert_eq!(Node::scalar("1_000").short_tag(), INT_TAG);
        assert_eq!(Node::scalar("3.14").short_tag(), FLOAT_TAG);
        assert_eq!(Node::scalar("1e10").short_tag(), FLOAT_TAG);
        assert_eq!(Node::scalar("-.inf").short_tag(), FLOAT_TAG);
        assert_eq!(Node::scalar(".NaN").short_tag(), FLOAT_TAG);
        assert_eq!(Node::scalar("True").short_tag(), BOOL_TAG);
        assert_eq!(Node::scalar("yes").short_tag(), STR_TAG);
        assert_eq!(Node::scalar("<<").short_tag(), MERGE_TAG);
        assert_eq!(Node::scalar("~").short_tag(), NULL_TAG);
        assert_eq!(Node::null().short_tag(), NULL_TAG);
    }

    #[test]
    fn test_quoted_scalars_are_strings() {
        let quoted = Node::scalar("null").with_style(NodeStyle::DoubleQuoted);
        assert_eq!(quoted.short_tag(), STR_TAG);
        assert!(!quoted.is_null());

        let literal = Node::scalar("42\n").with_style(NodeStyle::Literal);
        assert_eq!(literal.short_tag(), STR_TAG);
    }

    #[test]
    fn test_declared_tag_wins() {
        let node = Node::scalar("42").with_tag("!!str");
        assert_eq!(node.short_tag(), STR_TAG);

        let node = Node::scalar("").with_tag("tag:yaml.org,2002:null");
        assert_eq!(node.tag, "!!null");
        assert!(node.is_implicit_null());

        let node = Node::scalar("x").with_tag("!<tag:yaml.org,2002:merge>");
        assert_eq!(node.short_tag(), MERGE_TAG);

        let node = Node::scalar("x").with_tag("!custom");
        assert_eq!(node.short_tag(), "!custom");
    }

    #[test]
    fn test_non_specific_tag_resolves_plain_value() {
        assert_eq!(Node::scalar("42").with_tag("!").short_tag(), INT_TAG);
        assert!(Node::scalar("null").with_tag("!").is_explicit_null());

        let quoted = Node::scalar("42").with_tag("!").with_style(NodeStyle::DoubleQuoted);
        assert_eq!(quoted.short_tag(), STR_TAG);
    }

    #[test]
    fn test_collection_and_sentinel_tags() {
        assert_eq!(Node::mapping([]).short_tag(), MAP_TAG);
        assert_eq!(Node::sequence([]).short_tag(), SEQ_TAG);
        assert_eq!(Node::absent().short_tag(), NULL_TAG);
        assert_eq!(Node::alias("x").short_tag(), "");
        assert!(!Node::absent().is_null());
    }

    #[test]
    fn test_null_classification() {
        assert!(Node::scalar("null").is_explicit_null());
        assert!(!Node::scalar("null").is_implicit_null());
        assert!(Node::null().is_implicit_null());
        assert!(!Node::null().is_explicit_null());
        assert!(!Node::scalar("0").is_null());
    }

    #[test]
    fn test_mapping_access() {
        let node = Node::mapping([
            (Node::scalar("a"), Node::scalar("1")),
            (
                Node::scalar("b"),
                Node::mapping([(Node::scalar("c"), Node::scalar("2"))]),
            ),
        ]);

        assert_eq!(node.len(), 2);
        assert_eq!(node.content.len(), 4);
        assert_eq!(node.get("a").map(|n| n.value.as_str()), Some("1"));
        assert_eq!(
            node.get_path(&["b", "c"]).map(|n| n.value.as_str()),
            Some("2")
        );
        assert!(node.get("missing").is_none());

        let keys: Vec<_> = node.pairs().map(|(k, _)| k.value.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let doc = Node::document(node);
        assert_eq!(doc.get("a").map(|n| n.value.as_str()), Some("1"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let node = Node::mapping([
            (Node::scalar("a"), Node::scalar("1")),
            (Node::scalar("a"), Node::scalar("2")),
        ]);
        assert_eq!(node.get("a").map(|n| n.value.as_str()), Some("2"));
    }

    #[test]
    fn test_alias_target() {
        assert_eq!(Node::alias("base").alias_target(), Some("base"));
        assert_eq!(Node::scalar("base").alias_target(), None);
    }
}
