/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! YAML parser that builds [`Node`] trees.

use crate::source_text::SourceText;
use crate::{Error, Node, NodeKind, NodeStyle, Result};
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML from a string, producing a document node.
///
/// This parses a single YAML document. If the input contains multiple documents,
/// only the first one will be parsed. Input without any document (empty, or
/// only comments) yields [`Node::absent`].
///
/// # Example
///
/// ```rust
/// use yaml_tree::{parse, NodeKind};
///
/// let doc = parse("title: My Document").unwrap();
/// assert_eq!(doc.kind, NodeKind::Document);
/// assert_eq!(doc.get("title").unwrap().value, "My Document");
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or if parsing fails.
pub fn parse(content: &str) -> Result<Node> {
    let documents = parse_impl(content, false)?;
    Ok(documents.into_iter().next().unwrap_or_default())
}

/// Parse every document in a YAML stream.
///
/// All documents are collected under one document node, one child per
/// document, so a multi-document stream stays visible to callers that only
/// accept a single document.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or if parsing fails.
pub fn parse_stream(content: &str) -> Result<Node> {
    let documents = parse_impl(content, true)?;
    if documents.is_empty() {
        return Ok(Node::absent());
    }

    let mut stream = documents[0].clone();
    stream.content = documents
        .into_iter()
        .flat_map(|document| document.content)
        .collect();
    Ok(stream)
}

fn parse_impl(content: &str, multi: bool) -> Result<Vec<Node>> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = NodeBuilder::new(content);

    parser.load(&mut builder, multi).map_err(Error::from)?;

    builder.result()
}

/// A collection or document still receiving children.
struct Frame {
    node: Node,
    /// Whether the node will become a mapping key once complete.
    is_key: bool,
}

/// Builder that implements MarkedEventReceiver to construct a Node tree.
struct NodeBuilder {
    source: SourceText,

    /// Stack of nodes being constructed
    stack: Vec<Frame>,

    /// Completed documents
    documents: Vec<Node>,

    /// Anchor names by the parser's numeric anchor id
    anchors: HashMap<usize, String>,

    /// Marker index of the previous event; anchors sit between it and the node.
    last_index: usize,

    error: Option<Error>,
}

impl NodeBuilder {
    fn new(content: &str) -> Self {
        Self {
            source: SourceText::new(content),
            stack: Vec::new(),
            documents: Vec::new(),
            anchors: HashMap::new(),
            last_index: 0,
            error: None,
        }
    }

    fn result(self) -> Result<Vec<Node>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.stack.is_empty() {
            return Err(Error::InvalidStructure {
                message: "unterminated collection at end of input".into(),
            });
        }
        Ok(self.documents)
    }

    fn fail(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(Error::InvalidStructure {
                message: message.into(),
            });
        }
    }

    /// True when the next completed node becomes a key of the innermost mapping.
    fn at_key_position(&self) -> bool {
        self.stack.last().is_some_and(|frame| {
            frame.node.kind == NodeKind::Mapping && frame.node.content.len() % 2 == 0
        })
    }

    fn in_flow(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| frame.node.style == NodeStyle::Flow)
    }

    fn in_block_mapping(&self) -> bool {
        self.stack.last().is_some_and(|frame| {
            frame.node.kind == NodeKind::Mapping && frame.node.style != NodeStyle::Flow
        })
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.node.content.push(node),
            None => self.fail("node outside of a document"),
        }
    }

    fn start_node(&self, kind: NodeKind, marker: &Marker) -> Node {
        Node {
            kind,
            line: marker.line(),
            column: marker.col() + 1,
            ..Node::default()
        }
    }

    fn register_anchor(&mut self, anchor_id: usize, index: usize) -> String {
        if anchor_id == 0 {
            return String::new();
        }
        let name = self
            .source
            .anchor_before(self.last_index, index)
            .unwrap_or_else(|| format!("anchor{anchor_id}"));
        self.anchors.insert(anchor_id, name.clone());
        name
    }

    fn open_collection(
        &mut self,
        kind: NodeKind,
        flow_indicator: char,
        anchor_id: usize,
        tag: Option<String>,
        marker: &Marker,
    ) {
        let mut node = self.start_node(kind, marker);
        if self.source.char_at(marker.index()) == Some(flow_indicator) {
            node.style = NodeStyle::Flow;
        }
        node.anchor = self.register_anchor(anchor_id, marker.index());
        if let Some(tag) = tag {
            node.tag = crate::node::normalize_tag(&tag);
        }
        let is_key = self.at_key_position();
        self.stack.push(Frame { node, is_key });
    }

    fn close_collection(&mut self, kind: NodeKind, marker: &Marker) {
        let frame = match self.stack.pop() {
            Some(frame) if frame.node.kind == kind => frame,
            _ => {
                self.fail("collection end without matching start");
                return;
            }
        };
        let mut node = frame.node;
        if node.style == NodeStyle::Flow && !frame.is_key {
            node.line_comment = self.source.flow_end_line_comment(marker.index());
        }
        self.push_complete(node);
    }

    fn scalar(
        &mut self,
        value: String,
        style: TScalarStyle,
        anchor_id: usize,
        tag: Option<String>,
        marker: &Marker,
    ) -> Node {
        let index = marker.index();
        let lead = self.source.char_at(index);

        let mut node = self.start_node(NodeKind::Scalar, marker);
        node.style = scalar_style(style);
        node.value = value;

        // Empty values come through as a plain "~" positioned at the next token.
        if node.style == NodeStyle::Plain && node.value == "~" && lead != Some('~') {
            node.value.clear();
        }

        node.anchor = self.register_anchor(anchor_id, index);
        if let Some(tag) = tag {
            node.tag = crate::node::normalize_tag(&tag);
        }

        if self.at_key_position() {
            if self.in_block_mapping() {
                node.head_comment = self.source.head_comment_above(index);
            }
        } else if !node.value.is_empty() {
            node.line_comment = self.source.scalar_line_comment(index, node.style, self.in_flow());
        }
        node
    }
}

impl MarkedEventReceiver for NodeBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}

            Event::DocumentStart => {
                let node = self.start_node(NodeKind::Document, &marker);
                self.stack.push(Frame {
                    node,
                    is_key: false,
                });
            }

            Event::DocumentEnd => match self.stack.pop() {
                Some(frame) if frame.node.kind == NodeKind::Document => {
                    self.documents.push(frame.node);
                }
                _ => self.fail("document end without matching start"),
            },

            Event::Scalar(value, style, anchor_id, tag) => {
                let tag = tag.map(|tag| format!("{}{}", tag.handle, tag.suffix));
                let node = self.scalar(value, style, anchor_id, tag, &marker);
                self.push_complete(node);
            }

            Event::SequenceStart(anchor_id, tag) => {
                let tag = tag.map(|tag| format!("{}{}", tag.handle, tag.suffix));
                self.open_collection(NodeKind::Sequence, '[', anchor_id, tag, &marker);
            }

            Event::SequenceEnd => self.close_collection(NodeKind::Sequence, &marker),

            Event::MappingStart(anchor_id, tag) => {
                let tag = tag.map(|tag| format!("{}{}", tag.handle, tag.suffix));
                self.open_collection(NodeKind::Mapping, '{', anchor_id, tag, &marker);
            }

            Event::MappingEnd => self.close_collection(NodeKind::Mapping, &marker),

            Event::Alias(anchor_id) => {
                let name = self
                    .anchors
                    .get(&anchor_id)
                    .cloned()
                    .unwrap_or_else(|| format!("anchor{anchor_id}"));
                let mut node = self.start_node(NodeKind::Alias, &marker);
                node.value = name;
                if self.at_key_position() && self.in_block_mapping() {
                    node.head_comment = self.source.head_comment_above(marker.index());
                }
                self.push_complete(node);
            }
        }
        self.last_index = marker.index();
    }
}

fn scalar_style(style: TScalarStyle) -> NodeStyle {
    match style {
        TScalarStyle::Plain => NodeStyle::Plain,
        TScalarStyle::SingleQuoted => NodeStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => NodeStyle::DoubleQuoted,
        TScalarStyle::Literal => NodeStyle::Literal,
        TScalarStyle::Folded => NodeStyle::Folded,
    }
}
