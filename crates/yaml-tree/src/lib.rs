/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! # yaml-tree
//!
//! A YAML node tree that keeps what a document looks like, not just what it
//! means: tags, anchors, aliases, quoting style, flow or block layout,
//! comments and source positions.
//!
//! The tree is built from yaml-rust2's event stream and written back with a
//! small emitter, so documents can be edited in place and re-emitted without
//! losing their shape.
//!
//! ## Example
//!
//! ```rust
//! use yaml_tree::{emit, parse};
//!
//! let doc = parse("title: My Document # keep me\n").unwrap();
//! assert_eq!(doc.get("title").unwrap().value, "My Document");
//! assert_eq!(emit(&doc), "title: My Document # keep me\n");
//! ```

mod debug;
mod emitter;
mod error;
mod node;
mod parser;
mod source_text;

pub use debug::DebugNode;
pub use emitter::{EmitOptions, emit, emit_with_options};
pub use error::{Error, Result};
pub use node::{
    BOOL_TAG, FLOAT_TAG, INT_TAG, MAP_TAG, MERGE_TAG, NULL_TAG, Node, NodeKind, NodeStyle,
    SEQ_TAG, STR_TAG, normalize_tag,
};
pub use parser::{parse, parse_stream};
