/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for node merging.

use std::fmt;
use thiserror::Error;
use yaml_tree::NodeKind;

/// Result type alias for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Which property of two mappings could not be reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Tag,
    Anchor,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Tag => write!(f, "tag"),
            Conflict::Anchor => write!(f, "anchor"),
        }
    }
}

/// A rejected merge.
///
/// Every variant carries the mapping key path from the root to the node
/// where the merge stopped. The destination tree keeps whatever was merged
/// before the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Two non-null nodes of different kinds.
    #[error("invalid node kinds at {}: cannot merge {src:?} into {dst:?}", display_path(path))]
    InvalidNodeKinds {
        path: Vec<String>,
        dst: NodeKind,
        src: NodeKind,
    },

    /// Two mappings declaring different tags, or different anchors.
    #[error("unmergeable {conflict} at {}: {dst:?} vs {src:?}", display_path(path))]
    Unmergeable {
        path: Vec<String>,
        conflict: Conflict,
        /// The destination's declared value
        dst: String,
        /// The source's declared value
        src: String,
    },

    /// A document with more than one child on either side.
    #[error(
        "too many documents at {}: destination has {dst}, source has {src}",
        display_path(path)
    )]
    TooManyDocuments {
        path: Vec<String>,
        dst: usize,
        src: usize,
    },

    #[error("unknown node kind at {}", display_path(path))]
    UnknownNodeKind { path: Vec<String> },
}

/// The kind of a [`MergeError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeErrorKind {
    InvalidNodeKinds,
    Unmergeable,
    TooManyDocuments,
    UnknownNodeKind,
}

impl MergeError {
    pub fn kind(&self) -> MergeErrorKind {
        match self {
            MergeError::InvalidNodeKinds { .. } => MergeErrorKind::InvalidNodeKinds,
            MergeError::Unmergeable { .. } => MergeErrorKind::Unmergeable,
            MergeError::TooManyDocuments { .. } => MergeErrorKind::TooManyDocuments,
            MergeError::UnknownNodeKind { .. } => MergeErrorKind::UnknownNodeKind,
        }
    }

    /// Mapping keys leading from the root to the failing node.
    pub fn path(&self) -> &[String] {
        match self {
            MergeError::InvalidNodeKinds { path, .. }
            | MergeError::Unmergeable { path, .. }
            | MergeError::TooManyDocuments { path, .. }
            | MergeError::UnknownNodeKind { path } => path,
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}
