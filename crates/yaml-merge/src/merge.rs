/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Layering one node tree on top of another.
//!
//! Mappings merge key by key, everything else is replaced by the overlay.
//! A null on either side gives way to the other side's node, except that a
//! null overlay always wins: it is how an overlay erases a key's value.

use crate::error::{Conflict, MergeError, Result};
use std::collections::HashMap;
use yaml_tree::{Node, NodeKind};

/// Merge `src` into `dst` in place, consuming `src`.
///
/// Rules, checked in order:
///
/// 1. An absent `dst` becomes `src`; an absent `src` changes nothing.
/// 2. A null scalar on either side is replaced by `src`.
/// 3. Nodes of different kinds are rejected with
///    [`MergeError::InvalidNodeKinds`].
/// 4. Non-empty comments on `src` overwrite those on `dst`.
/// 5. Documents merge their single roots, mappings merge key by key, and
///    sequences, scalars and aliases are replaced by `src`.
///
/// Keys already in `dst` keep their position; keys only in `src` are
/// appended in `src` order. Aliases are never followed, so an alias in
/// `dst` that pointed at a replaced anchor is left as is.
///
/// On error `dst` keeps every change made before the failing node.
///
/// # Example
///
/// ```rust
/// use yaml_merge::merge;
/// use yaml_tree::{emit, parse};
///
/// let mut base = parse("a: 1\nb: 2\n").unwrap();
/// let overlay = parse("b: 3\nc: 4\n").unwrap();
/// merge(&mut base, overlay).unwrap();
/// assert_eq!(emit(&base), "a: 1\nb: 3\nc: 4\n");
/// ```
pub fn merge(dst: &mut Node, src: Node) -> Result<()> {
    let mut path = Vec::new();
    merge_at(dst, src, &mut path)
}

fn merge_at(dst: &mut Node, mut src: Node, path: &mut Vec<String>) -> Result<()> {
    if dst.is_absent() {
        *dst = src;
        return Ok(());
    }
    if src.is_absent() {
        return Ok(());
    }

    if dst.is_null() || src.is_null() {
        tracing::trace!(path = %path.join("."), "replacing null");
        *dst = src;
        return Ok(());
    }

    if dst.kind != src.kind {
        tracing::debug!(path = %path.join("."), dst = ?dst.kind, src = ?src.kind, "node kinds differ");
        return Err(MergeError::InvalidNodeKinds {
            path: path.clone(),
            dst: dst.kind,
            src: src.kind,
        });
    }

    copy_comments(dst, &src);

    match dst.kind {
        NodeKind::Document => merge_documents(dst, src, path),
        NodeKind::Mapping => {
            // Style is never changed, only content and declared properties.
            let tags_differ = dst.short_tag() != src.short_tag();
            reconcile(&mut dst.tag, &mut src.tag, tags_differ, Conflict::Tag, path)?;
            let anchors_differ = dst.anchor != src.anchor;
            reconcile(&mut dst.anchor, &mut src.anchor, anchors_differ, Conflict::Anchor, path)?;
            merge_mappings(dst, src, path)
        }
        NodeKind::Alias | NodeKind::Sequence | NodeKind::Scalar => {
            tracing::trace!(path = %path.join("."), kind = ?dst.kind, "replacing node");
            *dst = src;
            Ok(())
        }
        NodeKind::Absent => Err(MergeError::UnknownNodeKind { path: path.clone() }),
    }
}

/// Non-empty comments on `src` overwrite `dst`'s. `src` keeps its own copy
/// so that a node replaced wholesale still carries them.
fn copy_comments(dst: &mut Node, src: &Node) {
    for (to, from) in [
        (&mut dst.head_comment, &src.head_comment),
        (&mut dst.line_comment, &src.line_comment),
        (&mut dst.foot_comment, &src.foot_comment),
    ] {
        if !from.is_empty() {
            to.clone_from(from);
        }
    }
}

/// Adopt `src`'s declared value when only `src` declares one. Two different
/// declared values cannot be reconciled.
fn reconcile(
    dst: &mut String,
    src: &mut String,
    differ: bool,
    conflict: Conflict,
    path: &[String],
) -> Result<()> {
    if !differ || src.is_empty() {
        return Ok(());
    }
    if !dst.is_empty() {
        tracing::debug!(path = %path.join("."), %conflict, dst = %dst, src = %src, "conflicting mapping property");
        return Err(MergeError::Unmergeable {
            path: path.to_vec(),
            conflict,
            dst: dst.clone(),
            src: src.clone(),
        });
    }
    *dst = std::mem::take(src);
    Ok(())
}

fn merge_documents(dst: &mut Node, mut src: Node, path: &mut Vec<String>) -> Result<()> {
    if dst.content.is_empty() {
        *dst = src;
        return Ok(());
    }
    if src.content.is_empty() {
        return Ok(());
    }
    if dst.content.len() != 1 || src.content.len() != 1 {
        tracing::debug!(dst = dst.content.len(), src = src.content.len(), "multi-document input");
        return Err(MergeError::TooManyDocuments {
            path: path.clone(),
            dst: dst.content.len(),
            src: src.content.len(),
        });
    }

    match src.content.pop() {
        Some(root) => merge_at(&mut dst.content[0], root, path),
        None => Ok(()),
    }
}

fn merge_mappings(dst: &mut Node, src: Node, path: &mut Vec<String>) -> Result<()> {
    // Index of each key in dst; later duplicates shadow earlier ones.
    let existing: HashMap<String, usize> = dst
        .content
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, entry)| (entry[0].value.clone(), pair * 2))
        .collect();

    let mut entries = src.content.into_iter();
    while let (Some(key), Some(value)) = (entries.next(), entries.next()) {
        match existing.get(&key.value).copied() {
            Some(at) => {
                path.push(key.value.clone());
                merge_at(&mut dst.content[at], key, path)?;
                merge_at(&mut dst.content[at + 1], value, path)?;
                path.pop();
            }
            None => {
                tracing::trace!(path = %path.join("."), key = %key.value, "adding key");
                dst.content.push(key);
                dst.content.push(value);
            }
        }
    }
    Ok(())
}
