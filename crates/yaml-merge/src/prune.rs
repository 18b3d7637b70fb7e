/*
 * prune.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Removing null values from a node tree.

use yaml_tree::{Node, NodeKind};

/// Remove null scalars from `node`, bottom-up.
///
/// `explicit` removes nulls spelled out in the text (`null`, `~`);
/// `implicit` removes nulls with no text (`key:`) and absent placeholders.
/// A mapping entry goes away when its value is removed, and a collection
/// emptied this way is removed from its parent in turn. A document that
/// ends up empty is reset to [`Node::absent`]; any other root is left in
/// place, possibly empty.
///
/// # Example
///
/// ```rust
/// use yaml_merge::prune_nulls;
/// use yaml_tree::{emit, parse};
///
/// let mut doc = parse("a: 1\nb:\nc: null\n").unwrap();
/// prune_nulls(&mut doc, false, true);
/// assert_eq!(emit(&doc), "a: 1\nc: null\n");
/// ```
pub fn prune_nulls(node: &mut Node, explicit: bool, implicit: bool) {
    prune(node, explicit, implicit);
}

/// Prune below `node`; true when `node` itself should be removed by its parent.
fn prune(node: &mut Node, explicit: bool, implicit: bool) -> bool {
    match node.kind {
        NodeKind::Scalar if node.is_null() => {
            (explicit && node.is_explicit_null()) || (implicit && node.is_implicit_null())
        }
        NodeKind::Document | NodeKind::Sequence => {
            for i in (0..node.content.len()).rev() {
                if prune(&mut node.content[i], explicit, implicit) {
                    tracing::trace!(index = i, "pruning item");
                    node.content.remove(i);
                }
            }
            if !node.content.is_empty() {
                return false;
            }
            if node.kind == NodeKind::Document {
                *node = Node::absent();
            }
            true
        }
        NodeKind::Mapping => {
            // Only values decide; the whole entry goes with them.
            for key in (0..node.content.len() / 2).rev().map(|pair| pair * 2) {
                if prune(&mut node.content[key + 1], explicit, implicit) {
                    tracing::trace!(key = %node.content[key].value, "pruning entry");
                    node.content.drain(key..=key + 1);
                }
            }
            node.content.is_empty()
        }
        // A placeholder carries no text, so it counts as an implicit null.
        NodeKind::Absent => implicit,
        NodeKind::Scalar | NodeKind::Alias => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: Node) -> (Node, Node) {
        (Node::scalar(key), value)
    }

    #[test]
    fn test_absent_placeholders_are_implicit_nulls() {
        let mut node = Node::sequence([Node::absent(), Node::scalar("x")]);
        prune_nulls(&mut node, true, false);
        assert_eq!(node.len(), 2);

        prune_nulls(&mut node, false, true);
        assert_eq!(node.len(), 1);
        assert_eq!(node.content[0].value, "x");

        let mut root = Node::absent();
        prune_nulls(&mut root, true, true);
        assert!(root.is_absent());
    }

    #[test]
    fn test_scalar_classification() {
        assert!(prune(&mut Node::scalar("null"), true, false));
        assert!(prune(&mut Node::scalar("~"), true, false));
        assert!(!prune(&mut Node::scalar("null"), false, true));
        assert!(prune(&mut Node::null(), false, true));
        assert!(!prune(&mut Node::null(), true, false));
        assert!(!prune(&mut Node::scalar("0"), true, true));
        assert!(!prune(&mut Node::alias("a"), true, true));
    }

    #[test]
    fn test_mapping_drops_whole_entries() {
        let mut node = Node::mapping([
            pair("a", Node::scalar("1")),
            pair("b", Node::null()),
            pair("c", Node::scalar("null")),
        ]);
        prune_nulls(&mut node, false, true);
        let keys: Vec<&str> = node.pairs().map(|(k, _)| k.value.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_null_keys_are_not_pruned() {
        let mut node = Node::mapping([(Node::null(), Node::scalar("v"))]);
        prune_nulls(&mut node, true, true);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_cascade_removes_emptied_collections() {
        let mut node = Node::mapping([
            pair("keep", Node::scalar("1")),
            pair(
                "outer",
                Node::mapping([pair("inner", Node::sequence([Node::null(), Node::null()]))]),
            ),
        ]);
        prune_nulls(&mut node, false, true);
        assert_eq!(node.len(), 1);
        assert!(node.get("outer").is_none());
    }

    #[test]
    fn test_emptied_document_becomes_absent() {
        let mut node = Node::document(Node::mapping([pair("a", Node::null())]));
        prune_nulls(&mut node, false, true);
        assert!(node.is_absent());
    }

    #[test]
    fn test_emptied_root_collection_stays() {
        let mut node = Node::sequence([Node::scalar("null")]);
        prune_nulls(&mut node, true, false);
        assert_eq!(node.kind, NodeKind::Sequence);
        assert!(node.is_empty());
    }

    #[test]
    fn test_already_empty_collections_are_pruned() {
        let mut node = Node::mapping([
            pair("a", Node::mapping([])),
            pair("b", Node::sequence([])),
            pair("c", Node::scalar("1")),
        ]);
        prune_nulls(&mut node, false, false);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_pruning_twice_changes_nothing() {
        let mut node = Node::document(Node::mapping([
            pair("a", Node::scalar("1")),
            pair("b", Node::null()),
            pair("c", Node::sequence([Node::scalar("x"), Node::scalar("null")])),
        ]));
        prune_nulls(&mut node, true, true);
        let once = node.clone();
        prune_nulls(&mut node, true, true);
        assert_eq!(node, once);
    }
}
