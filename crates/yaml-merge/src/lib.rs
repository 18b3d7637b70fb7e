/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! # yaml-merge
//!
//! Layered merging of YAML node trees.
//!
//! [`merge`] folds an overlay tree into a base tree in place: mappings merge
//! key by key, sequences and scalars are replaced, and a null in the overlay
//! erases the base value. [`prune_nulls`] then removes the null values that
//! are left, so an overlay can delete keys from the base.
//!
//! Both work on [`yaml_tree::Node`] trees and keep comments, anchors, tags
//! and styles where the merge leaves a node in place.
//!
//! ## Example
//!
//! ```rust
//! use yaml_merge::{merge, prune_nulls};
//! use yaml_tree::{emit, parse};
//!
//! let mut config = parse("name: app\ndebug: true\nport: 80\n").unwrap();
//! let overlay = parse("debug: null\nport: 8080\n").unwrap();
//!
//! merge(&mut config, overlay).unwrap();
//! prune_nulls(&mut config, true, true);
//!
//! assert_eq!(emit(&config), "name: app\nport: 8080\n");
//! ```

mod error;
mod merge;
mod prune;

pub use error::{Conflict, MergeError, MergeErrorKind, Result};
pub use merge::merge;
pub use prune::prune_nulls;
