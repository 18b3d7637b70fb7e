/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Merge command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};
use yaml_tree::{EmitOptions, Node, emit_with_options};

use super::{read_document, write_output};

/// Arguments for the merge command
#[derive(Debug)]
pub struct MergeArgs {
    /// Input files, base first
    pub files: Vec<PathBuf>,
    pub prune_explicit: bool,
    pub prune_implicit: bool,
    /// Keep every document of each input
    pub all_documents: bool,
    pub indent: usize,
    /// Output file (stdout when absent)
    pub output: Option<PathBuf>,
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    let mut merged = merge_files(&args.files, args.all_documents)?;

    if args.prune_explicit || args.prune_implicit {
        yaml_merge::prune_nulls(&mut merged, args.prune_explicit, args.prune_implicit);
    }

    let text = emit_with_options(&merged, &EmitOptions { indent: args.indent });
    write_output(&text, args.output.as_deref())
}

/// Fold `files` left to right: each file is merged into the result of the
/// ones before it.
pub fn merge_files(files: &[PathBuf], all_documents: bool) -> Result<Node> {
    let mut merged = Node::absent();
    for path in files {
        let overlay = read_document(path, all_documents)?;
        debug!(file = %path.display(), "Merging");
        yaml_merge::merge(&mut merged, overlay)
            .with_context(|| format!("Failed to merge {}", path.display()))?;
    }
    info!(files = files.len(), "Merged");
    Ok(merged)
}
