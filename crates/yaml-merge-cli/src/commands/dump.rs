/*
 * dump.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Dump command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use yaml_tree::DebugNode;

use super::{read_document, write_output};

/// Execute the dump command
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let document = read_document(file, true)?;
    let text = if json {
        let mut text =
            serde_json::to_string_pretty(&document).context("Failed to serialize node tree")?;
        text.push('\n');
        text
    } else {
        DebugNode(&document).to_string()
    };
    write_output(&text, None)
}
