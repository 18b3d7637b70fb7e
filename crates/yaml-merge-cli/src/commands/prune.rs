/*
 * prune.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Prune command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;
use yaml_tree::{EmitOptions, emit_with_options};

use super::{read_document, write_output};

/// Arguments for the prune command
#[derive(Debug)]
pub struct PruneArgs {
    pub file: PathBuf,
    pub explicit: bool,
    pub implicit: bool,
    pub indent: usize,
    /// Output file (stdout when absent)
    pub output: Option<PathBuf>,
}

/// Execute the prune command
pub fn execute(args: PruneArgs) -> Result<()> {
    if !args.explicit && !args.implicit {
        warn!("Neither --explicit nor --implicit given; only empty collections will be removed");
    }

    let mut document = read_document(&args.file, false)?;
    yaml_merge::prune_nulls(&mut document, args.explicit, args.implicit);

    let text = emit_with_options(&document, &EmitOptions { indent: args.indent });
    write_output(&text, args.output.as_deref())
}
