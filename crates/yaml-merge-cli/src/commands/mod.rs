/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command implementations for the yaml-merge CLI
//!
//! Each command module handles the CLI interface and delegates to
//! yaml-tree and yaml-merge for the actual work.

pub mod dump;
pub mod merge;
pub mod prune;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use yaml_tree::Node;

/// Read and parse a YAML file.
///
/// With `all_documents`, every document in the file is kept under one
/// document node; otherwise only the first document is read.
pub fn read_document(path: &Path, all_documents: bool) -> Result<Node> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = if all_documents {
        yaml_tree::parse_stream(&content)
    } else {
        yaml_tree::parse(&content)
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `text` to `output`, or to stdout when no file is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_first_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("multi.yml");
        fs::write(&path, "a: 1\n---\nb: 2\n").unwrap();

        assert_eq!(read_document(&path, false).unwrap().content.len(), 1);
        assert_eq!(read_document(&path, true).unwrap().content.len(), 2);
    }

    #[test]
    fn test_read_document_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        let err = read_document(&path, false).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn test_write_output_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.yml");
        write_output("a: 1\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
    }
}
