/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for YAML parsing.

use thiserror::Error;

/// Result type alias for yaml-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during YAML parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// YAML syntax error
    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// The event stream did not describe a well-formed tree
    #[error("Invalid YAML structure: {message}")]
    InvalidStructure { message: String },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        let marker = err.marker();
        Error::ParseError {
            message: err.to_string(),
            line: marker.line(),
            column: marker.col() + 1,
        }
    }
}
