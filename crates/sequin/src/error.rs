//! Error types for Sequin operations.
//!
//! This module provides the main error type [`SequinError`] which wraps
//! the error conditions that can occur while compiling, laying out and
//! rendering a diagram.

use std::io;

use thiserror::Error;

use sequin_core::draw::DrawError;
use sequin_parser::ParseError;

/// The main error type for Sequin operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so a
/// host can render them with source snippets.
#[derive(Debug, Error)]
pub enum SequinError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for SequinError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl SequinError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
