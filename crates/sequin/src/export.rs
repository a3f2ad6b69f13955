//! Export functionality for Sequin diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a compiled diagram into an output format. It is the final stage in
//! the Sequin processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ compile
//! Semantic Model
//!     ↓ layout + render (against a GraphicContext)
//! Draw calls
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgContext`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`SequinError::Export`] at the crate
//! boundary.
//!
//! [`SequinError::Export`]: crate::SequinError::Export

/// SVG export backend.
pub mod svg;

use sequin_core::semantic::SequenceDiagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Lays out, renders and writes `diagram` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be drawn, or
    /// [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &SequenceDiagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`SequinError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`SequinError::Export`]: crate::SequinError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
