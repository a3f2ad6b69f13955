//! Sequin - a text notation for UML sequence diagrams
//!
//! This library ties the Sequin pipeline together: the compiler front end
//! from `sequin-parser`, the layout engine, the renderer that draws against
//! any [`draw::GraphicContext`], and an SVG backend.
//!
//! Most hosts only need [`DiagramBuilder`]. Hosts with their own drawing
//! surface call [`render::render`] with their graphic context instead.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use sequin_core::{color, draw, geometry, semantic};
pub use sequin_parser::{AstError, ParseError, compile, compile_strict};

pub use error::SequinError;

use log::{debug, info, trace};

use config::AppConfig;

/// Builder for parsing and rendering Sequin diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use sequin::{DiagramBuilder, config::AppConfig};
///
/// let source = "Alice -> Bob: Hello\nBob --> Alice: Hi";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to the diagram model
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the model to SVG
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a diagram, failing on any error.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Parse`] holding every diagnostic and the
    /// source text when the source has at least one error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sequin::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder.parse("Alice -> Bob: Hi").unwrap();
    /// assert_eq!(diagram.participant_count(), 2);
    ///
    /// assert!(builder.parse("Alice ->").is_err());
    /// ```
    pub fn parse(&self, source: &str) -> Result<semantic::SequenceDiagram, SequinError> {
        info!("Compiling diagram");
        let diagram = compile_strict(source)
            .map_err(|err| SequinError::new_parse_error(err, source))?;
        debug!("Diagram compiled successfully");
        trace!(diagram:?; "Compiled diagram");
        Ok(diagram)
    }

    /// Parse source text leniently.
    ///
    /// Returns whatever could be understood together with every diagnostic.
    pub fn compile(&self, source: &str) -> (semantic::SequenceDiagram, Vec<AstError>) {
        compile(source)
    }

    /// Lay out a diagram, measuring text with `measurer`.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Layout`] if the diagram references participants
    /// it does not declare.
    pub fn layout<M: draw::MeasureText + ?Sized>(
        &self,
        diagram: &semantic::SequenceDiagram,
        measurer: &mut M,
    ) -> Result<layout::SequenceLayout, SequinError> {
        layout::SequenceLayout::compute(diagram, measurer, self.config.layout())
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError`] for layout, style or drawing errors.
    pub fn render_svg(&self, diagram: &semantic::SequenceDiagram) -> Result<String, SequinError> {
        info!(
            participants = diagram.participant_count(),
            signals = diagram.signals().count();
            "Rendering diagram"
        );
        let document = export::svg::render_document(diagram, &self.config)?;
        info!("SVG rendered successfully");
        Ok(document.to_string())
    }
}
