//! CLI logic for the Sequin diagram tool.
//!
//! This module contains the core CLI logic for the Sequin diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::{ConfigError, load_config};

use std::fs;

use log::{info, warn};

use sequin::{DiagramBuilder, SequinError};
use sequin_parser::LineIndex;

use error_adapter::{diagnostic_reports, render_reports};

/// Run the Sequin CLI application
///
/// This function processes the input file through the Sequin pipeline
/// and writes the resulting SVG to the output file.
///
/// Without `--strict`, diagnostics are logged as warnings and the diagram is
/// rendered from every line that could be understood. The diagnostics are
/// returned so callers can report how many were found.
///
/// # Errors
///
/// Returns `SequinError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors (strict mode only)
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<usize, SequinError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        strict = args.strict;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;
    let builder = DiagramBuilder::new(app_config);

    let (diagram, diagnostics) = if args.strict {
        (builder.parse(&source)?, 0)
    } else {
        let (diagram, errors) = builder.compile(&source);
        let lines = LineIndex::new(&source);
        let reports = render_reports(&diagnostic_reports(&errors, &source));
        for (error, report) in errors.iter().zip(reports) {
            let (line, column) = lines.line_col(error.span().start());
            warn!(code:% = error.code(), line, column; "{report}");
        }
        (diagram, errors.len())
    };

    let svg = builder.render_svg(&diagram)?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output, diagnostics; "SVG exported successfully");

    Ok(diagnostics)
}
