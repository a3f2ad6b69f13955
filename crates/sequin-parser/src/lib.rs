//! # Sequin Parser
//!
//! Compiler front end for the Sequin sequence diagram notation. This crate
//! turns source text into a [`SequenceDiagram`] model:
//!
//! 1. **Tokenize** ([`tokenize`]) - split the text into [`Token`]s
//! 2. **Parse** ([`parse`]) - one [`Statement`] per line, with recovery
//! 3. **Build** ([`ModelBuilder`]) - apply each statement to the model
//!
//! Compilation never fails. Problems are returned as [`AstError`]s next to
//! a diagram that contains everything that could be understood.
//!
//! ## Usage
//!
//! ```
//! use sequin_parser::compile;
//!
//! let source = "
//! title Login
//! Alice -> Bob: Request
//! Bob --> Alice: Response
//! ";
//!
//! let (diagram, errors) = compile(source);
//! assert!(errors.is_empty());
//! assert_eq!(diagram.title(), Some("Login"));
//! assert_eq!(diagram.participant_count(), 2);
//! assert_eq!(diagram.signals().count(), 2);
//! ```

mod builder;
pub mod error;
mod lexer;
mod parser;
mod span;
mod statement;
mod tokens;

use log::info;

use sequin_core::semantic::SequenceDiagram;

pub use builder::ModelBuilder;
pub use error::{AstError, ParseError};
pub use lexer::tokenize;
pub use parser::parse;
pub use span::{LineIndex, Span, Spanned};
pub use statement::Statement;
pub use tokens::{Token, TokenKind, TokenSnapshot};

/// Compile source text into a diagram.
///
/// Always returns a diagram, possibly partial, together with every error
/// found, ordered by source position. A malformed line contributes one
/// error and nothing else; all other lines are applied in order.
///
/// # Example
///
/// ```
/// # use sequin_parser::{compile, error::ErrorCode};
/// let (diagram, errors) = compile("??? broken line\nAlice -> Bob: Hi");
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].code(), ErrorCode::E001);
/// assert_eq!(diagram.signals().count(), 1);
/// ```
pub fn compile(source: &str) -> (SequenceDiagram, Vec<AstError>) {
    let tokens = tokenize(source);
    let (statements, mut errors) = parse(&tokens);

    let mut builder = ModelBuilder::new();
    for statement in &statements {
        statement.apply(&mut builder);
    }
    let (diagram, build_errors) = builder.finish();

    errors.extend(build_errors);
    errors.sort_by_key(|error| error.span().start());

    info!(
        statements = statements.len(),
        participants = diagram.participant_count(),
        signals = diagram.signals().count(),
        errors = errors.len();
        "Compiled sequence diagram"
    );

    (diagram, errors)
}

/// Compile source text, treating any error-severity diagnostic as failure.
///
/// Warnings alone do not fail compilation.
pub fn compile_strict(source: &str) -> Result<SequenceDiagram, ParseError> {
    let (diagram, errors) = compile(source);
    if errors.iter().any(|error| error.severity().is_error()) {
        Err(ParseError::new(errors))
    } else {
        Ok(diagram)
    }
}
