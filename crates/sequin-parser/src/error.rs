//! Error and diagnostic system for the Sequin compiler.
//!
//! Problems found while lexing, parsing or building the model never abort
//! compilation. Each one becomes an [`AstError`]: a severity, an
//! [`ErrorCode`], the token it is attributed to, a message, and optional help
//! text and secondary labels. Errors are accumulated and returned next to the
//! (possibly partial) diagram; the host decides whether to render anyway.
//!
//! # Example
//!
//! ```
//! # use sequin_parser::error::{AstError, ErrorCode};
//! # use sequin_parser::{Span, Token, TokenKind};
//!
//! let token = Token::new(TokenKind::End, "end", Span::new(40..43));
//! let opener = Span::new(0..3);
//!
//! let error = AstError::error(ErrorCode::E201, &token, "`end` without an open fragment")
//!     .with_secondary_label(opener, "last fragment closed here")
//!     .with_help("remove the extra `end`");
//! assert_eq!(error.to_string(), "error[E201]: `end` without an open fragment");
//! ```

mod ast_error;
mod collector;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::ErrorCollector;

pub use ast_error::AstError;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
