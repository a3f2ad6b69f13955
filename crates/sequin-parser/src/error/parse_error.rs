//! The ParseError type for callers that treat diagnostics as failure.
//!
//! [`compile`](crate::compile) never fails; [`ParseError`] wraps its
//! diagnostics for hosts that want a `Result` instead, such as the strict
//! mode of the command line tool.

use std::fmt;

use crate::error::AstError;

/// One or more diagnostics returned as an error value.
#[derive(Debug, Clone)]
pub struct ParseError {
    errors: Vec<AstError>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(errors: Vec<AstError>) -> Self {
        Self { errors }
    }

    /// Get all diagnostics in this error.
    pub fn errors(&self) -> &[AstError] {
        &self.errors
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.errors.first() {
            write!(f, "{}", first)?;
            if self.errors.len() > 1 {
                write!(f, " (+{} more)", self.errors.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<AstError> for ParseError {
    fn from(error: AstError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<AstError>> for ParseError {
    fn from(errors: Vec<AstError>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        span::Span,
        tokens::{Token, TokenKind},
    };

    fn error(message: &str) -> AstError {
        let token = Token::new(TokenKind::Invalid, "?", Span::new(0..1));
        AstError::error(ErrorCode::E001, &token, message)
    }

    #[test]
    fn test_parse_error_display_single() {
        let err: ParseError = error("unexpected character `?`").into();
        assert_eq!(err.to_string(), "error[E001]: unexpected character `?`");
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let err: ParseError = vec![error("first"), error("second"), error("third")].into();
        assert_eq!(err.errors().len(), 3);
        assert_eq!(err.to_string(), "error[E001]: first (+2 more)");
    }
}
