//! Collector for accumulating diagnostics during a compilation stage.

use crate::error::AstError;

/// Accumulates [`AstError`]s so a stage can report every problem instead of
/// stopping at the first one.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: Vec<AstError>,
    error_count: usize,
}

impl ErrorCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn emit(&mut self, error: AstError) {
        if error.severity().is_error() {
            self.error_count += 1;
        }
        log::debug!(code = error.code().as_str(), offset = error.span().start(); "{}", error.message());
        self.errors.push(error);
    }

    /// Number of diagnostics with error severity.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<AstError> {
        self.errors
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

    fn token() -> Token<'static> {
        Token::new(TokenKind::Identifier, "A", Span::new(0..1))
    }

    #[test]
    fn test_collector_empty() {
        let collector = ErrorCollector::new();
        assert_eq!(collector.error_count(), 0);
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_collector_counts_errors_only() {
        let mut collector = ErrorCollector::new();

        collector.emit(AstError::error(ErrorCode::E100, &token(), "error 1"));
        collector.emit(AstError::warning(ErrorCode::E202, &token(), "warning 1"));
        collector.emit(AstError::error(ErrorCode::E101, &token(), "error 2"));

        assert_eq!(collector.error_count(), 2);
        let errors = collector.finish();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[1].message(), "warning 1");
    }
}
