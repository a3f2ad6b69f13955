//! The diagnostic type produced by every compiler stage.

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
    tokens::TokenSnapshot,
};

/// A recoverable problem tied to the token where it was found.
///
/// Errors carry a token rather than a bare string so editors can underline
/// the exact source range. The token is an owned snapshot, so an `AstError`
/// outlives the source text it was produced from.
///
/// ```text
/// error[E100]: unexpected `:`, expected participant name
///   --> login.seq:2:10
///    |
///  2 | Alice -> : Hello
///    |          ^ unexpected token
///    |
///    = help: a signal needs a source and a target: `A -> B: label`
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{severity}[{code}]: {message}")]
pub struct AstError {
    severity: Severity,
    code: ErrorCode,
    token: TokenSnapshot,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl AstError {
    /// Create an error attributed to `token`.
    ///
    /// The primary label covers the token and reads as the code's description.
    pub fn error(
        code: ErrorCode,
        token: impl Into<TokenSnapshot>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, token.into(), message.into())
    }

    /// Create a warning attributed to `token`.
    pub fn warning(
        code: ErrorCode,
        token: impl Into<TokenSnapshot>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, token.into(), message.into())
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The token this error is attributed to.
    pub fn token(&self) -> &TokenSnapshot {
        &self.token
    }

    /// Source range of the offending token.
    pub fn span(&self) -> Span {
        self.token.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// All labels; the first one is the primary label on the token.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, code: ErrorCode, token: TokenSnapshot, message: String) -> Self {
        let labels = vec![Label::primary(token.span, code.description())];
        Self {
            severity,
            code,
            token,
            message,
            labels,
            help: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};

    fn end_token() -> Token<'static> {
        Token::new(TokenKind::End, "end", Span::new(20..23))
    }

    #[test]
    fn test_error_has_primary_label_on_token() {
        let error = AstError::error(ErrorCode::E201, &end_token(), "no fragment to close");

        assert!(error.severity().is_error());
        assert_eq!(error.code(), ErrorCode::E201);
        assert_eq!(error.span(), Span::new(20..23));
        assert_eq!(error.token().lexeme, "end");
        assert_eq!(error.labels().len(), 1);
        assert!(error.labels()[0].is_primary());
        assert_eq!(error.labels()[0].message(), "unmatched `end`");
        assert!(error.help().is_none());
    }

    #[test]
    fn test_builder_chain() {
        let error = AstError::warning(ErrorCode::E202, &end_token(), "fragment never closed")
            .with_secondary_label(Span::new(0..3), "opened here")
            .with_help("add `end`");

        assert!(error.severity().is_warning());
        assert_eq!(error.labels().len(), 2);
        assert!(error.labels()[1].is_secondary());
        assert_eq!(error.help(), Some("add `end`"));
    }

    #[test]
    fn test_display() {
        let error = AstError::error(ErrorCode::E100, &end_token(), "unexpected `end`");
        assert_eq!(error.to_string(), "error[E100]: unexpected `end`");
    }
}
