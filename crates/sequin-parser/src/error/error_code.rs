//! Error codes for the Sequin diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors
//! - `E1xx` - Syntax errors
//! - `E2xx` - Model building errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was encountered that is not part of the notation.
    E001,

    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but not closed on the same line.
    E002,

    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The line does not match any statement form at this token.
    E100,

    /// Incomplete statement.
    ///
    /// The line ended before the statement was complete.
    E101,

    // =========================================================================
    // Model Building Errors (E2xx)
    // =========================================================================
    /// `else` outside of an `alt` fragment.
    E200,

    /// `end` without an open fragment.
    E201,

    /// Fragment not closed before the end of input.
    ///
    /// The fragment is closed implicitly so its content is kept.
    E202,

    /// `deactivate` without a matching `activate`.
    E203,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "unterminated string literal",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete statement",
            ErrorCode::E200 => "`else` outside `alt`",
            ErrorCode::E201 => "unmatched `end`",
            ErrorCode::E202 => "unclosed fragment",
            ErrorCode::E203 => "unmatched `deactivate`",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E202.description(), "unclosed fragment");
    }
}
