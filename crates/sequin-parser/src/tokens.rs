//! Token definitions for the Sequin notation.

use std::fmt;

use crate::span::Span;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Title,
    Participant,
    As,
    Activate,
    Deactivate,
    Opt,
    Loop,
    Alt,
    Else,
    End,

    // Literals
    Identifier,
    /// A double-quoted string, quotes included in the lexeme.
    StringLiteral,
    /// Free text running to the end of a line (titles, labels, guards).
    Text,

    // Signal operators
    /// `->`
    Arrow,
    /// `-->`
    DashedArrow,
    /// `-`
    Line,
    /// `--`
    DashedLine,
    Colon,

    // Trivia
    LineComment,
    Whitespace,
    Newline,

    /// An unrecognized character or an unterminated string.
    Invalid,
    /// End of input. Always the last token.
    Eof,
}

impl TokenKind {
    /// Returns true for tokens the parser skips between meaningful tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment)
    }

    /// Returns true if a `Text` token may follow this token on the same line.
    pub fn starts_text(self) -> bool {
        matches!(
            self,
            Self::Colon | Self::Title | Self::Opt | Self::Loop | Self::Alt | Self::Else
        )
    }

    /// Human readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Title => "`title`",
            Self::Participant => "`participant`",
            Self::As => "`as`",
            Self::Activate => "`activate`",
            Self::Deactivate => "`deactivate`",
            Self::Opt => "`opt`",
            Self::Loop => "`loop`",
            Self::Alt => "`alt`",
            Self::Else => "`else`",
            Self::End => "`end`",
            Self::Identifier => "participant name",
            Self::StringLiteral => "string",
            Self::Text => "text",
            Self::Arrow => "`->`",
            Self::DashedArrow => "`-->`",
            Self::Line => "`-`",
            Self::DashedLine => "`--`",
            Self::Colon => "`:`",
            Self::LineComment => "comment",
            Self::Whitespace => "whitespace",
            Self::Newline => "end of line",
            Self::Invalid => "invalid input",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Decoded value of a string literal: quotes removed, `\"` and `\\`
    /// unescaped. Any other backslash is kept as written.
    pub fn string_value(&self) -> String {
        let inner = self
            .text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(self.text);

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(escaped @ ('"' | '\\')) => value.push(escaped),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => value.push('\\'),
                }
            } else {
                value.push(c);
            }
        }
        value
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline | TokenKind::Eof => f.write_str(self.kind.describe()),
            _ => write!(f, "`{}`", self.text),
        }
    }
}

/// An owned copy of a token, kept by diagnostics after the source is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl From<&Token<'_>> for TokenSnapshot {
    fn from(token: &Token<'_>) -> Self {
        Self {
            kind: token.kind,
            lexeme: token.text.to_string(),
            span: token.span,
        }
    }
}
