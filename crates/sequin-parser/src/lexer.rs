//! Lexical analyzer for Sequin source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! It never fails: characters it does not recognize, and strings that are
//! not closed before the end of the line, become [`TokenKind::Invalid`]
//! tokens so the parser can report them against the line they appear on.
//!
//! After `:`, `title`, `opt`, `loop`, `alt` and `else` the lexer switches to
//! text mode and returns the rest of the line as a single [`TokenKind::Text`]
//! token. Text ends at the line break or at a `//` comment preceded by
//! whitespace; trailing blanks are not part of it.

use winnow::{
    Parser as _,
    combinator::{alt, delimited, not, peek, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, none_of, one_of, take, take_while},
};
use unicode_normalization::char::is_combining_mark;

use crate::{
    span::Span,
    tokens::{Token, TokenKind},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O>;

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Combining marks are allowed after the first character, so decomposed
/// names like `e\u{301}lan` lex as one identifier.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Parse a line comment starting with `//` or `#`
fn line_comment(input: &mut Input<'_>) -> IResult<TokenKind> {
    preceded(alt(("//", "#")), take_while(0.., |c: char| !is_line_break(c)))
        .value(TokenKind::LineComment)
        .parse_next(input)
}

/// Parse a double-quoted string; `\"` and `\\` are the only escapes that
/// change the value, but any escaped character is accepted.
fn string_literal(input: &mut Input<'_>) -> IResult<TokenKind> {
    let plain = none_of(['"', '\\', '\n', '\r']).void();
    let escaped = ('\\', none_of(['\n', '\r'])).void();

    delimited(
        '"',
        repeat::<_, _, (), _, _>(0.., alt((plain, escaped))),
        '"',
    )
    .value(TokenKind::StringLiteral)
    .parse_next(input)
}

/// Parse signal operators and the colon (longest first)
fn operator(input: &mut Input<'_>) -> IResult<TokenKind> {
    alt((
        literal("-->").value(TokenKind::DashedArrow),
        literal("--").value(TokenKind::DashedLine),
        literal("->").value(TokenKind::Arrow),
        '-'.value(TokenKind::Line),
        ':'.value(TokenKind::Colon),
    ))
    .parse_next(input)
}

/// Parse keywords with word boundary checking
fn keyword(input: &mut Input<'_>) -> IResult<TokenKind> {
    terminated(
        alt((
            literal("participant").value(TokenKind::Participant),
            literal("deactivate").value(TokenKind::Deactivate),
            literal("activate").value(TokenKind::Activate),
            literal("title").value(TokenKind::Title),
            literal("loop").value(TokenKind::Loop),
            literal("else").value(TokenKind::Else),
            literal("opt").value(TokenKind::Opt),
            literal("alt").value(TokenKind::Alt),
            literal("end").value(TokenKind::End),
            literal("as").value(TokenKind::As),
        )),
        // `endpoint` is a name, not `end` followed by `point`
        peek(not(one_of(is_name_char))),
    )
    .parse_next(input)
}

/// Parse a participant name: a letter or `_`, then letters, digits or `_`
fn identifier(input: &mut Input<'_>) -> IResult<TokenKind> {
    (one_of(is_name_start), take_while(0.., is_name_char))
        .value(TokenKind::Identifier)
        .parse_next(input)
}

/// Parse a line break: `\r\n`, `\n` or a lone `\r`
fn newline(input: &mut Input<'_>) -> IResult<TokenKind> {
    alt(("\r\n", "\n", "\r"))
        .value(TokenKind::Newline)
        .parse_next(input)
}

/// Parse whitespace other than line breaks
fn whitespace(input: &mut Input<'_>) -> IResult<TokenKind> {
    take_while(1.., |c: char| c.is_whitespace() && !is_line_break(c))
        .value(TokenKind::Whitespace)
        .parse_next(input)
}

/// Byte length of the free text at the start of `rest`.
fn text_len(rest: &str) -> usize {
    let line = &rest[..rest.find(['\n', '\r']).unwrap_or(rest.len())];
    if line.starts_with("//") {
        return 0;
    }
    let content_end = line
        .char_indices()
        .find(|&(idx, c)| c.is_whitespace() && line[idx + c.len_utf8()..].starts_with("//"))
        .map_or(line.len(), |(idx, _)| idx);
    line[..content_end].trim_end().len()
}

/// Parse a byte order mark; it is only accepted at the very start of input
fn byte_order_mark(input: &mut Input<'_>) -> IResult<TokenKind> {
    '\u{feff}'.value(TokenKind::Whitespace).parse_next(input)
}

/// Parse the rest of the current line without its line break
fn rest_of_line<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(0.., |c: char| !is_line_break(c)).parse_next(input)
}

/// Parse free text up to the end of the line.
///
/// Fails without consuming on leading whitespace so the blank is lexed as
/// its own token and the text lexeme starts at its first visible character.
fn text<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let checkpoint = input.checkpoint();
    let line = rest_of_line.parse_next(input)?;
    input.reset(&checkpoint);

    let len = text_len(line);
    if len == 0 || line.starts_with(char::is_whitespace) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    take(line[..len].chars().count()).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let (kind, lexeme) = alt((
        line_comment,   // Must come before `-`-based operators and identifiers
        string_literal, // Must come before any single char
        operator,       // Longest operators first
        keyword,        // Must come before identifier
        identifier,
        newline, // Must come before whitespace
        whitespace,
    ))
    .with_taken()
    .parse_next(input)?;

    let end = input.current_token_start();
    Ok(Token::new(kind, lexeme, Span::new(start..end)))
}

/// Parse the text token of a line in text mode.
fn positioned_text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    let lexeme = text.parse_next(input)?;
    let end = input.current_token_start();
    Ok(Token::new(TokenKind::Text, lexeme, Span::new(start..end)))
}

/// Consume input the grammar does not recognize as one `Invalid` token.
///
/// An opening quote swallows the rest of the line (unterminated string);
/// anything else is a single unexpected character.
fn invalid_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    let lexeme = alt((preceded(peek('"'), rest_of_line), take(1usize))).parse_next(input)?;

    let end = input.current_token_start();
    Ok(Token::new(TokenKind::Invalid, lexeme, Span::new(start..end)))
}

/// Lexer state that accumulates tokens during tokenization.
struct Lexer<'a> {
    tokens: Vec<Token<'a>>,
    /// Set after a token that may be followed by free text on the same line.
    text_pending: bool,
    invalid: usize,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            text_pending: false,
            invalid: 0,
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        let start = input.current_token_start();
        if let Ok((kind, lexeme)) = byte_order_mark.with_taken().parse_next(&mut input) {
            let end = input.current_token_start();
            self.tokens.push(Token::new(kind, lexeme, Span::new(start..end)));
        }

        while input.eof_offset() > 0 {
            let pending = self.text_pending;
            if pending {
                if let Ok(token) = positioned_text(&mut input) {
                    self.text_pending = false;
                    self.tokens.push(token);
                    continue;
                }
            }

            let token = match positioned_token(&mut input) {
                Ok(token) => token,
                Err(_) => {
                    self.invalid += 1;
                    match invalid_token(&mut input) {
                        Ok(token) => token,
                        // Only reachable on empty input, which the loop excludes.
                        Err(_) => break,
                    }
                }
            };
            self.text_pending = token.kind.starts_text()
                || (pending && token.kind == TokenKind::Whitespace);
            self.tokens.push(token);
        }
    }

    fn finish(mut self, source: &'a str) -> Vec<Token<'a>> {
        let end = source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, "", Span::new(end..end)));
        log::trace!(tokens = self.tokens.len(), invalid = self.invalid; "Tokenized source");
        self.tokens
    }
}

/// Split source text into tokens.
///
/// The returned stream covers the whole input (every byte belongs to exactly
/// one token) and always ends with a single [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish(source)
}
