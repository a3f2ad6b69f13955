//! Parser for Sequin source tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into
//! [`Statement`]s. The notation is line oriented: every non-blank line holds
//! exactly one statement. The public entry point is [`parse`].
//!
//! Each statement parser commits once it has seen its leading keyword or
//! name, so an error points at the token that broke the line rather than at
//! its start. When a line fails, one [`AstError`] is recorded and parsing
//! resumes on the next line.

use std::ops::Range;

use log::debug;
use winnow::{
    Parser as _,
    combinator::{alt, opt, peek, preceded, repeat},
    error::{AddContext, ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use sequin_core::semantic::{FragmentOperator, SignalKind};

use crate::{
    error::{AstError, ErrorCode, ErrorCollector},
    span::Spanned,
    statement::Statement,
    tokens::{Token, TokenKind},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what was expected
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at the offending token
    ///
    /// The token index is `tokens.len() - remaining`.
    ErrorOffset(usize),
}

type Input<'src> = TokenSlice<'src, Token<'src>>;
type IResult<O> = Result<O, ErrMode<ContextError<Context>>>;

/// Build an error expecting `label` at the token `remaining` tokens from the end
fn expected(input: &Input<'_>, label: &'static str, remaining: usize) -> ContextError<Context> {
    let start = input.checkpoint();
    ContextError::new()
        .add_context(input, &start, Context::Label(label))
        .add_context(input, &start, Context::ErrorOffset(remaining))
}

/// Run `f`, turning a backtrack into a cut so no other statement form is tried
fn commit<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    match f(input) {
        Err(ErrMode::Backtrack(e)) => Err(ErrMode::Cut(e)),
        other => other,
    }
}

/// Skip whitespace and a trailing comment
fn trivia0(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., any.verify(|token: &Token<'_>| token.kind.is_trivia())).parse_next(input)
}

/// Skip blank lines and comment-only lines
fn blank_lines(input: &mut Input<'_>) -> IResult<()> {
    repeat(
        0..,
        any.verify(|token: &Token<'_>| {
            token.kind.is_trivia() || token.kind == TokenKind::Newline
        }),
    )
    .parse_next(input)
}

/// Parse one token whose kind is in `kinds`, after optional trivia
fn one_of_kinds<'src>(
    kinds: &'static [TokenKind],
    label: &'static str,
) -> impl FnMut(&mut Input<'src>) -> IResult<&'src Token<'src>> {
    move |input: &mut Input<'src>| {
        trivia0.parse_next(input)?;
        let remaining = input.eof_offset();
        any.verify(|token: &Token<'_>| kinds.contains(&token.kind))
            .parse_next(input)
            .map_err(|_: ErrMode<ContextError<Context>>| {
                ErrMode::Backtrack(expected(input, label, remaining))
            })
    }
}

/// Parse one token of `kind`, after optional trivia
fn token<'src>(
    kind: TokenKind,
    label: &'static str,
) -> impl FnMut(&mut Input<'src>) -> IResult<&'src Token<'src>> {
    move |input: &mut Input<'src>| {
        trivia0.parse_next(input)?;
        let remaining = input.eof_offset();
        any.verify(|token: &Token<'_>| token.kind == kind)
            .parse_next(input)
            .map_err(|_: ErrMode<ContextError<Context>>| {
                ErrMode::Backtrack(expected(input, label, remaining))
            })
    }
}

/// Parse the end of a statement: a line break, or end of input (not consumed)
fn end_of_line(input: &mut Input<'_>) -> IResult<()> {
    alt((
        token(TokenKind::Newline, "end of line").void(),
        peek(token(TokenKind::Eof, "end of line")).void(),
    ))
    .parse_next(input)
}

/// Free text with the literal two-character sequence `\n` turned into a line break
fn label_text(token: &Token<'_>) -> Spanned<String> {
    Spanned::new(token.text.replace("\\n", "\n"), token.span)
}

/// Guard text; surrounding brackets are optional and dropped
fn guard_text(token: &Token<'_>) -> Option<Spanned<String>> {
    let text = token
        .text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .map_or(token.text, str::trim);
    (!text.is_empty()).then(|| Spanned::new(text.to_string(), token.span))
}

/// Parse a title statement: `title <text>`
fn title_statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let keyword = token(TokenKind::Title, "`title`").parse_next(input)?;

    commit(input, |input| {
        let text = token(TokenKind::Text, "title text").parse_next(input)?;
        end_of_line.parse_next(input)?;

        Ok(Statement::Title {
            keyword: *keyword,
            text: Spanned::new(text.text.to_string(), text.span),
        })
    })
}

/// Parse a participant declaration:
///
/// - `participant <name>`
/// - `participant "<display name>" as <name>`
fn participant_statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let keyword = token(TokenKind::Participant, "`participant`").parse_next(input)?;

    commit(input, |input| {
        let display_name = opt(token(
            TokenKind::StringLiteral,
            "participant name or quoted display name",
        ))
        .parse_next(input)?;

        if display_name.is_some() {
            token(TokenKind::As, "`as`").parse_next(input)?;
        }

        let name = token(TokenKind::Identifier, "participant name").parse_next(input)?;
        end_of_line.parse_next(input)?;

        Ok(Statement::DeclareParticipant {
            keyword: *keyword,
            name: *name,
            display_name: display_name.map(|t| Spanned::new(t.string_value(), t.span)),
        })
    })
}

/// Parse `activate <name>` or `deactivate <name>`
fn activation_statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let keyword = one_of_kinds(
        &[TokenKind::Activate, TokenKind::Deactivate],
        "`activate` or `deactivate`",
    )
    .parse_next(input)?;

    commit(input, |input| {
        let participant = token(TokenKind::Identifier, "participant name").parse_next(input)?;
        end_of_line.parse_next(input)?;

        Ok(match keyword.kind {
            TokenKind::Activate => Statement::Activate {
                keyword: *keyword,
                participant: *participant,
            },
            _ => Statement::Deactivate {
                keyword: *keyword,
                participant: *participant,
            },
        })
    })
}

/// Parse fragment structure lines: `opt`, `loop`, `alt`, `else` (each with an
/// optional guard) and `end`
fn fragment_statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let keyword = one_of_kinds(
        &[
            TokenKind::Opt,
            TokenKind::Loop,
            TokenKind::Alt,
            TokenKind::Else,
            TokenKind::End,
        ],
        "fragment keyword",
    )
    .parse_next(input)?;

    commit(input, |input| {
        let guard = match keyword.kind {
            TokenKind::End => None,
            _ => opt(token(TokenKind::Text, "guard"))
                .parse_next(input)?
                .and_then(guard_text),
        };
        end_of_line.parse_next(input)?;

        let keyword = *keyword;
        let operator = match keyword.kind {
            TokenKind::Opt => FragmentOperator::Opt,
            TokenKind::Loop => FragmentOperator::Loop,
            TokenKind::Alt => FragmentOperator::Alt,
            TokenKind::Else => return Ok(Statement::FragmentElse { keyword, guard }),
            _ => return Ok(Statement::FragmentEnd { keyword }),
        };
        Ok(Statement::FragmentStart {
            keyword,
            operator,
            guard,
        })
    })
}

/// Parse a line starting with a name: either a bare declaration `<name>`, or
/// a signal `<source> <operator> <target> [: <label>]`
fn signal_or_declaration<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let source = token(TokenKind::Identifier, "participant name").parse_next(input)?;

    let checkpoint = input.checkpoint();
    if end_of_line.parse_next(input).is_ok() {
        return Ok(Statement::EnsureParticipant { name: *source });
    }
    input.reset(&checkpoint);

    commit(input, |input| {
        let operator = one_of_kinds(
            &[
                TokenKind::Arrow,
                TokenKind::DashedArrow,
                TokenKind::Line,
                TokenKind::DashedLine,
            ],
            "`->`, `-->`, `-` or `--`",
        )
        .parse_next(input)?;

        let target = token(TokenKind::Identifier, "participant name").parse_next(input)?;

        let label = opt(preceded(
            token(TokenKind::Colon, "`:`"),
            opt(token(TokenKind::Text, "label")),
        ))
        .parse_next(input)?
        .flatten()
        .map(label_text);

        end_of_line.parse_next(input)?;

        let kind = match operator.kind {
            TokenKind::Arrow => SignalKind::Call,
            TokenKind::DashedArrow => SignalKind::Return,
            TokenKind::Line => SignalKind::Line,
            _ => SignalKind::DashedLine,
        };

        Ok(Statement::Signal {
            source: *source,
            operator: *operator,
            kind,
            target: *target,
            label,
        })
    })
}

/// Fallback when no statement form matches the first token of a line
fn unknown_statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    trivia0.parse_next(input)?;
    Err(ErrMode::Cut(expected(input, "a statement", input.eof_offset())))
}

/// Parse a single statement line
fn statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    alt((
        title_statement,
        participant_statement,
        activation_statement,
        fragment_statement,
        signal_or_declaration,
        unknown_statement,
    ))
    .parse_next(input)
}

/// Diagnostic for an `Invalid` token produced by the lexer
fn lexical_error(token: &Token<'_>) -> AstError {
    if token.text.starts_with('"') {
        AstError::error(ErrorCode::E002, token, "unterminated string literal")
            .with_help("close the string with `\"` on the same line")
    } else {
        AstError::error(
            ErrorCode::E001,
            token,
            format!("unexpected character {token}"),
        )
        .with_help("names start with a letter or `_` and contain letters, digits or `_`")
    }
}

/// Convert a failed line into exactly one diagnostic.
///
/// Lexical problems on the line take precedence: the first `Invalid` token
/// is reported. Otherwise the error points at the token recorded in the
/// error context; a line that simply ended too early is reported on its last
/// meaningful token.
fn line_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[Token<'_>],
    line: Range<usize>,
) -> AstError {
    let line_tokens = &tokens[line.clone()];
    if let Some(invalid) = line_tokens.iter().find(|t| t.kind == TokenKind::Invalid) {
        return lexical_error(invalid);
    }

    let (label, remaining) = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => (
            e.context().find_map(|ctx| match ctx {
                Context::Label(label) => Some(*label),
                _ => None,
            }),
            e.context().find_map(|ctx| match ctx {
                Context::ErrorOffset(n) => Some(*n),
                _ => None,
            }),
        ),
        ErrMode::Incomplete(_) => (None, None),
    };
    let expected = label.unwrap_or("a statement");

    let index = remaining
        .map(|r| tokens.len().saturating_sub(r))
        .unwrap_or(line.start)
        .min(tokens.len().saturating_sub(1));
    let offending = &tokens[index];

    match offending.kind {
        TokenKind::Newline | TokenKind::Eof => {
            let last = line_tokens
                .iter()
                .rev()
                .find(|t| !t.kind.is_trivia())
                .unwrap_or(offending);
            AstError::error(
                ErrorCode::E101,
                last,
                format!("incomplete statement, expected {expected}"),
            )
            .with_help("complete the statement or remove the line")
        }
        _ => AstError::error(
            ErrorCode::E100,
            offending,
            format!("unexpected {offending}, expected {expected}"),
        ),
    }
}

/// Index of the current position in `tokens`
fn position(tokens: &[Token<'_>], input: &Input<'_>) -> usize {
    tokens.len() - input.eof_offset()
}

/// Advance past the rest of the current line, including its line break.
fn skip_line(input: &mut Input<'_>) {
    loop {
        let checkpoint = input.checkpoint();
        match input.next_token() {
            Some(token) if token.kind == TokenKind::Newline => break,
            Some(token) if token.kind == TokenKind::Eof => {
                input.reset(&checkpoint);
                break;
            }
            Some(_) => {}
            None => break,
        }
    }
}

/// Parse tokens into statements, recovering at line boundaries.
///
/// Always consumes the whole stream. Each line that cannot be parsed adds
/// exactly one error and no statement; every other line adds exactly one
/// statement.
pub fn parse<'src>(tokens: &'src [Token<'src>]) -> (Vec<Statement<'src>>, Vec<AstError>) {
    let mut input = TokenSlice::new(tokens);
    let mut statements = Vec::new();
    let mut errors = ErrorCollector::new();

    loop {
        // Only single-token repeats; this cannot fail.
        let _ = blank_lines.parse_next(&mut input);

        let start = position(tokens, &input);
        if tokens
            .get(start)
            .is_none_or(|token| token.kind == TokenKind::Eof)
        {
            break;
        }

        let checkpoint = input.checkpoint();
        match statement.parse_next(&mut input) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                let end = tokens[start..]
                    .iter()
                    .position(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
                    .map_or(tokens.len(), |offset| start + offset);

                errors.emit(line_error(error, tokens, start..end));

                input.reset(&checkpoint);
                skip_line(&mut input);
            }
        }
    }

    debug!(
        statements = statements.len(),
        errors = errors.error_count();
        "Parsed statements"
    );

    (statements, errors.finish())
}
