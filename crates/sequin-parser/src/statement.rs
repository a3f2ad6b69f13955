//! Parsed statements and how each one changes the diagram model.
//!
//! The parser produces one [`Statement`] per non-blank source line. Statements
//! are immutable; [`Statement::apply`] is the single place where each kind is
//! turned into model-builder calls.

use log::debug;

use sequin_core::semantic::{ActivationElement, FragmentOperator, SignalElement, SignalKind};

use crate::{
    builder::ModelBuilder,
    error::ErrorCode,
    span::{Span, Spanned},
    tokens::Token,
};

/// One instruction parsed from the source.
///
/// Participant references are kept as name tokens and resolved when the
/// statement is applied, so a name may be used before it is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'src> {
    /// `title <text>`
    Title {
        keyword: Token<'src>,
        text: Spanned<String>,
    },
    /// `participant <name>` or `participant "<display>" as <name>`
    DeclareParticipant {
        keyword: Token<'src>,
        name: Token<'src>,
        display_name: Option<Spanned<String>>,
    },
    /// A bare `<name>` line: create the participant unless it exists.
    EnsureParticipant { name: Token<'src> },
    /// `<source> <operator> <target> [: <label>]`
    Signal {
        source: Token<'src>,
        operator: Token<'src>,
        kind: SignalKind,
        target: Token<'src>,
        label: Option<Spanned<String>>,
    },
    /// `activate <name>`
    Activate {
        keyword: Token<'src>,
        participant: Token<'src>,
    },
    /// `deactivate <name>`
    Deactivate {
        keyword: Token<'src>,
        participant: Token<'src>,
    },
    /// `opt`, `loop` or `alt`, with an optional guard
    FragmentStart {
        keyword: Token<'src>,
        operator: FragmentOperator,
        guard: Option<Spanned<String>>,
    },
    /// `else`, with an optional guard
    FragmentElse {
        keyword: Token<'src>,
        guard: Option<Spanned<String>>,
    },
    /// `end`
    FragmentEnd { keyword: Token<'src> },
}

impl Statement<'_> {
    /// Apply this statement to the builder.
    ///
    /// Semantic problems never abort: unknown participants are created on
    /// first use, and unbalanced `deactivate`/`else`/`end` lines are recorded
    /// as errors on the builder.
    pub fn apply(&self, builder: &mut ModelBuilder) {
        match self {
            Statement::Title { text, .. } => builder.set_title(text.inner()),
            Statement::DeclareParticipant {
                name, display_name, ..
            } => {
                if builder.has_participant(name.text) {
                    debug!(name = name.text; "Duplicate participant declaration ignored");
                    return;
                }
                let display_name = display_name.as_ref().map(|d| d.inner().as_str());
                builder.create_participant(name.text, display_name);
            }
            Statement::EnsureParticipant { name } => ensure_participant(builder, name.text),
            Statement::Signal {
                source,
                kind,
                target,
                label,
                ..
            } => {
                ensure_participant(builder, source.text);
                ensure_participant(builder, target.text);
                let label = label.as_ref().map_or("", |l| l.inner().as_str());
                builder.add_signal(SignalElement::new(source.text, target.text, *kind, label));
            }
            Statement::Activate { participant, .. } => {
                ensure_participant(builder, participant.text);
                builder.add_activation(ActivationElement::activate(participant.text));
            }
            Statement::Deactivate { participant, .. } => {
                if builder.is_active(participant.text) {
                    builder.add_activation(ActivationElement::deactivate(participant.text));
                } else {
                    builder.add_error(
                        participant,
                        ErrorCode::E203,
                        format!("`{}` has no open activation", participant.text),
                    );
                }
            }
            Statement::FragmentStart {
                keyword,
                operator,
                guard,
            } => builder.begin_fragment(*operator, guard_text(guard), keyword),
            Statement::FragmentElse { keyword, guard } => {
                builder.next_operand(guard_text(guard), keyword)
            }
            Statement::FragmentEnd { keyword } => builder.end_fragment(keyword),
        }
    }

    /// Source range from the first to the last token of the statement.
    pub fn span(&self) -> Span {
        match self {
            Statement::Title { keyword, text } => keyword.span.union(text.span()),
            Statement::DeclareParticipant { keyword, name, .. } => keyword.span.union(name.span),
            Statement::EnsureParticipant { name } => name.span,
            Statement::Signal {
                source,
                target,
                label,
                ..
            } => {
                let span = source.span.union(target.span);
                label.as_ref().map_or(span, |l| span.union(l.span()))
            }
            Statement::Activate {
                keyword,
                participant,
            }
            | Statement::Deactivate {
                keyword,
                participant,
            } => keyword.span.union(participant.span),
            Statement::FragmentStart { keyword, guard, .. }
            | Statement::FragmentElse { keyword, guard } => guard
                .as_ref()
                .map_or(keyword.span, |g| keyword.span.union(g.span())),
            Statement::FragmentEnd { keyword } => keyword.span,
        }
    }
}

/// Create `name` unless it already exists. Applying this any number of times
/// leaves exactly one participant with that name.
fn ensure_participant(builder: &mut ModelBuilder, name: &str) {
    if !builder.has_participant(name) {
        builder.create_participant(name, None);
    }
}

fn guard_text(guard: &Option<Spanned<String>>) -> Option<String> {
    guard.as_ref().map(|g| g.inner().clone())
}
