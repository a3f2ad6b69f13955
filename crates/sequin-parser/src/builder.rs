//! Incremental construction of a [`SequenceDiagram`].
//!
//! The [`ModelBuilder`] owns the diagram while statements are applied to it.
//! It is the only place the model is mutated, and it is consumed by
//! [`ModelBuilder::finish`], so nothing can hold on to it afterwards.

use indexmap::IndexMap;
use log::debug;

use sequin_core::semantic::{
    ActivationElement, ActivationKind, CombinedFragment, DiagramElement, FragmentOperator,
    InteractionOperand, Participant, SequenceDiagram, SignalElement,
};

use crate::{
    error::{AstError, ErrorCode, ErrorCollector},
    tokens::{Token, TokenSnapshot},
};

/// A fragment whose `end` has not been seen yet.
#[derive(Debug)]
struct OpenFragment {
    operator: FragmentOperator,
    opener: TokenSnapshot,
    closed_operands: Vec<InteractionOperand>,
    current: InteractionOperand,
}

impl OpenFragment {
    fn into_fragment(mut self) -> CombinedFragment {
        self.closed_operands.push(self.current);
        CombinedFragment::new(self.operator, self.closed_operands)
    }
}

/// Holds the in-progress diagram and the errors recorded while building it.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    diagram: SequenceDiagram,
    fragments: Vec<OpenFragment>,
    open_activations: IndexMap<String, usize>,
    errors: ErrorCollector,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The diagram built so far.
    pub fn diagram(&self) -> &SequenceDiagram {
        &self.diagram
    }

    /// Look up a participant by exact, case-sensitive name.
    pub fn find_participant(&self, name: &str) -> Option<&Participant> {
        self.diagram.participant(name)
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.diagram.has_participant(name)
    }

    /// Append a new participant.
    ///
    /// Callers check [`has_participant`](Self::has_participant) first when
    /// uniqueness matters; creating an existing name leaves the first one in
    /// place.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn create_participant(&mut self, name: &str, display_name: Option<&str>) {
        let mut participant = Participant::new(name);
        if let Some(display_name) = display_name {
            participant = participant.with_display_name(display_name);
        }
        if self.diagram.add_participant(participant) {
            debug!(name, index = self.diagram.participant_count() - 1; "Participant created");
        } else {
            debug!(name; "Participant already exists, keeping the first definition");
        }
    }

    /// Append a signal to the innermost open operand.
    pub fn add_signal(&mut self, signal: SignalElement) {
        self.push_element(DiagramElement::Signal(signal));
    }

    /// Replace the diagram title; the last call wins.
    pub fn set_title(&mut self, title: &str) {
        if let Some(previous) = self.diagram.title() {
            debug!(previous, title; "Title replaced");
        }
        self.diagram.set_title(title);
    }

    /// Record a non-fatal error attributed to `token`.
    pub fn add_error(&mut self, token: &Token<'_>, code: ErrorCode, message: impl Into<String>) {
        self.errors.emit(AstError::error(code, token, message));
    }

    /// Record a fully built diagnostic.
    pub fn push_error(&mut self, error: AstError) {
        self.errors.emit(error);
    }

    /// Open a combined fragment; its first operand takes `guard`.
    pub fn begin_fragment(
        &mut self,
        operator: FragmentOperator,
        guard: Option<String>,
        keyword: &Token<'_>,
    ) {
        debug!(operator = operator.as_str(), depth = self.fragments.len(); "Fragment opened");
        self.fragments.push(OpenFragment {
            operator,
            opener: keyword.into(),
            closed_operands: Vec::new(),
            current: InteractionOperand::new(guard),
        });
    }

    /// Start the next operand of the innermost fragment.
    ///
    /// Only `alt` fragments have more than one operand; anywhere else this
    /// records `E200` and changes nothing.
    pub fn next_operand(&mut self, guard: Option<String>, keyword: &Token<'_>) {
        match self.fragments.last_mut() {
            Some(open) if open.operator.allows_else() => {
                let finished = std::mem::replace(&mut open.current, InteractionOperand::new(guard));
                open.closed_operands.push(finished);
            }
            Some(open) => {
                let error = AstError::error(
                    ErrorCode::E200,
                    keyword,
                    format!("`else` is not allowed in a `{}` fragment", open.operator),
                )
                .with_secondary_label(open.opener.span, "fragment opened here")
                .with_help("only `alt` fragments have alternative branches");
                self.errors.emit(error);
            }
            None => {
                let error = AstError::error(ErrorCode::E200, keyword, "`else` outside of a fragment")
                    .with_help("`else` separates the branches of an `alt` fragment");
                self.errors.emit(error);
            }
        }
    }

    /// Close the innermost fragment, or record `E201` if none is open.
    pub fn end_fragment(&mut self, keyword: &Token<'_>) {
        match self.fragments.pop() {
            Some(open) => {
                debug!(operator = open.operator.as_str(), depth = self.fragments.len(); "Fragment closed");
                self.push_element(DiagramElement::Fragment(open.into_fragment()));
            }
            None => {
                let error = AstError::error(ErrorCode::E201, keyword, "`end` without an open fragment")
                    .with_help("remove this line or open a fragment with `opt`, `loop` or `alt`");
                self.errors.emit(error);
            }
        }
    }

    /// Returns true if `participant` has an activation that is still open.
    pub fn is_active(&self, participant: &str) -> bool {
        self.open_activations
            .get(participant)
            .is_some_and(|&depth| depth > 0)
    }

    /// Append an activation start or end and track nesting per participant.
    ///
    /// A `Deactivate` for a participant without an open activation is
    /// ignored; statements check [`is_active`](Self::is_active) first to
    /// report it.
    pub fn add_activation(&mut self, element: ActivationElement) {
        let depth = self
            .open_activations
            .entry(element.participant().to_string())
            .or_default();
        match element.kind() {
            ActivationKind::Activate => *depth += 1,
            ActivationKind::Deactivate if *depth > 0 => *depth -= 1,
            ActivationKind::Deactivate => return,
        }
        self.push_element(DiagramElement::Activation(element));
    }

    /// Consume the builder and return the diagram with every recorded error.
    ///
    /// Fragments still open are closed here so their content is kept; each
    /// one records `E202` at its opening keyword. Open activations are not an
    /// error: their bars run to the end of the lifeline.
    pub fn finish(mut self) -> (SequenceDiagram, Vec<AstError>) {
        while let Some(open) = self.fragments.pop() {
            let error = AstError::error(
                ErrorCode::E202,
                open.opener.clone(),
                format!("`{}` fragment is never closed", open.operator),
            )
            .with_help("add `end` after the last line of the fragment");
            self.errors.emit(error);
            self.push_element(DiagramElement::Fragment(open.into_fragment()));
        }
        (self.diagram, self.errors.finish())
    }

    fn push_element(&mut self, element: DiagramElement) {
        match self.fragments.last_mut() {
            Some(open) => open.current.push(element),
            None => self.diagram.push(element),
        }
    }
}
