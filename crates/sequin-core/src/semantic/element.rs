//! Elements of a sequence diagram.

use std::{fmt, slice};

/// A named lifeline.
///
/// Participants are identified by their exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    display_name: Option<String>,
}

impl Participant {
    /// Creates a participant.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "participant name must not be empty");
        Self {
            name,
            display_name: None,
        }
    }

    /// Sets the text shown in the participant box instead of the name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// The identifying name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display name, if one was declared.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The text drawn in the participant box.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// The line and head style of a signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// `->`: solid line with an arrow head.
    #[default]
    Call,
    /// `-->`: dashed line with an arrow head.
    Return,
    /// `-`: solid line without a head.
    Line,
    /// `--`: dashed line without a head.
    DashedLine,
}

impl SignalKind {
    /// Returns true for the dashed variants.
    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Return | Self::DashedLine)
    }

    /// Returns true when an arrow head is drawn at the target.
    pub fn has_arrow(self) -> bool {
        matches!(self, Self::Call | Self::Return)
    }

    /// The notation for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "->",
            Self::Return => "-->",
            Self::Line => "-",
            Self::DashedLine => "--",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message from one participant to another, or to itself.
///
/// Participants are referenced by name; the model builder guarantees the
/// names exist in the owning diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalElement {
    source: String,
    target: String,
    kind: SignalKind,
    label: String,
}

impl SignalElement {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: SignalKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            label: label.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// The label text; empty when the source line had none.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true when source and target are the same participant.
    pub fn is_self_signal(&self) -> bool {
        self.source == self.target
    }
}

/// Whether an activation starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    Activate,
    Deactivate,
}

/// Start or end of an activation bar on a participant's lifeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationElement {
    participant: String,
    kind: ActivationKind,
}

impl ActivationElement {
    pub fn activate(participant: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            kind: ActivationKind::Activate,
        }
    }

    pub fn deactivate(participant: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            kind: ActivationKind::Deactivate,
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn kind(&self) -> ActivationKind {
        self.kind
    }
}

/// Interaction operator of a combined fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentOperator {
    /// Optional content, drawn when the guard holds.
    Opt,
    /// Repeated content.
    Loop,
    /// Alternatives; one operand per `alt`/`else` branch.
    Alt,
}

impl FragmentOperator {
    /// The keyword for this operator, also drawn in the fragment's header tab.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opt => "opt",
            Self::Loop => "loop",
            Self::Alt => "alt",
        }
    }

    /// Returns true if the operator accepts `else` branches.
    pub fn allows_else(self) -> bool {
        matches!(self, Self::Alt)
    }
}

impl fmt::Display for FragmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured fragment (`opt`, `loop`, `alt`) with one or more operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedFragment {
    operator: FragmentOperator,
    operands: Vec<InteractionOperand>,
}

impl CombinedFragment {
    /// Creates a fragment. An empty `operands` list gets one empty operand so
    /// every fragment has at least one.
    pub fn new(operator: FragmentOperator, mut operands: Vec<InteractionOperand>) -> Self {
        if operands.is_empty() {
            operands.push(InteractionOperand::default());
        }
        Self { operator, operands }
    }

    pub fn operator(&self) -> FragmentOperator {
        self.operator
    }

    pub fn operands(&self) -> &[InteractionOperand] {
        &self.operands
    }
}

/// One item of diagram content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramElement {
    Signal(SignalElement),
    Fragment(CombinedFragment),
    Activation(ActivationElement),
}

/// An ordered, append-only sequence of diagram content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionOperand {
    guard: Option<String>,
    elements: Vec<DiagramElement>,
}

impl InteractionOperand {
    /// Creates an empty operand with an optional guard condition.
    pub fn new(guard: Option<String>) -> Self {
        Self {
            guard,
            elements: Vec::new(),
        }
    }

    /// The guard condition shown in brackets, if any.
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Appends an element at the end.
    pub fn push(&mut self, element: DiagramElement) {
        self.elements.push(element);
    }

    /// The elements in source order.
    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates every signal in this operand and all nested fragments,
    /// depth-first, in source order.
    pub fn signals(&self) -> Signals<'_> {
        Signals {
            stack: vec![self.elements.iter()],
        }
    }
}

/// Depth-first iterator over the signals of an [`InteractionOperand`].
pub struct Signals<'a> {
    stack: Vec<slice::Iter<'a, DiagramElement>>,
}

impl<'a> Iterator for Signals<'a> {
    type Item = &'a SignalElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(DiagramElement::Signal(signal)) => return Some(signal),
                Some(DiagramElement::Fragment(fragment)) => {
                    // Push operands in reverse so the first one is visited first.
                    for operand in fragment.operands().iter().rev() {
                        self.stack.push(operand.elements().iter());
                    }
                }
                Some(DiagramElement::Activation(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(label: &str) -> DiagramElement {
        DiagramElement::Signal(SignalElement::new("A", "B", SignalKind::Call, label))
    }

    #[test]
    fn test_participant_label() {
        let plain = Participant::new("web");
        assert_eq!(plain.label(), "web");

        let named = Participant::new("web").with_display_name("Web Server");
        assert_eq!(named.label(), "Web Server");
        assert_eq!(named.name(), "web");
    }

    #[test]
    #[should_panic(expected = "participant name must not be empty")]
    fn test_participant_empty_name_panics() {
        let _ = Participant::new("");
    }

    #[test]
    fn test_signal_kind_styles() {
        assert!(!SignalKind::Call.is_dashed());
        assert!(SignalKind::Call.has_arrow());
        assert!(SignalKind::Return.is_dashed());
        assert!(SignalKind::Return.has_arrow());
        assert!(!SignalKind::Line.has_arrow());
        assert!(SignalKind::DashedLine.is_dashed());
        assert_eq!(SignalKind::Return.to_string(), "-->");
    }

    #[test]
    fn test_self_signal() {
        assert!(SignalElement::new("A", "A", SignalKind::Call, "").is_self_signal());
        assert!(!SignalElement::new("A", "a", SignalKind::Call, "").is_self_signal());
    }

    #[test]
    fn test_fragment_always_has_an_operand() {
        let fragment = CombinedFragment::new(FragmentOperator::Opt, Vec::new());
        assert_eq!(fragment.operands().len(), 1);
    }

    #[test]
    fn test_signals_depth_first_in_source_order() {
        let mut first = InteractionOperand::new(Some("ok".to_string()));
        first.push(signal("2"));
        let mut second = InteractionOperand::new(None);
        second.push(signal("3"));

        let mut root = InteractionOperand::default();
        root.push(signal("1"));
        root.push(DiagramElement::Activation(ActivationElement::activate("A")));
        root.push(DiagramElement::Fragment(CombinedFragment::new(
            FragmentOperator::Alt,
            vec![first, second],
        )));
        root.push(signal("4"));

        let labels: Vec<_> = root.signals().map(SignalElement::label).collect();
        assert_eq!(labels, ["1", "2", "3", "4"]);
    }
}
