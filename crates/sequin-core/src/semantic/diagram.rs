//! The root of the semantic model.

use indexmap::IndexMap;

use crate::semantic::element::{DiagramElement, InteractionOperand, Participant, Signals};

/// A complete sequence diagram.
///
/// Participants keep their first-appearance order, which is also their
/// left-to-right order in the rendered image. Content is append-only: the
/// model builder adds elements in source order and nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceDiagram {
    title: Option<String>,
    participants: IndexMap<String, Participant>,
    content: InteractionOperand,
}

impl SequenceDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// The diagram title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replaces the title. The last `title` statement wins.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Appends a participant.
    ///
    /// Returns `false` and leaves the diagram unchanged if a participant
    /// with the same name already exists.
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if self.participants.contains_key(participant.name()) {
            return false;
        }
        self.participants
            .insert(participant.name().to_string(), participant);
        true
    }

    /// Looks up a participant by its exact name.
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.get(name)
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.contains_key(name)
    }

    /// Left-to-right position of a participant.
    pub fn participant_index(&self, name: &str) -> Option<usize> {
        self.participants.get_index_of(name)
    }

    /// Participants in first-appearance order.
    pub fn participants(&self) -> impl ExactSizeIterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// The top-level content.
    pub fn content(&self) -> &InteractionOperand {
        &self.content
    }

    /// Appends an element to the top-level content.
    pub fn push(&mut self, element: DiagramElement) {
        self.content.push(element);
    }

    /// Every signal, including those nested in fragments, in source order.
    pub fn signals(&self) -> Signals<'_> {
        self.content.signals()
    }

    /// Names referenced by signals or activations that are not declared
    /// participants, in first-reference order without duplicates.
    ///
    /// Always empty for diagrams produced by the compiler.
    pub fn unresolved_participants(&self) -> Vec<&str> {
        let mut missing = Vec::new();
        collect_unresolved(&self.content, &self.participants, &mut missing);
        missing
    }
}

fn collect_unresolved<'a>(
    operand: &'a InteractionOperand,
    participants: &IndexMap<String, Participant>,
    missing: &mut Vec<&'a str>,
) {
    for element in operand.elements() {
        match element {
            DiagramElement::Signal(signal) => {
                note_unresolved(signal.source(), participants, missing);
                note_unresolved(signal.target(), participants, missing);
            }
            DiagramElement::Activation(activation) => {
                note_unresolved(activation.participant(), participants, missing)
            }
            DiagramElement::Fragment(fragment) => {
                for nested in fragment.operands() {
                    collect_unresolved(nested, participants, missing);
                }
            }
        }
    }
}

fn note_unresolved<'a>(
    name: &'a str,
    participants: &IndexMap<String, Participant>,
    missing: &mut Vec<&'a str>,
) {
    if !participants.contains_key(name) && !missing.contains(&name) {
        missing.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::element::{
        ActivationElement, CombinedFragment, FragmentOperator, SignalElement, SignalKind,
    };

    #[test]
    fn test_participants_keep_first_appearance_order() {
        let mut diagram = SequenceDiagram::new();
        assert!(diagram.add_participant(Participant::new("B")));
        assert!(diagram.add_participant(Participant::new("A")));
        assert!(!diagram.add_participant(Participant::new("B").with_display_name("Bee")));

        let names: Vec<_> = diagram.participants().map(Participant::name).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(diagram.participant("B").unwrap().display_name(), None);
        assert_eq!(diagram.participant_index("A"), Some(1));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut diagram = SequenceDiagram::new();
        diagram.add_participant(Participant::new("Alice"));
        assert!(diagram.has_participant("Alice"));
        assert!(!diagram.has_participant("alice"));
    }

    #[test]
    fn test_last_title_wins() {
        let mut diagram = SequenceDiagram::new();
        assert_eq!(diagram.title(), None);
        diagram.set_title("first");
        diagram.set_title("second");
        assert_eq!(diagram.title(), Some("second"));
    }

    #[test]
    fn test_unresolved_participants() {
        let mut diagram = SequenceDiagram::new();
        diagram.add_participant(Participant::new("A"));
        diagram.push(DiagramElement::Signal(SignalElement::new(
            "A",
            "B",
            SignalKind::Call,
            "",
        )));

        let mut operand = InteractionOperand::default();
        operand.push(DiagramElement::Activation(ActivationElement::activate("C")));
        operand.push(DiagramElement::Signal(SignalElement::new(
            "B",
            "A",
            SignalKind::Return,
            "",
        )));
        diagram.push(DiagramElement::Fragment(CombinedFragment::new(
            FragmentOperator::Loop,
            vec![operand],
        )));

        assert_eq!(diagram.unresolved_participants(), ["B", "C"]);
    }
}
