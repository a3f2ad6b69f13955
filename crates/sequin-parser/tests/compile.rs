use proptest::{prelude::*, test_runner::TestCaseError};

use sequin_core::semantic::{DiagramElement, FragmentOperator, Participant, SignalKind};
use sequin_parser::{compile, compile_strict, error::ErrorCode, parse, tokenize};

fn participant_names(source: &str) -> Vec<String> {
    let (diagram, errors) = compile(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    diagram
        .participants()
        .map(|p| p.name().to_string())
        .collect()
}

#[test]
fn test_login_example() {
    let source = "title Login\nAlice -> Bob: Request\nBob -> Alice: Response\n";

    let (diagram, errors) = compile(source);

    assert!(errors.is_empty());
    assert_eq!(diagram.title(), Some("Login"));
    let names: Vec<_> = diagram.participants().map(Participant::name).collect();
    assert_eq!(names, ["Alice", "Bob"]);

    let signals: Vec<_> = diagram.signals().collect();
    assert_eq!(signals.len(), 2);
    assert_eq!(
        (signals[0].source(), signals[0].target(), signals[0].label()),
        ("Alice", "Bob", "Request")
    );
    assert_eq!(
        (signals[1].source(), signals[1].target(), signals[1].label()),
        ("Bob", "Alice", "Response")
    );
    assert!(diagram.unresolved_participants().is_empty());
}

#[test]
fn test_forward_reference_only() {
    assert_eq!(participant_names("Alice -> Bob: Hi"), ["Alice", "Bob"]);
}

#[test]
fn test_byte_order_mark_before_first_line() {
    assert_eq!(participant_names("\u{feff}A -> B"), ["A", "B"]);
    assert_eq!(participant_names("\u{feff}title T\nA"), ["A"]);
}

#[test]
fn test_decomposed_names() {
    assert_eq!(participant_names("e\u{301}lan -> Bob"), ["e\u{301}lan", "Bob"]);
}

#[test]
fn test_malformed_line_example() {
    let (diagram, errors) = compile("??? broken line\nAlice -> Bob: Hi");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::E001);
    assert_eq!(errors[0].span().start(), 0);
    assert_eq!(diagram.signals().count(), 1);
}

#[test]
fn test_one_bad_line_among_ten_good_ones() {
    let source = "\
participant Client
participant \"Order Service\" as orders
Client -> orders: place order
activate orders
orders -> orders: validate
orders --> Client: accepted
deactivate orders
Client -> Payments: pay
loop retry
Payments -> -> Bank
end
";
    let tokens = tokenize(source);
    let (statements, errors) = parse(&tokens);
    assert_eq!(statements.len(), 10);
    assert_eq!(errors.len(), 1);

    let (diagram, errors) = compile(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::E100);
    assert_eq!(diagram.signals().count(), 4);
    assert_eq!(diagram.participant_count(), 3);
}

#[test]
fn test_title_last_wins() {
    let (diagram, _) = compile("title First\ntitle Second");
    assert_eq!(diagram.title(), Some("Second"));
}

#[test]
fn test_declaration_after_reference_is_not_duplicated() {
    let source = "Alice -> Bob\nparticipant Bob\nparticipant \"Alice A.\" as Alice\nBob";
    let (diagram, errors) = compile(source);

    assert!(errors.is_empty());
    assert_eq!(diagram.participant_count(), 2);
    assert_eq!(diagram.participant("Alice").unwrap().display_name(), None);
}

#[test]
fn test_declaration_before_reference_keeps_display_name() {
    let source = "participant \"Web Server\" as web\nclient -> web: GET /\n";
    let (diagram, _) = compile(source);

    let names: Vec<_> = diagram.participants().map(Participant::label).collect();
    assert_eq!(names, ["Web Server", "client"]);
}

#[test]
fn test_names_are_case_sensitive() {
    assert_eq!(
        participant_names("alice -> Alice\nALICE -> alice"),
        ["alice", "Alice", "ALICE"]
    );
}

#[test]
fn test_signal_order_with_interleaved_declarations() {
    let source = "\
A -> B: one
participant C
B -> C: two
participant D
D -> A: three
participant A
C -> D: four
";
    let (diagram, _) = compile(source);
    let labels: Vec<_> = diagram.signals().map(|s| s.label().to_string()).collect();
    assert_eq!(labels, ["one", "two", "three", "four"]);
}

#[test]
fn test_fragments_build_nested_operands() {
    let source = "\
alt [cache hit]
Client -> Cache: get
else [miss]
loop each shard
Client -> Db: query
end
end
";
    let (diagram, errors) = compile(source);
    assert!(errors.is_empty());

    let [DiagramElement::Fragment(alt)] = diagram.content().elements() else {
        panic!("expected a single fragment");
    };
    assert_eq!(alt.operator(), FragmentOperator::Alt);
    assert_eq!(alt.operands().len(), 2);
    assert_eq!(alt.operands()[0].guard(), Some("cache hit"));
    assert_eq!(alt.operands()[1].guard(), Some("miss"));
    assert!(matches!(
        alt.operands()[1].elements(),
        [DiagramElement::Fragment(inner)] if inner.operator() == FragmentOperator::Loop
    ));

    let targets: Vec<_> = diagram.signals().map(|s| s.target()).collect();
    assert_eq!(targets, ["Cache", "Db"]);
}

#[test]
fn test_structural_errors() {
    let (diagram, errors) = compile("end\nopt\nelse\nA -> B\ndeactivate A\nloop\n");
    let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
    assert_eq!(
        codes,
        [
            ErrorCode::E201,
            ErrorCode::E202,
            ErrorCode::E200,
            ErrorCode::E203,
            ErrorCode::E202
        ]
    );

    // Unclosed fragments keep their content.
    assert_eq!(diagram.signals().count(), 1);
    assert_eq!(diagram.content().elements().len(), 1);
}

#[test]
fn test_signal_kinds() {
    let (diagram, _) = compile("A -> B\nA --> B\nA - B\nA -- B");
    let kinds: Vec<_> = diagram.signals().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        [
            SignalKind::Call,
            SignalKind::Return,
            SignalKind::Line,
            SignalKind::DashedLine
        ]
    );
}

#[test]
fn test_compile_strict() {
    assert!(compile_strict("A -> B: ok").is_ok());

    let err = compile_strict("A -> B: ok\n@").unwrap_err();
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()[0].code(), ErrorCode::E001);
}

#[test]
fn test_compilations_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("P{i} -> Q{i}: hello");
                participant_names(&source)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), [format!("P{i}"), format!("Q{i}")]);
    }
}

// ===================
// Property Tests
// ===================

/// Distinct participant names that can never collide with a keyword.
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("p_[a-zA-Z0-9]{1,6}", 1..8)
        .prop_map(|names| names.into_iter().collect())
}

/// Chain signals through every name: n0 -> n1, n1 -> n2, ...
fn chain_source(names: &[String]) -> String {
    if names.len() == 1 {
        return format!("{}\n", names[0]);
    }
    names
        .windows(2)
        .enumerate()
        .map(|(i, pair)| format!("{} -> {}: m{i}\n", pair[0], pair[1]))
        .collect()
}

/// Every referenced name appears once, in first-appearance order.
fn check_participants_in_first_appearance_order(names: &[String]) -> Result<(), TestCaseError> {
    let (diagram, errors) = compile(&chain_source(names));

    prop_assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let actual: Vec<_> = diagram.participants().map(Participant::name).collect();
    prop_assert_eq!(actual, names.iter().map(String::as_str).collect::<Vec<_>>());
    prop_assert!(diagram.unresolved_participants().is_empty());
    Ok(())
}

/// Late declarations of already referenced names change nothing.
fn check_redeclaration_is_idempotent(names: &[String]) -> Result<(), TestCaseError> {
    let mut source = chain_source(names);
    for name in names.iter().rev() {
        source.push_str(&format!("participant {name}\n{name}\n"));
    }
    let (diagram, errors) = compile(&source);

    prop_assert!(errors.is_empty());
    prop_assert_eq!(diagram.participant_count(), names.len());
    let labels: Vec<_> = diagram.signals().map(|s| s.label().to_string()).collect();
    let expected: Vec<_> = (0..names.len().saturating_sub(1))
        .map(|i| format!("m{i}"))
        .collect();
    prop_assert_eq!(labels, expected);
    Ok(())
}

proptest! {
    #[test]
    fn participants_in_first_appearance_order(names in names_strategy()) {
        check_participants_in_first_appearance_order(&names)?;
    }

    #[test]
    fn redeclaration_is_idempotent(names in names_strategy()) {
        check_redeclaration_is_idempotent(&names)?;
    }
}
