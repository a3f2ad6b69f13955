//! Integration tests for the DiagramBuilder API
//!
//! These tests exercise the public surface the way a host would use it.

use sequin::{
    DiagramBuilder, SequinError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    draw::{DrawCall, RecordingContext},
    export::svg::SvgContext,
    render,
};

#[test]
fn test_parse_simple_diagram() {
    let result = DiagramBuilder::default().parse("Alice -> Bob: Hello\nBob --> Alice: Hi");
    let diagram = result.expect("Should parse valid diagram");

    assert_eq!(diagram.participant_count(), 2);
    assert_eq!(diagram.signals().count(), 2);
}

#[test]
fn test_parse_invalid_syntax_returns_error() {
    let source = "Alice -> Bob\n???\nBob ->";
    let result = DiagramBuilder::default().parse(source);

    match result {
        Err(SequinError::Parse { err, src }) => {
            assert_eq!(err.errors().len(), 2);
            assert_eq!(src, source);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_compile_keeps_partial_diagram() {
    let (diagram, errors) = DiagramBuilder::default().compile("Alice -> Bob\n???\nBob --> Alice");

    assert_eq!(errors.len(), 1);
    assert_eq!(diagram.signals().count(), 2);
}

#[test]
fn test_layout_with_host_measurer() {
    let config = AppConfig::new(
        LayoutConfig::default().with_participant_spacing(100.0),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let diagram = builder.parse("A -> B").unwrap();

    let layout = builder
        .layout(&diagram, &mut RecordingContext::new())
        .unwrap();
    let a = layout.participant("A").unwrap();
    let b = layout.participant("B").unwrap();
    assert!(b.header().min_x() - a.header().max_x() >= 100.0);
}

#[test]
fn test_render_on_host_context() {
    let diagram = DiagramBuilder::default()
        .parse("title Greeting\nAlice -> Bob: Hello\nactivate Bob\nBob --> Alice\ndeactivate Bob")
        .unwrap();

    let mut ctx = RecordingContext::new();
    let layout = render::render(&diagram, &mut ctx, &AppConfig::default()).unwrap();

    assert_eq!(layout.activations().len(), 1);
    assert_eq!(ctx.offset_depth(), 0);
    let arrows = ctx
        .calls()
        .iter()
        .filter(|call| matches!(call, DrawCall::Arrow { .. }))
        .count();
    assert_eq!(arrows, 2);
}

#[test]
fn test_render_svg_with_fixed_metrics() {
    let config = AppConfig::default();
    let diagram = DiagramBuilder::new(config.clone())
        .parse("alt [ok]\nClient -> Server: ping\nelse\nClient -> Client: retry\nend")
        .unwrap();

    let mut ctx = SvgContext::with_fixed_metrics(config.style(), 7.0, 16.0);
    let layout = render::render(&diagram, &mut ctx, &config).unwrap();
    let svg = ctx.into_document(layout.size()).to_string();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Client"));
    assert!(svg.contains("retry"));
}

#[test]
fn test_invalid_style_is_reported() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default().with_background_color("nope"),
    );
    let diagram = DiagramBuilder::default().parse("A -> B").unwrap();

    let mut ctx = RecordingContext::new();
    let result = render::render(&diagram, &mut ctx, &config);
    assert!(matches!(result, Err(SequinError::Style(_))));
}
