//! Rendering of a laid-out sequence diagram onto a graphic context.
//!
//! The renderer only talks to the [`GraphicContext`] trait. It never knows
//! whether the output is SVG, a recording or anything else, and it never
//! decides how a stroke looks beyond solid or dashed.
//!
//! Drawing order, back to front: background, title, fragment frames,
//! participant boxes and lifelines, activation bars, signals.

use log::{debug, info};

use sequin_core::{
    color::Color,
    draw::{
        ArrowCap, GraphicContext, HorizontalAlignment, StrokeWidth, VerticalAlignment,
        with_offset,
    },
    geometry::{Bounds, Point},
    semantic::SequenceDiagram,
};

use crate::{
    config::{AppConfig, StyleConfig},
    error::SequinError,
    layout::{
        ActivationBox, FragmentLayout, ParticipantLayout, SequenceLayout, SignalLayout, TextBox,
    },
};

/// Lay out `diagram` using `ctx` for text measurement, then draw it on `ctx`.
///
/// Returns the layout that was drawn, so hosts can size their canvas or
/// run hit tests against it.
///
/// # Errors
///
/// Returns [`SequinError::Style`] for an invalid color in the style
/// configuration, [`SequinError::Layout`] if the diagram references unknown
/// participants and [`SequinError::Draw`] if the context fails. Any offset
/// pushed by the renderer is reverted before an error is returned.
pub fn render<G: GraphicContext + ?Sized>(
    diagram: &SequenceDiagram,
    ctx: &mut G,
    config: &AppConfig,
) -> Result<SequenceLayout, SequinError> {
    let layout = SequenceLayout::compute(diagram, ctx, config.layout())?;
    draw_layout(&layout, ctx, config.style())?;
    Ok(layout)
}

/// Draw an already computed layout.
///
/// # Errors
///
/// See [`render`].
pub fn draw_layout<G: GraphicContext + ?Sized>(
    layout: &SequenceLayout,
    ctx: &mut G,
    style: &StyleConfig,
) -> Result<(), SequinError> {
    let palette = Palette::new(style)?;

    if let Some(background) = palette.background {
        ctx.fill_rectangle(Point::default(), layout.size(), background)?;
    }

    if let Some(title) = layout.title() {
        draw_text_box(ctx, title, HorizontalAlignment::Center)?;
    }

    for fragment in layout.fragments() {
        draw_fragment(ctx, fragment, &palette)?;
    }

    for participant in layout.participants() {
        draw_participant(ctx, participant, &palette)?;
    }

    for activation in layout.activations() {
        draw_activation(ctx, activation, &palette)?;
    }

    for signal in layout.signals() {
        draw_signal(ctx, signal)?;
    }

    info!(
        participants = layout.participants().len(),
        signals = layout.signals().len();
        "Diagram rendered"
    );
    Ok(())
}

/// Colors resolved from the style configuration.
struct Palette {
    background: Option<Color>,
    outline: Color,
    box_fill: Color,
    activation: Color,
}

impl Palette {
    fn new(style: &StyleConfig) -> Result<Self, SequinError> {
        Ok(Self {
            background: style.background_color().map_err(SequinError::Style)?,
            outline: Color::black(),
            box_fill: Color::white(),
            activation: style.activation_color().map_err(SequinError::Style)?,
        })
    }
}

fn draw_text_box<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    text: &TextBox,
    horizontal: HorizontalAlignment,
) -> Result<(), SequinError> {
    let bounds = text.bounds();
    ctx.draw_text(
        text.text(),
        horizontal,
        VerticalAlignment::Center,
        bounds.min_point(),
        bounds.to_size(),
    )?;
    Ok(())
}

fn draw_box<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    bounds: Bounds,
    fill: Color,
    outline: Color,
) -> Result<(), SequinError> {
    ctx.fill_rectangle(bounds.min_point(), bounds.to_size(), fill)?;
    ctx.draw_rectangle(bounds.min_point(), bounds.to_size(), outline)?;
    Ok(())
}

fn draw_fragment<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    fragment: &FragmentLayout,
    palette: &Palette,
) -> Result<(), SequinError> {
    let bounds = fragment.bounds();
    debug!(operator:% = fragment.operator(), depth = fragment.depth(); "Drawing fragment");

    ctx.draw_rectangle(bounds.min_point(), bounds.to_size(), palette.outline)?;

    let tag = fragment.tag();
    draw_box(ctx, tag.bounds(), palette.box_fill, palette.outline)?;
    draw_text_box(ctx, tag, HorizontalAlignment::Center)?;

    for y in fragment.separators() {
        ctx.draw_dashed_line(
            Point::new(bounds.min_x(), y),
            Point::new(bounds.max_x(), y),
            StrokeWidth::THIN,
        )?;
    }

    for guard in fragment.operands().iter().filter_map(|o| o.guard()) {
        draw_text_box(ctx, guard, HorizontalAlignment::Start)?;
    }
    Ok(())
}

/// Participant boxes and the lifeline, drawn relative to the lifeline.
fn draw_participant<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    participant: &ParticipantLayout,
    palette: &Palette,
) -> Result<(), SequinError> {
    let origin = Point::new(participant.center_x(), 0.0);
    let to_local = Point::new(-participant.center_x(), 0.0);

    with_offset(ctx, origin, |ctx| {
        let (start, end) = participant.lifeline();
        ctx.draw_dashed_line(
            start.add_point(to_local),
            end.add_point(to_local),
            StrokeWidth::THIN,
        )?;

        for bounds in [participant.header(), participant.footer()] {
            let local = bounds.translate(to_local);
            draw_box(ctx, local, palette.box_fill, palette.outline)?;
            ctx.draw_text(
                participant.label(),
                HorizontalAlignment::Center,
                VerticalAlignment::Center,
                local.min_point(),
                local.to_size(),
            )?;
        }
        Ok(())
    })
}

fn draw_activation<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    activation: &ActivationBox,
    palette: &Palette,
) -> Result<(), SequinError> {
    draw_box(ctx, activation.bounds(), palette.activation, palette.outline)
}

fn draw_signal<G: GraphicContext + ?Sized>(
    ctx: &mut G,
    signal: &SignalLayout,
) -> Result<(), SequinError> {
    let kind = signal.kind();
    let width = StrokeWidth::REGULAR;
    let path = signal.path();
    let last = path.len().saturating_sub(2);

    for (index, segment) in path.windows(2).enumerate() {
        let (from, to) = (segment[0], segment[1]);
        match (index == last && kind.has_arrow(), kind.is_dashed()) {
            (true, false) => ctx.draw_arrow(from, to, width, ArrowCap::default())?,
            (true, true) => ctx.draw_dashed_arrow(from, to, width, ArrowCap::default())?,
            (false, false) => ctx.draw_line(from, to, width)?,
            (false, true) => ctx.draw_dashed_line(from, to, width)?,
        }
    }

    if let Some(label) = signal.label() {
        let horizontal = if signal.is_self_signal() {
            HorizontalAlignment::Start
        } else {
            HorizontalAlignment::Center
        };
        draw_text_box(ctx, label, horizontal)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sequin_core::draw::{DrawCall, RecordingContext};

    use super::*;

    fn render_source(source: &str, config: &AppConfig) -> (SequenceLayout, Vec<DrawCall>) {
        let (diagram, errors) = sequin_parser::compile(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        let mut ctx = RecordingContext::new();
        let layout = render(&diagram, &mut ctx, config).expect("render failed");
        (layout, ctx.into_calls())
    }

    fn arrows(calls: &[DrawCall]) -> Vec<(Point, Point, bool)> {
        calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Arrow {
                    from, to, dashed, ..
                } => Some((*from, *to, *dashed)),
                _ => None,
            })
            .collect()
    }

    fn texts(calls: &[DrawCall]) -> Vec<&str> {
        calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_signal_kinds_map_to_strokes() {
        let (layout, calls) =
            render_source("A -> B: call\nB --> A: back\nA - B\nA -- B", &AppConfig::default());

        let arrows = arrows(&calls);
        assert_eq!(arrows.len(), 2);
        assert_eq!(arrows[0], (layout.signals()[0].from(), layout.signals()[0].to(), false));
        assert_eq!(arrows[1], (layout.signals()[1].from(), layout.signals()[1].to(), true));

        let signal_lines: Vec<bool> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line { dashed, width, .. } if *width == StrokeWidth::REGULAR => {
                    Some(*dashed)
                }
                _ => None,
            })
            .collect();
        assert_eq!(signal_lines, [false, true]);
    }

    #[test]
    fn test_self_signal_draws_three_segments() {
        let (layout, calls) = render_source("A -> A: loop", &AppConfig::default());
        let signal = &layout.signals()[0];

        let arrows = arrows(&calls);
        assert_eq!(arrows, [(signal.path()[2], signal.path()[3], false)]);

        let regular_lines = calls
            .iter()
            .filter(|call| {
                matches!(call, DrawCall::Line { width, .. } if *width == StrokeWidth::REGULAR)
            })
            .count();
        assert_eq!(regular_lines, 2);
    }

    #[test]
    fn test_participant_boxes_are_drawn_in_absolute_coordinates() {
        let (layout, calls) = render_source("participant \"Alice\" as A\nA -> B", &AppConfig::default());
        let alice = layout.participant("A").unwrap();

        let outlines: Vec<_> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rectangle {
                    location,
                    filled: false,
                    ..
                } => Some(*location),
                _ => None,
            })
            .collect();
        assert!(outlines.contains(&alice.header().min_point()));
        assert!(outlines.contains(&alice.footer().min_point()));

        assert_eq!(texts(&calls).iter().filter(|t| **t == "Alice").count(), 2);
    }

    #[test]
    fn test_text_is_drawn_for_every_label() {
        let (_, calls) = render_source(
            "title Checkout\nalt [paid]\nA -> B: ship\nelse\nA -> B: cancel\nend",
            &AppConfig::default(),
        );
        let texts = texts(&calls);

        for expected in ["Checkout", "alt", "[paid]", "ship", "cancel", "A", "B"] {
            assert!(texts.contains(&expected), "missing text {expected:?}");
        }
    }

    #[test]
    fn test_background_is_drawn_first() {
        let config = AppConfig::new(
            Default::default(),
            StyleConfig::default().with_background_color("white"),
        );
        let (layout, calls) = render_source("A -> B", &config);

        let Some(DrawCall::Rectangle {
            location,
            size,
            color,
            filled: true,
        }) = calls.first()
        else {
            panic!("expected a filled background, got {:?}", calls.first());
        };
        assert_eq!(*location, Point::default());
        assert_eq!(*size, layout.size());
        assert_eq!(color.to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_color_is_a_style_error() {
        let config = AppConfig::new(
            Default::default(),
            StyleConfig::default().with_background_color("not-a-color"),
        );
        let (diagram, _) = sequin_parser::compile("A -> B");
        let mut ctx = RecordingContext::new();

        let result = render(&diagram, &mut ctx, &config);
        assert!(matches!(result, Err(SequinError::Style(_))));
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn test_offset_is_reverted_when_drawing_fails() {
        let (diagram, _) = sequin_parser::compile("A -> B: hello");

        // Participants are drawn inside an offset; fail at every step.
        for successful in 0..8 {
            let mut ctx = RecordingContext::new().fail_after(successful);
            let result = render(&diagram, &mut ctx, &AppConfig::default());

            assert!(matches!(result, Err(SequinError::Draw(_))));
            assert_eq!(ctx.offset_depth(), 0);
        }
    }
}
