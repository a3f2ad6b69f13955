//! Sequence diagram layout.
//!
//! Layout runs in two passes. The first pass measures every piece of text
//! that needs room: participant labels, signal labels, fragment tags and
//! guards, and the title. The second pass assigns coordinates from those
//! measurements:
//!
//! - Participants are placed left to right in diagram order. Each centre is
//!   pushed right far enough to keep a gap to its neighbour box and to fit
//!   the label of every signal that ends at it.
//! - Signals get one row each, top to bottom in source order. A self-signal
//!   is drawn as a loop to the right of its lifeline.
//! - Fragments wrap their content with a header row, operand separators
//!   and a footer row.
//! - Activation bars run from their `activate` row to their `deactivate`
//!   row, or to the end of the lifeline. Nested bars are shifted right by
//!   half a bar width per level, and signals attach to the edge of the
//!   innermost open bar.

use indexmap::IndexMap;
use log::{debug, trace};

use sequin_core::{
    draw::MeasureText,
    geometry::{Bounds, Point, Size},
    semantic::{
        ActivationElement, ActivationKind, CombinedFragment, DiagramElement, FragmentOperator,
        InteractionOperand, SequenceDiagram, SignalElement, SignalKind,
    },
};

use crate::{config::LayoutConfig, error::SequinError};

/// Minimum height of an activation bar that opens and closes on the same row.
const EDGE_CASE_BUFFER: f32 = 15.0;

/// Text placed in a box. Renderers center the text inside `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    text: String,
    bounds: Bounds,
}

impl TextBox {
    fn new(text: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn shift_x(&mut self, dx: f32) {
        self.bounds = self.bounds.translate(Point::new(dx, 0.0));
    }
}

/// A participant with its header box, footer box and lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantLayout {
    name: String,
    label: String,
    center_x: f32,
    header: Bounds,
    footer: Bounds,
}

impl ParticipantLayout {
    /// The participant name used by signals.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text drawn in the header and footer boxes.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// The box above the lifeline.
    pub fn header(&self) -> Bounds {
        self.header
    }

    /// The box below the lifeline.
    pub fn footer(&self) -> Bounds {
        self.footer
    }

    /// Start and end of the lifeline, between the two boxes.
    pub fn lifeline(&self) -> (Point, Point) {
        (
            Point::new(self.center_x, self.header.max_y()),
            Point::new(self.center_x, self.footer.min_y()),
        )
    }

    fn shift_x(&mut self, dx: f32) {
        let offset = Point::new(dx, 0.0);
        self.center_x += dx;
        self.header = self.header.translate(offset);
        self.footer = self.footer.translate(offset);
    }
}

/// A positioned signal.
///
/// The path has two points for a signal between two participants, and four
/// for a self-signal loop (out, down, back). The arrow head, if any, sits on
/// the last point.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalLayout {
    source: String,
    target: String,
    kind: SignalKind,
    path: Vec<Point>,
    label: Option<TextBox>,
}

impl SignalLayout {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// First point of the path.
    pub fn from(&self) -> Point {
        self.path.first().copied().unwrap_or_default()
    }

    /// Last point of the path, where the arrow head goes.
    pub fn to(&self) -> Point {
        self.path.last().copied().unwrap_or_default()
    }

    /// The row of the signal: the y of its first point.
    pub fn y(&self) -> f32 {
        self.from().y()
    }

    pub fn is_self_signal(&self) -> bool {
        self.path.len() > 2
    }

    pub fn label(&self) -> Option<&TextBox> {
        self.label.as_ref()
    }

    fn shift_x(&mut self, dx: f32) {
        for point in &mut self.path {
            *point = point.offset(dx, 0.0);
        }
        if let Some(label) = &mut self.label {
            label.shift_x(dx);
        }
    }
}

/// One operand of a fragment: where it starts and its guard text.
#[derive(Debug, Clone, PartialEq)]
pub struct OperandLayout {
    top: f32,
    guard: Option<TextBox>,
}

impl OperandLayout {
    /// The y where the operand starts. For every operand but the first,
    /// this is where the dashed separator is drawn.
    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn guard(&self) -> Option<&TextBox> {
        self.guard.as_ref()
    }
}

/// A positioned combined fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentLayout {
    operator: FragmentOperator,
    bounds: Bounds,
    tag: TextBox,
    operands: Vec<OperandLayout>,
    depth: usize,
}

impl FragmentLayout {
    pub fn operator(&self) -> FragmentOperator {
        self.operator
    }

    /// The outer frame.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The operator box in the top-left corner of the frame.
    pub fn tag(&self) -> &TextBox {
        &self.tag
    }

    pub fn operands(&self) -> &[OperandLayout] {
        &self.operands
    }

    /// Nesting depth, 0 for a top-level fragment.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The y of every separator between operands.
    pub fn separators(&self) -> impl Iterator<Item = f32> + '_ {
        self.operands.iter().skip(1).map(OperandLayout::top)
    }

    fn shift_x(&mut self, dx: f32) {
        self.bounds = self.bounds.translate(Point::new(dx, 0.0));
        self.tag.shift_x(dx);
        for guard in self.operands.iter_mut().filter_map(|o| o.guard.as_mut()) {
            guard.shift_x(dx);
        }
    }
}

/// A rendered activation bar on a participant's lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationBox {
    participant: String,
    nesting_level: usize,
    bounds: Bounds,
}

impl ActivationBox {
    pub fn participant(&self) -> &str {
        &self.participant
    }

    /// 0 for the outermost bar of a participant.
    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn shift_x(&mut self, dx: f32) {
        self.bounds = self.bounds.translate(Point::new(dx, 0.0));
    }
}

/// An activation period that is still open while signals are placed.
#[derive(Debug, Clone)]
struct ActivationTiming {
    start_y: f32,
    nesting_level: usize,
}

impl ActivationTiming {
    /// Left edge of the bar for a lifeline at `center_x`.
    fn min_x(&self, center_x: f32, width: f32) -> f32 {
        center_x - width / 2.0 + self.nesting_level as f32 * width / 2.0
    }

    /// The x where a signal heading towards `toward_x` meets this bar.
    fn intersection_x(&self, center_x: f32, width: f32, toward_x: f32) -> f32 {
        let min_x = self.min_x(center_x, width);
        if toward_x > center_x {
            min_x + width
        } else {
            min_x
        }
    }

    fn to_activation_box(
        &self,
        participant: &str,
        center_x: f32,
        width: f32,
        end_y: f32,
    ) -> ActivationBox {
        let end_y = if end_y <= self.start_y {
            self.start_y + EDGE_CASE_BUFFER
        } else {
            end_y
        };
        let top_left = Point::new(self.min_x(center_x, width), self.start_y);

        ActivationBox {
            participant: participant.to_string(),
            nesting_level: self.nesting_level,
            bounds: Bounds::new_from_top_left(top_left, Size::new(width, end_y - self.start_y)),
        }
    }
}

/// Horizontal extent covered by some content.
#[derive(Debug, Clone, Copy)]
struct HorizontalSpan {
    min_x: f32,
    max_x: f32,
}

impl HorizontalSpan {
    fn empty() -> Self {
        Self {
            min_x: f32::MAX,
            max_x: f32::MIN,
        }
    }

    fn is_empty(self) -> bool {
        self.min_x > self.max_x
    }

    fn include(&mut self, x: f32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    fn merge(&mut self, other: Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
    }
}

/// Text sizes of one fragment, collected by the measuring pass.
#[derive(Debug, Clone)]
struct FragmentMetrics {
    tag: Size,
    guards: Vec<Option<(String, Size)>>,
}

/// Everything the measuring pass collects.
///
/// Signal and fragment entries are in depth-first source order, the order
/// in which the placing pass visits them.
#[derive(Debug, Default)]
struct Measurements {
    title: Option<Size>,
    participants: Vec<Size>,
    signals: Vec<Size>,
    fragments: Vec<FragmentMetrics>,
}

impl Measurements {
    fn collect<M: MeasureText + ?Sized>(diagram: &SequenceDiagram, measurer: &mut M) -> Self {
        let mut measurements = Self {
            title: diagram.title().map(|title| measurer.measure_text(title)),
            participants: diagram
                .participants()
                .map(|participant| measurer.measure_text(participant.label()))
                .collect(),
            ..Self::default()
        };
        measurements.collect_operand(diagram.content(), measurer);
        measurements
    }

    fn collect_operand<M: MeasureText + ?Sized>(
        &mut self,
        operand: &InteractionOperand,
        measurer: &mut M,
    ) {
        for element in operand.elements() {
            match element {
                DiagramElement::Signal(signal) => {
                    self.signals.push(measurer.measure_text(signal.label()));
                }
                DiagramElement::Fragment(fragment) => {
                    let guards = fragment
                        .operands()
                        .iter()
                        .map(|operand| {
                            operand.guard().map(|guard| {
                                let text = format!("[{guard}]");
                                let size = measurer.measure_text(&text);
                                (text, size)
                            })
                        })
                        .collect();
                    self.fragments.push(FragmentMetrics {
                        tag: measurer.measure_text(fragment.operator().as_str()),
                        guards,
                    });
                    for operand in fragment.operands() {
                        self.collect_operand(operand, measurer);
                    }
                }
                DiagramElement::Activation(_) => {}
            }
        }
    }
}

/// Position of `name` in the participant list.
fn participant_index(diagram: &SequenceDiagram, name: &str) -> Result<usize, SequinError> {
    diagram
        .participant_index(name)
        .ok_or_else(|| SequinError::Layout(format!("signal refers to unknown participant `{name}`")))
}

/// Horizontal centre of every participant, left to right.
fn participant_centers(
    diagram: &SequenceDiagram,
    measurements: &Measurements,
    box_widths: &[f32],
    config: &LayoutConfig,
) -> Result<Vec<f32>, SequinError> {
    let count = box_widths.len();
    let label_room = 2.0 * config.label_padding() + config.activation_width();

    // For each participant, the minimum distance to earlier participants.
    let mut constraints: Vec<Vec<(usize, f32)>> = vec![Vec::new(); count];
    for (signal, label) in diagram.signals().zip(&measurements.signals) {
        let source = participant_index(diagram, signal.source())?;
        let target = participant_index(diagram, signal.target())?;

        if source == target {
            if source + 1 < count {
                let room = config.self_signal_width() + label.width() + label_room;
                constraints[source + 1].push((source, room));
            }
        } else {
            let (lo, hi) = (source.min(target), source.max(target));
            constraints[hi].push((lo, label.width() + label_room));
        }
    }

    let mut centers: Vec<f32> = Vec::with_capacity(count);
    for (index, width) in box_widths.iter().enumerate() {
        let center = match index {
            0 => config.padding() + width / 2.0,
            _ => {
                let previous = centers[index - 1];
                let gap = previous + box_widths[index - 1] / 2.0 + config.participant_spacing();
                constraints[index]
                    .iter()
                    .fold(gap + width / 2.0, |center, &(lo, room)| {
                        center.max(centers[lo] + room)
                    })
            }
        };
        centers.push(center);
    }

    Ok(centers)
}

/// State of the placing pass.
struct Placer<'a> {
    diagram: &'a SequenceDiagram,
    config: &'a LayoutConfig,
    centers: &'a [f32],
    signal_sizes: std::slice::Iter<'a, Size>,
    fragment_metrics: std::slice::Iter<'a, FragmentMetrics>,
    cursor: f32,
    depth: usize,
    open: IndexMap<String, Vec<ActivationTiming>>,
    signals: Vec<SignalLayout>,
    fragments: Vec<FragmentLayout>,
    activations: Vec<ActivationBox>,
}

impl<'a> Placer<'a> {
    fn center_of(&self, name: &str) -> Result<f32, SequinError> {
        Ok(self.centers[participant_index(self.diagram, name)?])
    }

    /// Where a signal leaving or entering `name` towards `toward_x` attaches.
    fn endpoint_x(&self, name: &str, center_x: f32, toward_x: f32) -> f32 {
        self.open
            .get(name)
            .and_then(|stack| stack.last())
            .map_or(center_x, |bar| {
                bar.intersection_x(center_x, self.config.activation_width(), toward_x)
            })
    }

    fn place_operand(&mut self, operand: &InteractionOperand) -> Result<HorizontalSpan, SequinError> {
        let mut span = HorizontalSpan::empty();
        for element in operand.elements() {
            let element_span = match element {
                DiagramElement::Signal(signal) => self.place_signal(signal)?,
                DiagramElement::Fragment(fragment) => self.place_fragment(fragment)?,
                DiagramElement::Activation(activation) => self.place_activation(activation)?,
            };
            span.merge(element_span);
        }
        Ok(span)
    }

    fn place_signal(&mut self, signal: &SignalElement) -> Result<HorizontalSpan, SequinError> {
        let label_size = self.signal_sizes.next().copied().unwrap_or_default();
        let padding = self.config.label_padding();
        let source_x = self.center_of(signal.source())?;
        let target_x = self.center_of(signal.target())?;
        let mut span = HorizontalSpan::empty();
        span.include(source_x);

        let (path, label_bounds) = if signal.is_self_signal() {
            let top = self.cursor + padding;
            let height = (self.config.message_spacing() / 2.0).max(label_size.height());
            let x = self.endpoint_x(signal.source(), source_x, f32::INFINITY);
            let right = x + self.config.self_signal_width();

            let label_top_left = Point::new(
                right + padding / 2.0,
                top + (height - label_size.height()) / 2.0,
            );
            span.include(right + padding / 2.0 + label_size.width());
            self.cursor = top + height;

            (
                vec![
                    Point::new(x, top),
                    Point::new(right, top),
                    Point::new(right, top + height),
                    Point::new(x, top + height),
                ],
                Bounds::new_from_top_left(label_top_left, label_size),
            )
        } else {
            let row = self
                .config
                .message_spacing()
                .max(label_size.height() + padding);
            let y = self.cursor + row;
            let from_x = self.endpoint_x(signal.source(), source_x, target_x);
            let to_x = self.endpoint_x(signal.target(), target_x, source_x);

            let label_top_left = Point::new(
                (from_x + to_x - label_size.width()) / 2.0,
                y - padding / 2.0 - label_size.height(),
            );
            span.include(target_x);
            self.cursor = y;

            (
                vec![Point::new(from_x, y), Point::new(to_x, y)],
                Bounds::new_from_top_left(label_top_left, label_size),
            )
        };

        let label = (!signal.label().is_empty()).then(|| TextBox::new(signal.label(), label_bounds));
        trace!(source = signal.source(), target = signal.target(), y = path[0].y(); "Placed signal");

        self.signals.push(SignalLayout {
            source: signal.source().to_string(),
            target: signal.target().to_string(),
            kind: signal.kind(),
            path,
            label,
        });
        Ok(span)
    }

    fn place_activation(
        &mut self,
        activation: &ActivationElement,
    ) -> Result<HorizontalSpan, SequinError> {
        let center_x = self.center_of(activation.participant())?;
        let width = self.config.activation_width();
        let stack = self
            .open
            .entry(activation.participant().to_string())
            .or_default();

        let mut span = HorizontalSpan::empty();
        match activation.kind() {
            ActivationKind::Activate => {
                let timing = ActivationTiming {
                    start_y: self.cursor,
                    nesting_level: stack.len(),
                };
                span.include(timing.min_x(center_x, width));
                span.include(timing.min_x(center_x, width) + width);
                stack.push(timing);
            }
            ActivationKind::Deactivate => {
                if let Some(timing) = stack.pop() {
                    let end_y = self.cursor + self.config.label_padding() / 2.0;
                    self.activations.push(timing.to_activation_box(
                        activation.participant(),
                        center_x,
                        width,
                        end_y,
                    ));
                }
            }
        }
        Ok(span)
    }

    fn place_fragment(&mut self, fragment: &CombinedFragment) -> Result<HorizontalSpan, SequinError> {
        let metrics = self.fragment_metrics.next().cloned().ok_or_else(|| {
            SequinError::Layout("fragment was not measured before placement".to_string())
        })?;
        let padding = self.config.label_padding();
        let slot = self.fragments.len();

        let first_guard_height = metrics
            .guards
            .first()
            .and_then(|guard| guard.as_ref())
            .map_or(0.0, |(_, size)| size.height());
        let header_height = metrics.tag.height().max(first_guard_height) + padding / 2.0;

        let top = self.cursor + padding / 2.0;
        self.cursor = top + header_height;
        self.depth += 1;

        let mut content = HorizontalSpan::empty();
        let mut operand_tops = Vec::with_capacity(fragment.operands().len());
        for (index, operand) in fragment.operands().iter().enumerate() {
            if index == 0 {
                operand_tops.push(top);
            } else {
                let separator = self.cursor + padding / 2.0;
                let guard_height = metrics
                    .guards
                    .get(index)
                    .and_then(|guard| guard.as_ref())
                    .map_or(0.0, |(_, size)| size.height());
                self.cursor = separator + guard_height + padding / 2.0;
                operand_tops.push(separator);
            }
            content.merge(self.place_operand(operand)?);
        }

        self.depth -= 1;
        let bottom = self.cursor + padding / 2.0;
        self.cursor = bottom;

        if content.is_empty() {
            for &center in self.centers {
                content.include(center);
            }
        }
        if content.is_empty() {
            content.include(self.config.padding());
        }

        let margin = padding + self.config.activation_width() / 2.0;
        let min_x = content.min_x - margin;
        let tag_size = Size::new(metrics.tag.width() + padding, header_height);
        // The first guard sits beside the tag, later ones below their separator.
        let max_x = metrics.guards.iter().enumerate().fold(
            (content.max_x + margin).max(min_x + tag_size.width()),
            |max_x, (index, guard)| {
                let Some((_, size)) = guard else {
                    return max_x;
                };
                let left = if index == 0 {
                    min_x + tag_size.width()
                } else {
                    min_x
                };
                max_x.max(left + size.width() + padding)
            },
        );

        let tag = TextBox::new(
            fragment.operator().as_str(),
            Bounds::new_from_top_left(Point::new(min_x, top), tag_size),
        );

        let operands = operand_tops
            .into_iter()
            .zip(metrics.guards)
            .enumerate()
            .map(|(index, (operand_top, guard))| {
                let guard = guard.map(|(text, size)| {
                    let top_left = if index == 0 {
                        Point::new(
                            min_x + tag_size.width() + padding / 2.0,
                            top + (header_height - size.height()) / 2.0,
                        )
                    } else {
                        Point::new(min_x + padding / 2.0, operand_top + padding / 4.0)
                    };
                    TextBox::new(text, Bounds::new_from_top_left(top_left, size))
                });
                OperandLayout {
                    top: operand_top,
                    guard,
                }
            })
            .collect();

        let layout = FragmentLayout {
            operator: fragment.operator(),
            bounds: Bounds::new_from_top_left(
                Point::new(min_x, top),
                Size::new(max_x - min_x, bottom - top),
            ),
            tag,
            operands,
            depth: self.depth,
        };
        self.fragments.insert(slot, layout);

        let mut span = HorizontalSpan::empty();
        span.include(min_x);
        span.include(max_x);
        Ok(span)
    }

    /// Close every activation still open when the lifelines end.
    fn close_activations(&mut self, end_y: f32) -> Result<(), SequinError> {
        let open = std::mem::take(&mut self.open);
        for (participant, mut stack) in open {
            let center_x = self.center_of(&participant)?;
            while let Some(timing) = stack.pop() {
                self.activations.push(timing.to_activation_box(
                    &participant,
                    center_x,
                    self.config.activation_width(),
                    end_y,
                ));
            }
        }
        Ok(())
    }
}

/// Positioned geometry for a whole sequence diagram.
///
/// All coordinates are absolute, with the origin at the top-left corner of
/// the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceLayout {
    size: Size,
    title: Option<TextBox>,
    participants: Vec<ParticipantLayout>,
    signals: Vec<SignalLayout>,
    fragments: Vec<FragmentLayout>,
    activations: Vec<ActivationBox>,
}

impl SequenceLayout {
    /// Lay out `diagram`, measuring text with `measurer`.
    ///
    /// # Errors
    ///
    /// Returns [`SequinError::Layout`] if a signal or activation refers to a
    /// participant that is not in the diagram. Diagrams produced by the
    /// compiler never do.
    pub fn compute<M: MeasureText + ?Sized>(
        diagram: &SequenceDiagram,
        measurer: &mut M,
        config: &LayoutConfig,
    ) -> Result<Self, SequinError> {
        let unresolved = diagram.unresolved_participants();
        if !unresolved.is_empty() {
            return Err(SequinError::Layout(format!(
                "unknown participants: {}",
                unresolved.join(", ")
            )));
        }

        // Pass 1: measure.
        let measurements = Measurements::collect(diagram, measurer);

        // Pass 2: assign coordinates.
        let padding = config.label_padding();
        let box_widths: Vec<f32> = measurements
            .participants
            .iter()
            .map(|size| size.width() + 2.0 * padding)
            .collect();
        let header_height = measurements
            .participants
            .iter()
            .map(|size| size.height())
            .fold(0.0, f32::max)
            + padding;
        let centers = participant_centers(diagram, &measurements, &box_widths, config)?;

        let mut y = config.padding();
        let title_top = y;
        if let Some(title) = measurements.title {
            y += title.height() + padding;
        }
        let header_top = y;
        let lifeline_start = header_top + header_height;

        let mut placer = Placer {
            diagram,
            config,
            centers: &centers,
            signal_sizes: measurements.signals.iter(),
            fragment_metrics: measurements.fragments.iter(),
            cursor: lifeline_start,
            depth: 0,
            open: IndexMap::new(),
            signals: Vec::new(),
            fragments: Vec::new(),
            activations: Vec::new(),
        };
        placer.place_operand(diagram.content())?;

        let lifeline_end = placer.cursor + 2.0 * padding;
        placer.close_activations(lifeline_end)?;

        let participants = diagram
            .participants()
            .zip(centers.iter().zip(&box_widths))
            .map(|(participant, (&center_x, &width))| {
                let size = Size::new(width, header_height);
                let left = center_x - width / 2.0;
                ParticipantLayout {
                    name: participant.name().to_string(),
                    label: participant.label().to_string(),
                    center_x,
                    header: Bounds::new_from_top_left(Point::new(left, header_top), size),
                    footer: Bounds::new_from_top_left(Point::new(left, lifeline_end), size),
                }
            })
            .collect();

        let mut layout = Self {
            size: Size::default(),
            title: None,
            participants,
            signals: placer.signals,
            fragments: placer.fragments,
            activations: placer.activations,
        };

        let content = layout.content_span();
        if !content.is_empty() && content.min_x < config.padding() {
            layout.shift_x(config.padding() - content.min_x);
        }

        let title_width = measurements.title.map_or(0.0, |size| size.width());
        let content_right = layout.content_span().max_x.max(config.padding());
        let width = (content_right + config.padding()).max(title_width + 2.0 * config.padding());
        let height = lifeline_end
            + if layout.participants.is_empty() {
                0.0
            } else {
                header_height
            }
            + config.padding();
        layout.size = Size::new(width, height);

        if let (Some(title), Some(size)) = (diagram.title(), measurements.title) {
            layout.title = Some(TextBox::new(
                title,
                Bounds::new_from_top_left(
                    Point::new(config.padding(), title_top),
                    Size::new(width - 2.0 * config.padding(), size.height()),
                ),
            ));
        }

        debug!(
            participants = layout.participants.len(),
            signals = layout.signals.len(),
            fragments = layout.fragments.len(),
            activations = layout.activations.len(),
            width = layout.size.width(),
            height = layout.size.height();
            "Sequence layout computed"
        );

        Ok(layout)
    }

    /// Canvas size, including the outer padding.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn title(&self) -> Option<&TextBox> {
        self.title.as_ref()
    }

    /// Participants, left to right.
    pub fn participants(&self) -> &[ParticipantLayout] {
        &self.participants
    }

    pub fn participant(&self, name: &str) -> Option<&ParticipantLayout> {
        self.participants.iter().find(|p| p.name() == name)
    }

    /// Signals, top to bottom in source order.
    pub fn signals(&self) -> &[SignalLayout] {
        &self.signals
    }

    /// Fragments, outer before inner, in source order.
    pub fn fragments(&self) -> &[FragmentLayout] {
        &self.fragments
    }

    pub fn activations(&self) -> &[ActivationBox] {
        &self.activations
    }

    /// Horizontal extent of everything drawn except the title.
    fn content_span(&self) -> HorizontalSpan {
        let mut span = HorizontalSpan::empty();
        for participant in &self.participants {
            span.include(participant.header.min_x());
            span.include(participant.header.max_x());
        }
        for signal in &self.signals {
            for point in &signal.path {
                span.include(point.x());
            }
            if let Some(label) = &signal.label {
                span.include(label.bounds.min_x());
                span.include(label.bounds.max_x());
            }
        }
        for fragment in &self.fragments {
            span.include(fragment.bounds.min_x());
            span.include(fragment.bounds.max_x());
            let guards = fragment.operands.iter().filter_map(|o| o.guard.as_ref());
            for text in std::iter::once(&fragment.tag).chain(guards) {
                span.include(text.bounds.min_x());
                span.include(text.bounds.max_x());
            }
        }
        for activation in &self.activations {
            span.include(activation.bounds.min_x());
            span.include(activation.bounds.max_x());
        }
        span
    }

    fn shift_x(&mut self, dx: f32) {
        self.participants.iter_mut().for_each(|p| p.shift_x(dx));
        self.signals.iter_mut().for_each(|s| s.shift_x(dx));
        self.fragments.iter_mut().for_each(|f| f.shift_x(dx));
        self.activations.iter_mut().for_each(|a| a.shift_x(dx));
    }
}
