//! The graphic-context capability.

use thiserror::Error;

use crate::{
    color::Color,
    draw::{ArrowCap, HorizontalAlignment, OffsetGuard, StrokeWidth, VerticalAlignment},
    geometry::{Point, Size},
};

/// Errors reported by a graphic context while drawing.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("stroke width must be a positive finite number, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Text measurement without drawing.
///
/// The layout engine only needs this part of a graphic context, so it is a
/// trait of its own.
pub trait MeasureText {
    /// Returns the size `text` occupies when drawn. A literal line break
    /// (`'\n'`) starts a new line; the size covers every line.
    fn measure_text(&mut self, text: &str) -> Size;
}

/// A drawing surface.
///
/// All coordinates are relative to the current offset, which starts at the
/// origin of the canvas the context was scoped to. Offsets are pushed and
/// popped in stack order; use [`OffsetGuard`] (or [`GraphicContext::apply_offset`])
/// rather than calling [`push_offset`](Self::push_offset) directly so the
/// offset is reverted on every exit path.
pub trait GraphicContext: MeasureText {
    /// Draws the outline of a rectangle.
    fn draw_rectangle(&mut self, location: Point, size: Size, color: Color)
    -> Result<(), DrawError>;

    /// Fills a rectangle without an outline.
    fn fill_rectangle(&mut self, location: Point, size: Size, color: Color)
    -> Result<(), DrawError>;

    /// Draws a solid line.
    fn draw_line(&mut self, from: Point, to: Point, width: StrokeWidth) -> Result<(), DrawError>;

    /// Draws a dashed line.
    fn draw_dashed_line(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
    ) -> Result<(), DrawError>;

    /// Draws a solid line with an arrow head at `to`.
    fn draw_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError>;

    /// Draws a dashed line with an arrow head at `to`.
    fn draw_dashed_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError>;

    /// Draws `text` aligned inside the box at `location` with `size`.
    fn draw_text(
        &mut self,
        text: &str,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
        location: Point,
        size: Size,
    ) -> Result<(), DrawError>;

    /// Pushes a translation on top of the current one.
    fn push_offset(&mut self, offset: Point);

    /// Reverts the most recent [`push_offset`](Self::push_offset).
    fn pop_offset(&mut self);

    /// Pushes `offset` and returns a guard that pops it when dropped.
    fn apply_offset(&mut self, offset: Point) -> OffsetGuard<'_, Self>
    where
        Self: Sized,
    {
        OffsetGuard::new(self, offset)
    }
}
