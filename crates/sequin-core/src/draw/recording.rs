//! A headless graphic context that records draw calls.
//!
//! Useful for tests and for hosts that want the geometry without an image.
//! Text is measured with fixed per-character metrics so results are
//! deterministic on every machine.

use crate::{
    color::Color,
    draw::{
        ArrowCap, DrawError, GraphicContext, HorizontalAlignment, MeasureText, StrokeWidth,
        VerticalAlignment,
    },
    geometry::{Point, Size},
};

/// One recorded drawing operation, in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rectangle {
        location: Point,
        size: Size,
        color: Color,
        filled: bool,
    },
    Line {
        from: Point,
        to: Point,
        width: StrokeWidth,
        dashed: bool,
    },
    Arrow {
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
        dashed: bool,
    },
    Text {
        text: String,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
        location: Point,
        size: Size,
    },
}

/// A [`GraphicContext`] that stores every call instead of drawing it.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    calls: Vec<DrawCall>,
    offsets: Vec<Point>,
    char_width: f32,
    line_height: f32,
    fail_after: Option<usize>,
    attempts: usize,
}

impl RecordingContext {
    /// Creates a recorder measuring 7 units per character and 16 per line.
    pub fn new() -> Self {
        Self::with_metrics(7.0, 16.0)
    }

    /// Creates a recorder with custom text metrics.
    pub fn with_metrics(char_width: f32, line_height: f32) -> Self {
        Self {
            calls: Vec::new(),
            offsets: Vec::new(),
            char_width,
            line_height,
            fail_after: None,
            attempts: 0,
        }
    }

    /// Makes every drawing call after the first `successful` ones fail with
    /// [`DrawError::Backend`].
    pub fn fail_after(mut self, successful: usize) -> Self {
        self.fail_after = Some(successful);
        self
    }

    /// The calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Consumes the recorder and returns its calls.
    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    /// Number of offsets currently pushed.
    pub fn offset_depth(&self) -> usize {
        self.offsets.len()
    }

    /// Sum of all pushed offsets.
    pub fn current_offset(&self) -> Point {
        self.offsets
            .iter()
            .fold(Point::default(), |acc, offset| acc.add_point(*offset))
    }

    fn record(&mut self, call: DrawCall) -> Result<(), DrawError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_after.is_some_and(|limit| attempt >= limit) {
            return Err(DrawError::Backend(format!("recording failure at call {attempt}")));
        }
        self.calls.push(call);
        Ok(())
    }

    fn absolute(&self, point: Point) -> Point {
        point.add_point(self.current_offset())
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasureText for RecordingContext {
    fn measure_text(&mut self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Size::new(
            widest as f32 * self.char_width,
            count as f32 * self.line_height,
        )
    }
}

impl GraphicContext for RecordingContext {
    fn draw_rectangle(
        &mut self,
        location: Point,
        size: Size,
        color: Color,
    ) -> Result<(), DrawError> {
        let location = self.absolute(location);
        self.record(DrawCall::Rectangle {
            location,
            size,
            color,
            filled: false,
        })
    }

    fn fill_rectangle(
        &mut self,
        location: Point,
        size: Size,
        color: Color,
    ) -> Result<(), DrawError> {
        let location = self.absolute(location);
        self.record(DrawCall::Rectangle {
            location,
            size,
            color,
            filled: true,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, width: StrokeWidth) -> Result<(), DrawError> {
        let (from, to) = (self.absolute(from), self.absolute(to));
        self.record(DrawCall::Line {
            from,
            to,
            width,
            dashed: false,
        })
    }

    fn draw_dashed_line(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
    ) -> Result<(), DrawError> {
        let (from, to) = (self.absolute(from), self.absolute(to));
        self.record(DrawCall::Line {
            from,
            to,
            width,
            dashed: true,
        })
    }

    fn draw_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError> {
        let (from, to) = (self.absolute(from), self.absolute(to));
        self.record(DrawCall::Arrow {
            from,
            to,
            width,
            cap,
            dashed: false,
        })
    }

    fn draw_dashed_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError> {
        let (from, to) = (self.absolute(from), self.absolute(to));
        self.record(DrawCall::Arrow {
            from,
            to,
            width,
            cap,
            dashed: true,
        })
    }

    fn draw_text(
        &mut self,
        text: &str,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
        location: Point,
        size: Size,
    ) -> Result<(), DrawError> {
        let location = self.absolute(location);
        self.record(DrawCall::Text {
            text: text.to_string(),
            horizontal,
            vertical,
            location,
            size,
        })
    }

    fn push_offset(&mut self, offset: Point) {
        self.offsets.push(offset);
    }

    fn pop_offset(&mut self) {
        self.offsets.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_text_multiline() {
        let mut ctx = RecordingContext::new();
        assert_eq!(ctx.measure_text(""), Size::default());
        assert_eq!(ctx.measure_text("abc"), Size::new(21.0, 16.0));
        assert_eq!(ctx.measure_text("a\nabcd"), Size::new(28.0, 32.0));
    }

    #[test]
    fn test_fail_after() {
        let mut ctx = RecordingContext::new().fail_after(1);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);

        assert!(ctx.draw_line(a, b, StrokeWidth::THIN).is_ok());
        assert!(ctx.draw_line(a, b, StrokeWidth::THIN).is_err());
        assert_eq!(ctx.calls().len(), 1);
    }
}
