//! Scoped coordinate offsets.

use std::ops::{Deref, DerefMut};

use crate::{draw::GraphicContext, geometry::Point};

/// A translation pushed on a [`GraphicContext`] for the lifetime of the guard.
///
/// The guard dereferences to the context, so drawing happens through it. When
/// the guard goes out of scope the offset is popped, including when a drawing
/// call failed and the error was propagated with `?`, and during unwinding.
///
/// ```
/// use sequin_core::draw::{GraphicContext, OffsetGuard, RecordingContext};
/// use sequin_core::geometry::Point;
///
/// let mut ctx = RecordingContext::new();
/// {
///     let _guard = OffsetGuard::new(&mut ctx, Point::new(10.0, 0.0));
/// }
/// assert_eq!(ctx.offset_depth(), 0);
/// ```
pub struct OffsetGuard<'a, G: GraphicContext + ?Sized> {
    ctx: &'a mut G,
}

impl<'a, G: GraphicContext + ?Sized> OffsetGuard<'a, G> {
    /// Pushes `offset` on `ctx`.
    pub fn new(ctx: &'a mut G, offset: Point) -> Self {
        ctx.push_offset(offset);
        Self { ctx }
    }
}

impl<G: GraphicContext + ?Sized> Deref for OffsetGuard<'_, G> {
    type Target = G;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<G: GraphicContext + ?Sized> DerefMut for OffsetGuard<'_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl<G: GraphicContext + ?Sized> Drop for OffsetGuard<'_, G> {
    fn drop(&mut self) {
        self.ctx.pop_offset();
    }
}

/// Runs `f` with `offset` applied to `ctx` and reverts the offset afterwards,
/// whatever `f` returns.
pub fn with_offset<G, T>(ctx: &mut G, offset: Point, f: impl FnOnce(&mut G) -> T) -> T
where
    G: GraphicContext + ?Sized,
{
    let mut guard = OffsetGuard::new(ctx, offset);
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::{DrawCall, DrawError, RecordingContext, StrokeWidth},
        geometry::Point,
    };

    #[test]
    fn test_guard_translates_and_reverts() {
        let mut ctx = RecordingContext::new();
        {
            let mut guard = ctx.apply_offset(Point::new(10.0, 20.0));
            assert_eq!(guard.offset_depth(), 1);
            guard
                .draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), StrokeWidth::THIN)
                .unwrap();
        }
        assert_eq!(ctx.offset_depth(), 0);
        assert_eq!(
            ctx.calls()[0],
            DrawCall::Line {
                from: Point::new(10.0, 20.0),
                to: Point::new(15.0, 20.0),
                width: StrokeWidth::THIN,
                dashed: false,
            }
        );
    }

    #[test]
    fn test_nested_offsets_accumulate() {
        let mut ctx = RecordingContext::new();
        with_offset(&mut ctx, Point::new(1.0, 1.0), |ctx| {
            with_offset(ctx, Point::new(2.0, 3.0), |ctx| {
                assert_eq!(ctx.current_offset(), Point::new(3.0, 4.0));
            });
            assert_eq!(ctx.current_offset(), Point::new(1.0, 1.0));
        });
        assert_eq!(ctx.current_offset(), Point::default());
    }

    #[test]
    fn test_offset_reverted_when_drawing_fails() {
        let mut ctx = RecordingContext::new().fail_after(0);

        let result = with_offset(&mut ctx, Point::new(5.0, 5.0), |ctx| -> Result<(), DrawError> {
            ctx.draw_line(Point::default(), Point::new(1.0, 1.0), StrokeWidth::THIN)?;
            unreachable!("the first drawing call fails");
        });

        assert!(result.is_err());
        assert_eq!(ctx.offset_depth(), 0);
    }

    #[test]
    fn test_offset_reverted_on_unwind() {
        let mut ctx = RecordingContext::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = OffsetGuard::new(&mut ctx, Point::new(1.0, 0.0));
            panic!("drawing blew up");
        }));

        assert!(outcome.is_err());
        assert_eq!(ctx.offset_depth(), 0);
    }

    #[test]
    fn test_guard_over_trait_object() {
        let mut ctx = RecordingContext::new();
        let dynamic: &mut dyn GraphicContext = &mut ctx;
        {
            let _guard = OffsetGuard::new(dynamic, Point::new(1.0, 0.0));
        }
        assert_eq!(ctx.offset_depth(), 0);
    }
}
