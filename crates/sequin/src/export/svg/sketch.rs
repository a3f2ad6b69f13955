//! Hand-drawn stroke shapes.
//!
//! A sketched stroke is a cubic Bézier from the start to the end point. Both
//! control points sit somewhere between 20% and 80% of the way along the
//! straight line and are nudged by up to 5 units in each direction. The
//! generator is seeded, so the same seed always yields the same image.

use rand::{Rng, SeedableRng, rngs::StdRng};

use sequin_core::geometry::Point;

const MIN_CONTROL_PERCENT: i32 = 20;
const MAX_CONTROL_PERCENT: i32 = 80;
const MAX_NUDGE: i32 = 5;

pub(super) struct Sketch {
    rng: StdRng,
}

impl Sketch {
    pub(super) fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// SVG path data for a sketched stroke from `from` to `to`.
    pub(super) fn stroke_path(&mut self, from: Point, to: Point) -> String {
        let first = self.control_point(from, to);
        let second = self.control_point(from, to);
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            from.x(),
            from.y(),
            first.x(),
            first.y(),
            second.x(),
            second.y(),
            to.x(),
            to.y()
        )
    }

    fn control_point(&mut self, from: Point, to: Point) -> Point {
        let position =
            self.rng.random_range(MIN_CONTROL_PERCENT..MAX_CONTROL_PERCENT) as f32 / 100.0;
        let dx = self.rng.random_range(-MAX_NUDGE..MAX_NUDGE) as f32;
        let dy = self.rng.random_range(-MAX_NUDGE..MAX_NUDGE) as f32;

        Point::new(
            from.x() + (to.x() - from.x()) * position + dx,
            from.y() + (to.y() - from.y()) * position + dy,
        )
    }
}
