//! Geometric value types shared by layout and drawing.
//!
//! - [`Point`] - a position on the canvas
//! - [`Size`] - a width and height
//! - [`Bounds`] - an axis-aligned rectangle stored as min/max corners
//!
//! The origin is the top-left corner of the canvas and Y grows downward, as
//! in SVG. Later signals therefore sit at larger Y values.

/// A position on the canvas.
///
/// ```
/// # use sequin_core::geometry::Point;
/// let moved = Point::new(10.0, 20.0).add_point(Point::new(5.0, 5.0));
/// assert_eq!((moved.x(), moved.y()), (15.0, 25.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// This point moved by `dx` horizontally and `dy` vertically.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// This point translated by `other`, read as a vector.
    pub fn add_point(self, other: Point) -> Self {
        self.offset(other.x, other.y)
    }
}

/// Width and height of a measured or laid-out element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True if `point` lies inside the rectangle or on its edge.
    pub fn contains(self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x)
            && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// The same rectangle moved by `offset`.
    pub fn translate(self, offset: Point) -> Self {
        Self::new_from_top_left(self.min_point().add_point(offset), self.to_size())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_offset() {
        let point = Point::new(1.0, 2.0).offset(3.0, -4.0);
        assert_eq!(point, Point::new(4.0, -2.0));
        assert_eq!(Point::default().add_point(point), point);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let top_left = Point::new(10.0, 20.0);
        let bounds = Bounds::new_from_top_left(top_left, Size::new(30.0, 40.0));

        assert_eq!((bounds.max_x(), bounds.max_y()), (40.0, 60.0));
        assert_eq!(bounds.min_point(), top_left);
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
        assert!(bounds.contains(Point::new(5.0, 5.0)));
        assert!(bounds.contains(Point::new(10.0, 0.0)));
        assert!(!bounds.contains(Point::new(10.5, 5.0)));
        assert!(!bounds.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_bounds_translate_keeps_size() {
        let bounds = Bounds::new_from_top_left(Point::new(10.5, 20.0), Size::new(50.25, 30.0));
        let moved = bounds.translate(Point::new(-100.0, 50.0));

        assert_approx_eq!(f32, moved.min_x(), -89.5);
        assert_approx_eq!(f32, moved.min_y(), 70.0);
        assert_approx_eq!(f32, moved.width(), bounds.width());
        assert_approx_eq!(f32, moved.height(), bounds.height());
    }
}
