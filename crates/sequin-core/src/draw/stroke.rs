//! Stroke parameters shared by line and arrow drawing calls.

use std::fmt;

use crate::draw::DrawError;

/// Width of a stroke in diagram units. Always finite and strictly positive.
///
/// ```
/// use sequin_core::draw::StrokeWidth;
///
/// let width = StrokeWidth::new(1.5).unwrap();
/// assert_eq!(width.get(), 1.5);
/// assert!(StrokeWidth::new(0.0).is_err());
/// assert!(StrokeWidth::new(f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StrokeWidth(f32);

impl StrokeWidth {
    /// Hairline used for lifelines and separators.
    pub const THIN: Self = Self(1.0);

    /// Standard width for boxes and signal lines.
    pub const REGULAR: Self = Self(1.5);

    /// Creates a stroke width.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidStrokeWidth`] when `width` is not a finite,
    /// strictly positive number.
    pub fn new(width: f32) -> Result<Self, DrawError> {
        if width.is_finite() && width > 0.0 {
            Ok(Self(width))
        } else {
            Err(DrawError::InvalidStrokeWidth(width))
        }
    }

    /// Returns the width as a plain number.
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl fmt::Display for StrokeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size of the arrow head drawn at the end point of an arrow.
///
/// `width` is measured across the line, `length` along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowCap {
    width: f32,
    length: f32,
}

impl ArrowCap {
    pub fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn length(self) -> f32 {
        self.length
    }
}

impl Default for ArrowCap {
    fn default() -> Self {
        Self::new(8.0, 10.0)
    }
}
