//! Text alignment inside a layout box.

use std::{fmt, str::FromStr};

/// Horizontal placement of text inside its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Left edge in left-to-right scripts.
    Start,
    #[default]
    Center,
    /// Right edge in left-to-right scripts.
    End,
}

/// Vertical placement of text inside its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Top edge.
    Start,
    #[default]
    Center,
    /// Bottom edge.
    End,
}

impl HorizontalAlignment {
    /// Returns the x coordinate of the text anchor for a box starting at `x`
    /// with the given `width`.
    pub fn anchor_x(self, x: f32, width: f32) -> f32 {
        match self {
            Self::Start => x,
            Self::Center => x + width / 2.0,
            Self::End => x + width,
        }
    }
}

impl VerticalAlignment {
    /// Returns the y coordinate of the top of a text block of `text_height`
    /// placed in a box starting at `y` with the given `height`.
    pub fn top_y(self, y: f32, height: f32, text_height: f32) -> f32 {
        match self {
            Self::Start => y,
            Self::Center => y + (height - text_height) / 2.0,
            Self::End => y + height - text_height,
        }
    }
}

impl FromStr for HorizontalAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "left" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" | "right" => Ok(Self::End),
            _ => Err(format!(
                "invalid horizontal alignment `{s}`, valid values: start, center, end"
            )),
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "top" => Ok(Self::Start),
            "center" | "middle" => Ok(Self::Center),
            "end" | "bottom" => Ok(Self::End),
            _ => Err(format!(
                "invalid vertical alignment `{s}`, valid values: start, center, end"
            )),
        }
    }
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Center => write!(f, "center"),
            Self::End => write!(f, "end"),
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Center => write!(f, "center"),
            Self::End => write!(f, "end"),
        }
    }
}
