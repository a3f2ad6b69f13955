//! Text measurement for the SVG backend.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use sequin_core::geometry::Size;

/// Points to pixels at standard DPI.
const POINTS_TO_PIXELS: f32 = 1.33;

/// Line height as a multiple of the font size in pixels.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Average glyph advance as a multiple of the font size in pixels, used when
/// no font can shape the text.
const FALLBACK_CHAR_FACTOR: f32 = 0.55;

/// Measures text either by shaping it with real fonts or with fixed
/// per-character metrics.
pub(super) enum TextMeasurer {
    Fonts {
        font_system: Box<FontSystem>,
        family: String,
        font_size: u16,
    },
    Fixed {
        char_width: f32,
        line_height: f32,
    },
}

impl TextMeasurer {
    /// Loads the system fonts. This is slow, so one measurer is kept per
    /// graphic context.
    pub(super) fn with_fonts(family: &str, font_size: u16) -> Self {
        info!(family = family; "Initializing FontSystem");
        Self::Fonts {
            font_system: Box::new(FontSystem::new()),
            family: family.to_string(),
            font_size,
        }
    }

    pub(super) fn fixed(char_width: f32, line_height: f32) -> Self {
        Self::Fixed {
            char_width,
            line_height,
        }
    }

    pub(super) fn measure(&mut self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        match self {
            Self::Fonts {
                font_system,
                family,
                font_size,
            } => shape_text(font_system, family, *font_size, text),
            Self::Fixed {
                char_width,
                line_height,
            } => {
                let (lines, widest) = text.split('\n').fold((0usize, 0usize), |(n, w), line| {
                    (n + 1, w.max(line.chars().count()))
                });
                Size::new(widest as f32 * *char_width, lines as f32 * *line_height)
            }
        }
    }
}

fn shape_text(font_system: &mut FontSystem, family: &str, font_size: u16, text: &str) -> Size {
    let font_size_px = font_size as f32 * POINTS_TO_PIXELS;
    let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR);

    let mut buffer = Buffer::new(font_system, metrics);
    let mut buffer = buffer.borrow_with(font_system);
    let attrs = Attrs::new().family(Family::Name(family));

    buffer.set_size(None, None);
    buffer.set_text(text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(true);

    let mut max_width: f32 = 0.0;
    let mut total_height: f32 = 0.0;
    for run in buffer.layout_runs() {
        if let Some(last) = run.glyphs.last() {
            max_width = max_width.max(last.x + last.w);
        }
        total_height += metrics.line_height;
    }

    let lines = text.split('\n').count();
    if max_width <= 0.0 {
        // No usable font; estimate from the character count.
        let widest = text
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or_default();
        max_width = widest as f32 * font_size_px * FALLBACK_CHAR_FACTOR;
    }
    let total_height = total_height.max(lines as f32 * metrics.line_height);

    Size::new(max_width, total_height)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_fixed_metrics() {
        let mut measurer = TextMeasurer::fixed(8.0, 20.0);

        assert_eq!(measurer.measure(""), Size::default());
        let size = measurer.measure("two\nlines!");
        assert_approx_eq!(f32, size.width(), 48.0);
        assert_approx_eq!(f32, size.height(), 40.0);
    }
}
