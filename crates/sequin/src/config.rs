//! Configuration types for Sequin diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] so
//! hosts can load them from external sources such as TOML files; every field
//! has a default, so partial files are accepted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing used by the layout engine.
//! - [`StyleConfig`] - Visual options used by the SVG backend.
//!
//! # Example
//!
//! ```
//! # use sequin::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.layout().padding(), 20.0);
//! ```

use serde::Deserialize;

use sequin_core::color::Color;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing used by the sequence layout engine, in canvas units.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `participant_spacing` | 40 | minimum gap between neighbouring participant boxes |
/// | `message_spacing` | 40 | minimum height of a signal row |
/// | `label_padding` | 10 | space around labels and inside boxes |
/// | `padding` | 20 | margin around the whole diagram |
/// | `activation_width` | 10 | width of an activation bar |
/// | `self_signal_width` | 40 | horizontal extent of a self-signal loop |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    participant_spacing: f32,
    message_spacing: f32,
    label_padding: f32,
    padding: f32,
    activation_width: f32,
    self_signal_width: f32,
}

impl LayoutConfig {
    pub fn participant_spacing(&self) -> f32 {
        self.participant_spacing
    }

    pub fn message_spacing(&self) -> f32 {
        self.message_spacing
    }

    pub fn label_padding(&self) -> f32 {
        self.label_padding
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn activation_width(&self) -> f32 {
        self.activation_width
    }

    pub fn self_signal_width(&self) -> f32 {
        self.self_signal_width
    }

    /// Sets the minimum gap between participant boxes.
    pub fn with_participant_spacing(mut self, spacing: f32) -> Self {
        self.participant_spacing = spacing;
        self
    }

    /// Sets the minimum signal row height.
    pub fn with_message_spacing(mut self, spacing: f32) -> Self {
        self.message_spacing = spacing;
        self
    }

    pub fn with_label_padding(mut self, padding: f32) -> Self {
        self.label_padding = padding;
        self
    }

    /// Sets the margin around the diagram.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_activation_width(mut self, width: f32) -> Self {
        self.activation_width = width;
        self
    }

    pub fn with_self_signal_width(mut self, width: f32) -> Self {
        self.self_signal_width = width;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            participant_spacing: 40.0,
            message_spacing: 40.0,
            label_padding: 10.0,
            padding: 20.0,
            activation_width: 10.0,
            self_signal_width: 40.0,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Controls appearance options used by the SVG backend. Colors are kept as
/// strings until use so that a bad value is reported with context instead of
/// failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color of the canvas. Transparent when unset.
    background_color: Option<String>,

    /// Fill color of activation bars.
    activation_color: Option<String>,

    font_family: String,

    /// Font size in points.
    font_size: u16,

    /// Draw strokes as slightly jittered curves for a hand-drawn look.
    sketch: bool,

    /// Seed for the sketch jitter. The same seed always yields the same image.
    seed: u64,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the activation bar fill, light grey unless configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn activation_color(&self) -> Result<Color, String> {
        match &self.activation_color {
            Some(color) => {
                Color::new(color).map_err(|err| format!("Invalid activation color in config: {err}"))
            }
            None => Ok(Color::from_rgba8(232, 232, 232, 255)),
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn sketch(&self) -> bool {
        self.sketch
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: u16) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    /// Enables sketch strokes jittered from `seed`.
    pub fn with_sketch(mut self, seed: u64) -> Self {
        self.sketch = true;
        self.seed = seed;
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            activation_color: None,
            font_family: "Arial".to_string(),
            font_size: 15,
            sketch: false,
            seed: 0,
        }
    }
}
