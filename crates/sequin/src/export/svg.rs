//! SVG backend.
//!
//! [`SvgContext`] implements [`GraphicContext`] by collecting `svg` crate
//! nodes in absolute canvas coordinates. [`Svg`] is the file exporter built
//! on top of it.

mod sketch;
mod text;

use std::{fs::File, io::Write};

use indexmap::IndexMap;
use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use sequin_core::{
    color::Color,
    draw::{
        ArrowCap, DrawError, GraphicContext, HorizontalAlignment, MeasureText, StrokeWidth,
        VerticalAlignment,
    },
    geometry::{Point, Size},
    semantic::SequenceDiagram,
};

use crate::{
    config::{AppConfig, StyleConfig},
    error::SequinError,
    export,
    render,
};

use sketch::Sketch;
use text::TextMeasurer;

const DASH_PATTERN: &str = "5,5";

/// A [`GraphicContext`] that builds an SVG document.
///
/// Text is measured with the system fonts through `cosmic-text`. The font
/// system belongs to the context, so independent contexts never share
/// state. With sketching enabled every line is drawn as a slightly wavy
/// Bézier from a generator seeded by the style configuration.
pub struct SvgContext {
    nodes: Vec<Box<dyn svg::Node>>,
    offsets: Vec<Point>,
    measurer: TextMeasurer,
    font_family: String,
    font_size: u16,
    sketch: Option<Sketch>,
    markers: IndexMap<String, ArrowCap>,
}

impl SvgContext {
    /// Creates a context measuring text with the system fonts.
    pub fn new(style: &StyleConfig) -> Self {
        let measurer = TextMeasurer::with_fonts(style.font_family(), style.font_size());
        Self::with_measurer(style, measurer)
    }

    /// Creates a context measuring `char_width` per character and
    /// `line_height` per line, without loading any font.
    pub fn with_fixed_metrics(style: &StyleConfig, char_width: f32, line_height: f32) -> Self {
        Self::with_measurer(style, TextMeasurer::fixed(char_width, line_height))
    }

    fn with_measurer(style: &StyleConfig, measurer: TextMeasurer) -> Self {
        Self {
            nodes: Vec::new(),
            offsets: Vec::new(),
            measurer,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
            sketch: style.sketch().then(|| Sketch::new(style.seed())),
            markers: IndexMap::new(),
        }
    }

    /// Number of drawn elements so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Wraps everything drawn so far in a document of the given size.
    pub fn into_document(self, size: Size) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        if !self.markers.is_empty() {
            let mut defs = svg_element::Definitions::new();
            for (id, cap) in &self.markers {
                defs = defs.add(arrow_marker(id, *cap));
            }
            doc = doc.add(defs);
        }

        let mut group = svg_element::Group::new()
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size);
        for node in self.nodes {
            group = group.add(node);
        }

        doc.add(group)
    }

    fn absolute(&self, point: Point) -> Point {
        self.offsets
            .iter()
            .fold(point, |acc, offset| acc.add_point(*offset))
    }

    /// A stroke from `from` to `to` in absolute coordinates.
    fn stroke(&mut self, from: Point, to: Point, width: StrokeWidth, dashed: bool) -> svg_element::Path {
        let (from, to) = (self.absolute(from), self.absolute(to));
        let data = match &mut self.sketch {
            Some(sketch) => sketch.stroke_path(from, to),
            None => format!("M {} {} L {} {}", from.x(), from.y(), to.x(), to.y()),
        };

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", width.get());
        if dashed {
            path.set("stroke-dasharray", DASH_PATTERN)
        } else {
            path
        }
    }

    fn arrow(&mut self, from: Point, to: Point, width: StrokeWidth, cap: ArrowCap, dashed: bool) {
        let id = format!("arrow-{}x{}", cap.width(), cap.length()).replace('.', "_");
        let path = self
            .stroke(from, to, width, dashed)
            .set("marker-end", format!("url(#{id})"));
        self.markers.entry(id).or_insert(cap);
        self.nodes.push(Box::new(path));
    }

    fn rectangle(&self, location: Point, size: Size) -> svg_element::Rectangle {
        let location = self.absolute(location);
        svg_element::Rectangle::new()
            .set("x", location.x())
            .set("y", location.y())
            .set("width", size.width())
            .set("height", size.height())
    }
}

fn arrow_marker(id: &str, cap: ArrowCap) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", id)
        .set("viewBox", "0 0 10 10")
        .set("refX", 10)
        .set("refY", 5)
        .set("markerUnits", "userSpaceOnUse")
        .set("markerWidth", cap.length())
        .set("markerHeight", cap.width())
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", "black"),
        )
}

fn text_anchor(alignment: HorizontalAlignment) -> &'static str {
    match alignment {
        HorizontalAlignment::Start => "start",
        HorizontalAlignment::Center => "middle",
        HorizontalAlignment::End => "end",
    }
}

impl MeasureText for SvgContext {
    fn measure_text(&mut self, text: &str) -> Size {
        self.measurer.measure(text)
    }
}

impl GraphicContext for SvgContext {
    fn draw_rectangle(
        &mut self,
        location: Point,
        size: Size,
        color: Color,
    ) -> Result<(), DrawError> {
        if self.sketch.is_some() {
            let (x, y) = (location.x(), location.y());
            let (w, h) = (size.width(), size.height());
            let corners = [
                Point::new(x, y),
                Point::new(x + w, y),
                Point::new(x + w, y + h),
                Point::new(x, y + h),
            ];
            for index in 0..corners.len() {
                let next = corners[(index + 1) % corners.len()];
                let edge = self
                    .stroke(corners[index], next, StrokeWidth::REGULAR, false)
                    .set("stroke", color.to_string())
                    .set("stroke-opacity", color.alpha());
                self.nodes.push(Box::new(edge));
            }
            return Ok(());
        }

        let rect = self
            .rectangle(location, size)
            .set("fill", "none")
            .set("stroke", color.to_string())
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", StrokeWidth::REGULAR.get());
        self.nodes.push(Box::new(rect));
        Ok(())
    }

    fn fill_rectangle(
        &mut self,
        location: Point,
        size: Size,
        color: Color,
    ) -> Result<(), DrawError> {
        let rect = self
            .rectangle(location, size)
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha())
            .set("stroke", "none");
        self.nodes.push(Box::new(rect));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, width: StrokeWidth) -> Result<(), DrawError> {
        let path = self.stroke(from, to, width, false);
        self.nodes.push(Box::new(path));
        Ok(())
    }

    fn draw_dashed_line(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
    ) -> Result<(), DrawError> {
        let path = self.stroke(from, to, width, true);
        self.nodes.push(Box::new(path));
        Ok(())
    }

    fn draw_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError> {
        self.arrow(from, to, width, cap, false);
        Ok(())
    }

    fn draw_dashed_arrow(
        &mut self,
        from: Point,
        to: Point,
        width: StrokeWidth,
        cap: ArrowCap,
    ) -> Result<(), DrawError> {
        self.arrow(from, to, width, cap, true);
        Ok(())
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
        let lines: Vec<&str> = text.split('\n').collect();
        let text_height = self.measurer.measure(text).height();
        let line_height = text_height / lines.len() as f32;

        let x = horizontal.anchor_x(location.x(), size.width());
        let top = vertical.top_y(location.y(), size.height(), text_height);

        let mut rendered = svg_element::Text::new("")
            .set("x", x)
            .set("y", top - line_height / 2.0)
            .set("text-anchor", text_anchor(horizontal))
            .set("dominant-baseline", "central");
        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        self.nodes.push(Box::new(rendered));
        Ok(())
    }

    fn push_offset(&mut self, offset: Point) {
        self.offsets.push(offset);
    }

    fn pop_offset(&mut self) {
        self.offsets.pop();
    }
}

/// Lays out and renders `diagram` into an SVG document, measuring text with
/// the system fonts.
///
/// # Errors
///
/// See [`render::render`].
pub fn render_document(
    diagram: &SequenceDiagram,
    config: &AppConfig,
) -> Result<Document, SequinError> {
    let ctx = SvgContext::new(config.style());
    render_with_context(diagram, config, ctx)
}

fn render_with_context(
    diagram: &SequenceDiagram,
    config: &AppConfig,
    mut ctx: SvgContext,
) -> Result<Document, SequinError> {
    let layout = render::render(diagram, &mut ctx, config)?;
    debug!(nodes = ctx.node_count(); "SVG document rendered");
    Ok(ctx.into_document(layout.size()))
}

/// SVG file exporter.
pub struct Svg {
    file_name: String,
    config: AppConfig,
    fixed_metrics: Option<(f32, f32)>,
}

impl Svg {
    pub fn new(file_name: &str, config: AppConfig) -> Self {
        Self {
            file_name: file_name.to_string(),
            config,
            fixed_metrics: None,
        }
    }

    /// Measures text with fixed metrics instead of the system fonts.
    pub fn with_fixed_metrics(mut self, char_width: f32, line_height: f32) -> Self {
        self.fixed_metrics = Some((char_width, line_height));
        self
    }

    /// Renders `diagram` into a document without writing it.
    pub fn render_document(&self, diagram: &SequenceDiagram) -> Result<Document, SequinError> {
        let ctx = match self.fixed_metrics {
            Some((char_width, line_height)) => {
                SvgContext::with_fixed_metrics(self.config.style(), char_width, line_height)
            }
            None => SvgContext::new(self.config.style()),
        };
        render_with_context(diagram, &self.config, ctx)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_diagram(&mut self, diagram: &SequenceDiagram) -> Result<(), export::Error> {
        let doc = self
            .render_document(diagram)
            .map_err(|err| export::Error::Render(err.to_string()))?;
        self.write_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::export::Exporter as _;

    fn fixed_context(style: &StyleConfig) -> SvgContext {
        SvgContext::with_fixed_metrics(style, 7.0, 16.0)
    }

    #[test]
    fn test_offsets_apply_to_drawn_nodes() {
        let mut ctx = fixed_context(&StyleConfig::default());
        {
            let mut guard = ctx.apply_offset(Point::new(10.0, 5.0));
            guard
                .draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), StrokeWidth::THIN)
                .unwrap();
        }
        ctx.draw_line(Point::new(0.0, 0.0), Point::new(5.0, 0.0), StrokeWidth::THIN)
            .unwrap();

        let svg = ctx.into_document(Size::new(50.0, 50.0)).to_string();
        assert!(svg.contains("M 10 5 L 15 5"));
        assert!(svg.contains("M 0 0 L 5 0"));
    }

    #[test]
    fn test_arrows_share_markers() {
        let mut ctx = fixed_context(&StyleConfig::default());
        let (a, b) = (Point::new(0.0, 0.0), Point::new(40.0, 0.0));
        ctx.draw_arrow(a, b, StrokeWidth::REGULAR, ArrowCap::default())
            .unwrap();
        ctx.draw_dashed_arrow(b, a, StrokeWidth::REGULAR, ArrowCap::default())
            .unwrap();

        let svg = ctx.into_document(Size::new(50.0, 50.0)).to_string();
        assert_eq!(svg.matches("<marker").count(), 1);
        assert_eq!(svg.matches("marker-end=\"url(#arrow-8x10)\"").count(), 2);
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn test_multiline_text_uses_tspans() {
        let mut ctx = fixed_context(&StyleConfig::default());
        ctx.draw_text(
            "first\nsecond",
            HorizontalAlignment::Start,
            VerticalAlignment::Center,
            Point::new(0.0, 0.0),
            Size::new(100.0, 32.0),
        )
        .unwrap();

        let svg = ctx.into_document(Size::new(100.0, 32.0)).to_string();
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(svg.contains("first"));
        assert!(svg.contains("second"));
    }

    #[test]
    fn test_sketch_is_reproducible() {
        let style = StyleConfig::default().with_sketch(3);
        let (diagram, _) = sequin_parser::compile("A -> B: hi\nB --> A");

        let draw = || {
            let ctx = fixed_context(&style);
            let config = AppConfig::new(Default::default(), style.clone());
            render_with_context(&diagram, &config, ctx)
                .unwrap()
                .to_string()
        };

        let first = draw();
        assert_eq!(first, draw());
        assert!(first.contains(" C "));
    }

    #[test]
    fn test_plain_strokes_are_straight() {
        let config = AppConfig::default();
        let (diagram, _) = sequin_parser::compile("Alice -> Bob");
        let svg = render_with_context(&diagram, &config, fixed_context(config.style()))
            .unwrap()
            .to_string();

        assert!(!svg.contains(" C "));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Alice"));
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.svg");
        let (diagram, _) = sequin_parser::compile("title Hello\nA -> B: hi");

        let mut exporter = Svg::new(path.to_str().unwrap(), AppConfig::default())
            .with_fixed_metrics(7.0, 16.0);
        exporter.export_diagram(&diagram).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("Hello"));
    }

    #[test]
    fn test_exporter_reports_io_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("diagram.svg");
        let (diagram, _) = sequin_parser::compile("A -> B");

        let mut exporter = Svg::new(path.to_str().unwrap(), AppConfig::default())
            .with_fixed_metrics(7.0, 16.0);
        let result = exporter.export_diagram(&diagram);
        assert!(matches!(result, Err(export::Error::Io(_))));
    }
}
