//! Drawing capability consumed by the renderer.
//!
//! Layout and rendering never talk to a concrete output format. They draw
//! against the [`GraphicContext`] trait, which a backend (SVG, a test
//! recorder, a raster surface) implements. The decorative shape of a stroke is
//! entirely the backend's business: the contract only fixes endpoints, widths
//! and alignment boxes.
//!
//! # Overview
//!
//! - [`MeasureText`] - text measurement, queried by the layout engine
//! - [`GraphicContext`] - rectangles, lines, arrows, text and offsets
//! - [`OffsetGuard`] - a scoped translation that is always reverted
//! - [`StrokeWidth`], [`ArrowCap`] - stroke parameters
//! - [`HorizontalAlignment`], [`VerticalAlignment`] - text placement in a box
//! - [`RecordingContext`] - a headless context that records every call

mod context;
mod offset;
mod recording;
mod stroke;
mod text;

pub use context::{DrawError, GraphicContext, MeasureText};
pub use offset::{OffsetGuard, with_offset};
pub use recording::{DrawCall, RecordingContext};
pub use stroke::{ArrowCap, StrokeWidth};
pub use text::{HorizontalAlignment, VerticalAlignment};
