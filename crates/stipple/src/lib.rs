//! Canvas scatter-plot renderer.
//!
//! Draws a column-oriented [`PointDataset`] described by a
//! [`ChartDefinition`] onto any [`stipple_core::Canvas`]:
//! - position, size, color and shape encodings ([`Encoding`])
//! - an arena [`QuadTree`] over the drawn markers for hover hit-testing
//! - sanitized HTML tooltips ([`Tooltip`])
//! - discrete legends with single-item focus ([`Legend`])
//!
//! ```no_run
//! use stipple::{ChartBase, ChartDefinition, PointDataset, RenderOptions, ScatterRenderer};
//! use stipple_core::{Event, Point, RecordingCanvas};
//!
//! # fn main() -> stipple::Result<()> {
//! let definition = ChartDefinition::from_json(r#"{
//!     "uaXDimension": [{"column": "x", "type": "NUMERICAL"}],
//!     "uaYDimension": [{"column": "y", "type": "NUMERICAL"}]
//! }"#)?;
//! let data = PointDataset::from_json(r#"{
//!     "xAxis": {"num": {"data": [1, 2], "min": 1, "max": 2}},
//!     "yAxis": {"num": {"data": [3, 4], "min": 3, "max": 4}},
//!     "afterFilterRecords": 2
//! }"#)?;
//! let base = ChartBase::fit(&definition, &data, 400.0, 300.0)?;
//! let canvas = RecordingCanvas::new(800.0, 600.0);
//! let mut chart = ScatterRenderer::new(canvas, definition, data, base, RenderOptions::default())?;
//! chart.render()?;
//! chart.handle_event(&Event::MouseMove { position: Point::new(60.0, 240.0) })?;
//! # Ok(())
//! # }
//! ```

pub mod chart_base;
pub mod color_scale;
pub mod dataset;
pub mod definition;
pub mod encode;
pub mod error;
pub mod format;
pub mod legend;
pub mod quadtree;
pub mod renderer;
pub mod scale;
pub mod tooltip;

pub use chart_base::{ChartBase, Margins, RenderOptions};
pub use color_scale::{
    ColorCache, ColorKey, ColorScale, ContinuousColorScale, OrdinalColorScale, CATEGORY10,
};
pub use dataset::{BinLabel, CategoricalValues, ChannelData, NumericValues, PointDataset};
pub use definition::{
    BubblesOptions, ChartDefinition, ColorOptions, DimensionType, ScatterOptions, SingleShape,
    UaDimension, ValueKind,
};
pub use encode::{Encoding, ShapeScale, SHAPE_GLYPHS};
pub use error::{Channel, RenderError, Result};
pub use format::{format_date, html_escape, sanitize_html, MeasureFormatter, SmartNumber};
pub use legend::{ChartHandler, FocusTarget, Legend, LegendEntry, LegendItem, LegendType};
pub use quadtree::{Hit, IndexError, IndexedPoint, QuadTree};
pub use renderer::ScatterRenderer;
pub use scale::{LinearScale, Scale, SqrtScale};
pub use tooltip::{compose, Tooltip, TooltipLayout};
