//! Hover tooltip: HTML composition and placement.

use serde::{Deserialize, Serialize};
use stipple_core::{Color, Point};

use crate::dataset::{ChannelData, PointDataset};
use crate::definition::{ChartDefinition, UaDimension, ValueKind};
use crate::error::{Channel, Result};
use crate::format::{format_date, html_escape, sanitize_html, MeasureFormatter};
use crate::quadtree::IndexedPoint;

/// Border width of the tooltip box, in CSS pixels.
pub const BORDER_WIDTH: f32 = 2.0;

/// Format one record's value of `dim` for display.
///
/// Binned dates placed on an axis may carry only timestamps; those are
/// shown as dates.
pub fn formatted_value(
    dim: &UaDimension,
    values: &ChannelData,
    channel: Channel,
    i: usize,
    formatter: &dyn MeasureFormatter,
) -> Result<String> {
    match dim.value_kind() {
        ValueKind::Numeric => Ok(formatter.format(values.value(channel, ValueKind::Numeric, i)?)),
        ValueKind::Timestamp => Ok(format_date(values.value(channel, ValueKind::Timestamp, i)?)),
        ValueKind::Bin if values.categories.is_none() && values.ts.is_some() => {
            Ok(format_date(values.value(channel, ValueKind::Timestamp, i)?))
        }
        ValueKind::Bin => {
            let bin = values.bin(channel, i)?;
            Ok(values.bin_label(channel, bin)?.label.clone())
        }
    }
}

fn field_line(label: &str, value: &str, line_break: &str) -> String {
    format!(
        "{}: <strong>{}</strong>{line_break}",
        html_escape(label),
        html_escape(value)
    )
}

/// Build the sanitized tooltip HTML of `record`.
///
/// Lists X, then Y, color, size and shape, skipping any dimension already
/// shown (same column and date mode). Extra tooltip fields follow a rule and
/// are always listed.
pub fn compose(
    definition: &ChartDefinition,
    data: &PointDataset,
    record: usize,
    formatter: &dyn MeasureFormatter,
) -> Result<String> {
    let x = definition.x_dimension()?;
    let y = definition.y_dimension()?;
    let encoded: [(Channel, Option<&UaDimension>); 5] = [
        (Channel::X, Some(x)),
        (Channel::Y, Some(y)),
        (Channel::Color, definition.color_dimension()),
        (Channel::Size, definition.size_dimension()),
        (Channel::Shape, definition.shape_dimension()),
    ];

    let mut html = String::new();
    let mut displayed: Vec<&UaDimension> = Vec::new();
    for (channel, dim) in encoded {
        let Some(dim) = dim else { continue };
        if displayed.iter().any(|shown| shown.same_field(dim)) {
            continue;
        }
        let value = formatted_value(dim, data.channel(channel)?, channel, record, formatter)?;
        html.push_str(&field_line(&dim.label(), &value, "<br />"));
        displayed.push(dim);
    }

    let extras = definition.tooltip_dimensions();
    if !extras.is_empty() {
        html.push_str("<hr/>");
    }
    for (i, dim) in extras.iter().enumerate() {
        let channel = Channel::Tooltip(i);
        let value = formatted_value(dim, data.channel(channel)?, channel, record, formatter)?;
        html.push_str(&field_line(&dim.column, &value, "<br/>"));
    }

    Ok(sanitize_html(&html))
}

/// Where the canvas sits and how wide the tooltip box is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipLayout {
    /// Canvas top-left corner in page CSS pixels
    pub canvas_origin: Point,
    /// Canvas width in device pixels
    pub canvas_width: f32,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
    /// Rendered tooltip width in CSS pixels
    pub tooltip_width: f32,
}

impl TooltipLayout {
    /// Page position of the tooltip for a marker centered at `center`
    /// (device pixels).
    ///
    /// Markers in the left half get the tooltip on their right; others on
    /// their left.
    #[must_use]
    pub fn place(&self, center: Point) -> Point {
        let css = center.scale(1.0 / self.pixel_ratio);
        let mut left = self.canvas_origin.x + css.x;
        if center.x > self.canvas_width / 2.0 {
            left -= self.tooltip_width;
        }
        Point::new(left, self.canvas_origin.y + css.y)
    }
}

/// Tooltip box state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    content: String,
    visible: bool,
    position: Point,
    border_color: Color,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            content: String::new(),
            visible: false,
            position: Point::ORIGIN,
            border_color: Color::GREY,
        }
    }
}

impl Tooltip {
    /// Create a hidden, empty tooltip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `html` for `point`, bordered in the point's color.
    pub fn show(&mut self, html: String, point: &IndexedPoint, layout: &TooltipLayout) {
        self.content = html;
        self.position = layout.place(point.position);
        self.border_color = point.color;
        self.visible = true;
    }

    /// Hide the tooltip, keeping its last content.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sanitized HTML content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Top-left corner in page CSS pixels.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Border color, matching the hovered marker.
    #[must_use]
    pub const fn border_color(&self) -> Color {
        self.border_color
    }

    /// CSS `border` declaration of the box.
    #[must_use]
    pub fn border_css(&self) -> String {
        format!("{BORDER_WIDTH}px {} solid", self.border_color.to_css_rgba())
    }
}
