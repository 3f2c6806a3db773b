//! Chart frame: canvas size, margins, axis scales and the color scale.

use serde::{Deserialize, Serialize};
use stipple_core::{Color, Point, Rect};

use crate::color_scale::{ColorScale, ContinuousColorScale, OrdinalColorScale};
use crate::dataset::PointDataset;
use crate::definition::{ChartDefinition, ValueKind};
use crate::error::{Channel, Result};
use crate::scale::{extent, LinearScale, Scale};

/// Space around the data area, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
}

impl Margins {
    /// No margins: the data area is the whole canvas.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Standard margins, widened for axis labels.
    #[must_use]
    pub fn for_definition(definition: &ChartDefinition) -> Self {
        let labelled = |label: &Option<String>| label.as_deref().is_some_and(|l| !l.is_empty());
        Self {
            left: if labelled(&definition.y_axis_label) { 90.0 } else { 60.0 },
            right: 20.0,
            top: 20.0,
            bottom: if labelled(&definition.x_axis_label) { 80.0 } else { 60.0 },
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 20.0,
            top: 20.0,
            bottom: 60.0,
        }
    }
}

/// Host-side rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
    /// Canvas top-left corner in page CSS pixels
    pub canvas_origin: Point,
    /// Rendered tooltip width in CSS pixels
    pub tooltip_width: f32,
    /// Suppress hover tooltips
    pub no_tooltips: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            canvas_origin: Point::ORIGIN,
            tooltip_width: 160.0,
            no_tooltips: false,
        }
    }
}

/// Axis scales and layout the renderer draws into.
///
/// Sizes and scale ranges are CSS pixels; the renderer multiplies by the
/// pixel ratio.
#[derive(Debug)]
pub struct ChartBase {
    width: f32,
    height: f32,
    margins: Margins,
    x_scale: Box<dyn Scale>,
    y_scale: Box<dyn Scale>,
    color_scale: Option<Box<dyn ColorScale>>,
}

fn padded(domain: (f64, f64)) -> (f64, f64) {
    if domain.0 == domain.1 {
        (domain.0 - 1.0, domain.1 + 1.0)
    } else {
        domain
    }
}

fn axis_domain(data: &PointDataset, channel: Channel, kind: ValueKind) -> Result<(f64, f64)> {
    let values = data.channel(channel)?;
    let domain = match kind {
        ValueKind::Bin => values.sort_order_extent(channel)?,
        ValueKind::Numeric | ValueKind::Timestamp => values.extent(channel, kind)?,
    };
    Ok(padded(domain))
}

impl ChartBase {
    /// Create a frame from explicit scales.
    #[must_use]
    pub fn new(
        width: f32,
        height: f32,
        margins: Margins,
        x_scale: Box<dyn Scale>,
        y_scale: Box<dyn Scale>,
    ) -> Self {
        Self {
            width,
            height,
            margins,
            x_scale,
            y_scale,
            color_scale: None,
        }
    }

    /// Fit linear scales to the data extents, and a default color scale when
    /// the definition has a color dimension.
    ///
    /// Categorical axes span their bins' sort orders. A single-valued extent
    /// is padded by one unit each side.
    pub fn fit(
        definition: &ChartDefinition,
        data: &PointDataset,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        let margins = Margins::for_definition(definition);
        let x_kind = definition.x_dimension()?.axis_kind("x")?;
        let y_kind = definition.y_dimension()?.axis_kind("y")?;
        let x_domain = axis_domain(data, Channel::X, x_kind)?;
        let y_domain = axis_domain(data, Channel::Y, y_kind)?;

        let mut base = Self::new(
            width,
            height,
            margins,
            Box::new(LinearScale::new(x_domain, (0.0, 0.0))),
            Box::new(LinearScale::new(y_domain, (0.0, 0.0))),
        );
        base.fit_ranges();

        if let Some(dim) = definition.color_dimension() {
            let transparency = definition.color_options.transparency;
            let values = data.channel(Channel::Color)?;
            let scale: Box<dyn ColorScale> = match dim.value_kind() {
                ValueKind::Bin => Box::new(OrdinalColorScale::category10(
                    values.bin_count(),
                    transparency,
                )),
                kind => Box::new(ContinuousColorScale::new(
                    values.extent(Channel::Color, kind)?,
                    Color::from_rgb8(0xde, 0xeb, 0xf7),
                    Color::from_rgb8(0x08, 0x51, 0x9c),
                    transparency,
                )),
            };
            base.color_scale = Some(scale);
        }
        Ok(base)
    }

    /// Replace the color scale.
    #[must_use]
    pub fn with_color_scale(mut self, scale: Box<dyn ColorScale>) -> Self {
        self.color_scale = Some(scale);
        self
    }

    /// Stretch both scale ranges over the data area, y growing upwards.
    fn fit_ranges(&mut self) {
        let area = self.data_area();
        self.x_scale
            .set_range((f64::from(area.x), f64::from(area.right())));
        self.y_scale
            .set_range((f64::from(area.bottom()), f64::from(area.y)));
    }

    /// Make one x unit and one y unit span the same number of pixels by
    /// shrinking the range of the axis that would otherwise be stretched
    /// more.
    pub fn equalize_scales(&mut self) {
        let x_ratio = extent(self.x_scale.domain()) / extent(self.x_scale.range());
        let y_ratio = extent(self.y_scale.domain()) / extent(self.y_scale.range());
        if !x_ratio.is_finite() || !y_ratio.is_finite() || x_ratio == 0.0 || y_ratio == 0.0 {
            return;
        }
        let area = self.data_area();
        if x_ratio < y_ratio {
            let start = f64::from(area.x);
            let width = extent(self.x_scale.domain()) / y_ratio;
            self.x_scale.set_range((start, start + width));
        } else if x_ratio > y_ratio {
            let start = f64::from(area.bottom());
            let height = extent(self.y_scale.domain()) / x_ratio;
            self.y_scale.set_range((start, start - height));
        }
    }

    /// Change the canvas size, refitting both ranges to the new data area.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.fit_ranges();
    }

    /// Data area in CSS pixels.
    #[must_use]
    pub fn data_area(&self) -> Rect {
        let m = &self.margins;
        Rect::new(
            m.left,
            m.top,
            (self.width - m.left - m.right).max(0.0),
            (self.height - m.top - m.bottom).max(0.0),
        )
    }

    /// Canvas width in CSS pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in CSS pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Margins in CSS pixels.
    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    /// X position scale.
    #[must_use]
    pub fn x_scale(&self) -> &dyn Scale {
        self.x_scale.as_ref()
    }

    /// Y position scale.
    #[must_use]
    pub fn y_scale(&self) -> &dyn Scale {
        self.y_scale.as_ref()
    }

    /// Color scale, when one is set.
    #[must_use]
    pub fn color_scale(&self) -> Option<&dyn ColorScale> {
        self.color_scale.as_deref()
    }
}
