//! Per-record visual encoding: position, radius, color and glyph.

use std::collections::HashMap;

use stipple_core::{Color, Point};

use crate::color_scale::{ColorCache, ColorKey, ColorScale};
use crate::dataset::PointDataset;
use crate::definition::{ChartDefinition, SingleShape, ValueKind};
use crate::error::{Channel, RenderError, Result};
use crate::scale::{Scale, SqrtScale};

/// Font-icon code points used as shape glyphs, in assignment order.
pub const SHAPE_GLYPHS: [char; 11] = [
    '\u{f111}', // circle
    '\u{f067}', // plus
    '\u{f04d}', // stop
    '\u{f005}', // star
    '\u{f00d}', // remove
    '\u{f069}', // asterisk
    '\u{f0a3}', // certificate
    '\u{f10c}', // circle-blank
    '\u{f096}', // check-empty
    '\u{f006}', // star-empty
    '\u{f185}', // sun
];

/// Font family the shape glyphs are drawn with.
pub const GLYPH_FONT: &str = "FontAwesome";

/// Color of faded markers during a legend focus pass.
pub const FADE_COLOR: &str = "#EEE";

/// Largest marker radius as a multiple of the default radius.
const SIZE_RANGE_FACTOR: f64 = 5.0;

/// Ordinal mapping from shape bins to glyphs.
///
/// Bins are assigned glyphs in order of first appearance; past the last
/// glyph the assignment wraps around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeScale {
    domain: Vec<usize>,
    slots: HashMap<usize, usize>,
}

impl ShapeScale {
    /// Build from bins in record order.
    pub fn from_bins(bins: impl IntoIterator<Item = usize>) -> Self {
        let mut scale = Self::default();
        for bin in bins {
            scale.slot(bin);
        }
        scale
    }

    fn slot(&mut self, bin: usize) -> usize {
        if let Some(&slot) = self.slots.get(&bin) {
            return slot;
        }
        let slot = self.domain.len();
        self.domain.push(bin);
        self.slots.insert(bin, slot);
        slot
    }

    /// Glyph of a bin; unseen bins get the glyph their slot would have.
    #[must_use]
    pub fn glyph(&self, bin: usize) -> char {
        let slot = self.slots.get(&bin).copied().unwrap_or(self.domain.len());
        SHAPE_GLYPHS[slot % SHAPE_GLYPHS.len()]
    }

    /// Bins in glyph assignment order.
    #[must_use]
    pub fn domain(&self) -> &[usize] {
        &self.domain
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SizeEncoding {
    kind: ValueKind,
    scale: SqrtScale,
}

#[derive(Debug, Clone, PartialEq)]
enum ColorEncoding {
    Single(Color),
    Scaled(ValueKind),
}

/// Everything needed to turn a record into a marker, resolved once per chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    x_kind: ValueKind,
    y_kind: ValueKind,
    pixel_ratio: f32,
    default_radius: f32,
    size: Option<SizeEncoding>,
    color: ColorEncoding,
    shape: Option<ShapeScale>,
    single_shape: SingleShape,
    fade: Color,
}

impl Encoding {
    /// Resolve the encoding of `definition` over `data`.
    ///
    /// # Errors
    ///
    /// Fails on an axis type that cannot be placed, a categorical size
    /// dimension, or a missing value bag.
    pub fn new(definition: &ChartDefinition, data: &PointDataset, pixel_ratio: f32) -> Result<Self> {
        let x_kind = definition.x_dimension()?.axis_kind("x")?;
        let y_kind = definition.y_dimension()?.axis_kind("y")?;
        let default_radius = definition.bubbles_options.default_radius;

        let size = match definition.size_dimension() {
            None => None,
            Some(dim) => {
                let kind = dim.value_kind();
                if kind == ValueKind::Bin {
                    return Err(RenderError::InvalidSizeEncoding {
                        column: dim.column.clone(),
                    });
                }
                let domain = data.channel(Channel::Size)?.extent(Channel::Size, kind)?;
                let low = f64::from(default_radius) * f64::from(pixel_ratio);
                let range = (low, low * SIZE_RANGE_FACTOR);
                Some(SizeEncoding {
                    kind,
                    scale: SqrtScale::new(domain, range),
                })
            }
        };

        let transparency = definition.color_options.transparency;
        let color = match definition.color_dimension() {
            None => ColorEncoding::Single(definition.color_options.resolved_single_color()?),
            Some(dim) => ColorEncoding::Scaled(dim.value_kind()),
        };

        let shape = match definition.shape_dimension() {
            None => None,
            Some(_) => {
                let channel = data.channel(Channel::Shape)?;
                let bins = (0..data.after_filter_records)
                    .map(|i| channel.bin(Channel::Shape, i))
                    .collect::<Result<Vec<_>>>()?;
                Some(ShapeScale::from_bins(bins))
            }
        };

        Ok(Self {
            x_kind,
            y_kind,
            pixel_ratio,
            default_radius,
            size,
            color,
            shape,
            single_shape: definition.bubbles_options.single_shape,
            fade: Color::from_hex(FADE_COLOR)?.with_alpha(transparency),
        })
    }

    fn axis_value(data: &PointDataset, channel: Channel, kind: ValueKind, i: usize) -> Result<f64> {
        let values = data.channel(channel)?;
        match kind {
            ValueKind::Bin => values.sort_order(channel, i),
            ValueKind::Numeric | ValueKind::Timestamp => values.value(channel, kind, i),
        }
    }

    /// Marker center in device pixels.
    pub fn position(
        &self,
        data: &PointDataset,
        i: usize,
        x_scale: &dyn Scale,
        y_scale: &dyn Scale,
    ) -> Result<Point> {
        let x = x_scale.apply(Self::axis_value(data, Channel::X, self.x_kind, i)?);
        let y = y_scale.apply(Self::axis_value(data, Channel::Y, self.y_kind, i)?);
        Ok(Point::new(x as f32, y as f32).scale(self.pixel_ratio))
    }

    /// Marker radius in device pixels.
    ///
    /// Without a size dimension every marker uses the configured default
    /// radius as is.
    pub fn radius(&self, data: &PointDataset, i: usize) -> Result<f32> {
        match &self.size {
            None => Ok(self.default_radius),
            Some(size) => {
                let v = data.channel(Channel::Size)?.value(Channel::Size, size.kind, i)?;
                Ok(size.scale.apply(v) as f32)
            }
        }
    }

    fn key_of(kind: ValueKind, data: &PointDataset, i: usize) -> Result<ColorKey> {
        let values = data.channel(Channel::Color)?;
        Ok(match kind {
            ValueKind::Numeric => ColorKey::Number(values.value(Channel::Color, kind, i)?),
            ValueKind::Timestamp => ColorKey::Timestamp(values.value(Channel::Color, kind, i)?),
            ValueKind::Bin => ColorKey::Bin(values.bin(Channel::Color, i)?),
        })
    }

    /// Color key of record `i`, or `None` with a single color.
    pub fn color_key(&self, data: &PointDataset, i: usize) -> Result<Option<ColorKey>> {
        match self.color {
            ColorEncoding::Single(_) => Ok(None),
            ColorEncoding::Scaled(kind) => Self::key_of(kind, data, i).map(Some),
        }
    }

    /// Marker color of record `i`, memoized per color key in `cache`.
    pub fn color(
        &self,
        data: &PointDataset,
        i: usize,
        scale: Option<&dyn ColorScale>,
        cache: &mut ColorCache,
    ) -> Result<Color> {
        match self.color {
            ColorEncoding::Single(color) => Ok(color),
            ColorEncoding::Scaled(kind) => {
                let scale = scale.ok_or_else(|| {
                    RenderError::Config("color dimension set but no color scale".to_string())
                })?;
                Ok(cache.resolve(Self::key_of(kind, data, i)?, scale))
            }
        }
    }

    /// Faded marker color.
    #[must_use]
    pub const fn fade_color(&self) -> Color {
        self.fade
    }

    /// Glyph of record `i`, when a shape dimension is set.
    pub fn glyph(&self, data: &PointDataset, i: usize) -> Result<Option<char>> {
        match &self.shape {
            None => Ok(None),
            Some(shapes) => Ok(Some(shapes.glyph(self.shape_bin(data, i)?))),
        }
    }

    /// Categorical color bin of record `i`.
    pub fn color_bin(&self, data: &PointDataset, i: usize) -> Result<usize> {
        data.channel(Channel::Color)?.bin(Channel::Color, i)
    }

    /// Shape bin of record `i`.
    pub fn shape_bin(&self, data: &PointDataset, i: usize) -> Result<usize> {
        data.channel(Channel::Shape)?.bin(Channel::Shape, i)
    }

    /// Shape scale, when a shape dimension is set.
    #[must_use]
    pub const fn shapes(&self) -> Option<&ShapeScale> {
        self.shape.as_ref()
    }

    /// Marker style used when no shape dimension is set.
    #[must_use]
    pub const fn single_shape(&self) -> SingleShape {
        self.single_shape
    }

    /// Device pixels per CSS pixel.
    #[must_use]
    pub const fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}
