//! Color scales and the per-pass color cache.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use stipple_core::Color;

/// The value a record's color is computed from.
#[derive(Debug, Clone, Copy)]
pub enum ColorKey {
    /// Raw number of a numerical color dimension
    Number(f64),
    /// Timestamp of a date-range color dimension
    Timestamp(f64),
    /// Bin of a categorical color dimension
    Bin(usize),
}

impl ColorKey {
    fn bits(self) -> (u8, u64) {
        match self {
            Self::Number(v) => (0, canonical_bits(v)),
            Self::Timestamp(v) => (1, canonical_bits(v)),
            Self::Bin(b) => (2, b as u64),
        }
    }

    /// Numeric position of the key.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(v) | Self::Timestamp(v) => v,
            Self::Bin(b) => b as f64,
        }
    }
}

/// Bit pattern with `-0.0` folded into `0.0` and a single NaN.
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl PartialEq for ColorKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for ColorKey {}

impl Hash for ColorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Maps color keys to colors.
pub trait ColorScale: std::fmt::Debug {
    /// Color of a key.
    fn color(&self, key: ColorKey) -> Color;

    /// Bins with a legend entry, in legend order. Empty for continuous scales.
    fn domain(&self) -> Vec<usize> {
        Vec::new()
    }
}

/// d3 `category10` palette.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Palette color per bin, cycling when there are more bins than colors.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    palette: Vec<Color>,
    bins: usize,
    transparency: f32,
}

impl OrdinalColorScale {
    /// Create a scale over `bins` categories.
    #[must_use]
    pub fn new(palette: Vec<Color>, bins: usize, transparency: f32) -> Self {
        Self {
            palette,
            bins,
            transparency,
        }
    }

    /// Scale over `bins` categories using [`CATEGORY10`].
    #[must_use]
    pub fn category10(bins: usize, transparency: f32) -> Self {
        let palette = CATEGORY10
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        Self::new(palette, bins, transparency)
    }
}

impl ColorScale for OrdinalColorScale {
    fn color(&self, key: ColorKey) -> Color {
        if self.palette.is_empty() {
            return Color::GREY.with_alpha(self.transparency);
        }
        let slot = match key {
            ColorKey::Bin(b) => b % self.palette.len(),
            other => (other.as_f64() as i64).rem_euclid(self.palette.len() as i64) as usize,
        };
        self.palette[slot].with_alpha(self.transparency)
    }

    fn domain(&self) -> Vec<usize> {
        (0..self.bins).collect()
    }
}

/// Two-stop gradient over a numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousColorScale {
    domain: (f64, f64),
    from: Color,
    to: Color,
    transparency: f32,
}

impl ContinuousColorScale {
    /// Create a gradient scale.
    #[must_use]
    pub const fn new(domain: (f64, f64), from: Color, to: Color, transparency: f32) -> Self {
        Self {
            domain,
            from,
            to,
            transparency,
        }
    }
}

impl ColorScale for ContinuousColorScale {
    fn color(&self, key: ColorKey) -> Color {
        let (lo, hi) = self.domain;
        let t = if hi == lo {
            0.0
        } else {
            ((key.as_f64() - lo) / (hi - lo)) as f32
        };
        self.from.lerp(&self.to, t).with_alpha(self.transparency)
    }
}

/// Colors computed during one draw pass, keyed by color key.
#[derive(Debug, Default)]
pub struct ColorCache {
    colors: HashMap<ColorKey, Color>,
}

impl ColorCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached color of `key`, asking `scale` only on first sight.
    pub fn resolve(&mut self, key: ColorKey, scale: &dyn ColorScale) -> Color {
        *self.colors.entry(key).or_insert_with(|| scale.color(key))
    }

    /// Forget every cached color.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Number of distinct keys seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
