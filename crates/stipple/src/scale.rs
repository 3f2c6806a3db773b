//! Continuous position and size scales.

/// A continuous mapping from a data domain to an output range.
pub trait Scale: std::fmt::Debug {
    /// Map a domain value into the range.
    fn apply(&self, value: f64) -> f64;

    /// Domain endpoints.
    fn domain(&self) -> (f64, f64);

    /// Range endpoints.
    fn range(&self) -> (f64, f64);

    /// Replace the range, keeping the domain.
    fn set_range(&mut self, range: (f64, f64));
}

/// Absolute length of an interval.
#[must_use]
pub fn extent(interval: (f64, f64)) -> f64 {
    (interval.1 - interval.0).abs()
}

/// Normalize `v` into [0, 1] over `[a, b]`; a degenerate domain maps to 0.
fn normalize(v: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.0
    } else {
        (v - a) / span
    }
}

fn interpolate(t: f64, range: (f64, f64)) -> f64 {
    (range.1 - range.0).mul_add(t, range.0)
}

/// Linear scale. Time axes use it over epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a linear scale.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Identity mapping over `[0, size]`.
    #[must_use]
    pub const fn identity(size: f64) -> Self {
        Self::new((0.0, size), (0.0, size))
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        interpolate(normalize(value, self.domain.0, self.domain.1), self.range)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }
}

/// Square-root scale: output grows with the square root of the input, so an
/// area drawn with the output as radius grows linearly with the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    /// Create a square-root scale.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn transform(v: f64) -> f64 {
        v.signum() * v.abs().sqrt()
    }
}

impl Scale for SqrtScale {
    fn apply(&self, value: f64) -> f64 {
        let t = normalize(
            Self::transform(value),
            Self::transform(self.domain.0),
            Self::transform(self.domain.1),
        );
        interpolate(t, self.range)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }
}
