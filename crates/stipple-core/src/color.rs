//! Color representation and CSS color parsing.

use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (e.g., "#eee", "#ff0000" or "ff000080").
    ///
    /// Supports 3-character shorthand, 6-character RGB and 8-character RGBA.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHex);

        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => {
                let a = channel(&hex[6..8])?;
                Ok(Self::from_rgb8(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )
                .with_alpha(f32::from(a) / 255.0))
            }
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Parse a CSS color: hex notation, `rgb(...)`/`rgba(...)`, or one of a
    /// handful of named colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a recognised color.
    pub fn parse_css(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb_args(args);
        }

        match lower.as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "grey" | "gray" => Ok(Self::GREY),
            "red" => Ok(Self::from_rgb8(255, 0, 0)),
            "green" => Ok(Self::from_rgb8(0, 128, 0)),
            "blue" => Ok(Self::from_rgb8(0, 0, 255)),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Self::from_hex(s),
        }
    }

    fn parse_rgb_args(args: &str) -> Result<Self, ColorParseError> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(ColorParseError::InvalidFunction);
        }

        let mut channels = [0.0f32; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let v: f32 = part.parse().map_err(|_| ColorParseError::InvalidFunction)?;
            *slot = v / 255.0;
        }
        let alpha = match parts.get(3) {
            Some(a) => a.parse().map_err(|_| ColorParseError::InvalidFunction)?,
            None => 1.0,
        };

        Ok(Self::new(channels[0], channels[1], channels[2], alpha))
    }

    /// Return the same color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to a CSS `rgba(r,g,b,a)` string with 8-bit channels.
    #[must_use]
    pub fn to_css_rgba(&self) -> String {
        let [r, g, b] = self.rgb8();
        format!("rgba({r},{g},{b},{})", self.a)
    }

    fn rgb8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            (other.r - self.r).mul_add(t, self.r),
            (other.g - self.g).mul_add(t, self.g),
            (other.b - self.b).mul_add(t, self.b),
            (other.a - self.a).mul_add(t, self.a),
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// CSS `grey` (128, 128, 128)
    pub const GREY: Self = Self {
        r: 128.0 / 255.0,
        g: 128.0 / 255.0,
        b: 128.0 / 255.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
    /// Malformed `rgb()`/`rgba()` arguments
    InvalidFunction,
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 3, 6 or 8)"),
            Self::InvalidFunction => write!(f, "invalid rgb()/rgba() arguments"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::BLACK.r, 0.0);
        assert_eq!(Color::WHITE.r, 1.0);
        assert_eq!(Color::TRANSPARENT.a, 0.0);
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_color_from_hex_forms() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex("0000ff").unwrap().b, 1.0);
        assert_eq!(Color::from_hex("#EEE").unwrap().to_hex(), "#eeeeee");

        let c = Color::from_hex("#ff000080").unwrap();
        assert!((c.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(Color::from_hex("#gg0000"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("#ff"), Err(ColorParseError::InvalidLength));
        assert_eq!(Color::from_hex("#éé"), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn test_parse_css_rgba() {
        let c = Color::parse_css("rgba(101, 154, 136, 0.5)").unwrap();
        assert_eq!(c.to_hex(), "#659a88");
        assert_eq!(c.a, 0.5);

        let opaque: Color = "rgb(0,0,0)".parse().unwrap();
        assert_eq!(opaque, Color::BLACK);
    }

    #[test]
    fn test_parse_css_named() {
        assert_eq!(Color::parse_css("grey").unwrap(), Color::GREY);
        assert_eq!(Color::parse_css("Gray").unwrap(), Color::GREY);
        assert!(Color::parse_css("rgba(1,2)").is_err());
        assert!(Color::parse_css("not-a-color").is_err());
    }

    #[test]
    fn test_to_css_rgba() {
        let c = Color::from_hex("#659a88").unwrap().with_alpha(0.5);
        assert_eq!(c.to_css_rgba(), "rgba(101,154,136,0.5)");
        assert_eq!(Color::GREY.to_css_rgba(), "rgba(128,128,128,1)");
    }

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.b - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
    }

    proptest! {
        #[test]
        fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
            let c = Color::new(r, g, b, a);
            prop_assert!(c.r >= 0.0 && c.r <= 1.0);
            prop_assert!(c.g >= 0.0 && c.g <= 1.0);
            prop_assert!(c.b >= 0.0 && c.b <= 1.0);
            prop_assert!(c.a >= 0.0 && c.a <= 1.0);
        }

        #[test]
        fn prop_css_rgba_roundtrips_channels(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let c = Color::from_rgb8(r, g, b);
            let parsed = Color::parse_css(&c.to_css_rgba()).unwrap();
            prop_assert_eq!(parsed.to_hex(), c.to_hex());
        }
    }
}
