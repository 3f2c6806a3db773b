//! Paint values and draw commands.
//!
//! Every canvas call receives its paint explicitly; no fill or stroke state
//! is carried between calls.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for lines and outlined shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl StrokeStyle {
    /// Create a stroke style.
    #[must_use]
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Fill and/or stroke applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Paint {
    /// Paint with only a fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Paint with only a stroke.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }

    /// The color that dominates this paint: the fill if any, else the stroke.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.fill.or_else(|| self.stroke.map(|s| s.color))
    }
}

/// Horizontal text alignment relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Text starts at the position
    #[default]
    Start,
    /// Text is centered on the position
    Center,
    /// Text ends at the position
    End,
}

/// Vertical text baseline relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    /// Alphabetic baseline
    #[default]
    Alphabetic,
    /// Glyph box is centered on the position
    Middle,
    /// Top of the glyph box sits on the position
    Top,
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Horizontal alignment
    pub align: TextAlign,
    /// Vertical baseline
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// A glyph style: centered both ways on the draw position.
    #[must_use]
    pub fn glyph(font_family: impl Into<String>, size: f32, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            size,
            color,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    /// CSS font shorthand, e.g. `"12px FontAwesome"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.size, self.font_family)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            size: 16.0,
            color: Color::BLACK,
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Drawing primitive recorded by a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear a region to transparent
    Clear {
        /// Cleared bounds
        bounds: Rect,
    },

    /// Translate all later drawing
    Translate {
        /// Horizontal offset
        dx: f32,
        /// Vertical offset
        dy: f32,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill and stroke
        paint: Paint,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Draw a straight line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke style
        stroke: StrokeStyle,
    },
}

impl DrawCommand {
    /// Create a filled circle.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            paint: Paint::fill(color),
        }
    }

    /// Whether this command clears pixels.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear { .. })
    }

    /// The color this command puts on the canvas, if any.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Circle { paint, .. } => paint.color(),
            Self::Text { style, .. } => Some(style.color),
            Self::Line { stroke, .. } => Some(stroke.color),
            Self::Clear { .. } | Self::Translate { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_color_prefers_fill() {
        let paint = Paint {
            fill: Some(Color::WHITE),
            stroke: Some(StrokeStyle::new(Color::BLACK, 3.0)),
        };
        assert_eq!(paint.color(), Some(Color::WHITE));
        assert_eq!(
            Paint::stroke(StrokeStyle::new(Color::GREY, 3.0)).color(),
            Some(Color::GREY)
        );
    }

    #[test]
    fn test_text_style_glyph() {
        let style = TextStyle::glyph("FontAwesome", 15.0, Color::BLACK);
        assert_eq!(style.align, TextAlign::Center);
        assert_eq!(style.baseline, TextBaseline::Middle);
        assert_eq!(style.css_font(), "15px FontAwesome");
    }

    #[test]
    fn test_draw_command_color() {
        let cmd = DrawCommand::filled_circle(Point::new(1.0, 1.0), 2.0, Color::WHITE);
        assert_eq!(cmd.color(), Some(Color::WHITE));
        assert!(!cmd.is_clear());

        let clear = DrawCommand::Clear {
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        };
        assert!(clear.is_clear());
        assert_eq!(clear.color(), None);
    }

    #[test]
    fn test_draw_command_serialization() {
        let cmd = DrawCommand::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(5.0, 5.0),
            stroke: StrokeStyle::default(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
