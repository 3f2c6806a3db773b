//! The immediate-mode canvas seam and a recording implementation.

use crate::draw::{DrawCommand, Paint, StrokeStyle, TextStyle};
use crate::{Point, Rect, Size};

/// Canvas trait for immediate-mode 2D drawing in device pixels.
///
/// Implementations must not carry paint state between calls: every call
/// receives the paint it draws with.
pub trait Canvas {
    /// Backing size in device pixels.
    fn size(&self) -> Size;

    /// Clear the whole canvas to transparent.
    fn clear(&mut self);

    /// Change the backing size in device pixels.
    fn resize(&mut self, size: Size);

    /// Translate all later drawing by an offset.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Draw a circle with the given fill and/or stroke.
    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    /// Draw text anchored at a position.
    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Used by tests to verify what was painted and to compare two passes.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas of the given device size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Get all recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last clear, i.e. what is visible now.
    #[must_use]
    pub fn frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(DrawCommand::is_clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Take ownership of the recorded commands, leaving the canvas empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Number of clears recorded so far.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_clear()).count()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear {
            bounds: Rect::from_size(self.size),
        });
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }
}
