//! Core rendering types for the stipple chart renderer.
//!
//! This crate provides the primitives a chart draws with:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with CSS parsing
//! - Explicit paint values: [`Paint`], [`StrokeStyle`], [`TextStyle`]
//! - The [`Canvas`] seam and a [`RecordingCanvas`] for tests
//! - Pointer events: [`Event`]

mod canvas;
mod color;
pub mod draw;
mod event;
mod geometry;

pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use draw::{DrawCommand, Paint, StrokeStyle, TextAlign, TextBaseline, TextStyle};
pub use event::Event;
pub use geometry::{Point, Rect, Size};
