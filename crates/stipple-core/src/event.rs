//! Pointer and surface events delivered to a chart.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Positions are CSS pixels relative to the canvas' top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse entered the canvas
    MouseEnter,
    /// Mouse left the canvas
    MouseLeave,
    /// Canvas was resized (CSS pixels)
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Check if this is a mouse event.
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseMove { .. } | Self::MouseEnter | Self::MouseLeave
        )
    }

    /// Get the position if this is a positional event.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_mouse() {
        assert!(Event::MouseMove {
            position: Point::new(1.0, 2.0)
        }
        .is_mouse());
        assert!(Event::MouseLeave.is_mouse());
        assert!(!Event::Resize {
            width: 10.0,
            height: 10.0
        }
        .is_mouse());
    }

    #[test]
    fn test_event_position() {
        let pos = Point::new(3.0, 4.0);
        assert_eq!(Event::MouseMove { position: pos }.position(), Some(pos));
        assert_eq!(Event::MouseEnter.position(), None);
    }
}
