//! Error types for the scatter renderer.

use std::fmt;

use stipple_core::ColorParseError;
use thiserror::Error;

/// A dataset channel a value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// X axis values
    X,
    /// Y axis values
    Y,
    /// Color encoding values
    Color,
    /// Size encoding values
    Size,
    /// Shape encoding values
    Shape,
    /// Extra tooltip field `i`
    Tooltip(usize),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "xAxis"),
            Self::Y => write!(f, "yAxis"),
            Self::Color => write!(f, "values.color"),
            Self::Size => write!(f, "values.size"),
            Self::Shape => write!(f, "values.shape"),
            Self::Tooltip(i) => write!(f, "values.tooltip_{i}"),
        }
    }
}

/// Errors raised while configuring or drawing a scatter chart.
///
/// All of these are fatal for the current draw and propagate to the caller.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An axis dimension declares a type the renderer cannot place.
    #[error("unsupported dimension type {kind:?} for {role}")]
    UnsupportedDimensionType {
        /// Dimension role (`"x"`, `"y"`)
        role: &'static str,
        /// Declared type
        kind: String,
    },

    /// A categorical dimension was configured as the size encoding.
    #[error("cannot use {column} as size: categorical dimensions have no size scale")]
    InvalidSizeEncoding {
        /// Offending column
        column: String,
    },

    /// A required dimension list is empty.
    #[error("chart definition has no {role} dimension")]
    MissingDimension {
        /// Dimension role
        role: &'static str,
    },

    /// The dataset lacks the value bag an encoding reads from.
    #[error("dataset channel {channel} has no {kind} values")]
    MissingChannel {
        /// Channel name
        channel: Channel,
        /// Value bag (`num`, `ts`, `str`)
        kind: &'static str,
    },

    /// A channel holds fewer values than records to draw.
    #[error("dataset channel {channel} has {len} values but {required} records are drawn")]
    TruncatedChannel {
        /// Channel name
        channel: Channel,
        /// Values available
        len: usize,
        /// Records to draw
        required: usize,
    },

    /// A categorical value refers to a bin missing from the sorted mapping.
    #[error("bin {bin} of {channel} has no sorted mapping entry")]
    UnknownBin {
        /// Channel name
        channel: Channel,
        /// Offending bin
        bin: usize,
    },

    /// A configured color string could not be parsed.
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),

    /// Chart definition or dataset JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Chart definition or dataset YAML could not be parsed.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Any other inconsistent configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the renderer.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::X.to_string(), "xAxis");
        assert_eq!(Channel::Color.to_string(), "values.color");
        assert_eq!(Channel::Tooltip(2).to_string(), "values.tooltip_2");
    }

    #[test]
    fn test_render_error_messages() {
        let err = RenderError::UnsupportedDimensionType {
            role: "x",
            kind: "GEOPOINT".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported dimension type \"GEOPOINT\" for x");

        let err = RenderError::TruncatedChannel {
            channel: Channel::Size,
            len: 2,
            required: 3,
        };
        assert!(err.to_string().contains("values.size has 2 values"));
    }

    #[test]
    fn test_render_error_from_color() {
        let err: RenderError = ColorParseError::InvalidHex.into();
        assert!(matches!(err, RenderError::Color(_)));
        assert!(err.to_string().starts_with("invalid color"));
    }
}
