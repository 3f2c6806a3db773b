//! Chart definition: which columns drive which visual channel.

use serde::{Deserialize, Serialize};
use stipple_core::Color;

use crate::error::{RenderError, Result};

/// Declared type of an unaggregated dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DimensionType {
    /// Numeric column
    Numerical,
    /// Categorical column
    Alphanum,
    /// Date column
    Date,
    /// Any other declared type; not placeable on an axis
    Other(String),
}

impl From<String> for DimensionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NUMERICAL" => Self::Numerical,
            "ALPHANUM" => Self::Alphanum,
            "DATE" => Self::Date,
            _ => Self::Other(s),
        }
    }
}

impl From<DimensionType> for String {
    fn from(kind: DimensionType) -> Self {
        kind.as_str().to_string()
    }
}

impl DimensionType {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Numerical => "NUMERICAL",
            Self::Alphanum => "ALPHANUM",
            Self::Date => "DATE",
            Self::Other(s) => s,
        }
    }
}

/// Which value bag of a channel a dimension reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `num`: raw numbers
    Numeric,
    /// `ts`: epoch milliseconds
    Timestamp,
    /// `str`: categorical bins
    Bin,
}

const DATE_MODE_RANGE: &str = "RANGE";

/// An unaggregated ("UA") per-record dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UaDimension {
    /// Source column
    pub column: String,
    /// Declared type
    #[serde(rename = "type")]
    pub kind: DimensionType,
    /// Numeric column displayed as categories
    #[serde(default)]
    pub treat_as_alphanum: bool,
    /// Date binning mode (`RANGE` keeps raw timestamps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_mode: Option<String>,
}

impl UaDimension {
    /// Create a dimension over a column.
    #[must_use]
    pub fn new(column: impl Into<String>, kind: DimensionType) -> Self {
        Self {
            column: column.into(),
            kind,
            treat_as_alphanum: false,
            date_mode: None,
        }
    }

    /// Numerical dimension.
    #[must_use]
    pub fn numerical(column: impl Into<String>) -> Self {
        Self::new(column, DimensionType::Numerical)
    }

    /// Categorical dimension.
    #[must_use]
    pub fn alphanum(column: impl Into<String>) -> Self {
        Self::new(column, DimensionType::Alphanum)
    }

    /// Date dimension with the given date mode.
    #[must_use]
    pub fn date(column: impl Into<String>, date_mode: impl Into<String>) -> Self {
        Self {
            date_mode: Some(date_mode.into()),
            ..Self::new(column, DimensionType::Date)
        }
    }

    /// Display a numerical column as categories.
    #[must_use]
    pub const fn treat_as_alphanum(mut self, yes: bool) -> Self {
        self.treat_as_alphanum = yes;
        self
    }

    /// NUMERICAL and not displayed as categories.
    #[must_use]
    pub fn is_true_numerical(&self) -> bool {
        self.kind == DimensionType::Numerical && !self.treat_as_alphanum
    }

    /// ALPHANUM, or NUMERICAL displayed as categories.
    #[must_use]
    pub fn is_alphanum_like(&self) -> bool {
        self.kind == DimensionType::Alphanum
            || (self.kind == DimensionType::Numerical && self.treat_as_alphanum)
    }

    /// DATE binned into discrete periods.
    #[must_use]
    pub fn is_discrete_date(&self) -> bool {
        self.kind == DimensionType::Date && self.date_mode.as_deref() != Some(DATE_MODE_RANGE)
    }

    /// DATE kept as raw timestamps.
    #[must_use]
    pub fn is_date_range(&self) -> bool {
        self.kind == DimensionType::Date && self.date_mode.as_deref() == Some(DATE_MODE_RANGE)
    }

    /// Value bag used for color, size and tooltip values.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        if self.is_true_numerical() {
            ValueKind::Numeric
        } else if self.is_date_range() {
            ValueKind::Timestamp
        } else {
            ValueKind::Bin
        }
    }

    /// Value bag used to place the dimension on an axis.
    pub fn axis_kind(&self, role: &'static str) -> Result<ValueKind> {
        match &self.kind {
            DimensionType::Numerical => Ok(ValueKind::Numeric),
            DimensionType::Alphanum => Ok(ValueKind::Bin),
            DimensionType::Date => Ok(ValueKind::Timestamp),
            DimensionType::Other(kind) => Err(RenderError::UnsupportedDimensionType {
                role,
                kind: kind.clone(),
            }),
        }
    }

    /// Same column shown the same way.
    #[must_use]
    pub fn same_field(&self, other: &Self) -> bool {
        self.column == other.column && self.date_mode == other.date_mode
    }

    /// Human label: the column, plus the period for binned dates.
    #[must_use]
    pub fn label(&self) -> String {
        match self.date_mode.as_deref() {
            Some(mode) if self.is_discrete_date() => {
                format!("{} ({})", self.column, date_mode_label(mode))
            }
            _ => self.column.clone(),
        }
    }
}

fn date_mode_label(mode: &str) -> String {
    mode.to_ascii_lowercase().replace('_', " ")
}

/// Marker style when no shape dimension is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SingleShape {
    /// Filled disk
    #[default]
    FilledCircle,
    /// Outlined circle
    EmptyCircle,
}

/// Color used when no color dimension is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOptions {
    /// CSS color of every point
    pub single_color: String,
    /// Alpha applied to point colors
    pub transparency: f32,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            single_color: "#659a88".to_string(),
            transparency: 0.5,
        }
    }
}

impl ColorOptions {
    /// The single point color with transparency applied.
    pub fn resolved_single_color(&self) -> Result<Color> {
        Ok(Color::parse_css(&self.single_color)?.with_alpha(self.transparency))
    }
}

/// Marker sizing and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BubblesOptions {
    /// Radius of unsized points, and base of the size scale
    pub default_radius: f32,
    /// Marker style when no shape dimension is set
    pub single_shape: SingleShape,
}

impl Default for BubblesOptions {
    fn default() -> Self {
        Self {
            default_radius: 5.0,
            single_shape: SingleShape::FilledCircle,
        }
    }
}

/// Axis display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScatterOptions {
    /// Use the same units per pixel on both axes
    pub equal_scales: bool,
    /// Draw the y = x line
    pub identity_line: bool,
}

/// A scatter chart definition.
///
/// Dimension roles are lists of zero or one element, as stored upstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefinition {
    /// X axis dimension
    #[serde(default)]
    pub ua_x_dimension: Vec<UaDimension>,
    /// Y axis dimension
    #[serde(default)]
    pub ua_y_dimension: Vec<UaDimension>,
    /// Color dimension
    #[serde(default)]
    pub ua_color: Vec<UaDimension>,
    /// Size dimension
    #[serde(default)]
    pub ua_size: Vec<UaDimension>,
    /// Shape dimension
    #[serde(default)]
    pub ua_shape: Vec<UaDimension>,
    /// Extra tooltip fields
    #[serde(default)]
    pub ua_tooltip: Vec<UaDimension>,
    /// Single color options
    #[serde(default)]
    pub color_options: ColorOptions,
    /// Marker options
    #[serde(default)]
    pub bubbles_options: BubblesOptions,
    /// Axis options
    #[serde(default)]
    pub scatter_options: ScatterOptions,
    /// X axis title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_label: Option<String>,
    /// Y axis title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_label: Option<String>,
}

impl ChartDefinition {
    /// Create a definition plotting `y` against `x`.
    #[must_use]
    pub fn new(x: UaDimension, y: UaDimension) -> Self {
        Self {
            ua_x_dimension: vec![x],
            ua_y_dimension: vec![y],
            ..Self::default()
        }
    }

    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a definition from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Set the color dimension.
    #[must_use]
    pub fn color(mut self, dim: UaDimension) -> Self {
        self.ua_color = vec![dim];
        self
    }

    /// Set the size dimension.
    #[must_use]
    pub fn size(mut self, dim: UaDimension) -> Self {
        self.ua_size = vec![dim];
        self
    }

    /// Set the shape dimension.
    #[must_use]
    pub fn shape(mut self, dim: UaDimension) -> Self {
        self.ua_shape = vec![dim];
        self
    }

    /// Append an extra tooltip field.
    #[must_use]
    pub fn tooltip(mut self, dim: UaDimension) -> Self {
        self.ua_tooltip.push(dim);
        self
    }

    /// Set the single color and its transparency.
    #[must_use]
    pub fn single_color(mut self, color: impl Into<String>, transparency: f32) -> Self {
        self.color_options = ColorOptions {
            single_color: color.into(),
            transparency,
        };
        self
    }

    /// Set the default marker radius.
    #[must_use]
    pub const fn default_radius(mut self, radius: f32) -> Self {
        self.bubbles_options.default_radius = radius;
        self
    }

    /// Set the marker style.
    #[must_use]
    pub const fn single_shape(mut self, shape: SingleShape) -> Self {
        self.bubbles_options.single_shape = shape;
        self
    }

    /// Set axis options.
    #[must_use]
    pub const fn scatter_options(mut self, options: ScatterOptions) -> Self {
        self.scatter_options = options;
        self
    }

    /// X axis dimension.
    pub fn x_dimension(&self) -> Result<&UaDimension> {
        self.ua_x_dimension
            .first()
            .ok_or(RenderError::MissingDimension { role: "x" })
    }

    /// Y axis dimension.
    pub fn y_dimension(&self) -> Result<&UaDimension> {
        self.ua_y_dimension
            .first()
            .ok_or(RenderError::MissingDimension { role: "y" })
    }

    /// Color dimension, if any.
    #[must_use]
    pub fn color_dimension(&self) -> Option<&UaDimension> {
        self.ua_color.first()
    }

    /// Size dimension, if any.
    #[must_use]
    pub fn size_dimension(&self) -> Option<&UaDimension> {
        self.ua_size.first()
    }

    /// Shape dimension, if any.
    #[must_use]
    pub fn shape_dimension(&self) -> Option<&UaDimension> {
        self.ua_shape.first()
    }

    /// Extra tooltip fields, in display order.
    #[must_use]
    pub fn tooltip_dimensions(&self) -> &[UaDimension] {
        &self.ua_tooltip
    }

    /// Both axes numerical, or both dates.
    #[must_use]
    pub fn compatible_axis(&self) -> bool {
        match (self.ua_x_dimension.first(), self.ua_y_dimension.first()) {
            (Some(x), Some(y)) => matches!(
                (&x.kind, &y.kind),
                (DimensionType::Numerical, DimensionType::Numerical)
                    | (DimensionType::Date, DimensionType::Date)
            ),
            _ => false,
        }
    }

    /// Color legend items exist: the color dimension is categorical or a binned date.
    #[must_use]
    pub fn has_discrete_color(&self) -> bool {
        self.color_dimension()
            .is_some_and(|d| d.is_alphanum_like() || d.is_discrete_date())
    }

    /// Check every configuration error that would abort a draw.
    pub fn validate(&self) -> Result<()> {
        self.x_dimension()?.axis_kind("x")?;
        self.y_dimension()?.axis_kind("y")?;
        if let Some(size) = self.size_dimension() {
            if size.value_kind() == ValueKind::Bin {
                return Err(RenderError::InvalidSizeEncoding {
                    column: size.column.clone(),
                });
            }
        }
        self.color_options.resolved_single_color()?;
        if !self.bubbles_options.default_radius.is_finite() {
            return Err(RenderError::Config(format!(
                "default radius must be finite, got {}",
                self.bubbles_options.default_radius
            )));
        }
        Ok(())
    }
}
