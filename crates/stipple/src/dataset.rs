//! Column-oriented point data, one parallel array per encoded channel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::definition::{ChartDefinition, UaDimension, ValueKind};
use crate::error::{Channel, RenderError, Result};

/// Numeric or timestamp values with their extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericValues {
    /// One value per record
    pub data: Vec<f64>,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl NumericValues {
    /// Wrap values, computing min and max over the finite ones.
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        let (min, max) = data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return Self {
                data,
                min: 0.0,
                max: 0.0,
            };
        }
        Self { data, min, max }
    }
}

/// Label and axis position of one categorical bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLabel {
    /// Human label
    pub label: String,
    /// Position along a categorical axis
    pub sort_order: f64,
}

/// Categorical values: one bin per record plus the bin lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalValues {
    /// One bin per record
    pub data: Vec<usize>,
    /// Bin → label and sort order
    pub sorted_mapping: Vec<BinLabel>,
}

impl CategoricalValues {
    /// Build from bins and labels; sort order follows label position.
    #[must_use]
    pub fn new<S: Into<String>>(data: Vec<usize>, labels: impl IntoIterator<Item = S>) -> Self {
        let sorted_mapping = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| BinLabel {
                label: label.into(),
                sort_order: i as f64,
            })
            .collect();
        Self {
            data,
            sorted_mapping,
        }
    }
}

/// Value bags of one channel, keyed by semantic type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    /// Raw numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<NumericValues>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<NumericValues>,
    /// Categorical bins
    #[serde(rename = "str", default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoricalValues>,
}

impl ChannelData {
    /// Channel holding numbers.
    #[must_use]
    pub fn numeric(data: Vec<f64>) -> Self {
        Self {
            num: Some(NumericValues::new(data)),
            ..Self::default()
        }
    }

    /// Channel holding epoch-millisecond timestamps.
    #[must_use]
    pub fn timestamps(data: Vec<f64>) -> Self {
        Self {
            ts: Some(NumericValues::new(data)),
            ..Self::default()
        }
    }

    /// Channel holding categorical bins.
    #[must_use]
    pub fn categorical<S: Into<String>>(
        data: Vec<usize>,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            categories: Some(CategoricalValues::new(data, labels)),
            ..Self::default()
        }
    }

    fn numeric_bag(&self, channel: Channel, kind: ValueKind) -> Result<&NumericValues> {
        let (bag, name) = match kind {
            ValueKind::Timestamp => (self.ts.as_ref(), "ts"),
            ValueKind::Numeric | ValueKind::Bin => (self.num.as_ref(), "num"),
        };
        bag.ok_or(RenderError::MissingChannel {
            channel,
            kind: name,
        })
    }

    fn category_bag(&self, channel: Channel) -> Result<&CategoricalValues> {
        self.categories.as_ref().ok_or(RenderError::MissingChannel {
            channel,
            kind: "str",
        })
    }

    /// Raw number or timestamp of record `i`.
    pub fn value(&self, channel: Channel, kind: ValueKind, i: usize) -> Result<f64> {
        let bag = self.numeric_bag(channel, kind)?;
        bag.data.get(i).copied().ok_or(RenderError::TruncatedChannel {
            channel,
            len: bag.data.len(),
            required: i + 1,
        })
    }

    /// Categorical bin of record `i`.
    pub fn bin(&self, channel: Channel, i: usize) -> Result<usize> {
        let bag = self.category_bag(channel)?;
        bag.data.get(i).copied().ok_or(RenderError::TruncatedChannel {
            channel,
            len: bag.data.len(),
            required: i + 1,
        })
    }

    /// Mapping entry of a bin.
    pub fn bin_label(&self, channel: Channel, bin: usize) -> Result<&BinLabel> {
        self.category_bag(channel)?
            .sorted_mapping
            .get(bin)
            .ok_or(RenderError::UnknownBin { channel, bin })
    }

    /// Sort order of record `i`'s bin.
    pub fn sort_order(&self, channel: Channel, i: usize) -> Result<f64> {
        let bin = self.bin(channel, i)?;
        Ok(self.bin_label(channel, bin)?.sort_order)
    }

    /// Number of categorical bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.categories
            .as_ref()
            .map_or(0, |c| c.sorted_mapping.len())
    }

    /// Extent of the numbers or timestamps.
    pub fn extent(&self, channel: Channel, kind: ValueKind) -> Result<(f64, f64)> {
        let bag = self.numeric_bag(channel, kind)?;
        Ok((bag.min, bag.max))
    }

    /// Extent of the bins' sort orders.
    pub fn sort_order_extent(&self, channel: Channel) -> Result<(f64, f64)> {
        let bag = self.category_bag(channel)?;
        let (lo, hi) = bag
            .sorted_mapping
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
                (lo.min(b.sort_order), hi.max(b.sort_order))
            });
        if lo > hi {
            Ok((0.0, 0.0))
        } else {
            Ok((lo, hi))
        }
    }

    fn len_of(&self, channel: Channel, kind: ValueKind) -> Result<usize> {
        match kind {
            ValueKind::Bin => Ok(self.category_bag(channel)?.data.len()),
            ValueKind::Numeric | ValueKind::Timestamp => {
                Ok(self.numeric_bag(channel, kind)?.data.len())
            }
        }
    }
}

/// A materialized point dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDataset {
    /// X axis channel
    pub x_axis: ChannelData,
    /// Y axis channel
    pub y_axis: ChannelData,
    /// Other channels: `color`, `size`, `shape`, `tooltip_0`, ...
    #[serde(default)]
    pub values: BTreeMap<String, ChannelData>,
    /// Number of records to draw
    pub after_filter_records: usize,
}

impl PointDataset {
    /// Create a dataset from its axes; every record is drawn.
    #[must_use]
    pub fn new(x_axis: ChannelData, y_axis: ChannelData) -> Self {
        let records = [&x_axis, &y_axis]
            .iter()
            .filter_map(|c| {
                c.num
                    .as_ref()
                    .map(|v| v.data.len())
                    .or_else(|| c.ts.as_ref().map(|v| v.data.len()))
                    .or_else(|| c.categories.as_ref().map(|v| v.data.len()))
            })
            .min()
            .unwrap_or(0);
        Self {
            x_axis,
            y_axis,
            values: BTreeMap::new(),
            after_filter_records: records,
        }
    }

    /// Parse a dataset from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a dataset from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Attach the color channel.
    #[must_use]
    pub fn with_color(mut self, data: ChannelData) -> Self {
        self.values.insert("color".to_string(), data);
        self
    }

    /// Attach the size channel.
    #[must_use]
    pub fn with_size(mut self, data: ChannelData) -> Self {
        self.values.insert("size".to_string(), data);
        self
    }

    /// Attach the shape channel.
    #[must_use]
    pub fn with_shape(mut self, data: ChannelData) -> Self {
        self.values.insert("shape".to_string(), data);
        self
    }

    /// Attach the next tooltip channel.
    #[must_use]
    pub fn with_tooltip(mut self, data: ChannelData) -> Self {
        let i = self
            .values
            .keys()
            .filter(|k| k.starts_with("tooltip_"))
            .count();
        self.values.insert(format!("tooltip_{i}"), data);
        self
    }

    /// Draw only the first `n` records.
    #[must_use]
    pub const fn records(mut self, n: usize) -> Self {
        self.after_filter_records = n;
        self
    }

    /// Look up a channel.
    pub fn channel(&self, channel: Channel) -> Result<&ChannelData> {
        let key = match channel {
            Channel::X => return Ok(&self.x_axis),
            Channel::Y => return Ok(&self.y_axis),
            Channel::Color => "color".to_string(),
            Channel::Size => "size".to_string(),
            Channel::Shape => "shape".to_string(),
            Channel::Tooltip(i) => format!("tooltip_{i}"),
        };
        self.values.get(&key).ok_or(RenderError::MissingChannel {
            channel,
            kind: "any",
        })
    }

    /// Check that every channel the definition reads holds at least
    /// `after_filter_records` values.
    pub fn validate(&self, definition: &ChartDefinition) -> Result<()> {
        let x = definition.x_dimension()?;
        let y = definition.y_dimension()?;
        self.check_len(Channel::X, x.axis_kind("x")?)?;
        self.check_len(Channel::Y, y.axis_kind("y")?)?;

        let optional: [(Channel, Option<&UaDimension>); 3] = [
            (Channel::Color, definition.color_dimension()),
            (Channel::Size, definition.size_dimension()),
            (Channel::Shape, definition.shape_dimension()),
        ];
        for (channel, dim) in optional {
            if let Some(dim) = dim {
                let kind = if channel == Channel::Shape {
                    ValueKind::Bin
                } else {
                    dim.value_kind()
                };
                self.check_len(channel, kind)?;
            }
        }
        for (i, dim) in definition.tooltip_dimensions().iter().enumerate() {
            self.check_len(Channel::Tooltip(i), dim.value_kind())?;
        }
        Ok(())
    }

    fn check_len(&self, channel: Channel, kind: ValueKind) -> Result<()> {
        let len = self.channel(channel)?.len_of(channel, kind)?;
        if len < self.after_filter_records {
            return Err(RenderError::TruncatedChannel {
                channel,
                len,
                required: self.after_filter_records,
            });
        }
        Ok(())
    }
}
