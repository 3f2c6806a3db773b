//! Legend items and their focus state.
//!
//! A legend entry is either an item (one color bin or one shape bin) or a
//! separator between the color and shape groups. At most one item is
//! focused at a time.

use serde::{Deserialize, Serialize};
use stipple_core::Color;

/// Kind of legend consumers should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegendType {
    /// One swatch per discrete value
    #[default]
    ColorDiscrete,
}

/// What focusing an item isolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusTarget {
    /// Records in this color bin
    Color(usize),
    /// Records in this shape bin
    Shape(usize),
}

/// One legend swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    /// Bin label
    pub label: String,
    /// Swatch color
    pub color: Color,
    /// Shape glyph, for shape items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<char>,
    /// Bin this item isolates
    pub target: FocusTarget,
    /// Whether the item is focused
    #[serde(default)]
    pub focused: bool,
}

impl LegendItem {
    /// Item for a color bin.
    #[must_use]
    pub fn color(label: impl Into<String>, color: Color, bin: usize) -> Self {
        Self {
            label: label.into(),
            color,
            shape: None,
            target: FocusTarget::Color(bin),
            focused: false,
        }
    }

    /// Item for a shape bin, drawn grey.
    #[must_use]
    pub fn shape(label: impl Into<String>, glyph: char, bin: usize) -> Self {
        Self {
            label: label.into(),
            color: Color::GREY,
            shape: Some(glyph),
            target: FocusTarget::Shape(bin),
            focused: false,
        }
    }
}

/// Legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegendEntry {
    /// A focusable swatch
    Item(LegendItem),
    /// Gap between the color and shape groups
    Separator,
}

/// A legend handed to an external legend renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Legend kind
    #[serde(rename = "type")]
    pub kind: LegendType,
    /// Entries in display order
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Empty discrete-color legend.
    #[must_use]
    pub fn color_discrete() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn push_item(&mut self, item: LegendItem) {
        self.entries.push(LegendEntry::Item(item));
    }

    /// Append a separator.
    pub fn push_separator(&mut self) {
        self.entries.push(LegendEntry::Separator);
    }

    /// Item at entry `index`, if that entry is an item.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&LegendItem> {
        match self.entries.get(index) {
            Some(LegendEntry::Item(item)) => Some(item),
            _ => None,
        }
    }

    /// Items, skipping separators.
    pub fn items(&self) -> impl Iterator<Item = &LegendItem> {
        self.entries.iter().filter_map(|e| match e {
            LegendEntry::Item(item) => Some(item),
            LegendEntry::Separator => None,
        })
    }

    /// Entry index of the focused item.
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, LegendEntry::Item(item) if item.focused))
    }

    /// Focus item `index`, unfocusing any other.
    ///
    /// Returns the target to isolate, or `None` when `index` is not an item.
    pub fn focus(&mut self, index: usize) -> Option<FocusTarget> {
        self.item(index)?;
        let mut target = None;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if let LegendEntry::Item(item) = entry {
                item.focused = i == index;
                if item.focused {
                    target = Some(item.target);
                }
            }
        }
        target
    }

    /// Unfocus item `index`. Returns whether it was focused.
    pub fn unfocus(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(LegendEntry::Item(item)) if item.focused => {
                item.focused = false;
                true
            }
            _ => false,
        }
    }
}

/// State shared with the chart's host: legends to render, tooltip switch
/// and axis compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartHandler {
    /// Legends for the host to render
    pub legends: Vec<Legend>,
    /// Suppress hover tooltips
    #[serde(default)]
    pub no_tooltips: bool,
    /// Both axes numerical, or both dates
    #[serde(default)]
    pub compatible_axis: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> Legend {
        let mut legend = Legend::color_discrete();
        legend.push_item(LegendItem::color("a", Color::BLACK, 0));
        legend.push_item(LegendItem::color("b", Color::WHITE, 1));
        legend.push_separator();
        legend.push_item(LegendItem::shape("s", '\u{f111}', 4));
        legend
    }

    #[test]
    fn test_items_skip_separator() {
        let legend = legend();
        assert_eq!(legend.entries.len(), 4);
        assert_eq!(legend.items().count(), 3);
        assert!(legend.item(2).is_none());
        assert_eq!(legend.item(3).unwrap().color, Color::GREY);
    }

    #[test]
    fn test_focus_is_exclusive() {
        let mut legend = legend();
        assert_eq!(legend.focus(0), Some(FocusTarget::Color(0)));
        assert_eq!(legend.focus(3), Some(FocusTarget::Shape(4)));
        assert_eq!(legend.focused(), Some(3));
        assert!(!legend.item(0).unwrap().focused);
    }

    #[test]
    fn test_focus_separator_is_noop() {
        let mut legend = legend();
        legend.focus(1);
        assert_eq!(legend.focus(2), None);
        assert_eq!(legend.focus(9), None);
        assert_eq!(legend.focused(), Some(1));
    }

    #[test]
    fn test_unfocus() {
        let mut legend = legend();
        assert!(!legend.unfocus(0));
        legend.focus(0);
        assert!(legend.unfocus(0));
        assert_eq!(legend.focused(), None);
    }

    #[test]
    fn test_legend_serializes_type_tag() {
        let json = serde_json::to_string(&Legend::color_discrete()).unwrap();
        assert_eq!(json, r#"{"type":"COLOR_DISCRETE","entries":[]}"#);
    }
}
