//! Scatter renderer: draws every record, indexes the drawn markers for
//! hover hit-testing, and drives the tooltip and legend focus.

use std::time::Instant;

use log::{debug, info, warn};
use stipple_core::{Canvas, Color, Event, Paint, Point, Rect, Size, StrokeStyle, TextStyle};

use crate::chart_base::{ChartBase, RenderOptions};
use crate::color_scale::{ColorCache, ColorKey};
use crate::dataset::PointDataset;
use crate::definition::{ChartDefinition, SingleShape};
use crate::encode::{Encoding, GLYPH_FONT};
use crate::error::{Channel, RenderError, Result};
use crate::format::{MeasureFormatter, SmartNumber};
use crate::legend::{ChartHandler, FocusTarget, Legend, LegendItem};
use crate::quadtree::{Hit, IndexError, IndexedPoint, QuadTree};
use crate::tooltip::{compose, Tooltip, TooltipLayout};

/// Records between two progress log lines.
const PROGRESS_EVERY: usize = 10_000;

/// Stroke width of empty-circle markers, in device pixels.
const EMPTY_CIRCLE_STROKE: f32 = 3.0;

/// Color of the y = x reference line.
const IDENTITY_LINE_COLOR: Color = Color {
    r: 0x77 as f32 / 255.0,
    g: 0x77 as f32 / 255.0,
    b: 0x77 as f32 / 255.0,
    a: 1.0,
};

/// How a marker is painted in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Normal,
    Faded,
}

/// Scatter chart renderer over one canvas.
///
/// One instance owns its canvas, index, color cache and tooltip; nothing is
/// shared between charts.
#[derive(Debug)]
pub struct ScatterRenderer<C: Canvas> {
    canvas: C,
    definition: ChartDefinition,
    data: PointDataset,
    base: ChartBase,
    options: RenderOptions,
    encoding: Encoding,
    formatter: Box<dyn MeasureFormatter>,
    index: QuadTree,
    index_error: Option<IndexError>,
    degraded_passes: usize,
    color_cache: ColorCache,
    tooltip: Tooltip,
    handler: ChartHandler,
}

impl<C: Canvas> ScatterRenderer<C> {
    /// Prepare a chart: validate the inputs, resolve the encoding and set up
    /// the canvas. Nothing is drawn until [`render`](Self::render).
    ///
    /// # Errors
    ///
    /// Any configuration error of `definition` or `data`.
    pub fn new(
        mut canvas: C,
        definition: ChartDefinition,
        data: PointDataset,
        mut base: ChartBase,
        options: RenderOptions,
    ) -> Result<Self> {
        if !(options.pixel_ratio.is_finite() && options.pixel_ratio > 0.0) {
            return Err(RenderError::Config(format!(
                "pixel ratio must be positive, got {}",
                options.pixel_ratio
            )));
        }
        definition.validate()?;
        data.validate(&definition)?;
        let encoding = Encoding::new(&definition, &data, options.pixel_ratio)?;

        let handler = ChartHandler {
            legends: Vec::new(),
            no_tooltips: options.no_tooltips,
            compatible_axis: definition.compatible_axis(),
        };
        if handler.compatible_axis && definition.scatter_options.equal_scales {
            base.equalize_scales();
        }
        canvas.translate(0.5, 0.5);

        let index = QuadTree::new(Self::index_extent(&base, options.pixel_ratio));
        Ok(Self {
            canvas,
            definition,
            data,
            base,
            options,
            encoding,
            formatter: Box::new(SmartNumber),
            index,
            index_error: None,
            degraded_passes: 0,
            color_cache: ColorCache::new(),
            tooltip: Tooltip::new(),
            handler,
        })
    }

    /// Use another formatter for numerical tooltip values.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn MeasureFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Seed the handler, keeping legends the host already owns.
    #[must_use]
    pub fn with_handler(mut self, handler: ChartHandler) -> Self {
        let compatible_axis = self.handler.compatible_axis;
        self.handler = ChartHandler {
            compatible_axis,
            ..handler
        };
        self
    }

    fn index_extent(base: &ChartBase, pixel_ratio: f32) -> Rect {
        let area = base.data_area();
        Rect::new(
            area.x * pixel_ratio,
            area.y * pixel_ratio,
            area.width * pixel_ratio,
            area.height * pixel_ratio,
        )
    }

    /// Full render: clear, draw and index every record, then publish the
    /// legend.
    pub fn render(&mut self) -> Result<()> {
        self.clear_canvas();
        self.draw_all_points(true)?;
        self.publish_legend()
    }

    /// Clear the canvas. The identity line, when enabled, is part of the
    /// background and is redrawn immediately.
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        if self.handler.compatible_axis && self.definition.scatter_options.identity_line {
            self.draw_identity_line();
        }
    }

    fn device_point(&self, x: f64, y: f64) -> Point {
        Point::new(self.base.x_scale().apply(x) as f32, self.base.y_scale().apply(y) as f32)
            .scale(self.options.pixel_ratio)
    }

    fn draw_identity_line(&mut self) {
        let (x0, x1) = sorted(self.base.x_scale().domain());
        let (y0, y1) = sorted(self.base.y_scale().domain());
        let start = x0.max(y0);
        let end = x1.min(y1);
        if end < start {
            return;
        }
        let from = self.device_point(start, start);
        let to = self.device_point(end, end);
        self.canvas
            .stroke_line(from, to, &StrokeStyle::new(IDENTITY_LINE_COLOR, 1.0));
    }

    /// Draw every record in index order.
    ///
    /// With `initial` set the spatial index is rebuilt from the drawn
    /// markers; otherwise it is left untouched.
    pub fn draw_all_points(&mut self, initial: bool) -> Result<()> {
        self.color_cache.clear();
        let started = Instant::now();
        if initial {
            self.index
                .reset(Self::index_extent(&self.base, self.options.pixel_ratio));
            self.index_error = None;
        }
        for i in 0..self.data.after_filter_records {
            self.draw_point(i, initial, Emphasis::Normal)?;
        }
        debug!(
            "drew {} points (initial: {initial}) in {:?}",
            self.data.after_filter_records,
            started.elapsed()
        );
        Ok(())
    }

    /// Redraw every record, fading those outside color bin `bin`.
    pub fn draw_all_points_with_color_focus(&mut self, bin: usize) -> Result<()> {
        self.draw_focused(Channel::Color, bin)
    }

    /// Redraw every record, fading those outside shape bin `bin`.
    pub fn draw_all_points_with_shape_focus(&mut self, bin: usize) -> Result<()> {
        self.draw_focused(Channel::Shape, bin)
    }

    fn draw_focused(&mut self, channel: Channel, bin: usize) -> Result<()> {
        self.color_cache.clear();
        info!("focus draw of {channel} bin {bin} started");
        let started = Instant::now();
        for i in 0..self.data.after_filter_records {
            let record_bin = match channel {
                Channel::Shape => self.encoding.shape_bin(&self.data, i)?,
                _ => self.encoding.color_bin(&self.data, i)?,
            };
            let emphasis = if record_bin == bin {
                Emphasis::Normal
            } else {
                Emphasis::Faded
            };
            self.draw_point(i, false, emphasis)?;
        }
        info!("focus draw of {channel} bin {bin} done");
        debug!("focus draw took {:?}", started.elapsed());
        Ok(())
    }

    fn draw_point(&mut self, i: usize, initial: bool, emphasis: Emphasis) -> Result<()> {
        let position = self.encoding.position(
            &self.data,
            i,
            self.base.x_scale(),
            self.base.y_scale(),
        )?;
        let radius = self.encoding.radius(&self.data, i)?;
        if radius.is_nan() || radius <= 0.0 {
            return Ok(());
        }

        let color = match emphasis {
            Emphasis::Faded => self.encoding.fade_color(),
            Emphasis::Normal => self.encoding.color(
                &self.data,
                i,
                self.base.color_scale(),
                &mut self.color_cache,
            )?,
        };

        if initial && self.index_error.is_none() {
            let point = IndexedPoint {
                position,
                record: i,
                radius,
                color,
            };
            if let Err(err) = self.index.insert(point) {
                warn!("hover index degraded, hit-testing disabled until the next full render: {err}");
                self.index_error = Some(err);
                self.degraded_passes += 1;
            }
        }

        if i % PROGRESS_EVERY == 0 {
            info!("Draw {i}");
        }

        if let Some(glyph) = self.encoding.glyph(&self.data, i)? {
            let style = TextStyle::glyph(GLYPH_FONT, (radius * 1.5).round(), color);
            self.canvas.fill_text(&glyph.to_string(), position, &style);
        } else if self.encoding.single_shape() == SingleShape::EmptyCircle {
            let paint = Paint::stroke(StrokeStyle::new(color, EMPTY_CIRCLE_STROKE));
            self.canvas.draw_circle(position, radius, &paint);
        } else {
            self.canvas.draw_circle(position, radius, &Paint::fill(color));
        }
        Ok(())
    }

    /// Topmost indexed marker whose disk contains `position` (device
    /// pixels). Always `None` while the index is degraded.
    #[must_use]
    pub fn hit_test(&self, position: Point) -> Option<Hit> {
        if self.index_error.is_some() {
            return None;
        }
        let size = self.canvas.size();
        self.index.find(position, size.width + size.height)
    }

    /// React to a pointer or surface event.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::MouseMove { position } => {
                self.tooltip.hide();
                let device = position.scale(self.options.pixel_ratio);
                if let Some(hit) = self.hit_test(device) {
                    self.show_tooltip(&hit.point)?;
                }
                Ok(())
            }
            Event::MouseLeave => {
                self.tooltip.hide();
                Ok(())
            }
            Event::Resize { width, height } => {
                let pixel_ratio = self.options.pixel_ratio;
                self.canvas
                    .resize(Size::new(width * pixel_ratio, height * pixel_ratio));
                self.base.resize(*width, *height);
                if self.handler.compatible_axis && self.definition.scatter_options.equal_scales {
                    self.base.equalize_scales();
                }
                self.tooltip.hide();
                self.render()
            }
            Event::MouseEnter => Ok(()),
        }
    }

    fn show_tooltip(&mut self, point: &IndexedPoint) -> Result<()> {
        if self.handler.no_tooltips {
            return Ok(());
        }
        let html = compose(
            &self.definition,
            &self.data,
            point.record,
            self.formatter.as_ref(),
        )?;
        let layout = TooltipLayout {
            canvas_origin: self.options.canvas_origin,
            canvas_width: self.canvas.size().width,
            pixel_ratio: self.options.pixel_ratio,
            tooltip_width: self.options.tooltip_width,
        };
        self.tooltip.show(html, point, &layout);
        Ok(())
    }

    /// Build the discrete legend, or clear the legends when the chart has
    /// neither a discrete color nor a shape encoding. A continuous color
    /// legend belongs to the host and is left alone.
    fn publish_legend(&mut self) -> Result<()> {
        let color_legend = self.definition.has_discrete_color();
        let shapes = self.encoding.shapes();
        if !color_legend && shapes.is_none() {
            if self.definition.color_dimension().is_none() {
                self.handler.legends.clear();
            }
            return Ok(());
        }

        let mut legend = Legend::color_discrete();
        if color_legend {
            let scale = self.base.color_scale().ok_or_else(|| {
                RenderError::Config("color dimension set but no color scale".to_string())
            })?;
            let values = self.data.channel(Channel::Color)?;
            for bin in scale.domain() {
                let label = &values.bin_label(Channel::Color, bin)?.label;
                legend.push_item(LegendItem::color(label.clone(), scale.color(ColorKey::Bin(bin)), bin));
            }
        }
        if let Some(shapes) = shapes {
            if color_legend {
                legend.push_separator();
            }
            let values = self.data.channel(Channel::Shape)?;
            for &bin in shapes.domain() {
                let label = &values.bin_label(Channel::Shape, bin)?.label;
                legend.push_item(LegendItem::shape(label.clone(), shapes.glyph(bin), bin));
            }
        }
        self.handler.legends = vec![legend];
        Ok(())
    }

    /// Focus legend entry `index`: clear and redraw isolating its bin.
    ///
    /// Returns `false` when the entry is not a focusable item.
    pub fn focus_legend_item(&mut self, index: usize) -> Result<bool> {
        let target = self
            .handler
            .legends
            .first_mut()
            .and_then(|legend| legend.focus(index));
        match target {
            None => Ok(false),
            Some(FocusTarget::Color(bin)) => {
                self.clear_canvas();
                self.draw_all_points_with_color_focus(bin)?;
                Ok(true)
            }
            Some(FocusTarget::Shape(bin)) => {
                self.clear_canvas();
                self.draw_all_points_with_shape_focus(bin)?;
                Ok(true)
            }
        }
    }

    /// Unfocus legend entry `index`: clear and redraw every record normally.
    ///
    /// Returns `false` when the entry was not focused.
    pub fn unfocus_legend_item(&mut self, index: usize) -> Result<bool> {
        let unfocused = self
            .handler
            .legends
            .first_mut()
            .is_some_and(|legend| legend.unfocus(index));
        if unfocused {
            self.clear_canvas();
            self.draw_all_points(false)?;
        }
        Ok(unfocused)
    }

    /// The canvas.
    #[must_use]
    pub const fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Give the canvas back.
    #[must_use]
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Handler state: legends, tooltip switch, axis compatibility.
    #[must_use]
    pub const fn handler(&self) -> &ChartHandler {
        &self.handler
    }

    /// Mutable handler state.
    pub fn handler_mut(&mut self) -> &mut ChartHandler {
        &mut self.handler
    }

    /// Tooltip state.
    #[must_use]
    pub const fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Chart frame.
    #[must_use]
    pub const fn base(&self) -> &ChartBase {
        &self.base
    }

    /// Resolved encoding.
    #[must_use]
    pub const fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// The spatial index as of the last full render.
    #[must_use]
    pub const fn index(&self) -> &QuadTree {
        &self.index
    }

    /// Why the index stopped accepting points in the last full render.
    #[must_use]
    pub const fn index_error(&self) -> Option<&IndexError> {
        self.index_error.as_ref()
    }

    /// Number of full renders whose index degraded.
    #[must_use]
    pub const fn degraded_passes(&self) -> usize {
        self.degraded_passes
    }

    /// Colors resolved during the last pass.
    #[must_use]
    pub const fn color_cache(&self) -> &ColorCache {
        &self.color_cache
    }
}

fn sorted((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_base::Margins;
    use crate::color_scale::OrdinalColorScale;
    use crate::dataset::ChannelData;
    use crate::definition::{ScatterOptions, UaDimension};
    use crate::legend::LegendEntry;
    use crate::scale::LinearScale;
    use stipple_core::{DrawCommand, RecordingCanvas};

    fn options() -> RenderOptions {
        RenderOptions {
            pixel_ratio: 1.0,
            ..RenderOptions::default()
        }
    }

    fn identity_base() -> ChartBase {
        ChartBase::new(
            100.0,
            100.0,
            Margins::ZERO,
            Box::new(LinearScale::identity(100.0)),
            Box::new(LinearScale::identity(100.0)),
        )
    }

    fn definition() -> ChartDefinition {
        ChartDefinition::new(UaDimension::numerical("x"), UaDimension::numerical("y"))
    }

    fn data() -> PointDataset {
        PointDataset::new(
            ChannelData::numeric(vec![10.0, 50.0, 90.0]),
            ChannelData::numeric(vec![10.0, 50.0, 90.0]),
        )
    }

    fn renderer(def: ChartDefinition, data: PointDataset) -> ScatterRenderer<RecordingCanvas> {
        ScatterRenderer::new(
            RecordingCanvas::new(100.0, 100.0),
            def,
            data,
            identity_base(),
            options(),
        )
        .unwrap()
    }

    fn circles(canvas: &RecordingCanvas) -> Vec<&DrawCommand> {
        canvas
            .frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .collect()
    }

    // ===== Setup Tests =====

    #[test]
    fn test_new_translates_half_pixel() {
        let chart = renderer(definition(), data());
        assert_eq!(
            chart.canvas().commands(),
            &[DrawCommand::Translate { dx: 0.5, dy: 0.5 }]
        );
        assert!(chart.handler().compatible_axis);
    }

    #[test]
    fn test_new_rejects_bad_pixel_ratio() {
        let err = ScatterRenderer::new(
            RecordingCanvas::new(100.0, 100.0),
            definition(),
            data(),
            identity_base(),
            RenderOptions {
                pixel_ratio: 0.0,
                ..RenderOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_new_rejects_truncated_channel() {
        let data = data().records(5);
        let err = ScatterRenderer::new(
            RecordingCanvas::new(100.0, 100.0),
            definition(),
            data,
            identity_base(),
            options(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::TruncatedChannel { .. }));
    }

    // ===== Drawing Tests =====

    #[test]
    fn test_render_draws_and_indexes_every_record() {
        let mut chart = renderer(definition(), data());
        chart.render().unwrap();
        assert_eq!(circles(chart.canvas()).len(), 3);
        assert_eq!(chart.index().len(), 3);
        assert!(chart.handler().legends.is_empty());
    }

    #[test]
    fn test_zero_radius_is_skipped() {
        let mut chart = renderer(definition().default_radius(0.0), data());
        chart.render().unwrap();
        assert!(circles(chart.canvas()).is_empty());
        assert!(chart.index().is_empty());
    }

    #[test]
    fn test_empty_circle_style() {
        let def = definition().single_shape(SingleShape::EmptyCircle);
        let mut chart = renderer(def, data());
        chart.render().unwrap();
        let drawn = circles(chart.canvas());
        let DrawCommand::Circle { paint, .. } = drawn[0] else {
            panic!("expected a circle");
        };
        assert!(paint.fill.is_none());
        assert_eq!(paint.stroke.unwrap().width, 3.0);
    }

    #[test]
    fn test_shape_draws_glyphs() {
        let def = definition().shape(UaDimension::alphanum("kind"));
        let data = data().with_shape(ChannelData::categorical(vec![1, 0, 1], ["a", "b"]));
        let mut chart = renderer(def, data);
        chart.render().unwrap();
        let texts: Vec<_> = chart
            .canvas()
            .frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, style, .. } => Some((content.clone(), style.size)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0], ("\u{f111}".to_string(), 8.0));
        assert_eq!(texts[1].0, "\u{f067}");
    }

    #[test]
    fn test_identity_line_drawn_after_clear() {
        let def = definition().scatter_options(ScatterOptions {
            equal_scales: false,
            identity_line: true,
        });
        let mut chart = renderer(def, data());
        chart.render().unwrap();
        let frame = chart.canvas().frame();
        assert_eq!(
            frame[0],
            DrawCommand::Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(100.0, 100.0),
                stroke: StrokeStyle::new(IDENTITY_LINE_COLOR, 1.0),
            }
        );
    }

    #[test]
    fn test_identity_line_needs_compatible_axes() {
        let def = ChartDefinition::new(UaDimension::numerical("x"), UaDimension::alphanum("y"))
            .scatter_options(ScatterOptions {
                equal_scales: false,
                identity_line: true,
            });
        let data = PointDataset::new(
            ChannelData::numeric(vec![1.0]),
            ChannelData::categorical(vec![0], ["a"]),
        );
        let mut chart = renderer(def, data);
        chart.render().unwrap();
        assert!(!chart.handler().compatible_axis);
        assert!(!chart
            .canvas()
            .frame()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    // ===== Degraded Index Tests =====

    #[test]
    fn test_non_finite_position_degrades_index() {
        let data = PointDataset::new(
            ChannelData::numeric(vec![10.0, f64::NAN, 90.0]),
            ChannelData::numeric(vec![10.0, 50.0, 90.0]),
        );
        let mut chart = renderer(definition(), data);
        chart.render().unwrap();
        assert_eq!(circles(chart.canvas()).len(), 3);
        assert!(matches!(chart.index_error(), Some(IndexError::NonFinite { record: 1, .. })));
        assert_eq!(chart.index().len(), 1);
        assert_eq!(chart.degraded_passes(), 1);
        assert!(chart.hit_test(Point::new(10.0, 10.0)).is_none());

        chart.render().unwrap();
        assert_eq!(chart.degraded_passes(), 2);
    }

    // ===== Legend Tests =====

    fn colored() -> (ChartDefinition, PointDataset) {
        let def = definition()
            .color(UaDimension::alphanum("c"))
            .shape(UaDimension::alphanum("s"));
        let data = data()
            .with_color(ChannelData::categorical(vec![0, 1, 0], ["red", "blue"]))
            .with_shape(ChannelData::categorical(vec![2, 2, 0], ["x", "y", "z"]));
        (def, data)
    }

    #[test]
    fn test_legend_color_then_separator_then_shapes() {
        let (def, data) = colored();
        let base = identity_base().with_color_scale(Box::new(OrdinalColorScale::category10(2, 0.5)));
        let mut chart =
            ScatterRenderer::new(RecordingCanvas::new(100.0, 100.0), def, data, base, options())
                .unwrap();
        chart.render().unwrap();
        let legend = &chart.handler().legends[0];
        assert_eq!(legend.entries.len(), 5);
        assert_eq!(legend.item(0).unwrap().label, "red");
        assert_eq!(legend.item(1).unwrap().label, "blue");
        assert_eq!(legend.entries[2], LegendEntry::Separator);
        assert_eq!(legend.item(3).unwrap().label, "z");
        assert_eq!(legend.item(4).unwrap().label, "x");
        assert_eq!(legend.item(3).unwrap().shape, Some('\u{f111}'));
    }

    #[test]
    fn test_continuous_color_keeps_host_legends() {
        let def = definition().color(UaDimension::numerical("c"));
        let data = data().with_color(ChannelData::numeric(vec![1.0, 2.0, 3.0]));
        let base = ChartBase::fit(&def, &data, 100.0, 100.0).unwrap();
        let host = ChartHandler {
            legends: vec![Legend::color_discrete()],
            ..ChartHandler::default()
        };
        let mut chart =
            ScatterRenderer::new(RecordingCanvas::new(200.0, 200.0), def, data, base, options())
                .unwrap()
                .with_handler(host);
        chart.render().unwrap();
        assert_eq!(chart.handler().legends.len(), 1);
        assert!(chart.handler().compatible_axis);
    }

    #[test]
    fn test_focus_fades_other_bins() {
        let (def, data) = colored();
        let base = identity_base().with_color_scale(Box::new(OrdinalColorScale::category10(2, 0.5)));
        let mut chart =
            ScatterRenderer::new(RecordingCanvas::new(100.0, 100.0), def, data, base, options())
                .unwrap();
        chart.render().unwrap();
        let before = chart.index().len();

        assert!(chart.focus_legend_item(1).unwrap());
        let fade = chart.encoding().fade_color();
        let colors: Vec<_> = chart
            .canvas()
            .frame()
            .iter()
            .filter_map(DrawCommand::color)
            .collect();
        assert_eq!(colors[0], fade);
        assert_ne!(colors[1], fade);
        assert_eq!(colors[2], fade);
        assert_eq!(chart.index().len(), before);

        assert!(!chart.focus_legend_item(2).unwrap());
        assert!(chart.unfocus_legend_item(1).unwrap());
        assert!(!chart.unfocus_legend_item(1).unwrap());
    }

    // ===== Event Tests =====

    #[test]
    fn test_mouse_move_shows_and_hides_tooltip() {
        let mut chart = renderer(definition(), data());
        chart.render().unwrap();
        chart
            .handle_event(&Event::MouseMove {
                position: Point::new(51.0, 50.0),
            })
            .unwrap();
        assert!(chart.tooltip().is_visible());
        assert!(chart.tooltip().content().starts_with("x: <strong>50</strong>"));

        chart
            .handle_event(&Event::MouseMove {
                position: Point::new(30.0, 30.0),
            })
            .unwrap();
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn test_mouse_leave_hides_tooltip() {
        let mut chart = renderer(definition(), data());
        chart.render().unwrap();
        chart
            .handle_event(&Event::MouseMove {
                position: Point::new(10.0, 10.0),
            })
            .unwrap();
        chart.handle_event(&Event::MouseLeave).unwrap();
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn test_no_tooltips() {
        let mut chart = renderer(definition(), data());
        chart.handler_mut().no_tooltips = true;
        chart.render().unwrap();
        chart
            .handle_event(&Event::MouseMove {
                position: Point::new(10.0, 10.0),
            })
            .unwrap();
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn test_resize_rebuilds_index() {
        let def = definition();
        let data = data();
        let base = ChartBase::fit(&def, &data, 200.0, 200.0).unwrap();
        let mut chart =
            ScatterRenderer::new(RecordingCanvas::new(200.0, 200.0), def, data, base, options())
                .unwrap();
        chart.render().unwrap();
        let before = chart.index().points()[2].position;
        chart
            .handle_event(&Event::Resize {
                width: 400.0,
                height: 200.0,
            })
            .unwrap();
        let after = chart.index().points()[2].position;
        assert!(after.x > before.x);
        assert_eq!(chart.canvas().clear_count(), 2);
    }

    #[test]
    fn test_resize_places_tooltip_against_new_width() {
        let base = ChartBase::new(
            200.0,
            200.0,
            Margins::ZERO,
            Box::new(LinearScale::new((0.0, 400.0), (0.0, 200.0))),
            Box::new(LinearScale::new((0.0, 200.0), (200.0, 0.0))),
        );
        let data = PointDataset::new(
            ChannelData::numeric(vec![200.0]),
            ChannelData::numeric(vec![100.0]),
        );
        let mut chart =
            ScatterRenderer::new(RecordingCanvas::new(200.0, 200.0), definition(), data, base, options())
                .unwrap();
        chart.render().unwrap();
        chart
            .handle_event(&Event::Resize {
                width: 800.0,
                height: 200.0,
            })
            .unwrap();
        assert_eq!(chart.canvas().size(), Size::new(800.0, 200.0));

        // x = 200 of 800: left half, so the box opens to the right.
        chart
            .handle_event(&Event::MouseMove {
                position: Point::new(200.0, 100.0),
            })
            .unwrap();
        assert!(chart.tooltip().is_visible());
        assert_eq!(chart.tooltip().position(), Point::new(200.0, 100.0));
    }
}
