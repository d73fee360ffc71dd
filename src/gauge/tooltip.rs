use chrono::{DateTime, Duration, Local};
use plotters::style::RGBColor;
use crate::gauge::buffer::SampleSnapshot;
use crate::gauge::colors::rate_color;
use crate::gauge::geometry::{Rect, Viewport};
/// Text box metrics used to size the label without a text layout engine.
#[derive(Clone, Copy, Debug)]
struct TooltipMetrics {
    char_width: f64,
    line_height: f64,
    padding: f64,
    pointer_offset: f64,
}
impl Default for TooltipMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 15.0,
            padding: 5.0,
            pointer_offset: 12.0,
        }
    }
}
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLabel {
    pub text: String,
    pub color: RGBColor,
    pub index: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}
/// Floating readout of the frozen sample under the pointer.
pub struct InspectTooltip {
    snapshot: SampleSnapshot,
    wall_epoch: DateTime<Local>,
    metrics: TooltipMetrics,
    label: Option<TooltipLabel>,
}
impl InspectTooltip {
    /// `wall_epoch` is the wall-clock time at which sample timestamps were zero.
    pub fn new(snapshot: SampleSnapshot, wall_epoch: DateTime<Local>) -> Self {
        Self {
            snapshot,
            wall_epoch,
            metrics: TooltipMetrics::default(),
            label: None,
        }
    }
    pub fn snapshot(&self) -> &SampleSnapshot {
        &self.snapshot
    }
    pub fn label(&self) -> Option<&TooltipLabel> {
        self.label.as_ref()
    }
    pub fn hide(&mut self) {
        self.label = None;
    }
    /// Re-targets the label at the pointer position (page coordinates).
    pub fn update(&mut self, x: f64, y: f64, surface: &Rect, viewport: &Viewport) -> Option<&TooltipLabel> {
        let fraction = if surface.width > 0.0 {
            (x - surface.left) / surface.width
        } else {
            0.0
        };
        let index = self.snapshot.index_for_fraction(fraction);
        let Some((rate, timestamp)) = self.snapshot.sample(index) else {
            self.label = None;
            return None;
        };
        let text = format!("{rate:.1} fps\n{}", self.time_of_day(timestamp));
        let (width, height) = self.measure(&text);
        let (left, top) = self.place(x, y, width, height, viewport);
        self.label = Some(TooltipLabel {
            text,
            color: rate_color(rate),
            index,
            left,
            top,
            width,
            height,
        });
        self.label.as_ref()
    }
    fn time_of_day(&self, timestamp_ms: f64) -> String {
        let offset = Duration::microseconds((timestamp_ms * 1000.0) as i64);
        (self.wall_epoch + offset).format("%H:%M:%S%.3f").to_string()
    }
    fn measure(&self, text: &str) -> (f64, f64) {
        let m = &self.metrics;
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rows = text.lines().count().max(1);
        (
            columns as f64 * m.char_width + 2.0 * m.padding,
            rows as f64 * m.line_height + 2.0 * m.padding,
        )
    }
    /// Below-right of the pointer; flips above near the bottom, shifts left near the right.
    fn place(&self, x: f64, y: f64, width: f64, height: f64, viewport: &Viewport) -> (f64, f64) {
        let offset = self.metrics.pointer_offset;
        let mut left = x + offset;
        let mut top = y + offset;
        if top + height > viewport.height {
            top = y - offset - height;
        }
        if left + width > viewport.width {
            left = viewport.width - width;
        }
        (left.max(0.0), top.max(0.0))
    }
}
