use plotters::style::RGBColor;
use crate::gauge::colors::{rate_color, BAD, GOOD};
use crate::gauge::error::GaugeError;
use crate::gauge::geometry::Edges;
use crate::gauge::surface::{Point, RasterSurface};
const READOUT_HEIGHT: i32 = 24;
const READOUT_FONT_PX: u32 = 15;
const RATE_TEXT_AT: Point = (1, 2);
const AVERAGE_TEXT_AT: Point = (50, 2);
const GRAPH_MARGIN_TOP: i32 = 20;
/// Smallest bar, as a fraction of the graph height, so a zero reading stays visible.
const MIN_BAR_FRACTION: f64 = 0.02;
const EDGE_STRIP_PX: i32 = 3;
const EDGE_HIGHLIGHT: RGBColor = RGBColor(0xff, 0x00, 0x00);
/// Limits how often one element is redrawn.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: f64,
    last: Option<f64>,
}
impl Throttle {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: None,
        }
    }
    /// Returns whether the element may draw at `now`, and records it if so.
    pub fn ready(&mut self, now: f64, force: bool) -> bool {
        if !force {
            if let Some(last) = self.last {
                if now - last < self.interval {
                    return false;
                }
            }
        }
        self.last = Some(now);
        true
    }
}
/// Inputs for one render pass, apart from the bar values.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame {
    pub now: f64,
    pub rate: f64,
    pub average: f64,
    pub max_rate: f64,
    /// The graph shows a frozen snapshot rather than the live buffer.
    pub frozen: bool,
    pub edges: Edges,
    pub pointer_down: bool,
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub readout: bool,
    pub graph: bool,
}
pub struct Renderer {
    readout: Throttle,
    graph: Throttle,
}
impl Renderer {
    pub fn new(readout_interval: f64, graph_interval: f64) -> Self {
        Self {
            readout: Throttle::new(readout_interval),
            graph: Throttle::new(graph_interval),
        }
    }
    /// Draws whatever is due. `force` redraws every element regardless of its throttle.
    pub fn draw<S, I>(
        &mut self,
        surface: &mut S,
        frame: &RenderFrame,
        bars: I,
        force: bool,
    ) -> Result<RenderReport, GaugeError>
    where
        S: RasterSurface,
        I: ExactSizeIterator<Item = f64>,
    {
        let mut report = RenderReport::default();
        if self.readout.ready(frame.now, force) {
            draw_readout(surface, frame)?;
            report.readout = true;
        }
        if self.graph.ready(frame.now, force) {
            draw_graph(surface, frame.max_rate, bars)?;
            report.graph = true;
        }
        draw_state_glyph(surface, frame)?;
        if frame.edges.any() && !frame.pointer_down {
            draw_edge_strips(surface, frame.edges)?;
        }
        Ok(report)
    }
}
fn draw_readout<S: RasterSurface>(surface: &mut S, frame: &RenderFrame) -> Result<(), GaugeError> {
    let (w, _) = surface.size();
    surface.clear_rect((0, 0), (w as i32 - 1, READOUT_HEIGHT - 1))?;
    surface.fill_text(
        &format!("{:.1}", frame.rate),
        RATE_TEXT_AT,
        READOUT_FONT_PX,
        rate_color(frame.rate),
    )?;
    surface.fill_text(
        &format!("avg: {:.1}", frame.average),
        AVERAGE_TEXT_AT,
        READOUT_FONT_PX,
        rate_color(frame.average),
    )
}
fn draw_graph<S, I>(surface: &mut S, max_rate: f64, bars: I) -> Result<(), GaugeError>
where
    S: RasterSurface,
    I: ExactSizeIterator<Item = f64>,
{
    let (w, h) = surface.size();
    let (w, h) = (w as i32, h as i32);
    if h <= GRAPH_MARGIN_TOP {
        return Ok(());
    }
    surface.clear_rect((0, GRAPH_MARGIN_TOP), (w - 1, h - 1))?;
    let count = bars.len();
    if count == 0 {
        return Ok(());
    }
    let slice = w as f64 / count as f64;
    let graph_height = (h - GRAPH_MARGIN_TOP) as f64;
    for (i, rate) in bars.enumerate() {
        let fraction = (rate / max_rate).clamp(MIN_BAR_FRACTION, 1.0);
        let top = h - (fraction * graph_height).round() as i32;
        let x0 = (i as f64 * slice).round() as i32;
        let x1 = (((i + 1) as f64 * slice).round() as i32 - 1).max(x0);
        surface.fill_rect((x0, top.min(h - 1)), (x1, h - 1), rate_color(rate))?;
    }
    Ok(())
}
fn draw_state_glyph<S: RasterSurface>(surface: &mut S, frame: &RenderFrame) -> Result<(), GaugeError> {
    let (w, h) = surface.size();
    let (w, h) = (w as i32, h as i32);
    surface.clear_rect((w - 20, 5), (w - 1, 20))?;
    if frame.frozen {
        surface.fill_rect((w - 20, 5), (w - 15, 19), BAD)?;
        surface.fill_rect((w - 10, 5), (w - 5, 19), BAD)?;
        // One pixel outline in the color of the live rate.
        let outline = rate_color(frame.rate);
        surface.fill_rect((0, 0), (w - 1, 0), outline)?;
        surface.fill_rect((0, h - 1), (w - 1, h - 1), outline)?;
        surface.fill_rect((0, 0), (0, h - 1), outline)?;
        surface.fill_rect((w - 1, 0), (w - 1, h - 1), outline)?;
    } else {
        surface.fill_polygon(&[(w - 20, 5), (w - 20, 20), (w - 6, 12)], GOOD)?;
    }
    Ok(())
}
fn draw_edge_strips<S: RasterSurface>(surface: &mut S, edges: Edges) -> Result<(), GaugeError> {
    let (w, h) = surface.size();
    let (w, h) = (w as i32, h as i32);
    let t = EDGE_STRIP_PX;
    if edges.top {
        surface.fill_rect((0, 0), (w - 1, t - 1), EDGE_HIGHLIGHT)?;
    }
    if edges.bottom {
        surface.fill_rect((0, h - t), (w - 1, h - 1), EDGE_HIGHLIGHT)?;
    }
    if edges.left {
        surface.fill_rect((0, 0), (t - 1, h - 1), EDGE_HIGHLIGHT)?;
    }
    if edges.right {
        surface.fill_rect((w - t, 0), (w - 1, h - 1), EDGE_HIGHLIGHT)?;
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::colors::WARN;
    use crate::gauge::surface::testing::{DrawOp, RecordingSurface};
    fn frame(now: f64) -> RenderFrame {
        RenderFrame {
            now,
            rate: 58.04,
            average: 25.0,
            max_rate: 60.0,
            frozen: false,
            edges: Edges::NONE,
            pointer_down: false,
        }
    }
    fn bar_rects(ops: &[DrawOp]) -> Vec<(Point, Point, RGBColor)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Rect(a, b, c) if a.1 >= GRAPH_MARGIN_TOP => Some((*a, *b, *c)),
                _ => None,
            })
            .collect()
    }
    #[test]
    fn throttles_each_element_independently() {
        let mut renderer = Renderer::new(1000.0 / 3.0, 50.0);
        let mut surface = RecordingSurface::new(200, 80);
        let bars = [60.0; 4];
        let first = renderer.draw(&mut surface, &frame(0.0), bars.iter().copied(), false).unwrap();
        assert_eq!(first, RenderReport { readout: true, graph: true });
        let early = renderer.draw(&mut surface, &frame(10.0), bars.iter().copied(), false).unwrap();
        assert_eq!(early, RenderReport::default());
        let graph_only = renderer.draw(&mut surface, &frame(60.0), bars.iter().copied(), false).unwrap();
        assert_eq!(graph_only, RenderReport { readout: false, graph: true });
        let forced = renderer.draw(&mut surface, &frame(61.0), bars.iter().copied(), true).unwrap();
        assert_eq!(forced, RenderReport { readout: true, graph: true });
    }
    #[test]
    fn readout_shows_rate_and_average() {
        let mut renderer = Renderer::new(100.0, 100.0);
        let mut surface = RecordingSurface::new(200, 80);
        renderer.draw(&mut surface, &frame(0.0), std::iter::empty(), false).unwrap();
        assert_eq!(surface.texts(), vec!["58.0".to_owned(), "avg: 25.0".to_owned()]);
        assert!(surface.ops.contains(&DrawOp::Text("avg: 25.0".into(), AVERAGE_TEXT_AT, WARN)));
    }
    #[test]
    fn bars_span_width_with_floor_and_colors() {
        let mut renderer = Renderer::new(100.0, 100.0);
        let mut surface = RecordingSurface::new(200, 80);
        let bars = [60.0, 30.0, 0.0, 90.0];
        renderer.draw(&mut surface, &frame(0.0), bars.iter().copied(), false).unwrap();
        let rects = bar_rects(&surface.ops);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0], ((0, 20), (49, 79), GOOD));
        assert_eq!((rects[1].0).1, 50);
        assert_eq!((rects[2].0).1, 79);
        assert_eq!(rects[2].2, BAD);
        assert_eq!((rects[3].0).1, 20);
        assert_eq!((rects[3].1).0, 199);
    }
    #[test]
    fn frozen_glyph_and_edge_strips() {
        let mut renderer = Renderer::new(100.0, 100.0);
        let mut surface = RecordingSurface::new(200, 80);
        let mut f = frame(0.0);
        f.frozen = true;
        f.edges = Edges {
            left: true,
            top: true,
            ..Edges::NONE
        };
        renderer.draw(&mut surface, &f, std::iter::empty(), false).unwrap();
        let ops = surface.take();
        assert!(ops.contains(&DrawOp::Rect((180, 5), (185, 19), BAD)));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Polygon(..))));
        let strips = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect(_, _, c) if *c == EDGE_HIGHLIGHT))
            .count();
        assert_eq!(strips, 2);
        f.frozen = false;
        f.pointer_down = true;
        renderer.draw(&mut surface, &f, std::iter::empty(), true).unwrap();
        let ops = surface.take();
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Polygon(_, c) if *c == GOOD)));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Rect(_, _, c) if *c == EDGE_HIGHLIGHT)));
    }
}
