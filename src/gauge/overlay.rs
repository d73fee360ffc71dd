//! The frame gauge instrument: sampling loop, mode switches and pointer handling for one surface.
//!
//! The host owns a single [`Overlay`] and drives it from its own frame callback and input
//! handlers. Nothing here is global; starting twice is a no-op.
use std::sync::mpsc::Receiver;
use std::time::Instant;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use crate::gauge::clock::{ClockSnapshot, FrameClock};
use crate::gauge::config::{ConfigPatch, OverlayConfig};
use crate::gauge::controls::{cursor_for, CursorShape, DragResizeController};
use crate::gauge::error::GaugeError;
use crate::gauge::geometry::{Edges, Rect, Viewport};
use crate::gauge::pointer::{PointerEvent, PointerState, PointerTracker};
use crate::gauge::render::{RenderFrame, RenderReport, Renderer};
use crate::gauge::style::SurfaceStyle;
use crate::gauge::surface::RasterSurface;
use crate::gauge::tooltip::{InspectTooltip, TooltipLabel};
/// Independent switches of the instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modes {
    /// Sampling loop active.
    pub run: bool,
    /// Drawing enabled. Sampling continues while this is off.
    pub render: bool,
    /// Graph frozen on a snapshot with a tooltip under the pointer.
    pub inspect: bool,
}
/// Tells the host whether to schedule another [`Overlay::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}
pub struct Overlay<S: RasterSurface> {
    clock: FrameClock,
    pointer: PointerTracker,
    pointer_events: Receiver<PointerEvent>,
    controller: DragResizeController,
    renderer: Renderer,
    surface: S,
    style: SurfaceStyle,
    modes: Modes,
    looping: bool,
    tooltip: Option<InspectTooltip>,
    armed: (Edges, bool),
    epoch: Instant,
    wall_epoch: DateTime<Local>,
}
impl<S: RasterSurface> Overlay<S> {
    /// Builds the instrument in the bottom-right corner of `viewport`.
    ///
    /// Fails if the surface cannot be sized to the configured dimensions.
    pub fn new(config: OverlayConfig, viewport: Viewport, mut surface: S) -> Result<Self, GaugeError> {
        let width = config.width.min(viewport.width).max(config.min_width);
        let height = config.height.min(viewport.height).max(config.min_height);
        let rect = Rect::new(
            (viewport.width - width).max(0.0),
            (viewport.height - height).max(0.0),
            width,
            height,
        );
        let (px_w, px_h) = pixel_size(&rect);
        if surface.size() != (px_w, px_h) {
            surface.resize(px_w, px_h)?;
        }
        let mut style = SurfaceStyle::default();
        style.merge(&config.style);
        surface.set_background(style.background());
        let clock = FrameClock::new(config.buffer_size, config.max_rate, 0.0)?;
        let mut pointer = PointerTracker::new(rect, config.tolerance, config.click_tolerance);
        let pointer_events = pointer.subscribe();
        let controller = DragResizeController::new(
            rect,
            viewport,
            config.snap_threshold,
            config.min_width,
            config.min_height,
        );
        info!(
            "frame gauge created: {}x{} surface, {} samples, max {} fps",
            px_w,
            px_h,
            clock.ring().len(),
            config.max_rate
        );
        Ok(Self {
            clock,
            pointer,
            pointer_events,
            controller,
            renderer: Renderer::new(config.readout_interval_ms, config.graph_interval_ms),
            surface,
            style,
            modes: Modes {
                run: false,
                render: true,
                inspect: false,
            },
            looping: false,
            tooltip: None,
            armed: (Edges::NONE, false),
            epoch: Instant::now(),
            wall_epoch: Local::now(),
        })
    }
    /// Enables sampling. Returns `false` if the loop was already running.
    pub fn start(&mut self) -> bool {
        self.modes.run = true;
        if self.looping {
            return false;
        }
        self.looping = true;
        info!("frame gauge started");
        true
    }
    /// Asks the loop to stop; it ends at the next tick.
    pub fn stop(&mut self) {
        self.modes.run = false;
    }
    pub fn toggle_run(&mut self) -> bool {
        if self.modes.run {
            self.stop();
        } else {
            self.start();
        }
        self.modes.run
    }
    pub fn toggle_render(&mut self) -> bool {
        self.modes.render = !self.modes.render;
        debug!("rendering {}", if self.modes.render { "on" } else { "off" });
        if self.modes.render {
            self.redraw_or_warn();
        }
        self.modes.render
    }
    /// Freezes the graph on a snapshot of the buffer, or releases it.
    pub fn toggle_inspect(&mut self) -> bool {
        self.modes.inspect = !self.modes.inspect;
        if self.modes.inspect {
            let mut tooltip = InspectTooltip::new(self.clock.ring().snapshot(), self.wall_epoch);
            let state = *self.pointer.state();
            if state.over {
                tooltip.update(
                    state.page_x,
                    state.page_y,
                    &self.controller.geometry(),
                    &self.controller.viewport(),
                );
            }
            self.tooltip = Some(tooltip);
        } else {
            self.tooltip = None;
        }
        info!("inspect mode {}", if self.modes.inspect { "on" } else { "off" });
        self.redraw_or_warn();
        self.modes.inspect
    }
    /// Milliseconds since construction on the monotonic clock.
    pub fn elapsed_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
    pub fn tick_now(&mut self) -> LoopControl {
        let now = self.elapsed_ms();
        self.tick(now)
    }
    /// One iteration of the sampling loop at time `now` (milliseconds).
    pub fn tick(&mut self, now: f64) -> LoopControl {
        if !self.modes.run {
            if self.looping {
                self.looping = false;
                info!("frame gauge stopped");
            }
            return LoopControl::Stop;
        }
        self.looping = true;
        self.clock.tick(now);
        if self.modes.render {
            if let Err(e) = self.draw(false) {
                warn!("frame gauge render failed: {e}");
            }
        }
        LoopControl::Continue
    }
    /// Redraws every element immediately.
    pub fn redraw(&mut self) -> Result<RenderReport, GaugeError> {
        self.draw(true)
    }
    fn redraw_or_warn(&mut self) {
        if let Err(e) = self.draw(true) {
            warn!("frame gauge redraw failed: {e}");
        }
    }
    fn draw(&mut self, force: bool) -> Result<RenderReport, GaugeError> {
        let state = self.pointer.state();
        let frame = RenderFrame {
            now: self.clock.now(),
            rate: self.clock.rate(),
            average: self.clock.average(),
            max_rate: self.clock.max_rate(),
            frozen: self.modes.inspect,
            edges: state.edges,
            pointer_down: state.down,
        };
        match (&self.tooltip, self.modes.inspect) {
            (Some(tooltip), true) => {
                let bars = tooltip.snapshot().rates.iter().copied();
                self.renderer.draw(&mut self.surface, &frame, bars, force)
            }
            _ => self
                .renderer
                .draw(&mut self.surface, &frame, self.clock.ring().rates(), force),
        }
    }
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.moved(x, y);
        self.dispatch_pointer_events();
    }
    /// Returns whether a drag or resize gesture started.
    pub fn pointer_pressed(&mut self) -> bool {
        let started = self.pointer.pressed();
        self.dispatch_pointer_events();
        started
    }
    /// Returns whether the release was a click.
    pub fn pointer_released(&mut self) -> bool {
        let click = self.pointer.released();
        self.dispatch_pointer_events();
        click
    }
    fn dispatch_pointer_events(&mut self) {
        let events: Vec<PointerEvent> = self.pointer_events.try_iter().collect();
        for event in events {
            match event {
                PointerEvent::Update(state) => self.on_pointer_update(&state),
                PointerEvent::Click(_) => {
                    self.toggle_inspect();
                }
            }
        }
    }
    fn on_pointer_update(&mut self, state: &PointerState) {
        let armed = (state.edges, state.down);
        let mut force = armed != self.armed;
        self.armed = armed;
        if self.controller.apply(state) {
            if let Err(e) = self.sync_geometry() {
                warn!("could not resize frame gauge surface: {e}");
            }
            force = true;
        }
        if let Some(tooltip) = &mut self.tooltip {
            if state.over && !state.down {
                tooltip.update(
                    state.page_x,
                    state.page_y,
                    &self.controller.geometry(),
                    &self.controller.viewport(),
                );
            } else {
                tooltip.hide();
            }
        }
        if force && self.modes.render {
            self.redraw_or_warn();
        }
    }
    fn sync_geometry(&mut self) -> Result<(), GaugeError> {
        let rect = self.controller.geometry();
        self.pointer.set_rect(rect);
        let size = pixel_size(&rect);
        if self.surface.size() != size {
            debug!("surface resized to {}x{}", size.0, size.1);
            self.surface.resize(size.0, size.1)?;
        }
        Ok(())
    }
    /// Applies a partial configuration and redraws.
    pub fn config(&mut self, patch: ConfigPatch) -> Result<(), GaugeError> {
        if let Some(size) = patch.buffer_size {
            self.set_buffer_size(size);
        }
        if patch.width.is_some() || patch.height.is_some() {
            self.controller.set_size(patch.width, patch.height);
            self.sync_geometry()?;
        }
        if let Some(style) = patch.style {
            let applied = self.style.merge(&style);
            self.surface.set_background(self.style.background());
            debug!("merged {applied} style properties");
        }
        info!("frame gauge configuration applied");
        self.redraw().map(|_| ())
    }
    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) -> Result<(), GaugeError> {
        if self.controller.set_size(width, height) {
            self.sync_geometry()?;
            self.redraw()?;
        }
        Ok(())
    }
    pub fn set_buffer_size(&mut self, size: usize) {
        self.clock.resize(size);
        info!("sample buffer resized to {}", self.clock.ring().len());
    }
    /// Updates the window bounds used for snapping, clamping and tooltip placement.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.controller.viewport() == viewport || !self.controller.set_viewport(viewport) {
            return;
        }
        if let Err(e) = self.sync_geometry() {
            warn!("could not resize frame gauge surface: {e}");
        }
        if self.modes.render {
            self.redraw_or_warn();
        }
    }
    pub fn rate(&self) -> f64 {
        self.clock.rate()
    }
    pub fn average(&self) -> f64 {
        self.clock.average()
    }
    pub fn snapshot(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }
    pub fn buffer_size(&self) -> usize {
        self.clock.ring().len()
    }
    pub fn geometry(&self) -> Rect {
        self.controller.geometry()
    }
    pub fn modes(&self) -> Modes {
        self.modes
    }
    pub fn is_looping(&self) -> bool {
        self.looping
    }
    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }
    pub fn tooltip_label(&self) -> Option<&TooltipLabel> {
        self.tooltip.as_ref().and_then(InspectTooltip::label)
    }
    pub fn pointer_state(&self) -> &PointerState {
        self.pointer.state()
    }
    /// While true the host should forward pointer input from the whole window.
    pub fn is_capturing(&self) -> bool {
        self.pointer.is_capturing()
    }
    pub fn cursor(&self) -> CursorShape {
        cursor_for(self.pointer.state())
    }
    /// Additional receiver of every pointer transition, e.g. for host-side cursor handling.
    pub fn subscribe_pointer(&mut self) -> Receiver<PointerEvent> {
        self.pointer.subscribe()
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
fn pixel_size(rect: &Rect) -> (u32, u32) {
    (
        rect.width.round().max(1.0) as u32,
        rect.height.round().max(1.0) as u32,
    )
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::colors::GOOD;
    use crate::gauge::surface::testing::{DrawOp, RecordingSurface};
    const FRAME: f64 = 1000.0 / 60.0;
    fn overlay(buffer_size: usize) -> Overlay<RecordingSurface> {
        let config = OverlayConfig {
            buffer_size,
            ..OverlayConfig::default()
        };
        Overlay::new(config, Viewport::new(1000.0, 800.0), RecordingSurface::new(1, 1)).unwrap()
    }
    #[test]
    fn anchored_bottom_right_and_sized() {
        let o = overlay(8);
        assert_eq!(o.geometry(), Rect::new(800.0, 720.0, 200.0, 80.0));
        assert_eq!(o.surface().size(), (200, 80));
        assert!(!o.modes().run);
    }
    #[test]
    fn invalid_settings_abort_construction() {
        let config = OverlayConfig {
            max_rate: -1.0,
            ..OverlayConfig::default()
        };
        let result = Overlay::new(config, Viewport::new(1000.0, 800.0), RecordingSurface::new(1, 1));
        assert!(matches!(result, Err(GaugeError::InvalidMaxRate)));
        let tiny = Overlay::new(
            OverlayConfig::default(),
            Viewport::new(0.0, 0.0),
            RecordingSurface::new(1, 1),
        );
        assert!(tiny.is_ok());
    }
    #[test]
    fn zero_sized_config_is_raised_to_minimums() {
        let config = OverlayConfig::from_json(r#"{ "width": 0, "height": 0 }"#).unwrap();
        let surface = crate::gauge::surface::BitmapSurface::new(1, 1, config.style.background()).unwrap();
        let o = Overlay::new(config, Viewport::new(1000.0, 800.0), surface).unwrap();
        assert_eq!(o.geometry(), Rect::new(850.0, 750.0, 150.0, 50.0));
        assert_eq!(o.surface().size(), (150, 50));
    }
    #[test]
    fn start_is_idempotent_and_stop_is_cooperative() {
        let mut o = overlay(8);
        assert!(o.start());
        assert!(!o.start());
        assert_eq!(o.tick(0.0), LoopControl::Continue);
        o.stop();
        assert!(o.is_looping());
        assert_eq!(o.tick(FRAME), LoopControl::Stop);
        assert!(!o.is_looping());
        assert_eq!(o.tick(2.0 * FRAME), LoopControl::Stop);
        assert!(o.start());
        assert_eq!(o.tick(3.0 * FRAME), LoopControl::Continue);
    }
    #[test]
    fn sampling_continues_while_rendering_is_off() {
        let mut o = overlay(8);
        o.start();
        o.toggle_render();
        let drawn_before = o.surface().ops.len();
        o.tick(0.0);
        o.tick(100.0);
        assert_eq!(o.surface().ops.len(), drawn_before);
        assert!((o.rate() - 10.0).abs() < 1e-9);
        assert!(o.average() < 60.0);
    }
    #[test]
    fn inspect_freezes_graph_while_sampling_continues() {
        let mut o = overlay(4);
        o.start();
        o.tick(0.0);
        o.toggle_inspect();
        o.tick(1000.0);
        assert!(o.snapshot().samples.rates.iter().all(|r| *r == 1.0));
        o.surface_mut().take();
        let report = o.redraw().unwrap();
        assert!(report.graph);
        let ops = &o.surface().ops;
        assert!(ops.contains(&DrawOp::Rect((0, 20), (49, 79), GOOD)));
        assert!(!ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect((0, 79), (49, 79), _))));
        assert!(o.modes().inspect);
        o.toggle_inspect();
        assert!(o.tooltip_label().is_none());
    }
    #[test]
    fn click_toggles_inspect_and_tooltip_follows_pointer() {
        let mut o = overlay(4);
        o.start();
        o.tick(0.0);
        o.pointer_moved(900.0, 760.0);
        assert!(o.pointer_pressed());
        assert!(o.is_capturing());
        assert!(o.pointer_released());
        assert!(o.modes().inspect);
        let label = o.tooltip_label().unwrap();
        assert_eq!(label.index, 2);
        assert!(label.text.starts_with("60.0 fps\n"));
        o.pointer_moved(10.0, 10.0);
        assert!(o.tooltip_label().is_none());
        assert!(o.modes().inspect);
    }
    #[test]
    fn drag_moves_surface_without_touching_samples() {
        let mut o = overlay(4);
        let before = o.snapshot().samples;
        o.pointer_moved(900.0, 760.0);
        o.pointer_pressed();
        o.pointer_moved(500.0, 400.0);
        assert_eq!(o.geometry(), Rect::new(400.0, 360.0, 200.0, 80.0));
        assert!(!o.pointer_released());
        assert!(!o.modes().inspect);
        assert_eq!(o.snapshot().samples, before);
        o.pointer_moved(500.0, 400.0);
        assert_eq!(o.cursor(), CursorShape::Pointer);
    }
    #[test]
    fn edge_resize_resizes_surface() {
        let mut o = overlay(4);
        o.pointer_moved(801.0, 760.0);
        assert_eq!(o.cursor(), CursorShape::ResizeHorizontal);
        o.pointer_pressed();
        o.pointer_moved(701.0, 760.0);
        o.pointer_released();
        assert_eq!(o.geometry(), Rect::new(700.0, 720.0, 300.0, 80.0));
        assert_eq!(o.surface().size(), (300, 80));
    }
    #[test]
    fn config_patch_merges() {
        let mut o = overlay(4);
        let patch = ConfigPatch::from_json(
            r##"{ "bufferSize": 0, "width": 400, "style": { "backgroundColor": "#102030", "top": "0" } }"##,
        )
        .unwrap();
        o.config(patch).unwrap();
        assert_eq!(o.buffer_size(), 1);
        assert_eq!(o.geometry().width, 400.0);
        assert_eq!(o.surface().size(), (400, 80));
        assert_eq!(o.style().len(), 1);
        assert_eq!(
            o.surface().background,
            Some(plotters::style::RGBColor(0x10, 0x20, 0x30))
        );
        o.set_buffer_size(16);
        assert_eq!(o.snapshot().samples.len(), 16);
    }
    #[test]
    fn config_grow_keeps_surface_on_screen() {
        let mut o = overlay(4);
        o.config(ConfigPatch::from_json(r#"{ "width": 400, "height": 300 }"#).unwrap())
            .unwrap();
        let g = o.geometry();
        assert_eq!(g, Rect::new(600.0, 500.0, 400.0, 300.0));
        assert!(g.right() <= 1000.0 && g.bottom() <= 800.0);
        assert_eq!(o.surface().size(), (400, 300));
        o.set_size(Some(5000.0), None).unwrap();
        assert_eq!((o.geometry().left, o.geometry().width), (0.0, 1000.0));
    }
    #[test]
    fn window_shrink_refits_surface() {
        let mut o = overlay(4);
        o.set_viewport(Viewport::new(600.0, 400.0));
        assert_eq!(o.geometry(), Rect::new(400.0, 320.0, 200.0, 80.0));
        o.set_viewport(Viewport::new(120.0, 400.0));
        let g = o.geometry();
        assert_eq!((g.left, g.width), (0.0, 150.0));
        assert_eq!(o.surface().size(), (150, 80));
        o.pointer_moved(75.0, 360.0);
        o.pointer_pressed();
        o.pointer_moved(110.0, 360.0);
        assert!(o.geometry().left >= 0.0);
    }
    #[test]
    fn extra_subscribers_see_transitions() {
        let mut o = overlay(4);
        let rx = o.subscribe_pointer();
        o.pointer_moved(900.0, 760.0);
        o.pointer_pressed();
        o.pointer_released();
        let clicks = rx
            .try_iter()
            .filter(|e| matches!(e, PointerEvent::Click(_)))
            .count();
        assert_eq!(clicks, 1);
    }
}
