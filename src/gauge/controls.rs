use log::debug;
use crate::gauge::geometry::{Rect, Viewport};
use crate::gauge::pointer::PointerState;
/// Cursor the host should show for the current pointer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    Pointer,
    ResizeHorizontal,
    ResizeVertical,
    ResizeNwSe,
    ResizeNeSw,
}
/// Owns the surface geometry and mutates it in response to pointer gestures.
pub struct DragResizeController {
    geometry: Rect,
    viewport: Viewport,
    snap_threshold: f64,
    min_width: f64,
    min_height: f64,
}
impl DragResizeController {
    pub fn new(
        geometry: Rect,
        viewport: Viewport,
        snap_threshold: f64,
        min_width: f64,
        min_height: f64,
    ) -> Self {
        Self {
            geometry,
            viewport,
            snap_threshold,
            min_width,
            min_height,
        }
    }
    pub fn geometry(&self) -> Rect {
        self.geometry
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    /// Updates the bounds, shrinking and moving the surface back inside them.
    /// Returns whether the geometry changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let before = self.geometry;
        self.viewport = viewport;
        self.geometry.width = self.geometry.width.min(viewport.width).max(self.min_width);
        self.geometry.height = self.geometry.height.min(viewport.height).max(self.min_height);
        self.keep_in_viewport();
        before != self.geometry
    }
    /// Applies an explicit size, clamped to the viewport and the minimums.
    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) -> bool {
        let before = self.geometry;
        if let Some(w) = width.filter(|w| w.is_finite() && *w > 0.0) {
            self.geometry.width = w.min(self.viewport.width).max(self.min_width);
        }
        if let Some(h) = height.filter(|h| h.is_finite() && *h > 0.0) {
            self.geometry.height = h.min(self.viewport.height).max(self.min_height);
        }
        // Growing pushes the surface up and left instead of past the viewport.
        self.keep_in_viewport();
        before != self.geometry
    }
    fn keep_in_viewport(&mut self) {
        let g = &mut self.geometry;
        g.left = g.left.min(self.viewport.width - g.width).max(0.0);
        g.top = g.top.min(self.viewport.height - g.height).max(0.0);
    }
    /// Reacts to a pointer update. Returns whether the geometry changed.
    pub fn apply(&mut self, state: &PointerState) -> bool {
        let before = self.geometry;
        if state.dragging {
            self.drag(state);
        } else if state.down {
            self.resize(state);
        }
        let changed = before != self.geometry;
        if changed {
            debug!("surface geometry now {:?}", self.geometry);
        }
        changed
    }
    fn drag(&mut self, s: &PointerState) {
        let x = s.page_x - s.offset_x;
        let y = s.page_y - s.offset_y;
        self.geometry.left = snap(x, self.geometry.width, self.viewport.width, self.snap_threshold);
        self.geometry.top = snap(y, self.geometry.height, self.viewport.height, self.snap_threshold);
    }
    fn resize(&mut self, s: &PointerState) {
        // Edges are independent; two adjacent ones make a corner resize.
        if s.edges.top {
            self.move_top(s);
        }
        if s.edges.bottom {
            self.move_bottom(s);
        }
        if s.edges.left {
            self.move_left(s);
        }
        if s.edges.right {
            self.move_right(s);
        }
    }
    fn move_right(&mut self, s: &PointerState) {
        let start = &s.start_rect;
        let wanted = s.page_x - start.left + start.width - s.offset_x;
        self.geometry.width = wanted
            .min(self.viewport.width - start.left)
            .max(self.min_width);
    }
    fn move_left(&mut self, s: &PointerState) {
        let start = &s.start_rect;
        let left = (s.page_x - s.offset_x)
            .min(start.right() - self.min_width)
            .max(0.0);
        self.geometry.width = (start.right() - left).max(self.min_width);
        self.geometry.left = left;
    }
    fn move_bottom(&mut self, s: &PointerState) {
        let start = &s.start_rect;
        let wanted = s.page_y - start.top + start.height - s.offset_y;
        self.geometry.height = wanted
            .min(self.viewport.height - start.top)
            .max(self.min_height);
    }
    fn move_top(&mut self, s: &PointerState) {
        let start = &s.start_rect;
        let top = (s.page_y - s.offset_y)
            .min(start.bottom() - self.min_height)
            .max(0.0);
        self.geometry.height = (start.bottom() - top).max(self.min_height);
        self.geometry.top = top;
    }
}
/// Pins a dragged coordinate flush to the near or far viewport edge when within `threshold`.
fn snap(pos: f64, extent: f64, limit: f64, threshold: f64) -> f64 {
    if pos < threshold {
        0.0
    } else if pos + extent + threshold > limit {
        (limit - extent).max(0.0)
    } else {
        pos
    }
}
pub fn cursor_for(state: &PointerState) -> CursorShape {
    let e = &state.edges;
    if (e.left && e.top) || (e.right && e.bottom) {
        CursorShape::ResizeNwSe
    } else if (e.left && e.bottom) || (e.right && e.top) {
        CursorShape::ResizeNeSw
    } else if e.top || e.bottom {
        CursorShape::ResizeVertical
    } else if e.left || e.right {
        CursorShape::ResizeHorizontal
    } else if state.over {
        CursorShape::Pointer
    } else {
        CursorShape::Default
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::pointer::PointerTracker;
    fn setup() -> (PointerTracker, DragResizeController) {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let tracker = PointerTracker::new(rect, 10.0, 10.0);
        let controller =
            DragResizeController::new(rect, Viewport::new(1000.0, 800.0), 20.0, 150.0, 50.0);
        (tracker, controller)
    }
    #[test]
    fn drag_moves_by_pointer_delta() {
        let (mut t, mut c) = setup();
        t.moved(150.0, 150.0);
        t.pressed();
        t.moved(250.0, 300.0);
        assert!(c.apply(t.state()));
        assert_eq!(c.geometry(), Rect::new(200.0, 250.0, 200.0, 100.0));
    }
    #[test]
    fn drag_snaps_to_viewport_edges() {
        let (mut t, mut c) = setup();
        t.moved(150.0, 150.0);
        t.pressed();
        t.moved(60.0, 65.0);
        c.apply(t.state());
        assert_eq!((c.geometry().left, c.geometry().top), (0.0, 0.0));
        t.moved(835.0, 745.0);
        c.apply(t.state());
        assert_eq!((c.geometry().left, c.geometry().top), (800.0, 700.0));
    }
    #[test]
    fn right_edge_resize_is_clamped() {
        let (mut t, mut c) = setup();
        t.moved(299.0, 150.0);
        t.pressed();
        t.moved(349.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().width, 250.0);
        t.moved(2000.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().width, 900.0);
        t.moved(0.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().width, 150.0);
        assert_eq!(c.geometry().left, 100.0);
    }
    #[test]
    fn left_edge_resize_keeps_right_edge_fixed() {
        let (mut t, mut c) = setup();
        t.moved(101.0, 150.0);
        t.pressed();
        t.moved(51.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().left, 50.0);
        assert_eq!(c.geometry().width, 250.0);
        t.moved(290.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().left, 150.0);
        assert_eq!(c.geometry().width, 150.0);
        t.moved(-40.0, 150.0);
        c.apply(t.state());
        assert_eq!(c.geometry().left, 0.0);
        assert_eq!(c.geometry().right(), 300.0);
    }
    #[test]
    fn corner_resize_changes_both_axes() {
        let (mut t, mut c) = setup();
        t.moved(299.0, 199.0);
        t.pressed();
        t.moved(399.0, 259.0);
        c.apply(t.state());
        assert_eq!(c.geometry(), Rect::new(100.0, 100.0, 300.0, 160.0));
        assert_eq!(cursor_for(&PointerState { down: false, ..*t.state() }), CursorShape::ResizeNwSe);
    }
    #[test]
    fn top_edge_resize_respects_min_height() {
        let (mut t, mut c) = setup();
        t.moved(200.0, 101.0);
        t.pressed();
        t.moved(200.0, 400.0);
        c.apply(t.state());
        assert_eq!(c.geometry().top, 150.0);
        assert_eq!(c.geometry().height, 50.0);
    }
    #[test]
    fn hover_does_not_mutate() {
        let (mut t, mut c) = setup();
        t.moved(200.0, 150.0);
        assert!(!c.apply(t.state()));
        assert_eq!(cursor_for(t.state()), CursorShape::Pointer);
        t.moved(900.0, 150.0);
        assert_eq!(cursor_for(t.state()), CursorShape::Default);
    }
    #[test]
    fn explicit_size_is_clamped() {
        let (_, mut c) = setup();
        assert!(c.set_size(Some(5000.0), Some(10.0)));
        assert_eq!(c.geometry().width, 1000.0);
        assert_eq!(c.geometry().height, 50.0);
        assert_eq!(c.geometry().left, 0.0);
        assert!(!c.set_size(None, Some(-3.0)));
    }
    #[test]
    fn growing_near_the_corner_moves_up_and_left() {
        let rect = Rect::new(800.0, 720.0, 200.0, 80.0);
        let mut c = DragResizeController::new(rect, Viewport::new(1000.0, 800.0), 20.0, 150.0, 50.0);
        assert!(c.set_size(Some(400.0), Some(300.0)));
        assert_eq!(c.geometry(), Rect::new(600.0, 500.0, 400.0, 300.0));
    }
    #[test]
    fn shrinking_viewport_pulls_surface_back_inside() {
        let (mut t, mut c) = setup();
        assert!(!c.set_viewport(Viewport::new(1000.0, 800.0)));
        assert!(c.set_viewport(Viewport::new(250.0, 120.0)));
        assert_eq!(c.geometry(), Rect::new(50.0, 20.0, 200.0, 100.0));
        assert!(c.set_viewport(Viewport::new(100.0, 40.0)));
        assert_eq!(c.geometry(), Rect::new(0.0, 0.0, 150.0, 50.0));
        // Snapping against a viewport narrower than the surface must not go negative.
        t.set_rect(c.geometry());
        t.moved(75.0, 25.0);
        t.pressed();
        t.moved(110.0, 50.0);
        c.apply(t.state());
        assert_eq!((c.geometry().left, c.geometry().top), (0.0, 0.0));
    }
}
