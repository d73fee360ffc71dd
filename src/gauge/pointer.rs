//! Pointer tracking against the overlay rectangle.
//!
//! The tracker turns raw move/press/release input into a [`PointerState`] and publishes
//! [`PointerEvent`]s to every subscriber over a channel. Resize and drag logic lives in
//! [`crate::gauge::controls`]; this module only classifies.
use std::sync::mpsc::{channel, Receiver, Sender};
use log::debug;
use crate::gauge::geometry::{Edges, Rect};
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Idle,
    Hovering,
    EdgeArmed,
    Dragging,
    Resizing,
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub page_x: f64,
    pub page_y: f64,
    pub down_x: f64,
    pub down_y: f64,
    /// Press position relative to the surface origin.
    pub offset_x: f64,
    pub offset_y: f64,
    pub down: bool,
    pub dragging: bool,
    pub over: bool,
    pub edges: Edges,
    /// Current surface bounds.
    pub rect: Rect,
    /// Surface bounds when the active gesture began.
    pub start_rect: Rect,
    /// Set on the release that qualified as a click.
    pub click: bool,
}
impl PointerState {
    fn new(rect: Rect) -> Self {
        Self {
            page_x: 0.0,
            page_y: 0.0,
            down_x: 0.0,
            down_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            down: false,
            dragging: false,
            over: false,
            edges: Edges::NONE,
            rect,
            start_rect: rect,
            click: false,
        }
    }
    pub fn phase(&self) -> PointerPhase {
        match (self.down, self.dragging, self.over, self.edges.any()) {
            (true, true, _, _) => PointerPhase::Dragging,
            (true, false, _, _) => PointerPhase::Resizing,
            (false, _, true, true) => PointerPhase::EdgeArmed,
            (false, _, true, false) => PointerPhase::Hovering,
            (false, _, false, _) => PointerPhase::Idle,
        }
    }
}
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Update(PointerState),
    Click(PointerState),
}
/// Held between press and release; the host routes document-wide input only while it exists.
#[derive(Clone, Copy, Debug)]
struct Capture {
    start_rect: Rect,
}
pub struct PointerTracker {
    state: PointerState,
    tolerance: f64,
    click_tolerance: f64,
    capture: Option<Capture>,
    subscribers: Vec<Sender<PointerEvent>>,
}
impl PointerTracker {
    pub fn new(rect: Rect, tolerance: f64, click_tolerance: f64) -> Self {
        Self {
            state: PointerState::new(rect),
            tolerance,
            click_tolerance,
            capture: None,
            subscribers: Vec::new(),
        }
    }
    pub fn subscribe(&mut self) -> Receiver<PointerEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }
    pub fn state(&self) -> &PointerState {
        &self.state
    }
    pub fn phase(&self) -> PointerPhase {
        self.state.phase()
    }
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }
    /// Updates the bounds used for classification, e.g. after the controller moved the surface.
    pub fn set_rect(&mut self, rect: Rect) {
        self.state.rect = rect;
    }
    pub fn moved(&mut self, x: f64, y: f64) {
        self.state.page_x = x;
        self.state.page_y = y;
        // Armed edges stay fixed for the whole gesture.
        if !self.state.down {
            self.state.over = self.is_over();
            self.state.edges = self.classify_edges();
        }
        self.emit(PointerEvent::Update(self.state));
    }
    /// Starts a gesture if the pointer is over the surface. Returns whether one started.
    pub fn pressed(&mut self) -> bool {
        if !self.state.over || self.capture.is_some() {
            return false;
        }
        let rect = self.state.rect;
        self.capture = Some(Capture { start_rect: rect });
        self.state.down = true;
        self.state.click = false;
        self.state.start_rect = rect;
        self.state.down_x = self.state.page_x;
        self.state.down_y = self.state.page_y;
        self.state.offset_x = self.state.page_x - rect.left;
        self.state.offset_y = self.state.page_y - rect.top;
        self.state.dragging = !self.state.edges.any();
        debug!(
            "pointer gesture started ({})",
            if self.state.dragging { "drag" } else { "resize" }
        );
        self.emit(PointerEvent::Update(self.state));
        true
    }
    /// Ends the active gesture. Returns whether the release counted as a click.
    pub fn released(&mut self) -> bool {
        let Some(capture) = self.capture.take() else {
            return false;
        };
        self.state.start_rect = capture.start_rect;
        self.state.click = self.is_click();
        self.state.down = false;
        self.state.dragging = false;
        self.state.over = self.is_over();
        self.state.edges = self.classify_edges();
        self.emit(PointerEvent::Update(self.state));
        if self.state.click {
            self.emit(PointerEvent::Click(self.state));
        }
        self.state.click
    }
    fn is_click(&self) -> bool {
        (self.state.page_x - self.state.down_x).abs() < self.click_tolerance
            && (self.state.page_y - self.state.down_y).abs() < self.click_tolerance
    }
    fn is_over(&self) -> bool {
        let (x, y, r, tol) = (self.state.page_x, self.state.page_y, &self.state.rect, self.tolerance);
        r.left - tol <= x && x < r.right() + tol && r.top - tol < y && y < r.bottom() + tol
    }
    fn classify_edges(&self) -> Edges {
        if !self.state.over {
            return Edges::NONE;
        }
        let (x, y, r, tol) = (self.state.page_x, self.state.page_y, &self.state.rect, self.tolerance);
        Edges {
            top: (y - r.top).abs() < tol,
            bottom: (y - r.bottom()).abs() < tol,
            left: (x - r.left).abs() < tol,
            right: (x - r.right()).abs() < tol,
        }
    }
    fn emit(&mut self, event: PointerEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
