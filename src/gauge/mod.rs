pub mod buffer;
pub mod clock;
pub mod colors;
pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod pointer;
pub mod render;
pub mod style;
pub mod surface;
pub mod tooltip;
// Re-exports for hosts embedding the gauge.
pub use buffer::{SampleRing, SampleSnapshot};
pub use clock::{ClockSnapshot, FrameClock};
pub use colors::{rate_color, RateTier};
pub use config::{ConfigPatch, OverlayConfig};
pub use controls::{CursorShape, DragResizeController};
pub use error::GaugeError;
pub use geometry::{Edges, Rect, Viewport};
pub use overlay::{LoopControl, Modes, Overlay};
pub use pointer::{PointerEvent, PointerPhase, PointerState, PointerTracker};
pub use render::{RenderFrame, RenderReport, Renderer};
pub use style::SurfaceStyle;
pub use surface::{BitmapSurface, RasterSurface};
pub use tooltip::{InspectTooltip, TooltipLabel};
