use serde::{Deserialize, Serialize};
use crate::gauge::error::GaugeError;
use crate::gauge::style::SurfaceStyle;
/// Construction-time settings of an overlay. Every key is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub width: f64,
    pub height: f64,
    /// Matching the width gives one bar per pixel.
    pub buffer_size: usize,
    pub max_rate: f64,
    /// Distance from an edge within which the pointer arms a resize.
    pub tolerance: f64,
    /// Largest pointer travel between press and release that still counts as a click.
    pub click_tolerance: f64,
    pub snap_threshold: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub readout_interval_ms: f64,
    pub graph_interval_ms: f64,
    pub style: SurfaceStyle,
}
impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 80.0,
            buffer_size: 200,
            max_rate: 60.0,
            tolerance: 10.0,
            click_tolerance: 10.0,
            snap_threshold: 20.0,
            min_width: 150.0,
            min_height: 50.0,
            readout_interval_ms: 1000.0 / 3.0,
            graph_interval_ms: 1000.0 / 20.0,
            style: SurfaceStyle::default(),
        }
    }
}
impl OverlayConfig {
    pub fn from_json(text: &str) -> Result<Self, GaugeError> {
        Ok(serde_json::from_str(text)?)
    }
}
/// Partial update applied through `Overlay::config`. Absent fields leave the current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
    pub buffer_size: Option<usize>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub style: Option<SurfaceStyle>,
}
impl ConfigPatch {
    pub fn from_json(text: &str) -> Result<Self, GaugeError> {
        Ok(serde_json::from_str(text)?)
    }
}
