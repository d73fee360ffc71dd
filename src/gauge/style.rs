use log::debug;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
/// Properties owned by the drag/resize controller; style merges never touch them.
const CONTROLLER_KEYS: [&str; 7] = ["width", "height", "position", "left", "top", "right", "bottom"];
/// `rgba(0,0,0,0.2)` over a dark page, flattened since the raster has no alpha.
pub const DEFAULT_BACKGROUND: RGBColor = RGBColor(0x1a, 0x1a, 0x1a);
/// Free-form visual properties of the overlay surface, keyed like CSS in camelCase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceStyle {
    properties: Map<String, Value>,
}
impl SurfaceStyle {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if CONTROLLER_KEYS.contains(&key.as_str()) {
            debug!("ignoring controller-owned style property {key}");
            return false;
        }
        self.properties.insert(key, value.into());
        true
    }
    /// Copies every property of `other` except the controller-owned ones. Returns how many applied.
    pub fn merge(&mut self, other: &SurfaceStyle) -> usize {
        let mut applied = 0;
        for (key, value) in &other.properties {
            if self.set(key.as_str(), value.clone()) {
                applied += 1;
            }
        }
        applied
    }
    pub fn len(&self) -> usize {
        self.properties.len()
    }
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
    pub fn background(&self) -> RGBColor {
        self.get("backgroundColor")
            .and_then(Value::as_str)
            .and_then(parse_hex)
            .unwrap_or(DEFAULT_BACKGROUND)
    }
}
/// Parses `#rgb` or `#rrggbb`.
pub fn parse_hex(text: &str) -> Option<RGBColor> {
    let hex = text.trim().strip_prefix('#')?;
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits.as_slice() {
        [r, g, b] => Some(RGBColor(r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some(RGBColor(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}
