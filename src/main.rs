// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod gui;
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use framegauge::gauge::{BitmapSurface, Overlay, OverlayConfig, Viewport};
const WINDOW_SIZE: [f32; 2] = [1280.0, 800.0];
// Optional first argument: path to a JSON overlay config
fn load_config() -> Result<OverlayConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(OverlayConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
    OverlayConfig::from_json(&text).with_context(|| format!("parsing config {path}"))
}
fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    // Overlay::new sizes the raster once the geometry is clamped.
    let surface = BitmapSurface::new(1, 1, config.style.background())
        .context("allocating gauge surface")?;
    let overlay = Overlay::new(
        config,
        Viewport::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64),
        surface,
    )
    .context("creating frame gauge")?;
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(WINDOW_SIZE)
        .with_min_inner_size([640.0, 400.0])
        .with_title("framegauge demo");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "framegauge",
        options,
        Box::new(move |cc| Box::new(gui::DemoApp::new(cc, overlay))),
    )
    .map_err(|e| anyhow!("event loop failed: {e}"))
}
