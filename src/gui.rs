// src/gui.rs
use eframe::egui;
use egui::{
    Align2, Color32, ColorImage, CursorIcon, FontId, Id, LayerId, Order, Pos2, RichText,
    TextureHandle, TextureOptions, Vec2,
};
use egui_plot::{Line, Plot, PlotPoints};
use framegauge::gauge::{
    rate_color, BitmapSurface, ConfigPatch, CursorShape, LoopControl, Overlay, RasterSurface,
    RateTier, Viewport,
};
use log::{info, warn};
use plotters::style::RGBColor;
use rand::Rng;
use std::time::{Duration, Instant};

const HISTORY_LEN: usize = 600;

pub struct DemoApp {
    overlay: Overlay<BitmapSurface>,
    texture: Option<TextureHandle>,

    // Whether the host keeps calling `tick` every frame
    scheduled: bool,
    last_pointer: Option<Pos2>,

    // Demo controls
    buffer_size: usize,
    cpu_load_ms: f32,

    average_history: Vec<[f64; 2]>,
    started_at: Instant,
}

impl DemoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, mut overlay: Overlay<BitmapSurface>) -> Self {
        let buffer_size = overlay.buffer_size();
        let scheduled = overlay.start();
        info!("demo window ready");
        Self {
            overlay,
            texture: None,
            scheduled,
            last_pointer: None,
            buffer_size,
            cpu_load_ms: 0.0,
            average_history: Vec::with_capacity(HISTORY_LEN),
            started_at: Instant::now(),
        }
    }

    // Burns CPU on the UI thread so the gauge has something to show
    fn simulate_load(&self) {
        if self.cpu_load_ms <= 0.0 {
            return;
        }
        let jitter: f32 = rand::thread_rng().gen_range(0.8..1.2);
        let budget = Duration::from_secs_f32(self.cpu_load_ms * jitter / 1000.0);
        let start = Instant::now();
        while start.elapsed() < budget {
            std::hint::spin_loop();
        }
    }

    fn forward_pointer(&mut self, ctx: &egui::Context) {
        let (pos, pressed, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        if let Some(p) = pos {
            if self.last_pointer != Some(p) {
                self.overlay.pointer_moved(p.x as f64, p.y as f64);
                self.last_pointer = Some(p);
            }
        }
        if pressed {
            self.overlay.pointer_pressed();
        }
        if released {
            self.overlay.pointer_released();
        }
    }

    fn record_average(&mut self) {
        if !self.overlay.modes().run {
            return;
        }
        let t = self.started_at.elapsed().as_secs_f64();
        self.average_history.push([t, self.overlay.average()]);
        if self.average_history.len() > HISTORY_LEN {
            self.average_history.remove(0);
        }
    }

    fn controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls").min_width(260.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("framegauge demo");
            ui.label("Drag the gauge, resize it from its edges, click it to inspect.");
            ui.separator();

            // Rate cards
            let rate = self.overlay.rate();
            let average = self.overlay.average();
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{rate:.1} fps")).size(22.0).color(to_color32(rate_color(rate))));
                ui.label(RichText::new(format!("avg {average:.1}")).size(22.0).color(to_color32(rate_color(average))));
            });
            let tier = RateTier::of(average);
            ui.label(RichText::new(format!("{tier:?}").to_uppercase()).color(to_color32(tier.color())));
            ui.separator();

            if ui
                .add(egui::Slider::new(&mut self.buffer_size, 1..=1000).text("buffer size"))
                .changed()
            {
                self.overlay.set_buffer_size(self.buffer_size);
            }
            ui.add(egui::Slider::new(&mut self.cpu_load_ms, 0.0..=100.0).text("cpu load (ms)"));
            ui.separator();

            let modes = self.overlay.modes();
            ui.horizontal(|ui| {
                let run_txt = if modes.run { "PAUSE" } else { "RUN" };
                if ui.button(run_txt).clicked() && self.overlay.toggle_run() {
                    self.scheduled = true;
                }
                let render_txt = if modes.render { "HIDE GRAPH" } else { "SHOW GRAPH" };
                if ui.button(render_txt).clicked() {
                    self.overlay.toggle_render();
                }
                let inspect_txt = if modes.inspect { "RESUME" } else { "INSPECT" };
                if ui.button(inspect_txt).clicked() {
                    self.overlay.toggle_inspect();
                }
            });
            if ui.button("RESET SIZE").clicked() {
                let patch = ConfigPatch {
                    width: Some(200.0),
                    height: Some(80.0),
                    ..Default::default()
                };
                if let Err(e) = self.overlay.config(patch) {
                    warn!("could not reset gauge size: {e}");
                }
            }

            ui.add_space(10.0);
            ui.label("AVERAGE HISTORY");
            Plot::new("average_history")
                .height(160.0)
                .include_y(0.0)
                .include_y(self.overlay.snapshot().rate.max(60.0))
                .auto_bounds_x()
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::new(self.average_history.clone()))
                            .name("avg")
                            .color(Color32::from_rgb(0x8d, 0xc6, 0xff)),
                    );
                });
        });
    }

    fn paint_overlay(&mut self, ctx: &egui::Context) {
        let surface = self.overlay.surface();
        let (w, h) = surface.size();
        let image = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &surface.to_rgba());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("framegauge", image, TextureOptions::NEAREST))
            }
        }
        let Some(texture) = &self.texture else {
            return;
        };
        let g = self.overlay.geometry();
        let rect = egui::Rect::from_min_size(
            Pos2::new(g.left as f32, g.top as f32),
            Vec2::new(g.width as f32, g.height as f32),
        );
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("framegauge")));
        let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture.id(), rect, uv, Color32::WHITE);
    }

    fn paint_tooltip(&self, ctx: &egui::Context) {
        let Some(label) = self.overlay.tooltip_label() else {
            return;
        };
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("framegauge_tooltip")));
        let rect = egui::Rect::from_min_size(
            Pos2::new(label.left as f32, label.top as f32),
            Vec2::new(label.width as f32, label.height as f32),
        );
        painter.rect_filled(rect, 5.0, Color32::from_black_alpha(204));
        painter.text(
            rect.min + Vec2::splat(5.0),
            Align2::LEFT_TOP,
            &label.text,
            FontId::proportional(12.0),
            to_color32(label.color),
        );
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        self.overlay
            .set_viewport(Viewport::new(screen.width() as f64, screen.height() as f64));

        // 1. Sampling loop: one tick per frame while the gauge keeps running
        self.simulate_load();
        if self.scheduled {
            match self.overlay.tick_now() {
                LoopControl::Continue => ctx.request_repaint(),
                LoopControl::Stop => self.scheduled = false,
            }
        }

        // 2. Input
        self.forward_pointer(ctx);
        if let Some(icon) = cursor_icon(self.overlay.cursor()) {
            ctx.set_cursor_icon(icon);
        }

        // 3. UI
        self.record_average();
        self.controls_panel(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("The gauge floats above this panel.");
        });
        self.paint_overlay(ctx);
        self.paint_tooltip(ctx);
    }
}

fn cursor_icon(shape: CursorShape) -> Option<CursorIcon> {
    match shape {
        CursorShape::Default => None,
        CursorShape::Pointer => Some(CursorIcon::PointingHand),
        CursorShape::ResizeHorizontal => Some(CursorIcon::ResizeHorizontal),
        CursorShape::ResizeVertical => Some(CursorIcon::ResizeVertical),
        CursorShape::ResizeNwSe => Some(CursorIcon::ResizeNwSe),
        CursorShape::ResizeNeSw => Some(CursorIcon::ResizeNeSw),
    }
}

fn to_color32(color: RGBColor) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}
