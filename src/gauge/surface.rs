use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::gauge::error::GaugeError;
const FONT_FAMILY: &str = "sans-serif";
/// Pixel coordinate, origin at the top-left of the surface.
pub type Point = (i32, i32);
/// 2D raster the renderer draws on. Rectangles are inclusive of both corners.
pub trait RasterSurface {
    fn size(&self) -> (u32, u32);
    /// Color used by [`RasterSurface::clear_rect`] from now on.
    fn set_background(&mut self, color: RGBColor);
    /// Reallocates the raster; previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), GaugeError>;
    /// Resets a region to the surface background.
    fn clear_rect(&mut self, top_left: Point, bottom_right: Point) -> Result<(), GaugeError>;
    fn fill_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: RGBColor,
    ) -> Result<(), GaugeError>;
    fn fill_polygon(&mut self, points: &[Point], color: RGBColor) -> Result<(), GaugeError>;
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        size_px: u32,
        color: RGBColor,
    ) -> Result<(), GaugeError>;
}
/// In-memory RGB raster drawn through plotters' bitmap backend.
pub struct BitmapSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    background: RGBColor,
}
impl BitmapSurface {
    pub fn new(width: u32, height: u32, background: RGBColor) -> Result<Self, GaugeError> {
        let pixels = allocate(width, height, background)?;
        Ok(Self {
            width,
            height,
            pixels,
            background,
        })
    }
    pub fn background(&self) -> RGBColor {
        self.background
    }
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some(RGBColor(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }
    /// RGBA copy with an opaque alpha channel, ready for texture upload.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xff])
            .collect()
    }
    pub fn encode_png(&self) -> Result<Vec<u8>, GaugeError> {
        let image = ImageBuffer::<Rgb<u8>, _>::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(GaugeError::SurfaceUnavailable {
                width: self.width,
                height: self.height,
            })?;
        let mut output = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
        Ok(output)
    }
    fn area(&mut self) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height)).into_drawing_area()
    }
}
impl RasterSurface for BitmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    fn set_background(&mut self, color: RGBColor) {
        self.background = color;
    }
    fn resize(&mut self, width: u32, height: u32) -> Result<(), GaugeError> {
        self.pixels = allocate(width, height, self.background)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
    fn clear_rect(&mut self, top_left: Point, bottom_right: Point) -> Result<(), GaugeError> {
        let background = self.background;
        self.fill_rect(top_left, bottom_right, background)
    }
    fn fill_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: RGBColor,
    ) -> Result<(), GaugeError> {
        let root = self.area();
        root.draw(&Rectangle::new([top_left, bottom_right], color.filled()))?;
        Ok(())
    }
    fn fill_polygon(&mut self, points: &[Point], color: RGBColor) -> Result<(), GaugeError> {
        let root = self.area();
        root.draw(&Polygon::new(points.to_vec(), color.filled()))?;
        Ok(())
    }
    fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        size_px: u32,
        color: RGBColor,
    ) -> Result<(), GaugeError> {
        let root = self.area();
        let style = (FONT_FAMILY, size_px as f64).into_font().color(&color);
        root.draw_text(text, &style, at)?;
        Ok(())
    }
}
fn allocate(width: u32, height: u32, background: RGBColor) -> Result<Vec<u8>, GaugeError> {
    let unavailable = GaugeError::SurfaceUnavailable { width, height };
    if width == 0 || height == 0 {
        return Err(unavailable);
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(unavailable)?;
    let mut pixels = Vec::with_capacity(len);
    for _ in 0..(len / 3) {
        pixels.extend_from_slice(&[background.0, background.1, background.2]);
    }
    Ok(pixels)
}
