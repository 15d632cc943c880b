use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::{
    palette::Color,
    render::{Surface, SurfaceError, CANVAS_SIZE},
};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// RGBA raster of `side` x `side` pixels covering the logical canvas.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    side: u32,
    background: Rgba<u8>,
    image: RgbaImage,
}

impl PixelSurface {
    pub fn new(side: u32) -> Result<Self, SurfaceError> {
        if side == 0 {
            return Err(SurfaceError::Empty);
        }

        Ok(Self {
            side,
            background: TRANSPARENT,
            image: RgbaImage::from_pixel(side, side, TRANSPARENT),
        })
    }

    /// Opaque background used by [`Surface::clear`].
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color.map_or(TRANSPARENT, |c| Rgba(c.to_rgba()));
        self
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;

        Ok(buf.into_inner())
    }

    /// Pixels whose centre lies in `[start, start + len)` logical units.
    fn span(&self, start: f64, len: f64) -> std::ops::Range<u32> {
        // Multiply before dividing so cell edges stay exact
        let side = f64::from(self.side);
        let from = start * side / CANVAS_SIZE;
        let to = (start + len) * side / CANVAS_SIZE;

        let first = (from - 0.5).ceil().clamp(0.0, side) as u32;
        let end = (to - 0.5).ceil().clamp(0.0, side) as u32;

        first..end
    }
}

impl Surface for PixelSurface {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let fill = Rgba(color.to_rgba());
        let cols = self.span(x, width);

        for py in self.span(y, height) {
            for px in cols.clone() {
                self.image.put_pixel(px, py, fill);
            }
        }
    }
}
