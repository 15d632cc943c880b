use thiserror::Error;

use super::{
    grid::{Grid, GRID_SIZE},
    palette::Color,
};

/// Logical side length of every surface.
pub const CANVAS_SIZE: f64 = 50.0;

/// Side length of one grid cell in logical units.
pub const PIXEL_SIZE: f64 = CANVAS_SIZE / GRID_SIZE as f64;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("surface must be at least one pixel wide")]
    Empty,

    #[error("failed to encode surface")]
    Encode(#[from] image::ImageError),
}

/// Something a grid can be painted onto, addressed in logical units.
pub trait Surface {
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
}

/// Clears the surface then paints every non-empty cell.
pub fn render<S: Surface + ?Sized>(surface: &mut S, grid: &Grid) {
    surface.clear();

    for (col, row, color) in grid.filled() {
        surface.fill_rect(
            col as f64 * PIXEL_SIZE,
            row as f64 * PIXEL_SIZE,
            PIXEL_SIZE,
            PIXEL_SIZE,
            color,
        );
    }
}
