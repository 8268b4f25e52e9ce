// render.rs - Rasterize the grid into a color buffer for the window to blit

use conway::Grid;
use egui::{Color32, ColorImage};

use crate::config::{Config, Palette};

/// Axis-aligned block of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

pub fn cell_color(grid: &Grid, col: usize, row: usize, palette: &Palette) -> Color32 {
    if grid.get(col, row) { palette.alive } else { palette.dead }
}

/// One-pixel lines on every cell boundary that starts inside the viewport,
/// plus the far right and bottom edges.
pub fn grid_lines(config: &Config) -> Vec<PixelRect> {
    let (width, height, step) = (config.width, config.height, config.cell_size as usize);
    let mut lines = Vec::new();

    for x in (0..width).step_by(step) {
        lines.push(PixelRect { x, y: 0, w: 1, h: height });  // Vertical
    }
    for y in (0..height).step_by(step) {
        lines.push(PixelRect { x: 0, y, w: width, h: 1 });   // Horizontal
    }
    lines.push(PixelRect { x: width - 1, y: 0, w: 1, h: height });
    lines.push(PixelRect { x: 0, y: height - 1, w: width, h: 1 });
    lines
}

fn fill(image: &mut ColorImage, rect: PixelRect, color: Color32) {
    let [img_w, img_h] = image.size;
    let x_end = ((rect.x + rect.w) as usize).min(img_w);
    let y_end = ((rect.y + rect.h) as usize).min(img_h);
    for y in (rect.y as usize)..y_end {
        let row = &mut image.pixels[y * img_w..(y + 1) * img_w];
        for px in &mut row[(rect.x as usize).min(x_end)..x_end] {
            *px = color;
        }
    }
}

/// A dead-colored buffer sized to the viewport.
pub fn blank_image(config: &Config) -> ColorImage {
    ColorImage::new([config.width as usize, config.height as usize], config.palette.dead)
}

/// Paint every cell as a `cell_size` square, then the grid lines on top.
/// `image` must come from [`blank_image`] for the same config.
pub fn rasterize(grid: &Grid, config: &Config, image: &mut ColorImage) {
    debug_assert_eq!(image.size, [config.width as usize, config.height as usize]);
    let palette = &config.palette;
    let cs = config.cell_size;

    image.pixels.fill(palette.dead);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.get(col, row) {
                let rect = PixelRect { x: col as u32 * cs, y: row as u32 * cs, w: cs, h: cs };
                fill(image, rect, cell_color(grid, col, row, palette));
            }
        }
    }

    for line in grid_lines(config) {
        fill(image, line, palette.grid_line);
    }
}

/// A fresh raster of `grid`, ready to hand to the texture.
pub fn render_image(grid: &Grid, config: &Config) -> ColorImage {
    let mut image = blank_image(config);
    rasterize(grid, config, &mut image);
    image
}
