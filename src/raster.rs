//! Off-screen text rasterization.
//!
//! Renders the message as black text on a white RGBA canvas of explicit,
//! configurable size, then reduces it to a grayscale grid with the usual
//! luma weights. Glyphs come from an embedded 5x7 bitmap font scaled in
//! integer multiples; the line is centered both ways. A line too wide for
//! the canvas is shrunk down to 1x glyph scale and clipped beyond that.

mod font;

use image::{ImageBuffer, Luma, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::params::RasterConfig;

/// Grayscale intensity grid, 0.0 (black) to 1.0 (white). Values stay in
/// [0, 1] because `image` treats 1.0 as the maximum for f32 subpixels and
/// clamps to it when resampling.
pub type GrayRaster = ImageBuffer<Luma<f32>, Vec<f32>>;

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Fixed luma weights for the RGBA -> grayscale reduction
const LUMA_R: f32 = 0.2989;
const LUMA_G: f32 = 0.5870;
const LUMA_B: f32 = 0.1140;

/// Render a message onto a fresh canvas and reduce it to grayscale.
/// An empty message yields a uniform (blank) raster.
pub fn render_message(message: &str, config: &RasterConfig) -> Result<GrayRaster> {
    config.validate().map_err(Error::Render)?;

    let mut canvas = RgbaImage::from_pixel(config.canvas_width, config.canvas_height, BACKGROUND);
    draw_centered_line(&mut canvas, message, config);

    Ok(to_grayscale(&canvas))
}

/// Integer glyph scale for the message: the configured nominal size, shrunk
/// until the line fits the canvas width (floor of 1).
fn fit_scale(message: &str, config: &RasterConfig) -> u32 {
    let mut scale = (config.glyph_height_px / font::GLYPH_HEIGHT).max(1);
    while scale > 1 && line_width_px(message, scale) > config.canvas_width {
        scale -= 1;
    }
    scale
}

/// Width of the rendered line in pixels: 5 glyph columns plus a one-column
/// gap per character, minus the trailing gap.
fn line_width_px(message: &str, scale: u32) -> u32 {
    let chars = message.chars().count() as u32;
    if chars == 0 {
        0
    } else {
        chars * (font::GLYPH_WIDTH + 1) * scale - scale
    }
}

fn draw_centered_line(canvas: &mut RgbaImage, message: &str, config: &RasterConfig) {
    if message.is_empty() {
        return;
    }

    let scale = fit_scale(message, config);
    let line_w = line_width_px(message, scale);
    let line_h = font::GLYPH_HEIGHT * scale;

    // Center; a line wider than the canvas starts at 0 and clips on the right
    let x0 = config.canvas_width.saturating_sub(line_w) / 2;
    let y0 = config.canvas_height.saturating_sub(line_h) / 2;

    let mut pen_x = x0;
    for c in message.chars() {
        if let Some(rows) = font::glyph(c) {
            draw_glyph(canvas, rows, pen_x, y0, scale);
        }
        pen_x += (font::GLYPH_WIDTH + 1) * scale;
        if pen_x >= canvas.width() {
            break;
        }
    }
}

fn draw_glyph(canvas: &mut RgbaImage, rows: &[u8; 7], x0: u32, y0: u32, scale: u32) {
    for row in 0..font::GLYPH_HEIGHT {
        for col in 0..font::GLYPH_WIDTH {
            if !font::pixel_set(rows, col, row) {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = x0 + col * scale + dx;
                    let y = y0 + row * scale + dy;
                    if x < canvas.width() && y < canvas.height() {
                        canvas.put_pixel(x, y, TEXT_COLOR);
                    }
                }
            }
        }
    }
}

/// Reduce an RGBA canvas to single-channel grayscale via luma weights,
/// rescaled from 8-bit channels to [0, 1]
fn to_grayscale(canvas: &RgbaImage) -> GrayRaster {
    ImageBuffer::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgba([r, g, b, _]) = *canvas.get_pixel(x, y);
        let luma = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
        Luma([luma / 255.0])
    })
}
