//! Raster resampling, normalization, and spectrogram modulation.
//!
//! The grayscale raster is resized to exactly the spectrogram's
//! (frequency bins x time frames) shape, min-max normalized to [0, 1], and
//! flipped vertically so the text reads right-side-up once the frequency
//! axis points upward. Modulation then scales every complex STFT cell by
//! the real factor `1 + value * strength`, which boosts the background and
//! leaves the dark text regions untouched while preserving phase.

use image::imageops::{self, FilterType};

use crate::error::{Error, Result};
use crate::raster::GrayRaster;
use crate::stft::Spectrogram;

/// Normalized raster resized to the spectrogram grid, `[freq bin][frame]`,
/// values in [0, 1]
pub type ModulationGrid = Vec<Vec<f32>>;

/// Resize the raster to `(freq_bins, time_frames)`, normalize to [0, 1]
/// (all-zero when the raster is flat), and reverse the row order.
pub fn fit_to_grid(raster: &GrayRaster, freq_bins: usize, time_frames: usize) -> Result<ModulationGrid> {
    if freq_bins == 0 || time_frames == 0 {
        return Err(Error::Render(format!(
            "cannot resample raster to empty grid {}x{}",
            freq_bins, time_frames
        )));
    }

    let resized = imageops::resize(
        raster,
        time_frames as u32,
        freq_bins as u32,
        FilterType::Triangle,
    );

    let min = resized.pixels().map(|p| p.0[0]).fold(f32::INFINITY, f32::min);
    let max = resized.pixels().map(|p| p.0[0]).fold(f32::NEG_INFINITY, f32::max);
    let span = max - min;

    let mut grid = vec![vec![0.0f32; time_frames]; freq_bins];
    if span > 0.0 {
        for (row, grid_row) in grid.iter_mut().enumerate() {
            // Vertical flip: image row 0 (top of the text) lands on the
            // highest frequency bin
            let src_row = (freq_bins - 1 - row) as u32;
            for (col, cell) in grid_row.iter_mut().enumerate() {
                let value = resized.get_pixel(col as u32, src_row).0[0];
                *cell = (value - min) / span;
            }
        }
    }

    Ok(grid)
}

/// Multiply the spectrogram elementwise by `1 + grid * strength`.
/// Strength 0 is the exact identity. No clamping is applied.
pub fn modulate(spectrogram: &mut Spectrogram, grid: &ModulationGrid, strength: f32) -> Result<()> {
    if grid.len() != spectrogram.freq_bins()
        || grid.first().map(Vec::len).unwrap_or(0) != spectrogram.time_frames()
    {
        return Err(Error::Transform(format!(
            "modulation grid {}x{} does not match spectrogram {}x{}",
            grid.len(),
            grid.first().map(Vec::len).unwrap_or(0),
            spectrogram.freq_bins(),
            spectrogram.time_frames()
        )));
    }

    for (bin_row, grid_row) in spectrogram.bins.iter_mut().zip(grid) {
        for (cell, &value) in bin_row.iter_mut().zip(grid_row) {
            *cell *= 1.0 + value * strength;
        }
    }
    Ok(())
}
