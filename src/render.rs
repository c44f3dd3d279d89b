//! Optional dB heatmap rendering of the modulated spectrogram.
//!
//! Replaces the original tool's blocking plot window with a persisted PNG:
//! power in dB relative to the grid peak, clamped to an 80 dB dynamic
//! range, frequency increasing upward, time left to right.

use std::path::Path;

use crate::error::{Error, Result};
use crate::stft::Spectrogram;

/// Dynamic range of the heatmap below the peak, in dB
const DB_RANGE: f32 = 80.0;

/// Map power (|X|^2) to dB relative to a reference power, clamped to
/// [-DB_RANGE, 0].
fn power_db(power: f32, reference: f32) -> f32 {
    if reference <= 0.0 || power <= 0.0 {
        return -DB_RANGE;
    }
    (10.0 * (power / reference).log10()).clamp(-DB_RANGE, 0.0)
}

/// Inferno-style gradient from black through purple and orange to pale
/// yellow, `t` in [0, 1].
fn heat_rgb(t: f32) -> [u8; 3] {
    const STOPS: [[f32; 3]; 5] = [
        [0.0, 0.0, 4.0],
        [87.0, 16.0, 110.0],
        [188.0, 55.0, 84.0],
        [249.0, 142.0, 9.0],
        [252.0, 255.0, 164.0],
    ];

    let t = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
    let i = (t as usize).min(STOPS.len() - 2);
    let frac = t - i as f32;

    let mut rgb = [0u8; 3];
    for c in 0..3 {
        rgb[c] = (STOPS[i][c] + (STOPS[i + 1][c] - STOPS[i][c]) * frac).round() as u8;
    }
    rgb
}

/// Write the spectrogram as a PNG heatmap. One pixel per (bin, frame) cell;
/// row 0 of the image is the highest frequency bin.
pub fn save_spectrogram_png(spectrogram: &Spectrogram, path: &Path) -> Result<()> {
    let width = spectrogram.time_frames() as u32;
    let height = spectrogram.freq_bins() as u32;
    if width == 0 || height == 0 {
        return Err(Error::Render("cannot render an empty spectrogram".to_string()));
    }

    let peak = spectrogram.peak_magnitude();
    let reference = peak * peak;

    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        // Flip so low frequencies sit at the bottom of the image
        let bin = (height - 1 - y) as usize;
        for x in 0..width {
            let power = spectrogram.bins[bin][x as usize].norm_sqr();
            let db = power_db(power, reference);
            let rgb = heat_rgb((db + DB_RANGE) / DB_RANGE);
            pixels.extend_from_slice(&rgb);
        }
    }

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgb8)
        .map_err(|e| Error::Render(format!("{}: {}", path.display(), e)))?;

    log::debug!("wrote {}x{} spectrogram heatmap to {}", width, height, path.display());
    Ok(())
}
