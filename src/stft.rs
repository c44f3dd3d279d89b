//! Forward and inverse short-time Fourier transform.
//!
//! The forward transform produces the non-redundant half spectrum per frame
//! (DC through Nyquist) plus bin-center frequency and frame-center time
//! axes. The inverse reconstructs by windowed overlap-add with squared-window
//! normalization, so its output length is `(frames - 1) * hop + fft_size`,
//! which generally differs from the input length by up to one window.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use crate::audio::Waveform;
use crate::error::{Error, Result};
use crate::params::StftConfig;

/// Complex STFT grid indexed `[frequency bin][time frame]` with axes in
/// Hz and seconds.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub bins: Vec<Vec<Complex<f32>>>,
    pub freqs: Vec<f32>,
    pub times: Vec<f32>,
}

impl Spectrogram {
    pub fn freq_bins(&self) -> usize {
        self.freqs.len()
    }

    pub fn time_frames(&self) -> usize {
        self.times.len()
    }

    /// Largest magnitude anywhere in the grid
    pub fn peak_magnitude(&self) -> f32 {
        self.bins
            .iter()
            .flat_map(|row| row.iter())
            .map(|c| c.norm())
            .fold(0.0f32, f32::max)
    }

    /// Frequency (Hz) of the bin with the highest summed magnitude
    pub fn dominant_frequency(&self) -> f32 {
        let mut best_bin = 0;
        let mut best_energy = 0.0f32;
        for (k, row) in self.bins.iter().enumerate() {
            let energy: f32 = row.iter().map(|c| c.norm_sqr()).sum();
            if energy > best_energy {
                best_energy = energy;
                best_bin = k;
            }
        }
        self.freqs[best_bin]
    }
}

/// Hann window value at `index` of a `size`-point window
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Compute the complex STFT of a waveform.
pub fn forward(waveform: &Waveform, config: &StftConfig) -> Result<Spectrogram> {
    let n_fft = config.fft_size;
    let hop = config.hop_size;
    let num_frames = config.num_frames(waveform.samples.len());
    if num_frames == 0 {
        return Err(Error::Transform(format!(
            "waveform too short for analysis: {} samples < {} window",
            waveform.samples.len(),
            n_fft
        )));
    }

    let n_bins = config.freq_bins();
    let window: Vec<f32> = (0..n_fft).map(|i| hann_window(i, n_fft)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

    let mut bins = vec![vec![Complex::new(0.0f32, 0.0); num_frames]; n_bins];
    for frame in 0..num_frames {
        let start = frame * hop;
        for i in 0..n_fft {
            buffer[i] = Complex::new(waveform.samples[start + i] * window[i], 0.0);
        }
        fft.process(&mut buffer);
        for (k, row) in bins.iter_mut().enumerate() {
            row[frame] = buffer[k];
        }
    }

    let freqs = (0..n_bins)
        .map(|k| config.bin_to_hz(k, waveform.sample_rate))
        .collect();
    let times = (0..num_frames)
        .map(|f| (f * hop + n_fft / 2) as f32 / waveform.sample_rate as f32)
        .collect();

    Ok(Spectrogram { bins, freqs, times })
}

/// Reconstruct a waveform from a (possibly modulated) complex STFT grid.
pub fn inverse(
    spectrogram: &Spectrogram,
    config: &StftConfig,
    sample_rate: u32,
) -> Result<Waveform> {
    let n_fft = config.fft_size;
    let hop = config.hop_size;
    let n_bins = config.freq_bins();
    let num_frames = spectrogram.time_frames();

    if num_frames == 0 || spectrogram.freq_bins() != n_bins {
        return Err(Error::Transform(format!(
            "spectrogram shape {}x{} does not match config ({} bins expected)",
            spectrogram.freq_bins(),
            num_frames,
            n_bins
        )));
    }

    let out_len = (num_frames - 1) * hop + n_fft;
    let window: Vec<f32> = (0..n_fft).map(|i| hann_window(i, n_fft)).collect();

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n_fft);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

    let mut samples = vec![0.0f32; out_len];
    let mut window_sum = vec![0.0f32; out_len];
    let ifft_scale = 1.0 / n_fft as f32;

    for frame in 0..num_frames {
        // Rebuild the full spectrum from the half grid (Hermitian symmetry)
        buffer[0] = spectrogram.bins[0][frame];
        for k in 1..n_fft / 2 {
            buffer[k] = spectrogram.bins[k][frame];
            buffer[n_fft - k] = spectrogram.bins[k][frame].conj();
        }
        buffer[n_fft / 2] = spectrogram.bins[n_fft / 2][frame];

        ifft.process(&mut buffer);

        let start = frame * hop;
        for i in 0..n_fft {
            samples[start + i] += buffer[i].re * ifft_scale * window[i];
            window_sum[start + i] += window[i] * window[i];
        }
    }

    for (sample, ws) in samples.iter_mut().zip(&window_sum) {
        if *ws > 1e-8 {
            *sample /= ws;
        }
    }

    Ok(Waveform {
        samples,
        sample_rate,
    })
}
