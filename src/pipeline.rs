//! The linear embedding pipeline.
//!
//! Loader -> Rasterizer -> STFT -> Resampler -> Modulator -> inverse STFT
//! -> Gain -> Writer, executed once per invocation with no retries. Any
//! stage error aborts the run; the output file is only created at the very
//! end, so a bad input path never leaves a partial artifact behind.

use std::path::Path;

use crate::audio::{self, Waveform};
use crate::embed;
use crate::error::Result;
use crate::params::{EmbedParams, RasterConfig, StftConfig};
use crate::raster;
use crate::stft::{self, Spectrogram};

/// Everything a run produces besides the output file. The modulated
/// spectrogram is kept so callers can render it; nothing persists between
/// runs.
pub struct RunSummary {
    pub input_duration_secs: f32,
    pub output_duration_secs: f32,
    pub freq_bins: usize,
    pub time_frames: usize,
    pub spectrogram: Spectrogram,
}

/// One configured embedding pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub stft: StftConfig,
    pub raster: RasterConfig,
    pub params: EmbedParams,
}

impl Pipeline {
    /// Run the full pipeline: read `input`, embed `message`, write `output`.
    ///
    /// Gain is applied twice on purpose, before the forward transform and
    /// after the inverse, matching the original tool; the net amplitude
    /// factor is 10^(gain_db / 10). The output duration differs from the
    /// input by up to one analysis window (inverse-transform framing).
    pub fn run(&self, input: &Path, message: &str, output: &Path) -> Result<RunSummary> {
        let mut wave = audio::load_wav(input)?;
        let input_duration_secs = wave.duration_secs();
        log::info!(
            "loaded {}: {:.2}s @ {} Hz",
            input.display(),
            input_duration_secs,
            wave.sample_rate
        );

        let gray = raster::render_message(message, &self.raster)?;

        audio::apply_gain_db(&mut wave, self.params.gain_db);

        let mut spectrogram = stft::forward(&wave, &self.stft)?;
        log::info!(
            "spectrogram: {} bins x {} frames",
            spectrogram.freq_bins(),
            spectrogram.time_frames()
        );

        let grid = embed::fit_to_grid(&gray, spectrogram.freq_bins(), spectrogram.time_frames())?;
        embed::modulate(&mut spectrogram, &grid, self.params.modulation_strength)?;

        let mut out_wave = stft::inverse(&spectrogram, &self.stft, wave.sample_rate)?;
        audio::apply_gain_db(&mut out_wave, self.params.gain_db);

        audio::save_wav(output, &out_wave)?;

        Ok(RunSummary {
            input_duration_secs,
            output_duration_secs: out_wave.duration_secs(),
            freq_bins: spectrogram.freq_bins(),
            time_frames: spectrogram.time_frames(),
            spectrogram,
        })
    }
}

/// Synthesize a sine tone, mainly for tests and demos.
pub fn create_tone(frequency_hz: f32, duration_secs: f32, sample_rate: u32) -> Waveform {
    let n = (duration_secs * sample_rate as f32) as usize;
    let samples = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            0.5 * (2.0 * std::f32::consts::PI * frequency_hz * t).sin()
        })
        .collect();
    Waveform {
        samples,
        sample_rate,
    }
}
