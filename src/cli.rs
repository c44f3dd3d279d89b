//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::params::{EmbedParams, RasterConfig, StftConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "specmark")]
#[command(about = "Embed a text message into the spectrogram of a WAV file", long_about = None)]
pub struct Args {
    /// Path to the input audio file (mono WAV)
    pub input: PathBuf,

    /// Message to embed into the audio spectrogram
    pub message: String,

    /// Path to save the output audio file (32-bit float WAV, overwritten)
    pub output: PathBuf,

    /// Strength of the spectrogram modulation (0 = no embedding)
    #[arg(long, alias = "modulation_strength", default_value_t = 20.0)]
    pub modulation_strength: f32,

    /// Gain in dB applied before and after the transform (net 10^(dB/10))
    #[arg(
        long,
        alias = "gain_db",
        default_value_t = 20.0,
        allow_negative_numbers = true
    )]
    pub gain_db: f32,

    /// STFT window length in samples (power of 2)
    #[arg(long, default_value_t = 1024)]
    pub fft_size: usize,

    /// STFT hop between frames in samples
    #[arg(long, default_value_t = 256)]
    pub hop_size: usize,

    /// Text canvas width in pixels
    #[arg(long, default_value_t = 640)]
    pub canvas_width: u32,

    /// Text canvas height in pixels
    #[arg(long, default_value_t = 480)]
    pub canvas_height: u32,

    /// Also write the modulated spectrogram as a dB heatmap PNG
    #[arg(long, value_name = "PATH")]
    pub spectrogram_png: Option<PathBuf>,
}

impl Args {
    pub fn stft_config(&self) -> StftConfig {
        StftConfig {
            fft_size: self.fft_size,
            hop_size: self.hop_size,
        }
    }

    pub fn raster_config(&self) -> RasterConfig {
        RasterConfig {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            ..RasterConfig::default()
        }
    }

    pub fn embed_params(&self) -> EmbedParams {
        EmbedParams {
            modulation_strength: self.modulation_strength,
            gain_db: self.gain_db,
        }
    }
}
