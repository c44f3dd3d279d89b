//! specmark - embed a text message into the spectrogram of a WAV file.
//!
//! The message is rasterized, resized onto the audio's STFT magnitude grid,
//! and multiplied in as an intensity modulation, so the text shows up when
//! the output's spectrogram is visualized.

pub mod audio;
pub mod cli;
pub mod embed;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod stft;
