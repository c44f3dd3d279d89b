//! WAV loading/saving and the decibel gain stage.
//!
//! Input must already be mono; no resampling, channel mixing, or format
//! negotiation happens here. Output is always 32-bit float WAV.

use std::path::Path;

use crate::error::{Error, Result};

/// A mono waveform with its sample rate.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a mono WAV file. Integer PCM is rescaled to [-1, 1]; float input is
/// taken as-is. Multi-channel files are rejected rather than mixed down.
pub fn load_wav(path: &Path) -> Result<Waveform> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| Error::Format(format!("{}: {}", path.display(), e)))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(Error::Format(format!(
            "{}: expected mono input, got {} channels",
            path.display(),
            spec.channels
        )));
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    if samples.is_empty() {
        return Err(Error::Format(format!(
            "{}: file contains no samples",
            path.display()
        )));
    }

    log::debug!(
        "loaded {} samples @ {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(Waveform {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write a waveform as mono 32-bit float WAV, overwriting any existing file.
pub fn save_wav(path: &Path, waveform: &Waveform) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| Error::Format(format!("{}: {}", path.display(), e)))?;
    for &sample in &waveform.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!(
        "wrote {} samples @ {} Hz to {}",
        waveform.samples.len(),
        waveform.sample_rate,
        path.display()
    );
    Ok(())
}

/// Convert a decibel gain to a linear amplitude multiplier.
pub fn db_to_linear(gain_db: f32) -> f32 {
    10f32.powf(gain_db / 20.0)
}

/// Scale the waveform in place by 10^(gain_db / 20).
pub fn apply_gain_db(waveform: &mut Waveform, gain_db: f32) {
    let factor = db_to_linear(gain_db);
    for sample in &mut waveform.samples {
        *sample *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("specmark_audio_{}_{}", std::process::id(), name))
    }

    fn tone(freq_hz: f32, duration_secs: f32, sample_rate: u32) -> Waveform {
        let n = (duration_secs * sample_rate as f32) as usize;
        let samples = (0..n)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * freq_hz * t).sin()
            })
            .collect();
        Waveform {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn test_zero_db_gain_is_identity() {
        let mut wave = tone(440.0, 0.1, 44100);
        let original = wave.samples.clone();
        apply_gain_db(&mut wave, 0.0);
        assert_eq!(wave.samples, original);
    }

    #[test]
    fn test_gain_is_additive_in_db() {
        let mut sequential = tone(440.0, 0.05, 44100);
        apply_gain_db(&mut sequential, 6.0);
        apply_gain_db(&mut sequential, 14.0);

        let mut combined = tone(440.0, 0.05, 44100);
        apply_gain_db(&mut combined, 20.0);

        for (a, b) in sequential.samples.iter().zip(&combined.samples) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_db_to_linear_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(20.0) - 10.0).abs() < 1e-5);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_wav_round_trip() {
        let path = temp_path("roundtrip.wav");
        let wave = tone(440.0, 0.1, 44100);
        save_wav(&path, &wave).unwrap();

        let loaded = load_wav(&path).unwrap();
        assert_eq!(loaded.sample_rate, 44100);
        assert_eq!(loaded.samples.len(), wave.samples.len());
        for (a, b) in loaded.samples.iter().zip(&wave.samples) {
            assert!((a - b).abs() < 1e-6);
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_int16_input_rescaled() {
        let path = temp_path("int16.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let loaded = load_wav(&path).unwrap();
        assert!((loaded.samples[0] - (i16::MAX as f32 / 32768.0)).abs() < 1e-6);
        assert_eq!(loaded.samples[1], 0.0);
        assert!((loaded.samples[2] + 1.0).abs() < 1e-6);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_stereo_input_rejected() {
        let path = temp_path("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.1f32).unwrap();
        writer.write_sample(0.2f32).unwrap();
        writer.finalize().unwrap();

        let err = load_wav(&path).unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_input_is_format_error() {
        let err = load_wav(Path::new("/nonexistent/specmark.wav")).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
