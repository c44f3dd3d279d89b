//! End-to-end pipeline tests over real temp WAV files.

use std::path::PathBuf;

use specmark::audio::{load_wav, save_wav};
use specmark::params::{EmbedParams, StftConfig};
use specmark::pipeline::{create_tone, Pipeline};
use specmark::stft;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("specmark_e2e_{}_{}", std::process::id(), name))
}

fn write_tone_input(name: &str) -> PathBuf {
    let path = temp_path(name);
    let tone = create_tone(440.0, 1.0, 44100);
    save_wav(&path, &tone).unwrap();
    path
}

#[test]
fn tone_survives_noop_embedding() {
    let input = write_tone_input("noop_in.wav");
    let output = temp_path("noop_out.wav");

    let pipeline = Pipeline {
        params: EmbedParams {
            modulation_strength: 0.0,
            gain_db: 0.0,
        },
        ..Pipeline::default()
    };
    let summary = pipeline.run(&input, "HI", &output).unwrap();

    // Duration shrinks by less than one analysis window
    let fft_size = pipeline.stft.fft_size;
    let out = load_wav(&output).unwrap();
    assert!(out.samples.len() <= 44100);
    assert!(44100 - out.samples.len() < fft_size);
    assert!((summary.output_duration_secs - 1.0).abs() < fft_size as f32 / 44100.0);

    // Dominant frequency stays at 440 Hz (within one bin)
    let spec = stft::forward(&out, &pipeline.stft).unwrap();
    let bin_hz = 44100.0 / fft_size as f32;
    assert!((spec.dominant_frequency() - 440.0).abs() <= bin_hz);

    // With strength 0 the modulation is a no-op, so interior samples match
    // the input up to STFT round-trip error
    let original = load_wav(&input).unwrap();
    for i in fft_size..out.samples.len() - fft_size {
        assert!(
            (out.samples[i] - original.samples[i]).abs() < 2e-3,
            "sample {} diverged: {} vs {}",
            i,
            out.samples[i],
            original.samples[i]
        );
    }

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn noop_embedding_is_message_independent() {
    let input = write_tone_input("msg_indep_in.wav");
    let out_a = temp_path("msg_indep_a.wav");
    let out_b = temp_path("msg_indep_b.wav");

    let pipeline = Pipeline {
        params: EmbedParams {
            modulation_strength: 0.0,
            gain_db: 3.0,
        },
        ..Pipeline::default()
    };
    pipeline.run(&input, "FIRST MESSAGE", &out_a).unwrap();
    pipeline.run(&input, "something else?", &out_b).unwrap();

    let a = load_wav(&out_a).unwrap();
    let b = load_wav(&out_b).unwrap();
    assert_eq!(a.samples, b.samples);

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&out_a);
    let _ = std::fs::remove_file(&out_b);
}

#[test]
fn double_gain_compounds_to_net_db() {
    let input = write_tone_input("gain_in.wav");
    let out_flat = temp_path("gain_flat.wav");
    let out_boosted = temp_path("gain_boosted.wav");

    let base = Pipeline {
        params: EmbedParams {
            modulation_strength: 0.0,
            gain_db: 0.0,
        },
        ..Pipeline::default()
    };
    base.run(&input, "", &out_flat).unwrap();

    let boosted = Pipeline {
        params: EmbedParams {
            modulation_strength: 0.0,
            gain_db: 20.0,
        },
        ..Pipeline::default()
    };
    boosted.run(&input, "", &out_boosted).unwrap();

    // 20 dB applied twice = 10^(20/10) = 100x amplitude
    let flat = load_wav(&out_flat).unwrap();
    let big = load_wav(&out_boosted).unwrap();
    assert_eq!(flat.samples.len(), big.samples.len());

    let fft_size = base.stft.fft_size;
    for i in fft_size..flat.samples.len() - fft_size {
        assert!(
            (big.samples[i] - 100.0 * flat.samples[i]).abs() < 0.05,
            "sample {}: {} vs 100 * {}",
            i,
            big.samples[i],
            flat.samples[i]
        );
    }

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&out_flat);
    let _ = std::fs::remove_file(&out_boosted);
}

#[test]
fn nonzero_strength_changes_the_spectrogram() {
    let input = write_tone_input("marked_in.wav");
    let output = temp_path("marked_out.wav");
    let heatmap = temp_path("marked_heatmap.png");

    let pipeline = Pipeline::default(); // strength 20, gain 20
    let summary = pipeline.run(&input, "HI", &output).unwrap();

    assert_eq!(summary.freq_bins, 513);
    assert_eq!(
        summary.time_frames,
        StftConfig::default().num_frames(44100)
    );

    // The marked output still analyzes cleanly and the heatmap round-trips
    let out = load_wav(&output).unwrap();
    let marked = stft::forward(&out, &pipeline.stft).unwrap();
    assert!(marked.peak_magnitude() > 0.0);

    specmark::render::save_spectrogram_png(&summary.spectrogram, &heatmap).unwrap();
    assert!(heatmap.exists());

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
    let _ = std::fs::remove_file(&heatmap);
}
