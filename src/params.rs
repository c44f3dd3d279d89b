//! Parameter definitions with physical units and documented semantics.
//!
//! Every knob the original tool left to library defaults is an explicit,
//! validated field here so output shapes stay deterministic and testable.

/// Short-time Fourier transform configuration
#[derive(Debug, Clone)]
pub struct StftConfig {
    /// Analysis window length in samples (must be a power of 2)
    pub fft_size: usize,

    /// Hop between consecutive frames in samples.
    /// 256 against a 1024 window = 75% overlap, COLA-safe for Hann.
    pub hop_size: usize,
}

impl Default for StftConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            hop_size: 256,
        }
    }
}

impl StftConfig {
    /// Number of non-redundant frequency bins (DC through Nyquist)
    pub fn freq_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Number of analysis frames for a signal of `num_samples` samples.
    /// Returns 0 when the signal is shorter than one window.
    pub fn num_frames(&self, num_samples: usize) -> usize {
        if num_samples < self.fft_size {
            0
        } else {
            (num_samples - self.fft_size) / self.hop_size + 1
        }
    }

    /// Center frequency of bin `k` in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: u32) -> f32 {
        bin as f32 * sample_rate as f32 / self.fft_size as f32
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        // Tiny windows degenerate: the Hann formula divides by size - 1
        if !self.fft_size.is_power_of_two() || self.fft_size < 8 {
            return Err(format!(
                "FFT size must be power of 2 and >= 8, got {}",
                self.fft_size
            ));
        }
        if self.hop_size == 0 || self.hop_size > self.fft_size {
            return Err(format!(
                "hop size must be in 1..={}, got {}",
                self.fft_size, self.hop_size
            ));
        }
        Ok(())
    }
}

/// Text rasterization canvas configuration
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Canvas width (pixels)
    pub canvas_width: u32,

    /// Canvas height (pixels)
    pub canvas_height: u32,

    /// Nominal glyph height in pixels before fit-to-width shrinking.
    /// Glyphs are 5x7 cells scaled in integer multiples.
    pub glyph_height_px: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            canvas_width: 640,
            canvas_height: 480,
            glyph_height_px: 84, // 12x upscale of the 7-row glyph cell
        }
    }
}

impl RasterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            ));
        }
        if self.glyph_height_px < 7 {
            return Err(format!(
                "glyph height must be at least 7 px, got {}",
                self.glyph_height_px
            ));
        }
        Ok(())
    }
}

/// Embedding strength and gain parameters
#[derive(Debug, Clone)]
pub struct EmbedParams {
    /// Multiplier contrast between text and background regions.
    /// 0 leaves the spectrogram untouched; large values are audible.
    pub modulation_strength: f32,

    /// Gain in dB applied before the forward transform and again after the
    /// inverse, matching the original tool. Net amplitude factor is
    /// 10^(gain_db / 10).
    pub gain_db: f32,
}

impl Default for EmbedParams {
    fn default() -> Self {
        Self {
            modulation_strength: 20.0,
            gain_db: 20.0,
        }
    }
}

impl EmbedParams {
    pub fn validate(&self) -> Result<(), String> {
        if !self.modulation_strength.is_finite() || self.modulation_strength < 0.0 {
            return Err(format!(
                "modulation strength must be finite and >= 0, got {}",
                self.modulation_strength
            ));
        }
        if !self.gain_db.is_finite() {
            return Err(format!("gain must be finite, got {} dB", self.gain_db));
        }
        Ok(())
    }
}
