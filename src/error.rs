//! Fatal error taxonomy for the embedding pipeline.
//!
//! Every failure aborts the run; there is no retry or partial recovery.

use std::fmt;

/// Pipeline error. All variants are fatal.
#[derive(Debug)]
pub enum Error {
    /// Input is not a readable WAV file in a usable layout, or the output
    /// path cannot be written.
    Format(String),

    /// The spectrogram or inverse computation cannot run (empty or
    /// degenerate waveform, empty spectrogram).
    Transform(String),

    /// Text rasterization, resize, or PNG encoding failed.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(msg) => write!(f, "file format error: {}", msg),
            Error::Transform(msg) => write!(f, "transform error: {}", msg),
            Error::Render(msg) => write!(f, "render error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Format(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = Error::Format("not a wav".to_string());
        assert!(err.to_string().contains("file format"));

        let err = Error::Transform("waveform too short".to_string());
        assert!(err.to_string().contains("transform"));
    }

    #[test]
    fn test_hound_error_maps_to_format() {
        let err: Error = hound::Error::FormatError("bad riff header").into();
        assert!(matches!(err, Error::Format(_)));
    }
}
