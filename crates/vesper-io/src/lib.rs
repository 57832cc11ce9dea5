//! WAV file I/O for the vesper reverb.
//!
//! Decodes WAV files into normalized `[-1, 1)` samples laid out the way the
//! reverb consumes them (interleaved `[L, R, L, R, ...]` frames, or a plain
//! mono buffer) and encodes the rendered result back to 16/24-bit PCM or
//! 32-bit float.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vesper_io::{read_wav_stereo, write_wav};
//! use vesper_reverb::ReverbNetwork;
//!
//! let (mut frames, spec) = read_wav_stereo("input.wav")?;
//! let mut reverb = ReverbNetwork::new(spec.sample_rate as f32);
//! reverb.process_stereo(&mut frames);
//! write_wav("output.wav", &frames, spec)?;
//! # Ok::<(), vesper_io::Error>(())
//! ```

mod wav;

pub use wav::{
    WavFormat, WavInfo, WavSpec, append_silence, read_wav, read_wav_info, read_wav_stereo,
    write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's layout or the requested encoding is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The file contains no sample frames.
    #[error("WAV file contains no audio frames")]
    Empty,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
