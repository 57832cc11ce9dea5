//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
///
/// 32-bit files are written as IEEE float, narrower depths as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Decodes every sample of a one- or two-channel file into `[-1, 1)`.
fn read_normalized(path: &Path) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    if spec.channels == 0 || spec.channels > 2 {
        return Err(Error::UnsupportedFormat(format!(
            "{} channels (only mono and stereo are supported)",
            spec.channels
        )));
    }
    if reader.len() == 0 {
        return Err(Error::Empty);
    }

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::info!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len() / usize::from(spec.channels),
        "read WAV"
    );

    Ok((samples, spec))
}

/// Read a WAV file as interleaved stereo frames.
///
/// Mono files are duplicated to both channels. The returned spec describes
/// the returned buffer: two channels at the file's rate and bit depth.
/// Files with more than two channels or no frames are rejected.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let (samples, spec) = read_normalized(path.as_ref())?;
    let interleaved = if spec.channels == 1 {
        samples.iter().flat_map(|&s| [s, s]).collect()
    } else {
        samples
    };
    Ok((interleaved, WavSpec { channels: 2, ..spec }))
}

/// Read a WAV file as a mono buffer.
///
/// Stereo files are mixed down by averaging the two channels. The returned
/// spec has one channel.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let (samples, spec) = read_normalized(path.as_ref())?;
    let mono = if spec.channels == 2 {
        samples
            .chunks_exact(2)
            .map(|frame| (frame[0] + frame[1]) * 0.5)
            .collect()
    } else {
        samples
    };
    Ok((mono, WavSpec { channels: 1, ..spec }))
}

/// Write interleaved samples to a WAV file.
///
/// Integer depths clamp to the representable range; 32-bit writes float.
///
/// # Example
/// ```no_run
/// use vesper_io::{WavSpec, write_wav};
///
/// let frames = vec![0.0f32; 2 * 44100];
/// write_wav("silence.wav", &frames, WavSpec::default())?;
/// # Ok::<(), vesper_io::Error>(())
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (use 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }
    if spec.channels == 0 || samples.len() % usize::from(spec.channels) != 0 {
        return Err(Error::UnsupportedFormat(format!(
            "{} samples do not form whole {}-channel frames",
            samples.len(),
            spec.channels
        )));
    }

    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;

    tracing::info!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len() / usize::from(spec.channels),
        "wrote WAV"
    );
    Ok(())
}

/// Appends `seconds` of silence to an interleaved buffer laid out as `spec`.
///
/// Non-positive or non-finite durations append nothing.
pub fn append_silence(samples: &mut Vec<f32>, spec: WavSpec, seconds: f32) {
    if !seconds.is_finite() || seconds <= 0.0 {
        return;
    }
    let frames = (f64::from(seconds) * f64::from(spec.sample_rate)).round() as usize;
    samples.resize(samples.len() + frames * usize::from(spec.channels), 0.0);
}
