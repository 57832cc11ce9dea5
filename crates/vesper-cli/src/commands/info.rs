//! WAV metadata plus the reverb geometry the file would be rendered with.

use super::common::{level_summary, parse_key_val, resolve_settings};
use clap::Args;
use std::path::PathBuf;
use vesper_io::{WavFormat, WavInfo, read_wav_info, read_wav_stereo};
use vesper_reverb::{LineRole, ReverbNetwork};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,

    /// Preset used for the geometry summary
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override (e.g., "size=2")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Also decode the file and report its levels
    #[arg(long)]
    levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    print_metadata(&args.file, &info)?;

    if info.channels == 0 || info.channels > 2 {
        println!("Note:        only mono and stereo files can be processed");
        return Ok(());
    }

    if args.levels {
        let (samples, _) = read_wav_stereo(&args.file)?;
        println!("Levels:      {}", level_summary(&samples));
    }

    let sample_rate = info.sample_rate as f32;
    let settings = resolve_settings(args.preset.as_deref(), &args.param, sample_rate)?;
    let reverb = ReverbNetwork::with_settings(sample_rate, settings);
    let loop_samples: usize = LineRole::ALL[4..]
        .iter()
        .map(|&role| reverb.line_length(role))
        .sum();

    println!();
    println!("Reverb at {} Hz:", info.sample_rate);
    println!(
        "  Predelay:   {} samples ({:.1} ms)",
        reverb.predelay_samples(),
        to_ms(reverb.predelay_samples(), sample_rate)
    );
    println!(
        "  Tank loop:  {} samples ({:.1} ms)",
        loop_samples,
        to_ms(loop_samples, sample_rate)
    );

    Ok(())
}

fn print_metadata(path: &std::path::Path, info: &WavInfo) -> anyhow::Result<()> {
    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", path.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!(
        "File Size:   {}",
        format_bytes(std::fs::metadata(path)?.len())
    );
    Ok(())
}

fn to_ms(samples: usize, sample_rate: f32) -> f32 {
    samples as f32 * 1000.0 / sample_rate
}

fn format_bytes(bytes: u64) -> String {
    match bytes {
        0..1024 => format!("{bytes} B"),
        1024..1_048_576 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_to_ms() {
        assert_eq!(to_ms(48, 48_000.0), 1.0);
        assert_eq!(to_ms(0, 44_100.0), 0.0);
    }
}
