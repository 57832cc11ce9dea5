//! File-based reverb rendering.

use super::common::{level_summary, parse_key_val, progress_bar, resolve_settings};
use clap::Args;
use std::path::{Path, PathBuf};
use vesper_io::{WavSpec, append_silence, read_wav, read_wav_stereo, write_wav};
use vesper_reverb::ReverbNetwork;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file [default: <INPUT>_reverb.wav]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Preset name or TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override, applied after the preset (e.g., "size=2")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "10")]
    tail: f32,

    /// Output bit depth (16, 24, or 32) [default: input bit depth]
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Render a mono mix-down instead of stereo
    #[arg(long)]
    mono: bool,

    /// Frames per processing block
    #[arg(long, default_value = "4096")]
    block_size: usize,
}

/// `song.wav` -> `song_reverb.wav`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_reverb.wav"))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !args.tail.is_finite() || args.tail < 0.0 {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = if args.mono {
        read_wav(&args.input)?
    } else {
        read_wav_stereo(&args.input)?
    };
    let channels = usize::from(spec.channels);
    let sample_rate = spec.sample_rate as f32;
    let input_frames = samples.len() / channels;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        input_frames,
        spec.sample_rate,
        input_frames as f32 / sample_rate
    );
    let input_levels = level_summary(&samples);

    let settings = resolve_settings(args.preset.as_deref(), &args.param, sample_rate)?;
    let mut reverb = ReverbNetwork::with_settings(sample_rate, settings);

    append_silence(&mut samples, spec, args.tail);
    let total_frames = samples.len() / channels;
    println!(
        "Rendering {} frames ({:.2}s tail)...",
        total_frames,
        (total_frames - input_frames) as f32 / sample_rate
    );

    let pb = progress_bar(total_frames as u64)?;
    let mut done = 0;
    for block in samples.chunks_mut(args.block_size * channels) {
        if args.mono {
            reverb.process_mono(block);
        } else {
            reverb.process_stereo(block);
        }
        done += block.len() / channels;
        pb.set_position(done as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input:  {input_levels}");
    println!("  Output: {}", level_summary(&samples));

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth.unwrap_or(match spec.bits_per_sample {
            16 | 24 | 32 => spec.bits_per_sample,
            _ => 32,
        }),
        ..spec
    };
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    println!("\nWriting {}...", output.display());
    write_wav(&output, &samples, out_spec)?;
    println!("Done!");

    Ok(())
}
