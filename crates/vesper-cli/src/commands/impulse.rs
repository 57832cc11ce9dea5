//! Impulse response rendering.

use super::common::{parse_key_val, peak, progress_bar, resolve_settings};
use clap::Args;
use std::path::PathBuf;
use vesper_core::linear_to_db;
use vesper_io::{WavSpec, write_wav};
use vesper_reverb::ReverbNetwork;

const BLOCK_FRAMES: usize = 4096;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Length of the rendered response in seconds
    #[arg(long, default_value = "5")]
    seconds: f32,

    /// Preset name or TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override, applied after the preset (e.g., "decay=0.9")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if !args.seconds.is_finite() || args.seconds <= 0.0 {
        anyhow::bail!("--seconds must be positive");
    }

    let sample_rate = args.sample_rate as f32;
    let settings = resolve_settings(args.preset.as_deref(), &args.param, sample_rate)?;
    let mut reverb = ReverbNetwork::with_settings(sample_rate, settings);

    let frames = ((args.seconds * sample_rate).round() as usize).max(1);
    let mut buffer = vec![0.0f32; frames * 2];
    buffer[0] = 1.0;

    println!(
        "Rendering {:.2}s impulse response at {} Hz...",
        args.seconds, args.sample_rate
    );
    let pb = progress_bar(frames as u64)?;
    let mut done = 0;
    for block in buffer.chunks_mut(BLOCK_FRAMES * 2) {
        reverb.process_stereo(block);
        done += block.len() / 2;
        pb.set_position(done as u64);
    }
    pb.finish_with_message("done");

    let wet_peak = peak(&buffer[2..]);
    println!("  Wet peak {:.1} dB", linear_to_db(wet_peak));

    let spec = WavSpec {
        channels: 2,
        sample_rate: args.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    println!("Writing {}...", args.output.display());
    write_wav(&args.output, &buffer, spec)?;
    println!("Done!");

    Ok(())
}
