//! Parameter listing.

use clap::Args;
use vesper_core::ParameterInfo;
use vesper_reverb::ReverbNetwork;

#[derive(Args)]
pub struct ParamsArgs {
    /// Sample rate the ranges are shown for (bandwidth depends on it)
    #[arg(long, default_value = "48000")]
    sample_rate: u32,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    let reverb = ReverbNetwork::new(args.sample_rate as f32);

    println!("Reverb parameters at {} Hz:", args.sample_rate);
    println!();
    println!(
        "  {:<18} {:<18} {:>12} {:>12} {:>12}",
        "ID", "NAME", "MIN", "MAX", "DEFAULT"
    );
    for index in 0..reverb.param_count() {
        let Some(desc) = reverb.param_info(index) else {
            continue;
        };
        let unit = desc.unit.suffix();
        println!(
            "  {:<18} {:<18} {:>12} {:>12} {:>12}",
            desc.string_id,
            desc.name,
            format!("{}{unit}", desc.min),
            format!("{}{unit}", desc.max),
            format!("{}{unit}", desc.default),
        );
    }
    println!();
    println!("Set with --param <ID>=<VALUE>, e.g. --param size=2 --param wet=-1");

    Ok(())
}
