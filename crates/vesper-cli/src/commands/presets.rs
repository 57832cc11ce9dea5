//! Preset management commands.

use super::common::{load_preset, parse_key_val};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use vesper_config::{
    ReverbPreset, ensure_user_presets_dir, factory_presets, list_user_presets, parse_param,
    preset_name_from_path, user_presets_dir,
};
use vesper_reverb::ParamKind;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show the resolved values of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Sample rate used to resolve defaults
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// Save parameter values as a preset
    Save {
        /// Name for the new preset
        name: String,

        /// Destination file [default: user presets directory]
        path: Option<PathBuf>,

        /// Start from an existing preset
        #[arg(short, long)]
        from: Option<String>,

        /// Parameter value to store (e.g., "decay=0.9")
        #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
        param: Vec<(String, String)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show the user presets directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name, sample_rate } => show_preset(&name, sample_rate),
        PresetsCommand::Save {
            name,
            path,
            from,
            param,
            description,
            force,
        } => save_preset(
            &name,
            path,
            from.as_deref(),
            &param,
            description.as_deref(),
            force,
        ),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: vesper presets save <name> --param decay=0.9\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match ReverbPreset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(_) => println!("  {:20} - (error loading)", name),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str, sample_rate: u32) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let settings = preset.to_settings(sample_rate as f32)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
    }
    println!();

    for kind in ParamKind::ALL {
        let marker = if preset.get(kind).is_some() { "*" } else { " " };
        println!(
            "  {marker} {:<18} {}{}",
            kind.as_str(),
            settings.get(kind),
            kind.descriptor().unit.suffix()
        );
    }
    println!();
    println!("  * set by the preset, others use stock values at {sample_rate} Hz");

    Ok(())
}

fn save_preset(
    name: &str,
    path: Option<PathBuf>,
    from: Option<&str>,
    params: &[(String, String)],
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let mut preset = match from {
        Some(base) => ReverbPreset {
            name: name.to_string(),
            ..load_preset(base)?
        },
        None => ReverbPreset::new(name),
    };
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    for (key, value) in params {
        preset = preset.with_param(parse_param(key, value)?);
    }
    preset.validate()?;

    let path = match path {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(format!("{name}.toml")),
    };
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    preset.save(&path)?;
    println!("Saved preset '{}' to {}", preset.name, path.display());
    Ok(())
}
