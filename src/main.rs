//! Murmur - Procedural focus ambience from mood prompts

use anyhow::{bail, Result};
use clap::Parser;
use log::LevelFilter;
use murmur::config::{self, GenerationConfig, DEFAULT_CONFIG_FILE, EXAMPLE_CONFIG};
use murmur::presets::PRESETS;
use murmur::provider::{get_config_help, get_provider, list_providers, ProviderOptions};
use murmur::AmbienceGenerator;

mod cli;

use cli::{Cli, Commands, GenerateArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Generate(args) => generate(args)?,

        Commands::Moods => {
            println!("Available moods:\n");
            for preset in PRESETS.iter() {
                println!("  {:<22} {}", preset.name(), preset.description);
                println!("  {:<22} intensity: {}, tempo: {}", "", preset.intensity, preset.tempo);
            }
            println!("\nAny other text is used as a custom prompt.");
        }

        Commands::Providers => {
            println!("Available providers:\n");
            let options = ProviderOptions::default();
            for name in list_providers() {
                let provider = get_provider(name, &options)?;
                println!(
                    "  {:<10} {} [{}]",
                    provider.name(),
                    provider.description(),
                    if provider.is_available() { "available" } else { "unavailable" }
                );
            }
            println!("\n{}", get_config_help());
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Mood: {}", cfg.mood);
                    println!("  Duration: {:.0}s", cfg.duration_seconds());
                    println!(
                        "  Provider: {}",
                        cfg.provider.as_deref().unwrap_or("auto-detect")
                    );
                    println!("  Output: {}", cfg.output_dir.display());
                    match cfg.seed {
                        Some(seed) => println!("  Seed: {}", seed),
                        None => println!("  Seed: random"),
                    }
                    println!(
                        "  Post-processing: {}",
                        if cfg.post.enabled { "enabled" } else { "disabled" }
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = std::path::Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                println!("{} already exists. Not overwriting.", DEFAULT_CONFIG_FILE);
            } else {
                std::fs::write(path, EXAMPLE_CONFIG)?;
                println!("Created {} with example configuration.", DEFAULT_CONFIG_FILE);
            }
        }
    }

    Ok(())
}

/// `--debug` forces debug output; otherwise RUST_LOG applies, defaulting to info
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GenerationConfig::default(),
    };

    if let Some(mood) = args.mood {
        cfg.mood = mood;
    }
    if let Some(duration) = args.duration {
        cfg.duration_minutes = duration;
    }
    if let Some(provider) = args.provider {
        cfg.provider = Some(provider);
    }
    if let Some(output) = args.output {
        cfg.output_dir = output;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(channels) = args.channels {
        cfg.channels = Some(channels);
    }
    if args.no_post {
        cfg.post.enabled = false;
    }
    cfg.validate()?;

    let generator = AmbienceGenerator::new(cfg)?;
    let problems = generator.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  - {}", problem);
        }
        bail!("Configuration has {} problem(s)", problems.len());
    }

    let output = generator.generate()?;
    println!("Mood: {}", output.metadata.detected_mood);
    println!("Seed: {}", output.metadata.seed);
    println!("Saved to {}", output.final_path().display());
    Ok(())
}
