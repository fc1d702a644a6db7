//! CLI interface for Murmur

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Procedural focus ambience from mood prompts
#[derive(Parser)]
#[command(name = "murmur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an ambience track
    Generate(GenerateArgs),

    /// List mood presets
    Moods,

    /// List providers and how to set them up
    Providers,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "murmur.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}

/// Flags for `generate`; each one overrides the config file
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Preset name or free-form prompt
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Duration in minutes (1-5)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Provider (audiogen or bark; default: auto-detect)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output channels (1 or 2)
    #[arg(long)]
    pub channels: Option<u16>,

    /// Skip normalization, fades, loop smoothing and encoding
    #[arg(long)]
    pub no_post: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
