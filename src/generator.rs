//! Generation orchestration
//!
//! Turns a [`GenerationConfig`] into files on disk: resolves the prompt,
//! renders through the selected provider, writes the WAV and its metadata,
//! then hands the WAV to post-processing when it is enabled and available.

use crate::config::{GenerationConfig, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::engine::{write_metadata, GenerationMetadata, Recorder};
use crate::postprocess::{run_pipeline, FfmpegProcessor, PostProcessor};
use crate::presets::get_preset;
use crate::provider::{auto_detect, get_provider, AudioProvider, ProviderOptions};
use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};
use std::path::PathBuf;

/// Free-form prompts shorter than this are probably mistyped preset names
const MIN_CUSTOM_PROMPT_LEN: usize = 10;

/// Files produced by one generation
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub wav_path: PathBuf,
    pub metadata_path: PathBuf,
    /// Encoded MP3, when post-processing ran
    pub encoded_path: Option<PathBuf>,
    pub metadata: GenerationMetadata,
}

impl GenerationOutput {
    /// The file a listener should use
    pub fn final_path(&self) -> &PathBuf {
        self.encoded_path.as_ref().unwrap_or(&self.wav_path)
    }
}

/// Drives one configured generation run
pub struct AmbienceGenerator {
    config: GenerationConfig,
    provider: Box<dyn AudioProvider>,
    processor: Option<Box<dyn PostProcessor>>,
}

impl AmbienceGenerator {
    /// Select the provider and locate the post-processor.
    ///
    /// A configured provider name must exist; without one the provider is
    /// detected from the environment.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let options = ProviderOptions {
            seed: config.seed,
            require_credentials: config.require_credentials,
        };
        let provider = match &config.provider {
            Some(name) => get_provider(name, &options)?,
            None => auto_detect(&options),
        };
        info!("Using provider: {}", provider.name());

        let processor: Option<Box<dyn PostProcessor>> = if config.post.enabled {
            let found = FfmpegProcessor::locate();
            if found.is_none() {
                warn!("ffmpeg not found on PATH; post-processing will be skipped");
            }
            found.map(|p| Box::new(p) as Box<dyn PostProcessor>)
        } else {
            None
        };

        Ok(Self {
            config,
            provider,
            processor,
        })
    }

    /// Replace the post-processor (None disables post-processing)
    pub fn with_processor(mut self, processor: Option<Box<dyn PostProcessor>>) -> Self {
        self.processor = processor;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn AudioProvider {
        self.provider.as_ref()
    }

    /// Human-readable problems with this run; empty when it can proceed
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mood = self.config.mood.trim();

        if get_preset(mood).is_none() && mood.chars().count() < MIN_CUSTOM_PROMPT_LEN {
            problems.push(format!(
                "Unknown mood '{}'. Use a preset or provide a detailed custom prompt.",
                mood
            ));
        }

        if self.config.duration_minutes < MIN_DURATION_MINUTES {
            problems.push("Duration must be at least 1 minute.".to_string());
        } else if self.config.duration_minutes > MAX_DURATION_MINUTES {
            problems.push("Duration cannot exceed 5 minutes.".to_string());
        }

        if !self.provider.is_available() {
            problems.push(format!(
                "Provider '{}' is not available.\n{}",
                self.provider.name(),
                self.provider.config_help()
            ));
        }

        problems
    }

    /// Render, write the WAV and metadata, then post-process.
    ///
    /// A missing post-processor is not an error: the WAV is still returned.
    pub fn generate(&self) -> Result<GenerationOutput> {
        let mood = self.config.mood.trim();
        let (prompt, label) = match get_preset(mood) {
            Some(preset) => (preset.to_prompt(), preset.name()),
            None => (mood.to_string(), "custom"),
        };

        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

        let duration = self.config.duration_seconds();
        let channels = self
            .config
            .channels
            .unwrap_or_else(|| self.provider.family().native_channels());

        info!(
            "Generating {:.0}s of '{}' with {}",
            duration,
            label,
            self.provider.name()
        );
        let generation = self.provider.generate(&prompt, duration, channels)?;

        let stem = format!("murmur-{}-{}", label, Local::now().format("%Y%m%d_%H%M%S"));
        let wav_path = dir.join(format!("{}.wav", stem));
        let metadata_path = dir.join(format!("{}.json", stem));

        Recorder::write_buffer(&wav_path, &generation.buffer)
            .with_context(|| format!("failed to write {}", wav_path.display()))?;
        write_metadata(&metadata_path, &generation.metadata)
            .with_context(|| format!("failed to write {}", metadata_path.display()))?;
        info!("Wrote {}", wav_path.display());

        let encoded_path = match &self.processor {
            Some(processor) if self.config.post.enabled => {
                let mp3_path = dir.join(format!("{}.mp3", stem));
                Some(run_pipeline(
                    processor.as_ref(),
                    &wav_path,
                    &mp3_path,
                    &self.config.post,
                    duration,
                )?)
            }
            _ => None,
        };

        Ok(GenerationOutput {
            wav_path,
            metadata_path,
            encoded_path,
            metadata: generation.metadata,
        })
    }
}
