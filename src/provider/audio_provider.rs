//! AudioProvider trait and Generation result

use crate::engine::{AudioBuffer, GenerationMetadata, RenderRequest, Renderer};
use crate::error::{SynthError, SynthResult};
use crate::mood::{Family, Mood};
use log::{debug, info};

/// A rendered buffer together with its metadata record
#[derive(Debug, Clone)]
pub struct Generation {
    pub buffer: AudioBuffer,
    pub metadata: GenerationMetadata,
}

/// Options shared by every provider constructor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderOptions {
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Refuse to run unless the provider's external setup is present
    pub require_credentials: bool,
}

impl ProviderOptions {
    pub(crate) fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Trait for audio providers
///
/// A provider owns one recipe family. It turns a text prompt into a mood,
/// renders it, and packages the result.
pub trait AudioProvider: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Recipe family this provider renders
    fn family(&self) -> Family;

    /// Seed for the next render
    fn seed(&self) -> u64;

    /// Capability check. Inspects configuration only; repeated calls agree.
    fn is_available(&self) -> bool;

    /// Static setup instructions
    fn config_help(&self) -> String {
        format!("No special configuration needed for {}", self.name())
    }

    /// Resolve a prompt to a mood. Never fails.
    fn detect_mood(&self, prompt: &str) -> Mood {
        self.family().detect(prompt)
    }

    /// Render `duration_seconds` of audio for `prompt`.
    ///
    /// Availability is checked before anything is synthesized.
    fn generate(
        &self,
        prompt: &str,
        duration_seconds: f64,
        channels: u16,
    ) -> SynthResult<Generation> {
        if !self.is_available() {
            return Err(SynthError::ProviderUnavailable {
                provider: self.name().to_string(),
                help: self.config_help(),
            });
        }

        let mood = self.detect_mood(prompt);
        info!("[{}] Detected mood: {}", self.name(), mood);
        debug!("[{}] Prompt: {}", self.name(), prompt);

        let request = RenderRequest::new(mood, self.family(), duration_seconds, self.seed())
            .with_channels(channels);
        let buffer = Renderer::new(request)?.render()?;

        let metadata = GenerationMetadata {
            sample_rate: buffer.sample_rate,
            channels: buffer.channels,
            detected_mood: mood.as_str().to_string(),
            prompt: prompt.to_string(),
            provider: self.name().to_string(),
            seed: request.seed,
            duration_seconds,
            frames: buffer.frames() as u64,
        };

        Ok(Generation { buffer, metadata })
    }
}
