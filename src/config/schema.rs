//! Configuration schema definitions

use crate::provider::list_providers;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shortest render in minutes
pub const MIN_DURATION_MINUTES: f64 = 1.0;
/// Longest render in minutes
pub const MAX_DURATION_MINUTES: f64 = 5.0;

/// Main configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Preset name or a free-form prompt (default: calm_rain_office)
    #[serde(default = "default_mood")]
    pub mood: String,

    /// Length in minutes, clamped to [1, 5] (default: 3)
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: f64,

    /// Provider name (None = auto-detect)
    #[serde(default)]
    pub provider: Option<String>,

    /// Output directory (default: ./output)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Render seed (None = fresh entropy, recorded in metadata)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Output channel count (None = provider's native layout)
    #[serde(default)]
    pub channels: Option<u16>,

    /// Fail unless the provider's external setup is present
    #[serde(default)]
    pub require_credentials: bool,

    /// Post-processing settings
    #[serde(default)]
    pub post: PostConfig,
}

fn default_mood() -> String { "calm_rain_office".to_string() }
fn default_duration_minutes() -> f64 { 3.0 }
fn default_output_dir() -> PathBuf { PathBuf::from("./output") }

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mood: default_mood(),
            duration_minutes: default_duration_minutes(),
            provider: None,
            output_dir: default_output_dir(),
            seed: None,
            channels: None,
            require_credentials: false,
            post: PostConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.mood.trim().is_empty() {
            bail!("Mood must not be empty");
        }
        if !self.duration_minutes.is_finite() || self.duration_minutes <= 0.0 {
            bail!("Duration must be a positive number of minutes");
        }
        if let Some(provider) = &self.provider {
            if !list_providers().contains(&provider.as_str()) {
                bail!(
                    "Unknown provider '{}'. Available: {}",
                    provider,
                    list_providers().join(", ")
                );
            }
        }
        if let Some(channels) = self.channels {
            if channels != 1 && channels != 2 {
                bail!("Channels must be 1 or 2");
            }
        }
        self.post.validate()
    }

    /// Render length in seconds, clamped to [60, 300]
    pub fn duration_seconds(&self) -> f64 {
        self.duration_minutes
            .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
            * 60.0
    }
}

/// Post-processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostConfig {
    /// Run the post-processing pipeline at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Loudness-normalize (default: true)
    #[serde(default = "default_true")]
    pub normalize: bool,

    /// Integrated loudness target in LUFS (default: -16)
    #[serde(default = "default_target_lufs")]
    pub target_lufs: f64,

    /// Fade-in seconds (default: 0.5)
    #[serde(default = "default_fade")]
    pub fade_in: f64,

    /// Fade-out seconds (default: 0.5)
    #[serde(default = "default_fade")]
    pub fade_out: f64,

    /// Crossfade the tail into the head for seamless looping (default: true)
    #[serde(default = "default_true")]
    pub loop_optimize: bool,

    /// Loop crossfade seconds (default: 1.0)
    #[serde(default = "default_crossfade")]
    pub crossfade: f64,

    /// MP3 bitrate (default: 192k)
    #[serde(default = "default_bitrate")]
    pub bitrate: String,
}

fn default_true() -> bool { true }
fn default_target_lufs() -> f64 { -16.0 }
fn default_fade() -> f64 { 0.5 }
fn default_crossfade() -> f64 { 1.0 }
fn default_bitrate() -> String { "192k".to_string() }

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            normalize: true,
            target_lufs: default_target_lufs(),
            fade_in: default_fade(),
            fade_out: default_fade(),
            loop_optimize: true,
            crossfade: default_crossfade(),
            bitrate: default_bitrate(),
        }
    }
}

impl PostConfig {
    pub fn validate(&self) -> Result<()> {
        if !(-70.0..=0.0).contains(&self.target_lufs) {
            bail!("Target loudness must be between -70 and 0 LUFS");
        }
        if self.fade_in < 0.0 || self.fade_out < 0.0 {
            bail!("Fade lengths must not be negative");
        }
        if self.crossfade < 0.0 {
            bail!("Crossfade must not be negative");
        }
        if self.bitrate.trim().is_empty() {
            bail!("Bitrate must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.mood, "calm_rain_office");
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert!(config.post.enabled);
        assert_eq!(config.post.target_lufs, -16.0);
        assert_eq!(config.post.bitrate, "192k");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duration_clamp() {
        let mut config = GenerationConfig::default();
        config.duration_minutes = 0.2;
        assert_eq!(config.duration_seconds(), 60.0);
        config.duration_minutes = 12.0;
        assert_eq!(config.duration_seconds(), 300.0);
        config.duration_minutes = 2.5;
        assert_eq!(config.duration_seconds(), 150.0);
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let config = GenerationConfig {
            provider: Some("musicgen".to_string()),
            ..GenerationConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("musicgen"));
        assert!(err.contains("audiogen, bark"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_channels = GenerationConfig {
            channels: Some(4),
            ..GenerationConfig::default()
        };
        assert!(bad_channels.validate().is_err());

        let bad_duration = GenerationConfig {
            duration_minutes: -1.0,
            ..GenerationConfig::default()
        };
        assert!(bad_duration.validate().is_err());

        let mut loud = GenerationConfig::default();
        loud.post.target_lufs = 3.0;
        assert!(loud.validate().is_err());
    }
}
