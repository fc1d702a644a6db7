//! Error types for the synthesis core.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while rendering or packaging audio.
///
/// An unrecognized mood is not represented here: detection always resolves
/// to some mood, falling back to the generic ambient recipe.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Requested duration was zero, negative or not a number.
    #[error("invalid duration: {duration} seconds (must be > 0)")]
    InvalidDuration {
        /// The rejected duration.
        duration: f64,
    },

    /// Requested channel count was neither mono nor stereo.
    #[error("invalid channel count: {channels} (expected 1 or 2)")]
    InvalidChannels {
        /// The rejected channel count.
        channels: u16,
    },

    /// No provider is registered under this name.
    #[error("unknown provider '{name}'. Available: {available}")]
    UnknownProvider {
        /// The requested provider name.
        name: String,
        /// Comma-separated list of registered names.
        available: String,
    },

    /// The provider's capability check failed.
    #[error("provider '{provider}' is not available\n{help}")]
    ProviderUnavailable {
        /// Provider name.
        provider: String,
        /// Setup instructions for the provider.
        help: String,
    },

    /// A numeric failure inside the render loop.
    #[error("{provider} synthesis failed for mood '{mood}': {message}")]
    Synthesis {
        /// Provider family that was rendering.
        provider: String,
        /// Mood being rendered.
        mood: String,
        /// What went wrong.
        message: String,
    },

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV container error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Metadata serialization error.
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl SynthError {
    /// Creates a synthesis error with its mood/provider context.
    pub fn synthesis(
        provider: impl Into<String>,
        mood: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Synthesis {
            provider: provider.into(),
            mood: mood.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_message() {
        let err = SynthError::InvalidDuration { duration: 0.0 };
        assert!(err.to_string().contains("0 seconds"));
    }

    #[test]
    fn test_synthesis_helper_carries_context() {
        let err = SynthError::synthesis("audiogen", "forest_cafe", "non-finite sample");
        let msg = err.to_string();
        assert!(msg.contains("audiogen"));
        assert!(msg.contains("forest_cafe"));
        assert!(msg.contains("non-finite sample"));
    }

    #[test]
    fn test_unavailable_includes_help() {
        let err = SynthError::ProviderUnavailable {
            provider: "bark".to_string(),
            help: "Install the model cache".to_string(),
        };
        assert!(err.to_string().contains("Install the model cache"));
    }
}
