//! Studio-family provider
//!
//! Registered as `audiogen`. Renders 44.1 kHz stereo; an API key is only
//! demanded when credentials are required.

use super::{AudioProvider, ProviderOptions};
use crate::mood::Family;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// 44.1 kHz stereo provider
#[derive(Debug, Clone)]
pub struct AudioGenProvider {
    api_key: Option<String>,
    require_credentials: bool,
    seed: u64,
}

impl AudioGenProvider {
    /// Create a provider, reading the API key from the environment
    pub fn new(options: &ProviderOptions) -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            require_credentials: options.require_credentials,
            seed: options.resolve_seed(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into()).filter(|k: &String| !k.is_empty());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl AudioProvider for AudioGenProvider {
    fn name(&self) -> &str {
        "audiogen"
    }

    fn description(&self) -> &str {
        "OpenAI-compatible audio generation (44.1 kHz stereo)"
    }

    fn family(&self) -> Family {
        Family::Studio
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn is_available(&self) -> bool {
        !self.require_credentials || self.has_api_key()
    }

    fn config_help(&self) -> String {
        format!(
            "AudioGen configuration:\n  \
             Set the {var} environment variable:\n    \
             export {var}='your-api-key'",
            var = API_KEY_VAR
        )
    }
}
