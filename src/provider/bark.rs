//! Compact-family provider
//!
//! Registered as `bark`. Renders 24 kHz mono. In strict mode it expects an
//! existing model cache directory.

use super::{AudioProvider, ProviderOptions};
use crate::mood::Family;
use std::path::{Path, PathBuf};

/// Environment variable naming the model cache directory
pub const CACHE_DIR_VAR: &str = "BARK_CACHE_DIR";

/// 24 kHz mono provider
#[derive(Debug, Clone)]
pub struct BarkProvider {
    cache_dir: Option<PathBuf>,
    require_credentials: bool,
    seed: u64,
}

impl BarkProvider {
    /// Create a provider, reading the cache directory from the environment
    pub fn new(options: &ProviderOptions) -> Self {
        Self {
            cache_dir: std::env::var_os(CACHE_DIR_VAR)
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
            require_credentials: options.require_credentials,
            seed: options.resolve_seed(),
        }
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }
}

impl AudioProvider for BarkProvider {
    fn name(&self) -> &str {
        "bark"
    }

    fn description(&self) -> &str {
        "Bark-style open synthesis (24 kHz mono)"
    }

    fn family(&self) -> Family {
        Family::Compact
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn is_available(&self) -> bool {
        if !self.require_credentials {
            return true;
        }
        self.cache_dir.as_deref().is_some_and(Path::is_dir)
    }

    fn config_help(&self) -> String {
        format!(
            "Bark configuration:\n  \
             The first run downloads model files (~5GB); a GPU is recommended.\n\n  \
             Environment variables:\n    \
             {}: model cache directory\n    \
             CUDA_VISIBLE_DEVICES: GPU selection",
            CACHE_DIR_VAR
        )
    }
}
