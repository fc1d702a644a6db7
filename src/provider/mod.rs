//! Audio providers
//!
//! A provider picks a mood from the prompt, renders it with its recipe
//! family, and returns the buffer with a metadata record. Providers are
//! looked up by name or detected from the environment.

mod audio_provider;
mod audiogen;
mod bark;

pub use audio_provider::{AudioProvider, Generation, ProviderOptions};
pub use audiogen::{AudioGenProvider, API_KEY_VAR};
pub use bark::{BarkProvider, CACHE_DIR_VAR};

use crate::error::{SynthError, SynthResult};
use log::debug;

/// Registered provider names, in listing order
const PROVIDERS: [&str; 2] = ["audiogen", "bark"];

/// All registered provider names
pub fn list_providers() -> &'static [&'static str] {
    &PROVIDERS
}

/// Look up a provider by name
pub fn get_provider(name: &str, options: &ProviderOptions) -> SynthResult<Box<dyn AudioProvider>> {
    match name {
        "audiogen" => Ok(Box::new(AudioGenProvider::new(options))),
        "bark" => Ok(Box::new(BarkProvider::new(options))),
        _ => Err(SynthError::UnknownProvider {
            name: name.to_string(),
            available: PROVIDERS.join(", "),
        }),
    }
}

/// Pick a provider from the environment.
///
/// An API key selects `audiogen`, a model cache selects `bark`, and with
/// neither set the default is `audiogen`.
pub fn auto_detect(options: &ProviderOptions) -> Box<dyn AudioProvider> {
    let name = detect_name(|var| std::env::var(var).ok());
    debug!("Auto-detected provider: {}", name);
    match name {
        "bark" => Box::new(BarkProvider::new(options)),
        _ => Box::new(AudioGenProvider::new(options)),
    }
}

fn detect_name(env: impl Fn(&str) -> Option<String>) -> &'static str {
    let set = |var: &str| env(var).is_some_and(|v| !v.is_empty());
    if set(API_KEY_VAR) {
        "audiogen"
    } else if set(CACHE_DIR_VAR) {
        "bark"
    } else {
        "audiogen"
    }
}

/// Setup text for every provider, for `murmur providers`
pub fn get_config_help() -> String {
    let options = ProviderOptions {
        seed: Some(0),
        require_credentials: false,
    };
    PROVIDERS
        .iter()
        .filter_map(|name| get_provider(name, &options).ok())
        .map(|p| p.config_help())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_registry() {
        assert_eq!(list_providers(), &["audiogen", "bark"]);
        let options = ProviderOptions::default();
        assert_eq!(get_provider("audiogen", &options).unwrap().name(), "audiogen");
        assert_eq!(get_provider("bark", &options).unwrap().name(), "bark");
    }

    #[test]
    fn test_unknown_provider_lists_names() {
        let err = get_provider("musicgen", &ProviderOptions::default())
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "unknown provider 'musicgen'. Available: audiogen, bark"
        );
    }

    #[test]
    fn test_detect_name() {
        assert_eq!(detect_name(env_of(&[])), "audiogen");
        assert_eq!(detect_name(env_of(&[(CACHE_DIR_VAR, "/models")])), "bark");
        assert_eq!(
            detect_name(env_of(&[(API_KEY_VAR, "sk"), (CACHE_DIR_VAR, "/models")])),
            "audiogen"
        );
        assert_eq!(detect_name(env_of(&[(API_KEY_VAR, "")])), "audiogen");
    }

    #[test]
    fn test_config_help_covers_all() {
        let help = get_config_help();
        assert!(help.contains(API_KEY_VAR));
        assert!(help.contains(CACHE_DIR_VAR));
    }
}
