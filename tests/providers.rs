//! Provider registry, detection and capability checks

use murmur::presets::PRESETS;
use murmur::provider::{
    get_provider, list_providers, AudioGenProvider, AudioProvider, BarkProvider, ProviderOptions,
};
use murmur::{Mood, SynthError};

#[test]
fn test_prompt_detection_through_providers() {
    let options = ProviderOptions::default();
    for name in list_providers() {
        let provider = get_provider(name, &options).unwrap();
        assert_eq!(
            provider.detect_mood("Gentle rain falls outside a cozy office window"),
            Mood::CalmRainOffice,
            "{}",
            name
        );
        assert_eq!(
            provider.detect_mood("The quiet hum of a spacecraft drifting through deep space"),
            Mood::DeepFocusSpaceship,
            "{}",
            name
        );
        assert_eq!(
            provider.detect_mood("blue elephants dancing"),
            Mood::Ambient,
            "{}",
            name
        );
    }
}

#[test]
fn test_preset_prompts_round_trip_in_both_families() {
    let options = ProviderOptions::default();
    for name in list_providers() {
        let provider = get_provider(name, &options).unwrap();
        for preset in PRESETS.iter() {
            assert_eq!(
                provider.detect_mood(&preset.to_prompt()),
                preset.mood,
                "{} / {}",
                name,
                preset.name()
            );
        }
    }
}

#[test]
fn test_is_available_is_idempotent() {
    let strict = ProviderOptions {
        seed: Some(0),
        require_credentials: true,
    };
    let relaxed = ProviderOptions::default();
    let providers: Vec<Box<dyn AudioProvider>> = vec![
        Box::new(AudioGenProvider::new(&relaxed)),
        Box::new(AudioGenProvider::new(&strict).with_api_key("")),
        Box::new(BarkProvider::new(&relaxed)),
        Box::new(BarkProvider::new(&strict).with_cache_dir("/definitely/not/here")),
    ];
    for provider in &providers {
        let first = provider.is_available();
        let second = provider.is_available();
        assert_eq!(first, second, "{}", provider.name());
    }
    assert!(providers[0].is_available());
    assert!(!providers[1].is_available());
    assert!(providers[2].is_available());
    assert!(!providers[3].is_available());
}

#[test]
fn test_unavailable_provider_produces_no_audio() {
    let strict = ProviderOptions {
        seed: Some(0),
        require_credentials: true,
    };
    let provider = BarkProvider::new(&strict).with_cache_dir("/definitely/not/here");
    match provider.generate("ocean", 60.0, 1) {
        Err(SynthError::ProviderUnavailable { provider, help }) => {
            assert_eq!(provider, "bark");
            assert!(help.contains("BARK_CACHE_DIR"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("strict provider without a cache rendered audio"),
    }
}

#[test]
fn test_unknown_provider() {
    match get_provider("musicgen", &ProviderOptions::default()) {
        Err(SynthError::UnknownProvider { name, available }) => {
            assert_eq!(name, "musicgen");
            assert_eq!(available, "audiogen, bark");
        }
        _ => panic!("expected UnknownProvider"),
    }
}

#[test]
fn test_native_layouts() {
    let options = ProviderOptions {
        seed: Some(4),
        require_credentials: false,
    };
    let studio = get_provider("audiogen", &options).unwrap();
    let compact = get_provider("bark", &options).unwrap();

    let s = studio.generate("forest cafe", 0.1, 2).unwrap();
    assert_eq!((s.metadata.sample_rate, s.metadata.channels), (44100, 2));
    assert_eq!(s.buffer.samples.len(), 8820);

    let c = compact.generate("forest cafe", 0.1, 1).unwrap();
    assert_eq!((c.metadata.sample_rate, c.metadata.channels), (24000, 1));
    assert_eq!(c.buffer.samples.len(), 2400);
    assert_eq!(c.metadata.seed, 4);
}
