//! Files written by a full generation run

use murmur::config::{GenerationConfig, PostConfig};
use murmur::engine::GenerationMetadata;
use murmur::AmbienceGenerator;
use tempfile::tempdir;

fn config(dir: &std::path::Path) -> GenerationConfig {
    GenerationConfig {
        mood: "ocean_meditation".to_string(),
        duration_minutes: 1.0,
        provider: Some("bark".to_string()),
        output_dir: dir.join("renders"),
        seed: Some(99),
        channels: None,
        require_credentials: false,
        post: PostConfig {
            enabled: false,
            ..PostConfig::default()
        },
    }
}

#[test]
fn test_generate_writes_wav_and_metadata() {
    let dir = tempdir().unwrap();
    let generator = AmbienceGenerator::new(config(dir.path())).unwrap();
    assert!(generator.validate().is_empty());

    let output = generator.generate().unwrap();
    assert!(output.encoded_path.is_none());
    assert_eq!(output.final_path(), &output.wav_path);

    let file_name = output.wav_path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("murmur-ocean_meditation-"), "{}", file_name);
    assert!(file_name.ends_with(".wav"));

    let reader = hound::WavReader::open(&output.wav_path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 1_440_000);

    let text = std::fs::read_to_string(&output.metadata_path).unwrap();
    let metadata: GenerationMetadata = serde_json::from_str(&text).unwrap();
    assert_eq!(metadata, output.metadata);
    assert_eq!(metadata.detected_mood, "ocean_meditation");
    assert_eq!(metadata.provider, "bark");
    assert_eq!(metadata.seed, 99);
    assert_eq!(metadata.duration_seconds, 60.0);
    assert!(metadata.prompt.starts_with("Waves gently lapping"));
}

#[test]
fn test_channel_override_and_custom_prompt() {
    let dir = tempdir().unwrap();
    let cfg = GenerationConfig {
        mood: "a quiet cafe under pine trees".to_string(),
        channels: Some(2),
        duration_minutes: 0.5, // clamped up to one minute
        ..config(dir.path())
    };
    let output = AmbienceGenerator::new(cfg).unwrap().generate().unwrap();

    let name = output.wav_path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("murmur-custom-"), "{}", name);
    assert_eq!(output.metadata.detected_mood, "forest_cafe");
    assert_eq!(output.metadata.channels, 2);
    assert_eq!(output.metadata.frames, 1_440_000);

    let reader = hound::WavReader::open(&output.wav_path).unwrap();
    assert_eq!(reader.spec().channels, 2);
}

#[test]
fn test_same_seed_same_file_contents() {
    let a_dir = tempdir().unwrap();
    let b_dir = tempdir().unwrap();
    let a = AmbienceGenerator::new(config(a_dir.path())).unwrap().generate().unwrap();
    let b = AmbienceGenerator::new(config(b_dir.path())).unwrap().generate().unwrap();
    assert_eq!(
        std::fs::read(&a.wav_path).unwrap(),
        std::fs::read(&b.wav_path).unwrap()
    );
}
