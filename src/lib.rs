//! Murmur - Procedural focus ambience from mood prompts
//!
//! Renders ambient soundscapes from arithmetic alone: shaped noise,
//! oscillator drones and pre-scheduled transient events. A text prompt picks
//! the mood, a provider family fixes the sample rate and channel layout, and
//! the engine produces deterministic 16-bit PCM for a given seed.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod mood;
pub mod postprocess;
pub mod presets;
pub mod provider;
pub mod synth;

pub use config::GenerationConfig;
pub use engine::{AudioBuffer, RenderRequest, Renderer};
pub use error::{SynthError, SynthResult};
pub use generator::AmbienceGenerator;
pub use mood::{Family, Mood};
