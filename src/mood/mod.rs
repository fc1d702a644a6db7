//! Mood recipes
//!
//! A mood is a fixed composition of drones, noise beds and scheduled
//! events. Each provider family renders the six moods with its own sample
//! rate, channel layout and noise tuning; [`MoodSynth`] dispatches on the
//! `(family, mood)` pair.

mod compact;
mod studio;

use crate::events::{ScheduledEvent, Timeline};
use crate::synth::{NoiseGenerator, NoiseProfile};
use log::debug;
use std::fmt;

/// One of the six ambience profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    CalmRainOffice,
    ForestCafe,
    DeepFocusSpaceship,
    OceanMeditation,
    NightCodingLofi,
    /// Generic fallback for prompts that match nothing else
    Ambient,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::CalmRainOffice,
        Mood::ForestCafe,
        Mood::DeepFocusSpaceship,
        Mood::OceanMeditation,
        Mood::NightCodingLofi,
        Mood::Ambient,
    ];

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::CalmRainOffice => "calm_rain_office",
            Mood::ForestCafe => "forest_cafe",
            Mood::DeepFocusSpaceship => "deep_focus_spaceship",
            Mood::OceanMeditation => "ocean_meditation",
            Mood::NightCodingLofi => "night_coding_lofi",
            Mood::Ambient => "ambient",
        }
    }

    /// Parse a canonical identifier or short alias
    pub fn from_name(name: &str) -> Option<Mood> {
        match name.trim().to_lowercase().as_str() {
            "calm_rain_office" | "rain" => Some(Mood::CalmRainOffice),
            "forest_cafe" | "forest" => Some(Mood::ForestCafe),
            "deep_focus_spaceship" | "spaceship" => Some(Mood::DeepFocusSpaceship),
            "ocean_meditation" | "ocean" => Some(Mood::OceanMeditation),
            "night_coding_lofi" | "lofi" => Some(Mood::NightCodingLofi),
            "ambient" | "generic" => Some(Mood::Ambient),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider family: a sample rate, a channel layout and a recipe table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// 44.1 kHz, native stereo
    Studio,
    /// 24 kHz, native mono
    Compact,
}

impl Family {
    pub fn sample_rate(&self) -> u32 {
        match self {
            Family::Studio => 44100,
            Family::Compact => 24000,
        }
    }

    pub fn native_channels(&self) -> u16 {
        match self {
            Family::Studio => 2,
            Family::Compact => 1,
        }
    }

    pub fn noise_profile(&self) -> NoiseProfile {
        match self {
            Family::Studio => NoiseProfile::STUDIO,
            Family::Compact => NoiseProfile::COMPACT,
        }
    }

    /// Name of the provider that renders this family
    pub fn provider_name(&self) -> &'static str {
        match self {
            Family::Studio => "audiogen",
            Family::Compact => "bark",
        }
    }

    /// Resolve a prompt to a mood by case-insensitive keyword match.
    ///
    /// Never fails: unmatched prompts resolve to [`Mood::Ambient`].
    pub fn detect(&self, prompt: &str) -> Mood {
        let p = prompt.to_lowercase();
        let has = |word: &str| p.contains(word);

        match self {
            Family::Studio => {
                if has("rain") && has("office") {
                    Mood::CalmRainOffice
                } else if has("forest") && has("cafe") {
                    Mood::ForestCafe
                } else if has("space") || has("spaceship") {
                    Mood::DeepFocusSpaceship
                } else if has("ocean") || has("wave") || has("beach") {
                    Mood::OceanMeditation
                } else if has("lofi") || has("coding") || has("night") {
                    Mood::NightCodingLofi
                } else {
                    Mood::Ambient
                }
            }
            Family::Compact => {
                if has("rain") && has("office") {
                    Mood::CalmRainOffice
                } else if has("forest") || has("cafe") {
                    Mood::ForestCafe
                } else if has("space") || has("ship") {
                    Mood::DeepFocusSpaceship
                } else if has("ocean") || has("wave") || has("beach") {
                    Mood::OceanMeditation
                } else if has("lofi") || has("coding") || has("night") {
                    Mood::NightCodingLofi
                } else if has("rain") {
                    Mood::CalmRainOffice
                } else if has("zen") || has("meditation") {
                    Mood::OceanMeditation
                } else {
                    Mood::Ambient
                }
            }
        }
    }
}

/// One output instant before channel adaptation and clipping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub right: f64,
}

impl Frame {
    pub fn stereo(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn mono(value: f64) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.right.is_finite()
    }

    /// Average of both channels
    pub fn mid(&self) -> f64 {
        (self.left + self.right) * 0.5
    }
}

/// Values drawn once per render that stay fixed for every sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voicing {
    /// Frequency multiplier per chord partial
    pub detune: [f64; 4],
}

impl Default for Voicing {
    fn default() -> Self {
        Self { detune: [1.0; 4] }
    }
}

/// A mood recipe bound to a provider family
#[derive(Debug, Clone)]
pub struct MoodSynth {
    mood: Mood,
    family: Family,
    voicing: Voicing,
}

impl MoodSynth {
    pub fn new(mood: Mood, family: Family) -> Self {
        Self {
            mood,
            family,
            voicing: Voicing::default(),
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn voicing(&self) -> &Voicing {
        &self.voicing
    }

    /// Draw every per-render random choice and schedule all event streams.
    ///
    /// Must run once, before the first call to [`MoodSynth::frame`].
    pub fn prepare(&mut self, duration: f64, noise: &mut NoiseGenerator) -> Timeline {
        let streams = match self.family {
            Family::Studio => studio::prepare(self.mood, duration, noise, &mut self.voicing),
            Family::Compact => compact::prepare(self.mood, duration, noise),
        };
        let timeline = Timeline::from_streams(streams);
        debug!(
            "{}/{}: scheduled {} events over {:.1}s",
            self.family.provider_name(),
            self.mood,
            timeline.len(),
            duration
        );
        timeline
    }

    /// Synthesize the frame at `t` seconds given the events sounding then
    pub fn frame(&self, t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
        match self.family {
            Family::Studio => studio::frame(self.mood, &self.voicing, t, active, noise),
            Family::Compact => compact::frame(self.mood, t, active, noise),
        }
    }
}
