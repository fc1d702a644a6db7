//! Mood presets
//!
//! Each preset describes one mood in words. The prompt built from it is
//! what providers see, so preset prompts always detect back to their mood.

use crate::mood::Mood;

/// A named mood description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodPreset {
    pub mood: Mood,
    pub description: &'static str,
    pub style: &'static str,
    pub tempo: &'static str,
    pub intensity: &'static str,
    pub elements: &'static [&'static str],
}

impl MoodPreset {
    pub fn name(&self) -> &'static str {
        self.mood.as_str()
    }

    /// Full generation prompt
    pub fn to_prompt(&self) -> String {
        format!(
            "{}. Style: {}. Key elements: {}. Tempo: {}. \
             Create a seamless, loop-friendly ambient soundscape.",
            self.description,
            self.style,
            self.elements.join(", "),
            self.tempo
        )
    }
}

pub static PRESETS: [MoodPreset; 5] = [
    MoodPreset {
        mood: Mood::CalmRainOffice,
        description: "Gentle rain falling outside a cozy office window",
        style: "soft, atmospheric, minimal, calming",
        tempo: "very slow",
        intensity: "low",
        elements: &[
            "soft rain on glass",
            "distant thunder rumbles",
            "subtle keyboard clicks",
            "quiet air conditioning hum",
            "occasional paper rustling",
        ],
    },
    MoodPreset {
        mood: Mood::ForestCafe,
        description: "A peaceful cafe nestled in a forest clearing",
        style: "organic, warm, natural, inviting",
        tempo: "slow",
        intensity: "low-medium",
        elements: &[
            "birdsong in trees",
            "gentle breeze through leaves",
            "distant cafe chatter",
            "coffee machine sounds",
            "wooden wind chimes",
            "stream trickling nearby",
        ],
    },
    MoodPreset {
        mood: Mood::DeepFocusSpaceship,
        description: "The quiet hum of a spacecraft drifting through deep space",
        style: "futuristic, minimal, droning, hypnotic",
        tempo: "static",
        intensity: "very low",
        elements: &[
            "engine resonance",
            "life support systems",
            "subtle electronic pulses",
            "distant star frequencies",
            "cabin pressurization",
            "control panel beeps",
        ],
    },
    MoodPreset {
        mood: Mood::OceanMeditation,
        description: "Waves gently lapping on a secluded beach at sunset",
        style: "rhythmic, breathing, vast, peaceful",
        tempo: "very slow (wave rhythm)",
        intensity: "medium",
        elements: &[
            "ocean waves",
            "seagulls in distance",
            "sand shifting",
            "gentle wind",
            "underwater resonance",
            "shell sounds",
        ],
    },
    MoodPreset {
        mood: Mood::NightCodingLofi,
        description: "Late night coding session with lofi beats and city ambience",
        style: "chill, nostalgic, urban, focused",
        tempo: "slow hip-hop beat",
        intensity: "medium",
        elements: &[
            "lofi hip-hop drums",
            "vinyl crackle",
            "jazz piano samples",
            "distant city traffic",
            "rain on window",
            "keyboard typing",
            "muted bass",
        ],
    },
];

/// Look up a preset by mood name or alias
pub fn get_preset(name: &str) -> Option<&'static MoodPreset> {
    let mood = Mood::from_name(name)?;
    PRESETS.iter().find(|p| p.mood == mood)
}

pub fn list_presets() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(MoodPreset::name)
}

/// Expand a preset name to its prompt; any other text is a custom prompt
pub fn resolve_prompt(mood_or_prompt: &str) -> String {
    match get_preset(mood_or_prompt) {
        Some(preset) => preset.to_prompt(),
        None => mood_or_prompt.to_string(),
    }
}
