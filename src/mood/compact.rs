//! 24 kHz mono recipes
//!
//! Leaner beds built from band-filtered noise, with strictly periodic
//! events and a fixed output trim per mood.

use super::{Frame, Mood};
use crate::events::{
    EventKind, EventPattern, EventScheduler, Pitch, ScheduledEvent, Step, StepSequencer,
    BEATS_PER_BAR,
};
use crate::synth::{
    cycle_phase, exp_decay, half_sine, partials, sine, Envelope, Lfo, NoiseGenerator,
};
use std::f64::consts::PI;

const DRIPS: EventPattern = EventPattern::periodic(EventKind::Drip, 0.0, 1.8, 150.0 / 24000.0);
const THUNDER: EventPattern = EventPattern::periodic(EventKind::Thunder, 0.0, 40.0, 3.0);
const BIRD: EventPattern =
    EventPattern::periodic(EventKind::Bird, 0.0, 4.2, 0.2).with_pitch(Pitch::Fixed(2600.0));
const BIRD_CALL: EventPattern =
    EventPattern::periodic(EventKind::BirdCall, 5.3, 6.8, 0.35).with_pitch(Pitch::Fixed(1600.0));
const BEEP: EventPattern =
    EventPattern::periodic(EventKind::Beep, 0.0, 15.0, 0.08).with_pitch(Pitch::Fixed(800.0));
const GULL: EventPattern =
    EventPattern::periodic(EventKind::Seagull, 0.0, 30.0, 0.6).with_pitch(Pitch::Fixed(1600.0));

const LOFI_BPM: f64 = 72.0;
const LOFI_BASS: [f64; 4] = [55.0, 55.0, 73.4, 65.4];
const LOFI_CHORDS: [[f64; 4]; 4] = [
    [262.0, 330.0, 392.0, 466.0],
    [220.0, 262.0, 330.0, 392.0],
    [175.0, 220.0, 262.0, 330.0],
    [196.0, 247.0, 294.0, 349.0],
];
const BARS_PER_CHORD: f64 = 2.0;

fn lofi_bar() -> f64 {
    60.0 / LOFI_BPM * BEATS_PER_BAR
}

/// Hit lengths are fractions of a bar
fn lofi_steps() -> Vec<Step> {
    let bar = lofi_bar();
    let mut steps = vec![
        Step::new(EventKind::Kick, 0.0, 0.04 * bar, 1.0),
        Step::new(EventKind::Kick, 2.0, 0.04 * bar, 1.0),
        Step::new(EventKind::Snare, 1.0, 0.025 * bar, 1.0),
        Step::new(EventKind::Snare, 3.0, 0.025 * bar, 1.0),
    ];
    for i in 0..8 {
        steps.push(Step::new(EventKind::HiHat, i as f64 * 0.5, 0.015 * bar, 1.0));
    }
    steps
}

/// Every compact stream is periodic, so scheduling consumes no randomness.
pub(super) fn prepare(
    mood: Mood,
    duration: f64,
    noise: &mut NoiseGenerator,
) -> Vec<Vec<ScheduledEvent>> {
    let patterns: &[EventPattern] = match mood {
        Mood::CalmRainOffice => &[DRIPS, THUNDER],
        Mood::ForestCafe => &[BIRD, BIRD_CALL],
        Mood::DeepFocusSpaceship => &[BEEP],
        Mood::OceanMeditation => &[GULL],
        Mood::NightCodingLofi => {
            return vec![StepSequencer::new(LOFI_BPM, &lofi_steps()).schedule(duration)];
        }
        Mood::Ambient => &[],
    };

    patterns
        .iter()
        .map(|p| EventScheduler::new(*p).schedule(duration, noise))
        .collect()
}

pub(super) fn frame(
    mood: Mood,
    t: f64,
    active: &[ScheduledEvent],
    noise: &mut NoiseGenerator,
) -> Frame {
    let value = match mood {
        Mood::CalmRainOffice => rain(t, active, noise),
        Mood::ForestCafe => forest(t, active, noise),
        Mood::DeepFocusSpaceship => space(t, active, noise),
        Mood::OceanMeditation => ocean(t, active, noise),
        Mood::NightCodingLofi => lofi(t, active, noise),
        Mood::Ambient => ambient(t, noise),
    };
    Frame::mono(value)
}

fn rain(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> f64 {
    let rain = noise.pink() * 0.3 * Lfo::new(0.7, 0.3, 0.12).at(t);
    let hum = sine(t, 50.0) * 0.025;

    let mut drips = 0.0;
    let mut thunder = 0.0;
    for e in active {
        let lt = e.local_time(t);
        match e.kind {
            EventKind::Drip => drips += (lt * 600.0).sin() * exp_decay(lt, 25.0) * 0.12,
            EventKind::Thunder => thunder += noise.brown() * (lt * 0.5).sin().powi(2) * 0.15,
            _ => {}
        }
    }

    (rain + drips + hum + thunder) * 0.8
}

fn forest(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> f64 {
    let wind = noise.pink() * Lfo::new(0.4, 0.2, 0.06).at(t) * 0.15;

    let mut birds = 0.0;
    for e in active {
        let lt = e.local_time(t);
        let x = e.progress(t);
        match e.kind {
            EventKind::Bird => {
                let freq = e.params.frequency + 500.0 * (x * 12.0).sin();
                birds += sine(lt, freq) * half_sine(x).powi(2) * 0.1;
            }
            EventKind::BirdCall => {
                let freq = e.params.frequency + 300.0 * (x * 10.0).sin();
                birds += sine(lt, freq) * half_sine(x) * 0.07;
            }
            _ => {}
        }
    }

    let stream = noise.band(500.0, 2500.0) * 0.06;
    let cafe = noise.band(150.0, 500.0) * 0.06;

    (wind + birds + stream + cafe) * 0.85
}

fn space(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> f64 {
    let mut drone = 0.0;
    for h in 1..=6 {
        let h = h as f64;
        let freq = 40.0 * h * (1.0 + 0.002 * (t * 0.08 * h).sin());
        drone += sine(t, freq) / h.powf(1.3);
    }
    drone *= 0.2 * Lfo::new(0.85, 0.15, 0.06).at(t);

    let hiss = noise.band(5000.0, 10000.0) * 0.025;
    let res = partials(t, &[(68.0, 0.03), (136.0, 0.015)]);

    let mut beeps = 0.0;
    for e in active.iter().filter(|e| e.kind == EventKind::Beep) {
        let lt = e.local_time(t);
        beeps += sine(lt, e.params.frequency) * exp_decay(lt, 35.0) * 0.06;
    }

    let sub = sine(t, 28.0) * 0.08;

    (drone + hiss + res + beeps + sub) * 0.9
}

fn ocean(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> f64 {
    let phase = cycle_phase(t, 9.0);
    let env = if phase < 0.45 {
        (phase / 0.45).powf(1.3)
    } else if phase < 0.55 {
        1.0
    } else {
        1.0 - ((phase - 0.55) / 0.45).powf(0.6)
    };

    let wave = noise.brown() * env * 0.35;
    let foam = if phase > 0.5 {
        noise.band(2500.0, 7000.0) * half_sine((phase - 0.5) / 0.5) * 0.12
    } else {
        0.0
    };
    let wave2 = noise.brown() * half_sine(cycle_phase(t + 3.0, 6.0)).powi(2) * 0.12;
    let underwater = sine(t, 32.0) * env * 0.06;

    let mut gulls = 0.0;
    for e in active.iter().filter(|e| e.kind == EventKind::Seagull) {
        let lt = e.local_time(t);
        let freq = e.params.frequency + 350.0 * (lt * 5.0).sin();
        gulls += sine(lt, freq) * Envelope::HalfSinePow { power: 0.6 }.gain(lt, e.duration) * 0.04;
    }

    let wind = noise.band(200.0, 1000.0) * 0.05;

    (wave + foam + wave2 + underwater + gulls + wind) * 0.8
}

fn lofi(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> f64 {
    let bar = lofi_bar();

    let mut drums = 0.0;
    for e in active {
        // Drum envelopes run on bar fractions
        let p = e.local_time(t) / bar;
        drums += match e.kind {
            EventKind::Kick => (p / 0.04 * 55.0 * PI).sin() * (-p * 200.0).exp() * 0.35,
            EventKind::Snare => noise.white() * (-p * 400.0).exp() * 0.12,
            EventKind::HiHat => noise.band(7000.0, 14000.0) * (-p * 500.0).exp() * 0.06,
            _ => 0.0,
        };
    }

    let beat_in_bar = (cycle_phase(t, bar) * BEATS_PER_BAR) as usize % LOFI_BASS.len();
    let bass = sine(t, LOFI_BASS[beat_in_bar]) * 0.18;

    let chord = &LOFI_CHORDS[((t / (bar * BARS_PER_CHORD)) as usize) % LOFI_CHORDS.len()];
    let pad = chord.iter().map(|&f| sine(t, f)).sum::<f64>() * 0.03 * Lfo::new(0.7, 0.3, 0.2).at(t);

    let mut vinyl = noise.band(1500.0, 5000.0) * 0.015;
    if noise.chance(0.01) {
        vinyl += noise.gauss(0.06);
    }
    let rain = noise.pink() * 0.04;

    ((drums + bass + pad + vinyl + rain) * 1.1).tanh() * 0.8
}

fn ambient(t: f64, noise: &mut NoiseGenerator) -> f64 {
    let pad = partials(t, &[(110.0, 0.12), (165.0, 0.08), (220.0, 0.06)])
        * Lfo::new(0.7, 0.3, 0.05).at(t);
    let texture = noise.band(200.0, 1200.0) * 0.04 + noise.brown() * 0.05;
    let tones = if (t * 0.1).sin() > 0.9 {
        sine(t, 440.0) * 0.02
    } else {
        0.0
    };
    (pad + texture + tones) * 0.9
}
