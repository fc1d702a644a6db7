//! 44.1 kHz stereo recipes
//!
//! Wide beds of pink and brown noise with per-event panning and slow
//! left/right drift on the whole mix.

use super::{Frame, Mood, Voicing};
use crate::events::{
    EventKind, EventPattern, EventScheduler, Pitch, ScheduledEvent, Span, Step, StepSequencer,
};
use crate::synth::{
    cycle_phase, exp_decay, half_sine, partials, sine, wobble, Envelope, Lfo, NoiseGenerator,
};
use std::f64::consts::PI;

const THUNDER: EventPattern = EventPattern::new(
    EventKind::Thunder,
    Span::new(15.0, 30.0),
    Span::new(25.0, 45.0),
    Span::fixed(4.0),
);

const BIRDS: EventPattern = EventPattern::new(
    EventKind::Bird,
    Span::new(2.0, 5.0),
    Span::new(3.0, 8.0),
    Span::new(0.1, 0.3),
)
.with_pitch(Pitch::Uniform(Span::new(2000.0, 4000.0)))
.with_pan(Span::new(-0.7, 0.7));

const GUSTS: EventPattern = EventPattern::new(
    EventKind::WindGust,
    Span::new(5.0, 15.0),
    Span::new(10.0, 25.0),
    Span::new(2.0, 5.0),
);

/// A5, C6, D6, E6
const BEEP_NOTES: &[f64] = &[880.0, 1047.0, 1175.0, 1319.0];

const BEEPS: EventPattern = EventPattern::new(
    EventKind::Beep,
    Span::new(8.0, 15.0),
    Span::new(12.0, 30.0),
    Span::new(0.05, 0.15),
)
.with_pitch(Pitch::Choice(BEEP_NOTES));

const SEAGULLS: EventPattern = EventPattern::new(
    EventKind::Seagull,
    Span::new(10.0, 20.0),
    Span::new(20.0, 45.0),
    Span::new(0.5, 1.5),
)
.with_pitch(Pitch::Uniform(Span::new(800.0, 1200.0)));

const LOFI_BPM: f64 = 72.0;

/// Cmaj7, Amaj7, Bmaj7, Gmaj7
const LOFI_CHORDS: [[f64; 4]; 4] = [
    [261.63, 329.63, 392.00, 493.88],
    [220.00, 277.18, 329.63, 415.30],
    [246.94, 311.13, 369.99, 466.16],
    [196.00, 246.94, 293.66, 369.99],
];

/// Bars each chord is held
const BARS_PER_CHORD: f64 = 2.0;

/// Kick on 1 and a swung 3, snare on 2 and 4, eighth-note hats with
/// accented downbeats
fn lofi_steps() -> Vec<Step> {
    let mut steps = vec![
        Step::new(EventKind::Kick, 0.0, 0.1, 1.0),
        Step::new(EventKind::Kick, 2.05, 0.1, 1.0),
        Step::new(EventKind::Snare, 1.0, 0.08, 1.0),
        Step::new(EventKind::Snare, 3.0, 0.08, 1.0),
    ];
    for i in 0..8 {
        let velocity = if i % 2 == 0 { 1.0 } else { 0.75 };
        steps.push(Step::new(EventKind::HiHat, i as f64 * 0.5, 0.03, velocity));
    }
    steps
}

pub(super) fn prepare(
    mood: Mood,
    duration: f64,
    noise: &mut NoiseGenerator,
    voicing: &mut Voicing,
) -> Vec<Vec<ScheduledEvent>> {
    let patterns: &[EventPattern] = match mood {
        Mood::CalmRainOffice => &[THUNDER],
        Mood::ForestCafe => &[BIRDS, GUSTS],
        Mood::DeepFocusSpaceship => &[BEEPS],
        Mood::OceanMeditation => &[SEAGULLS],
        Mood::NightCodingLofi | Mood::Ambient => &[],
    };

    let mut streams: Vec<Vec<ScheduledEvent>> = patterns
        .iter()
        .map(|p| EventScheduler::new(*p).schedule(duration, noise))
        .collect();

    if mood == Mood::NightCodingLofi {
        streams.push(StepSequencer::new(LOFI_BPM, &lofi_steps()).schedule(duration));
        for detune in voicing.detune.iter_mut() {
            *detune = 1.0 + noise.gauss(0.002);
        }
    }

    streams
}

pub(super) fn frame(
    mood: Mood,
    voicing: &Voicing,
    t: f64,
    active: &[ScheduledEvent],
    noise: &mut NoiseGenerator,
) -> Frame {
    match mood {
        Mood::CalmRainOffice => rain_office(t, active, noise),
        Mood::ForestCafe => forest_cafe(t, active, noise),
        Mood::DeepFocusSpaceship => spaceship(t, active, noise),
        Mood::OceanMeditation => ocean(t, active, noise),
        Mood::NightCodingLofi => lofi(t, voicing, active, noise),
        Mood::Ambient => ambient(t, noise),
    }
}

fn rain_office(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
    // Rain on glass with the odd louder droplet
    let mut rain = noise.pink() * 0.25;
    if noise.chance(0.0001) {
        rain += noise.gauss(0.3);
    }
    rain *= Lfo::new(0.7, 0.3, 0.02).at(t);

    // Distant thunder: swelling, decaying rumble
    let mut thunder = 0.0;
    for e in active.iter().filter(|e| e.kind == EventKind::Thunder) {
        let lt = e.local_time(t);
        let env = exp_decay(lt, 0.8) * (lt * 2.0).sin();
        thunder += env
            * ((lt * 25.0).sin() * 0.3 + (lt * 35.0).sin() * 0.2 + noise.pink() * 0.15)
            * 0.4;
    }

    // Air conditioning hum
    let room = partials(t, &[(60.0, 0.02), (120.0, 0.01)]);

    let sample = rain + thunder + room;
    Frame::stereo(
        sample + noise.pink() * 0.05,
        sample + noise.pink() * 0.05,
    )
}

fn forest_cafe(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
    let breeze_level = 0.5 + 0.3 * (t * 0.15).sin() + 0.2 * (t * 0.08).sin();
    let mut breeze = noise.brown() * 0.15 * breeze_level;

    let mut birds_left = 0.0;
    let mut birds_right = 0.0;
    let mut birds = 0.0;
    for e in active {
        match e.kind {
            EventKind::WindGust => {
                let shape = Envelope::HalfSine.gain(e.local_time(t), e.duration);
                breeze += noise.brown() * 0.2 * shape;
            }
            EventKind::Bird => {
                let lt = e.local_time(t);
                let env = Envelope::HalfSine.gain(lt, e.duration);
                let chirp = wobble(lt, e.params.frequency, 0.3, 40.0) * env * 0.15;
                birds += chirp;
                birds_left += chirp * (0.5 - e.params.pan * 0.5);
                birds_right += chirp * (0.5 + e.params.pan * 0.5);
            }
            _ => {}
        }
    }

    // Murmur from the cafe, only now and then
    let chatter = if noise.chance(0.3) {
        noise.brown() * 0.03
    } else {
        0.0
    };

    let stream = (partials(t, &[(180.0, 0.02), (220.0, 0.015)]) + noise.pink() * 0.02)
        * Lfo::new(0.7, 0.3, 0.5).at(t);

    // Wind chimes ring while a very slow sine crests
    let mut chimes = 0.0;
    if (t * 0.1).sin() > 0.95 {
        let decay = exp_decay(t % 3.0, 2.0);
        for freq in [523.0, 659.0, 784.0, 880.0] {
            chimes += sine(t, freq) * decay * 0.02;
        }
    }

    let sample = breeze + birds + chatter + stream + chimes;
    Frame::stereo(sample * 0.9 + birds_left, sample * 0.9 + birds_right)
}

fn spaceship(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
    // Engine drone with a slight detune beat between 30 and 32 Hz
    let drone = partials(t, &[(30.0, 0.25), (32.0, 0.2), (45.0, 0.15), (60.0, 0.1)])
        * Lfo::new(0.8, 0.2, 0.03).at(t);

    let pulse = (cycle_phase(t, 4.0) * 2.0 * PI).sin() * 0.5 + 0.5;
    let life_support = pulse * 0.05 * sine(t, 80.0);

    let pressure = noise.brown() * 0.03 * (0.3 + 0.7 * half_sine(cycle_phase(t, 20.0)).abs());

    let stars = partials(t, &[(1200.0, 0.01), (1350.0, 0.008)]) * Lfo::new(0.3, 0.7, 0.05).at(t);

    let mut beeps = 0.0;
    for e in active.iter().filter(|e| e.kind == EventKind::Beep) {
        let lt = e.local_time(t);
        beeps += sine(lt, e.params.frequency) * Envelope::LinearDecay.gain(lt, e.duration) * 0.08;
    }

    let sample = drone + life_support + pressure + stars + beeps;
    let pan = (t * 0.02).sin() * 0.1;
    Frame::stereo(sample * (1.0 - pan), sample * (1.0 + pan))
}

fn ocean(t: f64, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
    let phase = cycle_phase(t, 8.0);

    // Build, crash, recede
    let wave = if phase < 0.4 {
        let env = (phase / 0.4 * PI / 2.0).sin().powi(2);
        noise.brown() * 0.3 * env + sine(t, 40.0) * 0.1 * env
    } else if phase < 0.6 {
        let env = half_sine((phase - 0.4) / 0.2);
        noise.white() * 0.4 * env + noise.pink() * 0.3 * env
    } else {
        let env = 1.0 - (phase - 0.6) / 0.4;
        noise.pink() * 0.2 * env + noise.brown() * 0.1 * env
    };

    let underwater = sine(t, 25.0) * 0.08 * (0.3 + 0.7 * half_sine(phase));
    let wind = noise.brown() * 0.05 * Lfo::new(0.7, 0.3, 0.1).at(t);

    let mut gulls = 0.0;
    for e in active.iter().filter(|e| e.kind == EventKind::Seagull) {
        let lt = e.local_time(t);
        let progress = e.progress(t);
        let freq = e.params.frequency * (1.0 + 0.5 * (progress * 4.0 * PI).sin());
        gulls += sine(lt, freq) * half_sine(progress) * 0.08;
    }

    let sample = wave + underwater + wind + gulls;
    let pan = (phase * 2.0 * PI).sin() * 0.15;
    Frame::stereo(
        sample * (1.0 - pan) + noise.pink() * 0.02,
        sample * (1.0 + pan) + noise.pink() * 0.02,
    )
}

fn lofi(t: f64, voicing: &Voicing, active: &[ScheduledEvent], noise: &mut NoiseGenerator) -> Frame {
    let beat = 60.0 / LOFI_BPM;
    let bar = beat * 4.0;

    let mut crackle = 0.0;
    if noise.chance(0.02) {
        crackle = noise.gauss(0.05);
    }
    crackle += noise.pink() * 0.015;

    let mut drums = 0.0;
    for e in active {
        let lt = e.local_time(t);
        drums += match e.kind {
            EventKind::Kick => sine(lt, 60.0) * exp_decay(lt, 30.0) * 0.3,
            EventKind::Snare => {
                noise.white() * exp_decay(lt, 40.0) * 0.15
                    + sine(lt, 200.0) * exp_decay(lt, 50.0) * 0.1
            }
            EventKind::HiHat => noise.white() * exp_decay(lt, 100.0) * 0.08 * e.params.velocity,
            _ => 0.0,
        };
    }

    // Chord pad, two bars per chord
    let chord = &LOFI_CHORDS[((t / (bar * BARS_PER_CHORD)) as usize) % LOFI_CHORDS.len()];
    let mut pad = 0.0;
    for (freq, detune) in chord.iter().zip(voicing.detune) {
        pad += sine(t, freq * detune) * 0.03;
    }
    pad *= Lfo::new(0.6, 0.4, 0.2).at(t);

    // Root an octave down, held for most of every half bar
    let held = beat * 0.8;
    let bass_pos = (t % bar) % (beat * 2.0);
    let bass = if bass_pos < held {
        sine(t, chord[0] / 2.0) * 0.2 * (0.8 + 0.2 * (bass_pos / held * PI).cos())
    } else {
        0.0
    };

    let city = noise.brown() * 0.02;
    let rain = noise.pink() * 0.03 * Lfo::new(0.7, 0.3, 0.05).at(t);

    let sample = crackle + drums + pad + bass + city + rain;
    Frame::stereo(
        sample + pad * 0.1 + noise.pink() * 0.01,
        sample - pad * 0.1 + noise.pink() * 0.01,
    )
}

fn ambient(t: f64, noise: &mut NoiseGenerator) -> Frame {
    let pad = partials(t, &[(110.0, 0.15), (165.0, 0.1), (220.0, 0.08)])
        * Lfo::new(0.7, 0.3, 0.05).at(t);
    let texture = noise.brown() * 0.05;
    let tones = if (t * 0.1).sin() > 0.9 {
        sine(t, 440.0) * 0.02
    } else {
        0.0
    };

    let sample = pad + texture + tones;
    Frame::stereo(
        sample + noise.brown() * 0.02,
        sample + noise.brown() * 0.02,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Timeline;
    use crate::synth::NoiseProfile;

    fn render_peak(mood: Mood, seconds: f64, rate: f64) -> (f64, f64) {
        let mut noise = NoiseGenerator::new(5, NoiseProfile::STUDIO);
        let mut voicing = Voicing::default();
        let mut timeline = Timeline::from_streams(prepare(mood, seconds, &mut noise, &mut voicing));
        let mut peak = 0.0f64;
        let mut energy = 0.0;
        let n = (seconds * rate) as usize;
        for i in 0..n {
            let t = i as f64 / rate;
            let f = frame(mood, &voicing, t, timeline.advance(t), &mut noise);
            assert!(f.is_finite());
            peak = peak.max(f.left.abs()).max(f.right.abs());
            energy += f.mid() * f.mid();
        }
        (peak, energy / n as f64)
    }

    #[test]
    fn test_every_mood_produces_sound() {
        for mood in Mood::ALL {
            let (peak, rms2) = render_peak(mood, 2.0, 8000.0);
            assert!(peak > 0.01, "{} is silent", mood);
            assert!(rms2 > 0.0);
        }
    }

    #[test]
    fn test_forest_schedules_birds_and_gusts() {
        let mut noise = NoiseGenerator::new(1, NoiseProfile::STUDIO);
        let streams = prepare(Mood::ForestCafe, 120.0, &mut noise, &mut Voicing::default());
        assert_eq!(streams.len(), 2);
        assert!(streams[0].iter().all(|e| e.kind == EventKind::Bird));
        assert!(streams[1].iter().all(|e| e.kind == EventKind::WindGust));
        assert!(!streams[0].is_empty());
    }

    #[test]
    fn test_lofi_draws_detune_once() {
        let mut noise = NoiseGenerator::new(1, NoiseProfile::STUDIO);
        let mut voicing = Voicing::default();
        let streams = prepare(Mood::NightCodingLofi, 60.0, &mut noise, &mut voicing);
        assert_eq!(streams.len(), 1);
        for d in voicing.detune {
            assert_ne!(d, 1.0);
            assert!((d - 1.0).abs() < 0.02);
        }
    }

    #[test]
    fn test_kick_adds_on_top_of_bed() {
        // Kicks draw no noise, so twin generators stay in lockstep
        let mut a = NoiseGenerator::new(2, NoiseProfile::STUDIO);
        let mut b = NoiseGenerator::new(2, NoiseProfile::STUDIO);
        let voicing = Voicing::default();
        let kick = ScheduledEvent {
            onset: 10.0,
            duration: 0.1,
            kind: EventKind::Kick,
            params: Default::default(),
        };
        let t = 10.0 + 1.0 / 240.0; // quarter period of 60 Hz
        let with = frame(Mood::NightCodingLofi, &voicing, t, &[kick], &mut a);
        let without = frame(Mood::NightCodingLofi, &voicing, t, &[], &mut b);
        let expected = 0.3 * exp_decay(1.0 / 240.0, 30.0);
        assert!((with.mid() - without.mid() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_drone_dominates_spaceship() {
        // No beeps: the engine drone alone sets the level
        let mut noise = NoiseGenerator::new(3, NoiseProfile::STUDIO);
        let voicing = Voicing::default();
        let mut peak = 0.0f64;
        for i in 0..8000 {
            let t = i as f64 / 8000.0;
            let f = frame(Mood::DeepFocusSpaceship, &voicing, t, &[], &mut noise);
            peak = peak.max(f.mid().abs());
        }
        assert!(peak > 0.3, "drone peak {}", peak);
    }

    #[test]
    fn test_bird_pans_follow_event() {
        let mut a = NoiseGenerator::new(4, NoiseProfile::STUDIO);
        let mut b = NoiseGenerator::new(4, NoiseProfile::STUDIO);
        let bird = ScheduledEvent {
            onset: 0.0,
            duration: 0.2,
            kind: EventKind::Bird,
            params: crate::events::EventParams {
                frequency: 3000.0,
                pan: -0.7,
                velocity: 1.0,
            },
        };
        let mut left = 0.0;
        let mut right = 0.0;
        for i in 0..4410 {
            let t = i as f64 / 44100.0;
            let with = frame(Mood::ForestCafe, &Voicing::default(), t, &[bird], &mut a);
            let without = frame(Mood::ForestCafe, &Voicing::default(), t, &[], &mut b);
            left += (with.left - without.left).abs();
            right += (with.right - without.right).abs();
        }
        assert!(left > right * 1.5, "left {} right {}", left, right);
    }
}
