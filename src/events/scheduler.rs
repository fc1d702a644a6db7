//! Renewal-process event scheduling
//!
//! The first onset is drawn uniformly from an initial-delay range; every
//! later onset is the previous one plus a fresh uniform draw from the
//! inter-arrival range. Arrivals are uniform, not exponential.

use super::{EventKind, EventParams, ScheduledEvent};
use crate::synth::NoiseGenerator;
use rand::Rng;

/// A closed numeric range. `lo == hi` yields a fixed value without drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub lo: f64,
    pub hi: f64,
}

impl Span {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// A degenerate span that always yields `value`
    pub const fn fixed(value: f64) -> Self {
        Self { lo: value, hi: value }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    fn draw(&self, noise: &mut NoiseGenerator) -> f64 {
        noise.uniform(self.lo, self.hi)
    }
}

/// How an event's base frequency is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    /// Unpitched (frequency 0)
    None,
    Fixed(f64),
    Uniform(Span),
    /// Uniform pick from a fixed set of notes
    Choice(&'static [f64]),
}

/// Timing and parameter ranges for one independent event stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPattern {
    pub kind: EventKind,
    pub initial_delay: Span,
    pub interval: Span,
    pub duration: Span,
    pub pitch: Pitch,
    pub pan: Span,
    pub velocity: Span,
}

impl EventPattern {
    /// A pattern with fixed unit velocity, centered pan and no pitch.
    ///
    /// `interval.lo` must be positive so onsets strictly increase.
    pub const fn new(kind: EventKind, initial_delay: Span, interval: Span, duration: Span) -> Self {
        Self {
            kind,
            initial_delay,
            interval,
            duration,
            pitch: Pitch::None,
            pan: Span::fixed(0.0),
            velocity: Span::fixed(1.0),
        }
    }

    /// A strictly periodic stream: first hit at `offset`, then every `period`
    pub const fn periodic(kind: EventKind, offset: f64, period: f64, duration: f64) -> Self {
        Self::new(
            kind,
            Span::fixed(offset),
            Span::fixed(period),
            Span::fixed(duration),
        )
    }

    pub const fn with_pitch(mut self, pitch: Pitch) -> Self {
        self.pitch = pitch;
        self
    }

    pub const fn with_pan(mut self, pan: Span) -> Self {
        self.pan = pan;
        self
    }
}

/// Generates the onset-ordered event list for one stream
#[derive(Debug, Clone, Copy)]
pub struct EventScheduler {
    pattern: EventPattern,
}

impl EventScheduler {
    pub fn new(pattern: EventPattern) -> Self {
        debug_assert!(pattern.interval.lo > 0.0, "inter-arrival range must be positive");
        Self { pattern }
    }

    pub fn pattern(&self) -> &EventPattern {
        &self.pattern
    }

    /// Schedule events covering `[0, duration)`.
    ///
    /// Draw order per event is duration, pitch, pan, velocity, then the
    /// next inter-arrival gap.
    pub fn schedule(&self, duration: f64, noise: &mut NoiseGenerator) -> Vec<ScheduledEvent> {
        let p = &self.pattern;
        let mut events = Vec::new();
        if duration <= 0.0 {
            return events;
        }

        let mut cursor = p.initial_delay.draw(noise);
        while cursor < duration {
            let length = p.duration.draw(noise);
            let frequency = match p.pitch {
                Pitch::None => 0.0,
                Pitch::Fixed(f) => f,
                Pitch::Uniform(span) => span.draw(noise),
                Pitch::Choice(notes) if notes.is_empty() => 0.0,
                Pitch::Choice(notes) => notes[noise.rng().gen_range(0..notes.len())],
            };
            let pan = p.pan.draw(noise);
            let velocity = p.velocity.draw(noise);

            events.push(ScheduledEvent {
                onset: cursor,
                duration: length,
                kind: p.kind,
                params: EventParams {
                    frequency,
                    pan,
                    velocity,
                },
            });

            cursor += p.interval.draw(noise);
        }

        events
    }
}
