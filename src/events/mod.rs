//! Transient events
//!
//! Events are discrete sounds (thunder, chirps, drum hits) whose timing is
//! decided once per render, before any sample is synthesized. The sample
//! loop only reads them through a [`Timeline`].

mod scheduler;
mod sequencer;
mod timeline;

pub use scheduler::{EventPattern, EventScheduler, Pitch, Span};
pub use sequencer::{Step, StepSequencer, BEATS_PER_BAR};
pub use timeline::Timeline;

/// What kind of transient an event is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Thunder,
    WindGust,
    Bird,
    /// Lower, slower two-note call
    BirdCall,
    Seagull,
    Beep,
    Drip,
    Kick,
    Snare,
    HiHat,
}

/// Per-event numeric parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventParams {
    /// Base frequency in Hz (0 for unpitched events)
    pub frequency: f64,
    /// Stereo position, -1 (left) to 1 (right)
    pub pan: f64,
    /// Gain multiplier
    pub velocity: f64,
}

impl Default for EventParams {
    fn default() -> Self {
        Self {
            frequency: 0.0,
            pan: 0.0,
            velocity: 1.0,
        }
    }
}

/// One scheduled transient. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    /// Seconds from the start of the render
    pub onset: f64,
    /// Seconds the event stays audible
    pub duration: f64,
    pub kind: EventKind,
    pub params: EventParams,
}

impl ScheduledEvent {
    /// Time at which the event stops sounding
    pub fn end(&self) -> f64 {
        self.onset + self.duration
    }

    /// Whether the event is sounding at absolute time `t`
    pub fn is_active(&self, t: f64) -> bool {
        self.onset <= t && t < self.end()
    }

    /// Seconds since onset
    pub fn local_time(&self, t: f64) -> f64 {
        t - self.onset
    }

    /// Position within the event, 0 at onset and 1 at the end
    pub fn progress(&self, t: f64) -> f64 {
        (t - self.onset) / self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_window() {
        let event = ScheduledEvent {
            onset: 2.0,
            duration: 0.5,
            kind: EventKind::Bird,
            params: EventParams::default(),
        };
        assert!(!event.is_active(1.99));
        assert!(event.is_active(2.0));
        assert!(event.is_active(2.49));
        assert!(!event.is_active(2.5));
        assert_eq!(event.local_time(2.25), 0.25);
        assert_eq!(event.progress(2.25), 0.5);
    }
}
