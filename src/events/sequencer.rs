//! Step sequencer for drum patterns
//!
//! A fixed tempo divides time into bars of four beats; each step fires at a
//! fixed beat position inside every bar. The whole render's hits are laid
//! out up front, like every other event stream.

use super::{EventKind, EventParams, ScheduledEvent};

/// Beats in one bar
pub const BEATS_PER_BAR: f64 = 4.0;

/// One hit in the bar pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub kind: EventKind,
    /// Position in beats from the start of the bar, in [0, 4)
    pub beat: f64,
    /// Seconds the hit rings
    pub length: f64,
    pub velocity: f64,
}

impl Step {
    pub const fn new(kind: EventKind, beat: f64, length: f64, velocity: f64) -> Self {
        Self {
            kind,
            beat,
            length,
            velocity,
        }
    }
}

/// Repeats a one-bar pattern at a fixed tempo
#[derive(Debug, Clone)]
pub struct StepSequencer {
    bpm: f64,
    steps: Vec<Step>,
}

impl StepSequencer {
    /// Create a sequencer. Steps are kept sorted by beat position.
    pub fn new(bpm: f64, steps: &[Step]) -> Self {
        let mut steps = steps.to_vec();
        steps.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        Self { bpm, steps }
    }

    /// Seconds per beat
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Seconds per bar
    pub fn bar_seconds(&self) -> f64 {
        self.beat_seconds() * BEATS_PER_BAR
    }

    /// Lay out every hit whose onset falls in `[0, duration)`
    pub fn schedule(&self, duration: f64) -> Vec<ScheduledEvent> {
        let mut events = Vec::new();
        if duration <= 0.0 || self.steps.is_empty() {
            return events;
        }

        let beat = self.beat_seconds();
        let bar = self.bar_seconds();
        let mut bar_index = 0u64;
        loop {
            let bar_start = bar_index as f64 * bar;
            if bar_start >= duration {
                break;
            }
            for step in &self.steps {
                let onset = bar_start + step.beat * beat;
                if onset >= duration {
                    break;
                }
                events.push(ScheduledEvent {
                    onset,
                    duration: step.length,
                    kind: step.kind,
                    params: EventParams {
                        velocity: step.velocity,
                        ..EventParams::default()
                    },
                });
            }
            bar_index += 1;
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backbeat() -> StepSequencer {
        StepSequencer::new(
            72.0,
            &[
                Step::new(EventKind::Snare, 1.0, 0.08, 1.0),
                Step::new(EventKind::Kick, 0.0, 0.1, 1.0),
                Step::new(EventKind::Kick, 2.05, 0.1, 1.0),
                Step::new(EventKind::Snare, 3.0, 0.08, 1.0),
            ],
        )
    }

    #[test]
    fn test_bar_timing() {
        let seq = backbeat();
        assert!((seq.beat_seconds() - 60.0 / 72.0).abs() < 1e-12);
        assert!((seq.bar_seconds() - 240.0 / 72.0).abs() < 1e-12);
    }

    #[test]
    fn test_events_sorted_and_in_range() {
        let seq = backbeat();
        let events = seq.schedule(60.0);
        for pair in events.windows(2) {
            assert!(pair[0].onset < pair[1].onset);
        }
        assert!(events.iter().all(|e| e.onset >= 0.0 && e.onset < 60.0));
    }

    #[test]
    fn test_hits_land_on_beat_fractions() {
        let seq = backbeat();
        let beat = seq.beat_seconds();
        let events = seq.schedule(seq.bar_seconds() * 2.0);
        assert_eq!(events.len(), 8);

        let kinds: Vec<EventKind> = events.iter().take(4).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Kick, EventKind::Snare, EventKind::Kick, EventKind::Snare]
        );
        assert!((events[2].onset - 2.05 * beat).abs() < 1e-12);
        assert!((events[5].onset - (seq.bar_seconds() + beat)).abs() < 1e-9);
    }

    #[test]
    fn test_partial_bar_is_truncated() {
        let seq = backbeat();
        let beat = seq.beat_seconds();
        // Ends on beat 2, just before the swung second kick
        let events = seq.schedule(2.0 * beat);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_empty_pattern() {
        let seq = StepSequencer::new(90.0, &[]);
        assert!(seq.schedule(60.0).is_empty());
    }
}
