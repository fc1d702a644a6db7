//! Read-only event timeline with an active-window cursor

use super::ScheduledEvent;

/// Every event of a render, merged from all streams and ordered by onset.
///
/// The sample loop walks time forward and asks for the events sounding at
/// each instant; the cursor keeps that lookup proportional to the number of
/// overlapping events rather than the whole list.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<ScheduledEvent>,
    next: usize,
    active: Vec<ScheduledEvent>,
}

impl Timeline {
    /// Merge independent streams. Ties keep stream order.
    pub fn from_streams(streams: Vec<Vec<ScheduledEvent>>) -> Self {
        let mut events: Vec<ScheduledEvent> = streams.into_iter().flatten().collect();
        events.sort_by(|a, b| a.onset.total_cmp(&b.onset));
        Self {
            events,
            next: 0,
            active: Vec::new(),
        }
    }

    /// All events, onset-ordered
    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events sounding at `t`, in onset order.
    ///
    /// `t` must not decrease between calls.
    pub fn advance(&mut self, t: f64) -> &[ScheduledEvent] {
        self.active.retain(|e| t < e.end());
        while let Some(event) = self.events.get(self.next) {
            if event.onset > t {
                break;
            }
            if t < event.end() {
                self.active.push(*event);
            }
            self.next += 1;
        }
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, EventParams};

    fn event(onset: f64, duration: f64, kind: EventKind) -> ScheduledEvent {
        ScheduledEvent {
            onset,
            duration,
            kind,
            params: EventParams::default(),
        }
    }

    #[test]
    fn test_merge_orders_by_onset() {
        let timeline = Timeline::from_streams(vec![
            vec![event(1.0, 1.0, EventKind::Bird), event(5.0, 1.0, EventKind::Bird)],
            vec![event(3.0, 2.0, EventKind::WindGust)],
        ]);
        let onsets: Vec<f64> = timeline.events().iter().map(|e| e.onset).collect();
        assert_eq!(onsets, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_advance_tracks_overlaps() {
        let mut timeline = Timeline::from_streams(vec![vec![
            event(1.0, 2.0, EventKind::Thunder),
            event(2.0, 2.0, EventKind::Thunder),
        ]]);

        assert!(timeline.advance(0.5).is_empty());
        assert_eq!(timeline.advance(1.5).len(), 1);
        assert_eq!(timeline.advance(2.5).len(), 2);
        let active = timeline.advance(3.5);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].onset, 2.0);
        assert!(timeline.advance(4.0).is_empty());
    }

    #[test]
    fn test_advance_matches_brute_force() {
        let streams = vec![
            (0..50).map(|i| event(i as f64 * 0.7, 0.3, EventKind::HiHat)).collect(),
            (0..20).map(|i| event(i as f64 * 1.9, 1.1, EventKind::Kick)).collect(),
        ];
        let mut timeline = Timeline::from_streams(streams);
        let all = timeline.events().to_vec();

        for step in 0..4000 {
            let t = step as f64 * 0.01;
            let expected: Vec<ScheduledEvent> =
                all.iter().filter(|e| e.is_active(t)).copied().collect();
            assert_eq!(timeline.advance(t), expected.as_slice(), "at t={}", t);
        }
    }
}
