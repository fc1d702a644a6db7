//! Event envelopes
//!
//! Gain curves over an event's local time. All shapes are pure functions of
//! `(local_time, duration)` and are silent outside `[0, duration)`.

use std::f64::consts::PI;

/// Envelope shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// `exp(-rate * t)`
    ExpDecay { rate: f64 },
    /// Linear fall from 1 at onset to 0 at the end
    LinearDecay,
    /// Linear rise to 1 at the midpoint, then linear fall
    Triangular,
    /// `sin(π · t / duration)`
    HalfSine,
    /// Half-sine raised to a power; `power < 1` fattens the body
    HalfSinePow { power: f64 },
}

impl Envelope {
    /// Gain at `t` seconds after onset for an event lasting `duration` seconds
    pub fn gain(&self, t: f64, duration: f64) -> f64 {
        if t < 0.0 || t >= duration || duration <= 0.0 {
            return 0.0;
        }
        let x = t / duration;
        match *self {
            Envelope::ExpDecay { rate } => exp_decay(t, rate),
            Envelope::LinearDecay => 1.0 - x,
            Envelope::Triangular => {
                if x < 0.5 {
                    2.0 * x
                } else {
                    2.0 * (1.0 - x)
                }
            }
            Envelope::HalfSine => half_sine(x),
            Envelope::HalfSinePow { power } => half_sine(x).max(0.0).powf(power),
        }
    }
}

/// `exp(-rate * t)`, the percussive tail.
#[inline]
pub fn exp_decay(t: f64, rate: f64) -> f64 {
    (-t * rate).exp()
}

/// `sin(π · x)` for a normalized position `x` in [0, 1].
#[inline]
pub fn half_sine(x: f64) -> f64 {
    (x * PI).sin()
}
