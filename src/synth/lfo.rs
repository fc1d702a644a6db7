//! Low Frequency Oscillator for modulation
//!
//! Slow sinusoidal swells for drone and noise-bed amplitudes. Unlike a
//! running oscillator these are evaluated at absolute time, so any sample
//! can be computed without stepping through the ones before it.

/// A slow modulator producing `center + depth * sin(t * rate)`.
///
/// `rate` is in radians per second, matching how ambience recipes are
/// usually written (`0.7 + 0.3 * sin(t * 0.02)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    center: f64,
    depth: f64,
    rate: f64,
}

impl Lfo {
    /// Create a new LFO
    pub const fn new(center: f64, depth: f64, rate: f64) -> Self {
        Self {
            center,
            depth,
            rate,
        }
    }

    /// Value at time `t` seconds
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        self.center + self.depth * (t * self.rate).sin()
    }
}

/// Position within a repeating cycle of `period` seconds, in [0, 1).
#[inline]
pub fn cycle_phase(t: f64, period: f64) -> f64 {
    (t % period) / period
}
