//! Stateless oscillators
//!
//! Every layer is addressed by absolute time, so a sample at `t` needs no
//! history. This keeps drone and event layers independent of render order.

use std::f64::consts::PI;

const TAU: f64 = 2.0 * PI;

/// Sine at `frequency` Hz evaluated at `t` seconds.
#[inline]
pub fn sine(t: f64, frequency: f64) -> f64 {
    (t * frequency * TAU).sin()
}

/// Sum of sine partials given as `(frequency, amplitude)` pairs.
pub fn partials(t: f64, partials: &[(f64, f64)]) -> f64 {
    partials.iter().map(|&(f, a)| sine(t, f) * a).sum()
}

/// Sine whose instantaneous frequency is wobbled by a slower sine.
///
/// Returns `sin(2π · t · f · (1 + depth · sin(t · rate)))`, the chirp shape
/// used for birds and gulls. `rate` is in radians per second.
pub fn wobble(t: f64, frequency: f64, depth: f64, rate: f64) -> f64 {
    let f = frequency * (1.0 + depth * (t * rate).sin());
    sine(t, f)
}
