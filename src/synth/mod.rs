//! Synthesis primitives
//!
//! Contains stateless oscillators, envelopes and LFOs, plus the one stateful
//! piece: the seeded noise generator.

mod envelope;
mod lfo;
mod noise;
mod oscillator;

pub use envelope::{exp_decay, half_sine, Envelope};
pub use lfo::{cycle_phase, Lfo};
pub use noise::{NoiseGenerator, NoiseProfile, NoiseState};
pub use oscillator::{partials, sine, wobble};
