//! Shaped noise sources
//!
//! White, pink, brown and band-filtered noise drawn from a seeded stream.
//! Filter state lives in an explicit [`NoiseState`] owned by one generator,
//! so every render starts clean and never observes another render's taps.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Frequency the band-filter cutoffs are normalized against.
pub const BAND_REFERENCE_HZ: f64 = 12000.0;

/// Per-family noise tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseProfile {
    /// Scale applied to each white draw before it enters the brown integrator
    pub brown_step: f64,
    /// Leak factor applied to the integrator after each step
    pub brown_leak: f64,
}

impl NoiseProfile {
    /// Tuning for the 44.1 kHz stereo family.
    pub const STUDIO: Self = Self {
        brown_step: 0.1,
        brown_leak: 0.99,
    };

    /// Tuning for the 24 kHz mono family.
    pub const COMPACT: Self = Self {
        brown_step: 0.02,
        brown_leak: 0.998,
    };
}

/// Mutable filter taps for one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseState {
    /// Paul Kellet pink filter taps
    pub pink: [f64; 6],
    /// Brown noise integrator, always within [-1, 1]
    pub brown: f64,
    /// One-pole low-pass accumulator of the band filter
    pub band_low: f64,
    /// One-pole high-pass accumulator of the band filter
    pub band_high: f64,
}

impl NoiseState {
    /// Zero every tap.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Seeded noise source with its own filter state.
///
/// The random stream is also used for event scheduling and the occasional
/// random trigger, so one generator carries all of a render's randomness.
pub struct NoiseGenerator {
    rng: ChaCha8Rng,
    state: NoiseState,
    profile: NoiseProfile,
}

impl NoiseGenerator {
    /// Create a generator seeded from `seed`.
    pub fn new(seed: u64, profile: NoiseProfile) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: NoiseState::default(),
            profile,
        }
    }

    /// Current filter state.
    pub fn state(&self) -> &NoiseState {
        &self.state
    }

    /// Active tuning.
    pub fn profile(&self) -> NoiseProfile {
        self.profile
    }

    /// Reseed the stream and clear every tap.
    pub fn reset(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.state.reset();
    }

    /// Underlying random stream, for schedulers that share it.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Uniform draw on [-1, 1).
    pub fn white(&mut self) -> f64 {
        self.rng.gen_range(-1.0..1.0)
    }

    /// Uniform draw on [low, high); returns `low` for an empty range.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Normal draw with mean 0 and standard deviation `sigma`.
    pub fn gauss(&mut self, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * sigma
    }

    /// Pink noise using Paul Kellet's refined method.
    pub fn pink(&mut self) -> f64 {
        let white = self.white();
        let b = &mut self.state.pink;

        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;

        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + white * 0.5362;
        (pink * 0.11).clamp(-1.0, 1.0)
    }

    /// Brown noise: leaky random walk clamped to [-1, 1].
    pub fn brown(&mut self) -> f64 {
        let white = self.white();
        let next = (self.state.brown + white * self.profile.brown_step) * self.profile.brown_leak;
        self.state.brown = next.clamp(-1.0, 1.0);
        self.state.brown
    }

    /// Band-passed noise: one-pole low-pass at `high_hz`, then one-pole
    /// high-pass at `low_hz`, both normalized against [`BAND_REFERENCE_HZ`].
    ///
    /// All bands share one pair of accumulators.
    pub fn band(&mut self, low_hz: f64, high_hz: f64) -> f64 {
        let white = self.white();
        let lp = high_hz / BAND_REFERENCE_HZ;
        let hp = low_hz / BAND_REFERENCE_HZ;

        self.state.band_low = self.state.band_low * (1.0 - lp) + white * lp;
        self.state.band_high = self.state.band_high * (1.0 - hp) + self.state.band_low * hp;

        self.state.band_low - self.state.band_high
    }
}
