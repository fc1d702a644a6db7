//! Render engine
//!
//! Drives the sample loop for one mood recipe: schedules every event stream
//! once, walks time forward frame by frame, adapts the recipe's channel
//! layout to the requested one, clips and quantizes to 16-bit PCM.

pub mod recorder;

pub use recorder::{write_metadata, GenerationMetadata, Recorder};

use crate::error::{SynthError, SynthResult};
use crate::events::Timeline;
use crate::mood::{Family, Frame, Mood, MoodSynth};
use crate::synth::NoiseGenerator;
use log::{debug, info};

/// Symmetric ceiling applied to every sample before quantization.
///
/// Leaves headroom for downstream fades and loudness normalization.
pub const SAFETY_CEILING: f64 = 0.95;

/// Full scale of a 16-bit sample
const FULL_SCALE: f64 = 32767.0;

/// Everything needed to reproduce one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub mood: Mood,
    pub family: Family,
    /// Must be positive; upstream layers clamp it to [60, 300]
    pub duration_seconds: f64,
    pub sample_rate: u32,
    /// 1 or 2
    pub channels: u16,
    pub seed: u64,
}

impl RenderRequest {
    /// A request at the family's native rate and channel layout
    pub fn new(mood: Mood, family: Family, duration_seconds: f64, seed: u64) -> Self {
        Self {
            mood,
            family,
            duration_seconds,
            sample_rate: family.sample_rate(),
            channels: family.native_channels(),
            seed,
        }
    }

    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Frames the render will produce: `round(duration * sample_rate)`
    pub fn frames(&self) -> u64 {
        (self.duration_seconds * self.sample_rate as f64).round() as u64
    }

    /// Reject requests the engine cannot render
    pub fn validate(&self) -> SynthResult<()> {
        if !(self.duration_seconds > 0.0) || !self.duration_seconds.is_finite() {
            return Err(SynthError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        if self.channels != 1 && self.channels != 2 {
            return Err(SynthError::InvalidChannels {
                channels: self.channels,
            });
        }
        if self.sample_rate == 0 {
            return Err(SynthError::synthesis(
                self.family.provider_name(),
                self.mood.as_str(),
                "sample rate must be positive",
            ));
        }
        Ok(())
    }
}

/// Interleaved signed 16-bit PCM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioBuffer {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Little-endian byte image of the samples
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

/// Clamp to the safety ceiling and scale to 16-bit
#[inline]
pub fn quantize(sample: f64) -> i16 {
    (sample.clamp(-SAFETY_CEILING, SAFETY_CEILING) * FULL_SCALE).round() as i16
}

/// Renders one validated request
#[derive(Debug, Clone)]
pub struct Renderer {
    request: RenderRequest,
}

impl Renderer {
    /// Validate the request. Nothing is synthesized yet.
    pub fn new(request: RenderRequest) -> SynthResult<Self> {
        request.validate()?;
        Ok(Self { request })
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Render the whole buffer.
    ///
    /// Either the complete buffer is returned or an error; never a partial
    /// buffer.
    pub fn render(&self) -> SynthResult<AudioBuffer> {
        let r = &self.request;
        info!(
            "Rendering {} ({}) for {:.1}s at {} Hz, {} ch",
            r.mood,
            r.family.provider_name(),
            r.duration_seconds,
            r.sample_rate,
            r.channels
        );

        let mut samples = Vec::with_capacity(r.frames() as usize * r.channels as usize);
        for chunk in self.stream(r.sample_rate as usize) {
            samples.extend(chunk?);
        }

        debug!("Rendered {} samples", samples.len());
        Ok(AudioBuffer {
            samples,
            sample_rate: r.sample_rate,
            channels: r.channels,
        })
    }

    /// Render lazily in chunks of up to `frames_per_chunk` frames.
    ///
    /// Chunks concatenate to exactly the output of [`Renderer::render`].
    /// Restarting means calling `stream` again; the seed makes it identical.
    pub fn stream(&self, frames_per_chunk: usize) -> RenderStream {
        RenderStream::new(self.request, frames_per_chunk.max(1))
    }
}

/// Lazy sequence of interleaved PCM chunks for one render
pub struct RenderStream {
    request: RenderRequest,
    synth: MoodSynth,
    noise: NoiseGenerator,
    timeline: Timeline,
    frames_per_chunk: usize,
    next_frame: u64,
    total_frames: u64,
    failed: bool,
}

impl RenderStream {
    fn new(request: RenderRequest, frames_per_chunk: usize) -> Self {
        let mut noise = NoiseGenerator::new(request.seed, request.family.noise_profile());
        let mut synth = MoodSynth::new(request.mood, request.family);
        // All scheduling happens here, before the first sample
        let timeline = synth.prepare(request.duration_seconds, &mut noise);

        Self {
            request,
            synth,
            noise,
            timeline,
            frames_per_chunk,
            next_frame: 0,
            total_frames: request.frames(),
            failed: false,
        }
    }

    /// Frames not yet emitted
    pub fn remaining_frames(&self) -> u64 {
        self.total_frames - self.next_frame
    }

    fn render_chunk(&mut self, frames: u64) -> SynthResult<Vec<i16>> {
        let rate = self.request.sample_rate as f64;
        let channels = self.request.channels;
        let mut out = Vec::with_capacity(frames as usize * channels as usize);

        for i in self.next_frame..self.next_frame + frames {
            let t = i as f64 / rate;
            let active = self.timeline.advance(t);
            let frame = self.synth.frame(t, active, &mut self.noise);
            if !frame.is_finite() {
                return Err(SynthError::synthesis(
                    self.request.family.provider_name(),
                    self.request.mood.as_str(),
                    format!("non-finite sample at {:.6}s", t),
                ));
            }
            push_frame(&mut out, frame, channels);
        }

        self.next_frame += frames;
        Ok(out)
    }
}

impl Iterator for RenderStream {
    type Item = SynthResult<Vec<i16>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_frame >= self.total_frames {
            return None;
        }
        let frames = (self.frames_per_chunk as u64).min(self.remaining_frames());
        let chunk = self.render_chunk(frames);
        if chunk.is_err() {
            self.failed = true;
        }
        Some(chunk)
    }
}

/// Adapt a frame to the output layout and append it
fn push_frame(out: &mut Vec<i16>, frame: Frame, channels: u16) {
    if channels == 1 {
        out.push(quantize(frame.mid()));
    } else {
        out.push(quantize(frame.left));
        out.push(quantize(frame.right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mood: Mood, family: Family, seconds: f64) -> RenderRequest {
        RenderRequest::new(mood, family, seconds, 1234)
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 16384);
        assert_eq!(quantize(-0.5), -16384);
        assert_eq!(quantize(2.0), quantize(SAFETY_CEILING));
        assert_eq!(quantize(-2.0), -quantize(SAFETY_CEILING));
        assert_eq!(quantize(SAFETY_CEILING), 31129);
    }

    #[test]
    fn test_buffer_length() {
        let r = request(Mood::Ambient, Family::Studio, 0.5);
        let buffer = Renderer::new(r).unwrap().render().unwrap();
        assert_eq!(buffer.samples.len(), 2 * 22050);
        assert_eq!(buffer.frames(), 22050);
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sample_rate_override() {
        let r = request(Mood::ForestCafe, Family::Studio, 0.25).with_sample_rate(8000);
        let buffer = Renderer::new(r).unwrap().render().unwrap();
        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.samples.len(), 2 * 2000);

        let zero = request(Mood::ForestCafe, Family::Studio, 0.25).with_sample_rate(0);
        assert!(matches!(Renderer::new(zero), Err(SynthError::Synthesis { .. })));
    }

    #[test]
    fn test_fractional_frames_round() {
        // 0.10001 s at 24 kHz is 2400.24 frames
        let r = request(Mood::OceanMeditation, Family::Compact, 0.10001);
        assert_eq!(r.frames(), 2400);
        let buffer = Renderer::new(r).unwrap().render().unwrap();
        assert_eq!(buffer.samples.len(), 2400);
    }

    #[test]
    fn test_rejects_bad_duration() {
        for d in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let r = request(Mood::Ambient, Family::Studio, d);
            assert!(matches!(
                Renderer::new(r),
                Err(SynthError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bad_channels() {
        let r = request(Mood::Ambient, Family::Studio, 1.0).with_channels(6);
        assert!(matches!(
            Renderer::new(r),
            Err(SynthError::InvalidChannels { channels: 6 })
        ));
    }

    #[test]
    fn test_samples_within_ceiling() {
        let limit = quantize(SAFETY_CEILING);
        for mood in Mood::ALL {
            let r = request(mood, Family::Studio, 0.25);
            let buffer = Renderer::new(r).unwrap().render().unwrap();
            assert!(buffer.samples.iter().all(|&s| s.abs() <= limit));
        }
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let r = request(Mood::NightCodingLofi, Family::Studio, 0.5);
        let a = Renderer::new(r).unwrap().render().unwrap();
        let b = Renderer::new(r).unwrap().render().unwrap();
        assert_eq!(a, b);

        let c = Renderer::new(RenderRequest { seed: 99, ..r }).unwrap().render().unwrap();
        assert_ne!(a.samples, c.samples);
    }

    #[test]
    fn test_stream_matches_render() {
        let r = request(Mood::ForestCafe, Family::Compact, 0.3);
        let renderer = Renderer::new(r).unwrap();
        let whole = renderer.render().unwrap();

        let chunks: Vec<Vec<i16>> = renderer.stream(1000).map(|c| c.unwrap()).collect();
        assert_eq!(chunks.len(), 8); // 7200 frames
        assert_eq!(chunks.concat(), whole.samples);
    }

    #[test]
    fn test_mono_downmix_of_stereo_recipe() {
        let stereo = request(Mood::DeepFocusSpaceship, Family::Studio, 0.1);
        let mono = stereo.with_channels(1);
        let s = Renderer::new(stereo).unwrap().render().unwrap();
        let m = Renderer::new(mono).unwrap().render().unwrap();
        assert_eq!(m.samples.len() * 2, s.samples.len());
        assert_eq!(m.channels, 1);
        // Same noise stream, so each mono sample sits between its L/R pair
        for (i, &v) in m.samples.iter().enumerate() {
            let (l, r) = (s.samples[2 * i], s.samples[2 * i + 1]);
            assert!(v >= l.min(r) - 1 && v <= l.max(r) + 1);
        }
    }

    #[test]
    fn test_stereo_upmix_of_mono_recipe() {
        let r = request(Mood::CalmRainOffice, Family::Compact, 0.1).with_channels(2);
        let buffer = Renderer::new(r).unwrap().render().unwrap();
        for pair in buffer.samples.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_le_bytes() {
        let buffer = AudioBuffer {
            samples: vec![1, -2],
            sample_rate: 24000,
            channels: 1,
        };
        assert_eq!(buffer.to_le_bytes(), vec![0x01, 0x00, 0xfe, 0xff]);
    }
}
