//! WAV file recorder
//!
//! Writes rendered buffers as 16-bit PCM WAV files, plus the JSON metadata
//! record that travels alongside them.

use super::AudioBuffer;
use crate::error::SynthResult;
use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// WAV file recorder
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    channels: u16,
    samples_written: u64,
}

impl Recorder {
    /// Create a new recorder
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `sample_rate` - Sample rate in Hz
    /// * `channels` - Interleaved channel count
    pub fn new(path: &Path, sample_rate: u32, channels: u16) -> SynthResult<Self> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let writer = WavWriter::create(path, spec)?;
        debug!("Recording to {}", path.display());

        Ok(Self {
            writer,
            sample_rate,
            channels,
            samples_written: 0,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of individual samples written, across all channels
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Get the duration recorded in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples_written as f64 / self.channels as f64 / self.sample_rate as f64
    }

    /// Write interleaved samples
    pub fn write_samples(&mut self, samples: &[i16]) -> SynthResult<()> {
        for &sample in samples {
            self.writer.write_sample(sample)?;
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    /// Finalize the WAV file
    ///
    /// This must be called to properly close the file and write the header.
    pub fn finalize(self) -> SynthResult<()> {
        self.writer.finalize()?;
        Ok(())
    }

    /// Write a whole buffer to `path` in one go
    pub fn write_buffer(path: &Path, buffer: &AudioBuffer) -> SynthResult<()> {
        let mut recorder = Self::new(path, buffer.sample_rate, buffer.channels)?;
        recorder.write_samples(&buffer.samples)?;
        recorder.finalize()
    }
}

/// Metadata record written next to every WAV file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub sample_rate: u32,
    pub channels: u16,
    pub detected_mood: String,
    pub prompt: String,
    pub provider: String,
    pub seed: u64,
    pub duration_seconds: f64,
    pub frames: u64,
}

/// Write `metadata` as pretty-printed JSON
pub fn write_metadata(path: &Path, metadata: &GenerationMetadata) -> SynthResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, metadata)?;
    file.flush()?;
    debug!("Wrote metadata to {}", path.display());
    Ok(())
}
