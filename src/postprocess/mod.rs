//! Post-processing
//!
//! Loudness normalization, fades, loop smoothing and lossy encoding are
//! delegated to an external tool. [`PostProcessor`] is the narrow boundary;
//! [`FfmpegProcessor`] drives the `ffmpeg` binary.

mod ffmpeg;

pub use ffmpeg::{loop_filter, FfmpegProcessor};

use crate::config::PostConfig;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Audio transforms applied after synthesis. Each step reads one file and
/// writes another.
pub trait PostProcessor {
    /// Loudness-normalize to `target_lufs`
    fn normalize(&self, input: &Path, output: &Path, target_lufs: f64) -> Result<()>;

    /// Fade in over `fade_in` seconds and out over the last `fade_out`
    fn fade(
        &self,
        input: &Path,
        output: &Path,
        fade_in: f64,
        fade_out: f64,
        duration: f64,
    ) -> Result<()>;

    /// Crossfade the tail into the head so the file loops seamlessly
    fn loop_optimize(
        &self,
        input: &Path,
        output: &Path,
        crossfade: f64,
        duration: f64,
    ) -> Result<()>;

    /// Encode to MP3 at `bitrate`
    fn encode(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()>;
}

/// Run the enabled steps in order (normalize, fade, loop, encode) and
/// return the encoded file.
///
/// Intermediate files live in a scratch directory next to `output` that is
/// removed afterwards, whether or not the pipeline succeeds. A failed
/// removal is logged and never replaces the step result.
pub fn run_pipeline(
    processor: &dyn PostProcessor,
    input: &Path,
    output: &Path,
    config: &PostConfig,
    duration: f64,
) -> Result<PathBuf> {
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let scratch = tempfile::Builder::new()
        .prefix(".murmur-post")
        .tempdir_in(parent)
        .with_context(|| format!("failed to create scratch directory in {}", parent.display()))?;
    debug!("Post-processing intermediates in {}", scratch.path().display());

    let result = run_steps(processor, input, output, scratch.path(), config, duration);

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!("Failed to remove {}: {}", scratch_path.display(), e);
    }

    result.map(|()| output.to_path_buf())
}

fn run_steps(
    processor: &dyn PostProcessor,
    input: &Path,
    output: &Path,
    scratch: &Path,
    config: &PostConfig,
    duration: f64,
) -> Result<()> {
    let mut current = input.to_path_buf();
    let mut step = 0;
    let mut next = |label: &str| {
        step += 1;
        step_path(scratch, step, label)
    };

    if config.normalize {
        let target = next("normalized");
        info!("Normalizing to {} LUFS", config.target_lufs);
        processor.normalize(&current, &target, config.target_lufs)?;
        current = target;
    }

    if config.fade_in > 0.0 || config.fade_out > 0.0 {
        let target = next("faded");
        info!("Applying fades: in={}s, out={}s", config.fade_in, config.fade_out);
        processor.fade(&current, &target, config.fade_in, config.fade_out, duration)?;
        current = target;
    }

    if config.loop_optimize {
        let target = next("looped");
        info!("Optimizing loop with {}s crossfade", config.crossfade);
        processor.loop_optimize(&current, &target, config.crossfade, duration)?;
        current = target;
    }

    info!("Encoding {} at {}", output.display(), config.bitrate);
    processor.encode(&current, output, &config.bitrate)
}

/// `<scratch>/step<N>-<label>.wav`
fn step_path(scratch: &Path, step: u32, label: &str) -> PathBuf {
    scratch.join(format!("step{}-{}.wav", step, label))
}
