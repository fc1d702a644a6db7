//! ffmpeg subprocess backend

use super::PostProcessor;
use anyhow::{bail, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sample rate of the encoded MP3
const ENCODE_SAMPLE_RATE: &str = "44100";

/// Runs each step as one `ffmpeg` invocation
#[derive(Debug, Clone)]
pub struct FfmpegProcessor {
    binary: PathBuf,
}

impl FfmpegProcessor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Find `ffmpeg` on `PATH`
    pub fn locate() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run(&self, args: &[String]) -> Result<()> {
        debug!("{} -y {}", self.binary.display(), args.join(" "));
        let output = Command::new(&self.binary)
            .arg("-y")
            .args(["-hide_banner", "-loglevel", "error"])
            .args(args)
            .output()
            .with_context(|| format!("failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            bail!(
                "ffmpeg failed (exit code: {})\n{}",
                output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Filter graph that crossfades the last `crossfade` seconds into the first
/// and drops both originals, so the result is `duration - crossfade` long
/// and its end flows into its start.
pub fn loop_filter(crossfade: f64, duration: f64) -> String {
    let tail = duration - crossfade;
    format!(
        "[0:a]asplit=3[a][b][c];\
         [a]atrim=start={tail},asetpts=PTS-STARTPTS[tail];\
         [b]atrim=end={x},asetpts=PTS-STARTPTS[head];\
         [tail][head]acrossfade=d={x}:c1=tri:c2=tri[seam];\
         [c]atrim=start={x}:end={tail},asetpts=PTS-STARTPTS[body];\
         [seam][body]concat=n=2:v=0:a=1[out]",
        tail = tail,
        x = crossfade
    )
}

impl PostProcessor for FfmpegProcessor {
    fn normalize(&self, input: &Path, output: &Path, target_lufs: f64) -> Result<()> {
        self.run(&[
            "-i".into(),
            path_arg(input),
            "-af".into(),
            format!("loudnorm=I={}:TP=-1.5:LRA=11", target_lufs),
            path_arg(output),
        ])
    }

    fn fade(
        &self,
        input: &Path,
        output: &Path,
        fade_in: f64,
        fade_out: f64,
        duration: f64,
    ) -> Result<()> {
        let mut filters = Vec::new();
        if fade_in > 0.0 {
            filters.push(format!("afade=t=in:st=0:d={}", fade_in));
        }
        if fade_out > 0.0 {
            let start = (duration - fade_out).max(0.0);
            filters.push(format!("afade=t=out:st={}:d={}", start, fade_out));
        }
        if filters.is_empty() {
            std::fs::copy(input, output)?;
            return Ok(());
        }
        self.run(&[
            "-i".into(),
            path_arg(input),
            "-af".into(),
            filters.join(","),
            path_arg(output),
        ])
    }

    fn loop_optimize(
        &self,
        input: &Path,
        output: &Path,
        crossfade: f64,
        duration: f64,
    ) -> Result<()> {
        if crossfade <= 0.0 || duration < crossfade * 2.0 {
            debug!("Too short for a {}s loop crossfade; copying", crossfade);
            std::fs::copy(input, output)
                .with_context(|| format!("failed to copy {}", input.display()))?;
            return Ok(());
        }
        self.run(&[
            "-i".into(),
            path_arg(input),
            "-filter_complex".into(),
            loop_filter(crossfade, duration),
            "-map".into(),
            "[out]".into(),
            path_arg(output),
        ])
    }

    fn encode(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()> {
        self.run(&[
            "-i".into(),
            path_arg(input),
            "-c:a".into(),
            "libmp3lame".into(),
            "-b:a".into(),
            bitrate.into(),
            "-ar".into(),
            ENCODE_SAMPLE_RATE.into(),
            path_arg(output),
        ])
    }
}
