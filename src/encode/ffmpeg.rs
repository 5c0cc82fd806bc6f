use std::path::Path;
use std::process::Command;

use anyhow::Context as _;

use crate::encode::frames::FrameSequence;
use crate::foundation::core::Fps;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::process::{ToolOutput, is_on_path, run_tool};

/// Turns a numbered frame sequence into one standalone video file.
pub trait EncodeTool {
    fn encode(
        &self,
        frames: &FrameSequence,
        fps: Fps,
        out_path: &Path,
    ) -> SimreelResult<ToolOutput>;
}

/// Encoder backed by the system `ffmpeg` binary (h264, yuv420p).
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    pub ffmpeg: String,
    pub crf: u8,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            crf: 22,
        }
    }
}

impl EncodeTool for FfmpegEncoder {
    fn encode(
        &self,
        frames: &FrameSequence,
        fps: Fps,
        out_path: &Path,
    ) -> SimreelResult<ToolOutput> {
        let (width, height) = frames
            .dimensions()
            .map_err(|e| SimreelError::validation(e.to_string()))?;
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2.
            return Err(SimreelError::validation(format!(
                "frame size {width}x{height} must be even (required for yuv420p mp4 output)"
            )));
        }

        if !is_on_path(&self.ffmpeg, "-version") {
            return Err(SimreelError::validation(format!(
                "'{}' is required for encoding, but was not found on PATH",
                self.ffmpeg
            )));
        }

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-y", "-loglevel", "error", "-framerate"])
            .arg(fps.to_ffmpeg_arg())
            .args(["-start_number", &frames.first.to_string(), "-i"])
            .arg(frames.pattern())
            .args([
                "-frames:v",
                &frames.count.to_string(),
                "-an",
                "-c:v",
                "libx264",
                "-crf",
                &self.crf.to_string(),
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(out_path);

        let out = run_tool(&mut cmd).with_context(|| {
            format!("failed to spawn '{}' (is it installed and on PATH?)", self.ffmpeg)
        })?;
        Ok(out)
    }
}
