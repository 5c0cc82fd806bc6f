use std::path::Path;
use std::process::Command;

use anyhow::Context as _;

use crate::foundation::error::{SimreelError, SimreelResult};
use crate::process::{ToolOutput, is_on_path, run_tool};

/// Joins the videos named in an ordering file into one output without re-encoding.
pub trait ConcatTool {
    fn concat(&self, list_path: &Path, out_path: &Path) -> SimreelResult<ToolOutput>;
}

/// Stream-copy concatenation through ffmpeg's concat demuxer.
#[derive(Clone, Debug)]
pub struct FfmpegConcat {
    pub ffmpeg: String,
}

impl Default for FfmpegConcat {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

impl ConcatTool for FfmpegConcat {
    fn concat(&self, list_path: &Path, out_path: &Path) -> SimreelResult<ToolOutput> {
        if !is_on_path(&self.ffmpeg, "-version") {
            return Err(SimreelError::validation(format!(
                "'{}' is required for concatenation, but was not found on PATH",
                self.ffmpeg
            )));
        }

        let mut cmd = Command::new(&self.ffmpeg);
        // `-safe 0` because list entries are absolute paths.
        cmd.args(["-y", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
            .arg(list_path)
            .args(["-c", "copy"])
            .arg(out_path);

        let out = run_tool(&mut cmd).with_context(|| {
            format!("failed to spawn '{}' (is it installed and on PATH?)", self.ffmpeg)
        })?;
        Ok(out)
    }
}
