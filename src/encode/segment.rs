use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::EncodeTool;
use crate::encode::frames::FrameSequence;
use crate::foundation::core::Fps;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::partition::Segment;
use crate::workspace::{ensure_parent_dir, remove_file_if_exists, replace_file};

/// Encode the frames in `frame_dir` into `segment.video_file`, replacing any earlier file.
#[tracing::instrument(skip_all, fields(segment = segment.index))]
pub fn encode_segment(
    frame_dir: &Path,
    fps: Fps,
    segment: &Segment,
    encoder: &dyn EncodeTool,
) -> SimreelResult<PathBuf> {
    let frames = FrameSequence::scan(frame_dir)
        .map_err(|e| SimreelError::encode(segment.index, e.to_string()))?;
    tracing::debug!(frames = frames.count, first = frames.first, "encoding frames");

    ensure_parent_dir(&segment.staging_file)?;
    remove_file_if_exists(&segment.staging_file)?;

    let out = encoder
        .encode(&frames, fps, &segment.staging_file)
        .map_err(|e| SimreelError::encode(segment.index, format!("{e:#}")))?;
    if !out.success {
        let status = out
            .status
            .map_or_else(|| "no exit code".to_string(), |c| format!("exit code {c}"));
        return Err(SimreelError::encode(
            segment.index,
            format!("encoder failed ({status}): {}", out.diagnostics),
        ));
    }
    if !segment.staging_file.is_file() {
        return Err(SimreelError::encode(
            segment.index,
            format!(
                "encoder exited successfully but wrote no '{}'",
                segment.staging_file.display()
            ),
        ));
    }

    replace_file(&segment.staging_file, &segment.video_file)?;
    tracing::info!(frames = frames.count, video = %segment.video_file.display(), "segment encoded");
    Ok(segment.video_file.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/segment.rs"]
mod tests;
