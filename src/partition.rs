use std::path::PathBuf;

use crate::foundation::core::RenderRange;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::workspace::WorkspaceContext;

/// Split `[start, end)` into consecutive ranges of at most `group_size` steps.
///
/// Pure and deterministic: segment indices are positions in the returned vector, and the
/// driver relies on re-deriving the same sequence for the same inputs.
pub fn partition(start: u64, end: u64, group_size: u64) -> SimreelResult<Vec<RenderRange>> {
    if group_size == 0 {
        return Err(SimreelError::validation("group size must be >= 1"));
    }
    if end <= start {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity((end - start).div_ceil(group_size) as usize);
    let mut cur = start;
    while cur < end {
        let next = cur.saturating_add(group_size).min(end);
        out.push(RenderRange {
            start: cur,
            end: next,
        });
        cur = next;
    }
    Ok(out)
}

/// One partition entry on its way through render, encode and concatenate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Position within the full partition (0-based).
    pub index: usize,
    pub range: RenderRange,
    /// Shared frame output directory the renderer writes into.
    pub frame_dir: PathBuf,
    /// Final per-segment video, kept until the run finishes.
    pub video_file: PathBuf,
    /// Encoder output before it is renamed onto `video_file`.
    pub staging_file: PathBuf,
}

impl Segment {
    pub fn new(index: usize, range: RenderRange, workspace: &WorkspaceContext) -> Self {
        Self {
            index,
            range,
            frame_dir: workspace.frame_dir.clone(),
            video_file: workspace.segment_video_path(index),
            staging_file: workspace.segment_staging_path(index),
        }
    }
}

/// Attach artifact paths to every range of a partition.
pub fn segments_for(ranges: &[RenderRange], workspace: &WorkspaceContext) -> Vec<Segment> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, r)| Segment::new(i, *r, workspace))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/partition.rs"]
mod tests;
