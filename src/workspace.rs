use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::SimreelResult;

/// Every on-disk location a pipeline run reads or writes.
///
/// The renderer only understands fixed paths inside its project directory, so those are
/// derived from `renderer_dir`; everything else is run-owned scratch under `work_dir`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceContext {
    /// Root of the renderer project (where `npm run` is invoked).
    pub renderer_dir: PathBuf,
    /// Shared dataset slice the renderer reads.
    pub dataset_projection: PathBuf,
    /// Shared directory the renderer writes numbered frames into.
    pub frame_dir: PathBuf,
    /// Per-run scratch directory for segment videos and the manifest.
    pub work_dir: PathBuf,
    /// Concat ordering file, rewritten before every concatenation.
    pub manifest_path: PathBuf,
    /// Concatenation of all segments finished so far.
    pub running_output: PathBuf,
    /// Concatenator output before it replaces `running_output`.
    pub running_staging: PathBuf,
    /// Final video, published only when every segment succeeded.
    pub output_path: PathBuf,
    /// Host-wide lock file guarding the shared renderer paths.
    pub lock_path: PathBuf,
}

pub const DEFAULT_LOCK_FILE: &str = "simreel.lock";

impl WorkspaceContext {
    pub fn new(
        renderer_dir: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        let renderer_dir = renderer_dir.into();
        let work_dir = work_dir.into();
        Self {
            dataset_projection: renderer_dir.join("data").join("world.json"),
            frame_dir: renderer_dir.join("output").join("project"),
            manifest_path: work_dir.join("segments.txt"),
            running_output: work_dir.join("concat.mp4"),
            running_staging: work_dir.join("concat.partial.mp4"),
            lock_path: std::env::temp_dir().join(DEFAULT_LOCK_FILE),
            output_path: output_path.into(),
            renderer_dir,
            work_dir,
        }
    }

    /// Default scratch directory for a renderer project.
    pub fn default_work_dir(renderer_dir: &Path) -> PathBuf {
        renderer_dir.join("output").join("segments")
    }

    pub fn with_lock_path(mut self, lock_path: impl Into<PathBuf>) -> Self {
        self.lock_path = lock_path.into();
        self
    }

    pub fn segment_video_path(&self, index: usize) -> PathBuf {
        self.work_dir.join(format!("segment_{index:06}.mp4"))
    }

    pub fn segment_staging_path(&self, index: usize) -> PathBuf {
        self.work_dir.join(format!("segment_{index:06}.partial.mp4"))
    }

    /// Remove leftovers of an earlier run from the scratch directory.
    pub fn clear_run_artifacts(&self) -> SimreelResult<()> {
        remove_file_if_exists(&self.manifest_path)?;
        remove_file_if_exists(&self.running_output)?;
        remove_file_if_exists(&self.running_staging)?;
        if self.work_dir.is_dir() {
            let entries = std::fs::read_dir(&self.work_dir)
                .with_context(|| format!("list work dir '{}'", self.work_dir.display()))?;
            for entry in entries {
                let path = entry.context("read work dir entry")?.path();
                if is_segment_artifact(&path) {
                    remove_file_if_exists(&path)?;
                }
            }
        }
        Ok(())
    }
}

fn is_segment_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("segment_") && n.ends_with(".mp4"))
}

/// Write `bytes` to a sibling temp file and rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path must have parent")
    })?;
    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad filename"))?;
    let tmp = path.with_file_name(format!("{file_name}.tmp.{}", std::process::id()));

    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }

    std::fs::rename(tmp, path)
}

/// Move `from` onto `to`, replacing it. Falls back to copy + remove across filesystems.
pub fn replace_file(from: &Path, to: &Path) -> SimreelResult<()> {
    ensure_parent_dir(to)?;
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)
        .with_context(|| format!("copy '{}' to '{}'", from.display(), to.display()))?;
    remove_file_if_exists(from)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SimreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    Ok(())
}

pub fn remove_file_if_exists(path: &Path) -> SimreelResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("remove '{}'", path.display()))
            .into()),
    }
}

pub fn remove_dir_if_exists(path: &Path) -> SimreelResult<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("remove directory '{}'", path.display()))
            .into()),
    }
}

#[cfg(test)]
#[path = "../tests/unit/workspace.rs"]
mod tests;
