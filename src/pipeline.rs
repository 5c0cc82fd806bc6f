use std::path::{Path, PathBuf};

use crate::concat::ffmpeg::{ConcatTool, FfmpegConcat};
use crate::concat::incremental::concatenate;
use crate::concat::manifest::Manifest;
use crate::dataset::Dataset;
use crate::encode::ffmpeg::{EncodeTool, FfmpegEncoder};
use crate::encode::segment::encode_segment;
use crate::foundation::core::Fps;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::lock::InstanceLock;
use crate::partition::{partition, segments_for};
use crate::render::config::RenderOptions;
use crate::render::npm::{NpmRenderer, RenderTool};
use crate::render::segment::render_segment;
use crate::workspace::{WorkspaceContext, remove_dir_if_exists, remove_file_if_exists, replace_file};

/// Options for one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOpts {
    /// First step index to render.
    pub start: u64,
    /// One past the last step index; `None` renders to the end of the dataset.
    pub end: Option<u64>,
    /// Maximum number of steps per segment.
    pub group_size: u64,
    /// Frame rate handed to the encoder.
    pub fps: Fps,
    pub render: RenderOptions,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            group_size: 100,
            fps: Fps { num: 25, den: 1 },
            render: RenderOptions::default(),
        }
    }
}

impl PipelineOpts {
    pub fn validate(&self) -> SimreelResult<()> {
        if self.group_size == 0 {
            return Err(SimreelError::validation("group size must be >= 1"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.render.validate()
    }
}

/// The three external collaborators a run drives.
pub struct Toolchain {
    pub renderer: Box<dyn RenderTool>,
    pub encoder: Box<dyn EncodeTool>,
    pub concat: Box<dyn ConcatTool>,
}

impl Toolchain {
    /// npm renderer in `renderer_dir` plus the system `ffmpeg`.
    pub fn system(renderer_dir: impl Into<PathBuf>, install: bool) -> Self {
        Self {
            renderer: Box::new(NpmRenderer::new(renderer_dir).with_install(install)),
            encoder: Box::new(FfmpegEncoder::default()),
            concat: Box::new(FfmpegConcat::default()),
        }
    }
}

/// Driver state; entered in this order, one segment at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Partitioned,
    Rendering(usize),
    Encoding(usize),
    Concatenating(usize),
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every segment was rendered and the output video published.
    Rendered {
        segments: usize,
        steps: u64,
        output: PathBuf,
    },
    /// The requested interval holds no steps; no output video was written.
    NothingToRender { start: u64, end: u64 },
}

/// Segmented render, encode and concatenate driver.
pub struct Pipeline<'a> {
    opts: PipelineOpts,
    workspace: &'a WorkspaceContext,
    tools: &'a Toolchain,
    history: Vec<PipelineState>,
}

impl<'a> Pipeline<'a> {
    pub fn new(opts: PipelineOpts, workspace: &'a WorkspaceContext, tools: &'a Toolchain) -> Self {
        Self {
            opts,
            workspace,
            tools,
            history: Vec::new(),
        }
    }

    /// States entered so far, including those of a failed run.
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    fn enter(&mut self, state: PipelineState) {
        tracing::debug!(?state, "pipeline state");
        self.history.push(state);
    }

    /// Run the whole pipeline. Any failure aborts; there is no resume.
    pub fn run(&mut self, dataset_path: &Path) -> SimreelResult<PipelineOutcome> {
        self.history.clear();
        self.enter(PipelineState::Init);

        let _lock = InstanceLock::acquire(&self.workspace.lock_path)?;
        self.opts.validate()?;
        let dataset = Dataset::load(dataset_path)?;

        let index_end = dataset.index_range().map_or(0, |r| r.end);
        let start = self.opts.start;
        let end = self.opts.end.unwrap_or(index_end).min(index_end);

        let ranges = partition(start, end, self.opts.group_size)?;
        let segments = segments_for(&ranges, self.workspace);
        self.enter(PipelineState::Partitioned);
        tracing::info!(start, end, segments = segments.len(), "partitioned");

        if segments.is_empty() {
            self.enter(PipelineState::Done);
            tracing::warn!(start, end, "nothing to render");
            return Ok(PipelineOutcome::NothingToRender { start, end });
        }

        self.workspace.clear_run_artifacts()?;
        self.tools.renderer.prepare()?;

        let mut manifest = Manifest::new();
        for segment in &segments {
            self.enter(PipelineState::Rendering(segment.index));
            let config = self.opts.render.config_for(segment.range);
            let frame_dir = render_segment(
                &dataset,
                segment,
                &config,
                self.tools.renderer.as_ref(),
                self.workspace,
            )?;

            self.enter(PipelineState::Encoding(segment.index));
            encode_segment(
                &frame_dir,
                self.opts.fps,
                segment,
                self.tools.encoder.as_ref(),
            )?;

            self.enter(PipelineState::Concatenating(segment.index));
            manifest.push(segment)?;
            concatenate(&manifest, self.workspace, self.tools.concat.as_ref())?;

            remove_dir_if_exists(&frame_dir)?;
            remove_file_if_exists(&segment.staging_file)?;
            tracing::info!(
                segment = segment.index,
                done = segment.index + 1,
                total = segments.len(),
                "segment complete"
            );
        }

        replace_file(&self.workspace.running_output, &self.workspace.output_path)?;
        self.finish()?;
        self.enter(PipelineState::Done);

        tracing::info!(output = %self.workspace.output_path.display(), "render complete");
        Ok(PipelineOutcome::Rendered {
            segments: segments.len(),
            steps: ranges.iter().map(|r| r.len_steps()).sum(),
            output: self.workspace.output_path.clone(),
        })
    }

    /// Drop every transient artifact, leaving only the published output.
    fn finish(&self) -> SimreelResult<()> {
        let ws = self.workspace;
        remove_file_if_exists(&ws.manifest_path)?;
        remove_dir_if_exists(&ws.frame_dir)?;
        remove_file_if_exists(&ws.dataset_projection)?;
        ws.clear_run_artifacts()?;
        // The work dir stays when it holds files that are not ours.
        match std::fs::remove_dir(&ws.work_dir) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::DirectoryNotEmpty
                ) =>
            {
                Ok(())
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("remove work dir '{}'", ws.work_dir.display()))
                .into()),
        }
    }
}

/// Convenience wrapper around [`Pipeline::run`].
pub fn run_pipeline(
    dataset_path: &Path,
    opts: PipelineOpts,
    workspace: &WorkspaceContext,
    tools: &Toolchain,
) -> SimreelResult<PipelineOutcome> {
    Pipeline::new(opts, workspace, tools).run(dataset_path)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
