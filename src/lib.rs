//! simreel renders a step-indexed simulation dataset into one video.
//!
//! Per-step drawing is delegated to an external renderer; simreel owns the sequencing
//! around it.
//!
//! # Pipeline overview
//!
//! 1. **Load**: read the `{"data": {...}}` dataset once ([`Dataset`])
//! 2. **Partition**: split the requested step interval into bounded groups ([`partition`])
//! 3. For each group, strictly in order:
//!    - **Render**: write the group's projection to the renderer's input file and run it
//!    - **Encode**: turn the numbered frames into one segment video
//!    - **Concatenate**: stream-copy every finished segment into the running output
//! 4. **Publish**: move the running output to the final path and drop scratch files
//!
//! Every write is a full replacement, so a failed run can always be restarted from scratch.
//! Only one run may use a renderer at a time; [`InstanceLock`] enforces that host-wide.
#![forbid(unsafe_code)]

mod foundation;

/// Incremental stream-copy concatenation.
pub mod concat;
/// Dataset loading and projection.
pub mod dataset;
/// Frame scanning and segment encoding.
pub mod encode;
/// Process-wide exclusivity lock.
pub mod lock;
/// Range partitioning and segments.
pub mod partition;
/// End-to-end driver.
pub mod pipeline;
/// Blocking child-process helpers.
pub mod process;
/// Renderer configuration and segment rendering.
pub mod render;
/// On-disk layout of a run.
pub mod workspace;

pub use crate::foundation::core::{Fps, RenderRange};
pub use crate::foundation::error::{SimreelError, SimreelResult};

pub use concat::ffmpeg::{ConcatTool, FfmpegConcat};
pub use concat::incremental::concatenate;
pub use concat::manifest::Manifest;
pub use dataset::{Dataset, Step};
pub use encode::ffmpeg::{EncodeTool, FfmpegEncoder};
pub use encode::frames::{FRAME_EXTENSION, FrameScanError, FrameSequence};
pub use encode::segment::encode_segment;
pub use lock::InstanceLock;
pub use partition::{Segment, partition, segments_for};
pub use pipeline::{
    Pipeline, PipelineOpts, PipelineOutcome, PipelineState, Toolchain, run_pipeline,
};
pub use process::{ToolOutput, is_on_path, run_tool};
pub use render::config::{Colorizer, RENDER_CONFIG_ENV, RenderConfig, RenderOptions};
pub use render::npm::{NpmRenderer, RenderTool};
pub use render::segment::render_segment;
pub use workspace::WorkspaceContext;
