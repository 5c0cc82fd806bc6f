use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::partition::Segment;
use crate::render::config::RenderConfig;
use crate::render::npm::RenderTool;
use crate::workspace::{WorkspaceContext, remove_dir_if_exists};

/// Render one segment's steps and return the directory holding its frames.
///
/// The projection fully replaces the shared input and the frame directory is emptied
/// first, so nothing from a previous segment can leak into this one.
#[tracing::instrument(skip_all, fields(segment = segment.index, range = %segment.range))]
pub fn render_segment(
    dataset: &Dataset,
    segment: &Segment,
    config: &RenderConfig,
    renderer: &dyn RenderTool,
    workspace: &WorkspaceContext,
) -> SimreelResult<PathBuf> {
    let projection = dataset.project(segment.range);
    tracing::debug!(steps = projection.len(), "writing dataset projection");
    projection.write_to(&workspace.dataset_projection)?;

    remove_dir_if_exists(&segment.frame_dir)?;

    let out = renderer
        .render(config, workspace)
        .map_err(|e| SimreelError::RenderProcess {
            segment: segment.index,
            status: None,
            diagnostics: format!("{e:#}"),
        })?;

    if !out.success {
        return Err(SimreelError::RenderProcess {
            segment: segment.index,
            status: out.status,
            diagnostics: out.diagnostics,
        });
    }
    if !segment.frame_dir.is_dir() {
        return Err(SimreelError::RenderProcess {
            segment: segment.index,
            status: out.status,
            diagnostics: format!(
                "renderer exited successfully but frame directory '{}' does not exist",
                segment.frame_dir.display()
            ),
        });
    }

    tracing::info!("segment rendered");
    Ok(segment.frame_dir.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/render/segment.rs"]
mod tests;
