use std::path::PathBuf;

use anyhow::Context as _;

use crate::concat::ffmpeg::ConcatTool;
use crate::concat::manifest::Manifest;
use crate::foundation::error::{SimreelError, SimreelResult};
use crate::workspace::{WorkspaceContext, remove_file_if_exists, replace_file, write_atomic};

/// Rebuild `workspace.running_output` from every video in `manifest`.
///
/// The ordering file is rewritten in full and the concatenation starts from scratch each
/// time; stream copy has no safe append.
#[tracing::instrument(skip_all, fields(segments = manifest.len()))]
pub fn concatenate(
    manifest: &Manifest,
    workspace: &WorkspaceContext,
    concat: &dyn ConcatTool,
) -> SimreelResult<PathBuf> {
    let Some(last) = manifest.last_index() else {
        return Err(SimreelError::validation(
            "concatenation needs at least one segment",
        ));
    };

    for (i, path) in manifest.entries().iter().enumerate() {
        if !path.is_file() {
            return Err(SimreelError::concatenation(
                last,
                format!("video of segment {i} is missing at '{}'", path.display()),
            ));
        }
    }

    let list = manifest.to_list_file()?;
    write_atomic(&workspace.manifest_path, list.as_bytes()).with_context(|| {
        format!(
            "write concat manifest '{}'",
            workspace.manifest_path.display()
        )
    })?;

    remove_file_if_exists(&workspace.running_staging)?;
    let out = concat
        .concat(&workspace.manifest_path, &workspace.running_staging)
        .map_err(|e| SimreelError::concatenation(last, format!("{e:#}")))?;
    if !out.success {
        let status = out
            .status
            .map_or_else(|| "no exit code".to_string(), |c| format!("exit code {c}"));
        return Err(SimreelError::concatenation(
            last,
            format!("concat tool failed ({status}): {}", out.diagnostics),
        ));
    }
    if !workspace.running_staging.is_file() {
        return Err(SimreelError::concatenation(
            last,
            format!(
                "concat tool exited successfully but wrote no '{}'",
                workspace.running_staging.display()
            ),
        ));
    }

    replace_file(&workspace.running_staging, &workspace.running_output)?;
    tracing::info!(output = %workspace.running_output.display(), "running output updated");
    Ok(workspace.running_output.clone())
}

#[cfg(test)]
#[path = "../../tests/unit/concat/incremental.rs"]
mod tests;
