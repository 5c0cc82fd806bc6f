use std::path::PathBuf;
use std::process::Command;

use anyhow::Context as _;

use crate::foundation::error::{SimreelError, SimreelResult};
use crate::process::{ToolOutput, run_tool};
use crate::render::config::{RENDER_CONFIG_ENV, RenderConfig};
use crate::workspace::WorkspaceContext;

/// External per-step image renderer.
///
/// Contract: reads the projection at `workspace.dataset_projection`, writes sequentially
/// numbered frames into `workspace.frame_dir`, and blocks until done.
pub trait RenderTool {
    /// One-time setup before the first segment is rendered.
    fn prepare(&self) -> SimreelResult<()> {
        Ok(())
    }

    fn render(
        &self,
        config: &RenderConfig,
        workspace: &WorkspaceContext,
    ) -> SimreelResult<ToolOutput>;
}

/// Renderer implemented as an npm script in a node project.
#[derive(Clone, Debug)]
pub struct NpmRenderer {
    pub project_dir: PathBuf,
    pub npm: String,
    /// Script name passed to `npm run`.
    pub script: String,
    /// Run `npm install` in [`RenderTool::prepare`].
    pub install: bool,
}

impl NpmRenderer {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            npm: "npm".to_string(),
            script: "test".to_string(),
            install: true,
        }
    }

    pub fn with_install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }
}

impl RenderTool for NpmRenderer {
    fn prepare(&self) -> SimreelResult<()> {
        if !self.install {
            return Ok(());
        }
        tracing::info!(dir = %self.project_dir.display(), "installing renderer dependencies");
        let out = run_tool(
            Command::new(&self.npm)
                .arg("install")
                .current_dir(&self.project_dir),
        )
        .with_context(|| format!("spawn '{} install'", self.npm))?;
        if !out.success {
            // Setup runs before the first segment and blocks it.
            return Err(SimreelError::RenderProcess {
                segment: 0,
                status: out.status,
                diagnostics: format!(
                    "'{} install' failed in '{}': {}",
                    self.npm,
                    self.project_dir.display(),
                    out.diagnostics
                ),
            });
        }
        Ok(())
    }

    fn render(
        &self,
        config: &RenderConfig,
        _workspace: &WorkspaceContext,
    ) -> SimreelResult<ToolOutput> {
        let env_value = config.to_env_value()?;
        let out = run_tool(
            Command::new(&self.npm)
                .args(["run", self.script.as_str()])
                .env(RENDER_CONFIG_ENV, env_value)
                .current_dir(&self.project_dir),
        )
        .with_context(|| format!("spawn '{} run {}'", self.npm, self.script))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/npm.rs"]
mod tests;
