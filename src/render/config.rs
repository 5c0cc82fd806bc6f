use crate::foundation::core::RenderRange;
use crate::foundation::error::{SimreelError, SimreelResult};

/// Environment variable the renderer reads its configuration from.
pub const RENDER_CONFIG_ENV: &str = "VITE_ANIMCONFIG";

/// How the renderer maps per-node values to colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Colorizer {
    /// RGB332 decoding of the value.
    #[serde(rename = "8Bit")]
    EightBit,
    /// Lookup in the renderer's `colorize.json`.
    File,
}

/// Per-segment parameter bundle handed to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub colorizer: Option<Colorizer>,
    /// First step to draw, as a position within the projection.
    pub render_start: u64,
    /// One past the last step to draw, as a position within the projection.
    pub render_end: u64,
    /// Animation time spent on each step, in seconds.
    pub time_per_step: f64,
    pub hud: bool,
}

/// Options shared by every segment of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub colorizer: Option<Colorizer>,
    pub time_per_step: f64,
    pub hud: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colorizer: None,
            time_per_step: 1.0,
            hud: true,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> SimreelResult<()> {
        if !self.time_per_step.is_finite() || self.time_per_step <= 0.0 {
            return Err(SimreelError::validation(format!(
                "time per step must be a positive number (got {})",
                self.time_per_step
            )));
        }
        Ok(())
    }

    /// Configuration for one segment. The renderer only ever sees the projection of
    /// `range`, so the bounds cover that projection from its first entry.
    pub fn config_for(&self, range: RenderRange) -> RenderConfig {
        RenderConfig {
            colorizer: self.colorizer,
            render_start: 0,
            render_end: range.len_steps(),
            time_per_step: self.time_per_step,
            hud: self.hud,
        }
    }
}

impl RenderConfig {
    pub fn to_env_value(&self) -> SimreelResult<String> {
        serde_json::to_string(self)
            .map_err(|e| anyhow::anyhow!("serialize render config: {e}").into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
