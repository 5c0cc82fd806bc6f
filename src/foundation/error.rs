use std::path::PathBuf;

/// Convenience result type used across simreel.
pub type SimreelResult<T> = Result<T, SimreelError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum SimreelError {
    /// Another pipeline already holds the process-wide lock.
    #[error("already running: another render pipeline holds '{}'", .0.display())]
    AlreadyRunning(PathBuf),

    /// The dataset file does not have the expected shape.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Invalid user-provided options or a broken internal precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// The external renderer failed for one segment.
    #[error("render failed for segment {segment} ({}): {diagnostics}", describe_status(.status))]
    RenderProcess {
        /// Segment index within the partition.
        segment: usize,
        /// Exit code of the renderer, `None` when it never ran or was killed by a signal.
        status: Option<i32>,
        /// Captured stderr or a description of what went missing.
        diagnostics: String,
    },

    /// Frames for one segment could not be turned into a video file.
    #[error("encode failed for segment {segment}: {reason}")]
    Encode {
        /// Segment index within the partition.
        segment: usize,
        /// What went wrong.
        reason: String,
    },

    /// The running output could not be re-concatenated after a segment.
    #[error("concatenation failed after segment {segment}: {reason}")]
    Concatenation {
        /// Index of the last segment in the manifest being concatenated.
        segment: usize,
        /// What went wrong.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimreelError {
    /// Build a [`SimreelError::DataFormat`] value.
    pub fn data_format(msg: impl Into<String>) -> Self {
        Self::DataFormat(msg.into())
    }

    /// Build a [`SimreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SimreelError::Encode`] value.
    pub fn encode(segment: usize, reason: impl Into<String>) -> Self {
        Self::Encode {
            segment,
            reason: reason.into(),
        }
    }

    /// Build a [`SimreelError::Concatenation`] value.
    pub fn concatenation(segment: usize, reason: impl Into<String>) -> Self {
        Self::Concatenation {
            segment,
            reason: reason.into(),
        }
    }

    /// Segment index the failure belongs to, for stage errors.
    pub fn segment(&self) -> Option<usize> {
        match self {
            Self::RenderProcess { segment, .. }
            | Self::Encode { segment, .. }
            | Self::Concatenation { segment, .. } => Some(*segment),
            _ => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
