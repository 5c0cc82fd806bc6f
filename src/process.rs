use std::process::{Command, Stdio};

/// Longest stderr tail kept in diagnostics.
const MAX_DIAGNOSTIC_BYTES: usize = 4096;

/// Result of one blocking collaborator invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
    pub success: bool,
    /// Trimmed tail of the captured stderr.
    pub diagnostics: String,
}

impl ToolOutput {
    pub fn ok() -> Self {
        Self {
            status: Some(0),
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failed(status: Option<i32>, diagnostics: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Spawn `cmd`, wait for it to exit and capture its stderr. No timeout is applied.
pub fn run_tool(cmd: &mut Command) -> std::io::Result<ToolOutput> {
    tracing::debug!(command = ?cmd, "spawning");
    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?
        .wait_with_output()?;

    Ok(ToolOutput {
        status: output.status.code(),
        success: output.status.success(),
        diagnostics: stderr_tail(&output.stderr),
    })
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= MAX_DIAGNOSTIC_BYTES {
        return text.to_string();
    }
    let mut cut = text.len() - MAX_DIAGNOSTIC_BYTES;
    while !text.is_char_boundary(cut) {
        cut += 1;
    }
    format!("...{}", &text[cut..])
}

/// Return `true` when `program` can be invoked from `PATH`.
pub fn is_on_path(program: &str, version_arg: &str) -> bool {
    Command::new(program)
        .arg(version_arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
