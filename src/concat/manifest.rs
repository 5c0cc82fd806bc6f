use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{SimreelError, SimreelResult};
use crate::partition::Segment;

/// Ordered video files of segments `0..len`, always a gap-free prefix of the partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<PathBuf>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next segment. Segments must arrive in partition order.
    pub fn push(&mut self, segment: &Segment) -> SimreelResult<()> {
        if segment.index != self.entries.len() {
            return Err(SimreelError::validation(format!(
                "manifest holds segments 0..{} and cannot take segment {}",
                self.entries.len(),
                segment.index
            )));
        }
        self.entries.push(segment.video_file.clone());
        Ok(())
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the most recent segment.
    pub fn last_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Concat-demuxer ordering file: one `file '<absolute path>'` line per entry.
    pub fn to_list_file(&self) -> SimreelResult<String> {
        let mut out = String::new();
        for path in &self.entries {
            let abs = std::path::absolute(path)
                .with_context(|| format!("resolve '{}'", path.display()))?;
            out.push_str("file '");
            out.push_str(&escape_quoted(&abs));
            out.push_str("'\n");
        }
        Ok(out)
    }
}

fn escape_quoted(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

#[cfg(test)]
#[path = "../../tests/unit/concat/manifest.rs"]
mod tests;
