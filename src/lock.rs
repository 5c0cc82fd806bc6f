use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{SimreelError, SimreelResult};

/// Exclusive advisory lock held for the lifetime of a pipeline run.
///
/// The OS releases the lock when the file handle closes, so it is also dropped when the
/// process dies without unwinding. The lock file itself is left in place.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Take the lock or fail immediately with [`SimreelError::AlreadyRunning`].
    pub fn acquire(path: &Path) -> SimreelResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create lock directory '{}'", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .with_context(|| format!("open lock file '{}'", path.display()))?;

        match file.try_lock() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "instance lock acquired");
                Ok(Self {
                    file,
                    path: path.to_path_buf(),
                })
            }
            Err(TryLockError::WouldBlock) => Err(SimreelError::AlreadyRunning(path.to_path_buf())),
            Err(TryLockError::Error(err)) => Err(anyhow::Error::new(err)
                .context(format!("lock '{}'", path.display()))
                .into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
#[path = "../tests/unit/lock.rs"]
mod tests;
