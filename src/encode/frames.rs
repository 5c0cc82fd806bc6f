use std::path::{Path, PathBuf};

/// File extension of frames written by the renderer.
pub const FRAME_EXTENSION: &str = "png";

#[derive(thiserror::Error, Debug)]
pub enum FrameScanError {
    #[error("frame directory '{}' could not be read: {source}", .dir.display())]
    Io {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("no frames found in '{}'", .0.display())]
    Empty(PathBuf),

    #[error("frame sequence has a gap: expected frame {expected}, found {found}")]
    Gap { expected: u64, found: u64 },

    #[error("frame names mix zero-padded and unpadded numbering")]
    MixedWidth,

    #[error("frame '{}' could not be decoded: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Contiguous run of numbered frame images in one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    pub dir: PathBuf,
    /// Number of the first frame.
    pub first: u64,
    pub count: u64,
    /// Zero-padded width of frame names, `None` for unpadded names.
    pub width: Option<usize>,
}

impl FrameSequence {
    /// Collect `<number>.png` files in `dir`. Other files are ignored.
    ///
    /// The numbers must form one contiguous run; a gap is an error, not something to skip.
    pub fn scan(dir: &Path) -> Result<Self, FrameScanError> {
        let io_err = |source| FrameScanError::Io {
            dir: dir.to_path_buf(),
            source,
        };

        let mut frames = Vec::<(u64, usize, bool)>::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FRAME_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let Ok(n) = stem.parse::<u64>() else {
                continue;
            };
            frames.push((n, stem.len(), stem.len() > 1 && stem.starts_with('0')));
        }

        if frames.is_empty() {
            return Err(FrameScanError::Empty(dir.to_path_buf()));
        }
        frames.sort_unstable();

        let first = frames[0].0;
        for (offset, &(n, _, _)) in frames.iter().enumerate() {
            let expected = first + offset as u64;
            if n != expected {
                return Err(FrameScanError::Gap { expected, found: n });
            }
        }

        let name_len = frames[0].1;
        let width = if frames.iter().all(|f| f.1 == name_len) {
            Some(name_len)
        } else if frames.iter().any(|f| f.2) {
            return Err(FrameScanError::MixedWidth);
        } else {
            None
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            first,
            count: frames.len() as u64,
            width,
        })
    }

    /// printf-style input pattern understood by ffmpeg's image2 demuxer.
    pub fn pattern(&self) -> PathBuf {
        let spec = match self.width {
            Some(w) => format!("%0{w}d.{FRAME_EXTENSION}"),
            None => format!("%d.{FRAME_EXTENSION}"),
        };
        self.dir.join(spec)
    }

    pub fn frame_path(&self, n: u64) -> PathBuf {
        let name = match self.width {
            Some(w) => format!("{n:0w$}.{FRAME_EXTENSION}"),
            None => format!("{n}.{FRAME_EXTENSION}"),
        };
        self.dir.join(name)
    }

    /// Frame paths in playback order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (self.first..self.first + self.count).map(|n| self.frame_path(n))
    }

    /// Pixel size of the first frame.
    pub fn dimensions(&self) -> Result<(u32, u32), FrameScanError> {
        let path = self.frame_path(self.first);
        image::image_dimensions(&path).map_err(|e| FrameScanError::Unreadable {
            path,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;
