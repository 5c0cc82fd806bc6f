pub mod ffmpeg;
pub mod incremental;
pub mod manifest;
