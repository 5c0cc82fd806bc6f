pub mod ffmpeg;
pub mod frames;
pub mod segment;
