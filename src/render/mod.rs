pub mod config;
pub mod npm;
pub mod segment;
