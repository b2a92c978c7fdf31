//! Live viewer core for a dual-plane 16-bit thermal camera: frame reconstruction
//! and display processing, the serial control channel, and persisted settings.

pub mod config;
pub mod image_pipeline;
pub mod logger;
pub mod serial;
pub mod viewer;
