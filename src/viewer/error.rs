use thiserror::Error;

use crate::config::SettingsError;
use crate::image_pipeline::PipelineError;
use crate::serial::SerialError;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Serial(#[from] SerialError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("No frame has been processed yet")]
    NoFrame,

    #[error("No serial port selected")]
    NoPortSelected,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
