use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
