//! Viewer configuration
//!
//! The live `ConfigState` shared by the frame pipeline and operator actions,
//! and its JSON persistence between runs.

mod error;
mod settings;
mod state;

pub use error::{Result, SettingsError};
pub use settings::{PersistedSettings, SETTINGS_FILE, SettingsStore};
pub use state::{ConfigState, DisplayToggles, SerialSelection};
