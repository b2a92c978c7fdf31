use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::error::Result;
use crate::config::state::ConfigState;
use crate::image_pipeline::normalize::{DEFAULT_MANUAL_WIDTH, RangeMode};
use crate::image_pipeline::palette::PaletteSelection;
use crate::image_pipeline::sharpen::SharpenLevel;
use crate::serial::BaudRate;

pub const SETTINGS_FILE: &str = "titan1280_settings.json";

/// On-disk settings record. Missing fields take their defaults; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub palette_index: usize,
    pub invert: bool,
    pub auto_range: bool,
    /// Clamped to the 16-bit domain on apply
    pub offset: u32,
    pub range: u32,
    pub show_histogram: bool,
    pub sharpen_index: usize,
    pub show_cursor_readout: bool,
    pub last_serial_port: Option<String>,
    pub last_baud_rate: u32,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            palette_index: 0,
            invert: false,
            auto_range: true,
            offset: 0,
            range: u32::from(DEFAULT_MANUAL_WIDTH),
            show_histogram: true,
            sharpen_index: 0,
            show_cursor_readout: true,
            last_serial_port: None,
            last_baud_rate: BaudRate::default().rate(),
        }
    }
}

impl PersistedSettings {
    /// Snapshot of `config`; `connected_port` is the port of the open session, if any.
    pub fn capture(config: &ConfigState, connected_port: Option<&str>) -> Self {
        Self {
            palette_index: config.palette.index(),
            invert: config.palette.inverted(),
            auto_range: !config.range.is_manual(),
            offset: u32::from(config.range.manual_offset()),
            range: u32::from(config.range.manual_width()),
            show_histogram: config.toggles.histogram,
            sharpen_index: config.sharpen.index(),
            show_cursor_readout: config.toggles.cursor_readout,
            last_serial_port: connected_port.map(str::to_owned),
            last_baud_rate: config.serial.baud().rate(),
        }
    }

    /// Writes the persisted values into `config`, clamping anything out of range.
    /// Port reselection is left to the caller, which knows the enumerated ports.
    pub fn apply(&self, config: &mut ConfigState) {
        config.palette = PaletteSelection::new(self.palette_index, self.invert);

        config.range.set_mode(if self.auto_range {
            RangeMode::Auto
        } else {
            RangeMode::Manual
        });
        config.range.set_manual_offset(clamp_u16(self.offset));
        config.range.set_manual_width(clamp_u16(self.range));

        config.sharpen = SharpenLevel::from_index(self.sharpen_index).unwrap_or_else(|| {
            warn!(index = self.sharpen_index, "Unknown sharpen level, using Off");
            SharpenLevel::Off
        });

        config.toggles.histogram = self.show_histogram;
        config.toggles.cursor_readout = self.show_cursor_readout;

        config.serial.set_baud(BaudRate::from_rate(self.last_baud_rate).unwrap_or_else(|| {
            warn!(baud = self.last_baud_rate, "Unsupported baud rate, using default");
            BaudRate::default()
        }));
    }
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// JSON settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SETTINGS_FILE)
    }
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no file exists yet.
    pub fn load(&self) -> Result<Option<PersistedSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&text)?;
        Ok(Some(settings))
    }

    /// Loads the file, falling back to defaults when it is missing or unreadable.
    pub fn load_or_default(&self) -> PersistedSettings {
        match self.load() {
            Ok(Some(settings)) => {
                info!("Settings loaded from {}", self.path.display());
                settings
            }
            Ok(None) => {
                debug!("No settings at {}; using defaults", self.path.display());
                PersistedSettings::default()
            }
            Err(e) => {
                warn!("Could not load settings from {}: {}; using defaults", self.path.display(), e);
                PersistedSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PersistedSettings) -> Result<()> {
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text)?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::SettingsError;

    #[test]
    fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join(SETTINGS_FILE));
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.load_or_default(), PersistedSettings::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(&path);

        assert!(matches!(store.load(), Err(SettingsError::Json(_))));
        assert_eq!(store.load_or_default(), PersistedSettings::default());
    }

    #[test]
    fn partial_file_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{"palette_index": 3, "future_option": [1, 2]}"#).unwrap();

        let settings = SettingsStore::new(&path).load().unwrap().unwrap();
        assert_eq!(settings.palette_index, 3);
        assert!(settings.auto_range);
        assert_eq!(settings.range, 65535);
        assert_eq!(settings.last_baud_rate, 115200);
    }

    #[test]
    fn save_then_load_keeps_original_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join(SETTINGS_FILE));
        let settings = PersistedSettings {
            palette_index: 7,
            auto_range: false,
            offset: 1000,
            range: 2000,
            last_serial_port: Some("/dev/ttyUSB0".into()),
            last_baud_rate: 921600,
            ..PersistedSettings::default()
        };

        store.save(&settings).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        for key in [
            "palette_index",
            "invert",
            "auto_range",
            "offset",
            "range",
            "show_histogram",
            "sharpen_index",
            "show_cursor_readout",
            "last_serial_port",
            "last_baud_rate",
        ] {
            assert!(text.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert_eq!(store.load().unwrap(), Some(settings));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("absent").join(SETTINGS_FILE));
        assert!(matches!(store.save(&PersistedSettings::default()), Err(SettingsError::Io(_))));
    }

    #[test]
    fn apply_clamps_out_of_range_values() {
        let settings = PersistedSettings {
            palette_index: 12,
            offset: 70000,
            range: 0,
            sharpen_index: 9,
            last_baud_rate: 12345,
            ..PersistedSettings::default()
        };
        let mut config = ConfigState::default();

        settings.apply(&mut config);

        assert_eq!(config.palette.index(), 2);
        assert_eq!(config.range.manual_offset(), u16::MAX);
        assert_eq!(config.range.manual_width(), 1);
        assert_eq!(config.sharpen, SharpenLevel::Off);
        assert_eq!(config.serial.baud(), BaudRate::B115200);
    }

    #[test]
    fn capture_records_connected_port_only() {
        let mut config = ConfigState::default();
        config.palette.toggle_invert();
        config.sharpen = SharpenLevel::High;
        config.serial.set_baud(BaudRate::B9600);

        let disconnected = PersistedSettings::capture(&config, None);
        assert!(disconnected.last_serial_port.is_none());
        assert!(disconnected.invert);
        assert_eq!(disconnected.sharpen_index, 3);
        assert_eq!(disconnected.last_baud_rate, 9600);

        let connected = PersistedSettings::capture(&config, Some("COM3"));
        assert_eq!(connected.last_serial_port.as_deref(), Some("COM3"));
    }
}
