use crate::image_pipeline::normalize::RangeConfig;
use crate::image_pipeline::palette::PaletteSelection;
use crate::image_pipeline::sharpen::SharpenLevel;
use crate::serial::BaudRate;

/// Which optional analyses are shown, and therefore computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub histogram: bool,
    pub cursor_readout: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            histogram: true,
            cursor_readout: true,
        }
    }
}

/// Operator's serial port and baud selection. Independent of whether a session is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialSelection {
    ports: Vec<String>,
    port_index: usize,
    baud: BaudRate,
}

impl SerialSelection {
    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    /// Replaces the enumerated port list, keeping the selected port when it is still present.
    pub fn set_ports(&mut self, ports: Vec<String>) {
        let previous = self.selected_port().map(str::to_owned);
        self.ports = ports;
        self.port_index = previous
            .and_then(|name| self.ports.iter().position(|p| *p == name))
            .unwrap_or(0);
    }

    pub fn selected_port(&self) -> Option<&str> {
        self.ports.get(self.port_index).map(String::as_str)
    }

    /// Selects `name` if it was enumerated.
    pub fn select_port(&mut self, name: &str) -> bool {
        match self.ports.iter().position(|p| p == name) {
            Some(index) => {
                self.port_index = index;
                true
            }
            None => false,
        }
    }

    pub fn cycle_port(&mut self) -> Option<&str> {
        if !self.ports.is_empty() {
            self.port_index = (self.port_index + 1) % self.ports.len();
        }
        self.selected_port()
    }

    pub fn baud(&self) -> BaudRate {
        self.baud
    }

    pub fn set_baud(&mut self, baud: BaudRate) {
        self.baud = baud;
    }

    pub fn cycle_baud(&mut self) -> BaudRate {
        self.baud = self.baud.next();
        self.baud
    }
}

/// Live configuration, mutated by operator actions and read by every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigState {
    pub palette: PaletteSelection,
    pub range: RangeConfig,
    pub sharpen: SharpenLevel,
    pub toggles: DisplayToggles,
    pub serial: SerialSelection,
}
