use std::path::PathBuf;

use crate::image_pipeline::recorder::RecordingSummary;

/// Operator inputs, one per control the display layer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SaveRaw,
    SavePreview,
    CyclePalette,
    ToggleInvert,
    ToggleAutoRange,
    ToggleHistogram,
    CycleSharpen,
    ToggleCursorReadout,
    ToggleRecording,
    /// Manual window start, `0..=65535`
    SetOffset(u16),
    /// Manual window width; zero is raised to one
    SetWidth(u16),
    MoveCursor { x: usize, y: usize },
    ClearCursor,
    RescanPorts,
    CyclePort,
    CycleBaud,
    ToggleSerial,
    TxChar(char),
    TxBackspace,
    SendDraft,
    NucNormal,
    NucNoShutter,
}

/// What a dispatched action did, beyond mutating configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied,
    Saved(PathBuf),
    RecordingStarted,
    RecordingStopped(RecordingSummary),
    Connected(String),
    Disconnected,
    Sent,
}
