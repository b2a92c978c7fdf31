use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::config::{ConfigState, PersistedSettings, SettingsStore};
use crate::image_pipeline::export::SnapshotExporter;
use crate::image_pipeline::frame::{ColorFrame, FrameSource, Intensity16Frame, RawDualFrame};
use crate::image_pipeline::pipeline::{FrameOutput, FramePipeline};
use crate::image_pipeline::recorder::{Recorder, VideoSink};
use crate::serial::{DeviceCommand, SerialChannel, SerialError, TransportProvider};
use crate::viewer::action::{Action, ActionOutcome};
use crate::viewer::error::{Result, ViewerError};
use crate::viewer::tx_draft::TxDraft;

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// One viewer run: configuration, frame pipeline, serial link, recorder and the
/// most recent frame, driven by captured frames and operator actions.
pub struct Viewer<P: TransportProvider> {
    config: ConfigState,
    store: SettingsStore,
    pipeline: FramePipeline,
    channel: SerialChannel<P>,
    recorder: Recorder,
    exporter: SnapshotExporter,
    tx_draft: TxDraft,
    cursor: Option<(usize, usize)>,
    current_raw: Option<Intensity16Frame>,
    current_preview: Option<ColorFrame>,
    serial_fault: Option<SerialError>,
}

impl<P: TransportProvider> Viewer<P> {
    pub fn new<D: AsRef<Path>>(provider: P, store: SettingsStore, sink: Box<dyn VideoSink>, snapshot_dir: D) -> Self {
        Self {
            config: ConfigState::default(),
            store,
            pipeline: FramePipeline::new(),
            channel: SerialChannel::new(provider),
            recorder: Recorder::new(sink),
            exporter: SnapshotExporter::new(snapshot_dir),
            tx_draft: TxDraft::new(),
            cursor: None,
            current_raw: None,
            current_preview: None,
            serial_fault: None,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigState {
        &mut self.config
    }

    pub fn channel(&self) -> &SerialChannel<P> {
        &self.channel
    }

    pub fn tx_draft(&self) -> &TxDraft {
        &self.tx_draft
    }

    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn current_raw(&self) -> Option<&Intensity16Frame> {
        self.current_raw.as_ref()
    }

    pub fn current_preview(&self) -> Option<&ColorFrame> {
        self.current_preview.as_ref()
    }

    /// The fault that ended the last serial session, until the next connect.
    pub fn serial_fault(&self) -> Option<&SerialError> {
        self.serial_fault.as_ref()
    }

    /// Restores persisted settings and reconnects to the last port if it is present.
    /// Nothing here is fatal.
    #[instrument(skip(self), fields(path = %self.store.path().display()))]
    pub fn startup(&mut self) {
        let settings = self.store.load_or_default();
        settings.apply(&mut self.config);
        self.rescan_ports();

        let Some(port) = settings.last_serial_port else {
            return;
        };
        if !self.config.serial.select_port(&port) {
            info!("Previously used port {} not found", port);
            return;
        }
        if let Err(e) = self.connect_selected() {
            warn!("Could not reconnect to {}: {}", port, e);
        }
    }

    pub fn rescan_ports(&mut self) {
        match self.channel.available_ports() {
            Ok(ports) => {
                info!(count = ports.len(), "Serial ports scanned");
                self.config.serial.set_ports(ports);
            }
            Err(e) => warn!("{}", e),
        }
    }

    fn connect_selected(&mut self) -> Result<String> {
        let port = self
            .config
            .serial
            .selected_port()
            .map(str::to_owned)
            .ok_or(ViewerError::NoPortSelected)?;
        self.channel.connect(&port, self.config.serial.baud())?;
        self.serial_fault = None;
        Ok(port)
    }

    fn poll_serial(&mut self) {
        if let Some(fault) = self.channel.take_fault() {
            error!("Serial link lost: {}", fault);
            self.serial_fault = Some(fault);
        }
    }

    /// Runs one capture through the pipeline, keeps it as the current frame and
    /// feeds the recorder.
    pub fn process_frame(&mut self, frame: &RawDualFrame) -> Result<FrameOutput> {
        self.poll_serial();

        let output = self.pipeline.process(frame, &self.config, self.cursor)?;
        self.current_raw = Some(output.intensity.clone());
        self.current_preview = Some(output.color.clone());

        if let Err(e) = self.recorder.write(&output.color) {
            error!("Recording failed, stopping: {}", e);
            if let Err(e) = self.recorder.stop() {
                warn!("Failed to close recording: {}", e);
            }
        }
        Ok(output)
    }

    /// Drives frames from `source` until it runs dry. Rejected frames are logged
    /// and skipped. Returns the number of frames processed.
    pub fn run<S: FrameSource>(&mut self, source: &mut S) -> Result<u64> {
        let mut processed = 0;
        while let Some(frame) = source.next_frame()? {
            match self.process_frame(&frame) {
                Ok(_) => processed += 1,
                Err(e) => warn!("Frame rejected: {}", e),
            }
        }
        info!(processed, "Capture source exhausted");
        Ok(processed)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::SaveRaw => {
                let frame = self.current_raw.as_ref().ok_or(ViewerError::NoFrame)?;
                Ok(ActionOutcome::Saved(self.exporter.save_raw(frame)?))
            }
            Action::SavePreview => {
                let frame = self.current_preview.as_ref().ok_or(ViewerError::NoFrame)?;
                Ok(ActionOutcome::Saved(self.exporter.save_preview(frame)?))
            }
            Action::CyclePalette => {
                let kind = self.config.palette.cycle();
                info!("Palette: {}", kind.name());
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleInvert => {
                let inverted = self.config.palette.toggle_invert();
                info!("Invert: {}", on_off(inverted));
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleAutoRange => {
                let mode = self.config.range.toggle_mode();
                info!("Range mode: {:?}", mode);
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleHistogram => {
                self.config.toggles.histogram = !self.config.toggles.histogram;
                info!("Histogram: {}", on_off(self.config.toggles.histogram));
                Ok(ActionOutcome::Applied)
            }
            Action::CycleSharpen => {
                self.config.sharpen = self.config.sharpen.next();
                info!("Sharpen: {}", self.config.sharpen.label());
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleCursorReadout => {
                self.config.toggles.cursor_readout = !self.config.toggles.cursor_readout;
                info!("Cursor readout: {}", on_off(self.config.toggles.cursor_readout));
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleRecording => {
                if let Some(summary) = self.recorder.stop()? {
                    return Ok(ActionOutcome::RecordingStopped(summary));
                }
                let preview = self.current_preview.as_ref().ok_or(ViewerError::NoFrame)?;
                self.recorder.start(preview.width(), preview.height())?;
                Ok(ActionOutcome::RecordingStarted)
            }
            Action::SetOffset(offset) => {
                self.config.range.set_manual_offset(offset);
                Ok(ActionOutcome::Applied)
            }
            Action::SetWidth(width) => {
                self.config.range.set_manual_width(width);
                Ok(ActionOutcome::Applied)
            }
            Action::MoveCursor { x, y } => {
                self.cursor = Some((x, y));
                Ok(ActionOutcome::Applied)
            }
            Action::ClearCursor => {
                self.cursor = None;
                Ok(ActionOutcome::Applied)
            }
            Action::RescanPorts => {
                self.rescan_ports();
                Ok(ActionOutcome::Applied)
            }
            Action::CyclePort => {
                if let Some(port) = self.config.serial.cycle_port() {
                    info!("Selected port: {}", port);
                }
                Ok(ActionOutcome::Applied)
            }
            Action::CycleBaud => {
                let baud = self.config.serial.cycle_baud();
                info!("Selected baud: {}", baud);
                Ok(ActionOutcome::Applied)
            }
            Action::ToggleSerial => {
                self.poll_serial();
                if self.channel.is_connected() {
                    self.channel.disconnect();
                    Ok(ActionOutcome::Disconnected)
                } else {
                    Ok(ActionOutcome::Connected(self.connect_selected()?))
                }
            }
            Action::TxChar(c) => {
                self.tx_draft.push(c);
                Ok(ActionOutcome::Applied)
            }
            Action::TxBackspace => {
                self.tx_draft.backspace();
                Ok(ActionOutcome::Applied)
            }
            Action::SendDraft => {
                self.channel.send(self.tx_draft.text())?;
                self.tx_draft.clear();
                Ok(ActionOutcome::Sent)
            }
            Action::NucNormal => {
                self.channel.send_command(DeviceCommand::NucNormal)?;
                Ok(ActionOutcome::Sent)
            }
            Action::NucNoShutter => {
                self.channel.send_command(DeviceCommand::NucNoShutter)?;
                Ok(ActionOutcome::Sent)
            }
        }
    }

    /// Writes the current configuration; the port is recorded only while connected.
    pub fn save_settings(&self) -> Result<()> {
        let port = self.channel.session().map(|s| s.port.as_str());
        let settings = PersistedSettings::capture(&self.config, port);
        self.store.save(&settings)?;
        Ok(())
    }

    /// Saves settings, closes the serial link and finishes any recording.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.save_settings() {
            warn!("Could not save settings: {}", e);
        }
        self.channel.disconnect();
        match self.recorder.stop() {
            Ok(Some(_)) => info!("Video writer closed on exit"),
            Ok(None) => {}
            Err(e) => warn!("Failed to close recording: {}", e),
        }
    }
}
