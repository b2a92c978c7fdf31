//! Recording of clean color frames to a video collaborator.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::export::{PngPreviewWriter, PreviewWriter, snapshot_stem};
use crate::image_pipeline::frame::ColorFrame;

/// Frame rate announced to the sink when recording starts.
pub const RECORD_FPS: f64 = 7.5;

/// Destination for recorded frames; container encoding lives behind this trait.
pub trait VideoSink: Send {
    fn open(&mut self, width: usize, height: usize, fps: f64) -> Result<()>;
    fn write_frame(&mut self, frame: &ColorFrame) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingSummary {
    pub duration: Duration,
    pub frames: u64,
}

struct ActiveRecording {
    width: usize,
    height: usize,
    started: Instant,
    frames: u64,
}

pub struct Recorder {
    sink: Box<dyn VideoSink>,
    active: Option<ActiveRecording>,
}

impl Recorder {
    pub fn new(sink: Box<dyn VideoSink>) -> Self {
        Self { sink, active: None }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn frames_written(&self) -> u64 {
        self.active.as_ref().map_or(0, |a| a.frames)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.started.elapsed())
    }

    /// Opens the sink for frames of the given size. On failure recording stays off.
    pub fn start(&mut self, width: usize, height: usize) -> Result<()> {
        if self.is_recording() {
            return Ok(());
        }
        self.sink.open(width, height, RECORD_FPS)?;
        self.active = Some(ActiveRecording {
            width,
            height,
            started: Instant::now(),
            frames: 0,
        });
        info!(width, height, fps = RECORD_FPS, "Recording started");
        Ok(())
    }

    /// Writes one frame if recording; a no-op otherwise.
    pub fn write(&mut self, frame: &ColorFrame) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        if frame.width() != active.width || frame.height() != active.height {
            return Err(PipelineError::SizeMismatch {
                expected_width: active.width,
                expected_height: active.height,
                width: frame.width(),
                height: frame.height(),
            });
        }
        self.sink.write_frame(frame)?;
        active.frames += 1;
        Ok(())
    }

    /// Closes the sink. Returns `None` when nothing was being recorded.
    pub fn stop(&mut self) -> Result<Option<RecordingSummary>> {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };
        let summary = RecordingSummary {
            duration: active.started.elapsed(),
            frames: active.frames,
        };
        self.sink.close()?;
        info!(
            frames = summary.frames,
            "Recording stopped ({:.1} s)",
            summary.duration.as_secs_f64()
        );
        Ok(Some(summary))
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        if self.is_recording() {
            if let Err(e) = self.stop() {
                warn!("Failed to close recording: {}", e);
            }
        }
    }
}

/// Writes each recorded frame as a numbered PNG inside a per-recording directory.
pub struct PngSequenceSink {
    root: PathBuf,
    current: Option<(PathBuf, u64)>,
    writer: PngPreviewWriter,
}

impl PngSequenceSink {
    pub fn new<D: AsRef<Path>>(root: D) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            current: None,
            writer: PngPreviewWriter,
        }
    }

    pub fn current_directory(&self) -> Option<&Path> {
        self.current.as_ref().map(|(dir, _)| dir.as_path())
    }
}

impl VideoSink for PngSequenceSink {
    fn open(&mut self, width: usize, height: usize, fps: f64) -> Result<()> {
        let dir = self.root.join(snapshot_stem());
        fs::create_dir_all(&dir)?;
        info!(path = %dir.display(), width, height, fps, "Opened PNG sequence");
        self.current = Some((dir, 0));
        Ok(())
    }

    fn write_frame(&mut self, frame: &ColorFrame) -> Result<()> {
        let Some((dir, index)) = self.current.as_mut() else {
            return Err(PipelineError::SinkError("sequence is not open".to_string()));
        };
        let path = dir.join(format!("frame_{:06}.png", index));
        let mut output = BufWriter::new(File::create(&path)?);
        self.writer.write_preview(frame, &mut output)?;
        output.flush()?;
        *index += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_sequence_numbers_frames() {
        let root = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::new(Box::new(PngSequenceSink::new(root.path())));
        let frame = ColorFrame::new(2, 2, vec![128; 12]).unwrap();

        recorder.start(2, 2).unwrap();
        recorder.write(&frame).unwrap();
        recorder.write(&frame).unwrap();
        let summary = recorder.stop().unwrap().unwrap();
        assert_eq!(summary.frames, 2);

        let recording_dir = fs::read_dir(root.path()).unwrap().next().unwrap().unwrap().path();
        assert!(recording_dir.join("frame_000000.png").exists());
        assert!(recording_dir.join("frame_000001.png").exists());
    }

    #[test]
    fn unopened_sequence_rejects_frames() {
        let root = tempfile::tempdir().unwrap();
        let mut sink = PngSequenceSink::new(root.path());
        let frame = ColorFrame::new(1, 1, vec![0; 3]).unwrap();
        assert!(matches!(sink.write_frame(&frame), Err(PipelineError::SinkError(_))));
    }
}
