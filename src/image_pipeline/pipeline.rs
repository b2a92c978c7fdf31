use tracing::{debug, info_span, instrument};

use crate::config::ConfigState;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::BitPlaneDecoder;
use crate::image_pipeline::frame::{ColorFrame, DisplayFrame8, Intensity16Frame, RawDualFrame};
use crate::image_pipeline::histogram::{HistogramAnalyzer, HistogramReport};
use crate::image_pipeline::normalize::{DisplayWindow, NormalizationEngine};
use crate::image_pipeline::palette::PaletteMapper;
use crate::image_pipeline::readout::{DEFAULT_READOUT_RADIUS, RegionReadout};
use crate::image_pipeline::sharpen::SharpeningStage;
use crate::image_pipeline::timing::PipelineTimings;

/// Everything the display layer needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub intensity: Intensity16Frame,
    /// Normalized and sharpened luma, before false color
    pub display: DisplayFrame8,
    /// Clean color preview, no overlays
    pub color: ColorFrame,
    pub window: DisplayWindow,
    pub histogram: Option<HistogramReport>,
    pub readout: Option<RegionReadout>,
    pub timings: PipelineTimings,
}

/// Decode → normalize → sharpen → false color, plus the side analyses.
#[derive(Debug, Default, Clone)]
pub struct FramePipeline {
    decoder: BitPlaneDecoder,
    normalizer: NormalizationEngine,
    sharpener: SharpeningStage,
    mapper: PaletteMapper,
    analyzer: HistogramAnalyzer,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: BitPlaneDecoder) -> Self {
        Self {
            decoder,
            ..Self::default()
        }
    }

    pub fn decoder(&self) -> &BitPlaneDecoder {
        &self.decoder
    }

    /// Runs one captured frame through every stage using the current configuration.
    /// `cursor` is only sampled when the cursor readout is enabled.
    #[instrument(skip(self, frame, config), fields(width = frame.width(), height = frame.height()))]
    pub fn process(
        &self,
        frame: &RawDualFrame,
        config: &ConfigState,
        cursor: Option<(usize, usize)>,
    ) -> Result<FrameOutput> {
        let mut timings = PipelineTimings::new();

        let intensity = {
            let _span = info_span!("decode").entered();
            timings.measure("decode", || self.decoder.decode(frame))?
        };

        let normalized = {
            let _span = info_span!("normalize", manual = config.range.is_manual()).entered();
            timings.measure("normalize", || self.normalizer.normalize(&intensity, &config.range))
        };

        let display = {
            let _span = info_span!("sharpen", level = config.sharpen.label()).entered();
            timings.measure("sharpen", || self.sharpener.apply(&normalized.frame, config.sharpen))
        };

        let color = {
            let _span = info_span!("palette", palette = config.palette.kind().name()).entered();
            timings.measure("palette", || self.mapper.map(&display, &config.palette))
        };

        let histogram = if config.toggles.histogram {
            let _span = info_span!("histogram").entered();
            Some(timings.measure("histogram", || self.analyzer.analyze(&intensity, &config.range)))
        } else {
            None
        };

        let readout = match cursor {
            Some((x, y)) if config.toggles.cursor_readout => {
                timings.measure("readout", || RegionReadout::sample(&intensity, x, y, DEFAULT_READOUT_RADIUS))
            }
            _ => None,
        };

        debug!(
            low = normalized.window.low,
            high = normalized.window.high(),
            "Frame processed"
        );
        timings.log_summary();

        Ok(FrameOutput {
            intensity,
            display,
            color,
            window: normalized.window,
            histogram,
            readout,
            timings,
        })
    }
}
