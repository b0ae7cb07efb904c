use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::detector_bank::DetectorBank;
use crate::detection::domain::detector_kind::DetectorKind;
use crate::overlay::domain::grayscale_buffer::{GrayscaleBuffer, SizeMismatch};
use crate::overlay::domain::mode::{Mode, OverlayColor};
use crate::overlay::domain::mode_selector::ModeSelector;
use crate::overlay::domain::region_painter::RegionPainter;
use crate::shared::constants::MIN_OBJECT_RATIO;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("no resolution set; call on_resolution_change before processing frames")]
    NotStarted,
    #[error(transparent)]
    ResolutionMismatch(#[from] SizeMismatch),
}

/// Detections drawn for one layer of the active mode.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerReport {
    pub detector: DetectorKind,
    pub color: OverlayColor,
    pub regions: Vec<Region>,
}

/// What happened to one frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    pub mode: Mode,
    pub layers: Vec<LayerReport>,
    pub grayscale_ms: f64,
    pub detect_ms: f64,
    pub draw_ms: f64,
}

impl FrameReport {
    pub fn region_count(&self) -> usize {
        self.layers.iter().map(|l| l.regions.len()).sum()
    }
}

/// Smallest object side for a given frame height, in pixels.
pub fn min_object_size_for(height: u32) -> u32 {
    (height as f64 * MIN_OBJECT_RATIO).round() as u32
}

/// Per-frame overlay pipeline: grayscale, run the active mode's detectors,
/// outline every detection on the original frame.
///
/// The frame is only borrowed for the call and keeps its size and layout;
/// only rectangle pixels change.
pub struct FrameProcessor {
    bank: DetectorBank,
    selector: Arc<ModeSelector>,
    painter: Box<dyn RegionPainter>,
    buffer: Option<GrayscaleBuffer>,
    min_object_size: u32,
    parallel: bool,
}

impl FrameProcessor {
    pub fn new(
        bank: DetectorBank,
        selector: Arc<ModeSelector>,
        painter: Box<dyn RegionPainter>,
    ) -> Self {
        Self {
            bank,
            selector,
            painter,
            buffer: None,
            min_object_size: 0,
            parallel: false,
        }
    }

    /// Runs the detectors of multi-detector modes concurrently.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn selector(&self) -> &Arc<ModeSelector> {
        &self.selector
    }

    pub fn bank(&self) -> &DetectorBank {
        &self.bank
    }

    pub fn min_object_size(&self) -> u32 {
        self.min_object_size
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(|b| b.dimensions())
    }

    /// (Re)allocates the grayscale buffer and the minimum object size for a
    /// new source resolution.
    pub fn on_resolution_change(&mut self, width: u32, height: u32) {
        self.buffer = Some(GrayscaleBuffer::allocate(width, height));
        self.min_object_size = min_object_size_for(height);
        log::debug!(
            "Resolution {width}x{height}, minimum object size {}px",
            self.min_object_size
        );
    }

    /// Releases the grayscale buffer when the source stops.
    pub fn on_stopped(&mut self) {
        self.buffer = None;
        self.min_object_size = 0;
    }

    pub fn process_frame(&mut self, frame: &mut Frame) -> Result<FrameReport, ProcessError> {
        let buffer = self.buffer.as_mut().ok_or(ProcessError::NotStarted)?;

        let start = Instant::now();
        buffer.fill_from(frame)?;
        let grayscale_ms = elapsed_ms(start);

        let mode = self.selector.current();
        let layers = mode.layers();
        let kinds = mode.detectors();

        let start = Instant::now();
        let found = self
            .bank
            .detect_many(&kinds, buffer.image(), self.min_object_size, self.parallel);
        let detect_ms = elapsed_ms(start);

        let start = Instant::now();
        let mut reports = Vec::with_capacity(layers.len());
        for (layer, (_, regions)) in layers.iter().zip(found) {
            if let Err(e) = self.painter.paint(frame, &regions, layer.color) {
                log::warn!("Failed to draw {} regions: {e}", layer.detector);
            }
            reports.push(LayerReport {
                detector: layer.detector,
                color: layer.color,
                regions,
            });
        }
        let draw_ms = elapsed_ms(start);

        Ok(FrameReport {
            mode,
            layers: reports,
            grayscale_ms,
            detect_ms,
            draw_ms,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
