use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::detection::domain::detector_kind::DetectorKind;
use crate::overlay::domain::mode::Mode;
use crate::video::domain::frame_sink::FrameSink;
use crate::video::domain::frame_source::FrameSource;

use super::frame_processor::FrameProcessor;
use super::pipeline_logger::PipelineLogger;
use super::trigger::Trigger;

/// Progress callback: `(frames_done, total_frames)`; returning `false`
/// stops the session after the current frame.
pub type ProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

/// Runtime knobs for a [`DetectionSession`].
pub struct SessionConfig {
    /// Advance the mode automatically every N frames.
    pub cycle_every: Option<usize>,
    pub cancelled: Arc<AtomicBool>,
    pub on_progress: Option<ProgressFn>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cycle_every: None,
            cancelled: Arc::new(AtomicBool::new(false)),
            on_progress: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub frames_processed: usize,
    pub regions_drawn: usize,
    /// Frames processed under each mode, indexed by `Mode::index()`.
    pub frames_per_mode: [usize; Mode::COUNT],
    pub mode_changes: usize,
    pub resolution_changes: usize,
    pub final_mode: Mode,
    pub cancelled: bool,
}

/// Drives one source from start to stop through the frame processor.
///
/// Triggers are applied only between frames, so every frame is processed
/// under a single mode. Cancellation is also checked between frames; a
/// frame in flight always completes and reaches the sink.
pub struct DetectionSession {
    source: Box<dyn FrameSource>,
    sink: Box<dyn FrameSink>,
    processor: FrameProcessor,
    triggers: Receiver<Trigger>,
    config: SessionConfig,
}

impl DetectionSession {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn FrameSink>,
        processor: FrameProcessor,
        triggers: Receiver<Trigger>,
    ) -> Self {
        Self {
            source,
            sink,
            processor,
            triggers,
            config: SessionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn processor(&self) -> &FrameProcessor {
        &self.processor
    }

    pub fn execute(
        &mut self,
        logger: &mut dyn PipelineLogger,
    ) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let bank = self.processor.bank();
        let available: Vec<String> = DetectorKind::ALL
            .iter()
            .filter(|k| bank.is_available(**k))
            .map(|k| k.to_string())
            .collect();
        logger.info(&format!(
            "Detectors available: {} of {} [{}]",
            available.len(),
            DetectorKind::ALL.len(),
            available.join(", ")
        ));

        let metadata = self.source.start()?;
        logger.info(&format!(
            "Source started: {}x{} @ {:.1} fps",
            metadata.width, metadata.height, metadata.fps
        ));
        self.processor
            .on_resolution_change(metadata.width, metadata.height);

        let mut summary = SessionSummary {
            resolution_changes: 1,
            ..SessionSummary::default()
        };
        let result = self.run_frames(metadata.total_frames, &mut summary, logger);

        self.source.stop();
        self.processor.on_stopped();
        summary.final_mode = self.processor.selector().current();
        logger.summary();

        result.map(|()| summary)
    }

    fn run_frames(
        &mut self,
        total: usize,
        summary: &mut SessionSummary,
        logger: &mut dyn PipelineLogger,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Self {
            source,
            sink,
            processor,
            triggers,
            config,
        } = self;
        let selector = Arc::clone(processor.selector());
        let mut resolution = processor.resolution();

        for frame in source.frames() {
            if config.cancelled.load(Ordering::Relaxed) {
                summary.cancelled = true;
                break;
            }

            let mut stop_requested = false;
            for trigger in triggers.try_iter() {
                match trigger {
                    Trigger::Advance => {
                        logger.mode_changed(selector.advance());
                        summary.mode_changes += 1;
                    }
                    Trigger::Stop => {
                        stop_requested = true;
                        break;
                    }
                }
            }
            if stop_requested {
                logger.info("Stop requested");
                summary.cancelled = true;
                break;
            }
            if let Some(every) = config.cycle_every.filter(|n| *n > 0) {
                if summary.frames_processed > 0 && summary.frames_processed % every == 0 {
                    logger.mode_changed(selector.advance());
                    summary.mode_changes += 1;
                }
            }

            let mut frame = frame?;
            let size = (frame.width(), frame.height());
            if resolution != Some(size) {
                processor.on_resolution_change(size.0, size.1);
                resolution = Some(size);
                summary.resolution_changes += 1;
            }

            let report = processor.process_frame(&mut frame)?;
            logger.timing("grayscale", report.grayscale_ms);
            logger.timing("detect", report.detect_ms);
            logger.timing("draw", report.draw_ms);
            logger.metric("regions", report.region_count() as f64);
            logger.metric("mode", report.mode.index() as f64);

            sink.write(&frame)?;

            summary.frames_processed += 1;
            summary.regions_drawn += report.region_count();
            summary.frames_per_mode[report.mode.index()] += 1;

            logger.progress(summary.frames_processed, total);
            if let Some(on_progress) = &config.on_progress {
                if !on_progress(summary.frames_processed, total) {
                    summary.cancelled = true;
                    break;
                }
            }
        }

        Ok(())
    }
}
