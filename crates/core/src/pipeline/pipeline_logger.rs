use std::collections::HashMap;
use std::time::Instant;

use crate::overlay::domain::mode::Mode;

/// Observer for session events: progress, per-stage timings, metrics.
///
/// Keeps the session loop independent of where diagnostics end up.
pub trait PipelineLogger: Send {
    /// Report frame-level progress. `total` is 0 for open-ended sources.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. regions drawn on a frame).
    fn metric(&mut self, name: &str, value: f64);

    /// A trigger switched the active mode.
    fn mode_changed(&mut self, mode: Mode);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events. Used by tests and embedders with their own UI.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn mode_changed(&mut self, _mode: Mode) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger for the CLI: throttled progress through `log`, plus a summary
/// of stage timings, metric averages, mode switches and throughput.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
    mode_switches: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
            mode_switches: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Session summary ({frames} frames, {} mode switches, {:.1}s):",
            self.mode_switches,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let share = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:10}: avg {:6.1}ms  total {total_ms:7.0}ms  ({share:4.1}%)",
                mean(durations)
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            lines.push(format!("  {name}: avg {:.1}", mean(&self.metrics[name])));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn mode_switches(&self) -> usize {
        self.mode_switches
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen = current;
        if total > 0 {
            if current % self.throttle_frames == 0 || current == total {
                let pct = current as f64 / total as f64 * 100.0;
                log::info!("Processing: {current}/{total} frames ({pct:.1}%)");
            }
        } else if current % self.throttle_frames == 0 {
            log::info!("Processed {current} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.mode_switches += 1;
        log::info!("Mode: {mode}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("detect", 5.0);
        logger.metric("regions", 3.0);
        logger.mode_changed(Mode::FullBody);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values_per_stage() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("draw", 5.0);

        assert_eq!(logger.timings_for("detect").unwrap(), &[20.0, 30.0]);
        assert_eq!(logger.timings_for("draw").unwrap(), &[5.0]);
        assert!(logger.timings_for("grayscale").is_none());
    }

    #[test]
    fn test_metric_average() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("regions", 3.0);
        logger.metric("regions", 4.0);
        assert_relative_eq!(mean(logger.metrics_for("regions").unwrap()), 3.5);
    }

    #[test]
    fn test_summary_includes_stages_metrics_and_fps() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(100, 0);
        logger.timing("detect", 20.0);
        logger.timing("grayscale", 1.0);
        logger.metric("regions", 2.0);
        logger.mode_changed(Mode::FaceAndEyes);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Session summary (100 frames, 1 mode switches"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("grayscale"));
        assert!(summary.contains("regions: avg 2.0"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_frames_for_open_ended_source() {
        let mut logger = StdoutPipelineLogger::new(10);
        for i in 1..=25 {
            logger.progress(i, 0);
        }
        assert_eq!(logger.frames_seen, 25);
    }

    #[test]
    fn test_mode_changes_are_counted() {
        let mut logger = StdoutPipelineLogger::default();
        logger.mode_changed(Mode::FaceAndEyes);
        logger.mode_changed(Mode::FullBody);
        assert_eq!(logger.mode_switches(), 2);
    }

    #[test]
    fn test_zero_throttle_is_clamped() {
        let logger = StdoutPipelineLogger::new(0);
        assert_eq!(logger.throttle_frames, 1);
    }

    #[test]
    fn test_info_does_not_affect_summary() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.info("hello world");
        assert!(logger.summary_string().is_none());
    }
}
