//! Wall-clock timing of pipeline stages

use std::time::{Duration, Instant};

use ::metrics::Label;

/// Times one stage and reports the elapsed seconds to a histogram exactly once.
///
/// Call [`StageTimer::stop`] to report and get the duration back; a timer that
/// is dropped without being stopped reports on drop.
///
/// ```rust
/// use record_pipeline::metrics::StageTimer;
///
/// let timer = StageTimer::start("rp_pipeline_batch_duration_seconds").label("mode", "sequential");
/// // ... do work ...
/// let elapsed = timer.stop();
/// assert!(elapsed.as_secs() < 60);
/// ```
pub struct StageTimer {
    started: Instant,
    histogram: &'static str,
    labels: Vec<Label>,
    reported: bool,
}

impl StageTimer {
    pub fn start(histogram: &'static str) -> Self {
        Self {
            started: Instant::now(),
            histogram,
            labels: Vec::new(),
            reported: false,
        }
    }

    pub fn label(mut self, key: &'static str, value: &'static str) -> Self {
        self.labels.push(Label::from_static_parts(key, value));
        self
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Report the elapsed time now and return it
    pub fn stop(mut self) -> Duration {
        self.report()
    }

    fn report(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        if !self.reported {
            self.reported = true;
            ::metrics::histogram!(self.histogram, self.labels.clone())
                .record(elapsed.as_secs_f64());
        }
        elapsed
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        self.report();
    }
}
