use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::{Duration, Instant};

// Metrics tracking structures
pub struct ProcessingMetrics {
    start_time: Instant,
    files_processed: usize,
    errors_count: usize,
}

impl ProcessingMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_processed: 0,
            errors_count: 0,
        }
    }

    pub fn record_file(&mut self, ok: bool) {
        self.files_processed += 1;
        if !ok {
            self.errors_count += 1;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    pub fn errors_count(&self) -> usize {
        self.errors_count
    }
}

impl Default for ProcessingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// File-by-file progress bar for one merge
pub struct ProgressTracker {
    bar: ProgressBar,
    metrics: ProcessingMetrics,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(style);

        Self {
            bar,
            metrics: ProcessingMetrics::new(),
        }
    }

    /// Same bookkeeping, nothing drawn
    pub fn hidden(total_files: usize) -> Self {
        let tracker = Self::new(total_files);
        tracker.bar.set_draw_target(ProgressDrawTarget::hidden());
        tracker
    }

    pub fn file_done(&mut self, name: &str, ok: bool) {
        self.metrics.record_file(ok);
        self.bar.set_position(self.metrics.files_processed() as u64);
        self.bar.set_message(format!(
            "{} | Errors: {}",
            name,
            self.metrics.errors_count()
        ));
    }

    pub fn finish(&self) {
        self.bar.finish_with_message(format!(
            "Completed in {:.2}s | Files: {} | Errors: {}",
            self.metrics.elapsed().as_secs_f64(),
            self.metrics.files_processed(),
            self.metrics.errors_count()
        ));
    }

    pub fn get_metrics(&self) -> &ProcessingMetrics {
        &self.metrics
    }
}
