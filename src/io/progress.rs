//! Progress display for validating many rule files at once

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch validation
///
/// Small batches get one status line per file; batches larger than
/// [`MAX_INDIVIDUAL_PROGRESS_BARS`] get a single bar instead.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    invalid_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a progress manager that draws nothing, for tests and pipes
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            invalid_count: 0,
        }
    }

    /// Prepare bars for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
            return;
        }

        for _ in 0..file_count {
            let bar = ProgressBar::new(1);
            bar.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Show that `path` is being validated
    pub fn start_file(&self, index: usize, path: &Path) {
        let name = display_name(path);
        if let Some(bar) = self.file_bars.get(index) {
            bar.set_prefix("…");
            bar.set_message(name);
        } else if let Some(batch_bar) = &self.batch_bar {
            batch_bar.set_message(name);
        }
    }

    /// Record the outcome for the file at `index`
    pub fn complete_file(&mut self, index: usize, path: &Path, valid: bool) {
        if !valid {
            self.invalid_count += 1;
        }

        if let Some(bar) = self.file_bars.get(index) {
            bar.set_prefix(if valid { "✓" } else { "✗" });
            bar.finish_with_message(display_name(path));
        } else if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Number of files reported invalid so far
    pub const fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    /// Number of files the manager was initialized for
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Close the display
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message(format!("{} invalid", self.invalid_count));
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
