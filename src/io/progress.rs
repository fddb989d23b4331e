//! Batch progress display for multi-level generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Levels: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over a batch of levels
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a progress manager with no bar yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the bar for `level_count` levels
    pub fn initialize(&mut self, level_count: usize) {
        let bar = ProgressBar::new(level_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show which level is being generated
    pub fn start_level(&self, index: usize, seed: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("level {} (seed {seed})", index + 1));
        }
    }

    /// Count one level as done
    pub fn complete_level(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message("All levels generated");
        }
    }

    /// Whether a bar has been created
    pub const fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}
