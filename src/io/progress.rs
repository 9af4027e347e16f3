//! Stage-by-stage progress display for a run

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>10} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per pipeline stage (loading, analysing, exporting)
///
/// When disabled every call is a no-op, so callers never branch on quiet mode.
pub struct ProgressManager {
    enabled: bool,
    current: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a manager; `enabled = false` suppresses all output
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    /// True when bars are drawn
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Finish any running stage and start a new one with `len` steps
    pub fn start_stage(&mut self, label: &'static str, len: usize) {
        self.finish_stage();
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(len as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label);
        self.current = Some(bar);
    }

    /// Advance the running stage by one step, showing `message`
    pub fn advance(&self, message: impl Into<String>) {
        if let Some(ref bar) = self.current {
            bar.set_message(message.into());
            bar.inc(1);
        }
    }

    /// Position of the running stage, or `None` when no stage is shown
    pub fn position(&self) -> Option<u64> {
        self.current.as_ref().map(ProgressBar::position)
    }

    /// Complete the running stage, leaving its final state on screen
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish();
        }
    }
}

impl Drop for ProgressManager {
    fn drop(&mut self) {
        self.finish_stage();
    }
}
