//! Stage progress bar.

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::Stage;

const TEMPLATE: &str = "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Progress over the stages of one run.
///
/// Draws on stderr; indicatif hides it when stderr is not a terminal.
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    pub fn new(stages: usize) -> Self {
        let bar = ProgressBar::new(stages as u64);
        let style = ProgressStyle::with_template(TEMPLATE)
            .map(|style| style.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }

    /// A progress that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub(crate) fn start(&self, stage: Stage) {
        self.bar.set_message(stage.to_string());
    }

    pub(crate) fn complete(&self) {
        self.bar.inc(1);
    }

    pub(crate) fn fail(&self, stage: Stage) {
        self.bar.abandon_with_message(format!("{stage} failed"));
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
