use crate::catalog::Progress;
use core::fmt::{Debug, Formatter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Refresh rate for progress updates.
const REFRESH_HZ: u8 = 10;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";

/// A terminal progress bar for the collection phases.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visible: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// A hidden reporter accepts every update but never draws. Used while logging to stderr.
    #[must_use]
    pub fn new(visible: bool, use_colors: bool) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_draw_target(if visible {
            ProgressDrawTarget::stderr_with_hz(REFRESH_HZ)
        } else {
            ProgressDrawTarget::hidden()
        });

        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );

        Self { bar, visible }
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        self.bar.set_position(0);
        self.bar.set_message("");
    }

    fn set_length(&self, length: u64) {
        self.bar.set_length(length);
    }

    fn set_position(&self, position: u64, message: &str) {
        self.bar.set_position(position);
        self.bar.set_message(message.to_string());
    }

    fn done(&self) {
        if self.visible {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("visible", &self.visible)
            .finish()
    }
}
