use crate::panel::HighlightColor;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(50);

/// Spinner on stderr while the avatar and profile are fetched. Cleared on
/// finish or drop, so it never mixes with the panel or an error line.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Starts a spinner, drawn only when stderr is a terminal.
    pub fn start(color: HighlightColor) -> Self {
        Self::new(color, std::io::stderr().is_terminal())
    }

    pub fn new(color: HighlightColor, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template(&template(color))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        if visible {
            bar.enable_steady_tick(TICK);
        }
        Self { bar }
    }

    pub fn set_message(&self, msg: &'static str) {
        self.bar.set_message(msg);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

fn template(color: HighlightColor) -> String {
    format!("{{spinner:.{}}} {{msg}}", color.name())
}
