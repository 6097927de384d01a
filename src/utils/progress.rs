use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed}] {msg}";

/// Startup spinner; a no-op when `--quiet` is set
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self::silent();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self {
            spinner: Some(spinner),
        }
    }

    pub fn silent() -> Self {
        Self { spinner: None }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop ticking and leave `message` on screen
    pub fn finish_with_message(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    // a load that fails part-way must not leave a spinner behind
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            if !spinner.is_finished() {
                spinner.finish_and_clear();
            }
        }
    }
}
