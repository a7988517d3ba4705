use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};

const PROGRESS_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with a report printed
/// on stdout. Uses indicatif for the progress bar; messages printed while
/// the bar is visible are written above it.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.progress_bar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn create_progress_bar(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb
    }

    /// Prints a line without tearing an active progress bar
    fn print_line(&self, message: &str) {
        match self.slot().as_ref() {
            Some(pb) if !pb.is_finished() => pb.suspend(|| eprintln!("{}", message)),
            _ => eprintln!("{}", message),
        }
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.slot().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print_line(message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let mut slot = self.slot();
        let pb = slot.get_or_insert_with(|| Self::create_progress_bar(total));
        if pb.length() != Some(total as u64) {
            pb.set_length(total as u64);
        }
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.print_line(message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }
}
