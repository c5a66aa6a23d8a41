use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Refresh the bar every this many generated rows
const UPDATE_EVERY: usize = 250;

pub struct ProgressReporter {
    generation_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            generation_progress: None,
            enabled,
        }
    }

    pub fn start_generation(&mut self, total_rows: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_rows as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} transactions generated ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Generating transactions");
        self.generation_progress = Some(pb);
    }

    pub fn update_generation(&self, current: usize) {
        if let Some(ref pb) = self.generation_progress
            && (current % UPDATE_EVERY == 0 || current as u64 == pb.length().unwrap_or(0))
        {
            pb.set_position(current as u64);
        }
    }

    pub fn finish_generation(&self) {
        if let Some(ref pb) = self.generation_progress {
            pb.finish_and_clear();
        }
    }

    /// Create a simple spinner for indeterminate progress
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}
