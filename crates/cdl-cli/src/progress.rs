use cdl_dataset::DownloadEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Spinner per archive while a download runs
pub struct DownloadProgress {
    current: Option<ProgressBar>,
    enabled: bool,
}

impl DownloadProgress {
    /// Disabled progress draws nothing, for JSON output
    pub fn new(enabled: bool) -> Self {
        Self { current: None, enabled }
    }

    pub fn handle(&mut self, event: DownloadEvent) {
        if !self.enabled {
            return;
        }

        match event {
            DownloadEvent::Skipped { year } => {
                let pb = ProgressBar::new_spinner();
                finish_success(&pb, &format!("{} already downloaded and verified", year));
            }
            DownloadEvent::Fetching { year, url } => {
                self.current = Some(create_spinner(&format!("Downloading {} from {}", year, url)));
            }
            DownloadEvent::Fetched { year } => {
                if let Some(pb) = self.current.take() {
                    finish_success(&pb, &format!("Downloaded and extracted {}", year));
                }
            }
        }
    }
}

impl Drop for DownloadProgress {
    fn drop(&mut self) {
        // A failed fetch leaves its spinner running
        if let Some(pb) = self.current.take() {
            pb.abandon();
        }
    }
}
