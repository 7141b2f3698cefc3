//! Terminal rendering of the controller's state slots.
//!
//! The renderer only reads: it subscribes to the processing, insights, and
//! notification slots and prints whatever changed.

use std::io::{self, Write};
use std::time::Duration;

use hardsub_engine::HardsubController;
use hardsub_model::{Notification, ProcessingState, SelectionStore, SlotKind};
use tokio::sync::watch;

const BAR_WIDTH: usize = 30;

/// How long to wait after completion for the closing notification.
const NOTIFICATION_GRACE: Duration = Duration::from_millis(500);

pub struct TerminalRenderer<W: Write = io::Stdout> {
    processing: watch::Receiver<ProcessingState>,
    insights: watch::Receiver<String>,
    notification: watch::Receiver<Option<Notification>>,
    printed_lines: usize,
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new(controller: &HardsubController) -> Self {
        Self::with_writer(controller, io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(controller: &HardsubController, out: W) -> Self {
        Self {
            processing: controller.processing(),
            insights: controller.insights(),
            notification: controller.notification(),
            printed_lines: 0,
            out,
        }
    }

    /// Print log lines and progress until the current run finishes.
    ///
    /// Completion and the closing notification are published back to back,
    /// so either branch may observe the end of the run first; both slots
    /// are drained once more after the loop.
    pub async fn follow_run(&mut self) {
        self.render_processing();
        let mut notified = false;
        while !self.run_finished() {
            tokio::select! {
                changed = self.processing.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.render_processing();
                }
                changed = self.notification.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    notified |= self.print_current_notification();
                }
            }
        }

        if self.printed_lines < self.processing.borrow().log.len() {
            self.render_processing();
        }
        let pending = self.notification.has_changed().unwrap_or(false)
            || (!notified
                && matches!(
                    tokio::time::timeout(NOTIFICATION_GRACE, self.notification.changed()).await,
                    Ok(Ok(()))
                ));
        if pending {
            self.print_current_notification();
        }
    }

    /// Print the insights panel, waiting up to `wait` for the fetch.
    pub async fn show_insights(&mut self, wait: Duration) {
        if self.insights.borrow().is_empty() {
            match tokio::time::timeout(wait, self.insights.changed()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) | Err(_) => {
                    tracing::debug!("No insights arrived in time");
                    return;
                }
            }
        }
        let text = self.insights.borrow_and_update().clone();
        if text.is_empty() {
            return;
        }
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "AI Processing Insights");
        let _ = writeln!(self.out, "{}", "-".repeat(50));
        let _ = writeln!(self.out, "{text}");
    }

    /// Print the current notification if it has not been printed yet.
    pub fn render_notification(&mut self) {
        if self.notification.has_changed().unwrap_or(false) {
            self.print_current_notification();
        }
    }

    /// Lines of the current run printed so far.
    #[cfg(test)]
    pub fn printed_lines(&self) -> usize {
        self.printed_lines
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.out
    }

    fn print_current_notification(&mut self) -> bool {
        let current = self.notification.borrow_and_update().clone();
        match current {
            Some(notification) => {
                let _ = writeln!(self.out, "{notification}");
                true
            }
            None => false,
        }
    }

    fn run_finished(&self) -> bool {
        let state = self.processing.borrow();
        !state.is_processing && state.progress >= 100.0
    }

    fn render_processing(&mut self) {
        let state = self.processing.borrow_and_update().clone();
        if state.log.len() < self.printed_lines {
            self.printed_lines = 0;
        }

        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        for line in &state.log[self.printed_lines..] {
            let _ = writeln!(self.out, "{}", format_log_line(&now, line));
        }
        self.printed_lines = state.log.len();

        let _ = writeln!(
            self.out,
            "  {} {:>3}%",
            progress_bar(state.display_percent(), BAR_WIDTH),
            state.display_percent()
        );
    }
}

/// Print the current selections the way the picker labels show them.
pub fn print_selection(selection: &SelectionStore) {
    println!("Hardsub Studio");
    println!("{}", "=".repeat(50));
    for kind in SlotKind::ALL {
        let label = match kind {
            SlotKind::Video => "Video",
            SlotKind::Subtitles => "Subtitles",
            SlotKind::Thumbnail => "Thumbnail",
        };
        println!("  {label:<10} {}", selection.slot(kind).display_name);
    }
    println!("  {:<10} {}", "Position", selection.position);
    println!();
}

/// One timestamped log line.
pub fn format_log_line(time: &str, line: &str) -> String {
    format!("[{time}] {line}")
}

/// Fixed-width text progress bar.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hardsub_common::pacing::FixedPacer;
    use hardsub_insights::StaticInsights;
    use hardsub_model::processing::COMPLETION_LOG_LINE;
    use hardsub_model::FileHandle;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 10), "[..........]");
        assert_eq!(progress_bar(50, 10), "[#####.....]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(255, 4), "[####]");
    }

    #[test]
    fn test_format_log_line() {
        assert_eq!(
            format_log_line("12:00:01", "Muxing MP4 container..."),
            "[12:00:01] Muxing MP4 container..."
        );
    }

    #[tokio::test]
    async fn test_follow_run_always_renders_completion_and_notification() {
        for _ in 0..100 {
            let controller = HardsubController::new(
                Arc::new(StaticInsights::new("ok")),
                Arc::new(FixedPacer::new(
                    Duration::from_millis(1),
                    Duration::from_millis(1),
                )),
                Duration::from_millis(4000),
            );
            controller.select_file(SlotKind::Video, Some(FileHandle::from_path("ep.mkv")));
            controller.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("ep.ass")));

            let mut renderer = TerminalRenderer::with_writer(&controller, Vec::new());
            controller.start_hardsubbing();
            renderer.follow_run().await;
            controller.wait_idle().await;

            assert_eq!(renderer.printed_lines(), 7 + 2);
            let output = String::from_utf8(renderer.into_writer()).unwrap();
            assert!(output.contains(COMPLETION_LOG_LINE));
            assert!(output.contains("100%"));
            assert_eq!(
                output
                    .matches("[OK] Saved to Downloads: ep_hardsub.mp4")
                    .count(),
                1
            );
        }
    }
}
