//! Progress bar helpers for the batch driver.
//!
//! In log-only mode bars are hidden and progress is reported through the
//! logger at fixed intervals instead, which keeps `tail -f` output readable.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Format duration in human-readable format
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Create a progress bar with consistent styling. Hidden when `log_only`.
pub fn create_progress_bar(len: u64, msg: &str, log_only: bool) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if log_only {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        let style = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb
}

/// Whether a log line is due at `current`. Only in log-only mode.
pub fn should_log_progress(log_only: bool, current: u64, total: u64, interval: u64) -> bool {
    log_only && interval > 0 && (current % interval == 0 || current == total)
}

/// Log progress periodically for tail-friendly output.
pub fn log_progress(phase: &str, current: u64, total: u64, interval: u64, log_only: bool) {
    if should_log_progress(log_only, current, total, interval) {
        let pct = if total == 0 {
            100.0
        } else {
            100.0 * current as f64 / total as f64
        };
        log::info!("[{}] {}/{} ({:.1}%)", phase, current, total, pct);
    }
}

/// Create a spinner for indeterminate progress. Hidden when `log_only`.
pub fn create_spinner(msg: &str, log_only: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if log_only {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg} {spinner} [{elapsed_precise}]") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
    }
    pb.set_message(msg.to_string());
    pb
}
