//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "OXILZW_LOG";

/// Install the stderr log subscriber.
///
/// The filter comes from `OXILZW_LOG`; without it, `warn` (or `debug`
/// when `verbose` is set) applies.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create a progress bar with standard styling.
///
/// Hidden when disabled or when stderr is not a terminal.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Bytes to megabytes, rounded to 3 decimals.
pub fn megabytes(bytes: u64) -> f64 {
    round3(bytes as f64 / (1024.0 * 1024.0))
}

/// Space saved, in percent of the original size, rounded to 3 decimals.
pub fn compression_percent(original: u64, encoded: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    round3((original as f64 - encoded as f64) / original as f64 * 100.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Human-readable dictionary cap.
pub fn cap_label(max_dict_size: Option<usize>) -> String {
    match max_dict_size {
        Some(max) => max.to_string(),
        None => "INFINITY".to_string(),
    }
}
