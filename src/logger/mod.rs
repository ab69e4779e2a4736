use colored::*;
use log::{error, info, warn};

/// Print a success message with a green checkmark
pub fn success(msg: &str) {
    info!("{} {}", "✓".green(), msg);
}

/// Print an info message with a blue info symbol
pub fn info(msg: &str) {
    info!("{} {}", "ℹ".blue(), msg);
}

/// Print a skip notice with a yellow symbol; skips are not failures
pub fn skipped(msg: &str) {
    warn!("{} {}", "⏭".yellow(), msg);
}

/// Print an error message with a red X
pub fn error(msg: &str) {
    error!("{} {}", "✗".red(), msg);
}

/// Print a progress message with a blue arrow
pub fn progress(msg: &str) {
    info!("{} {}", "→".blue(), msg);
}
