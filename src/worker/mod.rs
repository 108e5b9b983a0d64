//! The worker coordinator: a fixed pool of self-play threads, the pause
//! barrier used to checkpoint safely, and the status/checkpoint/quit
//! cadence that drives a training run end to end.

pub mod duration;

mod coordinator;

pub use coordinator::{Coordinator, ITERATION_BLOCK_SIZE};

use colored::Colorize;

/// One human-readable status line, colored the way
/// `krukah-robopoker`'s CLI output uses the `colored` crate for terminal
/// status text.
pub fn status_line(iterations: u64, elapsed_seconds: u64) -> String {
    format!(
        "{} {} iterations {} {}",
        "training".cyan(),
        iterations.to_string().bold(),
        "elapsed".cyan(),
        duration::format_duration(elapsed_seconds)
    )
}
