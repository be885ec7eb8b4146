//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod inspect;
pub mod upload;

use crate::progress::{self, ProgressReporter};

/// Progress reporter for a command, with a terminal bar unless disabled
pub(crate) fn reporter(stages: usize, show_bar: bool) -> ProgressReporter {
    let reporter = ProgressReporter::new(stages);
    if show_bar {
        reporter.with_bar(progress::create_progress_bar(100, "Parsing"))
    } else {
        reporter
    }
}
