//! Run progress for uploads
//!
//! A run reports a single value in `[0, 100]`: parsing fills the first
//! [`PARSE_WEIGHT`] points by bytes read, and each dispatch stage fills an
//! equal share of the rest by chunks sent.

use indicatif::{ProgressBar, ProgressStyle};
use p6_ingest::ParseProgress;

/// Points of the run scale reserved for parsing
pub const PARSE_WEIGHT: f64 = 20.0;

const FULL: f64 = 100.0;

/// Aggregates parse and dispatch progress into one scalar
#[derive(Debug)]
pub struct ProgressReporter {
    value: f64,
    stage_share: f64,
    stage_start: f64,
    stage_chunks: usize,
    stage_sent: usize,
    frozen: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Reporter for a run with `stages` dispatch stages
    pub fn new(stages: usize) -> Self {
        let stage_share = if stages == 0 {
            0.0
        } else {
            (FULL - PARSE_WEIGHT) / stages as f64
        };
        Self {
            value: 0.0,
            stage_share,
            stage_start: PARSE_WEIGHT,
            stage_chunks: 0,
            stage_sent: 0,
            frozen: false,
            bar: None,
        }
    }

    /// Mirror updates onto a terminal bar of length 100
    pub fn with_bar(mut self, bar: ProgressBar) -> Self {
        bar.set_length(FULL as u64);
        self.bar = Some(bar);
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whole-percent value
    pub fn percent(&self) -> u8 {
        self.value.floor().clamp(0.0, FULL) as u8
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn parse_progress(&mut self, progress: ParseProgress) {
        let value = PARSE_WEIGHT * progress.fraction();
        if value > self.value {
            self.set(value, None);
        }
    }

    pub fn parse_complete(&mut self) {
        self.set(PARSE_WEIGHT, Some("Parsed"));
        self.stage_start = PARSE_WEIGHT;
    }

    /// Start the next dispatch stage; a stage with no chunks is complete at once
    pub fn begin_stage(&mut self, label: &str, total_chunks: usize) {
        if self.frozen {
            return;
        }
        self.stage_chunks = total_chunks;
        self.stage_sent = 0;
        if total_chunks == 0 {
            let end = self.stage_start + self.stage_share;
            self.set(end, Some(label));
            self.stage_start = end;
        } else {
            self.set(self.stage_start, Some(label));
        }
    }

    pub fn chunk_sent(&mut self) {
        if self.frozen || self.stage_chunks == 0 {
            return;
        }
        self.stage_sent = (self.stage_sent + 1).min(self.stage_chunks);
        let value =
            self.stage_start + self.stage_share * self.stage_sent as f64 / self.stage_chunks as f64;
        self.set(value, None);
        if self.stage_sent == self.stage_chunks {
            self.stage_start += self.stage_share;
            self.stage_chunks = 0;
        }
    }

    /// Successful end of the run
    pub fn complete(&mut self) {
        if self.frozen {
            return;
        }
        self.value = FULL;
        if let Some(bar) = &self.bar {
            bar.set_position(FULL as u64);
            bar.finish_with_message("Done");
        }
        self.frozen = true;
    }

    /// Stop at the current value
    pub fn abort(&mut self) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        if let Some(bar) = &self.bar {
            bar.abandon_with_message("Failed");
        }
    }

    fn set(&mut self, value: f64, message: Option<&str>) {
        if self.frozen {
            return;
        }
        // Only a completed run may reach the top of the scale.
        self.value = value.min(FULL - f64::EPSILON * FULL);
        if let Some(bar) = &self.bar {
            bar.set_position(self.percent() as u64);
            if let Some(message) = message {
                bar.set_message(message.to_string());
            }
        }
    }
}

/// Create a simple progress bar with custom message
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Format bytes into human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}
