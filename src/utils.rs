use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{SectionTableRow, StatsRecord};

/// Steady-ticking spinner for a single network call.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Comma-joins at most `max` leading IDs. Shorter inputs use every ID they have.
pub fn seed_ids(ids: &[String], max: usize) -> String {
    ids.iter()
        .take(max)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Prefixes each value with its 1-based position: `"1. first"`, `"2. second"`, ...
pub fn numbered<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{}. {}", i + 1, value.as_ref()))
        .collect()
}

/// One summary row per record section, in page order.
pub fn section_rows(record: &StatsRecord) -> Vec<SectionTableRow> {
    record
        .sections()
        .into_iter()
        .map(|(title, values)| SectionTableRow {
            section: title.to_string(),
            items: values.len(),
            first: values.first().cloned().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
