use chrono::{DateTime, Local, Utc};

use services::ScoreRecord;

/// One row of the records table, formatted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRowVm {
    pub played_at: String,
    pub start_page: String,
    pub goal_page: String,
    pub click_count: u32,
}

#[must_use]
pub fn map_score_rows(records: &[ScoreRecord]) -> Vec<ScoreRowVm> {
    records
        .iter()
        .map(|record| ScoreRowVm {
            played_at: format_timestamp(record.created_at),
            start_page: record.start_page.clone(),
            goal_page: record.goal_page.clone(),
            click_count: record.click_count,
        })
        .collect()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
