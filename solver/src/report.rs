//! Presentation helpers: output records, data preview and the result table.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tickets::{NormalizedTickets, RawRow, SkippedRow};
use crate::types::ScoredResult;

/// One ranked result as handed to presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Comma-joined digits, e.g. `"0,0,0,0,1"`.
    pub combination: String,
    pub total_payout: u64,
    pub straight_subtotal: u64,
    pub rumble_subtotal: u64,
    pub chance_subtotal: u64,
}

impl From<&ScoredResult> for ResultRecord {
    fn from(r: &ScoredResult) -> Self {
        Self {
            combination: r.combination.to_string(),
            total_payout: r.total_payout,
            straight_subtotal: r.straight_subtotal,
            rumble_subtotal: r.rumble_subtotal,
            chance_subtotal: r.chance_subtotal,
        }
    }
}

pub fn to_records(results: &[ScoredResult]) -> Vec<ResultRecord> {
    results.iter().map(ResultRecord::from).collect()
}

/// Normalized view of one input row for the data preview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub ticket: String,
    pub category: String,
}

/// Head of the input plus counts.
#[derive(Clone, Debug, Serialize)]
pub struct DataPreview {
    pub total_tickets: usize,
    pub dropped_missing: usize,
    pub unrecognized: usize,
    pub skipped: Vec<SkippedRow>,
    pub rows: Vec<PreviewRow>,
}

/// First `n` rows that survive the missing-value filter, with the category
/// shown normalized, plus the ticket-set counts.
pub fn preview(rows: &[RawRow], normalized: &NormalizedTickets, n: usize) -> DataPreview {
    let head = rows
        .iter()
        .filter(|r| !r.is_missing_value())
        .take(n)
        .map(|r| PreviewRow {
            ticket: r.ticket.as_deref().unwrap_or_default().trim().to_string(),
            category: r
                .category
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
        })
        .collect();

    DataPreview {
        total_tickets: normalized.tickets.len(),
        dropped_missing: normalized.dropped_missing,
        unrecognized: normalized.unrecognized_count(),
        skipped: normalized.skipped.clone(),
        rows: head,
    }
}

const TABLE_HEADERS: [&str; 5] = [
    "Best Combination",
    "Total Payout",
    "Straight Payout",
    "Rumble Payout",
    "Chance Payout",
];

/// Fixed-width text table, one line per record, ranked.
pub fn render_table(records: &[ResultRecord]) -> String {
    let cells: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.combination.clone(),
                r.total_payout.to_string(),
                r.straight_subtotal.to_string(),
                r.rumble_subtotal.to_string(),
                r.chance_subtotal.to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.len());
        }
    }

    let mut out = String::new();
    let _ = write!(out, "{:>4}", "#");
    for (h, w) in TABLE_HEADERS.iter().zip(widths) {
        let _ = write!(out, " | {:>w$}", h, w = w);
    }
    out.push('\n');
    let rule_len = out.len() - 1;
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for (rank, row) in cells.iter().enumerate() {
        let _ = write!(out, "{:>4}", rank + 1);
        for (c, w) in row.iter().zip(widths) {
            let _ = write!(out, " | {:>w$}", c, w = w);
        }
        out.push('\n');
    }
    out
}

/// Write records as pretty-printed JSON.
pub fn write_json(path: &Path, records: &[ResultRecord]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)
}
