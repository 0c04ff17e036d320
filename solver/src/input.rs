//! Ticket-row loading from JSON or tab-separated files.
//!
//! Only the first two columns matter: column 0 is the ticket identifier
//! (`"d,d,d,d,d"`), column 1 the category. Ticket identifiers contain commas,
//! so the text format is tab-separated rather than CSV.
//!
//! - `.json`: an array whose rows are either objects with `ticket`/`category`
//!   keys or arrays of cells.
//! - `.tsv` / `.txt`: first line is a header, blank lines are ignored, empty
//!   cells are missing values.
//!
//! Non-string JSON cells (numbers, booleans) are read as their JSON text, so a
//! numeric ticket is rejected per row by the normalizer rather than failing the
//! whole file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::tickets::RawRow;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    UnsupportedFormat(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "cannot read {}: {}", path, source),
            LoadError::Json(e) => write!(f, "malformed ticket JSON: {}", e),
            LoadError::UnsupportedFormat(ext) => write!(
                f,
                "unsupported input format '{}' (expected .json, .tsv or .txt)",
                ext
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Json(e) => Some(e),
            LoadError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRow {
    Object(RawRow),
    Cells(Vec<serde_json::Value>),
}

fn cell_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Field deserializer for [`RawRow`]: any JSON scalar becomes text, `null` is missing.
pub(crate) fn deserialize_cell<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(d)?;
    Ok(cell_text(Some(&value)))
}

impl From<JsonRow> for RawRow {
    fn from(row: JsonRow) -> Self {
        match row {
            JsonRow::Object(raw) => raw,
            JsonRow::Cells(cells) => RawRow {
                ticket: cell_text(cells.first()),
                category: cell_text(cells.get(1)),
            },
        }
    }
}

/// Parse a JSON array of rows.
pub fn parse_json(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let rows: Vec<JsonRow> = serde_json::from_str(text)?;
    Ok(rows.into_iter().map(RawRow::from).collect())
}

/// Parse tab-separated text with a header line.
pub fn parse_tsv(text: &str) -> Vec<RawRow> {
    fn cell(s: Option<&str>) -> Option<String> {
        let s = s?;
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    }

    text.lines()
        .skip(1) // header
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut cells = line.split('\t');
            RawRow {
                ticket: cell(cells.next()),
                category: cell(cells.next()),
            }
        })
        .collect()
}

/// Load rows from `path`, choosing the parser by extension.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(ext.as_str(), "json" | "tsv" | "txt") {
        return Err(LoadError::UnsupportedFormat(ext));
    }

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let rows = if ext == "json" {
        parse_json(&text)?
    } else {
        parse_tsv(&text)
    };
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded ticket rows");
    Ok(rows)
}
