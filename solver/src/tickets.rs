//! Ticket normalization: raw two-column rows → validated [`Ticket`]s.
//!
//! Rows missing either column are dropped. Category text is trimmed and
//! lowercased; unrecognized categories are kept as inert tickets. A ticket
//! identifier that is not exactly five comma-separated digits is rejected
//! with a [`FormatError`] and reported, without aborting the run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::NUM_DIGITS;
use crate::types::{Category, Ticket};

/// One input row as supplied by a loader: column 0 and column 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "crate::input::deserialize_cell")]
    pub ticket: Option<String>,
    #[serde(default, deserialize_with = "crate::input::deserialize_cell")]
    pub category: Option<String>,
}

impl RawRow {
    pub fn new(ticket: &str, category: &str) -> Self {
        Self {
            ticket: Some(ticket.to_string()),
            category: Some(category.to_string()),
        }
    }

    /// True if either column is absent or empty. Whitespace-only cells
    /// count as values.
    pub fn is_missing_value(&self) -> bool {
        fn empty(v: &Option<String>) -> bool {
            v.as_deref().map_or(true, str::is_empty)
        }
        empty(&self.ticket) || empty(&self.category)
    }
}

/// Why a ticket identifier failed to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The identifier did not split into exactly five tokens.
    WrongDigitCount { found: usize },
    /// A token was not an integer.
    InvalidToken { token: String },
    /// A token was an integer outside 0-9.
    DigitOutOfRange { value: i64 },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::WrongDigitCount { found } => write!(
                f,
                "expected {} comma-separated digits, found {}",
                NUM_DIGITS, found
            ),
            FormatError::InvalidToken { token } => write!(f, "'{}' is not an integer", token),
            FormatError::DigitOutOfRange { value } => {
                write!(f, "digit {} is outside 0-9", value)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// A row rejected during normalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position in the input.
    pub row: usize,
    pub ticket: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: FormatError,
}

fn serialize_display<S: serde::Serializer>(err: &FormatError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

/// Output of [`normalize_rows`].
#[derive(Clone, Debug, Default)]
pub struct NormalizedTickets {
    /// Valid tickets in input order.
    pub tickets: Vec<Ticket>,
    /// Rows rejected with a format error.
    pub skipped: Vec<SkippedRow>,
    /// Rows dropped for a missing ticket or category.
    pub dropped_missing: usize,
}

impl NormalizedTickets {
    /// Tickets whose category will never pay.
    pub fn unrecognized_count(&self) -> usize {
        self.tickets
            .iter()
            .filter(|t| !t.category().is_recognized())
            .count()
    }
}

/// Parse `"d,d,d,d,d"` into five digits.
pub fn parse_ticket_digits(raw: &str) -> Result<[u8; NUM_DIGITS], FormatError> {
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    if tokens.len() != NUM_DIGITS {
        return Err(FormatError::WrongDigitCount {
            found: tokens.len(),
        });
    }

    let mut digits = [0u8; NUM_DIGITS];
    for (slot, token) in digits.iter_mut().zip(tokens) {
        let value: i64 = token.parse().map_err(|_| FormatError::InvalidToken {
            token: token.to_string(),
        })?;
        if !(0..=9).contains(&value) {
            return Err(FormatError::DigitOutOfRange { value });
        }
        *slot = value as u8;
    }
    Ok(digits)
}

/// Normalize raw rows into a ticket set, collecting per-row diagnostics.
pub fn normalize_rows(rows: &[RawRow]) -> NormalizedTickets {
    let mut out = NormalizedTickets::default();

    for (row, raw) in rows.iter().enumerate() {
        let (Some(ticket), Some(category)) = (raw.ticket.as_deref(), raw.category.as_deref())
        else {
            out.dropped_missing += 1;
            continue;
        };
        if ticket.is_empty() || category.is_empty() {
            out.dropped_missing += 1;
            continue;
        }

        match parse_ticket_digits(ticket) {
            Ok(digits) => {
                let category = Category::parse(category);
                if !category.is_recognized() {
                    tracing::debug!(row, %category, "unrecognized category, ticket is inert");
                }
                out.tickets.push(Ticket::new(digits, category));
            }
            Err(error) => {
                tracing::debug!(row, ticket, %error, "skipping malformed ticket");
                out.skipped.push(SkippedRow {
                    row,
                    ticket: ticket.to_string(),
                    error,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_ticket_digits("1,2,3,4,5"), Ok([1, 2, 3, 4, 5]));
        assert_eq!(parse_ticket_digits(" 0, 0 ,9,0 , 7 "), Ok([0, 0, 9, 0, 7]));
    }

    #[test]
    fn test_parse_wrong_count() {
        assert_eq!(
            parse_ticket_digits("1,2,3,4"),
            Err(FormatError::WrongDigitCount { found: 4 })
        );
        assert_eq!(
            parse_ticket_digits("1,2,3,4,5,6"),
            Err(FormatError::WrongDigitCount { found: 6 })
        );
        assert_eq!(
            parse_ticket_digits("12345"),
            Err(FormatError::WrongDigitCount { found: 1 })
        );
    }

    #[test]
    fn test_parse_bad_tokens() {
        assert_eq!(
            parse_ticket_digits("1,2,x,4,5"),
            Err(FormatError::InvalidToken {
                token: "x".to_string()
            })
        );
        assert_eq!(
            parse_ticket_digits("1,2,,4,5"),
            Err(FormatError::InvalidToken {
                token: String::new()
            })
        );
        assert_eq!(
            parse_ticket_digits("1,2,10,4,5"),
            Err(FormatError::DigitOutOfRange { value: 10 })
        );
        assert_eq!(
            parse_ticket_digits("1,2,-1,4,5"),
            Err(FormatError::DigitOutOfRange { value: -1 })
        );
    }

    #[test]
    fn test_normalize_drops_missing() {
        let rows = vec![
            RawRow::new("1,2,3,4,5", "straight"),
            RawRow {
                ticket: None,
                category: Some("rumble".to_string()),
            },
            RawRow {
                ticket: Some("1,1,1,1,1".to_string()),
                category: None,
            },
            RawRow::new("", "chance"),
        ];
        let out = normalize_rows(&rows);
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(out.dropped_missing, 3);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_whitespace_cells_are_values() {
        let rows = vec![
            RawRow::new("1,2,3,4,5", "   "),
            RawRow::new("  ", "chance"),
        ];
        let out = normalize_rows(&rows);
        assert_eq!(out.dropped_missing, 0);
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(
            out.tickets[0].category(),
            &Category::Unrecognized(String::new())
        );
        assert_eq!(out.unrecognized_count(), 1);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].row, 1);
    }

    #[test]
    fn test_normalize_skips_malformed_and_keeps_going() {
        let rows = vec![
            RawRow::new("1,2,3", "straight"),
            RawRow::new("9,9,9,9,9", " CHANCE "),
        ];
        let out = normalize_rows(&rows);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].row, 0);
        assert_eq!(out.skipped[0].ticket, "1,2,3");
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(out.tickets[0].category(), &Category::Chance);
        assert_eq!(out.tickets[0].digits(), &[9, 9, 9, 9, 9]);
    }

    #[test]
    fn test_normalize_keeps_unrecognized() {
        let rows = vec![RawRow::new("1,2,3,4,5", "Boxed")];
        let out = normalize_rows(&rows);
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(out.unrecognized_count(), 1);
        assert_eq!(
            out.tickets[0].category(),
            &Category::Unrecognized("boxed".to_string())
        );
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::WrongDigitCount { found: 3 };
        assert_eq!(err.to_string(), "expected 5 comma-separated digits, found 3");
    }
}
