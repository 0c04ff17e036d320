//! # Lowpay: lowest-payout draw finder
//!
//! Given the tickets already sold for a 5-digit draw, finds the 10 draws
//! (out of 00000–99999) that would cost the house the least.
//!
//! ## Pipeline
//!
//! | Step | Module | Description |
//! |------|--------|-------------|
//! | 0 | [`input`] | Load two-column ticket rows from JSON or tab-separated text |
//! | 1 | [`tickets`] | Validate rows into [`types::Ticket`]s; malformed identifiers become skipped-row diagnostics |
//! | 2 | [`search`] | Enumerate all 100,000 combinations in index order |
//! | 3 | [`scorer`] | Total one combination's payout via [`matching`], stopping early once it cannot make the top 10 |
//! | 4 | [`top_k`] | Keep the 10 lowest totals, ascending |
//! | 5 | [`report`] | Result records, data preview, text table, JSON |
//!
//! ## Categories
//!
//! | Category | Match count | Pays (count → amount) |
//! |----------|-------------|-----------------------|
//! | straight | common prefix | 5 → 45000 |
//! | rumble | digit-multiset overlap | 3 → 5, 4 → 120, 5 → 1850 |
//! | chance | common suffix | 1 → 15, 2 → 100, 3 → 1250, 4 → 8500, 5 → 13500 |
//!
//! Tickets with any other category are kept but never pay.
//!
//! ## Pruning
//!
//! Once 10 results are retained, the worst of them is the threshold. A
//! candidate whose running total reaches the threshold is abandoned mid-scan;
//! it could not have displaced anything. The threshold only falls, so it is
//! re-read before every candidate.

pub mod constants;
pub mod env_config;
pub mod input;
pub mod matching;
pub mod report;
pub mod scorer;
pub mod search;
pub mod server;
pub mod tickets;
pub mod top_k;
pub mod types;
