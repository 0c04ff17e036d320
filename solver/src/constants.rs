//! Search-space constants and the three fixed payout tables.
//!
//! A combination is 5 decimal digits, so the space is 10^5 = 100,000 draws.
//! Combination index `i` is the draw's decimal value: digit 0 is `i / 10_000`,
//! digit 4 is `i % 10`. Enumerating `0..NUM_COMBINATIONS` therefore visits
//! draws in lexicographic order with digit 0 varying slowest.

use crate::types::PayoutTable;

/// Digits per ticket and per combination.
pub const NUM_DIGITS: usize = 5;

/// Distinct digit values (0-9).
pub const NUM_DIGIT_VALUES: usize = 10;

/// Size of the search space: 10^5.
pub const NUM_COMBINATIONS: usize = 100_000;

/// Number of lowest-payout combinations retained.
pub const TOP_K: usize = 10;

/// Progress cadence, in combinations.
pub const PROGRESS_INTERVAL: usize = 1_000;

/// Threshold reported while fewer than [`TOP_K`] results are retained.
pub const UNBOUNDED_THRESHOLD: u64 = u64::MAX;

/// Straight: only a full 5-digit prefix match pays.
pub const STRAIGHT_PAYOUT: PayoutTable = PayoutTable::new([0, 0, 0, 0, 0, 45_000]);

/// Rumble: multiset overlap of 3, 4 or 5 digits.
pub const RUMBLE_PAYOUT: PayoutTable = PayoutTable::new([0, 0, 0, 5, 120, 1_850]);

/// Chance: suffix match of 1 through 5 digits.
pub const CHANCE_PAYOUT: PayoutTable = PayoutTable::new([0, 15, 100, 1_250, 8_500, 13_500]);

/// Canonical (normalized) category names.
pub const CATEGORY_STRAIGHT: &str = "straight";
pub const CATEGORY_RUMBLE: &str = "rumble";
pub const CATEGORY_CHANCE: &str = "chance";

/// Rows shown by the data preview when no count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Map a combination index to its digits.
#[inline(always)]
pub fn combination_digits(index: usize) -> [u8; NUM_DIGITS] {
    debug_assert!(index < NUM_COMBINATIONS, "index {} out of range", index);
    [
        (index / 10_000 % 10) as u8,
        (index / 1_000 % 10) as u8,
        (index / 100 % 10) as u8,
        (index / 10 % 10) as u8,
        (index % 10) as u8,
    ]
}

/// Inverse of [`combination_digits`].
#[inline(always)]
pub fn combination_index(digits: &[u8; NUM_DIGITS]) -> usize {
    digits.iter().fold(0usize, |acc, &d| acc * 10 + d as usize)
}
