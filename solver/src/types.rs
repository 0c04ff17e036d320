//! Core data structures: payout tables, categories, tickets, combinations and
//! scored results.
//!
//! Everything here is immutable once built. A [`Ticket`] is created once per
//! input row by [`crate::tickets::normalize_rows`]; a [`Combination`] is
//! materialized on the fly from its index by the search loop.

use std::fmt;

use crate::constants::*;

/// Match-count → payout lookup for one category.
///
/// Indexed directly by match count (0..=5). Counts the table does not list pay 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayoutTable {
    payouts: [u64; NUM_DIGITS + 1],
}

impl PayoutTable {
    pub const fn new(payouts: [u64; NUM_DIGITS + 1]) -> Self {
        Self { payouts }
    }

    /// Payout for `matches` matching digits.
    #[inline(always)]
    pub fn payout(&self, matches: usize) -> u64 {
        self.payouts.get(matches).copied().unwrap_or(0)
    }
}

/// Wager category of a ticket.
///
/// Unrecognized categories are kept (with their normalized text) so they can be
/// reported, but they never pay.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Straight,
    Rumble,
    Chance,
    Unrecognized(String),
}

impl Category {
    /// Classify raw category text: trimmed and lowercased before matching.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            CATEGORY_STRAIGHT => Category::Straight,
            CATEGORY_RUMBLE => Category::Rumble,
            CATEGORY_CHANCE => Category::Chance,
            _ => Category::Unrecognized(normalized),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Straight => CATEGORY_STRAIGHT,
            Category::Rumble => CATEGORY_RUMBLE,
            Category::Chance => CATEGORY_CHANCE,
            Category::Unrecognized(text) => text.as_str(),
        }
    }

    /// Payout table for the category, `None` for unrecognized ones.
    pub fn payout_table(&self) -> Option<&'static PayoutTable> {
        match self {
            Category::Straight => Some(&STRAIGHT_PAYOUT),
            Category::Rumble => Some(&RUMBLE_PAYOUT),
            Category::Chance => Some(&CHANCE_PAYOUT),
            Category::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digit multiset: `counts[d]` = occurrences of digit `d`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitCounts {
    counts: [u8; NUM_DIGIT_VALUES],
}

impl DigitCounts {
    pub fn from_digits(digits: &[u8; NUM_DIGITS]) -> Self {
        let mut counts = [0u8; NUM_DIGIT_VALUES];
        for &d in digits {
            counts[d as usize] += 1;
        }
        Self { counts }
    }

    #[inline(always)]
    pub fn count(&self, digit: u8) -> u8 {
        self.counts[digit as usize]
    }

    /// Multiset intersection cardinality: Σ_d min(self[d], other[d]).
    #[inline(always)]
    pub fn intersection_size(&self, other: &DigitCounts) -> usize {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .map(|(&a, &b)| a.min(b) as usize)
            .sum()
    }

    /// Total number of digits in the multiset (always 5 for a full draw).
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One candidate draw. Ordering follows the enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combination {
    digits: [u8; NUM_DIGITS],
}

impl Combination {
    pub fn new(digits: [u8; NUM_DIGITS]) -> Self {
        debug_assert!(digits.iter().all(|&d| d < 10), "digit out of range");
        Self { digits }
    }

    #[inline(always)]
    pub fn from_index(index: usize) -> Self {
        Self {
            digits: combination_digits(index),
        }
    }

    pub fn index(&self) -> usize {
        combination_index(&self.digits)
    }

    #[inline(always)]
    pub fn digits(&self) -> &[u8; NUM_DIGITS] {
        &self.digits
    }

    pub fn counts(&self) -> DigitCounts {
        DigitCounts::from_digits(&self.digits)
    }
}

/// Comma-joined digits, e.g. `1,2,3,4,5`.
impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// A validated sold ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    digits: [u8; NUM_DIGITS],
    counts: DigitCounts,
    category: Category,
}

impl Ticket {
    /// Build a ticket; the digit multiset is computed once here.
    pub fn new(digits: [u8; NUM_DIGITS], category: Category) -> Self {
        debug_assert!(digits.iter().all(|&d| d < 10), "digit out of range");
        Self {
            digits,
            counts: DigitCounts::from_digits(&digits),
            category,
        }
    }

    #[inline(always)]
    pub fn digits(&self) -> &[u8; NUM_DIGITS] {
        &self.digits
    }

    #[inline(always)]
    pub fn counts(&self) -> &DigitCounts {
        &self.counts
    }

    #[inline(always)]
    pub fn category(&self) -> &Category {
        &self.category
    }
}

/// Exact payout breakdown for one combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredResult {
    pub combination: Combination,
    pub total_payout: u64,
    pub straight_subtotal: u64,
    pub rumble_subtotal: u64,
    pub chance_subtotal: u64,
}

impl ScoredResult {
    pub fn new(combination: Combination, straight: u64, rumble: u64, chance: u64) -> Self {
        Self {
            combination,
            total_payout: straight + rumble + chance,
            straight_subtotal: straight,
            rumble_subtotal: rumble,
            chance_subtotal: chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("straight"), Category::Straight);
        assert_eq!(Category::parse("  Rumble "), Category::Rumble);
        assert_eq!(Category::parse("CHANCE\t"), Category::Chance);
        assert_eq!(
            Category::parse(" Box "),
            Category::Unrecognized("box".to_string())
        );
        assert!(!Category::parse("boxed").is_recognized());
        assert!(Category::parse("chance").payout_table().is_some());
        assert!(Category::parse("boxed").payout_table().is_none());
    }

    #[test]
    fn test_digit_counts() {
        let counts = DigitCounts::from_digits(&[1, 1, 3, 9, 1]);
        assert_eq!(counts.count(1), 3);
        assert_eq!(counts.count(3), 1);
        assert_eq!(counts.count(0), 0);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_intersection_size() {
        let a = DigitCounts::from_digits(&[1, 1, 3, 7, 8]);
        let b = DigitCounts::from_digits(&[1, 3, 5, 5, 5]);
        assert_eq!(a.intersection_size(&b), 2);
        assert_eq!(b.intersection_size(&a), 2);
        assert_eq!(a.intersection_size(&a), 5);
    }

    #[test]
    fn test_combination_display() {
        assert_eq!(Combination::new([1, 2, 3, 4, 5]).to_string(), "1,2,3,4,5");
        assert_eq!(Combination::from_index(7).to_string(), "0,0,0,0,7");
    }

    #[test]
    fn test_combination_order_matches_index() {
        let a = Combination::from_index(9_999);
        let b = Combination::from_index(10_000);
        assert!(a < b);
        assert_eq!(b.index(), 10_000);
    }

    #[test]
    fn test_scored_result_total() {
        let r = ScoredResult::new(Combination::from_index(0), 45_000, 120, 15);
        assert_eq!(r.total_payout, 45_135);
    }
}
