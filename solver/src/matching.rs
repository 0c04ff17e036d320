//! Match rules for the three wager categories.
//!
//! Each evaluator returns a match count in 0..=5, which is then looked up in
//! the category's [`PayoutTable`](crate::types::PayoutTable):
//!
//! | Category | Rule |
//! |----------|------|
//! | straight | common prefix length, scanning from digit 0 |
//! | chance   | common suffix length, scanning from digit 4 |
//! | rumble   | multiset intersection size, position ignored |

use crate::constants::{CHANCE_PAYOUT, NUM_DIGITS, RUMBLE_PAYOUT, STRAIGHT_PAYOUT};
use crate::types::{Category, Combination, DigitCounts, Ticket};

/// Consecutive equal digits from the front, stopping at the first mismatch.
#[inline(always)]
pub fn straight_match(combo: &[u8; NUM_DIGITS], ticket: &[u8; NUM_DIGITS]) -> usize {
    combo
        .iter()
        .zip(ticket.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Consecutive equal digits from the back, stopping at the first mismatch.
#[inline(always)]
pub fn chance_match(combo: &[u8; NUM_DIGITS], ticket: &[u8; NUM_DIGITS]) -> usize {
    combo
        .iter()
        .rev()
        .zip(ticket.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Digits in common regardless of position, each capped by its lower count.
#[inline(always)]
pub fn rumble_match(combo: &DigitCounts, ticket: &DigitCounts) -> usize {
    combo.intersection_size(ticket)
}

/// Payout one ticket contributes for a combination.
///
/// `combo_counts` must be `combo.counts()`; it is passed in so the search loop
/// computes it once per combination rather than once per ticket.
#[inline(always)]
pub fn ticket_payout(combo: &Combination, combo_counts: &DigitCounts, ticket: &Ticket) -> u64 {
    match ticket.category() {
        Category::Straight => {
            STRAIGHT_PAYOUT.payout(straight_match(combo.digits(), ticket.digits()))
        }
        Category::Rumble => RUMBLE_PAYOUT.payout(rumble_match(combo_counts, ticket.counts())),
        Category::Chance => {
            CHANCE_PAYOUT.payout(chance_match(combo.digits(), ticket.digits()))
        }
        Category::Unrecognized(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_prefix_only() {
        assert_eq!(straight_match(&[1, 2, 3, 4, 5], &[1, 2, 9, 4, 5]), 2);
        assert_eq!(straight_match(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5]), 5);
        assert_eq!(straight_match(&[1, 2, 3, 4, 5], &[0, 2, 3, 4, 5]), 0);
    }

    #[test]
    fn test_chance_suffix_only() {
        assert_eq!(chance_match(&[1, 2, 3, 4, 5], &[1, 9, 3, 4, 5]), 3);
        assert_eq!(chance_match(&[0, 0, 0, 0, 5], &[5, 5, 5, 5, 5]), 1);
        assert_eq!(chance_match(&[5, 0, 0, 0, 0], &[5, 5, 5, 5, 5]), 0);
        assert_eq!(chance_match(&[7, 7, 7, 7, 7], &[7, 7, 7, 7, 7]), 5);
    }

    #[test]
    fn test_rumble_multiset() {
        let combo = DigitCounts::from_digits(&[1, 1, 3, 8, 8]);
        let ticket = DigitCounts::from_digits(&[1, 3, 5, 6, 7]);
        assert_eq!(rumble_match(&combo, &ticket), 2);

        let a = DigitCounts::from_digits(&[1, 1, 1, 1, 1]);
        let b = DigitCounts::from_digits(&[2, 2, 2, 2, 2]);
        assert_eq!(rumble_match(&a, &a), 5);
        assert_eq!(rumble_match(&a, &b), 0);

        // Position does not matter.
        let c = DigitCounts::from_digits(&[5, 4, 3, 2, 1]);
        let d = DigitCounts::from_digits(&[1, 2, 3, 4, 5]);
        assert_eq!(rumble_match(&c, &d), 5);
    }

    #[test]
    fn test_ticket_payout_per_category() {
        let combo = Combination::new([1, 2, 3, 4, 5]);
        let counts = combo.counts();

        let straight = Ticket::new([1, 2, 3, 4, 5], Category::Straight);
        assert_eq!(ticket_payout(&combo, &counts, &straight), 45_000);

        let straight_near = Ticket::new([1, 2, 3, 4, 6], Category::Straight);
        assert_eq!(ticket_payout(&combo, &counts, &straight_near), 0);

        let rumble = Ticket::new([5, 4, 3, 0, 0], Category::Rumble);
        assert_eq!(ticket_payout(&combo, &counts, &rumble), 5);

        let chance = Ticket::new([9, 9, 3, 4, 5], Category::Chance);
        assert_eq!(ticket_payout(&combo, &counts, &chance), 1_250);

        let inert = Ticket::new([1, 2, 3, 4, 5], Category::Unrecognized("box".into()));
        assert_eq!(ticket_payout(&combo, &counts, &inert), 0);
    }
}
