//! Per-combination scoring with early exit.
//!
//! [`score_combination`] walks the ticket set in input order and gives up as
//! soon as the running total reaches the caller's threshold: such a candidate
//! can no longer enter the top-K, so its remaining tickets are never looked at.
//! The threshold must be read from the tracker right before each call.

use crate::matching::ticket_payout;
use crate::types::{Category, Combination, DigitCounts, ScoredResult, Ticket};

/// Result of scoring one combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Every ticket was scored; totals are exact.
    Complete(ScoredResult),
    /// Scoring stopped once the running total reached the threshold.
    /// `partial_total` is a lower bound on the real total.
    Pruned { partial_total: u64 },
}

impl ScoreOutcome {
    /// Exact total for `Complete`, lower bound for `Pruned`.
    pub fn total(&self) -> u64 {
        match self {
            ScoreOutcome::Complete(r) => r.total_payout,
            ScoreOutcome::Pruned { partial_total } => *partial_total,
        }
    }

    pub fn into_result(self) -> Option<ScoredResult> {
        match self {
            ScoreOutcome::Complete(r) => Some(r),
            ScoreOutcome::Pruned { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Default)]
struct Subtotals {
    straight: u64,
    rumble: u64,
    chance: u64,
}

impl Subtotals {
    #[inline(always)]
    fn add(&mut self, category: &Category, amount: u64) {
        match category {
            Category::Straight => self.straight += amount,
            Category::Rumble => self.rumble += amount,
            Category::Chance => self.chance += amount,
            Category::Unrecognized(_) => {}
        }
    }

    #[inline(always)]
    fn total(&self) -> u64 {
        self.straight + self.rumble + self.chance
    }

    fn finish(self, combo: Combination) -> ScoredResult {
        ScoredResult::new(combo, self.straight, self.rumble, self.chance)
    }
}

/// Score `combo` against `tickets`, stopping once the total reaches `threshold`.
///
/// Pass [`UNBOUNDED_THRESHOLD`](crate::constants::UNBOUNDED_THRESHOLD) to
/// disable pruning.
pub fn score_combination(
    combo: &Combination,
    combo_counts: &DigitCounts,
    tickets: &[Ticket],
    threshold: u64,
) -> ScoreOutcome {
    let mut subtotals = Subtotals::default();
    for ticket in tickets {
        subtotals.add(
            ticket.category(),
            ticket_payout(combo, combo_counts, ticket),
        );
        if subtotals.total() >= threshold {
            return ScoreOutcome::Pruned {
                partial_total: subtotals.total(),
            };
        }
    }
    ScoreOutcome::Complete(subtotals.finish(*combo))
}

/// Full breakdown for one combination, no pruning.
pub fn score_exhaustive(combo: &Combination, tickets: &[Ticket]) -> ScoredResult {
    let counts = combo.counts();
    let mut subtotals = Subtotals::default();
    for ticket in tickets {
        subtotals.add(ticket.category(), ticket_payout(combo, &counts, ticket));
    }
    subtotals.finish(*combo)
}
