//! Bounded, ascending list of the lowest-payout results seen so far.
//!
//! Entries with equal totals keep first-seen order: a new entry is inserted
//! after every retained entry with the same total, and a full tracker only
//! admits a strictly lower total. Fed in enumeration order, the retained set is
//! therefore the first `capacity` results ordered by `(total_payout, index)`.

use crate::constants::{TOP_K, UNBOUNDED_THRESHOLD};
use crate::types::ScoredResult;

#[derive(Clone, Debug)]
pub struct TopK {
    entries: Vec<ScoredResult>,
    capacity: usize,
}

impl Default for TopK {
    fn default() -> Self {
        Self::new()
    }
}

impl TopK {
    pub fn new() -> Self {
        Self::with_capacity(TOP_K)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "TopK capacity must be positive");
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Highest retained total once full, [`UNBOUNDED_THRESHOLD`] before that.
    ///
    /// Entries are kept sorted, so this is the last entry's total.
    #[inline(always)]
    pub fn threshold(&self) -> u64 {
        if self.is_full() {
            self.entries
                .last()
                .map_or(UNBOUNDED_THRESHOLD, |r| r.total_payout)
        } else {
            UNBOUNDED_THRESHOLD
        }
    }

    /// Would a result with this total be retained?
    #[inline(always)]
    pub fn qualifies(&self, total_payout: u64) -> bool {
        !self.is_full() || total_payout < self.threshold()
    }

    /// Insert `candidate` if it qualifies. Returns whether it was retained.
    pub fn consider(&mut self, candidate: ScoredResult) -> bool {
        if !self.qualifies(candidate.total_payout) {
            return false;
        }
        let pos = self
            .entries
            .partition_point(|r| r.total_payout <= candidate.total_payout);
        self.entries.insert(pos, candidate);
        self.entries.truncate(self.capacity);
        true
    }

    /// Fold another tracker's entries into this one.
    ///
    /// `later` must hold results from combinations enumerated after every
    /// result already considered here; the outcome then matches feeding both
    /// streams through [`TopK::consider`] in order.
    pub fn merge(&mut self, later: TopK) {
        for r in later.entries {
            // later.entries is ascending; nothing after a rejection can qualify.
            if !self.consider(r) {
                break;
            }
        }
    }

    pub fn as_slice(&self) -> &[ScoredResult] {
        &self.entries
    }

    pub fn into_sorted_vec(self) -> Vec<ScoredResult> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Combination;

    fn result(index: usize, total: u64) -> ScoredResult {
        ScoredResult::new(Combination::from_index(index), total, 0, 0)
    }

    fn totals(tk: &TopK) -> Vec<u64> {
        tk.as_slice().iter().map(|r| r.total_payout).collect()
    }

    fn indices(tk: &TopK) -> Vec<usize> {
        tk.as_slice().iter().map(|r| r.combination.index()).collect()
    }

    #[test]
    fn test_threshold_unbounded_until_full() {
        let mut tk = TopK::with_capacity(3);
        assert_eq!(tk.threshold(), UNBOUNDED_THRESHOLD);
        tk.consider(result(0, 50));
        tk.consider(result(1, 10));
        assert_eq!(tk.threshold(), UNBOUNDED_THRESHOLD);
        tk.consider(result(2, 30));
        assert_eq!(tk.threshold(), 50);
        assert_eq!(totals(&tk), vec![10, 30, 50]);
    }

    #[test]
    fn test_evicts_worst() {
        let mut tk = TopK::with_capacity(3);
        for (i, t) in [40, 20, 30].into_iter().enumerate() {
            tk.consider(result(i, t));
        }
        assert!(tk.consider(result(3, 25)));
        assert_eq!(totals(&tk), vec![20, 25, 30]);
        assert!(!tk.consider(result(4, 30)));
        assert!(!tk.consider(result(5, 99)));
        assert_eq!(tk.len(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let mut tk = TopK::with_capacity(3);
        for i in 0..6 {
            tk.consider(result(i, 0));
        }
        assert_eq!(indices(&tk), vec![0, 1, 2]);

        tk.consider(result(6, 0));
        assert_eq!(indices(&tk), vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_total_inserted_after_existing() {
        let mut tk = TopK::with_capacity(4);
        tk.consider(result(0, 5));
        tk.consider(result(1, 9));
        tk.consider(result(2, 5));
        assert_eq!(indices(&tk), vec![0, 2, 1]);
    }

    #[test]
    fn test_never_exceeds_default_capacity() {
        let mut tk = TopK::new();
        for i in 0..100 {
            tk.consider(result(i, (100 - i) as u64));
            assert!(tk.len() <= TOP_K);
            assert!(tk.as_slice().windows(2).all(|w| w[0].total_payout <= w[1].total_payout));
        }
        assert_eq!(totals(&tk), (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_merge_matches_sequential() {
        let stream: Vec<(usize, u64)> = (0..40).map(|i| (i, ((i * 37) % 11) as u64)).collect();

        let mut sequential = TopK::new();
        for &(i, t) in &stream {
            sequential.consider(result(i, t));
        }

        let mut merged = TopK::new();
        for chunk in stream.chunks(7) {
            let mut local = TopK::new();
            for &(i, t) in chunk {
                local.consider(result(i, t));
            }
            merged.merge(local);
        }

        assert_eq!(merged.as_slice(), sequential.as_slice());
    }
}
