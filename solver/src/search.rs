//! Search driver: score all 100,000 combinations and keep the lowest payouts.
//!
//! The sequential driver is a two-state machine (`Running` → `Done`) that
//! visits combinations in index order, reading the tracker's threshold fresh
//! before each candidate so pruning tightens as better results arrive.
//!
//! ## Parallel mode
//!
//! [`find_lowest_payouts_parallel`] processes the enumeration in blocks of
//! [`PROGRESS_INTERVAL`] combinations. Within a block, rayon workers fold into
//! local trackers, pruning against the lower of their local threshold and a
//! snapshot of the global threshold taken before the block. The snapshot may be
//! stale (too high), which only costs extra scoring. Local trackers are reduced
//! in index order and merged into the global tracker, so the final list is
//! identical to the sequential one.

use std::io::Write;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::constants::{NUM_COMBINATIONS, PROGRESS_INTERVAL};
use crate::scorer::{score_combination, ScoreOutcome};
use crate::top_k::TopK;
use crate::types::{Combination, ScoredResult, Ticket};

/// Progress notification: combinations processed so far out of the total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchProgress {
    pub processed: usize,
    pub total: usize,
}

impl SearchProgress {
    pub fn fraction(&self) -> f64 {
        self.processed as f64 / self.total as f64
    }
}

/// Receives progress while a search runs. Purely observational.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: SearchProgress);

    fn on_complete(&mut self, _outcome: &SearchOutcome) {}
}

/// Observer that ignores everything.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: SearchProgress) {}
}

/// Carriage-return progress line on stderr, redrawn at most every 0.5 s.
pub struct ConsoleProgress {
    start_time: Instant,
    last_report_time: Option<Instant>,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            last_report_time: None,
        }
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&mut self, progress: SearchProgress) {
        let now = Instant::now();
        if let Some(last) = self.last_report_time {
            if progress.processed < progress.total
                && now.duration_since(last).as_secs_f64() < 0.5
            {
                return;
            }
        }
        self.last_report_time = Some(now);

        let elapsed = now.duration_since(self.start_time).as_secs_f64();
        let rate = progress.processed as f64 / elapsed.max(1e-9);
        let eta = (progress.total - progress.processed) as f64 / rate.max(1e-9);
        eprint!(
            "\rProcessing {}/{} ({:.1}%) | Elapsed: {:.1}s | Rate: {:.0} combos/s | ETA: {:.1}s     ",
            progress.processed,
            progress.total,
            progress.fraction() * 100.0,
            elapsed,
            rate,
            eta
        );
        let _ = std::io::stderr().flush();
    }

    fn on_complete(&mut self, outcome: &SearchOutcome) {
        eprintln!(
            "\rCompleted: {} combinations in {:.2}s ({} pruned early)                    ",
            NUM_COMBINATIONS,
            outcome.elapsed.as_secs_f64(),
            outcome.pruned
        );
    }
}

/// Emits a `tracing` event every tenth of the search.
pub struct LogProgress {
    every: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self {
            every: NUM_COMBINATIONS / 10,
        }
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, progress: SearchProgress) {
        if progress.processed % self.every == 0 {
            tracing::info!(
                processed = progress.processed,
                total = progress.total,
                "search progress"
            );
        }
    }
}

/// Which driver to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Sequential,
    Parallel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Done,
}

/// Final ranked list plus run statistics.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// At most [`TOP_K`](crate::constants::TOP_K) results, ascending by total.
    pub results: Vec<ScoredResult>,
    /// Candidates abandoned by the early exit.
    pub pruned: usize,
    pub elapsed: Duration,
}

/// Sequential search over all combinations.
pub struct SearchDriver<'a> {
    tickets: &'a [Ticket],
    tracker: TopK,
    next_index: usize,
    pruned: usize,
}

impl<'a> SearchDriver<'a> {
    pub fn new(tickets: &'a [Ticket]) -> Self {
        Self {
            tickets,
            tracker: TopK::new(),
            next_index: 0,
            pruned: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        if self.next_index < NUM_COMBINATIONS {
            SearchState::Running
        } else {
            SearchState::Done
        }
    }

    /// Combinations processed so far.
    pub fn processed(&self) -> usize {
        self.next_index
    }

    pub fn tracker(&self) -> &TopK {
        &self.tracker
    }

    /// Score the next combination. No-op once `Done`.
    pub fn step(&mut self) -> SearchState {
        if self.state() == SearchState::Done {
            return SearchState::Done;
        }

        let combo = Combination::from_index(self.next_index);
        let threshold = self.tracker.threshold();
        match score_combination(&combo, &combo.counts(), self.tickets, threshold) {
            ScoreOutcome::Complete(result) => {
                if self.tracker.qualifies(result.total_payout) {
                    self.tracker.consider(result);
                }
            }
            ScoreOutcome::Pruned { .. } => self.pruned += 1,
        }
        self.next_index += 1;
        self.state()
    }

    /// Run to completion, notifying `observer` every [`PROGRESS_INTERVAL`] combinations.
    pub fn run<O: ProgressObserver + ?Sized>(mut self, observer: &mut O) -> SearchOutcome {
        let start = Instant::now();
        while self.step() == SearchState::Running {
            if self.next_index % PROGRESS_INTERVAL == 0 {
                observer.on_progress(SearchProgress {
                    processed: self.next_index,
                    total: NUM_COMBINATIONS,
                });
            }
        }
        observer.on_progress(SearchProgress {
            processed: NUM_COMBINATIONS,
            total: NUM_COMBINATIONS,
        });

        let outcome = SearchOutcome {
            results: self.tracker.into_sorted_vec(),
            pruned: self.pruned,
            elapsed: start.elapsed(),
        };
        observer.on_complete(&outcome);
        outcome
    }
}

/// Sequential search; see [`SearchDriver`].
pub fn find_lowest_payouts<O: ProgressObserver + ?Sized>(
    tickets: &[Ticket],
    observer: &mut O,
) -> SearchOutcome {
    tracing::info!(tickets = tickets.len(), "starting sequential search");
    let outcome = SearchDriver::new(tickets).run(observer);
    log_finished(&outcome);
    outcome
}

/// Block-parallel search; same results as [`find_lowest_payouts`].
pub fn find_lowest_payouts_parallel<O: ProgressObserver + ?Sized>(
    tickets: &[Ticket],
    observer: &mut O,
) -> SearchOutcome {
    tracing::info!(
        tickets = tickets.len(),
        threads = rayon::current_num_threads(),
        "starting parallel search"
    );
    let start = Instant::now();
    let mut tracker = TopK::new();
    let mut pruned = 0usize;

    for block_start in (0..NUM_COMBINATIONS).step_by(PROGRESS_INTERVAL) {
        let block_end = (block_start + PROGRESS_INTERVAL).min(NUM_COMBINATIONS);
        let global_threshold = tracker.threshold();

        let (block_top, block_pruned) = (block_start..block_end)
            .into_par_iter()
            .fold(
                || (TopK::new(), 0usize),
                |(mut local, mut local_pruned), index| {
                    let combo = Combination::from_index(index);
                    let threshold = local.threshold().min(global_threshold);
                    match score_combination(&combo, &combo.counts(), tickets, threshold) {
                        ScoreOutcome::Complete(result) => {
                            local.consider(result);
                        }
                        ScoreOutcome::Pruned { .. } => local_pruned += 1,
                    }
                    (local, local_pruned)
                },
            )
            .reduce(
                || (TopK::new(), 0usize),
                |(mut left, left_pruned), (right, right_pruned)| {
                    left.merge(right);
                    (left, left_pruned + right_pruned)
                },
            );

        tracker.merge(block_top);
        pruned += block_pruned;
        observer.on_progress(SearchProgress {
            processed: block_end,
            total: NUM_COMBINATIONS,
        });
    }

    let outcome = SearchOutcome {
        results: tracker.into_sorted_vec(),
        pruned,
        elapsed: start.elapsed(),
    };
    observer.on_complete(&outcome);
    log_finished(&outcome);
    outcome
}

/// Dispatch on `mode`.
pub fn run_search<O: ProgressObserver + ?Sized>(
    tickets: &[Ticket],
    mode: SearchMode,
    observer: &mut O,
) -> SearchOutcome {
    match mode {
        SearchMode::Sequential => find_lowest_payouts(tickets, observer),
        SearchMode::Parallel => find_lowest_payouts_parallel(tickets, observer),
    }
}

fn log_finished(outcome: &SearchOutcome) {
    tracing::info!(
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        pruned = outcome.pruned,
        best = outcome.results.first().map(|r| r.total_payout),
        "search finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOP_K;
    use crate::types::Category;

    struct Recorder {
        seen: Vec<SearchProgress>,
        completed: bool,
    }

    impl ProgressObserver for Recorder {
        fn on_progress(&mut self, progress: SearchProgress) {
            self.seen.push(progress);
        }

        fn on_complete(&mut self, _outcome: &SearchOutcome) {
            self.completed = true;
        }
    }

    #[test]
    fn test_step_state_machine() {
        let tickets = vec![Ticket::new([0, 0, 0, 0, 0], Category::Straight)];
        let mut driver = SearchDriver::new(&tickets);
        assert_eq!(driver.state(), SearchState::Running);
        assert_eq!(driver.step(), SearchState::Running);
        assert_eq!(driver.processed(), 1);
        // 00000 pays 45000 but the tracker is not full yet, so it is kept.
        assert_eq!(driver.tracker().as_slice()[0].total_payout, 45_000);

        while driver.step() == SearchState::Running {}
        assert_eq!(driver.processed(), NUM_COMBINATIONS);
        assert_eq!(driver.step(), SearchState::Done);
        assert_eq!(driver.processed(), NUM_COMBINATIONS);
    }

    #[test]
    fn test_progress_cadence() {
        let mut rec = Recorder {
            seen: Vec::new(),
            completed: false,
        };
        SearchDriver::new(&[]).run(&mut rec);
        assert_eq!(rec.seen.len(), NUM_COMBINATIONS / PROGRESS_INTERVAL);
        assert_eq!(rec.seen[0].processed, PROGRESS_INTERVAL);
        assert_eq!(rec.seen.last().unwrap().processed, NUM_COMBINATIONS);
        assert!(rec.seen.iter().all(|p| p.total == NUM_COMBINATIONS));
        assert!(rec.completed);
    }

    #[test]
    fn test_parallel_progress_cadence() {
        let mut rec = Recorder {
            seen: Vec::new(),
            completed: false,
        };
        find_lowest_payouts_parallel(&[], &mut rec);
        assert_eq!(rec.seen.len(), NUM_COMBINATIONS / PROGRESS_INTERVAL);
        assert_eq!(rec.seen.last().unwrap().processed, NUM_COMBINATIONS);
        assert!(rec.completed);
    }

    #[test]
    fn test_empty_tickets_all_zero() {
        let outcome = find_lowest_payouts(&[], &mut NoProgress);
        assert_eq!(outcome.results.len(), TOP_K);
        assert!(outcome.results.iter().all(|r| r.total_payout == 0));
        let idx: Vec<usize> = outcome
            .results
            .iter()
            .map(|r| r.combination.index())
            .collect();
        assert_eq!(idx, (0..TOP_K).collect::<Vec<_>>());
    }
}
