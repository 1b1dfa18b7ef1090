use log::{debug, info, warn};
use rayon::prelude::*;
use std::ops::{ControlFlow, Range};

use super::{partition, Enumerator, SearchResult};
use crate::config::SearchConfig;
use crate::pattern::PatternId;
use crate::sim::Classifier;

/// Number of sub-ranges handed out per worker thread within one batch.
const PARTS_PER_THREAD: usize = 4;

/// Totals reported at the end of a streamed search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    /// Number of ids classified.
    pub checked: u64,
    /// Number of oscillators found.
    pub oscillators: u64,
    /// First id that was not classified. A search can be resumed from here.
    pub next: u64,
    /// Whether the sink asked to stop before the end of the range.
    pub stopped: bool,
}

/// Multithreaded search over ranges of ids.
///
/// Each batch of ids is split into disjoint sub-ranges that are classified on
/// a dedicated thread pool with no shared state. Results are merged back in
/// ascending id order.
#[derive(Debug)]
pub struct ParallelSearch {
    enumerator: Enumerator,
    pool: rayon::ThreadPool,
    batch_size: u64,
}

impl ParallelSearch {
    /// Constructs a parallel search, starting its worker threads.
    pub fn new(classifier: Classifier, config: &SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("lifeosc-worker-{}", i));
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        debug!(
            "Started search pool with {} threads and batches of {} ids",
            pool.current_num_threads(),
            config.batch_size,
        );
        Ok(Self {
            enumerator: Enumerator::new(classifier),
            pool,
            batch_size: config.batch_size,
        })
    }

    /// Returns the sequential enumerator used by each worker.
    pub fn enumerator(&self) -> &Enumerator {
        &self.enumerator
    }
    /// Returns the number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Returns every oscillator in `start..end`, in ascending order.
    ///
    /// The whole result is kept in memory; use [`ParallelSearch::stream()`] for
    /// large ranges.
    pub fn oscillators(&self, start: u64, end: u64) -> SearchResult<Vec<PatternId>> {
        let range = self.enumerator.check_range(start, end)?;
        Ok(self.search_range(range))
    }

    /// Searches `start..end` one batch at a time, passing the oscillators of
    /// each batch (in ascending order) to `sink` before moving on to the next
    /// batch. The search stops early if `sink` returns `ControlFlow::Break`.
    pub fn stream<F>(&self, start: u64, end: u64, mut sink: F) -> SearchResult<SearchSummary>
    where
        F: FnMut(&[PatternId]) -> ControlFlow<()>,
    {
        let range = self.enumerator.check_range(start, end)?;
        let total = range.end - range.start;
        let mut summary = SearchSummary {
            checked: 0,
            oscillators: 0,
            next: range.start,
            stopped: false,
        };
        while summary.next < range.end {
            let batch_end = range.end.min(summary.next.saturating_add(self.batch_size));
            let found = self.search_range(summary.next..batch_end);
            summary.checked += batch_end - summary.next;
            summary.oscillators += found.len() as u64;
            summary.next = batch_end;
            info!(
                "Checked {}/{} ids (up to {}), {} oscillators found",
                summary.checked, total, batch_end, summary.oscillators,
            );
            if sink(&found).is_break() {
                if summary.next < range.end {
                    warn!("Search stopped early; resume from {}", summary.next);
                }
                summary.stopped = true;
                break;
            }
        }
        Ok(summary)
    }

    fn search_range(&self, range: Range<u64>) -> Vec<PatternId> {
        let parts = partition(range, self.threads() * PARTS_PER_THREAD);
        let enumerator = &self.enumerator;
        let found: Vec<Vec<PatternId>> = self.pool.install(|| {
            parts
                .into_par_iter()
                .map(|ids| {
                    enumerator
                        .results(ids)
                        .filter(|result| result.is_oscillator())
                        .map(|result| result.id)
                        .collect()
                })
                .collect()
        });
        found.concat()
    }
}
