//! Brute-force enumeration of pattern ids.
//!
//! Classifying one id depends on nothing but the id, so any range of ids can
//! be split into disjoint sub-ranges and searched independently.

use std::ops::Range;
use thiserror::Error;

mod parallel;

use crate::config::ConfigError;
use crate::pattern::{PatternError, PatternId};
use crate::sim::{ClassificationResult, Classifier, Scratch};
pub use parallel::{ParallelSearch, SearchSummary};

/// Result type returned by fallible search routines.
pub type SearchResult<T> = Result<T, SearchError>;

/// Error encountered while setting up a search.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid id range {start}..{end}; expected 0 <= start <= end <= {limit}")]
    InvalidRange { start: u64, end: u64, limit: u64 },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Classifies every id in a range, one after another.
#[derive(Debug, Clone, Default)]
pub struct Enumerator {
    classifier: Classifier,
}

impl From<Classifier> for Enumerator {
    fn from(classifier: Classifier) -> Self {
        Self::new(classifier)
    }
}

impl Enumerator {
    /// Constructs an enumerator that uses the given classifier.
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Returns the classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Checks that `start..end` is a valid range of ids.
    pub fn check_range(&self, start: u64, end: u64) -> SearchResult<Range<u64>> {
        let limit = self.classifier.codec().id_count();
        if start <= end && end <= limit {
            Ok(start..end)
        } else {
            Err(SearchError::InvalidRange { start, end, limit })
        }
    }

    /// Returns a lazy iterator over the classification of every id in
    /// `start..end`, in ascending order.
    ///
    /// Calling this again with the same range yields the same results.
    pub fn enumerate(&self, start: u64, end: u64) -> SearchResult<Results<'_>> {
        let ids = self.check_range(start, end)?;
        Ok(self.results(ids))
    }
    /// Returns an iterator over a range that has already been checked.
    fn results(&self, ids: Range<u64>) -> Results<'_> {
        Results {
            classifier: &self.classifier,
            ids,
            scratch: Scratch::new(self.classifier.codec().cell_count()),
        }
    }

    /// Returns a lazy iterator over the oscillators in `start..end`, in
    /// ascending order.
    pub fn oscillators(
        &self,
        start: u64,
        end: u64,
    ) -> SearchResult<impl '_ + Iterator<Item = PatternId>> {
        Ok(self
            .enumerate(start, end)?
            .filter(ClassificationResult::is_oscillator)
            .map(|result| result.id))
    }
}

/// Iterator over the classifications of a range of ids.
#[derive(Debug)]
pub struct Results<'a> {
    classifier: &'a Classifier,
    ids: Range<u64>,
    scratch: Scratch,
}
impl Results<'_> {
    /// Returns the number of ids not yet classified.
    pub fn remaining(&self) -> u64 {
        self.ids.end - self.ids.start
    }
}
impl Iterator for Results<'_> {
    type Item = ClassificationResult;

    fn next(&mut self) -> Option<ClassificationResult> {
        let id = PatternId::from_bits(self.ids.next()?);
        Some(self.classifier.classify_with(id, &mut self.scratch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
impl DoubleEndedIterator for Results<'_> {
    fn next_back(&mut self) -> Option<ClassificationResult> {
        let id = PatternId::from_bits(self.ids.next_back()?);
        Some(self.classifier.classify_with(id, &mut self.scratch))
    }
}

/// Splits `range` into at most `parts` contiguous, disjoint sub-ranges that
/// cover it exactly, in ascending order. Sub-range lengths differ by at most
/// one.
pub fn partition(range: Range<u64>, parts: usize) -> Vec<Range<u64>> {
    let len = range.end.saturating_sub(range.start);
    let parts = (parts.max(1) as u64).min(len);
    if parts == 0 {
        return vec![];
    }
    let (base, extra) = (len / parts, len % parts);
    let mut start = range.start;
    (0..parts)
        .map(|i| {
            let end = start + base + if i < extra { 1 } else { 0 };
            let sub_range = start..end;
            start = end;
            sub_range
        })
        .collect()
}
