//! Sweeps the search engine across a range of combination lengths.

use std::ops::RangeInclusive;
use std::time::Instant;

use crate::disk::Combination;
use crate::error::LockError;
use crate::fingerprint::Seed;
use crate::search::{search_length, CandidateObserver, SearchContext, SearchOptions};

/// Inclusive range of combination lengths to search.
///
/// An inverted range (`min > max`) is valid and empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRange {
    min: usize,
    max: usize,
}

impl SearchRange {
    /// Validates caller-supplied bounds. Negative lengths are rejected.
    pub fn new(min: i64, max: i64) -> Result<SearchRange, LockError> {
        match (usize::try_from(min), usize::try_from(max)) {
            (Ok(min), Ok(max)) => Ok(SearchRange { min, max }),
            _ => Err(LockError::InvalidRange { min, max }),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Lengths in ascending order.
    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl From<RangeInclusive<usize>> for SearchRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        SearchRange {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

/// Finds every combination with a length in `range` whose seed is `target`.
///
/// Results are ordered by length, then by enumeration order within a
/// length. A single `SearchContext` spans the whole sweep.
pub async fn search_range<O>(
    range: SearchRange,
    target: Seed,
    observer: &mut O,
    options: &SearchOptions,
) -> Result<Vec<Combination>, LockError>
where
    O: CandidateObserver + ?Sized,
{
    let start = Instant::now();
    let mut context = SearchContext::new(options);
    let mut duplicates = Vec::new();

    for length in range.lengths() {
        let found = search_length(length, target, &mut *observer, &mut context).await?;
        log::debug!(
            "length {length}: {} candidates, {} matches",
            4u128.saturating_pow(length as u32),
            found.len()
        );
        duplicates.extend(found);
    }

    log::info!(
        "searched lengths {}..={} for seed {target}: {} matches, {} yields in {:.2?}",
        range.min(),
        range.max(),
        duplicates.len(),
        context.yields(),
        start.elapsed()
    );
    Ok(duplicates)
}

/// Runs `search_range` to completion on the current thread.
pub fn search_range_blocking<O>(
    range: SearchRange,
    target: Seed,
    observer: &mut O,
    options: &SearchOptions,
) -> Result<Vec<Combination>, LockError>
where
    O: CandidateObserver + ?Sized,
{
    pollster::block_on(search_range(range, target, observer, options))
}
