//! Counts how many combinations collapse onto each lock state.
//!
//! Every combination of length `0..=max_length` is applied (incrementally,
//! one move per tree edge) and tallied by seed. Seeds hit more than once are
//! duplicate states.

use rustc_hash::FxHashMap;

use crate::disk::{Combination, Direction, DiskConfiguration};
use crate::fingerprint::{fingerprint, Seed};
use crate::transition::apply_move;

/// How a seed was reached.
#[derive(Clone, Debug)]
pub struct Tally {
    /// Number of combinations that land on the seed.
    pub count: usize,
    /// Shortest combination reaching the seed, earliest in enumeration order
    /// among equals.
    pub first: Combination,
}

/// Seed tallies for all combinations up to a length.
#[derive(Debug)]
pub struct Census {
    max_length: usize,
    tallies: FxHashMap<Seed, Tally>,
}

impl Census {
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of distinct states reached.
    pub fn unique_states(&self) -> usize {
        self.tallies.len()
    }

    /// Combinations that land on an already-reached state.
    pub fn duplicate_count(&self) -> usize {
        self.tallies.values().map(|tally| tally.count - 1).sum()
    }

    /// Total number of combinations tallied.
    pub fn combinations(&self) -> usize {
        self.tallies.values().map(|tally| tally.count).sum()
    }

    pub fn count(&self, seed: Seed) -> usize {
        self.tallies.get(&seed).map_or(0, |tally| tally.count)
    }

    pub fn first(&self, seed: Seed) -> Option<&Combination> {
        self.tallies.get(&seed).map(|tally| &tally.first)
    }

    /// Seeds sharing the highest count, in ascending seed order.
    pub fn most_ambiguous(&self) -> Vec<(Seed, &Tally)> {
        let Some(best) = self.tallies.values().map(|tally| tally.count).max() else {
            return Vec::new();
        };
        let mut seeds: Vec<_> = self
            .tallies
            .iter()
            .filter(|(_, tally)| tally.count == best)
            .map(|(&seed, tally)| (seed, tally))
            .collect();
        seeds.sort_unstable_by_key(|&(seed, _)| seed);
        seeds
    }

    fn record(&mut self, config: &DiskConfiguration, path: &Combination) {
        self.tallies
            .entry(fingerprint(config))
            .and_modify(|tally| {
                tally.count += 1;
                // preorder reaches deep paths before shallow siblings
                if path.len() < tally.first.len() {
                    tally.first = path.clone();
                }
            })
            .or_insert_with(|| Tally {
                count: 1,
                first: path.clone(),
            });
    }

    fn walk(&mut self, config: DiskConfiguration, path: &mut Combination) {
        self.record(&config, path);
        if path.len() == self.max_length {
            return;
        }
        for step in Direction::ALL {
            path.push(step);
            self.walk(apply_move(config, step), path);
            path.pop();
        }
    }
}

/// Tallies every combination of length `0..=max_length`.
pub fn census(max_length: usize) -> Census {
    let mut census = Census {
        max_length,
        tallies: FxHashMap::default(),
    };
    let mut path = Combination::with_capacity(max_length);
    census.walk(DiskConfiguration::reset(), &mut path);
    log::debug!(
        "census up to {max_length} moves: {} states, {} duplicates",
        census.unique_states(),
        census.duplicate_count()
    );
    census
}
