//! Directional Combination Lock Library
//!
//! Simulates the four internal disks of a directional (up/left/down/right)
//! combination padlock and searches knob-turn sequences for duplicate
//! combinations: different sequences that leave the disks in the same state.
//!
//! Entry points:
//! - `DiskConfiguration::reset` and `apply_combination` run the state machine
//! - `fingerprint` reduces a configuration to its integer seed
//! - `search_range` (or `search_range_blocking`) enumerates every
//!   combination in a length range and returns those matching a seed

pub mod census;
pub mod disk;
pub mod driver;
pub mod error;
pub mod fingerprint;
pub mod search;
pub mod transition;

pub use census::{census, Census};
pub use disk::{Combination, Direction, Disk, DiskConfiguration, Move};
pub use driver::{search_range, search_range_blocking, SearchRange};
pub use error::LockError;
pub use fingerprint::{fingerprint, Seed};
pub use search::{
    search_length, CancelToken, CandidateObserver, SearchContext, SearchOptions, Silent,
    DEFAULT_YIELD_THRESHOLD,
};
pub use transition::{apply_combination, apply_move};
