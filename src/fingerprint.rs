//! Fingerprints ("seeds") of disk configurations.
//!
//! Each disk has 15 reachable states (5 notches x 3 pin offsets), so a
//! configuration is written as a 4-digit base-15 number with Up as the most
//! significant digit. Within this model the encoding is exact: two
//! configurations share a seed iff their disks are equal. It makes no claim
//! about physical states the model does not represent.

use crate::disk::{Direction, Disk, DiskConfiguration, NOTCHES};

/// Integer fingerprint of a configuration, in `0..SEED_SPACE`.
pub type Seed = u32;

/// Number of distinct states per disk.
pub const DISK_STATES: Seed = NOTCHES as Seed * 3;

/// Number of distinct seeds.
pub const SEED_SPACE: Seed = DISK_STATES.pow(4);

/// Seed digit for one disk, in `0..DISK_STATES`.
#[inline(always)]
pub const fn disk_seed(disk: Disk) -> Seed {
    disk.notch_index() as Seed + (disk.last_pin_offset() + 1) as Seed * NOTCHES as Seed
}

/// Fingerprint of a full configuration.
#[inline]
pub fn fingerprint(config: &DiskConfiguration) -> Seed {
    Direction::ALL
        .iter()
        .fold(0, |seed, &direction| seed * DISK_STATES + disk_seed(config[direction]))
}
