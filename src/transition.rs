//! Transition engine: how dial turns move the disks.
//!
//! Turning toward a direction engages the disk under it and both of its
//! cyclic neighbours. The disk across the dial is left alone:
//!
//! - neighbour offset `k = -1`: the next disk in cyclic order
//! - `k = 0`: the disk under the direction
//! - `k = +1`: the previous disk in cyclic order
//!
//! Each engaged disk has its pin pushed to `k` (see `Disk::pushed`).

use crate::disk::{Direction, DiskConfiguration, Move};

/// Pin offsets applied by a single move, in application order.
const PIN_OFFSETS: [i8; 3] = [-1, 0, 1];

/// Applies one move, returning the next configuration.
#[inline(always)]
pub fn apply_move(config: DiskConfiguration, step: Move) -> DiskConfiguration {
    let mut next = config;
    for offset in PIN_OFFSETS {
        let direction = Direction::from_cyclic(step.index() as isize - offset as isize);
        next = next.with_disk(direction, config[direction].pushed(offset));
    }
    next
}

/// Applies `moves` in order starting from `start`.
pub fn apply_combination(start: DiskConfiguration, moves: &[Move]) -> DiskConfiguration {
    moves.iter().fold(start, |config, &step| apply_move(config, step))
}
