//! Disk state of the lock and the move/combination vocabulary.
//!
//! The lock holds four rotating disks, one behind each compass label. Each
//! disk rests on one of five notches and remembers the pin offset the last
//! move left it with.

use std::fmt;
use std::ops::{Deref, Index};
use std::str::FromStr;

use crate::error::LockError;

/// Number of physical notches on a disk.
pub const NOTCHES: u8 = 5;

/// Number of disks (and directions) in the lock.
pub const DISKS: usize = 4;

/// A compass label naming both a disk and a dial direction.
///
/// Declaration order is the cyclic order `[Up, Left, Down, Right]`; the
/// transition rule and the fingerprint both depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

/// A single dial turn toward a direction.
pub type Move = Direction;

impl Direction {
    /// All directions in cyclic order.
    pub const ALL: [Direction; DISKS] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Position of this direction in the cyclic order.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction at a cyclic position, wrapping negative and large values.
    #[inline(always)]
    pub const fn from_cyclic(position: isize) -> Direction {
        Direction::ALL[position.rem_euclid(DISKS as isize) as usize]
    }

    /// The direction directly across the dial.
    pub const fn opposite(self) -> Direction {
        Direction::from_cyclic(self.index() as isize + 2)
    }

    /// Canonical token used when exchanging moves with collaborators.
    pub const fn token(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Left => "Left",
            Direction::Down => "Down",
            Direction::Right => "Right",
        }
    }

    /// Single-letter code used when rendering combinations.
    pub const fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Left => 'L',
            Direction::Down => 'D',
            Direction::Right => 'R',
        }
    }
}

impl FromStr for Direction {
    type Err = LockError;

    /// Accepts only the canonical tokens. Letter codes and any other
    /// spelling belong to the presentation layer.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.token() == token)
            .ok_or_else(|| LockError::InvalidMoveToken(token.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One rotating disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Disk {
    /// Engaged notch, always in `0..NOTCHES`.
    notch_index: u8,
    /// Last pin displacement, always -1, 0 or 1.
    last_pin_offset: i8,
}

impl Disk {
    /// A disk at notch 0 with no pin displacement.
    pub const RESET: Disk = Disk {
        notch_index: 0,
        last_pin_offset: 0,
    };

    /// Builds a disk, wrapping the notch into range.
    ///
    /// Panics if `last_pin_offset` is not -1, 0 or 1.
    pub const fn new(notch_index: u8, last_pin_offset: i8) -> Disk {
        assert!(
            last_pin_offset >= -1 && last_pin_offset <= 1,
            "pin offset must be -1, 0 or 1"
        );
        Disk {
            notch_index: notch_index % NOTCHES,
            last_pin_offset,
        }
    }

    #[inline(always)]
    pub const fn notch_index(self) -> u8 {
        self.notch_index
    }

    #[inline(always)]
    pub const fn last_pin_offset(self) -> i8 {
        self.last_pin_offset
    }

    /// Pushes the pin to `offset`.
    ///
    /// The disk advances one notch only when the pin goes further than it
    /// was last left. The physical lock does the inverse (it advances unless
    /// the pin goes further); the crate keeps this rule throughout.
    #[inline(always)]
    pub(crate) const fn pushed(self, offset: i8) -> Disk {
        let advance = if self.last_pin_offset < offset { 1 } else { 0 };
        Disk {
            notch_index: (self.notch_index + advance) % NOTCHES,
            last_pin_offset: offset,
        }
    }

    /// Rotation of the disk in degrees, in `0..360`.
    ///
    /// A notch is 72 degrees and a pin step a third of that.
    pub const fn angle(self) -> u16 {
        (self.notch_index as i16 * 72 + self.last_pin_offset as i16 * 24).rem_euclid(360) as u16
    }
}

impl Default for Disk {
    fn default() -> Self {
        Disk::RESET
    }
}

/// The complete internal state of the lock.
///
/// Plain `Copy` value: moves always produce a new configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiskConfiguration {
    disks: [Disk; DISKS],
}

impl DiskConfiguration {
    /// The canonical reset state: every disk at notch 0, offset 0.
    pub const fn reset() -> DiskConfiguration {
        DiskConfiguration {
            disks: [Disk::RESET; DISKS],
        }
    }

    /// Builds a configuration from disks given in cyclic order.
    pub const fn from_disks(disks: [Disk; DISKS]) -> DiskConfiguration {
        DiskConfiguration { disks }
    }

    /// The configuration reached by applying `moves` from reset.
    pub fn after(moves: &[Move]) -> DiskConfiguration {
        crate::transition::apply_combination(DiskConfiguration::reset(), moves)
    }

    /// Iterates `(direction, disk)` pairs in cyclic order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Disk)> + '_ {
        Direction::ALL.into_iter().zip(self.disks.iter().copied())
    }

    #[inline(always)]
    pub(crate) fn with_disk(mut self, direction: Direction, disk: Disk) -> DiskConfiguration {
        self.disks[direction.index()] = disk;
        self
    }
}

impl Default for DiskConfiguration {
    fn default() -> Self {
        DiskConfiguration::reset()
    }
}

impl Index<Direction> for DiskConfiguration {
    type Output = Disk;

    fn index(&self, direction: Direction) -> &Disk {
        &self.disks[direction.index()]
    }
}

/// An ordered sequence of moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination(Vec<Move>);

impl Combination {
    pub fn new() -> Combination {
        Combination(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Combination {
        Combination(Vec::with_capacity(capacity))
    }

    /// Parses canonical move tokens, rejecting the first one that is not.
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Combination, LockError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens
            .into_iter()
            .map(str::parse::<Move>)
            .collect::<Result<Vec<Move>, _>>()
            .map(Combination)
    }

    pub fn push(&mut self, step: Move) {
        self.0.push(step);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.0.pop()
    }
}

impl Deref for Combination {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl FromIterator<Move> for Combination {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Combination(iter.into_iter().collect())
    }
}

/// Renders the combination in letter notation, e.g. `ULDR`.
impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for step in &self.0 {
            write!(f, "{}", step.letter())?;
        }
        Ok(())
    }
}
