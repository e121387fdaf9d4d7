//! Bit vectors and the values derived from them.
//!
//! Index 0 is the most-significant bit. A bit at index `i` of an `N`-bit
//! vector carries the weight `2^(N-1-i)`.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Number of binary digits in play.
///
/// Invariant: `4 <= n <= 8`. Construction outside that range fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u8")]
pub struct BitCount(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bit count must be between 4 and 8, got {got}")]
pub struct BitCountError {
    pub got: i64,
}

impl BitCount {
    pub const MIN: Self = Self(4);
    pub const MAX: Self = Self(8);
    pub const ALL: [Self; 5] = [Self(4), Self(5), Self(6), Self(7), Self(8)];

    pub fn new(n: u8) -> Result<Self, BitCountError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&n) {
            Ok(Self(n))
        } else {
            Err(BitCountError { got: i64::from(n) })
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0 as usize
    }

    /// Largest value representable with this many bits (`2^N - 1`).
    #[must_use]
    pub const fn max_value(self) -> u16 {
        (1u16 << self.0) - 1
    }

    /// Positional weight of the bit at `position` (0 = most significant).
    ///
    /// `None` when `position` is outside an `N`-bit row.
    #[must_use]
    pub const fn weight(self, position: usize) -> Option<u16> {
        if position < self.len() {
            Some(1u16 << (self.len() - 1 - position))
        } else {
            None
        }
    }

    #[must_use]
    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        Self((self.0 - 1).max(Self::MIN.0))
    }
}

impl Default for BitCount {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for BitCount {
    type Error = BitCountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for BitCount {
    type Error = BitCountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| BitCountError { got: value })
            .and_then(|n| Self::new(n).map_err(|_| BitCountError { got: value }))
    }
}

impl From<BitCount> for u8 {
    fn from(value: BitCount) -> Self {
        value.0
    }
}

impl fmt::Display for BitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position proven to lie inside the vector that produced it.
///
/// Only [`BitVector::index`] and [`BitVector::indices`] hand these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitIndex {
    position: usize,
    count: BitCount,
}

impl BitIndex {
    #[must_use]
    pub const fn position(self) -> usize {
        self.position
    }

    /// Exponent of this bit's weight (`N-1-i`).
    #[must_use]
    pub const fn power(self) -> u8 {
        self.count.get() - 1 - self.position as u8
    }

    #[must_use]
    pub const fn weight(self) -> u16 {
        1u16 << self.power()
    }
}

/// Ordered bits, most-significant first. Length always equals `count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    count: BitCount,
    bits: Vec<bool>,
}

impl BitVector {
    /// All-false vector of the given width.
    #[must_use]
    pub fn zeroed(count: BitCount) -> Self {
        Self {
            count,
            bits: vec![false; count.len()],
        }
    }

    /// Vector whose bits spell `value` in `count` binary digits.
    ///
    /// Bits above the width are discarded.
    #[must_use]
    pub fn from_value(count: BitCount, value: u16) -> Self {
        let bits = (0..count.get())
            .rev()
            .map(|power| value & (1u16 << power) != 0)
            .collect();
        Self { count, bits }
    }

    #[must_use]
    pub const fn count(&self) -> BitCount {
        self.count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Resolve a raw position against this vector's width.
    #[must_use]
    pub fn index(&self, position: usize) -> Option<BitIndex> {
        (position < self.bits.len()).then_some(BitIndex {
            position,
            count: self.count,
        })
    }

    pub fn indices(&self) -> impl Iterator<Item = BitIndex> + '_ {
        (0..self.bits.len()).map(|position| BitIndex {
            position,
            count: self.count,
        })
    }

    #[must_use]
    pub fn get(&self, index: BitIndex) -> bool {
        self.bits[index.position]
    }

    /// Flip a single bit. Returns the new state of that bit.
    ///
    /// An index taken from a vector of another width is ignored and reports
    /// `false`.
    pub fn toggle(&mut self, index: BitIndex) -> bool {
        if index.count != self.count {
            return false;
        }
        let bit = &mut self.bits[index.position];
        *bit = !*bit;
        *bit
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|bit| !bit)
    }

    /// The derived decimal value of this vector.
    #[must_use]
    pub fn value(&self) -> u16 {
        decimal_value(&self.bits, self.count)
    }

    /// Additive decomposition, most-significant term first.
    ///
    /// With `show_zero_terms == false` only the active terms are listed.
    #[must_use]
    pub fn terms(&self, show_zero_terms: bool) -> Vec<Term> {
        self.indices()
            .map(|index| Term {
                position: index.position(),
                power: index.power(),
                weight: index.weight(),
                active: self.get(index),
            })
            .filter(|term| show_zero_terms || term.active)
            .collect()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Weighted sum of `bits` read as an `count`-digit binary number.
///
/// Positions beyond the width contribute nothing.
#[must_use]
pub fn decimal_value(bits: &[bool], count: BitCount) -> u16 {
    bits.iter()
        .take(count.len())
        .enumerate()
        .filter(|(_, active)| **active)
        .filter_map(|(position, _)| count.weight(position))
        .sum()
}

/// One entry of the additive decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// Index into the bit vector (0 = most significant).
    pub position: usize,
    pub power: u8,
    pub weight: u16,
    pub active: bool,
}

impl Term {
    /// Contribution to the sum: the weight when active, otherwise zero.
    #[must_use]
    pub const fn contribution(&self) -> u16 {
        if self.active { self.weight } else { 0 }
    }
}
