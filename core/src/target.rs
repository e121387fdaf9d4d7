//! Sources of quiz targets.
//!
//! The round controller never draws randomness itself; it asks a
//! [`TargetSource`] so tests and debug runs can pin the sequence.

use bitlights_types::{BitCount, Target};

pub trait TargetSource {
    /// Produce a target in `1..=2^N-1` for the given bit count.
    fn next_target(&mut self, count: BitCount) -> Target;
}

impl<F> TargetSource for F
where
    F: FnMut(BitCount) -> Target,
{
    fn next_target(&mut self, count: BitCount) -> Target {
        self(count)
    }
}

/// Uniform targets from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTargets;

impl TargetSource for RandomTargets {
    fn next_target(&mut self, count: BitCount) -> Target {
        // Masking a uniform byte to N bits is uniform over 0..=2^N-1;
        // rejecting zero keeps it uniform over the target range.
        let mask = count.max_value();
        loop {
            let raw = u16::from(rand::random::<u8>()) & mask;
            if let Ok(target) = Target::new(raw, count) {
                return target;
            }
        }
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values outside the range of the requested bit count are folded into it
/// with [`Target::wrapping`].
#[derive(Debug, Clone, Default)]
pub struct SequenceTargets {
    values: Vec<u64>,
    next: usize,
}

impl SequenceTargets {
    #[must_use]
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Parse a comma-separated list such as `"5, 9, 12"`.
    ///
    /// Returns `None` if any entry is not a non-negative integer or the list
    /// is empty.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let values = raw
            .split(',')
            .map(|part| part.trim().parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        (!values.is_empty()).then(|| Self::new(values))
    }
}

impl TargetSource for SequenceTargets {
    fn next_target(&mut self, count: BitCount) -> Target {
        let Some(&raw) = self.values.get(self.next % self.values.len().max(1)) else {
            return Target::wrapping(1, count);
        };
        self.next = self.next.wrapping_add(1);
        Target::wrapping(raw, count)
    }
}
