//! 2-bit saturating counter shared by the counter-table predictors.

use super::Outcome;

/// A 2-bit saturating counter.
///
/// 0 = Strongly Not Taken, 1 = Weakly Not Taken,
/// 2 = Weakly Taken, 3 = Strongly Taken
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    pub const MAX: u8 = 3;
    pub const BITS: usize = 2;

    pub const STRONGLY_NOT_TAKEN: Self = Self(0);
    pub const WEAKLY_NOT_TAKEN: Self = Self(1);

    /// Builds a counter, saturating `value` at [`Self::MAX`].
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Taken iff the counter is in one of the two upper states.
    pub fn predict(self) -> Outcome {
        Outcome::from(self.0 > 1)
    }

    pub fn increment(&mut self) {
        if self.0 < Self::MAX {
            self.0 += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }

    /// Moves the counter one step towards `outcome`.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Taken => self.increment(),
            Outcome::NotTaken => self.decrement(),
        }
    }
}
