use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// Resolved (or predicted) direction of a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Outcome {
    NotTaken = 0,
    Taken = 1,
}

impl Outcome {
    pub fn is_taken(self) -> bool {
        self == Outcome::Taken
    }

    /// Bipolar encoding used as perceptron input: `+1` taken, `-1` not taken.
    pub fn sign(self) -> i8 {
        match self {
            Outcome::Taken => 1,
            Outcome::NotTaken => -1,
        }
    }

    /// The outcome as a single history bit.
    pub fn bit(self) -> u32 {
        self as u32
    }
}

impl From<bool> for Outcome {
    fn from(taken: bool) -> Self {
        if taken {
            Outcome::Taken
        } else {
            Outcome::NotTaken
        }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Outcome;

    fn not(self) -> Outcome {
        match self {
            Outcome::Taken => Outcome::NotTaken,
            Outcome::NotTaken => Outcome::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Taken => f.write_str("TAKEN"),
            Outcome::NotTaken => f.write_str("NOTTAKEN"),
        }
    }
}

/// The interface that all Branch Predictors must implement.
///
/// Callers alternate strictly: `predict(pc)` for a branch, then
/// `train(pc, outcome)` with the same `pc` once the branch resolves.
pub trait BranchPredictor {
    /// Display name of the variant.
    fn name(&self) -> &'static str;

    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// Never changes counters or history; a predictor may only remember the
    /// lookup it performed so the paired `train` can reuse it.
    fn predict(&mut self, pc: u32) -> Outcome;

    /// Updates the predictor tables with the resolved outcome of the branch at `pc`.
    fn train(&mut self, pc: u32, outcome: Outcome);

    /// Total predictor state in bits.
    fn storage_bits(&self) -> usize;
}
