//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Each row of the
//! weight table is a bias plus one weight per history position; the prediction
//! is the sign of the dot product of the weights with the recent outcomes
//! encoded as `-1` / `+1`.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `train()` are O(N) in the history length
//! - **Space Complexity:** O(S × N) for S perceptrons
//! - **Best Case:** Linearly separable correlations with long history
//! - **Worst Case:** Patterns that are not linearly separable (e.g. XOR of two branches)

use super::history::{HistoryRegister, low_mask};
use super::{BranchPredictor, Outcome};
use crate::config::PerceptronConfig;

/// Coefficient used to calculate the training threshold.
const THETA_COEFF: f64 = 1.93;
/// Bias used to calculate the training threshold.
const THETA_BIAS: f64 = 14.0;
/// Bits per stored weight.
const WEIGHT_BITS: usize = i8::BITS as usize;

/// Perceptron Predictor structure.
pub struct PerceptronPredictor {
    /// Global history used only to hash the PC into a row.
    ghr: HistoryRegister,
    /// Recent outcomes as `-1` / `+1`, most recent first.
    features: Vec<i8>,
    /// Table of weights (flattened); column 0 of each row is the bias.
    table: Vec<i8>,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Mask applied to both PC and history when indexing.
    pc_mask: u32,
    /// Training threshold (theta), already rounded up.
    threshold: i32,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor based on configuration.
    pub fn new(config: &PerceptronConfig) -> Self {
        let table_entries = 1usize << config.pc_bits;
        let hist_len = config.history_length;
        let row_size = hist_len + 1;
        let threshold = training_threshold(hist_len);

        log::debug!(
            "perceptron: {} rows, history {}, theta {}",
            table_entries,
            hist_len,
            threshold
        );

        Self {
            ghr: HistoryRegister::new(config.pc_bits),
            features: vec![Outcome::NotTaken.sign(); hist_len],
            table: vec![0; table_entries * row_size],
            row_size,
            pc_mask: low_mask(config.pc_bits),
            threshold,
        }
    }

    /// Row selected by `pc` under the current history.
    pub fn index(&self, pc: u32) -> usize {
        ((pc & self.pc_mask) ^ (self.ghr.value() & self.pc_mask)) as usize
    }

    /// Perceptron output for the branch at `pc`.
    pub fn compute_sum(&self, pc: u32) -> i32 {
        self.output(self.index(pc))
    }

    fn output(&self, row_idx: usize) -> i32 {
        let row = self.weights(row_idx);
        let mut y = row[0] as i32;
        for (w, x) in row[1..].iter().zip(&self.features) {
            y += (*w as i32) * (*x as i32);
        }
        y
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Bias followed by one weight per history position.
    pub fn weights(&self, row_idx: usize) -> &[i8] {
        let base = row_idx * self.row_size;
        &self.table[base..base + self.row_size]
    }

    /// Mutable access to a row, for setting weights directly.
    pub fn weights_mut(&mut self, row_idx: usize) -> &mut [i8] {
        let base = row_idx * self.row_size;
        &mut self.table[base..base + self.row_size]
    }

    /// Perceptron input vector, most recent outcome first.
    pub fn features(&self) -> &[i8] {
        &self.features
    }

    pub fn history(&self) -> u32 {
        self.ghr.value()
    }
}

/// `theta = 1.93 * (N / 4) + 14` with integer `N / 4`, rounded up.
pub fn training_threshold(history_length: usize) -> i32 {
    (THETA_COEFF * (history_length / 4) as f64 + THETA_BIAS).ceil() as i32
}

/// Adds `delta` unless the result would leave the `i8` range, in which case
/// the weight keeps its current value.
pub fn bounded_add(weight: i8, delta: i8) -> i8 {
    weight.checked_add(delta).unwrap_or(weight)
}

impl BranchPredictor for PerceptronPredictor {
    fn name(&self) -> &'static str {
        "Custom"
    }

    fn predict(&mut self, pc: u32) -> Outcome {
        Outcome::from(self.compute_sum(pc) >= 0)
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        let y = self.output(idx);
        let predicted = Outcome::from(y >= 0);
        let t = outcome.sign();

        if predicted != outcome || y.abs() < self.threshold {
            let base = idx * self.row_size;
            let (bias, weights) = self.table[base..base + self.row_size].split_at_mut(1);
            bias[0] = bounded_add(bias[0], t);
            for (w, x) in weights.iter_mut().zip(&self.features) {
                *w = bounded_add(*w, t * x);
            }
        }

        if !self.features.is_empty() {
            self.features.rotate_right(1);
            self.features[0] = t;
        }
        self.ghr.push(outcome);
    }

    fn storage_bits(&self) -> usize {
        self.table.len() * WEIGHT_BITS + self.features.len() + self.ghr.width() as usize
    }
}
