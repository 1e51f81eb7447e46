use serde::Serialize;
use std::io::{self, Write};

/// Aggregate results of replaying a trace through one predictor.
#[derive(Clone, Default, Debug, PartialEq, Serialize)]
pub struct SimStats {
    /// Display name of the predictor.
    pub predictor: String,
    /// Predictor state in bits.
    pub storage_bits: usize,
    pub branches: u64,
    pub incorrect: u64,
}

impl SimStats {
    pub fn record(&mut self, correct: bool) {
        self.branches += 1;
        if !correct {
            self.incorrect += 1;
        }
    }

    /// Mispredicted branches as a percentage of all branches.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches > 0 {
            100.0 * self.incorrect as f64 / self.branches as f64
        } else {
            0.0
        }
    }

    /// Fraction of branches predicted correctly, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        if self.branches > 0 {
            1.0 - (self.incorrect as f64 / self.branches as f64)
        } else {
            0.0
        }
    }

    /// Writes the summary table to standard output.
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n-----------------------------")?;
        writeln!(out, "Predictor:          {}", self.predictor)?;
        writeln!(out, "Storage:            {} bits", self.storage_bits)?;
        writeln!(out, "Branches:           {:>10}", self.branches)?;
        writeln!(out, "Incorrect:          {:>10}", self.incorrect)?;
        writeln!(out, "Misprediction Rate: {:>10.3}", self.misprediction_rate())?;
        writeln!(out, "-----------------------------")
    }
}
