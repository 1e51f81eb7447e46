//! Simulation statistics Python binding.

use bpsim::SimStats;
use pyo3::prelude::*;

/// Read-only view of the statistics of one trace replay.
#[pyclass(name = "Stats", get_all, frozen)]
#[derive(Clone)]
pub struct PyStats {
    pub predictor: String,
    pub storage_bits: usize,
    pub branches: u64,
    pub incorrect: u64,
}

impl From<SimStats> for PyStats {
    fn from(s: SimStats) -> Self {
        Self {
            predictor: s.predictor,
            storage_bits: s.storage_bits,
            branches: s.branches,
            incorrect: s.incorrect,
        }
    }
}

impl PyStats {
    fn to_sim_stats(&self) -> SimStats {
        SimStats {
            predictor: self.predictor.clone(),
            storage_bits: self.storage_bits,
            branches: self.branches,
            incorrect: self.incorrect,
        }
    }
}

#[pymethods]
impl PyStats {
    /// Mispredicted branches as a percentage.
    fn misprediction_rate(&self) -> f64 {
        self.to_sim_stats().misprediction_rate()
    }

    fn accuracy(&self) -> f64 {
        self.to_sim_stats().accuracy()
    }

    /// Serializes the statistics to a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.to_sim_stats())
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Stats({}: {} branches, {} incorrect, {:.3}%)",
            self.predictor,
            self.branches,
            self.incorrect,
            self.misprediction_rate()
        )
    }
}
