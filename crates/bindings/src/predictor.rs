//! Predictor Python binding.
//!
//! Exposes a configured predictor to Python for step-by-step use, and a
//! `simulate` helper that replays a whole trace file.

use crate::stats::PyStats;
use bpsim::config::PredictorConfig;
use bpsim::trace::TraceReader;
use bpsim::{BranchPredictor, Outcome, bp, sim};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use std::fs::File;
use std::io::BufReader;

fn build(spec: &str) -> PyResult<Box<dyn BranchPredictor>> {
    let config: PredictorConfig = spec
        .parse()
        .map_err(|e: bpsim::ConfigError| PyValueError::new_err(e.to_string()))?;
    bp::build(&config).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Python-exposed predictor: wraps one configured `BranchPredictor`.
#[pyclass(name = "Predictor", unsendable)]
pub struct PyPredictor {
    pub inner: Box<dyn BranchPredictor>,
}

#[pymethods]
impl PyPredictor {
    /// Creates a predictor from a spec string such as `"gshare:13"`.
    ///
    /// # Errors
    /// Returns a `ValueError` if the spec is malformed or a width is out of range.
    #[new]
    fn new(spec: &str) -> PyResult<Self> {
        Ok(PyPredictor {
            inner: build(spec)?,
        })
    }

    /// Returns `True` if the branch at `pc` is predicted taken.
    fn predict(&mut self, pc: u32) -> bool {
        self.inner.predict(pc).is_taken()
    }

    /// Trains the predictor with the resolved direction of the branch at `pc`.
    fn train(&mut self, pc: u32, taken: bool) {
        self.inner.train(pc, Outcome::from(taken));
    }

    #[getter]
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    #[getter]
    fn storage_bits(&self) -> usize {
        self.inner.storage_bits()
    }

    fn __repr__(&self) -> String {
        format!("Predictor({}, {} bits)", self.inner.name(), self.inner.storage_bits())
    }
}

/// Replays the trace at `trace_path` through a fresh predictor built from `spec`.
///
/// # Errors
/// Returns a `ValueError` for a bad spec or a malformed trace line, and an
/// `IOError` if the trace cannot be read.
#[pyfunction]
pub fn simulate(spec: &str, trace_path: &str) -> PyResult<PyStats> {
    let mut predictor = build(spec)?;
    let file = File::open(trace_path)
        .map_err(|e| PyIOError::new_err(format!("{}: {}", trace_path, e)))?;

    let stats = sim::run(
        predictor.as_mut(),
        TraceReader::new(BufReader::new(file)),
        |_, _| {},
    )
    .map_err(|e| match e {
        bpsim::TraceError::Io(io) => PyIOError::new_err(io.to_string()),
        other => PyValueError::new_err(other.to_string()),
    })?;

    Ok(PyStats::from(stats))
}
