//! Python bindings for the bpsim predictors.
//!
//! Built as the `_core` extension module.

use pyo3::prelude::*;

pub mod predictor;
pub mod stats;

/// Registers every class and function on `m`.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<predictor::PyPredictor>()?;
    m.add_class::<stats::PyStats>()?;
    m.add_function(wrap_pyfunction!(predictor::simulate, m)?)?;
    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m)
}
