//! growth_forecaster — logistic growth fitting and forecasting with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the sigmoid fit-and-forecast routine to Python via the `_growth_forecaster`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`growth`, `inference`, `optimization`)
//!   as the public crate surface.
//! - Define the `forecast_growth` `#[pyfunction]` and the `#[pymodule]`
//!   initializer when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue and error mapping.
//! - Input errors surface in Python as `ValueError`, fitting failures as
//!   `RuntimeError`.
//!
//! Conventions
//! -----------
//! - Python callers receive four 1-D `float64` arrays
//!   `(future_indices, forecast, upper_bound, lower_bound)` of equal length.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should call [`growth::forecast`] directly and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the end-to-end scenarios under `tests/`.

pub mod growth;
pub mod inference;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    growth::{
        core::{options::ForecastOptions, validation::days_ahead_from_signed},
        forecaster::forecast,
    },
    optimization::least_squares::LsqOptions,
    utils::{extract_f64_vec, extract_initial_guess},
};

/// Four aligned NumPy arrays returned to Python.
#[cfg(feature = "python-bindings")]
type PyForecast<'py> = (
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
);

/// Fit a logistic growth curve and forecast it with a confidence band.
///
/// Parameters
/// ----------
/// Called from Python as
/// `forecast_growth(x, y, initial_guess, days_ahead=90, confidence=0.95)`:
/// - `x`, `y`: array-likes of `float64` with equal length ≥ 3 and no
///   non-finite values.
/// - `initial_guess`: `(L, k, x0)` starting point.
/// - `days_ahead`: positive integer horizon beyond `floor(max(x))`.
/// - `confidence`: level strictly between 0 and 1.
///
/// Returns
/// -------
/// `(future_indices, forecast, upper_bound, lower_bound)` as 1-D arrays.
///
/// Errors
/// ------
/// - `ValueError` for invalid inputs.
/// - `RuntimeError` when the fit does not converge or is numerically unusable.
///
/// Notes
/// -----
/// - The GIL is released while fitting.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    text_signature = "(x, y, initial_guess, /, days_ahead=90, confidence=0.95)",
    signature = (x, y, initial_guess, days_ahead = 90, confidence = 0.95)
)]
pub fn forecast_growth<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
    initial_guess: &Bound<'py, PyAny>, days_ahead: i64, confidence: f64,
) -> PyResult<PyForecast<'py>> {
    let x_vec = extract_f64_vec(py, x, "x")?;
    let y_vec = extract_f64_vec(py, y, "y")?;
    let guess = extract_initial_guess(initial_guess)?;
    let days_ahead = days_ahead_from_signed(days_ahead)?;

    let opts = ForecastOptions { days_ahead, confidence, lsq_opts: LsqOptions::default() };
    let result = py.allow_threads(|| forecast(&x_vec, &y_vec, guess, &opts))?;

    let (indices, point, upper, lower) = result.into_sequences();
    Ok((
        indices.into_pyarray(py),
        point.into_pyarray(py),
        upper.into_pyarray(py),
        lower.into_pyarray(py),
    ))
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _growth_forecaster<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let forecasting_mod = PyModule::new(_py, "forecasting")?;
    forecasting(_py, m, &forecasting_mod)?;
    m.add_function(wrap_pyfunction!(forecast_growth, m)?)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("growth_forecaster.forecasting", forecasting_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn forecasting<'py>(
    _py: Python, growth_forecaster: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(forecast_growth, m)?)?;
    growth_forecaster.add_submodule(m)?;
    Ok(())
}
