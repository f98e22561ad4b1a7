//! utils — conversion helpers for the Python bridge.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns Python objects into the owned Rust inputs expected by
//! [`crate::growth`].
#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

/// Accept a 1-D `numpy.ndarray`, a `pandas.Series`, or any float sequence
/// and return a contiguous read-only `float64` view.
///
/// Arrays that are already contiguous `float64` are borrowed without a copy;
/// everything else is copied once.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy an array-like argument into an owned `Vec<f64>`, naming the
/// argument in the error when the buffer is not contiguous.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Extract the `(L, k, x0)` initial guess from any length-3 sequence.
#[cfg(feature = "python-bindings")]
pub fn extract_initial_guess(raw_guess: &Bound<'_, PyAny>) -> PyResult<(f64, f64, f64)> {
    if let Ok(tuple) = raw_guess.extract::<(f64, f64, f64)>() {
        return Ok(tuple);
    }
    let values: Vec<f64> = raw_guess.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err("initial_guess must be a sequence of three floats")
    })?;
    match values.as_slice() {
        [l, k, x0] => Ok((*l, *k, *x0)),
        other => Err(PyValueError::new_err(format!(
            "initial_guess must have exactly 3 elements (L, k, x0), got {}",
            other.len()
        ))),
    }
}
