//! Errors for sigmoid growth forecasting (input validation and fitting failures).
//!
//! This module defines an input error type, [`InputError`], a fitting error
//! type, [`FittingError`], and the umbrella [`GrowthError`] returned by the
//! public forecasting API. All implement `Display`/`Error`; with the
//! `python-bindings` feature they convert to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Input errors are detected before any numeric work and map to Python
//!   `ValueError`.
//! - Fitting errors come from the optimizer or post-fit inference and map
//!   to Python `RuntimeError`. Optimizer/backend errors are normalized to
//!   [`FittingError::Solver`] with a human-readable message.
use crate::{inference::errors::InferenceError, optimization::errors::OptError};
#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyRuntimeError, PyValueError},
};

/// Result alias for the public growth API.
pub type GrowthResult<T> = Result<T, GrowthError>;

/// Malformed shapes, non-finite values, or out-of-range configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    // ---- Series validation ----
    /// `x` and `y` have different lengths.
    LengthMismatch { x_len: usize, y_len: usize },

    /// An index in `x` is NaN/±inf.
    NonFiniteIndex { index: usize, value: f64 },

    /// An observation in `y` is NaN/±inf.
    NonFiniteValue { index: usize, value: f64 },

    // ---- Initial guess ----
    /// A component of the initial guess is NaN/±inf.
    NonFiniteGuess { name: &'static str, value: f64 },

    // ---- Forecast configuration ----
    /// `days_ahead` must be a positive integer.
    InvalidDaysAhead { days_ahead: i64 },

    /// `confidence` must lie strictly between 0 and 1.
    InvalidConfidence { confidence: f64 },

    /// The index range `1..=floor(last_index) + days_ahead` is empty.
    EmptyHorizon { last_index: f64, days_ahead: usize },

    /// The forecast grid would exceed the supported number of points.
    HorizonTooLong { points: f64, max: usize },
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Series validation ----
            InputError::LengthMismatch { x_len, y_len } => {
                write!(f, "X and y must have the same length; got {x_len} and {y_len}.")
            }
            InputError::NonFiniteIndex { index, value } => {
                write!(f, "Index at position {index} is non-finite: {value}")
            }
            InputError::NonFiniteValue { index, value } => {
                write!(f, "Observation at position {index} is non-finite: {value}")
            }
            // ---- Initial guess ----
            InputError::NonFiniteGuess { name, value } => {
                write!(f, "Initial guess for {name} must be finite; got {value}")
            }
            // ---- Forecast configuration ----
            InputError::InvalidDaysAhead { days_ahead } => {
                write!(f, "days_ahead must be a positive integer; got {days_ahead}")
            }
            InputError::InvalidConfidence { confidence } => {
                write!(f, "confidence must lie strictly between 0 and 1; got {confidence}")
            }
            InputError::EmptyHorizon { last_index, days_ahead } => write!(
                f,
                "Forecast horizon is empty: last index {last_index} plus {days_ahead} days is below 1."
            ),
            InputError::HorizonTooLong { points, max } => {
                write!(f, "Forecast horizon of {points} points exceeds the maximum of {max}.")
            }
        }
    }
}

/// Failures of the fit itself: too little data, non-convergence, or
/// numerical breakdown.
#[derive(Debug, Clone, PartialEq)]
pub enum FittingError {
    // ---- Data sufficiency ----
    /// Fewer observations than required to fit three parameters.
    InsufficientData { len: usize, required: usize },

    // ---- Estimation / optimizer ----
    /// The optimizer stopped without converging; carries the last estimate.
    NotConverged { theta: Vec<f64>, iterations: usize, status: String },

    /// A fitted parameter is NaN/±inf.
    NonFiniteParams { index: usize, value: f64 },

    /// `JᵀJ` at the reported optimum is numerically rank-deficient, so the
    /// parameters are not identified by the data.
    Singular { theta: Vec<f64>, iterations: usize },

    /// Optimizer or model evaluation failure.
    Solver { text: String },

    // ---- Post-fit inference ----
    /// Standard errors or interval quantities could not be computed.
    Inference { text: String },
}

impl std::error::Error for FittingError {}

impl std::fmt::Display for FittingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Data sufficiency ----
            FittingError::InsufficientData { len, required } => write!(
                f,
                "At least {required} observations are required to fit the sigmoid; got {len}."
            ),
            // ---- Estimation / optimizer ----
            FittingError::NotConverged { theta, iterations, status } => write!(
                f,
                "Fit did not converge after {iterations} iterations ({status}); last estimate: {theta:?}"
            ),
            FittingError::NonFiniteParams { index, value } => {
                write!(f, "Fitted parameter at position {index} is non-finite: {value}")
            }
            FittingError::Singular { theta, iterations } => write!(
                f,
                "Fit is singular after {iterations} iterations: the Jacobian is rank-deficient at {theta:?}"
            ),
            FittingError::Solver { text } => write!(f, "Optimizer failed: {text}"),
            // ---- Post-fit inference ----
            FittingError::Inference { text } => write!(f, "Post-fit inference failed: {text}"),
        }
    }
}

impl From<OptError> for FittingError {
    fn from(err: OptError) -> FittingError {
        FittingError::Solver { text: err.to_string() }
    }
}

impl From<InferenceError> for FittingError {
    fn from(err: InferenceError) -> FittingError {
        FittingError::Inference { text: err.to_string() }
    }
}

/// Umbrella error returned by the public growth API.
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthError {
    Input(InputError),
    Fitting(FittingError),
}

impl std::error::Error for GrowthError {}

impl std::fmt::Display for GrowthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthError::Input(err) => write!(f, "Input error: {err}"),
            GrowthError::Fitting(err) => write!(f, "Fitting error: {err}"),
        }
    }
}

impl From<InputError> for GrowthError {
    fn from(err: InputError) -> GrowthError {
        GrowthError::Input(err)
    }
}

impl From<FittingError> for GrowthError {
    fn from(err: FittingError) -> GrowthError {
        GrowthError::Fitting(err)
    }
}

impl From<OptError> for GrowthError {
    fn from(err: OptError) -> GrowthError {
        GrowthError::Fitting(err.into())
    }
}

impl From<InferenceError> for GrowthError {
    fn from(err: InferenceError) -> GrowthError {
        GrowthError::Fitting(err.into())
    }
}

/// Convert a [`GrowthError`] into a Python exception.
///
/// Input errors become `ValueError`; fitting errors become `RuntimeError`.
#[cfg(feature = "python-bindings")]
impl std::convert::From<GrowthError> for PyErr {
    fn from(err: GrowthError) -> PyErr {
        match err {
            GrowthError::Input(e) => PyValueError::new_err(e.to_string()),
            GrowthError::Fitting(e) => PyRuntimeError::new_err(e.to_string()),
        }
    }
}
