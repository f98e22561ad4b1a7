//! Validation helpers for growth-forecast inputs.
//!
//! Purpose
//! -------
//! Centralize the checks applied at the public boundary of the growth
//! forecaster so that fitting and forecasting code can assume clean inputs:
//! aligned finite series of sufficient length, finite initial guesses, a
//! positive horizon, a confidence level in (0, 1), and a bounded forecast
//! grid.
//!
//! Conventions
//! -----------
//! - Each helper returns the first violation found, with a 0-based index
//!   where one applies.
//! - Input problems are reported as [`InputError`]; too few observations is
//!   reported as [`FittingError::InsufficientData`].
use crate::growth::errors::{FittingError, GrowthResult, InputError};
use ndarray::ArrayView1;

/// Minimum number of observations needed to fit `(L, k, x0)`.
pub const MIN_OBSERVATIONS: usize = 3;

/// Upper bound on the number of forecast grid points.
pub const MAX_FORECAST_POINTS: usize = 10_000_000;

/// Validate an observation series.
///
/// Checks, in order: equal lengths, finite indices, finite values, and at
/// least [`MIN_OBSERVATIONS`] points.
///
/// # Errors
/// - `InputError::LengthMismatch` if `x.len() != y.len()`.
/// - `InputError::NonFiniteIndex` / `InputError::NonFiniteValue` for the
///   first NaN/±inf entry.
/// - `FittingError::InsufficientData` if fewer than three points remain.
pub fn validate_series(x: ArrayView1<f64>, y: ArrayView1<f64>) -> GrowthResult<()> {
    if x.len() != y.len() {
        return Err(InputError::LengthMismatch { x_len: x.len(), y_len: y.len() }.into());
    }
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(InputError::NonFiniteIndex { index, value }.into());
        }
    }
    for (index, &value) in y.iter().enumerate() {
        if !value.is_finite() {
            return Err(InputError::NonFiniteValue { index, value }.into());
        }
    }
    if x.len() < MIN_OBSERVATIONS {
        return Err(
            FittingError::InsufficientData { len: x.len(), required: MIN_OBSERVATIONS }.into()
        );
    }
    Ok(())
}

/// Validate one named component of an initial guess.
///
/// # Errors
/// `InputError::NonFiniteGuess` if `value` is NaN/±inf.
pub fn validate_guess_component(name: &'static str, value: f64) -> GrowthResult<()> {
    if !value.is_finite() {
        return Err(InputError::NonFiniteGuess { name, value }.into());
    }
    Ok(())
}

/// Validate the forecast horizon.
///
/// # Errors
/// `InputError::InvalidDaysAhead` if `days_ahead == 0`.
pub fn validate_days_ahead(days_ahead: usize) -> GrowthResult<()> {
    if days_ahead == 0 {
        return Err(InputError::InvalidDaysAhead { days_ahead: 0 }.into());
    }
    Ok(())
}

/// Convert a signed horizon (as received from Python) into `usize`.
///
/// # Errors
/// `InputError::InvalidDaysAhead` if `days_ahead ≤ 0`.
pub fn days_ahead_from_signed(days_ahead: i64) -> GrowthResult<usize> {
    if days_ahead <= 0 {
        return Err(InputError::InvalidDaysAhead { days_ahead }.into());
    }
    usize::try_from(days_ahead).map_err(|_| InputError::InvalidDaysAhead { days_ahead }.into())
}

/// Validate a two-sided confidence level.
///
/// # Errors
/// `InputError::InvalidConfidence` for NaN or values outside (0, 1).
pub fn validate_confidence(confidence: f64) -> GrowthResult<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(InputError::InvalidConfidence { confidence }.into());
    }
    Ok(())
}

/// Validate the forecast grid `1..=floor(last_index) + days_ahead` and
/// return its length.
///
/// # Errors
/// - `InputError::EmptyHorizon` if the upper end is below 1 or not finite.
/// - `InputError::HorizonTooLong` if the grid exceeds
///   [`MAX_FORECAST_POINTS`].
pub fn validate_horizon(last_index: f64, days_ahead: usize) -> GrowthResult<usize> {
    let upper = last_index.floor() + days_ahead as f64;
    if !upper.is_finite() || upper < 1.0 {
        return Err(InputError::EmptyHorizon { last_index, days_ahead }.into());
    }
    if upper > MAX_FORECAST_POINTS as f64 {
        return Err(InputError::HorizonTooLong { points: upper, max: MAX_FORECAST_POINTS }.into());
    }
    Ok(upper as usize)
}
