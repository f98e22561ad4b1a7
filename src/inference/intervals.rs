//! inference::intervals — residual scale and normal quantiles for bands.
//!
//! Purpose
//! -------
//! Supply the two scalars a residual-based forecast band needs: the
//! in-sample residual scale `σ` and the two-sided standard-normal quantile
//! `z` for a given confidence level.
//!
//! Conventions
//! -----------
//! - `σ` uses the population divisor `n` (not `n − p`).
//! - `z = Φ⁻¹((1 + confidence) / 2)`, so `confidence = 0.95` gives
//!   `z ≈ 1.959964`.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::ArrayView1;
use statrs::distribution::{ContinuousCDF, Normal};

/// Root-mean-square of the residuals, `sqrt(Σ rᵢ² / n)`.
///
/// Returns `0.0` for an empty slice.
pub fn residual_sigma(residuals: ArrayView1<f64>) -> f64 {
    let n = residuals.len();
    if n == 0 {
        return 0.0;
    }
    (residuals.dot(&residuals) / n as f64).sqrt()
}

/// two_sided_z — standard-normal quantile for a two-sided interval.
///
/// Parameters
/// ----------
/// - `confidence`: `f64`
///   Coverage level; must lie strictly between 0 and 1.
///
/// Returns
/// -------
/// `InferenceResult<f64>`
///   `Φ⁻¹((1 + confidence) / 2)`, strictly positive.
///
/// Errors
/// ------
/// - `InferenceError::InvalidConfidence` for `NaN` or values outside (0, 1).
/// - `InferenceError::DistributionError` if the reference distribution
///   cannot be constructed.
pub fn two_sided_z(confidence: f64) -> InferenceResult<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(InferenceError::InvalidConfidence { confidence });
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| InferenceError::DistributionError { text: e.to_string() })?;
    Ok(normal.inverse_cdf((1.0 + confidence) / 2.0))
}
