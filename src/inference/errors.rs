//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the central error type used by
//! standard-error computation and forecast interval construction. It groups
//! together domain-specific failures: shape mismatches, non-finite Jacobians,
//! invalid confidence levels and distribution construction failures. An alias `InferenceResult<T>` standardizes the return type
//! across inference code.

/// Unified error type for inference routines.
///
/// Covers covariance input problems and interval configuration errors, with
/// readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Covariance ----
    /// The Jacobian has no parameter columns.
    EmptyJacobian,

    /// The Jacobian row count does not match the number of observations.
    ObservationMismatch {
        expected: usize,
        found: usize,
    },

    /// The residual sum of squares is negative or non-finite.
    InvalidSse {
        sse: f64,
    },

    /// The Jacobian contains NaN/±inf entries.
    NonFiniteJacobian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Intervals ----
    /// Confidence level outside the open interval (0, 1).
    InvalidConfidence {
        confidence: f64,
    },

    /// Failure to construct a reference distribution.
    DistributionError {
        text: String,
    },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Covariance ----
            InferenceError::EmptyJacobian => {
                write!(f, "Inference Error: Jacobian has no parameter columns")
            }
            InferenceError::ObservationMismatch { expected, found } => write!(
                f,
                "Inference Error: Jacobian has {} rows but {} observations were given",
                found, expected
            ),
            InferenceError::InvalidSse { sse } => {
                write!(f, "Inference Error: Invalid residual sum of squares ({})", sse)
            }
            InferenceError::NonFiniteJacobian { row, col, value } => write!(
                f,
                "Inference Error: Jacobian entry ({}, {}) is non-finite: {}",
                row, col, value
            ),

            // ---- Intervals ----
            InferenceError::InvalidConfidence { confidence } => write!(
                f,
                "Inference Error: Confidence must lie strictly between 0 and 1 (got {})",
                confidence
            ),
            InferenceError::DistributionError { text } => {
                write!(f, "Inference Error: Distribution error: {}", text)
            }
        }
    }
}
