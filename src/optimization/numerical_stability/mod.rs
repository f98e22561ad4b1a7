//! numerical_stability — overflow-safe transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms and the small tolerances
//! shared by the least-squares engine and the inference layer, so the rest
//! of the crate can assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide a sign-branched logistic (`safe_logistic`) that never
//!   overflows, together with an explicit argument clamp
//!   (`clamp_logistic_arg`) whose activations callers can count.
//! - Centralize tolerances (`LOGISTIC_ARG_LIMIT`, `EIGEN_EPS`) so that the
//!   growth model and covariance routines share one set of guards.
//!
//! Invariants & assumptions
//! ------------------------
//! - Transforms accept any `f64`; `±∞` arguments are clamped, `NaN` is
//!   propagated unchanged.
//! - Clamping is deterministic: identical inputs always produce identical
//!   outputs and identical clamp flags.
//!
//! Conventions
//! -----------
//! - This module never logs, performs I/O or touches global state.
//!
//! Downstream usage
//! ----------------
//! - `growth::models::sigmoid` builds the logistic growth curve on top of
//!   [`safe_logistic`] and counts clamped forecast points with
//!   [`clamp_logistic_arg`].
//! - `inference::covariance` uses [`EIGEN_EPS`] to truncate eigenvalues of
//!   `JᵀJ` when forming pseudo-inverses.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with the naïve
//!   formula on a safe grid, symmetry and saturated tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGISTIC_ARG_LIMIT, clamp_logistic_arg, safe_logistic,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use growth_forecaster::optimization::numerical_stability::prelude::*;
//
// to import the numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, LOGISTIC_ARG_LIMIT, clamp_logistic_arg, safe_logistic,
    };
}
