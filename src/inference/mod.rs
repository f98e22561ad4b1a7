//! inference — standard errors and forecast-band ingredients for fitted curves.
//!
//! Purpose
//! -------
//! Provide post-estimation uncertainty tools on top of a least-squares fit:
//! classical parameter standard errors from the Jacobian at the optimum,
//! the in-sample residual scale, and normal quantiles for two-sided bands.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for inference-specific failures.
//! - Compute `SE(θ̂)` from `s² (JᵀJ)⁺` via [`standard_errors`].
//! - Compute `σ = sqrt(Σ rᵢ² / n)` via [`residual_sigma`] and
//!   `z = Φ⁻¹((1 + c) / 2)` via [`two_sided_z`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Jacobians have shape `n × p` with rows corresponding to observations.
//! - All routines return [`InferenceError`] on failure rather than
//!   panicking.
//!
//! Conventions
//! -----------
//! - Parameters `θ` are in the optimizer's parameter space; for the growth
//!   model that is `[L, k, x0]` directly.
//! - All functions are pure: no logging, no global state, and no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - The growth model calls [`standard_errors`] after a converged fit and
//!   [`residual_sigma`] / [`two_sided_z`] when building forecast bands.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each routine: closed-form OLS comparisons for
//!   [`standard_errors`] and reference quantiles for [`two_sided_z`].

pub mod covariance;
pub mod errors;
pub mod intervals;

pub use self::covariance::{jacobian_is_singular, standard_errors};
pub use self::errors::{InferenceError, InferenceResult};
pub use self::intervals::{residual_sigma, two_sided_z};
