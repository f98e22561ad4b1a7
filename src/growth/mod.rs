//! growth — logistic growth fitting and banded forecasting.
//!
//! Purpose
//! -------
//! Fit a logistic (sigmoid) curve `L / (1 + exp(-k (x - x0)))` to historical
//! `(index, value)` pairs, extrapolate it over a horizon, and attach a
//! symmetric band derived from the in-sample residual scale.
//!
//! Key behaviors
//! -------------
//! - Validate caller inputs ([`GrowthData`], [`SigmoidParams`],
//!   [`ForecastOptions`]) before any numeric work.
//! - Fit `(L, k, x0)` by Levenberg–Marquardt with an analytic Jacobian
//!   ([`SigmoidModel`]); non-convergence is an error, never a silent
//!   degenerate fit.
//! - Evaluate the fitted curve on the grid `1..=floor(max x) + days_ahead`
//!   and offset it by `±z·σ`, where `σ` is the residual RMS and `z` the
//!   two-sided normal quantile ([`SigmoidFit::forecast`]).
//! - Offer a one-call entry point, [`forecast`], plus
//!   [`forecast_with_defaults`] (`days_ahead = 90`, `confidence = 0.95`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All four output sequences have equal length and
//!   `lower ≤ forecast ≤ upper` element-wise.
//! - Logistic arguments are clamped to `±LOGISTIC_ARG_LIMIT`; the number of
//!   clamped grid points is reported rather than treated as an error.
//! - Calls are pure and independent; nothing is cached between calls.
//!
//! Conventions
//! -----------
//! - The forecast grid starts at 1 and overlaps the observed history.
//! - The band is flat: the same half-width at every grid point.
//! - `σ` uses the population divisor `n`.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use [`forecast`] or the model types directly.
//! - The Python bridge in the crate root wraps [`forecast`] as
//!   `forecast_growth` and maps [`GrowthError`] into Python exceptions.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each submodule; `tests/` holds end-to-end
//!   scenarios (parameter recovery, noisy data, band monotonicity in the
//!   confidence level, overflow).

pub mod core;
pub mod errors;
pub mod forecaster;
pub mod models;

pub use self::core::{
    DEFAULT_CONFIDENCE, DEFAULT_DAYS_AHEAD, ForecastOptions, ForecastResult, GrowthData,
    SigmoidParams, future_indices,
};
pub use self::errors::{FittingError, GrowthError, GrowthResult, InputError};
pub use self::forecaster::{forecast, forecast_with_defaults};
pub use self::models::{SigmoidFit, SigmoidModel, sigmoid, sigmoid_array};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use growth_forecaster::growth::prelude::*;
//
// to import the main forecasting surface in a single line.

pub mod prelude {
    pub use super::core::{ForecastOptions, ForecastResult, GrowthData, SigmoidParams};
    pub use super::errors::{FittingError, GrowthError, GrowthResult, InputError};
    pub use super::forecaster::{forecast, forecast_with_defaults};
    pub use super::models::{SigmoidFit, SigmoidModel};
}
