//! optimization — least-squares engine, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for curve fitting, combining an
//! Argmin-driven Levenberg–Marquardt least-squares engine, numerically
//! stable transforms, and a single error/result surface. Callers implement
//! a residual model, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing sums of squared residuals**
//!   `S(θ) = Σᵢ rᵢ(θ)²` (`least_squares`), including configuration of
//!   damping, stopping criteria, iteration and time budgets.
//! - Supply shared numerical primitives (`numerical_stability`) for
//!   evaluating the logistic function without overflow.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers operate on an unconstrained parameter vector `θ` and assume
//!   that inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Residual models are expected to return finite residuals for finite
//!   `θ`; a non-finite candidate is treated as a rejected step, any other
//!   model error aborts the run.
//!
//! Conventions
//! -----------
//! - Residuals are `rᵢ(θ) = fᵢ(θ) − yᵢ` (model minus observation) so that
//!   the residual Jacobian equals the model Jacobian.
//! - Parameters, residuals, and Jacobians are represented using `ndarray`-
//!   based aliases (`Theta`, `Residuals`, `Jacobian`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or model-specific error enums.
//! - This module and its submodules avoid I/O and logging; the optional
//!   `obs_slog` feature attaches Argmin's slog observer when requested.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `ResidualModel` for its types and calls
//!   `minimize_sse` with a parameter guess, data payload, and `LsqOptions`
//!   to obtain a `FitOutcome` (via `least_squares`).
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `least_squares`: solver wiring, damping updates, tolerance handling,
//!     finite-difference fallbacks, and convergence on toy problems.
//!   - `numerical_stability`: agreement with naïve formulas on safe grids
//!     and well-behaved tails.
//!   - `errors`: conversions from backend errors into `OptError`.

pub mod errors;
pub mod least_squares;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use growth_forecaster::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::least_squares::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
