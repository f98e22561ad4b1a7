//! least_squares — argmin-powered nonlinear least-squares engine.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed layer for **minimizing sums of
//! squared residuals** `S(θ) = Σᵢ rᵢ(θ)²`. Callers implement a single trait,
//! [`ResidualModel`], and invoke [`minimize_sse`] to run Levenberg–Marquardt
//! with configurable damping, tolerances, budgets, and finite-difference
//! Jacobian fallbacks.
//!
//! Key behaviors
//! -------------
//! - Expose residuals, cost, and Jacobian to Argmin via
//!   [`adapter::LsqAdapter`].
//! - Expose a single, user-facing entrypoint [`minimize_sse`] that:
//!   - validates the initial guess with [`ResidualModel::check`],
//!   - builds a [`solver::LevenbergMarquardt`] solver,
//!   - executes it via [`run::run_least_squares`], and
//!   - normalizes results into a [`FitOutcome`].
//! - Provide finite-difference Jacobians in [`finite_diff`] when analytic
//!   derivatives are missing, with error capture and validation.
//! - Centralize configuration ([`Tolerances`], [`LsqOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Residuals are `r(θ) = f(θ) − y`; the Jacobian has one row per
//!   observation and one column per parameter.
//! - [`ResidualModel::residuals`] and [`ResidualModel::jacobian`] report
//!   invalid inputs as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Configuration types are validated on construction and re-checked when
//!   the solver is built.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained space as [`Theta`]
//!   (`Array1<f64>`).
//! - [`FitOutcome::cost`] is the plain sum of squares at `θ̂`.
//! - Reaching `max_iter`, a timeout, or the damping ceiling returns
//!   `Ok(FitOutcome { converged: false, .. })`; callers decide whether that
//!   is an error.
//!
//! Downstream usage
//! ----------------
//! - Model code implements [`ResidualModel`] and calls [`minimize_sse`]
//!   with a model instance, initial [`Theta`], data payload, and
//!   [`LsqOptions`].
//! - Front-ends interact with the re-exported surface:
//!   [`minimize_sse`], [`ResidualModel`], [`LsqOptions`], [`Tolerances`],
//!   [`FitOutcome`], plus numeric aliases from [`types`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - residual/cost/Jacobian wiring in [`adapter`],
//!   - damping updates and termination in [`solver`],
//!   - finite-difference behavior in [`finite_diff`] and checks in
//!     [`validation`],
//!   - configuration and outcome invariants in [`traits`],
//!   - end-to-end fits of toy models in [`api`].

pub mod adapter;
pub mod api;
pub mod finite_diff;
pub mod run;
pub mod solver;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize_sse;
pub use self::traits::{FitOutcome, LsqOptions, ResidualModel, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Jacobian, Residuals, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use growth_forecaster::optimization::least_squares::prelude::*;
//
// to import the main least-squares surface in a single line.

pub mod prelude {
    pub use super::api::minimize_sse;
    pub use super::traits::{FitOutcome, LsqOptions, ResidualModel, Tolerances};
    pub use super::types::{Jacobian, Residuals, Theta};
}
