//! least_squares::types — shared numeric aliases and solver defaults.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and default constants used by the
//! least-squares engine. By defining these in one place, the rest of the
//! optimization code can stay agnostic to `ndarray` and Argmin generics
//! and can more easily evolve if the backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, residual vectors,
//!   Jacobians, gradients and scalar costs (`Theta`, `Residuals`,
//!   `Jacobian`, `Grad`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`) and the concrete Argmin state type (`LsqState`).
//! - Collect the default damping and tolerance constants.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors and matrices are represented as `ndarray`
//!   containers over `f64`.
//! - `Jacobian` has shape `(n_obs, n_params)`: row `i` is `∇rᵢ(θ)`.
//! - `Cost` is the plain sum of squared residuals (no ½ factor).
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases and constants; correctness is
//!   exercised indirectly by the solver and adapter tests.
use argmin::core::IterState;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` for least-squares optimization.
pub type Theta = Array1<f64>;

/// Residual vector `r(θ) = f(θ) − y`, one entry per observation.
pub type Residuals = Array1<f64>;

/// Residual Jacobian `∂r/∂θ` with shape `(n_obs, n_params)`.
pub type Jacobian = Array2<f64>;

/// Half-gradient of the cost, `Jᵀ r`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value `S(θ) = Σᵢ rᵢ(θ)²`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"operator_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Argmin iteration state used by the Levenberg–Marquardt solver.
pub type LsqState = IterState<Theta, Grad, (), (), (), Cost>;

/// Default initial damping `λ₀` for Levenberg–Marquardt.
pub const DEFAULT_DAMPING: f64 = 1e-3;

/// Default multiplicative factor used to raise/lower `λ`.
pub const DEFAULT_DAMPING_FACTOR: f64 = 10.0;

/// Damping above which the solver gives up on finding a descent step.
pub const MAX_DAMPING: f64 = 1e16;

/// Lower bound on `λ` after successful steps.
pub const MIN_DAMPING: f64 = 1e-15;

/// Floor applied to the Marquardt scaling diagonal `diag(JᵀJ)`.
pub const DIAG_FLOOR: f64 = 1e-12;

/// Default relative tolerance (√ε) for cost reduction and step size.
pub const DEFAULT_REL_TOL: f64 = 1.490_116_119_384_765_6e-8;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 800;
