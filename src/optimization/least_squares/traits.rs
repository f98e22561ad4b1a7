//! Public API surface for nonlinear least squares.
//!
//! - [`ResidualModel`]: trait users implement for their model.
//! - [`LsqOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`FitOutcome`]: normalized result returned by the high-level `minimize_sse` API.
//!
//! Convention: residuals are `r(θ) = f(θ) − y`. If an analytic Jacobian is
//! provided it must be `∂r/∂θ` (equivalently `∂f/∂θ`) with one row per
//! observation.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        types::{
            Cost, DEFAULT_DAMPING, DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_ITER, DEFAULT_REL_TOL,
            FnEvalMap, Grad, Jacobian, Residuals, Theta,
        },
        validation::{
            TolKind, validate_theta_hat, validate_value, verify_damping, verify_damping_factor,
            verify_tol,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::time::Duration;

/// User-implemented residual model interface.
///
/// The optimizer minimizes `S(θ) = Σᵢ rᵢ(θ)²`.
///
/// - `type Data`: per-model data carried into `residuals`/`jacobian`/`check`.
///
/// Required:
/// - `n_obs(&Data) -> usize`: number of residuals the model produces.
/// - `residuals(&Theta, &Data) -> OptResult<Residuals>`: evaluate `r(θ)`.
///   Non-finite entries are reported by the adapter as
///   `OptError::NonFiniteResidual`.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `jacobian(&Theta, &Data) -> OptResult<Jacobian>`: analytic `∂r/∂θ`.
///   If not implemented, finite differences are used automatically.
pub trait ResidualModel {
    type Data: 'static;

    // Required methods
    fn n_obs(&self, data: &Self::Data) -> usize;
    fn residuals(&self, theta: &Theta, data: &Self::Data) -> OptResult<Residuals>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn jacobian(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Jacobian> {
        Err(OptError::JacobianNotImplemented)
    }
}

/// Convergence tolerances and the iteration budget.
///
/// - `tol_cost`: converge when an accepted step reduces the cost by a
///   relative amount `(S_old − S_new) / S_old ≤ tol_cost`.
/// - `tol_step`: converge when `‖δ‖ ≤ tol_step · (‖θ‖ + tol_step)`.
/// - `tol_grad`: converge when `‖Jᵀr‖∞ ≤ tol_grad`.
/// - `max_iter`: hard cap on the number of iterations.
///
/// At least one of the three tolerances must be provided (see
/// [`Tolerances::new`]); reaching `max_iter` is never reported as
/// convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_cost: Option<f64>,
    pub tol_step: Option<f64>,
    pub tol_grad: Option<f64>,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_cost`, `tol_step`, or `tol_grad` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three tolerances are `None`.
    /// - [`OptError::InvalidTolCost`] / [`OptError::InvalidTolStep`] /
    ///   [`OptError::InvalidTolGrad`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_cost: Option<f64>, tol_step: Option<f64>, tol_grad: Option<f64>, max_iter: usize,
    ) -> OptResult<Self> {
        if tol_cost.is_none() && tol_step.is_none() && tol_grad.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol(tol_cost, TolKind::Cost)?;
        verify_tol(tol_step, TolKind::Step)?;
        verify_tol(tol_grad, TolKind::Grad)?;
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_cost, tol_step, tol_grad, max_iter })
    }
}

impl Default for Tolerances {
    /// `tol_cost = tol_step = √ε`, no gradient tolerance, 800 iterations.
    fn default() -> Self {
        Self {
            tol_cost: Some(DEFAULT_REL_TOL),
            tol_step: Some(DEFAULT_REL_TOL),
            tol_grad: None,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — convergence tolerances and iteration budget.
/// - `damping: f64` — initial Levenberg–Marquardt damping `λ₀`.
/// - `damping_factor: f64` — factor by which `λ` grows after a rejected
///   step and shrinks after an accepted one.
/// - `timeout: Option<Duration>` — optional wall-clock budget.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: [`Tolerances::default`]
/// - `damping`: `1e-3`, `damping_factor`: `10`
/// - `timeout`: `None`, `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct LsqOptions {
    pub tols: Tolerances,
    pub damping: f64,
    pub damping_factor: f64,
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl LsqOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidDamping`] if `damping` is non-finite or ≤ 0.
    /// - [`OptError::InvalidDampingFactor`] if `damping_factor` is non-finite or ≤ 1.
    pub fn new(
        tols: Tolerances, damping: f64, damping_factor: f64, timeout: Option<Duration>,
        verbose: bool,
    ) -> OptResult<Self> {
        verify_damping(damping)?;
        verify_damping_factor(damping_factor)?;
        Ok(Self { tols, damping, damping_factor, timeout, verbose })
    }
}

impl Default for LsqOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            damping: DEFAULT_DAMPING,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            timeout: None,
            verbose: false,
        }
    }
}

/// Canonical result returned by `minimize_sse`.
///
/// - `theta_hat`: best parameter vector found.
/// - `cost`: sum of squared residuals at `theta_hat`.
/// - `converged`: `true` only if the solver reported its own convergence
///   (or a target cost was reached). Budget exhaustion, timeouts, and
///   solver exits are *not* convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: L2 norm of the last available `Jᵀr`, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub theta_hat: Theta,
    pub cost: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl FitOutcome {
    /// Build a validated [`FitOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `cost` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `cost`.
    pub fn new(
        theta_hat_opt: Option<Theta>, cost: Cost, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(cost)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, cost, converged, status, iterations, fn_evals, grad_norm })
    }
}
