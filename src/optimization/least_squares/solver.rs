//! least_squares::solver — damped Gauss–Newton (Levenberg–Marquardt) for argmin.
//!
//! Purpose
//! -------
//! Implement a Levenberg–Marquardt solver as an `argmin::core::Solver` so
//! that residual-based fits can be driven by Argmin's `Executor` (budgets,
//! observers, timeouts, function counters) like any other solver.
//!
//! Key behaviors
//! -------------
//! - Each iteration solves the damped normal equations
//!   `(JᵀJ + λ·D) δ = −Jᵀr`, where `D = diag(max(diag(JᵀJ), DIAG_FLOOR))`
//!   is Marquardt's scaling.
//! - A step is accepted when the candidate cost is finite and strictly
//!   lower; `λ` then shrinks by `damping_factor` (floored at
//!   [`MIN_DAMPING`]). Otherwise `λ` grows by `damping_factor`.
//! - Candidate points where the model produces non-finite residuals are
//!   treated as rejected steps; any other model error aborts the run.
//! - Convergence (`SolverConverged`) is declared when the relative cost
//!   reduction, the relative step length, or `‖Jᵀr‖∞` drops below its
//!   tolerance, or when the cost reaches exactly zero.
//! - A vanishing Jacobian at the start (no accepted step yet and
//!   `‖Jᵀr‖∞ ≤ ε·√S` with `S > 0`) never counts as convergence; the
//!   damping keeps growing until the damping-exceeded exit.
//! - If `λ` exceeds [`MAX_DAMPING`] the run ends with
//!   `SolverExit("damping exceeded")`, which is *not* convergence.
//!
//! Invariants & assumptions
//! ------------------------
//! - The state parameter always holds the best accepted `θ`, and the state
//!   cost is `S(θ)` at that point.
//! - Residuals and the Jacobian at the current `θ` are cached between
//!   rejected steps; an accepted step invalidates the Jacobian cache.
//! - `max_iters` and timeouts are applied by the executor, not here.
//!
//! Conventions
//! -----------
//! - Linear systems are solved with `nalgebra`: Cholesky first, LU as a
//!   fallback. A singular system counts as a rejected step.
//! - The gradient stored on the state is `Jᵀr` (half the gradient of `S`).
//!
//! Downstream usage
//! ----------------
//! - [`build_levenberg_marquardt`] is called by `minimize_sse` and the
//!   result is handed to `run_least_squares` together with an
//!   `LsqAdapter`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the damped solve against a hand-computed
//!   Gauss–Newton step, builder validation, exact recovery of a linear
//!   model, and the damping-exceeded exit on a problem where every step is
//!   rejected.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        traits::{LsqOptions, Tolerances},
        types::{
            Cost, DIAG_FLOOR, Grad, Jacobian, LsqState, MAX_DAMPING, MIN_DAMPING, Residuals, Theta,
        },
        validation::{verify_damping, verify_damping_factor},
    },
};
use argmin::core::{
    ArgminError, Error, Jacobian as ArgminJacobian, KV, Operator, Problem, Solver,
    TerminationReason, TerminationStatus,
};
use argmin_math::ArgminL2Norm;
use nalgebra::{DMatrix, DVector};

/// Levenberg–Marquardt solver state and configuration.
///
/// Fields are private; construct via [`build_levenberg_marquardt`] or
/// [`LevenbergMarquardt::new`].
#[derive(Debug, Clone)]
pub struct LevenbergMarquardt {
    tols: Tolerances,
    initial_damping: f64,
    damping: f64,
    damping_factor: f64,
    residuals: Option<Residuals>,
    jacobian: Option<Jacobian>,
    accepted_any: bool,
    termination: Option<TerminationReason>,
}

impl LevenbergMarquardt {
    /// Create a solver with validated damping settings.
    ///
    /// # Errors
    /// - [`OptError::InvalidDamping`] if `damping` is non-finite or ≤ 0.
    /// - [`OptError::InvalidDampingFactor`] if `damping_factor` is
    ///   non-finite or ≤ 1.
    pub fn new(tols: Tolerances, damping: f64, damping_factor: f64) -> OptResult<Self> {
        verify_damping(damping)?;
        verify_damping_factor(damping_factor)?;
        Ok(Self {
            tols,
            initial_damping: damping,
            damping,
            damping_factor,
            residuals: None,
            jacobian: None,
            accepted_any: false,
            termination: None,
        })
    }

    /// Current damping `λ`.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    fn converge(&mut self) {
        self.termination = Some(TerminationReason::SolverConverged);
    }

    /// No step has been accepted yet and `‖Jᵀr‖∞ ≤ ε·√S`: the Jacobian has
    /// vanished at the start, so a small gradient or step says nothing
    /// about optimality.
    fn stalled_at_start(&self, gradient: &Grad, cost: Cost) -> bool {
        !self.accepted_any && inf_norm(gradient) <= f64::EPSILON * cost.sqrt()
    }

    fn step_is_small(&self, step: &Theta, theta: &Theta) -> bool {
        self.tols
            .tol_step
            .is_some_and(|tol| step.l2_norm() <= tol * (theta.l2_norm() + tol))
    }
}

/// Build a [`LevenbergMarquardt`] solver from crate-level options.
///
/// The initial parameter vector, `max_iters`, and timeout are applied by
/// the runner, not here.
///
/// # Errors
/// Propagates damping validation errors from [`LevenbergMarquardt::new`];
/// `LsqOptions` fields are public, so values are re-checked here.
pub fn build_levenberg_marquardt(opts: &LsqOptions) -> OptResult<LevenbergMarquardt> {
    LevenbergMarquardt::new(opts.tols, opts.damping, opts.damping_factor)
}

impl<O> Solver<O, LsqState> for LevenbergMarquardt
where
    O: Operator<Param = Theta, Output = Residuals>
        + ArgminJacobian<Param = Theta, Jacobian = Jacobian>,
{
    const NAME: &'static str = "Levenberg-Marquardt";

    fn init(
        &mut self, problem: &mut Problem<O>, mut state: LsqState,
    ) -> Result<(LsqState, Option<KV>), Error> {
        let theta = state.take_param().ok_or_else(not_initialized)?;
        let residuals = problem.apply(&theta)?;
        let cost = residuals.dot(&residuals);
        if !cost.is_finite() {
            return Err(OptError::NonFiniteCost { value: cost }.into());
        }
        self.damping = self.initial_damping;
        self.residuals = Some(residuals);
        self.jacobian = None;
        self.accepted_any = false;
        self.termination = None;
        Ok((state.param(theta).cost(cost), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, mut state: LsqState,
    ) -> Result<(LsqState, Option<KV>), Error> {
        let theta = state.take_param().ok_or_else(not_initialized)?;
        let cost: Cost = state.get_cost();
        let residuals = match self.residuals.take() {
            Some(r) => r,
            None => problem.apply(&theta)?,
        };
        if cost == 0.0 {
            self.converge();
            self.residuals = Some(residuals);
            return Ok((state.param(theta).cost(cost), None));
        }
        let jacobian = match self.jacobian.take() {
            Some(j) => j,
            None => problem.jacobian(&theta)?,
        };
        let gradient: Grad = jacobian.t().dot(&residuals);
        if let Some(tol_grad) = self.tols.tol_grad {
            if inf_norm(&gradient) <= tol_grad && !self.stalled_at_start(&gradient, cost) {
                self.converge();
                self.residuals = Some(residuals);
                self.jacobian = Some(jacobian);
                return Ok((state.param(theta).cost(cost).gradient(gradient), None));
            }
        }

        let candidate = match solve_damped_system(&jacobian, &gradient, self.damping) {
            Some(step) => {
                let small = self.step_is_small(&step, &theta);
                let point = &theta + &step;
                let evaluated = match problem.apply(&point) {
                    Ok(r) => Some(r),
                    Err(e) if is_rejectable(&e) => None,
                    Err(e) => return Err(e),
                };
                Some((point, evaluated, small))
            }
            None => None,
        };

        let (accepted, step_small) = match candidate {
            Some((point, Some(new_residuals), small)) => {
                let new_cost = new_residuals.dot(&new_residuals);
                if new_cost.is_finite() && new_cost < cost {
                    (Some((point, new_residuals, new_cost)), small)
                } else {
                    (None, small)
                }
            }
            Some((_, None, small)) => (None, small),
            None => (None, false),
        };

        let kv = argmin::kv!("damping" => self.damping;);
        match accepted {
            Some((point, new_residuals, new_cost)) => {
                let rel_reduction = (cost - new_cost) / cost;
                self.damping = (self.damping / self.damping_factor).max(MIN_DAMPING);
                self.residuals = Some(new_residuals);
                self.jacobian = None;
                self.accepted_any = true;
                let cost_small = self.tols.tol_cost.is_some_and(|tol| rel_reduction <= tol);
                if cost_small || step_small || new_cost == 0.0 {
                    self.converge();
                }
                Ok((state.param(point).cost(new_cost).gradient(gradient), Some(kv)))
            }
            None => {
                self.residuals = Some(residuals);
                self.jacobian = Some(jacobian);
                if step_small && !self.stalled_at_start(&gradient, cost) {
                    self.converge();
                } else {
                    self.damping *= self.damping_factor;
                    if self.damping > MAX_DAMPING {
                        self.termination =
                            Some(TerminationReason::SolverExit("damping exceeded".to_string()));
                    }
                }
                Ok((state.param(theta).cost(cost).gradient(gradient), Some(kv)))
            }
        }
    }

    fn terminate(&mut self, _state: &LsqState) -> TerminationStatus {
        match &self.termination {
            Some(reason) => TerminationStatus::Terminated(reason.clone()),
            None => TerminationStatus::NotTerminated,
        }
    }
}

// ---- Helper methods ----

/// Solve `(JᵀJ + λ·D) δ = −g` for the step `δ`.
///
/// Returns `None` when both the Cholesky and LU factorizations fail or the
/// solution contains non-finite entries.
fn solve_damped_system(jacobian: &Jacobian, gradient: &Grad, damping: f64) -> Option<Theta> {
    let jtj = jacobian.t().dot(jacobian);
    let n = jtj.nrows();
    let mut lhs = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        for i in 0..n {
            lhs[(i, j)] = jtj[[i, j]];
        }
        lhs[(j, j)] += damping * jtj[[j, j]].max(DIAG_FLOOR);
    }
    let rhs = DVector::from_iterator(n, gradient.iter().map(|g| -g));
    let solution = match lhs.clone().cholesky() {
        Some(chol) => Some(chol.solve(&rhs)),
        None => lhs.lu().solve(&rhs),
    }?;
    if solution.iter().all(|v| v.is_finite()) {
        Some(Theta::from_iter(solution.iter().copied()))
    } else {
        None
    }
}

fn inf_norm(values: &Grad) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// A candidate evaluation error that should reject the step rather than
/// abort the run.
fn is_rejectable(err: &Error) -> bool {
    matches!(
        err.downcast_ref::<OptError>(),
        Some(OptError::NonFiniteResidual { .. }) | Some(OptError::NonFiniteCost { .. })
    )
}

fn not_initialized() -> Error {
    Error::new(ArgminError::NotInitialized {
        text: "Levenberg-Marquardt requires an initial parameter vector.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::least_squares::{adapter::LsqAdapter, traits::ResidualModel};
    use argmin::core::{Executor, State};
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The damped linear solve in the small-damping limit.
    // - Builder validation of damping settings.
    // - Exact recovery of a linear least-squares problem.
    // - The damping-exceeded exit when no step can be accepted.
    // - No false convergence when the Jacobian vanishes at the start.
    //
    // They intentionally DO NOT cover:
    // - Conversion of the final state into `FitOutcome`; see `run`/`api`.
    // -------------------------------------------------------------------------

    struct Line;

    struct LineData {
        x: Array1<f64>,
        y: Array1<f64>,
    }

    impl ResidualModel for Line {
        type Data = LineData;

        fn n_obs(&self, data: &LineData) -> usize {
            data.y.len()
        }

        fn residuals(&self, theta: &Theta, data: &LineData) -> OptResult<Residuals> {
            Ok(data.x.mapv(|xi| theta[0] + theta[1] * xi) - &data.y)
        }

        fn check(&self, _theta: &Theta, _data: &LineData) -> OptResult<()> {
            Ok(())
        }

        fn jacobian(&self, _theta: &Theta, data: &LineData) -> OptResult<Jacobian> {
            let mut jac = Array2::<f64>::ones((data.x.len(), 2));
            jac.column_mut(1).assign(&data.x);
            Ok(jac)
        }
    }

    /// Residuals are finite only at `θ = 2`; every step away is rejected.
    struct Cliff;

    impl ResidualModel for Cliff {
        type Data = ();

        fn n_obs(&self, _data: &()) -> usize {
            2
        }

        fn residuals(&self, theta: &Theta, _data: &()) -> OptResult<Residuals> {
            if theta[0] == 2.0 {
                Ok(array![1.0, 1.0])
            } else {
                Err(OptError::NonFiniteResidual { index: 0, value: f64::NAN })
            }
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn jacobian(&self, _theta: &Theta, _data: &()) -> OptResult<Jacobian> {
            Ok(array![[1.0], [1.0]])
        }
    }

    /// `r = θ·1e-90 − y`: the Jacobian underflows to a negligible column.
    struct Flatline;

    impl ResidualModel for Flatline {
        type Data = Array1<f64>;

        fn n_obs(&self, data: &Array1<f64>) -> usize {
            data.len()
        }

        fn residuals(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Residuals> {
            Ok(data.mapv(|yi| theta[0] * 1e-90 - yi))
        }

        fn check(&self, _theta: &Theta, _data: &Array1<f64>) -> OptResult<()> {
            Ok(())
        }

        fn jacobian(&self, _theta: &Theta, data: &Array1<f64>) -> OptResult<Jacobian> {
            Ok(Array2::from_elem((data.len(), 1), 1e-90))
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that with negligible damping the solve reproduces the
    // Gauss–Newton step.
    //
    // Given
    // -----
    // - J = I₂, g = (1, −2), λ = 1e-12.
    //
    // Expect
    // ------
    // - δ ≈ (−1, 2).
    fn solve_damped_system_matches_gauss_newton_for_small_damping() {
        // Arrange
        let jac = Array2::<f64>::eye(2);
        let g = array![1.0, -2.0];

        // Act
        let step = solve_damped_system(&jac, &g, 1e-12).expect("system is well conditioned");

        // Assert
        assert!((step[0] + 1.0).abs() < 1e-9);
        assert!((step[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn solve_damped_system_shrinks_step_with_large_damping() {
        let jac = Array2::<f64>::eye(2);
        let g = array![1.0, -2.0];

        let step = solve_damped_system(&jac, &g, 1.0).expect("system is well conditioned");

        assert!((step[0] + 0.5).abs() < 1e-12);
        assert!((step[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn build_levenberg_marquardt_rejects_invalid_damping() {
        let mut opts = LsqOptions::default();
        assert!(build_levenberg_marquardt(&opts).is_ok());

        opts.damping = f64::NAN;
        assert!(matches!(build_levenberg_marquardt(&opts), Err(OptError::InvalidDamping { .. })));

        opts.damping = 1e-3;
        opts.damping_factor = 1.0;
        assert!(matches!(
            build_levenberg_marquardt(&opts),
            Err(OptError::InvalidDampingFactor { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the solver recovers an exactly linear relationship and reports
    // convergence.
    //
    // Given
    // -----
    // - y = 1 + 2x on x = 0..5, starting from θ = (0, 0).
    //
    // Expect
    // ------
    // - Terminated with `SolverConverged`; θ̂ ≈ (1, 2); cost ≈ 0.
    fn executor_recovers_linear_model() {
        // Arrange
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let data = LineData { y: x.mapv(|xi| 1.0 + 2.0 * xi), x };
        let model = Line;
        let problem = LsqAdapter::new(&model, &data);
        let solver =
            build_levenberg_marquardt(&LsqOptions::default()).expect("default options are valid");

        // Act
        let state = Executor::new(problem, solver)
            .configure(|s| s.param(array![0.0, 0.0]).max_iters(100))
            .run()
            .expect("run should succeed")
            .state()
            .clone();

        // Assert
        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let theta = state.get_best_param().expect("best param is set");
        assert!((theta[0] - 1.0).abs() < 1e-6);
        assert!((theta[1] - 2.0).abs() < 1e-6);
        assert!(state.get_best_cost() < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Check that a problem where every candidate is rejected ends with
    // the damping-exceeded exit instead of an error or false convergence.
    //
    // Given
    // -----
    // - `Cliff` model, step tolerance disabled.
    //
    // Expect
    // ------
    // - `SolverExit("damping exceeded")`; θ stays at the start.
    fn executor_exits_when_damping_explodes() {
        // Arrange
        let model = Cliff;
        let problem = LsqAdapter::new(&model, &());
        let tols = Tolerances::new(Some(1e-12), None, None, 200).expect("valid tolerances");
        let solver = LevenbergMarquardt::new(tols, 1e-3, 10.0).expect("valid damping");

        // Act
        let state = Executor::new(problem, solver)
            .configure(|s| s.param(array![2.0]).max_iters(200))
            .run()
            .expect("rejections are not errors")
            .state()
            .clone();

        // Assert
        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::SolverExit(
                "damping exceeded".to_string()
            ))
        );
        assert_eq!(state.get_best_param(), Some(&array![2.0]));
    }

    #[test]
    // Purpose
    // -------
    // A Jacobian that vanishes at the starting point produces tiny steps
    // and a tiny gradient while the cost stays large; this must not be
    // reported as convergence.
    //
    // Given
    // -----
    // - `Flatline` model, y = (1, 2, 3), θ₀ = 1, default step tolerance
    //   plus a gradient tolerance.
    //
    // Expect
    // ------
    // - `SolverExit("damping exceeded")` with θ unchanged and cost 14.
    fn executor_does_not_converge_on_vanishing_jacobian() {
        // Arrange
        let data = array![1.0, 2.0, 3.0];
        let model = Flatline;
        let problem = LsqAdapter::new(&model, &data);
        let tols = Tolerances::new(Some(1e-12), Some(1e-8), Some(1e-10), 200)
            .expect("valid tolerances");
        let solver = LevenbergMarquardt::new(tols, 1e-3, 10.0).expect("valid damping");

        // Act
        let state = Executor::new(problem, solver)
            .configure(|s| s.param(array![1.0]).max_iters(200))
            .run()
            .expect("rejections are not errors")
            .state()
            .clone();

        // Assert
        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::SolverExit(
                "damping exceeded".to_string()
            ))
        );
        assert_eq!(state.get_best_param(), Some(&array![1.0]));
        assert!((state.get_best_cost() - 14.0).abs() < 1e-12);
    }
}
