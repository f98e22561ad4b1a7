//! High-level entry point for minimizing a user-provided sum of squares.
//!
//! This validates the starting point, wraps the model in an `LsqAdapter`,
//! builds a Levenberg–Marquardt solver, and delegates the run to
//! `run_least_squares`.
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        adapter::LsqAdapter,
        run::run_least_squares,
        solver::build_levenberg_marquardt,
        traits::{FitOutcome, LsqOptions, ResidualModel},
        types::Theta,
        validation::validate_theta_input,
    },
};

/// Minimize `S(θ) = Σᵢ rᵢ(θ)²` using Levenberg–Marquardt.
///
/// # Behavior
/// - Rejects non-finite entries in `theta0`.
/// - Validates the initial guess via `model.check(theta0, data)`.
/// - Wraps `(model, data)` in an `LsqAdapter` that exposes residuals, cost,
///   and Jacobian to `argmin`.
/// - Builds the solver from `opts` and calls `run_least_squares`, which
///   configures the executor (initial params, max iters, timeout,
///   observers) and returns a `FitOutcome`.
///
/// # Parameters
/// - `model`: your model implementing [`ResidualModel`].
/// - `theta0`: initial parameter vector.
/// - `data`: model data passed through to `residuals`/`jacobian`.
/// - `opts`: optimizer options (tolerances, damping, budgets, verbosity).
///
/// # Errors
/// - `OptError::InvalidThetaInput` for a non-finite `theta0` entry.
/// - Propagates any error from `model.check`.
/// - Propagates builder errors (invalid damping settings).
/// - Propagates runtime errors from `run_least_squares` (model failures
///   other than non-finite candidate residuals).
///
/// # Returns
/// A [`FitOutcome`]. Budget exhaustion is reported via
/// `FitOutcome::converged == false`, not as an error.
///
/// # Example
/// ```
/// use ndarray::{Array1, array};
/// use growth_forecaster::optimization::errors::OptResult;
/// use growth_forecaster::optimization::least_squares::{
///     minimize_sse, LsqOptions, ResidualModel, Residuals, Theta,
/// };
///
/// struct Offset;
/// impl ResidualModel for Offset {
///     type Data = Array1<f64>;
///     fn n_obs(&self, y: &Array1<f64>) -> usize {
///         y.len()
///     }
///     fn residuals(&self, theta: &Theta, y: &Array1<f64>) -> OptResult<Residuals> {
///         Ok(y.mapv(|yi| theta[0] - yi))
///     }
///     fn check(&self, _: &Theta, _: &Array1<f64>) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let y = array![1.0, 2.0, 3.0];
/// let out = minimize_sse(&Offset, array![0.0], &y, &LsqOptions::default())?;
/// assert!(out.converged);
/// assert!((out.theta_hat[0] - 2.0).abs() < 1e-6);
/// # Ok::<(), growth_forecaster::optimization::errors::OptError>(())
/// ```
pub fn minimize_sse<M: ResidualModel>(
    model: &M, theta0: Theta, data: &M::Data, opts: &LsqOptions,
) -> OptResult<FitOutcome> {
    validate_theta_input(&theta0)?;
    model.check(&theta0, data)?;
    let problem = LsqAdapter::new(model, data);
    let solver = build_levenberg_marquardt(opts)?;
    run_least_squares(theta0, opts, problem, solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        least_squares::{
            traits::Tolerances,
            types::{Jacobian, Residuals},
        },
    };
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end minimization of a nonlinear model through the
    //   finite-difference Jacobian path.
    // - Pre-flight rejection of invalid starting points.
    // - Budget exhaustion reported as non-convergence.
    // - Propagation of hard model errors raised mid-run.
    // -------------------------------------------------------------------------

    /// `f(x) = a · exp(−b x)` without an analytic Jacobian.
    struct Decay;

    struct DecayData {
        x: Array1<f64>,
        y: Array1<f64>,
    }

    impl ResidualModel for Decay {
        type Data = DecayData;

        fn n_obs(&self, data: &DecayData) -> usize {
            data.y.len()
        }

        fn residuals(&self, theta: &Theta, data: &DecayData) -> OptResult<Residuals> {
            Ok(data.x.mapv(|xi| theta[0] * (-theta[1] * xi).exp()) - &data.y)
        }

        fn check(&self, theta: &Theta, _data: &DecayData) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }
    }

    /// Errors hard as soon as the first parameter leaves `[0, 1]`.
    struct Fragile;

    impl ResidualModel for Fragile {
        type Data = ();

        fn n_obs(&self, _data: &()) -> usize {
            1
        }

        fn residuals(&self, theta: &Theta, _data: &()) -> OptResult<Residuals> {
            if !(0.0..=1.0).contains(&theta[0]) {
                return Err(OptError::InvalidThetaInput { index: 0, value: theta[0] });
            }
            Ok(array![theta[0] - 5.0])
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn jacobian(&self, _theta: &Theta, _data: &()) -> OptResult<Jacobian> {
            Ok(array![[1.0]])
        }
    }

    fn decay_data() -> DecayData {
        let x = Array1::linspace(0.0, 4.0, 9);
        DecayData { y: x.mapv(|xi| 3.0 * (-0.7_f64 * xi).exp()), x }
    }

    #[test]
    // Purpose
    // -------
    // Verify `minimize_sse` recovers the parameters of a noiseless
    // exponential decay using finite-difference Jacobians.
    //
    // Given
    // -----
    // - y = 3·exp(−0.7x) on 9 points; θ₀ = (1, 0.1).
    //
    // Expect
    // ------
    // - Converged; θ̂ ≈ (3, 0.7); cost ≈ 0; Jacobian evaluations counted.
    fn minimize_sse_recovers_decay_parameters() {
        // Arrange
        let data = decay_data();
        let opts = LsqOptions::default();

        // Act
        let out = minimize_sse(&Decay, array![1.0, 0.1], &data, &opts).expect("fit should run");

        // Assert
        assert!(out.converged, "status: {}", out.status);
        assert!((out.theta_hat[0] - 3.0).abs() < 1e-5);
        assert!((out.theta_hat[1] - 0.7).abs() < 1e-5);
        assert!(out.cost < 1e-10);
        assert!(out.fn_evals.get("jacobian_count").copied().unwrap_or(0) > 0);
    }

    #[test]
    fn minimize_sse_rejects_invalid_starting_points() {
        let data = decay_data();
        let opts = LsqOptions::default();

        let nan_start = minimize_sse(&Decay, array![f64::NAN, 0.1], &data, &opts);
        let wrong_len = minimize_sse(&Decay, array![1.0], &data, &opts);

        assert!(matches!(nan_start, Err(OptError::InvalidThetaInput { index: 0, .. })));
        assert_eq!(wrong_len, Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that running out of iterations is reported through
    // `converged == false` rather than an error.
    //
    // Given
    // -----
    // - The decay problem with `max_iter = 1`.
    //
    // Expect
    // ------
    // - `Ok(outcome)` with `converged == false` and a `MaxItersReached`
    //   status.
    fn minimize_sse_reports_budget_exhaustion() {
        // Arrange
        let data = decay_data();
        let tols = Tolerances::new(Some(1e-15), Some(1e-15), None, 1).expect("valid tolerances");
        let opts = LsqOptions { tols, ..LsqOptions::default() };

        // Act
        let out = minimize_sse(&Decay, array![1.0, 0.1], &data, &opts).expect("run should finish");

        // Assert
        assert!(!out.converged);
        assert!(out.status.contains("MaxItersReached"));
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn minimize_sse_propagates_hard_model_errors() {
        let out = minimize_sse(&Fragile, array![0.5], &(), &LsqOptions::default());

        assert!(matches!(out, Err(OptError::InvalidThetaInput { index: 0, .. })));
    }
}
