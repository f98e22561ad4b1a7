//! least_squares::finite_diff — finite-difference Jacobian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference approximations of the residual Jacobian
//! `∂r/∂θ` around a parameter vector, together with error capture and
//! validation, so that residual models without an analytic Jacobian can
//! still be fitted by Levenberg–Marquardt.
//!
//! Key behaviors
//! -------------
//! - Compute central-difference Jacobians via `finitediff`, falling back to
//!   forward differences when the central approximation fails validation
//!   ([`compute_jacobian`]).
//! - Route any error raised by the residual closure into a shared
//!   `RefCell` slot and surface it as an [`OptError`] after differencing.
//! - Normalize the matrix orientation to `(n_obs, n_params)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Jacobians returned from this module satisfy [`validate_jacobian`] for
//!   the requested `(n_obs, n_params)` shape.
//! - The residual closure returns a vector of length `n_obs` for every
//!   perturbed `θ`; a closure failure is represented by a `NaN`-filled
//!   vector plus an error stored in `closure_err`.
//!
//! Conventions
//! -----------
//! - Differences are taken with respect to `Theta` directly; no
//!   reparameterization happens here.
//!
//! Testing notes
//! -------------
//! - Unit tests compare finite-difference Jacobians with analytic ones for
//!   a linear model, check orientation for tall and square problems, and verify
//!   that closure errors propagate.
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        types::{Jacobian, Residuals, Theta},
        validation::validate_jacobian,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// compute_jacobian — finite-difference residual Jacobian with validation.
///
/// Purpose
/// -------
/// Approximate `∂r/∂θ` at `theta`, preferring central differences and
/// falling back to forward differences when the central result fails
/// validation. Errors raised by `func` are captured in `closure_err`.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Point in parameter space; its length is `n_params`.
/// - `func`: `&G`
///   Residual map `θ ↦ r(θ)`. Must route evaluation errors into
///   `closure_err` and return a vector of length `n_obs`.
/// - `n_obs`: `usize`
///   Expected number of residuals (rows of the Jacobian).
/// - `closure_err`: `&RefCell<Option<Error>>`
///   Shared error slot, cleared on entry.
///
/// Returns
/// -------
/// `OptResult<Jacobian>`
///   A finite `(n_obs, n_params)` matrix.
///
/// Errors
/// ------
/// - Any error captured in `closure_err` (converted through
///   `From<Error> for OptError`).
/// - `OptError::JacobianDimMismatch` / `OptError::InvalidJacobian` when the
///   forward-difference fallback also fails validation.
pub fn compute_jacobian<G: Fn(&Theta) -> Residuals>(
    theta: &Theta, func: &G, n_obs: usize, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Jacobian> {
    let n_params = theta.len();
    closure_err.replace(None);
    let central = orient(theta.central_jacobian(func), n_obs, n_params);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    if validate_jacobian(&central, n_obs, n_params).is_ok() {
        return Ok(central);
    }
    let forward = orient(theta.forward_jacobian(func), n_obs, n_params);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_jacobian(&forward, n_obs, n_params)?;
    Ok(forward)
}

// ---- Helper methods ----

/// Transpose a `(n_params, n_obs)` result into `(n_obs, n_params)`.
///
/// `finitediff` lays out one row per parameter, so square results are
/// transposed as well.
fn orient(jac: Jacobian, n_obs: usize, n_params: usize) -> Jacobian {
    if jac.dim() == (n_params, n_obs) {
        jac.reversed_axes()
    } else {
        jac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the FD Jacobian with an analytic one on a linear model.
    // - Orientation for tall (n_obs > n_params) problems.
    // - Propagation of errors captured from the residual closure.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior; see `solver` tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `compute_jacobian` reproduces the analytic Jacobian of a
    // straight line `f(x) = a + b x`.
    //
    // Given
    // -----
    // - θ = (a, b) = (1, 2), x = [0, 1, 2, 3, 4].
    //
    // Expect
    // ------
    // - Shape (5, 2); column 0 ≈ 1, column 1 ≈ x.
    fn compute_jacobian_matches_linear_model() {
        // Arrange
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let theta: Theta = array![1.0, 2.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let func = |t: &Theta| x.mapv(|xi| t[0] + t[1] * xi);

        // Act
        let jac = compute_jacobian(&theta, &func, x.len(), &closure_err)
            .expect("Jacobian of a linear model should be computed");

        // Assert
        assert_eq!(jac.dim(), (5, 2));
        for (i, &xi) in x.iter().enumerate() {
            assert!((jac[(i, 0)] - 1.0).abs() < 1e-6);
            assert!((jac[(i, 1)] - xi).abs() < 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure an error stored by the closure is surfaced instead of a
    // NaN-filled matrix.
    //
    // Given
    // -----
    // - A closure that writes `ArgminError::NotImplemented` into the slot
    //   and returns NaNs.
    //
    // Expect
    // ------
    // - `Err(OptError::NotImplemented { .. })`.
    fn compute_jacobian_propagates_closure_error() {
        // Arrange
        let theta: Theta = array![1.0, 2.0, 3.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let func = |_: &Theta| {
            let err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(err.into()));
            Array1::from_elem(4, f64::NAN)
        };

        // Act
        let result = compute_jacobian(&theta, &func, 4, &closure_err);

        // Assert
        assert!(matches!(result, Err(OptError::NotImplemented { .. })));
    }

    #[test]
    fn orient_transposes_parameter_major_layouts() {
        let wide = Jacobian::zeros((2, 5));
        assert_eq!(orient(wide, 5, 2).dim(), (5, 2));

        let tall = Jacobian::zeros((5, 2));
        assert_eq!(orient(tall, 5, 2).dim(), (5, 2));

        let square = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(orient(square, 2, 2), array![[1.0, 3.0], [2.0, 4.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Square problems must come out with one row per observation.
    //
    // Given
    // -----
    // - f(x) = a + b x at x = [0, 1], θ = (1, 2).
    //
    // Expect
    // ------
    // - J ≈ [[1, 0], [1, 1]].
    fn compute_jacobian_orients_square_problems() {
        // Arrange
        let x = array![0.0, 1.0];
        let theta: Theta = array![1.0, 2.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let func = |t: &Theta| x.mapv(|xi| t[0] + t[1] * xi);

        // Act
        let jac = compute_jacobian(&theta, &func, 2, &closure_err).expect("finite Jacobian");

        // Assert
        let expected = array![[1.0, 0.0], [1.0, 1.0]];
        for (got, want) in jac.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6);
        }
    }
}
