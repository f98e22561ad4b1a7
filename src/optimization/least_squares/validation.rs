//! Validation helpers for least-squares optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol`] ensures numeric tolerances are
//!   finite and strictly positive when provided.
//! - **Damping checks**: [`verify_damping`] and [`verify_damping_factor`]
//!   guard the Levenberg–Marquardt configuration.
//! - **Residual and Jacobian validation**: [`validate_residuals`] and
//!   [`validate_jacobian`] enforce shapes and finite entries.
//! - **Parameter estimates**: [`validate_theta_input`] and
//!   [`validate_theta_hat`] ensure parameter vectors contain only finite
//!   values.
//! - **Objective values**: [`validate_value`] checks costs for finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::types::{Jacobian, Residuals, Theta},
};

/// Which tolerance is being verified; selects the error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TolKind {
    Cost,
    Step,
    Grad,
}

/// Validate an optional convergence tolerance.
///
/// - Accepts `None` (no stopping rule of that kind).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`], [`OptError::InvalidTolStep`] or
/// [`OptError::InvalidTolGrad`] (depending on `kind`) if the value is
/// non-finite or ≤ 0.0.
pub fn verify_tol(tol: Option<f64>, kind: TolKind) -> OptResult<()> {
    let Some(tol) = tol else {
        return Ok(());
    };
    let reason = if !tol.is_finite() {
        "Tolerance must be finite."
    } else if tol <= 0.0 {
        "Tolerance must be positive."
    } else {
        return Ok(());
    };
    Err(match kind {
        TolKind::Cost => OptError::InvalidTolCost { tol, reason },
        TolKind::Step => OptError::InvalidTolStep { tol, reason },
        TolKind::Grad => OptError::InvalidTolGrad { tol, reason },
    })
}

/// Validate the initial Levenberg–Marquardt damping `λ₀`.
///
/// # Errors
/// Returns [`OptError::InvalidDamping`] if `value` is non-finite or ≤ 0.
pub fn verify_damping(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidDamping { value, reason: "Damping must be finite." });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidDamping { value, reason: "Damping must be positive." });
    }
    Ok(())
}

/// Validate the multiplicative damping update factor.
///
/// # Errors
/// Returns [`OptError::InvalidDampingFactor`] if `value` is non-finite or ≤ 1.
pub fn verify_damping_factor(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidDampingFactor {
            value,
            reason: "Damping factor must be finite.",
        });
    }
    if value <= 1.0 {
        return Err(OptError::InvalidDampingFactor {
            value,
            reason: "Damping factor must be greater than one.",
        });
    }
    Ok(())
}

/// Validate a residual vector against length and finiteness.
///
/// # Errors
/// - [`OptError::ResidualDimMismatch`] if `residuals.len() != n_obs`.
/// - [`OptError::NonFiniteResidual`] for the first non-finite entry.
pub fn validate_residuals(residuals: &Residuals, n_obs: usize) -> OptResult<()> {
    if residuals.len() != n_obs {
        return Err(OptError::ResidualDimMismatch { expected: n_obs, found: residuals.len() });
    }
    for (index, &value) in residuals.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteResidual { index, value });
        }
    }
    Ok(())
}

/// Validate the shape and entries of a residual Jacobian.
///
/// # Checks
/// 1. Matrix dimensions must equal `n_obs × n_params`.
/// 2. All entries must be finite (no NaN or ±∞).
///
/// # Errors
/// - [`OptError::JacobianDimMismatch`] if dimensions do not match.
/// - [`OptError::InvalidJacobian`] if any entry is non-finite, with offending
///   row/col indices and value.
pub fn validate_jacobian(jacobian: &Jacobian, n_obs: usize, n_params: usize) -> OptResult<()> {
    if jacobian.nrows() != n_obs || jacobian.ncols() != n_params {
        return Err(OptError::JacobianDimMismatch {
            expected: (n_obs, n_params),
            found: (jacobian.nrows(), jacobian.ncols()),
        });
    }
    for ((row, col), &value) in jacobian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidJacobian { row, col, value });
        }
    }
    Ok(())
}

/// Validate a starting parameter vector: every entry must be finite.
///
/// # Errors
/// Returns [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta_input(theta: &Theta) -> OptResult<()> {
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar cost value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tolerance and damping validation, including the variant selected
    //   for each tolerance kind.
    // - Residual/Jacobian shape and finiteness checks.
    // - `theta_hat` presence and finiteness.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure `verify_tol` accepts `None` and positive finite values, and
    // reports the variant matching the tolerance kind otherwise.
    fn verify_tol_selects_variant_by_kind() {
        assert!(verify_tol(None, TolKind::Cost).is_ok());
        assert!(verify_tol(Some(1e-8), TolKind::Step).is_ok());

        assert!(matches!(
            verify_tol(Some(0.0), TolKind::Cost),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(
            verify_tol(Some(f64::NAN), TolKind::Step),
            Err(OptError::InvalidTolStep { .. })
        ));
        assert!(matches!(
            verify_tol(Some(-1.0), TolKind::Grad),
            Err(OptError::InvalidTolGrad { .. })
        ));
    }

    #[test]
    fn damping_checks_reject_out_of_range_values() {
        assert!(verify_damping(1e-3).is_ok());
        assert!(verify_damping(0.0).is_err());
        assert!(verify_damping(f64::INFINITY).is_err());

        assert!(verify_damping_factor(10.0).is_ok());
        assert!(verify_damping_factor(1.0).is_err());
        assert!(verify_damping_factor(f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify residual validation catches length mismatches before
    // finiteness problems.
    //
    // Given
    // -----
    // - A residual vector of length 3 containing a NaN.
    //
    // Expect
    // ------
    // - Against n_obs = 4: `ResidualDimMismatch`.
    // - Against n_obs = 3: `NonFiniteResidual` at index 1.
    fn validate_residuals_checks_shape_then_values() {
        // Arrange
        let r = array![0.0, f64::NAN, 1.0];

        // Act
        let wrong_len = validate_residuals(&r, 4);
        let bad_value = validate_residuals(&r, 3);

        // Assert
        assert_eq!(wrong_len, Err(OptError::ResidualDimMismatch { expected: 4, found: 3 }));
        assert!(matches!(bad_value, Err(OptError::NonFiniteResidual { index: 1, .. })));
    }

    #[test]
    fn validate_jacobian_reports_shape_and_offending_entry() {
        let mut j = Array2::<f64>::zeros((4, 3));
        assert!(validate_jacobian(&j, 4, 3).is_ok());
        assert!(matches!(
            validate_jacobian(&j, 3, 4),
            Err(OptError::JacobianDimMismatch { expected: (3, 4), found: (4, 3) })
        ));

        j[(2, 1)] = f64::INFINITY;
        assert!(matches!(
            validate_jacobian(&j, 4, 3),
            Err(OptError::InvalidJacobian { row: 2, col: 1, .. })
        ));
    }

    #[test]
    fn validate_theta_hat_requires_presence_and_finiteness() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(validate_theta_hat(Some(array![1.0, f64::NAN])).is_err());
        assert_eq!(validate_theta_hat(Some(array![1.0, 2.0])), Ok(array![1.0, 2.0]));
    }

    #[test]
    fn validate_theta_input_rejects_non_finite_entries() {
        assert!(validate_theta_input(&array![90.0, 0.4, 4.0]).is_ok());
        assert_eq!(
            validate_theta_input(&array![90.0, f64::NEG_INFINITY, 4.0]),
            Err(OptError::InvalidThetaInput { index: 1, value: f64::NEG_INFINITY })
        );
    }
}
