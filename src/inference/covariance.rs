//! inference::covariance — least-squares parameter standard errors.
//!
//! Purpose
//! -------
//! Turn the residual Jacobian at a least-squares optimum into classical
//! parameter standard errors, `SE(θ̂ᵢ) = sqrt([s² (JᵀJ)⁺]ᵢᵢ)` with
//! `s² = SSE / (n − p)`.
//!
//! Key behaviors
//! -------------
//! - Form `JᵀJ` in `ndarray`, copy it into a `nalgebra::DMatrix`, and take
//!   its symmetric eigendecomposition.
//! - Use the eigenvalue-truncated Moore–Penrose pseudoinverse. Parameters
//!   that load on a truncated direction are unidentified and get `+∞`.
//! - [`jacobian_is_singular`] exposes the same rank test to model code.
//!
//! Invariants & assumptions
//! ------------------------
//! - `jacobian` has shape `(n, p)` with one row per observation.
//! - Eigenvalues at most `EIGEN_EPS · λ_max` are treated as zero.
//! - With no residual degrees of freedom (`n ≤ p`) every standard error is
//!   `+∞`.
//!
//! Testing notes
//! -------------
//! - Unit tests compare against the closed-form slope/intercept standard
//!   errors of simple linear regression and exercise the degenerate and
//!   invalid-input branches.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// standard_errors — classical least-squares standard errors.
///
/// Parameters
/// ----------
/// - `jacobian`: `&Array2<f64>`
///   Residual Jacobian `∂r/∂θ` at `θ̂`, shape `(n, p)`.
/// - `sse`: `f64`
///   Residual sum of squares at `θ̂`. Must be finite and non-negative.
/// - `n`: `usize`
///   Number of observations; must equal `jacobian.nrows()`.
///
/// Returns
/// -------
/// `InferenceResult<Array1<f64>>`
///   Length-`p` vector of standard errors.
///
/// Errors
/// ------
/// - `InferenceError::ObservationMismatch` if `jacobian.nrows() != n`.
/// - `InferenceError::EmptyJacobian` if `p == 0`.
/// - `InferenceError::InvalidSse` if `sse` is negative or non-finite.
/// - `InferenceError::NonFiniteJacobian` for a NaN/±inf entry.
///
/// Notes
/// -----
/// - `Var(θ̂ᵢ) = s² Σ_{k: λ_k > EIGEN_EPS·λ_max} Q[i,k]² / λ_k`, where
///   `JᵀJ = Q Λ Qᵀ`; `+∞` if `θᵢ` loads on a truncated direction.
///
/// Examples
/// --------
/// ```
/// use growth_forecaster::inference::standard_errors;
/// use ndarray::array;
///
/// // Mean-only model on 4 observations: SE = s / sqrt(n).
/// let j = array![[1.0], [1.0], [1.0], [1.0]];
/// let se = standard_errors(&j, 12.0, 4).unwrap();
/// assert!((se[0] - 1.0).abs() < 1e-12);
/// ```
pub fn standard_errors(jacobian: &Array2<f64>, sse: f64, n: usize) -> InferenceResult<Array1<f64>> {
    if jacobian.nrows() != n {
        return Err(InferenceError::ObservationMismatch { expected: n, found: jacobian.nrows() });
    }
    let p = jacobian.ncols();
    if p == 0 {
        return Err(InferenceError::EmptyJacobian);
    }
    if !sse.is_finite() || sse < 0.0 {
        return Err(InferenceError::InvalidSse { sse });
    }
    validate_finite(jacobian)?;
    if n <= p {
        return Ok(Array1::from_elem(p, f64::INFINITY));
    }
    let s2 = sse / (n - p) as f64;
    let variances = pinv_diagonal(gram_matrix(jacobian));
    Ok(variances.mapv(|v| if v.is_finite() { (s2 * v).sqrt() } else { f64::INFINITY }))
}

/// jacobian_is_singular — numerical rank check of `JᵀJ`.
///
/// Returns `true` when the smallest eigenvalue of `JᵀJ` is at most
/// `EIGEN_EPS · λ_max`, when `λ_max ≤ 0` (an all-zero Jacobian), or when
/// `jacobian` has a non-finite entry or no columns.
///
/// # Examples
/// ```
/// use growth_forecaster::inference::jacobian_is_singular;
/// use ndarray::array;
///
/// assert!(!jacobian_is_singular(&array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]]));
/// assert!(jacobian_is_singular(&array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]));
/// ```
pub fn jacobian_is_singular(jacobian: &Array2<f64>) -> bool {
    if jacobian.ncols() == 0 || validate_finite(jacobian).is_err() {
        return true;
    }
    let eigenvals = gram_matrix(jacobian).symmetric_eigenvalues();
    let lambda_max = eigenvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lambda_min = eigenvals.iter().copied().fold(f64::INFINITY, f64::min);
    lambda_max <= 0.0 || lambda_min <= EIGEN_EPS * lambda_max
}

// ---- Helper methods ----

fn validate_finite(jacobian: &Array2<f64>) -> InferenceResult<()> {
    match jacobian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(InferenceError::NonFiniteJacobian { row, col, value }),
        None => Ok(()),
    }
}

/// `JᵀJ` as a `nalgebra` matrix.
fn gram_matrix(jacobian: &Array2<f64>) -> DMatrix<f64> {
    let p = jacobian.ncols();
    let jtj = jacobian.t().dot(jacobian);
    let mut jtj_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(&jtj, &mut jtj_nalg);
    jtj_nalg
}

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`, column by
/// column.
fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    let n = src.ncols();
    for j in 0..n {
        for i in 0..n {
            dst[(i, j)] = src[[i, j]];
        }
    }
}

/// Diagonal of the eigenvalue-truncated pseudoinverse of a symmetric matrix.
///
/// Directions with `λ_k ≤ EIGEN_EPS · λ_max` are unidentified. A parameter
/// loading on any of them gets `+∞`; the others sum over the kept
/// directions only.
fn pinv_diagonal(mat: DMatrix<f64>) -> Array1<f64> {
    let p = mat.nrows();
    let eigen_decomp = mat.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let lambda_max = eigenvals.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = EIGEN_EPS * lambda_max;
    let mut diag = Array1::<f64>::zeros(p);
    for i in 0..p {
        let mut var = 0.0;
        for (k, &lambda) in eigenvals.iter().enumerate() {
            let loading = q[(i, k)] * q[(i, k)];
            if lambda > cutoff && lambda > 0.0 {
                var += loading / lambda;
            } else if loading > f64::EPSILON {
                var = f64::INFINITY;
                break;
            }
        }
        diag[i] = var;
    }
    diag
}
