//! Numerical stability utilities.
//!
//! Provides safe implementations of the logistic transform, which is
//! prone to overflow in naïve form (`1 / (1 + exp(-t))` overflows `exp`
//! once `-t` exceeds ~709.78).
//!
//! # Provided items
//! - [`LOGISTIC_ARG_LIMIT`]: symmetric bound applied to logistic arguments.
//! - [`clamp_logistic_arg(t)`]: clamp `t` into `[-LOGISTIC_ARG_LIMIT, LOGISTIC_ARG_LIMIT]`
//!   and report whether clamping happened.
//! - [`safe_logistic(t)`]: sign-branched logistic mapping ℝ → [0, 1] that
//!   never produces `inf`/`NaN` for non-NaN input.
//! - [`EIGEN_EPS`]: eigenvalue cutoff for pseudo-inverses.
//!
//! # Rationale
//! The growth model evaluates `exp(-k (x - x0))` far outside the training
//! window when forecasting; the guarded form keeps every evaluation finite.

/// Symmetric bound on logistic arguments.
///
/// `exp(-700)` ≈ 9.9e-305 is still a normal `f64`, so clamping at this
/// bound keeps the tail value representable. Beyond it the true logistic
/// is either exactly `1.0` in `f64` or smaller than the clamped tail; the
/// substitution is lossy only in that sub-1e-304 regime.
pub const LOGISTIC_ARG_LIMIT: f64 = 700.0;

/// Eigenvalue cutoff used when forming pseudo-inverses of `JᵀJ`.
pub const EIGEN_EPS: f64 = 1e-12;

/// Clamp a logistic argument into `[-LOGISTIC_ARG_LIMIT, LOGISTIC_ARG_LIMIT]`.
///
/// Returns the clamped value together with a flag telling whether the
/// input was outside the bound (±∞ included). `NaN` is passed through
/// untouched and reported as not clamped.
pub fn clamp_logistic_arg(t: f64) -> (f64, bool) {
    if t > LOGISTIC_ARG_LIMIT {
        (LOGISTIC_ARG_LIMIT, true)
    } else if t < -LOGISTIC_ARG_LIMIT {
        (-LOGISTIC_ARG_LIMIT, true)
    } else {
        (t, false)
    }
}

/// Numerically stable logistic: `σ(t) = 1 / (1 + exp(-t))`.
///
/// The argument is first clamped with [`clamp_logistic_arg`], then:
///
/// - for `t ≥ 0`: `1 / (1 + exp(-t))`, where `exp(-t) ≤ 1`;
/// - for `t < 0`: `exp(t) / (1 + exp(t))`, where `exp(t) < 1`.
///
/// Neither branch can overflow, so the result always lies in `[0, 1]`.
///
/// # Parameters
/// - `t`: real input
///
/// # Returns
/// - `σ(t)` as `f64`.
pub fn safe_logistic(t: f64) -> f64 {
    let (t, _) = clamp_logistic_arg(t);
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}
