//! Sigmoid growth model: overflow-safe curve, analytic Jacobian, fit, forecast.
//!
//! This module wires the logistic curve `f(x) = L / (1 + exp(-k (x - x0)))`
//! to the `ResidualModel` trait so it can be fitted by Levenberg–Marquardt,
//! and turns a fitted curve into a banded forecast.
//!
//! Key ideas:
//! - One primitive, [`sigmoid`], built on `safe_logistic`, is shared by the
//!   residuals, the Jacobian, and the forecast. Logistic arguments beyond
//!   `±LOGISTIC_ARG_LIMIT` are clamped, so no evaluation returns `inf`/`NaN`
//!   for finite inputs.
//! - The Jacobian is analytic. With `t = k (x − x0)` and `s = σ(t)`:
//!   `∂f/∂L = s`, `∂f/∂k = L s (1 − s)(x − x0)`, `∂f/∂x0 = −L s (1 − s) k`,
//!   where `1 − s` is evaluated as `σ(−t)` to avoid cancellation.
//! - A fit that does not converge within budget, or whose Jacobian is
//!   rank-deficient at the optimum, is an error carrying the last estimate;
//!   a degenerate fit is never returned silently.
use crate::{
    growth::{
        core::{
            data::GrowthData,
            forecasts::{ForecastResult, future_indices, symmetric_band},
            params::{N_PARAMS, SigmoidParams},
            validation::{validate_confidence, validate_days_ahead},
        },
        errors::{FittingError, GrowthResult},
    },
    inference::{jacobian_is_singular, residual_sigma, standard_errors, two_sided_z},
    optimization::{
        errors::{OptError, OptResult},
        least_squares::{FitOutcome, Jacobian, LsqOptions, ResidualModel, Residuals, Theta, minimize_sse},
        numerical_stability::transformations::{clamp_logistic_arg, safe_logistic},
    },
};
use ndarray::{Array1, ArrayView1};

/// Evaluate `L / (1 + exp(-k (x - x0)))` without overflow.
///
/// # Examples
/// ```
/// use growth_forecaster::growth::{core::SigmoidParams, models::sigmoid::sigmoid};
///
/// let p = SigmoidParams { l: 100.0, k: 0.5, x0: 5.0 };
/// assert!((sigmoid(5.0, &p) - 50.0).abs() < 1e-12);
/// assert!(sigmoid(1e6, &SigmoidParams { l: 100.0, k: 50.0, x0: 0.0 }).is_finite());
/// ```
pub fn sigmoid(x: f64, params: &SigmoidParams) -> f64 {
    params.l * safe_logistic(params.k * (x - params.x0))
}

/// Vectorized [`sigmoid`].
pub fn sigmoid_array(x: ArrayView1<f64>, params: &SigmoidParams) -> Array1<f64> {
    x.mapv(|xi| sigmoid(xi, params))
}

/// Number of points in `x` whose logistic argument `k (x − x0)` falls
/// outside `±LOGISTIC_ARG_LIMIT`.
pub fn count_clamped(x: ArrayView1<f64>, params: &SigmoidParams) -> usize {
    x.iter().filter(|&&xi| clamp_logistic_arg(params.k * (xi - params.x0)).1).count()
}

/// Logistic growth model fitted by Levenberg–Marquardt.
///
/// Holds only solver configuration; data are passed per call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SigmoidModel {
    /// Solver options used by [`SigmoidModel::fit`].
    pub lsq_opts: LsqOptions,
}

impl SigmoidModel {
    pub fn new(lsq_opts: LsqOptions) -> SigmoidModel {
        SigmoidModel { lsq_opts }
    }

    /// Fit `(L, k, x0)` to `data` starting from `guess`.
    ///
    /// ## Steps
    /// 1. Check the guess is finite.
    /// 2. Minimize `Σ (f(xᵢ) − yᵢ)²` with `minimize_sse`.
    /// 3. Reject non-converged runs with [`FittingError::NotConverged`].
    /// 4. Map `θ̂` back to [`SigmoidParams`], reject a rank-deficient
    ///    Jacobian at `θ̂`, and compute standard errors from it.
    ///
    /// ## Errors
    /// - `InputError::NonFiniteGuess` for a non-finite guess.
    /// - `FittingError::Solver` for optimizer or model failures.
    /// - `FittingError::NotConverged` when the iteration/time budget runs out
    ///   or the damping ceiling is hit.
    /// - `FittingError::Singular` when `JᵀJ` at `θ̂` is numerically
    ///   rank-deficient (flat data, saturated or vanishing curve).
    /// - `FittingError::NonFiniteParams` / `FittingError::Inference` for a
    ///   numerically broken optimum.
    pub fn fit(&self, data: &GrowthData, guess: SigmoidParams) -> GrowthResult<SigmoidFit> {
        guess.validate()?;
        let outcome = minimize_sse(self, guess.to_theta(), data, &self.lsq_opts)?;
        if !outcome.converged {
            return Err(FittingError::NotConverged {
                theta: outcome.theta_hat.to_vec(),
                iterations: outcome.iterations,
                status: outcome.status,
            }
            .into());
        }
        let params = SigmoidParams::from_theta(outcome.theta_hat.view())?;
        let jac = sigmoid_jacobian(data.x.view(), &params);
        if jacobian_is_singular(&jac) {
            return Err(FittingError::Singular {
                theta: outcome.theta_hat.to_vec(),
                iterations: outcome.iterations,
            }
            .into());
        }
        let se = standard_errors(&jac, outcome.cost, data.len())?;
        Ok(SigmoidFit { params, standard_errors: se, outcome })
    }
}

impl ResidualModel for SigmoidModel {
    type Data = GrowthData;

    fn n_obs(&self, data: &GrowthData) -> usize {
        data.len()
    }

    /// `rᵢ = f(xᵢ) − yᵢ`.
    fn residuals(&self, theta: &Theta, data: &GrowthData) -> OptResult<Residuals> {
        let params = params_from_theta(theta)?;
        Ok(sigmoid_array(data.x.view(), &params) - &data.y)
    }

    fn check(&self, theta: &Theta, _data: &GrowthData) -> OptResult<()> {
        params_from_theta(theta).map(|_| ())
    }

    fn jacobian(&self, theta: &Theta, data: &GrowthData) -> OptResult<Jacobian> {
        let params = params_from_theta(theta)?;
        Ok(sigmoid_jacobian(data.x.view(), &params))
    }
}

/// `SigmoidFit` — converged sigmoid fit with diagnostics.
///
/// Fields
/// ------
/// - `params`: fitted `(L, k, x0)`.
/// - `standard_errors`: classical least-squares SEs for `[L, k, x0]`.
/// - `outcome`: optimizer diagnostics (cost is the in-sample SSE).
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidFit {
    pub params: SigmoidParams,
    pub standard_errors: Array1<f64>,
    pub outcome: FitOutcome,
}

impl SigmoidFit {
    /// Residuals `yᵢ − f(xᵢ)` of the fitted curve on `data`.
    pub fn residuals(&self, data: &GrowthData) -> Array1<f64> {
        &data.y - &sigmoid_array(data.x.view(), &self.params)
    }

    /// Extrapolate the fitted curve with a flat residual band.
    ///
    /// ## Steps
    /// 1. Grid `1..=floor(max x) + days_ahead`.
    /// 2. Evaluate the fitted sigmoid on the grid.
    /// 3. `sigma = sqrt(Σ rᵢ² / n)` on the observations in `data`.
    /// 4. `z = Φ⁻¹((1 + confidence) / 2)`.
    /// 5. `upper/lower = forecast ± z·sigma`.
    ///
    /// ## Errors
    /// - `InputError::InvalidDaysAhead`, `InputError::InvalidConfidence`,
    ///   `InputError::EmptyHorizon`, `InputError::HorizonTooLong`.
    pub fn forecast(
        &self, data: &GrowthData, days_ahead: usize, confidence: f64,
    ) -> GrowthResult<ForecastResult> {
        validate_days_ahead(days_ahead)?;
        validate_confidence(confidence)?;
        let indices = future_indices(data.last_index(), days_ahead)?;
        let forecast = sigmoid_array(indices.view(), &self.params);
        let clamped_points = count_clamped(indices.view(), &self.params);
        let sigma = residual_sigma(self.residuals(data).view());
        let z = two_sided_z(confidence)?;
        let (upper, lower) = symmetric_band(&forecast, z * sigma);
        Ok(ForecastResult {
            future_indices: indices,
            forecast,
            upper,
            lower,
            params: self.params,
            sigma,
            z,
            outcome: self.outcome.clone(),
            clamped_points,
        })
    }
}

// ---- Helper methods ----

fn params_from_theta(theta: &Theta) -> OptResult<SigmoidParams> {
    if theta.len() != N_PARAMS {
        return Err(OptError::ThetaLengthMismatch { expected: N_PARAMS, actual: theta.len() });
    }
    Ok(SigmoidParams { l: theta[0], k: theta[1], x0: theta[2] })
}

/// Analytic `∂f/∂(L, k, x0)` with one row per observation.
fn sigmoid_jacobian(x: ArrayView1<f64>, params: &SigmoidParams) -> Jacobian {
    let mut jac = Jacobian::zeros((x.len(), N_PARAMS));
    for (i, &xi) in x.iter().enumerate() {
        let dx = xi - params.x0;
        let t = params.k * dx;
        let s = safe_logistic(t);
        let slope = params.l * s * safe_logistic(-t);
        jac[[i, 0]] = s;
        jac[[i, 1]] = slope * dx;
        jac[[i, 2]] = -slope * params.k;
    }
    jac
}
