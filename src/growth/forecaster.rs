//! forecaster — one-call fit-and-forecast entry points.
//!
//! Purpose
//! -------
//! Expose the top-level contract of the crate: given an observation series,
//! an initial `(L, k, x0)` guess, a horizon and a confidence level, fit a
//! logistic curve and return the curve over `1..=floor(max x) + days_ahead`
//! with a symmetric residual band.
//!
//! Key behaviors
//! -------------
//! - Validate every input before numeric work, in a fixed order: series
//!   shape and finiteness, series length, guess, horizon, confidence, grid
//!   size.
//! - Fit with [`SigmoidModel`] and forecast with [`SigmoidFit::forecast`].
//! - Never mutate caller data; every call is independent.
//!
//! Testing notes
//! -------------
//! - Unit tests here focus on validation order and default options; the
//!   numeric behavior is covered in `growth::models::sigmoid` and in the
//!   integration tests under `tests/`.
use crate::growth::{
    core::{
        data::GrowthData,
        forecasts::ForecastResult,
        options::ForecastOptions,
        params::SigmoidParams,
        validation::validate_horizon,
    },
    errors::GrowthResult,
    models::sigmoid::{SigmoidFit, SigmoidModel},
};

/// forecast — fit a sigmoid and extrapolate it with a confidence band.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   Observation indices (typically day numbers); any order.
/// - `y`: `&[f64]`
///   Observed values aligned with `x`.
/// - `initial_guess`: `(f64, f64, f64)`
///   Starting `(L, k, x0)` for the optimizer.
/// - `opts`: `&ForecastOptions`
///   Horizon, confidence level, and solver options.
///
/// Returns
/// -------
/// `GrowthResult<ForecastResult>`
///   Grid, point forecast, upper and lower bounds (all equal length), plus
///   fitted parameters and diagnostics.
///
/// Errors
/// ------
/// - `InputError::*` for mismatched lengths, non-finite data or guess,
///   `days_ahead == 0`, confidence outside (0, 1), or an empty/oversized
///   grid.
/// - `InputError::EmptyHorizon` when `floor(max x) + days_ahead < 1`, e.g. a
///   history on all-negative indices with a short horizon. The grid starts
///   at 1, so there would be nothing to forecast; this is reported instead
///   of returning four empty sequences.
/// - `FittingError::InsufficientData` for fewer than three points.
/// - `FittingError::NotConverged` / `FittingError::Solver` /
///   `FittingError::NonFiniteParams` / `FittingError::Inference` when the
///   fit fails.
///
/// Examples
/// --------
/// ```
/// use growth_forecaster::growth::{forecast, ForecastOptions};
///
/// let x: Vec<f64> = (1..=10).map(f64::from).collect();
/// let y: Vec<f64> = x.iter().map(|&xi| 100.0 / (1.0 + (-0.5 * (xi - 5.0)).exp())).collect();
/// let opts = ForecastOptions { days_ahead: 5, ..ForecastOptions::default() };
///
/// let result = forecast(&x, &y, (90.0, 0.4, 4.0), &opts)?;
/// assert_eq!(result.len(), 15);
/// assert!((result.params.l - 100.0).abs() < 0.1);
/// # Ok::<(), growth_forecaster::growth::GrowthError>(())
/// ```
pub fn forecast(
    x: &[f64], y: &[f64], initial_guess: (f64, f64, f64), opts: &ForecastOptions,
) -> GrowthResult<ForecastResult> {
    let data = GrowthData::from_slices(x, y)?;
    let guess = SigmoidParams::try_from(initial_guess)?;
    opts.validate()?;
    validate_horizon(data.last_index(), opts.days_ahead)?;
    let fit: SigmoidFit = SigmoidModel::new(opts.lsq_opts.clone()).fit(&data, guess)?;
    fit.forecast(&data, opts.days_ahead, opts.confidence)
}

/// [`forecast`] with `days_ahead = 90`, `confidence = 0.95`, and default
/// solver options.
pub fn forecast_with_defaults(
    x: &[f64], y: &[f64], initial_guess: (f64, f64, f64),
) -> GrowthResult<ForecastResult> {
    forecast(x, y, initial_guess, &ForecastOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::errors::{FittingError, GrowthError, InputError};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation order at the public entry point.
    // - The default horizon of `forecast_with_defaults`.
    // -------------------------------------------------------------------------

    fn logistic_series() -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (1..=12).map(f64::from).collect();
        let y = x.iter().map(|&xi| 80.0 / (1.0 + (-0.6 * (xi - 6.0)).exp())).collect();
        (x, y)
    }

    #[test]
    // Purpose
    // -------
    // Verify that input errors win over fitting errors and are reported in
    // the documented order.
    //
    // Given
    // -----
    // - Combinations of bad lengths, short series, NaN guesses, zero
    //   horizons, and bad confidence.
    //
    // Expect
    // ------
    // - Length mismatch first, then insufficient data, then guess, then
    //   horizon, then confidence.
    fn forecast_validates_in_documented_order() {
        // Arrange
        let bad_conf = ForecastOptions { confidence: 1.2, ..ForecastOptions::default() };
        let zero_days =
            ForecastOptions { days_ahead: 0, confidence: 1.2, ..ForecastOptions::default() };
        let (x, y) = logistic_series();

        // Act / Assert
        assert!(matches!(
            forecast(&[1.0, 2.0], &[1.0], (1.0, 1.0, 1.0), &bad_conf),
            Err(GrowthError::Input(InputError::LengthMismatch { .. }))
        ));
        assert!(matches!(
            forecast(&[1.0, 2.0], &[1.0, 2.0], (f64::NAN, 1.0, 1.0), &bad_conf),
            Err(GrowthError::Fitting(FittingError::InsufficientData { len: 2, required: 3 }))
        ));
        assert!(matches!(
            forecast(&x, &y, (f64::NAN, 1.0, 1.0), &zero_days),
            Err(GrowthError::Input(InputError::NonFiniteGuess { .. }))
        ));
        assert!(matches!(
            forecast(&x, &y, (70.0, 0.5, 5.0), &zero_days),
            Err(GrowthError::Input(InputError::InvalidDaysAhead { days_ahead: 0 }))
        ));
        assert!(matches!(
            forecast(&x, &y, (70.0, 0.5, 5.0), &bad_conf),
            Err(GrowthError::Input(InputError::InvalidConfidence { .. }))
        ));
    }

    #[test]
    fn forecast_rejects_empty_grid_before_fitting() {
        let x = [-50.0, -40.0, -30.0];
        let y = [1.0, 2.0, 3.0];
        let opts = ForecastOptions { days_ahead: 5, ..ForecastOptions::default() };

        let err = forecast(&x, &y, (3.0, 0.1, -40.0), &opts);

        assert!(matches!(err, Err(GrowthError::Input(InputError::EmptyHorizon { .. }))));
    }

    #[test]
    fn forecast_with_defaults_uses_ninety_day_horizon() {
        let (x, y) = logistic_series();

        let result = forecast_with_defaults(&x, &y, (70.0, 0.5, 5.0)).expect("fit should converge");

        assert_eq!(result.len(), 12 + 90);
        assert_eq!(result.forecast.len(), result.upper.len());
        assert_eq!(result.lower.len(), result.future_indices.len());
        assert!((result.z - 1.959_964).abs() < 1e-5);
    }
}
