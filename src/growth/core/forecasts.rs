//! Forecast grid, band construction, and the forecast result container.
//!
//! Purpose
//! -------
//! Hold the pieces of a growth forecast that do not depend on how the curve
//! was fitted: the index grid, the symmetric residual band, and the
//! [`ForecastResult`] returned to callers.
//!
//! Key behaviors
//! -------------
//! - [`future_indices`] builds the grid `1, 2, …, floor(last_index) + days_ahead`.
//!   The grid starts at 1 and therefore overlaps the observed history; the
//!   returned curve covers history and future together.
//! - [`symmetric_band`] offsets a point forecast by `±half_width`, the same
//!   amount at every index.
//!
//! Invariants & assumptions
//! ------------------------
//! - All four sequences in a [`ForecastResult`] have equal length.
//! - `lower[i] ≤ forecast[i] ≤ upper[i]`, with equality only when the
//!   half-width is zero.
//!
//! Testing notes
//! -------------
//! - Unit tests cover grid construction (including fractional last
//!   indices) and band ordering.
use crate::{
    growth::{core::params::SigmoidParams, core::validation::validate_horizon, errors::GrowthResult},
    optimization::least_squares::FitOutcome,
};
use ndarray::Array1;

/// Build the forecast index grid `1..=floor(last_index) + days_ahead`.
///
/// # Errors
/// - `InputError::EmptyHorizon` if the grid would be empty.
/// - `InputError::HorizonTooLong` if it would exceed the supported size.
///
/// # Examples
/// ```
/// use growth_forecaster::growth::core::forecasts::future_indices;
///
/// let grid = future_indices(10.0, 5).unwrap();
/// assert_eq!(grid.len(), 15);
/// assert_eq!(grid[0], 1.0);
/// assert_eq!(grid[14], 15.0);
/// ```
pub fn future_indices(last_index: f64, days_ahead: usize) -> GrowthResult<Array1<f64>> {
    let count = validate_horizon(last_index, days_ahead)?;
    Ok(Array1::from_iter((1..=count).map(|i| i as f64)))
}

/// Offset `forecast` by `±half_width`, returning `(upper, lower)`.
pub fn symmetric_band(forecast: &Array1<f64>, half_width: f64) -> (Array1<f64>, Array1<f64>) {
    let upper = forecast.mapv(|f| f + half_width);
    let lower = forecast.mapv(|f| f - half_width);
    (upper, lower)
}

/// `ForecastResult` — fitted curve over the forecast grid with a band.
///
/// Fields
/// ------
/// - `future_indices`: grid `1..=floor(last_index) + days_ahead`.
/// - `forecast`: fitted sigmoid evaluated on the grid.
/// - `upper` / `lower`: `forecast ± z·sigma`.
/// - `params`: fitted `(L, k, x0)`.
/// - `sigma`: in-sample residual RMS (population divisor).
/// - `z`: two-sided standard-normal quantile for the requested confidence.
/// - `outcome`: optimizer diagnostics.
/// - `clamped_points`: number of grid points whose logistic argument hit
///   the overflow clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub future_indices: Array1<f64>,
    pub forecast: Array1<f64>,
    pub upper: Array1<f64>,
    pub lower: Array1<f64>,
    pub params: SigmoidParams,
    pub sigma: f64,
    pub z: f64,
    pub outcome: FitOutcome,
    pub clamped_points: usize,
}

impl ForecastResult {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.future_indices.len()
    }

    /// `true` only for an empty grid, which validated inputs never produce.
    pub fn is_empty(&self) -> bool {
        self.future_indices.is_empty()
    }

    /// Band half-width `z·sigma`.
    pub fn half_width(&self) -> f64 {
        self.z * self.sigma
    }

    /// The four aligned sequences `(future_indices, forecast, upper, lower)`.
    pub fn into_sequences(self) -> (Array1<f64>, Array1<f64>, Array1<f64>, Array1<f64>) {
        (self.future_indices, self.forecast, self.upper, self.lower)
    }
}
