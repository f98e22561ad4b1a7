//! Observation containers for growth-curve fitting.
//!
//! Purpose
//! -------
//! Provide a small, validated container for `(index, value)` observation
//! series used by the sigmoid growth model. This module is the single place
//! where raw caller data enters the fitting stack.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` and `y` have equal length of at least three.
//! - Every entry of `x` and `y` is finite.
//! - No monotonicity or spacing is assumed for `x`; the model fits what it
//!   is given.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction from arrays and slices, the derived
//!   `last_index`, and error reporting.
use crate::growth::{core::validation::validate_series, errors::GrowthResult};
use ndarray::{Array1, ArrayView1};

/// `GrowthData` — validated observation series.
///
/// Fields
/// ------
/// - `x`: `Array1<f64>`
///   Time indices (typically integer day numbers).
/// - `y`: `Array1<f64>`
///   Observed values aligned with `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthData {
    /// Time indices.
    pub x: Array1<f64>,
    /// Observed values.
    pub y: Array1<f64>,
}

impl GrowthData {
    /// Construct a validated [`GrowthData`] instance.
    ///
    /// Errors
    /// ------
    /// - `InputError::LengthMismatch` if `x.len() != y.len()`.
    /// - `InputError::NonFiniteIndex` / `InputError::NonFiniteValue` for
    ///   the first NaN/±inf entry.
    /// - `FittingError::InsufficientData` for fewer than three points.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use growth_forecaster::growth::core::data::GrowthData;
    /// let data = GrowthData::new(array![1.0, 2.0, 3.0], array![5.0, 9.0, 20.0]).unwrap();
    /// assert_eq!(data.last_index(), 3.0);
    /// ```
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> GrowthResult<Self> {
        validate_series(x.view(), y.view())?;
        Ok(GrowthData { x, y })
    }

    /// Copy two slices into a validated [`GrowthData`]; caller data is not
    /// modified.
    pub fn from_slices(x: &[f64], y: &[f64]) -> GrowthResult<Self> {
        validate_series(ArrayView1::from(x), ArrayView1::from(y))?;
        Ok(GrowthData { x: Array1::from(x.to_vec()), y: Array1::from(y.to_vec()) })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false` for a validated series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest observed index, `max(x)`.
    pub fn last_index(&self) -> f64 {
        self.x.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
