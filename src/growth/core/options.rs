//! Forecast configuration.
//!
//! [`ForecastOptions`] bundles the horizon, the band confidence level, and
//! the least-squares solver options. It is built through a validating
//! constructor and has a `Default` matching the documented defaults
//! (`days_ahead = 90`, `confidence = 0.95`, default solver options).
use crate::{
    growth::{
        core::validation::{validate_confidence, validate_days_ahead},
        errors::GrowthResult,
    },
    optimization::least_squares::LsqOptions,
};

/// Default forecast horizon in index steps.
pub const DEFAULT_DAYS_AHEAD: usize = 90;

/// Default two-sided band confidence.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Options for [`forecast`](crate::growth::forecaster::forecast).
///
/// Fields
/// ------
/// - `days_ahead`: steps beyond the last observed index (≥ 1).
/// - `confidence`: band coverage in (0, 1).
/// - `lsq_opts`: Levenberg–Marquardt configuration (tolerances, damping,
///   iteration and time budgets, verbosity).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOptions {
    pub days_ahead: usize,
    pub confidence: f64,
    pub lsq_opts: LsqOptions,
}

impl ForecastOptions {
    /// Create validated forecast options.
    ///
    /// # Errors
    /// - `InputError::InvalidDaysAhead` if `days_ahead == 0`.
    /// - `InputError::InvalidConfidence` if `confidence ∉ (0, 1)`.
    pub fn new(days_ahead: usize, confidence: f64, lsq_opts: LsqOptions) -> GrowthResult<Self> {
        let opts = ForecastOptions { days_ahead, confidence, lsq_opts };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check the horizon and confidence level.
    pub fn validate(&self) -> GrowthResult<()> {
        validate_days_ahead(self.days_ahead)?;
        validate_confidence(self.confidence)?;
        Ok(())
    }
}

impl Default for ForecastOptions {
    fn default() -> Self {
        ForecastOptions {
            days_ahead: DEFAULT_DAYS_AHEAD,
            confidence: DEFAULT_CONFIDENCE,
            lsq_opts: LsqOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::errors::{GrowthError, InputError};

    #[test]
    fn defaults_match_documented_values() {
        let opts = ForecastOptions::default();
        assert_eq!(opts.days_ahead, 90);
        assert_eq!(opts.confidence, 0.95);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn new_checks_horizon_before_confidence() {
        let err = ForecastOptions::new(0, 1.5, LsqOptions::default());
        assert_eq!(err, Err(GrowthError::Input(InputError::InvalidDaysAhead { days_ahead: 0 })));

        let err = ForecastOptions::new(10, 1.5, LsqOptions::default());
        assert!(matches!(err, Err(GrowthError::Input(InputError::InvalidConfidence { .. }))));
    }
}
