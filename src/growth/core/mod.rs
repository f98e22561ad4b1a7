//! core — data, parameters, options, validation, and forecast containers.
//!
//! Purpose
//! -------
//! Collect the model-independent building blocks of the growth forecaster:
//! validated observation series ([`GrowthData`]), logistic parameters
//! ([`SigmoidParams`]), configuration ([`ForecastOptions`]), the forecast
//! grid and band helpers, and the result container ([`ForecastResult`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything that leaves this module has passed the checks in
//!   [`validation`]; model code does not re-validate basic properties.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based for error reporting; forecast grid values are
//!   1-based index labels.
//! - This module avoids I/O and logging.

pub mod data;
pub mod forecasts;
pub mod options;
pub mod params;
pub mod validation;

pub use self::data::GrowthData;
pub use self::forecasts::{ForecastResult, future_indices, symmetric_band};
pub use self::options::{DEFAULT_CONFIDENCE, DEFAULT_DAYS_AHEAD, ForecastOptions};
pub use self::params::SigmoidParams;
