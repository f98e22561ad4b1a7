//! models — fitted growth curves.
//!
//! Purpose
//! -------
//! Collect model types that fit a growth curve to a [`GrowthData`] series and
//! extrapolate it. Currently this is the logistic model in [`sigmoid`], which
//! implements `ResidualModel` and is fitted by the crate's
//! Levenberg–Marquardt engine.
//!
//! Downstream usage
//! ----------------
//! - Build a [`SigmoidModel`], call [`SigmoidModel::fit`] with data and an
//!   initial guess, then [`SigmoidFit::forecast`].
//! - The one-call entry point `growth::forecaster::forecast` wraps these
//!   steps.
//!
//! [`GrowthData`]: crate::growth::core::GrowthData

pub mod sigmoid;

pub use self::sigmoid::{SigmoidFit, SigmoidModel, count_clamped, sigmoid, sigmoid_array};
