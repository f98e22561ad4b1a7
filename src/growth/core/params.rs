//! Sigmoid parameter container and its mapping to optimizer space.
//!
//! Purpose
//! -------
//! Represent the logistic growth parameters `(L, k, x0)`:
//! - `L`: asymptotic ceiling,
//! - `k`: growth rate,
//! - `x0`: inflection point,
//!
//! and convert them to and from the optimizer vector `θ = [L, k, x0]`.
//!
//! Conventions
//! -----------
//! - The parameterization is the identity: the optimizer works directly on
//!   `(L, k, x0)` without constraints. A negative `k` is a legal (if
//!   degenerate) fit.
use crate::{
    growth::{
        core::validation::validate_guess_component,
        errors::{FittingError, GrowthResult},
    },
    optimization::{errors::OptError, least_squares::Theta},
};
use ndarray::{ArrayView1, array};

/// Number of sigmoid parameters.
pub const N_PARAMS: usize = 3;

/// `SigmoidParams` — logistic curve `L / (1 + exp(-k (x - x0)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidParams {
    /// Asymptotic ceiling `L`.
    pub l: f64,
    /// Growth rate `k`.
    pub k: f64,
    /// Inflection point `x0`.
    pub x0: f64,
}

impl SigmoidParams {
    /// Construct parameters, rejecting non-finite components.
    ///
    /// # Errors
    /// `InputError::NonFiniteGuess` naming the first offending component.
    pub fn new(l: f64, k: f64, x0: f64) -> GrowthResult<Self> {
        let params = SigmoidParams { l, k, x0 };
        params.validate()?;
        Ok(params)
    }

    /// Re-check finiteness (fields are public and may have been edited).
    pub fn validate(&self) -> GrowthResult<()> {
        validate_guess_component("L", self.l)?;
        validate_guess_component("k", self.k)?;
        validate_guess_component("x0", self.x0)?;
        Ok(())
    }

    /// Optimizer vector `[L, k, x0]`.
    pub fn to_theta(&self) -> Theta {
        array![self.l, self.k, self.x0]
    }

    /// Map a fitted optimizer vector back to parameters.
    ///
    /// # Errors
    /// - `FittingError::Solver` if `theta` does not have three entries.
    /// - `FittingError::NonFiniteParams` for the first NaN/±inf entry.
    pub fn from_theta(theta: ArrayView1<f64>) -> GrowthResult<Self> {
        if theta.len() != N_PARAMS {
            return Err(OptError::ThetaLengthMismatch { expected: N_PARAMS, actual: theta.len() }
                .into());
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(FittingError::NonFiniteParams { index, value }.into());
            }
        }
        Ok(SigmoidParams { l: theta[0], k: theta[1], x0: theta[2] })
    }

    /// `(L, k, x0)` as a tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.l, self.k, self.x0)
    }
}

impl TryFrom<(f64, f64, f64)> for SigmoidParams {
    type Error = crate::growth::errors::GrowthError;

    fn try_from((l, k, x0): (f64, f64, f64)) -> GrowthResult<Self> {
        SigmoidParams::new(l, k, x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::errors::{GrowthError, InputError};

    #[test]
    fn theta_mapping_preserves_order() {
        let params = SigmoidParams::new(100.0, 0.5, 5.0).expect("finite params");

        let theta = params.to_theta();

        assert_eq!(theta.to_vec(), vec![100.0, 0.5, 5.0]);
        assert_eq!(SigmoidParams::from_theta(theta.view()), Ok(params));
        assert_eq!(params.as_tuple(), (100.0, 0.5, 5.0));
    }

    #[test]
    fn invalid_inputs_are_classified() {
        assert!(matches!(
            SigmoidParams::try_from((90.0, f64::NAN, 4.0)),
            Err(GrowthError::Input(InputError::NonFiniteGuess { name: "k", .. }))
        ));
        assert!(matches!(
            SigmoidParams::try_from((f64::INFINITY, 0.4, 4.0)),
            Err(GrowthError::Input(InputError::NonFiniteGuess { name: "L", .. }))
        ));
        assert!(matches!(
            SigmoidParams::from_theta(array![1.0, f64::NAN, 2.0].view()),
            Err(GrowthError::Fitting(FittingError::NonFiniteParams { index: 1, .. }))
        ));
        assert!(matches!(
            SigmoidParams::from_theta(array![1.0, 2.0].view()),
            Err(GrowthError::Fitting(FittingError::Solver { .. }))
        ));
    }
}
