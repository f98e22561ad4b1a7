//! Adapter that exposes a user `ResidualModel` as an `argmin` problem.
//!
//! The residual vector `r(θ) = f(θ) − y` is exposed through `Operator`, the
//! sum of squares `S(θ) = Σᵢ rᵢ²` through `CostFunction`, and the residual
//! Jacobian through `Jacobian`. If the model does not provide an analytic
//! Jacobian, we finite-difference the **residual** closure.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    least_squares::{
        finite_diff::compute_jacobian,
        traits::ResidualModel,
        types::{Cost, Jacobian, Residuals, Theta},
        validation::{validate_jacobian, validate_residuals},
    },
};
use argmin::core::{CostFunction, Error, Jacobian as ArgminJacobian, Operator};

/// Bridges a user `ResidualModel` to `argmin`'s `Operator`, `CostFunction`
/// and `Jacobian` traits.
///
/// - `Operator::apply` returns validated residuals `r(θ)`.
/// - `CostFunction::cost` returns `Σ rᵢ(θ)²`.
/// - `Jacobian::jacobian` returns:
///   - the model's analytic `∂r/∂θ` if implemented, or
///   - a finite-difference Jacobian of the residual map.
#[derive(Debug, Clone)]
pub struct LsqAdapter<'a, M: ResidualModel> {
    pub model: &'a M,
    pub data: &'a M::Data,
    n_obs: usize,
}

impl<'a, M: ResidualModel> LsqAdapter<'a, M> {
    /// Construct a new adapter over a user `ResidualModel` and its data.
    pub fn new(model: &'a M, data: &'a M::Data) -> Self {
        let n_obs = model.n_obs(data);
        Self { model, data, n_obs }
    }

    /// Number of residuals produced per evaluation.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }
}

impl<'a, M: ResidualModel> Operator for LsqAdapter<'a, M> {
    type Param = Theta;
    type Output = Residuals;

    /// Evaluate `r(θ)` and check its length and finiteness.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the model's `residuals`.
    /// - `OptError::ResidualDimMismatch` / `OptError::NonFiniteResidual`
    ///   from validation.
    fn apply(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let residuals = self.model.residuals(theta, self.data)?;
        validate_residuals(&residuals, self.n_obs)?;
        Ok(residuals)
    }
}

impl<'a, M: ResidualModel> CostFunction for LsqAdapter<'a, M> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the sum of squared residuals at `θ`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let residuals = self.apply(theta)?;
        let output = residuals.dot(&residuals);
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, M: ResidualModel> ArgminJacobian for LsqAdapter<'a, M> {
    type Param = Theta;
    type Jacobian = Jacobian;

    /// Evaluate the residual Jacobian at `θ`.
    ///
    /// Behavior:
    /// - If the model implements `jacobian(θ, data)`, we validate it against
    ///   `(n_obs, n_params)` and return it.
    /// - Otherwise we difference the residual closure (central first, forward
    ///   as fallback). The closure cannot return `Result`, so the first error
    ///   is captured in `closure_err` and a `NaN` vector is returned in its
    ///   place.
    ///
    /// # Errors
    /// - Propagates model errors other than `JacobianNotImplemented`.
    /// - Propagates errors raised by residual evaluations during differencing.
    /// - Returns validation errors for wrong shape or non-finite entries.
    fn jacobian(&self, theta: &Self::Param) -> Result<Self::Jacobian, Error> {
        let n_params = theta.len();
        match self.model.jacobian(theta, self.data) {
            Ok(jac) => {
                validate_jacobian(&jac, self.n_obs, n_params)?;
                Ok(jac)
            }
            Err(OptError::JacobianNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let residual_func = |theta: &Theta| -> Residuals {
                    match self.apply(theta) {
                        Ok(r) => r,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            Residuals::from_elem(self.n_obs, f64::NAN)
                        }
                    }
                };
                Ok(compute_jacobian(theta, &residual_func, self.n_obs, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Residual and cost evaluation through the argmin traits.
    // - Analytic Jacobian pass-through and finite-difference fallback.
    // - Propagation of model errors and residual validation failures.
    // -------------------------------------------------------------------------

    /// Straight line `a + b x` with optional analytic Jacobian.
    struct Line {
        analytic: bool,
    }

    struct LineData {
        x: Array1<f64>,
        y: Array1<f64>,
    }

    impl ResidualModel for Line {
        type Data = LineData;

        fn n_obs(&self, data: &LineData) -> usize {
            data.y.len()
        }

        fn residuals(&self, theta: &Theta, data: &LineData) -> OptResult<Residuals> {
            Ok(data.x.mapv(|xi| theta[0] + theta[1] * xi) - &data.y)
        }

        fn check(&self, _theta: &Theta, _data: &LineData) -> OptResult<()> {
            Ok(())
        }

        fn jacobian(&self, _theta: &Theta, data: &LineData) -> OptResult<Jacobian> {
            if !self.analytic {
                return Err(OptError::JacobianNotImplemented);
            }
            let mut jac = Array2::<f64>::ones((data.x.len(), 2));
            jac.column_mut(1).assign(&data.x);
            Ok(jac)
        }
    }

    fn line_data() -> LineData {
        LineData { x: array![0.0, 1.0, 2.0, 3.0], y: array![1.0, 3.0, 5.0, 7.0] }
    }

    #[test]
    // Purpose
    // -------
    // Check residuals and SSE for a line that is off by a constant.
    //
    // Given
    // -----
    // - y = 1 + 2x and θ = (2, 2), so every residual equals 1.
    //
    // Expect
    // ------
    // - `apply` returns four ones; `cost` returns 4.
    fn apply_and_cost_use_model_minus_observation() {
        // Arrange
        let model = Line { analytic: true };
        let data = line_data();
        let adapter = LsqAdapter::new(&model, &data);
        let theta = array![2.0, 2.0];

        // Act
        let r = adapter.apply(&theta).expect("residuals should evaluate");
        let c = adapter.cost(&theta).expect("cost should evaluate");

        // Assert
        assert_eq!(r, array![1.0, 1.0, 1.0, 1.0]);
        assert!((c - 4.0).abs() < 1e-12);
        assert_eq!(adapter.n_obs(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Verify the finite-difference fallback agrees with the analytic
    // Jacobian when the model does not implement one.
    //
    // Given
    // -----
    // - The same line model with and without an analytic Jacobian.
    //
    // Expect
    // ------
    // - Both Jacobians have shape (4, 2) and agree to 1e-6.
    fn jacobian_falls_back_to_finite_differences() {
        // Arrange
        let data = line_data();
        let analytic = Line { analytic: true };
        let numeric = Line { analytic: false };
        let theta = array![0.5, 1.5];

        // Act
        let ja = LsqAdapter::new(&analytic, &data).jacobian(&theta).expect("analytic Jacobian");
        let jn = LsqAdapter::new(&numeric, &data).jacobian(&theta).expect("FD Jacobian");

        // Assert
        assert_eq!(ja.dim(), (4, 2));
        assert_eq!(jn.dim(), (4, 2));
        for (a, n) in ja.iter().zip(jn.iter()) {
            assert!((a - n).abs() < 1e-6);
        }
    }

    #[test]
    fn apply_reports_non_finite_residuals() {
        let model = Line { analytic: true };
        let data = LineData { x: array![0.0, 1.0], y: array![0.0, f64::NAN] };
        let adapter = LsqAdapter::new(&model, &data);

        let err = adapter.apply(&array![0.0, 1.0]).expect_err("NaN observation must fail");

        assert!(matches!(
            OptError::from(err),
            OptError::NonFiniteResidual { index: 1, .. }
        ));
    }
}
