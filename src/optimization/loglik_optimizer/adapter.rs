//! [`ArgMinAdapter`]: a [`LogLikelihood`] seen from argmin's side.
//!
//! argmin minimizes, so the adapter reports `c(θ) = -ℓ(θ)` and `-∇ℓ(θ)`.
//! A `-∞` log-likelihood (some capture history is impossible at θ) becomes
//! `c = +∞`, which the line search can step back from. `NaN` and `+∞`
//! log-likelihoods are errors.
//!
//! Models without an analytic gradient get one by finite differences of
//! the cost: central first, forward if central fails.
use std::cell::RefCell;

use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};

/// Borrowed model and data, evaluated on demand by the solver.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Finite-difference gradient of the cost.
    ///
    /// `finitediff` wants an infallible `Fn(&Theta) -> f64`, so the first
    /// error raised by a cost evaluation is held in `failure` and the
    /// evaluation reports `NaN`.
    fn numerical_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let failure: RefCell<Option<Error>> = RefCell::new(None);
        let cost = |t: &Theta| -> f64 {
            self.cost(t).unwrap_or_else(|e| {
                let mut slot = failure.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            })
        };

        let central = theta.central_diff(&cost);
        if failure.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }

        failure.replace(None);
        let forward = theta.forward_diff(&cost);
        if let Some(err) = failure.take() {
            return Err(err);
        }
        validate_grad(&forward, theta.len())?;
        Ok(forward)
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// # Errors
    /// The model's own error, or `NonFiniteCost` for `ℓ(θ)` NaN or `+∞`.
    fn cost(&self, theta: &Theta) -> Result<Cost, Error> {
        let loglik = self.f.value(theta, self.data)?;
        if loglik.is_nan() || loglik == f64::INFINITY {
            return Err(OptError::NonFiniteCost { value: loglik }.into());
        }
        Ok(-loglik)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// # Errors
    /// The model's gradient error (other than `GradientNotImplemented`), a
    /// cost error hit while differencing, or a malformed gradient.
    fn gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.numerical_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // Concave quadratic ℓ(θ) = -Σ (θᵢ - 1)², optionally with its gradient.
    struct Quadratic {
        analytic: bool,
    }

    impl LogLikelihood for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(-theta.iter().map(|t| (t - 1.0).powi(2)).sum::<f64>())
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            if self.analytic {
                Ok(theta.mapv(|t| -2.0 * (t - 1.0)))
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    // ℓ(θ) = -∞ everywhere (a zero-probability data set).
    struct Impossible;

    impl LogLikelihood for Impossible {
        type Data = ();

        fn value(&self, _theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(f64::NEG_INFINITY)
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The cost is the negated log-likelihood.
    fn cost_is_negative_loglik() {
        let f = Quadratic { analytic: true };
        let adapter = ArgMinAdapter::new(&f, &());
        let c = adapter.cost(&array![0.0, 2.0]).unwrap();
        assert!((c - 2.0).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Analytic and finite-difference gradients agree and carry the cost sign.
    //
    // Given
    // -----
    // - θ = (0, 3); ∇ℓ = (2, -4) so ∇c = (-2, 4).
    //
    // Expect
    // ------
    // - Both paths return ≈ (-2, 4).
    fn analytic_and_fd_gradients_agree() {
        let theta = array![0.0, 3.0];
        let analytic = Quadratic { analytic: true };
        let fd = Quadratic { analytic: false };
        let g_a = ArgMinAdapter::new(&analytic, &()).gradient(&theta).unwrap();
        let g_fd = ArgMinAdapter::new(&fd, &()).gradient(&theta).unwrap();
        assert!((g_a[0] + 2.0).abs() < 1e-12);
        assert!((g_a[1] - 4.0).abs() < 1e-12);
        assert!((g_fd[0] - g_a[0]).abs() < 1e-5);
        assert!((g_fd[1] - g_a[1]).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // A `-∞` log-likelihood reaches the solver as an infinite cost rather
    // than an error.
    fn negative_infinite_loglik_becomes_infinite_cost() {
        let adapter = ArgMinAdapter::new(&Impossible, &());
        let c = adapter.cost(&array![0.0]).unwrap();
        assert_eq!(c, f64::INFINITY);
    }
}
