//! CJS model: log-likelihood, dual-number gradient, and MLE fitting.
//!
//! This module wires the generic likelihood engine in `cjs::core` to the
//! [`LogLikelihood`] trait. The optimizer maximizes `ℓ(θ) = -NLL(θ)` in the
//! unconstrained θ-space; probabilities are recovered with the logit link.
//!
//! Key ideas:
//! - `value` runs the engine on `f64`.
//! - `grad` runs the same engine on [`Dual`] once per θ coordinate (forward
//!   mode), so the gradient is exact up to floating point and never needs a
//!   hand-derived chain rule.
//! - Data is only borrowed; the model holds configuration and fit results,
//!   so a single [`CJSData`] can back any number of models.
use crate::{
    cjs::{
        core::{
            data::CJSData,
            dual::Dual,
            likelihood::{IndividualContribution, individual_contributions, objective},
            options::CJSOptions,
            params::{CJSFittedParams, CJSParams, ModelVariant, validate_theta},
        },
        errors::{CJSError, CJSResult},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::safe_logit,
    },
};
use ndarray::Array1;

/// `CJSModel` — Cormack–Jolly–Seber survival model with constant survival
/// and time-constant or time-varying detection.
///
/// [`results`](Self::results) stores the last optimization outcome and
/// [`fitted_params`](Self::fitted_params) the probability-scale estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct CJSModel {
    pub variant: ModelVariant,
    pub options: CJSOptions,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fitted probabilities (populated after `fit`).
    pub fitted_params: Option<CJSFittedParams>,
}

impl CJSModel {
    pub fn new(variant: ModelVariant, options: CJSOptions) -> Self {
        Self { variant, options, results: None, fitted_params: None }
    }

    /// Length of θ for `data` under this model's variant.
    pub fn n_params(&self, data: &CJSData) -> usize {
        self.variant.n_params(data.n_occasions())
    }

    /// Build θ from probability-scale starting values.
    ///
    /// Every detection entry of a time-varying model starts at `p0`.
    /// Probabilities are clamped away from 0 and 1 before the logit.
    pub fn theta_from_probs(&self, phi0: f64, p0: f64, data: &CJSData) -> Theta {
        let n = self.n_params(data);
        let mut theta = Array1::from_elem(n, safe_logit(p0));
        theta[0] = safe_logit(phi0);
        theta
    }

    /// Negative log-likelihood at raw θ.
    pub fn nll(&self, theta: &Theta, data: &CJSData) -> CJSResult<f64> {
        objective(data, &theta.to_vec(), self.variant, self.options.eval_mode)
    }

    /// Per-individual likelihood contributions at raw θ.
    pub fn contributions(
        &self, theta: &Theta, data: &CJSData,
    ) -> CJSResult<Vec<IndividualContribution<f64>>> {
        let params = CJSParams::from_theta(&theta.to_vec(), self.variant, data.n_occasions())?;
        individual_contributions(data, &params, self.options.eval_mode)
    }

    /// Fit by maximum likelihood (consumes `theta0`) and cache results.
    ///
    /// On success `self.results` holds the optimizer outcome (including
    /// `theta_hat`) and `self.fitted_params` the estimates on the
    /// probability scale.
    ///
    /// # Errors
    /// - Structural θ / data problems reported by `check` before the run.
    /// - Optimizer failures from [`maximize`].
    pub fn fit(&mut self, theta0: Theta, data: &CJSData) -> OptResult<()> {
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        let fitted =
            CJSFittedParams::from_theta(&outcome.theta_hat, self.variant, data.n_occasions())?;
        log::debug!(
            "CJS fit ({:?}): ll = {:.6}, iterations = {}, status = {}, phi = {:.4}",
            self.variant,
            outcome.value,
            outcome.iterations,
            outcome.status,
            fitted.phi
        );
        self.results = Some(outcome);
        self.fitted_params = Some(fitted);
        Ok(())
    }

    /// Fitted probabilities.
    ///
    /// # Errors
    /// - [`CJSError::ModelNotFitted`] before a successful `fit`.
    pub fn fitted_params(&self) -> CJSResult<&CJSFittedParams> {
        self.fitted_params.as_ref().ok_or(CJSError::ModelNotFitted)
    }
}

impl LogLikelihood for CJSModel {
    type Data = CJSData;

    /// `ℓ(θ) = -NLL(θ)`; `-∞` when some individual has zero likelihood.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(-self.nll(theta, data)?)
    }

    /// Checks θ length against the variant and finiteness of every entry.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(&theta.to_vec(), self.variant, data.n_occasions())?;
        Ok(())
    }

    /// `∇ℓ(θ)` by forward-mode differentiation: one dual pass per coordinate.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let n = theta.len();
        let mut grad = Array1::zeros(n);
        let mut seeded: Vec<Dual> = theta.iter().map(|&t| Dual::constant(t)).collect();
        for k in 0..n {
            seeded[k].dot = 1.0;
            let nll = objective(data, &seeded, self.variant, self.options.eval_mode)?;
            grad[k] = -nll.dot;
            seeded[k].dot = 0.0;
        }
        Ok(grad)
    }
}
