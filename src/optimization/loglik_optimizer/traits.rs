//! The contract between a model and the optimizer, plus its configuration.
//!
//! A model implements [`LogLikelihood`]; callers describe the run with
//! [`MLEOptions`] (stopping rules in [`Tolerances`], a [`LineSearcher`], and
//! the L-BFGS memory) and receive an [`OptimOutcome`].
//!
//! Everything here is phrased in terms of the log-likelihood `ℓ(θ)`. The
//! adapter is the only place that negates it into an argmin cost.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// A log-likelihood `ℓ(θ)` over an unconstrained parameter vector.
///
/// `value` may return `-∞` for a θ under which the data are impossible; the
/// optimizer treats that as an infinitely bad point rather than an error.
/// `check` is called once on θ₀ and should reject structurally invalid
/// input (wrong length, non-finite entries, data the model cannot use).
///
/// `grad` returns `∇ℓ(θ)`. The default reports
/// [`OptError::GradientNotImplemented`], which switches the adapter to
/// finite differences.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS. Parsed case-insensitively from
/// `"MoreThuente"` or `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("morethuente") {
            Ok(LineSearcher::MoreThuente)
        } else if s.eq_ignore_ascii_case("hagerzhang") {
            Ok(LineSearcher::HagerZhang)
        } else {
            Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "expected 'MoreThuente' or 'HagerZhang' (any case)",
            })
        }
    }
}

/// Optimizer configuration.
///
/// `verbose` only has an effect with the `obs_slog` feature. `lbfgs_mem:
/// None` uses [`DEFAULT_LBFGS_MEM`](crate::optimization::loglik_optimizer::DEFAULT_LBFGS_MEM).
///
/// The default stops at `|∇c| < 1e-6` or after 300 iterations, with
/// More–Thuente line search.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] for `lbfgs_mem == Some(0)`. Tolerances
    /// are validated by [`Tolerances::new`].
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS needs at least one stored correction pair",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. At least one must be set.
///
/// - `tol_grad`: stop once the cost gradient norm drops below it.
/// - `tol_cost`: stop once successive costs differ by less than it.
/// - `max_iter`: hard iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when every rule is `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for a
    ///   tolerance that is not finite and positive.
    /// - [`OptError::InvalidMaxIter`] for `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "the iteration cap must allow at least one step",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Result of [`maximize`](crate::optimization::loglik_optimizer::maximize).
///
/// `value` is the best log-likelihood `ℓ(θ̂)`, not the argmin cost.
/// `converged` is `false` only when the solver stopped without a
/// termination reason; `status` holds the reason as text.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    /// argmin evaluation counters (`cost_count`, `gradient_count`, ...).
    pub fn_evals: FnEvalMap,
    /// Norm of the last cost gradient, if the solver kept one.
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// # Errors
    /// - `MissingThetaHat` / `InvalidThetaHat` for an absent or non-finite θ̂.
    /// - `NonFiniteCost` for a non-finite best value.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, status: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let converged = !matches!(status, TerminationStatus::NotTerminated);
        let status = match status {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            TerminationStatus::Terminated(reason) => format!("{reason:?}"),
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}
