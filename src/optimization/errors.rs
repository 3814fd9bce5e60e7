//! optimization::errors — what can go wrong while fitting by maximum likelihood.
//!
//! [`OptError`] is the single error type returned by `maximize` and by every
//! [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! method. Its variants fall into four groups:
//!
//! - solver configuration (`Tolerances`, `MLEOptions`, line-search names);
//! - objective / gradient values that cannot be handed to L-BFGS;
//! - failures raised inside argmin, wrapped as [`OptError::Backend`];
//! - capture-recapture input problems forwarded from [`CJSError`].
//!
//! The `From` impls at the end of the file let model code use `?` on both
//! argmin and CJS results.
use argmin::core::{ArgminError, Error};

use crate::cjs::errors::CJSError;

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// Which argmin failure an [`OptError::Backend`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    InvalidParameter,
    NotImplemented,
    NotInitialized,
    ConditionViolated,
    CheckpointNotFound,
    PotentialBug,
    ImpossibleError,
    /// Anything argmin raised that is not an `ArgminError`.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// The model has no analytic gradient; the adapter falls back to
    /// finite differences.
    GradientNotImplemented,

    GradientDimMismatch { expected: usize, found: usize },

    /// A gradient entry is NaN or infinite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- Solver configuration ----
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// `Tolerances::new(None, None, None)`.
    NoTolerancesProvided,
    InvalidLineSearch { name: String, reason: &'static str },
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Objective and estimates ----
    /// ℓ(θ) was NaN or `+∞`.
    NonFiniteCost { value: f64 },
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },
    /// The solver finished without a best parameter vector.
    MissingThetaHat,

    // ---- argmin ----
    Backend { kind: BackendKind, text: String },

    // ---- Capture-recapture input ----
    /// Data or θ problem reported by the CJS layer, rendered as text.
    InvalidModelInput { text: String },
    ThetaLengthMismatch { expected: usize, actual: usize },
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::GradientNotImplemented => write!(f, "Model provides no analytic gradient"),
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient has length {found}, expected {expected}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Gradient entry {index} = {value} rejected: {reason}")
            }
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Gradient tolerance {tol} rejected: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Cost tolerance {tol} rejected: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Iteration cap {max_iter} rejected: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "At least one stopping rule (tol_grad, tol_cost, max_iter) is required")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Unknown line search '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "L-BFGS memory {mem} rejected: {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Log-likelihood evaluated to {value}")
            }
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Estimate theta_hat[{index}] = {value} rejected: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Solver returned no parameter estimate"),
            OptError::Backend { kind, text } => write!(f, "argmin {kind:?}: {text}"),
            OptError::InvalidModelInput { text } => {
                write!(f, "Invalid capture-recapture input: {text}")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta has length {actual}, expected {expected}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Theta entry {index} = {value} is not finite")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                let (kind, text) = match argmin_err {
                    ArgminError::InvalidParameter { text } => (BackendKind::InvalidParameter, text),
                    ArgminError::NotImplemented { text } => (BackendKind::NotImplemented, text),
                    ArgminError::NotInitialized { text } => (BackendKind::NotInitialized, text),
                    ArgminError::ConditionViolated { text } => {
                        (BackendKind::ConditionViolated, text)
                    }
                    ArgminError::CheckpointNotFound { text } => {
                        (BackendKind::CheckpointNotFound, text)
                    }
                    ArgminError::PotentialBug { text } => (BackendKind::PotentialBug, text),
                    ArgminError::ImpossibleError { text } => (BackendKind::ImpossibleError, text),
                    other => (BackendKind::Other, other.to_string()),
                };
                return OptError::Backend { kind, text };
            }
            Err(err) => err,
        };
        // Errors raised by the adapter are `OptError`s boxed by argmin.
        match err.downcast::<OptError>() {
            Ok(opt_err) => opt_err,
            Err(err) => OptError::Backend { kind: BackendKind::Other, text: err.to_string() },
        }
    }
}

impl From<CJSError> for OptError {
    fn from(err: CJSError) -> Self {
        match err {
            CJSError::ThetaLengthMismatch { expected, actual, .. } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            CJSError::NonFiniteTheta { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            other => OptError::InvalidModelInput { text: other.to_string() },
        }
    }
}
