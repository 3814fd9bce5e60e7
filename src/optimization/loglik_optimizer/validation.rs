//! Checks applied to optimizer inputs and to what the solver hands back.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Reason text for a tolerance that is NaN, infinite, or not above zero.
fn tolerance_problem(tol: f64) -> Option<&'static str> {
    if !tol.is_finite() {
        Some("Tolerance must be finite.")
    } else if tol <= 0.0 {
        Some("Tolerance must be positive.")
    } else {
        None
    }
}

/// `None` passes; `Some(tol)` must be finite and `> 0`.
///
/// # Errors
/// [`OptError::InvalidTolGrad`].
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Same rule as [`verify_tol_grad`], for the cost-change tolerance.
///
/// # Errors
/// [`OptError::InvalidTolCost`].
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// A gradient is usable when it has `dim` entries, all finite.
///
/// # Errors
/// [`OptError::GradientDimMismatch`], or [`OptError::InvalidGradient`]
/// naming the first bad entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    if let Some((index, &value)) = grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        });
    }
    Ok(())
}

/// Unwraps the solver's best parameter vector.
///
/// # Errors
/// [`OptError::MissingThetaHat`] or [`OptError::InvalidThetaHat`].
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta_hat = theta_hat.ok_or(OptError::MissingThetaHat)?;
    let first_bad = theta_hat.iter().position(|v| !v.is_finite());
    match first_bad {
        Some(index) => Err(OptError::InvalidThetaHat {
            index,
            value: theta_hat[index],
            reason: "Parameter estimates must be finite.",
        }),
        None => Ok(theta_hat),
    }
}

/// # Errors
/// [`OptError::NonFiniteCost`] for a NaN or infinite best value.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() { Ok(()) } else { Err(OptError::NonFiniteCost { value }) }
}
