//! Maximum-likelihood fitting for the models in [`crate::cjs`].
//!
//! - [`loglik_optimizer`]: the [`LogLikelihood`](loglik_optimizer::LogLikelihood)
//!   contract and [`maximize`](loglik_optimizer::maximize), an L-BFGS run on
//!   argmin.
//! - [`numerical_stability`]: a clamped `f64` logit, used to build starting
//!   values from guessed probabilities.
//! - [`errors`]: [`OptError`](errors::OptError), which absorbs argmin
//!   failures and `CJSError`s so `fit` has one error type.
//!
//! The optimizer minimizes `c(θ) = -ℓ(θ)` internally; everything a caller
//! sees (values, gradients, outcomes) is in terms of `ℓ`. A `-∞`
//! log-likelihood is a valid, terrible point. `NaN` is always an error.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

/// `use rust_capture_recapture::optimization::prelude::*;`
pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
