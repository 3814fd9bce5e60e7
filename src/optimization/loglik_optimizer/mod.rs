//! L-BFGS maximization of a [`LogLikelihood`].
//!
//! A call to [`maximize`] goes through four stages:
//!
//! 1. [`LogLikelihood::check`] on θ₀;
//! 2. [`builders`] picks the line search and applies [`Tolerances`];
//! 3. [`run::run_lbfgs`] drives argmin with an [`adapter::ArgMinAdapter`],
//!    which turns `ℓ` into the cost `-ℓ` and falls back to finite
//!    differences when the model has no gradient;
//! 4. the final state becomes an [`OptimOutcome`] after [`validation`].
//!
//! `CJSModel::fit` is the only in-crate caller; `tests/cjs_pipeline.rs`
//! exercises the whole path.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
