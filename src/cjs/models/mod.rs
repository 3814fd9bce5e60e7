//! models — user-facing CJS model API.
//!
//! [`CJSModel`] implements
//! [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! on top of `cjs::core` and provides `fit`, probability-scale estimates, and
//! per-individual diagnostics.

pub mod cjs;

pub use self::cjs::CJSModel;

pub mod prelude {
    pub use super::cjs::CJSModel;
}
