//! cjs — Cormack–Jolly–Seber capture-recapture stack.
//!
//! Purpose
//! -------
//! Provide the negative log-likelihood of a two-state (Alive, Dead) hidden
//! Markov model for capture histories with apparent survival `φ` and
//! detection probability `p`, plus a model type that fits it by maximum
//! likelihood through the crate's L-BFGS layer.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated data, the logit link, transition / emission
//!   matrices, the forward recursion, and the likelihood aggregator, all
//!   generic over a [`Scalar`](core::Scalar) so they can be differentiated.
//! - [`models`]: [`CJSModel`], implementing `LogLikelihood` with a
//!   dual-number gradient.
//! - [`errors`]: [`CJSError`] / [`CJSResult`].
//!
//! Downstream usage
//! ----------------
//! 1. Build [`CJSData`] from an occasions × individuals grid, first-capture
//!    occasions and first states.
//! 2. Pick a [`ModelVariant`] and [`CJSOptions`], then `CJSModel::new`.
//! 3. `fit(theta0, &data)`; read `fitted_params()` / `results`.
//!
//! Callers that only need the objective can use
//! [`negative_log_likelihood`](core::negative_log_likelihood) directly.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    CJSData, CJSFittedParams, CJSOptions, CJSParams, CaptureHistory, DetectionProbs, EvalMode,
    HiddenState, ModelVariant, Observation,
};
pub use self::errors::{CJSError, CJSResult};
pub use self::models::CJSModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_capture_recapture::cjs::prelude::*;
//
// to import the main CJS surface in a single line.

pub mod prelude {
    pub use super::{
        CJSData, CJSError, CJSFittedParams, CJSModel, CJSOptions, CJSParams, CJSResult,
        CaptureHistory, DetectionProbs, EvalMode, HiddenState, ModelVariant, Observation,
    };
}
