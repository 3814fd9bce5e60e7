//! core — CJS data, parameters, matrices, and the forward recursion.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks of the Cormack–Jolly–Seber hidden
//! Markov model: validated capture-history containers, the θ → probability
//! link, the transition / emission matrices, the per-individual forward
//! recursion, and the likelihood aggregator. The model layer
//! (`cjs::models`) wires these into the log-likelihood optimizer.
//!
//! Key behaviors
//! -------------
//! - [`CJSData`] / [`CaptureHistory`] validate dimensions and codes once, at
//!   construction.
//! - [`CJSParams::from_theta`] validates θ against a [`ModelVariant`] and
//!   maps it through [`logit_link`].
//! - [`forward_pass`] computes one individual's likelihood;
//!   [`negative_log_likelihood`] sums log-contributions over individuals,
//!   serially or on rayon ([`EvalMode`]), with identical results.
//! - Every numerical function is generic over [`Scalar`], implemented for
//!   `f64` and the forward-mode [`Dual`] number.
//!
//! Invariants & assumptions
//! ------------------------
//! - Two hidden states, Alive and Dead; Dead is absorbing and never detected.
//! - For probabilities in [0, 1], rows of `A` and the per-state emission
//!   distributions (columns of `B`) sum to 1, and each `Lᵢ ∈ [0, 1]`.
//! - A zero `Lᵢ` is reported as `+∞` NLL and a flagged contribution.
//!
//! Conventions
//! -----------
//! - Grid indices are 0-based; first-capture occasions are 1-based as
//!   supplied by callers.
//! - This module performs no I/O. The only logging is a `log::warn!` per
//!   degenerate individual.

pub mod data;
pub mod dual;
pub mod forward;
pub mod likelihood;
pub mod link;
pub mod matrices;
pub mod options;
pub mod params;
pub mod scalar;
pub mod states;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{CJSData, CaptureHistory};
pub use self::dual::Dual;
pub use self::forward::{ForwardVector, forward_pass};
pub use self::likelihood::{
    IndividualContribution, individual_contributions, negative_log_likelihood, objective,
};
pub use self::link::logit_link;
pub use self::matrices::{
    EmissionSchedule, Matrix2, emission_at, emission_matrix, first_encounter_matrix,
    transition_matrix,
};
pub use self::options::{CJSOptions, EvalMode};
pub use self::params::{CJSFittedParams, CJSParams, DetectionProbs, ModelVariant};
pub use self::scalar::Scalar;
pub use self::states::{HiddenState, Observation};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::{CJSData, CaptureHistory};
    pub use super::likelihood::negative_log_likelihood;
    pub use super::options::{CJSOptions, EvalMode};
    pub use super::params::{CJSFittedParams, CJSParams, DetectionProbs, ModelVariant};
    pub use super::scalar::Scalar;
    pub use super::states::{HiddenState, Observation};
}
