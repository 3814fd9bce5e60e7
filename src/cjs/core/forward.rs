//! Forward recursion for one individual.
//!
//! Starting from the first capture `e`, the forward vector is seeded as
//! `α = PROP ⊙ BE[r(state_e)]` with `PROP = (1, 0)` and then advanced once per
//! later occasion `j = e+1 .. K-1`:
//!
//! ```text
//! α ← (α · A) ⊙ B(j)[obs_j]
//! ```
//!
//! The individual's likelihood is `Σ_k α[k]`, summing out the terminal
//! state. Intermediate vectors are never logged; the aggregator takes the log
//! of the final sum only.
use crate::cjs::{
    core::{
        matrices::{EmissionSchedule, Matrix2},
        params::ModelVariant,
        scalar::Scalar,
        states::{HiddenState, Observation},
    },
    errors::{CJSError, CJSResult},
};
use ndarray::ArrayView1;

/// Forward probabilities over (Alive, Dead).
pub type ForwardVector<S> = [S; 2];

/// Initial state distribution: every individual is alive when released.
pub const INITIAL_OCCUPANCY: [f64; 2] = [1.0, 0.0];

/// Seed the forward vector at first capture.
#[inline]
pub fn seed<S: Scalar>(first_state: HiddenState, be: &Matrix2<S>) -> ForwardVector<S> {
    let row = be.row(first_state.first_encounter_row());
    [S::from_f64(INITIAL_OCCUPANCY[0]) * row[0], S::from_f64(INITIAL_OCCUPANCY[1]) * row[1]]
}

/// Row vector times matrix: `α · A`.
#[inline]
pub fn propagate<S: Scalar>(alpha: &ForwardVector<S>, a: &Matrix2<S>) -> ForwardVector<S> {
    [
        alpha[0] * a.get(0, 0) + alpha[1] * a.get(1, 0),
        alpha[0] * a.get(0, 1) + alpha[1] * a.get(1, 1),
    ]
}

/// Element-wise product with the emission row of the observed outcome.
#[inline]
pub fn condition<S: Scalar>(
    alpha: &ForwardVector<S>, b: &Matrix2<S>, obs: Observation,
) -> ForwardVector<S> {
    let row = b.row(obs.row());
    [alpha[0] * row[0], alpha[1] * row[1]]
}

/// Likelihood of one individual's history after its first capture.
///
/// `first_capture` is the 0-based occasion index; observations before it
/// are not read. Performs exactly `K - 1 - first_capture` propagation steps,
/// so a first capture on the last occasion returns the seed mass (1 for an
/// alive release).
///
/// # Errors
/// [`CJSError::ThetaLengthMismatch`] when a per-occasion schedule is too
/// short for the history; checked before the recursion starts.
pub fn forward_pass<S: Scalar>(
    observations: ArrayView1<'_, Observation>, first_capture: usize, first_state: HiddenState,
    transition: &Matrix2<S>, emissions: &EmissionSchedule<S>, be: &Matrix2<S>,
) -> CJSResult<S> {
    let occasions = observations.len();
    if let EmissionSchedule::PerOccasion(bs) = emissions {
        if bs.len() + 1 < occasions {
            return Err(CJSError::ThetaLengthMismatch {
                variant: ModelVariant::TimeVarying,
                expected: occasions,
                actual: bs.len() + 1,
            });
        }
    }

    let mut alpha = seed(first_state, be);
    for j in (first_capture + 1)..occasions {
        alpha = condition(&propagate(&alpha, transition), emissions.at(j), observations[j]);
    }
    Ok(alpha[0] + alpha[1])
}
