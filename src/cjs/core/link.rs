//! Link transform: raw (unconstrained) parameters to probabilities.
//!
//! Every probability in the model is the logistic image of a raw θ entry,
//! `σ(b) = 1 / (1 + exp(-b))`. The transform is generic over [`Scalar`] so
//! derivatives propagate through it when the engine runs on dual numbers.
use crate::cjs::core::scalar::Scalar;

/// Inverse-logit `σ(b) = 1 / (1 + exp(-b))`, mapping ℝ onto (0, 1).
///
/// Branches on the sign of `b` so that only `exp` of a non-positive argument
/// is ever taken: for very negative `b` the result saturates to `0` and for
/// very positive `b` to `1` without producing `inf / inf`.
#[inline]
pub fn logit_link<S: Scalar>(b: S) -> S {
    let one = S::one();
    if b.value() >= 0.0 {
        one / (one + (-b).exp())
    } else {
        let e = b.exp();
        e / (one + e)
    }
}

/// Apply [`logit_link`] element-wise.
pub fn logit_link_all<S: Scalar>(raw: &[S]) -> Vec<S> {
    raw.iter().map(|&b| logit_link(b)).collect()
}
