//! Parameter layout for CJS models.
//!
//! Raw parameters θ live in the unconstrained space the optimizer works in.
//! [`CJSParams::from_theta`] validates θ against a [`ModelVariant`] and the
//! number of occasions, then maps every entry through
//! [`logit_link`](crate::cjs::core::link::logit_link):
//!
//! - `TimeConstant`: `θ = (logit φ, logit p)`.
//! - `TimeVarying`:  `θ = (logit φ, logit p₂, …, logit p_K)`; the detection
//!   vector holds one entry per occasion after the first.
use crate::cjs::{
    core::{
        link::{logit_link, logit_link_all},
        scalar::Scalar,
    },
    errors::{CJSError, CJSResult},
};
use crate::optimization::loglik_optimizer::Theta;

/// How detection probability varies across occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelVariant {
    /// One detection probability shared by all occasions.
    #[default]
    TimeConstant,
    /// One detection probability per occasion after the first.
    TimeVarying,
}

impl ModelVariant {
    /// Length of θ for a study with `n_occasions` occasions.
    pub fn n_params(self, n_occasions: usize) -> usize {
        match self {
            ModelVariant::TimeConstant => 2,
            ModelVariant::TimeVarying => 1 + n_occasions.saturating_sub(1),
        }
    }

    /// Minimum number of occasions the variant can be fitted on.
    pub fn min_occasions(self) -> usize {
        match self {
            ModelVariant::TimeConstant => 1,
            ModelVariant::TimeVarying => 2,
        }
    }
}

/// Detection probabilities on the probability scale.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionProbs<S> {
    Constant(S),
    /// Entry `j - 1` belongs to 0-based occasion `j`.
    TimeVarying(Vec<S>),
}

impl<S: Scalar> DetectionProbs<S> {
    /// Detection probability at a 0-based occasion, if the layout defines one.
    ///
    /// Time-varying probabilities are undefined at occasion 0 (the first
    /// capture is seeded by the first-encounter matrix instead).
    pub fn at(&self, occasion: usize) -> Option<S> {
        match self {
            DetectionProbs::Constant(p) => Some(*p),
            DetectionProbs::TimeVarying(ps) => {
                occasion.checked_sub(1).and_then(|j| ps.get(j).copied())
            }
        }
    }

    /// Number of detection probabilities stored.
    pub fn len(&self) -> usize {
        match self {
            DetectionProbs::Constant(_) => 1,
            DetectionProbs::TimeVarying(ps) => ps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Model parameters on the probability scale, generic over the scalar type.
#[derive(Debug, Clone, PartialEq)]
pub struct CJSParams<S> {
    /// Apparent survival between consecutive occasions.
    pub phi: S,
    pub p: DetectionProbs<S>,
}

impl<S: Scalar> CJSParams<S> {
    /// Validate raw θ and transform it to probabilities.
    ///
    /// # Errors
    /// - [`CJSError::TooFewOccasions`] for a time-varying model with fewer
    ///   than two occasions.
    /// - [`CJSError::ThetaLengthMismatch`] if `theta.len()` does not match
    ///   [`ModelVariant::n_params`].
    /// - [`CJSError::NonFiniteTheta`] for the first non-finite entry.
    pub fn from_theta(theta: &[S], variant: ModelVariant, n_occasions: usize) -> CJSResult<Self> {
        validate_theta(theta, variant, n_occasions)?;
        let phi = logit_link(theta[0]);
        let p = match variant {
            ModelVariant::TimeConstant => DetectionProbs::Constant(logit_link(theta[1])),
            ModelVariant::TimeVarying => DetectionProbs::TimeVarying(logit_link_all(&theta[1..])),
        };
        Ok(Self { phi, p })
    }

    /// Layout implied by the detection probabilities.
    pub fn variant(&self) -> ModelVariant {
        match self.p {
            DetectionProbs::Constant(_) => ModelVariant::TimeConstant,
            DetectionProbs::TimeVarying(_) => ModelVariant::TimeVarying,
        }
    }

    /// Check that these parameters describe a study of `n_occasions`.
    ///
    /// Parameters built by [`from_theta`](Self::from_theta) always pass;
    /// hand-built ones are checked here before any recursion runs. Lengths
    /// are reported on the θ scale (`1 + p.len()`).
    ///
    /// # Errors
    /// - [`CJSError::TooFewOccasions`] for a time-varying layout on fewer
    ///   than two occasions.
    /// - [`CJSError::ThetaLengthMismatch`] when a time-varying vector does
    ///   not hold exactly one entry per occasion after the first.
    pub fn check_occasions(&self, n_occasions: usize) -> CJSResult<()> {
        let variant = self.variant();
        let required = variant.min_occasions();
        if n_occasions < required {
            return Err(CJSError::TooFewOccasions { variant, occasions: n_occasions, required });
        }
        let expected = variant.n_params(n_occasions);
        let actual = 1 + self.p.len();
        if actual != expected {
            return Err(CJSError::ThetaLengthMismatch { variant, expected, actual });
        }
        Ok(())
    }
}

/// Structural check of θ against the variant and study length.
pub fn validate_theta<S: Scalar>(
    theta: &[S], variant: ModelVariant, n_occasions: usize,
) -> CJSResult<()> {
    let required = variant.min_occasions();
    if n_occasions < required {
        return Err(CJSError::TooFewOccasions { variant, occasions: n_occasions, required });
    }
    let expected = variant.n_params(n_occasions);
    if theta.len() != expected {
        return Err(CJSError::ThetaLengthMismatch { variant, expected, actual: theta.len() });
    }
    for (index, t) in theta.iter().enumerate() {
        let value = t.value();
        if !value.is_finite() {
            return Err(CJSError::NonFiniteTheta { index, value });
        }
    }
    Ok(())
}

/// Fitted parameters on the probability scale, for reporting.
///
/// `p` has one entry for a time-constant model and `K - 1` entries
/// (occasions 2..=K) for a time-varying one.
#[derive(Debug, Clone, PartialEq)]
pub struct CJSFittedParams {
    pub variant: ModelVariant,
    pub phi: f64,
    pub p: Vec<f64>,
}

impl CJSFittedParams {
    /// Transform an estimated θ̂ into reported probabilities.
    pub fn from_theta(theta: &Theta, variant: ModelVariant, n_occasions: usize) -> CJSResult<Self> {
        let raw = theta.to_vec();
        let params = CJSParams::<f64>::from_theta(&raw, variant, n_occasions)?;
        let p = match params.p {
            DetectionProbs::Constant(p) => vec![p],
            DetectionProbs::TimeVarying(ps) => ps,
        };
        Ok(Self { variant, phi: params.phi, p })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // θ length depends on the variant and the number of occasions.
    fn n_params_per_variant() {
        assert_eq!(ModelVariant::TimeConstant.n_params(5), 2);
        assert_eq!(ModelVariant::TimeVarying.n_params(5), 5);
        assert_eq!(ModelVariant::TimeVarying.n_params(2), 2);
    }

    #[test]
    // Purpose
    // -------
    // Structural θ errors are reported before any transform.
    //
    // Given
    // -----
    // - Wrong length, a NaN entry, and a 1-occasion time-varying study.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, `NonFiniteTheta`, `TooFewOccasions`.
    fn from_theta_rejects_bad_layouts() {
        assert_eq!(
            CJSParams::<f64>::from_theta(&[0.1, 0.2, 0.3], ModelVariant::TimeConstant, 4),
            Err(CJSError::ThetaLengthMismatch {
                variant: ModelVariant::TimeConstant,
                expected: 2,
                actual: 3
            })
        );
        assert!(matches!(
            CJSParams::<f64>::from_theta(&[0.1, f64::NAN], ModelVariant::TimeConstant, 4),
            Err(CJSError::NonFiniteTheta { index: 1, .. })
        ));
        assert_eq!(
            CJSParams::<f64>::from_theta(&[0.1], ModelVariant::TimeVarying, 1),
            Err(CJSError::TooFewOccasions {
                variant: ModelVariant::TimeVarying,
                occasions: 1,
                required: 2
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Time-varying detection is indexed by occasion with no entry at 0.
    fn time_varying_detection_indexing() {
        let params =
            CJSParams::<f64>::from_theta(&[0.0, 0.0, 1.0, -1.0], ModelVariant::TimeVarying, 4)
                .unwrap();
        assert_eq!(params.phi, 0.5);
        assert_eq!(params.p.at(0), None);
        assert_eq!(params.p.at(1), Some(0.5));
        assert!((params.p.at(2).unwrap() - logit_link(1.0)).abs() < 1e-15);
        assert_eq!(params.p.at(4), None);

        let constant =
            CJSParams::<f64>::from_theta(&[0.0, 0.2], ModelVariant::TimeConstant, 4).unwrap();
        assert_eq!(constant.p.at(0), constant.p.at(3));
    }

    #[test]
    // Purpose
    // -------
    // Hand-built parameters are checked against the study length.
    //
    // Given
    // -----
    // - A 3-occasion study; time-varying vectors of length 1, 2 and 3, a
    //   constant layout, and a 1-occasion time-varying study.
    //
    // Expect
    // ------
    // - Only the length-2 vector and the constant layout pass; the others
    //   report their θ-scale length or too few occasions.
    fn check_occasions_matches_detection_layout() {
        let tv = |ps: Vec<f64>| CJSParams { phi: 0.8, p: DetectionProbs::TimeVarying(ps) };
        assert_eq!(
            tv(vec![0.5]).check_occasions(3),
            Err(CJSError::ThetaLengthMismatch {
                variant: ModelVariant::TimeVarying,
                expected: 3,
                actual: 2
            })
        );
        assert!(tv(vec![0.5, 0.4]).check_occasions(3).is_ok());
        assert!(matches!(
            tv(vec![0.5; 3]).check_occasions(3),
            Err(CJSError::ThetaLengthMismatch { expected: 3, actual: 4, .. })
        ));
        assert!(matches!(
            tv(vec![]).check_occasions(1),
            Err(CJSError::TooFewOccasions { occasions: 1, required: 2, .. })
        ));

        let constant = CJSParams { phi: 0.8, p: DetectionProbs::Constant(0.6) };
        assert_eq!(constant.variant(), ModelVariant::TimeConstant);
        assert!(constant.check_occasions(1).is_ok());
    }

    #[test]
    fn fitted_params_report_probabilities() {
        let fitted =
            CJSFittedParams::from_theta(&array![0.0, 0.0, 0.0], ModelVariant::TimeVarying, 3)
                .unwrap();
        assert_eq!(fitted.phi, 0.5);
        assert_eq!(fitted.p, vec![0.5, 0.5]);
    }
}
