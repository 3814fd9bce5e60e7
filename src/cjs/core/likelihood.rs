//! Likelihood aggregation across individuals.
//!
//! Purpose
//! -------
//! Turn validated data and probability-scale parameters into the scalar
//! objective `NLL = -Σᵢ ln Lᵢ`, where `Lᵢ` is the forward-recursion
//! likelihood of individual `i`.
//!
//! Key behaviors
//! -------------
//! - Matrices (`A`, the emission schedule, `BE`) are built once per call and
//!   shared read-only by every individual.
//! - [`EvalMode::Parallel`] maps individuals on the rayon pool; contributions
//!   are collected in individual order and always reduced by the same
//!   left-to-right sum starting from zero, so both modes return bit-identical
//!   results.
//! - A non-positive `Lᵢ` is a numerical degeneracy, not an error: the
//!   contribution is flagged, logged with `log::warn!`, and its log is `-∞`,
//!   making the NLL `+∞`. No clamping is applied.
//!
//! Conventions
//! -----------
//! - Everything is generic over [`Scalar`]; evaluating on `Dual` yields one
//!   directional derivative of the NLL.
use crate::cjs::{
    core::{
        data::CJSData,
        forward::forward_pass,
        matrices::{EmissionSchedule, first_encounter_matrix, transition_matrix},
        options::EvalMode,
        params::{CJSParams, ModelVariant},
        scalar::Scalar,
    },
    errors::CJSResult,
};
use rayon::prelude::*;

/// Per-individual result of the forward recursion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndividualContribution<S> {
    pub individual: usize,
    /// `Lᵢ`, the sum of the final forward vector.
    pub likelihood: S,
    /// `ln Lᵢ`, or `-∞` when degenerate.
    pub log_likelihood: S,
    /// `true` when `Lᵢ ≤ 0` (or not a number).
    pub degenerate: bool,
}

/// Run the forward recursion for every individual.
///
/// Output is in individual order regardless of `mode`.
///
/// # Errors
/// [`CJSParams::check_occasions`] failures, raised before any recursion
/// runs.
pub fn individual_contributions<S: Scalar>(
    data: &CJSData, params: &CJSParams<S>, mode: EvalMode,
) -> CJSResult<Vec<IndividualContribution<S>>> {
    params.check_occasions(data.n_occasions())?;
    let transition = transition_matrix(params.phi);
    let emissions = EmissionSchedule::new(&params.p);
    let be = first_encounter_matrix::<S>();

    let contribution = |i: usize| -> CJSResult<IndividualContribution<S>> {
        let likelihood = forward_pass(
            data.history.individual(i),
            data.first_capture_index(i),
            data.first_state[i],
            &transition,
            &emissions,
            &be,
        )?;
        let value = likelihood.value();
        let degenerate = value.is_nan() || value <= 0.0;
        let log_likelihood = if degenerate {
            log::warn!("individual {i}: zero-probability capture history (L = {value:e})");
            S::from_f64(f64::NEG_INFINITY)
        } else {
            likelihood.ln()
        };
        Ok(IndividualContribution { individual: i, likelihood, log_likelihood, degenerate })
    };

    let n = data.n_individuals();
    match mode {
        EvalMode::Serial => (0..n).map(contribution).collect(),
        EvalMode::Parallel => (0..n).into_par_iter().map(contribution).collect(),
    }
}

/// Negative log-likelihood of the data under `params`.
///
/// Returns `+∞` if any individual is degenerate.
///
/// # Errors
/// Parameters that do not fit the study, as in [`individual_contributions`].
pub fn negative_log_likelihood<S: Scalar>(
    data: &CJSData, params: &CJSParams<S>, mode: EvalMode,
) -> CJSResult<S> {
    let contributions = individual_contributions(data, params, mode)?;
    let ll = contributions.iter().fold(S::zero(), |acc, c| acc + c.log_likelihood);
    Ok(-ll)
}

/// NLL as a function of raw θ: validate, apply the link, aggregate.
///
/// # Errors
/// Structural θ errors from [`CJSParams::from_theta`]; raised before any
/// recursion runs.
pub fn objective<S: Scalar>(
    data: &CJSData, theta: &[S], variant: ModelVariant, mode: EvalMode,
) -> CJSResult<S> {
    let params = CJSParams::from_theta(theta, variant, data.n_occasions())?;
    negative_log_likelihood(data, &params, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cjs::{
        core::{dual::Dual, link::logit_link, params::DetectionProbs},
        errors::CJSError,
    };
    use ndarray::array;

    fn params(phi: f64, p: f64) -> CJSParams<f64> {
        CJSParams { phi, p: DetectionProbs::Constant(p) }
    }

    #[test]
    // Purpose
    // -------
    // Two-occasion reference scenarios.
    //
    // Given
    // -----
    // - φ = 0.8, p = 0.6; one individual captured at occasion 1 and then
    //   (A) missed, (B) detected at occasion 2.
    //
    // Expect
    // ------
    // - A: L = 0.52, NLL ≈ 0.6539.  B: L = 0.48, NLL ≈ 0.7340.
    fn reference_scenarios() {
        let p = params(0.8, 0.6);
        let a = CJSData::from_codes(&array![[1], [0]], &array![1], &array![1]).unwrap();
        let b = CJSData::from_codes(&array![[1], [1]], &array![1], &array![1]).unwrap();

        let ca = individual_contributions(&a, &p, EvalMode::Serial).unwrap();
        assert!((ca[0].likelihood - 0.52).abs() < 1e-12);
        let nll_a = negative_log_likelihood(&a, &p, EvalMode::Serial).unwrap();
        assert!((nll_a - 0.6539).abs() < 1e-4);

        let cb = individual_contributions(&b, &p, EvalMode::Serial).unwrap();
        assert!((cb[0].likelihood - 0.48).abs() < 1e-12);
        let nll_b = negative_log_likelihood(&b, &p, EvalMode::Serial).unwrap();
        assert!((nll_b - 0.7340).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Hand-built parameters with too few detection probabilities fail before
    // any recursion, in both evaluation modes.
    //
    // Given
    // -----
    // - 3-occasion study; time-varying p of length 1.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 3, actual: 2 }` from both entry
    //   points.
    fn short_detection_vector_is_an_error() {
        let data =
            CJSData::from_codes(&array![[1, 1], [0, 1], [1, 0]], &array![1, 1], &array![1, 1])
                .unwrap();
        let short = CJSParams { phi: 0.8, p: DetectionProbs::TimeVarying(vec![0.5]) };
        let expected = Err(CJSError::ThetaLengthMismatch {
            variant: ModelVariant::TimeVarying,
            expected: 3,
            actual: 2,
        });
        assert_eq!(negative_log_likelihood(&data, &short, EvalMode::Serial), expected);
        assert_eq!(negative_log_likelihood(&data, &short, EvalMode::Parallel), expected);
        assert!(individual_contributions(&data, &short, EvalMode::Serial).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Raw-θ entry point applies the link before aggregating.
    fn objective_from_raw_theta() {
        let a = CJSData::from_codes(&array![[1], [1]], &array![1], &array![1]).unwrap();
        let theta = [0.3_f64, -0.4];
        let nll =
            objective(&a, &theta[..], ModelVariant::TimeConstant, EvalMode::Serial).unwrap();
        let expected = -(logit_link(0.3_f64) * logit_link(-0.4_f64)).ln();
        assert!((nll - expected).abs() < 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Individuals captured on the last occasion contribute ln 1 = 0.
    fn last_occasion_captures_contribute_zero() {
        let history = array![[0, 1], [0, 0], [1, 0]];
        let data = CJSData::from_codes(&history, &array![3, 1], &array![1, 1]).unwrap();
        let c = individual_contributions(&data, &params(0.6, 0.3), EvalMode::Serial).unwrap();
        assert_eq!(c[0].likelihood, 1.0);
        assert_eq!(c[0].log_likelihood, 0.0);
        assert!(!c[1].degenerate);
    }

    #[test]
    // Purpose
    // -------
    // Equal time-varying detection reproduces the time-constant NLL exactly.
    fn equal_time_varying_matches_constant() {
        let data = CJSData::from_codes(
            &array![[1, 0, 1], [0, 1, 1], [1, 1, 0], [0, 0, 1]],
            &array![1, 2, 1],
            &array![1, 1, 1],
        )
        .unwrap();
        let constant = params(0.75, 0.4);
        let varying = CJSParams { phi: 0.75, p: DetectionProbs::TimeVarying(vec![0.4; 3]) };
        assert_eq!(
            negative_log_likelihood(&data, &constant, EvalMode::Serial).unwrap(),
            negative_log_likelihood(&data, &varying, EvalMode::Serial).unwrap()
        );
    }

    #[test]
    // Purpose
    // -------
    // Serial and parallel evaluation are bit-identical, and re-evaluation is
    // deterministic.
    //
    // Given
    // -----
    // - 200 individuals with varied histories and release occasions.
    //
    // Expect
    // ------
    // - Exact equality of NLL values across modes and repeated calls.
    fn serial_and_parallel_agree_bitwise() {
        let (k, n) = (6, 200);
        let mut codes = ndarray::Array2::<i64>::zeros((k, n));
        let mut fc = ndarray::Array1::<i64>::zeros(n);
        for i in 0..n {
            let first = i % k;
            fc[i] = first as i64 + 1;
            codes[[first, i]] = 1;
            for j in (first + 1)..k {
                codes[[j, i]] = ((i * 7 + j * 3) % 5 < 2) as i64;
            }
        }
        let data = CJSData::from_codes(&codes, &fc, &ndarray::Array1::from_elem(n, 1)).unwrap();
        let p = CJSParams {
            phi: 0.83,
            p: DetectionProbs::TimeVarying(vec![0.2, 0.35, 0.5, 0.65, 0.8]),
        };

        let serial = negative_log_likelihood(&data, &p, EvalMode::Serial).unwrap();
        let parallel = negative_log_likelihood(&data, &p, EvalMode::Parallel).unwrap();
        let again = negative_log_likelihood(&data, &p, EvalMode::Serial).unwrap();
        assert!(serial.is_finite());
        assert_eq!(serial.to_bits(), parallel.to_bits());
        assert_eq!(serial.to_bits(), again.to_bits());
    }

    #[test]
    // Purpose
    // -------
    // A zero-probability history yields +∞ and is flagged, not an error.
    //
    // Given
    // -----
    // - One individual released dead, one normal individual.
    //
    // Expect
    // ------
    // - Dead release flagged degenerate; total NLL = +∞.
    fn degenerate_individual_gives_infinite_nll() {
        let data = CJSData::from_codes(&array![[1, 1], [1, 0]], &array![1, 1], &array![2, 1])
            .unwrap();
        let p = params(0.8, 0.6);
        let c = individual_contributions(&data, &p, EvalMode::Parallel).unwrap();
        assert!(c[0].degenerate);
        assert_eq!(c[0].log_likelihood, f64::NEG_INFINITY);
        assert!(!c[1].degenerate);
        assert_eq!(negative_log_likelihood(&data, &p, EvalMode::Serial), Ok(f64::INFINITY));
    }

    #[test]
    // Purpose
    // -------
    // The dual-number NLL derivative matches central finite differences.
    //
    // Given
    // -----
    // - Time-varying model on a small data set, θ with mixed signs.
    //
    // Expect
    // ------
    // - |dual - FD| < 1e-6 for every coordinate.
    fn dual_gradient_matches_finite_differences() {
        let data = CJSData::from_codes(
            &array![[1, 1, 0], [0, 1, 1], [1, 0, 1], [1, 1, 1]],
            &array![1, 1, 2],
            &array![1, 1, 1],
        )
        .unwrap();
        let theta = [0.9_f64, -0.3, 0.5, 1.2];
        let variant = ModelVariant::TimeVarying;
        let h = 1e-6;

        for k in 0..theta.len() {
            let seeded: Vec<Dual> = theta
                .iter()
                .enumerate()
                .map(|(i, &t)| Dual::new(t, if i == k { 1.0 } else { 0.0 }))
                .collect();
            let ad = objective(&data, &seeded[..], variant, EvalMode::Serial).unwrap().dot;

            let mut up = theta;
            let mut down = theta;
            up[k] += h;
            down[k] -= h;
            let fd = (objective(&data, &up[..], variant, EvalMode::Serial).unwrap()
                - objective(&data, &down[..], variant, EvalMode::Serial).unwrap())
                / (2.0 * h);
            assert!((ad - fd).abs() < 1e-6, "coordinate {k}: ad = {ad}, fd = {fd}");
        }
    }
}
