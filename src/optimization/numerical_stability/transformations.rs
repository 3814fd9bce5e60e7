//! `f64` logit that never returns an infinity.
//!
//! Used for starting values (`CJSModel::theta_from_probs`). The opposite
//! direction, in the likelihood and in reported estimates, is the generic
//! `cjs::core::link::logit_link`.

/// Probabilities are clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` before a
/// logit, so 0 and 1 map to about ±27.6.
pub const LOGIT_EPS: f64 = 1e-12;

/// `ln(p / (1 - p))` as `ln p - ln1p(-p)`, after clamping with [`LOGIT_EPS`].
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cjs::core::link::logit_link;

    #[test]
    // Purpose
    // -------
    // Agreement with the naïve formula away from the clamp.
    fn safe_logit_matches_naive_formula() {
        for p in [1e-6_f64, 0.05, 0.3, 0.5, 0.7, 0.95, 1.0 - 1e-6] {
            let naive = (p / (1.0 - p)).ln();
            assert!((safe_logit(p) - naive).abs() < 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // `safe_logit` inverts the link and stays finite at the boundaries.
    fn safe_logit_inverts_link_and_clamps() {
        for p in [0.01, 0.2, 0.5, 0.8, 0.99] {
            assert!((logit_link(safe_logit(p)) - p).abs() < 1e-12);
        }
        assert!(safe_logit(0.0).is_finite());
        assert!(safe_logit(1.0).is_finite());
        assert!(safe_logit(0.0) < -20.0);
        assert!(safe_logit(1.0) > 20.0);
        assert_eq!(safe_logit(-3.0), safe_logit(0.0));
    }
}
