//! Errors for the CJS capture-recapture stack (data validation, parameter
//! layout, and model state).
//!
//! This module defines [`CJSError`] and the [`CJSResult`] alias used by the
//! data containers, the parameter transforms, and the model API.
//!
//! ## Conventions
//! - **Occasion and individual indices in error payloads are 0-based**
//!   (matching the `ndarray` grid); user-facing *codes* (first-capture
//!   occasion, first state) are reported exactly as supplied.
//! - Structural problems (dimensions, domains, θ layout) are always errors
//!   and are raised before any forward recursion runs.
//! - A zero-probability capture history is **not** an error: it is reported
//!   as an infinite negative log-likelihood by the aggregator.
use crate::cjs::core::params::ModelVariant;

/// Result alias for capture-recapture operations that may produce [`CJSError`].
pub type CJSResult<T> = Result<T, CJSError>;

/// Unified error type for the CJS model.
#[derive(Debug, Clone, PartialEq)]
pub enum CJSError {
    // ---- Dimension errors ----
    /// The capture-history grid has no occasions or no individuals.
    EmptyHistory { occasions: usize, individuals: usize },

    /// First-capture vector length differs from the number of individuals.
    FirstCaptureLengthMismatch { expected: usize, actual: usize },

    /// First-state vector length differs from the number of individuals.
    FirstStateLengthMismatch { expected: usize, actual: usize },

    /// Raw parameter vector length does not match the model variant.
    ThetaLengthMismatch { variant: ModelVariant, expected: usize, actual: usize },

    // ---- Domain errors ----
    /// First-capture occasion outside `[1, occasions]`.
    FirstCaptureOutOfRange { individual: usize, value: i64, occasions: usize },

    /// Observation code outside {0, 1}.
    InvalidObservationCode { occasion: usize, individual: usize, code: i64 },

    /// Hidden-state code outside {1, 2}.
    InvalidStateCode { individual: usize, code: i64 },

    /// Raw parameters must be finite.
    NonFiniteTheta { index: usize, value: f64 },

    /// Time-varying detection needs at least two occasions.
    TooFewOccasions { variant: ModelVariant, occasions: usize, required: usize },

    // ---- Model state ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for CJSError {}

impl std::fmt::Display for CJSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CJSError::EmptyHistory { occasions, individuals } => write!(
                f,
                "Capture history must have at least one occasion and one individual, \
                 got {occasions} occasions x {individuals} individuals"
            ),
            CJSError::FirstCaptureLengthMismatch { expected, actual } => write!(
                f,
                "First-capture vector length mismatch: expected {expected} individuals, actual {actual}"
            ),
            CJSError::FirstStateLengthMismatch { expected, actual } => write!(
                f,
                "First-state vector length mismatch: expected {expected} individuals, actual {actual}"
            ),
            CJSError::ThetaLengthMismatch { variant, expected, actual } => write!(
                f,
                "Parameter vector length mismatch for {variant:?} model: expected {expected}, actual {actual}"
            ),
            CJSError::FirstCaptureOutOfRange { individual, value, occasions } => write!(
                f,
                "First-capture occasion {value} for individual {individual} is outside [1, {occasions}]"
            ),
            CJSError::InvalidObservationCode { occasion, individual, code } => write!(
                f,
                "Invalid observation code {code} at occasion {occasion}, individual {individual}: \
                 must be 0 (not detected) or 1 (detected)"
            ),
            CJSError::InvalidStateCode { individual, code } => write!(
                f,
                "Invalid first-state code {code} for individual {individual}: must be 1 (alive) or 2 (dead)"
            ),
            CJSError::NonFiniteTheta { index, value } => {
                write!(f, "Invalid parameter at index {index}: {value}, must be finite")
            }
            CJSError::TooFewOccasions { variant, occasions, required } => write!(
                f,
                "{variant:?} model needs at least {required} occasions, got {occasions}"
            ),
            CJSError::ModelNotFitted => write!(f, "Model has not been fitted yet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages embed the offending payload.
    fn display_embeds_payload() {
        let msg = CJSError::FirstCaptureOutOfRange { individual: 3, value: 9, occasions: 5 }
            .to_string();
        assert!(msg.contains('9') && msg.contains("[1, 5]"));

        let msg =
            CJSError::InvalidObservationCode { occasion: 1, individual: 4, code: 2 }.to_string();
        assert!(msg.contains("code 2"));

        let msg = CJSError::ThetaLengthMismatch {
            variant: ModelVariant::TimeVarying,
            expected: 4,
            actual: 2,
        }
        .to_string();
        assert!(msg.contains("TimeVarying") && msg.contains("expected 4"));
    }
}
