//! Transition and emission matrices of the two-state CJS hidden Markov model.
//!
//! States are ordered (Alive, Dead) along columns of the emission matrices
//! and along both axes of the transition matrix; observations are ordered
//! (not detected, detected) along emission rows.
//!
//! ```text
//!        A = | φ   1-φ |      B = | 1-p  1 |      BE = | 0  1 |
//!            | 0    1  |          |  p   0 |           | 1  0 |
//! ```
//!
//! Modelling assumption: a dead individual is never detected, so the Dead
//! column of every emission matrix is `(1, 0)`. Recoveries of dead animals
//! are outside this model.
use crate::cjs::core::{params::DetectionProbs, scalar::Scalar};

/// A 2 × 2 matrix stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2<S> {
    pub m: [[S; 2]; 2],
}

impl<S: Scalar> Matrix2<S> {
    pub fn new(m: [[S; 2]; 2]) -> Self {
        Self { m }
    }

    #[inline]
    pub fn row(&self, r: usize) -> [S; 2] {
        self.m[r]
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> S {
        self.m[r][c]
    }

    pub fn row_sums(&self) -> [S; 2] {
        [self.m[0][0] + self.m[0][1], self.m[1][0] + self.m[1][1]]
    }

    pub fn col_sums(&self) -> [S; 2] {
        [self.m[0][0] + self.m[1][0], self.m[0][1] + self.m[1][1]]
    }
}

/// Survival transition matrix `A`; `A[from][to]`, Dead is absorbing.
pub fn transition_matrix<S: Scalar>(phi: S) -> Matrix2<S> {
    let (zero, one) = (S::zero(), S::one());
    Matrix2::new([[phi, one - phi], [zero, one]])
}

/// Emission matrix `B`; `B[observation][state]`.
///
/// Each state's column is a distribution over observations.
pub fn emission_matrix<S: Scalar>(p: S) -> Matrix2<S> {
    let (zero, one) = (S::zero(), S::one());
    Matrix2::new([[one - p, one], [p, zero]])
}

/// First-encounter matrix `BE`, the emission used at first capture.
pub fn first_encounter_matrix<S: Scalar>() -> Matrix2<S> {
    let (zero, one) = (S::zero(), S::one());
    Matrix2::new([[zero, one], [one, zero]])
}

/// Emission matrix at a 0-based occasion.
///
/// Returns `None` where the detection layout has no probability for the
/// occasion (occasion 0 or past the end of a time-varying vector).
pub fn emission_at<S: Scalar>(occasion: usize, p: &DetectionProbs<S>) -> Option<Matrix2<S>> {
    p.at(occasion).map(emission_matrix)
}

/// Emission matrices for every occasion a recursion can reach, built once
/// per likelihood evaluation and shared read-only by all individuals.
#[derive(Debug, Clone, PartialEq)]
pub enum EmissionSchedule<S> {
    Constant(Matrix2<S>),
    /// Entry `j - 1` belongs to 0-based occasion `j`.
    PerOccasion(Vec<Matrix2<S>>),
}

impl<S: Scalar> EmissionSchedule<S> {
    pub fn new(p: &DetectionProbs<S>) -> Self {
        match p {
            DetectionProbs::Constant(p) => EmissionSchedule::Constant(emission_matrix(*p)),
            DetectionProbs::TimeVarying(ps) => {
                EmissionSchedule::PerOccasion(ps.iter().map(|&p| emission_matrix(p)).collect())
            }
        }
    }

    /// Emission matrix for 0-based occasion `occasion ≥ 1`.
    ///
    /// Panics past the end of a per-occasion schedule; `forward_pass` checks
    /// the schedule length against the history first.
    #[inline]
    pub fn at(&self, occasion: usize) -> &Matrix2<S> {
        match self {
            EmissionSchedule::Constant(b) => b,
            EmissionSchedule::PerOccasion(bs) => &bs[occasion - 1],
        }
    }
}
