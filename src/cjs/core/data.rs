//! Capture-history data containers for CJS models.
//!
//! Purpose
//! -------
//! Provide validated, read-only containers for a capture-recapture study:
//! the detection grid ([`CaptureHistory`]) and the per-individual release
//! information bundled with it in [`CJSData`]. All structural checks live
//! here so the forward recursion can index without re-validating.
//!
//! Key behaviors
//! -------------
//! - [`CaptureHistory::from_codes`] turns an integer grid into
//!   [`Observation`]s, rejecting any code outside {0, 1}.
//! - [`CJSData::new`] checks that the first-capture and first-state vectors
//!   match the number of individuals and that every first capture names an
//!   existing occasion.
//! - [`CJSData::from_codes`] does both from raw integer inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The grid is `occasions × individuals` with both dimensions `> 0`.
//! - `first_capture[i] ∈ [1, occasions]` (1-indexed occasion numbers).
//! - Observations strictly before an individual's first capture are never
//!   read; they are validated as codes but otherwise ignored.
//! - The grid is not required to show a detection at the first-capture
//!   occasion; the first-state vector alone seeds the recursion.
//!
//! Conventions
//! -----------
//! - Grid indices (`occasion`, `individual`) are 0-based.
//! - First-capture values are 1-based; use
//!   [`CJSData::first_capture_index`] for the 0-based occasion.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and every structural error variant.
use crate::cjs::{
    core::states::{HiddenState, Observation},
    errors::{CJSError, CJSResult},
};
use ndarray::{Array1, Array2, ArrayView1};

/// `CaptureHistory` — validated detection grid (occasions × individuals).
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureHistory {
    grid: Array2<Observation>,
}

impl CaptureHistory {
    /// Wrap an already-typed grid.
    ///
    /// # Errors
    /// - [`CJSError::EmptyHistory`] if either dimension is zero.
    pub fn new(grid: Array2<Observation>) -> CJSResult<Self> {
        let (occasions, individuals) = grid.dim();
        if occasions == 0 || individuals == 0 {
            return Err(CJSError::EmptyHistory { occasions, individuals });
        }
        Ok(Self { grid })
    }

    /// Build a history from integer codes (0 = not detected, 1 = detected).
    ///
    /// # Errors
    /// - [`CJSError::EmptyHistory`] if either dimension is zero.
    /// - [`CJSError::InvalidObservationCode`] for the first code outside
    ///   {0, 1}, scanning occasion by occasion.
    pub fn from_codes(codes: &Array2<i64>) -> CJSResult<Self> {
        let mut grid = Array2::from_elem(codes.dim(), Observation::NonDetected);
        for ((occasion, individual), &code) in codes.indexed_iter() {
            grid[[occasion, individual]] = Observation::try_from(code)
                .map_err(|code| CJSError::InvalidObservationCode { occasion, individual, code })?;
        }
        Self::new(grid)
    }

    pub fn n_occasions(&self) -> usize {
        self.grid.nrows()
    }

    pub fn n_individuals(&self) -> usize {
        self.grid.ncols()
    }

    /// Observation sequence of one individual across all occasions.
    pub fn individual(&self, individual: usize) -> ArrayView1<'_, Observation> {
        self.grid.column(individual)
    }

    /// Borrow the underlying grid.
    pub fn grid(&self) -> &Array2<Observation> {
        &self.grid
    }
}

/// `CJSData` — capture histories plus per-individual release information.
///
/// Fields
/// ------
/// - `history`: [`CaptureHistory`], occasions × individuals.
/// - `first_capture`: `Array1<usize>`, 1-indexed occasion of first capture
///   for each individual.
/// - `first_state`: `Array1<HiddenState>`, latent state at first capture.
///
/// The container is immutable after construction and is `Send + Sync`, so a
/// single instance can be shared by parallel per-individual passes.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_capture_recapture::cjs::core::data::CJSData;
/// let history = array![[1, 1], [1, 0], [0, 1]];
/// let data = CJSData::from_codes(&history, &array![1, 1], &array![1, 1]).unwrap();
/// assert_eq!(data.n_occasions(), 3);
/// assert_eq!(data.first_capture_index(1), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CJSData {
    pub history: CaptureHistory,
    pub first_capture: Array1<usize>,
    pub first_state: Array1<HiddenState>,
}

impl CJSData {
    /// Construct validated [`CJSData`].
    ///
    /// Errors
    /// ------
    /// - `CJSError::FirstCaptureLengthMismatch` / `FirstStateLengthMismatch`
    ///   when a vector length differs from the number of individuals.
    /// - `CJSError::FirstCaptureOutOfRange` when a first capture lies outside
    ///   `[1, n_occasions]`; reports the first offending individual.
    pub fn new(
        history: CaptureHistory, first_capture: Array1<usize>, first_state: Array1<HiddenState>,
    ) -> CJSResult<Self> {
        let occasions = history.n_occasions();
        check_lengths(history.n_individuals(), first_capture.len(), first_state.len())?;
        for (individual, &fc) in first_capture.iter().enumerate() {
            let value = i64::try_from(fc).unwrap_or(i64::MAX);
            check_first_capture(individual, value, occasions)?;
        }
        Ok(Self { history, first_capture, first_state })
    }

    /// Construct [`CJSData`] from raw integer inputs.
    ///
    /// Validation order: observation codes, grid dimensions, vector lengths,
    /// first-capture range, then first-state codes.
    pub fn from_codes(
        history: &Array2<i64>, first_capture: &Array1<i64>, first_state: &Array1<i64>,
    ) -> CJSResult<Self> {
        let history = CaptureHistory::from_codes(history)?;
        let occasions = history.n_occasions();
        check_lengths(history.n_individuals(), first_capture.len(), first_state.len())?;

        let first_capture = first_capture
            .iter()
            .enumerate()
            .map(|(individual, &value)| check_first_capture(individual, value, occasions))
            .collect::<CJSResult<Array1<usize>>>()?;
        let first_state = first_state
            .iter()
            .enumerate()
            .map(|(individual, &code)| {
                HiddenState::try_from(code)
                    .map_err(|code| CJSError::InvalidStateCode { individual, code })
            })
            .collect::<CJSResult<Array1<HiddenState>>>()?;

        Ok(Self { history, first_capture, first_state })
    }

    pub fn n_occasions(&self) -> usize {
        self.history.n_occasions()
    }

    pub fn n_individuals(&self) -> usize {
        self.history.n_individuals()
    }

    /// 0-based occasion index of an individual's first capture.
    #[inline]
    pub fn first_capture_index(&self, individual: usize) -> usize {
        self.first_capture[individual] - 1
    }
}

fn check_lengths(individuals: usize, first_capture: usize, first_state: usize) -> CJSResult<()> {
    if first_capture != individuals {
        return Err(CJSError::FirstCaptureLengthMismatch {
            expected: individuals,
            actual: first_capture,
        });
    }
    if first_state != individuals {
        return Err(CJSError::FirstStateLengthMismatch {
            expected: individuals,
            actual: first_state,
        });
    }
    Ok(())
}

/// 1-based first capture `value` must name one of the `occasions`.
fn check_first_capture(individual: usize, value: i64, occasions: usize) -> CJSResult<usize> {
    match usize::try_from(value) {
        Ok(fc) if (1..=occasions).contains(&fc) => Ok(fc),
        _ => Err(CJSError::FirstCaptureOutOfRange { individual, value, occasions }),
    }
}
