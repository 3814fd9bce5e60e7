//! Observation and hidden-state codes.
//!
//! Both enums convert from the integer codes used in capture-history files
//! through `TryFrom<i64>`; the error carries the rejected code so callers can
//! attach location information (see `CaptureHistory::from_codes`).

/// What was recorded for an individual on one sampling occasion.
///
/// The discriminant doubles as the row index into an emission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observation {
    NonDetected = 0,
    Detected = 1,
}

impl Observation {
    /// Row of an emission matrix selected by this observation.
    #[inline]
    pub fn row(self) -> usize {
        self as usize
    }
}

impl TryFrom<i64> for Observation {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Observation::NonDetected),
            1 => Ok(Observation::Detected),
            other => Err(other),
        }
    }
}

/// Latent state of an individual. `Dead` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenState {
    Alive = 1,
    Dead = 2,
}

impl HiddenState {
    /// Row of the first-encounter matrix `BE` used to seed the recursion.
    ///
    /// An alive individual was necessarily detected at first capture, so it
    /// selects the "detected" row; a dead one selects the "not detected" row,
    /// which has zero mass on the alive state and therefore yields a zero
    /// likelihood.
    #[inline]
    pub fn first_encounter_row(self) -> usize {
        match self {
            HiddenState::Alive => Observation::Detected.row(),
            HiddenState::Dead => Observation::NonDetected.row(),
        }
    }
}

impl TryFrom<i64> for HiddenState {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(HiddenState::Alive),
            2 => Ok(HiddenState::Dead),
            other => Err(other),
        }
    }
}
