//! Error module.

use ark_serialize::SerializationError;
use ark_std::string::String;
use displaydoc::Display;
use thiserror::Error;

/// A `enum` specifying the possible failure modes of the Transcript.
#[derive(Display, Debug, Error)]
pub enum TranscriptError {
    /// Invalid Transcript: {0}
    InvalidTranscript(String),
    /// An error during (de)serialization: {0}
    SerializationError(SerializationError),
}

impl From<SerializationError> for TranscriptError {
    fn from(e: SerializationError) -> Self {
        Self::SerializationError(e)
    }
}

/// Failure modes of the vector, matrix and linear-system helpers.
#[derive(Display, Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraErrors {
    /// vectors length are different: {left} vs {right}
    LengthMismatch { left: usize, right: usize },
    /// singular system: no non-zero pivot in column {0}
    SingularMatrix(usize),
    /// inconsistent system: row {0} reduces to 0 = c with c != 0
    InconsistentSystem(usize),
    /// underdetermined system: {rows} rows for {unknowns} unknowns
    Underdetermined { rows: usize, unknowns: usize },
    /// zero has no multiplicative inverse
    NotInvertible,
}

/// Returns `LengthMismatch` unless both lengths agree.
pub(crate) fn check_len(left: usize, right: usize) -> Result<(), AlgebraErrors> {
    if left != right {
        return Err(AlgebraErrors::LengthMismatch { left, right });
    }
    Ok(())
}
