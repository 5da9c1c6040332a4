//! Error module.

use ark_std::string::String;
use ark_std::vec::Vec;
use displaydoc::Display;
use thiserror::Error;
use toolbox::errors::{AlgebraErrors, TranscriptError};

/// Failure modes of the inner-product argument.
#[derive(Display, Debug, Error)]
pub enum InnerProductError {
    /// Invalid parameters: {0}
    InvalidParameters(String),
    /// Invalid Proof: {0}
    InvalidProof(String),
    /// Algebra error: {0}
    AlgebraErrors(#[from] AlgebraErrors),
    /// Transcript error: {0}
    TranscriptError(#[from] TranscriptError),
}

/// Failure modes of range proof generation and verification.
#[derive(Display, Debug, Error)]
pub enum RangeProofError {
    /// upper bound 2^{0} does not fit the supported value width
    UpperBoundTooLarge(usize),
    /// value {0} is not in range
    ValueNotInRange(u64),
    /// values {0:?} are not in range
    ValuesNotInRange(Vec<u64>),
    /// {0} is not a power of two
    NNotPowerOf2(usize),
    /// Invalid parameters: {0}
    InvalidParameters(String),
    /// Invalid Proof: {0}
    InvalidProof(String),
    /// Algebra error: {0}
    AlgebraErrors(#[from] AlgebraErrors),
    /// Transcript error: {0}
    TranscriptError(#[from] TranscriptError),
    /// Inner product error: {0}
    InnerProductError(#[from] InnerProductError),
}

/// Failure modes of arithmetic circuit construction, proving and verification.
#[derive(Display, Debug, Error)]
pub enum ArithCircuitProofError {
    /// too many gates: {0}
    TooManyGates(usize),
    /// {0} is not a power of two
    NNotPowerOf2(usize),
    /// {constraints} constraints cannot determine {commitments} committed values
    UnderspecifiedSystem { constraints: usize, commitments: usize },
    /// Invalid parameters: {0}
    InvalidParameters(String),
    /// Invalid Proof: {0}
    InvalidProof(String),
    /// Algebra error: {0}
    AlgebraErrors(#[from] AlgebraErrors),
    /// Transcript error: {0}
    TranscriptError(#[from] TranscriptError),
    /// Inner product error: {0}
    InnerProductError(#[from] InnerProductError),
}
