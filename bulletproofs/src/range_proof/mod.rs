//! Aggregated range proofs: `m` committed values, each in `[0, 2^n)`.

pub mod encoding;
mod prover;
mod verifier;

use ark_ec::CurveGroup;

use crate::errors::RangeProofError;
use crate::generators::BulletproofGens;
use crate::structs::InnerProductProof;

/// Widest supported range; values are `u64`.
pub const MAX_BITS: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeProof<C: CurveGroup> {
    pub t_blinding: C::ScalarField,
    pub mu: C::ScalarField,
    pub t: C::ScalarField,
    pub a_commit: C::Affine,
    pub s_commit: C::Affine,
    pub t1_commit: C::Affine,
    pub t2_commit: C::Affine,
    pub product_proof: InnerProductProof<C>,
}

pub(crate) fn check_parameters<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    n: usize,
    m: usize,
) -> Result<(), RangeProofError> {
    if n > MAX_BITS {
        return Err(RangeProofError::UpperBoundTooLarge(n));
    }
    if !n.is_power_of_two() {
        return Err(RangeProofError::NNotPowerOf2(n));
    }
    if !m.is_power_of_two() {
        return Err(RangeProofError::NNotPowerOf2(m));
    }
    if gens.capacity() < n * m {
        return Err(RangeProofError::InvalidParameters(format!(
            "generators hold {} bases, {} needed",
            gens.capacity(),
            n * m
        )));
    }
    Ok(())
}
