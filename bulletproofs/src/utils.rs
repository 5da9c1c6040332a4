//! Multi-exponentiation helpers and the Fiat–Shamir oracle.
//!
//! Every oracle query starts from a fresh transcript seeded with the order of
//! the scalar field, so challenges for different fields never collide.

use ark_ec::CurveGroup;
use ark_ff::{BigInteger, PrimeField};
use toolbox::errors::{AlgebraErrors, TranscriptError};
use toolbox::transcript::ProofTranscript;

use crate::arith_circuit::ArithCircuit;
use crate::generators::BulletproofGens;

/// `Σ scalars[i] * bases[i]`
pub fn sum_exps<C: CurveGroup>(
    scalars: &[C::ScalarField],
    bases: &[C::Affine],
) -> Result<C, AlgebraErrors> {
    C::msm(bases, scalars).map_err(|_| AlgebraErrors::LengthMismatch {
        left: scalars.len(),
        right: bases.len(),
    })
}

/// `[factors[i] * bases[i]]`, e.g. `h'_i = y^{-i} * h_i`.
pub fn scale_bases<C: CurveGroup>(
    bases: &[C::Affine],
    factors: &[C::ScalarField],
) -> Result<Vec<C::Affine>, AlgebraErrors> {
    if bases.len() != factors.len() {
        return Err(AlgebraErrors::LengthMismatch {
            left: bases.len(),
            right: factors.len(),
        });
    }
    let scaled: Vec<C> = bases
        .iter()
        .zip(factors.iter())
        .map(|(b, f)| *b * *f)
        .collect();
    Ok(C::normalize_batch(&scaled))
}

fn oracle<F: PrimeField>() -> Result<ProofTranscript<F>, TranscriptError> {
    let mut transcript = ProofTranscript::<F>::new(b"bulletproofs oracle");
    transcript.append_message(b"order", &F::MODULUS.to_bytes_le())?;
    Ok(transcript)
}

/// Challenge from three group elements (the circuit's `y`).
pub fn shamir_gxgxg<C: CurveGroup>(
    p1: &C::Affine,
    p2: &C::Affine,
    p3: &C::Affine,
) -> Result<C::ScalarField, TranscriptError> {
    let mut transcript = oracle::<C::ScalarField>()?;
    transcript.append_serializable_element(b"p1", p1)?;
    transcript.append_serializable_element(b"p2", p2)?;
    transcript.append_serializable_element(b"p3", p3)?;
    transcript.get_and_append_challenge(b"challenge")
}

/// Challenge from a list of group elements.
pub fn shamir_gs<C: CurveGroup>(points: &[C::Affine]) -> Result<C::ScalarField, TranscriptError> {
    let mut transcript = oracle::<C::ScalarField>()?;
    transcript.append_serializable_element(b"points", points)?;
    transcript.get_and_append_challenge(b"challenge")
}

/// Challenge bound to a circuit, its input commitments `V` and the proof
/// commitments sent so far (the circuit's `y` and `x`).
pub fn shamir_circuit<C: CurveGroup>(
    circuit: &ArithCircuit<C::ScalarField>,
    commitments: &[C::Affine],
    points: &[C::Affine],
) -> Result<C::ScalarField, TranscriptError> {
    let mut transcript = oracle::<C::ScalarField>()?;
    transcript.append_serializable_element(b"w_l", &circuit.weights.w_l[..])?;
    transcript.append_serializable_element(b"w_r", &circuit.weights.w_r[..])?;
    transcript.append_serializable_element(b"w_o", &circuit.weights.w_o[..])?;
    transcript.append_serializable_element(b"w_v", &circuit.commitment_weights[..])?;
    transcript.append_serializable_element(b"cs", &circuit.cs[..])?;
    transcript.append_serializable_element(b"commitments", commitments)?;
    transcript.append_serializable_element(b"points", points)?;
    transcript.get_and_append_challenge(b"challenge")
}

/// Derives `z` from `y`.
pub fn shamir_z<F: PrimeField>(z: &F) -> Result<F, TranscriptError> {
    let mut transcript = oracle::<F>()?;
    transcript.append_field_element(b"z", z)?;
    transcript.get_and_append_challenge(b"challenge")
}

/// Scalar of the inner-product generator `U`.
pub fn shamir_u<F: PrimeField>(t_blinding: &F, mu: &F, t: &F) -> Result<F, TranscriptError> {
    let mut transcript = oracle::<F>()?;
    transcript.append_field_element(b"t_blinding", t_blinding)?;
    transcript.append_field_element(b"mu", mu)?;
    transcript.append_field_element(b"t", t)?;
    transcript.get_and_append_challenge(b"challenge")
}

/// `U = shamir_u(t_blinding, mu, t) * g`
pub fn u_generator<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    t_blinding: &C::ScalarField,
    mu: &C::ScalarField,
    t: &C::ScalarField,
) -> Result<C::Affine, TranscriptError> {
    let u = shamir_u(t_blinding, mu, t)?;
    Ok((gens.g * u).into_affine())
}

pub(crate) fn random_vector<F: PrimeField, R: ark_std::rand::Rng>(rng: &mut R, n: usize) -> Vec<F> {
    (0..n).map(|_| F::rand(rng)).collect()
}
