//! Bit encodings of range values and the commitments built from them.
//!
//! The protocol works on least-significant-bit-first vectors, so that
//! `<a_l, 2^n> = v` with `2^n = [1, 2, 4, ..]`.

use ark_ec::CurveGroup;
use ark_ff::Field;
use toolbox::errors::AlgebraErrors;
use toolbox::vec::{hadamard_product, inner_product, power_vector, scalar_product, vec_add, vec_shift, vec_sub};

use crate::arith_circuit::commit_bit_vector;
use crate::errors::RangeProofError;
use crate::generators::BulletproofGens;
use crate::utils::{sum_exps, u_generator};

/// `n`-bit expansion of `v`, most significant bit first.
pub fn encode_bit<F: Field>(n: usize, v: u64) -> Vec<F> {
    (0..n).rev().map(|i| bit(v, i)).collect()
}

/// `n`-bit expansion of `v`, least significant bit first.
pub fn reversed_encode_bit<F: Field>(n: usize, v: u64) -> Vec<F> {
    (0..n).map(|i| bit(v, i)).collect()
}

/// Concatenation of `reversed_encode_bit(n, v)` over `vs`.
pub fn reversed_encode_bit_multi<F: Field>(n: usize, vs: &[u64]) -> Vec<F> {
    vs.iter().flat_map(|&v| reversed_encode_bit(n, v)).collect()
}

fn bit<F: Field>(v: u64, i: usize) -> F {
    let b = u32::try_from(i)
        .ok()
        .and_then(|i| v.checked_shr(i))
        .map_or(0, |shifted| shifted & 1);
    F::from(b)
}

/// Inverse of [`encode_bit`].
pub fn decode_bit<F: Field>(bits: &[F]) -> F {
    let two = F::from(2u64);
    bits.iter().fold(F::zero(), |acc, b| acc * two + b)
}

/// `a_r = a_l - 1^n`; `a_l ∘ a_r = 0` exactly when `a_l` is a bit vector.
pub fn complementary_vector<F: Field>(a_l: &[F]) -> Vec<F> {
    vec_shift(a_l, &-F::one())
}

/// `z^2·<a_l, 2^n> + z·<a_l - 1^n - a_r, y^n> + <a_l ∘ a_r, y^n>`
///
/// Equals `z^2·v` when `a_l` encodes `v` and `a_r` is its complement.
pub fn obfuscate_encoded_bits<F: Field>(
    n: usize,
    a_l: &[F],
    a_r: &[F],
    y: &F,
    z: &F,
) -> Result<F, AlgebraErrors> {
    let two_n = power_vector(F::from(2u64), n);
    let y_n = power_vector(*y, n);

    let value = inner_product(a_l, &two_n)?;
    let complement = inner_product(&vec_sub(&complementary_vector(a_l), a_r)?, &y_n)?;
    let product = inner_product(&hadamard_product(a_l, a_r)?, &y_n)?;
    Ok(z.square() * value + *z * complement + product)
}

/// `<a_l - z·1^n, y^n ∘ (a_r + z·1^n) + z^2·2^n>`
///
/// The same relation as [`obfuscate_encoded_bits`] as a single inner product;
/// equals `z^2·v + delta(n, 1, y, z)` for a valid encoding.
pub fn obfuscate_encoded_bits_single<F: Field>(
    n: usize,
    a_l: &[F],
    a_r: &[F],
    y: &F,
    z: &F,
) -> Result<F, AlgebraErrors> {
    let two_n = power_vector(F::from(2u64), n);
    let y_n = power_vector(*y, n);

    let left = vec_shift(a_l, &-*z);
    let right = vec_add(
        &hadamard_product(&y_n, &vec_shift(a_r, z))?,
        &scalar_product(&two_n, &z.square()),
    )?;
    inner_product(&left, &right)
}

/// Round-one commitments `A` to `(a_l, a_r)` and `S` to `(s_l, s_r)`.
pub fn commit_bit_vectors<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    a_blinding: &C::ScalarField,
    s_blinding: &C::ScalarField,
    a_l: &[C::ScalarField],
    a_r: &[C::ScalarField],
    s_l: &[C::ScalarField],
    s_r: &[C::ScalarField],
) -> Result<(C, C), AlgebraErrors> {
    Ok((
        commit_bit_vector(gens, a_blinding, a_l, a_r)?,
        commit_bit_vector(gens, s_blinding, s_l, s_r)?,
    ))
}

/// `(z - z^2)·<1, y^{nm}> - Σ_{j=1}^{m} z^{j+2}·<1, 2^n>`
pub fn delta<F: Field>(n: usize, m: usize, y: &F, z: &F) -> F {
    let sum_y: F = power_vector(*y, n * m).iter().sum();
    let sum_2: F = power_vector(F::from(2u64), n).iter().sum();
    let sum_z: F = power_vector(*z, m).iter().sum::<F>() * z.square() * z;
    (*z - z.square()) * sum_y - sum_z * sum_2
}

/// `0 <= v < 2^n`
pub fn check_range(n: usize, v: u64) -> bool {
    u32::try_from(n)
        .ok()
        .and_then(|n| v.checked_shr(n))
        .map_or(true, |high| high == 0)
}

pub fn check_ranges(n: usize, vs: &[u64]) -> bool {
    vs.iter().all(|&v| check_range(n, v))
}

/// `z^{j+2}·2^n` in the `j`-th block of `n` entries (`j` from zero), i.e. the
/// part of `r(X)` that ties each block to its own commitment.
pub(crate) fn aggregated_two_powers<F: Field>(n: usize, m: usize, z: &F) -> Vec<F> {
    let two_n = power_vector(F::from(2u64), n);
    power_vector(*z, m)
        .iter()
        .flat_map(|z_j| scalar_product(&two_n, &(*z_j * z.square())))
        .collect()
}

/// The commitment to `l(x)`, `r(x)` that the inner-product argument is run
/// against, rebuilt from public data:
///
/// ```text
/// P = A + x·S - z·<1, Gs> + <z·y^{nm} + Σ_j z^{j+2}·2^n_j, hs'> - mu·H + t·U
/// ```
///
/// with `hs'_i = y^{-i}·Hs_i` and `U = shamir_u(t_blinding, mu, t)·G`.
#[allow(clippy::too_many_arguments)]
pub fn compute_lr_commitment<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    n: usize,
    m: usize,
    a_commit: &C::Affine,
    s_commit: &C::Affine,
    t: &C::ScalarField,
    t_blinding: &C::ScalarField,
    mu: &C::ScalarField,
    x: &C::ScalarField,
    y: &C::ScalarField,
    z: &C::ScalarField,
    hs_prime: &[C::Affine],
) -> Result<C, RangeProofError> {
    let nm = n * m;
    let gs = gens.vec_g.get(..nm).ok_or_else(|| {
        RangeProofError::InvalidParameters(format!("{} generators needed", nm))
    })?;
    if hs_prime.len() != nm {
        return Err(RangeProofError::InvalidParameters(format!(
            "{} scaled generators given, {} needed",
            hs_prime.len(),
            nm
        )));
    }
    let u = u_generator(gens, t_blinding, mu, t)?;

    let y_nm = power_vector(*y, nm);
    let h_exp = vec_add(
        &scalar_product(&y_nm, z),
        &aggregated_two_powers(n, m, z),
    )?;

    let mut exp = vec![C::ScalarField::from(1u64), *x, -*mu, *t];
    exp.extend(vec![-*z; nm]);
    exp.extend(h_exp);
    let mut bases = vec![*a_commit, *s_commit, gens.h, u];
    bases.extend_from_slice(gs);
    bases.extend_from_slice(hs_prime);
    Ok(sum_exps::<C>(&exp, &bases)?)
}
