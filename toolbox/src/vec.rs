use ark_ff::Field;
use std::iter;

use crate::errors::{check_len, AlgebraErrors};

pub fn convert<F: Field>(m: &[u64]) -> Vec<F> {
    m.iter().map(|&i| F::from(i)).collect()
}

pub fn scalar_product<F: Field>(vec_a: &[F], c: &F) -> Vec<F> {
    vec_a.iter().map(|&a| a * c).collect()
}

/// `<a, b>`
pub fn inner_product<F: Field>(vec_a: &[F], vec_b: &[F]) -> Result<F, AlgebraErrors> {
    check_len(vec_a.len(), vec_b.len())?;

    Ok(vec_a
        .iter()
        .zip(vec_b.iter())
        .map(|(&a, &b)| a * b)
        .fold(F::zero(), |acc, x| acc + x))
}

pub fn vec_add<F: Field>(vec_a: &[F], vec_b: &[F]) -> Result<Vec<F>, AlgebraErrors> {
    check_len(vec_a.len(), vec_b.len())?;
    Ok(vec_a.iter().zip(vec_b.iter()).map(|(&a, &b)| a + b).collect())
}

pub fn vec_sub<F: Field>(vec_a: &[F], vec_b: &[F]) -> Result<Vec<F>, AlgebraErrors> {
    check_len(vec_a.len(), vec_b.len())?;
    Ok(vec_a.iter().zip(vec_b.iter()).map(|(&a, &b)| a - b).collect())
}

/// Adds `c` to every entry.
pub fn vec_shift<F: Field>(vec_a: &[F], c: &F) -> Vec<F> {
    vec_a.iter().map(|&a| a + c).collect()
}

pub fn vec_split<T: Clone>(vec: &[T], n: usize) -> Result<(Vec<T>, Vec<T>), AlgebraErrors> {
    if vec.len() < n {
        return Err(AlgebraErrors::LengthMismatch {
            left: vec.len(),
            right: n,
        });
    }
    let (slice_l, slice_r) = vec.split_at(n);
    Ok((slice_l.to_vec(), slice_r.to_vec()))
}

/// Element-wise product `a ∘ b`.
pub fn hadamard_product<F: Field>(vec_a: &[F], vec_b: &[F]) -> Result<Vec<F>, AlgebraErrors> {
    check_len(vec_a.len(), vec_b.len())?;
    Ok(vec_a.iter().zip(vec_b.iter()).map(|(&a, &b)| a * b).collect())
}

/// `[x^0, x^1, ..., x^{n-1}]`
pub fn power_vector<F: Field>(x: F, n: usize) -> Vec<F> {
    iter::successors(Some(F::one()), |&current_power| Some(current_power * x))
        .take(n)
        .collect()
}
