//! Polynomials whose coefficients are vectors: `coeffs[i]` multiplies `x^i`.

use ark_ff::Field;

use crate::errors::AlgebraErrors;
use crate::vec::inner_product;

/// Evaluates `Σ coeffs[i] * x^i` into a vector of length `degree_bound`.
///
/// The width of the result is taken from `degree_bound`, not from the
/// coefficients: longer coefficients are cut to that width and shorter
/// ones are treated as zero-padded.
pub fn evaluate_polynomial<F: Field>(degree_bound: usize, coeffs: &[Vec<F>], x: &F) -> Vec<F> {
    let mut result = vec![F::zero(); degree_bound];
    let mut x_i = F::one();
    for coeff in coeffs.iter() {
        for (acc, c) in result.iter_mut().zip(coeff.iter()) {
            *acc += x_i * c;
        }
        x_i *= x;
    }
    result
}

/// Product of two vector-coefficient polynomials where the coefficient
/// pair `(i, j)` contributes `<l[i], r[j]>` to degree `i + j`.
pub fn multiply_poly<F: Field>(l: &[Vec<F>], r: &[Vec<F>]) -> Result<Vec<F>, AlgebraErrors> {
    if l.is_empty() || r.is_empty() {
        return Ok(vec![]);
    }
    let mut result = vec![F::zero(); l.len() + r.len() - 1];
    for (i, li) in l.iter().enumerate() {
        for (j, rj) in r.iter().enumerate() {
            result[i + j] += inner_product(li, rj)?;
        }
    }
    Ok(result)
}
