use ark_ff::Field;

use crate::errors::{check_len, AlgebraErrors};
use crate::vec::inner_product;

/// Row-major dense matrix.
pub type Matrix<F> = Vec<Vec<F>>;

fn num_cols<F>(m: &[Vec<F>]) -> Result<usize, AlgebraErrors> {
    let cols = m.first().map_or(0, |row| row.len());
    for row in m.iter() {
        check_len(row.len(), cols)?;
    }
    Ok(cols)
}

pub fn transpose<F: Field>(m: &[Vec<F>]) -> Result<Matrix<F>, AlgebraErrors> {
    let cols = num_cols(m)?;
    Ok((0..cols)
        .map(|j| m.iter().map(|row| row[j]).collect())
        .collect())
}

/// Row vector times matrix: `v` is combined with each column of `m`.
/// The output has one entry per column.
pub fn vector_matrix_product<F: Field>(v: &[F], m: &[Vec<F>]) -> Result<Vec<F>, AlgebraErrors> {
    check_len(v.len(), m.len())?;
    let cols = num_cols(m)?;

    let mut result = vec![F::zero(); cols];
    for (vi, row) in v.iter().zip(m.iter()) {
        for (acc, mij) in result.iter_mut().zip(row.iter()) {
            *acc += *vi * mij;
        }
    }
    Ok(result)
}

/// Transposed variant: `v` is combined with each row of `m`, i.e. `v · mᵀ`.
/// The output has one entry per row.
pub fn vector_matrix_product_t<F: Field>(v: &[F], m: &[Vec<F>]) -> Result<Vec<F>, AlgebraErrors> {
    m.iter().map(|row| inner_product(v, row)).collect()
}

/// `m · v`, same as [`vector_matrix_product_t`].
pub fn matrix_vector_product<F: Field>(m: &[Vec<F>], v: &[F]) -> Result<Vec<F>, AlgebraErrors> {
    vector_matrix_product_t(v, m)
}

pub fn matrix_product<F: Field>(a: &[Vec<F>], b: &[Vec<F>]) -> Result<Matrix<F>, AlgebraErrors> {
    a.iter().map(|row| vector_matrix_product(row, b)).collect()
}

/// Repeated multiplication `m · m · ... · m`.
///
/// `power_matrix(m, 0)` returns `m` itself, not the identity, so
/// `power_matrix(m, k)` is `m^(k+1)`.
pub fn power_matrix<F: Field>(m: &[Vec<F>], k: usize) -> Result<Matrix<F>, AlgebraErrors> {
    let mut result = m.to_vec();
    for _ in 0..k {
        result = matrix_product(m, &result)?;
    }
    Ok(result)
}

pub fn gen_iden_matrix<F: Field>(size: usize) -> Matrix<F> {
    (0..size)
        .map(|i| {
            let mut row = vec![F::zero(); size];
            row[i] = F::one();
            row
        })
        .collect()
}

pub fn gen_zero_matrix<F: Field>(rows: usize, cols: usize) -> Matrix<F> {
    vec![vec![F::zero(); cols]; rows]
}

/// Solves `M x = b` where `augmented` is `M` with `b` appended as the last column.
///
/// `M` may have more rows than unknowns as long as the extra rows reduce to `0 = 0`.
pub fn solve_linear_system<F: Field>(augmented: &[Vec<F>]) -> Result<Vec<F>, AlgebraErrors> {
    if augmented.is_empty() {
        return Ok(vec![]);
    }
    let (reduced, unknowns) = gaussian_reduce(augmented)?;
    back_substitute(&reduced, unknowns)
}

/// Brings the augmented matrix to row-echelon form with unit pivots.
fn gaussian_reduce<F: Field>(augmented: &[Vec<F>]) -> Result<(Matrix<F>, usize), AlgebraErrors> {
    let width = num_cols(augmented)?;
    if width == 0 {
        return Err(AlgebraErrors::LengthMismatch { left: 0, right: 1 });
    }
    let unknowns = width - 1;
    let rows = augmented.len();
    if rows < unknowns {
        return Err(AlgebraErrors::Underdetermined { rows, unknowns });
    }

    let mut m = augmented.to_vec();
    for r in 0..unknowns {
        let pivot = (r..rows)
            .find(|&i| !m[i][r].is_zero())
            .ok_or(AlgebraErrors::SingularMatrix(r))?;
        m.swap(r, pivot);

        let inv = m[r][r].inverse().ok_or(AlgebraErrors::SingularMatrix(r))?;
        m[r].iter_mut().for_each(|e| *e *= inv);

        let pivot_row = m[r].clone();
        let pivot_coeff = pivot_row[r];
        for target in m.iter_mut().skip(r + 1) {
            let target_coeff = target[r];
            if target_coeff.is_zero() {
                continue;
            }
            for (t, p) in target.iter_mut().zip(pivot_row.iter()) {
                *t = pivot_coeff * *t - target_coeff * p;
            }
        }
    }

    // rows past the last pivot carry no unknowns any more
    for (i, row) in m.iter().enumerate().skip(unknowns) {
        if !row[unknowns].is_zero() {
            return Err(AlgebraErrors::InconsistentSystem(i));
        }
    }
    Ok((m, unknowns))
}

fn back_substitute<F: Field>(reduced: &[Vec<F>], unknowns: usize) -> Result<Vec<F>, AlgebraErrors> {
    // solved unknowns, last variable first
    let mut solved: Vec<F> = Vec::with_capacity(unknowns);
    for r in (0..unknowns).rev() {
        let row = &reduced[r];
        let known_tail: Vec<F> = solved.iter().rev().copied().collect();
        let x_r = row[unknowns] - inner_product(&known_tail, &row[r + 1..unknowns])?;
        solved.push(x_r);
    }
    solved.reverse();
    Ok(solved)
}
