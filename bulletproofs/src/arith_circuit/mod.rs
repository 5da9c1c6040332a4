//! Arithmetic circuits with `n` multiplication gates and `q` linear constraints.
//!
//! A circuit is satisfied by an [`Assignment`] and committed values `v` when
//!
//! ```text
//! a_l ∘ a_r = a_o
//! W_L·a_l + W_R·a_r + W_O·a_o = W_V·v + c
//! ```

pub mod fixtures;
mod prover;
mod verifier;

use ark_ec::CurveGroup;
use ark_ff::Field;
use toolbox::errors::AlgebraErrors;
use toolbox::matrix::{solve_linear_system, vector_matrix_product, vector_matrix_product_t, Matrix};
use toolbox::vec::{hadamard_product, inner_product, power_vector, scalar_product, vec_add, vec_sub};

use crate::errors::ArithCircuitProofError;
use crate::generators::BulletproofGens;
use crate::structs::InnerProductProof;
use crate::utils::sum_exps;

/// Upper bound on `q` for generated circuits.
pub const MAX_CONSTRAINTS: usize = 1 << 16;

/// Degrees of the committed coefficients of `t(X)`; `t_2` is checked
/// against the public inputs instead.
pub(crate) const T_DEGREES: [usize; 5] = [1, 3, 4, 5, 6];

/// Gate weights `W_L`, `W_R`, `W_O`, each `q × n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateWeights<F: Field> {
    pub w_l: Matrix<F>,
    pub w_r: Matrix<F>,
    pub w_o: Matrix<F>,
}

impl<F: Field> GateWeights<F> {
    /// `W_L·a_l + W_R·a_r + W_O·a_o`, one entry per constraint.
    pub fn apply(&self, assignment: &Assignment<F>) -> Result<Vec<F>, AlgebraErrors> {
        let l = vector_matrix_product_t(&assignment.a_l, &self.w_l)?;
        let r = vector_matrix_product_t(&assignment.a_r, &self.w_r)?;
        let o = vector_matrix_product_t(&assignment.a_o, &self.w_o)?;
        vec_add(&vec_add(&l, &r)?, &o)
    }
}

/// Wire values of the multiplication gates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<F: Field> {
    pub a_l: Vec<F>,
    pub a_r: Vec<F>,
    pub a_o: Vec<F>,
}

impl<F: Field> Assignment<F> {
    /// Whether `a_o[i] == a_l[i] * a_r[i]` for every gate.
    pub fn is_satisfied(&self) -> bool {
        hadamard_product(&self.a_l, &self.a_r).map_or(false, |prod| prod == self.a_o)
    }
}

/// Public description of a circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithCircuit<F: Field> {
    pub weights: GateWeights<F>,
    /// `W_V`, `q × m`
    pub commitment_weights: Matrix<F>,
    pub cs: Vec<F>,
}

impl<F: Field> ArithCircuit<F> {
    /// Returns `(q, n, m)` after checking that every matrix agrees on them.
    pub fn dimensions(&self) -> Result<(usize, usize, usize), ArithCircuitProofError> {
        let q = self.cs.len();
        let n = self.weights.w_l.first().map_or(0, |row| row.len());
        let m = self.commitment_weights.first().map_or(0, |row| row.len());

        for (name, w) in [
            ("w_l", &self.weights.w_l),
            ("w_r", &self.weights.w_r),
            ("w_o", &self.weights.w_o),
        ] {
            if w.len() != q || w.iter().any(|row| row.len() != n) {
                return Err(ArithCircuitProofError::InvalidParameters(format!(
                    "{} is not a {} x {} matrix",
                    name, q, n
                )));
            }
        }
        if self.commitment_weights.len() != q
            || self.commitment_weights.iter().any(|row| row.len() != m)
        {
            return Err(ArithCircuitProofError::InvalidParameters(format!(
                "commitment weights are not a {} x {} matrix",
                q, m
            )));
        }
        Ok((q, n, m))
    }
}

/// Prover-side data: wires, and the Pedersen commitments `V` with their blinders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithWitness<C: CurveGroup> {
    pub assignment: Assignment<C::ScalarField>,
    pub commitments: Vec<C::Affine>,
    pub commit_blinders: Vec<C::ScalarField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArithCircuitProof<C: CurveGroup> {
    pub t_blinding: C::ScalarField,
    pub mu: C::ScalarField,
    pub t: C::ScalarField,
    pub ai_commit: C::Affine,
    pub ao_commit: C::Affine,
    pub s_commit: C::Affine,
    /// `T_1, T_3, T_4, T_5, T_6`
    pub t_commits: Vec<C::Affine>,
    pub product_proof: InnerProductProof<C>,
}

/// Solves `W_V · V = W_L·a_l + W_R·a_r + W_O·a_o − c` for the committed values `V`.
pub fn compute_input_values<F: Field>(
    weights: &GateWeights<F>,
    commitment_weights: &[Vec<F>],
    assignment: &Assignment<F>,
    cs: &[F],
) -> Result<Vec<F>, AlgebraErrors> {
    let solutions = vec_sub(&weights.apply(assignment)?, cs)?;

    if commitment_weights.len() != solutions.len() {
        return Err(AlgebraErrors::LengthMismatch {
            left: commitment_weights.len(),
            right: solutions.len(),
        });
    }
    let augmented: Matrix<F> = commitment_weights
        .iter()
        .zip(solutions.iter())
        .map(|(row, s)| {
            let mut row = row.clone();
            row.push(*s);
            row
        })
        .collect();
    solve_linear_system(&augmented)
}

/// `<y^{-n} ∘ zw_r, zw_l>`
pub fn delta<F: Field>(n: usize, y: &F, zw_l: &[F], zw_r: &[F]) -> Result<F, AlgebraErrors> {
    let y_inv = y.inverse().ok_or(AlgebraErrors::NotInvertible)?;
    let y_inv_n = power_vector(y_inv, n);
    inner_product(&hadamard_product(&y_inv_n, zw_r)?, zw_l)
}

/// `Σ v_l[i]·Gs[i] + Σ v_r[i]·Hs[i] + blinding·H`; `v_r` may be shorter than `v_l`.
pub fn commit_bit_vector<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    blinding: &C::ScalarField,
    v_l: &[C::ScalarField],
    v_r: &[C::ScalarField],
) -> Result<C, AlgebraErrors> {
    let gs = gens.vec_g.get(..v_l.len()).ok_or(AlgebraErrors::LengthMismatch {
        left: v_l.len(),
        right: gens.vec_g.len(),
    })?;
    let hs = gens.vec_h.get(..v_r.len()).ok_or(AlgebraErrors::LengthMismatch {
        left: v_r.len(),
        right: gens.vec_h.len(),
    })?;

    let mut exp = vec![*blinding];
    exp.extend_from_slice(v_l);
    exp.extend_from_slice(v_r);
    let mut bases = vec![gens.h];
    bases.extend_from_slice(gs);
    bases.extend_from_slice(hs);
    sum_exps::<C>(&exp, &bases)
}

/// Gate count must be a power of two that the generators can hold.
pub(crate) fn check_gates<C: CurveGroup>(
    gens: &BulletproofGens<C>,
    n: usize,
) -> Result<(), ArithCircuitProofError> {
    if n > gens.capacity() {
        return Err(ArithCircuitProofError::TooManyGates(n));
    }
    if !n.is_power_of_two() {
        return Err(ArithCircuitProofError::NNotPowerOf2(n));
    }
    Ok(())
}

/// The constraint weights folded with `z^Q = [z, z^2, ..., z^q]`.
pub(crate) struct ChallengeVectors<F: Field> {
    pub z_q: Vec<F>,
    pub zw_l: Vec<F>,
    pub zw_r: Vec<F>,
    pub zw_o: Vec<F>,
    pub zw_v: Vec<F>,
}

impl<F: Field> ChallengeVectors<F> {
    pub fn new(circuit: &ArithCircuit<F>, z: &F) -> Result<Self, AlgebraErrors> {
        let z_q = scalar_product(&power_vector(*z, circuit.cs.len()), z);
        Ok(Self {
            zw_l: vector_matrix_product(&z_q, &circuit.weights.w_l)?,
            zw_r: vector_matrix_product(&z_q, &circuit.weights.w_r)?,
            zw_o: vector_matrix_product(&z_q, &circuit.weights.w_o)?,
            zw_v: vector_matrix_product(&z_q, &circuit.commitment_weights)?,
            z_q,
        })
    }
}
