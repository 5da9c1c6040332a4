//! Random satisfiable circuits for tests and benchmarks.

use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::rand::Rng;
use rand::seq::SliceRandom;
use toolbox::matrix::{gen_iden_matrix, gen_zero_matrix, matrix_vector_product, Matrix};
use toolbox::vec::vec_sub;

use super::{ArithCircuit, ArithWitness, Assignment, GateWeights, MAX_CONSTRAINTS};
use crate::errors::ArithCircuitProofError;
use crate::generators::BulletproofGens;
use crate::utils::random_vector;

/// `W_L`, `W_R`, `W_O` of size `q × n`, each with one random all-ones row.
pub fn generate_gate_weights<F: Field, R: Rng>(
    rng: &mut R,
    q: usize,
    n: usize,
) -> Result<GateWeights<F>, ArithCircuitProofError> {
    if q == 0 {
        return Err(ArithCircuitProofError::InvalidParameters(
            "a circuit needs at least one constraint".to_string(),
        ));
    }
    if q > MAX_CONSTRAINTS {
        return Err(ArithCircuitProofError::TooManyGates(q));
    }
    if !n.is_power_of_two() {
        return Err(ArithCircuitProofError::NNotPowerOf2(n));
    }

    let mut one_hot_rows = || {
        let mut w = gen_zero_matrix::<F>(q, n);
        w[rng.gen_range(0..q)] = vec![F::one(); n];
        w
    };
    Ok(GateWeights {
        w_l: one_hot_rows(),
        w_r: one_hot_rows(),
        w_o: one_hot_rows(),
    })
}

/// Wires in `[0, 2^n)` with `a_o = a_l ∘ a_r`.
pub fn generate_random_assignment<F: Field, R: Rng>(rng: &mut R, n: usize) -> Assignment<F> {
    let mut wires = || -> Vec<F> {
        (0..n)
            .map(|_| {
                let w = if n >= 64 { rng.gen::<u64>() } else { rng.gen_range(0..1u64 << n) };
                F::from(w)
            })
            .collect()
    };
    let a_l = wires();
    let a_r = wires();
    let a_o = a_l.iter().zip(a_r.iter()).map(|(l, r)| *l * r).collect();
    Assignment { a_l, a_r, a_o }
}

/// The rows of `[I_m; 0]` in random order, a `q × m` matrix of full column rank.
pub fn generate_wv<F: Field, R: Rng>(
    rng: &mut R,
    q: usize,
    m: usize,
) -> Result<Matrix<F>, ArithCircuitProofError> {
    if q < m {
        return Err(ArithCircuitProofError::UnderspecifiedSystem {
            constraints: q,
            commitments: m,
        });
    }
    let mut w_v = gen_iden_matrix::<F>(m);
    w_v.extend(gen_zero_matrix::<F>(q - m, m));
    w_v.shuffle(rng);
    Ok(w_v)
}

/// A circuit together with a witness that satisfies it.
///
/// The `m` committed values are drawn at random and `cs` is chosen so that
/// every constraint holds.
pub fn generate_arith_circuit_and_witness<C: CurveGroup, R: Rng>(
    rng: &mut R,
    gens: &BulletproofGens<C>,
    q: usize,
    n: usize,
    m: usize,
) -> Result<(ArithCircuit<C::ScalarField>, ArithWitness<C>), ArithCircuitProofError> {
    let weights = generate_gate_weights(rng, q, n)?;
    let commitment_weights = generate_wv(rng, q, m)?;
    let assignment = generate_random_assignment(rng, n);

    let v: Vec<C::ScalarField> = random_vector(rng, m);
    let commit_blinders: Vec<C::ScalarField> = random_vector(rng, m);
    let cs = vec_sub(
        &weights.apply(&assignment)?,
        &matrix_vector_product(&commitment_weights, &v)?,
    )?;

    let commitments: Vec<C> = v
        .iter()
        .zip(commit_blinders.iter())
        .map(|(v_j, gamma_j)| gens.commit(v_j, gamma_j))
        .collect();

    Ok((
        ArithCircuit {
            weights,
            commitment_weights,
            cs,
        },
        ArithWitness {
            assignment,
            commitments: C::normalize_batch(&commitments),
            commit_blinders,
        },
    ))
}
