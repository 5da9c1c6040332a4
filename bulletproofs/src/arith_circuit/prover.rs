use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::{end_timer, rand::Rng, start_timer, UniformRand, Zero};
use toolbox::errors::AlgebraErrors;
use toolbox::poly::{evaluate_polynomial, multiply_poly};
use toolbox::vec::{hadamard_product, inner_product, power_vector, vec_add, vec_sub};

use super::{
    check_gates, commit_bit_vector, ArithCircuit, ArithCircuitProof, ArithWitness,
    ChallengeVectors, T_DEGREES,
};
use crate::errors::ArithCircuitProofError;
use crate::generators::BulletproofGens;
use crate::ipa::InnerProductProtocol;
use crate::structs::{InnerProductBase, InnerProductWitness};
use crate::utils::{random_vector, scale_bases, shamir_circuit, shamir_z, sum_exps, u_generator};

impl<C: CurveGroup> ArithCircuitProof<C> {
    /// Proves knowledge of wires satisfying `circuit` whose committed inputs
    /// open `witness.commitments`.
    pub fn prove<R: Rng>(
        rng: &mut R,
        gens: &BulletproofGens<C>,
        circuit: &ArithCircuit<C::ScalarField>,
        witness: &ArithWitness<C>,
    ) -> Result<Self, ArithCircuitProofError> {
        let start = start_timer!(|| "running arithmetic circuit prove algorithm...");

        let (_, n, m) = circuit.dimensions()?;
        check_gates(gens, n)?;
        let assignment = &witness.assignment;
        if assignment.a_l.len() != n || assignment.a_r.len() != n || assignment.a_o.len() != n {
            return Err(ArithCircuitProofError::InvalidParameters(format!(
                "assignment does not match {} gates",
                n
            )));
        }
        if witness.commitments.len() != m || witness.commit_blinders.len() != m {
            return Err(ArithCircuitProofError::InvalidParameters(format!(
                "witness does not match {} committed values",
                m
            )));
        }

        // P->V: A_I, A_O, S
        let alpha = C::ScalarField::rand(rng);
        let beta = C::ScalarField::rand(rng);
        let rho = C::ScalarField::rand(rng);
        let s_l: Vec<C::ScalarField> = random_vector(rng, n);
        let s_r: Vec<C::ScalarField> = random_vector(rng, n);

        let commits = C::normalize_batch(&[
            commit_bit_vector(gens, &alpha, &assignment.a_l, &assignment.a_r)?,
            commit_bit_vector(gens, &beta, &assignment.a_o, &[])?,
            commit_bit_vector(gens, &rho, &s_l, &s_r)?,
        ]);
        let (ai_commit, ao_commit, s_commit) = (commits[0], commits[1], commits[2]);

        // V->P: y, z
        let mut points = vec![ai_commit, ao_commit, s_commit];
        let y = shamir_circuit::<C>(circuit, &witness.commitments, &points)?;
        let z = shamir_z(&y)?;
        let cv = ChallengeVectors::new(circuit, &z)?;

        let y_inv = y.inverse().ok_or(AlgebraErrors::NotInvertible)?;
        let y_n = power_vector(y, n);
        let y_inv_n = power_vector(y_inv, n);

        // l(X) = (a_l + y^{-n} ∘ zW_R)·X + a_o·X^2 + s_l·X^3
        // r(X) = (zW_O - y^n) + (y^n ∘ a_r + zW_L)·X + y^n ∘ s_r·X^3
        let l_poly = vec![
            vec![C::ScalarField::zero(); n],
            vec_add(&assignment.a_l, &hadamard_product(&y_inv_n, &cv.zw_r)?)?,
            assignment.a_o.clone(),
            s_l,
        ];
        let r_poly = vec![
            vec_sub(&cv.zw_o, &y_n)?,
            vec_add(&hadamard_product(&y_n, &assignment.a_r)?, &cv.zw_l)?,
            vec![C::ScalarField::zero(); n],
            hadamard_product(&y_n, &s_r)?,
        ];
        let t_poly = multiply_poly(&l_poly, &r_poly)?;

        // P->V: T_i = t_i·G + tau_i·H
        let taus: Vec<C::ScalarField> = random_vector(rng, T_DEGREES.len());
        let t_commits: Vec<C> = T_DEGREES
            .iter()
            .zip(taus.iter())
            .map(|(&i, tau)| gens.commit(&t_poly[i], tau))
            .collect();
        let t_commits = C::normalize_batch(&t_commits);

        // V->P: x
        points.extend(t_commits.iter().copied());
        let x = shamir_circuit::<C>(circuit, &witness.commitments, &points)?;
        let x_powers = power_vector(x, 7);

        let l = evaluate_polynomial(n, &l_poly, &x);
        let r = evaluate_polynomial(n, &r_poly, &x);
        let t = inner_product(&l, &r)?;

        let mut t_blinding =
            x_powers[2] * inner_product(&cv.zw_v, &witness.commit_blinders)?;
        for (&i, tau) in T_DEGREES.iter().zip(taus.iter()) {
            t_blinding += x_powers[i] * tau;
        }
        let mu = alpha * x_powers[1] + beta * x_powers[2] + rho * x_powers[3];

        // P = <l, Gs> + <r, hs'> + t·U
        let basis_g = gens.vec_g[..n].to_vec();
        let basis_h = scale_bases::<C>(&gens.vec_h[..n], &y_inv_n)?;
        let aux_h = u_generator(gens, &t_blinding, &mu, &t)?;

        let mut exp = l.clone();
        exp.extend(r.iter().copied());
        exp.push(t);
        let mut bases = basis_g.clone();
        bases.extend(basis_h.iter().copied());
        bases.push(aux_h);
        let commitment = sum_exps::<C>(&exp, &bases)?;

        let base = InnerProductBase {
            basis_g,
            basis_h,
            aux_h,
        };
        let product_proof =
            InnerProductProtocol::prove(&base, &InnerProductWitness { l, r }, &commitment)?;

        end_timer!(start);
        Ok(Self {
            t_blinding,
            mu,
            t,
            ai_commit,
            ao_commit,
            s_commit,
            t_commits,
            product_proof,
        })
    }
}
