use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::{end_timer, start_timer, One};
use toolbox::errors::AlgebraErrors;
use toolbox::vec::{hadamard_product, inner_product, power_vector, scalar_product, vec_add};

use super::{check_gates, delta, ArithCircuit, ArithCircuitProof, ChallengeVectors, T_DEGREES};
use crate::errors::ArithCircuitProofError;
use crate::generators::BulletproofGens;
use crate::ipa::InnerProductProtocol;
use crate::structs::InnerProductBase;
use crate::utils::{scale_bases, shamir_circuit, shamir_z, sum_exps, u_generator};

impl<C: CurveGroup> ArithCircuitProof<C> {
    pub fn verify(
        &self,
        gens: &BulletproofGens<C>,
        circuit: &ArithCircuit<C::ScalarField>,
        commitments: &[C::Affine],
    ) -> Result<(), ArithCircuitProofError> {
        let start = start_timer!(|| "running arithmetic circuit verify algorithm...");

        let (_, n, m) = circuit.dimensions()?;
        check_gates(gens, n)?;
        if commitments.len() != m {
            return Err(ArithCircuitProofError::InvalidParameters(format!(
                "expected {} commitments, got {}",
                m,
                commitments.len()
            )));
        }
        if self.t_commits.len() != T_DEGREES.len() {
            return Err(ArithCircuitProofError::InvalidProof(format!(
                "expected {} T commitments, got {}",
                T_DEGREES.len(),
                self.t_commits.len()
            )));
        }

        let mut points = vec![self.ai_commit, self.ao_commit, self.s_commit];
        let y = shamir_circuit::<C>(circuit, commitments, &points)?;
        let z = shamir_z(&y)?;
        let cv = ChallengeVectors::new(circuit, &z)?;

        points.extend(self.t_commits.iter().copied());
        let x = shamir_circuit::<C>(circuit, commitments, &points)?;
        let x_powers = power_vector(x, 7);

        // t·G + t_blinding·H
        // == x^2·(delta + <z^Q, c>)·G + x^2·<zW_V, V> + Σ x^i·T_i
        let delta = delta(n, &y, &cv.zw_l, &cv.zw_r)?;
        let mut exp = vec![x_powers[2] * (delta + inner_product(&cv.z_q, &circuit.cs)?)];
        exp.extend(scalar_product(&cv.zw_v, &x_powers[2]));
        exp.extend(T_DEGREES.iter().map(|&i| x_powers[i]));
        let mut bases = vec![gens.g];
        bases.extend_from_slice(commitments);
        bases.extend(self.t_commits.iter().copied());

        if gens.commit(&self.t, &self.t_blinding) != sum_exps::<C>(&exp, &bases)? {
            return Err(ArithCircuitProofError::InvalidProof(
                "polynomial identity check failed".to_string(),
            ));
        }

        // P = x·A_I + x^2·A_O + x^3·S - <1, Hs> + <x·y^{-n} ∘ zW_R, Gs>
        //     + <x·zW_L + zW_O, hs'> - mu·H + t·U
        let y_inv = y.inverse().ok_or(AlgebraErrors::NotInvertible)?;
        let y_inv_n = power_vector(y_inv, n);
        let basis_g = gens.vec_g[..n].to_vec();
        let basis_h = scale_bases::<C>(&gens.vec_h[..n], &y_inv_n)?;
        let aux_h = u_generator(gens, &self.t_blinding, &self.mu, &self.t)?;

        let mut exp = vec![x_powers[1], x_powers[2], x_powers[3], -self.mu, self.t];
        exp.extend(vec![-C::ScalarField::one(); n]);
        exp.extend(scalar_product(&hadamard_product(&y_inv_n, &cv.zw_r)?, &x));
        exp.extend(vec_add(&scalar_product(&cv.zw_l, &x), &cv.zw_o)?);
        let mut bases = vec![self.ai_commit, self.ao_commit, self.s_commit, gens.h, aux_h];
        bases.extend_from_slice(&gens.vec_h[..n]);
        bases.extend(basis_g.iter().copied());
        bases.extend(basis_h.iter().copied());
        let commitment = sum_exps::<C>(&exp, &bases)?;

        let base = InnerProductBase {
            basis_g,
            basis_h,
            aux_h,
        };
        InnerProductProtocol::verify(n, &commitment, &base, &self.product_proof)?;

        end_timer!(start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith_circuit::fixtures::*;
    use crate::arith_circuit::{ArithWitness, Assignment, GateWeights};
    use ark_secp256k1::{Fr, Projective};
    use toolbox::vec::{convert, vec_sub};

    type Proof = ArithCircuitProof<Projective>;

    #[test]
    fn test_arith_circuit_proof() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(16);
        for (q, n, m) in [(4, 4, 2), (8, 16, 3), (1, 1, 1), (3, 2, 0)] {
            let (circuit, witness) =
                generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &gens, q, n, m).unwrap();
            let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();
            assert_eq!(proof.t_commits.len(), 5);
            assert_eq!(proof.product_proof.l_commits.len(), n.trailing_zeros() as usize);
            proof.verify(&gens, &circuit, &witness.commitments).unwrap();
        }
    }

    #[test]
    fn test_hand_written_circuit() {
        // 2 * 3 = 6 and a_o[0] + a_o[1] = v + 10 with v = 2, using gates (2, 3), (1, 6)
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(2);
        let circuit = ArithCircuit {
            weights: GateWeights {
                w_l: vec![convert::<Fr>(&[0, 0])],
                w_r: vec![convert::<Fr>(&[0, 0])],
                w_o: vec![convert::<Fr>(&[1, 1])],
            },
            commitment_weights: vec![convert::<Fr>(&[1])],
            cs: convert::<Fr>(&[10]),
        };
        let gamma = Fr::from(7u64);
        let witness = ArithWitness::<Projective> {
            assignment: Assignment {
                a_l: convert::<Fr>(&[2, 1]),
                a_r: convert::<Fr>(&[3, 6]),
                a_o: convert::<Fr>(&[6, 6]),
            },
            commitments: vec![gens.commit(&Fr::from(2u64), &gamma).into_affine()],
            commit_blinders: vec![gamma],
        };

        let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();
        proof.verify(&gens, &circuit, &witness.commitments).unwrap();

        let other = vec![gens.commit(&Fr::from(3u64), &gamma).into_affine()];
        assert!(matches!(
            proof.verify(&gens, &circuit, &other),
            Err(ArithCircuitProofError::InvalidProof(_))
        ));
    }

    #[test]
    fn test_unsatisfied_witness_fails() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let (circuit, mut witness) =
            generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &gens, 4, 4, 2).unwrap();
        witness.assignment.a_o[0] += Fr::from(1u64);

        let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();
        assert!(proof.verify(&gens, &circuit, &witness.commitments).is_err());
    }

    #[test]
    fn test_tampered_proof_fails() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let (circuit, witness) =
            generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &gens, 4, 4, 2).unwrap();
        let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();

        let mut bad = proof.clone();
        bad.t += Fr::from(1u64);
        assert!(bad.verify(&gens, &circuit, &witness.commitments).is_err());

        let mut bad = proof.clone();
        bad.mu += Fr::from(1u64);
        assert!(bad.verify(&gens, &circuit, &witness.commitments).is_err());

        let mut bad = proof.clone();
        bad.ao_commit = gens.g;
        assert!(bad.verify(&gens, &circuit, &witness.commitments).is_err());

        let mut bad = proof.clone();
        bad.t_commits.pop();
        assert!(matches!(
            bad.verify(&gens, &circuit, &witness.commitments),
            Err(ArithCircuitProofError::InvalidProof(_))
        ));

        let mut other_circuit = circuit.clone();
        other_circuit.cs[0] += Fr::from(1u64);
        assert!(proof.verify(&gens, &other_circuit, &witness.commitments).is_err());

        assert!(matches!(
            proof.verify(&gens, &circuit, &witness.commitments[..1]),
            Err(ArithCircuitProofError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_gate_count_errors() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let big = BulletproofGens::<Projective>::new(8);
        let (circuit, witness) =
            generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &big, 2, 8, 1).unwrap();
        assert!(matches!(
            Proof::prove(&mut rng, &gens, &circuit, &witness),
            Err(ArithCircuitProofError::TooManyGates(8))
        ));

        let zeros = vec![vec![Fr::from(0u64); 3]];
        let circuit = ArithCircuit {
            weights: GateWeights {
                w_l: zeros.clone(),
                w_r: zeros.clone(),
                w_o: zeros,
            },
            commitment_weights: vec![vec![]],
            cs: vec![Fr::from(0u64)],
        };
        let witness = ArithWitness::<Projective> {
            assignment: Assignment {
                a_l: vec![Fr::from(0u64); 3],
                a_r: vec![Fr::from(0u64); 3],
                a_o: vec![Fr::from(0u64); 3],
            },
            commitments: vec![],
            commit_blinders: vec![],
        };
        assert!(matches!(
            Proof::prove(&mut rng, &gens, &circuit, &witness),
            Err(ArithCircuitProofError::NNotPowerOf2(3))
        ));
    }

    #[test]
    fn test_inputs_chosen_after_challenges_fail() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let (circuit, mut witness) =
            generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &gens, 4, 4, 1).unwrap();
        witness.assignment.a_o[0] += Fr::from(1u64);
        witness.assignment.a_l[1] += Fr::from(5u64);
        assert!(!witness.assignment.is_satisfied());
        let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();

        // replay the challenges the proof was built with
        let mut points = vec![proof.ai_commit, proof.ao_commit, proof.s_commit];
        let y = shamir_circuit::<Projective>(&circuit, &witness.commitments, &points).unwrap();
        let z = shamir_z(&y).unwrap();
        let cv = ChallengeVectors::new(&circuit, &z).unwrap();
        points.extend(proof.t_commits.iter().copied());
        let x = shamir_circuit::<Projective>(&circuit, &witness.commitments, &points).unwrap();

        // t_2 = <l_1, r_1> + <l_2, r_0>
        let a = &witness.assignment;
        let y_n = power_vector(y, 4);
        let y_inv_n = power_vector(y.inverse().unwrap(), 4);
        let l_1 = vec_add(&a.a_l, &hadamard_product(&y_inv_n, &cv.zw_r).unwrap()).unwrap();
        let r_1 = vec_add(&hadamard_product(&y_n, &a.a_r).unwrap(), &cv.zw_l).unwrap();
        let r_0 = vec_sub(&cv.zw_o, &y_n).unwrap();
        let t_2 = inner_product(&l_1, &r_1).unwrap() + inner_product(&a.a_o, &r_0).unwrap();

        // pick V after the challenges so that t_2 matches the public side
        let delta = delta(4, &y, &cv.zw_l, &cv.zw_r).unwrap();
        let public = delta + inner_product(&cv.z_q, &circuit.cs).unwrap();
        let v = (t_2 - public) * cv.zw_v[0].inverse().unwrap();
        let forged = vec![gens.commit(&v, &witness.commit_blinders[0]).into_affine()];

        // under the replayed challenges the polynomial identity holds for the forged V
        let x_powers = power_vector(x, 7);
        let mut exp = vec![x_powers[2] * public, x_powers[2] * cv.zw_v[0]];
        exp.extend(T_DEGREES.iter().map(|&i| x_powers[i]));
        let mut bases = vec![gens.g, forged[0]];
        bases.extend(proof.t_commits.iter().copied());
        assert_eq!(
            gens.commit(&proof.t, &proof.t_blinding),
            sum_exps::<Projective>(&exp, &bases).unwrap()
        );

        assert!(proof.verify(&gens, &circuit, &forged).is_err());
    }

    #[test]
    fn test_challenges_depend_on_inputs() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let (circuit, witness) =
            generate_arith_circuit_and_witness::<Projective, _>(&mut rng, &gens, 4, 4, 2).unwrap();
        let proof = Proof::prove(&mut rng, &gens, &circuit, &witness).unwrap();

        let mut swapped = witness.commitments.clone();
        swapped.swap(0, 1);
        let shifted: Vec<_> = witness
            .commitments
            .iter()
            .map(|v| (*v + gens.g).into_affine())
            .collect();

        let mut points = vec![proof.ai_commit, proof.ao_commit, proof.s_commit];
        let y = shamir_circuit::<Projective>(&circuit, &witness.commitments, &points).unwrap();
        points.extend(proof.t_commits.iter().copied());
        let x = shamir_circuit::<Projective>(&circuit, &witness.commitments, &points).unwrap();
        for other in [&swapped, &shifted] {
            let y_other = shamir_circuit::<Projective>(&circuit, other, &points[..3]).unwrap();
            let x_other = shamir_circuit::<Projective>(&circuit, other, &points).unwrap();
            assert_ne!(y, y_other);
            assert_ne!(x, x_other);
            assert!(proof.verify(&gens, &circuit, other).is_err());
        }
        proof.verify(&gens, &circuit, &witness.commitments).unwrap();
    }
}
