use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::{end_timer, start_timer};
use toolbox::errors::AlgebraErrors;
use toolbox::vec::power_vector;

use super::encoding::{compute_lr_commitment, delta};
use super::{check_parameters, RangeProof};
use crate::errors::RangeProofError;
use crate::generators::BulletproofGens;
use crate::ipa::InnerProductProtocol;
use crate::structs::InnerProductBase;
use crate::utils::{scale_bases, shamir_gs, shamir_z, sum_exps, u_generator};

impl<C: CurveGroup> RangeProof<C> {
    /// Checks that every commitment opens to a value in `[0, 2^n)`.
    pub fn verify(
        &self,
        gens: &BulletproofGens<C>,
        n: usize,
        commitments: &[C::Affine],
    ) -> Result<(), RangeProofError> {
        let start = start_timer!(|| format!("running range verify algorithm for {} commitments...", commitments.len()));

        let m = commitments.len();
        check_parameters(gens, n, m)?;
        let nm = n * m;

        let mut points = commitments.to_vec();
        points.push(self.a_commit);
        points.push(self.s_commit);
        let y = shamir_gs::<C>(&points)?;
        let z = shamir_z(&y)?;
        points.push(self.t1_commit);
        points.push(self.t2_commit);
        let x = shamir_gs::<C>(&points)?;

        // t·G + t_blinding·H == Σ_j z^{j+2}·V_j + delta·G + x·T_1 + x^2·T_2
        let mut exp: Vec<C::ScalarField> = power_vector(z, m).iter().map(|z_j| *z_j * z.square()).collect();
        exp.extend([delta(n, m, &y, &z), x, x.square()]);
        let mut bases = commitments.to_vec();
        bases.extend([gens.g, self.t1_commit, self.t2_commit]);

        if gens.commit(&self.t, &self.t_blinding) != sum_exps::<C>(&exp, &bases)? {
            return Err(RangeProofError::InvalidProof(
                "polynomial identity check failed".to_string(),
            ));
        }

        let y_inv = y.inverse().ok_or(AlgebraErrors::NotInvertible)?;
        let hs_prime = scale_bases::<C>(&gens.vec_h[..nm], &power_vector(y_inv, nm))?;
        let commitment = compute_lr_commitment(
            gens,
            n,
            m,
            &self.a_commit,
            &self.s_commit,
            &self.t,
            &self.t_blinding,
            &self.mu,
            &x,
            &y,
            &z,
            &hs_prime,
        )?;

        let base = InnerProductBase {
            basis_g: gens.vec_g[..nm].to_vec(),
            basis_h: hs_prime,
            aux_h: u_generator(gens, &self.t_blinding, &self.mu, &self.t)?,
        };
        InnerProductProtocol::verify(nm, &commitment, &base, &self.product_proof)?;

        end_timer!(start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_proof::encoding::{
        aggregated_two_powers, commit_bit_vectors, complementary_vector, reversed_encode_bit,
    };
    use crate::utils::random_vector;
    use ark_secp256k1::{Fr, Projective};

    type Proof = RangeProof<Projective>;

    #[test]
    fn test_range_proof_single() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(64);
        for (n, v) in [(8, 200u64), (8, 0), (8, 255), (1, 1), (64, u64::MAX)] {
            let blindings: Vec<Fr> = random_vector(&mut rng, 1);
            let (proof, commitments) = Proof::prove(&mut rng, &gens, n, &[v], &blindings).unwrap();
            assert_eq!(commitments[0], gens.commit(&Fr::from(v), &blindings[0]).into_affine());
            assert_eq!(proof.product_proof.l_commits.len(), n.trailing_zeros() as usize);
            proof.verify(&gens, n, &commitments).unwrap();
        }
    }

    #[test]
    fn test_range_proof_aggregated() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(64);
        let values = [0u64, 65535, 1, 4242];
        for m in [2, 4] {
            let blindings: Vec<Fr> = random_vector(&mut rng, m);
            let (proof, commitments) =
                Proof::prove(&mut rng, &gens, 16, &values[..m], &blindings).unwrap();
            assert_eq!(commitments.len(), m);
            proof.verify(&gens, 16, &commitments).unwrap();

            // commitments must be checked in the order they were proven
            let mut swapped = commitments.clone();
            swapped.swap(0, 1);
            assert!(proof.verify(&gens, 16, &swapped).is_err());
        }
    }

    #[test]
    fn test_value_not_in_range() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(16);
        let blindings: Vec<Fr> = random_vector(&mut rng, 2);
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 8, &[256], &blindings[..1]),
            Err(RangeProofError::ValueNotInRange(256))
        ));
        match Proof::prove(&mut rng, &gens, 8, &[3, 300], &blindings) {
            Err(RangeProofError::ValuesNotInRange(vs)) => assert_eq!(vs, vec![300]),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(8);
        let blindings: Vec<Fr> = random_vector(&mut rng, 3);
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 128, &[1], &blindings[..1]),
            Err(RangeProofError::UpperBoundTooLarge(128))
        ));
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 3, &[1], &blindings[..1]),
            Err(RangeProofError::NNotPowerOf2(3))
        ));
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 0, &[0], &blindings[..1]),
            Err(RangeProofError::NNotPowerOf2(0))
        ));
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 2, &[1, 2, 3], &blindings),
            Err(RangeProofError::NNotPowerOf2(3))
        ));
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 16, &[1], &blindings[..1]),
            Err(RangeProofError::InvalidParameters(_))
        ));
        assert!(matches!(
            Proof::prove(&mut rng, &gens, 4, &[1, 2], &blindings[..1]),
            Err(RangeProofError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_wrong_commitment_fails() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(8);
        let blindings: Vec<Fr> = random_vector(&mut rng, 1);
        let (proof, commitments) = Proof::prove(&mut rng, &gens, 8, &[77], &blindings).unwrap();

        let other = vec![gens.commit(&Fr::from(78u64), &blindings[0]).into_affine()];
        assert!(matches!(
            proof.verify(&gens, 8, &other),
            Err(RangeProofError::InvalidProof(_))
        ));
        // the same proof does not cover a narrower range
        assert!(proof.verify(&gens, 4, &commitments).is_err());
    }

    #[test]
    fn test_tampered_proof_fails() {
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(8);
        let blindings: Vec<Fr> = random_vector(&mut rng, 1);
        let (proof, commitments) = Proof::prove(&mut rng, &gens, 8, &[99], &blindings).unwrap();

        let mut bad = proof.clone();
        bad.t_blinding += Fr::from(1u64);
        assert!(bad.verify(&gens, 8, &commitments).is_err());

        let mut bad = proof.clone();
        bad.mu += Fr::from(1u64);
        assert!(matches!(
            bad.verify(&gens, 8, &commitments),
            Err(RangeProofError::InnerProductError(_))
        ));

        let mut bad = proof.clone();
        bad.a_commit = gens.g;
        assert!(bad.verify(&gens, 8, &commitments).is_err());

        let mut bad = proof;
        bad.product_proof.r += Fr::from(1u64);
        assert!(bad.verify(&gens, 8, &commitments).is_err());
    }

    #[test]
    fn test_prover_commitment_matches_verifier() {
        // rebuild the honest l(x), r(x) for a single value and compare the
        // direct commitment with the one the verifier reconstructs
        let mut rng = ark_std::test_rng();
        let gens = BulletproofGens::<Projective>::new(4);
        let (n, v) = (4, 11u64);
        let x = Fr::from(3u64);
        let y = Fr::from(5u64);
        let z = Fr::from(7u64);
        let (alpha, rho) = (Fr::from(13u64), Fr::from(17u64));
        let s_l: Vec<Fr> = random_vector(&mut rng, n);
        let s_r: Vec<Fr> = random_vector(&mut rng, n);

        let a_l = reversed_encode_bit::<Fr>(n, v);
        let a_r = complementary_vector(&a_l);
        let (a, s) = commit_bit_vectors(
            &gens, &alpha, &rho, &a_l, &a_r, &s_l, &s_r,
        )
        .unwrap();

        let y_n = power_vector(y, n);
        let two_z = aggregated_two_powers(n, 1, &z);
        let l: Vec<Fr> = (0..n).map(|i| a_l[i] - z + s_l[i] * x).collect();
        let r: Vec<Fr> = (0..n)
            .map(|i| y_n[i] * (a_r[i] + z + s_r[i] * x) + two_z[i])
            .collect();
        let t = l.iter().zip(r.iter()).map(|(a, b)| *a * b).sum::<Fr>();
        let mu = alpha + rho * x;
        let t_blinding = Fr::from(19u64);

        let hs_prime =
            scale_bases::<Projective>(&gens.vec_h, &power_vector(y.inverse().unwrap(), n)).unwrap();
        let u = u_generator(&gens, &t_blinding, &mu, &t).unwrap();
        let mut exp = l.clone();
        exp.extend(r.iter().copied());
        exp.push(t);
        let mut bases = gens.vec_g.clone();
        bases.extend(hs_prime.iter().copied());
        bases.push(u);
        let direct = sum_exps::<Projective>(&exp, &bases).unwrap();

        let rebuilt = compute_lr_commitment(
            &gens,
            n,
            1,
            &a.into_affine(),
            &s.into_affine(),
            &t,
            &t_blinding,
            &mu,
            &x,
            &y,
            &z,
            &hs_prime,
        )
        .unwrap();
        assert_eq!(direct, rebuilt);
    }
}
