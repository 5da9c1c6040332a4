use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::{end_timer, rand::Rng, start_timer, UniformRand};
use toolbox::errors::AlgebraErrors;
use toolbox::poly::{evaluate_polynomial, multiply_poly};
use toolbox::vec::{hadamard_product, inner_product, power_vector, vec_add, vec_shift};

use super::encoding::{
    aggregated_two_powers, check_range, check_ranges, commit_bit_vectors, complementary_vector,
    reversed_encode_bit_multi,
};
use super::{check_parameters, RangeProof};
use crate::errors::RangeProofError;
use crate::generators::BulletproofGens;
use crate::ipa::InnerProductProtocol;
use crate::structs::{InnerProductBase, InnerProductWitness};
use crate::utils::{random_vector, scale_bases, shamir_gs, shamir_z, sum_exps, u_generator};

impl<C: CurveGroup> RangeProof<C> {
    /// Proves that every `values[j]` lies in `[0, 2^n)`.
    ///
    /// Returns the proof and the commitments `V_j = values[j]·G + blindings[j]·H`.
    pub fn prove<R: Rng>(
        rng: &mut R,
        gens: &BulletproofGens<C>,
        n: usize,
        values: &[u64],
        blindings: &[C::ScalarField],
    ) -> Result<(Self, Vec<C::Affine>), RangeProofError> {
        let start = start_timer!(|| format!("running range prove algorithm for {} values...", values.len()));

        let m = values.len();
        check_parameters(gens, n, m)?;
        if blindings.len() != m {
            return Err(RangeProofError::InvalidParameters(format!(
                "{} values but {} blindings",
                m,
                blindings.len()
            )));
        }
        if !check_ranges(n, values) {
            return Err(if m == 1 {
                RangeProofError::ValueNotInRange(values[0])
            } else {
                RangeProofError::ValuesNotInRange(
                    values.iter().copied().filter(|&v| !check_range(n, v)).collect(),
                )
            });
        }
        let nm = n * m;

        let commitments: Vec<C> = values
            .iter()
            .zip(blindings.iter())
            .map(|(&v, gamma)| gens.commit(&C::ScalarField::from(v), gamma))
            .collect();
        let commitments = C::normalize_batch(&commitments);

        // P->V: A, S
        let a_l = reversed_encode_bit_multi(n, values);
        let a_r = complementary_vector(&a_l);
        let alpha = C::ScalarField::rand(rng);
        let rho = C::ScalarField::rand(rng);
        let s_l: Vec<C::ScalarField> = random_vector(rng, nm);
        let s_r: Vec<C::ScalarField> = random_vector(rng, nm);
        let (a_commit, s_commit) =
            commit_bit_vectors(gens, &alpha, &rho, &a_l, &a_r, &s_l, &s_r)?;
        let (a_commit, s_commit) = (a_commit.into_affine(), s_commit.into_affine());

        // V->P: y, z
        let mut points = commitments.clone();
        points.push(a_commit);
        points.push(s_commit);
        let y = shamir_gs::<C>(&points)?;
        let z = shamir_z(&y)?;

        // l(X) = (a_l - z·1) + s_l·X
        // r(X) = y^{nm} ∘ (a_r + z·1 + s_r·X) + Σ_j z^{j+2}·2^n_j
        let y_nm = power_vector(y, nm);
        let l_poly = vec![vec_shift(&a_l, &-z), s_l];
        let r_poly = vec![
            vec_add(
                &hadamard_product(&y_nm, &vec_shift(&a_r, &z))?,
                &aggregated_two_powers(n, m, &z),
            )?,
            hadamard_product(&y_nm, &s_r)?,
        ];
        let t_poly = multiply_poly(&l_poly, &r_poly)?;

        // P->V: T_1, T_2
        let tau1 = C::ScalarField::rand(rng);
        let tau2 = C::ScalarField::rand(rng);
        let t_commits = C::normalize_batch(&[
            gens.commit(&t_poly[1], &tau1),
            gens.commit(&t_poly[2], &tau2),
        ]);
        let (t1_commit, t2_commit) = (t_commits[0], t_commits[1]);

        // V->P: x
        points.push(t1_commit);
        points.push(t2_commit);
        let x = shamir_gs::<C>(&points)?;

        let l = evaluate_polynomial(nm, &l_poly, &x);
        let r = evaluate_polynomial(nm, &r_poly, &x);
        let t = inner_product(&l, &r)?;

        // t_blinding = tau2·x^2 + tau1·x + Σ_j z^{j+2}·gamma_j
        let z_m: Vec<C::ScalarField> = power_vector(z, m).iter().map(|z_j| *z_j * z.square()).collect();
        let t_blinding = tau2 * x.square() + tau1 * x + inner_product(&z_m, blindings)?;
        let mu = alpha + rho * x;

        // P = <l, Gs> + <r, hs'> + t·U
        let y_inv = y.inverse().ok_or(AlgebraErrors::NotInvertible)?;
        let basis_g = gens.vec_g[..nm].to_vec();
        let basis_h = scale_bases::<C>(&gens.vec_h[..nm], &power_vector(y_inv, nm))?;
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
        Ok((
            Self {
                t_blinding,
                mu,
                t,
                a_commit,
                s_commit,
                t1_commit,
                t2_commit,
                product_proof,
            },
            commitments,
        ))
    }
}
