#![allow(non_snake_case)]

use std::marker::PhantomData;

use ark_ec::CurveGroup;
use ark_ff::Field;
use ark_std::{end_timer, start_timer};
use toolbox::transcript::ProofTranscript;
use toolbox::vec::{inner_product, scalar_product, vec_add, vec_split};

use crate::errors::InnerProductError;
use crate::structs::*;
use crate::utils::sum_exps;

#[derive(Clone, Debug)]
pub struct InnerProductProtocol<C: CurveGroup> {
    phantom: PhantomData<C>,
}

// IPA relation:
// P = <l, basis_g> + <r, basis_h> + <l, r> * aux_h
impl<C: CurveGroup> InnerProductProtocol<C> {
    fn transcript(
        n: usize,
        commitment: &C,
    ) -> Result<ProofTranscript<C::ScalarField>, InnerProductError> {
        let mut transcript = ProofTranscript::<C::ScalarField>::new(b"InnerProductArgument");
        transcript.append_field_element(b"IPAsize", &C::ScalarField::from(n as u128))?;
        transcript.append_serializable_element(b"commitment", &commitment.into_affine())?;
        Ok(transcript)
    }

    /// `commitment` is `P`; it only feeds the transcript, the prover never
    /// checks it against the witness.
    pub fn prove(
        base: &InnerProductBase<C>,
        witness: &InnerProductWitness<C>,
        commitment: &C,
    ) -> Result<InnerProductProof<C>, InnerProductError> {
        let start = start_timer!(|| "running inner product argument prove algorithm...");

        let mut n = base.basis_g.len();
        if base.basis_h.len() != n || witness.l.len() != n || witness.r.len() != n {
            return Err(InnerProductError::InvalidParameters(
                "vectors length are different".to_string(),
            ));
        }
        if !n.is_power_of_two() {
            return Err(InnerProductError::InvalidParameters(
                "vector length is not power of two".to_string(),
            ));
        }

        let mut transcript = Self::transcript(n, commitment)?;

        // log(n) is the trailing zeros of its binary form
        // e.g., 32 = 100000 -> log(32) = 5
        let log_n = n.trailing_zeros() as usize;
        let mut l_commits = Vec::with_capacity(log_n);
        let mut r_commits = Vec::with_capacity(log_n);

        let mut vec_a = witness.l.clone();
        let mut vec_b = witness.r.clone();
        let mut vec_G = base.basis_g.clone();
        let mut vec_H = base.basis_h.clone();

        while n != 1 {
            n /= 2;
            let (a_L, a_R) = vec_split(&vec_a, n)?;
            let (b_L, b_R) = vec_split(&vec_b, n)?;
            let (G_L, G_R) = vec_split(&vec_G, n)?;
            let (H_L, H_R) = vec_split(&vec_H, n)?;

            // <a_L*x + a_R*x_inv, b_L*x_inv + b_R*x> = <a, b> + x^2*<a_L, b_R> + x_inv^2*<a_R, b_L>
            let c_L = inner_product(&a_L, &b_R)?;
            let c_R = inner_product(&a_R, &b_L)?;

            // L = G_R^a_L + H_L^b_R + u^c_L
            let mut exp = a_L.clone();
            exp.extend(b_R.iter().copied());
            exp.push(c_L);
            let mut bases = G_R.clone();
            bases.extend(H_L.iter().copied());
            bases.push(base.aux_h);
            let com_L = sum_exps::<C>(&exp, &bases)?.into_affine();

            // R = G_L^a_R + H_R^b_L + u^c_R
            let mut exp = a_R.clone();
            exp.extend(b_L.iter().copied());
            exp.push(c_R);
            let mut bases = G_L.clone();
            bases.extend(H_R.iter().copied());
            bases.push(base.aux_h);
            let com_R = sum_exps::<C>(&exp, &bases)?.into_affine();

            l_commits.push(com_L);
            r_commits.push(com_R);

            transcript.append_serializable_element(b"commitments L, R", &[com_L, com_R][..])?;
            let x = transcript.get_and_append_challenge(b"challenge")?;
            let x_inv = x.inverse().ok_or_else(|| {
                InnerProductError::InvalidProof("challenge is zero".to_string())
            })?;

            vec_a = vec_add(&scalar_product(&a_L, &x), &scalar_product(&a_R, &x_inv))?;
            vec_b = vec_add(&scalar_product(&b_L, &x_inv), &scalar_product(&b_R, &x))?;

            let folded_G: Vec<C> = G_L
                .iter()
                .zip(G_R.iter())
                .map(|(g_l, g_r)| *g_l * x_inv + *g_r * x)
                .collect();
            let folded_H: Vec<C> = H_L
                .iter()
                .zip(H_R.iter())
                .map(|(h_l, h_r)| *h_l * x + *h_r * x_inv)
                .collect();
            vec_G = C::normalize_batch(&folded_G);
            vec_H = C::normalize_batch(&folded_H);
        }

        end_timer!(start);
        Ok(InnerProductProof {
            l_commits,
            r_commits,
            l: vec_a[0],
            r: vec_b[0],
        })
    }

    pub fn verify(
        n: usize,
        commitment: &C,
        base: &InnerProductBase<C>,
        proof: &InnerProductProof<C>,
    ) -> Result<(), InnerProductError> {
        let start = start_timer!(|| "running inner product argument verify algorithm...");

        if base.basis_g.len() != n || base.basis_h.len() != n {
            return Err(InnerProductError::InvalidParameters(
                "bases length differ from n".to_string(),
            ));
        }
        let log_n = proof.l_commits.len();
        // prevents overflow
        if log_n >= 32 {
            return Err(InnerProductError::InvalidParameters(
                "vector size is too large".to_string(),
            ));
        }
        if proof.r_commits.len() != log_n || n != (1 << log_n) {
            return Err(InnerProductError::InvalidProof(
                "incorrect proof length".to_string(),
            ));
        }

        let mut transcript = Self::transcript(n, commitment)?;

        // replay the challenges x of every round
        let mut challenges_sq: Vec<C::ScalarField> = Vec::with_capacity(log_n);
        let mut challenges_inv_sq: Vec<C::ScalarField> = Vec::with_capacity(log_n);
        let mut all_inv = C::ScalarField::from(1u64);
        for (com_L, com_R) in proof.l_commits.iter().zip(proof.r_commits.iter()) {
            transcript.append_serializable_element(b"commitments L, R", &[*com_L, *com_R][..])?;
            let x = transcript.get_and_append_challenge(b"challenge")?;
            let x_inv = x.inverse().ok_or_else(|| {
                InnerProductError::InvalidProof("challenge is zero".to_string())
            })?;
            challenges_sq.push(x * x);
            challenges_inv_sq.push(x_inv * x_inv);
            all_inv *= x_inv;
        }

        // instead of folding the bases every round, the verifier records the
        // scalar each original base ends up with and runs a single msm
        // s_i = prod_j x_j^{b(i, j)}, with b(i, j) = 1 if bit j of i is set else -1
        let mut vec_box = Vec::with_capacity(n);
        vec_box.push(all_inv);
        for i in 1..n {
            let log_i = (usize::BITS - 1 - i.leading_zeros()) as usize;
            let k = 1 << log_i;
            let x_log_i_sq = challenges_sq[log_n - 1 - log_i];
            vec_box.push(vec_box[i - k] * x_log_i_sq);
        }
        // the H side folds with inverted challenges, i.e. s_{n-1-i}
        let mut vec_box_reverse = vec_box.clone();
        vec_box_reverse.reverse();

        // expected P =
        // u^{lr} * basis_g^{l * s} * basis_h^{r * s_rev}
        // * (L_0*...*L_{log_n-1})^{-x^2} * (R_0*...*R_{log_n-1})^{-x^-2}
        let mut exp = vec![proof.l * proof.r];
        exp.extend(scalar_product(&vec_box, &proof.l));
        exp.extend(scalar_product(&vec_box_reverse, &proof.r));
        exp.extend(challenges_sq.iter().map(|&xi| -xi));
        exp.extend(challenges_inv_sq.iter().map(|&xi| -xi));

        let mut bases = vec![base.aux_h];
        bases.extend(base.basis_g.iter().copied());
        bases.extend(base.basis_h.iter().copied());
        bases.extend(proof.l_commits.iter().copied());
        bases.extend(proof.r_commits.iter().copied());

        let expected_P = sum_exps::<C>(&exp, &bases)?;

        end_timer!(start);
        if expected_P == *commitment {
            Ok(())
        } else {
            Err(InnerProductError::InvalidProof("invalid IPA proof".to_string()))
        }
    }
}
