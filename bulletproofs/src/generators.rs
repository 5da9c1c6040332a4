//! Generators for Pedersen (vector) commitments.
//!
//! `g` is the curve generator. `h` and the vectors `vec_g`, `vec_h` are
//! obtained by hashing a label and an index to the curve, so nobody knows a
//! discrete-log relation between any two of them.

use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::CanonicalSerialize;
use ark_std::{end_timer, start_timer};
use merlin::Transcript;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulletproofGens<C: CurveGroup> {
    /// base for committed values
    pub g: C::Affine,
    /// base for blinding factors
    pub h: C::Affine,
    pub vec_g: Vec<C::Affine>,
    pub vec_h: Vec<C::Affine>,
}

impl<C: CurveGroup> BulletproofGens<C> {
    /// Generators for vectors of length up to `capacity`.
    pub fn new(capacity: usize) -> Self {
        let start = start_timer!(|| format!("generating {} bulletproof generators...", capacity));
        let gens = Self {
            g: C::generator().into_affine(),
            h: hash_to_point::<C>(b"H", 0),
            vec_g: (0..capacity)
                .map(|i| hash_to_point::<C>(b"G", i as u64))
                .collect(),
            vec_h: (0..capacity)
                .map(|i| hash_to_point::<C>(b"Hs", i as u64))
                .collect(),
        };
        end_timer!(start);
        gens
    }

    pub fn capacity(&self) -> usize {
        self.vec_g.len().min(self.vec_h.len())
    }

    /// Pedersen commitment `value * g + blinding * h`.
    pub fn commit(&self, value: &C::ScalarField, blinding: &C::ScalarField) -> C {
        self.g * *value + self.h * *blinding
    }
}

/// Try-and-increment: squeeze candidate encodings until one decodes to a
/// point, then move it into the prime-order subgroup.
fn hash_to_point<C: CurveGroup>(label: &'static [u8], index: u64) -> C::Affine {
    let mut transcript = Transcript::new(b"BulletproofGens");
    transcript.append_message(b"label", label);
    transcript.append_u64(b"index", index);

    let mut buf = vec![0u8; C::Affine::zero().compressed_size()];
    loop {
        transcript.challenge_bytes(b"candidate", &mut buf);
        if let Some(point) = C::Affine::from_random_bytes(&buf) {
            let point = point.clear_cofactor();
            if !point.is_zero() {
                return point;
            }
        }
    }
}
