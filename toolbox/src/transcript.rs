//! Fiat–Shamir transcript over merlin, producing challenges in a prime field.

use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::marker::PhantomData;
use merlin::Transcript;

use crate::errors::TranscriptError;

#[derive(Clone)]
pub struct ProofTranscript<F: PrimeField> {
    transcript: Transcript,
    is_empty: bool,
    phantom: PhantomData<F>,
}

impl<F: PrimeField> ProofTranscript<F> {
    pub fn new(label: &'static [u8]) -> Self {
        Self {
            transcript: Transcript::new(label),
            is_empty: true,
            phantom: PhantomData,
        }
    }

    pub fn append_message(&mut self, label: &'static [u8], msg: &[u8]) -> Result<(), TranscriptError> {
        self.transcript.append_message(label, msg);
        self.is_empty = false;
        Ok(())
    }

    pub fn append_field_element(&mut self, label: &'static [u8], field_elem: &F) -> Result<(), TranscriptError> {
        self.append_serializable_element(label, field_elem)
    }

    /// Appends anything arkworks can serialize: points, slices of points, scalars.
    pub fn append_serializable_element<S: CanonicalSerialize + ?Sized>(
        &mut self,
        label: &'static [u8],
        elem: &S,
    ) -> Result<(), TranscriptError> {
        let mut bytes = Vec::with_capacity(elem.compressed_size());
        elem.serialize_compressed(&mut bytes)?;
        self.append_message(label, &bytes)
    }

    /// Squeezes a challenge and absorbs it back, so consecutive calls differ.
    pub fn get_and_append_challenge(&mut self, label: &'static [u8]) -> Result<F, TranscriptError> {
        if self.is_empty {
            return Err(TranscriptError::InvalidTranscript(
                "transcript is empty".to_string(),
            ));
        }
        let mut buf = [0u8; 64];
        self.transcript.challenge_bytes(label, &mut buf);
        let challenge = F::from_le_bytes_mod_order(&buf);
        self.append_field_element(label, &challenge)?;
        Ok(challenge)
    }
}
