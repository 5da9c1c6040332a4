//! Bulletproofs over any arkworks curve: aggregated range proofs and
//! arithmetic circuit proofs, both reduced to the inner-product argument.

pub mod arith_circuit;
pub mod errors;
pub mod generators;
pub mod ipa;
pub mod range_proof;
pub mod structs;
pub mod utils;

pub use crate::arith_circuit::{ArithCircuit, ArithCircuitProof, ArithWitness, Assignment, GateWeights};
pub use crate::errors::*;
pub use crate::generators::BulletproofGens;
pub use crate::ipa::InnerProductProtocol;
pub use crate::range_proof::RangeProof;
pub use crate::structs::*;
