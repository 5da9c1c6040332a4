//! Field algebra shared by the proof protocols: vectors, matrices,
//! vector-coefficient polynomials, a linear-system solver and the
//! Fiat–Shamir transcript.

pub mod errors;
pub mod matrix;
pub mod poly;
pub mod transcript;
pub mod vec;
