use ark_ec::CurveGroup;

/// Public bases of the inner-product relation
/// `P = <l, basis_g> + <r, basis_h> + <l, r> * aux_h`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InnerProductBase<C: CurveGroup> {
    pub basis_g: Vec<C::Affine>,
    pub basis_h: Vec<C::Affine>,
    pub aux_h: C::Affine,
}

/// Prover-side vectors; dropped once the proof is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InnerProductWitness<C: CurveGroup> {
    pub l: Vec<C::ScalarField>,
    pub r: Vec<C::ScalarField>,
}

/// `l_commits` and `r_commits` hold one point per halving round, so both
/// have length `log2 n`; `l`, `r` are what remains after the last round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InnerProductProof<C: CurveGroup> {
    pub l_commits: Vec<C::Affine>,
    pub r_commits: Vec<C::Affine>,
    pub l: C::ScalarField,
    pub r: C::ScalarField,
}
