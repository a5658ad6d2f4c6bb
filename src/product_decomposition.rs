use ark_bls12_381::{Fr, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::PrimeField;
use itertools::Itertools;

// A product-decomposition proof shows that a point was necessarily created by
// multiplying the discrete logs of a series of previous points, without
// revealing the decomposition.
//
// For example; Given the point P = (a * b * c) * G_1
// A product-decomposition proof is capable of proving that P was created in
// three steps:
// G_1 -> a * G_1 -> (a * b) * G_1 -> (a * b * c) * G_1

pub struct ProductDecompositionProof {
    running_product: Vec<G1Projective>,
    witnesses: Vec<G2Projective>,
}

impl ProductDecompositionProof {
    // Starts a chain from the prime subgroup generator
    pub fn new() -> Self {
        Self::starting_from(G1Projective::prime_subgroup_generator())
    }

    pub fn starting_from(starting_point: G1Projective) -> Self {
        Self {
            running_product: vec![starting_point],
            witnesses: vec![],
        }
    }

    pub fn current_product(&self) -> G1Projective {
        *self
            .running_product
            .last()
            .expect("there should be at least one point in the running product")
    }

    // Extends the chain with the new product and a witness that holds the
    // discrete log used to transition from the previous product to it.
    pub fn extend(&mut self, new_product: G1Projective, witness: G2Projective) {
        self.running_product.push(new_product);
        self.witnesses.push(witness)
    }

    // Uses a secret to extend the chain
    #[cfg(test)]
    pub fn accumulate(&mut self, scalar: Fr) {
        let gen_g2 = G2Affine::prime_subgroup_generator();

        let current_product = self.current_product();
        let new_product = current_product.mul(scalar.into_repr());

        let witness = gen_g2.mul(scalar.into_repr());
        self.extend(new_product, witness)
    }

    // Verifies the chain: each product is checked to have been transformed
    // from the previous one using the step's witness.
    //
    // Edge case: if a witness is the identity, the pairing equation still
    // holds for any "next" equal to "prev", so a chain can verify with no
    // meaningful secret applied at that step. This proof does not reject
    // that on its own — it is rejected structurally further up the stack,
    // by the non-identity check on the final SRS and by the policy
    // rejection of zero-scalar contributions (see `srs::SRS::is_correct`).
    pub fn verify(&self) -> bool {
        let gen_g2 = G2Affine::prime_subgroup_generator();

        for ((prev_acc, next_acc), witness) in self
            .running_product
            .iter()
            .tuple_windows()
            .zip(&self.witnesses)
        {
            let p1 = ark_bls12_381::Bls12_381::pairing(*next_acc, gen_g2);
            let p2 = ark_bls12_381::Bls12_381::pairing(*prev_acc, *witness);
            if p1 != p2 {
                return false;
            }
        }
        true
    }
}

impl Default for ProductDecompositionProof {
    fn default() -> Self {
        Self::new()
    }
}
