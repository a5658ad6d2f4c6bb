// An update proof shows two things:
// - One knows the discrete log to a secret `p` via KoE
// - `p` was used to update an existing point A to a new point A'

use crate::keypair::PublicKey;
use crate::product_decomposition::ProductDecompositionProof;
use ark_bls12_381::G1Projective;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProof {
    /// A commitment to the secret scalar used in this update.
    pub(crate) public_key: PublicKey,
    /// The degree-1 element of the SRS, after this update was applied.
    pub(crate) after_tau_g1: G1Projective,
}

impl UpdateProof {
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn after_tau_g1(&self) -> G1Projective {
        self.after_tau_g1
    }

    #[cfg(test)]
    pub(crate) fn verify(&self, starting_point: G1Projective) -> bool {
        let mut chain = ProductDecompositionProof::starting_from(starting_point);
        chain.extend(self.after_tau_g1, self.public_key.as_g2());

        chain.verify()
    }

    /// Builds a product-decomposition proof anchored at `starting_point`
    /// (the pre-contribution SRS's degree-1 G1 element) and checks that the
    /// ordered list of update proofs verifies against it. This is the
    /// chain-linkage check used by both `Coordinator::replace_current_srs`
    /// (a chain of length one) and `Verifier::verify_ceremony` (the whole
    /// ceremony).
    pub(crate) fn verify_chain(starting_point: G1Projective, update_proofs: &[UpdateProof]) -> bool {
        if update_proofs.is_empty() {
            return false;
        }

        let mut chain = ProductDecompositionProof::starting_from(starting_point);

        for update_proof in update_proofs {
            // Add the after-update point into the chain along with the
            // witness (the public key) that attests to the transition from
            // the previous point to it.
            chain.extend(update_proof.after_tau_g1, update_proof.public_key.as_g2());
        }

        chain.verify()
    }
}
