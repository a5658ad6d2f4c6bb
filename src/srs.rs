use ark_bls12_381::{Fr, G1Projective, G2Projective};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::Zero;

use crate::{keypair::PrivateKey, update_proof::UpdateProof};

/// The bound parameters of a sub-ceremony: how many G1/G2 powers of tau are
/// needed, and which points the ceremony starts from. Defaults to the
/// canonical BLS12-381 generators, per Design Note 9.3 — the starting
/// points are supplied at construction rather than captured as module-scope
/// mutable state.
#[derive(Debug, Clone, Copy)]
pub struct SRSParameters {
    pub num_g1_elements_needed: usize,
    pub num_g2_elements_needed: usize,
    pub starting_g1: G1Projective,
    pub starting_g2: G2Projective,
}

impl SRSParameters {
    pub fn new(num_g1_elements_needed: usize, num_g2_elements_needed: usize) -> Self {
        Self {
            num_g1_elements_needed,
            num_g2_elements_needed,
            ..Default::default()
        }
    }
}

impl Default for SRSParameters {
    fn default() -> Self {
        Self {
            num_g1_elements_needed: 0,
            num_g2_elements_needed: 0,
            starting_g1: G1Projective::prime_subgroup_generator(),
            starting_g2: G2Projective::prime_subgroup_generator(),
        }
    }
}

/// Structured Reference String. Stores the powers of tau in G1 and G2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SRS {
    pub(crate) tau_g1: Vec<G1Projective>,
    pub(crate) tau_g2: Vec<G2Projective>,
}

impl SRS {
    /// Builds the trivial tau=1 SRS: every element is the starting
    /// generator repeated `num_*_elements_needed` times.
    pub fn new(parameters: SRSParameters) -> SRS {
        Self {
            tau_g1: vec![parameters.starting_g1; parameters.num_g1_elements_needed],
            tau_g2: vec![parameters.starting_g2; parameters.num_g2_elements_needed],
        }
    }

    pub fn g1_elements(&self) -> &[G1Projective] {
        &self.tau_g1
    }

    pub fn g2_elements(&self) -> &[G2Projective] {
        &self.tau_g2
    }

    /// Updates the SRS with a contributor's private key and produces a
    /// proof of the update.
    pub fn update(&mut self, private_key: PrivateKey) -> UpdateProof {
        self.update_srs(private_key.tau);
        let after_tau_g1 = self.tau_g1[1];

        UpdateProof {
            public_key: private_key.to_public(),
            after_tau_g1,
        }
    }

    // Updates the group elements using a contributor's private key.
    //
    // Every index, including 0, is multiplied by `private_key.pow_i(i)`.
    // Index 0 corresponds to `private_key^0`, which is 1 for any nonzero
    // private key (a no-op) but is pinned to 0 when the private key is 0
    // (see `PrivateKey::pow_i`) — so a zero-scalar contribution collapses
    // every element of the SRS, including the degree-0 ones, to the group
    // identity.
    fn update_srs(&mut self, private_key: Fr) {
        use ark_ec::wnaf::WnafContext;
        use rayon::prelude::*;

        let max_number_elements = std::cmp::max(self.tau_g1.len(), self.tau_g2.len());
        let powers_of_private_key = powers_of_secret(private_key, max_number_elements);

        let wnaf = WnafContext::new(3);

        self.tau_g1
            .par_iter_mut()
            .zip(&powers_of_private_key)
            .for_each(|(tg1, priv_pow)| {
                *tg1 = wnaf.mul(*tg1, priv_pow);
            });

        self.tau_g2
            .par_iter_mut()
            .zip(&powers_of_private_key)
            .for_each(|(tg2, priv_pow)| {
                *tg2 = wnaf.mul(*tg2, priv_pow);
            })
    }

    /// Checks that the SRS is correctly formed: non-identity at degree 0,
    /// every point in the prime-order subgroup, and the geometric-progression
    /// "powers" relation holding across both sequences. Called on the
    /// post-ceremony SRS by `verify_updates`, and directly by a Verifier
    /// that wants a standalone correctness check.
    pub fn is_correct(&self) -> bool {
        if self.tau_g1[0].is_zero() || self.tau_g2[0].is_zero() {
            return false;
        }
        if !self.subgroup_check() {
            return false;
        }
        self.structure_check()
    }

    /// Verify whether the transition from one SRS to the other was valid.
    ///
    /// After the ceremony is over, an actor who wants to verify that the
    /// ceremony was done correctly collects all of the updates, along with
    /// the starting and ending SRS, to call this method. `before` is not
    /// re-verified: if it were malformed, `after` would be too, and that is
    /// caught by the `is_correct` check on `after`.
    pub fn verify_updates(before: &SRS, after: &SRS, update_proofs: &[UpdateProof]) -> bool {
        if before.tau_g1.len() != after.tau_g1.len() || before.tau_g2.len() != after.tau_g2.len() {
            return false;
        }

        let last_update = match update_proofs.last() {
            Some(last) => last,
            None => return false,
        };

        // 1. Check that the updates finished at the ending SRS
        if after.tau_g1[1] != last_update.after_tau_g1 {
            return false;
        }

        // 2. Check the update proofs are correct and form a chain of updates,
        // anchored at the pre-contribution degree-1 G1 element.
        if !UpdateProof::verify_chain(before.tau_g1[1], update_proofs) {
            return false;
        }

        // 3. Check that the resulting SRS is itself correctly formed.
        after.is_correct()
    }

    /// Verify that a single update was applied to transition `before` to
    /// `after`. Used by the Coordinator when it receives a contribution.
    pub fn verify_update(before: &SRS, after: &SRS, update_proof: &UpdateProof) -> bool {
        SRS::verify_updates(before, after, &[*update_proof])
    }

    // Check that the list of G1 and G2 elements are in the prime order
    // subgroup. These points are already checked to be on the curve, which
    // is cheap, so that we do not become victim to the invalid curve attack.
    pub fn subgroup_check(&self) -> bool {
        use crate::subgroup_checks::{g1, g2};

        let g1_points_affine = G1Projective::batch_normalization_into_affine(&self.tau_g1);
        let g2_points_affine = G2Projective::batch_normalization_into_affine(&self.tau_g2);
        for point in g1_points_affine {
            if !g1::is_in_correct_subgroup_assuming_on_curve(&point) {
                return false;
            }
        }
        for point in g2_points_affine {
            if !g2::is_in_correct_subgroup_assuming_on_curve(&point) {
                return false;
            }
        }

        true
    }

    // Inefficiently checks that the SRS has the correct structure: each
    // subsequent element increases the power of tau by one, for both G1 and
    // G2 elements.
    fn structure_check(&self) -> bool {
        let tau_g2_0 = self.tau_g2[0];
        let tau_g2_1 = self.tau_g2[1];

        let tau_g1_0 = self.tau_g1[0];
        let tau_g1_1 = self.tau_g1[1];

        // Check G1 elements
        let power_pairs = self.tau_g1.as_slice().windows(2);
        for pair in power_pairs {
            let tau_i = pair[0]; // tau^i
            let tau_i_next = pair[1]; // tau^{i+1}
            let p1 = ark_bls12_381::Bls12_381::pairing(tau_i_next, tau_g2_0);
            let p2 = ark_bls12_381::Bls12_381::pairing(tau_i, tau_g2_1);
            if p1 != p2 {
                return false;
            }
        }

        // Check G2 elements
        let power_pairs = self.tau_g2.as_slice().windows(2);
        for pair in power_pairs {
            let tau_i = pair[0]; // tau^i
            let tau_i_next = pair[1]; // tau^{i+1}
            let p1 = ark_bls12_381::Bls12_381::pairing(tau_g1_0, tau_i_next);
            let p2 = ark_bls12_381::Bls12_381::pairing(tau_g1_1, tau_i);
            if p1 != p2 {
                return false;
            }
        }

        true
    }
}

// Returns `[secret^0, secret^1, ..., secret^(n-1)]`, with the `secret == 0`
// case collapsed to all-zeros (see `PrivateKey::pow_i`'s policy note).
fn powers_of_secret(secret: Fr, n: usize) -> Vec<Fr> {
    if secret.is_zero() {
        return vec![Fr::zero(); n];
    }
    let mut powers = Vec::with_capacity(n);
    let mut acc = Fr::from(1u64);
    for _ in 0..n {
        powers.push(acc);
        acc *= secret;
    }
    powers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_srs(num_g1: usize, num_g2: usize) -> SRS {
        SRS::new(SRSParameters::new(num_g1, num_g2))
    }

    #[test]
    fn reject_private_key_zero() {
        // This test ensures that one cannot update the SRS using 0
        let before = test_srs(100, 2);
        let mut after = before.clone();

        let secret = PrivateKey::from_u64(0);
        let update_proof = after.update(secret);

        assert!(!SRS::verify_update(&before, &after, &update_proof));
    }

    #[test]
    fn zero_scalar_collapses_every_element() {
        let mut srs = test_srs(5, 3);
        srs.update(PrivateKey::from_u64(0));

        for point in &srs.tau_g1 {
            assert!(point.is_zero());
        }
        for point in &srs.tau_g2 {
            assert!(point.is_zero());
        }
        assert!(!srs.is_correct());
    }

    #[test]
    fn identity_scalar_is_a_no_op() {
        let before = test_srs(5, 3);
        let mut after = before.clone();

        let before_degree_1 = before.tau_g1[1];
        let proof = after.update(PrivateKey::from_u64(1));

        assert_eq!(before, after);
        assert_eq!(proof.after_tau_g1, before_degree_1);
    }

    #[test]
    fn acc_smoke() {
        let secret_a = PrivateKey::from_u64(252);
        let secret_b = PrivateKey::from_u64(512);
        let secret_c = PrivateKey::from_u64(789);

        let mut acc = test_srs(100, 2);

        // Simulate 3 participants updating the srs, one after the other
        let before_update_1_degree_1 = acc.tau_g1[1];
        let update_proof_1 = acc.update(secret_a);

        let before_update_2_degree_1 = acc.tau_g1[1];
        let update_proof_2 = acc.update(secret_b);

        let before_update_3_degree_1 = acc.tau_g1[1];
        let update_proof_3 = acc.update(secret_c);

        // This verifies each update proof makes the correct transition, but it does not link
        // the update proofs, so these could in theory be updates to different srs
        assert!(update_proof_1.verify(before_update_1_degree_1));
        assert!(update_proof_2.verify(before_update_2_degree_1));
        assert!(update_proof_3.verify(before_update_3_degree_1));

        // Here we also verify the chain, if elements in the vector are out of place, the proof will also fail
        assert!(UpdateProof::verify_chain(
            before_update_1_degree_1,
            &[update_proof_1, update_proof_2, update_proof_3,]
        ));
    }

    #[test]
    fn homomorphism_of_composition() {
        // Applying updates `a` then `b` should match a single update by `a*b`
        let a = Fr::from(7u64);
        let b = Fr::from(11u64);

        let mut composed = test_srs(6, 3);
        composed.update(PrivateKey { tau: a });
        composed.update(PrivateKey { tau: b });

        let mut direct = test_srs(6, 3);
        direct.update(PrivateKey { tau: a * b });

        assert_eq!(composed, direct);
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let before = test_srs(5, 2);
        let after = test_srs(6, 2);

        let secret = PrivateKey::from_u64(123);
        let proof = UpdateProof {
            public_key: secret.to_public(),
            after_tau_g1: after.tau_g1[1],
        };

        assert!(!SRS::verify_updates(&before, &after, &[proof]));
    }
}
