// The three roles that drive a ceremony round. None of these hold any
// cryptography themselves — they are thin state holders coordinating the
// SRS, UpdateProof and ProductDecompositionProof primitives.

use tracing::{debug, info, warn};

use crate::error::DecodeError;
use crate::keypair::{KeyPair, PublicKey};
use crate::srs::{SRSParameters, SRS};
use crate::update_proof::UpdateProof;

pub type SerialisedSRS = (Vec<String>, Vec<String>);

/// A contributor has two jobs: apply its contribution to the SRS it
/// received, and attest that the SRS it received was not junk.
pub struct Contributor {
    keypair: KeyPair,
    srs: SRS,
    /// The SRS as received from the coordinator, before this contributor's
    /// update was applied. Subgroup-checked after the update runs, not
    /// before, so a slow check never blocks the contributor's critical
    /// path (see `all_elements_in_correct_subgroup`).
    old_srs: SRS,
}

impl Contributor {
    pub fn new(
        keypair: KeyPair,
        parameters: SRSParameters,
        serialised_srs: SerialisedSRS,
    ) -> Result<Self, DecodeError> {
        let srs = SRS::deserialise(serialised_srs, parameters)?;
        let old_srs = srs.clone();
        Ok(Self {
            keypair,
            srs,
            old_srs,
        })
    }

    /// Applies this contributor's keypair to the SRS and returns the
    /// resulting update proof. Does not destroy the keypair — callers are
    /// expected to call `KeyPair::destroy` on it immediately after.
    pub fn update_srs(&mut self) -> UpdateProof {
        debug!("applying contribution to srs");
        self.srs.update(self.keypair.private_key())
    }

    /// Subgroup-checks the SRS this contributor received, before its own
    /// update was applied. A contributor never runs the full `is_correct`
    /// check — it only attests it did not build on top of off-subgroup
    /// points.
    pub fn all_elements_in_correct_subgroup(&self) -> bool {
        self.old_srs.subgroup_check()
    }

    pub fn serialise_srs(&self) -> SerialisedSRS {
        self.srs.serialise()
    }

    /// Hands back ownership of the keypair, so the caller can call
    /// `KeyPair::destroy` on it immediately after applying the update.
    pub fn into_keypair(self) -> KeyPair {
        self.keypair
    }
}

/// The coordinator owns the one authoritative SRS and the ordered list of
/// update proofs that produced it. A contribution is accepted or rejected
/// atomically: the SRS swap and the proof append happen together, or
/// neither happens.
pub struct Coordinator {
    current_srs: SRS,
    parameters: SRSParameters,
    update_proofs: Vec<UpdateProof>,
}

impl Coordinator {
    pub fn new(srs: SRS, parameters: SRSParameters) -> Self {
        Self {
            current_srs: srs,
            parameters,
            update_proofs: Vec::new(),
        }
    }

    /// Attempts to replace the current SRS with an incoming contribution.
    /// Returns whether the contribution was accepted; a rejection leaves
    /// all coordinator state untouched and the caller should simply serve
    /// the unchanged current SRS to the next contributor.
    pub fn replace_current_srs(
        &mut self,
        serialised_srs: SerialisedSRS,
        update_proof: UpdateProof,
    ) -> bool {
        let received_srs = match SRS::deserialise(serialised_srs, self.parameters) {
            Ok(srs) => srs,
            Err(err) => {
                warn!(error = %err, "rejecting contribution: decode failure");
                return false;
            }
        };

        if !SRS::verify_updates(&self.current_srs, &received_srs, &[update_proof]) {
            warn!("rejecting contribution: failed verify_updates");
            return false;
        }

        self.update_proofs.push(update_proof);
        self.current_srs = received_srs;
        info!(
            contributions = self.update_proofs.len(),
            "accepted contribution"
        );
        true
    }

    pub fn serialise_srs(&self) -> SerialisedSRS {
        self.current_srs.serialise()
    }

    pub fn update_proofs(&self) -> &[UpdateProof] {
        &self.update_proofs
    }
}

/// Independently re-verifies an entire ceremony from its starting SRS,
/// ending SRS and the ordered proof list, and can locate a given
/// contributor's position within it.
pub struct Verifier {
    starting_srs: SRS,
    ending_srs: SRS,
    update_proofs: Vec<UpdateProof>,
}

impl Verifier {
    pub fn new(
        parameters: SRSParameters,
        starting_srs: SerialisedSRS,
        ending_srs: SerialisedSRS,
        proofs: Vec<UpdateProof>,
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            starting_srs: SRS::deserialise(starting_srs, parameters)?,
            ending_srs: SRS::deserialise(ending_srs, parameters)?,
            update_proofs: proofs,
        })
    }

    pub fn verify_ceremony(&self) -> bool {
        let ok = SRS::verify_updates(&self.starting_srs, &self.ending_srs, &self.update_proofs);
        if !ok {
            warn!("ceremony failed verification");
        }
        ok
    }

    /// Returns the position of `key`'s contribution, or `None` if the
    /// ceremony does not verify or the key made no contribution.
    pub fn find_contribution(&self, key: PublicKey) -> Option<usize> {
        if !self.verify_ceremony() {
            return None;
        }
        self.find_contribution_no_verify(key)
    }

    /// Same as `find_contribution` but skips the ceremony-wide
    /// verification, for callers that already verified it.
    pub fn find_contribution_no_verify(&self, key: PublicKey) -> Option<usize> {
        self.update_proofs
            .iter()
            .position(|proof| proof.public_key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::PrivateKey;

    fn fresh_srs(n1: usize, n2: usize) -> SRS {
        SRS::new(SRSParameters::new(n1, n2))
    }

    #[test]
    fn three_contributor_ceremony() {
        let params = SRSParameters::new(5, 2);
        let starting_srs = fresh_srs(5, 2);

        let mut coordinator = Coordinator::new(starting_srs.clone(), params);

        let secrets = [123u64, 456, 789];
        let mut public_keys = Vec::new();

        for secret in secrets {
            let serialised = coordinator.serialise_srs();
            let keypair = KeyPair::new_from_u64(secret);
            public_keys.push(keypair.public_key());

            let mut contributor = Contributor::new(keypair, params, serialised).unwrap();
            let proof = contributor.update_srs();
            assert!(contributor.all_elements_in_correct_subgroup());

            let accepted =
                coordinator.replace_current_srs(contributor.serialise_srs(), proof);
            assert!(accepted);
        }

        let verifier = Verifier::new(
            params,
            starting_srs.serialise(),
            coordinator.serialise_srs(),
            coordinator.update_proofs().to_vec(),
        )
        .unwrap();

        assert!(verifier.verify_ceremony());
        for (i, pk) in public_keys.iter().enumerate() {
            assert_eq!(verifier.find_contribution(*pk), Some(i));
        }

        let unknown = KeyPair::new_from_u64(999_999).public_key();
        assert_eq!(verifier.find_contribution(unknown), None);
    }

    #[test]
    fn coordinator_rejects_zero_scalar_contribution() {
        let params = SRSParameters::new(3, 2);
        let starting_srs = fresh_srs(3, 2);
        let mut coordinator = Coordinator::new(starting_srs, params);

        let keypair = KeyPair::new_from_u64(0);
        let mut contributor =
            Contributor::new(keypair, params, coordinator.serialise_srs()).unwrap();
        let proof = contributor.update_srs();

        let accepted = coordinator.replace_current_srs(contributor.serialise_srs(), proof);
        assert!(!accepted);
        assert_eq!(coordinator.update_proofs().len(), 0);
    }

    #[test]
    fn tampered_middle_proof_breaks_verification() {
        let params = SRSParameters::new(5, 2);
        let starting_srs = fresh_srs(5, 2);
        let mut coordinator = Coordinator::new(starting_srs.clone(), params);

        let secrets = [123u64, 456, 789];
        for secret in secrets {
            let serialised = coordinator.serialise_srs();
            let keypair = KeyPair::new_from_u64(secret);
            let mut contributor = Contributor::new(keypair, params, serialised).unwrap();
            let proof = contributor.update_srs();
            assert!(coordinator.replace_current_srs(contributor.serialise_srs(), proof));
        }

        let mut tampered_proofs = coordinator.update_proofs().to_vec();
        let generator = ark_bls12_381::G1Projective::prime_subgroup_generator();
        use ark_ec::ProjectiveCurve;
        tampered_proofs[1] = UpdateProof {
            public_key: tampered_proofs[1].public_key,
            after_tau_g1: generator,
        };

        let verifier = Verifier::new(
            params,
            starting_srs.serialise(),
            coordinator.serialise_srs(),
            tampered_proofs,
        )
        .unwrap();

        assert!(!verifier.verify_ceremony());
        let pk = KeyPair::new_from_u64(456).public_key();
        assert_eq!(verifier.find_contribution(pk), None);
    }

    #[test]
    fn private_key_helper() {
        // Sanity check that PrivateKey imports correctly from this module's
        // test scope.
        let k = PrivateKey::from_u64(7);
        assert_eq!(k.pow_i(1).tau, k.tau);
    }
}
