// The transcript threads four independent sub-ceremonies of increasing SRS
// size through the same set of contributors. Each sub-ceremony is otherwise
// a standalone SRS/UpdateProof pair; this module only adds the bookkeeping
// that keeps the four in lockstep.

use tracing::info;

use crate::actors::{Contributor, SerialisedSRS};
use crate::error::ParameterMismatchError;
use crate::keypair::KeyPair;
use crate::srs::{SRSParameters, SRS};
use crate::update_proof::UpdateProof;

/// The four mandated sub-ceremony sizes, ascending. `N2` is fixed at 65 for
/// all of them.
pub const NUM_G1_POINTS: [usize; 4] = [4096, 8192, 16384, 32768];
pub const NUM_G2_POINTS: usize = 65;

pub fn sub_ceremony_parameters() -> [SRSParameters; 4] {
    NUM_G1_POINTS.map(|n1| SRSParameters::new(n1, NUM_G2_POINTS))
}

/// Four serialized SRS, one per sub-ceremony, ordered ascending by
/// `NUM_G1_POINTS`. Fixed arity, fixed schema: there is no version field.
#[derive(Debug, Clone)]
pub struct Transcript {
    sub_ceremonies: [SerialisedSRS; 4],
}

impl Transcript {
    pub fn new(sub_ceremonies: [SerialisedSRS; 4]) -> Self {
        Self { sub_ceremonies }
    }

    /// Builds the transcript's trivial tau=1 starting point: a fresh SRS
    /// for each of the four mandated sizes.
    pub fn starting() -> Self {
        let sub_ceremonies = sub_ceremony_parameters().map(|params| SRS::new(params).serialise());
        Self { sub_ceremonies }
    }

    pub fn sub_ceremonies(&self) -> &[SerialisedSRS; 4] {
        &self.sub_ceremonies
    }
}

fn check_parameter_binding(
    index: usize,
    g1_points: &[String],
) -> Result<(), ParameterMismatchError> {
    let expected = NUM_G1_POINTS[index];
    if g1_points.len() != expected {
        return Err(ParameterMismatchError::WrongSize {
            ceremony_index: index,
            field: "num_g1_points",
            expected,
            got: g1_points.len(),
        });
    }
    Ok(())
}

/// Applies one contribution (four secrets, one per sub-ceremony) to
/// `transcript` and returns the updated transcript together with the four
/// update proofs, in sub-ceremony order.
///
/// Takes ownership of the four `KeyPair`s and destroys each immediately
/// after it is applied, per the secret-material discipline of `spec.md` §5:
/// a contributor's keypair must not outlive its one use.
///
/// Fails fast with a `ParameterMismatchError` if the secrets list isn't
/// exactly four long, or if any sub-ceremony's SRS doesn't carry the
/// expected `num_g1_points` for its position — these are fatal decode-time
/// mismatches, not verification failures.
pub fn update_transcript(
    transcript: &Transcript,
    secrets: Vec<KeyPair>,
) -> Result<(Transcript, [UpdateProof; 4]), ParameterMismatchError> {
    if secrets.len() != 4 {
        return Err(ParameterMismatchError::WrongSubCeremonyCount {
            expected: 4,
            got: secrets.len(),
        });
    }

    let parameters = sub_ceremony_parameters();
    let mut new_sub_ceremonies: [SerialisedSRS; 4] = Default::default();
    let mut proofs: Vec<UpdateProof> = Vec::with_capacity(4);

    for (i, (params, keypair)) in parameters.into_iter().zip(secrets).enumerate() {
        let (g1_points, _) = &transcript.sub_ceremonies[i];
        check_parameter_binding(i, g1_points)?;

        let mut contributor =
            Contributor::new(keypair, params, transcript.sub_ceremonies[i].clone())
                .map_err(|_| ParameterMismatchError::WrongSize {
                    ceremony_index: i,
                    field: "serialised_srs",
                    expected: params.num_g1_elements_needed,
                    got: g1_points.len(),
                })?;

        let proof = contributor.update_srs();
        new_sub_ceremonies[i] = contributor.serialise_srs();
        proofs.push(proof);
        contributor.into_keypair().destroy();

        info!(sub_ceremony = i, "applied contribution to sub-ceremony");
    }

    let proofs: [UpdateProof; 4] = proofs
        .try_into()
        .expect("exactly four proofs were pushed, one per sub-ceremony");

    Ok((Transcript::new(new_sub_ceremonies), proofs))
}

/// Independently verifies each of the four sub-ceremonies between `start`
/// and `end`, given the per-sub-ceremony proof lists in the same order as
/// `NUM_G1_POINTS`.
pub fn verify_ceremonies(start: &Transcript, end: &Transcript, proofs: &[Vec<UpdateProof>; 4]) -> bool {
    let parameters = sub_ceremony_parameters();

    for i in 0..4 {
        let starting_srs = match SRS::deserialise(start.sub_ceremonies[i].clone(), parameters[i]) {
            Ok(srs) => srs,
            Err(_) => return false,
        };
        let ending_srs = match SRS::deserialise(end.sub_ceremonies[i].clone(), parameters[i]) {
            Ok(srs) => srs,
            Err(_) => return false,
        };

        if !SRS::verify_updates(&starting_srs, &ending_srs, &proofs[i]) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_round_with_mandated_sizes() {
        let start = Transcript::starting();

        let secrets = vec![
            KeyPair::new_from_u64(11),
            KeyPair::new_from_u64(22),
            KeyPair::new_from_u64(33),
            KeyPair::new_from_u64(44),
        ];

        let (end, proofs) = update_transcript(&start, secrets).unwrap();

        let proof_lists: [Vec<UpdateProof>; 4] = proofs.map(|p| vec![p]);
        assert!(verify_ceremonies(&start, &end, &proof_lists));

        let parameters = sub_ceremony_parameters();
        for i in 0..4 {
            let ending_srs =
                SRS::deserialise(end.sub_ceremonies[i].clone(), parameters[i]).unwrap();
            assert_eq!(proofs[i].after_tau_g1(), ending_srs.g1_elements()[1]);
        }
    }

    #[test]
    fn wrong_secret_count_is_rejected() {
        let start = Transcript::starting();
        let secrets = vec![KeyPair::new_from_u64(1), KeyPair::new_from_u64(2)];

        let err = update_transcript(&start, secrets).unwrap_err();
        assert_eq!(
            err,
            ParameterMismatchError::WrongSubCeremonyCount {
                expected: 4,
                got: 2,
            }
        );
    }
}
