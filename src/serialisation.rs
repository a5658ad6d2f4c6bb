use crate::error::DecodeError;
use crate::point_encoding::{
    deserialize_g1, deserialize_g2, g1_from_reader, g2_from_reader, serialize_g1, serialize_g2,
    G1_SERIALISED_SIZE, G2_SERIALISED_SIZE,
};
use crate::{
    srs::{SRSParameters, SRS},
    update_proof::UpdateProof,
};
use ark_bls12_381::{G1Projective, G2Projective};
use ark_ec::{AffineCurve, ProjectiveCurve};

fn hex_string_to_g1(hex_str: &str) -> Result<G1Projective, DecodeError> {
    let stripped = hex_str
        .strip_prefix("0x")
        .ok_or(DecodeError::InvalidHexPrefix)?;
    let bytes = hex::decode(stripped)?;
    if bytes.len() != G1_SERIALISED_SIZE {
        return Err(DecodeError::WrongByteLength {
            expected: G1_SERIALISED_SIZE,
            got: bytes.len(),
        });
    }
    let mut fixed_array = [0u8; G1_SERIALISED_SIZE];
    fixed_array.copy_from_slice(&bytes);
    Ok(deserialize_g1(fixed_array)?.into_projective())
}

fn hex_string_to_g2(hex_str: &str) -> Result<G2Projective, DecodeError> {
    let stripped = hex_str
        .strip_prefix("0x")
        .ok_or(DecodeError::InvalidHexPrefix)?;
    let bytes = hex::decode(stripped)?;
    if bytes.len() != G2_SERIALISED_SIZE {
        return Err(DecodeError::WrongByteLength {
            expected: G2_SERIALISED_SIZE,
            got: bytes.len(),
        });
    }
    let mut fixed_array = [0u8; G2_SERIALISED_SIZE];
    fixed_array.copy_from_slice(&bytes);
    Ok(deserialize_g2(fixed_array)?.into_projective())
}

impl SRS {
    pub fn serialise(&self) -> (Vec<String>, Vec<String>) {
        self.to_json_array()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        let g1_points_affine = G1Projective::batch_normalization_into_affine(&self.tau_g1);
        let g2_points_affine = G2Projective::batch_normalization_into_affine(&self.tau_g2);

        for point in &g1_points_affine {
            bytes.extend(serialize_g1(point));
        }

        for point in &g2_points_affine {
            bytes.extend(serialize_g2(point));
        }

        bytes
    }

    fn to_json_array(&self) -> (Vec<String>, Vec<String>) {
        let mut g1_points_json = Vec::new();
        let mut g2_points_json = Vec::new();

        let g1_points_affine = G1Projective::batch_normalization_into_affine(&self.tau_g1);
        let g2_points_affine = G2Projective::batch_normalization_into_affine(&self.tau_g2);

        for point in &g1_points_affine {
            let mut point_as_hex = hex::encode(serialize_g1(point));
            point_as_hex.insert_str(0, "0x");
            g1_points_json.push(point_as_hex)
        }

        for point in &g2_points_affine {
            let mut point_as_hex = hex::encode(serialize_g2(point));
            point_as_hex.insert_str(0, "0x");
            g2_points_json.push(point_as_hex)
        }

        (g1_points_json, g2_points_json)
    }

    /// Deserialises an SRS from its JSON-hex wire form, checking that every
    /// point decodes to one on the curve and that the counts match
    /// `parameters`. Identity points are accepted here — the identity
    /// non-identity check belongs to `is_correct`, not to decoding.
    pub fn deserialise(
        json_arr: (Vec<String>, Vec<String>),
        parameters: SRSParameters,
    ) -> Result<Self, DecodeError> {
        SRS::from_json_array(json_arr, parameters)
    }

    fn from_bytes(bytes: &[u8], parameters: SRSParameters) -> Result<Self, DecodeError> {
        let mut g1 = vec![G1Projective::default(); parameters.num_g1_elements_needed];
        let mut g2 = vec![G2Projective::default(); parameters.num_g2_elements_needed];

        let mut reader = std::io::Cursor::new(bytes);

        for element in g1.iter_mut() {
            let deserialised_point = g1_from_reader(&mut reader)?;
            *element = deserialised_point.into_projective()
        }
        for element in g2.iter_mut() {
            let deserialised_point = g2_from_reader(&mut reader)?;
            *element = deserialised_point.into_projective()
        }

        Ok(SRS {
            tau_g1: g1,
            tau_g2: g2,
        })
    }

    fn from_json_array(
        json_array: (Vec<String>, Vec<String>),
        parameters: SRSParameters,
    ) -> Result<Self, DecodeError> {
        let (g1_points_json_array, g2_points_json_array) = json_array;

        if g1_points_json_array.len() != parameters.num_g1_elements_needed {
            return Err(DecodeError::PointSizeMismatch {
                field: "tau_g1",
                expected: parameters.num_g1_elements_needed,
                got: g1_points_json_array.len(),
            });
        }
        if g2_points_json_array.len() != parameters.num_g2_elements_needed {
            return Err(DecodeError::PointSizeMismatch {
                field: "tau_g2",
                expected: parameters.num_g2_elements_needed,
                got: g2_points_json_array.len(),
            });
        }

        let mut g1 = Vec::with_capacity(g1_points_json_array.len());
        let mut g2 = Vec::with_capacity(g2_points_json_array.len());

        for point_json in g1_points_json_array {
            g1.push(hex_string_to_g1(&point_json)?);
        }
        for point_json in g2_points_json_array {
            g2.push(hex_string_to_g2(&point_json)?)
        }

        Ok(SRS {
            tau_g1: g1,
            tau_g2: g2,
        })
    }
}

impl UpdateProof {
    pub fn serialise(&self) -> [String; 2] {
        self.to_json_array()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        let public_key_bytes = serialize_g2(&self.public_key.as_g2().into_affine());
        let update_point_bytes = serialize_g1(&self.after_tau_g1.into_affine());

        bytes.extend(public_key_bytes);
        bytes.extend(update_point_bytes);

        bytes
    }

    fn to_json_array(&self) -> [String; 2] {
        let mut a = hex::encode(serialize_g2(&self.public_key.as_g2().into_affine()));
        a.insert_str(0, "0x");

        let mut b = hex::encode(serialize_g1(&self.after_tau_g1.into_affine()));
        b.insert_str(0, "0x");

        [a, b]
    }

    pub fn deserialise(json_array: [String; 2]) -> Result<Self, DecodeError> {
        UpdateProof::from_json_array(json_array)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = std::io::Cursor::new(bytes);

        let public_key = g2_from_reader(&mut reader)?.into_projective();
        let after_tau_g1 = g1_from_reader(&mut reader)?.into_projective();

        Ok(UpdateProof {
            public_key: crate::keypair::PublicKey(public_key),
            after_tau_g1,
        })
    }

    fn from_json_array(points_json_arr: [String; 2]) -> Result<Self, DecodeError> {
        let public_key = hex_string_to_g2(&points_json_arr[0])?;
        let after_tau_g1 = hex_string_to_g1(&points_json_arr[1])?;

        Ok(UpdateProof {
            public_key: crate::keypair::PublicKey(public_key),
            after_tau_g1,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::keypair::{PrivateKey, PublicKey};
    use ark_bls12_381::Fr;
    use ark_ec::ProjectiveCurve;
    use ark_ff::PrimeField;

    use super::*;

    #[test]
    fn update_proof_serialise_roundtrip() {
        let proof = UpdateProof {
            public_key: PublicKey(
                G2Projective::prime_subgroup_generator().mul(Fr::from(200u64).into_repr()),
            ),
            after_tau_g1: G1Projective::prime_subgroup_generator()
                .mul(Fr::from(789u64).into_repr()),
        };

        let bytes = proof.serialise();
        let deserialised_proof = UpdateProof::deserialise(bytes).unwrap();

        assert_eq!(proof, deserialised_proof)
    }

    #[test]
    fn srs_serialise_roundtrip() {
        let params = SRSParameters::new(100, 25);

        let secret = PrivateKey::from_u64(5687);
        let mut acc = SRS::new(params);
        acc.update(secret);

        let bytes = acc.serialise();
        let deserialised_srs = SRS::deserialise(bytes, params).unwrap();

        assert_eq!(acc, deserialised_srs);
    }

    #[test]
    fn byte_roundtrip_matches_json_roundtrip() {
        let params = SRSParameters::new(4, 2);
        let secret = PrivateKey::from_u64(321);
        let mut acc = SRS::new(params);
        acc.update(secret);

        let bytes = acc.to_bytes();
        let from_bytes = SRS::from_bytes(&bytes, params).unwrap();

        assert_eq!(acc, from_bytes);
    }

    #[test]
    fn missing_hex_prefix_is_rejected() {
        let err = hex_string_to_g1("deadbeef").unwrap_err();
        assert_eq!(err, DecodeError::InvalidHexPrefix);
    }

    #[test]
    fn wrong_point_count_is_rejected() {
        let params = SRSParameters::new(4, 2);
        let secret = PrivateKey::from_u64(1);
        let mut acc = SRS::new(params);
        acc.update(secret);

        let (g1, g2) = acc.serialise();
        let wrong_params = SRSParameters::new(5, 2);

        let err = SRS::deserialise((g1, g2), wrong_params).unwrap_err();
        assert_eq!(
            err,
            DecodeError::PointSizeMismatch {
                field: "tau_g1",
                expected: 5,
                got: 4,
            }
        );
    }
}
