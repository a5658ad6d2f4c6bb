// A KeyPair is a contributor's one-time secret scalar plus the public
// commitment to it. The private scalar is used exactly once, to update an
// SRS, and then destroyed.

use ark_bls12_381::{Fr, G2Projective};
use ark_ec::ProjectiveCurve;
use ark_ff::{Field, PrimeField, UniformRand, Zero};
use rand::Rng;
use zeroize::Zeroize;

/// A contributor's secret scalar, reduced modulo the scalar field order.
///
/// Deliberately not `Copy`: a `PrivateKey` is meant to be used exactly once
/// and then destroyed, and `Copy` would make accidental duplication
/// invisible at the type level. It zeroizes itself on drop instead of
/// relying on `zeroize_derive`, since `ark_bls12_381::Fr` does not
/// implement `Zeroize`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub(crate) tau: Fr,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey").field("tau", &"<redacted>").finish()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.tau = Fr::zero();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl PrivateKey {
    /// Only meant for tests and benchmarks, where callers want small,
    /// readable secrets.
    #[cfg(test)]
    pub(crate) fn from_u64(int: u64) -> Self {
        Self { tau: Fr::from(int) }
    }

    /// Draws a fresh private key from an entropy source.
    pub fn rand<R: Rng>(mut rand: R) -> Self {
        PrivateKey {
            tau: Fr::rand(&mut rand),
        }
    }

    /// Reduces raw bytes modulo the scalar field order. Used when the
    /// caller has already gathered their own entropy (see `KeyPair::new_from_hex`).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        PrivateKey {
            tau: Fr::from_be_bytes_mod_order(bytes),
        }
    }

    /// Computes this private key's G2 public commitment. Takes `&self`
    /// rather than consuming it, since committing to a secret should not
    /// require giving up ownership of it.
    pub fn to_public(&self) -> PublicKey {
        let gen_g2 = G2Projective::prime_subgroup_generator();
        PublicKey(gen_g2.mul(self.tau.into_repr()))
    }

    /// Returns a fresh scalar equal to `self^i mod r`.
    ///
    /// Policy: if `self == 0`, the result is 0 for every `i`, including
    /// `i == 0`. `0^0` is mathematically ambiguous; this crate does not
    /// special-case it to 1, because a zero-scalar contribution must
    /// collapse every element of the SRS (including the degree-0 ones) to
    /// the identity, so that the downstream non-identity check rejects it.
    pub fn pow_i(&self, i: u64) -> PrivateKey {
        if self.tau.is_zero() {
            return PrivateKey { tau: Fr::zero() };
        }
        PrivateKey {
            tau: self.tau.pow([i]),
        }
    }
}

/// A contributor's public commitment to their secret scalar: `[tau] * G2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub(crate) G2Projective);

impl PublicKey {
    pub fn as_g2(&self) -> G2Projective {
        self.0
    }
}

/// A one-time contributor identity: a private scalar and its public
/// commitment. Consumed by value when the contributor is done with it, so
/// that the secret cannot accidentally be reused across updates.
#[derive(Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Builds a `KeyPair` from an already-normalised secret scalar.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.to_public();
        Self {
            private_key,
            public_key,
        }
    }

    /// Constructs a `KeyPair` from an integer secret. One of the two
    /// explicit constructors Design Note 9.1 asks for, in place of the
    /// source's runtime int/hex type dispatch.
    pub fn new_from_u64(secret: u64) -> Self {
        Self::from_private_key(PrivateKey {
            tau: Fr::from(secret),
        })
    }

    /// Constructs a `KeyPair` from a hex-encoded secret. An optional `0x`
    /// prefix is stripped before decoding, matching the wire convention
    /// used for serialised SRS points.
    pub fn new_from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(stripped)?;
        Ok(Self::from_private_key(PrivateKey::from_bytes(&bytes)))
    }

    /// Draws a fresh secret from an entropy source. This is the path a
    /// real contributor should use; `new_from_u64`/`new_from_hex` exist for
    /// deterministic tests and for secrets sourced out-of-band.
    pub fn generate<R: Rng>(rng: R) -> Self {
        Self::from_private_key(PrivateKey::rand(rng))
    }

    pub fn private_key(&self) -> PrivateKey {
        self.private_key.clone()
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Overwrites the private scalar with 0 and consumes the `KeyPair`.
    /// Best-effort erasure: `PrivateKey`'s own `Drop` impl already wipes it
    /// when a `KeyPair` drops, but a contributor's protocol obligation is
    /// to call this explicitly the moment `update_srs()` returns, not to
    /// rely on the destructor running at some later, unspecified point.
    pub fn destroy(mut self) {
        self.private_key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_i_of_zero_is_zero_everywhere() {
        let zero = PrivateKey { tau: Fr::zero() };
        for i in 0..5 {
            assert!(zero.pow_i(i).tau.is_zero());
        }
    }

    #[test]
    fn pow_i_zeroth_power_is_one() {
        let secret = PrivateKey::from_u64(123);
        assert_eq!(secret.pow_i(0).tau, Fr::from(1u64));
    }

    #[test]
    fn hex_and_int_constructors_agree() {
        let from_hex = KeyPair::new_from_hex("0x123456").unwrap();
        let from_hex_no_prefix = KeyPair::new_from_hex("123456").unwrap();
        let from_int = KeyPair::new_from_u64(1193046);

        assert_eq!(from_hex.private_key(), from_int.private_key());
        assert_eq!(from_hex.public_key(), from_int.public_key());
        assert_eq!(from_hex.private_key(), from_hex_no_prefix.private_key());
    }

    #[test]
    fn destroy_consumes_the_keypair() {
        let keypair = KeyPair::new_from_u64(42);
        keypair.destroy();
    }
}
