//! Cryptographic core of a multi-party "powers of tau" trusted-setup
//! ceremony over BLS12-381: the structured reference string, its update and
//! product-decomposition proofs, the actors that drive a ceremony round,
//! and the four-sub-ceremony transcript that threads them together.

pub mod actors;
pub mod error;
pub mod keypair;
pub mod point_encoding;
pub mod product_decomposition;
pub mod serialisation;
pub mod srs;
pub mod subgroup_checks;
pub mod transcript;
pub mod update_proof;
