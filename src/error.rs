// Typed decode/parameter errors. Verification itself stays boolean (see
// `srs::SRS::is_correct`, `srs::SRS::verify_updates`) — only the "this byte
// string was malformed" class of failure gets a type, per the decode-error
// vs. verification-failure split the ceremony draws between itself.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("hex string is missing the required 0x prefix")]
    InvalidHexPrefix,
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("expected {expected} bytes, got {got}")]
    WrongByteLength { expected: usize, got: usize },
    #[error("{field}: expected {expected} points, got {got}")]
    PointSizeMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("uncompressed point encoding is not implemented")]
    UnimplementedEncoding,
    #[error("x-coordinate does not correspond to a point on the curve")]
    PointNotOnCurve,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterMismatchError {
    #[error("expected {expected} sub-ceremonies, got {got}")]
    WrongSubCeremonyCount { expected: usize, got: usize },
    #[error("sub-ceremony {ceremony_index}: {field} expected {expected}, got {got}")]
    WrongSize {
        ceremony_index: usize,
        field: &'static str,
        expected: usize,
        got: usize,
    },
}
