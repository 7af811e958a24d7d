// crates/ed25519-core/src/error.rs
//
// Every error here means malformed input bytes. A well-formed signature
// that simply does not verify is reported as `Ok(false)`, never as an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid secret key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("invalid signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Bad compressed point: wrong length, non-residue, or a sign bit on x = 0.
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(&'static str),

    #[error("coordinates do not satisfy the curve equation")]
    InvalidPoint,

    /// Signature scalar S is not below the group order (strict verification only).
    #[error("signature scalar is not reduced modulo the group order")]
    NonCanonicalScalar,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
