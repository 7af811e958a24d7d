//! Ed25519 signatures built from first principles: prime field arithmetic,
//! the edwards25519 group law in affine coordinates, compressed point
//! encoding, and the RFC 8032 sign/verify protocol.
//!
//! This is a reference implementation. It is slow and variable-time; do not
//! use it where timing side channels matter.

pub mod codec;
pub mod curve;
pub mod error;
pub mod field;
pub mod hash;
pub mod keypair;
pub mod scalar;
pub mod sign;
pub mod verify;

// Re-exports for convenience
pub use curve::EdwardsPoint;
pub use error::{Error, Result};
pub use field::FieldElement;
pub use hash::{Hash512, Sha512Hash};
pub use keypair::{KeyPair, PublicKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
pub use scalar::Scalar;
pub use sign::{sign, sign_with, Signature, SIGNATURE_LENGTH};
pub use verify::{verify, verify_strict, verify_strict_with, verify_with};
