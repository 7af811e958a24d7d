// crates/ed25519-core/src/hash.rs
//
// The 64-byte hash capability used for key expansion, nonce derivation and
// the challenge. The signing code never builds a hash itself; it is handed
// anything implementing `Hash512`. `Sha512Hash` gives standard Ed25519.
//
// The challenge is:
//   k = H(enc(R) || enc(A) || message)   read as a little-endian integer

use sha2::{Digest, Sha512};

use crate::scalar::Scalar;

pub const DIGEST_LENGTH: usize = 64;

/// A hash function with a 64-byte output.
///
/// `parts` are hashed as if concatenated.
pub trait Hash512 {
    fn hash(&self, parts: &[&[u8]]) -> [u8; DIGEST_LENGTH];
}

/// SHA-512 from the `sha2` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha512Hash;

impl Hash512 for Sha512Hash {
    fn hash(&self, parts: &[&[u8]]) -> [u8; DIGEST_LENGTH] {
        let mut hasher = Sha512::new();
        for part in parts {
            hasher.update(part);
        }
        let mut out = [0u8; DIGEST_LENGTH];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

/// Compute the challenge scalar k = H(R || A || M) mod L.
pub fn challenge<H: Hash512>(
    hasher: &H,
    encoded_r: &[u8; 32],
    encoded_a: &[u8; 32],
    message: &[u8],
) -> Scalar {
    Scalar::from_bytes_mod_order(&hasher.hash(&[&encoded_r[..], &encoded_a[..], message]))
}
