// Ed25519 signing (RFC 8032 §5.1.6).
//
// Signing a message m with the key pair derived from a seed:
//   1. r = H(prefix || m)                 — deterministic nonce, 512 bits
//   2. R = r · B
//   3. k = H(enc(R) || enc(A) || m)       — challenge
//   4. S = (r + k · s) mod L              — response
//   5. Signature = enc(R) || S            — 64 bytes
//
// r and k are only ever used mod L, so they are reduced on the way in.

use crate::curve::EdwardsPoint;
use crate::error::{Error, Result};
use crate::hash::{challenge, Hash512, Sha512Hash};
use crate::keypair::KeyPair;
use crate::scalar::Scalar;

pub const SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 signature (R, S).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Compressed commitment point R = r · B.
    pub r: [u8; 32],
    /// Response S, little-endian. Not checked against L when parsed.
    pub s: [u8; 32],
}

impl Signature {
    /// Sign a message with the given key pair, hashing with SHA-512.
    ///
    /// Only meaningful for key pairs derived with SHA-512. For a key pair from
    /// `KeyPair::derive_with(custom, ..)` this still hashes with SHA-512, and
    /// the result verifies under `verify` but not under `verify_with(custom, ..)`.
    pub fn sign(keypair: &KeyPair, message: &[u8]) -> Self {
        Self::sign_with(&Sha512Hash, keypair, message)
    }

    /// Sign with an explicit hash. It must be the one the key pair was
    /// derived with; nothing checks this, and a mismatch yields a signature
    /// that only verifies under `hasher`, not under the derivation hash.
    pub fn sign_with<H: Hash512>(hasher: &H, keypair: &KeyPair, message: &[u8]) -> Self {
        let r = Scalar::from_bytes_mod_order(&hasher.hash(&[keypair.prefix().as_slice(), message]));

        // R = r · B
        let r_bytes = EdwardsPoint::base_point().scalar_mul(&r).compress();

        let k = challenge(hasher, &r_bytes, &keypair.pk.to_bytes(), message);

        // S = r + k · s  (mod L)
        let s = r.add(&k.mul(keypair.scalar()));

        Signature {
            r: r_bytes,
            s: s.to_bytes_le(),
        }
    }

    /// Split 64 bytes into (R, S). Only the length is checked here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidSignatureLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

/// Sign `message` with the key derived from `seed`, using SHA-512.
pub fn sign(seed: &[u8], message: &[u8]) -> Result<Signature> {
    sign_with(&Sha512Hash, seed, message)
}

/// Sign `message` with the key derived from `seed`, using `hasher`.
pub fn sign_with<H: Hash512>(hasher: &H, seed: &[u8], message: &[u8]) -> Result<Signature> {
    let keypair = KeyPair::derive_with(hasher, seed)?;
    Ok(Signature::sign_with(hasher, &keypair, message))
}
