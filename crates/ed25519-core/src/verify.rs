// Ed25519 verification (RFC 8032 §5.1.7), cofactored.
//
// Given signature (R, S), public key A and message m:
//   1. R = decode(sig[0..32])
//   2. k = H(enc(R) || enc(A) || m)
//   3. Accept iff 8S · B == 8 · R + 8k · A
//
// `verify` takes S as-is, like the reference: any 256-bit value is used
// mod L. `verify_strict` additionally insists on S < L.

use crate::curve::EdwardsPoint;
use crate::error::{Error, Result};
use crate::hash::{challenge, Hash512, Sha512Hash};
use crate::keypair::PublicKey;
use crate::scalar::Scalar;
use crate::sign::Signature;

/// Verify with SHA-512.
///
/// `Ok(false)` means the signature is well-formed but wrong. Errors are
/// reserved for a bad length or an undecodable R.
pub fn verify(public: &PublicKey, signature: &[u8], message: &[u8]) -> Result<bool> {
    verify_with(&Sha512Hash, public, signature, message)
}

/// Verify with an explicit hash.
pub fn verify_with<H: Hash512>(
    hasher: &H,
    public: &PublicKey,
    signature: &[u8],
    message: &[u8],
) -> Result<bool> {
    let sig = Signature::from_bytes(signature)?;
    let s = Scalar::from_bytes_mod_order(&sig.s);
    check_equation(hasher, public, &sig, &s, message)
}

/// Like [`verify`], but rejects a response S that is not below L.
pub fn verify_strict(public: &PublicKey, signature: &[u8], message: &[u8]) -> Result<bool> {
    verify_strict_with(&Sha512Hash, public, signature, message)
}

pub fn verify_strict_with<H: Hash512>(
    hasher: &H,
    public: &PublicKey,
    signature: &[u8],
    message: &[u8],
) -> Result<bool> {
    let sig = Signature::from_bytes(signature)?;
    let s = Scalar::from_canonical_bytes(&sig.s).ok_or(Error::NonCanonicalScalar)?;
    check_equation(hasher, public, &sig, &s, message)
}

fn check_equation<H: Hash512>(
    hasher: &H,
    public: &PublicKey,
    sig: &Signature,
    s: &Scalar,
    message: &[u8],
) -> Result<bool> {
    let r = EdwardsPoint::decompress(&sig.r)?;
    let k = challenge(hasher, &r.compress(), &public.to_bytes(), message);

    let eight = Scalar::from_u64(8);
    let lhs = EdwardsPoint::base_point().scalar_mul(&s.mul(&eight));
    let rhs = r
        .mul_by_cofactor()
        .add(&public.point().scalar_mul(&k.mul(&eight)));

    if lhs == rhs {
        Ok(true)
    } else {
        log::debug!("signature rejected: 8S·B != 8R + 8k·A");
        Ok(false)
    }
}
