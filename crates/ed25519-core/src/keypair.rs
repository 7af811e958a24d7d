// Key derivation for Ed25519.
//
// Secret seed: 32 opaque bytes. It is the only secret worth storing;
// everything else is recomputed from it:
//   digest = H(seed)                       (64 bytes)
//   s      = clamp(digest[0..32])          secret scalar
//   prefix = digest[32..64]                nonce prefix
//   A      = s · B                         public key

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::curve::EdwardsPoint;
use crate::error::{Error, Result};
use crate::hash::{Hash512, Sha512Hash};
use crate::scalar::Scalar;

pub const SECRET_KEY_LENGTH: usize = 32;

pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Clamp a little-endian 32-byte integer: clear the low three bits (a
/// multiple of the cofactor 8), clear bit 255 and set bit 254.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// The secret scalar and nonce prefix expanded from a seed.
#[derive(Clone)]
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) prefix: [u8; 32],
}

impl ExpandedSecretKey {
    fn from_digest(digest: &[u8; 64]) -> Self {
        let mut scalar_bytes = [0u8; 32];
        let mut prefix = [0u8; 32];
        scalar_bytes.copy_from_slice(&digest[..32]);
        prefix.copy_from_slice(&digest[32..]);

        let scalar = Scalar::from_bytes_mod_order(&clamp_integer(scalar_bytes));
        scalar_bytes.zeroize();
        ExpandedSecretKey { scalar, prefix }
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.prefix.zeroize();
    }
}

/// An Ed25519 public key (a point on edwards25519).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: EdwardsPoint,
}

impl PublicKey {
    pub fn from_point(point: EdwardsPoint) -> Self {
        PublicKey { point }
    }

    /// Decode a 32-byte compressed public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(PublicKey {
            point: EdwardsPoint::decompress(bytes)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.point.compress()
    }

    pub fn point(&self) -> &EdwardsPoint {
        &self.point
    }
}

/// An Ed25519 key pair derived from a 32-byte seed.
///
/// The seed and prefix are wiped on drop, and `Debug` only shows the public key.
#[derive(Clone)]
pub struct KeyPair {
    seed: [u8; SECRET_KEY_LENGTH],
    expanded: ExpandedSecretKey,
    /// Public key A = s · B.
    pub pk: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair from an OS-seeded random seed.
    pub fn generate() -> Self {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        OsRng.fill_bytes(&mut seed);
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        keypair
    }

    /// Derive with SHA-512 from a seed of known length.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self::expand(&Sha512Hash, seed)
    }

    /// Derive with SHA-512. Fails unless `seed` is exactly 32 bytes.
    pub fn derive(seed: &[u8]) -> Result<Self> {
        Self::derive_with(&Sha512Hash, seed)
    }

    /// Derive with the given hash. Fails unless `seed` is exactly 32 bytes.
    ///
    /// The key pair does not remember `hasher`. Sign with
    /// [`Signature::sign_with`] and the same hash: [`Signature::sign`] would
    /// silently use SHA-512 for the nonce and challenge, producing a
    /// signature that `verify` accepts but `verify_with(hasher, ..)` rejects.
    ///
    /// [`Signature::sign_with`]: crate::sign::Signature::sign_with
    /// [`Signature::sign`]: crate::sign::Signature::sign
    pub fn derive_with<H: Hash512>(hasher: &H, seed: &[u8]) -> Result<Self> {
        let seed: &[u8; SECRET_KEY_LENGTH] = seed
            .try_into()
            .map_err(|_| Error::InvalidKeyLength(seed.len()))?;
        Ok(Self::expand(hasher, seed))
    }

    fn expand<H: Hash512>(hasher: &H, seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let mut digest = hasher.hash(&[seed.as_slice()]);
        let expanded = ExpandedSecretKey::from_digest(&digest);
        digest.zeroize();

        let point = EdwardsPoint::base_point().scalar_mul(&expanded.scalar);
        log::debug!("derived public key from seed");

        KeyPair {
            seed: *seed,
            expanded,
            pk: PublicKey { point },
        }
    }

    /// The seed this key pair was derived from.
    pub fn seed(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.seed
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.expanded.scalar
    }

    pub(crate) fn prefix(&self) -> &[u8; 32] {
        &self.expanded.prefix
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use std::sync::Mutex;

    struct CaptureLogger(Mutex<Vec<(log::Level, String)>>);

    static CAPTURE: CaptureLogger = CaptureLogger(Mutex::new(Vec::new()));

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    #[test]
    fn rfc8032_test1_public_key() {
        let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let kp = KeyPair::from_seed(&seed);
        assert_eq!(
            kp.pk.to_bytes(),
            hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
        );
    }

    #[test]
    fn clamping() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0], 0xf8);
        assert_eq!(clamped[31], 0x7f);
        assert_eq!(clamp_integer([0; 32])[31], 0x40);
    }

    #[test]
    fn wrong_seed_length_rejected() {
        assert_eq!(
            KeyPair::derive(&[0u8; 31]).unwrap_err(),
            Error::InvalidKeyLength(31)
        );
        assert_eq!(
            KeyPair::derive(&[0u8; 33]).unwrap_err(),
            Error::InvalidKeyLength(33)
        );
    }

    #[test]
    fn deterministic_from_seed() {
        let seed = [7u8; 32];
        let kp1 = KeyPair::from_seed(&seed);
        let kp2 = KeyPair::derive(&seed).unwrap();
        assert_eq!(kp1.pk, kp2.pk);
        assert_eq!(kp1.scalar(), kp2.scalar());
        assert_eq!(kp1.prefix(), kp2.prefix());
    }

    #[test]
    fn generate_keypair() {
        let kp = KeyPair::generate();
        assert!(!kp.pk.point().is_identity(), "public key must not be identity");
        assert_eq!(KeyPair::from_seed(kp.seed()).pk, kp.pk);
    }

    #[test]
    fn debug_hides_secrets() {
        let seed = [0xabu8; 32];
        let kp = KeyPair::from_seed(&seed);
        let shown = format!("{kp:?}");
        assert!(!shown.contains("seed"));
        assert!(!shown.contains("prefix"));
    }

    #[test]
    fn public_key_round_trip() {
        let kp = KeyPair::from_seed(&[3u8; 32]);
        let decoded = PublicKey::from_bytes(&kp.pk.to_bytes()).unwrap();
        assert_eq!(decoded, kp.pk);
    }

    #[test]
    fn derivation_logs_at_debug() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Debug);
        let _kp = KeyPair::from_seed(&[0x21; 32]);
        let records = CAPTURE.0.lock().unwrap();
        assert!(records
            .iter()
            .any(|(level, msg)| *level == log::Level::Debug && msg.contains("derived public key")));
    }
}
