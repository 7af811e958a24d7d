// crates/ed25519-core/src/scalar.rs
//
// Integers modulo the group order L.

use num_bigint::BigUint;

use crate::curve::{group_order, SCALAR_BITS};

/// A scalar in Z_L. Always reduced, so it fits in 253 bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar(BigUint);

impl Scalar {
    pub fn zero() -> Self {
        Self::from_u64(0)
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    pub fn from_u64(n: u64) -> Self {
        Self::from_biguint(BigUint::from(n))
    }

    /// Reduce an arbitrary integer mod L.
    pub fn from_biguint(n: BigUint) -> Self {
        Scalar(n % group_order())
    }

    /// Interpret `bytes` as a little-endian integer of any width (for example
    /// a 64-byte digest) and reduce it mod L.
    pub fn from_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_biguint(BigUint::from_bytes_le(bytes))
    }

    /// Accept only the canonical encoding, i.e. a value strictly below L.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let n = BigUint::from_bytes_le(bytes);
        if &n < group_order() {
            Some(Scalar(n))
        } else {
            None
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        Self::from_biguint(&self.0 + &other.0)
    }

    pub fn mul(&self, other: &Scalar) -> Scalar {
        Self::from_biguint(&self.0 * &other.0)
    }

    /// 32-byte little-endian encoding.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    /// Bits in little-endian order (for scalar multiplication).
    pub fn to_bits_le(&self) -> Vec<bool> {
        (0..SCALAR_BITS as u64).map(|i| self.0.bit(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_mod_order() {
        let l_plus_five = group_order() + 5u32;
        assert_eq!(Scalar::from_biguint(l_plus_five), Scalar::from_u64(5));
    }

    #[test]
    fn canonical_bytes_reject_order() {
        let mut l_bytes = [0u8; 32];
        let raw = group_order().to_bytes_le();
        l_bytes[..raw.len()].copy_from_slice(&raw);
        assert_eq!(Scalar::from_canonical_bytes(&l_bytes), None);

        let seven = Scalar::from_u64(7).to_bytes_le();
        assert_eq!(Scalar::from_canonical_bytes(&seven), Some(Scalar::from_u64(7)));
    }

    #[test]
    fn wide_reduction() {
        // 2^512 - 1 mod L, checked against the integer arithmetic directly.
        let wide = [0xffu8; 64];
        let expected = (BigUint::from(1u8) << 512u32) - 1u32;
        assert_eq!(
            Scalar::from_bytes_mod_order(&wide),
            Scalar::from_biguint(expected)
        );
    }

    #[test]
    fn bits_are_little_endian() {
        let bits = Scalar::from_u64(0b1011).to_bits_le();
        assert_eq!(bits.len(), SCALAR_BITS);
        assert_eq!(&bits[..5], &[true, true, false, true, false]);
    }

    #[test]
    fn arithmetic_wraps() {
        let minus_one = Scalar::from_biguint(group_order() - 1u32);
        assert_eq!(minus_one.add(&Scalar::one()), Scalar::zero());
        assert_eq!(minus_one.mul(&minus_one), Scalar::one());
    }
}
