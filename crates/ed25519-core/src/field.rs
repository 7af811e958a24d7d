// crates/ed25519-core/src/field.rs
//
// Prime field arithmetic.
//
// A `FieldElement` carries the prime it lives under. The curve only uses
// p = 2^255 - 19 (see `curve::prime`), but nothing here is specific to it,
// so small fields like F_31 run through exactly the same code in tests.
//
// Elements are immutable: every operation returns a new, reduced element.
// Combining elements of two different primes is a caller bug and panics.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;

/// An element of F_q for some prime q. Always holds a value in `[0, q)`.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldElement {
    num: BigUint,
    prime: Arc<BigUint>,
}

impl FieldElement {
    /// Reduce `num` into the field of `prime`.
    pub fn new(num: BigUint, prime: Arc<BigUint>) -> Self {
        let num = num % prime.as_ref();
        FieldElement { num, prime }
    }

    pub fn from_u64(num: u64, prime: Arc<BigUint>) -> Self {
        Self::new(BigUint::from(num), prime)
    }

    /// Parse a little-endian integer of any width and reduce it.
    pub fn from_bytes_le(bytes: &[u8], prime: Arc<BigUint>) -> Self {
        Self::new(BigUint::from_bytes_le(bytes), prime)
    }

    pub fn zero(prime: Arc<BigUint>) -> Self {
        Self::from_u64(0, prime)
    }

    pub fn one(prime: Arc<BigUint>) -> Self {
        Self::from_u64(1, prime)
    }

    /// The canonical integer value.
    pub fn value(&self) -> &BigUint {
        &self.num
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn is_zero(&self) -> bool {
        self.num.bits() == 0
    }

    /// Low bit of the canonical value. This is the "sign" of an x-coordinate.
    pub fn is_odd(&self) -> bool {
        self.num.bit(0)
    }

    pub fn add(&self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        self.with(&self.num + &other.num)
    }

    pub fn sub(&self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        self.with(&self.num + self.prime.as_ref() - &other.num)
    }

    pub fn mul(&self, other: &FieldElement) -> FieldElement {
        self.assert_same_field(other);
        self.with(&self.num * &other.num)
    }

    /// Multiply by a plain integer coefficient.
    pub fn mul_small(&self, coefficient: u64) -> FieldElement {
        self.with(&self.num * coefficient)
    }

    pub fn neg(&self) -> FieldElement {
        self.with(self.prime.as_ref() - &self.num)
    }

    pub fn square(&self) -> FieldElement {
        self.with(&self.num * &self.num)
    }

    /// `self^exponent`, for any non-negative exponent.
    pub fn pow(&self, exponent: &BigUint) -> FieldElement {
        FieldElement {
            num: self.num.modpow(exponent, &self.prime),
            prime: Arc::clone(&self.prime),
        }
    }

    /// `self^exponent` with a signed exponent, reduced modulo `q - 1`.
    ///
    /// Negative exponents are only meaningful for non-zero elements.
    pub fn powi(&self, exponent: i64) -> FieldElement {
        let order = self.prime.as_ref() - 1u32;
        let magnitude = BigUint::from(exponent.unsigned_abs()) % &order;
        let n = if exponent < 0 && magnitude.bits() != 0 {
            &order - magnitude
        } else {
            magnitude
        };
        self.pow(&n)
    }

    /// Multiplicative inverse via Fermat: `self^(q - 2)`.
    ///
    /// Returns `None` for zero, which has no inverse.
    pub fn inverse(&self) -> Option<FieldElement> {
        if self.is_zero() {
            return None;
        }
        let exponent = self.prime.as_ref() - 2u32;
        Some(self.pow(&exponent))
    }

    /// `self / other`, or `None` when `other` is zero.
    pub fn div(&self, other: &FieldElement) -> Option<FieldElement> {
        self.assert_same_field(other);
        Some(self.mul(&other.inverse()?))
    }

    /// Little-endian bytes, zero-padded to the byte width of the prime.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let width = self.prime.bits().div_ceil(8) as usize;
        let mut bytes = self.num.to_bytes_le();
        bytes.resize(width, 0);
        bytes
    }

    fn with(&self, num: BigUint) -> FieldElement {
        FieldElement::new(num, Arc::clone(&self.prime))
    }

    fn assert_same_field(&self, other: &FieldElement) {
        assert!(
            Arc::ptr_eq(&self.prime, &other.prime) || self.prime == other.prime,
            "field elements from different primes: {} and {}",
            self.prime,
            other.prime
        );
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:#x} mod {:#x})", self.num, self.prime.as_ref())
    }
}
