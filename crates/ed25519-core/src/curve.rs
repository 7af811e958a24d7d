// crates/ed25519-core/src/curve.rs
//
// edwards25519 curve arithmetic in affine coordinates.
//
// Curve equation:  -x^2 + y^2 = 1 + d*x^2*y^2
//   p = 2^255 - 19
//   d = -121665 / 121666 (mod p)
//
// Identity point: (0, 1)
// Base point B: y = 4/5, x even
// Subgroup order: L = 2^252 + 27742317777372353535851937790883648493
//
// None of this is constant time. Each addition pays for two modular
// inversions, and scalar multiplication branches on every bit of the
// scalar, so timing leaks the scalar's bit pattern.

use std::sync::{Arc, OnceLock};

use num_bigint::BigUint;

use crate::codec;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// Decimal digits of `L - 2^252`.
const ORDER_L_LOW: &str = "27742317777372353535851937790883648493";

/// Number of double-and-add rounds; covers any scalar below 2^255.
pub const SCALAR_BITS: usize = 255;

static PRIME: OnceLock<Arc<BigUint>> = OnceLock::new();
static ORDER: OnceLock<BigUint> = OnceLock::new();
static EDWARDS_D: OnceLock<FieldElement> = OnceLock::new();
static SQRT_M1: OnceLock<FieldElement> = OnceLock::new();
static BASE_POINT: OnceLock<EdwardsPoint> = OnceLock::new();

/// The field prime p = 2^255 - 19.
pub fn prime() -> &'static Arc<BigUint> {
    PRIME.get_or_init(|| Arc::new((BigUint::from(1u8) << 255u32) - 19u32))
}

/// The prime order L of the base point's subgroup.
pub fn group_order() -> &'static BigUint {
    ORDER.get_or_init(|| {
        let low = BigUint::parse_bytes(ORDER_L_LOW.as_bytes(), 10).expect("invalid decimal string");
        (BigUint::from(1u8) << 252u32) + low
    })
}

/// Lift an integer into F_p.
pub fn field_element(num: BigUint) -> FieldElement {
    FieldElement::new(num, Arc::clone(prime()))
}

/// Small constant in F_p.
pub fn fe(num: u64) -> FieldElement {
    FieldElement::from_u64(num, Arc::clone(prime()))
}

/// The curve constant d = -121665 / 121666.
pub fn edwards_d() -> &'static FieldElement {
    EDWARDS_D.get_or_init(|| {
        fe(121665)
            .neg()
            .div(&fe(121666))
            .expect("121666 is non-zero mod p")
    })
}

/// A square root of -1 in F_p: 2^((p - 1) / 4).
pub fn sqrt_minus_one() -> &'static FieldElement {
    SQRT_M1.get_or_init(|| {
        let exponent = (prime().as_ref() - 1u32) >> 2u32;
        fe(2).pow(&exponent)
    })
}

/// An affine point on edwards25519. The identity is (0, 1).
///
/// Every value of this type satisfies the curve equation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdwardsPoint {
    x: FieldElement,
    y: FieldElement,
}

impl EdwardsPoint {
    /// Build a point from coordinates in F_p, rejecting anything off the curve.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self> {
        if x.prime() != prime().as_ref() || y.prime() != prime().as_ref() {
            return Err(Error::InvalidPoint);
        }
        let point = EdwardsPoint { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// Build a point from integer coordinates; both are reduced mod p first.
    pub fn from_coordinates(x: &BigUint, y: &BigUint) -> Result<Self> {
        Self::new(field_element(x.clone()), field_element(y.clone()))
    }

    /// The identity point (0, 1).
    pub fn identity() -> Self {
        EdwardsPoint { x: fe(0), y: fe(1) }
    }

    /// The standard base point B, decoded once on first use.
    pub fn base_point() -> &'static EdwardsPoint {
        BASE_POINT.get_or_init(|| {
            let y = fe(4).div(&fe(5)).expect("5 is non-zero mod p");
            codec::decode_point(&y.to_bytes_le()).expect("base point encoding is valid")
        })
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Check -x^2 + y^2 = 1 + d*x^2*y^2.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = y2.sub(&x2);
        let rhs = fe(1).add(&edwards_d().mul(&x2).mul(&y2));
        lhs == rhs
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == fe(1)
    }

    /// Unified twisted Edwards addition (a = -1).
    ///
    /// (x1,y1) + (x2,y2) = (x3,y3) where:
    ///   x3 = (x1*y2 + x2*y1) / (1 + d*x1*x2*y1*y2)
    ///   y3 = (y1*y2 + x1*x2) / (1 - d*x1*x2*y1*y2)
    ///
    /// d is a non-square mod p, so the denominators never vanish for points
    /// on the curve; the same formula covers doubling and the identity.
    pub fn add(&self, other: &EdwardsPoint) -> EdwardsPoint {
        let x1x2 = self.x.mul(&other.x);
        let y1y2 = self.y.mul(&other.y);
        let dxxyy = edwards_d().mul(&x1x2).mul(&y1y2);
        let one = fe(1);

        let x3_num = self.x.mul(&other.y).add(&other.x.mul(&self.y));
        let x3 = x3_num
            .div(&one.add(&dxxyy))
            .expect("degenerate addition");

        let y3_num = y1y2.add(&x1x2);
        let y3 = y3_num
            .div(&one.sub(&dxxyy))
            .expect("degenerate addition");

        let sum = EdwardsPoint { x: x3, y: y3 };
        debug_assert!(sum.is_on_curve());
        sum
    }

    pub fn double(&self) -> EdwardsPoint {
        self.add(self)
    }

    /// (p - x, y)
    pub fn neg(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.x.neg(),
            y: self.y.clone(),
        }
    }

    pub fn sub(&self, other: &EdwardsPoint) -> EdwardsPoint {
        self.add(&other.neg())
    }

    /// Scalar multiplication (double-and-add, least significant bit first).
    ///
    /// Always runs `SCALAR_BITS` rounds, but only adds on set bits.
    pub fn scalar_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let mut result = EdwardsPoint::identity();
        let mut current = self.clone();

        for bit in scalar.to_bits_le() {
            if bit {
                result = result.add(&current);
            }
            current = current.double();
        }

        result
    }

    /// Multiply by an arbitrary non-negative integer, reduced mod L first.
    pub fn mul_integer(&self, k: &BigUint) -> EdwardsPoint {
        self.scalar_mul(&Scalar::from_biguint(k.clone()))
    }

    /// 8 * P, clearing any small-order component.
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.double().double().double()
    }

    /// 32-byte compressed encoding.
    pub fn compress(&self) -> [u8; 32] {
        codec::encode_point(self)
    }

    /// Inverse of [`EdwardsPoint::compress`].
    pub fn decompress(bytes: &[u8]) -> Result<EdwardsPoint> {
        codec::decode_point(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constants_match_reference_values() {
        let l = BigUint::parse_bytes(
            b"7237005577332262213973186563042994240857116359379907606001950938285454250989",
            10,
        )
        .unwrap();
        assert_eq!(group_order(), &l);
        assert_eq!(sqrt_minus_one().square(), fe(1).neg());
        assert_eq!(edwards_d().mul(&fe(121666)), fe(121665).neg());
    }

    #[test]
    fn base_point_is_on_curve() {
        let b = EdwardsPoint::base_point();
        assert!(b.is_on_curve(), "B must be on curve");
        assert!(!b.x().is_odd(), "B has even x");
        assert_eq!(b.y().mul(&fe(5)), fe(4));
    }

    #[test]
    fn identity_is_on_curve() {
        let id = EdwardsPoint::identity();
        assert!(id.is_on_curve(), "identity must be on curve");
        assert!(id.is_identity());
    }

    #[test]
    fn off_curve_coordinates_rejected() {
        let err = EdwardsPoint::from_coordinates(&BigUint::from(1u8), &BigUint::from(1u8));
        assert_eq!(err, Err(Error::InvalidPoint));
    }

    #[test]
    fn foreign_field_rejected() {
        let f31 = Arc::new(BigUint::from(31u8));
        let x = FieldElement::zero(Arc::clone(&f31));
        let y = FieldElement::one(f31);
        assert_eq!(EdwardsPoint::new(x, y), Err(Error::InvalidPoint));
    }

    #[test]
    fn add_identity() {
        let b = EdwardsPoint::base_point();
        let id = EdwardsPoint::identity();
        assert_eq!(&b.add(&id), b, "B + 0 = B");
        assert_eq!(&id.add(b), b, "0 + B = B");
    }

    #[test]
    fn add_negation_is_identity() {
        let b = EdwardsPoint::base_point();
        assert!(b.add(&b.neg()).is_identity());
        assert!(b.sub(b).is_identity());
    }

    #[test]
    fn double_equals_add_self() {
        let b = EdwardsPoint::base_point();
        let two = Scalar::from_u64(2);
        assert_eq!(b.double(), b.scalar_mul(&two));
    }

    #[test]
    fn scalar_mul_by_one_and_zero() {
        let b = EdwardsPoint::base_point();
        assert_eq!(&b.scalar_mul(&Scalar::one()), b, "1*B = B");
        assert!(b.scalar_mul(&Scalar::zero()).is_identity(), "0*B = identity");
    }

    #[test]
    fn scalar_mul_result_on_curve() {
        let b = EdwardsPoint::base_point();
        let p = b.scalar_mul(&Scalar::from_u64(123456789));
        assert!(p.is_on_curve());
    }

    #[test]
    fn subgroup_order() {
        // L*B reduces to 0*B; (L-1)*B must be -B.
        let b = EdwardsPoint::base_point();
        assert!(b.mul_integer(group_order()).is_identity());
        let l_minus_one = group_order() - 1u32;
        assert_eq!(b.mul_integer(&l_minus_one), b.neg());
    }

    #[test]
    fn cofactor_matches_scalar_eight() {
        let b = EdwardsPoint::base_point();
        let p = b.scalar_mul(&Scalar::from_u64(77));
        assert_eq!(p.mul_by_cofactor(), p.mul_integer(&BigUint::from(8u8)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn scalar_mul_is_linear(k1 in any::<[u8; 32]>(), k2 in any::<[u8; 32]>()) {
            let b = EdwardsPoint::base_point();
            let k1 = Scalar::from_bytes_mod_order(&k1);
            let k2 = Scalar::from_bytes_mod_order(&k2);
            let lhs = b.scalar_mul(&k1.add(&k2));
            let rhs = b.scalar_mul(&k1).add(&b.scalar_mul(&k2));
            prop_assert_eq!(lhs, rhs);
        }
    }
}
