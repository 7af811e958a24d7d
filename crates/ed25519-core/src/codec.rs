// crates/ed25519-core/src/codec.rs
//
// Compressed point encoding (RFC 8032 §5.1.2 / §5.1.3).
//
// Encoding: y as 32 little-endian bytes, with bit 255 replaced by the low
// bit of x. Decoding recovers x from the curve equation:
//
//   x^2 = (y^2 - 1) / (d*y^2 + 1)
//
// and takes the square root with the p = 5 (mod 8) trick: the candidate
// (x^2)^((p+3)/8) is either a root or a root times sqrt(-1).

use num_bigint::BigUint;

use crate::curve::{edwards_d, fe, field_element, prime, sqrt_minus_one, EdwardsPoint};
use crate::error::{Error, Result};
use crate::field::FieldElement;

pub const ENCODED_POINT_LENGTH: usize = 32;

/// Encode a point as 32 bytes.
pub fn encode_point(point: &EdwardsPoint) -> [u8; ENCODED_POINT_LENGTH] {
    let mut out = [0u8; ENCODED_POINT_LENGTH];
    out.copy_from_slice(&point.y().to_bytes_le());
    if point.x().is_odd() {
        out[31] |= 0x80;
    }
    out
}

/// Decode 32 bytes into a point on the curve.
///
/// The y-coordinate is reduced mod p, as the reference decoder does, so
/// non-canonical encodings of y are accepted.
pub fn decode_point(bytes: &[u8]) -> Result<EdwardsPoint> {
    if bytes.len() != ENCODED_POINT_LENGTH {
        return Err(Error::InvalidEncoding("compressed point must be 32 bytes"));
    }

    let mut y_bytes = [0u8; ENCODED_POINT_LENGTH];
    y_bytes.copy_from_slice(bytes);
    let sign = y_bytes[31] >> 7 == 1;
    y_bytes[31] &= 0x7f;
    let y = field_element(BigUint::from_bytes_le(&y_bytes));

    let one = fe(1);
    let y2 = y.square();
    let x2 = y2
        .sub(&one)
        .div(&edwards_d().mul(&y2).add(&one))
        .ok_or(Error::InvalidEncoding("d*y^2 + 1 is zero"))?;

    let x = if x2.is_zero() {
        if sign {
            return Err(Error::InvalidEncoding("x = 0 cannot carry a sign bit"));
        }
        x2
    } else {
        square_root(&x2).ok_or(Error::InvalidEncoding("x^2 is not a square"))?
    };

    let x = if x.is_odd() != sign { x.neg() } else { x };

    EdwardsPoint::new(x, y)
}

/// Some square root of `x2`, or `None` if it is a non-residue.
fn square_root(x2: &FieldElement) -> Option<FieldElement> {
    let exponent = (prime().as_ref() + 3u32) >> 3u32;
    let candidate = x2.pow(&exponent);
    if &candidate.square() == x2 {
        return Some(candidate);
    }
    let candidate = candidate.mul(sqrt_minus_one());
    if &candidate.square() == x2 {
        return Some(candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;
    use proptest::prelude::*;

    #[test]
    fn base_point_encoding() {
        // RFC 8032: B encodes as 0x58 followed by 0x66 * 31.
        let mut expected = [0x66u8; 32];
        expected[0] = 0x58;
        assert_eq!(encode_point(EdwardsPoint::base_point()), expected);
    }

    #[test]
    fn identity_round_trip() {
        let id = EdwardsPoint::identity();
        let bytes = encode_point(&id);
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(bytes, expected);
        assert_eq!(decode_point(&bytes).unwrap(), id);
    }

    #[test]
    fn sign_bit_selects_negation() {
        let p = EdwardsPoint::base_point().scalar_mul(&Scalar::from_u64(9));
        let mut flipped = encode_point(&p);
        flipped[31] ^= 0x80;
        assert_eq!(decode_point(&flipped).unwrap(), p.neg());
    }

    #[test]
    fn wrong_lengths_rejected() {
        for len in [0usize, 31, 33, 64] {
            let buf = vec![0u8; len];
            assert!(
                matches!(decode_point(&buf), Err(Error::InvalidEncoding(_))),
                "length {len} must be rejected"
            );
        }
    }

    #[test]
    fn zero_x_with_sign_rejected() {
        // y = 1 gives x = 0; setting the sign bit is not a valid encoding.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        bytes[31] = 0x80;
        assert!(matches!(
            decode_point(&bytes),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn non_square_rejected() {
        // y = 2: x^2 = 3 / (4d + 1), which is not a quadratic residue mod p.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert!(matches!(
            decode_point(&bytes),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn y_above_prime_is_reduced() {
        // y = p + 1 reduces to y = 1, the identity; re-encoding is canonical.
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0xee;
        bytes[31] = 0x7f;
        let decoded = decode_point(&bytes).unwrap();
        assert_eq!(decoded, EdwardsPoint::identity());

        let mut canonical = [0u8; 32];
        canonical[0] = 1;
        assert_eq!(encode_point(&decoded), canonical);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn encode_decode_round_trip(k in any::<[u8; 32]>()) {
            let p = EdwardsPoint::base_point().scalar_mul(&Scalar::from_bytes_mod_order(&k));
            let decoded = decode_point(&encode_point(&p)).unwrap();
            prop_assert_eq!(decoded, p);
        }
    }
}
