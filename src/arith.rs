//! Modular exponentiation and modular inverse over arbitrary-precision
//! integers. Everything else in the crate builds on these two operations.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::Error;

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// `modulus` must be >= 1 (panics on 0, there is no ring to reduce into).
/// `exponent == 0` yields `1 % modulus`, which is 0 when `modulus == 1`.
/// The result is always in `[0, modulus)`.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "mod_pow: modulus must be >= 1");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let bits = exponent.bits();
    for i in 0..bits {
        if exponent.bit(i) {
            result = &result * &base % modulus;
        }
        base = &base * &base % modulus;
    }
    result
}

/// Returns `x` with `value * x ≡ 1 (mod modulus)` and `0 <= x < modulus`,
/// via the iterative extended Euclidean algorithm.
///
/// Negative `value` is normalized into `[0, modulus)` before the
/// computation, so e.g. the inverse of -29 mod 27 is the inverse of 25.
/// Fails with [`Error::NoInverse`] when `gcd(value, modulus) != 1`.
pub fn mod_inverse(value: &BigInt, modulus: &BigUint) -> Result<BigUint, Error> {
    assert!(!modulus.is_zero(), "mod_inverse: modulus must be >= 1");
    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let normalized = value.mod_floor(&m);

    // Invariants: old_r = old_s*value + (...)*modulus, likewise for r/s.
    let mut old_r = normalized.clone();
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::NoInverse {
            value: normalized
                .to_biguint()
                .unwrap_or_else(|| BigUint::zero()),
            modulus: modulus.clone(),
        });
    }

    let inv = old_s.mod_floor(&m);
    // mod_floor with a positive modulus is non-negative
    Ok(inv.to_biguint().expect("normalized inverse is non-negative"))
}

/// `mod_inverse` over machine words, for the small matrix ring.
pub fn mod_inverse_u64(value: u64, modulus: u64) -> Result<u64, Error> {
    let inv = mod_inverse(&BigInt::from(value), &BigUint::from(modulus))?;
    // the result is < modulus, which fits
    let digits = inv.to_u64_digits();
    Ok(digits.first().copied().unwrap_or(0))
}

#[test]
fn test_mod_pow_matches_modpow() {
    let a = BigUint::from(12345u64);
    let e = BigUint::from(6789u64);
    let m = BigUint::from(99991u64);
    assert_eq!(mod_pow(&a, &e, &m), a.modpow(&e, &m));
}

#[test]
fn test_mod_pow_zero_exponent() {
    let zero = BigUint::zero();
    assert_eq!(
        mod_pow(&BigUint::from(7u8), &zero, &BigUint::from(13u8)),
        BigUint::one()
    );
    // modulus 1 collapses everything to 0
    assert_eq!(
        mod_pow(&BigUint::from(7u8), &zero, &BigUint::one()),
        BigUint::zero()
    );
    assert_eq!(
        mod_pow(&zero, &zero, &BigUint::from(5u8)),
        BigUint::one()
    );
}

#[test]
fn test_mod_inverse_roundtrip() {
    let m = BigUint::from(1_000_003u64);
    for v in [2u64, 3, 17, 65537, 999_999] {
        let value = BigInt::from(v);
        let inv = mod_inverse(&value, &m).unwrap();
        let check = BigUint::from(v) * &inv % &m;
        assert_eq!(check, BigUint::one(), "inverse of {} mod {}", v, m);
        assert!(inv < m);
    }
}

#[test]
fn test_mod_inverse_negative_value() {
    // -29 mod 27 = 25, and 25 * 13 = 325 = 12*27 + 1
    let inv = mod_inverse(&BigInt::from(-29), &BigUint::from(27u8)).unwrap();
    assert_eq!(inv, BigUint::from(13u8));
}

#[test]
fn test_mod_inverse_not_coprime() {
    let err = mod_inverse(&BigInt::from(6), &BigUint::from(27u8)).unwrap_err();
    assert_eq!(
        err,
        Error::NoInverse {
            value: BigUint::from(6u8),
            modulus: BigUint::from(27u8),
        }
    );
}

#[test]
fn test_mod_inverse_u64() {
    // det = 25 of the reference 2x2 Hill key, inverse mod 27
    let inv = mod_inverse_u64(25, 27).unwrap();
    assert_eq!(inv * 25 % 27, 1);
    assert!(mod_inverse_u64(12, 27).is_err());
}
