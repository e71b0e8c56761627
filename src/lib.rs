//! modring — the shared numeric substrate behind classical-cryptosystem
//! demos (ElGamal encryption/signatures, DSA, the Hill cipher).
//!
//! Four pieces, leaf-first:
//! - [`arith`]: modular exponentiation and modular inverse over
//!   arbitrary-precision integers.
//! - [`primality`]: Miller–Rabin probable-prime testing, parameterized by
//!   round count and a caller-supplied seeded generator.
//! - [`prime_search`]: reproducible search for primes with an exact decimal
//!   digit count, distinct prime pairs, DSA-style `p = t*q + 1` primes, and
//!   group generators.
//! - [`matrix`]: determinant / adjugate / inverse / product over integers
//!   modulo a fixed ring size, with the column-major block packing the Hill
//!   cipher uses, and the 27-letter alphabet ring.
//!
//! Everything is a pure function of its inputs; randomness is always an
//! explicitly passed generator, so fixed seeds reproduce fixed outputs and
//! independent searches can run concurrently on separately seeded
//! generators. None of this is hardened cryptography: arithmetic is not
//! constant time and the primes are exam-sized by design.

pub mod arith;
pub mod error;
pub mod matrix;
pub mod primality;
pub mod prime_search;

pub use arith::{mod_inverse, mod_pow};
pub use error::Error;
pub use matrix::{pack_vector, unpack_matrix, RingMatrix};
pub use primality::is_probable_prime;
pub use prime_search::{
    find_distinct_prime_pair, find_dsa_primes, find_prime_with_digits, SearchPolicy,
};

#[test]
fn test_hill_cipher_end_to_end() {
    use crate::matrix::alphabet;

    let key = RingMatrix::from_rows(&[vec![3, 5], vec![7, 2]], alphabet::RING_SIZE);
    assert!(key.is_invertible(), "demo key must be valid mod 27");

    let plain = alphabet::text_to_nums("HOLAÑ").unwrap();
    let blocks = pack_vector(&plain, key.rows(), alphabet::PADDING, alphabet::RING_SIZE);

    let cipher_blocks = key.multiply_mod(&blocks).unwrap();
    let key_inv = key.inverse().unwrap();
    let recovered_blocks = key_inv.multiply_mod(&cipher_blocks).unwrap();

    let recovered = unpack_matrix(&recovered_blocks);
    // the round trip returns the plaintext plus its padding
    assert_eq!(&recovered[..plain.len()], &plain[..]);
    assert_eq!(recovered.len() % key.rows(), 0);
    assert_eq!(alphabet::nums_to_text(&recovered[..plain.len()]), "HOLAÑ");
}

#[test]
fn test_elgamal_over_the_substrate() {
    use num_bigint::{BigInt, BigUint, RandBigInt};
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // group parameters the way the demo layer builds them
    let p = find_prime_with_digits(4, 2026, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(2026);
    let g = prime_search::find_group_generator(&p, &mut rng);

    // keygen: y = g^x mod p
    let one = BigUint::one();
    let x = rng.gen_biguint_range(&one, &(&p - 1u8));
    let y = mod_pow(&g, &x, &p);

    // encrypt m: c1 = g^k, c2 = m * y^k
    let m = BigUint::from(123u8);
    let k = rng.gen_biguint_range(&one, &(&p - 1u8));
    let c1 = mod_pow(&g, &k, &p);
    let c2 = &m * mod_pow(&y, &k, &p) % &p;

    // decrypt: m = c2 * (c1^x)^-1
    let s = mod_pow(&c1, &x, &p);
    let s_inv = mod_inverse(&BigInt::from(s), &p).unwrap();
    let recovered = c2 * s_inv % &p;
    assert_eq!(recovered, m);
}

#[test]
fn test_dsa_signature_over_the_substrate() {
    use num_bigint::{BigInt, BigUint, RandBigInt};
    use num_traits::{One, Zero};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let prime_search::DsaPrimes { p, q, .. } = find_dsa_primes(3, 2025, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(2025);
    let g = prime_search::find_subgroup_generator(&p, &q, &mut rng);

    let one = BigUint::one();
    let x = rng.gen_biguint_range(&one, &q);
    let y = mod_pow(&g, &x, &p);

    // sign hash h: r = (g^k mod p) mod q, s = k^-1 (h + x r) mod q
    let h = BigUint::from(9876u16) % &q;
    let (r, s) = loop {
        let k = rng.gen_biguint_range(&one, &q);
        let r = mod_pow(&g, &k, &p) % &q;
        if r.is_zero() {
            continue;
        }
        let k_inv = mod_inverse(&BigInt::from(k), &q).unwrap();
        let s = k_inv * (&h + &x * &r) % &q;
        if s.is_zero() {
            continue;
        }
        break (r, s);
    };

    // verify: w = s^-1 mod q, v = (g^(h w) y^(r w) mod p) mod q == r
    let w = mod_inverse(&BigInt::from(s), &q).unwrap();
    let u1 = &h * &w % &q;
    let u2 = &r * &w % &q;
    let v = mod_pow(&g, &u1, &p) * mod_pow(&y, &u2, &p) % &p % &q;
    assert_eq!(v, r);
}
