//! Miller–Rabin probabilistic primality testing.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use crate::arith::mod_pow;

/// Trial-division prefilter. Any candidate divisible by one of these is
/// composite unless it is the prime itself.
const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Miller–Rabin probabilistic primality test.
///
/// Runs `rounds` independent witness rounds, each drawing `a` uniformly
/// from `[2, n-2]` out of `rng`. A `false` result is always correct; a
/// `true` result is wrong with probability at most `4^(-rounds)`, so this
/// reports *probable* primality, never certainty.
///
/// Candidates up to 30 are fully decided by the small-prime shortcut, which
/// also keeps the witness range `[2, n-2]` from ever being empty.
pub fn is_probable_prime<R: Rng>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u8);
    if n < &two {
        return false;
    }
    for &p in &SMALL_PRIMES {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        // gen_biguint_range samples [low, high), so this is [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 0..s.saturating_sub(1) {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[test]
fn test_small_primes_and_composites() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    let mut rng = StdRng::seed_from_u64(7);
    for p in [2u64, 3, 5, 29, 31, 97, 7919] {
        assert!(
            is_probable_prime(&BigUint::from(p), 8, &mut rng),
            "{} should test prime",
            p
        );
    }
    for c in [0u64, 1, 4, 9, 33, 91, 7917] {
        assert!(
            !is_probable_prime(&BigUint::from(c), 8, &mut rng),
            "{} should test composite",
            c
        );
    }
}

#[test]
fn test_carmichael_number_rejected() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    // 561 = 3*11*17 fools the Fermat test but not Miller-Rabin
    let mut rng = StdRng::seed_from_u64(1);
    assert!(!is_probable_prime(&BigUint::from(561u32), 1, &mut rng));
    assert!(!is_probable_prime(&BigUint::from(561u32), 16, &mut rng));
}

#[test]
fn test_large_known_prime() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    let mut rng = StdRng::seed_from_u64(42);
    // 2^61 - 1, a Mersenne prime
    let p = (BigUint::one() << 61) - 1u8;
    assert!(is_probable_prime(&p, 16, &mut rng));
    // its square is composite
    assert!(!is_probable_prime(&(&p * &p), 16, &mut rng));
}
