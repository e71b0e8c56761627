//! Seeded search for primes with an exact decimal digit count, plus the
//! group-parameter helpers built on top of it (distinct prime pairs,
//! DSA-style `p = t*q + 1` primes, multiplicative-group generators).
//!
//! All searches draw from an explicitly seeded generator, so a fixed
//! `(seed, rounds, policy)` triple reproduces the same output on every run.

use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::primality::is_probable_prime;

/// Default Miller–Rabin round count for searches.
pub const DEFAULT_ROUNDS: u32 = 16;

/// Cap on candidates tested under [`SearchPolicy::Redraw`] before the
/// search gives up instead of looping forever.
const MAX_REDRAWS: u64 = 100_000;

/// How a failed candidate is replaced.
///
/// The two strategies produce differently distributed primes: scanning
/// forward lands on the first prime after a single random starting point
/// (biased toward primes that follow large gaps, and cheap), while
/// redrawing keeps every attempt uniform over the digit range. Both are
/// deliberate options rather than one being a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPolicy {
    /// Advance by +2 from a random odd starting point, wrapping once to the
    /// bottom of the digit range. Sweeps each odd candidate at most once,
    /// so the search is bounded by the range size.
    #[default]
    ScanForward,
    /// Draw a fresh uniform candidate after every failure, up to a fixed
    /// attempt cap.
    Redraw,
}

/// Finds a probable prime with exactly `digit_count` decimal digits,
/// reproducibly from `seed`, using the default [`SearchPolicy::ScanForward`].
///
/// `rounds` is the Miller–Rabin round count ([`DEFAULT_ROUNDS`] is plenty
/// for demo-sized primes). Fails with [`Error::InvalidDigitCount`] when
/// `digit_count < 1`.
pub fn find_prime_with_digits(digit_count: u32, seed: u64, rounds: u32) -> Result<BigUint, Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    find_prime_with_digits_using(digit_count, rounds, SearchPolicy::default(), &mut rng)
}

/// Policy- and RNG-explicit form of [`find_prime_with_digits`].
pub fn find_prime_with_digits_using<R: Rng>(
    digit_count: u32,
    rounds: u32,
    policy: SearchPolicy,
    rng: &mut R,
) -> Result<BigUint, Error> {
    if digit_count < 1 {
        return Err(Error::InvalidDigitCount { digit_count });
    }
    // The odd-candidate scan below can never land on 2, and the range is
    // tiny anyway, so 1-digit primes are drawn from the full set directly.
    // This also keeps distinct 1-digit pairs reachable.
    if digit_count == 1 {
        const ONE_DIGIT_PRIMES: [u8; 4] = [2, 3, 5, 7];
        let pick = ONE_DIGIT_PRIMES[rng.gen_range(0..ONE_DIGIT_PRIMES.len())];
        return Ok(BigUint::from(pick));
    }

    let low = BigUint::from(10u8).pow(digit_count - 1);
    let high = BigUint::from(10u8).pow(digit_count) - 1u8;

    match policy {
        SearchPolicy::ScanForward => scan_forward(&low, &high, digit_count, rounds, rng),
        SearchPolicy::Redraw => redraw(&low, &high, digit_count, rounds, rng),
    }
}

fn scan_forward<R: Rng>(
    low: &BigUint,
    high: &BigUint,
    digit_count: u32,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint, Error> {
    let mut start = rng.gen_biguint_range(low, &(high + 1u8));
    if (&start % 2u8).is_zero() {
        start += 1u8;
        if &start > high {
            // smallest odd in range (low is a power of ten, hence even here)
            start = low + 1u8;
        }
    }

    let mut tested = 0u64;
    let mut candidate = start.clone();
    while &candidate <= high {
        tested += 1;
        if is_probable_prime(&candidate, rounds, rng) {
            debug!("scan-forward hit after {} candidates: {}", tested, candidate);
            return Ok(candidate);
        }
        candidate += 2u8;
    }
    // Wrap once and scan back up to the starting point.
    candidate = low + 1u8;
    while candidate < start {
        tested += 1;
        if is_probable_prime(&candidate, rounds, rng) {
            debug!("scan-forward hit after wrap, {} candidates: {}", tested, candidate);
            return Ok(candidate);
        }
        candidate += 2u8;
    }
    // Unreachable for any real digit range, but the sweep is bounded.
    Err(Error::SearchExhausted {
        digit_count,
        attempts: tested,
    })
}

fn redraw<R: Rng>(
    low: &BigUint,
    high: &BigUint,
    digit_count: u32,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint, Error> {
    for attempt in 1..=MAX_REDRAWS {
        let mut candidate = rng.gen_biguint_range(low, &(high + 1u8));
        if (&candidate % 2u8).is_zero() {
            candidate += 1u8;
            if &candidate > high {
                candidate = low + 1u8;
            }
        }
        if is_probable_prime(&candidate, rounds, rng) {
            debug!("redraw hit after {} draws: {}", attempt, candidate);
            return Ok(candidate);
        }
    }
    Err(Error::SearchExhausted {
        digit_count,
        attempts: MAX_REDRAWS,
    })
}

/// Finds two *distinct* probable primes, each with exactly `digit_count`
/// decimal digits, reproducibly from `seed`.
///
/// Each prime gets its own sub-seed derived from a master generator, so the
/// two searches stay independent (and could run on separate threads with
/// the same result).
pub fn find_distinct_prime_pair(
    digit_count: u32,
    seed: u64,
    rounds: u32,
) -> Result<(BigUint, BigUint), Error> {
    let mut master = StdRng::seed_from_u64(seed);
    let p = find_prime_with_digits(digit_count, master.gen(), rounds)?;
    loop {
        let q = find_prime_with_digits(digit_count, master.gen(), rounds)?;
        if q != p {
            return Ok((p, q));
        }
        debug!("prime pair collision on {}, redrawing sub-seed", p);
    }
}

/// DSA-style group primes: a small prime `q` and a larger prime
/// `p = t * q + 1`, so that `q` divides `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPrimes {
    pub p: BigUint,
    pub q: BigUint,
    /// The cofactor with `p = t * q + 1`.
    pub t: u64,
}

/// Searches for [`DsaPrimes`] with `q` of exactly `q_digits` digits.
///
/// `q` comes from the digit-targeted search; `p` is found by drawing the
/// cofactor `t` uniformly from `[2, 10_000)` until `t*q + 1` is a probable
/// prime. Cofactors that small keep the numbers exam-sized.
pub fn find_dsa_primes(q_digits: u32, seed: u64, rounds: u32) -> Result<DsaPrimes, Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let q = find_prime_with_digits_using(q_digits, rounds, SearchPolicy::default(), &mut rng)?;

    for _ in 0..MAX_REDRAWS {
        let t = rng.gen_range(2u64..10_000);
        let p = &q * t + 1u8;
        if is_probable_prime(&p, rounds, &mut rng) {
            debug!("dsa primes: q = {}, t = {}, p = {}", q, t, p);
            return Ok(DsaPrimes { p, q, t });
        }
    }
    Err(Error::SearchExhausted {
        digit_count: q_digits,
        attempts: MAX_REDRAWS,
    })
}

/// Proposes a generator of the multiplicative group mod an odd prime `p`:
/// draws `g` uniformly from `[2, p)` until `g^((p-1)/2) mod p != 1`, i.e.
/// until `g` is a quadratic non-residue. Half of the group qualifies, so
/// the expected number of draws is 2.
pub fn find_group_generator<R: Rng>(p: &BigUint, rng: &mut R) -> BigUint {
    let two = BigUint::from(2u8);
    let exp = (p - 1u8) / &two;
    loop {
        let g = rng.gen_biguint_range(&two, p);
        if !crate::arith::mod_pow(&g, &exp, p).is_one() {
            return g;
        }
    }
}

/// Builds a generator of the order-`q` subgroup mod `p` (requires
/// `q | p - 1`, as produced by [`find_dsa_primes`]): draws `h` from
/// `[2, p-1)` and returns `g = h^((p-1)/q) mod p` once `g > 1`.
pub fn find_subgroup_generator<R: Rng>(p: &BigUint, q: &BigUint, rng: &mut R) -> BigUint {
    let exp = (p - 1u8) / q;
    loop {
        let h = rng.gen_biguint_range(&BigUint::from(2u8), &(p - 1u8));
        let g = crate::arith::mod_pow(&h, &exp, p);
        if g > BigUint::one() {
            return g;
        }
    }
}

#[cfg(test)]
fn digit_len(n: &BigUint) -> usize {
    n.to_string().len()
}

#[test]
fn test_find_prime_is_deterministic() {
    let _ = env_logger::builder().is_test(true).try_init();
    let a = find_prime_with_digits(4, 2026, 16).unwrap();
    let b = find_prime_with_digits(4, 2026, 16).unwrap();
    assert_eq!(a, b);
    assert_eq!(digit_len(&a), 4);
}

#[test]
fn test_find_prime_digit_counts() {
    for digits in [2u32, 3, 5, 8] {
        let p = find_prime_with_digits(digits, 42, 16).unwrap();
        assert_eq!(digit_len(&p), digits as usize, "prime {}", p);
        let mut check_rng = StdRng::seed_from_u64(999);
        assert!(is_probable_prime(&p, 16, &mut check_rng));
    }
}

#[test]
fn test_find_prime_one_digit_and_invalid() {
    for seed in 0..8 {
        let p = find_prime_with_digits(1, seed, 16).unwrap();
        assert!([2u8, 3, 5, 7].map(BigUint::from).contains(&p));
        assert_eq!(p, find_prime_with_digits(1, seed, 16).unwrap());
    }
    assert_eq!(
        find_prime_with_digits(0, 5, 16).unwrap_err(),
        Error::InvalidDigitCount { digit_count: 0 }
    );
}

#[test]
fn test_distinct_pair_of_one_digit_primes() {
    let (p, q) = find_distinct_prime_pair(1, 3, 16).unwrap();
    assert_ne!(p, q);
}

#[test]
fn test_redraw_policy_finds_primes() {
    let mut rng = StdRng::seed_from_u64(2025);
    let p = find_prime_with_digits_using(4, 16, SearchPolicy::Redraw, &mut rng).unwrap();
    assert_eq!(digit_len(&p), 4);
    let mut check_rng = StdRng::seed_from_u64(0);
    assert!(is_probable_prime(&p, 16, &mut check_rng));
}

#[test]
fn test_distinct_prime_pair() {
    for seed in [1u64, 2026, 77] {
        let (p, q) = find_distinct_prime_pair(3, seed, 16).unwrap();
        assert_ne!(p, q);
        assert_eq!(digit_len(&p), 3);
        assert_eq!(digit_len(&q), 3);
    }
}

#[test]
fn test_dsa_primes_divisibility() {
    let DsaPrimes { p, q, t } = find_dsa_primes(3, 2025, 16).unwrap();
    assert_eq!(digit_len(&q), 3);
    assert!(((&p - 1u8) % &q).is_zero(), "q must divide p - 1");
    assert_eq!(&q * t + 1u8, p);
}

#[test]
fn test_group_generator_is_nonresidue() {
    let p = find_prime_with_digits(4, 2026, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(2026);
    let g = find_group_generator(&p, &mut rng);
    assert!(g >= BigUint::from(2u8) && g < p);
    let exp = (&p - 1u8) / BigUint::from(2u8);
    assert!(!crate::arith::mod_pow(&g, &exp, &p).is_one());
}

#[test]
fn test_subgroup_generator_has_order_q() {
    let DsaPrimes { p, q, .. } = find_dsa_primes(2, 7, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let g = find_subgroup_generator(&p, &q, &mut rng);
    assert!(g > BigUint::one());
    // g^q = (h^((p-1)/q))^q = h^(p-1) = 1 mod p
    assert!(crate::arith::mod_pow(&g, &q, &p).is_one());
}
