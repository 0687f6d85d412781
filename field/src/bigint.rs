//! Arbitrary-precision integer utilities: primality testing and integer
//! factorization.
//!
//! These stand in for `utils.is_prime`/`utils.factor`/`utils.factors` of the
//! Python original, generalized from fixed-width `u64` to [`BigUint`] the
//! way the rest of this crate generalizes the teacher's `u64`-only field
//! arithmetic.

use log::{debug, trace};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;

use hyperelliptic_util::SMALL_PRIMES;

use crate::error::{Error, Result};

/// Number of independent witnesses tried per Miller-Rabin round. The
/// original used 32; arbitrary-precision moduli warrant the same margin.
const MILLER_RABIN_ROUNDS: u32 = 32;

/// The smoothness bound Pollard's p-1 is allowed to escalate to before
/// giving up, mirroring the Python original's hard-coded `max_bound = 1000`.
const MAX_SMOOTHNESS_BOUND: u64 = 1000;

fn rand_biguint_below(rng: &mut dyn RngCore, bound: &BigUint) -> BigUint {
    let bits = bound.bits();
    loop {
        let mut bytes = vec![0u8; ((bits + 7) / 8) as usize];
        rng.fill_bytes(&mut bytes);
        let candidate = BigUint::from_bytes_le(&bytes);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Miller-Rabin primality test with an explicit random source.
pub fn is_prime(n: &BigUint, rng: &mut dyn RngCore) -> bool {
    let two = BigUint::from(2u8);
    let three = BigUint::from(3u8);
    if *n < two {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let n_minus_1 = n - BigUint::one();
    let mut r: u32 = 0;
    let mut s = n_minus_1.clone();
    while s.is_even() {
        s >>= 1u32;
        r += 1;
    }

    'witness: for round in 0..MILLER_RABIN_ROUNDS {
        let a = &two + rand_biguint_below(rng, &(n - &three));
        let mut x = a.modpow(&s, n);
        trace!("miller-rabin round {round}: witness base chosen, x0 computed");
        if x == BigUint::one() || x == n_minus_1 {
            continue;
        }
        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        debug!("miller-rabin: {n} found composite after {round} rounds");
        return false;
    }
    true
}

/// [`is_prime`] seeded from [`rand::rngs::OsRng`].
pub fn is_prime_default(n: &BigUint) -> bool {
    is_prime(n, &mut rand::rngs::OsRng)
}

/// Pollard's p-1 factorization of a single non-trivial factor of `n`,
/// escalating the smoothness bound geometrically until one is found or the
/// [`MAX_SMOOTHNESS_BOUND`] is exceeded.
///
/// Returns `n` itself unchanged if `n` is already prime.
fn pollard_p_minus_1(n: &BigUint, smoothness_bound: u64, rng: &mut dyn RngCore) -> Result<BigUint> {
    if is_prime(n, rng) {
        return Ok(n.clone());
    }
    if smoothness_bound > MAX_SMOOTHNESS_BOUND {
        return Err(Error::UnfactorableInteger(n.to_string()));
    }
    debug!("pollard p-1: factoring {n} with smoothness bound {smoothness_bound}");

    let mut m = BigUint::one();
    for &p in SMALL_PRIMES.iter().filter(|&&p| p <= smoothness_bound) {
        let mut power = 1u64;
        while power.saturating_mul(p) <= smoothness_bound {
            power *= p;
        }
        let exponent = (power as f64).log(p as f64).floor() as u32;
        m *= BigUint::from(p).pow(exponent);
    }

    let a = if n.is_even() {
        BigUint::from(3u8)
    } else {
        BigUint::from(2u8)
    };
    let am = a.modpow(&m, n);
    // `(am + n - 1) % n` computes `am - 1` modulo `n` without underflowing
    // when `am == 0`.
    let am_minus_1 = (am + n - BigUint::one()) % n;
    let g = am_minus_1.gcd(n);

    if g > BigUint::one() && g < *n {
        return Ok(g);
    }
    if g == BigUint::one() {
        return pollard_p_minus_1(n, smoothness_bound * 2, rng);
    }
    Err(Error::UnfactorableInteger(n.to_string()))
}

/// Returns the full (with-multiplicity) factorization of `n` into prime
/// factors, peeling one non-trivial factor off at a time with
/// [`pollard_p_minus_1`].
pub fn factors(n: &BigUint, rng: &mut dyn RngCore) -> Result<Vec<BigUint>> {
    let mut result = Vec::new();
    let mut remaining = n.clone();
    while remaining > BigUint::one() {
        let factor = pollard_p_minus_1(&remaining, 1, rng)?;
        result.push(factor.clone());
        remaining /= factor;
    }
    Ok(result)
}

/// [`factors`] seeded from [`rand::rngs::OsRng`].
pub fn factors_default(n: &BigUint) -> Result<Vec<BigUint>> {
    factors(n, &mut rand::rngs::OsRng)
}
