//! Small numeric helpers with no dependency on the rest of the core.
//!
//! Mirrors `plonky2_util`'s role in the teacher workspace: a grab-bag of
//! bit-twiddling helpers kept in their own crate so that `hyperelliptic_field`
//! doesn't have to pull its few non-algebraic utilities into `lib.rs`.

use num_bigint::BigUint;

/// `ceil(a / b)` for unsigned integers.
pub const fn ceil_div_usize(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Bit length of `n`, i.e. the number of bits needed to represent `n` in
/// binary (`0` has bit length `0`).
pub fn bits_biguint(n: &BigUint) -> usize {
    n.bits() as usize
}

/// The first few primes, used as a small factor base when escalating
/// Pollard's p-1 smoothness bound. The degrees of the polynomials Rabin's
/// irreducibility test factors are tiny, so this table never needs to be
/// large; it exists only because the original implementation imported an
/// equivalent constant table rather than computing primes on the fly.
pub const SMALL_PRIMES: &[u64] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229,
];
