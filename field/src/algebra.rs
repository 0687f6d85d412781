//! The single trait shared by every algebraic element type in this crate.
//!
//! `Zp` (a prime field element) and `GFElement` (an extension field element)
//! have essentially nothing in common representation-wise: one is a
//! canonical residue, the other a reduced polynomial. But the polynomial
//! ring, its factorization pipeline, and the hyperelliptic curve group law
//! only ever need a handful of operations on their coefficient type, so
//! rather than writing `Polynomial` and `HyperellipticCurve` twice we write
//! them once, generic over this trait.

use core::fmt::{Debug, Display};
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_bigint::BigUint;
use rand::RngCore;

use crate::error::Result;

/// An element of a finite field (prime or extension).
///
/// Implementors are expected to be small, `Copy`-free value types that carry
/// a cheap, clonable reference to their parent field (see the `FiniteField`
/// and `GaloisField` descriptors), so that two elements can be checked for
/// membership in the same field before being combined.
pub trait FieldElement:
    Sized
    + Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + Neg<Output = Self>
{
    /// The field this element belongs to, used only to construct other
    /// elements of the same field (e.g. `self.zero_like()`).
    fn zero_like(&self) -> Self;

    /// The multiplicative identity of this element's field.
    fn one_like(&self) -> Self;

    /// `true` iff `self` is the additive identity.
    fn is_zero(&self) -> bool {
        *self == self.zero_like()
    }

    /// Checked addition. Infallible for field elements from the same parent;
    /// returns [`crate::Error::CrossAlgebra`] when `self` and `other` belong
    /// to different fields.
    fn checked_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction. See [`FieldElement::checked_add`].
    fn checked_sub(&self, other: &Self) -> Result<Self>;

    /// Checked multiplication. See [`FieldElement::checked_add`].
    fn checked_mul(&self, other: &Self) -> Result<Self>;

    /// Checked division. Returns [`crate::Error::DivideByZero`] when `other`
    /// is zero, [`crate::Error::CrossAlgebra`] on a parent mismatch.
    fn checked_div(&self, other: &Self) -> Result<Self>;

    /// The multiplicative inverse of `self`.
    ///
    /// Returns [`crate::Error::DivideByZero`] if `self` is zero.
    fn inverse(&self) -> Result<Self>;

    /// Exponentiation by an arbitrary-precision exponent, via square-and-multiply.
    fn pow_bigint(&self, exponent: &BigUint) -> Self {
        let mut result = self.one_like();
        let mut base = self.clone();
        let mut exp = exponent.clone();
        let two = BigUint::from(2u8);
        while exp > BigUint::from(0u8) {
            if &exp % &two == BigUint::from(1u8) {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp /= &two;
        }
        result
    }

    /// The characteristic `p` of this element's field.
    fn characteristic(&self) -> BigUint;

    /// The extension degree `m` over the prime field (`1` for `Zp` itself).
    fn extension_degree(&self) -> usize;

    /// `true` iff `self` and `other` are elements of the same field (or
    /// ring built over the same field), irrespective of value.
    fn same_parent(&self, other: &Self) -> bool;

    /// Samples a uniformly random element of this element's field, using
    /// `self` only to identify the field.
    fn sample_like(&self, rng: &mut dyn RngCore) -> Self;

    /// `true` iff `self` is zero or a quadratic residue of its field.
    fn is_quadratic_residue(&self) -> bool;

    /// Tonelli-Shanks square root.
    ///
    /// Returns [`crate::Error::NoSquareRoot`] if `self` is a non-residue.
    fn sqrt(&self, rng: &mut dyn RngCore) -> Result<Self>;

    /// Every element of this element's field, using `self` only to identify
    /// the field. Lazy, per Design Note "Generators vs eager lists" — large
    /// fields should not be forced to materialize a `Vec`.
    fn all_elements(&self) -> Box<dyn Iterator<Item = Self> + '_>;

    /// Embeds a small non-negative integer `n` into this element's field via
    /// repeated doubling, using `self` only to identify the field. Used by
    /// the curve layer's discriminant formula (`h(x)^2 + 4f(x)`), which
    /// needs the field's own `2` and `4` regardless of characteristic.
    fn small_int_like(&self, n: u64) -> Self {
        let mut result = self.zero_like();
        let mut addend = self.one_like();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = result + addend.clone();
            }
            addend = addend.clone() + addend;
            n >>= 1;
        }
        result
    }

    /// Formats `self` as the coefficient of `x^exponent` inside a
    /// [`crate::polynomial::Polynomial`]'s `Display` impl.
    ///
    /// The default wraps every non-trivial coefficient in parentheses, per
    /// spec's "polynomial with non-integer coefficients" string form.
    /// `Zp` overrides this to omit a leading `1` on non-constant terms,
    /// matching the bare integer-coefficient string form.
    fn fmt_as_poly_coeff(&self, f: &mut core::fmt::Formatter<'_>, exponent: usize) -> core::fmt::Result {
        if exponent == 0 {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}
