//! A polynomial ring `F[x]` over an arbitrary [`FieldElement`].
//!
//! Generic over the coefficient type so that the whole ring — Euclidean
//! division, GCD/XGCD, derivative, modular exponentiation, and (in
//! [`factorization`]) the full factorization pipeline — is written once and
//! shared between `Polynomial<Zp>` and `Polynomial<GFElement>`.
//!
//! Coefficients are stored most-significant-first, matching the `coeff`
//! list of the original `Polynomial` class; the zero polynomial is
//! represented as the single-element list `[0]`, never the empty list.

pub mod factorization;

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::algebra::FieldElement;
use crate::error::{Error, Result};

/// A polynomial with coefficients in `E`, most-significant term first.
#[derive(Debug, Clone)]
pub struct Polynomial<E: FieldElement> {
    coeffs: Vec<E>,
    /// Display-only symbol for the indeterminate (`"x"` by default; the
    /// extension field prints its elements' representative with `"a"`, per
    /// spec.md's string-form rules). Never affects equality or arithmetic.
    symbol: String,
}

impl<E: FieldElement> Polynomial<E> {
    /// Builds a polynomial from coefficients, most significant first,
    /// stripping leading zero coefficients. Panics if `coeffs` is empty.
    pub fn new(coeffs: Vec<E>) -> Self {
        assert!(!coeffs.is_empty(), "a polynomial needs at least one coefficient");
        let first_nonzero = coeffs.iter().position(|c| !c.is_zero());
        let coeffs = match first_nonzero {
            Some(i) => coeffs[i..].to_vec(),
            None => vec![coeffs.into_iter().next().unwrap().zero_like()],
        };
        Self { coeffs, symbol: "x".to_string() }
    }

    /// Returns `self` relabeled with a different display symbol. Purely
    /// cosmetic: never affects equality, hashing, or arithmetic.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Degree of the polynomial. The zero polynomial has degree `0`, same
    /// as the original (`len(coeff) - 1` when `coeff == [0]`).
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// The leading (most-significant) coefficient.
    pub fn leading_coeff(&self) -> &E {
        &self.coeffs[0]
    }

    /// Coefficients, most significant first.
    pub fn coeffs(&self) -> &[E] {
        &self.coeffs
    }

    /// `true` iff `self` is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.leading_coeff().is_zero()
    }

    /// `true` iff `self` has degree `0` (includes the zero polynomial).
    pub fn is_const(&self) -> bool {
        self.degree() == 0
    }

    /// The zero polynomial over the same field as `self`.
    pub fn zero_like(&self) -> Self {
        Self::new(vec![self.leading_coeff().zero_like()])
    }

    /// The constant polynomial `1` over the same field as `self`.
    pub fn one_like(&self) -> Self {
        Self::new(vec![self.leading_coeff().one_like()])
    }

    /// Casts a degree-0 polynomial to its constant term.
    ///
    /// Returns [`Error::TypeMismatch`] if `self` has positive degree.
    pub fn to_scalar(&self) -> Result<E> {
        if !self.is_const() {
            return Err(Error::TypeMismatch(format!(
                "cannot cast non-constant polynomial {self} to a scalar"
            )));
        }
        Ok(self.leading_coeff().clone())
    }

    /// Divides through by the leading coefficient, so that it becomes `1`.
    pub fn to_monic(&self) -> Result<Self> {
        let lc = self.leading_coeff().clone();
        if lc == lc.one_like() {
            return Ok(self.clone());
        }
        self.scale(&lc.inverse()?)
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&self, c: &E) -> Result<Self> {
        let coeffs = self
            .coeffs
            .iter()
            .map(|x| x.checked_mul(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(coeffs))
    }

    /// Adds an element `n - 1` times to itself via double-and-add, i.e.
    /// computes `c * n` for a small non-negative integer weight `n`.
    fn scale_by_small_int(c: &E, n: usize) -> E {
        let mut result = c.zero_like();
        let mut addend = c.clone();
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

    /// The formal derivative.
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return self.zero_like();
        }
        let deg = self.degree();
        let coeffs = self.coeffs[..deg]
            .iter()
            .enumerate()
            .map(|(i, c)| Self::scale_by_small_int(c, deg - i))
            .collect();
        Self::new(coeffs)
    }

    /// Horner evaluation at `x`.
    pub fn eval(&self, x: &E) -> E {
        self.coeffs
            .iter()
            .fold(x.zero_like(), |acc, c| acc * x.clone() + c.clone())
    }

    fn same_field_or_err(&self, other: &Self) -> Result<()> {
        if !self.leading_coeff().same_parent(other.leading_coeff()) {
            return Err(Error::CrossAlgebra(format!(
                "{self} and {other} are defined over different fields"
            )));
        }
        Ok(())
    }

    /// Checked addition.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        let zero = self.leading_coeff().zero_like();
        let size = self.degree().max(other.degree());
        let pad = |p: &Self| -> Vec<E> {
            let mut v = vec![zero.clone(); size - p.degree()];
            v.extend(p.coeffs.iter().cloned());
            v
        };
        let a = pad(self);
        let b = pad(other);
        let coeffs = a
            .into_iter()
            .zip(b)
            .map(|(x, y)| x.checked_add(&y))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(coeffs))
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.checked_add(&other.checked_neg()?)
    }

    fn checked_neg(&self) -> Result<Self> {
        Ok(Self::new(self.coeffs.iter().map(|c| -c.clone()).collect()))
    }

    /// Checked multiplication (schoolbook convolution).
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        let zero = self.leading_coeff().zero_like();
        let mut result = vec![zero; self.degree() + other.degree() + 1];
        for (e1, c1) in self.coeffs.iter().enumerate() {
            for (e2, c2) in other.coeffs.iter().enumerate() {
                let product = c1.checked_mul(c2)?;
                result[e1 + e2] = result[e1 + e2].checked_add(&product)?;
            }
        }
        Ok(Self::new(result))
    }

    /// Euclidean division: returns `(quotient, remainder)`.
    ///
    /// Returns [`Error::DivideByZero`] if `other` is the zero polynomial.
    pub fn checked_divmod(&self, other: &Self) -> Result<(Self, Self)> {
        self.same_field_or_err(other)?;
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.degree() < other.degree() {
            return Ok((self.zero_like(), self.clone()));
        }
        if other.is_const() {
            let inv = other.leading_coeff().inverse()?;
            return Ok((self.scale(&inv)?, self.zero_like()));
        }

        let one = self.leading_coeff().one_like();
        let zero = self.leading_coeff().zero_like();
        let mut remainder = self.clone();
        let mut quotient = Self::new(vec![zero.clone()]);

        while !remainder.is_zero() && other.degree() <= remainder.degree() {
            let t = remainder.leading_coeff().checked_div(other.leading_coeff())?;
            let shift = remainder.degree() - other.degree();
            let mut m_coeffs = vec![zero.clone(); shift];
            m_coeffs.push(one.clone());
            let m = Self::new(m_coeffs);
            let t_poly = Self::new(vec![t.clone()]);
            let term = t_poly.checked_mul(&m)?;
            quotient = quotient.checked_add(&term)?;
            remainder = remainder.checked_sub(&other.checked_mul(&term)?)?;
        }
        Ok((quotient, remainder))
    }

    /// The remainder of Euclidean division (`self % other`).
    pub fn checked_rem(&self, other: &Self) -> Result<Self> {
        Ok(self.checked_divmod(other)?.1)
    }

    /// The quotient of Euclidean division (`self // other`).
    pub fn checked_div_poly(&self, other: &Self) -> Result<Self> {
        Ok(self.checked_divmod(other)?.0)
    }

    /// Euclidean GCD, normalized to be monic.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        let (mut r1, mut r0) = (self.clone(), other.clone());
        while !r0.is_zero() {
            let rem = r1.checked_rem(&r0)?;
            (r1, r0) = (r0, rem);
        }
        r1.to_monic()
    }

    /// Extended Euclidean algorithm: returns `(gcd, s, t)` with
    /// `s * self + t * other == gcd`, `gcd` monic.
    pub fn xgcd(&self, other: &Self) -> Result<(Self, Self, Self)> {
        let (mut r1, mut r0) = (self.clone(), other.clone());
        let (mut s1, mut s0) = (self.one_like(), self.zero_like());
        let (mut t1, mut t0) = (self.zero_like(), self.one_like());

        while !r0.is_zero() {
            let q = r1.checked_div_poly(&r0)?;
            (r1, r0) = (r0.clone(), r1.checked_sub(&q.checked_mul(&r0)?)?);
            (s1, s0) = (s0.clone(), s1.checked_sub(&q.checked_mul(&s0)?)?);
            (t1, t0) = (t0.clone(), t1.checked_sub(&q.checked_mul(&t0)?)?);
        }

        let lc = r1.leading_coeff().clone();
        if lc != lc.one_like() {
            let inv = lc.inverse()?;
            r1 = r1.scale(&inv)?;
            s1 = s1.scale(&inv)?;
            t1 = t1.scale(&inv)?;
        }
        Ok((r1, s1, t1))
    }

    /// Modular exponentiation: `self^exponent mod modulus`, `exponent` an
    /// arbitrary-precision integer (field sizes `p^k` can exceed `u64`).
    pub fn pow_mod(&self, exponent: &BigUint, modulus: &Self) -> Result<Self> {
        let mut result = self.one_like();
        let mut base = self.checked_rem(modulus)?;
        let mut exp = exponent.clone();
        let two = BigUint::from(2u8);
        while exp > BigUint::zero() {
            if &exp % &two == BigUint::one() {
                result = result.checked_mul(&base)?.checked_rem(modulus)?;
            }
            base = base.checked_mul(&base)?.checked_rem(modulus)?;
            exp /= &two;
        }
        Ok(result)
    }

    /// A uniformly random polynomial of degree at most `deg`, sampled
    /// coefficient-wise, using `self` only to identify the field.
    pub fn rand(&self, deg: usize, rng: &mut dyn RngCore) -> Self {
        let template = self.leading_coeff().clone();
        Self::new((0..=deg).map(|_| template.sample_like(rng)).collect())
    }
}

impl<E: FieldElement> PartialEq for Polynomial<E> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}
impl<E: FieldElement> Eq for Polynomial<E> {}

impl<E: FieldElement> fmt::Display for Polynomial<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let last = self.degree();
        let mut first_term = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let exp = last - i;
            if !first_term {
                write!(f, " + ")?;
            }
            first_term = false;
            c.fmt_as_poly_coeff(f, exp)?;
            if exp == 1 {
                write!(f, "{}", self.symbol)?;
            } else if exp > 1 {
                write!(f, "{}^{exp}", self.symbol)?;
            }
        }
        Ok(())
    }
}

macro_rules! forward_checked_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<E: FieldElement> $trait for Polynomial<E> {
            type Output = Polynomial<E>;
            fn $method(self, other: Self) -> Polynomial<E> {
                self.$checked(&other).expect("operand mismatch")
            }
        }
    };
}

forward_checked_op!(Add, add, checked_add);
forward_checked_op!(Sub, sub, checked_sub);
forward_checked_op!(Mul, mul, checked_mul);

impl<E: FieldElement> Neg for Polynomial<E> {
    type Output = Polynomial<E>;
    fn neg(self) -> Polynomial<E> {
        self.checked_neg().expect("negation cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime_field::FiniteField;
    use num_bigint::BigUint;

    fn f11() -> FiniteField {
        FiniteField::new(BigUint::from(11u32)).unwrap()
    }

    #[test]
    fn strips_leading_zeros() {
        let f = f11();
        let p = Polynomial::new(vec![f.zero(), f.zero(), f.element(3u32)]);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.leading_coeff(), &f.element(3u32));
    }

    #[test]
    fn division_recovers_dividend() {
        let f = f11();
        // x^2 + 1 divided by x + 1
        let a = f.poly(vec![f.one(), f.zero(), f.one()]);
        let b = f.poly(vec![f.one(), f.one()]);
        let (q, r) = a.checked_divmod(&b).unwrap();
        let recovered = q.checked_mul(&b).unwrap().checked_add(&r).unwrap();
        assert_eq!(recovered, a);
    }

    #[test]
    fn gcd_of_coprime_is_one() {
        let f = f11();
        let a = f.poly(vec![f.one(), f.zero()]); // x
        let b = f.poly(vec![f.one(), f.one()]); // x + 1
        let g = a.gcd(&b).unwrap();
        assert!(g.is_const());
        assert_eq!(g.to_scalar().unwrap(), f.one());
    }

    #[test]
    fn eval_matches_horner() {
        let f = f11();
        // x^2 + 2x + 3 at x = 5 => 25+10+3=38 = 5 mod 11
        let p = f.poly(vec![f.one(), f.element(2u32), f.element(3u32)]);
        assert_eq!(p.eval(&f.element(5u32)), f.element(5u32));
    }
}
