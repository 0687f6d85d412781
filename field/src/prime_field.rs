//! The prime field `Z_p`, of arbitrary characteristic `p`.
//!
//! `FiniteField` is the parent descriptor (it owns `p` and nothing else);
//! `Zp` is an element, carrying a cheap `Rc`-shared clone of its parent so
//! that two elements can be checked for membership in the same field before
//! being combined, mirroring the Python original's `ZP.gf` back-reference.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::algebra::FieldElement;
use crate::bigint;
use crate::curve::HyperellipticCurve;
use crate::error::{Error, Result};
use crate::extension::GaloisField;
use crate::polynomial::Polynomial;

#[derive(Debug)]
struct FiniteFieldInner {
    p: BigUint,
}

/// The field `Z_p` for a prime `p`.
///
/// Cloning a `FiniteField` is an `Rc` bump, not a copy of `p`; two
/// `FiniteField`s compare equal (and elements drawn from them interoperate)
/// iff they carry the same modulus, not iff they're the same `Rc` instance.
#[derive(Debug, Clone)]
pub struct FiniteField(Rc<FiniteFieldInner>);

impl PartialEq for FiniteField {
    fn eq(&self, other: &Self) -> bool {
        self.0.p == other.0.p
    }
}
impl Eq for FiniteField {}

impl fmt::Display for FiniteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Finite Field mod {}", self.0.p)
    }
}

impl FiniteField {
    /// Constructs `Z_p`. Returns [`Error::InvalidParameter`] if `p` is not
    /// prime.
    pub fn new(p: BigUint) -> Result<Self> {
        if !bigint::is_prime_default(&p) {
            return Err(Error::InvalidParameter(format!("{p} is not prime")));
        }
        Ok(Self(Rc::new(FiniteFieldInner { p })))
    }

    /// The characteristic `p`.
    pub fn p(&self) -> &BigUint {
        &self.0.p
    }

    /// The additive identity.
    pub fn zero(&self) -> Zp {
        self.element(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one(&self) -> Zp {
        self.element(BigUint::one())
    }

    /// Builds the element `value mod p`.
    pub fn element(&self, value: impl Into<BigUint>) -> Zp {
        let value = value.into() % &self.0.p;
        Zp { field: self.clone(), value }
    }

    /// All `p` elements of the field, in ascending order. Note that for
    /// cryptographically-sized `p` this is not something you would want to
    /// materialize; it exists for parity with small, illustrative fields.
    pub fn get_elements(&self) -> impl Iterator<Item = Zp> + '_ {
        let p = self.0.p.clone();
        let mut i = BigUint::zero();
        core::iter::from_fn(move || {
            if i >= p {
                None
            } else {
                let v = i.clone();
                i += BigUint::one();
                Some(self.element(v))
            }
        })
    }

    /// Builds the polynomial `F_p[x]` with the given coefficients, most
    /// significant first.
    pub fn poly(&self, coeffs: Vec<Zp>) -> Polynomial<Zp> {
        Polynomial::new(coeffs)
    }

    /// Builds the extension field `F_p[x] / (polynomial)`. `polynomial`
    /// must be irreducible over `F_p`.
    pub fn extension(&self, polynomial: Polynomial<Zp>) -> Result<GaloisField> {
        GaloisField::new(self.clone(), polynomial)
    }

    /// Builds the hyperelliptic curve `y^2 + h(x)y = f(x)` over this field.
    pub fn hyperelliptic(
        &self,
        h: Polynomial<Zp>,
        f: Polynomial<Zp>,
    ) -> Result<HyperellipticCurve<Zp>> {
        HyperellipticCurve::new(h, f)
    }

    /// A uniformly random element.
    pub fn rand_element(&self, rng: &mut dyn RngCore) -> Zp {
        let bound = BigInt::from(self.0.p.clone());
        let value = loop {
            let mut bytes = vec![0u8; ((self.0.p.bits() + 7) / 8) as usize];
            rng.fill_bytes(&mut bytes);
            let candidate = BigUint::from_bytes_le(&bytes);
            if BigInt::from(candidate.clone()) < bound {
                break candidate;
            }
        };
        self.element(value)
    }

    /// A random polynomial of degree at most `deg`.
    pub fn rand_poly(&self, deg: usize, rng: &mut dyn RngCore) -> Polynomial<Zp> {
        self.poly((0..=deg).map(|_| self.rand_element(rng)).collect())
    }

    /// A uniformly random monic, irreducible polynomial of degree `deg`,
    /// resampling until Rabin's test accepts.
    pub fn rand_irreducible_poly(&self, deg: usize, rng: &mut dyn RngCore) -> Polynomial<Zp> {
        loop {
            let mut coeffs = vec![self.one()];
            coeffs.extend((0..deg).map(|_| self.rand_element(rng)));
            let candidate = self.poly(coeffs);
            if candidate.is_irreducible(rng) {
                return candidate;
            }
            log::trace!("rand_irreducible_poly: resampling degree {deg} candidate");
        }
    }
}

/// An element of `Z_p`, represented by its canonical residue `0 <= value < p`.
#[derive(Debug, Clone)]
pub struct Zp {
    field: FiniteField,
    value: BigUint,
}

impl Zp {
    /// The field this element belongs to.
    pub fn field(&self) -> &FiniteField {
        &self.field
    }

    /// The canonical residue in `[0, p)`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    fn same_field_or_err(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::CrossAlgebra(format!(
                "{} and {} belong to different prime fields",
                self.field, other.field
            )));
        }
        Ok(())
    }

    /// Euclidean GCD of the canonical residues (not a field operation;
    /// mirrors `ZP.gcd` of the Python original, used internally by modular
    /// inverse computations).
    pub fn gcd(&self, other: &Self) -> Result<Zp> {
        self.same_field_or_err(other)?;
        Ok(self.field.element(self.value.gcd(&other.value)))
    }

    /// Plain integer `divmod` of the canonical representatives, *not* field
    /// division. Used by Euclidean/extended-Euclidean routines that need
    /// the quotient, not the field inverse.
    pub fn divmod(&self, other: &Self) -> Result<(Zp, Zp)> {
        self.same_field_or_err(other)?;
        let (q, r) = self.value.div_rem(&other.value);
        Ok((self.field.element(q), self.field.element(r)))
    }

    /// Legendre symbol, represented as `1` (residue), `0` (zero) or `p - 1`
    /// (non-residue), matching `pow(self, (p-1)/2)`.
    pub fn legendre(&self) -> Zp {
        let exponent = (&self.field.0.p - BigUint::one()) / BigUint::from(2u8);
        self.pow_bigint(&exponent)
    }

    /// `true` iff `self` is zero or a quadratic residue.
    pub fn is_quadratic_residue(&self) -> bool {
        self.is_zero() || self.legendre() == self.field.one()
    }

    /// Tonelli-Shanks square root. Returns [`Error::NoSquareRoot`] if `self`
    /// is a non-residue.
    pub fn sqrt(&self, rng: &mut dyn RngCore) -> Result<Zp> {
        if !self.is_quadratic_residue() {
            return Err(Error::NoSquareRoot(self.to_string()));
        }
        if self.is_zero() {
            return Ok(self.field.zero());
        }

        let p = self.field.0.p.clone();
        let mut q = &p - BigUint::one();
        let mut s: u32 = 0;
        while q.is_even() {
            q /= BigUint::from(2u8);
            s += 1;
        }

        if s == 1 {
            let exponent = (&p + BigUint::one()) / BigUint::from(4u8);
            return Ok(self.pow_bigint(&exponent));
        }

        let mut z = self.field.one();
        while z.is_quadratic_residue() {
            z = self.field.rand_element(rng);
        }

        let mut c = z.pow_bigint(&q);
        let mut t = self.pow_bigint(&q);
        let mut r = self.pow_bigint(&((&q + BigUint::one()) / BigUint::from(2u8)));
        let mut m = s;

        let one = self.field.one();
        while t != one {
            let mut i = 1u32;
            let mut t2i = t.checked_mul(&t)?;
            while t2i != one {
                t2i = t2i.checked_mul(&t2i)?;
                i += 1;
            }
            let b_exp = BigUint::from(2u8).pow(m - i - 1);
            let b = c.pow_bigint(&b_exp);
            m = i;
            c = b.checked_mul(&b)?;
            t = t.checked_mul(&c)?;
            r = r.checked_mul(&b)?;
        }
        Ok(r)
    }
}

impl FieldElement for Zp {
    fn zero_like(&self) -> Self {
        self.field.zero()
    }

    fn one_like(&self) -> Self {
        self.field.one()
    }

    fn checked_add(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        Ok(self.field.element(&self.value + &other.value))
    }

    fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        let p = &self.field.0.p;
        let diff = (BigInt::from(self.value.clone()) - BigInt::from(other.value.clone())
            + BigInt::from(p.clone()))
            % BigInt::from(p.clone());
        Ok(self.field.element(diff.to_biguint().expect("non-negative by construction")))
    }

    fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        Ok(self.field.element(&self.value * &other.value))
    }

    fn checked_div(&self, other: &Self) -> Result<Self> {
        self.same_field_or_err(other)?;
        self.checked_mul(&other.inverse()?)
    }

    fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivideByZero);
        }
        let (gcd, s, _t) = extended_gcd(&self.value, &self.field.0.p);
        if gcd != BigUint::one() {
            return Err(Error::DivideByZero);
        }
        let p = BigInt::from(self.field.0.p.clone());
        let s = ((s % &p) + &p) % &p;
        Ok(self.field.element(s.to_biguint().expect("reduced modulo p")))
    }

    fn characteristic(&self) -> BigUint {
        self.field.0.p.clone()
    }

    fn extension_degree(&self) -> usize {
        1
    }

    fn same_parent(&self, other: &Self) -> bool {
        self.field == other.field
    }

    fn sample_like(&self, rng: &mut dyn RngCore) -> Self {
        self.field.rand_element(rng)
    }

    fn is_quadratic_residue(&self) -> bool {
        Zp::is_quadratic_residue(self)
    }

    fn sqrt(&self, rng: &mut dyn RngCore) -> Result<Self> {
        Zp::sqrt(self, rng)
    }

    fn all_elements(&self) -> Box<dyn Iterator<Item = Self> + '_> {
        Box::new(self.field.get_elements())
    }

    fn fmt_as_poly_coeff(&self, f: &mut fmt::Formatter<'_>, exponent: usize) -> fmt::Result {
        if exponent == 0 || *self != self.one_like() {
            write!(f, "{self}")
        } else {
            Ok(())
        }
    }
}

/// Extended Euclidean algorithm over `BigInt`, returning `(gcd, s, t)` with
/// `s * a + t * b == gcd`.
fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let (mut r0, mut r1) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let q = &r0 / &r1;
        (r0, r1) = (r1.clone(), &r0 - &q * &r1);
        (s0, s1) = (s1.clone(), &s0 - &q * &s1);
        (t0, t1) = (t1.clone(), &t0 - &q * &t1);
    }
    (r0.to_biguint().expect("gcd of non-negative inputs is non-negative"), s0, t0)
}

impl PartialEq for Zp {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value
    }
}
impl Eq for Zp {}

impl core::hash::Hash for Zp {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Zp {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        if self.field != other.field {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

impl fmt::Display for Zp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

macro_rules! forward_checked_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for Zp {
            type Output = Zp;
            fn $method(self, other: Self) -> Zp {
                self.$checked(&other).expect("operand mismatch")
            }
        }
        impl $trait for &Zp {
            type Output = Zp;
            fn $method(self, other: Self) -> Zp {
                self.$checked(other).expect("operand mismatch")
            }
        }
    };
}

forward_checked_op!(Add, add, checked_add);
forward_checked_op!(Sub, sub, checked_sub);
forward_checked_op!(Mul, mul, checked_mul);
forward_checked_op!(Div, div, checked_div);

impl Neg for Zp {
    type Output = Zp;
    fn neg(self) -> Zp {
        if self.is_zero() {
            self
        } else {
            self.field.element(&self.field.0.p - &self.value)
        }
    }
}
impl Neg for &Zp {
    type Output = Zp;
    fn neg(self) -> Zp {
        self.clone().neg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn f11() -> FiniteField {
        FiniteField::new(BigUint::from(11u32)).unwrap()
    }

    #[test]
    fn rejects_composite_modulus() {
        assert!(FiniteField::new(BigUint::from(10u32)).is_err());
    }

    #[test]
    fn arithmetic_wraps_mod_p() {
        let f = f11();
        let a = f.element(7u32);
        let b = f.element(9u32);
        assert_eq!((a.clone() + b.clone()).value(), &BigUint::from(5u32));
        assert_eq!((a.clone() * b.clone()).value(), &BigUint::from(8u32));
        assert_eq!((a.clone() - b.clone()).value(), &BigUint::from(9u32));
    }

    #[test]
    fn inverse_round_trips() {
        let f = f11();
        for v in 1u32..11 {
            let a = f.element(v);
            let inv = a.inverse().unwrap();
            assert_eq!((a * inv).value(), &BigUint::one());
        }
    }

    #[test]
    fn cross_field_ops_error() {
        let a = FiniteField::new(BigUint::from(11u32)).unwrap().element(3u32);
        let b = FiniteField::new(BigUint::from(13u32)).unwrap().element(3u32);
        assert!(a.checked_add(&b).is_err());
    }

    #[test]
    fn sqrt_of_residue() {
        let f = f11();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 4 is a QR mod 11 (2^2 = 4).
        let four = f.element(4u32);
        let root = four.sqrt(&mut rng).unwrap();
        assert_eq!((root.clone() * root).value(), &BigUint::from(4u32));
    }

    #[test]
    fn sqrt_of_non_residue_errors() {
        let f = f11();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // 2 is a non-residue mod 11.
        assert!(f.element(2u32).sqrt(&mut rng).is_err());
    }
}
