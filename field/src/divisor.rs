//! Divisors on the Jacobian of a [`HyperellipticCurve`], in Mumford
//! representation, with Cantor's composition + reduction algorithm.
//!
//! Mirrors `divisor.py`'s `Divisor` class: a reduced semi-reduced divisor
//! `(u, v)` with `u` monic, `deg v < deg u <= g`, `u | v^2 + vh - f`.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::RngCore;

use crate::algebra::FieldElement;
use crate::curve::{HyperellipticCurve, Point};
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;

/// Exact polynomial division: `a / b`, asserting (in debug builds) that the
/// remainder is zero. Cantor's algorithm guarantees every division it
/// performs is exact; a nonzero remainder here would mean a bug in the
/// surrounding arithmetic, not a legitimate error case (spec.md §4.6
/// "Failure semantics").
fn exact_div<E: FieldElement>(a: &Polynomial<E>, b: &Polynomial<E>) -> Result<Polynomial<E>> {
    let (q, r) = a.checked_divmod(b)?;
    debug_assert!(r.is_zero(), "expected {b} to divide {a} exactly, remainder {r}");
    Ok(q)
}

/// A reduced divisor on the Jacobian of a hyperelliptic curve, in Mumford
/// representation `(u, v)`.
#[derive(Debug, Clone)]
pub struct Divisor<E: FieldElement> {
    curve: HyperellipticCurve<E>,
    u: Polynomial<E>,
    v: Polynomial<E>,
}

impl<E: FieldElement> fmt::Display for Divisor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(u, v) = ({}, {})", self.u, self.v)
    }
}

impl<E: FieldElement> PartialEq for Divisor<E> {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.u == other.u && self.v == other.v
    }
}
impl<E: FieldElement> Eq for Divisor<E> {}

impl<E: FieldElement> Divisor<E> {
    fn same_curve_or_err(&self, other: &Self) -> Result<()> {
        if self.curve != other.curve {
            return Err(Error::CrossAlgebra(format!("{self} and {other} are on different curves")));
        }
        Ok(())
    }

    /// Constructs `(u, v)` directly, validating the Mumford invariants:
    /// `u` monic, `deg v < deg u <= g`, `u | v^2 + vh - f`.
    pub fn new(curve: HyperellipticCurve<E>, u: Polynomial<E>, v: Polynomial<E>) -> Result<Self> {
        if *u.leading_coeff() != u.leading_coeff().one_like() {
            return Err(Error::InvalidParameter(format!("{u} is not monic")));
        }
        if !v.is_zero() && v.degree() >= u.degree() {
            return Err(Error::InvalidParameter(format!("deg v ({v}) must be < deg u ({u})")));
        }
        if u.degree() > curve.genus() {
            return Err(Error::InvalidParameter(format!(
                "deg u = {} exceeds the genus {}",
                u.degree(),
                curve.genus()
            )));
        }
        let rhs = v.checked_mul(&v)?.checked_add(&v.checked_mul(curve.h())?)?.checked_sub(curve.f())?;
        if !rhs.checked_rem(&u)?.is_zero() {
            return Err(Error::InvalidParameter(format!(
                "{u} does not divide v^2 + vh - f for v = {v}"
            )));
        }
        Ok(Self { curve, u, v })
    }

    /// The identity divisor `(1, 0)`.
    pub fn zero(curve: HyperellipticCurve<E>) -> Self {
        let one = curve.f().one_like();
        let zero = curve.f().zero_like();
        Self { curve, u: one, v: zero }
    }

    /// The defining curve.
    pub fn curve(&self) -> &HyperellipticCurve<E> {
        &self.curve
    }

    /// The Mumford `u` polynomial.
    pub fn u(&self) -> &Polynomial<E> {
        &self.u
    }

    /// The Mumford `v` polynomial.
    pub fn v(&self) -> &Polynomial<E> {
        &self.v
    }

    /// `true` iff `self` is the identity `(1, 0)`.
    pub fn is_identity(&self) -> bool {
        self.u.is_const() && *self.u.leading_coeff() == self.u.leading_coeff().one_like()
    }

    /// Builds the divisor supported on `points` (length should be the
    /// curve's genus `g`; `Point::Infinity` entries pad the support and
    /// contribute a factor of 1 to `u`).
    ///
    /// `u` is the product of `(x - x_i)` over the finite points (with
    /// multiplicity); `v` is the Lagrange interpolant through the *distinct*
    /// finite support points, reduced mod `u`, per spec.md §4.6.
    pub fn from_points(curve: HyperellipticCurve<E>, points: &[Point<E>]) -> Result<Self> {
        let one = curve.f().one_like();
        let finite: Vec<(E, E)> = points
            .iter()
            .filter_map(|p| match p {
                Point::Affine(x, y) => Some((x.clone(), y.clone())),
                Point::Infinity => None,
            })
            .collect();

        let mut u = one.clone();
        for (x, _) in &finite {
            let factor = Polynomial::new(vec![x.one_like(), -x.clone()]);
            u = u.checked_mul(&factor)?;
        }

        let mut distinct: Vec<(E, E)> = Vec::new();
        for (x, y) in &finite {
            if !distinct.iter().any(|(dx, _)| dx == x) {
                distinct.push((x.clone(), y.clone()));
            }
        }

        let v = if distinct.is_empty() {
            curve.f().zero_like()
        } else {
            lagrange_interpolate(&distinct)?.checked_rem(&u)?
        };

        Self::new(curve, u, v)
    }

    /// Recovers the support points from `(u, v)`: factors `u`, and for each
    /// root `r` evaluates `y = v(r)`, choosing whichever of `(r, y)` /
    /// its inverse actually lies on the curve. Pads with `Infinity` to
    /// length `g`.
    ///
    /// Returns [`Error::NotInSupport`] if `u` has an irreducible factor of
    /// degree `> 1` (a non-`F`-rational support point).
    pub fn points(&self, rng: &mut dyn RngCore) -> Result<Vec<Point<E>>> {
        let mut result = Vec::new();
        // `u = 1` (the identity) has no prime factors, so `factors()`
        // naturally yields an empty list and the loop below is a no-op.
        for factor in self.u.factors(rng)? {
            if factor.degree() != 1 {
                return Err(Error::NotInSupport(format!(
                    "{} has an irreducible factor {factor} of degree > 1",
                    self.u
                )));
            }
            // Monic linear factor `x + c`: the root is `-c`.
            let root = -factor.coeffs()[1].clone();
            let y = self.v.eval(&root);
            let h_root = self.curve.h().eval(&root);
            let f_root = self.curve.f().eval(&root);
            let lhs = y.checked_mul(&y)?.checked_add(&y.checked_mul(&h_root)?)?;
            if lhs == f_root {
                result.push(Point::Affine(root, y));
            } else {
                result.push(Point::Affine(root.clone(), -y - h_root));
            }
        }
        while result.len() < self.curve.genus() {
            result.push(Point::Infinity);
        }
        Ok(result)
    }

    /// Cantor's composition + reduction: the group law on the Jacobian.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.same_curve_or_err(other)?;
        if self.is_identity() {
            return Ok(other.clone());
        }
        if other.is_identity() {
            return Ok(self.clone());
        }

        let curve = self.curve.clone();
        let (u1, v1) = (&self.u, &self.v);
        let (u2, v2) = (&other.u, &other.v);

        let (d1, e1, e2) = u1.xgcd(u2)?;
        let sum_v = v1.checked_add(v2)?.checked_add(curve.h())?;
        let (d, c1, c2) = d1.xgcd(&sum_v)?;

        let s1 = c1.checked_mul(&e1)?;
        let s2 = c1.checked_mul(&e2)?;
        let s3 = c2;

        let d_squared = d.checked_mul(&d)?;
        let u = exact_div(&u1.checked_mul(u2)?, &d_squared)?.to_monic()?;

        let term1 = s1.checked_mul(u1)?.checked_mul(v2)?;
        let term2 = s2.checked_mul(u2)?.checked_mul(v1)?;
        let term3 = s3.checked_mul(&v1.checked_mul(v2)?.checked_add(curve.f())?)?;
        let v_numerator = term1.checked_add(&term2)?.checked_add(&term3)?;
        let v = exact_div(&v_numerator, &d)?.checked_rem(&u)?;

        Self::reduce(curve, u, v)
    }

    /// Repeatedly applies the reduction step until `deg u <= g`.
    fn reduce(curve: HyperellipticCurve<E>, mut u: Polynomial<E>, mut v: Polynomial<E>) -> Result<Self> {
        let g = curve.genus();
        while u.degree() > g {
            let numerator = curve
                .f()
                .checked_sub(&v.checked_mul(curve.h())?)?
                .checked_sub(&v.checked_mul(&v)?)?;
            let mut u_new = exact_div(&numerator, &u)?;
            let v_new = (-curve.h().clone()).checked_sub(&v)?.checked_rem(&u_new)?;
            u_new = u_new.to_monic()?;
            u = u_new;
            v = v_new;
        }
        Ok(Self { curve, u: u.to_monic()?, v })
    }

    /// `-D = (u, -v - h mod u)`.
    pub fn checked_negate(&self) -> Result<Self> {
        let v = (-self.curve.h().clone()).checked_sub(&self.v)?.checked_rem(&self.u)?;
        Ok(Self { curve: self.curve.clone(), u: self.u.clone(), v })
    }

    /// Scalar multiplication by double-and-add. Negative `n` negates `self`
    /// first and multiplies by `|n|`.
    pub fn checked_scalar_mul(&self, n: &BigInt) -> Result<Self> {
        if n.is_negative() {
            return self.checked_negate()?.checked_scalar_mul(&(-n));
        }
        let mut result = Self::zero(self.curve.clone());
        let mut base = self.clone();
        let mut k = n.to_biguint().expect("non-negative by construction");
        while k > BigUint::zero() {
            if k.is_odd() {
                result = result.checked_add(&base)?;
            }
            base = base.checked_add(&base)?;
            k >>= 1u32;
        }
        Ok(result)
    }

    /// A uniformly random divisor, built from `g` independent random points
    /// of the curve.
    pub fn get_random_divisor(curve: HyperellipticCurve<E>, rng: &mut dyn RngCore) -> Result<Self> {
        let genus = curve.genus();
        let mut points = Vec::with_capacity(genus);
        for _ in 0..genus {
            points.push(curve.get_random_point(rng)?);
        }
        Self::from_points(curve, &points)
    }
}

/// Lagrange interpolation through distinct `(x_i, y_i)` pairs: the unique
/// polynomial of degree `< points.len()` with `v(x_i) = y_i` for every `i`.
fn lagrange_interpolate<E: FieldElement>(points: &[(E, E)]) -> Result<Polynomial<E>> {
    let mut result = Polynomial::new(vec![points[0].0.zero_like()]);
    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut numerator = Polynomial::new(vec![xi.one_like()]);
        let mut denom = xi.one_like();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let factor = Polynomial::new(vec![xj.one_like(), -xj.clone()]);
            numerator = numerator.checked_mul(&factor)?;
            denom = denom.checked_mul(&xi.checked_sub(xj)?)?;
        }
        let coefficient = yi.checked_mul(&denom.inverse()?)?;
        result = result.checked_add(&numerator.scale(&coefficient)?)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime_field::FiniteField;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spec_curve() -> HyperellipticCurve<crate::prime_field::Zp> {
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let f = f11.poly(vec![
            f11.one(),
            f11.zero(),
            f11.element(3u32),
            f11.element(7u32),
            f11.one(),
            f11.element(2u32),
        ]);
        let h = f11.poly(vec![f11.zero()]);
        f11.hyperelliptic(h, f).unwrap()
    }

    #[test]
    fn identity_is_additive_identity() {
        let curve = spec_curve();
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let u1 = f11.poly(vec![f11.one(), f11.element(7u32), f11.element(10u32)]);
        let v1 = f11.poly(vec![f11.one(), f11.element(9u32)]);
        let d1 = Divisor::new(curve.clone(), u1, v1).unwrap();
        let zero = Divisor::zero(curve);
        assert_eq!(zero.checked_add(&d1).unwrap(), d1);
        assert_eq!(d1.checked_add(&zero).unwrap(), d1);
    }

    #[test]
    fn spec_addition_example() {
        let curve = spec_curve();
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let u1 = f11.poly(vec![f11.one(), f11.element(7u32), f11.element(10u32)]);
        let v1 = f11.poly(vec![f11.one(), f11.element(9u32)]);
        let d1 = Divisor::new(curve.clone(), u1, v1).unwrap();

        let u2 = f11.poly(vec![f11.one(), f11.zero(), f11.element(10u32)]);
        let v2 = f11.poly(vec![f11.element(7u32), f11.element(9u32)]);
        let d2 = Divisor::new(curve.clone(), u2, v2).unwrap();

        let sum = d1.checked_add(&d2).unwrap();
        let expected_u = f11.poly(vec![f11.one(), f11.element(10u32)]);
        let expected_v = f11.poly(vec![f11.element(6u32)]);
        assert_eq!(sum.u(), &expected_u);
        assert_eq!(sum.v(), &expected_v);
    }

    #[test]
    fn addition_is_commutative() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let d1 = Divisor::get_random_divisor(curve.clone(), &mut rng).unwrap();
        let d2 = Divisor::get_random_divisor(curve, &mut rng).unwrap();
        assert_eq!(d1.checked_add(&d2).unwrap(), d2.checked_add(&d1).unwrap());
    }

    #[test]
    fn negation_cancels() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let d = Divisor::get_random_divisor(curve.clone(), &mut rng).unwrap();
        let neg = d.checked_negate().unwrap();
        let sum = d.checked_add(&neg).unwrap();
        assert!(sum.is_identity());
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        let d = Divisor::get_random_divisor(curve.clone(), &mut rng).unwrap();
        let mut repeated = Divisor::zero(curve);
        for _ in 0..5 {
            repeated = repeated.checked_add(&d).unwrap();
        }
        let scaled = d.checked_scalar_mul(&BigInt::from(5)).unwrap();
        assert_eq!(scaled, repeated);
    }
}
