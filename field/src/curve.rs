//! The imaginary hyperelliptic curve `C: y^2 + h(x)y = f(x)` over a field
//! `F`, and the affine/infinity points that lie on it.
//!
//! Mirrors `hyperelliptic_curve.py`'s `HyperellipticCurve` class: validates
//! the curve parameters at construction, and provides point enumeration and
//! sampling used by [`crate::divisor`]'s `from_points`/`get_random_divisor`.

use core::fmt;
use std::rc::Rc;

use num_bigint::BigUint;
use rand::RngCore;

use crate::algebra::FieldElement;
use crate::error::{Error, Result};
use crate::polynomial::Polynomial;

#[derive(Debug)]
struct HyperellipticCurveInner<E: FieldElement> {
    h: Polynomial<E>,
    f: Polynomial<E>,
    genus: usize,
}

/// `C: y^2 + h(x)y = f(x)`, `f` monic of odd degree `2g+1`, `deg h <= g`.
///
/// Cloning is an `Rc` bump; two curves compare equal iff their `h` and `f`
/// are equal, irrespective of `Rc` identity.
#[derive(Debug)]
pub struct HyperellipticCurve<E: FieldElement>(Rc<HyperellipticCurveInner<E>>);

impl<E: FieldElement> Clone for HyperellipticCurve<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E: FieldElement> PartialEq for HyperellipticCurve<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0.h == other.0.h && self.0.f == other.0.f
    }
}
impl<E: FieldElement> Eq for HyperellipticCurve<E> {}

impl<E: FieldElement> fmt::Display for HyperellipticCurve<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C: y^2 + ({})y = {}", self.0.h, self.0.f)
    }
}

/// A point on a [`HyperellipticCurve`]: an affine pair or the point at
/// infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point<E: FieldElement> {
    Affine(E, E),
    Infinity,
}

impl<E: FieldElement> HyperellipticCurve<E> {
    /// Validates and constructs the curve `y^2 + h(x)y = f(x)`.
    ///
    /// Returns [`Error::InvalidParameter`] if `f` is not monic, `deg f` is
    /// even, `deg h` exceeds the genus, or `h != 0` while the field's
    /// characteristic is not 2 (this implementation only supports the
    /// imaginary model in odd characteristic, per spec.md's Non-goals: no
    /// even-characteristic curves).
    pub fn new(h: Polynomial<E>, f: Polynomial<E>) -> Result<Self> {
        if *f.leading_coeff() != f.leading_coeff().one_like() {
            return Err(Error::InvalidParameter(format!("{f} is not monic")));
        }
        if f.degree() % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "deg f = {} must be odd (f = {f})",
                f.degree()
            )));
        }
        let genus = (f.degree() - 1) / 2;
        if !h.is_zero() && h.degree() > genus {
            return Err(Error::InvalidParameter(format!(
                "deg h = {} exceeds the genus {genus}",
                h.degree()
            )));
        }
        let characteristic = f.leading_coeff().characteristic();
        if characteristic != BigUint::from(2u8) && !h.is_zero() {
            return Err(Error::InvalidParameter(
                "h must be zero unless the field has characteristic 2".to_string(),
            ));
        }
        Ok(Self(Rc::new(HyperellipticCurveInner { h, f, genus })))
    }

    /// The defining polynomial `h`.
    pub fn h(&self) -> &Polynomial<E> {
        &self.0.h
    }

    /// The defining polynomial `f`.
    pub fn f(&self) -> &Polynomial<E> {
        &self.0.f
    }

    /// The genus `g = (deg f - 1) / 2`.
    pub fn genus(&self) -> usize {
        self.0.genus
    }

    /// `(x, -y - h(x))`; `point_inverse(Infinity) = Infinity`.
    pub fn point_inverse(&self, point: &Point<E>) -> Point<E> {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine(x, y) => {
                let h_x = self.0.h.eval(x);
                Point::Affine(x.clone(), -y.clone() - h_x)
            }
        }
    }

    /// The two (or one, if they coincide) affine points above `x`, if any.
    ///
    /// Characteristic `!= 2`: `D = h(x)^2 + 4f(x)`; no point exists if `D`
    /// is not a quadratic residue. Otherwise `y = (-h(x) +- sqrt(D)) / 2`.
    fn points_above(&self, x: &E, rng: &mut dyn RngCore) -> Result<Vec<Point<E>>> {
        let h_x = self.0.h.eval(x);
        let f_x = self.0.f.eval(x);
        let four = x.small_int_like(4);
        let discriminant = h_x.checked_mul(&h_x)?.checked_add(&four.checked_mul(&f_x)?)?;
        if !discriminant.is_quadratic_residue() {
            return Ok(Vec::new());
        }
        let s = discriminant.sqrt(rng)?;
        let two = x.small_int_like(2);
        let y_plus = (-h_x.clone() + s.clone()).checked_div(&two)?;
        let y_minus = (-h_x - s).checked_div(&two)?;
        if y_plus == y_minus {
            Ok(vec![Point::Affine(x.clone(), y_plus)])
        } else {
            Ok(vec![Point::Affine(x.clone(), y_plus), Point::Affine(x.clone(), y_minus)])
        }
    }

    /// All points of the curve: `Infinity` followed by every affine point,
    /// in ascending order of `x` (as enumerated by `E::all_elements`).
    pub fn get_all_points(&self, rng: &mut dyn RngCore) -> Result<Vec<Point<E>>> {
        let template = self.0.f.leading_coeff().clone();
        let mut points = vec![Point::Infinity];
        for x in template.all_elements() {
            points.extend(self.points_above(&x, rng)?);
        }
        Ok(points)
    }

    /// [`HyperellipticCurve::get_all_points`] seeded from
    /// [`rand::rngs::OsRng`].
    pub fn get_all_points_default(&self) -> Result<Vec<Point<E>>> {
        self.get_all_points(&mut rand::rngs::OsRng)
    }

    /// A uniformly random affine point, found by rejection-sampling `x`
    /// until its discriminant is a quadratic residue.
    ///
    /// Per spec.md §9's Open-Question resolution, `Infinity` is excluded
    /// here (it is the identity divisor's sole support point and would
    /// dominate sampling of a genus-1 curve's small point sets); it remains
    /// part of [`HyperellipticCurve::get_all_points`].
    pub fn get_random_point(&self, rng: &mut dyn RngCore) -> Result<Point<E>> {
        let template = self.0.f.leading_coeff().clone();
        loop {
            let x = template.sample_like(rng);
            let candidates = self.points_above(&x, rng)?;
            if let Some(point) = candidates.into_iter().next() {
                return Ok(point);
            }
        }
    }

    /// Builds the divisor `(u, v)` on this curve. See
    /// [`crate::divisor::Divisor::new`].
    pub fn divisor(&self, u: Polynomial<E>, v: Polynomial<E>) -> Result<crate::divisor::Divisor<E>> {
        crate::divisor::Divisor::new(self.clone(), u, v)
    }

    /// Builds the divisor supported on `points`. See
    /// [`crate::divisor::Divisor::from_points`].
    pub fn divisor_from_points(&self, points: &[Point<E>]) -> Result<crate::divisor::Divisor<E>> {
        crate::divisor::Divisor::from_points(self.clone(), points)
    }

    /// The identity divisor `(1, 0)` on this curve.
    pub fn zero_divisor(&self) -> crate::divisor::Divisor<E> {
        crate::divisor::Divisor::zero(self.clone())
    }

    /// A uniformly random divisor on this curve's Jacobian. See
    /// [`crate::divisor::Divisor::get_random_divisor`].
    pub fn get_random_divisor(&self, rng: &mut dyn RngCore) -> Result<crate::divisor::Divisor<E>> {
        crate::divisor::Divisor::get_random_divisor(self.clone(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime_field::FiniteField;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn spec_curve() -> HyperellipticCurve<crate::prime_field::Zp> {
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let f = f11.poly(vec![
            f11.one(),
            f11.zero(),
            f11.element(3u32),
            f11.element(7u32),
            f11.one(),
            f11.element(2u32),
        ]); // x^5 + 3x^3 + 7x^2 + x + 2
        let h = f11.poly(vec![f11.zero()]);
        f11.hyperelliptic(h, f).unwrap()
    }

    #[test]
    fn rejects_non_monic_f() {
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let f = f11.poly(vec![f11.element(2u32), f11.zero(), f11.one()]);
        assert!(f11.hyperelliptic(f11.poly(vec![f11.zero()]), f).is_err());
    }

    #[test]
    fn rejects_even_degree_f() {
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let f = f11.poly(vec![f11.one(), f11.zero(), f11.one()]);
        assert!(f11.hyperelliptic(f11.poly(vec![f11.zero()]), f).is_err());
    }

    #[test]
    fn spec_curve_has_expected_point_count() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = curve.get_all_points(&mut rng).unwrap();
        // spec.md §8 scenario 5: 14 points including infinity.
        assert_eq!(points.len(), 14);
        assert!(points.contains(&Point::Infinity));

        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let expect_affine = |x: u32, y: u32| Point::Affine(f11.element(x), f11.element(y));
        for (x, y) in [
            (1, 6),
            (1, 5),
            (2, 0),
            (4, 6),
            (4, 5),
            (6, 7),
            (6, 4),
            (7, 7),
            (7, 4),
            (9, 7),
            (9, 4),
            (10, 2),
            (10, 9),
        ] {
            assert!(points.contains(&expect_affine(x, y)), "missing point ({x}, {y})");
        }
    }

    #[test]
    fn point_inverse_is_involution() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for point in curve.get_all_points(&mut rng).unwrap() {
            let inv = curve.point_inverse(&point);
            assert_eq!(curve.point_inverse(&inv), point);
        }
    }

    #[test]
    fn random_points_are_on_curve() {
        let curve = spec_curve();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut seen = HashSet::new();
        for _ in 0..20 {
            if let Point::Affine(x, y) = curve.get_random_point(&mut rng).unwrap() {
                seen.insert((x.value().clone(), y.value().clone()));
            }
        }
        assert!(!seen.is_empty());
    }

    #[test]
    fn curve_level_divisor_constructors_match_divisor_module() {
        let curve = spec_curve();
        let f11 = FiniteField::new(BigUint::from(11u32)).unwrap();
        let u = f11.poly(vec![f11.one(), f11.element(7u32), f11.element(10u32)]);
        let v = f11.poly(vec![f11.one(), f11.element(9u32)]);
        let via_curve = curve.divisor(u.clone(), v.clone()).unwrap();
        let via_module = crate::divisor::Divisor::new(curve.clone(), u, v).unwrap();
        assert_eq!(via_curve, via_module);
        assert_eq!(curve.zero_divisor(), crate::divisor::Divisor::zero(curve));
    }
}
