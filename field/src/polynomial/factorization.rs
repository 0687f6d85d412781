//! Factorization of polynomials over a [`FieldElement`]: Yun's square-free
//! decomposition, distinct-degree factorization, Cantor-Zassenhaus
//! equal-degree splitting, and Rabin's irreducibility test.
//!
//! Mirrors `ring_polynomial.py`'s `factors`/`is_irreducible` of the Python
//! original, generalized over [`FieldElement`] the way the rest of this
//! module generalizes Euclidean division.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;

use super::Polynomial;
use crate::algebra::FieldElement;
use crate::bigint;
use crate::error::Result;

fn is_one<E: FieldElement>(p: &Polynomial<E>) -> bool {
    p.is_const() && *p.leading_coeff() == p.leading_coeff().one_like()
}

/// The polynomial `x`, over the same field as `template`.
fn monomial_x<E: FieldElement>(template: &Polynomial<E>) -> Polynomial<E> {
    let one = template.leading_coeff().one_like();
    let zero = one.zero_like();
    Polynomial::new(vec![one, zero])
}

/// Yun's square-free decomposition: returns `(factor, multiplicity)` pairs
/// whose product (each raised to its multiplicity) is `p` up to a unit.
///
/// `p` must be monic and nonzero.
pub(super) fn square_free_decomposition<E: FieldElement>(
    p: &Polynomial<E>,
) -> Result<Vec<(Polynomial<E>, usize)>> {
    let char_p = p.leading_coeff().characteristic();
    let m = p.leading_coeff().extension_degree();

    let mut result = Vec::new();
    let deriv = p.derivative();
    let mut c = p.gcd(&deriv)?;
    let mut w = p.checked_div_poly(&c)?;
    let mut i = 1usize;

    while !is_one(&w) {
        let y = w.gcd(&c)?;
        let factor = w.checked_div_poly(&y)?;
        if !is_one(&factor) && (i as u64) % (&char_p).to_u64().unwrap_or(u64::MAX) != 0 {
            result.push((factor, i));
        }
        w = y.clone();
        c = c.checked_div_poly(&y)?;
        i += 1;
    }

    if !is_one(&c) {
        // `c` is a `p`-th power: invert the Frobenius endomorphism
        // coefficient-wise and recurse on the (strictly smaller-degree)
        // result, per spec.md's square-free decomposition.
        let exponent = char_p.pow((m as u32).saturating_sub(1));
        let reduced = Polynomial::new(c.coeffs().iter().map(|a| a.pow_bigint(&exponent)).collect());
        for (factor, j) in square_free_decomposition(&reduced)? {
            result.push((factor, j * char_p.to_usize().unwrap_or(usize::MAX)));
        }
    }

    Ok(result)
}

/// Distinct-degree factorization of a square-free monic `p`: returns
/// `(g, d)` pairs where `g` is the product of all irreducible factors of
/// `p` of degree `d`.
pub(super) fn distinct_degree_factorization<E: FieldElement>(
    p: &Polynomial<E>,
) -> Result<Vec<(Polynomial<E>, usize)>> {
    let char_p = p.leading_coeff().characteristic();
    let mut work = p.to_monic()?;
    let x = monomial_x(&work);
    let mut h = x.clone();
    let mut results = Vec::new();
    let mut i = 0usize;

    while 2 * (i + 1) <= work.degree() {
        i += 1;
        h = h.pow_mod(&char_p, &work)?;
        let g = work.gcd(&h.checked_sub(&x)?)?;
        if !is_one(&g) {
            results.push((g.clone(), i));
            work = work.checked_div_poly(&g)?.to_monic()?;
            h = h.checked_rem(&work)?;
        }
    }
    if !is_one(&work) {
        let deg = work.degree();
        results.push((work, deg));
    }
    Ok(results)
}

/// Equal-degree (Cantor-Zassenhaus) factorization: splits `p`, a product of
/// `p.degree() / d` distinct monic irreducible factors all of degree `d`,
/// into its individual irreducible factors.
pub(super) fn equal_degree_factorization<E: FieldElement>(
    p: &Polynomial<E>,
    d: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Polynomial<E>>> {
    let monic = p.to_monic()?;
    let target_count = monic.degree() / d;
    let mut factors = vec![monic.clone()];
    if target_count <= 1 {
        return Ok(factors);
    }

    let char_p = monic.leading_coeff().characteristic();
    let q_d = char_p.pow(d as u32);
    let exponent = (&q_d - BigUint::one()) / BigUint::from(2u8);
    let one = monic.one_like();

    while factors.len() < target_count {
        let r = monic.rand(d, rng);
        if r.is_zero() {
            continue;
        }
        let mut g = monic.gcd(&r)?;
        if is_one(&g) {
            let candidate = r.pow_mod(&exponent, &monic)?.checked_sub(&one)?;
            g = monic.gcd(&candidate)?;
        }
        if is_one(&g) {
            continue;
        }

        let mut next = Vec::with_capacity(factors.len() + 1);
        for f in factors.drain(..) {
            if f.degree() > d {
                let delta = f.gcd(&g)?;
                if !is_one(&delta) && delta.degree() != f.degree() {
                    let other = f.checked_div_poly(&delta)?.to_monic()?;
                    next.push(delta);
                    next.push(other);
                    continue;
                }
            }
            next.push(f);
        }
        factors = next;
    }
    Ok(factors)
}

/// Rabin's irreducibility test.
pub(super) fn is_irreducible<E: FieldElement>(
    p: &Polynomial<E>,
    rng: &mut dyn RngCore,
) -> Result<bool> {
    let p = p.to_monic()?;
    let deg = p.degree();
    if deg == 0 {
        return Ok(false);
    }
    let char_p = p.leading_coeff().characteristic();
    let x = monomial_x(&p);

    let deg_biguint = BigUint::from(deg as u64);
    let mut prime_divisors = bigint::factors(&deg_biguint, rng)?;
    prime_divisors.sort();
    prime_divisors.dedup();

    for q in &prime_divisors {
        let n_q = &deg_biguint / q;
        let n_q = n_q.to_u32().expect("polynomial degrees stay small enough for u32 exponents");
        let exponent = char_p.pow(n_q);
        let h = x.pow_mod(&exponent, &p)?;
        let g = p.gcd(&h.checked_sub(&x)?)?;
        if !is_one(&g) {
            return Ok(false);
        }
    }

    let final_exponent = char_p.pow(deg as u32);
    let h = x.pow_mod(&final_exponent, &p)?;
    Ok(h.checked_sub(&x)?.is_zero())
}

impl<E: FieldElement> Polynomial<E> {
    /// The multiset of monic irreducible factors of `self` (the leading
    /// unit is not included), combining square-free, distinct-degree and
    /// equal-degree (Cantor-Zassenhaus) factorization.
    pub fn factors(&self, rng: &mut dyn RngCore) -> Result<Vec<Polynomial<E>>> {
        let monic = self.to_monic()?;
        let mut result = Vec::new();
        for (square_free_factor, multiplicity) in square_free_decomposition(&monic)? {
            for (same_degree_product, d) in distinct_degree_factorization(&square_free_factor)? {
                let pieces = if same_degree_product.degree() == d {
                    vec![same_degree_product]
                } else {
                    equal_degree_factorization(&same_degree_product, d, rng)?
                };
                for piece in pieces {
                    for _ in 0..multiplicity {
                        result.push(piece.clone());
                    }
                }
            }
        }
        Ok(result)
    }

    /// Checked irreducibility test (Rabin's algorithm). Fails only if an
    /// internal factorization of the (small) degree exceeds the smoothness
    /// cap of [`crate::bigint::factors`].
    pub fn checked_is_irreducible(&self, rng: &mut dyn RngCore) -> Result<bool> {
        is_irreducible(self, rng)
    }

    /// [`Polynomial::checked_is_irreducible`], panicking on the
    /// (practically unreachable, for the small polynomial degrees Rabin's
    /// test is applied to) smoothness-cap failure.
    pub fn is_irreducible(&self, rng: &mut dyn RngCore) -> bool {
        self.checked_is_irreducible(rng)
            .expect("factoring a polynomial's small degree should not exceed the smoothness cap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime_field::FiniteField;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn f11() -> FiniteField {
        FiniteField::new(BigUint::from(11u32)).unwrap()
    }

    fn f2() -> FiniteField {
        FiniteField::new(BigUint::from(2u32)).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn gcd_examples_from_spec() {
        let f = f11();
        // x^2 + 7x + 6 = (x+1)(x+6), x^2 + 6x + 5 = (x+1)(x+5) -> gcd x+1
        let a = f.poly(vec![f.one(), f.element(7u32), f.element(6u32)]);
        let b = f.poly(vec![f.one(), f.element(6u32), f.element(5u32)]);
        let g = a.gcd(&b).unwrap();
        assert_eq!(g, f.poly(vec![f.one(), f.one()]));

        // x^3 + 4x^2 + x + 4 = (x^2+1)(x+4) -> gcd with x^2+1 is x^2+1
        let c = f.poly(vec![f.one(), f.element(4u32), f.one(), f.element(4u32)]);
        let d = f.poly(vec![f.one(), f.zero(), f.one()]);
        let g2 = c.gcd(&d).unwrap();
        assert_eq!(g2, d);
    }

    #[test]
    fn factor_with_multiplicities() {
        let f = f11();
        let x2_plus_1 = f.poly(vec![f.one(), f.zero(), f.one()]);
        let x_plus_4 = f.poly(vec![f.one(), f.element(4u32)]);
        let mut p = x2_plus_1.clone();
        for _ in 0..2 {
            p = p.checked_mul(&x2_plus_1).unwrap();
        }
        for _ in 0..2 {
            p = p.checked_mul(&x_plus_4).unwrap();
        }
        let mut rng = rng();
        let mut fs = p.factors(&mut rng).unwrap();
        fs.sort_by_key(|f| f.degree());
        let count_deg2 = fs.iter().filter(|f| **f == x2_plus_1).count();
        let count_deg1 = fs.iter().filter(|f| **f == x_plus_4).count();
        assert_eq!(count_deg2, 3);
        assert_eq!(count_deg1, 2);
    }

    #[test]
    fn irreducibility_over_f2() {
        let f = f2();
        let mut rng = rng();
        let irreducible_a = f.poly(vec![
            f.one(),
            f.zero(),
            f.zero(),
            f.zero(),
            f.one(),
            f.one(),
            f.one(),
            f.zero(),
            f.one(),
        ]); // x^8+x^4+x^3+x^2+1
        assert!(irreducible_a.is_irreducible(&mut rng));

        let irreducible_b = f.poly(vec![
            f.one(),
            f.zero(),
            f.zero(),
            f.zero(),
            f.one(),
            f.one(),
            f.zero(),
            f.one(),
            f.one(),
        ]); // x^8+x^4+x^3+x+1
        assert!(irreducible_b.is_irreducible(&mut rng));

        let reducible = f.poly(vec![
            f.one(),
            f.zero(),
            f.one(),
            f.zero(),
            f.one(),
            f.zero(),
            f.zero(),
            f.zero(),
        ]); // x^7+x^5+x^3
        assert!(!reducible.is_irreducible(&mut rng));
    }

    #[test]
    fn is_irreducible_matches_factor_count() {
        let f = f11();
        let mut rng = rng();
        let p = f.poly(vec![f.one(), f.zero(), f.one()]); // x^2 + 1, irreducible mod 11
        assert!(p.is_irreducible(&mut rng));
        let fs = p.factors(&mut rng).unwrap();
        assert_eq!(fs.len(), 1);
        assert_eq!(fs[0], p);
    }
}
