//! The six concrete scenarios used to validate this crate end to end: a
//! prime-field sanity check, two polynomial GCDs, a multiplicity-bearing
//! factorization, an irreducibility check over F_2, a 14-point curve over
//! F_11, and a divisor addition on that same curve.

use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hyperelliptic_field::{Divisor, FiniteField, Point};

fn f11() -> FiniteField {
    FiniteField::new(BigUint::from(11u32)).unwrap()
}

fn f2() -> FiniteField {
    FiniteField::new(BigUint::from(2u32)).unwrap()
}

#[test]
fn scenario_1_prime_field_sanity() {
    let f = f11();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let four = f.element(4u32);
    let five = f.element(5u32);
    assert_eq!((four.clone() + five).value(), &BigUint::from(9u32));

    let seven = f.element(7u32);
    assert_eq!((seven.clone() * seven).value(), &BigUint::from(5u32));

    let two = f.element(2u32);
    assert_eq!((two.clone() / four.clone()).value(), &BigUint::from(6u32));

    let three = f.element(3u32);
    assert_eq!(three.legendre().value(), &BigUint::from(1u32));
    assert_eq!(three.sqrt(&mut rng).unwrap().value(), &BigUint::from(5u32));

    assert!(two.sqrt(&mut rng).is_err());
}

#[test]
fn scenario_2_polynomial_gcd() {
    let f = f11();

    let a = f.poly(vec![f.one(), f.element(7u32), f.element(6u32)]);
    let b = f.poly(vec![f.one(), f.element(6u32), f.element(5u32)]);
    let gcd = a.gcd(&b).unwrap().to_monic().unwrap();
    assert_eq!(gcd, f.poly(vec![f.one(), f.one()]));

    let c = f.poly(vec![f.one(), f.element(4u32), f.one(), f.element(4u32)]);
    let d = f.poly(vec![f.one(), f.zero(), f.one()]);
    let gcd2 = c.gcd(&d).unwrap().to_monic().unwrap();
    assert_eq!(gcd2, d);
}

#[test]
fn scenario_3_factorization_with_multiplicity() {
    let f = f11();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let quadratic = f.poly(vec![f.one(), f.zero(), f.one()]); // x^2 + 1
    let linear = f.poly(vec![f.one(), f.element(4u32)]); // x + 4

    let mut target = f.poly(vec![f.one()]);
    for _ in 0..3 {
        target = target.checked_mul(&quadratic).unwrap();
    }
    for _ in 0..2 {
        target = target.checked_mul(&linear).unwrap();
    }

    let mut factors = target.factors(&mut rng).unwrap();
    factors.sort_by_key(|p| p.degree());

    let mut counts = std::collections::HashMap::new();
    for factor in &factors {
        let monic = factor.to_monic().unwrap();
        *counts.entry(monic.to_string()).or_insert(0) += 1;
    }
    assert_eq!(counts.get(&quadratic.to_string()), Some(&3));
    assert_eq!(counts.get(&linear.to_string()), Some(&2));
}

#[test]
fn scenario_4_irreducibility_over_f2() {
    let f = f2();
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    // x^8 + x^4 + x^3 + x^2 + 1
    let a = f.poly(vec![
        f.one(),
        f.zero(),
        f.zero(),
        f.zero(),
        f.one(),
        f.one(),
        f.one(),
        f.zero(),
        f.one(),
    ]);
    assert!(a.is_irreducible(&mut rng));

    // x^8 + x^4 + x^3 + x + 1
    let b = f.poly(vec![
        f.one(),
        f.zero(),
        f.zero(),
        f.zero(),
        f.one(),
        f.one(),
        f.zero(),
        f.one(),
        f.one(),
    ]);
    assert!(b.is_irreducible(&mut rng));

    // x^7 + x^5 + x^3
    let c = f.poly(vec![
        f.one(),
        f.zero(),
        f.one(),
        f.zero(),
        f.one(),
        f.zero(),
        f.zero(),
        f.zero(),
    ]);
    assert!(!c.is_irreducible(&mut rng));
}

#[test]
fn scenario_5_curve_has_fourteen_points() {
    let f11 = f11();
    let f = f11.poly(vec![
        f11.one(),
        f11.zero(),
        f11.element(3u32),
        f11.element(7u32),
        f11.one(),
        f11.element(2u32),
    ]); // x^5 + 3x^3 + 7x^2 + x + 2
    let h = f11.poly(vec![f11.zero()]);
    let curve = f11.hyperelliptic(h, f).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let points = curve.get_all_points(&mut rng).unwrap();
    assert_eq!(points.len(), 14);
    assert!(points.contains(&Point::Infinity));

    let expect = |x: u32, y: u32| Point::Affine(f11.element(x), f11.element(y));
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
        assert!(points.contains(&expect(x, y)), "missing point ({x}, {y})");
    }
}

#[test]
fn scenario_6_divisor_addition() {
    let f11 = f11();
    let f = f11.poly(vec![
        f11.one(),
        f11.zero(),
        f11.element(3u32),
        f11.element(7u32),
        f11.one(),
        f11.element(2u32),
    ]);
    let h = f11.poly(vec![f11.zero()]);
    let curve = f11.hyperelliptic(h, f).unwrap();

    let u1 = f11.poly(vec![f11.one(), f11.element(7u32), f11.element(10u32)]);
    let v1 = f11.poly(vec![f11.one(), f11.element(9u32)]);
    let d1 = Divisor::new(curve.clone(), u1, v1).unwrap();

    let u2 = f11.poly(vec![f11.one(), f11.zero(), f11.element(10u32)]);
    let v2 = f11.poly(vec![f11.element(7u32), f11.element(9u32)]);
    let d2 = Divisor::new(curve.clone(), u2, v2).unwrap();

    let sum = d1.checked_add(&d2).unwrap();
    assert_eq!(sum.u(), &f11.poly(vec![f11.one(), f11.element(10u32)]));
    assert_eq!(sum.v(), &f11.poly(vec![f11.element(6u32)]));

    let zero = Divisor::zero(curve);
    assert_eq!(zero.checked_add(&d1).unwrap(), d1);
}
