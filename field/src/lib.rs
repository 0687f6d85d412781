#![allow(clippy::len_without_is_empty)]
#![allow(clippy::needless_range_loop)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

//! Arithmetic core of a hyperelliptic-curve cryptosystem.
//!
//! Four layers, each generalizing the last:
//!
//! - [`bigint`]: Miller-Rabin primality and Pollard's p-1 factorization over
//!   arbitrary-precision integers.
//! - [`prime_field`]: `Z_p`, a prime field of arbitrary characteristic.
//! - [`polynomial`]: `F[x]` over any [`algebra::FieldElement`], including a
//!   full factorization pipeline (Yun, distinct-degree, Cantor-Zassenhaus).
//! - [`extension`]: `F_{p^m}` built as `F_p[x] / (m(x))`.
//! - [`curve`] and [`divisor`]: the imaginary hyperelliptic curve
//!   `y^2 + h(x)y = f(x)` and its Jacobian, with Mumford representation and
//!   Cantor's composition/reduction algorithm.

pub mod algebra;
pub mod bigint;
pub mod curve;
pub mod divisor;
pub mod error;
pub mod extension;
pub mod polynomial;
pub mod prime_field;

pub use algebra::FieldElement;
pub use curve::{HyperellipticCurve, Point};
pub use divisor::Divisor;
pub use error::{Error, Result};
pub use extension::{GFElement, GaloisField};
pub use polynomial::Polynomial;
pub use prime_field::{FiniteField, Zp};
