//! The error taxonomy shared by every module in this crate.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong in this crate's arithmetic.
///
/// Operator trait implementations (`Add`, `Mul`, ...) cannot return a
/// `Result`, so they call the `checked_*` method of the same name and
/// `panic!` with the `Display` of this error on failure. Prefer the
/// `checked_*` methods directly when a graceful failure path is needed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor was given parameters that do not describe a valid
    /// algebraic object (e.g. a non-prime modulus, a reducible defining
    /// polynomial, a singular curve).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two operands that are each individually valid do not share a parent
    /// (field, ring, or curve) and so cannot be combined.
    #[error("operands belong to different algebraic structures: {0}")]
    CrossAlgebra(String),

    /// Division, or an operation that reduces to division, by zero.
    #[error("division by zero")]
    DivideByZero,

    /// `sqrt` was called on a quadratic non-residue.
    #[error("{0} has no square root in this field")]
    NoSquareRoot(String),

    /// A positive integer could not be factored within the configured
    /// smoothness budget.
    #[error("could not factor {0}: exceeded the smoothness budget")]
    UnfactorableInteger(String),

    /// A point (x, y) does not satisfy the curve equation, or an `(u, v)`
    /// pair is not a valid Mumford representation for the given curve.
    #[error("{0} is not on the expected curve or support")]
    NotInSupport(String),

    /// An operation received a value of the wrong concrete type (e.g. a
    /// `Zp` element passed where a `GFElement` was expected).
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}
