//! Named vector operations.
//!
//! glam already provides the arithmetic through operators; these functions give
//! the renderer one place where the degenerate cases are decided.

use crate::DVec3;
use thiserror::Error;

/// Errors from vector operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize degenerate vector {0}")]
    DegenerateVector(DVec3),
}

#[inline]
pub fn add(a: DVec3, b: DVec3) -> DVec3 {
    a + b
}

#[inline]
pub fn subtract(a: DVec3, b: DVec3) -> DVec3 {
    a - b
}

#[inline]
pub fn dot(a: DVec3, b: DVec3) -> f64 {
    a.dot(b)
}

#[inline]
pub fn scale(v: DVec3, k: f64) -> DVec3 {
    v * k
}

#[inline]
pub fn length(v: DVec3) -> f64 {
    dot(v, v).sqrt()
}

/// Scale `v` to unit length.
///
/// Zero-length and non-finite vectors have no direction and are rejected with
/// [`MathError::DegenerateVector`].
pub fn normalize(v: DVec3) -> Result<DVec3, MathError> {
    v.try_normalize().ok_or(MathError::DegenerateVector(v))
}

/// Reflect `v` about the normal `n`: `2n(n·v) - v`.
///
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    subtract(scale(n, 2.0 * dot(n, v)), v)
}
