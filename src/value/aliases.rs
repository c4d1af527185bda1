//! Single and double precision aliases for the value containers.

use super::{AbsoluteScalar, Matrix, Scalar, Vector};

// ── Scalar aliases ──────────────────────────────────────────────────

/// Scalar with `f32` storage.
pub type Scalarf32<K> = Scalar<K, f32>;
/// Scalar with `f64` storage.
pub type Scalarf64<K> = Scalar<K, f64>;

/// Absolute scalar with `f32` storage.
pub type AbsoluteScalarf32<A> = AbsoluteScalar<A, f32>;
/// Absolute scalar with `f64` storage.
pub type AbsoluteScalarf64<A> = AbsoluteScalar<A, f64>;

// ── Vector / Matrix aliases ─────────────────────────────────────────

/// Vector with `f32` storage.
pub type Vectorf32<K> = Vector<K, f32>;
/// Vector with `f64` storage.
pub type Vectorf64<K> = Vector<K, f64>;

/// Matrix with `f32` storage.
pub type Matrixf32<K> = Matrix<K, f32>;
/// Matrix with `f64` storage.
pub type Matrixf64<K> = Matrix<K, f64>;
