use core::fmt::{Debug, Display};
use num_traits::Float;

/// Trait for the floating-point element type of value containers.
///
/// Implemented for `f32` and `f64`, which gives every container a single
/// and a double precision variant. Unit scales are always evaluated in
/// `f64` and rounded to the element type afterwards.
pub trait Real: Float + Default + Debug + Display + Send + Sync + 'static {
    /// Round an `f64` to this precision.
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`.
    fn as_f64(self) -> f64;
}

macro_rules! impl_real {
    ($($t:ty),*) => {
        $(
            impl Real for $t {
                #[inline] fn from_f64(value: f64) -> $t { value as $t }
                #[inline] fn as_f64(self) -> f64 { self as f64 }
            }
        )*
    };
}

impl_real!(f32, f64);

/// Read-only access to a matrix-like payload.
///
/// Lets cell-wise algorithms (the determinant, comparisons) run over
/// dense and sparse storage alike.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    /// Value at `(row, col)`. Indices are assumed in range.
    fn get(&self, row: usize, col: usize) -> T;
}
