//! Unit-aware value containers.
//!
//! Every container stores its payload in SI units and remembers a display
//! unit used for reading values back and printing. The kind parameter `K`
//! fixes the quantity at compile time; [`SiQuantity`](crate::SiQuantity)
//! defers the check to run time.
//!
//! | Container | Payload |
//! |-----------|---------|
//! | [`Scalar<K, T>`] | one value |
//! | [`Vector<K, T>`] | 1×N dense or sparse |
//! | [`Matrix<K, T>`] | M×N dense or sparse |
//! | [`AbsoluteScalar<A, T>`] | relative delta plus a [`Reference`](crate::Reference) |

mod absolute;
mod aliases;
mod matrix;
mod products;
mod scalar;
mod vector;

pub use absolute::AbsoluteScalar;
pub use aliases::*;
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use vector::Vector;

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::kind::QuantityKind;
use crate::registry;
use crate::traits::Real;
use crate::unit::Unit;

#[inline]
pub(crate) fn to_si<T: Real>(unit: &Unit, value: T) -> T {
    T::from_f64(unit.to_standard_unit(value.as_f64()))
}

#[inline]
pub(crate) fn from_si<T: Real>(unit: &Unit, si: T) -> T {
    T::from_f64(unit.from_standard_unit(si.as_f64()))
}

pub(crate) fn check_dimensions(expected: SIDimensions, got: SIDimensions) -> UnitResult<()> {
    if expected != got {
        return Err(UnitError::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Sums, differences and products are only defined between differences,
/// not between points measured from an origin.
pub(crate) fn check_relative<K: QuantityKind>(operation: &str) -> UnitResult<()> {
    if K::ABSOLUTE {
        return Err(UnitError::IllegalArgument(format!(
            "cannot {operation} values of absolute quantity {}",
            K::NAME
        )));
    }
    Ok(())
}

/// Unit for the result of a product or quotient with `dimensions`.
pub(crate) fn result_unit(dimensions: SIDimensions) -> UnitResult<Unit> {
    registry::unit_for_dimensions(dimensions)
}

/// Unit to keep when a value becomes kind `K`: the current one when it
/// fits, else the kind's standard unit.
pub(crate) fn unit_for_kind<K: crate::kind::NamedQuantity>(current: &Unit) -> UnitResult<Unit> {
    K::check_dimensions(current.dimensions())?;
    if K::check_unit(current).is_ok() {
        Ok(current.clone())
    } else {
        Ok(K::standard_unit())
    }
}

/// Round half to even.
pub(crate) fn rint<T: Real>(v: T) -> T {
    let half = T::from_f64(0.5);
    if (v - v.trunc()).abs() == half {
        let two = T::from_f64(2.0);
        two * (v / two).round()
    } else {
        v.round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rint_rounds_half_to_even() {
        assert_eq!(rint(2.5_f64), 2.0);
        assert_eq!(rint(3.5_f64), 4.0);
        assert_eq!(rint(-2.5_f64), -2.0);
        assert_eq!(rint(2.4_f32), 2.0);
        assert_eq!(rint(-2.6_f64), -3.0);
    }

    #[test]
    fn scale_helpers() {
        let km = registry::unit("Length", "km").unwrap();
        assert_eq!(to_si(&km, 2.5_f64), 2500.0);
        assert_eq!(from_si(&km, 2500.0_f32), 2.5);
    }
}
