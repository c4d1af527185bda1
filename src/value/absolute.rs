use core::cmp::Ordering;
use core::fmt;

use crate::error::{UnitError, UnitResult};
use crate::kind::AbsoluteKind;
use crate::reference::Reference;
use crate::traits::Real;
use crate::unit::Unit;

use super::{from_si, to_si, Scalar};

type Relative<A, T> = Scalar<<A as AbsoluteKind>::Relative, T>;

/// A point of absolute kind `A`: a relative delta measured from a
/// [`Reference`].
///
/// Points on the same reference can be compared and subtracted; moving a
/// point by a relative value keeps its reference.
///
/// ```
/// use metrum::{AbsoluteScalar, Reference, Scalar, Time};
/// use metrum::units::{duration, time};
///
/// let epoch = Reference::new("epoch");
/// let start = AbsoluteScalar::<Time>::new(2.0, &time::HOUR, &epoch).unwrap();
/// let later = start.plus_relative(&Scalar::new(30.0, &duration::MINUTE).unwrap());
/// let elapsed = later.minus(&start).unwrap();
/// assert_eq!(elapsed.si(), 1800.0);
/// assert!(start.lt(&later).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct AbsoluteScalar<A: AbsoluteKind, T: Real = f64> {
    delta: Relative<A, T>,
    reference: Reference,
    unit: Unit,
}

impl<A: AbsoluteKind, T: Real> AbsoluteScalar<A, T> {
    /// A point given in an absolute unit of `A` (°C, a time in hours, ...).
    pub fn new(value: T, unit: &Unit, reference: &Reference) -> UnitResult<Self> {
        A::check_unit(unit)?;
        let relative = relative_unit_of(unit)?;
        Ok(Self {
            delta: Scalar::raw(to_si(unit, value), relative),
            reference: reference.clone(),
            unit: unit.clone(),
        })
    }

    /// A point at `delta` from `reference`, displayed in the kind's
    /// standard unit.
    pub fn from_delta(delta: Relative<A, T>, reference: &Reference) -> Self {
        Self {
            delta,
            reference: reference.clone(),
            unit: A::standard_unit(),
        }
    }

    fn with_delta(&self, si: T) -> Self {
        Self {
            delta: Scalar::raw(si, self.delta.unit().clone()),
            reference: self.reference.clone(),
            unit: self.unit.clone(),
        }
    }

    // ── Read-out ────────────────────────────────────────────────────

    #[inline]
    pub fn delta(&self) -> &Relative<A, T> {
        &self.delta
    }

    #[inline]
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// SI value measured from the reference.
    #[inline]
    pub fn si(&self) -> T {
        self.delta.si()
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The point in its display unit.
    pub fn in_unit(&self) -> T {
        from_si(&self.unit, self.si())
    }

    pub fn in_unit_of(&self, target: &Unit) -> UnitResult<T> {
        self.unit.check_compatible(target)?;
        Ok(from_si(target, self.si()))
    }

    pub fn with_display_unit(&self, unit: &Unit) -> UnitResult<Self> {
        A::check_unit(unit)?;
        Ok(Self {
            unit: unit.clone(),
            ..self.clone()
        })
    }

    // ── Arithmetic ──────────────────────────────────────────────────

    pub fn plus_relative(&self, delta: &Relative<A, T>) -> Self {
        self.with_delta(self.si() + delta.si())
    }

    pub fn minus_relative(&self, delta: &Relative<A, T>) -> Self {
        self.with_delta(self.si() - delta.si())
    }

    /// Distance between two points on the same reference.
    pub fn minus(&self, other: &Self) -> UnitResult<Relative<A, T>> {
        self.reference.check_same(&other.reference)?;
        Ok(Scalar::raw(self.si() - other.si(), self.delta.unit().clone()))
    }

    /// The same point measured from `reference`.
    pub fn relative_to(&self, reference: &Reference) -> UnitResult<Self> {
        let si = self.reference.translate(self.si(), reference)?;
        Ok(Self {
            reference: reference.clone(),
            ..self.with_delta(si)
        })
    }

    // ── Comparison ──────────────────────────────────────────────────

    /// Order of two points on the same reference. `None` when either is NaN.
    pub fn compare(&self, other: &Self) -> UnitResult<Option<Ordering>> {
        self.reference.check_same(&other.reference)?;
        Ok(self.si().partial_cmp(&other.si()))
    }

    pub fn lt(&self, other: &Self) -> UnitResult<bool> {
        Ok(self.compare(other)? == Some(Ordering::Less))
    }

    pub fn le(&self, other: &Self) -> UnitResult<bool> {
        Ok(matches!(self.compare(other)?, Some(Ordering::Less | Ordering::Equal)))
    }

    pub fn gt(&self, other: &Self) -> UnitResult<bool> {
        Ok(self.compare(other)? == Some(Ordering::Greater))
    }

    pub fn ge(&self, other: &Self) -> UnitResult<bool> {
        Ok(matches!(self.compare(other)?, Some(Ordering::Greater | Ordering::Equal)))
    }

    pub fn eq(&self, other: &Self) -> UnitResult<bool> {
        Ok(self.compare(other)? == Some(Ordering::Equal))
    }
}

fn relative_unit_of(unit: &Unit) -> UnitResult<Unit> {
    unit.relative_unit().cloned().ok_or_else(|| {
        UnitError::IllegalArgument(format!("unit `{}` has no relative unit", unit.id()))
    })
}

impl<A: AbsoluteKind, T: Real> fmt::Display for AbsoluteScalar<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.in_unit(), f)?;
        match self.unit.display_abbreviation() {
            "" => {}
            abbreviation => write!(f, " {abbreviation}")?,
        }
        write!(f, " from {}", self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{AbsoluteTemperature, Duration, Position, Temperature, Time};
    use crate::units::{absolute_temperature, duration, length, position, temperature, time};

    #[test]
    fn temperature_points() {
        let zero = Reference::new("absolute zero");
        let boiling = AbsoluteScalar::<AbsoluteTemperature>::new(
            100.0,
            &absolute_temperature::DEGREE_CELSIUS,
            &zero,
        )
        .unwrap();
        assert!((boiling.si() - 373.15).abs() < 1e-9);
        assert_eq!(boiling.delta().unit(), &*temperature::DEGREE_CELSIUS);
        let f = boiling.in_unit_of(&absolute_temperature::DEGREE_FAHRENHEIT).unwrap();
        assert!((f - 212.0).abs() < 1e-9);

        let freezing = boiling.minus_relative(&Scalar::<Temperature>::new(100.0, &temperature::KELVIN).unwrap());
        assert!(freezing.in_unit().abs() < 1e-9);
        let span = boiling.minus(&freezing).unwrap();
        assert!((span.in_unit() - 100.0).abs() < 1e-9);
        assert!(boiling.to_string().ends_with("\u{00B0}C from absolute zero"));
    }

    #[test]
    fn relative_units_rejected() {
        let epoch = Reference::new("epoch");
        let err = AbsoluteScalar::<Time>::new(1.0, &duration::SECOND, &epoch).unwrap_err();
        assert!(matches!(err, UnitError::IllegalArgument(_)));
    }

    #[test]
    fn references_must_match() {
        let a = Reference::new("epoch");
        let b = Reference::new("other epoch");
        let t1 = AbsoluteScalar::<Time>::new(5.0, &time::SECOND, &a).unwrap();
        let t2 = AbsoluteScalar::<Time>::new(3.0, &time::SECOND, &a).unwrap();
        let t3 = AbsoluteScalar::<Time>::new(3.0, &time::SECOND, &b).unwrap();
        let d: Scalar<Duration> = t1.minus(&t2).unwrap();
        assert_eq!(d.si(), 2.0);
        assert!(t1.gt(&t2).unwrap() && t1.ge(&t2).unwrap());
        assert!(!t1.le(&t2).unwrap() && !t1.eq(&t2).unwrap());
        assert!(matches!(t1.minus(&t3), Err(UnitError::IncompatibleReference { .. })));
        assert!(matches!(t1.lt(&t3), Err(UnitError::IncompatibleReference { .. })));
    }

    #[test]
    fn translation_between_references() {
        let datum = Reference::new("datum");
        let floor = Reference::with_offset("floor", &datum, 3.0);
        let p = AbsoluteScalar::<Position>::new(1.0, &position::METER, &floor).unwrap();
        let q = p.relative_to(&datum).unwrap();
        assert_eq!(q.si(), 4.0);
        assert_eq!(q.reference(), &datum);
        assert_eq!(q.relative_to(&floor).unwrap().si(), 1.0);
        let ft = q.in_unit_of(&position::FOOT).unwrap();
        assert!((ft - 4.0 / 0.3048).abs() < 1e-12);

        let shifted = q.plus_relative(&Scalar::new(2.0, &length::METER).unwrap());
        assert_eq!(shifted.si(), 6.0);
        assert_eq!(shifted.reference(), &datum);
        let lone = Reference::new("lone");
        assert!(matches!(p.relative_to(&lone), Err(UnitError::IncompatibleReference { .. })));
    }

    #[test]
    fn from_delta_uses_standard_unit() {
        let epoch = Reference::new("epoch");
        let d = Scalar::<Duration>::new(2.0, &duration::MINUTE).unwrap();
        let t = AbsoluteScalar::<Time>::from_delta(d, &epoch);
        assert_eq!(t.unit().id(), "s");
        assert_eq!(t.in_unit(), 120.0);
    }
}
