use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::kind::{Dimensionless, NamedQuantity, QuantityKind, RelativeKind, SiQuantity};
use crate::parse::{self, ParseOptions};
use crate::registry;
use crate::traits::Real;
use crate::unit::Unit;

use super::{check_dimensions, check_relative, from_si, result_unit, to_si, unit_for_kind};

/// A single value of quantity kind `K`.
///
/// ```
/// use metrum::{Length, Scalar};
/// use metrum::units::length::{KILOMETER, METER};
///
/// let d = Scalar::<Length>::new(1.5, &KILOMETER).unwrap();
/// assert_eq!(d.si(), 1500.0);
/// assert_eq!(d.in_unit(), 1.5);
/// assert_eq!(d.in_unit_of(&METER).unwrap(), 1500.0);
/// assert_eq!(d.to_string(), "1.5 km");
/// ```
#[derive(Debug, Clone)]
pub struct Scalar<K: QuantityKind, T: Real = f64> {
    si: T,
    unit: Unit,
    kind: PhantomData<K>,
}

impl<K: QuantityKind, T: Real> Scalar<K, T> {
    pub(crate) fn raw(si: T, unit: Unit) -> Self {
        Self {
            si,
            unit,
            kind: PhantomData,
        }
    }

    // ── Construction ────────────────────────────────────────────────

    /// A value expressed in `unit`.
    pub fn new(value: T, unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        Ok(Self::raw(to_si(unit, value), unit.clone()))
    }

    /// A value already in SI, displayed in `unit`.
    pub fn from_si(si: T, unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        Ok(Self::raw(si, unit.clone()))
    }

    /// Parse `<number><optional space><unit>`.
    ///
    /// The unit token is resolved among the abbreviations and ids of the
    /// kind's quantity; for [`SiQuantity`] it is read as an SI-dimension
    /// string.
    ///
    /// ```
    /// use metrum::{ParseOptions, Scalar, Speed};
    ///
    /// let v = Scalar::<Speed>::parse("3,6 km/h", &ParseOptions::comma_decimal()).unwrap();
    /// assert!((v.si() - 1.0).abs() < 1e-12);
    /// ```
    pub fn parse(text: &str, options: &ParseOptions) -> UnitResult<Self> {
        let (value, token) = parse::split_value(text, options)?;
        let unit = match K::DIMENSIONS {
            None => {
                let dimensions = SIDimensions::parse(token).map_err(|e| {
                    UnitError::IllegalArgument(format!("not an SI dimension string: {e}"))
                })?;
                result_unit(dimensions)?
            }
            Some(_) => registry::unit(K::NAME, token)?,
        };
        Self::new(T::from_f64(value), &unit)
    }

    // ── Read-out ────────────────────────────────────────────────────

    #[inline]
    pub fn si(&self) -> T {
        self.si
    }

    /// The value in the display unit.
    pub fn in_unit(&self) -> T {
        from_si(&self.unit, self.si)
    }

    /// The value converted into `target`.
    pub fn in_unit_of(&self, target: &Unit) -> UnitResult<T> {
        self.unit.check_compatible(target)?;
        Ok(from_si(target, self.si))
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[inline]
    pub fn dimensions(&self) -> SIDimensions {
        self.unit.dimensions()
    }

    /// Same value, displayed in `unit`.
    pub fn with_display_unit(&self, unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        self.unit.check_compatible(unit)?;
        Ok(Self::raw(self.si, unit.clone()))
    }

    // ── Arithmetic ──────────────────────────────────────────────────

    /// Sum, displayed in `self`'s unit.
    pub fn plus(&self, other: &Self) -> UnitResult<Self> {
        check_relative::<K>("add")?;
        check_dimensions(self.dimensions(), other.dimensions())?;
        Ok(Self::raw(self.si + other.si, self.unit.clone()))
    }

    pub fn minus(&self, other: &Self) -> UnitResult<Self> {
        check_relative::<K>("subtract")?;
        check_dimensions(self.dimensions(), other.dimensions())?;
        Ok(Self::raw(self.si - other.si, self.unit.clone()))
    }

    pub fn scaled(&self, factor: T) -> Self {
        Self::raw(self.si * factor, self.unit.clone())
    }

    /// Product with any other relative value. The result unit is found
    /// (or created) for the summed dimensions.
    ///
    /// ```
    /// use metrum::{Duration, Force, Length, Scalar};
    /// use metrum::units::{duration::SECOND, force::NEWTON, length::METER};
    ///
    /// let f = Scalar::<Force>::new(10.0, &NEWTON).unwrap();
    /// let d = Scalar::<Length>::new(3.0, &METER).unwrap();
    /// let t = Scalar::<Duration>::new(2.0, &SECOND).unwrap();
    /// let p = f.times(&d).unwrap().divide(&t).unwrap();
    /// assert_eq!(p.si(), 15.0);
    /// assert_eq!(p.unit().id(), "W");
    /// ```
    pub fn times<K2: QuantityKind>(&self, other: &Scalar<K2, T>) -> UnitResult<Scalar<SiQuantity, T>> {
        check_relative::<K>("multiply")?;
        check_relative::<K2>("multiply")?;
        let unit = result_unit(self.dimensions().checked_plus(other.dimensions())?)?;
        Ok(Scalar::raw(self.si * other.si, unit))
    }

    pub fn divide<K2: QuantityKind>(&self, other: &Scalar<K2, T>) -> UnitResult<Scalar<SiQuantity, T>> {
        check_relative::<K>("divide")?;
        check_relative::<K2>("divide")?;
        let unit = result_unit(self.dimensions().checked_minus(other.dimensions())?)?;
        Ok(Scalar::raw(self.si / other.si, unit))
    }

    /// Apply `f` to the SI value.
    pub fn map_si(&self, f: impl Fn(T) -> T) -> Self {
        Self::raw(f(self.si), self.unit.clone())
    }

    pub fn abs(&self) -> Self {
        self.map_si(T::abs)
    }

    // ── Kind conversion ─────────────────────────────────────────────

    /// Narrow to a named kind with the same dimensions.
    ///
    /// ```
    /// use metrum::{Area, Length, Scalar};
    /// use metrum::units::length::METER;
    ///
    /// let side = Scalar::<Length>::new(4.0, &METER).unwrap();
    /// let area = side.times(&side).unwrap().as_kind::<Area>().unwrap();
    /// assert_eq!(area.si(), 16.0);
    /// assert!(side.as_kind::<Area>().is_err());
    /// ```
    pub fn as_kind<K2: NamedQuantity>(&self) -> UnitResult<Scalar<K2, T>> {
        Ok(Scalar::raw(self.si, unit_for_kind::<K2>(&self.unit)?))
    }

    /// Widen to the generic SI kind.
    pub fn to_si_quantity(&self) -> UnitResult<Scalar<SiQuantity, T>> {
        check_relative::<K>("generalize")?;
        Ok(Scalar::raw(self.si, self.unit.clone()))
    }
}

impl<K: NamedQuantity, T: Real> Scalar<K, T> {
    /// A value in SI, displayed in the kind's standard unit.
    pub fn from_standard(si: T) -> Self {
        Self::raw(si, K::standard_unit())
    }
}

// ── Operators ───────────────────────────────────────────────────────

impl<K: RelativeKind, T: Real> Add for Scalar<K, T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::raw(self.si + rhs.si, self.unit)
    }
}

impl<K: RelativeKind, T: Real> Sub for Scalar<K, T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::raw(self.si - rhs.si, self.unit)
    }
}

impl<K: RelativeKind, T: Real> Neg for Scalar<K, T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::raw(-self.si, self.unit)
    }
}

/// Ratio of two values of one kind.
impl<K: RelativeKind, T: Real> Div for Scalar<K, T> {
    type Output = Scalar<Dimensionless, T>;

    fn div(self, rhs: Self) -> Scalar<Dimensionless, T> {
        Scalar::from_standard(self.si / rhs.si)
    }
}

macro_rules! impl_scale_ops {
    ($($t:ty),*) => {$(
        impl<K: QuantityKind> Mul<$t> for Scalar<K, $t> {
            type Output = Self;
            fn mul(self, rhs: $t) -> Self { Self::raw(self.si * rhs, self.unit) }
        }

        impl<K: QuantityKind> Mul<Scalar<K, $t>> for $t {
            type Output = Scalar<K, $t>;
            fn mul(self, rhs: Scalar<K, $t>) -> Scalar<K, $t> { Scalar::raw(self * rhs.si, rhs.unit) }
        }

        impl<K: QuantityKind> Div<$t> for Scalar<K, $t> {
            type Output = Self;
            fn div(self, rhs: $t) -> Self { Self::raw(self.si / rhs, self.unit) }
        }
    )*};
}

impl_scale_ops!(f32, f64);

// ── Comparison / formatting ─────────────────────────────────────────

/// Equal SI values of equal dimensions, whatever the display units.
impl<K: QuantityKind, T: Real> PartialEq for Scalar<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.si == other.si
    }
}

impl<K: QuantityKind, T: Real> PartialOrd for Scalar<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        self.si.partial_cmp(&other.si)
    }
}

impl<K: QuantityKind, T: Real> fmt::Display for Scalar<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.in_unit(), f)?;
        match self.unit.display_abbreviation() {
            "" => Ok(()),
            abbreviation => write!(f, " {abbreviation}"),
        }
    }
}

impl<K: QuantityKind, T: Real> FromStr for Scalar<K, T> {
    type Err = UnitError;

    fn from_str(s: &str) -> UnitResult<Self> {
        Self::parse(s, &ParseOptions::default())
    }
}
