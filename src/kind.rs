//! Statically typed quantity kinds.
//!
//! A kind is a zero-sized marker naming one registered quantity. Value
//! containers carry their kind as a type parameter, so adding a
//! [`Length`] to a [`Duration`] does not compile, while dividing them
//! yields a [`Speed`] through the typed operator impls on
//! [`Scalar`](crate::Scalar).
//!
//! [`SiQuantity`] is the escape hatch: it accepts any relative unit and
//! checks dimensions at run time. Generic `times` / `divide` produce it
//! and `as_kind` narrows it back to a named kind.

use core::fmt::Debug;

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::registry::UnitRef;
use crate::unit::Unit;

/// Marker trait for a quantity kind.
pub trait QuantityKind: Copy + Debug + Default + Send + Sync + 'static {
    /// Registry name of the quantity (`"Length"`).
    const NAME: &'static str;
    /// Fixed dimensions, or `None` for [`SiQuantity`].
    const DIMENSIONS: Option<SIDimensions>;
    /// Whether values of this kind are measured from an origin.
    const ABSOLUTE: bool = false;

    /// Check that `unit` can express values of this kind.
    fn check_unit(unit: &Unit) -> UnitResult<()> {
        if let Some(expected) = Self::DIMENSIONS {
            if unit.dimensions() != expected {
                return Err(UnitError::DimensionMismatch {
                    expected,
                    got: unit.dimensions(),
                });
            }
            if unit.quantity_name() != Self::NAME {
                return Err(UnitError::IllegalArgument(format!(
                    "unit `{}` measures {}, not {}",
                    unit.id(),
                    unit.quantity_name(),
                    Self::NAME
                )));
            }
        }
        if unit.is_absolute() != Self::ABSOLUTE {
            return Err(UnitError::IllegalArgument(format!(
                "unit `{}` is {}, but {} is {}",
                unit.id(),
                absolute_label(unit.is_absolute()),
                Self::NAME,
                absolute_label(Self::ABSOLUTE)
            )));
        }
        Ok(())
    }

    /// Check that a value with `dimensions` may become this kind.
    fn check_dimensions(dimensions: SIDimensions) -> UnitResult<()> {
        match Self::DIMENSIONS {
            Some(expected) if expected != dimensions => Err(UnitError::DimensionMismatch {
                expected,
                got: dimensions,
            }),
            _ => Ok(()),
        }
    }
}

fn absolute_label(absolute: bool) -> &'static str {
    if absolute {
        "absolute"
    } else {
        "relative"
    }
}

/// A kind with fixed dimensions and a standard unit in the process-wide
/// registry.
pub trait NamedQuantity: QuantityKind {
    fn standard_unit() -> Unit;
}

/// A named kind whose values are differences, so sums and ratios of them
/// are meaningful.
pub trait RelativeKind: NamedQuantity {}

/// An absolute kind, paired with the kind of its differences.
pub trait AbsoluteKind: NamedQuantity {
    type Relative: RelativeKind;
}

/// Any relative quantity; dimensions are tracked at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SiQuantity;

impl QuantityKind for SiQuantity {
    const NAME: &'static str = "SI";
    const DIMENSIONS: Option<SIDimensions> = None;
}

macro_rules! quantity_kinds {
    ($($(#[$doc:meta])* $kind:ident = $dims:expr, $unit:literal;)*) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl QuantityKind for $kind {
            const NAME: &'static str = stringify!($kind);
            const DIMENSIONS: Option<SIDimensions> = Some($dims);
        }

        impl NamedQuantity for $kind {
            fn standard_unit() -> Unit {
                static UNIT: UnitRef = UnitRef::new(stringify!($kind), $unit);
                Unit::clone(&UNIT)
            }
        }

        impl RelativeKind for $kind {}
    )*};
}

macro_rules! absolute_kinds {
    ($($(#[$doc:meta])* $kind:ident($relative:ident), $unit:literal;)*) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl QuantityKind for $kind {
            const NAME: &'static str = stringify!($kind);
            const DIMENSIONS: Option<SIDimensions> = <$relative as QuantityKind>::DIMENSIONS;
            const ABSOLUTE: bool = true;
        }

        impl NamedQuantity for $kind {
            fn standard_unit() -> Unit {
                static UNIT: UnitRef = UnitRef::new(stringify!($kind), $unit);
                Unit::clone(&UNIT)
            }
        }

        impl AbsoluteKind for $kind {
            type Relative = $relative;
        }
    )*};
}

const M: SIDimensions = SIDimensions::MASS;
const L: SIDimensions = SIDimensions::LENGTH;
const T: SIDimensions = SIDimensions::TIME;
const I: SIDimensions = SIDimensions::CURRENT;

quantity_kinds! {
    /// Pure numbers and ratios.
    Dimensionless = SIDimensions::DIMENSIONLESS, "1";
    Length = L, "m";
    Mass = M, "kg";
    /// A time difference. Points in time are [`Time`].
    Duration = T, "s";
    ElectricalCurrent = I, "A";
    /// A temperature difference. Points on a scale are [`AbsoluteTemperature`].
    Temperature = SIDimensions::TEMPERATURE, "K";
    AmountOfSubstance = SIDimensions::AMOUNT_OF_SUBSTANCE, "mol";
    LuminousIntensity = SIDimensions::LUMINOUS_INTENSITY, "cd";
    Area = L.pow(2), "m2";
    Volume = L.pow(3), "m3";
    Speed = L.minus(T), "m/s";
    Acceleration = L.minus(T.pow(2)), "m/s2";
    Force = M.plus(L).minus(T.pow(2)), "N";
    Energy = M.plus(L.pow(2)).minus(T.pow(2)), "J";
    Power = M.plus(L.pow(2)).minus(T.pow(3)), "W";
    Pressure = M.minus(L).minus(T.pow(2)), "Pa";
    Frequency = T.negate(), "Hz";
    Density = M.minus(L.pow(3)), "kg/m3";
    VolumetricFlow = L.pow(3).minus(T), "m3/s";
    /// Reciprocal length (per meter).
    LinearDensity = L.negate(), "/m";
    ElectricalCharge = I.plus(T), "C";
    ElectricalPotential = M.plus(L.pow(2)).minus(T.pow(3)).minus(I), "V";
    ElectricalResistance = M.plus(L.pow(2)).minus(T.pow(3)).minus(I.pow(2)), "ohm";
}

absolute_kinds! {
    /// A point in space along one axis, measured from a datum.
    Position(Length), "m";
    /// A point in time, measured from an epoch.
    Time(Duration), "s";
    /// A point on a temperature scale (°C, °F, K).
    AbsoluteTemperature(Temperature), "K";
}
