//! Conversion between a unit's own magnitude and the standard (SI) magnitude.

use core::fmt;

/// Transform pair between a unit's value and the standard-unit value.
///
/// - [`Scale::Identity`]: the standard unit itself.
/// - [`Scale::Linear`]: `si = value * factor`.
/// - [`Scale::OffsetLinear`]: `si = (value + offset) * factor`, used only
///   by absolute units (°C, °F, positions measured from a datum).
///
/// Factors are always expressed relative to the standard unit of the
/// quantity, never relative to an intermediate derived unit.
///
/// ```
/// use metrum::Scale;
///
/// let fahrenheit = Scale::offset_linear(5.0 / 9.0, 459.67);
/// let kelvin = fahrenheit.to_standard_unit(32.0);
/// assert!((kelvin - 273.15).abs() < 1e-12);
/// assert!((fahrenheit.from_standard_unit(kelvin) - 32.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Identity,
    Linear { factor: f64 },
    OffsetLinear { factor: f64, offset: f64 },
}

impl Scale {
    #[inline]
    pub const fn linear(factor: f64) -> Self {
        Scale::Linear { factor }
    }

    #[inline]
    pub const fn offset_linear(factor: f64, offset: f64) -> Self {
        Scale::OffsetLinear { factor, offset }
    }

    /// Convert a value expressed in this scale's unit to the standard unit.
    #[inline]
    pub fn to_standard_unit(&self, value: f64) -> f64 {
        match *self {
            Scale::Identity => value,
            Scale::Linear { factor } => value * factor,
            Scale::OffsetLinear { factor, offset } => (value + offset) * factor,
        }
    }

    /// Convert a standard-unit value back into this scale's unit.
    #[inline]
    pub fn from_standard_unit(&self, value: f64) -> f64 {
        match *self {
            Scale::Identity => value,
            Scale::Linear { factor } => value / factor,
            Scale::OffsetLinear { factor, offset } => value / factor - offset,
        }
    }

    /// Multiplicative factor to the standard unit.
    ///
    /// For offset scales this ignores the offset, so it is only meaningful
    /// for differences between two values.
    #[inline]
    pub fn conversion_factor_to_standard_unit(&self) -> f64 {
        match *self {
            Scale::Identity => 1.0,
            Scale::Linear { factor } | Scale::OffsetLinear { factor, .. } => factor,
        }
    }

    /// Additive offset applied before the factor (zero for non-offset scales).
    #[inline]
    pub fn offset_to_standard_unit(&self) -> f64 {
        match *self {
            Scale::OffsetLinear { offset, .. } => offset,
            _ => 0.0,
        }
    }

    /// Whether this scale is the standard unit's own scale.
    ///
    /// True for [`Scale::Identity`] and for the degenerate
    /// `OffsetLinear(1, 0)` carried by absolute standard units.
    #[inline]
    pub fn is_base_si_scale(&self) -> bool {
        match *self {
            Scale::Identity => true,
            Scale::Linear { .. } => false,
            Scale::OffsetLinear { factor, offset } => factor == 1.0 && offset == 0.0,
        }
    }

    /// Whether the scale has an additive component.
    #[inline]
    pub fn is_offset(&self) -> bool {
        matches!(self, Scale::OffsetLinear { .. })
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Identity
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scale::Identity => write!(f, "identity"),
            Scale::Linear { factor } => write!(f, "x{factor}"),
            Scale::OffsetLinear { factor, offset } => write!(f, "(x + {offset}) x{factor}"),
        }
    }
}
