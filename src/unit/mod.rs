//! Concrete units.
//!
//! A [`Unit`] is an immutable, cheaply clonable handle. Units are created
//! through [`UnitBuilder::build`] or through one of the derivation methods
//! (`derive_si`, `derive_linear`, ...), all of which register the new unit
//! with its quantity in a [`Registry`](crate::Registry).

mod builder;
mod derive;

pub use builder::UnitBuilder;

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::prefix::SIPrefixes;
use crate::quantity::{QuantityHandle, QuantityId};
use crate::scale::Scale;

/// The system of units a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    SiBase,
    SiDerived,
    SiAccepted,
    Cgs,
    Imperial,
    UsCustomary,
    Other,
}

impl UnitSystem {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            UnitSystem::SiBase => "SI",
            UnitSystem::SiDerived => "SI",
            UnitSystem::SiAccepted => "SI-accepted",
            UnitSystem::Cgs => "CGS",
            UnitSystem::Imperial => "Imperial",
            UnitSystem::UsCustomary => "US",
            UnitSystem::Other => "Other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitSystem::SiBase => "SI base unit",
            UnitSystem::SiDerived => "SI derived unit",
            UnitSystem::SiAccepted => "unit accepted for use with SI",
            UnitSystem::Cgs => "centimeter-gram-second system",
            UnitSystem::Imperial => "British imperial system",
            UnitSystem::UsCustomary => "US customary system",
            UnitSystem::Other => "other unit system",
        }
    }
}

/// Id, name and abbreviations for a unit produced by
/// [`Unit::derive_linear`] or [`Unit::derive_linear_offset`].
///
/// ```
/// use metrum::Labels;
///
/// let labels = Labels::new("mi", "mile").alias("mile");
/// assert_eq!(labels.id, "mi");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels {
    pub id: String,
    pub name: String,
    /// Defaults to `id`.
    pub textual: Option<String>,
    /// Defaults to the textual abbreviation.
    pub display: Option<String>,
    pub additional: Vec<String>,
    /// Prefixed siblings to generate alongside the derived unit.
    pub si_prefixes: SIPrefixes,
}

impl Labels {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn textual(mut self, abbreviation: impl Into<String>) -> Self {
        self.textual = Some(abbreviation.into());
        self
    }

    pub fn display(mut self, abbreviation: impl Into<String>) -> Self {
        self.display = Some(abbreviation.into());
        self
    }

    pub fn alias(mut self, abbreviation: impl Into<String>) -> Self {
        self.additional.push(abbreviation.into());
        self
    }

    pub fn prefixes(mut self, family: SIPrefixes) -> Self {
        self.si_prefixes = family;
        self
    }
}

/// One concrete unit of a quantity.
///
/// Equality and hashing use the owning quantity's name and the unit id,
/// which are unique together.
#[derive(Clone)]
pub struct Unit(pub(crate) Arc<UnitData>);

#[derive(Debug)]
pub(crate) struct UnitData {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) textual_abbreviation: String,
    pub(crate) display_abbreviation: String,
    pub(crate) additional_abbreviations: BTreeSet<String>,
    pub(crate) scale: Scale,
    pub(crate) unit_system: UnitSystem,
    pub(crate) generated: bool,
    pub(crate) si_prefixes: SIPrefixes,
    pub(crate) prefix_power: i32,
    pub(crate) quantity: QuantityHandle,
    pub(crate) relative_unit: Option<Unit>,
}

impl Unit {
    /// Start building a new unit.
    pub fn builder() -> UnitBuilder {
        UnitBuilder::new()
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn textual_abbreviation(&self) -> &str {
        &self.0.textual_abbreviation
    }

    #[inline]
    pub fn display_abbreviation(&self) -> &str {
        &self.0.display_abbreviation
    }

    pub fn additional_abbreviations(&self) -> &BTreeSet<String> {
        &self.0.additional_abbreviations
    }

    /// Every distinct abbreviation the unit answers to.
    pub fn abbreviations(&self) -> BTreeSet<&str> {
        let mut all: BTreeSet<&str> = self
            .0
            .additional_abbreviations
            .iter()
            .map(String::as_str)
            .collect();
        all.insert(&self.0.textual_abbreviation);
        all.insert(&self.0.display_abbreviation);
        all
    }

    #[inline]
    pub fn scale(&self) -> Scale {
        self.0.scale
    }

    #[inline]
    pub fn unit_system(&self) -> UnitSystem {
        self.0.unit_system
    }

    /// Whether the unit was generated as part of an SI-prefix family.
    #[inline]
    pub fn is_generated(&self) -> bool {
        self.0.generated
    }

    #[inline]
    pub fn si_prefixes(&self) -> SIPrefixes {
        self.0.si_prefixes
    }

    #[inline]
    pub fn prefix_power(&self) -> i32 {
        self.0.prefix_power
    }

    #[inline]
    pub fn quantity_id(&self) -> QuantityId {
        self.0.quantity.id
    }

    #[inline]
    pub fn quantity_name(&self) -> &str {
        &self.0.quantity.name
    }

    #[inline]
    pub fn dimensions(&self) -> SIDimensions {
        self.0.quantity.dimensions
    }

    /// Whether this is the standard unit of its quantity.
    #[inline]
    pub fn is_base_si_unit(&self) -> bool {
        self.0.scale.is_base_si_scale()
    }

    /// Whether the unit measures from an origin (°C, a position, a time).
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.0.relative_unit.is_some()
    }

    /// For absolute units, the unit of differences between two values.
    #[inline]
    pub fn relative_unit(&self) -> Option<&Unit> {
        self.0.relative_unit.as_ref()
    }

    pub(crate) fn quantity_handle(&self) -> &QuantityHandle {
        &self.0.quantity
    }

    #[inline]
    pub fn to_standard_unit(&self, value: f64) -> f64 {
        self.0.scale.to_standard_unit(value)
    }

    #[inline]
    pub fn from_standard_unit(&self, value: f64) -> f64 {
        self.0.scale.from_standard_unit(value)
    }

    /// Convert `value` expressed in this unit into `target`.
    ///
    /// ```
    /// use metrum::units::length::{KILOMETER, MILE};
    ///
    /// let km = KILOMETER.convert(1.0, &MILE).unwrap();
    /// assert!((km - 0.621371192).abs() < 1e-9);
    /// ```
    pub fn convert(&self, value: f64, target: &Unit) -> UnitResult<f64> {
        self.check_compatible(target)?;
        Ok(target.from_standard_unit(self.to_standard_unit(value)))
    }

    pub(crate) fn check_compatible(&self, other: &Unit) -> UnitResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(UnitError::DimensionMismatch {
                expected: self.dimensions(),
                got: other.dimensions(),
            });
        }
        if self.is_absolute() != other.is_absolute() {
            return Err(UnitError::IllegalArgument(format!(
                "cannot convert between absolute and relative units `{}` and `{}`",
                self.id(),
                other.id()
            )));
        }
        Ok(())
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.quantity.name == other.0.quantity.name && self.0.id == other.0.id)
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.quantity.name.hash(state);
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("quantity", &&*self.0.quantity.name)
            .field("id", &self.0.id)
            .field("scale", &self.0.scale)
            .finish()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display_abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn registry() -> Registry {
        Registry::with_builtin_units().unwrap()
    }

    #[test]
    fn accessors() {
        let r = registry();
        let km = r.unit("Length", "km").unwrap();
        assert_eq!(km.name(), "kilometer");
        assert_eq!(km.quantity_name(), "Length");
        assert_eq!(km.dimensions(), SIDimensions::LENGTH);
        assert_eq!(km.scale().conversion_factor_to_standard_unit(), 1000.0);
        assert!(km.is_generated());
        assert!(!km.is_base_si_unit());
        assert!(!km.is_absolute());

        let m = r.unit("Length", "m").unwrap();
        assert!(m.is_base_si_unit());
        assert!(!m.is_generated());
        assert_eq!(m.unit_system(), UnitSystem::SiBase);
        assert_eq!(m.to_string(), "m");
    }

    #[test]
    fn abbreviations_are_distinct() {
        let r = registry();
        let um = r.unit("Length", "mum").unwrap();
        let all = um.abbreviations();
        assert!(all.contains("mum"));
        assert!(all.contains("\u{03BC}m"));
        assert_eq!(um.display_abbreviation(), "\u{03BC}m");
    }

    #[test]
    fn convert_between_units() {
        let r = registry();
        let ft = r.unit("Length", "ft").unwrap();
        let inch = r.unit("Length", "in").unwrap();
        assert!((ft.convert(1.0, &inch).unwrap() - 12.0).abs() < 1e-12);

        let s = r.unit("Duration", "s").unwrap();
        let err = ft.convert(1.0, &s).unwrap_err();
        assert!(matches!(err, UnitError::DimensionMismatch { .. }));
    }

    #[test]
    fn absolute_and_relative_do_not_mix() {
        let r = registry();
        let kelvin = r.unit("Temperature", "K").unwrap();
        let abs_kelvin = r.unit("AbsoluteTemperature", "K").unwrap();
        assert!(abs_kelvin.is_absolute());
        assert_eq!(abs_kelvin.relative_unit(), Some(&kelvin));
        assert!(matches!(
            kelvin.convert(1.0, &abs_kelvin),
            Err(UnitError::IllegalArgument(_))
        ));
    }

    #[test]
    fn equality_by_quantity_and_id() {
        let a = registry();
        let b = registry();
        assert_eq!(a.unit("Mass", "kg").unwrap(), b.unit("Mass", "kg").unwrap());
        assert_ne!(
            a.unit("Duration", "s").unwrap(),
            a.unit("Time", "s").unwrap()
        );
    }

    #[test]
    fn unit_system_labels() {
        assert_eq!(UnitSystem::Imperial.abbreviation(), "Imperial");
        assert_eq!(UnitSystem::SiDerived.name(), "SI derived unit");
    }
}
