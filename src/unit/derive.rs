//! Derivation of sibling units.
//!
//! Every derivation seeds a fresh [`UnitBuilder`] from the source unit,
//! overrides its labels and scale, and registers the result. The source
//! unit is never modified. Scale factors are always expressed against the
//! quantity's standard unit.

use std::collections::BTreeSet;

use crate::error::{UnitError, UnitResult};
use crate::prefix::{SIPrefix, SIPrefixes};
use crate::registry::Registry;
use crate::scale::Scale;

use super::{Labels, Unit, UnitBuilder, UnitSystem};

const KILO_MARKER: &str = "k";
const KILO_NAME: &str = "kilo";
const NAME_QUALIFIERS: [&str; 2] = ["square ", "cubic "];
const PER_MARKERS: [&str; 2] = ["1/", "/"];
const PER_NAME: &str = "per ";

/// Labels of a derived sibling, all fields resolved.
struct Names {
    id: String,
    name: String,
    textual: String,
    display: String,
    additional: BTreeSet<String>,
}

impl Unit {
    /// Derive and register an SI-prefixed sibling: `km` from `m`, `km²`
    /// from `m²` (with `power = 2`).
    ///
    /// The new factor is `prefix.factor^power` times the source factor.
    /// Absolute units keep an offset-free `OffsetLinear` scale and pick up
    /// the equally prefixed unit of their relative quantity.
    ///
    /// ```
    /// use metrum::{prefix, Registry};
    ///
    /// let mut registry = Registry::with_builtin_units().unwrap();
    /// let foot = registry.unit("Length", "ft").unwrap();
    /// let kft = foot.derive_si(&mut registry, &prefix::KILO, 1, false).unwrap();
    /// assert_eq!(kft.id(), "kft");
    /// assert_eq!(kft.name(), "kilofoot");
    /// assert!((kft.to_standard_unit(1.0) - 304.8).abs() < 1e-9);
    /// ```
    pub fn derive_si(
        &self,
        registry: &mut Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let unit = self.si_prefixed(registry, prefix, power, generated)?;
        registry.register_unit(unit, SIPrefixes::None, power)
    }

    /// Derive a prefixed sibling of a unit whose own name already carries
    /// the kilo prefix (kilogram). The leading `k` / `kilo` is replaced by
    /// `prefix`, so milligram comes out as `mg` rather than `mkg`.
    ///
    /// Fails with [`UnitError::InvalidDerivation`] when the id, name or an
    /// abbreviation does not start with the kilo marker.
    pub fn derive_si_kilo(
        &self,
        registry: &mut Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let unit = self.si_kilo_prefixed(registry, prefix, power, generated)?;
        registry.register_unit(unit, SIPrefixes::None, power)
    }

    /// Derive a prefixed sibling of a reciprocal unit: `/mm` from `/m`,
    /// "per millimeter" from "per meter".
    ///
    /// The prefix goes inside the reciprocal marker, and the factor is
    /// divided by `prefix.factor^power`.
    pub fn derive_per_si(
        &self,
        registry: &mut Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let unit = self.per_si_prefixed(registry, prefix, power, generated)?;
        registry.register_unit(unit, SIPrefixes::None, power)
    }

    /// Derive a linearly scaled sibling: `1 new = factor source`.
    ///
    /// Only Identity and Linear sources are accepted; the new factor is
    /// `factor` times the source's factor to the standard unit.
    ///
    /// ```
    /// use metrum::{Labels, Registry, UnitSystem};
    ///
    /// let mut registry = Registry::with_builtin_units().unwrap();
    /// let foot = registry.unit("Length", "ft").unwrap();
    /// let fathom = foot
    ///     .derive_linear(&mut registry, 6.0, Labels::new("ftm", "fathom"), UnitSystem::Imperial)
    ///     .unwrap();
    /// assert!((fathom.to_standard_unit(1.0) - 1.8288).abs() < 1e-12);
    /// ```
    pub fn derive_linear(
        &self,
        registry: &mut Registry,
        factor: f64,
        labels: Labels,
        unit_system: UnitSystem,
    ) -> UnitResult<Unit> {
        check_factor(factor)?;
        let scale = match self.scale() {
            Scale::Identity => Scale::linear(factor),
            Scale::Linear { factor: existing } => Scale::linear(factor * existing),
            Scale::OffsetLinear { .. } => {
                return Err(UnitError::UnsupportedDerivation {
                    unit: self.id().to_string(),
                    reason: "linear derivation from an offset scale".to_string(),
                })
            }
        };
        let builder = labelled(Unit::builder(), labels)
            .scale(scale)
            .unit_system(unit_system)
            .quantity(self.quantity_id());
        let (unit, family, power) = builder.finish(self.quantity_handle().clone())?;
        registry.register_unit(unit, family, power)
    }

    /// Derive an offset-linear sibling of an absolute standard unit:
    /// `si = (value + offset) * factor`, e.g. degree Celsius from the
    /// absolute kelvin with `factor = 1, offset = 273.15`.
    ///
    /// `relative_unit` is the matching unit of the relative quantity.
    pub fn derive_linear_offset(
        &self,
        registry: &mut Registry,
        factor: f64,
        offset: f64,
        relative_unit: &Unit,
        labels: Labels,
        unit_system: UnitSystem,
    ) -> UnitResult<Unit> {
        check_factor(factor)?;
        if !offset.is_finite() {
            return Err(UnitError::IllegalArgument(format!(
                "scale offset must be finite, got {offset}"
            )));
        }
        if !self.is_absolute() {
            return Err(UnitError::UnsupportedDerivation {
                unit: self.id().to_string(),
                reason: "offset derivation needs an absolute source unit".to_string(),
            });
        }
        if !self.scale().is_base_si_scale() {
            return Err(UnitError::UnsupportedDerivation {
                unit: self.id().to_string(),
                reason: format!(
                    "offset derivation only from the standard absolute unit, source scale is {}",
                    self.scale()
                ),
            });
        }
        let builder = labelled(Unit::builder(), labels)
            .scale(Scale::offset_linear(factor, offset))
            .unit_system(unit_system)
            .quantity(self.quantity_id())
            .relative_unit(relative_unit);
        let (unit, family, power) = builder.finish(self.quantity_handle().clone())?;
        registry.register_unit(unit, family, power)
    }

    // ── Unregistered siblings (used to build prefix families) ──────

    pub(crate) fn si_prefixed(
        &self,
        registry: &Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let names = Names {
            id: format!("{}{}", prefix.textual, self.id()),
            name: prefixed_name(prefix, self.name()),
            textual: format!("{}{}", prefix.textual, self.textual_abbreviation()),
            display: format!("{}{}", prefix.display, self.display_abbreviation()),
            additional: self
                .additional_abbreviations()
                .iter()
                .map(|a| format!("{}{a}", prefix.textual))
                .collect(),
        };
        let scale = self.prefixed_scale(prefix.factor_pow(power))?;
        self.sibling(registry, names, scale, generated)
    }

    pub(crate) fn si_kilo_prefixed(
        &self,
        registry: &Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let strip = |label: &str, marker: &str| -> UnitResult<String> {
            label
                .strip_prefix(marker)
                .filter(|rest| !rest.is_empty())
                .map(str::to_string)
                .ok_or_else(|| UnitError::InvalidDerivation {
                    unit: self.id().to_string(),
                    reason: format!("`{label}` does not start with `{marker}`"),
                })
        };
        let id = strip(self.id(), KILO_MARKER)?;
        let name = strip(self.name(), KILO_NAME)?;
        let textual = strip(self.textual_abbreviation(), KILO_MARKER)?;
        let display = strip(self.display_abbreviation(), KILO_MARKER)?;
        let mut additional = BTreeSet::new();
        for a in self.additional_abbreviations() {
            additional.insert(format!("{}{}", prefix.textual, strip(a.as_str(), KILO_MARKER)?));
        }

        let names = Names {
            id: format!("{}{id}", prefix.textual),
            name: prefixed_name(prefix, &name),
            textual: format!("{}{textual}", prefix.textual),
            display: format!("{}{display}", prefix.display),
            additional,
        };
        let factor = prefix.factor_pow(power) / crate::prefix::KILO.factor_pow(power);
        let scale = self.prefixed_scale(factor)?;
        self.sibling(registry, names, scale, generated)
    }

    pub(crate) fn per_si_prefixed(
        &self,
        registry: &Registry,
        prefix: &SIPrefix,
        power: i32,
        generated: bool,
    ) -> UnitResult<Unit> {
        let reprefix = |label: &str, symbol: &str| -> UnitResult<String> {
            PER_MARKERS
                .iter()
                .find_map(|marker| {
                    label
                        .strip_prefix(marker)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| format!("{marker}{symbol}{rest}"))
                })
                .ok_or_else(|| UnitError::InvalidDerivation {
                    unit: self.id().to_string(),
                    reason: format!("`{label}` has no reciprocal marker"),
                })
        };
        let name = self
            .name()
            .strip_prefix(PER_NAME)
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("{PER_NAME}{}", prefixed_name(prefix, rest)))
            .ok_or_else(|| UnitError::InvalidDerivation {
                unit: self.id().to_string(),
                reason: format!("name `{}` does not start with `{PER_NAME}`", self.name()),
            })?;
        let mut additional = BTreeSet::new();
        for a in self.additional_abbreviations() {
            additional.insert(reprefix(a.as_str(), prefix.textual)?);
        }

        let names = Names {
            id: reprefix(self.id(), prefix.textual)?,
            name,
            textual: reprefix(self.textual_abbreviation(), prefix.textual)?,
            display: reprefix(self.display_abbreviation(), prefix.display)?,
            additional,
        };
        let scale = self.prefixed_scale(1.0 / prefix.factor_pow(power))?;
        self.sibling(registry, names, scale, generated)
    }

    /// The source scale multiplied by `factor`.
    fn prefixed_scale(&self, factor: f64) -> UnitResult<Scale> {
        match self.scale() {
            Scale::Identity => Ok(Scale::linear(factor)),
            Scale::Linear { factor: existing } => Ok(Scale::linear(factor * existing)),
            Scale::OffsetLinear { factor: existing, offset } if offset == 0.0 => {
                Ok(Scale::offset_linear(factor * existing, 0.0))
            }
            Scale::OffsetLinear { .. } => Err(UnitError::UnsupportedDerivation {
                unit: self.id().to_string(),
                reason: "SI prefix applied to a scale with a non-zero offset".to_string(),
            }),
        }
    }

    fn sibling(
        &self,
        registry: &Registry,
        names: Names,
        scale: Scale,
        generated: bool,
    ) -> UnitResult<Unit> {
        let mut builder = UnitBuilder::from_unit(self)
            .clear_abbreviations()
            .id(names.id.as_str())
            .name(names.name)
            .textual_abbreviation(names.textual)
            .display_abbreviation(names.display)
            .scale(scale)
            .generated(generated);
        for a in names.additional {
            builder = builder.additional_abbreviation(a);
        }

        if let Some(relative) = self.relative_unit() {
            let quantity = registry.quantity(relative.quantity_id())?;
            let prefixed = quantity.unit_by_id(&names.id).ok_or_else(|| {
                UnitError::InvalidDerivation {
                    unit: self.id().to_string(),
                    reason: format!(
                        "relative quantity {} has no unit `{}`",
                        quantity.name(),
                        names.id
                    ),
                }
            })?;
            builder = builder.relative_unit(prefixed);
        }

        let (unit, _, _) = builder.finish(self.quantity_handle().clone())?;
        Ok(unit)
    }
}

fn prefixed_name(prefix: &SIPrefix, name: &str) -> String {
    for qualifier in NAME_QUALIFIERS {
        if let Some(rest) = name.strip_prefix(qualifier) {
            return format!("{qualifier}{}{rest}", prefix.name);
        }
    }
    format!("{}{name}", prefix.name)
}

fn check_factor(factor: f64) -> UnitResult<()> {
    if factor.is_finite() && factor != 0.0 {
        Ok(())
    } else {
        Err(UnitError::IllegalArgument(format!(
            "scale factor must be finite and non-zero, got {factor}"
        )))
    }
}

fn labelled(mut builder: UnitBuilder, labels: Labels) -> UnitBuilder {
    builder = builder
        .id(labels.id)
        .name(labels.name)
        .si_prefixes(labels.si_prefixes, 1);
    if let Some(textual) = labels.textual {
        builder = builder.textual_abbreviation(textual);
    }
    if let Some(display) = labels.display {
        builder = builder.display_abbreviation(display);
    }
    for a in labels.additional {
        builder = builder.additional_abbreviation(a);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::{CENTI, KILO, MEGA, MICRO, MILLI};
    use crate::SIDimensions;

    fn builtin() -> Registry {
        Registry::with_builtin_units().unwrap()
    }

    #[test]
    fn prefix_composition_returns_to_source_factor() {
        let mut r = Registry::new();
        let q = r.add_quantity("Length", SIDimensions::LENGTH).unwrap();
        let m = Unit::builder()
            .id("m")
            .name("meter")
            .scale(Scale::Identity)
            .unit_system(UnitSystem::SiBase)
            .quantity(q)
            .build(&mut r)
            .unwrap();
        let mm = m.derive_si(&mut r, &MILLI, 1, false).unwrap();
        let kmm = mm.derive_si(&mut r, &KILO, 1, false).unwrap();
        assert_eq!(kmm.id(), "kmm");
        assert!((kmm.scale().conversion_factor_to_standard_unit() - 1.0).abs() < 1e-15);
        // still not a second standard unit
        assert!(!kmm.is_base_si_unit());
        assert_eq!(r.quantity(q).unwrap().standard_unit(), Some(&m));
    }

    #[test]
    fn square_and_cubic_names() {
        let r = builtin();
        let km2 = r.unit("Area", "km2").unwrap();
        assert_eq!(km2.name(), "square kilometer");
        assert_eq!(km2.display_abbreviation(), "km\u{00B2}");
        assert!((km2.to_standard_unit(1.0) - 1.0e6).abs() < 1e-6);

        let cm3 = r.unit("Volume", "cm3").unwrap();
        assert_eq!(cm3.name(), "cubic centimeter");
        assert!((cm3.to_standard_unit(1.0) - 1.0e-6).abs() < 1e-18);
        assert_eq!(prefixed_name(&CENTI, "meter"), "centimeter");
    }

    #[test]
    fn micro_uses_both_symbols() {
        let r = builtin();
        let us = r.unit("Duration", "mus").unwrap();
        assert_eq!(us.textual_abbreviation(), "mus");
        assert_eq!(us.display_abbreviation(), "\u{03BC}s");
        assert_eq!(r.unit("Duration", "\u{03BC}s").unwrap(), us);
        assert_eq!(us.name(), MICRO.name.to_string() + "second");
    }

    #[test]
    fn kilo_family_strips_builtin_prefix() {
        let mut r = builtin();
        let mg = r.unit("Mass", "mg").unwrap();
        assert_eq!(mg.name(), "milligram");
        assert!((mg.to_standard_unit(1.0) - 1.0e-6).abs() < 1e-18);
        assert!(mg.is_generated());
        // no kilo-kilogram
        assert!(r.unit("Mass", "kkg").is_err());
        let mgram = r.unit("Mass", "Mg").unwrap();
        assert!((mgram.to_standard_unit(1.0) - 1.0e3).abs() < 1e-9);

        let ft = r.unit("Length", "ft").unwrap();
        let err = ft.derive_si_kilo(&mut r, &MEGA, 1, false).unwrap_err();
        assert!(matches!(err, UnitError::InvalidDerivation { .. }));
    }

    #[test]
    fn per_family_keeps_marker() {
        let mut r = builtin();
        let per_km = r.unit("LinearDensity", "/km").unwrap();
        assert_eq!(per_km.name(), "per kilometer");
        assert!((per_km.to_standard_unit(1.0) - 1.0e-3).abs() < 1e-18);

        let per_mum = r.unit("LinearDensity", "/mum").unwrap();
        assert_eq!(per_mum.display_abbreviation(), "/\u{03BC}m");
        assert!((per_mum.to_standard_unit(1.0) - 1.0e6).abs() < 1e-6);

        let m = r.unit("Length", "m").unwrap();
        let err = m.derive_per_si(&mut r, &MILLI, 1, false).unwrap_err();
        assert!(matches!(err, UnitError::InvalidDerivation { .. }));
    }

    #[test]
    fn linear_chains_multiply_against_standard_unit() {
        let r = builtin();
        let per_inch = r.unit("LinearDensity", "/in").unwrap();
        let per_meter = r.unit("LinearDensity", "/m").unwrap();
        let v = per_inch.convert(1.0, &per_meter).unwrap();
        assert!((v - 12.0 / 0.3048).abs() < 1e-9);
    }

    #[test]
    fn linear_from_offset_is_unsupported() {
        let mut r = builtin();
        let deg_c = r.unit("AbsoluteTemperature", "degC").unwrap();
        let err = deg_c
            .derive_linear(&mut r, 2.0, Labels::new("x", "x"), UnitSystem::Other)
            .unwrap_err();
        assert!(matches!(err, UnitError::UnsupportedDerivation { .. }));

        let kelvin = r.unit("Temperature", "K").unwrap();
        let err = deg_c
            .derive_linear_offset(&mut r, 1.0, 1.0, &kelvin, Labels::new("y", "y"), UnitSystem::Other)
            .unwrap_err();
        assert!(matches!(err, UnitError::UnsupportedDerivation { .. }));

        let err = kelvin
            .derive_linear(&mut r, f64::NAN, Labels::new("z", "z"), UnitSystem::Other)
            .unwrap_err();
        assert!(matches!(err, UnitError::IllegalArgument(_)));
    }

    #[test]
    fn offset_derivation_from_absolute_standard() {
        let mut r = builtin();
        let abs_k = r.unit("AbsoluteTemperature", "K").unwrap();
        let kelvin = r.unit("Temperature", "K").unwrap();
        let gas_mark = abs_k
            .derive_linear_offset(
                &mut r,
                1.0,
                100.0,
                &kelvin,
                Labels::new("K100", "kelvin plus one hundred"),
                UnitSystem::Other,
            )
            .unwrap();
        assert!(gas_mark.is_absolute());
        assert_eq!(gas_mark.to_standard_unit(0.0), 100.0);
        assert_eq!(gas_mark.relative_unit(), Some(&kelvin));
    }

    #[test]
    fn absolute_prefix_picks_relative_sibling() {
        let r = builtin();
        let km = r.unit("Position", "km").unwrap();
        assert!(km.is_absolute());
        assert_eq!(km.relative_unit().unwrap().id(), "km");
        assert_eq!(km.relative_unit().unwrap().quantity_name(), "Length");
        assert!((km.to_standard_unit(2.0) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_derivation_fails_and_leaves_source() {
        let mut r = builtin();
        let m = r.unit("Length", "m").unwrap();
        let err = m.derive_si(&mut r, &KILO, 1, true).unwrap_err();
        assert!(matches!(err, UnitError::DuplicateUnit { ref id, .. } if id == "km"));
        assert_eq!(r.unit("Length", "m").unwrap().scale(), Scale::Identity);
    }
}
