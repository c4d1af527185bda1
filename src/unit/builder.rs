use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::trace;

use crate::error::{UnitError, UnitResult};
use crate::prefix::SIPrefixes;
use crate::quantity::{QuantityHandle, QuantityId};
use crate::registry::Registry;
use crate::scale::Scale;

use super::{Unit, UnitData, UnitSystem};

/// Mutable description of a unit, frozen by [`UnitBuilder::build`].
///
/// `build` validates the required fields (id, name, scale, unit system,
/// quantity), fills in default abbreviations (textual defaults to the id,
/// display to the textual abbreviation) and registers the unit with its
/// quantity, generating the requested SI-prefix family.
///
/// ```
/// use metrum::{Registry, Scale, SIDimensions, SIPrefixes, Unit, UnitSystem};
///
/// let mut registry = Registry::new();
/// let length = registry.add_quantity("Length", SIDimensions::LENGTH).unwrap();
/// let meter = Unit::builder()
///     .id("m")
///     .name("meter")
///     .scale(Scale::Identity)
///     .unit_system(UnitSystem::SiBase)
///     .quantity(length)
///     .si_prefixes(SIPrefixes::All, 1)
///     .build(&mut registry)
///     .unwrap();
/// assert!(meter.is_base_si_unit());
/// let km = registry.unit("Length", "km").unwrap();
/// assert_eq!(km.scale().conversion_factor_to_standard_unit(), 1000.0);
/// ```
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    id: Option<String>,
    name: Option<String>,
    textual_abbreviation: Option<String>,
    display_abbreviation: Option<String>,
    additional_abbreviations: BTreeSet<String>,
    scale: Option<Scale>,
    unit_system: Option<UnitSystem>,
    quantity: Option<QuantityId>,
    si_prefixes: SIPrefixes,
    prefix_power: i32,
    generated: bool,
    relative_unit: Option<Unit>,
}

impl Default for UnitBuilder {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            textual_abbreviation: None,
            display_abbreviation: None,
            additional_abbreviations: BTreeSet::new(),
            scale: None,
            unit_system: None,
            quantity: None,
            si_prefixes: SIPrefixes::None,
            prefix_power: 1,
            generated: false,
            relative_unit: None,
        }
    }
}

impl UnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from an existing unit. The prefix family is reset to
    /// [`SIPrefixes::None`] so that a derived unit does not regenerate it.
    pub(crate) fn from_unit(unit: &Unit) -> Self {
        let data = &unit.0;
        Self {
            id: Some(data.id.clone()),
            name: Some(data.name.clone()),
            textual_abbreviation: Some(data.textual_abbreviation.clone()),
            display_abbreviation: Some(data.display_abbreviation.clone()),
            additional_abbreviations: data.additional_abbreviations.clone(),
            scale: Some(data.scale),
            unit_system: Some(data.unit_system),
            quantity: Some(data.quantity.id),
            si_prefixes: SIPrefixes::None,
            prefix_power: data.prefix_power,
            generated: data.generated,
            relative_unit: data.relative_unit.clone(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn textual_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.textual_abbreviation = Some(abbreviation.into());
        self
    }

    pub fn display_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.display_abbreviation = Some(abbreviation.into());
        self
    }

    pub fn additional_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.additional_abbreviations.insert(abbreviation.into());
        self
    }

    pub(crate) fn clear_abbreviations(mut self) -> Self {
        self.textual_abbreviation = None;
        self.display_abbreviation = None;
        self.additional_abbreviations.clear();
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = Some(unit_system);
        self
    }

    pub fn quantity(mut self, quantity: QuantityId) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Prefix family to generate at registration, and the power applied to
    /// each prefix factor (2 for areas, 3 for volumes).
    pub fn si_prefixes(mut self, family: SIPrefixes, power: i32) -> Self {
        self.si_prefixes = family;
        self.prefix_power = power;
        self
    }

    pub fn generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Required for units of absolute quantities.
    pub fn relative_unit(mut self, unit: &Unit) -> Self {
        self.relative_unit = Some(unit.clone());
        self
    }

    /// Validate, freeze, and register the unit.
    pub fn build(self, registry: &mut Registry) -> UnitResult<Unit> {
        let quantity_id = self.quantity.ok_or_else(|| missing("quantity"))?;
        let handle = registry.quantity(quantity_id)?.handle().clone();
        let (unit, family, power) = self.finish(handle)?;
        registry.register_unit(unit, family, power)
    }

    /// Validate and freeze without registering.
    pub(crate) fn finish(self, quantity: QuantityHandle) -> UnitResult<(Unit, SIPrefixes, i32)> {
        let id = non_empty(self.id, "id")?;
        let name = non_empty(self.name, "name")?;
        let scale = self.scale.ok_or_else(|| missing("scale"))?;
        let unit_system = self.unit_system.ok_or_else(|| missing("unit_system"))?;
        if self.quantity != Some(quantity.id) {
            return Err(UnitError::UnitConstruction {
                field: "quantity",
                reason: "quantity does not match the builder".to_string(),
            });
        }

        match (&quantity.relative, &self.relative_unit) {
            (Some(relative), Some(unit)) => {
                if unit.quantity_id() != *relative || unit.is_absolute() {
                    return Err(UnitError::UnitConstruction {
                        field: "relative_unit",
                        reason: format!(
                            "`{}` of {} is not a unit of the relative quantity of {}",
                            unit.id(),
                            unit.quantity_name(),
                            quantity.name
                        ),
                    });
                }
                if !scale.is_offset() {
                    return Err(UnitError::UnitConstruction {
                        field: "scale",
                        reason: "absolute units need an offset-linear scale".to_string(),
                    });
                }
            }
            (Some(_), None) => return Err(missing("relative_unit")),
            (None, Some(unit)) => {
                return Err(UnitError::UnitConstruction {
                    field: "relative_unit",
                    reason: format!(
                        "relative unit `{}` given for non-absolute quantity {}",
                        unit.id(),
                        quantity.name
                    ),
                });
            }
            (None, None) => {
                if scale.is_offset() {
                    return Err(UnitError::UnitConstruction {
                        field: "scale",
                        reason: "offset scales are only valid for absolute units".to_string(),
                    });
                }
            }
        }

        let textual = self.textual_abbreviation.unwrap_or_else(|| id.clone());
        let display = self.display_abbreviation.unwrap_or_else(|| textual.clone());
        trace!(quantity = %quantity.name, %id, %scale, "built unit");

        let unit = Unit(Arc::new(UnitData {
            id,
            name,
            textual_abbreviation: textual,
            display_abbreviation: display,
            additional_abbreviations: self.additional_abbreviations,
            scale,
            unit_system,
            generated: self.generated,
            si_prefixes: self.si_prefixes,
            prefix_power: self.prefix_power,
            quantity,
            relative_unit: self.relative_unit,
        }));
        Ok((unit, self.si_prefixes, self.prefix_power))
    }
}

fn missing(field: &'static str) -> UnitError {
    UnitError::UnitConstruction {
        field,
        reason: "required field not set".to_string(),
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> UnitResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(UnitError::UnitConstruction {
            field,
            reason: "field is empty".to_string(),
        }),
        None => Err(missing(field)),
    }
}
