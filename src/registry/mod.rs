//! Quantity and unit registry.
//!
//! A [`Registry`] owns every [`Quantity`] and, through them, every
//! registered [`Unit`]. It is an explicit value: build an empty one with
//! [`Registry::new`], or one holding the built-in catalog with
//! [`Registry::with_builtin_units`]. The process-wide instance used by the
//! value containers and the static unit handles is reached through
//! [`global`], [`read`] and [`write`].
//!
//! # Example
//!
//! ```
//! use metrum::{Registry, SIDimensions};
//!
//! let mut registry = Registry::with_builtin_units().unwrap();
//! let newton = registry.unit_from_si_string("kg.m/s2").unwrap();
//! assert_eq!(newton.quantity_name(), "Force");
//!
//! // no named quantity for m2/s: an anonymous one is created
//! let diffusivity = registry.unit_from_si_string("m2/s").unwrap();
//! assert_eq!(diffusivity.id(), "m2/s");
//! assert!(diffusivity.is_base_si_unit());
//! ```

mod global;

pub use global::{global, read, unit, write, UnitRef};
pub(crate) use global::unit_for_dimensions;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::prefix::SIPrefixes;
use crate::quantity::{Quantity, QuantityHandle, QuantityId};
use crate::scale::Scale;
use crate::unit::{Unit, UnitSystem};

/// Every quantity and unit known to one process or test.
///
/// Quantities are kept in registration order; units within a quantity
/// are enumerable by id (sorted) and by abbreviation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    quantities: Vec<Quantity>,
    by_name: HashMap<String, QuantityId>,
    /// First relative quantity registered for each dimension vector.
    by_dimensions: HashMap<SIDimensions, QuantityId>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in catalog (see [`crate::units`]).
    ///
    /// Quantities are registered base quantities first, then derived
    /// mechanical, electrical and absolute ones, so that every derivation
    /// finds its source units.
    pub fn with_builtin_units() -> UnitResult<Self> {
        let mut registry = Self::new();
        crate::units::install(&mut registry)?;
        debug!(
            quantities = registry.len(),
            units = registry.quantities().map(Quantity::len).sum::<usize>(),
            "installed built-in unit catalog"
        );
        Ok(registry)
    }

    /// Register a relative quantity, or return the existing one with the
    /// same name and dimensions.
    pub fn add_quantity(&mut self, name: &str, dimensions: SIDimensions) -> UnitResult<QuantityId> {
        self.insert_quantity(name, dimensions, None)
    }

    /// Register an absolute quantity whose differences are measured in
    /// the `relative` quantity (Time for Duration, Position for Length).
    pub fn add_absolute_quantity(&mut self, name: &str, relative: QuantityId) -> UnitResult<QuantityId> {
        let rel = self.quantity(relative)?;
        if rel.is_absolute() {
            return Err(UnitError::IllegalArgument(format!(
                "relative quantity {} of {name} is itself absolute",
                rel.name()
            )));
        }
        let dimensions = rel.dimensions();
        self.insert_quantity(name, dimensions, Some(relative))
    }

    fn insert_quantity(
        &mut self,
        name: &str,
        dimensions: SIDimensions,
        relative: Option<QuantityId>,
    ) -> UnitResult<QuantityId> {
        if name.is_empty() {
            return Err(UnitError::IllegalArgument("quantity name is empty".to_string()));
        }
        if let Some(&id) = self.by_name.get(name) {
            let existing = &self.quantities[id.index()];
            if existing.dimensions() == dimensions && existing.relative_quantity() == relative {
                return Ok(id);
            }
            return Err(UnitError::IllegalArgument(format!(
                "quantity {name} already registered with dimensions {}",
                existing.dimensions()
            )));
        }

        let id = QuantityId(self.quantities.len() as u32);
        let handle = QuantityHandle {
            id,
            name: Arc::from(name),
            dimensions,
            relative,
        };
        self.quantities.push(Quantity::new(handle));
        self.by_name.insert(name.to_string(), id);
        if relative.is_none() {
            self.by_dimensions.entry(dimensions).or_insert(id);
        }
        debug!(quantity = name, %dimensions, absolute = relative.is_some(), "registered quantity");
        Ok(id)
    }

    pub fn quantity(&self, id: QuantityId) -> UnitResult<&Quantity> {
        self.quantities.get(id.index()).ok_or_else(|| {
            UnitError::IllegalArgument(format!("no quantity with index {}", id.index()))
        })
    }

    pub fn quantity_by_name(&self, name: &str) -> Option<&Quantity> {
        self.by_name.get(name).map(|id| &self.quantities[id.index()])
    }

    /// The relative quantity registered first for `dimensions`.
    pub fn quantity_with_dimensions(&self, dimensions: SIDimensions) -> Option<&Quantity> {
        self.by_dimensions
            .get(&dimensions)
            .map(|id| &self.quantities[id.index()])
    }

    /// Quantities in registration order.
    pub fn quantities(&self) -> impl Iterator<Item = &Quantity> {
        self.quantities.iter()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Register `unit` and the SI-prefix `family` derived from it, each
    /// prefix factor raised to `power`.
    ///
    /// The whole batch is validated before anything is inserted, so a
    /// collision anywhere in the family leaves the registry untouched.
    pub fn register_unit(&mut self, unit: Unit, family: SIPrefixes, power: i32) -> UnitResult<Unit> {
        let index = unit.quantity_id().index();
        match self.quantities.get(index) {
            Some(q) if q.name() == unit.quantity_name() => {}
            _ => {
                return Err(UnitError::IllegalArgument(format!(
                    "unit `{}` belongs to quantity {}, which is not in this registry",
                    unit.id(),
                    unit.quantity_name()
                )))
            }
        }

        let mut batch = Vec::with_capacity(1 + family.prefixes().len());
        batch.push(unit.clone());
        for prefix in family.prefixes() {
            let sibling = match family {
                SIPrefixes::Kilo => unit.si_kilo_prefixed(self, &prefix, power, true)?,
                SIPrefixes::PerUnit => unit.per_si_prefixed(self, &prefix, power, true)?,
                _ => unit.si_prefixed(self, &prefix, power, true)?,
            };
            batch.push(sibling);
        }

        let quantity = &mut self.quantities[index];
        quantity.check_free(&batch)?;
        for member in batch {
            trace!(quantity = quantity.name(), unit = member.id(), scale = %member.scale(), "registered unit");
            quantity.insert(member);
        }
        if !family.is_none() {
            debug!(quantity = quantity.name(), unit = unit.id(), ?family, power, "generated SI prefix family");
        }
        Ok(unit)
    }

    /// Remove a unit by id. Intended for tests; normal operation is
    /// append-only.
    pub fn unregister_unit(&mut self, quantity: &str, id: &str) -> Option<Unit> {
        let qid = *self.by_name.get(quantity)?;
        let removed = self.quantities[qid.index()].remove(id);
        if let Some(unit) = &removed {
            debug!(quantity, unit = unit.id(), "unregistered unit");
        }
        removed
    }

    /// Look up a unit of the named quantity by abbreviation or id.
    pub fn unit(&self, quantity: &str, key: &str) -> UnitResult<Unit> {
        let q = self
            .quantity_by_name(quantity)
            .ok_or_else(|| UnitError::IllegalArgument(format!("unknown quantity {quantity}")))?;
        q.resolve(key).cloned().ok_or_else(|| {
            UnitError::IllegalArgument(format!("quantity {quantity} has no unit `{key}`"))
        })
    }

    /// Standard unit of the relative quantity with these dimensions.
    pub fn unit_with_si_dimensions(&self, dimensions: SIDimensions) -> Option<Unit> {
        self.quantity_with_dimensions(dimensions)
            .and_then(Quantity::standard_unit)
            .cloned()
    }

    /// Standard unit for `dimensions`, creating an anonymous quantity and
    /// unit (both named by the dimension string) when none exists.
    pub fn lookup_or_create_unit_with_si_dimensions(
        &mut self,
        dimensions: SIDimensions,
    ) -> UnitResult<Unit> {
        if let Some(unit) = self.unit_with_si_dimensions(dimensions) {
            return Ok(unit);
        }
        let label = dimensions.to_string();
        let qid = match self.by_dimensions.get(&dimensions) {
            Some(&id) => id,
            None => self.add_quantity(&label, dimensions)?,
        };
        debug!(%dimensions, quantity = self.quantities[qid.index()].name(), "creating unit for SI dimensions");
        Unit::builder()
            .id(label.as_str())
            .name(label.as_str())
            .scale(Scale::Identity)
            .unit_system(UnitSystem::SiDerived)
            .quantity(qid)
            .generated(true)
            .build(self)
    }

    /// Resolve an SI-dimension string such as `kg.m/s2` to a unit.
    pub fn unit_from_si_string(&mut self, text: &str) -> UnitResult<Unit> {
        let dimensions = SIDimensions::parse(text)
            .map_err(|e| UnitError::IllegalArgument(format!("not an SI dimension string: {e}")))?;
        self.lookup_or_create_unit_with_si_dimensions(dimensions)
    }
}
