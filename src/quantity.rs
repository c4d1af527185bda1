//! Quantity kinds and their unit registries.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;

/// Stable index of a quantity within its [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuantityId(pub(crate) u32);

impl QuantityId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The identifying, immutable part of a quantity, shared by its units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuantityHandle {
    pub(crate) id: QuantityId,
    pub(crate) name: Arc<str>,
    pub(crate) dimensions: SIDimensions,
    /// For absolute quantities, the quantity of differences.
    pub(crate) relative: Option<QuantityId>,
}

impl QuantityHandle {
    #[inline]
    pub(crate) fn is_absolute(&self) -> bool {
        self.relative.is_some()
    }
}

/// One physical quantity (Length, Power, ...) with every unit registered
/// for it.
///
/// Ids and abbreviations are unique within a quantity, and exactly one
/// unit (the standard unit) carries the identity scale.
#[derive(Debug, Clone)]
pub struct Quantity {
    handle: QuantityHandle,
    standard_unit: Option<Unit>,
    units_by_id: BTreeMap<String, Unit>,
    units_by_abbreviation: BTreeMap<String, Unit>,
}

impl Quantity {
    pub(crate) fn new(handle: QuantityHandle) -> Self {
        Self {
            handle,
            standard_unit: None,
            units_by_id: BTreeMap::new(),
            units_by_abbreviation: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> QuantityId {
        self.handle.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.handle.name
    }

    #[inline]
    pub fn dimensions(&self) -> SIDimensions {
        self.handle.dimensions
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.handle.is_absolute()
    }

    /// For absolute quantities, the quantity measuring differences.
    #[inline]
    pub fn relative_quantity(&self) -> Option<QuantityId> {
        self.handle.relative
    }

    pub(crate) fn handle(&self) -> &QuantityHandle {
        &self.handle
    }

    #[inline]
    pub fn standard_unit(&self) -> Option<&Unit> {
        self.standard_unit.as_ref()
    }

    /// All units, sorted by id.
    pub fn units_by_id(&self) -> &BTreeMap<String, Unit> {
        &self.units_by_id
    }

    /// All units, keyed by every abbreviation they answer to.
    pub fn units_by_abbreviation(&self) -> &BTreeMap<String, Unit> {
        &self.units_by_abbreviation
    }

    pub fn unit_by_id(&self, id: &str) -> Option<&Unit> {
        self.units_by_id.get(id)
    }

    pub fn unit_by_abbreviation(&self, abbreviation: &str) -> Option<&Unit> {
        self.units_by_abbreviation.get(abbreviation)
    }

    /// Resolve a unit by abbreviation first, then by id.
    pub fn resolve(&self, key: &str) -> Option<&Unit> {
        self.unit_by_abbreviation(key).or_else(|| self.unit_by_id(key))
    }

    pub fn len(&self) -> usize {
        self.units_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units_by_id.is_empty()
    }

    fn duplicate(&self, id: &str, reason: String) -> UnitError {
        UnitError::DuplicateUnit {
            quantity: self.name().to_string(),
            id: id.to_string(),
            reason,
        }
    }

    /// Check that every unit of `batch` could be inserted, both against the
    /// registered units and against the rest of the batch.
    pub(crate) fn check_free(&self, batch: &[Unit]) -> UnitResult<()> {
        let mut ids: BTreeMap<&str, &Unit> = BTreeMap::new();
        let mut abbreviations: BTreeMap<&str, &Unit> = BTreeMap::new();
        let mut has_standard = self.standard_unit.is_some();

        for unit in batch {
            if unit.quantity_id() != self.id() {
                return Err(UnitError::IllegalArgument(format!(
                    "unit `{}` belongs to {}, not {}",
                    unit.id(),
                    unit.quantity_name(),
                    self.name()
                )));
            }
            if self.units_by_id.contains_key(unit.id()) || ids.contains_key(unit.id()) {
                return Err(self.duplicate(unit.id(), "id already registered".to_string()));
            }
            ids.insert(unit.id(), unit);

            for abbreviation in unit.abbreviations() {
                let owner = self
                    .units_by_abbreviation
                    .get(abbreviation)
                    .or_else(|| abbreviations.get(abbreviation).copied());
                if let Some(owner) = owner {
                    return Err(self.duplicate(
                        unit.id(),
                        format!("abbreviation `{abbreviation}` already used by `{}`", owner.id()),
                    ));
                }
            }
            for abbreviation in unit.abbreviations() {
                abbreviations.insert(abbreviation, unit);
            }

            if unit.is_base_si_unit() {
                if has_standard {
                    let current = self
                        .standard_unit
                        .as_ref()
                        .map(|u| u.id().to_string())
                        .unwrap_or_default();
                    return Err(self.duplicate(
                        unit.id(),
                        format!("standard unit already registered `{current}`"),
                    ));
                }
                has_standard = true;
            }
        }
        Ok(())
    }

    /// Insert a unit previously accepted by [`Quantity::check_free`].
    pub(crate) fn insert(&mut self, unit: Unit) {
        for abbreviation in unit.abbreviations() {
            self.units_by_abbreviation
                .insert(abbreviation.to_string(), unit.clone());
        }
        if unit.is_base_si_unit() {
            self.standard_unit = Some(unit.clone());
        }
        self.units_by_id.insert(unit.id().to_string(), unit);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Unit> {
        let unit = self.units_by_id.remove(id)?;
        self.units_by_abbreviation.retain(|_, u| u != &unit);
        if self.standard_unit.as_ref() == Some(&unit) {
            self.standard_unit = None;
        }
        Some(unit)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;
    use crate::scale::Scale;
    use crate::unit::{Unit, UnitSystem};
    use crate::{SIDimensions, UnitError};

    #[test]
    fn lookup_by_id_and_abbreviation() {
        let r = Registry::with_builtin_units().unwrap();
        let length = r.quantity_by_name("Length").unwrap();
        assert_eq!(length.dimensions(), SIDimensions::LENGTH);
        assert_eq!(length.standard_unit().unwrap().id(), "m");
        assert_eq!(length.unit_by_abbreviation("\u{03BC}m").unwrap().id(), "mum");
        assert_eq!(length.resolve("km").unwrap().name(), "kilometer");
        assert!(length.resolve("furlong").is_none());
        assert!(length.len() > 20);
        // sorted snapshot
        let ids: Vec<&String> = length.units_by_id().keys().collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn second_standard_unit_is_rejected() {
        let mut r = Registry::new();
        let q = r.add_quantity("Stuff", SIDimensions::MONEY).unwrap();
        Unit::builder()
            .id("a")
            .name("alpha")
            .scale(Scale::Identity)
            .unit_system(UnitSystem::Other)
            .quantity(q)
            .build(&mut r)
            .unwrap();
        let err = Unit::builder()
            .id("b")
            .name("beta")
            .scale(Scale::Identity)
            .unit_system(UnitSystem::Other)
            .quantity(q)
            .build(&mut r)
            .unwrap_err();
        assert!(matches!(err, UnitError::DuplicateUnit { ref id, .. } if id == "b"));
    }

    #[test]
    fn remove_clears_all_keys() {
        let mut r = Registry::with_builtin_units().unwrap();
        let removed = r.unregister_unit("Length", "mi").unwrap();
        assert_eq!(removed.name(), "mile");
        let length = r.quantity_by_name("Length").unwrap();
        assert!(length.unit_by_id("mi").is_none());
        assert!(length.unit_by_abbreviation("mi").is_none());
        assert!(r.unregister_unit("Length", "mi").is_none());
    }
}
