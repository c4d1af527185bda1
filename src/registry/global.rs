//! The process-wide registry.
//!
//! Created lazily on first access with the built-in catalog installed.
//! Reads take a shared lock; registering new units takes the exclusive
//! lock. Lock poisoning is ignored because the registry is only ever
//! mutated through operations that validate before inserting.

use std::fmt;
use std::ops::Deref;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dimensions::SIDimensions;
use crate::error::UnitResult;
use crate::unit::Unit;

use super::Registry;

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

/// The process-wide registry, initialised with
/// [`Registry::with_builtin_units`] on first use.
///
/// # Panics
///
/// If the built-in catalog fails to install, which is a bug in the
/// catalog itself.
pub fn global() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| {
        let registry = Registry::with_builtin_units()
            .unwrap_or_else(|e| panic!("built-in unit catalog failed to install: {e}"));
        RwLock::new(registry)
    })
}

/// Shared access to the process-wide registry.
///
/// Do not hold the guard across calls that may create units (container
/// arithmetic with an unnamed result, [`write`]).
pub fn read() -> RwLockReadGuard<'static, Registry> {
    global().read().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive access to the process-wide registry, for registering
/// application-specific units.
///
/// ```
/// use metrum::registry;
/// use metrum::{Labels, UnitSystem};
///
/// let mut reg = registry::write();
/// let foot = reg.unit("Length", "ft").unwrap();
/// let chain = foot
///     .derive_linear(&mut reg, 66.0, Labels::new("ch", "chain"), UnitSystem::Imperial)
///     .unwrap();
/// drop(reg);
/// assert_eq!(registry::read().unit("Length", "ch").unwrap(), chain);
/// ```
pub fn write() -> RwLockWriteGuard<'static, Registry> {
    global().write().unwrap_or_else(PoisonError::into_inner)
}

/// Look up a unit of the process-wide registry.
pub fn unit(quantity: &str, key: &str) -> UnitResult<Unit> {
    read().unit(quantity, key)
}

/// Standard unit for `dimensions`, created on demand.
pub(crate) fn unit_for_dimensions(dimensions: SIDimensions) -> UnitResult<Unit> {
    if let Some(unit) = read().unit_with_si_dimensions(dimensions) {
        return Ok(unit);
    }
    write().lookup_or_create_unit_with_si_dimensions(dimensions)
}

/// A lazily resolved handle to a unit of the process-wide registry.
///
/// The catalog exposes its units as `static` handles:
///
/// ```
/// use metrum::units::length::{FOOT, METER};
///
/// assert_eq!(METER.id(), "m");
/// assert!((FOOT.convert(1.0, &METER).unwrap() - 0.3048).abs() < 1e-15);
/// ```
///
/// Dereferencing panics if the unit is missing from the registry, which
/// can only happen when a catalog entry was unregistered.
pub struct UnitRef {
    quantity: &'static str,
    id: &'static str,
    cell: OnceLock<Unit>,
}

impl UnitRef {
    pub const fn new(quantity: &'static str, id: &'static str) -> Self {
        Self {
            quantity,
            id,
            cell: OnceLock::new(),
        }
    }

    pub fn quantity_name(&self) -> &'static str {
        self.quantity
    }

    /// Resolve without panicking.
    pub fn try_get(&self) -> UnitResult<&Unit> {
        if let Some(unit) = self.cell.get() {
            return Ok(unit);
        }
        let resolved = unit(self.quantity, self.id)?;
        Ok(self.cell.get_or_init(|| resolved))
    }
}

impl Deref for UnitRef {
    type Target = Unit;

    fn deref(&self) -> &Unit {
        self.try_get().unwrap_or_else(|e| {
            panic!("built-in unit {}/{} unavailable: {e}", self.quantity, self.id)
        })
    }
}

impl fmt::Debug for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitRef")
            .field("quantity", &self.quantity)
            .field("id", &self.id)
            .finish()
    }
}
