//! Built-in unit catalog.
//!
//! `install` registers every built-in quantity and unit into a
//! [`Registry`]; [`Registry::with_builtin_units`] calls it, and so does
//! the process-wide registry on first use.
//!
//! Each quantity also gets a module of `static`
//! [`UnitRef`](crate::registry::UnitRef) handles that
//! resolve against the process-wide registry on first dereference:
//!
//! ```
//! use metrum::units::{length, speed};
//!
//! let v = speed::KILOMETER_PER_HOUR.convert(36.0, &speed::METER_PER_SECOND).unwrap();
//! assert!((v - 10.0).abs() < 1e-12);
//! assert_eq!(length::MICROMETER.display_abbreviation(), "\u{03BC}m");
//! ```
//!
//! | Module | Quantities |
//! |--------|------------|
//! | `base` | Dimensionless, Length, Mass, Duration, ElectricalCurrent, Temperature, AmountOfSubstance, LuminousIntensity |
//! | `mechanics` | Area, Volume, Speed, Acceleration, Force, Energy, Power, Pressure, Frequency, Density, VolumetricFlow, LinearDensity |
//! | `electrical` | ElectricalCharge, ElectricalPotential, ElectricalResistance |
//! | `absolute` | Position, Time, AbsoluteTemperature |

use crate::error::UnitResult;
use crate::quantity::QuantityId;
use crate::registry::Registry;
use crate::scale::Scale;
use crate::unit::{Unit, UnitBuilder, UnitSystem};

macro_rules! handles {
    ($quantity:literal; $($(#[$doc:meta])* $name:ident = $id:literal),* $(,)?) => {
        $(
            $(#[$doc])*
            pub static $name: $crate::registry::UnitRef =
                $crate::registry::UnitRef::new($quantity, $id);
        )*
    };
}

mod absolute;
mod base;
mod electrical;
mod mechanics;

pub use absolute::{absolute_temperature, position, time};
pub use base::{
    amount_of_substance, current, dimensionless, duration, length, luminous_intensity, mass,
    temperature,
};
pub use electrical::{charge, potential, resistance};
pub use mechanics::{
    acceleration, area, density, energy, force, frequency, linear_density, power, pressure, speed,
    volume, volumetric_flow,
};

/// Register the whole catalog, base quantities first.
pub(crate) fn install(registry: &mut Registry) -> UnitResult<()> {
    base::install(registry)?;
    mechanics::install(registry)?;
    electrical::install(registry)?;
    absolute::install(registry)?;
    Ok(())
}

/// Builder for the identity-scaled standard unit of `quantity`.
fn standard(quantity: QuantityId, id: &str, name: &str, system: UnitSystem) -> UnitBuilder {
    Unit::builder()
        .id(id)
        .name(name)
        .scale(Scale::Identity)
        .unit_system(system)
        .quantity(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_quantity_has_a_standard_unit() {
        let r = Registry::with_builtin_units().unwrap();
        for q in r.quantities() {
            let standard = q.standard_unit().unwrap_or_else(|| panic!("{} has none", q.name()));
            assert!(standard.is_base_si_unit());
            assert_eq!(standard.dimensions(), q.dimensions());
        }
    }

    #[test]
    fn scales_invert_across_catalog() {
        let r = Registry::with_builtin_units().unwrap();
        for q in r.quantities() {
            for unit in q.units_by_id().values() {
                for v in [-3.5, 0.0, 1.0, 1234.5] {
                    let back = unit.from_standard_unit(unit.to_standard_unit(v));
                    let tol = 1e-9 * v.abs().max(1.0);
                    assert!((back - v).abs() <= tol, "{}/{}: {v} -> {back}", q.name(), unit.id());
                }
            }
        }
    }

    #[test]
    fn install_is_not_repeatable() {
        let mut r = Registry::with_builtin_units().unwrap();
        assert!(install(&mut r).is_err());
    }
}
