use crate::dimensions::SIDimensions;
use crate::error::UnitResult;
use crate::prefix::{SIPrefixes, MILLI};
use crate::registry::Registry;
use crate::unit::{Labels, UnitSystem};

use super::standard;

pub(super) fn install(r: &mut Registry) -> UnitResult<()> {
    let i = SIDimensions::CURRENT;
    let t = SIDimensions::TIME;
    let watt = SIDimensions::MASS
        .plus(SIDimensions::LENGTH.pow(2))
        .minus(t.pow(3));

    let q = r.add_quantity("ElectricalCharge", i.plus(t))?;
    let c = standard(q, "C", "coulomb", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    let ah = c.derive_linear(r, 3600.0, Labels::new("Ah", "ampere hour"), UnitSystem::Other)?;
    ah.derive_si(r, &MILLI, 1, false)?;

    let q = r.add_quantity("ElectricalPotential", watt.minus(i))?;
    standard(q, "V", "volt", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;

    let q = r.add_quantity("ElectricalResistance", watt.minus(i.pow(2)))?;
    standard(q, "ohm", "ohm", UnitSystem::SiDerived)
        .display_abbreviation("\u{03A9}")
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    Ok(())
}

pub mod charge {
    handles! { "ElectricalCharge";
        COULOMB = "C",
        MILLICOULOMB = "mC",
        AMPERE_HOUR = "Ah",
        MILLIAMPERE_HOUR = "mAh",
    }
}

pub mod potential {
    handles! { "ElectricalPotential";
        VOLT = "V",
        MILLIVOLT = "mV",
        KILOVOLT = "kV",
    }
}

pub mod resistance {
    handles! { "ElectricalResistance";
        OHM = "ohm",
        MILLIOHM = "mohm",
        KILOOHM = "kohm",
        MEGAOHM = "Mohm",
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;

    #[test]
    fn ohm_family_uses_both_symbols() {
        let r = Registry::with_builtin_units().unwrap();
        let kohm = r.unit("ElectricalResistance", "k\u{03A9}").unwrap();
        assert_eq!(kohm.id(), "kohm");
        assert_eq!(kohm.name(), "kiloohm");
        assert_eq!(kohm.to_standard_unit(4.7), 4700.0);
    }

    #[test]
    fn battery_capacity() {
        let r = Registry::with_builtin_units().unwrap();
        let mah = r.unit("ElectricalCharge", "mAh").unwrap();
        let c = r.unit("ElectricalCharge", "C").unwrap();
        assert!((mah.convert(1000.0, &c).unwrap() - 3600.0).abs() < 1e-9);
    }
}
