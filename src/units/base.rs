use crate::dimensions::SIDimensions;
use crate::error::UnitResult;
use crate::prefix::{SIPrefixes, MICRO, MILLI, NANO};
use crate::registry::Registry;
use crate::unit::{Labels, UnitSystem};

use super::standard;

pub(super) fn install(r: &mut Registry) -> UnitResult<()> {
    // Dimensionless
    let q = r.add_quantity("Dimensionless", SIDimensions::DIMENSIONLESS)?;
    let one = standard(q, "1", "one", UnitSystem::SiDerived)
        .display_abbreviation("")
        .build(r)?;
    one.derive_linear(r, 0.01, Labels::new("percent", "percent").textual("%"), UnitSystem::Other)?;
    one.derive_linear(r, 1.0e-6, Labels::new("ppm", "parts per million"), UnitSystem::Other)?;

    // Length
    let q = r.add_quantity("Length", SIDimensions::LENGTH)?;
    let m = standard(q, "m", "meter", UnitSystem::SiBase)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    let ft = m.derive_linear(r, 0.3048, Labels::new("ft", "foot").alias("feet"), UnitSystem::Imperial)?;
    ft.derive_linear(r, 1.0 / 12.0, Labels::new("in", "inch").alias("inches"), UnitSystem::Imperial)?;
    ft.derive_linear(r, 3.0, Labels::new("yd", "yard"), UnitSystem::Imperial)?;
    m.derive_linear(r, 1609.344, Labels::new("mi", "mile"), UnitSystem::Imperial)?;
    m.derive_linear(r, 1852.0, Labels::new("NM", "nautical mile").alias("nmi"), UnitSystem::Other)?;
    m.derive_linear(
        r,
        149_597_870_700.0,
        Labels::new("AU", "astronomical unit").alias("au"),
        UnitSystem::SiAccepted,
    )?;
    m.derive_linear(r, 9_460_730_472_580_800.0, Labels::new("ly", "light year"), UnitSystem::Other)?;
    m.derive_linear(r, 3.085_677_581_491_367_3e16, Labels::new("pc", "parsec"), UnitSystem::Other)?;
    m.derive_linear(
        r,
        1.0e-10,
        Labels::new("Angstrom", "angstrom").textual("A").display("\u{00C5}"),
        UnitSystem::Other,
    )?;

    // Mass
    let q = r.add_quantity("Mass", SIDimensions::MASS)?;
    let kg = standard(q, "kg", "kilogram", UnitSystem::SiBase)
        .si_prefixes(SIPrefixes::Kilo, 1)
        .build(r)?;
    kg.derive_linear(r, 1.0e-3, Labels::new("g", "gram"), UnitSystem::SiBase)?;
    kg.derive_linear(r, 1.0e3, Labels::new("t", "tonne").alias("ton"), UnitSystem::SiAccepted)?;
    let lb = kg.derive_linear(r, 0.453_592_37, Labels::new("lb", "pound").alias("lbs"), UnitSystem::Imperial)?;
    lb.derive_linear(r, 1.0 / 16.0, Labels::new("oz", "ounce"), UnitSystem::Imperial)?;
    kg.derive_linear(r, 1.660_539_066_60e-27, Labels::new("Da", "dalton").alias("u"), UnitSystem::SiAccepted)?;

    // Duration
    let q = r.add_quantity("Duration", SIDimensions::TIME)?;
    let s = standard(q, "s", "second", UnitSystem::SiBase)
        .additional_abbreviation("sec")
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    s.derive_linear(r, 60.0, Labels::new("min", "minute"), UnitSystem::SiAccepted)?;
    s.derive_linear(r, 3600.0, Labels::new("h", "hour").alias("hr"), UnitSystem::SiAccepted)?;
    s.derive_linear(r, 86_400.0, Labels::new("day", "day").alias("d"), UnitSystem::SiAccepted)?;
    s.derive_linear(r, 604_800.0, Labels::new("wk", "week"), UnitSystem::Other)?;

    // ElectricalCurrent
    let q = r.add_quantity("ElectricalCurrent", SIDimensions::CURRENT)?;
    standard(q, "A", "ampere", UnitSystem::SiBase)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;

    // Temperature (differences)
    let q = r.add_quantity("Temperature", SIDimensions::TEMPERATURE)?;
    let k = standard(q, "K", "kelvin", UnitSystem::SiBase).build(r)?;
    for prefix in [MILLI, MICRO, NANO] {
        k.derive_si(r, &prefix, 1, true)?;
    }
    k.derive_linear(
        r,
        1.0,
        Labels::new("degC", "degree Celsius").display("\u{00B0}C"),
        UnitSystem::SiDerived,
    )?;
    k.derive_linear(
        r,
        5.0 / 9.0,
        Labels::new("degF", "degree Fahrenheit").display("\u{00B0}F"),
        UnitSystem::Imperial,
    )?;
    k.derive_linear(
        r,
        5.0 / 9.0,
        Labels::new("degR", "degree Rankine").display("\u{00B0}R"),
        UnitSystem::Imperial,
    )?;

    // AmountOfSubstance, LuminousIntensity
    let q = r.add_quantity("AmountOfSubstance", SIDimensions::AMOUNT_OF_SUBSTANCE)?;
    standard(q, "mol", "mole", UnitSystem::SiBase)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    let q = r.add_quantity("LuminousIntensity", SIDimensions::LUMINOUS_INTENSITY)?;
    standard(q, "cd", "candela", UnitSystem::SiBase)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    Ok(())
}

pub mod dimensionless {
    handles! { "Dimensionless";
        ONE = "1",
        PERCENT = "percent",
        PPM = "ppm",
    }
}

pub mod length {
    handles! { "Length";
        METER = "m",
        KILOMETER = "km",
        CENTIMETER = "cm",
        MILLIMETER = "mm",
        MICROMETER = "mum",
        NANOMETER = "nm",
        FOOT = "ft",
        INCH = "in",
        YARD = "yd",
        MILE = "mi",
        NAUTICAL_MILE = "NM",
        ASTRONOMICAL_UNIT = "AU",
        LIGHT_YEAR = "ly",
        PARSEC = "pc",
        ANGSTROM = "Angstrom",
    }
}

pub mod mass {
    handles! { "Mass";
        KILOGRAM = "kg",
        GRAM = "g",
        MILLIGRAM = "mg",
        MICROGRAM = "mug",
        TONNE = "t",
        POUND = "lb",
        OUNCE = "oz",
        DALTON = "Da",
    }
}

pub mod duration {
    handles! { "Duration";
        SECOND = "s",
        MILLISECOND = "ms",
        MICROSECOND = "mus",
        NANOSECOND = "ns",
        MINUTE = "min",
        HOUR = "h",
        DAY = "day",
        WEEK = "wk",
    }
}

pub mod current {
    handles! { "ElectricalCurrent";
        AMPERE = "A",
        MILLIAMPERE = "mA",
        MICROAMPERE = "muA",
        KILOAMPERE = "kA",
    }
}

pub mod temperature {
    handles! { "Temperature";
        KELVIN = "K",
        MILLIKELVIN = "mK",
        DEGREE_CELSIUS = "degC",
        DEGREE_FAHRENHEIT = "degF",
        DEGREE_RANKINE = "degR",
    }
}

pub mod amount_of_substance {
    handles! { "AmountOfSubstance";
        MOLE = "mol",
        MILLIMOLE = "mmol",
    }
}

pub mod luminous_intensity {
    handles! { "LuminousIntensity";
        CANDELA = "cd",
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Registry;

    #[test]
    fn imperial_lengths() {
        let r = Registry::with_builtin_units().unwrap();
        let m = r.unit("Length", "m").unwrap();
        let cases = [("in", 0.0254), ("yd", 0.9144), ("mi", 1609.344), ("feet", 0.3048)];
        for (key, expected) in cases {
            let v = r.unit("Length", key).unwrap().convert(1.0, &m).unwrap();
            assert!((v - expected).abs() < 1e-12, "{key}: {v}");
        }
    }

    #[test]
    fn masses() {
        let r = Registry::with_builtin_units().unwrap();
        let g = r.unit("Mass", "g").unwrap();
        let oz = r.unit("Mass", "oz").unwrap();
        assert!((oz.convert(1.0, &g).unwrap() - 28.349523125).abs() < 1e-9);
        assert!(!g.is_generated());
        assert!(r.unit("Mass", "mug").unwrap().is_generated());
    }

    #[test]
    fn durations_and_temperatures() {
        let r = Registry::with_builtin_units().unwrap();
        let h = r.unit("Duration", "hr").unwrap();
        assert_eq!(h.to_standard_unit(1.5), 5400.0);
        let degf = r.unit("Temperature", "\u{00B0}F").unwrap();
        let k = r.unit("Temperature", "K").unwrap();
        assert!((degf.convert(9.0, &k).unwrap() - 5.0).abs() < 1e-12);
        assert!((r.unit("Temperature", "mK").unwrap().to_standard_unit(1.0) - 1e-3).abs() < 1e-18);
    }

    #[test]
    fn dimensionless_ratios() {
        let r = Registry::with_builtin_units().unwrap();
        let pct = r.unit("Dimensionless", "%").unwrap();
        assert_eq!(pct.id(), "percent");
        assert!((pct.to_standard_unit(50.0) - 0.5).abs() < 1e-15);
        assert_eq!(r.unit("Dimensionless", "").unwrap().id(), "1");
    }
}
