use crate::dimensions::SIDimensions;
use crate::error::UnitResult;
use crate::prefix::{SIPrefixes, KILO, MILLI};
use crate::registry::Registry;
use crate::unit::{Labels, UnitSystem};

use super::standard;

const L: SIDimensions = SIDimensions::LENGTH;
const M: SIDimensions = SIDimensions::MASS;
const T: SIDimensions = SIDimensions::TIME;

const FOOT: f64 = 0.3048;
const POUND: f64 = 0.453_592_37;
const US_GALLON: f64 = 3.785_411_784e-3;
const STANDARD_GRAVITY: f64 = 9.806_65;

pub(super) fn install(r: &mut Registry) -> UnitResult<()> {
    // Area
    let q = r.add_quantity("Area", L.pow(2))?;
    let m2 = standard(q, "m2", "square meter", UnitSystem::SiDerived)
        .display_abbreviation("m\u{00B2}")
        .si_prefixes(SIPrefixes::All, 2)
        .build(r)?;
    m2.derive_linear(r, 1.0e4, Labels::new("ha", "hectare"), UnitSystem::SiAccepted)?;
    m2.derive_linear(r, 4_046.856_422_4, Labels::new("ac", "acre"), UnitSystem::Imperial)?;
    m2.derive_linear(
        r,
        FOOT * FOOT,
        Labels::new("ft2", "square foot").display("ft\u{00B2}"),
        UnitSystem::Imperial,
    )?;
    m2.derive_linear(
        r,
        0.0254 * 0.0254,
        Labels::new("in2", "square inch").display("in\u{00B2}"),
        UnitSystem::Imperial,
    )?;
    m2.derive_linear(
        r,
        1609.344 * 1609.344,
        Labels::new("mi2", "square mile").display("mi\u{00B2}"),
        UnitSystem::Imperial,
    )?;

    // Volume
    let q = r.add_quantity("Volume", L.pow(3))?;
    let m3 = standard(q, "m3", "cubic meter", UnitSystem::SiDerived)
        .display_abbreviation("m\u{00B3}")
        .si_prefixes(SIPrefixes::All, 3)
        .build(r)?;
    m3.derive_linear(
        r,
        1.0e-3,
        Labels::new("L", "liter").alias("l").prefixes(SIPrefixes::Negative),
        UnitSystem::SiAccepted,
    )?;
    m3.derive_linear(
        r,
        US_GALLON,
        Labels::new("gal", "US gallon"),
        UnitSystem::UsCustomary,
    )?;
    m3.derive_linear(
        r,
        FOOT * FOOT * FOOT,
        Labels::new("ft3", "cubic foot").display("ft\u{00B3}"),
        UnitSystem::Imperial,
    )?;
    m3.derive_linear(
        r,
        1.638_706_4e-5,
        Labels::new("in3", "cubic inch").display("in\u{00B3}"),
        UnitSystem::Imperial,
    )?;

    // Speed
    let q = r.add_quantity("Speed", L.minus(T))?;
    let mps = standard(q, "m/s", "meter per second", UnitSystem::SiDerived).build(r)?;
    mps.derive_linear(r, 1.0 / 3.6, Labels::new("km/h", "kilometer per hour").alias("kph"), UnitSystem::SiAccepted)?;
    mps.derive_linear(r, 0.447_04, Labels::new("mi/h", "mile per hour").alias("mph"), UnitSystem::Imperial)?;
    mps.derive_linear(r, 1852.0 / 3600.0, Labels::new("kt", "knot"), UnitSystem::Other)?;
    mps.derive_linear(r, FOOT, Labels::new("ft/s", "foot per second"), UnitSystem::Imperial)?;

    // Acceleration
    let q = r.add_quantity("Acceleration", L.minus(T.pow(2)))?;
    let mps2 = standard(q, "m/s2", "meter per second squared", UnitSystem::SiDerived)
        .display_abbreviation("m/s\u{00B2}")
        .build(r)?;
    mps2.derive_linear(
        r,
        STANDARD_GRAVITY,
        Labels::new("g0", "standard gravity").display("g\u{2080}"),
        UnitSystem::Other,
    )?;
    mps2.derive_linear(r, 0.01, Labels::new("Gal", "gal"), UnitSystem::Cgs)?;
    mps2.derive_linear(
        r,
        FOOT,
        Labels::new("ft/s2", "foot per second squared").display("ft/s\u{00B2}"),
        UnitSystem::Imperial,
    )?;

    // Force
    let q = r.add_quantity("Force", M.plus(L).minus(T.pow(2)))?;
    let n = standard(q, "N", "newton", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    n.derive_linear(r, 1.0e-5, Labels::new("dyn", "dyne"), UnitSystem::Cgs)?;
    n.derive_linear(r, POUND * STANDARD_GRAVITY, Labels::new("lbf", "pound force"), UnitSystem::Imperial)?;
    n.derive_linear(r, STANDARD_GRAVITY, Labels::new("kgf", "kilogram force"), UnitSystem::Other)?;

    // Energy
    let q = r.add_quantity("Energy", M.plus(L.pow(2)).minus(T.pow(2)))?;
    let j = standard(q, "J", "joule", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    j.derive_linear(
        r,
        3600.0,
        Labels::new("Wh", "watt hour").prefixes(SIPrefixes::Positive),
        UnitSystem::SiAccepted,
    )?;
    j.derive_linear(
        r,
        1.602_176_634e-19,
        Labels::new("eV", "electronvolt").prefixes(SIPrefixes::All),
        UnitSystem::SiAccepted,
    )?;
    let cal = j.derive_linear(r, 4.184, Labels::new("cal", "calorie"), UnitSystem::Other)?;
    cal.derive_si(r, &KILO, 1, false)?;
    j.derive_linear(r, 1_055.055_852_62, Labels::new("BTU", "British thermal unit"), UnitSystem::Imperial)?;
    j.derive_linear(r, 1.0e-7, Labels::new("erg", "erg"), UnitSystem::Cgs)?;

    // Power
    let q = r.add_quantity("Power", M.plus(L.pow(2)).minus(T.pow(3)))?;
    let w = standard(q, "W", "watt", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    w.derive_linear(r, 745.699_871_582_270_2, Labels::new("hp", "horsepower"), UnitSystem::Imperial)?;

    // Pressure
    let q = r.add_quantity("Pressure", M.minus(L).minus(T.pow(2)))?;
    let pa = standard(q, "Pa", "pascal", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    let bar = pa.derive_linear(r, 1.0e5, Labels::new("bar", "bar"), UnitSystem::Other)?;
    bar.derive_si(r, &MILLI, 1, false)?;
    pa.derive_linear(r, 101_325.0, Labels::new("atm", "standard atmosphere"), UnitSystem::Other)?;
    pa.derive_linear(
        r,
        POUND * STANDARD_GRAVITY / (0.0254 * 0.0254),
        Labels::new("psi", "pound per square inch"),
        UnitSystem::Imperial,
    )?;
    pa.derive_linear(r, 133.322_387_415, Labels::new("mmHg", "millimeter of mercury"), UnitSystem::Other)?;
    pa.derive_linear(r, 101_325.0 / 760.0, Labels::new("Torr", "torr"), UnitSystem::Other)?;

    // Frequency
    let q = r.add_quantity("Frequency", T.negate())?;
    let hz = standard(q, "Hz", "hertz", UnitSystem::SiDerived)
        .si_prefixes(SIPrefixes::All, 1)
        .build(r)?;
    hz.derive_linear(r, 1.0 / 60.0, Labels::new("rpm", "revolution per minute"), UnitSystem::Other)?;

    // Density
    let q = r.add_quantity("Density", M.minus(L.pow(3)))?;
    let kgm3 = standard(q, "kg/m3", "kilogram per cubic meter", UnitSystem::SiDerived)
        .display_abbreviation("kg/m\u{00B3}")
        .build(r)?;
    kgm3.derive_linear(
        r,
        1.0e3,
        Labels::new("g/cm3", "gram per cubic centimeter").display("g/cm\u{00B3}"),
        UnitSystem::Cgs,
    )?;
    kgm3.derive_linear(
        r,
        POUND / (FOOT * FOOT * FOOT),
        Labels::new("lb/ft3", "pound per cubic foot").display("lb/ft\u{00B3}"),
        UnitSystem::Imperial,
    )?;

    // VolumetricFlow
    let q = r.add_quantity("VolumetricFlow", L.pow(3).minus(T))?;
    let m3s = standard(q, "m3/s", "cubic meter per second", UnitSystem::SiDerived)
        .display_abbreviation("m\u{00B3}/s")
        .build(r)?;
    m3s.derive_linear(r, 1.0e-3, Labels::new("L/s", "liter per second"), UnitSystem::SiAccepted)?;
    m3s.derive_linear(r, 1.0e-3 / 60.0, Labels::new("L/min", "liter per minute"), UnitSystem::SiAccepted)?;
    m3s.derive_linear(r, US_GALLON / 60.0, Labels::new("gal/min", "US gallon per minute").alias("gpm"), UnitSystem::UsCustomary)?;

    // LinearDensity (reciprocal length)
    let q = r.add_quantity("LinearDensity", L.negate())?;
    let per_m = standard(q, "/m", "per meter", UnitSystem::SiDerived)
        .additional_abbreviation("1/m")
        .si_prefixes(SIPrefixes::PerUnit, 1)
        .build(r)?;
    let per_ft = per_m.derive_linear(r, 1.0 / FOOT, Labels::new("/ft", "per foot"), UnitSystem::Imperial)?;
    per_ft.derive_linear(r, 12.0, Labels::new("/in", "per inch"), UnitSystem::Imperial)?;
    per_m.derive_linear(r, 1.0 / 1609.344, Labels::new("/mi", "per mile"), UnitSystem::Imperial)?;
    Ok(())
}

pub mod area {
    handles! { "Area";
        SQUARE_METER = "m2",
        SQUARE_KILOMETER = "km2",
        SQUARE_CENTIMETER = "cm2",
        SQUARE_MILLIMETER = "mm2",
        HECTARE = "ha",
        ACRE = "ac",
        SQUARE_FOOT = "ft2",
        SQUARE_INCH = "in2",
        SQUARE_MILE = "mi2",
    }
}

pub mod volume {
    handles! { "Volume";
        CUBIC_METER = "m3",
        CUBIC_CENTIMETER = "cm3",
        LITER = "L",
        MILLILITER = "mL",
        US_GALLON = "gal",
        CUBIC_FOOT = "ft3",
        CUBIC_INCH = "in3",
    }
}

pub mod speed {
    handles! { "Speed";
        METER_PER_SECOND = "m/s",
        KILOMETER_PER_HOUR = "km/h",
        MILE_PER_HOUR = "mi/h",
        KNOT = "kt",
        FOOT_PER_SECOND = "ft/s",
    }
}

pub mod acceleration {
    handles! { "Acceleration";
        METER_PER_SECOND_SQUARED = "m/s2",
        STANDARD_GRAVITY = "g0",
        GAL = "Gal",
        FOOT_PER_SECOND_SQUARED = "ft/s2",
    }
}

pub mod force {
    handles! { "Force";
        NEWTON = "N",
        KILONEWTON = "kN",
        DYNE = "dyn",
        POUND_FORCE = "lbf",
        KILOGRAM_FORCE = "kgf",
    }
}

pub mod energy {
    handles! { "Energy";
        JOULE = "J",
        KILOJOULE = "kJ",
        MEGAJOULE = "MJ",
        WATT_HOUR = "Wh",
        KILOWATT_HOUR = "kWh",
        ELECTRONVOLT = "eV",
        CALORIE = "cal",
        KILOCALORIE = "kcal",
        BTU = "BTU",
        ERG = "erg",
    }
}

pub mod power {
    handles! { "Power";
        WATT = "W",
        KILOWATT = "kW",
        MEGAWATT = "MW",
        HORSEPOWER = "hp",
    }
}

pub mod pressure {
    handles! { "Pressure";
        PASCAL = "Pa",
        HECTOPASCAL = "hPa",
        KILOPASCAL = "kPa",
        BAR = "bar",
        MILLIBAR = "mbar",
        ATMOSPHERE = "atm",
        PSI = "psi",
        MILLIMETER_OF_MERCURY = "mmHg",
        TORR = "Torr",
    }
}

pub mod frequency {
    handles! { "Frequency";
        HERTZ = "Hz",
        KILOHERTZ = "kHz",
        MEGAHERTZ = "MHz",
        RPM = "rpm",
    }
}

pub mod density {
    handles! { "Density";
        KILOGRAM_PER_CUBIC_METER = "kg/m3",
        GRAM_PER_CUBIC_CENTIMETER = "g/cm3",
        POUND_PER_CUBIC_FOOT = "lb/ft3",
    }
}

pub mod volumetric_flow {
    handles! { "VolumetricFlow";
        CUBIC_METER_PER_SECOND = "m3/s",
        LITER_PER_SECOND = "L/s",
        LITER_PER_MINUTE = "L/min",
        GALLON_PER_MINUTE = "gal/min",
    }
}

pub mod linear_density {
    handles! { "LinearDensity";
        PER_METER = "/m",
        PER_KILOMETER = "/km",
        PER_CENTIMETER = "/cm",
        PER_MILLIMETER = "/mm",
        PER_FOOT = "/ft",
        PER_INCH = "/in",
        PER_MILE = "/mi",
    }
}
