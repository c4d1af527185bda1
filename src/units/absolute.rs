use crate::error::{UnitError, UnitResult};
use crate::prefix::SIPrefixes;
use crate::registry::Registry;
use crate::scale::Scale;
use crate::unit::{Labels, Unit};

/// Register an absolute quantity over `relative` with an offset-free
/// standard unit mirroring the relative standard unit.
fn absolute_standard(
    r: &mut Registry,
    name: &str,
    relative: &str,
    family: SIPrefixes,
) -> UnitResult<Unit> {
    let rel_quantity = r
        .quantity_by_name(relative)
        .ok_or_else(|| UnitError::IllegalArgument(format!("unknown quantity {relative}")))?;
    let rel_id = rel_quantity.id();
    let rel_unit = rel_quantity.standard_unit().cloned().ok_or_else(|| {
        UnitError::IllegalArgument(format!("quantity {relative} has no standard unit"))
    })?;

    let q = r.add_absolute_quantity(name, rel_id)?;
    Unit::builder()
        .id(rel_unit.id())
        .name(rel_unit.name())
        .textual_abbreviation(rel_unit.textual_abbreviation())
        .display_abbreviation(rel_unit.display_abbreviation())
        .scale(Scale::offset_linear(1.0, 0.0))
        .unit_system(rel_unit.unit_system())
        .quantity(q)
        .relative_unit(&rel_unit)
        .si_prefixes(family, 1)
        .build(r)
}

/// Offset-free absolute counterpart of a linear relative unit.
fn mirror(r: &mut Registry, standard: &Unit, relative: &Unit) -> UnitResult<Unit> {
    let mut labels = Labels::new(relative.id(), relative.name())
        .textual(relative.textual_abbreviation())
        .display(relative.display_abbreviation());
    for a in relative.additional_abbreviations() {
        labels = labels.alias(a.as_str());
    }
    standard.derive_linear_offset(
        r,
        relative.scale().conversion_factor_to_standard_unit(),
        0.0,
        relative,
        labels,
        relative.unit_system(),
    )
}

pub(super) fn install(r: &mut Registry) -> UnitResult<()> {
    let m = absolute_standard(r, "Position", "Length", SIPrefixes::All)?;
    for id in ["ft", "in", "mi"] {
        let rel = r.unit("Length", id)?;
        mirror(r, &m, &rel)?;
    }

    let s = absolute_standard(r, "Time", "Duration", SIPrefixes::Negative)?;
    for id in ["min", "h", "day", "wk"] {
        let rel = r.unit("Duration", id)?;
        mirror(r, &s, &rel)?;
    }

    let k = absolute_standard(r, "AbsoluteTemperature", "Temperature", SIPrefixes::None)?;
    let offsets = [("degC", 1.0, 273.15), ("degF", 5.0 / 9.0, 459.67), ("degR", 5.0 / 9.0, 0.0)];
    for (id, factor, offset) in offsets {
        let rel = r.unit("Temperature", id)?;
        let labels = Labels::new(id, rel.name()).display(rel.display_abbreviation());
        k.derive_linear_offset(r, factor, offset, &rel, labels, rel.unit_system())?;
    }
    Ok(())
}

pub mod position {
    handles! { "Position";
        METER = "m",
        KILOMETER = "km",
        MILLIMETER = "mm",
        FOOT = "ft",
        MILE = "mi",
    }
}

pub mod time {
    handles! { "Time";
        SECOND = "s",
        MILLISECOND = "ms",
        MINUTE = "min",
        HOUR = "h",
        DAY = "day",
    }
}

pub mod absolute_temperature {
    handles! { "AbsoluteTemperature";
        KELVIN = "K",
        DEGREE_CELSIUS = "degC",
        DEGREE_FAHRENHEIT = "degF",
        DEGREE_RANKINE = "degR",
    }
}
