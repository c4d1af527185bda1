//! End-to-end behaviour of the registry, derivations and containers.

use metrum::units::{length, linear_density, mass, time};
use metrum::{
    prefix, AbsoluteScalar, Area, Duration, Labels, Length, LinearDensity, Mass, Matrix,
    Reference, Registry, Scalar, SIDimensions, SIPrefixes, Scale, SiQuantity, StorageType, Time,
    Unit, UnitError, UnitSystem, Vector,
};

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

// ── Registry ────────────────────────────────────────────────────────

#[test]
fn every_builtin_scale_inverts() {
    let registry = Registry::with_builtin_units().unwrap();
    for quantity in registry.quantities() {
        for unit in quantity.units_by_id().values() {
            for v in [-1234.5, -1.0, 0.0, 0.25, 1.0, 98.6, 6.02e23] {
                let back = unit.from_standard_unit(unit.to_standard_unit(v));
                assert!(approx(back, v, 1e-12), "{} in {}: {v} -> {back}", unit.id(), quantity.name());
            }
        }
    }
}

#[test]
fn conversions_are_idempotent_within_a_quantity() {
    let registry = Registry::with_builtin_units().unwrap();
    let lengths = registry.quantity_by_name("Length").unwrap();
    let units: Vec<&Unit> = lengths.units_by_id().values().collect();
    for a in &units {
        for b in &units {
            let there = a.convert(3.5, b).unwrap();
            let back = b.convert(there, a).unwrap();
            assert!(approx(back, 3.5, 1e-12), "{} -> {} -> {}", a.id(), b.id(), a.id());
        }
    }
}

#[test]
fn duplicate_ids_and_abbreviations_fail() {
    let mut registry = Registry::new();
    let q = registry.add_quantity("Length", SIDimensions::LENGTH).unwrap();
    let meter = Unit::builder()
        .id("m")
        .name("meter")
        .scale(Scale::Identity)
        .unit_system(UnitSystem::SiBase)
        .quantity(q)
        .build(&mut registry)
        .unwrap();

    let err = meter
        .derive_linear(&mut registry, 2.0, Labels::new("m", "double meter"), UnitSystem::Other)
        .unwrap_err();
    assert!(matches!(err, UnitError::DuplicateUnit { ref id, .. } if id == "m"));

    let err = meter
        .derive_linear(
            &mut registry,
            2.0,
            Labels::new("dm2", "double meter").alias("m"),
            UnitSystem::Other,
        )
        .unwrap_err();
    assert!(matches!(err, UnitError::DuplicateUnit { .. }));
    assert_eq!(registry.quantity(q).unwrap().len(), 1);
}

#[test]
fn composed_prefixes_cancel() {
    let mut registry = Registry::new();
    let q = registry.add_quantity("Length", SIDimensions::LENGTH).unwrap();
    let meter = Unit::builder()
        .id("m")
        .name("meter")
        .scale(Scale::Identity)
        .unit_system(UnitSystem::SiBase)
        .quantity(q)
        .build(&mut registry)
        .unwrap();
    let mm = meter.derive_si(&mut registry, &prefix::MILLI, 1, false).unwrap();
    let kmm = mm.derive_si(&mut registry, &prefix::KILO, 1, false).unwrap();
    assert_eq!(kmm.scale().conversion_factor_to_standard_unit(), 1.0);
    assert_eq!(kmm.to_standard_unit(7.0), 7.0);
}

#[test]
fn prefix_family_is_registered_with_the_standard_unit() {
    let mut registry = Registry::new();
    let q = registry.add_quantity("Length", SIDimensions::LENGTH).unwrap();
    Unit::builder()
        .id("m")
        .name("meter")
        .scale(Scale::Identity)
        .unit_system(UnitSystem::SiBase)
        .quantity(q)
        .si_prefixes(SIPrefixes::All, 1)
        .build(&mut registry)
        .unwrap();
    let length = registry.quantity(q).unwrap();
    assert_eq!(length.len(), 21);
    let km = length.resolve("km").unwrap();
    assert!(km.is_generated());
    assert_eq!(km.to_standard_unit(1.0), 1000.0);
}

// ── Derivation chains ───────────────────────────────────────────────

#[test]
fn per_kilometer_from_per_meter() {
    let v = Scalar::<LinearDensity>::new(1.0, &linear_density::PER_KILOMETER).unwrap();
    assert_eq!(v.si(), 1.0 / 1000.0);
}

#[test]
fn per_inch_chain_goes_through_the_standard_unit() {
    let per_inch = Scalar::<LinearDensity>::new(1.0, &linear_density::PER_INCH).unwrap();
    let per_meter = per_inch.in_unit_of(&linear_density::PER_METER).unwrap();
    assert!(approx(per_meter, 12.0 * (1.0 / 0.3048), 1e-12));
    assert!((per_meter - 39.37).abs() < 1e-3);
}

// ── Containers ──────────────────────────────────────────────────────

#[test]
fn length_times_length_is_area() {
    let a = Scalar::<Length>::new(2.0, &length::METER).unwrap();
    let b = Scalar::<Length>::new(3.0, &length::METER).unwrap();

    let generic = a.times(&b).unwrap();
    assert_eq!(generic.si(), 6.0);
    assert_eq!(generic.dimensions(), SIDimensions::LENGTH.plus(SIDimensions::LENGTH));
    assert_eq!(generic.unit().quantity_name(), "Area");

    let typed: Scalar<Area> = a * b;
    assert_eq!(typed.si(), 6.0);
}

#[test]
fn quotient_dimensions_subtract() {
    let d = Scalar::<Length>::new(100.0, &length::METER).unwrap();
    let m = Scalar::<Mass>::new(4.0, &mass::KILOGRAM).unwrap();
    let q = d.divide(&m).unwrap();
    assert_eq!(q.dimensions(), SIDimensions::LENGTH.minus(SIDimensions::MASS));
    assert_eq!(q.si(), 25.0);
}

#[test]
fn unnamed_dimensions_get_an_anonymous_unit() {
    let m = Scalar::<Mass>::new(2.0, &mass::KILOGRAM).unwrap();
    let r = Scalar::<Length>::new(3.0, &length::METER).unwrap();
    let inertia = m.times(&r).unwrap().times(&r).unwrap();
    assert_eq!(inertia.si(), 18.0);
    assert_eq!(inertia.unit().id(), "kg.m2");
    assert_eq!(inertia.unit().quantity_name(), "kg.m2");

    // Parsing the same dimensions finds the same unit.
    let parsed: Scalar<SiQuantity> = "1 kg.m2".parse().unwrap();
    assert_eq!(parsed.unit(), inertia.unit());
}

#[test]
fn absolute_time_differences() {
    let epoch = Reference::new("epoch");
    let t1 = AbsoluteScalar::<Time>::new(90.0, &time::MINUTE, &epoch).unwrap();
    let t2 = AbsoluteScalar::<Time>::new(1.0, &time::HOUR, &epoch).unwrap();
    let elapsed: Scalar<Duration> = t1.minus(&t2).unwrap();
    assert_eq!(elapsed.si(), 1800.0);

    let other = Reference::new("launch");
    let t3 = AbsoluteScalar::<Time>::new(1.0, &time::HOUR, &other).unwrap();
    assert!(matches!(t1.minus(&t3), Err(UnitError::IncompatibleReference { .. })));
}

#[test]
fn determinant_of_si_values() {
    let m = Matrix::<Length>::from_si(&[[1.0, 2.0], [3.0, 4.0]], &length::METER).unwrap();
    assert_eq!(m.determinant_si().unwrap(), -2.0);
    assert_eq!(m.to_sparse().determinant_si().unwrap(), -2.0);
}

#[test]
fn sparse_dense_round_trip_keeps_values_and_unit() {
    let m = Matrix::<Length>::sparse(
        4,
        3,
        [(0, 0, 1.5), (3, 2, -2.0), (1, 1, 0.25)],
        &length::KILOMETER,
    )
    .unwrap();
    let dense = m.to_dense();
    assert_eq!(dense.storage_type(), StorageType::Dense);
    assert_eq!(dense.to_sparse().values_si(), m.values_si());
    assert_eq!(dense.unit(), m.unit());
    assert_eq!(dense.cardinality(), 3);
}

#[test]
fn vectors_from_mixed_unit_scalars() {
    let values = [
        Scalar::<Length>::new(1.0, &length::KILOMETER).unwrap(),
        Scalar::<Length>::new(1.0, &length::MILE).unwrap(),
        Scalar::<Length>::new(1.0, &length::FOOT).unwrap(),
    ];
    let v = Vector::from_scalars(&values, &length::METER).unwrap();
    assert_eq!(v.get_si(0).unwrap(), 1000.0);
    assert!(approx(v.get_si(1).unwrap(), 1609.344, 1e-12));
    assert!(approx(v.get_si(2).unwrap(), 0.3048, 1e-12));
    assert!(approx(v.z_sum().si(), 2609.6488, 1e-12));
}
