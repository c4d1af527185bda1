use criterion::{criterion_group, criterion_main, Criterion};

use metrum::units::{absolute_temperature, length, linear_density, speed};
use metrum::{registry, Length, Matrix, Scalar, SIDimensions, StorageType};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ramp(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| (i * n + j) as f64 * 0.5).collect())
        .collect()
}

fn banded(n: usize) -> Vec<(usize, usize, f64)> {
    (0..n)
        .flat_map(|i| [(i, i, 2.0), (i, (i + 1) % n, -1.0)])
        .collect()
}

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

fn convert_scalar(c: &mut Criterion) {
    let mut g = c.benchmark_group("convert_scalar");

    g.bench_function("linear", |b| {
        let mile = &*length::MILE;
        let km = &*length::KILOMETER;
        b.iter(|| mile.convert(std::hint::black_box(26.2), km))
    });

    g.bench_function("offset", |b| {
        let f = &*absolute_temperature::DEGREE_FAHRENHEIT;
        let k = &*absolute_temperature::KELVIN;
        b.iter(|| f.convert(std::hint::black_box(98.6), k))
    });

    g.bench_function("reciprocal_chain", |b| {
        let per_inch = &*linear_density::PER_INCH;
        let per_km = &*linear_density::PER_KILOMETER;
        b.iter(|| per_inch.convert(std::hint::black_box(3.0), per_km))
    });

    g.finish();
}

fn parse_scalar(c: &mut Criterion) {
    c.bench_function("parse_scalar", |b| {
        b.iter(|| std::hint::black_box("12.5 km/h").parse::<Scalar<metrum::Speed>>())
    });
}

// ---------------------------------------------------------------------------
// Registry lookup
// ---------------------------------------------------------------------------

fn registry_lookup(c: &mut Criterion) {
    let mut g = c.benchmark_group("registry_lookup");

    g.bench_function("by_abbreviation", |b| {
        b.iter(|| registry::unit(std::hint::black_box("Length"), std::hint::black_box("nmi")))
    });

    g.bench_function("static_handle", |b| {
        b.iter(|| std::hint::black_box(&*speed::KILOMETER_PER_HOUR).id().len())
    });

    g.bench_function("si_dimensions", |b| {
        let d = SIDimensions::MASS.plus(SIDimensions::LENGTH.pow(2));
        b.iter(|| registry::read().unit_with_si_dimensions(std::hint::black_box(d)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Container arithmetic
// ---------------------------------------------------------------------------

fn matrix_plus_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("matrix_plus_50");

    g.bench_function("dense", |b| {
        let a = Matrix::<Length>::new(&ramp(50), &length::METER).unwrap();
        let m = Matrix::<Length>::new(&ramp(50), &length::FOOT).unwrap();
        b.iter(|| std::hint::black_box(&a).plus(std::hint::black_box(&m)))
    });

    g.bench_function("sparse", |b| {
        let a = Matrix::<Length>::sparse(50, 50, banded(50), &length::METER).unwrap();
        let m = Matrix::<Length>::sparse(50, 50, banded(50), &length::FOOT).unwrap();
        b.iter(|| std::hint::black_box(&a).plus(std::hint::black_box(&m)))
    });

    g.finish();
}

fn matrix_times_50(c: &mut Criterion) {
    let mut g = c.benchmark_group("matrix_times_50");

    g.bench_function("dense", |b| {
        let a = Matrix::<Length>::new(&ramp(50), &length::METER).unwrap();
        b.iter(|| std::hint::black_box(&a).times(std::hint::black_box(&a)))
    });

    g.bench_function("mutable_in_place", |b| {
        let a = Matrix::<Length>::zeros(50, 50, &length::METER, StorageType::Dense).unwrap();
        let mut m = a.mutable();
        b.iter(|| m.multiply_by(std::hint::black_box(1.0)))
    });

    g.finish();
}

fn determinant_6x6(c: &mut Criterion) {
    let mut g = c.benchmark_group("determinant_6x6");

    g.bench_function("dense", |b| {
        let m = Matrix::<Length>::new(&ramp(6), &length::METER).unwrap();
        b.iter(|| std::hint::black_box(&m).determinant_si())
    });

    g.bench_function("sparse", |b| {
        let m = Matrix::<Length>::sparse(6, 6, banded(6), &length::METER).unwrap();
        b.iter(|| std::hint::black_box(&m).determinant_si())
    });

    g.finish();
}

criterion_group!(
    benches,
    convert_scalar,
    parse_scalar,
    registry_lookup,
    matrix_plus_50,
    matrix_times_50,
    determinant_6x6,
);
criterion_main!(benches);
