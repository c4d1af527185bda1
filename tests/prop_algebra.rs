//! Property-based tests for scales, dimension algebra and storage.

use metrum::units::length;
use metrum::{Length, Matrix, SIDimensions, Scale, NUMBER_DIMENSIONS};
use proptest::prelude::*;

fn exponents() -> impl Strategy<Value = [i8; NUMBER_DIMENSIONS]> {
    prop::array::uniform8(-4i8..=4)
}

fn any_exponents() -> impl Strategy<Value = [i8; NUMBER_DIMENSIONS]> {
    prop::array::uniform8(any::<i8>())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ── Scales ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn linear_scale_inverts(factor in 1e-6f64..1e6, v in -1e9f64..1e9) {
        let s = Scale::linear(factor);
        prop_assert!(close(s.from_standard_unit(s.to_standard_unit(v)), v));
    }

    #[test]
    fn offset_scale_inverts(
        factor in 1e-3f64..1e3,
        offset in -1e3f64..1e3,
        v in -1e6f64..1e6,
    ) {
        let s = Scale::offset_linear(factor, offset);
        prop_assert!(close(s.from_standard_unit(s.to_standard_unit(v)), v));
    }
}

// ── Dimensions ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dimension_string_round_trips(e in exponents()) {
        let d = SIDimensions::from_exponents(e);
        let text = d.to_string();
        prop_assert_eq!(SIDimensions::parse(&text).unwrap(), d, "{}", text);
    }

    #[test]
    fn plus_then_minus_is_identity(a in exponents(), b in exponents()) {
        let (a, b) = (SIDimensions::from_exponents(a), SIDimensions::from_exponents(b));
        prop_assert_eq!(a.plus(b).minus(b), a);
        prop_assert_eq!(a.plus(b), b.plus(a));
        prop_assert!(a.minus(a).is_dimensionless());
    }

    #[test]
    fn pow_matches_repeated_plus(a in exponents(), n in 0i8..4) {
        let a = SIDimensions::from_exponents(a);
        let mut acc = SIDimensions::DIMENSIONLESS;
        for _ in 0..n {
            acc = acc.plus(a);
        }
        prop_assert_eq!(a.pow(n), acc);
    }
}

proptest! {
    #[test]
    fn full_range_strings_round_trip(e in any_exponents()) {
        let d = SIDimensions::from_exponents(e);
        prop_assert_eq!(SIDimensions::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn checked_plus_matches_wide_sum(a in any_exponents(), b in any_exponents()) {
        let sum = SIDimensions::from_exponents(a).checked_plus(SIDimensions::from_exponents(b));
        let wide: Vec<i16> = a.iter().zip(&b).map(|(x, y)| i16::from(*x) + i16::from(*y)).collect();
        match sum {
            Ok(d) => {
                let got: Vec<i16> = d.exponents().iter().map(|&x| i16::from(x)).collect();
                prop_assert_eq!(got, wide);
            }
            Err(_) => prop_assert!(wide.iter().any(|&x| i8::try_from(x).is_err())),
        }
    }

    #[test]
    fn checked_pow_never_wraps(a in any_exponents(), n in -300i32..300) {
        let d = SIDimensions::from_exponents(a);
        match d.checked_pow(n) {
            Ok(p) => {
                for (x, y) in a.iter().zip(p.exponents()) {
                    prop_assert_eq!(i32::from(*x) * n, i32::from(y));
                }
            }
            Err(_) => prop_assert!(a.iter().any(|&x| i8::try_from(i32::from(x) * n).is_err())),
        }
    }
}

// ── Storage ─────────────────────────────────────────────────────────

fn cells() -> impl Strategy<Value = (usize, usize, Vec<(usize, usize, f64)>)> {
    (1usize..6, 1usize..6).prop_flat_map(|(r, c)| {
        let entry = (0..r, 0..c, -100.0f64..100.0);
        (Just(r), Just(c), prop::collection::vec(entry, 0..12))
    })
}

proptest! {
    #[test]
    fn sparse_and_dense_agree((r, c, entries) in cells()) {
        let sparse = Matrix::<Length>::sparse(r, c, entries, &length::MILLIMETER).unwrap();
        let dense = sparse.to_dense();
        prop_assert_eq!(sparse.values_si(), dense.values_si());
        prop_assert_eq!(&sparse, &dense);
        prop_assert_eq!(sparse.cardinality(), dense.cardinality());
        prop_assert!(close(sparse.z_sum().si(), dense.z_sum().si()));
        prop_assert_eq!(sparse.transpose().values_si(), dense.transpose().values_si());

        let doubled = sparse.plus(&dense).unwrap();
        let expected: Vec<Vec<f64>> = dense
            .values_si()
            .into_iter()
            .map(|row| row.into_iter().map(|v| 2.0 * v).collect())
            .collect();
        prop_assert_eq!(doubled.values_si(), expected);
    }

    #[test]
    fn square_determinants_agree(n in 1usize..5, seed in prop::collection::vec(-5.0f64..5.0, 16)) {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if (i + j) % 3 == 0 { 0.0 } else { seed[i * 4 + j] }).collect())
            .collect();
        let dense = Matrix::<Length>::from_si(&rows, &length::METER).unwrap();
        let a = dense.determinant_si().unwrap();
        let b = dense.to_sparse().determinant_si().unwrap();
        prop_assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
    }
}
