//! Typed products and quotients between scalar kinds.
//!
//! The result takes the standard unit of the output kind. Combinations not
//! listed here go through [`Scalar::times`] / [`Scalar::divide`].

use core::ops::{Div, Mul};

use crate::kind::*;
use crate::traits::Real;

use super::Scalar;

macro_rules! impl_binary {
    ($trait:ident, $method:ident, $op:tt; $($a:ident, $b:ident => $c:ident;)*) => {$(
        impl<T: Real> $trait<Scalar<$b, T>> for Scalar<$a, T> {
            type Output = Scalar<$c, T>;

            fn $method(self, rhs: Scalar<$b, T>) -> Scalar<$c, T> {
                Scalar::from_standard(self.si() $op rhs.si())
            }
        }

        impl<'a, T: Real> $trait<&'a Scalar<$b, T>> for &'a Scalar<$a, T> {
            type Output = Scalar<$c, T>;

            fn $method(self, rhs: &'a Scalar<$b, T>) -> Scalar<$c, T> {
                Scalar::from_standard(self.si() $op rhs.si())
            }
        }
    )*};
}

impl_binary! { Mul, mul, *;
    Length, Length => Area;
    Length, Area => Volume;
    Area, Length => Volume;
    Speed, Duration => Length;
    Duration, Speed => Length;
    Acceleration, Duration => Speed;
    Mass, Acceleration => Force;
    Acceleration, Mass => Force;
    Force, Length => Energy;
    Length, Force => Energy;
    Pressure, Area => Force;
    Power, Duration => Energy;
    Duration, Power => Energy;
    Force, Speed => Power;
    Density, Volume => Mass;
    VolumetricFlow, Duration => Volume;
    ElectricalCurrent, Duration => ElectricalCharge;
    ElectricalCurrent, ElectricalResistance => ElectricalPotential;
    ElectricalPotential, ElectricalCurrent => Power;
    Frequency, Duration => Dimensionless;
    LinearDensity, Length => Dimensionless;
}

impl_binary! { Div, div, /;
    Length, Duration => Speed;
    Length, Speed => Duration;
    Speed, Duration => Acceleration;
    Area, Length => Length;
    Volume, Length => Area;
    Volume, Area => Length;
    Volume, Duration => VolumetricFlow;
    Mass, Volume => Density;
    Force, Mass => Acceleration;
    Force, Area => Pressure;
    Energy, Length => Force;
    Energy, Duration => Power;
    Power, Speed => Force;
    ElectricalCharge, Duration => ElectricalCurrent;
    ElectricalPotential, ElectricalCurrent => ElectricalResistance;
    Power, ElectricalCurrent => ElectricalPotential;
    Dimensionless, Duration => Frequency;
    Dimensionless, Length => LinearDensity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{acceleration, duration, energy, length, mass, power, speed};

    #[test]
    fn mechanics_chain() {
        let m = Scalar::<Mass>::new(2.0, &mass::KILOGRAM).unwrap();
        let a = Scalar::<Acceleration>::new(1.0, &acceleration::STANDARD_GRAVITY).unwrap();
        let f: Scalar<Force> = &m * &a;
        assert!((f.si() - 2.0 * 9.80665).abs() < 1e-12);
        assert_eq!(f.unit().id(), "N");

        let d = Scalar::<Length>::new(10.0, &length::METER).unwrap();
        let e: Scalar<Energy> = f * d;
        let t = Scalar::<Duration>::new(2.0, &duration::SECOND).unwrap();
        let p: Scalar<Power> = e.clone() / t;
        assert!((p.si() - 98.0665).abs() < 1e-9);
        assert_eq!(p.unit(), &*power::WATT);
        assert!((e.in_unit_of(&energy::KILOJOULE).unwrap() - 0.196133).abs() < 1e-12);
    }

    #[test]
    fn typed_matches_generic() {
        let d = Scalar::<Length>::new(100.0, &length::KILOMETER).unwrap();
        let t = Scalar::<Duration>::new(2.0, &duration::HOUR).unwrap();
        let typed: Scalar<Speed> = &d / &t;
        let generic = d.divide(&t).unwrap();
        assert_eq!(typed.si(), generic.si());
        assert_eq!(typed.dimensions(), generic.dimensions());
        assert!((typed.in_unit_of(&speed::KILOMETER_PER_HOUR).unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn reciprocal_length() {
        let one = Scalar::<Dimensionless>::from_standard(1.0);
        let ft = Scalar::<Length>::new(1.0, &length::FOOT).unwrap();
        let per: Scalar<LinearDensity> = one / ft;
        assert!((per.si() - 1.0 / 0.3048).abs() < 1e-12);
    }
}
