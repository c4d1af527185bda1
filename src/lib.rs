//! # metrum
//!
//! Dimensionally safe physical quantities. Values carry a unit, convert
//! between compatible units, and combine only when their dimensions allow
//! it; products and quotients pick (or create) the unit of the result.
//!
//! ## Quick start
//!
//! ```
//! use metrum::{Area, Length, Scalar};
//! use metrum::units::length::{FOOT, METER};
//!
//! let w = Scalar::<Length>::new(3.0, &METER).unwrap();
//! let h = Scalar::<Length>::new(10.0, &FOOT).unwrap();
//! let a: Scalar<Area> = w * h;
//! assert!((a.si() - 9.144).abs() < 1e-12);
//! assert_eq!(a.unit().id(), "m2");
//! ```
//!
//! ## Modules
//!
//! - [`SIDimensions`]: exponent vector over the base dimensions (mass,
//!   length, time, current, temperature, amount of substance, luminous
//!   intensity, money), with the canonical `kg.m/s2` text form.
//!
//! - [`Scale`]: identity, linear and offset-linear conversion to the
//!   standard unit of a quantity.
//!
//! - [`Unit`] / [`UnitBuilder`]: immutable units built once and registered
//!   with their quantity. Derivations (`derive_si`, `derive_si_kilo`,
//!   `derive_per_si`, `derive_linear`, `derive_linear_offset`) produce new
//!   sibling units with factors relative to the standard unit.
//!
//! - [`Registry`]: quantities, their units by id and abbreviation, SI
//!   prefix families, and lookup-or-create of units for arbitrary SI
//!   dimensions. [`registry`] holds the lazily built process-wide
//!   instance; [`units`] is the built-in catalog with `static` handles.
//!
//! - Kinds ([`Length`], [`Speed`], [`Time`], ..., and the run-time checked
//!   [`SiQuantity`]) tag the value containers [`Scalar`], [`Vector`] and
//!   [`Matrix`], generic over `f32` / `f64` with dense or sparse storage.
//!
//! - [`AbsoluteScalar`] and [`Reference`]: points measured from an origin,
//!   with one-hop translation between related origins.
//!
//! - [`traits`]: the [`Real`] element trait and [`MatrixRef`] read access.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `debug`
//! when quantities and prefix families are created, `trace` for each unit
//! registration and each copy-on-write detach. No subscriber is installed.
//!
//! ## Cargo features
//!
//! None. The process-wide registry relies on `std::sync`, so the crate
//! requires `std`.

mod data;
mod dimensions;
mod error;
mod kind;
mod parse;
pub mod prefix;
mod quantity;
mod reference;
pub mod registry;
mod scale;
pub mod traits;
mod unit;
pub mod units;
mod value;

pub use data::StorageType;
pub use dimensions::{SIDimensions, BASE_ABBREVIATIONS, NUMBER_DIMENSIONS};
pub use error::{UnitError, UnitResult};
pub use kind::{
    AbsoluteKind, AbsoluteTemperature, Acceleration, AmountOfSubstance, Area, Density,
    Dimensionless, Duration, ElectricalCharge, ElectricalCurrent, ElectricalPotential,
    ElectricalResistance, Energy, Force, Frequency, Length, LinearDensity, LuminousIntensity,
    Mass, NamedQuantity, Position, Power, Pressure, QuantityKind, RelativeKind, SiQuantity,
    Speed, Temperature, Time, Volume, VolumetricFlow,
};
pub use parse::ParseOptions;
pub use prefix::{SIPrefix, SIPrefixes};
pub use quantity::{Quantity, QuantityId};
pub use reference::Reference;
pub use registry::{Registry, UnitRef};
pub use scale::Scale;
pub use traits::{MatrixRef, Real};
pub use unit::{Labels, Unit, UnitBuilder, UnitSystem};
pub use value::{
    AbsoluteScalar, AbsoluteScalarf32, AbsoluteScalarf64, Matrix, Matrixf32, Matrixf64, Scalar,
    Scalarf32, Scalarf64, Vector, Vectorf32, Vectorf64,
};
