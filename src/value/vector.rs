use core::fmt;

use crate::data::StorageType;
use crate::dimensions::SIDimensions;
use crate::error::UnitResult;
use crate::kind::{NamedQuantity, QuantityKind, SiQuantity};
use crate::traits::Real;
use crate::unit::Unit;

use super::matrix::{write_abbreviation, write_list};
use super::{Matrix, Scalar};

/// A 1-D array of values of quantity kind `K`.
///
/// Wraps a 1×N [`Matrix`], so storage, copy-on-write and mutability
/// behave the same way.
///
/// ```
/// use metrum::{Speed, Vector};
/// use metrum::units::speed::{KILOMETER_PER_HOUR, METER_PER_SECOND};
///
/// let v = Vector::<Speed>::new(&[36.0, 72.0], &KILOMETER_PER_HOUR).unwrap();
/// let si = v.values_in(&METER_PER_SECOND).unwrap();
/// assert!((si[0] - 10.0).abs() < 1e-12 && (si[1] - 20.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<K: QuantityKind, T: Real = f64> {
    inner: Matrix<K, T>,
}

impl<K: QuantityKind, T: Real> Vector<K, T> {
    pub(crate) fn from_matrix(inner: Matrix<K, T>) -> Self {
        debug_assert_eq!(inner.nrows(), 1);
        Self { inner }
    }

    fn wrap<K2: QuantityKind>(inner: UnitResult<Matrix<K2, T>>) -> UnitResult<Vector<K2, T>> {
        inner.map(Vector::from_matrix)
    }

    // ── Construction ────────────────────────────────────────────────

    /// Dense vector from values expressed in `unit`.
    pub fn new(values: &[T], unit: &Unit) -> UnitResult<Self> {
        Self::wrap(Matrix::new(&[values], unit))
    }

    pub fn from_si(values: &[T], unit: &Unit) -> UnitResult<Self> {
        Self::wrap(Matrix::from_si(&[values], unit))
    }

    pub fn from_scalars(values: &[Scalar<K, T>], unit: &Unit) -> UnitResult<Self> {
        Self::wrap(Matrix::from_scalars(&[values], unit))
    }

    /// Sparse vector of length `len` from `(index, value)` entries in `unit`.
    pub fn sparse(
        len: usize,
        entries: impl IntoIterator<Item = (usize, T)>,
        unit: &Unit,
    ) -> UnitResult<Self> {
        let entries = entries.into_iter().map(|(k, v)| (0, k, v));
        Self::wrap(Matrix::sparse(1, len, entries, unit))
    }

    pub fn zeros(len: usize, unit: &Unit, storage: StorageType) -> UnitResult<Self> {
        Self::wrap(Matrix::zeros(1, len, unit, storage))
    }

    // ── Metadata ────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }

    pub fn unit(&self) -> &Unit {
        self.inner.unit()
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.inner.dimensions()
    }

    pub fn is_mutable(&self) -> bool {
        self.inner.is_mutable()
    }

    /// The 1×N matrix behind this vector.
    pub fn as_matrix(&self) -> &Matrix<K, T> {
        &self.inner
    }

    // ── Read-out ────────────────────────────────────────────────────

    pub fn get_si(&self, i: usize) -> UnitResult<T> {
        self.inner.get_si(0, i)
    }

    pub fn get_in_unit(&self, i: usize) -> UnitResult<T> {
        self.inner.get_in_unit(0, i)
    }

    pub fn get_in(&self, i: usize, target: &Unit) -> UnitResult<T> {
        self.inner.get_in(0, i, target)
    }

    pub fn get(&self, i: usize) -> UnitResult<Scalar<K, T>> {
        self.inner.get(0, i)
    }

    pub fn values_si(&self) -> Vec<T> {
        self.inner.data().to_vec()
    }

    pub fn values_in_unit(&self) -> Vec<T> {
        first_row(self.inner.values_in_unit())
    }

    pub fn values_in(&self, target: &Unit) -> UnitResult<Vec<T>> {
        self.inner.values_in(target).map(first_row)
    }

    // ── Arithmetic ──────────────────────────────────────────────────

    pub fn plus(&self, other: &Self) -> UnitResult<Self> {
        Self::wrap(self.inner.plus(&other.inner))
    }

    pub fn minus(&self, other: &Self) -> UnitResult<Self> {
        Self::wrap(self.inner.minus(&other.inner))
    }

    /// Element-wise product.
    ///
    /// ```
    /// use metrum::{Duration, Speed, Vector};
    /// use metrum::units::{duration::SECOND, speed::METER_PER_SECOND};
    ///
    /// let v = Vector::<Speed>::new(&[1.0, 2.0], &METER_PER_SECOND).unwrap();
    /// let t = Vector::<Duration>::new(&[10.0, 10.0], &SECOND).unwrap();
    /// let d = v.times(&t).unwrap();
    /// assert_eq!(d.values_si(), vec![10.0, 20.0]);
    /// assert_eq!(d.unit().quantity_name(), "Length");
    /// ```
    pub fn times<K2: QuantityKind>(&self, other: &Vector<K2, T>) -> UnitResult<Vector<SiQuantity, T>> {
        Self::wrap(self.inner.times(&other.inner))
    }

    pub fn divide<K2: QuantityKind>(&self, other: &Vector<K2, T>) -> UnitResult<Vector<SiQuantity, T>> {
        Self::wrap(self.inner.divide(&other.inner))
    }

    pub fn times_scalar<K2: QuantityKind>(&self, s: &Scalar<K2, T>) -> UnitResult<Vector<SiQuantity, T>> {
        Self::wrap(self.inner.times_scalar(s))
    }

    pub fn scaled(&self, factor: T) -> Self {
        Self::from_matrix(self.inner.scaled(factor))
    }

    // ── Mutation ────────────────────────────────────────────────────

    pub fn set(&mut self, i: usize, value: T) -> UnitResult<()> {
        self.inner.set(0, i, value)
    }

    pub fn set_si(&mut self, i: usize, si: T) -> UnitResult<()> {
        self.inner.set_si(0, i, si)
    }

    pub fn increment_by(&mut self, other: &Self) -> UnitResult<()> {
        self.inner.increment_by(&other.inner)
    }

    pub fn decrement_by(&mut self, other: &Self) -> UnitResult<()> {
        self.inner.decrement_by(&other.inner)
    }

    pub fn multiply_by(&mut self, factor: T) -> UnitResult<()> {
        self.inner.multiply_by(factor)
    }

    pub fn divide_by(&mut self, factor: T) -> UnitResult<()> {
        self.inner.divide_by(factor)
    }

    pub fn assign(&mut self, f: impl Fn(T) -> T) -> UnitResult<()> {
        self.inner.assign(f)
    }

    pub fn abs(&mut self) -> UnitResult<()> {
        self.inner.abs()
    }

    pub fn ceil(&mut self) -> UnitResult<()> {
        self.inner.ceil()
    }

    pub fn floor(&mut self) -> UnitResult<()> {
        self.inner.floor()
    }

    pub fn neg(&mut self) -> UnitResult<()> {
        self.inner.neg()
    }

    pub fn rint(&mut self) -> UnitResult<()> {
        self.inner.rint()
    }

    // ── Views / conversions ─────────────────────────────────────────

    pub fn mutable(&self) -> Self {
        Self::from_matrix(self.inner.mutable())
    }

    pub fn immutable(&self) -> Self {
        Self::from_matrix(self.inner.immutable())
    }

    pub fn to_sparse(&self) -> Self {
        Self::from_matrix(self.inner.to_sparse())
    }

    pub fn to_dense(&self) -> Self {
        Self::from_matrix(self.inner.to_dense())
    }

    pub fn with_display_unit(&self, unit: &Unit) -> UnitResult<Self> {
        Self::wrap(self.inner.with_display_unit(unit))
    }

    pub fn z_sum(&self) -> Scalar<K, T> {
        self.inner.z_sum()
    }

    pub fn cardinality(&self) -> usize {
        self.inner.cardinality()
    }

    pub fn as_kind<K2: NamedQuantity>(&self) -> UnitResult<Vector<K2, T>> {
        Self::wrap(self.inner.as_kind())
    }

    pub fn to_si_quantity(&self) -> UnitResult<Vector<SiQuantity, T>> {
        Self::wrap(self.inner.to_si_quantity())
    }
}

fn first_row<T>(rows: Vec<Vec<T>>) -> Vec<T> {
    rows.into_iter().next().unwrap_or_default()
}

impl<K: QuantityKind, T: Real> fmt::Display for Vector<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.values_in_unit())?;
        write_abbreviation(f, self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;
    use crate::kind::{Length, LinearDensity, Mass};
    use crate::units::{length, linear_density, mass};

    #[test]
    fn read_out() {
        let v = Vector::<Mass, f32>::new(&[1.0, 2.0, 3.0], &mass::GRAM).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.get_in_unit(1).unwrap(), 2.0);
        assert_eq!(v.get_in(2, &mass::KILOGRAM).unwrap(), 0.003);
        assert!(matches!(
            v.get_si(3),
            Err(UnitError::IndexOutOfBounds { what: "column", index: 3, len: 3 })
        ));
        assert_eq!(v.to_string(), "[1, 2, 3] g");
    }

    #[test]
    fn sparse_dense_round_trip() {
        let v = Vector::<LinearDensity>::sparse(5, [(1, 2.0), (4, 1.0)], &linear_density::PER_KILOMETER).unwrap();
        assert_eq!(v.storage_type(), StorageType::Sparse);
        assert_eq!(v.cardinality(), 2);
        let d = v.to_dense();
        assert_eq!(d.storage_type(), StorageType::Dense);
        assert_eq!(d.values_si(), v.values_si());
        assert_eq!(d.to_sparse(), v);
        assert!((v.z_sum().si() - 0.003).abs() < 1e-15);
    }

    #[test]
    fn copy_on_write_between_views() {
        let v = Vector::<Length>::new(&[1.0, 2.0], &length::METER).unwrap();
        let mut w = v.mutable();
        w.set(0, 10.0).unwrap();
        w.decrement_by(&v).unwrap();
        assert_eq!(w.values_si(), vec![9.0, 0.0]);
        assert_eq!(v.values_si(), vec![1.0, 2.0]);
        let mut frozen = w.immutable();
        assert_eq!(frozen.neg(), Err(UnitError::ImmutableValue));
    }

    #[test]
    fn size_mismatch() {
        let a = Vector::<Length>::new(&[1.0, 2.0], &length::METER).unwrap();
        let b = Vector::<Length>::new(&[1.0, 2.0, 3.0], &length::METER).unwrap();
        assert!(matches!(a.plus(&b), Err(UnitError::SizeMismatch { .. })));
        assert!(matches!(a.times(&b), Err(UnitError::SizeMismatch { .. })));
    }

    #[test]
    fn reciprocal_product_is_dimensionless() {
        let per = Vector::<LinearDensity>::new(&[2.0, 4.0], &linear_density::PER_METER).unwrap();
        let len = Vector::<Length>::new(&[0.5, 0.25], &length::METER).unwrap();
        let n = per.times(&len).unwrap();
        assert!(n.dimensions().is_dimensionless());
        assert_eq!(n.values_si(), vec![1.0, 1.0]);
    }
}
