use core::fmt;
use core::marker::PhantomData;

use crate::data::{self, StorageType, ValueData};
use crate::dimensions::SIDimensions;
use crate::error::{UnitError, UnitResult};
use crate::kind::{NamedQuantity, QuantityKind, SiQuantity};
use crate::traits::Real;
use crate::unit::Unit;

use super::{check_dimensions, check_relative, from_si, result_unit, rint, to_si, unit_for_kind};
use super::{Scalar, Vector};

/// A 2-D array of values of quantity kind `K`, dense or sparse.
///
/// Values are stored in SI; the display unit only affects read-out.
/// Clones share storage. Mutating methods are only allowed on a
/// [`mutable`](Matrix::mutable) view, which detaches from any shared
/// storage on its first write.
///
/// ```
/// use metrum::{Length, Matrix};
/// use metrum::units::length::{CENTIMETER, METER};
///
/// let m = Matrix::<Length>::new(&[[100.0, 200.0], [300.0, 400.0]], &CENTIMETER).unwrap();
/// assert_eq!(m.get_si(1, 0).unwrap(), 3.0);
/// assert_eq!(m.get_in(0, 1, &METER).unwrap(), 2.0);
/// assert_eq!(m.determinant_si().unwrap(), -2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<K: QuantityKind, T: Real = f64> {
    data: ValueData<T>,
    unit: Unit,
    mutable: bool,
    kind: PhantomData<K>,
}

impl<K: QuantityKind, T: Real> Matrix<K, T> {
    pub(crate) fn from_data(data: ValueData<T>, unit: Unit) -> Self {
        Self {
            data,
            unit,
            mutable: false,
            kind: PhantomData,
        }
    }

    pub(crate) fn data(&self) -> &ValueData<T> {
        &self.data
    }

    fn derived(&self, data: ValueData<T>) -> Self {
        Self::from_data(data, self.unit.clone())
    }

    // ── Construction ────────────────────────────────────────────────

    /// Dense matrix from rows of values expressed in `unit`.
    pub fn new<R: AsRef<[T]>>(rows: &[R], unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        let data = ValueData::from_rows(rows)?.map(|v| to_si(unit, v));
        Ok(Self::from_data(data, unit.clone()))
    }

    /// Dense matrix from rows of SI values, displayed in `unit`.
    pub fn from_si<R: AsRef<[T]>>(rows: &[R], unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        Ok(Self::from_data(ValueData::from_rows(rows)?, unit.clone()))
    }

    /// Dense matrix from rows of scalars, each converted from its own unit.
    pub fn from_scalars<R: AsRef<[Scalar<K, T>]>>(rows: &[R], unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        let mut si_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let mut si_row = Vec::with_capacity(row.as_ref().len());
            for s in row.as_ref() {
                check_dimensions(unit.dimensions(), s.dimensions())?;
                si_row.push(s.si());
            }
            si_rows.push(si_row);
        }
        Ok(Self::from_data(ValueData::from_rows(&si_rows)?, unit.clone()))
    }

    /// Sparse matrix from `(row, col, value)` entries expressed in `unit`.
    /// Cells not listed hold SI zero.
    pub fn sparse(
        nrows: usize,
        ncols: usize,
        entries: impl IntoIterator<Item = (usize, usize, T)>,
        unit: &Unit,
    ) -> UnitResult<Self> {
        K::check_unit(unit)?;
        let entries = entries.into_iter().map(|(i, j, v)| (i, j, to_si(unit, v)));
        Ok(Self::from_data(ValueData::from_entries(nrows, ncols, entries)?, unit.clone()))
    }

    pub fn zeros(nrows: usize, ncols: usize, unit: &Unit, storage: StorageType) -> UnitResult<Self> {
        K::check_unit(unit)?;
        Ok(Self::from_data(ValueData::zeros(nrows, ncols, storage), unit.clone()))
    }

    // ── Shape / metadata ────────────────────────────────────────────

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn storage_type(&self) -> StorageType {
        self.data.storage_type()
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[inline]
    pub fn dimensions(&self) -> SIDimensions {
        self.unit.dimensions()
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    // ── Read-out ────────────────────────────────────────────────────

    pub fn get_si(&self, row: usize, col: usize) -> UnitResult<T> {
        self.data.get(row, col)
    }

    /// Cell value in the display unit.
    pub fn get_in_unit(&self, row: usize, col: usize) -> UnitResult<T> {
        Ok(from_si(&self.unit, self.data.get(row, col)?))
    }

    /// Cell value converted into `target`.
    pub fn get_in(&self, row: usize, col: usize, target: &Unit) -> UnitResult<T> {
        self.unit.check_compatible(target)?;
        Ok(from_si(target, self.data.get(row, col)?))
    }

    pub fn get(&self, row: usize, col: usize) -> UnitResult<Scalar<K, T>> {
        Ok(Scalar::raw(self.data.get(row, col)?, self.unit.clone()))
    }

    pub fn values_si(&self) -> Vec<Vec<T>> {
        self.data.to_rows()
    }

    pub fn values_in_unit(&self) -> Vec<Vec<T>> {
        self.data.map(|v| from_si(&self.unit, v)).to_rows()
    }

    pub fn values_in(&self, target: &Unit) -> UnitResult<Vec<Vec<T>>> {
        self.unit.check_compatible(target)?;
        Ok(self.data.map(|v| from_si(target, v)).to_rows())
    }

    // ── Arithmetic ──────────────────────────────────────────────────

    fn check_additive(&self, other: &Self, operation: &str) -> UnitResult<()> {
        check_relative::<K>(operation)?;
        check_dimensions(self.dimensions(), other.dimensions())?;
        if self.shape() != other.shape() {
            return Err(UnitError::size_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    /// Element-wise sum, displayed in `self`'s unit.
    pub fn plus(&self, other: &Self) -> UnitResult<Self> {
        self.check_additive(other, "add")?;
        Ok(self.derived(self.data.zip_with(&other.data, |a, b| a + b)?))
    }

    pub fn minus(&self, other: &Self) -> UnitResult<Self> {
        self.check_additive(other, "subtract")?;
        Ok(self.derived(self.data.zip_with(&other.data, |a, b| a - b)?))
    }

    /// Element-wise product. The result unit is found (or created) for the
    /// summed dimensions.
    pub fn times<K2: QuantityKind>(&self, other: &Matrix<K2, T>) -> UnitResult<Matrix<SiQuantity, T>> {
        check_relative::<K>("multiply")?;
        check_relative::<K2>("multiply")?;
        let data = self.data.zip_with(&other.data, |a, b| a * b)?;
        let unit = result_unit(self.dimensions().checked_plus(other.dimensions())?)?;
        Ok(Matrix::from_data(data, unit))
    }

    /// Element-wise quotient.
    pub fn divide<K2: QuantityKind>(&self, other: &Matrix<K2, T>) -> UnitResult<Matrix<SiQuantity, T>> {
        check_relative::<K>("divide")?;
        check_relative::<K2>("divide")?;
        let data = self.data.zip_with(&other.data, |a, b| a / b)?;
        let unit = result_unit(self.dimensions().checked_minus(other.dimensions())?)?;
        Ok(Matrix::from_data(data, unit))
    }

    /// Every cell multiplied by a scalar of any relative kind.
    pub fn times_scalar<K2: QuantityKind>(&self, s: &Scalar<K2, T>) -> UnitResult<Matrix<SiQuantity, T>> {
        check_relative::<K>("multiply")?;
        check_relative::<K2>("multiply")?;
        let factor = s.si();
        let unit = result_unit(self.dimensions().checked_plus(s.dimensions())?)?;
        Ok(Matrix::from_data(self.data.map(|v| v * factor), unit))
    }

    pub fn scaled(&self, factor: T) -> Self {
        self.derived(self.data.map(|v| v * factor))
    }

    // ── Mutation ────────────────────────────────────────────────────

    fn check_mutable(&self) -> UnitResult<()> {
        if !self.mutable {
            return Err(UnitError::ImmutableValue);
        }
        Ok(())
    }

    /// Set a cell from a value in the display unit.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> UnitResult<()> {
        self.check_mutable()?;
        let si = to_si(&self.unit, value);
        self.data.set(row, col, si)
    }

    pub fn set_si(&mut self, row: usize, col: usize, si: T) -> UnitResult<()> {
        self.check_mutable()?;
        self.data.set(row, col, si)
    }

    pub fn increment_by(&mut self, other: &Self) -> UnitResult<()> {
        self.check_mutable()?;
        self.check_additive(other, "add")?;
        self.data = self.data.zip_with(&other.data, |a, b| a + b)?;
        Ok(())
    }

    pub fn decrement_by(&mut self, other: &Self) -> UnitResult<()> {
        self.check_mutable()?;
        self.check_additive(other, "subtract")?;
        self.data = self.data.zip_with(&other.data, |a, b| a - b)?;
        Ok(())
    }

    pub fn multiply_by(&mut self, factor: T) -> UnitResult<()> {
        self.assign(|v| v * factor)
    }

    pub fn divide_by(&mut self, factor: T) -> UnitResult<()> {
        self.assign(|v| v / factor)
    }

    /// Apply `f` to every SI value in place. On sparse storage a function
    /// with `f(0) != 0` materializes every cell and the result is dense.
    pub fn assign(&mut self, f: impl Fn(T) -> T) -> UnitResult<()> {
        self.check_mutable()?;
        self.data.map_in_place(f);
        Ok(())
    }

    pub fn abs(&mut self) -> UnitResult<()> {
        self.assign(T::abs)
    }

    pub fn ceil(&mut self) -> UnitResult<()> {
        self.assign(T::ceil)
    }

    pub fn floor(&mut self) -> UnitResult<()> {
        self.assign(T::floor)
    }

    pub fn neg(&mut self) -> UnitResult<()> {
        self.assign(|v| -v)
    }

    /// Round to the nearest integer, ties to even.
    pub fn rint(&mut self) -> UnitResult<()> {
        self.assign(rint)
    }

    // ── Views / conversions ─────────────────────────────────────────

    /// A mutable view sharing storage until its first write.
    pub fn mutable(&self) -> Self {
        Self {
            mutable: true,
            ..self.clone()
        }
    }

    pub fn immutable(&self) -> Self {
        Self {
            mutable: false,
            ..self.clone()
        }
    }

    pub fn to_sparse(&self) -> Self {
        Self {
            data: self.data.to_sparse(),
            ..self.clone()
        }
    }

    pub fn to_dense(&self) -> Self {
        Self {
            data: self.data.to_dense(),
            ..self.clone()
        }
    }

    pub fn with_display_unit(&self, unit: &Unit) -> UnitResult<Self> {
        K::check_unit(unit)?;
        self.unit.check_compatible(unit)?;
        Ok(Self {
            unit: unit.clone(),
            ..self.clone()
        })
    }

    pub fn transpose(&self) -> Self {
        self.derived(self.data.transpose())
    }

    /// Sum of all SI values.
    pub fn z_sum(&self) -> Scalar<K, T> {
        Scalar::raw(self.data.z_sum(), self.unit.clone())
    }

    /// Number of non-zero cells.
    pub fn cardinality(&self) -> usize {
        self.data.cardinality()
    }

    pub fn row(&self, i: usize) -> UnitResult<Vector<K, T>> {
        Ok(Vector::from_matrix(self.derived(self.data.row(i)?)))
    }

    pub fn column(&self, j: usize) -> UnitResult<Vector<K, T>> {
        Ok(Vector::from_matrix(self.derived(self.data.column(j)?)))
    }

    pub fn diagonal(&self) -> UnitResult<Vector<K, T>> {
        Ok(Vector::from_matrix(self.derived(self.data.diagonal()?)))
    }

    /// Determinant of the SI values.
    pub fn determinant_si(&self) -> UnitResult<T> {
        data::determinant(&self.data)
    }

    /// Determinant as a value whose dimensions are the cell dimensions
    /// raised to the matrix order.
    pub fn determinant(&self) -> UnitResult<Scalar<SiQuantity, T>> {
        check_relative::<K>("take the determinant of")?;
        let order = i32::try_from(self.nrows()).map_err(|_| {
            UnitError::IllegalArgument(format!("matrix order {} too large", self.nrows()))
        })?;
        let dimensions = self.dimensions().checked_pow(order)?;
        let det = self.determinant_si()?;
        Ok(Scalar::raw(det, result_unit(dimensions)?))
    }

    // ── Kind conversion ─────────────────────────────────────────────

    pub fn as_kind<K2: NamedQuantity>(&self) -> UnitResult<Matrix<K2, T>> {
        Ok(Matrix::from_data(self.data.clone(), unit_for_kind::<K2>(&self.unit)?))
    }

    pub fn to_si_quantity(&self) -> UnitResult<Matrix<SiQuantity, T>> {
        check_relative::<K>("generalize")?;
        Ok(Matrix::from_data(self.data.clone(), self.unit.clone()))
    }
}

/// Equal shapes, dimensions and SI values, whatever the storage or
/// display unit.
impl<K: QuantityKind, T: Real> PartialEq for Matrix<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.data == other.data
    }
}

impl<K: QuantityKind, T: Real> fmt::Display for Matrix<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.values_in_unit().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_list(f, row)?;
        }
        f.write_str("]")?;
        write_abbreviation(f, &self.unit)
    }
}

pub(super) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(v, f)?;
    }
    f.write_str("]")
}

pub(super) fn write_abbreviation(f: &mut fmt::Formatter<'_>, unit: &Unit) -> fmt::Result {
    match unit.display_abbreviation() {
        "" => Ok(()),
        abbreviation => write!(f, " {abbreviation}"),
    }
}
