//! Shared numeric payload of the value containers.
//!
//! [`ValueData`] is a runtime-sized 2-D array of SI values in either dense
//! column-major storage or a sorted coordinate list. Vectors use a 1×N
//! payload. The backing store sits behind an `Arc`, so clones are cheap and
//! share storage until one of them is written to.

mod determinant;
mod sparse;

use std::sync::Arc;

use tracing::trace;

use crate::error::{UnitError, UnitResult};
use crate::traits::{MatrixRef, Real};

pub(crate) use determinant::determinant;
use sparse::SparseStore;

/// Storage layout of a vector or matrix payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Dense,
    Sparse,
}

#[derive(Debug, Clone)]
enum Store<T> {
    Dense(Arc<Vec<T>>),
    Sparse(Arc<SparseStore<T>>),
}

/// Runtime-sized 2-D array of SI values.
#[derive(Debug, Clone)]
pub(crate) struct ValueData<T> {
    nrows: usize,
    ncols: usize,
    store: Store<T>,
}

impl<T: Real> ValueData<T> {
    // ── Construction ────────────────────────────────────────────────

    pub(crate) fn zeros(nrows: usize, ncols: usize, storage: StorageType) -> Self {
        let store = match storage {
            StorageType::Dense => Store::Dense(Arc::new(vec![T::zero(); nrows * ncols])),
            StorageType::Sparse => Store::Sparse(Arc::new(SparseStore::new())),
        };
        Self { nrows, ncols, store }
    }

    /// Build from column-major data.
    pub(crate) fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> UnitResult<Self> {
        if data.len() != nrows * ncols {
            return Err(UnitError::size_mismatch((nrows, ncols), (1, data.len())));
        }
        Ok(Self {
            nrows,
            ncols,
            store: Store::Dense(Arc::new(data)),
        })
    }

    /// Build from rows, transposing into column-major storage. Every row
    /// must have the length of the first.
    pub(crate) fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> UnitResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = vec![T::zero(); nrows * ncols];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(UnitError::size_mismatch((nrows, ncols), (i + 1, row.len())));
            }
            for (j, &v) in row.iter().enumerate() {
                data[j * nrows + i] = v;
            }
        }
        Self::from_vec(nrows, ncols, data)
    }

    pub(crate) fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self {
            nrows,
            ncols,
            store: Store::Dense(Arc::new(data)),
        }
    }

    /// Sparse payload from `(row, col, value)` entries.
    pub(crate) fn from_entries(
        nrows: usize,
        ncols: usize,
        entries: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> UnitResult<Self> {
        let mut pairs = Vec::new();
        for (row, col, v) in entries {
            check_index("row", row, nrows)?;
            check_index("column", col, ncols)?;
            pairs.push((col * nrows + row, v));
        }
        Ok(Self {
            nrows,
            ncols,
            store: Store::Sparse(Arc::new(SparseStore::from_pairs(pairs))),
        })
    }

    // ── Shape and storage ───────────────────────────────────────────

    #[inline]
    pub(crate) fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub(crate) fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nrows * self.ncols
    }

    pub(crate) fn storage_type(&self) -> StorageType {
        match self.store {
            Store::Dense(_) => StorageType::Dense,
            Store::Sparse(_) => StorageType::Sparse,
        }
    }

    /// Whether another payload shares this backing store.
    pub(crate) fn is_shared(&self) -> bool {
        match &self.store {
            Store::Dense(d) => Arc::strong_count(d) > 1,
            Store::Sparse(s) => Arc::strong_count(s) > 1,
        }
    }

    pub(crate) fn to_dense(&self) -> Self {
        match &self.store {
            Store::Dense(_) => self.clone(),
            Store::Sparse(s) => Self {
                nrows: self.nrows,
                ncols: self.ncols,
                store: Store::Dense(Arc::new(s.to_dense(self.len()))),
            },
        }
    }

    pub(crate) fn to_sparse(&self) -> Self {
        match &self.store {
            Store::Sparse(_) => self.clone(),
            Store::Dense(d) => Self {
                nrows: self.nrows,
                ncols: self.ncols,
                store: Store::Sparse(Arc::new(SparseStore::from_dense(d))),
            },
        }
    }

    pub(crate) fn to_storage(&self, storage: StorageType) -> Self {
        match storage {
            StorageType::Dense => self.to_dense(),
            StorageType::Sparse => self.to_sparse(),
        }
    }

    // ── Element access ──────────────────────────────────────────────

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        let k = col * self.nrows + row;
        match &self.store {
            Store::Dense(d) => d[k],
            Store::Sparse(s) => s.get(k),
        }
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> UnitResult<T> {
        check_index("row", row, self.nrows)?;
        check_index("column", col, self.ncols)?;
        Ok(self.at(row, col))
    }

    /// Write one cell, detaching from any shared store first.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) -> UnitResult<()> {
        check_index("row", row, self.nrows)?;
        check_index("column", col, self.ncols)?;
        self.log_detach();
        let k = col * self.nrows + row;
        match &mut self.store {
            Store::Dense(d) => Arc::make_mut(d)[k] = value,
            Store::Sparse(s) => Arc::make_mut(s).set(k, value),
        }
        Ok(())
    }

    fn log_detach(&self) {
        if self.is_shared() {
            trace!(rows = self.nrows, cols = self.ncols, "copy-on-write detach");
        }
    }

    /// Values row by row.
    pub(crate) fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.nrows)
            .map(|i| (0..self.ncols).map(|j| self.at(i, j)).collect())
            .collect()
    }

    /// Values in column-major order.
    pub(crate) fn to_vec(&self) -> Vec<T> {
        match &self.store {
            Store::Dense(d) => d.as_ref().clone(),
            Store::Sparse(s) => s.to_dense(self.len()),
        }
    }

    // ── Cell-wise operations ────────────────────────────────────────

    /// Apply `f` to every cell. Sparse payloads stay sparse only when `f`
    /// maps zero to zero; otherwise every implicit zero is materialized.
    pub(crate) fn map(&self, f: impl Fn(T) -> T) -> Self {
        match &self.store {
            Store::Sparse(s) if f(T::zero()) == T::zero() => Self {
                nrows: self.nrows,
                ncols: self.ncols,
                store: Store::Sparse(Arc::new(s.map_nonzero(f))),
            },
            Store::Sparse(s) => Self {
                nrows: self.nrows,
                ncols: self.ncols,
                store: Store::Dense(Arc::new(s.to_dense(self.len()).into_iter().map(f).collect())),
            },
            Store::Dense(d) => Self {
                nrows: self.nrows,
                ncols: self.ncols,
                store: Store::Dense(Arc::new(d.iter().map(|&v| f(v)).collect())),
            },
        }
    }

    /// In-place variant of [`map`](Self::map).
    pub(crate) fn map_in_place(&mut self, f: impl Fn(T) -> T) {
        self.log_detach();
        if let Store::Dense(d) = &mut self.store {
            Arc::make_mut(d).iter_mut().for_each(|v| *v = f(*v));
            return;
        }
        *self = self.map(f);
    }

    /// Combine two payloads of equal shape cell by cell. The result is
    /// sparse when both inputs are and `f(0, 0) == 0`.
    pub(crate) fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> UnitResult<Self> {
        if self.shape() != other.shape() {
            return Err(UnitError::size_mismatch(self.shape(), other.shape()));
        }
        let zero = T::zero();
        if let (Store::Sparse(a), Store::Sparse(b)) = (&self.store, &other.store) {
            if f(zero, zero) == zero {
                return Ok(Self {
                    nrows: self.nrows,
                    ncols: self.ncols,
                    store: Store::Sparse(Arc::new(a.merge(b, f))),
                });
            }
        }
        let data = self
            .to_vec()
            .into_iter()
            .zip(other.to_vec())
            .map(|(a, b)| f(a, b))
            .collect();
        Self::from_vec(self.nrows, self.ncols, data)
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Row `i` as a 1×ncols payload in the same storage.
    pub(crate) fn row(&self, i: usize) -> UnitResult<Self> {
        check_index("row", i, self.nrows)?;
        let row = Self::from_fn(1, self.ncols, |_, j| self.at(i, j));
        Ok(row.to_storage(self.storage_type()))
    }

    /// Column `j` as a 1×nrows payload in the same storage.
    pub(crate) fn column(&self, j: usize) -> UnitResult<Self> {
        check_index("column", j, self.ncols)?;
        let col = Self::from_fn(1, self.nrows, |_, i| self.at(i, j));
        Ok(col.to_storage(self.storage_type()))
    }

    pub(crate) fn diagonal(&self) -> UnitResult<Self> {
        if self.nrows != self.ncols {
            return Err(UnitError::NotSquare {
                rows: self.nrows,
                cols: self.ncols,
            });
        }
        let diag = Self::from_fn(1, self.nrows, |_, i| self.at(i, i));
        Ok(diag.to_storage(self.storage_type()))
    }

    pub(crate) fn transpose(&self) -> Self {
        match &self.store {
            Store::Dense(_) => Self::from_fn(self.ncols, self.nrows, |i, j| self.at(j, i)),
            Store::Sparse(s) => {
                let pairs = s
                    .iter()
                    .map(|(k, v)| {
                        let (row, col) = (k % self.nrows, k / self.nrows);
                        (row * self.ncols + col, v)
                    })
                    .collect();
                Self {
                    nrows: self.ncols,
                    ncols: self.nrows,
                    store: Store::Sparse(Arc::new(SparseStore::from_pairs(pairs))),
                }
            }
        }
    }

    // ── Reductions ──────────────────────────────────────────────────

    pub(crate) fn z_sum(&self) -> T {
        match &self.store {
            Store::Dense(d) => d.iter().fold(T::zero(), |acc, &v| acc + v),
            Store::Sparse(s) => s.iter().fold(T::zero(), |acc, (_, v)| acc + v),
        }
    }

    /// Number of non-zero cells.
    pub(crate) fn cardinality(&self) -> usize {
        match &self.store {
            Store::Dense(d) => d.iter().filter(|&&v| v != T::zero()).count(),
            Store::Sparse(s) => s.nnz(),
        }
    }
}

fn check_index(what: &'static str, index: usize, len: usize) -> UnitResult<()> {
    if index >= len {
        return Err(UnitError::IndexOutOfBounds { what, index, len });
    }
    Ok(())
}

impl<T: Real> MatrixRef<T> for ValueData<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self.at(row, col)
    }
}

/// Cell-wise equality, independent of storage layout.
impl<T: Real> PartialEq for ValueData<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && (0..self.ncols).all(|j| (0..self.nrows).all(|i| self.at(i, j) == other.at(i, j)))
    }
}
