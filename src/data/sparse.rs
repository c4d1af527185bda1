use crate::traits::Real;

/// Coordinate-list payload: sorted linear (column-major) indices of the
/// non-zero cells and their values.
///
/// Zeros are never stored, so `indices.len()` is the non-zero count.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SparseStore<T> {
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Real> SparseStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from a dense column-major slice, dropping zeros.
    pub(crate) fn from_dense(data: &[T]) -> Self {
        let mut store = Self::new();
        for (k, &v) in data.iter().enumerate() {
            if v != T::zero() {
                store.indices.push(k);
                store.values.push(v);
            }
        }
        store
    }

    /// Build from unsorted `(linear index, value)` pairs. Later duplicates
    /// overwrite earlier ones.
    pub(crate) fn from_pairs(mut pairs: Vec<(usize, T)>) -> Self {
        pairs.sort_by_key(|&(k, _)| k);
        let mut store = Self::new();
        for (k, v) in pairs {
            if store.indices.last() == Some(&k) {
                store.indices.pop();
                store.values.pop();
            }
            if v != T::zero() {
                store.indices.push(k);
                store.values.push(v);
            }
        }
        store
    }

    pub(crate) fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn get(&self, k: usize) -> T {
        match self.indices.binary_search(&k) {
            Ok(pos) => self.values[pos],
            Err(_) => T::zero(),
        }
    }

    pub(crate) fn set(&mut self, k: usize, v: T) {
        match self.indices.binary_search(&k) {
            Ok(pos) if v == T::zero() => {
                self.indices.remove(pos);
                self.values.remove(pos);
            }
            Ok(pos) => self.values[pos] = v,
            Err(_) if v == T::zero() => {}
            Err(pos) => {
                self.indices.insert(pos, k);
                self.values.insert(pos, v);
            }
        }
    }

    /// Non-zero cells in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub(crate) fn to_dense(&self, len: usize) -> Vec<T> {
        let mut data = vec![T::zero(); len];
        for (k, v) in self.iter() {
            data[k] = v;
        }
        data
    }

    /// Apply `f` to the stored values, dropping any that become zero.
    pub(crate) fn map_nonzero(&self, f: impl Fn(T) -> T) -> Self {
        let mut out = Self::new();
        for (k, v) in self.iter() {
            let w = f(v);
            if w != T::zero() {
                out.indices.push(k);
                out.values.push(w);
            }
        }
        out
    }

    /// Merge two stores over the union of their non-zero cells.
    /// Only valid when `f(0, 0) == 0`.
    pub(crate) fn merge(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let zero = T::zero();
        let mut out = Self::new();
        let (mut i, mut j) = (0, 0);
        while i < self.nnz() || j < other.nnz() {
            let a = self.indices.get(i).copied().unwrap_or(usize::MAX);
            let b = other.indices.get(j).copied().unwrap_or(usize::MAX);
            let (k, w) = if a == b {
                i += 1;
                j += 1;
                (a, f(self.values[i - 1], other.values[j - 1]))
            } else if a < b {
                i += 1;
                (a, f(self.values[i - 1], zero))
            } else {
                j += 1;
                (b, f(zero, other.values[j - 1]))
            };
            if w != zero {
                out.indices.push(k);
                out.values.push(w);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_order_and_drops_zeros() {
        let mut s = SparseStore::<f64>::new();
        s.set(5, 1.0);
        s.set(1, 2.0);
        s.set(3, 3.0);
        assert_eq!(s.iter().map(|(k, _)| k).collect::<Vec<_>>(), [1, 3, 5]);
        s.set(3, 0.0);
        assert_eq!(s.nnz(), 2);
        assert_eq!(s.get(3), 0.0);
        s.set(7, 0.0);
        assert_eq!(s.nnz(), 2);
    }

    #[test]
    fn dense_round_trip() {
        let dense = [0.0, 1.5, 0.0, -2.0, 0.0];
        let s = SparseStore::from_dense(&dense);
        assert_eq!(s.nnz(), 2);
        assert_eq!(s.to_dense(5), dense);
    }

    #[test]
    fn pairs_last_wins() {
        let s = SparseStore::from_pairs(vec![(4, 1.0), (0, 2.0), (4, 3.0), (2, 0.0)]);
        assert_eq!(s.iter().collect::<Vec<_>>(), [(0, 2.0), (4, 3.0)]);
    }

    #[test]
    fn merge_union() {
        let a = SparseStore::from_dense(&[1.0, 0.0, 2.0, 0.0]);
        let b = SparseStore::from_dense(&[0.0, 3.0, -2.0, 0.0]);
        let c = a.merge(&b, |x, y| x + y);
        assert_eq!(c.to_dense(4), [1.0, 3.0, 0.0, 0.0]);
        assert_eq!(c.nnz(), 2);
    }
}
