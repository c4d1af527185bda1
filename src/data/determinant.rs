use crate::error::{UnitError, UnitResult};
use crate::traits::{MatrixRef, Real};

/// Determinant by cofactor expansion along the first remaining row.
///
/// Exact for small integer-valued matrices, where pivoting methods round.
/// Cost grows factorially, so this is meant for the small matrices that
/// carry physical quantities. Zero cells are skipped, which keeps sparse
/// payloads cheap: from order 3 up, a zero cell contributes nothing even
/// when its minor is infinite or NaN, where IEEE arithmetic would give
/// `0 * inf = NaN`. The determinant of a 0×0 matrix is 1.
pub(crate) fn determinant<T: Real>(m: &impl MatrixRef<T>) -> UnitResult<T> {
    let n = m.nrows();
    if n != m.ncols() {
        return Err(UnitError::NotSquare {
            rows: n,
            cols: m.ncols(),
        });
    }
    let cols: Vec<usize> = (0..n).collect();
    Ok(minor(m, 0, &cols))
}

/// Determinant of the submatrix made of rows `row..n` and `cols`.
fn minor<T: Real>(m: &impl MatrixRef<T>, row: usize, cols: &[usize]) -> T {
    match cols.len() {
        0 => T::one(),
        1 => m.get(row, cols[0]),
        2 => m.get(row, cols[0]) * m.get(row + 1, cols[1]) - m.get(row, cols[1]) * m.get(row + 1, cols[0]),
        _ => {
            let mut det = T::zero();
            let mut rest = Vec::with_capacity(cols.len() - 1);
            for (k, &c) in cols.iter().enumerate() {
                let a = m.get(row, c);
                if a == T::zero() {
                    continue;
                }
                rest.clear();
                rest.extend(cols.iter().copied().filter(|&x| x != c));
                let term = a * minor(m, row + 1, &rest);
                det = if k % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    }
}
