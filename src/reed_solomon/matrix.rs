//! Dense matrices over an arbitrary finite field
//!
//! [`Matrix`] stores its entries row-major and carries a handle to the
//! [`Field`] those entries belong to, so every algebraic operation (elimination,
//! inversion, products) uses the same four field operations. Indices are
//! zero-based; the public accessors are bounds-checked and report
//! [`RsError::IndexOutOfBounds`] instead of panicking.

use super::error::{RsError, RsResult};
use super::galois::Field;
use std::ops::Range;

/// Rectangular matrix over the field `F`
#[derive(Clone, Debug)]
pub struct Matrix<F: Field> {
    rows: usize,
    cols: usize,
    data: Vec<F::Elem>,
    field: F,
}

impl<F: Field> PartialEq for Matrix<F> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<F: Field> Eq for Matrix<F> {}

impl<F: Field> Matrix<F> {
    /// Create a zero matrix
    pub fn new(rows: usize, cols: usize, field: F) -> Self {
        let zero = field.zero();
        Self {
            rows,
            cols,
            data: vec![zero; rows * cols],
            field,
        }
    }

    /// Create a `size`×`size` identity matrix
    pub fn identity(size: usize, field: F) -> Self {
        let mut matrix = Self::new(size, size, field);
        let one = matrix.field.one();
        for i in 0..size {
            matrix.set_at(i, i, one);
        }
        matrix
    }

    /// Build a matrix from row vectors; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<F::Elem>>, field: F) -> RsResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(RsError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
            field,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> F::Elem {
        self.data[row * self.cols + col]
    }

    #[inline]
    fn set_at(&mut self, row: usize, col: usize, value: F::Elem) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    fn row_slice(&self, row: usize) -> &[F::Elem] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    fn check_bounds(&self, row: usize, col: usize) -> RsResult<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(RsError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> RsResult<F::Elem> {
        self.check_bounds(row, col)?;
        Ok(self.at(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: F::Elem) -> RsResult<()> {
        self.check_bounds(row, col)?;
        self.set_at(row, col, value);
        Ok(())
    }

    pub fn row(&self, row: usize) -> RsResult<&[F::Elem]> {
        self.check_bounds(row, 0)?;
        Ok(self.row_slice(row))
    }

    pub fn set_row(&mut self, row: usize, values: &[F::Elem]) -> RsResult<()> {
        self.check_bounds(row, 0)?;
        if values.len() != self.cols {
            return Err(RsError::DimensionMismatch {
                expected: self.cols,
                actual: values.len(),
            });
        }
        self.data[row * self.cols..(row + 1) * self.cols].copy_from_slice(values);
        Ok(())
    }

    pub fn column(&self, col: usize) -> RsResult<Vec<F::Elem>> {
        self.check_bounds(0, col)?;
        Ok((0..self.rows).map(|row| self.at(row, col)).collect())
    }

    /// Return the transposed matrix
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::new(self.cols, self.rows, self.field.clone());
        for row in 0..self.rows {
            for col in 0..self.cols {
                transposed.set_at(col, row, self.at(row, col));
            }
        }
        transposed
    }

    /// Gather the given rows, in the given order, into a new matrix
    pub fn select_rows(&self, indices: &[usize]) -> RsResult<Self> {
        let mut selected = Self::new(indices.len(), self.cols, self.field.clone());
        for (dest, &src) in indices.iter().enumerate() {
            let row = self.row(src)?;
            selected.data[dest * self.cols..(dest + 1) * self.cols].copy_from_slice(row);
        }
        Ok(selected)
    }

    /// Copy out the sub-matrix spanning `rows` × `cols`
    pub fn block(&self, rows: Range<usize>, cols: Range<usize>) -> RsResult<Self> {
        if rows.end > self.rows || cols.end > self.cols {
            return Err(RsError::IndexOutOfBounds {
                row: rows.end,
                col: cols.end,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut block = Self::new(rows.len(), cols.len(), self.field.clone());
        for (dest_row, row) in rows.enumerate() {
            for (dest_col, col) in cols.clone().enumerate() {
                block.set_at(dest_row, dest_col, self.at(row, col));
            }
        }
        Ok(block)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.data.swap(a * self.cols + col, b * self.cols + col);
        }
    }

    /// `row[target] -= factor * row[source]`, starting at column `from`
    fn sub_scaled_row(&mut self, target: usize, source: usize, factor: F::Elem, from: usize) {
        for col in from..self.cols {
            let scaled = self.field.mul(factor, self.at(source, col));
            let value = self.field.sub(self.at(target, col), scaled);
            self.set_at(target, col, value);
        }
    }

    fn scale_row(&mut self, row: usize, factor: F::Elem) {
        for col in 0..self.cols {
            let value = self.field.mul(self.at(row, col), factor);
            self.set_at(row, col, value);
        }
    }

    /// Reduce to row-echelon form by eliminating every entry below the diagonal
    ///
    /// Only row operations are used: swaps and subtracting multiples of the
    /// pivot row. Each of the first `min(rows, cols)` columns must have a
    /// nonzero entry on or below the diagonal, otherwise the matrix is
    /// reported as singular and is left partially reduced.
    pub fn lower_gaussian_elim(&mut self) -> RsResult<()> {
        let steps = self.rows.min(self.cols);
        for col in 0..steps {
            let pivot_row = (col..self.rows)
                .find(|&row| !self.field.is_zero(self.at(row, col)))
                .ok_or(RsError::SingularMatrix)?;
            self.swap_rows(pivot_row, col);

            let pivot = self.at(col, col);
            for row in (col + 1)..self.rows {
                let entry = self.at(row, col);
                if self.field.is_zero(entry) {
                    continue;
                }
                let factor = self.field.div(entry, pivot)?;
                self.sub_scaled_row(row, col, factor, col);
            }
        }
        Ok(())
    }

    /// Invert an upper-triangular matrix by back-substitution
    ///
    /// Entries below the diagonal are not read.
    pub fn upper_inverse(&self) -> RsResult<Self> {
        if !self.is_square() {
            return Err(RsError::DimensionMismatch {
                expected: self.rows,
                actual: self.cols,
            });
        }
        let size = self.rows;
        let zero = self.field.zero();
        let one = self.field.one();
        let mut inverse = Self::new(size, size, self.field.clone());

        for i in (0..size).rev() {
            let diagonal = self.at(i, i);
            if self.field.is_zero(diagonal) {
                return Err(RsError::SingularMatrix);
            }
            for j in 0..size {
                let mut acc = if i == j { one } else { zero };
                for m in (i + 1)..size {
                    let term = self.field.mul(self.at(i, m), inverse.at(m, j));
                    acc = self.field.sub(acc, term);
                }
                inverse.set_at(i, j, self.field.div(acc, diagonal)?);
            }
        }
        Ok(inverse)
    }

    /// General inverse via Gauss-Jordan elimination against the identity
    pub fn inverse(&self) -> RsResult<Self> {
        if !self.is_square() {
            return Err(RsError::DimensionMismatch {
                expected: self.rows,
                actual: self.cols,
            });
        }
        let size = self.rows;
        let mut work = self.clone();
        let mut inverse = Self::identity(size, self.field.clone());

        for col in 0..size {
            let pivot_row = (col..size)
                .find(|&row| !self.field.is_zero(work.at(row, col)))
                .ok_or(RsError::SingularMatrix)?;
            work.swap_rows(pivot_row, col);
            inverse.swap_rows(pivot_row, col);

            let scale = self.field.div(self.field.one(), work.at(col, col))?;
            work.scale_row(col, scale);
            inverse.scale_row(col, scale);

            for row in 0..size {
                if row == col {
                    continue;
                }
                let factor = work.at(row, col);
                if self.field.is_zero(factor) {
                    continue;
                }
                work.sub_scaled_row(row, col, factor, 0);
                for j in 0..size {
                    let scaled = self.field.mul(factor, inverse.at(col, j));
                    let value = self.field.sub(inverse.at(row, j), scaled);
                    inverse.set_at(row, j, value);
                }
            }
        }
        Ok(inverse)
    }

    /// Matrix product `self · other`
    pub fn mul(&self, other: &Self) -> RsResult<Self> {
        if self.cols != other.rows {
            return Err(RsError::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }
        let mut product = Self::new(self.rows, other.cols, self.field.clone());
        for row in 0..self.rows {
            for col in 0..other.cols {
                let mut acc = self.field.zero();
                for m in 0..self.cols {
                    let term = self.field.mul(self.at(row, m), other.at(m, col));
                    acc = self.field.add(acc, term);
                }
                product.set_at(row, col, acc);
            }
        }
        Ok(product)
    }

    /// Matrix-vector product `self · v`, returned as a vector of length `rows`
    pub fn left_mul_column_vec(&self, v: &[F::Elem]) -> RsResult<Vec<F::Elem>> {
        let mut out = vec![self.field.zero(); self.rows];
        self.left_mul_column_vec_into(v, &mut out)?;
        Ok(out)
    }

    /// Same as [`left_mul_column_vec`](Self::left_mul_column_vec) but writes
    /// into a caller-provided buffer of length `rows`
    pub fn left_mul_column_vec_into(&self, v: &[F::Elem], out: &mut [F::Elem]) -> RsResult<()> {
        if v.len() != self.cols {
            return Err(RsError::DimensionMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }
        if out.len() != self.rows {
            return Err(RsError::DimensionMismatch {
                expected: self.rows,
                actual: out.len(),
            });
        }
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self
                .row_slice(row)
                .iter()
                .zip(v)
                .fold(self.field.zero(), |acc, (&a, &b)| {
                    self.field.add(acc, self.field.mul(a, b))
                });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reed_solomon::galois::Gf256;

    fn gf() -> Gf256 {
        Gf256::new()
    }

    #[test]
    fn test_matrix_basic_operations() {
        let mut matrix = Matrix::new(3, 3, gf());
        matrix.set(0, 0, 1).unwrap();
        matrix.set(1, 1, 2).unwrap();
        matrix.set(2, 2, 3).unwrap();

        assert_eq!(matrix.get(0, 0), Ok(1));
        assert_eq!(matrix.get(1, 1), Ok(2));
        assert_eq!(matrix.get(2, 2), Ok(3));
        assert_eq!(matrix.get(0, 1), Ok(0));
    }

    #[test]
    fn test_bounds_are_checked() {
        let mut matrix = Matrix::new(2, 3, gf());
        assert!(matches!(
            matrix.get(2, 0),
            Err(RsError::IndexOutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        ));
        assert!(matrix.set(0, 3, 1).is_err());
        assert!(matrix.row(5).is_err());
        assert!(matrix.column(3).is_err());
        assert_eq!(
            matrix.set_row(0, &[1, 2]),
            Err(RsError::DimensionMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_identity_matrix() {
        let identity = Matrix::identity(4, gf());
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1 } else { 0 };
                assert_eq!(identity.get(i, j), Ok(expected));
            }
        }
    }

    #[test]
    fn test_transpose_swaps_dimensions() {
        let matrix = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]], gf()).unwrap();
        let transposed = matrix.transpose();
        assert_eq!(transposed.rows(), 3);
        assert_eq!(transposed.cols(), 2);
        assert_eq!(transposed.row(2), Ok(&[3u8, 6][..]));
        assert_eq!(transposed.transpose(), matrix);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = Matrix::from_rows(vec![vec![1, 2], vec![3]], gf());
        assert!(matches!(result, Err(RsError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_gaussian_elim_swaps_rows_for_pivot() {
        let mut matrix = Matrix::from_rows(vec![vec![0, 1], vec![1, 0]], gf()).unwrap();
        matrix.lower_gaussian_elim().unwrap();
        assert_eq!(matrix, Matrix::identity(2, gf()));
    }

    #[test]
    fn test_gaussian_elim_detects_singular_column() {
        let mut matrix = Matrix::from_rows(vec![vec![0, 1], vec![0, 2]], gf()).unwrap();
        assert_eq!(matrix.lower_gaussian_elim(), Err(RsError::SingularMatrix));
    }

    #[test]
    fn test_upper_inverse() {
        let upper =
            Matrix::from_rows(vec![vec![3, 7, 9], vec![0, 5, 2], vec![0, 0, 11]], gf()).unwrap();
        let inverse = upper.upper_inverse().unwrap();
        assert_eq!(upper.mul(&inverse).unwrap(), Matrix::identity(3, gf()));
    }

    #[test]
    fn test_upper_inverse_zero_diagonal() {
        let upper = Matrix::from_rows(vec![vec![1, 7], vec![0, 0]], gf()).unwrap();
        assert_eq!(upper.upper_inverse(), Err(RsError::SingularMatrix));
    }

    #[test]
    fn test_inverse_law() {
        let matrix =
            Matrix::from_rows(vec![vec![1, 1, 1], vec![1, 2, 4], vec![1, 3, 5]], gf()).unwrap();
        let inverse = matrix.inverse().unwrap();
        assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(3, gf()));
        assert_eq!(inverse.mul(&matrix).unwrap(), Matrix::identity(3, gf()));
    }

    #[test]
    fn test_inverse_detects_singular() {
        // Second row is 2 * first row
        let matrix = Matrix::from_rows(vec![vec![1, 3], vec![2, 6]], gf()).unwrap();
        assert_eq!(matrix.inverse(), Err(RsError::SingularMatrix));
    }

    #[test]
    fn test_inverse_requires_square() {
        let matrix = Matrix::new(2, 3, gf());
        assert!(matches!(matrix.inverse(), Err(RsError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_left_mul_column_vec() {
        let identity = Matrix::identity(3, gf());
        assert_eq!(identity.left_mul_column_vec(&[7, 8, 9]), Ok(vec![7, 8, 9]));

        let matrix = Matrix::from_rows(vec![vec![1, 1]], gf()).unwrap();
        assert_eq!(matrix.left_mul_column_vec(&[5, 3]), Ok(vec![5 ^ 3]));
        assert_eq!(
            matrix.left_mul_column_vec(&[1, 2, 3]),
            Err(RsError::DimensionMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_select_rows_and_block() {
        let matrix =
            Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]], gf()).unwrap();
        let selected = matrix.select_rows(&[2, 0]).unwrap();
        assert_eq!(selected.row(0), Ok(&[5u8, 6][..]));
        assert_eq!(selected.row(1), Ok(&[1u8, 2][..]));
        assert!(matrix.select_rows(&[3]).is_err());

        let block = matrix.block(1..3, 1..2).unwrap();
        assert_eq!(block.column(0), Ok(vec![4, 6]));
        assert!(matrix.block(0..4, 0..1).is_err());
    }
}
