//! Generic Matrix Tests
//!
//! The matrix type only relies on the `Field` trait, so besides GF(2^8) it is
//! exercised here over the prime field GF(7).

use rsecc::reed_solomon::{Field, Gf256, Matrix, RsError, RsResult};

/// Integers modulo 7
#[derive(Debug, Clone, Copy)]
struct Gf7;

impl Field for Gf7 {
    type Elem = u8;

    fn zero(&self) -> u8 {
        0
    }

    fn one(&self) -> u8 {
        1
    }

    fn add(&self, a: u8, b: u8) -> u8 {
        (a + b) % 7
    }

    fn sub(&self, a: u8, b: u8) -> u8 {
        (a + 7 - b) % 7
    }

    fn mul(&self, a: u8, b: u8) -> u8 {
        (a * b) % 7
    }

    fn div(&self, a: u8, b: u8) -> RsResult<u8> {
        if b == 0 {
            return Err(RsError::DivisionByZero);
        }
        let inverse = (1..7u8).find(|&x| (x * b) % 7 == 1).ok_or(RsError::DivisionByZero)?;
        Ok(self.mul(a, inverse))
    }
}

// ============================================================================
// Prime Field
// ============================================================================

#[test]
fn test_inverse_over_prime_field() {
    let matrix = Matrix::from_rows(vec![vec![2, 1], vec![1, 1]], Gf7).unwrap();
    let inverse = matrix.inverse().unwrap();
    // [[2,1],[1,1]]^-1 = [[1,-1],[-1,2]] = [[1,6],[6,2]] mod 7
    assert_eq!(
        inverse,
        Matrix::from_rows(vec![vec![1, 6], vec![6, 2]], Gf7).unwrap()
    );
    assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(2, Gf7));
}

#[test]
fn test_elimination_over_prime_field_needs_subtraction() {
    // Over GF(7) subtraction differs from addition, so a wrong
    // operation in elimination leaves a nonzero entry below the diagonal
    let rows = vec![vec![1, 2, 3], vec![3, 1, 4], vec![2, 5, 6]];
    let mut matrix = Matrix::from_rows(rows, Gf7).unwrap();
    matrix.lower_gaussian_elim().unwrap();
    for row in 1..3 {
        for col in 0..row {
            assert_eq!(matrix.get(row, col), Ok(0), "entry ({}, {})", row, col);
        }
    }
    let inverse = matrix.upper_inverse().unwrap();
    assert_eq!(matrix.mul(&inverse).unwrap(), Matrix::identity(3, Gf7));
}

#[test]
fn test_singular_over_prime_field() {
    // Second row is 3 * first row mod 7
    let matrix = Matrix::from_rows(vec![vec![1, 2], vec![3, 6]], Gf7).unwrap();
    assert_eq!(matrix.inverse(), Err(RsError::SingularMatrix));
}

// ============================================================================
// GF(2^8)
// ============================================================================

#[test]
fn test_wide_matrix_elimination() {
    let gf = Gf256::new();
    // 2x4: only the leading 2x2 block must become upper triangular
    let mut matrix = Matrix::from_rows(vec![vec![0, 1, 7, 9], vec![3, 4, 5, 6]], gf).unwrap();
    matrix.lower_gaussian_elim().unwrap();
    assert_eq!(matrix.get(1, 0), Ok(0));
    assert_eq!(matrix.row(0), Ok(&[3u8, 4, 5, 6][..]));
}

#[test]
fn test_product_dimension_mismatch() {
    let gf = Gf256::new();
    let a = Matrix::new(2, 3, gf);
    let b = Matrix::new(2, 3, gf);
    assert_eq!(
        a.mul(&b),
        Err(RsError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_column_vector_product() {
    let gf = Gf256::new();
    let matrix = Matrix::from_rows(vec![vec![1, 0], vec![0, 1], vec![1, 1]], gf).unwrap();
    assert_eq!(matrix.left_mul_column_vec(&[0x0F, 0xF0]), Ok(vec![0x0F, 0xF0, 0xFF]));

    let mut out = [0u8; 2];
    assert!(matches!(
        matrix.left_mul_column_vec_into(&[1, 2], &mut out),
        Err(RsError::DimensionMismatch { expected: 3, actual: 2 })
    ));
}

#[test]
fn test_set_row_and_column_access() {
    let gf = Gf256::new();
    let mut matrix = Matrix::new(2, 3, gf);
    matrix.set_row(1, &[4, 5, 6]).unwrap();
    assert_eq!(matrix.column(2), Ok(vec![0, 6]));
    assert_eq!(matrix.transpose().row(2), Ok(&[0u8, 6][..]));
}
