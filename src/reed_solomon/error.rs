//! Error types for field, matrix and Reed-Solomon code operations

use thiserror::Error;

/// Errors that can occur during Reed-Solomon operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsError {
    /// Code parameters outside `0 < k < n <= 256`
    #[error("Invalid code parameters (n={n}, k={k}): need 0 < k < n <= 256")]
    InvalidParameters { n: usize, k: usize },

    /// Vector or matrix length does not match the operation
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Division by the zero element
    #[error("Division by zero in Galois field")]
    DivisionByZero,

    /// No usable pivot during elimination or inversion
    #[error("Matrix is singular")]
    SingularMatrix,

    /// Decoder position list is malformed
    #[error("Invalid decoder positions: {0}")]
    InvalidInput(String),

    /// `decode` called before `prepare_decoder`
    #[error("Decoder has not been prepared for an erasure pattern")]
    NotReady,

    /// Row or column index outside the matrix
    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Result type for Reed-Solomon operations
pub type RsResult<T> = Result<T, RsError>;
