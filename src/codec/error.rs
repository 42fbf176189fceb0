//! Error types for piece file encoding and decoding

use crate::reed_solomon::RsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while encoding a file into pieces or decoding it back
#[derive(Debug, Error)]
pub enum CodecError {
    /// Code parameters outside `0 < k < n <= 256`
    #[error("Invalid (n, k) = ({n}, {k}): need 0 < k < n <= 256")]
    InvalidParameters { n: usize, k: usize },

    /// Piece header is malformed or disagrees with the other pieces
    #[error("Piece {file} has an incorrect header: {reason}")]
    HeaderMismatch { file: PathBuf, reason: String },

    /// Fewer pieces supplied than the code needs
    #[error("Not enough pieces for decoding: needed {needed}, got {available}")]
    InsufficientPieces { needed: usize, available: usize },

    /// Piece body is shorter or longer than the header promises
    #[error("Piece {file} holds {actual} data bytes, expected {expected}")]
    TruncatedPiece {
        file: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Source file name cannot be stored in a piece header
    #[error("File name {0:?} cannot be stored in a piece header")]
    InvalidFileName(String),

    /// Failed to open file for reading
    #[error("Failed to open file for reading: {file}: {source}")]
    FileOpenError {
        file: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create output file
    #[error("Failed to create output file: {file}: {source}")]
    FileCreateError {
        file: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read from an input file
    #[error("Failed to read from {file}: {source}")]
    FileReadError {
        file: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write to an output file
    #[error("Failed to write to {file}: {source}")]
    FileWriteError {
        file: PathBuf,
        source: std::io::Error,
    },

    /// Failed to rename temporary file
    #[error("Failed to rename {temp_path} to {final_path}: {source}")]
    FileRenameError {
        temp_path: PathBuf,
        final_path: PathBuf,
        source: std::io::Error,
    },

    /// Field or matrix failure
    #[error("Reed-Solomon error: {0}")]
    ReedSolomon(#[from] RsError),

    /// I/O error occurred (catch-all for other I/O errors)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
