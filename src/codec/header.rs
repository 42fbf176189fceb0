//! Piece file header
//!
//! Every piece starts with one text line describing the encoded file:
//!
//! ```text
//! RS_PARITY_PIECE_HEADER|FILE|<name>|n|<n>|k|<k>|size|<bytes>|piece|<index>\n
//! ```
//!
//! The binary body follows immediately after the newline.

use crate::reed_solomon::validate_parameters;
use std::fmt;
use std::io::{BufRead, Read};
use thiserror::Error;

/// First field of every piece header
pub const HEADER_MAGIC: &str = "RS_PARITY_PIECE_HEADER";

/// Header lines longer than this are rejected without reading further
pub const MAX_HEADER_LEN: usize = 4096;

const SEPARATOR: char = '|';
const FIELD_COUNT: usize = 11;

/// Reasons a header line cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("header is not terminated by a newline")]
    MissingNewline,

    #[error("header exceeds {} bytes", MAX_HEADER_LEN)]
    TooLong,

    #[error("header is not valid UTF-8")]
    NotUtf8,

    #[error("expected {} fields, found {}", FIELD_COUNT, .0)]
    WrongFieldCount(usize),

    #[error("bad magic {0:?}")]
    BadMagic(String),

    #[error("expected label {expected:?}, found {found:?}")]
    BadLabel { expected: &'static str, found: String },

    #[error("field {field} has non-numeric value {value:?}")]
    BadNumber { field: &'static str, value: String },

    #[error("invalid code parameters n={n}, k={k}")]
    InvalidParameters { n: usize, k: usize },

    #[error("piece index {piece} out of range for n={n}")]
    PieceOutOfRange { piece: usize, n: usize },

    #[error("I/O error while reading header: {0}")]
    Io(String),
}

/// Metadata stored at the start of every piece file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceHeader {
    pub file_name: String,
    pub n: usize,
    pub k: usize,
    pub size: u64,
    pub piece_index: usize,
}

impl PieceHeader {
    pub fn new(
        file_name: impl Into<String>,
        n: usize,
        k: usize,
        size: u64,
        piece_index: usize,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            n,
            k,
            size,
            piece_index,
        }
    }

    /// Same header for a different piece of the same file
    pub fn for_piece(&self, piece_index: usize) -> Self {
        Self {
            piece_index,
            ..self.clone()
        }
    }

    /// Number of `k`-byte windows, which is also the body length of every piece
    pub fn window_count(&self) -> u64 {
        self.size.div_ceil(self.k as u64)
    }

    /// Header line including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// Name of the first shared field on which `self` and `other` disagree
    pub fn mismatch(&self, other: &Self) -> Option<&'static str> {
        if self.file_name != other.file_name {
            Some("file name")
        } else if self.n != other.n {
            Some("n")
        } else if self.k != other.k {
            Some("k")
        } else if self.size != other.size {
            Some("size")
        } else {
            None
        }
    }

    /// Parse a header line, with or without its trailing newline
    pub fn parse(line: &str) -> Result<Self, HeaderError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(HeaderError::WrongFieldCount(fields.len()));
        }
        if fields[0] != HEADER_MAGIC {
            return Err(HeaderError::BadMagic(fields[0].to_string()));
        }
        for (index, label) in [(1, "FILE"), (3, "n"), (5, "k"), (7, "size"), (9, "piece")] {
            if fields[index] != label {
                return Err(HeaderError::BadLabel {
                    expected: label,
                    found: fields[index].to_string(),
                });
            }
        }

        let n = parse_number::<usize>("n", fields[4])?;
        let k = parse_number::<usize>("k", fields[6])?;
        let size = parse_number::<u64>("size", fields[8])?;
        let piece_index = parse_number::<usize>("piece", fields[10])?;

        if validate_parameters(n, k).is_err() {
            return Err(HeaderError::InvalidParameters { n, k });
        }
        if piece_index >= n {
            return Err(HeaderError::PieceOutOfRange {
                piece: piece_index,
                n,
            });
        }

        Ok(Self::new(fields[2], n, k, size, piece_index))
    }

    /// Read and parse the header line, leaving `reader` at the first body byte
    ///
    /// Returns the header and the number of bytes it occupied.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<(Self, usize), HeaderError> {
        let mut line = Vec::with_capacity(128);
        reader
            .take(MAX_HEADER_LEN as u64 + 1)
            .read_until(b'\n', &mut line)
            .map_err(|e| HeaderError::Io(e.to_string()))?;

        if line.len() > MAX_HEADER_LEN {
            return Err(HeaderError::TooLong);
        }
        if line.last() != Some(&b'\n') {
            return Err(HeaderError::MissingNewline);
        }
        let text = std::str::from_utf8(&line).map_err(|_| HeaderError::NotUtf8)?;
        Ok((Self::parse(text)?, line.len()))
    }
}

impl fmt::Display for PieceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{magic}|FILE|{name}|n|{n}|k|{k}|size|{size}|piece|{piece}",
            magic = HEADER_MAGIC,
            name = self.file_name,
            n = self.n,
            k = self.k,
            size = self.size,
            piece = self.piece_index
        )
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, HeaderError> {
    value.parse().map_err(|_| HeaderError::BadNumber {
        field,
        value: value.to_string(),
    })
}

/// Whether `name` can be written into a header and parsed back unchanged
pub fn is_storable_file_name(name: &str) -> bool {
    !name.contains(SEPARATOR) && !name.contains('\n') && !name.contains('\r')
}
